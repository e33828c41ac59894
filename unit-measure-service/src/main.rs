use anyhow::Context;
use unit_measure_service::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    init_tracing(&config).context("failed to initialize tracing")?;

    tracing::debug!(?config, "Configuration loaded");

    let pool = create_pool(&config.database)
        .await
        .context("failed to connect to the database")?;

    if config.database.run_migrations {
        run_migrations(&pool)
            .await
            .context("failed to run database migrations")?;
    }

    let state = AppState::new(config.clone(), PgUnitMeasureRepository::new(pool));

    Server::new(config)
        .serve(router(state))
        .await
        .context("server error")?;

    Ok(())
}
