//! HTTP server with graceful shutdown

use axum::{error_handling::HandleErrorLayer, extract::DefaultBodyLimit, Router};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

use crate::{
    config::Config,
    error::Result,
    middleware::{
        cors_layer, panic_response, request_id_layer, request_id_propagation_layer,
        sensitive_headers_layer, timeout_response,
    },
};

/// Server instance
pub struct Server {
    config: Config,
}

impl Server {
    /// Create a new server instance
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Socket address the server binds to
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.config.service.port))
    }

    /// Wrap a router in the service middleware stack
    ///
    /// Each `.layer` wraps everything above it, so panic recovery is the
    /// outermost layer and CORS the innermost.
    ///
    /// The body limit is enforced by the JSON extractor, so an oversized
    /// body is rejected with the usual 400 envelope. A timeout answers 408
    /// with an envelope as well.
    pub fn layered(&self, app: Router) -> Router {
        let body_limit = self.config.middleware.body_limit_mb * 1024 * 1024;

        app.layer(cors_layer(&self.config.middleware.cors_mode))
            .layer(CompressionLayer::new())
            .layer(
                ServiceBuilder::new()
                    .layer(HandleErrorLayer::new(timeout_response))
                    .timeout(Duration::from_secs(self.config.service.timeout_secs)),
            )
            .layer(DefaultBodyLimit::max(body_limit))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().include_headers(true))
                    .on_response(DefaultOnResponse::new().include_headers(true)),
            )
            .layer(sensitive_headers_layer())
            .layer(request_id_propagation_layer())
            .layer(request_id_layer())
            .layer(CatchPanicLayer::custom(panic_response))
    }

    /// Run the server with the given router
    pub async fn serve(self, app: Router) -> Result<()> {
        let addr = self.addr();

        tracing::info!("Starting {} on {}", self.config.service.name, addr);
        self.log_middleware_config();

        let app = self.layered(app);

        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    fn log_middleware_config(&self) {
        tracing::info!(
            body_limit_mb = self.config.middleware.body_limit_mb,
            cors_mode = %self.config.middleware.cors_mode,
            timeout_secs = self.config.service.timeout_secs,
            pagination = %self.config.pagination.convention,
            "Middleware configured"
        );
    }
}

/// Wait for shutdown signal (SIGTERM or SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl+C), starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }

    tracing::info!("Shutdown signal received, draining requests...");
}
