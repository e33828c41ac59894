//! Application state management

use std::sync::Arc;

use crate::{config::Config, repository::UnitMeasureRepository};

/// Application state shared across handlers
///
/// Generic over the repository so the same router serves PostgreSQL in
/// production and an in-memory store in tests.
pub struct AppState<R> {
    config: Arc<Config>,
    repository: Arc<R>,
}

// Derived Clone would require `R: Clone`.
impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: UnitMeasureRepository> AppState<R> {
    /// Create state from a configuration and a repository
    pub fn new(config: Config, repository: R) -> Self {
        Self {
            config: Arc::new(config),
            repository: Arc::new(repository),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the repository
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Whether internal error details may be returned to clients
    pub fn debug(&self) -> bool {
        self.config.debug
    }
}
