//! Application State
//!
//! Shared state accessible by all handlers.
//! Holds the store handle only; every request opens its own session.

use std::sync::Arc;
use std::time::Instant;

use crate::config::ServerConfig;
use crate::storage::Store;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Attendance database handle
    pub store: Store,
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(store: Store, config: ServerConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
