//! Application state for the decoder API.

use std::sync::Arc;

use crate::config::DecoderConfig;

/// Shared application state.
///
/// Holds the decoder configuration requests start from.
#[derive(Clone)]
pub struct AppState {
    config: Arc<DecoderConfig>,
}

impl AppState {
    /// Creates a new application state with the given configuration.
    pub fn new(config: DecoderConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }
}
