//! Shared handler state

use crate::config::ServerConfig;
use bloomwatch_core::{Clock, DemoDataProvider, SyntheticProvider, SystemClock};
use std::sync::Arc;

/// Clock and data provider behind every route. Cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub clock: Arc<dyn Clock>,
    pub provider: Arc<dyn DemoDataProvider>,
}

impl AppState {
    pub fn new(clock: impl Clock + 'static, provider: impl DemoDataProvider + 'static) -> Self {
        Self {
            clock: Arc::new(clock),
            provider: Arc::new(provider),
        }
    }

    /// Wall clock and synthetic data seeded from the configuration
    #[must_use]
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(SystemClock, SyntheticProvider::new(config.seed))
    }
}
