use crate::domain::{AppError, ConsoleConfig};
use crate::services::HttpApiClient;

/// Application context holding dependencies for command execution.
pub struct AppContext<A> {
    api: A,
    config: ConsoleConfig,
}

impl<A> AppContext<A> {
    /// Create a new application context.
    pub fn new(api: A, config: ConsoleConfig) -> Self {
        Self { api, config }
    }

    /// Get a reference to the admin API client.
    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }
}

impl AppContext<HttpApiClient> {
    /// Build a context talking to the API configured in `config`.
    pub fn connect(config: ConsoleConfig) -> Result<Self, AppError> {
        let api = HttpApiClient::new(&config.api)?;
        Ok(Self::new(api, config))
    }
}
