pub mod console_config;
pub mod loader;

pub use console_config::{ApiConfig, ConsoleConfig, PollingConfig};
pub use loader::{API_URL_ENV, CONFIG_FILE, apply_env_overrides, load_config};
