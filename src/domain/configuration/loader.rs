//! Console configuration loading.

use std::path::{Path, PathBuf};

use tracing::debug;
use url::Url;

use crate::domain::{AppError, ConsoleConfig};

/// Config file looked up in the working directory when no path is given.
pub const CONFIG_FILE: &str = "evalctl.toml";
/// Environment variable overriding `api.base_url`.
pub const API_URL_ENV: &str = "EVALCTL_API_URL";

/// Load the configuration.
///
/// An explicit path must exist. Without one, `./evalctl.toml` is read when present
/// and defaults are used otherwise. `EVALCTL_API_URL` overrides the base URL.
pub fn load_config(explicit: Option<&Path>) -> Result<ConsoleConfig, AppError> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(AppError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            Some(path.to_path_buf())
        }
        None => Some(PathBuf::from(CONFIG_FILE)).filter(|path| path.exists()),
    };

    let mut config = match path {
        Some(path) => {
            debug!(path = %path.display(), "Loading config");
            parse_config(&std::fs::read_to_string(&path)?)?
        }
        None => ConsoleConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    config.validate()?;
    Ok(config)
}

fn parse_config(content: &str) -> Result<ConsoleConfig, AppError> {
    Ok(toml::from_str(content)?)
}

/// Apply environment overrides using `lookup` to read variables.
pub fn apply_env_overrides(
    config: &mut ConsoleConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), AppError> {
    if let Some(raw) = lookup(API_URL_ENV).filter(|value| !value.trim().is_empty()) {
        config.api.base_url = Url::parse(raw.trim()).map_err(|e| {
            AppError::config_error(format!("{} is not a valid URL ({}): {}", API_URL_ENV, raw, e))
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_parses_from_toml() {
        let config = parse_config(
            r#"
[api]
base_url = "https://eval.example.com/api/v1"
timeout_secs = 5

[polling]
interval_ms = 500
"#,
        )
        .unwrap();

        assert_eq!(config.api.base_url.as_str(), "https://eval.example.com/api/v1");
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.polling.interval_ms, 500);
        assert_eq!(config.polling.background_interval_ms, 10_000);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(parse_config("[api]\nbase = \"x\"").is_err());
    }

    #[test]
    fn env_override_replaces_base_url() {
        let mut config = ConsoleConfig::default();
        apply_env_overrides(&mut config, |key| {
            (key == API_URL_ENV).then(|| "http://127.0.0.1:9000/api/v1".to_string())
        })
        .unwrap();
        assert_eq!(config.api.base_url.as_str(), "http://127.0.0.1:9000/api/v1");
    }

    #[test]
    fn invalid_env_override_is_a_configuration_error() {
        let mut config = ConsoleConfig::default();
        let err = apply_env_overrides(&mut config, |_| Some("not a url".to_string())).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let err = load_config(Some(Path::new("/nonexistent/evalctl.toml"))).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn explicit_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[polling]\ninterval_ms = 250\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.polling.interval_ms, 250);
    }

    #[test]
    fn loaded_file_is_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[polling]\ninterval_ms = 0\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }
}
