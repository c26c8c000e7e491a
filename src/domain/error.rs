use std::io;

use thiserror::Error;

/// Library-wide error type for evalctl operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Input rejected before any request was issued.
    #[error("{0}")]
    Validation(String),

    /// Network failure or an unreadable response body.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("API error ({status}): {detail}")]
    Api { status: u16, detail: String },

    /// A job status payload carried a status value outside the known set.
    #[error("Unrecognized job status '{0}'")]
    MalformedStatus(String),

    /// A model parameter could not be parsed from its stored text.
    #[error("Invalid value '{value}' for model parameter '{field}'")]
    InvalidModelParam { field: &'static str, value: String },

    /// Unknown resource collection name.
    #[error("Unknown resource '{0}'. Available: {1}")]
    UnknownResource(String, String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// JSON parsing error for local files.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        AppError::Validation(message.into())
    }

    /// Errors raised while talking to the backend, as opposed to local input problems.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            AppError::Transport(_) | AppError::Api { .. } | AppError::MalformedStatus(_)
        )
    }

    /// Provide an `io::ErrorKind`-like view for callers expecting legacy behavior.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Configuration(_)
            | AppError::Validation(_)
            | AppError::InvalidModelParam { .. }
            | AppError::TomlParse(_)
            | AppError::Json(_) => io::ErrorKind::InvalidInput,
            AppError::UnknownResource(..) => io::ErrorKind::NotFound,
            AppError::Api { status, .. } if *status == 404 => io::ErrorKind::NotFound,
            AppError::MalformedStatus(_) => io::ErrorKind::InvalidData,
            AppError::Transport(_) | AppError::Api { .. } => io::ErrorKind::Other,
        }
    }
}
