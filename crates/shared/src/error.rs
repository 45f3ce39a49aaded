use std::path::PathBuf;

use thiserror::Error;

use crate::domain::PolicyKind;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("controller requires a callback")]
    MissingCallback,
    #[error("{policy} delay must be non-negative, got {delay_ms}ms")]
    NegativeDelay { policy: PolicyKind, delay_ms: i64 },
    #[error("no timer facility supplied and no tokio runtime is running")]
    NoRuntime,
    #[error("invalid settings file '{}': {message}", .path.display())]
    Settings { path: PathBuf, message: String },
}

impl ConfigError {
    pub fn settings(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Settings {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown policy '{0}', expected one of debounce, throttle, disconnect")]
pub struct UnknownPolicy(pub String);
