use thiserror::Error;

/// Startup configuration problems. All of these are fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required setting {key}")]
    Missing { key: &'static str },

    #[error("invalid URL in {key} ({value}): {reason}")]
    InvalidUrl {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("invalid duration in {key}: {value:?} (expected e.g. 10s, 1m30s, 500ms)")]
    InvalidDuration { key: &'static str, value: String },

    #[error("invalid message template: {0}")]
    InvalidTemplate(String),
}
