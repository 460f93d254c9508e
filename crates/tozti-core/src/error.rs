//! Error types module
//!
//! Errors raised by the shared layer: configuration loading and origin parsing.
//! Network and JSON errors live in `tozti-api-client`.

pub type ToztiResult<T> = Result<T, ToztiError>;

#[derive(Debug, thiserror::Error)]
pub enum ToztiError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid origin '{origin}': {reason}")]
    InvalidOrigin { origin: String, reason: String },
}

impl ToztiError {
    pub fn invalid_origin(origin: impl Into<String>, reason: impl Into<String>) -> Self {
        ToztiError::InvalidOrigin {
            origin: origin.into(),
            reason: reason.into(),
        }
    }
}
