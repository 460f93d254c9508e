//! Outcome types for API calls
//!
//! A call either yields `Ok(Some(json))`, `Ok(None)` for a success without a
//! body, or one of the `ApiError` variants below. Transport failures and HTTP
//! status failures stay distinct; the response body of a failed call is kept.

use std::fmt;

use reqwest::StatusCode;
use serde_json::Value;
use tozti_core::{ErrorDocument, ErrorObject, ToztiError};

pub type ApiResult<T> = Result<T, ApiError>;

/// Body of a non-success response
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorBody {
    Empty,
    Json(Value),
    Text(String),
}

impl ErrorBody {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return ErrorBody::Empty;
        }
        match serde_json::from_slice(bytes) {
            Ok(value) => ErrorBody::Json(value),
            Err(_) => ErrorBody::Text(String::from_utf8_lossy(bytes).into_owned()),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ErrorBody::Json(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorBody::Empty => f.write_str("<empty body>"),
            ErrorBody::Json(value) => write!(f, "{}", value),
            ErrorBody::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ToztiError),

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Refusing cross-origin request to {url} (client origin is {origin})")]
    CrossOrigin { url: String, origin: String },

    #[error("Failed to send request: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("API request failed with status {status}: {body}")]
    Status { status: StatusCode, body: ErrorBody },

    #[error("Response had no body where a document was expected")]
    MissingBody,

    #[error("Failed to parse response as JSON: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl ApiError {
    /// HTTP status of a status failure.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the request never produced an HTTP response.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }

    /// Whether retrying the same call may succeed.
    pub fn is_recoverable(&self) -> bool {
        match self {
            ApiError::Transport(err) => err.is_timeout() || err.is_connect(),
            ApiError::Status { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }

    /// JSON-API `errors` array of a status failure, empty when absent.
    pub fn json_api_errors(&self) -> Vec<ErrorObject> {
        let Some(value) = self.body().and_then(ErrorBody::as_json) else {
            return Vec::new();
        };
        serde_json::from_value::<ErrorDocument>(value.clone())
            .map(|doc| doc.errors)
            .unwrap_or_default()
    }

    /// `code` of the first JSON-API error, e.g. `RESOURCE_NOT_FOUND`.
    pub fn error_code(&self) -> Option<String> {
        self.json_api_errors()
            .into_iter()
            .find_map(|error| error.code)
    }

    pub fn body(&self) -> Option<&ErrorBody> {
        match self {
            ApiError::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Lenient view of a call outcome: the failure has already been logged by the
/// client, so collapse it (and an empty success) to `None`.
pub trait ApiResultExt<T> {
    fn lenient(self) -> Option<T>;
}

impl<T> ApiResultExt<T> for ApiResult<Option<T>> {
    fn lenient(self) -> Option<T> {
        self.ok().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_body_classification() {
        assert_eq!(ErrorBody::from_bytes(b""), ErrorBody::Empty);
        assert_eq!(ErrorBody::from_bytes(b"  \n"), ErrorBody::Empty);
        assert_eq!(
            ErrorBody::from_bytes(br#"{"errors":[]}"#),
            ErrorBody::Json(json!({ "errors": [] }))
        );
        assert_eq!(
            ErrorBody::from_bytes(b"Bad Gateway"),
            ErrorBody::Text("Bad Gateway".to_string())
        );
    }

    #[test]
    fn status_error_exposes_json_api_errors() {
        let err = ApiError::Status {
            status: StatusCode::NOT_FOUND,
            body: ErrorBody::Json(json!({
                "errors": [{ "code": "RESOURCE_NOT_FOUND", "title": "no such resource" }]
            })),
        };

        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(err.error_code().as_deref(), Some("RESOURCE_NOT_FOUND"));
        assert_eq!(err.json_api_errors().len(), 1);
        assert!(!err.is_transport());
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn server_errors_are_recoverable() {
        let err = ApiError::Status {
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: ErrorBody::Text("maintenance".to_string()),
        };
        assert!(err.is_recoverable());
        assert!(err.json_api_errors().is_empty());
        assert_eq!(err.error_code(), None);
    }

    #[test]
    fn lenient_collapses_failures_and_empty_bodies() {
        let ok: ApiResult<Option<Value>> = Ok(Some(json!({ "data": null })));
        assert_eq!(ok.lenient(), Some(json!({ "data": null })));

        let empty: ApiResult<Option<Value>> = Ok(None);
        assert_eq!(empty.lenient(), None);

        let failed: ApiResult<Option<Value>> = Err(ApiError::MissingBody);
        assert_eq!(failed.lenient(), None);
    }
}
