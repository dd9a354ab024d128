//! Error handling for the shoesApp admin client

use reqwest::StatusCode;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Problem details returned by the back-end in error bodies
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDetails {
    pub title: Option<String>,
    pub detail: Option<String>,
    pub message: Option<String>,
    pub status: Option<u16>,
    pub entity_name: Option<String>,
    pub error_key: Option<String>,
}

impl fmt::Display for ProblemDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(title) = &self.title {
            parts.push(title.clone());
        }
        if let Some(detail) = &self.detail {
            parts.push(format!("Detail: {}", detail));
        }
        if let Some(message) = &self.message {
            parts.push(format!("Message: {}", message));
        }
        if let Some(key) = &self.error_key {
            parts.push(format!("Key: {}", key));
        }
        write!(f, "{}", parts.join(", "))
    }
}

/// Unified error type for the admin client
#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// The requested record does not exist
    #[error("Not found: {resource} ({details})")]
    NotFound {
        resource: String,
        details: ProblemDetails,
    },

    /// Non-2xx response with a problem-details body
    #[error("API error: {details} (Status: {status})")]
    Api {
        status: StatusCode,
        details: ProblemDetails,
    },

    /// Non-2xx response whose body could not be parsed
    #[error("API error (unparsed): {message} (Status: {status})")]
    UnparsedApi { status: StatusCode, message: String },

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// A response header was present but malformed
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// General errors
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Create a new invalid parameters error
    pub fn invalid_parameters<T: fmt::Display>(msg: T) -> Self {
        Error::InvalidParameters(msg.to_string())
    }

    /// Create a new invalid header error
    pub fn invalid_header<T: fmt::Display>(msg: T) -> Self {
        Error::InvalidHeader(msg.to_string())
    }

    /// Create a new general error
    pub fn general<T: fmt::Display>(msg: T) -> Self {
        Error::General(msg.to_string())
    }

    /// Build the error for a failed response from its status and raw body
    pub(crate) fn from_response(status: StatusCode, resource: &str, body: &str) -> Self {
        let details = serde_json::from_str::<ProblemDetails>(body).ok();
        match (status, details) {
            (StatusCode::NOT_FOUND, details) => Error::NotFound {
                resource: resource.to_string(),
                details: details.unwrap_or_default(),
            },
            (status, Some(details)) => Error::Api { status, details },
            (status, None) => Error::UnparsedApi {
                status,
                message: body.to_string(),
            },
        }
    }

    /// Whether this is a 404 from the server
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// HTTP status of the failed response, if the server answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::NotFound { .. } => Some(StatusCode::NOT_FOUND),
            Error::Api { status, .. } | Error::UnparsedApi { status, .. } => Some(*status),
            Error::Http(e) => e.status(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_keeps_problem_details() {
        let body = r#"{"title":"Not Found","status":404,"message":"error.http.404"}"#;
        let err = Error::from_response(StatusCode::NOT_FOUND, "api/sizes/99", body);
        assert!(err.is_not_found());
        match err {
            Error::NotFound { resource, details } => {
                assert_eq!(resource, "api/sizes/99");
                assert_eq!(details.message.as_deref(), Some("error.http.404"));
            }
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn bad_request_with_problem_body() {
        let body = r#"{"title":"Invalid id","entityName":"size","errorKey":"idnull"}"#;
        let err = Error::from_response(StatusCode::BAD_REQUEST, "api/sizes", body);
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
        let text = err.to_string();
        assert!(text.contains("Invalid id"));
        assert!(text.contains("Key: idnull"));
    }

    #[test]
    fn unparsed_body_is_kept_verbatim() {
        let err = Error::from_response(StatusCode::BAD_GATEWAY, "api/bills", "upstream down");
        match err {
            Error::UnparsedApi { status, message } => {
                assert_eq!(status, StatusCode::BAD_GATEWAY);
                assert_eq!(message, "upstream down");
            }
            other => panic!("Expected UnparsedApi, got {:?}", other),
        }
    }
}
