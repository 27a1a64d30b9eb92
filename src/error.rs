/// Unified error types for multi-authlib
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Main error type for the proxy
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Configuration errors (fatal at startup)
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding/decoding errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Outbound HTTP transport errors (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a status the protocol does not allow
    #[error("Unexpected backend status: {0}")]
    UnexpectedStatus(reqwest::StatusCode),

    /// Backend answered with a body that is not a valid profile list
    #[error("Malformed profile response: {0}")]
    MalformedProfile(String),

    /// Inbound request is missing required parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convert ProxyError to HTTP response
///
/// Game servers only understand "confirmed" or "not confirmed", so every
/// failure is answered with the protocol's empty 204.
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        match &self {
            ProxyError::InvalidRequest(_) => tracing::debug!(error = %self, "rejecting request"),
            _ => tracing::warn!(error = %self, "request failed"),
        }

        StatusCode::NO_CONTENT.into_response()
    }
}

/// Result type alias for proxy operations
pub type ProxyResult<T> = Result<T, ProxyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_error_maps_to_no_content() {
        let errors = vec![
            ProxyError::InvalidRequest("missing serverId".to_string()),
            ProxyError::Internal("boom".to_string()),
            ProxyError::UnexpectedStatus(reqwest::StatusCode::BAD_GATEWAY),
            ProxyError::MalformedProfile("two profiles".to_string()),
        ];

        for error in errors {
            let response = error.into_response();
            assert_eq!(response.status(), StatusCode::NO_CONTENT);
        }
    }
}
