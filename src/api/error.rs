//! Client error taxonomy for the share-code API

use reqwest::StatusCode;

/// Errors raised by the HTTP layer before an envelope is available.
///
/// Application-level failures (a success HTTP status wrapping a failure
/// envelope) are not errors here; the store reads those from the envelope
/// itself. Every variant renders to a message the UI can show as-is.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// DNS, connect, or timeout failure before a response arrived
    #[error("network unreachable, check your connection and try again")]
    Unreachable,

    /// Server answered with a non-2xx status
    #[error("request failed: {status}")]
    Http { status: StatusCode },

    /// Server answered with something that is not JSON. Reverse proxies
    /// serve HTML error pages when the backend is down.
    #[error("backend is not responding, make sure the server is running")]
    BackendDown,

    /// Body claimed to be JSON but did not match the expected shape
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_displayable() {
        assert_eq!(
            ApiError::Unreachable.to_string(),
            "network unreachable, check your connection and try again"
        );
        assert_eq!(
            ApiError::Http { status: StatusCode::BAD_GATEWAY }.to_string(),
            "request failed: 502 Bad Gateway"
        );
        assert_eq!(
            ApiError::BackendDown.to_string(),
            "backend is not responding, make sure the server is running"
        );
    }

    #[test]
    fn decode_wraps_serde_errors() {
        let err = serde_json::from_str::<i64>("not json").unwrap_err();
        let err: ApiError = err.into();
        assert!(err.to_string().starts_with("malformed response:"));
    }
}
