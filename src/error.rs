//! Client error types and the provider error envelope.

use serde::Deserialize;
use thiserror::Error;

/// Result type for JPush API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the JPush client.
#[derive(Debug, Error)]
pub enum Error {
    /// The provider rejected the request with a documented error code.
    #[error("JPush error {code}: {message}")]
    Api {
        /// Numeric provider error code (for example 1003 for an invalid
        /// parameter, 2002 for a pushed-too-fast rejection).
        code: i32,
        /// Human-readable message from the provider.
        message: String,
    },

    /// A non-2xx response whose body was not the provider error envelope.
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// Transport-level failure from the HTTP client.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Client construction failed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Provider error code, if the provider rejected the request.
    pub fn api_code(&self) -> Option<i32> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// HTTP status code, if one was observed.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Map a non-2xx response body to an error.
    ///
    /// The documented envelope is `{"error": {"code", "message"}}`; anything
    /// else is preserved verbatim together with the status code.
    pub(crate) fn from_response(status: u16, body: &[u8]) -> Self {
        match serde_json::from_slice::<ErrorResponse>(body) {
            Ok(envelope) => Self::Api {
                code: envelope.error.code,
                message: envelope.error.message,
            },
            Err(_) => Self::UnexpectedStatus {
                status,
                body: String::from_utf8_lossy(body).into_owned(),
            },
        }
    }
}

/// Wire-level error envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub(crate) error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub(crate) code: i32,
    pub(crate) message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_provider_envelope() {
        let body = br#"{"error": {"code": 1003, "message": "Parameter value is invalid"}}"#;
        let err = Error::from_response(400, body);
        assert_eq!(err.api_code(), Some(1003));
        assert_eq!(
            err.to_string(),
            "JPush error 1003: Parameter value is invalid"
        );
    }

    #[test]
    fn test_fallback_to_raw_body() {
        let err = Error::from_response(502, b"Bad Gateway");
        assert_eq!(err.api_code(), None);
        assert_eq!(err.status(), Some(502));
        match err {
            Error::UnexpectedStatus { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body, "Bad Gateway");
            }
            other => panic!("expected UnexpectedStatus, got {other:?}"),
        }
    }

    #[test]
    fn test_envelope_extra_fields() {
        let body = br#"{"error": {"code": 2002, "message": "push too fast", "detail": "x"}}"#;
        let err = Error::from_response(429, body);
        assert_eq!(err.api_code(), Some(2002));
    }
}
