//! Error types for the 2degrees API client
//!
//! All HTTP-level failures are classified at the connection boundary into the
//! variants defined here; callers never see raw transport errors for responses
//! the remote actually produced.

use thiserror::Error;

/// The main error type for the 2degrees API client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // HTTP response classification (4xx)
    // ============================================================================
    /// The remote rejected the configured credentials (HTTP 401)
    #[error("authentication failed")]
    Authentication,

    /// The authenticated user may not perform this operation (HTTP 403)
    #[error("access denied")]
    AccessDenied,

    /// The requested resource does not exist (HTTP 404)
    #[error("resource not found")]
    NotFound,

    /// The session access token could not be claimed
    ///
    /// Specialization of [`Error::NotFound`] raised by
    /// [`claim_access_token`](crate::authn::claim_access_token).
    #[error("access token not recognized")]
    AccessToken,

    /// Any other client error (HTTP 4xx)
    #[error("client error (HTTP {status})")]
    Client {
        /// The HTTP status code
        status: u16,
    },

    // ============================================================================
    // HTTP response classification (5xx and unexpected responses)
    // ============================================================================
    /// The remote failed to process the request (HTTP 5xx)
    ///
    /// Carries the numeric status and the reason phrase; renders as
    /// `"{status} {reason}"`.
    #[error("{status} {reason}")]
    Server {
        /// The HTTP status code
        status: u16,
        /// The transport-level reason phrase
        reason: String,
    },

    /// A response on the success path the client cannot interpret
    ///
    /// Unexpected status code, missing Content-Type on a non-empty body, or a
    /// non-JSON Content-Type.
    #[error("{message}")]
    UnsupportedResponse {
        /// Description of what made the response unsupported
        message: String,
    },

    // ============================================================================
    // Local failures
    // ============================================================================
    /// Entity or envelope data did not match its wire schema
    #[error("validation failed: {message}")]
    Validation {
        /// Description of the schema violation
        message: String,
    },

    /// The request never completed at the transport level
    #[error("HTTP transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A JSON body could not be decoded
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A next-page URL could not be parsed
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// Create a server error from a status code and reason phrase
    pub fn server(status: u16, reason: impl Into<String>) -> Self {
        Self::Server {
            status,
            reason: reason.into(),
        }
    }

    /// Create an unsupported-response error
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedResponse {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Result type alias for the 2degrees API client
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_display() {
        let err = Error::server(500, "Reason");
        assert_eq!(err.to_string(), "500 Reason");

        let err = Error::server(503, "Service Unavailable");
        assert_eq!(err.to_string(), "503 Service Unavailable");
    }

    #[test]
    fn test_unsupported_response_display() {
        let err = Error::unsupported("Unsupported response status 304");
        assert_eq!(err.to_string(), "Unsupported response status 304");

        let err = Error::unsupported("Response does not specify a Content-Type");
        assert_eq!(err.to_string(), "Response does not specify a Content-Type");

        let err = Error::unsupported("Unsupported response content type text/plain");
        assert_eq!(
            err.to_string(),
            "Unsupported response content type text/plain"
        );
    }

    #[test]
    fn test_validation_error_display() {
        let err = Error::validation("unknown field `nickname`");
        assert_eq!(
            err.to_string(),
            "validation failed: unknown field `nickname`"
        );
    }
}
