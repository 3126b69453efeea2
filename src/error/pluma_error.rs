//! Unified error type consolidating all domain errors.

use thiserror::Error;

use super::auth::AuthError;
use super::network::NetworkError;
use crate::traits::SessionStoreError;

/// Top-level error type for the Pluma client.
///
/// Every fallible path in the API client and the coordinator resolves to
/// this type, so handlers can make uniform decisions: does this failure
/// force a logout, is it worth retrying, what should the status line say.
#[derive(Debug, Clone, Error)]
pub enum PlumaError {
    /// Transport-level failure (connection, timeout, unexpected status).
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// Authentication failure.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The server answered with an application-level error.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// A response body could not be decoded.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The session store failed.
    #[error("Session store error: {0}")]
    Store(String),
}

impl PlumaError {
    /// Check if this failure invalidates the session (forces logout).
    pub fn requires_reauth(&self) -> bool {
        match self {
            PlumaError::Auth(err) => err.requires_reauth(),
            PlumaError::Network(NetworkError::HttpStatus { status, .. }) => *status == 401,
            PlumaError::Api { status, .. } => *status == 401,
            _ => false,
        }
    }

    /// Check if this error is likely transient.
    pub fn is_retryable(&self) -> bool {
        match self {
            PlumaError::Network(err) => err.is_retryable(),
            PlumaError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Get a message fit for the status line.
    pub fn user_message(&self) -> String {
        match self {
            PlumaError::Network(err) => err.user_message(),
            PlumaError::Auth(err) => err.user_message(),
            PlumaError::Api { status, message } => {
                if message.is_empty() {
                    format!("The server returned an error (HTTP {}).", status)
                } else {
                    message.clone()
                }
            }
            PlumaError::Decode(_) => "Received an invalid response from the server.".to_string(),
            PlumaError::Store(_) => "Could not access the saved session.".to_string(),
        }
    }
}

impl From<serde_json::Error> for PlumaError {
    fn from(err: serde_json::Error) -> Self {
        PlumaError::Decode(err.to_string())
    }
}

impl From<SessionStoreError> for PlumaError {
    fn from(err: SessionStoreError) -> Self {
        PlumaError::Store(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_401_requires_reauth() {
        let err = PlumaError::Api {
            status: 401,
            message: "Unauthenticated.".to_string(),
        };
        assert!(err.requires_reauth());
    }

    #[test]
    fn test_api_403_does_not_require_reauth() {
        let err = PlumaError::Api {
            status: 403,
            message: String::new(),
        };
        assert!(!err.requires_reauth());
    }

    #[test]
    fn test_network_401_requires_reauth() {
        let err: PlumaError = NetworkError::HttpStatus {
            status: 401,
            message: String::new(),
        }
        .into();
        assert!(err.requires_reauth());
    }

    #[test]
    fn test_auth_error_propagates_reauth() {
        let err: PlumaError = AuthError::TokenRejected {
            message: String::new(),
        }
        .into();
        assert!(err.requires_reauth());

        let err: PlumaError = AuthError::InvalidCredentials {
            message: String::new(),
        }
        .into();
        assert!(!err.requires_reauth());
    }

    #[test]
    fn test_retryable() {
        let err: PlumaError = NetworkError::ConnectionFailed {
            url: "x".to_string(),
            message: "refused".to_string(),
        }
        .into();
        assert!(err.is_retryable());

        let err = PlumaError::Api {
            status: 500,
            message: String::new(),
        };
        assert!(err.is_retryable());

        let err = PlumaError::Decode("bad json".to_string());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_user_message_prefers_server_text() {
        let err = PlumaError::Api {
            status: 422,
            message: "Title is required".to_string(),
        };
        assert_eq!(err.user_message(), "Title is required");
    }

    #[test]
    fn test_json_error_becomes_decode() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: PlumaError = json_err.into();
        assert!(matches!(err, PlumaError::Decode(_)));
    }

    #[test]
    fn test_store_error_conversion() {
        let err: PlumaError = SessionStoreError::SaveFailed("disk full".to_string()).into();
        assert!(matches!(err, PlumaError::Store(_)));
        assert!(err.to_string().contains("disk full"));
    }
}
