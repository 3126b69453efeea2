//! Unified error handling for the Pluma client.
//!
//! Domain-specific enums ([`NetworkError`], [`AuthError`]) are folded
//! into the top-level [`PlumaError`], which carries the handling
//! decisions the coordinator needs: `requires_reauth()` (forced logout),
//! `is_retryable()`, and `user_message()` for the status line.

mod auth;
mod network;
mod pluma_error;

pub use auth::AuthError;
pub use network::{classify_http_error, NetworkError};
pub use pluma_error::PlumaError;

/// Result alias used across the crate.
pub type PlumaResult<T> = Result<T, PlumaError>;

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_error_unification() {
        let net: PlumaError = NetworkError::Timeout {
            operation: "load posts".to_string(),
        }
        .into();
        let auth: PlumaError = AuthError::NotAuthenticated.into();

        assert!(net.is_retryable());
        assert!(!net.requires_reauth());
        assert!(auth.requires_reauth());
        assert!(!net.user_message().is_empty());
        assert!(!auth.user_message().is_empty());
    }

    #[test]
    fn test_reauth_detection_across_variants() {
        let reauth: Vec<PlumaError> = vec![
            AuthError::TokenRejected {
                message: String::new(),
            }
            .into(),
            NetworkError::HttpStatus {
                status: 401,
                message: String::new(),
            }
            .into(),
            PlumaError::Api {
                status: 401,
                message: String::new(),
            },
        ];
        for err in reauth {
            assert!(err.requires_reauth(), "expected reauth for {:?}", err);
        }

        let no_reauth: Vec<PlumaError> = vec![
            NetworkError::HttpStatus {
                status: 500,
                message: String::new(),
            }
            .into(),
            PlumaError::Api {
                status: 404,
                message: String::new(),
            },
            PlumaError::Decode("x".to_string()),
        ];
        for err in no_reauth {
            assert!(!err.requires_reauth(), "unexpected reauth for {:?}", err);
        }
    }
}
