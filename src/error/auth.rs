//! Authentication-related error types.

use std::fmt;

/// Authentication-specific error variants.
#[derive(Debug, Clone)]
pub enum AuthError {
    /// No session available (user not logged in).
    NotAuthenticated,

    /// The server rejected the bearer token (401-class response).
    TokenRejected { message: String },

    /// Login was rejected (wrong email/password).
    InvalidCredentials { message: String },

    /// The login response was missing the token or the user record.
    MalformedLoginResponse,

    /// The persisted session could not be loaded.
    SessionLoadFailed { message: String },

    /// The persisted session could not be saved.
    SessionSaveFailed { message: String },
}

impl AuthError {
    /// Check if this error forces a logout and a return to the login view.
    pub fn requires_reauth(&self) -> bool {
        matches!(
            self,
            AuthError::NotAuthenticated | AuthError::TokenRejected { .. }
        )
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::NotAuthenticated => "You are not signed in.".to_string(),
            AuthError::TokenRejected { .. } => {
                "Your session has expired. Please sign in again.".to_string()
            }
            AuthError::InvalidCredentials { message } => {
                if message.is_empty() {
                    "Incorrect email or password.".to_string()
                } else {
                    message.clone()
                }
            }
            AuthError::MalformedLoginResponse => "Invalid response from the server.".to_string(),
            AuthError::SessionLoadFailed { .. } => {
                "Could not read your saved session. Please sign in again.".to_string()
            }
            AuthError::SessionSaveFailed { .. } => {
                "Could not save your session. Check file permissions.".to_string()
            }
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::NotAuthenticated => write!(f, "Not authenticated"),
            AuthError::TokenRejected { message } => write!(f, "Token rejected: {}", message),
            AuthError::InvalidCredentials { message } => {
                write!(f, "Invalid credentials: {}", message)
            }
            AuthError::MalformedLoginResponse => {
                write!(f, "Login response missing token or user")
            }
            AuthError::SessionLoadFailed { message } => {
                write!(f, "Failed to load session: {}", message)
            }
            AuthError::SessionSaveFailed { message } => {
                write!(f, "Failed to save session: {}", message)
            }
        }
    }
}

impl std::error::Error for AuthError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_rejected_requires_reauth() {
        let err = AuthError::TokenRejected {
            message: "expired".to_string(),
        };
        assert!(err.requires_reauth());
    }

    #[test]
    fn test_not_authenticated_requires_reauth() {
        assert!(AuthError::NotAuthenticated.requires_reauth());
    }

    #[test]
    fn test_invalid_credentials_does_not_require_reauth() {
        let err = AuthError::InvalidCredentials {
            message: String::new(),
        };
        assert!(!err.requires_reauth());
        assert!(err.user_message().contains("Incorrect"));
    }

    #[test]
    fn test_invalid_credentials_keeps_server_message() {
        let err = AuthError::InvalidCredentials {
            message: "Account locked".to_string(),
        };
        assert_eq!(err.user_message(), "Account locked");
    }

    #[test]
    fn test_malformed_login_response() {
        let err = AuthError::MalformedLoginResponse;
        assert!(!err.requires_reauth());
        assert!(err.user_message().contains("Invalid response"));
    }

    #[test]
    fn test_display_format() {
        let err = AuthError::SessionSaveFailed {
            message: "permission denied".to_string(),
        };
        assert!(format!("{}", err).contains("permission denied"));
    }
}
