//! Password-reset flow state machine and password validation.
//!
//! The OTP-based reset is a strict sequence: request a code for an
//! email, verify the code, set the new password. Modeling it as a
//! tagged state value makes illegal combinations (verifying and
//! resetting at once) unrepresentable; out-of-order events are ignored.

/// The password-reset flow state.
///
/// `Idle → AwaitingOtp → AwaitingNewPassword → Idle`, with cancellation
/// back to `Idle` from any step. The email and the server's short-lived
/// reset token travel with the state and are discarded on cancel.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResetFlow {
    /// No reset in progress.
    #[default]
    Idle,
    /// OTP requested; waiting for the user to type the emailed code.
    AwaitingOtp { email: String, token: String },
    /// Code verified; waiting for the new password.
    AwaitingNewPassword { email: String, token: String },
}

impl ResetFlow {
    /// The server accepted the OTP request and returned a reset token.
    ///
    /// Valid from `Idle`, and from `AwaitingOtp` for a resend (the new
    /// token replaces the held one). Returns false when ignored.
    pub fn otp_requested(&mut self, email: String, token: String) -> bool {
        match self {
            ResetFlow::Idle | ResetFlow::AwaitingOtp { .. } => {
                *self = ResetFlow::AwaitingOtp { email, token };
                true
            }
            ResetFlow::AwaitingNewPassword { .. } => false,
        }
    }

    /// The server accepted the OTP code.
    pub fn otp_verified(&mut self) -> bool {
        if let ResetFlow::AwaitingOtp { email, token } = self {
            let email = std::mem::take(email);
            let token = std::mem::take(token);
            *self = ResetFlow::AwaitingNewPassword { email, token };
            true
        } else {
            false
        }
    }

    /// The password was reset; the flow is over.
    pub fn completed(&mut self) -> bool {
        match self {
            ResetFlow::AwaitingNewPassword { .. } => {
                *self = ResetFlow::Idle;
                true
            }
            _ => false,
        }
    }

    /// Explicit cancellation from any step discards email and token.
    pub fn cancel(&mut self) {
        *self = ResetFlow::Idle;
    }

    /// Whether any reset step is active.
    pub fn is_active(&self) -> bool {
        !matches!(self, ResetFlow::Idle)
    }

    /// The email the flow was started for, if active.
    pub fn email(&self) -> Option<&str> {
        match self {
            ResetFlow::Idle => None,
            ResetFlow::AwaitingOtp { email, .. } | ResetFlow::AwaitingNewPassword { email, .. } => {
                Some(email)
            }
        }
    }

    /// The held reset token, if active.
    pub fn token(&self) -> Option<&str> {
        match self {
            ResetFlow::Idle => None,
            ResetFlow::AwaitingOtp { token, .. } | ResetFlow::AwaitingNewPassword { token, .. } => {
                Some(token)
            }
        }
    }
}

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Per-rule result of checking a candidate password, evaluated live as
/// the user types so the checklist can render each rule's state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PasswordCheck {
    /// At least [`MIN_PASSWORD_LEN`] characters.
    pub min_length: bool,
    /// At least one uppercase letter.
    pub has_uppercase: bool,
    /// At least one digit.
    pub has_digit: bool,
    /// Confirmation field equals the password (and is non-empty).
    pub matches_confirmation: bool,
}

impl PasswordCheck {
    /// Evaluate all rules for a candidate password + confirmation pair.
    pub fn evaluate(password: &str, confirmation: &str) -> Self {
        Self {
            min_length: password.chars().count() >= MIN_PASSWORD_LEN,
            has_uppercase: password.chars().any(|c| c.is_uppercase()),
            has_digit: password.chars().any(|c| c.is_ascii_digit()),
            matches_confirmation: !password.is_empty() && password == confirmation,
        }
    }

    /// Whether every rule passed.
    pub fn is_satisfied(&self) -> bool {
        self.min_length && self.has_uppercase && self.has_digit && self.matches_confirmation
    }

    /// The message for the first failing rule, if any. Each rule gets a
    /// specific message; there is no generic fallback.
    pub fn first_failure(&self) -> Option<&'static str> {
        if !self.min_length {
            Some("Password must be at least 6 characters")
        } else if !self.has_uppercase {
            Some("Password must contain an uppercase letter")
        } else if !self.has_digit {
            Some("Password must contain a digit")
        } else if !self.matches_confirmation {
            Some("Passwords do not match")
        } else {
            None
        }
    }
}

/// Validate a new password, returning the specific failure message when
/// it is not acceptable.
pub fn validate_new_password(password: &str, confirmation: &str) -> Result<(), &'static str> {
    match PasswordCheck::evaluate(password, confirmation).first_failure() {
        None => Ok(()),
        Some(message) => Err(message),
    }
}
