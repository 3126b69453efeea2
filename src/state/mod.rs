//! Client-side state: the content cache and the password-reset flow.

pub mod content;
pub mod reset;

pub use content::ContentCache;
pub use reset::{validate_new_password, PasswordCheck, ResetFlow, MIN_PASSWORD_LEN};
