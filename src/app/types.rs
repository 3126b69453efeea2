//! Core enums for screens, dialogs, and focus.

/// Which screen is currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Sign-in form (unauthenticated view).
    Login,
    /// Account creation form.
    Register,
    /// The post list.
    Feed,
    /// One post with its comments.
    PostDetail,
    /// The current user's profile.
    Profile,
}

/// Modal dialog layered over the current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialog {
    /// Create or edit a post.
    Compose,
    /// Confirm deleting a post.
    ConfirmDeletePost { id: i64 },
    /// Confirm deleting the account.
    ConfirmDeleteAccount,
    /// The password-reset flow; the visible step follows
    /// [`crate::state::ResetFlow`].
    Reset,
}

/// Focus inside the post-detail screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailFocus {
    /// Navigating the comment list.
    #[default]
    Comments,
    /// Typing into the comment input.
    Input,
}

/// Severity of the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

/// One-line feedback shown at the bottom of the screen.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusLine {
    pub text: String,
    pub level: StatusLevel,
}

impl StatusLine {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: StatusLevel::Info,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: StatusLevel::Error,
        }
    }
}
