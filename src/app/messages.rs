//! AppMessage enum for async communication within the application.
//!
//! Every spawned request task reports back with exactly one of these.
//! Handlers apply the corresponding local-state patch only for success
//! variants, so a failed request can never leave a partial mutation.

use crate::error::PlumaError;
use crate::models::{Comment, Favorite, Post, User};
use crate::session::Session;

/// Messages received from async request tasks.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// Login succeeded; the session is ready and persisted.
    LoginSucceeded { session: Session },
    /// Login was rejected or failed.
    LoginFailed { error: String },
    /// Registration succeeded; the user can sign in now.
    RegisterSucceeded,
    /// Registration failed.
    RegisterFailed { error: String },
    /// The logout sequence finished (server call best-effort, persisted
    /// session cleared either way).
    LogoutFinished,

    /// Full content load finished.
    ContentLoaded {
        posts: Vec<Post>,
        comments: Vec<Comment>,
        favorites: Vec<Favorite>,
    },
    /// Full content load failed. The handler decides between forced
    /// logout (auth failure) and a status message (anything else).
    ContentLoadFailed { error: PlumaError },

    /// Post detail plus its comments arrived.
    PostDetailLoaded { post: Post, comments: Vec<Comment> },
    /// Post detail load failed; the handler navigates back to the feed.
    PostDetailFailed { post_id: i64, error: PlumaError },

    /// A post was created; the server's record is inserted locally.
    PostCreated { post: Post },
    /// Post creation failed.
    PostCreateFailed { error: String },
    /// A post edit was confirmed.
    PostUpdated { id: i64, title: String, body: String },
    /// Post edit failed.
    PostUpdateFailed { error: String },
    /// A post deletion was confirmed.
    PostDeleted { id: i64 },
    /// Post deletion failed.
    PostDeleteFailed { error: String },

    /// A comment was created.
    CommentAdded { comment: Comment },
    /// A comment edit was confirmed.
    CommentEdited { id: i64, text: String },
    /// A comment deletion was confirmed.
    CommentDeleted { id: i64 },
    /// A comment request failed.
    CommentActionFailed { error: String },

    /// The server confirmed a new favorite.
    FavoriteAdded { favorite: Favorite },
    /// The server confirmed a favorite removal.
    FavoriteRemoved { post_id: i64, favorite_id: i64 },
    /// A favorite toggle failed; releases the in-flight guard.
    FavoriteToggleFailed { post_id: i64, error: String },

    /// Profile update confirmed with the server's replacement record.
    ProfileUpdated { user: User },
    /// Profile update failed.
    ProfileUpdateFailed { error: String },
    /// Account deletion finished. Sent on success and failure alike;
    /// the local session does not survive a deletion attempt.
    AccountDeleted,

    /// OTP requested; the server returned the reset token.
    OtpRequested { email: String, token: String },
    /// OTP request failed.
    OtpRequestFailed { error: String },
    /// The OTP code was accepted.
    OtpVerified,
    /// The OTP code was rejected.
    OtpVerifyFailed { error: String },
    /// The password was reset.
    PasswordResetCompleted,
    /// The password reset was rejected.
    PasswordResetFailed { error: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_clone_and_debug() {
        let msg = AppMessage::PostDeleted { id: 5 };
        let cloned = msg.clone();
        assert!(format!("{:?}", cloned).contains("PostDeleted"));
    }

    #[test]
    fn test_content_load_failed_carries_error() {
        let msg = AppMessage::ContentLoadFailed {
            error: PlumaError::Api {
                status: 401,
                message: "Unauthenticated.".to_string(),
            },
        };
        match msg {
            AppMessage::ContentLoadFailed { error } => assert!(error.requires_reauth()),
            _ => panic!("wrong variant"),
        }
    }
}
