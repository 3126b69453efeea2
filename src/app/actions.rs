//! Async actions: one spawned request task per user-visible operation.
//!
//! Every action clones the shared API client handle and the message
//! sender into a task, performs its request(s), and reports back with a
//! single [`AppMessage`]. Nothing here touches app state directly; the
//! suspension point is the network call, never the UI.

use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{error, warn};

use super::{App, AppMessage};
use crate::traits::FilePart;

/// Guess the MIME type for an image path by extension.
fn image_content_type(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Read an image from disk into a multipart file part named `foto`.
async fn load_image_part(path_str: &str) -> std::io::Result<FilePart> {
    let path = Path::new(path_str);
    let data = tokio::fs::read(path).await?;
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();
    Ok(FilePart {
        name: "foto".to_string(),
        filename,
        content_type: image_content_type(path).to_string(),
        data: Bytes::from(data),
    })
}

impl App {
    // ------------------------------------------------------------------
    // Session
    // ------------------------------------------------------------------

    /// Authenticate, persist the session, and report the result.
    pub fn spawn_login(&mut self, email: String, password: String) {
        let api = self.api.clone();
        let store = self.store.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            match api.login(&email, &password).await {
                Ok(session) => {
                    if let Err(e) = store.save(&session.to_persisted()).await {
                        warn!(error = %e, "could not persist session; continuing in memory");
                    }
                    let _ = tx.send(AppMessage::LoginSucceeded { session });
                }
                Err(e) => {
                    let _ = tx.send(AppMessage::LoginFailed {
                        error: e.user_message(),
                    });
                }
            }
        });
    }

    /// Create a new account.
    pub fn spawn_register(&mut self, name: String, email: String, password: String) {
        let api = self.api.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            match api.register(&name, &email, &password).await {
                Ok(()) => {
                    let _ = tx.send(AppMessage::RegisterSucceeded);
                }
                Err(e) => {
                    let _ = tx.send(AppMessage::RegisterFailed {
                        error: e.user_message(),
                    });
                }
            }
        });
    }

    /// Best-effort server logout, then unconditional local clearing.
    /// A failed server call is logged, never surfaced as blocking.
    pub fn spawn_logout(&mut self) {
        let api = self.api.clone();
        let store = self.store.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = api.logout().await {
                warn!(error = %e, "server logout failed; clearing client state anyway");
            }
            if let Err(e) = store.clear().await {
                warn!(error = %e, "failed to clear persisted session");
            }
            let _ = tx.send(AppMessage::LogoutFinished);
        });
    }

    /// Delete the account. Deletion is terminal: the local session is
    /// cleared whether the server call succeeds or not.
    pub fn spawn_delete_account(&mut self) {
        let Some(user_id) = self.current_user().map(|u| u.id) else {
            return;
        };
        let api = self.api.clone();
        let store = self.store.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = api.delete_account(user_id).await {
                error!(error = %e, "account deletion request failed; clearing client state anyway");
            }
            if let Err(e) = store.clear().await {
                warn!(error = %e, "failed to clear persisted session");
            }
            let _ = tx.send(AppMessage::AccountDeleted);
        });
    }

    /// Update the profile; on success the persisted user record is
    /// replaced alongside the in-memory one.
    pub fn spawn_update_profile(&mut self, name: String, email: String) {
        let Some(session) = self.session.clone() else {
            return;
        };
        let api = self.api.clone();
        let store = self.store.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            match api.update_profile(session.user.id, &name, &email).await {
                Ok(user) => {
                    let mut updated = session;
                    updated.user = user.clone();
                    if let Err(e) = store.save(&updated.to_persisted()).await {
                        warn!(error = %e, "could not persist updated profile");
                    }
                    let _ = tx.send(AppMessage::ProfileUpdated { user });
                }
                Err(e) => {
                    let _ = tx.send(AppMessage::ProfileUpdateFailed {
                        error: e.user_message(),
                    });
                }
            }
        });
    }

    // ------------------------------------------------------------------
    // Content
    // ------------------------------------------------------------------

    /// Fetch posts, comments, and favorites concurrently; a failure in
    /// any one fails the load as a whole.
    pub fn spawn_load_all(&mut self) {
        self.loading = true;
        let api = self.api.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let result = tokio::try_join!(
                api.fetch_posts(),
                api.fetch_comments(),
                api.fetch_favorites()
            );
            match result {
                Ok((posts, comments, favorites)) => {
                    let _ = tx.send(AppMessage::ContentLoaded {
                        posts,
                        comments,
                        favorites,
                    });
                }
                Err(e) => {
                    let _ = tx.send(AppMessage::ContentLoadFailed { error: e });
                }
            }
        });
    }

    /// Fetch one post plus its comments for the detail view.
    pub fn spawn_open_post(&mut self, post_id: i64) {
        self.detail_loading = true;
        let api = self.api.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let result = tokio::try_join!(api.fetch_post(post_id), api.fetch_comments_for(post_id));
            match result {
                Ok((post, comments)) => {
                    let _ = tx.send(AppMessage::PostDetailLoaded { post, comments });
                }
                Err(e) => {
                    let _ = tx.send(AppMessage::PostDetailFailed { post_id, error: e });
                }
            }
        });
    }

    /// Publish a post: read the image file, then send the multipart
    /// request. A missing/unreadable image is a validation-level failure
    /// that never reaches the network.
    pub fn spawn_create_post(&mut self, title: String, body: String, image_path: String) {
        let api = self.api.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let image = match load_image_part(&image_path).await {
                Ok(part) => part,
                Err(e) => {
                    let _ = tx.send(AppMessage::PostCreateFailed {
                        error: format!("Could not read image '{}': {}", image_path, e),
                    });
                    return;
                }
            };
            match api.create_post(&title, &body, image).await {
                Ok(post) => {
                    let _ = tx.send(AppMessage::PostCreated { post });
                }
                Err(e) => {
                    let _ = tx.send(AppMessage::PostCreateFailed {
                        error: e.user_message(),
                    });
                }
            }
        });
    }

    /// Update a post's title and body.
    pub fn spawn_update_post(&mut self, id: i64, title: String, body: String) {
        let api = self.api.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            match api.update_post(id, &title, &body).await {
                Ok(()) => {
                    let _ = tx.send(AppMessage::PostUpdated { id, title, body });
                }
                Err(e) => {
                    let _ = tx.send(AppMessage::PostUpdateFailed {
                        error: e.user_message(),
                    });
                }
            }
        });
    }

    /// Delete a post.
    pub fn spawn_delete_post(&mut self, id: i64) {
        let api = self.api.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            match api.delete_post(id).await {
                Ok(()) => {
                    let _ = tx.send(AppMessage::PostDeleted { id });
                }
                Err(e) => {
                    let _ = tx.send(AppMessage::PostDeleteFailed {
                        error: e.user_message(),
                    });
                }
            }
        });
    }

    // ------------------------------------------------------------------
    // Comments
    // ------------------------------------------------------------------

    /// Add a comment to a post.
    pub fn spawn_add_comment(&mut self, post_id: i64, text: String) {
        let api = self.api.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            match api.create_comment(post_id, &text).await {
                Ok(comment) => {
                    let _ = tx.send(AppMessage::CommentAdded { comment });
                }
                Err(e) => {
                    let _ = tx.send(AppMessage::CommentActionFailed {
                        error: e.user_message(),
                    });
                }
            }
        });
    }

    /// Replace a comment's text.
    pub fn spawn_edit_comment(&mut self, id: i64, text: String) {
        let api = self.api.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            match api.update_comment(id, &text).await {
                Ok(()) => {
                    let _ = tx.send(AppMessage::CommentEdited { id, text });
                }
                Err(e) => {
                    let _ = tx.send(AppMessage::CommentActionFailed {
                        error: e.user_message(),
                    });
                }
            }
        });
    }

    /// Delete a comment.
    pub fn spawn_delete_comment(&mut self, id: i64) {
        let api = self.api.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            match api.delete_comment(id).await {
                Ok(()) => {
                    let _ = tx.send(AppMessage::CommentDeleted { id });
                }
                Err(e) => {
                    let _ = tx.send(AppMessage::CommentActionFailed {
                        error: e.user_message(),
                    });
                }
            }
        });
    }

    // ------------------------------------------------------------------
    // Favorites
    // ------------------------------------------------------------------

    /// Toggle the current user's favorite on a post.
    ///
    /// Scans the cache for an existing favorite to decide between
    /// create and delete, then waits for the server before patching.
    /// The per-post in-flight guard rejects a second toggle while one
    /// is pending; the rejected toggle issues no request at all.
    pub fn spawn_toggle_favorite(&mut self, post_id: i64) {
        let Some(user_id) = self.current_user().map(|u| u.id) else {
            return;
        };
        if !self.cache.begin_favorite(post_id) {
            return;
        }

        let existing = self.cache.favorite_by(post_id, user_id).map(|f| f.id);
        let api = self.api.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            match existing {
                Some(favorite_id) => match api.delete_favorite(favorite_id).await {
                    Ok(()) => {
                        let _ = tx.send(AppMessage::FavoriteRemoved {
                            post_id,
                            favorite_id,
                        });
                    }
                    Err(e) => {
                        let _ = tx.send(AppMessage::FavoriteToggleFailed {
                            post_id,
                            error: e.user_message(),
                        });
                    }
                },
                None => match api.create_favorite(post_id).await {
                    Ok(favorite) => {
                        let _ = tx.send(AppMessage::FavoriteAdded { favorite });
                    }
                    Err(e) => {
                        let _ = tx.send(AppMessage::FavoriteToggleFailed {
                            post_id,
                            error: e.user_message(),
                        });
                    }
                },
            }
        });
    }

    // ------------------------------------------------------------------
    // Password reset
    // ------------------------------------------------------------------

    /// Request an OTP for the email. Also used for resend, which simply
    /// re-issues the request and replaces the held token.
    pub fn spawn_request_otp(&mut self, email: String) {
        let api = self.api.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            match api.request_password_reset(&email).await {
                Ok(token) => {
                    let _ = tx.send(AppMessage::OtpRequested { email, token });
                }
                Err(e) => {
                    let _ = tx.send(AppMessage::OtpRequestFailed {
                        error: e.user_message(),
                    });
                }
            }
        });
    }

    /// Submit the emailed code with the held reset token.
    pub fn spawn_verify_otp(&mut self, code: String) {
        let (Some(email), Some(token)) = (
            self.reset_flow.email().map(String::from),
            self.reset_flow.token().map(String::from),
        ) else {
            return;
        };
        let api = self.api.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            match api.verify_otp(&email, &code, &token).await {
                Ok(()) => {
                    let _ = tx.send(AppMessage::OtpVerified);
                }
                Err(e) => {
                    let _ = tx.send(AppMessage::OtpVerifyFailed {
                        error: e.user_message(),
                    });
                }
            }
        });
    }

    /// Submit the new password with the held reset token.
    pub fn spawn_reset_password(&mut self, new_password: String) {
        let (Some(email), Some(token)) = (
            self.reset_flow.email().map(String::from),
            self.reset_flow.token().map(String::from),
        ) else {
            return;
        };
        let api = self.api.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            match api.reset_password(&email, &new_password, &token).await {
                Ok(()) => {
                    let _ = tx.send(AppMessage::PasswordResetCompleted);
                }
                Err(e) => {
                    let _ = tx.send(AppMessage::PasswordResetFailed {
                        error: e.user_message(),
                    });
                }
            }
        });
    }
}
