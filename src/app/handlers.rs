//! Message and key handlers.
//!
//! Message handlers apply the local-state patch for each request
//! result; this is the only place the session and cache are mutated
//! after startup, so every write path is all-or-nothing. Key handlers
//! translate terminal input into form edits, navigation, and actions.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::warn;

use super::{App, AppMessage, Dialog, DetailFocus, Screen, StatusLine};
use crate::state::{PasswordCheck, ResetFlow};

impl App {
    /// Apply the result of an async request to app state.
    pub fn handle_message(&mut self, msg: AppMessage) {
        match msg {
            // -- session ------------------------------------------------
            AppMessage::LoginSucceeded { session } => {
                self.status = None;
                self.enter_session(session);
            }
            AppMessage::LoginFailed { error } => {
                self.login_form.error = Some(error);
            }
            AppMessage::RegisterSucceeded => {
                self.register_form.clear();
                self.go_to_login();
                self.status = Some(StatusLine::info(
                    "Account created. Sign in with your new credentials.",
                ));
            }
            AppMessage::RegisterFailed { error } => {
                self.register_form.error = Some(error);
            }
            AppMessage::LogoutFinished => {
                self.clear_local_session();
                self.status = Some(StatusLine::info("Signed out."));
            }

            // -- content loads -----------------------------------------
            AppMessage::ContentLoaded {
                posts,
                comments,
                favorites,
            } => {
                self.loading = false;
                self.cache.replace_all(posts, comments, favorites);
                self.clamp_feed_selection();
            }
            AppMessage::ContentLoadFailed { error } => {
                self.loading = false;
                if error.requires_reauth() {
                    self.force_logout("Your session has expired. Please sign in again.");
                } else {
                    warn!(error = %error, "content load failed");
                    self.status = Some(StatusLine::error(error.user_message()));
                }
            }
            AppMessage::PostDetailLoaded { post, comments } => {
                self.detail_loading = false;
                self.cache.merge_post_detail(post, comments);
                self.clamp_comment_selection();
            }
            AppMessage::PostDetailFailed { post_id, error } => {
                self.detail_loading = false;
                if error.requires_reauth() {
                    self.force_logout("Your session has expired. Please sign in again.");
                } else {
                    warn!(post_id, error = %error, "post detail load failed");
                    self.back_to_feed();
                    self.status = Some(StatusLine::error(error.user_message()));
                }
            }

            // -- posts --------------------------------------------------
            AppMessage::PostCreated { post } => {
                self.cache.insert_post(post);
                self.compose_form.clear();
                self.dialog = None;
                self.status = Some(StatusLine::info("Post published."));
            }
            AppMessage::PostCreateFailed { error } => {
                self.compose_form.error = Some(error);
            }
            AppMessage::PostUpdated { id, title, body } => {
                self.cache.apply_post_update(id, &title, &body);
                self.compose_form.clear();
                self.dialog = None;
                self.status = Some(StatusLine::info("Post updated."));
            }
            AppMessage::PostUpdateFailed { error } => {
                self.compose_form.error = Some(error);
            }
            AppMessage::PostDeleted { id } => {
                let was_viewing = self.cache.remove_post(id);
                if was_viewing {
                    self.back_to_feed();
                }
                self.clamp_feed_selection();
                self.status = Some(StatusLine::info("Post deleted."));
            }
            AppMessage::PostDeleteFailed { error } => {
                self.status = Some(StatusLine::error(error));
            }

            // -- comments -----------------------------------------------
            AppMessage::CommentAdded { comment } => {
                self.cache.insert_comment(comment);
                self.comment_form.clear();
            }
            AppMessage::CommentEdited { id, text } => {
                self.cache.apply_comment_edit(id, &text);
                self.comment_form.clear();
            }
            AppMessage::CommentDeleted { id } => {
                self.cache.remove_comment(id);
                self.clamp_comment_selection();
            }
            AppMessage::CommentActionFailed { error } => {
                self.status = Some(StatusLine::error(error));
            }

            // -- favorites ----------------------------------------------
            AppMessage::FavoriteAdded { favorite } => {
                self.cache.finish_favorite(favorite.post_id);
                self.cache.apply_favorite_added(favorite);
            }
            AppMessage::FavoriteRemoved {
                post_id,
                favorite_id,
            } => {
                self.cache.finish_favorite(post_id);
                self.cache.apply_favorite_removed(favorite_id);
            }
            AppMessage::FavoriteToggleFailed { post_id, error } => {
                self.cache.finish_favorite(post_id);
                self.status = Some(StatusLine::error(error));
            }

            // -- profile ------------------------------------------------
            AppMessage::ProfileUpdated { user } => {
                if let Some(session) = self.session.as_mut() {
                    session.user = user;
                }
                self.profile_form.cancel();
                self.status = Some(StatusLine::info("Profile updated."));
            }
            AppMessage::ProfileUpdateFailed { error } => {
                self.profile_form.error = Some(error);
            }
            AppMessage::AccountDeleted => {
                self.clear_local_session();
                self.status = Some(StatusLine::info("Account deleted."));
            }

            // -- password reset ----------------------------------------
            AppMessage::OtpRequested { email, token } => {
                if self.reset_flow.otp_requested(email.clone(), token) {
                    self.reset_form.clear_code();
                    self.status = Some(StatusLine::info(format!(
                        "Verification code sent to {}.",
                        email
                    )));
                }
            }
            AppMessage::OtpRequestFailed { error } => {
                self.reset_form.error = Some(error);
            }
            AppMessage::OtpVerified => {
                self.reset_flow.otp_verified();
                self.reset_form.error = None;
            }
            AppMessage::OtpVerifyFailed { error } => {
                self.reset_form.error = Some(error);
            }
            AppMessage::PasswordResetCompleted => {
                self.reset_flow.completed();
                self.reset_form.clear();
                self.dialog = None;
                // The old token is gone on the server; return to the
                // unauthenticated view with a clean slate.
                self.clear_local_session();
                let store = self.store.clone();
                tokio::spawn(async move {
                    if let Err(e) = store.clear().await {
                        warn!(error = %e, "failed to clear persisted session after reset");
                    }
                });
                self.status = Some(StatusLine::info(
                    "Password reset. Sign in with your new password.",
                ));
            }
            AppMessage::PasswordResetFailed { error } => {
                self.reset_form.error = Some(error);
            }
        }
    }

    /// Translate a key event into state changes and actions.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        // Ctrl+C always quits
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        self.status = None;

        if let Some(dialog) = self.dialog {
            self.handle_dialog_key(dialog, key);
            return;
        }

        match self.screen {
            Screen::Login => self.handle_login_key(key),
            Screen::Register => self.handle_register_key(key),
            Screen::Feed => self.handle_feed_key(key),
            Screen::PostDetail => self.handle_detail_key(key),
            Screen::Profile => self.handle_profile_key(key),
        }
    }

    // ------------------------------------------------------------------
    // Per-screen key handlers
    // ------------------------------------------------------------------

    fn handle_login_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Down | KeyCode::Up => self.login_form.next_field(),
            KeyCode::Enter => {
                if self.login_form.is_submittable() {
                    let email = self.login_form.email.trim().to_string();
                    let password = self.login_form.password.clone();
                    self.spawn_login(email, password);
                }
            }
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.go_to_register()
            }
            KeyCode::Backspace => self.login_form.backspace(),
            KeyCode::Char(c) => self.login_form.input(c),
            KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_register_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.register_form.next_field(),
            KeyCode::Enter => {
                if self.register_form.is_submittable() {
                    let name = self.register_form.name.trim().to_string();
                    let email = self.register_form.email.trim().to_string();
                    let password = self.register_form.password.clone();
                    self.spawn_register(name, email, password);
                }
            }
            KeyCode::Backspace => self.register_form.backspace(),
            KeyCode::Char(c) => self.register_form.input(c),
            KeyCode::Esc => self.go_to_login(),
            _ => {}
        }
    }

    fn handle_feed_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.feed_selected = self.feed_selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.feed_selected + 1 < self.cache.posts().len() {
                    self.feed_selected += 1;
                }
            }
            KeyCode::Enter => {
                let selected = self.cache.posts().get(self.feed_selected).map(|p| p.id);
                if let Some(id) = selected {
                    self.open_post(id);
                }
            }
            KeyCode::Char('f') => {
                let selected = self.cache.posts().get(self.feed_selected).map(|p| p.id);
                if let Some(id) = selected {
                    self.spawn_toggle_favorite(id);
                }
            }
            KeyCode::Char('n') => {
                self.compose_form.clear();
                self.dialog = Some(Dialog::Compose);
            }
            KeyCode::Char('p') => self.go_to_profile(),
            KeyCode::Char('r') => self.spawn_load_all(),
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) {
        let Some(post_id) = self.cache.viewing() else {
            self.back_to_feed();
            return;
        };

        if self.detail_focus == DetailFocus::Input {
            match key.code {
                KeyCode::Enter => {
                    if self.comment_form.is_submittable() {
                        let text = self.comment_form.text.trim().to_string();
                        match self.comment_form.editing {
                            Some(comment_id) => self.spawn_edit_comment(comment_id, text),
                            None => self.spawn_add_comment(post_id, text),
                        }
                    }
                }
                KeyCode::Esc => {
                    self.comment_form.clear();
                    self.detail_focus = DetailFocus::Comments;
                }
                KeyCode::Tab => self.detail_focus = DetailFocus::Comments,
                KeyCode::Backspace => self.comment_form.backspace(),
                KeyCode::Char(c) => self.comment_form.input(c),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.comment_selected = self.comment_selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.comment_selected + 1 < self.cache.comments_for(post_id).len() {
                    self.comment_selected += 1;
                }
            }
            KeyCode::Tab | KeyCode::Char('c') => self.detail_focus = DetailFocus::Input,
            KeyCode::Char('f') => self.spawn_toggle_favorite(post_id),
            KeyCode::Char('e') => {
                // Only the author may edit a comment
                let user_id = self.current_user().map(|u| u.id);
                let selected = self
                    .cache
                    .comments_for(post_id)
                    .get(self.comment_selected)
                    .map(|c| (c.id, c.author_id, c.text.clone()));
                if let Some((comment_id, author_id, text)) = selected {
                    if Some(author_id) == user_id {
                        self.comment_form.for_edit(comment_id, &text);
                        self.detail_focus = DetailFocus::Input;
                    }
                }
            }
            KeyCode::Char('d') => {
                // A comment is deletable by its author or the post owner
                let user_id = self.current_user().map(|u| u.id);
                let owner_id = self.cache.post(post_id).map(|p| p.owner_id);
                let selected = self
                    .cache
                    .comments_for(post_id)
                    .get(self.comment_selected)
                    .map(|c| (c.id, c.author_id));
                if let Some((comment_id, author_id)) = selected {
                    if Some(author_id) == user_id || user_id == owner_id {
                        self.spawn_delete_comment(comment_id);
                    }
                }
            }
            KeyCode::Char('u') => {
                // Only the owner may edit the post
                let user_id = self.current_user().map(|u| u.id);
                let owned = self
                    .cache
                    .post(post_id)
                    .filter(|p| Some(p.owner_id) == user_id)
                    .map(|p| (p.id, p.title.clone(), p.body.clone()));
                if let Some((id, title, body)) = owned {
                    self.compose_form = crate::view_state::ComposeForm::for_edit(id, &title, &body);
                    self.dialog = Some(Dialog::Compose);
                }
            }
            KeyCode::Char('x') => {
                let user_id = self.current_user().map(|u| u.id);
                let owned = self
                    .cache
                    .post(post_id)
                    .filter(|p| Some(p.owner_id) == user_id)
                    .map(|p| p.id);
                if let Some(id) = owned {
                    self.dialog = Some(Dialog::ConfirmDeletePost { id });
                }
            }
            KeyCode::Esc | KeyCode::Char('b') => self.back_to_feed(),
            _ => {}
        }
    }

    fn handle_profile_key(&mut self, key: KeyEvent) {
        if self.profile_form.editing {
            match key.code {
                KeyCode::Tab | KeyCode::Down => self.profile_form.next_field(),
                KeyCode::Enter => self.submit_profile_edit(),
                KeyCode::Esc => self.profile_form.cancel(),
                KeyCode::Backspace => self.profile_form.backspace(),
                KeyCode::Char(c) => self.profile_form.input(c),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('e') => {
                if let Some(user) = self.current_user() {
                    let (name, email) = (user.name.clone(), user.email.clone());
                    self.profile_form.start_editing(&name, &email);
                }
            }
            KeyCode::Char('x') => self.dialog = Some(Dialog::ConfirmDeleteAccount),
            KeyCode::Char('w') => {
                // Seed the email with the signed-in account
                let email = self.current_user().map(|u| u.email.clone());
                self.reset_form.clear();
                if let Some(email) = email {
                    self.reset_form.email = email;
                }
                self.dialog = Some(Dialog::Reset);
            }
            KeyCode::Char('l') => self.spawn_logout(),
            KeyCode::Esc | KeyCode::Char('b') => self.back_to_feed(),
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    /// Validate and submit the profile edit. Unchanged values skip the
    /// network call; empty values are rejected inline.
    fn submit_profile_edit(&mut self) {
        let Some(user) = self.current_user() else {
            return;
        };
        let (current_name, current_email) = (user.name.clone(), user.email.clone());

        if !self.profile_form.is_submittable() {
            self.profile_form.error = Some("Name and email cannot be empty.".to_string());
            return;
        }
        if !self.profile_form.is_changed(&current_name, &current_email) {
            self.profile_form.cancel();
            return;
        }
        let name = self.profile_form.name.trim().to_string();
        let email = self.profile_form.email.trim().to_string();
        self.spawn_update_profile(name, email);
    }

    // ------------------------------------------------------------------
    // Dialog key handlers
    // ------------------------------------------------------------------

    fn handle_dialog_key(&mut self, dialog: Dialog, key: KeyEvent) {
        match dialog {
            Dialog::Compose => self.handle_compose_key(key),
            Dialog::ConfirmDeletePost { id } => match key.code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    self.dialog = None;
                    self.spawn_delete_post(id);
                }
                KeyCode::Char('n') | KeyCode::Esc => self.dialog = None,
                _ => {}
            },
            Dialog::ConfirmDeleteAccount => match key.code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    self.dialog = None;
                    self.spawn_delete_account();
                }
                KeyCode::Char('n') | KeyCode::Esc => self.dialog = None,
                _ => {}
            },
            Dialog::Reset => self.handle_reset_key(key),
        }
    }

    fn handle_compose_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.compose_form.next_field(),
            KeyCode::Enter => {
                if !self.compose_form.is_submittable() {
                    self.compose_form.error = Some(if self.compose_form.editing.is_some() {
                        "Title and body are required.".to_string()
                    } else {
                        "Title, body, and image path are required.".to_string()
                    });
                    return;
                }
                let title = self.compose_form.title.trim().to_string();
                let body = self.compose_form.body.trim().to_string();
                match self.compose_form.editing {
                    Some(id) => self.spawn_update_post(id, title, body),
                    None => {
                        let image_path = self.compose_form.image_path.trim().to_string();
                        self.spawn_create_post(title, body, image_path);
                    }
                }
            }
            KeyCode::Esc => {
                self.compose_form.clear();
                self.dialog = None;
            }
            KeyCode::Backspace => self.compose_form.backspace(),
            KeyCode::Char(c) => self.compose_form.input(c),
            _ => {}
        }
    }

    /// Keys for the reset dialog; which input is live follows the flow
    /// state.
    fn handle_reset_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            // Cancellation at any step discards the in-progress state
            self.reset_flow.cancel();
            self.reset_form.clear();
            self.dialog = None;
            return;
        }

        // Owned copy so the flow can be mutated from the arms below
        let flow_email = self.reset_flow.email().map(String::from);

        match self.reset_flow.clone() {
            ResetFlow::Idle => match key.code {
                KeyCode::Enter => {
                    let email = self.reset_form.email.trim().to_string();
                    if !email.is_empty() {
                        self.spawn_request_otp(email);
                    }
                }
                KeyCode::Backspace => {
                    self.reset_form.error = None;
                    self.reset_form.email.pop();
                }
                KeyCode::Char(c) => self.reset_form.input_email(c),
                _ => {}
            },
            ResetFlow::AwaitingOtp { .. } => match key.code {
                KeyCode::Enter => {
                    if self.reset_form.code_complete() {
                        let code = self.reset_form.code.clone();
                        self.spawn_verify_otp(code);
                    }
                }
                KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    if let Some(email) = flow_email {
                        self.reset_form.clear_code();
                        self.spawn_request_otp(email);
                    }
                }
                KeyCode::Backspace => {
                    self.reset_form.error = None;
                    self.reset_form.code.pop();
                }
                KeyCode::Char(c) => self.reset_form.input_code(c),
                _ => {}
            },
            ResetFlow::AwaitingNewPassword { .. } => match key.code {
                KeyCode::Tab | KeyCode::Down | KeyCode::Up => {
                    self.reset_form.next_password_field()
                }
                KeyCode::Enter => {
                    let check = PasswordCheck::evaluate(
                        &self.reset_form.password,
                        &self.reset_form.confirmation,
                    );
                    match check.first_failure() {
                        Some(message) => self.reset_form.error = Some(message.to_string()),
                        None => {
                            let password = self.reset_form.password.clone();
                            self.spawn_reset_password(password);
                        }
                    }
                }
                KeyCode::Backspace => {
                    self.reset_form.error = None;
                    match self.reset_form.focus {
                        crate::view_state::ResetPasswordField::Password => {
                            self.reset_form.password.pop()
                        }
                        crate::view_state::ResetPasswordField::Confirmation => {
                            self.reset_form.confirmation.pop()
                        }
                    };
                }
                KeyCode::Char(c) => self.reset_form.input_password(c),
                _ => {}
            },
        }
    }

    // ------------------------------------------------------------------
    // Selection clamping
    // ------------------------------------------------------------------

    fn clamp_feed_selection(&mut self) {
        let len = self.cache.posts().len();
        if len == 0 {
            self.feed_selected = 0;
        } else if self.feed_selected >= len {
            self.feed_selected = len - 1;
        }
    }

    fn clamp_comment_selection(&mut self) {
        let len = self
            .cache
            .viewing()
            .map(|id| self.cache.comments_for(id).len())
            .unwrap_or(0);
        if len == 0 {
            self.comment_selected = 0;
        } else if self.comment_selected >= len {
            self.comment_selected = len - 1;
        }
    }
}
