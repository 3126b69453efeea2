//! Screen transitions.

use super::{App, DetailFocus, Screen};

impl App {
    /// Open a post's detail view and fetch its detail + comments.
    ///
    /// The previously cached copy renders immediately; the fetch
    /// replaces it when it lands.
    pub fn open_post(&mut self, post_id: i64) {
        self.cache.set_viewing(Some(post_id));
        self.comment_selected = 0;
        self.comment_form.clear();
        self.detail_focus = DetailFocus::Comments;
        self.screen = Screen::PostDetail;
        self.spawn_open_post(post_id);
    }

    /// Return to the feed, dropping the detail selection.
    pub fn back_to_feed(&mut self) {
        self.cache.set_viewing(None);
        self.comment_form.clear();
        self.detail_focus = DetailFocus::Comments;
        self.screen = Screen::Feed;
    }

    /// Show the current user's profile.
    pub fn go_to_profile(&mut self) {
        self.cache.set_viewing(None);
        self.profile_form.cancel();
        self.screen = Screen::Profile;
    }

    /// Switch to the register screen.
    pub fn go_to_register(&mut self) {
        self.register_form.clear();
        self.screen = Screen::Register;
    }

    /// Switch to the login screen.
    pub fn go_to_login(&mut self) {
        self.login_form.clear();
        self.screen = Screen::Login;
    }
}
