//! Application state and logic for the TUI.
//!
//! This module contains the core [`App`] struct and related types:
//! - [`Screen`] - Which screen is currently displayed
//! - [`Dialog`] - Modal dialog layered over the screen
//! - [`AppMessage`] - Messages for async communication
//!
//! The [`App`] is the central coordinator: key handlers turn input into
//! spawned request tasks, tasks report back through the message channel,
//! and message handlers patch the session and content cache.

mod actions;
mod handlers;
mod messages;
mod navigation;
mod types;

pub use messages::AppMessage;
pub use types::{Dialog, DetailFocus, Screen, StatusLevel, StatusLine};

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

use crate::api::ApiClient;
use crate::models::User;
use crate::session::Session;
use crate::state::{ContentCache, ResetFlow};
use crate::traits::SessionStore;
use crate::view_state::{
    CommentForm, ComposeForm, LoginForm, ProfileForm, RegisterForm, ResetForm,
};

/// Main application state.
pub struct App {
    /// Current screen being displayed
    pub screen: Screen,
    /// Modal dialog over the screen, if any
    pub dialog: Option<Dialog>,
    /// Flag to track if the app should quit
    pub should_quit: bool,

    /// Authenticated session, fully populated or absent
    pub session: Option<Session>,
    /// Server-confirmed content state
    pub cache: ContentCache,
    /// Password-reset flow state machine
    pub reset_flow: ResetFlow,

    /// Login screen form
    pub login_form: LoginForm,
    /// Register screen form
    pub register_form: RegisterForm,
    /// Create/edit post dialog form
    pub compose_form: ComposeForm,
    /// Profile edit form
    pub profile_form: ProfileForm,
    /// Comment input under the post detail
    pub comment_form: CommentForm,
    /// Password-reset dialog inputs
    pub reset_form: ResetForm,

    /// Selected row in the feed list
    pub feed_selected: usize,
    /// Selected row in the detail comment list
    pub comment_selected: usize,
    /// Focus inside the detail screen
    pub detail_focus: DetailFocus,

    /// True while the initial/full content load is in flight
    pub loading: bool,
    /// True while a post detail load is in flight
    pub detail_loading: bool,
    /// One-line feedback at the bottom of the screen
    pub status: Option<StatusLine>,
    /// Tick counter for spinner animation
    pub tick_count: u64,

    /// Receiver for async messages (request task results)
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    /// Sender for async messages (clone this into request tasks)
    pub message_tx: mpsc::UnboundedSender<AppMessage>,

    /// API client shared with request tasks
    pub api: Arc<ApiClient>,
    /// Durable session store shared with request tasks
    pub store: Arc<dyn SessionStore>,
}

impl App {
    /// Create an unauthenticated app showing the login screen.
    pub fn new(api: Arc<ApiClient>, store: Arc<dyn SessionStore>) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        Self {
            screen: Screen::Login,
            dialog: None,
            should_quit: false,
            session: None,
            cache: ContentCache::new(),
            reset_flow: ResetFlow::default(),
            login_form: LoginForm::default(),
            register_form: RegisterForm::default(),
            compose_form: ComposeForm::default(),
            profile_form: ProfileForm::default(),
            comment_form: CommentForm::default(),
            reset_form: ResetForm::default(),
            feed_selected: 0,
            comment_selected: 0,
            detail_focus: DetailFocus::default(),
            loading: false,
            detail_loading: false,
            status: None,
            tick_count: 0,
            message_rx: Some(message_rx),
            message_tx,
            api,
            store,
        }
    }

    /// Create an app resuming a restored session: authenticated, on the
    /// feed, with the bearer header installed and the initial content
    /// load already issued.
    pub fn with_session(
        api: Arc<ApiClient>,
        store: Arc<dyn SessionStore>,
        session: Session,
    ) -> Self {
        api.set_token(Some(session.token.clone()));
        let mut app = Self::new(api, store);
        app.session = Some(session);
        app.screen = Screen::Feed;
        app.spawn_load_all();
        app
    }

    /// The signed-in user, if any.
    pub fn current_user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    /// Hydrate the session after a successful login: install the bearer
    /// token, land on the feed, and load content.
    pub(crate) fn enter_session(&mut self, session: Session) {
        self.api.set_token(Some(session.token.clone()));
        info!(user_id = session.user.id, "session established");
        self.session = Some(session);
        self.login_form.clear();
        self.register_form.clear();
        self.screen = Screen::Feed;
        self.feed_selected = 0;
        self.spawn_load_all();
    }

    /// Drop every trace of the session from memory and route to the
    /// login screen. The durable store is cleared by the caller's
    /// request task; this is the synchronous, in-memory half.
    pub(crate) fn clear_local_session(&mut self) {
        self.api.set_token(None);
        self.session = None;
        self.cache.clear();
        self.dialog = None;
        self.reset_flow.cancel();
        self.reset_form.clear();
        self.comment_form.clear();
        self.compose_form.clear();
        self.profile_form.cancel();
        self.feed_selected = 0;
        self.comment_selected = 0;
        self.detail_focus = DetailFocus::default();
        self.screen = Screen::Login;
    }

    /// Forced logout on an authentication failure: clear local state,
    /// clear the durable store, and say why. No server logout call; the
    /// token is already dead.
    pub(crate) fn force_logout(&mut self, reason: &str) {
        self.clear_local_session();
        self.status = Some(StatusLine::error(reason.to_string()));
        let store = self.store.clone();
        tokio::spawn(async move {
            if let Err(e) = store.clear().await {
                tracing::warn!(error = %e, "failed to clear session store on forced logout");
            }
        });
    }

    /// Advance the animation counter.
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
    }
}
