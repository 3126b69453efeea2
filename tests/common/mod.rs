//! Shared helpers for integration tests.
//!
//! Each test binary uses a subset of these; the allowance keeps the
//! unused-item lint quiet across binaries.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use pluma::adapters::mock::{InMemorySessionStore, MockHttpClient, MockResponse};
use pluma::api::ApiClient;
use pluma::app::App;
use pluma::session::PersistedSession;
use pluma::traits::HttpClient;

/// Base URL used by all mock-backed tests.
pub const BASE: &str = "http://pluma.test";

/// A fully wired test fixture: mock HTTP, in-memory store, app.
pub struct TestHarness {
    pub http: Arc<MockHttpClient>,
    pub store: Arc<InMemorySessionStore>,
    pub api: Arc<ApiClient>,
}

impl TestHarness {
    pub fn new() -> Self {
        let http = Arc::new(MockHttpClient::new());
        let api = Arc::new(ApiClient::new(BASE, http.clone() as Arc<dyn HttpClient>));
        Self {
            http,
            store: Arc::new(InMemorySessionStore::new()),
            api,
        }
    }

    /// Seed the store with a valid persisted session.
    pub fn with_persisted_session(self) -> Self {
        let store = Arc::new(InMemorySessionStore::with_session(valid_record()));
        Self { store, ..self }
    }

    /// Build an unauthenticated app on this harness.
    pub fn app(&self) -> App {
        App::new(self.api.clone(), self.store.clone())
    }

    /// Shorthand for registering a JSON response.
    pub fn respond(&self, method: &str, path: &str, status: u16, body: &str) {
        self.http
            .set_response(method, &format!("{}{}", BASE, path), MockResponse::json(status, body));
    }

    /// Register empty-but-successful responses for the three content
    /// collection endpoints.
    pub fn respond_empty_content(&self) {
        self.respond("GET", "/api/publicacoes", 200, "[]");
        self.respond("GET", "/api/comentarios", 200, "[]");
        self.respond("GET", "/api/favoritos", 200, "[]");
    }

    /// URLs of all recorded requests, in order.
    pub fn request_urls(&self) -> Vec<String> {
        self.http.requests().into_iter().map(|r| r.url).collect()
    }
}

/// A well-formed persisted session record.
pub fn valid_record() -> PersistedSession {
    PersistedSession {
        token: Some("t1".to_string()),
        user: Some(serde_json::json!({"id":1,"nome":"A","email":"a@b.com"})),
    }
}

/// Wait for one async task result and apply it to the app.
///
/// Panics if nothing arrives within two seconds; mock-backed tasks
/// answer instantly, so a timeout means the action never spawned.
pub async fn pump_one(app: &mut App) {
    let mut rx = app.message_rx.take().expect("message receiver missing");
    let msg = tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("timed out waiting for an app message")
        .expect("message channel closed");
    app.message_rx = Some(rx);
    app.handle_message(msg);
}

/// Wait for `n` task results, applying each in arrival order.
pub async fn pump_n(app: &mut App, n: usize) {
    for _ in 0..n {
        pump_one(app).await;
    }
}

/// Assert that no message is pending (no task reported anything).
pub fn assert_no_message(app: &mut App) {
    let rx = app.message_rx.as_mut().expect("message receiver missing");
    assert!(rx.try_recv().is_err(), "unexpected pending message");
}

/// JSON body for a post list containing the given posts.
pub fn post_json(id: i64, title: &str, owner_id: i64) -> String {
    format!(
        r#"{{"id":{},"titulo":"{}","descricao":"body","usuario_id":{},"favoritos_count":0,"favoritos":[],"comentarios":[]}}"#,
        id, title, owner_id
    )
}
