//! Typed API client for the Pluma server.
//!
//! Wraps an [`HttpClient`] with the base endpoint, bearer-token
//! injection, and one typed method per server operation. All responses
//! pass through a single status policy: 401 invalidates the session,
//! any other non-2xx becomes an API error carrying the server's
//! `message` field verbatim when present.

use std::sync::{Arc, RwLock};

use crate::error::{classify_http_error, AuthError, PlumaError, PlumaResult};
use crate::models::{
    Comment, Favorite, LoginResponse, OtpTokenResponse, Post, ProfileResponse, ServerMessage, User,
};
use crate::session::Session;
use crate::traits::{FilePart, Headers, HttpClient, Response};

/// Default base URL for the Pluma API.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Client for the Pluma server API.
///
/// Cheap to share: hold it in an `Arc` and clone the handle into
/// spawned request tasks. The bearer token is interior state so login
/// and logout take effect for every holder at once.
pub struct ApiClient {
    base_url: String,
    http: Arc<dyn HttpClient>,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    /// Create a client for the given base URL.
    pub fn new(base_url: impl Into<String>, http: Arc<dyn HttpClient>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            http,
            token: RwLock::new(None),
        }
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Install the bearer token used for all subsequent requests.
    pub fn set_token(&self, token: Option<String>) {
        *self.token.write().expect("token lock poisoned") = token;
    }

    /// The current bearer token, if any.
    pub fn token(&self) -> Option<String> {
        self.token.read().expect("token lock poisoned").clone()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn headers(&self) -> Headers {
        let mut headers = Headers::new();
        if let Some(token) = self.token() {
            headers.insert("Authorization".to_string(), format!("Bearer {}", token));
        }
        headers
    }

    /// Pull the server's `message` field out of an error body, falling
    /// back to the raw text when it is short enough to be a message.
    fn server_message(response: &Response) -> String {
        if let Ok(ServerMessage {
            message: Some(message),
        }) = response.json::<ServerMessage>()
        {
            return message;
        }
        match response.text() {
            Ok(text) if !text.trim().is_empty() && text.len() <= 200 => text.trim().to_string(),
            _ => String::new(),
        }
    }

    /// Apply the uniform status policy to a response.
    fn check(response: Response) -> PlumaResult<Response> {
        if response.is_success() {
            return Ok(response);
        }
        let message = Self::server_message(&response);
        if response.status == 401 {
            Err(AuthError::TokenRejected { message }.into())
        } else {
            Err(PlumaError::Api {
                status: response.status,
                message,
            })
        }
    }

    async fn get(&self, path: &str) -> PlumaResult<Response> {
        let url = self.url(path);
        let response = self
            .http
            .get(&url, &self.headers())
            .await
            .map_err(|e| classify_http_error(e, &url))?;
        Self::check(response)
    }

    async fn post(&self, path: &str, body: &serde_json::Value) -> PlumaResult<Response> {
        let url = self.url(path);
        let response = self
            .http
            .post(&url, &body.to_string(), &self.headers())
            .await
            .map_err(|e| classify_http_error(e, &url))?;
        Self::check(response)
    }

    async fn put(&self, path: &str, body: &serde_json::Value) -> PlumaResult<Response> {
        let url = self.url(path);
        let response = self
            .http
            .put(&url, &body.to_string(), &self.headers())
            .await
            .map_err(|e| classify_http_error(e, &url))?;
        Self::check(response)
    }

    async fn delete(&self, path: &str) -> PlumaResult<Response> {
        let url = self.url(path);
        let response = self
            .http
            .delete(&url, &self.headers())
            .await
            .map_err(|e| classify_http_error(e, &url))?;
        Self::check(response)
    }

    // ------------------------------------------------------------------
    // Authentication and account
    // ------------------------------------------------------------------

    /// POST /api/login — authenticate and build a session.
    ///
    /// A rejected login is an [`AuthError::InvalidCredentials`] (it does
    /// not invalidate anything); a 2xx response missing token or user is
    /// rejected as malformed rather than trusted.
    pub async fn login(&self, email: &str, password: &str) -> PlumaResult<Session> {
        let url = self.url("/api/login");
        let body = serde_json::json!({ "email": email, "password": password });
        let response = self
            .http
            .post(&url, &body.to_string(), &self.headers())
            .await
            .map_err(|e| classify_http_error(e, &url))?;

        if !response.is_success() {
            let message = Self::server_message(&response);
            return Err(AuthError::InvalidCredentials { message }.into());
        }

        let parsed: LoginResponse = response.json()?;
        match (parsed.token, parsed.user) {
            (Some(token), Some(user)) if !token.trim().is_empty() => {
                Ok(Session::new(token, user))
            }
            _ => Err(AuthError::MalformedLoginResponse.into()),
        }
    }

    /// POST /api/logout — best-effort server-side session invalidation.
    pub async fn logout(&self) -> PlumaResult<()> {
        self.post("/api/logout", &serde_json::json!({})).await?;
        Ok(())
    }

    /// POST /api/usuarios — register a new account.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> PlumaResult<()> {
        let body = serde_json::json!({ "nome": name, "email": email, "senha": password });
        self.post("/api/usuarios", &body).await?;
        Ok(())
    }

    /// GET /api/usuarios/{id} — read an account.
    pub async fn fetch_user(&self, id: i64) -> PlumaResult<User> {
        let response = self.get(&format!("/api/usuarios/{}", id)).await?;
        Ok(response.json()?)
    }

    /// PUT /api/usuarios/{id} — update name/email, returning the
    /// server's replacement user record.
    pub async fn update_profile(&self, id: i64, name: &str, email: &str) -> PlumaResult<User> {
        let body = serde_json::json!({ "nome": name, "email": email });
        let response = self.put(&format!("/api/usuarios/{}", id), &body).await?;
        let parsed: ProfileResponse = response.json()?;
        parsed
            .user
            .ok_or_else(|| PlumaError::Decode("profile response missing usuario".to_string()))
    }

    /// DELETE /api/usuarios/{id} — delete the account.
    pub async fn delete_account(&self, id: i64) -> PlumaResult<()> {
        self.delete(&format!("/api/usuarios/{}", id)).await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Posts
    // ------------------------------------------------------------------

    /// GET /api/publicacoes — list all posts.
    pub async fn fetch_posts(&self) -> PlumaResult<Vec<Post>> {
        let response = self.get("/api/publicacoes").await?;
        Ok(response.json()?)
    }

    /// GET /api/publicacoes/{id} — read one post (detail shape, with
    /// embedded comments and favorites).
    pub async fn fetch_post(&self, id: i64) -> PlumaResult<Post> {
        let response = self.get(&format!("/api/publicacoes/{}", id)).await?;
        Ok(response.json()?)
    }

    /// POST /api/publicacoes — create a post (multipart: title, body, image).
    pub async fn create_post(
        &self,
        title: &str,
        body: &str,
        image: FilePart,
    ) -> PlumaResult<Post> {
        let url = self.url("/api/publicacoes");
        let fields = vec![
            ("titulo".to_string(), title.to_string()),
            ("descricao".to_string(), body.to_string()),
        ];
        let response = self
            .http
            .post_multipart(&url, &fields, image, &self.headers())
            .await
            .map_err(|e| classify_http_error(e, &url))?;
        let response = Self::check(response)?;
        Ok(response.json()?)
    }

    /// PUT /api/publicacoes/{id} — update title and body.
    pub async fn update_post(&self, id: i64, title: &str, body: &str) -> PlumaResult<()> {
        let payload = serde_json::json!({ "id": id, "titulo": title, "descricao": body });
        self.put(&format!("/api/publicacoes/{}", id), &payload)
            .await?;
        Ok(())
    }

    /// DELETE /api/publicacoes/{id} — delete a post. The server cascades
    /// to its comments and favorites.
    pub async fn delete_post(&self, id: i64) -> PlumaResult<()> {
        self.delete(&format!("/api/publicacoes/{}", id)).await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Comments
    // ------------------------------------------------------------------

    /// GET /api/comentarios — list all comments.
    pub async fn fetch_comments(&self) -> PlumaResult<Vec<Comment>> {
        let response = self.get("/api/comentarios").await?;
        Ok(response.json()?)
    }

    /// GET /api/comentarios?publicacaoId={id} — list one post's comments.
    pub async fn fetch_comments_for(&self, post_id: i64) -> PlumaResult<Vec<Comment>> {
        let response = self
            .get(&format!("/api/comentarios?publicacaoId={}", post_id))
            .await?;
        Ok(response.json()?)
    }

    /// POST /api/comentarios — create a comment, returning the server's
    /// record (with its assigned id).
    pub async fn create_comment(&self, post_id: i64, text: &str) -> PlumaResult<Comment> {
        let body = serde_json::json!({ "publicacao_id": post_id, "texto": text });
        let response = self.post("/api/comentarios", &body).await?;
        Ok(response.json()?)
    }

    /// PUT /api/comentarios/{id} — replace a comment's text.
    pub async fn update_comment(&self, id: i64, text: &str) -> PlumaResult<()> {
        let body = serde_json::json!({ "texto": text });
        self.put(&format!("/api/comentarios/{}", id), &body).await?;
        Ok(())
    }

    /// DELETE /api/comentarios/{id} — delete a comment.
    pub async fn delete_comment(&self, id: i64) -> PlumaResult<()> {
        self.delete(&format!("/api/comentarios/{}", id)).await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Favorites
    // ------------------------------------------------------------------

    /// GET /api/favoritos — list all favorites.
    pub async fn fetch_favorites(&self) -> PlumaResult<Vec<Favorite>> {
        let response = self.get("/api/favoritos").await?;
        Ok(response.json()?)
    }

    /// POST /api/favoritos — favorite a post, returning the join record.
    pub async fn create_favorite(&self, post_id: i64) -> PlumaResult<Favorite> {
        let body = serde_json::json!({ "publicacao_id": post_id });
        let response = self.post("/api/favoritos", &body).await?;
        Ok(response.json()?)
    }

    /// DELETE /api/favoritos/{id} — remove a favorite.
    pub async fn delete_favorite(&self, id: i64) -> PlumaResult<()> {
        self.delete(&format!("/api/favoritos/{}", id)).await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Password reset
    // ------------------------------------------------------------------

    /// POST /api/password/solicitar-reset — request an OTP for the
    /// email, returning the short-lived reset token.
    pub async fn request_password_reset(&self, email: &str) -> PlumaResult<String> {
        let body = serde_json::json!({ "email": email });
        let response = self.post("/api/password/solicitar-reset", &body).await?;
        let parsed: OtpTokenResponse = response.json()?;
        Ok(parsed.token)
    }

    /// POST /api/verificacao/verificar-otp — validate the emailed code.
    pub async fn verify_otp(&self, email: &str, code: &str, token: &str) -> PlumaResult<()> {
        let body = serde_json::json!({ "email": email, "otp_code": code, "token": token });
        self.post("/api/verificacao/verificar-otp", &body).await?;
        Ok(())
    }

    /// POST /api/password/redefinir — set the new password.
    pub async fn reset_password(
        &self,
        email: &str,
        new_password: &str,
        token: &str,
    ) -> PlumaResult<()> {
        let body = serde_json::json!({
            "email": email,
            "nova_senha": new_password,
            "senha_confirmation": new_password,
            "token": token,
        });
        self.post("/api/password/redefinir", &body).await?;
        Ok(())
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("has_token", &self.token().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};

    fn client_with_mock() -> (Arc<MockHttpClient>, ApiClient) {
        let mock = Arc::new(MockHttpClient::new());
        let api = ApiClient::new("http://x", mock.clone() as Arc<dyn HttpClient>);
        (mock, api)
    }

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let mock = Arc::new(MockHttpClient::new());
        let api = ApiClient::new("http://x/", mock as Arc<dyn HttpClient>);
        assert_eq!(api.base_url(), "http://x");
    }

    #[tokio::test]
    async fn test_bearer_header_injected_when_token_set() {
        let (mock, api) = client_with_mock();
        mock.set_response("GET", "http://x/api/publicacoes", MockResponse::json(200, "[]"));

        api.set_token(Some("t1".to_string()));
        api.fetch_posts().await.unwrap();

        let requests = mock.requests();
        assert_eq!(requests[0].auth_header(), Some("Bearer t1"));
    }

    #[tokio::test]
    async fn test_no_bearer_header_without_token() {
        let (mock, api) = client_with_mock();
        mock.set_response("GET", "http://x/api/publicacoes", MockResponse::json(200, "[]"));

        api.fetch_posts().await.unwrap();
        assert_eq!(mock.requests()[0].auth_header(), None);
    }

    #[tokio::test]
    async fn test_login_builds_session() {
        let (mock, api) = client_with_mock();
        mock.set_response(
            "POST",
            "http://x/api/login",
            MockResponse::json(
                200,
                r#"{"token":"t1","usuario":{"id":1,"nome":"A","email":"a@b.com"}}"#,
            ),
        );

        let session = api.login("a@b.com", "Secret1").await.unwrap();
        assert_eq!(session.token, "t1");
        assert_eq!(session.user.id, 1);

        let body = mock.requests()[0].body.clone().unwrap();
        assert!(body.contains("\"email\":\"a@b.com\""));
        assert!(body.contains("\"password\":\"Secret1\""));
    }

    #[tokio::test]
    async fn test_login_missing_user_is_malformed() {
        let (mock, api) = client_with_mock();
        mock.set_response(
            "POST",
            "http://x/api/login",
            MockResponse::json(200, r#"{"token":"t1"}"#),
        );

        let err = api.login("a@b.com", "x").await.unwrap_err();
        assert!(matches!(
            err,
            PlumaError::Auth(AuthError::MalformedLoginResponse)
        ));
    }

    #[tokio::test]
    async fn test_login_rejection_is_invalid_credentials() {
        let (mock, api) = client_with_mock();
        mock.set_response(
            "POST",
            "http://x/api/login",
            MockResponse::json(401, r#"{"message":"Credenciais incorretas"}"#),
        );

        let err = api.login("a@b.com", "wrong").await.unwrap_err();
        match err {
            PlumaError::Auth(AuthError::InvalidCredentials { message }) => {
                assert_eq!(message, "Credenciais incorretas");
            }
            other => panic!("unexpected: {:?}", other),
        }
        // A rejected login must not force a logout
        assert!(!AuthError::InvalidCredentials {
            message: String::new()
        }
        .requires_reauth());
    }

    #[tokio::test]
    async fn test_401_on_content_requires_reauth() {
        let (mock, api) = client_with_mock();
        mock.set_response(
            "GET",
            "http://x/api/publicacoes",
            MockResponse::json(401, r#"{"message":"Unauthenticated."}"#),
        );

        let err = api.fetch_posts().await.unwrap_err();
        assert!(err.requires_reauth());
    }

    #[tokio::test]
    async fn test_server_message_extracted_on_error() {
        let (mock, api) = client_with_mock();
        mock.set_response(
            "POST",
            "http://x/api/password/solicitar-reset",
            MockResponse::json(422, r#"{"message":"Email not registered"}"#),
        );

        let err = api.request_password_reset("a@b.com").await.unwrap_err();
        assert_eq!(err.user_message(), "Email not registered");
    }

    #[tokio::test]
    async fn test_comment_filter_query() {
        let (mock, api) = client_with_mock();
        mock.set_response("GET", "http://x/api/comentarios", MockResponse::json(200, "[]"));

        api.fetch_comments_for(5).await.unwrap();
        assert_eq!(
            mock.requests()[0].url,
            "http://x/api/comentarios?publicacaoId=5"
        );
    }

    #[tokio::test]
    async fn test_create_favorite_payload() {
        let (mock, api) = client_with_mock();
        mock.set_response(
            "POST",
            "http://x/api/favoritos",
            MockResponse::json(201, r#"{"id":3,"publicacao_id":5,"usuario_id":1}"#),
        );

        let favorite = api.create_favorite(5).await.unwrap();
        assert_eq!(favorite.post_id, 5);
        assert!(mock.requests()[0]
            .body
            .as_deref()
            .unwrap()
            .contains("\"publicacao_id\":5"));
    }

    #[tokio::test]
    async fn test_reset_password_payload() {
        let (mock, api) = client_with_mock();
        mock.set_response(
            "POST",
            "http://x/api/password/redefinir",
            MockResponse::json(200, r#"{"message":"ok"}"#),
        );

        api.reset_password("a@b.com", "Nova123", "tok").await.unwrap();
        let body = mock.requests()[0].body.clone().unwrap();
        assert!(body.contains("\"nova_senha\":\"Nova123\""));
        assert!(body.contains("\"senha_confirmation\":\"Nova123\""));
        assert!(body.contains("\"token\":\"tok\""));
    }

    #[tokio::test]
    async fn test_update_profile_unwraps_usuario() {
        let (mock, api) = client_with_mock();
        mock.set_response(
            "PUT",
            "http://x/api/usuarios/1",
            MockResponse::json(200, r#"{"usuario":{"id":1,"nome":"B","email":"b@b.com"}}"#),
        );

        let user = api.update_profile(1, "B", "b@b.com").await.unwrap();
        assert_eq!(user.name, "B");
    }

    #[tokio::test]
    async fn test_create_post_multipart_fields() {
        let (mock, api) = client_with_mock();
        mock.set_response(
            "POST",
            "http://x/api/publicacoes",
            MockResponse::json(201, r#"{"id":9,"titulo":"T","descricao":"D","usuario_id":1}"#),
        );

        let image = FilePart {
            name: "foto".to_string(),
            filename: "pic.png".to_string(),
            content_type: "image/png".to_string(),
            data: bytes::Bytes::from_static(&[0u8; 4]),
        };
        let post = api.create_post("T", "D", image).await.unwrap();
        assert_eq!(post.id, 9);

        let body = mock.requests()[0].body.clone().unwrap();
        assert!(body.contains("titulo=T"));
        assert!(body.contains("descricao=D"));
        assert!(body.contains("foto=@pic.png"));
    }

    #[tokio::test]
    async fn test_transport_error_classified() {
        let (mock, api) = client_with_mock();
        mock.set_response(
            "GET",
            "http://x/api/publicacoes",
            MockResponse::Error(crate::traits::HttpError::ConnectionFailed(
                "refused".to_string(),
            )),
        );

        let err = api.fetch_posts().await.unwrap_err();
        assert!(matches!(err, PlumaError::Network(_)));
        assert!(err.is_retryable());
    }
}
