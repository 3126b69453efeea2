//! API client against a real HTTP server (wiremock), exercising the
//! reqwest adapter end to end: bearer injection, JSON bodies, multipart
//! upload, and error mapping.

use std::sync::Arc;

use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pluma::adapters::ReqwestHttpClient;
use pluma::api::ApiClient;
use pluma::error::{AuthError, PlumaError};
use pluma::traits::{FilePart, HttpClient};

fn client_for(server: &MockServer) -> ApiClient {
    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());
    ApiClient::new(server.uri(), http)
}

#[tokio::test]
async fn login_round_trip_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_string_contains("\"email\":\"a@b.com\""))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"token":"t1","usuario":{"id":1,"nome":"A","email":"a@b.com"}}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let api = client_for(&server);
    let session = api.login("a@b.com", "Secret1").await.unwrap();
    assert_eq!(session.token, "t1");
    assert_eq!(session.user.name, "A");
}

#[tokio::test]
async fn bearer_token_is_injected_once_set() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/publicacoes"))
        .and(header("Authorization", "Bearer t1"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("[]", "application/json"))
        .mount(&server)
        .await;

    let api = client_for(&server);
    api.set_token(Some("t1".to_string()));
    let posts = api.fetch_posts().await.unwrap();
    assert!(posts.is_empty());
}

#[tokio::test]
async fn comment_filter_uses_query_param() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/comentarios"))
        .and(query_param("publicacaoId", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"[{"id":9,"publicacao_id":5,"usuario_id":1,"texto":"hi"}]"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let api = client_for(&server);
    let comments = api.fetch_comments_for(5).await.unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].post_id, 5);
}

#[tokio::test]
async fn create_post_sends_multipart_with_image() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/publicacoes"))
        .respond_with(ResponseTemplate::new(201).set_body_raw(
            r#"{"id":9,"titulo":"T","descricao":"D","usuario_id":1,"foto_url":"up/9.png"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let api = client_for(&server);
    let image = FilePart {
        name: "foto".to_string(),
        filename: "cover.png".to_string(),
        content_type: "image/png".to_string(),
        data: bytes::Bytes::from_static(&[137, 80, 78, 71]),
    };
    let post = api.create_post("T", "D", image).await.unwrap();
    assert_eq!(post.id, 9);
    assert_eq!(post.image.as_deref(), Some("up/9.png"));

    // The request was a multipart form carrying all three parts
    let requests = server.received_requests().await.unwrap();
    let create = &requests[0];
    let content_type = create
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(content_type.starts_with("multipart/form-data"));
    let body = String::from_utf8_lossy(&create.body);
    assert!(body.contains("name=\"titulo\""));
    assert!(body.contains("name=\"descricao\""));
    assert!(body.contains("filename=\"cover.png\""));
}

#[tokio::test]
async fn fetch_user_reads_account() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/usuarios/12"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"id":12,"nome":"Rui","email":"rui@b.com"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let api = client_for(&server);
    let user = api.fetch_user(12).await.unwrap();
    assert_eq!(user.name, "Rui");
    assert_eq!(user.email, "rui@b.com");
}

#[tokio::test]
async fn unauthorized_maps_to_reauth_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/favoritos"))
        .respond_with(ResponseTemplate::new(401).set_body_raw(
            r#"{"message":"Unauthenticated."}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let api = client_for(&server);
    let err = api.fetch_favorites().await.unwrap_err();
    assert!(err.requires_reauth());
    assert!(matches!(
        err,
        PlumaError::Auth(AuthError::TokenRejected { .. })
    ));
}

#[tokio::test]
async fn server_error_message_is_surfaced_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/password/solicitar-reset"))
        .respond_with(ResponseTemplate::new(422).set_body_raw(
            r#"{"message":"Email não cadastrado"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let api = client_for(&server);
    let err = api.request_password_reset("x@y.com").await.unwrap_err();
    assert_eq!(err.user_message(), "Email não cadastrado");
}

#[tokio::test]
async fn connection_refused_is_a_network_error() {
    // Nothing listens on this port
    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());
    let api = ApiClient::new("http://127.0.0.1:59998", http);

    let err = api.fetch_posts().await.unwrap_err();
    assert!(matches!(err, PlumaError::Network(_)));
    assert!(err.is_retryable());
    assert!(!err.requires_reauth());
}

#[tokio::test]
async fn normalization_applies_on_the_wire() {
    let server = MockServer::start().await;
    // Owner id arrives camel-cased and stringly; image under foto_url
    Mock::given(method("GET"))
        .and(path("/api/publicacoes/7"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"id":7,"titulo":"T","descricao":"D","usuarioId":"12","foto_url":"pic.png",
                "favoritos":[{"id":1,"publicacaoId":7,"usuarioId":"3"}]}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let api = client_for(&server);
    let post = api.fetch_post(7).await.unwrap();
    assert_eq!(post.owner_id, 12);
    assert_eq!(post.image.as_deref(), Some("pic.png"));
    assert_eq!(post.favorites[0].user_id, 3);
}
