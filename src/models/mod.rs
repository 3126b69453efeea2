//! Domain models for the Pluma client.
//!
//! The server speaks Portuguese field names (`titulo`, `usuario_id`, ...)
//! and is inconsistent about a few of them: the owner id may arrive as
//! `usuario_id` or `usuarioId` (number or numeric string), and the image
//! may arrive as `foto` or `foto_url`. All of that is normalized here, at
//! the deserialization boundary, so the rest of the crate only ever sees
//! the canonical shapes below.

use serde::{Deserialize, Serialize};

/// An account on the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
}

/// A user's bookmark of a post. Uniqueness per (post, user) pair is
/// server-enforced; the client trusts it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "FavoriteWire")]
pub struct Favorite {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
}

/// A comment on a post.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "CommentWire")]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub author_id: i64,
    pub text: String,
    pub created_at: Option<String>,
    pub author: Option<User>,
}

/// A published post.
///
/// Detail responses embed comment and favorite lists; the content cache
/// absorbs those into its flat stores on merge, so the embedded vectors
/// are transport, not the source of truth.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "PostWire")]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub image: Option<String>,
    pub owner_id: i64,
    pub owner: Option<User>,
    pub created_at: Option<String>,
    pub favorite_count: i64,
    pub favorites: Vec<Favorite>,
    pub comments: Vec<Comment>,
}

/// An id that the server may send as a number or a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum FlexId {
    Int(i64),
    Str(String),
}

impl FlexId {
    fn value(&self) -> i64 {
        match self {
            FlexId::Int(n) => *n,
            FlexId::Str(s) => s.trim().parse().unwrap_or(0),
        }
    }
}

fn first_id(primary: Option<FlexId>, fallback: Option<FlexId>) -> i64 {
    primary.or(fallback).map(|id| id.value()).unwrap_or(0)
}

#[derive(Debug, Deserialize)]
struct FavoriteWire {
    id: FlexId,
    #[serde(default)]
    publicacao_id: Option<FlexId>,
    #[serde(default, rename = "publicacaoId")]
    publicacao_id_camel: Option<FlexId>,
    #[serde(default)]
    usuario_id: Option<FlexId>,
    #[serde(default, rename = "usuarioId")]
    usuario_id_camel: Option<FlexId>,
}

impl From<FavoriteWire> for Favorite {
    fn from(wire: FavoriteWire) -> Self {
        Self {
            id: wire.id.value(),
            post_id: first_id(wire.publicacao_id, wire.publicacao_id_camel),
            user_id: first_id(wire.usuario_id, wire.usuario_id_camel),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CommentWire {
    id: FlexId,
    #[serde(default)]
    publicacao_id: Option<FlexId>,
    #[serde(default, rename = "publicacaoId")]
    publicacao_id_camel: Option<FlexId>,
    #[serde(default)]
    usuario_id: Option<FlexId>,
    #[serde(default, rename = "usuarioId")]
    usuario_id_camel: Option<FlexId>,
    #[serde(default)]
    texto: String,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    usuario: Option<User>,
}

impl From<CommentWire> for Comment {
    fn from(wire: CommentWire) -> Self {
        Self {
            id: wire.id.value(),
            post_id: first_id(wire.publicacao_id, wire.publicacao_id_camel),
            author_id: first_id(wire.usuario_id, wire.usuario_id_camel),
            text: wire.texto,
            created_at: wire.created_at,
            author: wire.usuario,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PostWire {
    id: FlexId,
    #[serde(default)]
    titulo: String,
    #[serde(default)]
    descricao: String,
    #[serde(default)]
    foto: Option<String>,
    #[serde(default)]
    foto_url: Option<String>,
    #[serde(default)]
    usuario_id: Option<FlexId>,
    #[serde(default, rename = "usuarioId")]
    usuario_id_camel: Option<FlexId>,
    #[serde(default)]
    usuario: Option<User>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    favoritos_count: Option<i64>,
    #[serde(default)]
    favoritos: Vec<Favorite>,
    #[serde(default)]
    comentarios: Vec<Comment>,
}

impl From<PostWire> for Post {
    fn from(wire: PostWire) -> Self {
        // foto_url wins when the server sends both spellings
        let image = wire.foto_url.or(wire.foto).filter(|s| !s.is_empty());
        let favorite_count = wire
            .favoritos_count
            .unwrap_or(wire.favoritos.len() as i64);
        Self {
            id: wire.id.value(),
            title: wire.titulo,
            body: wire.descricao,
            image,
            owner_id: first_id(wire.usuario_id, wire.usuario_id_camel),
            owner: wire.usuario,
            created_at: wire.created_at,
            favorite_count,
            favorites: wire.favoritos,
            comments: wire.comentarios,
        }
    }
}

/// Response body of `POST /api/login`.
///
/// Both fields are optional on purpose: a 2xx response missing either is
/// an invalid server response, not a session, and the API client rejects
/// it explicitly.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default, rename = "usuario")]
    pub user: Option<User>,
}

/// Response body of `PUT /api/usuarios/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileResponse {
    #[serde(default, rename = "usuario")]
    pub user: Option<User>,
}

/// Response body of `POST /api/password/solicitar-reset`: the short-lived
/// reset token that accompanies the emailed OTP code.
#[derive(Debug, Clone, Deserialize)]
pub struct OtpTokenResponse {
    pub token: String,
}

/// Generic `{ "message": ... }` envelope used by the server for errors
/// and acknowledgements.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerMessage {
    #[serde(default)]
    pub message: Option<String>,
}

/// Render a server timestamp for display, falling back to the raw string
/// when it is not RFC 3339.
pub fn format_timestamp(raw: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.format("%b %d, %Y %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}
