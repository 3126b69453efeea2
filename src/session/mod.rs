//! Authenticated session and its durable form.
//!
//! A [`Session`] is either fully populated (token and user both present
//! and valid-looking) or absent; there is no partially hydrated state.
//! The durable form is intentionally loose: earlier clients persisted
//! the literal strings `"undefined"` and `"null"` when logging out went
//! wrong, so restore validates the raw values before trusting them.

use serde::{Deserialize, Serialize};

use crate::models::User;

/// The in-memory authenticated session.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Bearer token injected into every API request.
    pub token: String,
    /// The authenticated user.
    pub user: User,
}

/// Raw persisted session record as read from disk.
///
/// The user record is kept as a raw JSON value so that junk persisted by
/// broken writers (a bare `"undefined"` string, `null`) survives loading
/// and can be rejected by validation instead of aborting the read.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PersistedSession {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default, rename = "usuario")]
    pub user: Option<serde_json::Value>,
}

/// Values localStorage-era clients wrote instead of clearing the key.
fn is_placeholder(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed == "undefined" || trimmed == "null"
}

impl Session {
    /// Create a session from freshly issued credentials.
    pub fn new(token: String, user: User) -> Self {
        Self { token, user }
    }

    /// Validate and hydrate a persisted record.
    ///
    /// Returns `None` for any malformed pair: missing token or user,
    /// empty strings, the literal `"undefined"`/`"null"` artifacts, or a
    /// user value that does not parse into a [`User`]. Callers clear the
    /// persisted state when this returns `None`.
    pub fn from_persisted(persisted: &PersistedSession) -> Option<Self> {
        let token = persisted.token.as_deref().filter(|t| !is_placeholder(t))?;

        let user_value = persisted.user.as_ref()?;
        let user: User = match user_value {
            serde_json::Value::String(s) if is_placeholder(s) => return None,
            // Some writers double-encode the user record as a JSON string
            serde_json::Value::String(s) => serde_json::from_str(s).ok()?,
            other => serde_json::from_value(other.clone()).ok()?,
        };

        Some(Self {
            token: token.to_string(),
            user,
        })
    }

    /// Convert to the durable form written by the session store.
    pub fn to_persisted(&self) -> PersistedSession {
        PersistedSession {
            token: Some(self.token.clone()),
            user: serde_json::to_value(&self.user).ok(),
        }
    }
}
