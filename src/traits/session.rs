//! Session store trait abstraction.
//!
//! Provides a trait-based abstraction for durable session storage,
//! enabling dependency injection and mocking in tests.

use async_trait::async_trait;

use crate::session::PersistedSession;

/// Session store operation errors.
#[derive(Debug, Clone)]
pub enum SessionStoreError {
    /// Failed to load the session
    LoadFailed(String),
    /// Failed to save the session
    SaveFailed(String),
    /// Failed to clear the session
    ClearFailed(String),
    /// IO error
    Io(String),
    /// Serialization/deserialization error
    Serialization(String),
    /// Other error
    Other(String),
}

impl std::fmt::Display for SessionStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionStoreError::LoadFailed(msg) => write!(f, "Failed to load session: {}", msg),
            SessionStoreError::SaveFailed(msg) => write!(f, "Failed to save session: {}", msg),
            SessionStoreError::ClearFailed(msg) => write!(f, "Failed to clear session: {}", msg),
            SessionStoreError::Io(msg) => write!(f, "IO error: {}", msg),
            SessionStoreError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            SessionStoreError::Other(msg) => write!(f, "Session store error: {}", msg),
        }
    }
}

impl std::error::Error for SessionStoreError {}

/// Trait for durable session storage.
///
/// The store holds the raw persisted form of the session (bearer token
/// plus serialized user record). Validation of the loaded values is the
/// caller's concern; the store only moves bytes. Implementations include
/// the production file-based store and an in-memory mock for tests.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the persisted session from storage.
    ///
    /// # Returns
    /// - `Ok(Some(session))` if a session record exists and was read
    /// - `Ok(None)` if no session is stored (or the file is unreadable junk)
    /// - `Err(error)` if the storage backend itself failed
    async fn load(&self) -> Result<Option<PersistedSession>, SessionStoreError>;

    /// Save the persisted session to storage.
    async fn save(&self, session: &PersistedSession) -> Result<(), SessionStoreError>;

    /// Clear the stored session.
    async fn clear(&self) -> Result<(), SessionStoreError>;
}
