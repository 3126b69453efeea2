//! In-memory session store for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::session::PersistedSession;
use crate::traits::{SessionStore, SessionStoreError};

/// In-memory session store.
///
/// Stores the persisted record in memory and can be configured to fail
/// individual operations, for exercising error paths.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    inner: Arc<Mutex<Option<PersistedSession>>>,
    fail_load: Arc<Mutex<bool>>,
    fail_save: Arc<Mutex<bool>>,
    fail_clear: Arc<Mutex<bool>>,
}

impl InMemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with a session record.
    pub fn with_session(session: PersistedSession) -> Self {
        let store = Self::new();
        *store.inner.lock().unwrap() = Some(session);
        store
    }

    /// Make subsequent `load` calls fail.
    pub fn fail_load(&self, fail: bool) {
        *self.fail_load.lock().unwrap() = fail;
    }

    /// Make subsequent `save` calls fail.
    pub fn fail_save(&self, fail: bool) {
        *self.fail_save.lock().unwrap() = fail;
    }

    /// Make subsequent `clear` calls fail.
    pub fn fail_clear(&self, fail: bool) {
        *self.fail_clear.lock().unwrap() = fail;
    }

    /// Peek at the stored record.
    pub fn stored(&self) -> Option<PersistedSession> {
        self.inner.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self) -> Result<Option<PersistedSession>, SessionStoreError> {
        if *self.fail_load.lock().unwrap() {
            return Err(SessionStoreError::LoadFailed("mock failure".to_string()));
        }
        Ok(self.inner.lock().unwrap().clone())
    }

    async fn save(&self, session: &PersistedSession) -> Result<(), SessionStoreError> {
        if *self.fail_save.lock().unwrap() {
            return Err(SessionStoreError::SaveFailed("mock failure".to_string()));
        }
        *self.inner.lock().unwrap() = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionStoreError> {
        if *self.fail_clear.lock().unwrap() {
            return Err(SessionStoreError::ClearFailed("mock failure".to_string()));
        }
        *self.inner.lock().unwrap() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> PersistedSession {
        PersistedSession {
            token: Some("t1".to_string()),
            user: Some(serde_json::json!({"id":1,"nome":"A","email":"a@b.com"})),
        }
    }

    #[tokio::test]
    async fn test_empty_by_default() {
        let store = InMemorySessionStore::new();
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_load_clear() {
        let store = InMemorySessionStore::new();
        store.save(&record()).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(record()));

        store.clear().await.unwrap();
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_with_session() {
        let store = InMemorySessionStore::with_session(record());
        assert_eq!(store.load().await.unwrap(), Some(record()));
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let store = InMemorySessionStore::with_session(record());

        store.fail_load(true);
        assert!(store.load().await.is_err());
        store.fail_load(false);
        assert!(store.load().await.is_ok());

        store.fail_save(true);
        assert!(store.save(&record()).await.is_err());

        store.fail_clear(true);
        assert!(store.clear().await.is_err());
        // The record must survive a failed clear
        assert_eq!(store.stored(), Some(record()));
    }

    #[tokio::test]
    async fn test_clone_shares_state() {
        let store = InMemorySessionStore::new();
        let cloned = store.clone();
        store.save(&record()).await.unwrap();
        assert_eq!(cloned.load().await.unwrap(), Some(record()));
    }
}
