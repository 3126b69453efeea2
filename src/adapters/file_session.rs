//! File-based session store adapter.
//!
//! Persists the session record to `~/.pluma/.session.json`, the desktop
//! stand-in for the browser's durable key/value storage: written on
//! login and profile update, removed on logout, account deletion, or
//! invalid-session detection.

use async_trait::async_trait;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;
use tracing::warn;

use crate::session::PersistedSession;
use crate::traits::{SessionStore, SessionStoreError};

/// The session directory name under the home directory.
const SESSION_DIR: &str = ".pluma";

/// The session file name.
const SESSION_FILE: &str = ".session.json";

/// File-based session store.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    session_path: PathBuf,
}

impl FileSessionStore {
    /// Create a store rooted at `~/.pluma/.session.json`.
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, SessionStoreError> {
        let home = dirs::home_dir().ok_or_else(|| {
            SessionStoreError::Other("Failed to determine home directory".to_string())
        })?;
        Ok(Self {
            session_path: home.join(SESSION_DIR).join(SESSION_FILE),
        })
    }

    /// Create a store with an explicit file path. Used by tests.
    pub fn with_path(session_path: PathBuf) -> Self {
        Self { session_path }
    }

    /// Get the path to the session file.
    pub fn session_path(&self) -> &PathBuf {
        &self.session_path
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<PersistedSession>, SessionStoreError> {
        if !self.session_path.exists() {
            return Ok(None);
        }

        let file = File::open(&self.session_path)
            .map_err(|e| SessionStoreError::LoadFailed(e.to_string()))?;
        let reader = BufReader::new(file);

        // A corrupt file is treated as no session; restore clears it
        match serde_json::from_reader(reader) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!(path = %self.session_path.display(), error = %e, "session file unreadable");
                Ok(None)
            }
        }
    }

    async fn save(&self, session: &PersistedSession) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.session_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| SessionStoreError::Io(e.to_string()))?;
            }
        }

        let file = File::create(&self.session_path)
            .map_err(|e| SessionStoreError::SaveFailed(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, session)
            .map_err(|e| SessionStoreError::Serialization(e.to_string()))?;
        writer
            .flush()
            .map_err(|e| SessionStoreError::SaveFailed(e.to_string()))
    }

    async fn clear(&self) -> Result<(), SessionStoreError> {
        if !self.session_path.exists() {
            return Ok(());
        }
        fs::remove_file(&self.session_path)
            .map_err(|e| SessionStoreError::ClearFailed(e.to_string()))
    }
}
