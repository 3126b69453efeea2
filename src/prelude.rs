//! Prelude module for convenient imports.
//!
//! Re-exports the most frequently used types:
//!
//! ```ignore
//! use pluma::prelude::*;
//! ```

// Core application types
pub use crate::app::{App, AppMessage, Dialog, Screen};

// Model types
pub use crate::models::{Comment, Favorite, Post, User};

// Session and state
pub use crate::session::{PersistedSession, Session};
pub use crate::state::{ContentCache, PasswordCheck, ResetFlow};

// API client
pub use crate::api::ApiClient;

// Error handling
pub use crate::error::{PlumaError, PlumaResult};

// UI entry point
pub use crate::ui::render;
