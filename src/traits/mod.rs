//! Trait abstractions for dependency injection and testability.
//!
//! This module provides trait-based abstractions for core functionality,
//! enabling dependency injection, mocking, and better testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP client operations (GET, POST, PUT, DELETE, multipart)
//! - [`SessionStore`] - Durable session storage and retrieval

pub mod http;
pub mod session;

pub use http::{FilePart, Headers, HttpClient, HttpError, Response};
pub use session::{SessionStore, SessionStoreError};
