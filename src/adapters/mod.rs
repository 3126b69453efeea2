//! Concrete implementations of trait abstractions.
//!
//! This module provides production-ready adapters that implement the
//! traits defined in `crate::traits`, plus mock implementations for
//! tests.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`FileSessionStore`] - File-based session storage
//!
//! # Mock Implementations
//!
//! - [`mock::MockHttpClient`] - Configurable HTTP responses
//! - [`mock::InMemorySessionStore`] - In-memory session storage

pub mod file_session;
pub mod mock;
pub mod reqwest_http;

pub use file_session::FileSessionStore;
pub use mock::{InMemorySessionStore, MockHttpClient};
pub use reqwest_http::ReqwestHttpClient;
