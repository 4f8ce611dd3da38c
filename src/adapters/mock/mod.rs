//! Mock implementations for testing.
//!
//! Test doubles for the trait abstractions, so the pet client and the theme
//! store can be exercised without network or file system access.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses
//! - [`InMemoryStorage`] - Map-backed key-value storage with failure switches

pub mod http;
pub mod storage;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use storage::InMemoryStorage;
