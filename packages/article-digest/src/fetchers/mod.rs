//! Fetcher implementations.
//!
//! - `HttpFetcher` - `reqwest` with plain and browser-like header profiles
//! - `MockFetcher` (in [`crate::testing`]) - canned responses for tests

mod http;

pub use http::HttpFetcher;

// Re-export from traits for convenience
pub use crate::traits::fetcher::{FetchProfile, FetchRequest, PageFetcher};
