//! HTML content extraction.
//!
//! - `ReadabilityExtractor` - main-content extraction via the `readability` crate
//! - [`html`] - title, meta tag, and visible-text helpers

pub mod html;
mod readable;

pub use readable::ReadabilityExtractor;

// Re-export from traits for convenience
pub use crate::traits::content::ContentExtractor;
