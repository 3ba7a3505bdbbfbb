//! Main-content extraction over fetched HTML.

/// Boilerplate-aware extractor.
///
/// `url` is the page the HTML came from; relative links resolve against it.
/// Returns `None` when no main content could be identified; callers fall back
/// to whole-page text in that case.
pub trait ContentExtractor: Send + Sync {
    fn extract(&self, html: &str, url: &str) -> Option<String>;

    /// Name of this extractor (for logging).
    fn name(&self) -> &str;
}
