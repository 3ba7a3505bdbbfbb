//! URL classification.
//!
//! Pure string/URL parsing, no network I/O. Classification never fails: any
//! URL that is not a recognized YouTube shape or a PDF path is treated as a
//! generic web page.

use url::Url;

/// Hosts whose path is the video id.
const SHORT_LINK_HOSTS: &[&str] = &["youtu.be", "www.youtu.be"];

/// Marker for full YouTube hosts (www., m., music., bare).
const YOUTUBE_HOST_MARKER: &str = "youtube.com";

/// First path segments that are followed by a video id.
const VIDEO_PATH_PREFIXES: &[&str] = &["embed", "v", "shorts"];

/// Extraction strategy selected for a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    YouTube { video_id: String },
    Pdf,
    Web,
}

impl SourceKind {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            SourceKind::YouTube { .. } => "youtube",
            SourceKind::Pdf => "pdf",
            SourceKind::Web => "web",
        }
    }
}

/// Select the extraction strategy for a URL.
pub fn classify(url: &str) -> SourceKind {
    if let Some(video_id) = youtube_video_id(url) {
        return SourceKind::YouTube { video_id };
    }
    if is_pdf_url(url) {
        return SourceKind::Pdf;
    }
    SourceKind::Web
}

/// Extract the video id from a YouTube URL.
///
/// Recognized shapes:
/// - `https://youtu.be/<id>`
/// - `https://www.youtube.com/watch?v=<id>` (and `m.`/bare hosts)
/// - `https://www.youtube.com/{embed,v,shorts}/<id>`
pub fn youtube_video_id(raw: &str) -> Option<String> {
    let parsed = Url::parse(raw).ok()?;
    let host = parsed.host_str()?.to_ascii_lowercase();
    let path = parsed.path();

    if SHORT_LINK_HOSTS.contains(&host.as_str()) {
        return non_empty(path.trim_start_matches('/'));
    }

    if !host.contains(YOUTUBE_HOST_MARKER) {
        return None;
    }

    if path == "/watch" {
        return parsed
            .query_pairs()
            .find(|(key, value)| key == "v" && !value.is_empty())
            .map(|(_, value)| value.into_owned());
    }

    let parts: Vec<&str> = path.trim_matches('/').split('/').collect();
    match parts.as_slice() {
        [prefix, id, ..] if VIDEO_PATH_PREFIXES.contains(prefix) => non_empty(id),
        _ => None,
    }
}

/// Whether the URL path ends in `.pdf` (case-insensitive).
///
/// The query string is ignored. Strings that do not parse as URLs are
/// checked as-is.
pub fn is_pdf_url(raw: &str) -> bool {
    match Url::parse(raw) {
        Ok(parsed) => parsed.path().to_ascii_lowercase().ends_with(".pdf"),
        Err(_) => raw.trim().to_ascii_lowercase().ends_with(".pdf"),
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_watch_url() {
        assert_eq!(
            classify("https://www.youtube.com/watch?v=TBL74Wsfbig"),
            SourceKind::YouTube {
                video_id: "TBL74Wsfbig".into()
            }
        );
    }

    #[test]
    fn test_watch_url_with_extra_params() {
        assert_eq!(
            youtube_video_id("https://m.youtube.com/watch?t=42&v=TBL74Wsfbig&list=x").as_deref(),
            Some("TBL74Wsfbig")
        );
    }

    #[test]
    fn test_short_link() {
        assert_eq!(
            youtube_video_id("https://youtu.be/TBL74Wsfbig?t=10").as_deref(),
            Some("TBL74Wsfbig")
        );
        assert_eq!(
            youtube_video_id("https://www.youtu.be/TBL74Wsfbig").as_deref(),
            Some("TBL74Wsfbig")
        );
    }

    #[test]
    fn test_path_shapes() {
        for url in [
            "https://www.youtube.com/embed/TBL74Wsfbig",
            "https://www.youtube.com/v/TBL74Wsfbig",
            "https://youtube.com/shorts/TBL74Wsfbig/",
        ] {
            assert_eq!(youtube_video_id(url).as_deref(), Some("TBL74Wsfbig"), "{url}");
        }
    }

    #[test]
    fn test_unrecognized_youtube_shapes_fall_through_to_web() {
        assert_eq!(classify("https://www.youtube.com/watch"), SourceKind::Web);
        assert_eq!(classify("https://www.youtube.com/watch?v="), SourceKind::Web);
        assert_eq!(classify("https://www.youtube.com/channel/UCxyz"), SourceKind::Web);
        assert_eq!(classify("https://www.youtube.com/shorts"), SourceKind::Web);
        assert_eq!(classify("https://youtu.be/"), SourceKind::Web);
    }

    #[test]
    fn test_pdf_detection() {
        assert_eq!(classify("https://example.com/doc.pdf"), SourceKind::Pdf);
        assert_eq!(classify("https://example.com/papers/Report.PDF"), SourceKind::Pdf);
        assert_eq!(classify("https://example.com/doc.pdf?download=1"), SourceKind::Pdf);
        assert_eq!(classify("https://example.com/pdf/viewer"), SourceKind::Web);
    }

    #[test]
    fn test_unparseable_url_is_web() {
        assert_eq!(classify("not a url"), SourceKind::Web);
        assert_eq!(classify("example.com/a.pdf"), SourceKind::Pdf);
    }

    proptest! {
        #[test]
        fn prop_short_and_watch_links_agree(id in "[A-Za-z0-9_-]{1,16}") {
            let short = youtube_video_id(&format!("https://youtu.be/{id}"));
            let watch = youtube_video_id(&format!("https://www.youtube.com/watch?v={id}"));
            prop_assert_eq!(short.as_deref(), Some(id.as_str()));
            prop_assert_eq!(watch, short);
        }

        #[test]
        fn prop_pdf_paths_classify_as_pdf(
            host in "[a-z]{1,10}\\.(com|org|net)",
            stem in "[A-Za-z0-9_-]{1,12}",
            ext in "(pdf|PDF|Pdf)",
        ) {
            let url = format!("https://{host}/files/{stem}.{ext}");
            prop_assert_eq!(classify(&url), SourceKind::Pdf);
        }
    }
}
