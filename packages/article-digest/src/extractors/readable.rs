//! Main-content extraction backed by the `readability` crate.
//!
//! Readability picks the element most likely to hold the article and strips
//! navigation, comment threads, and other boilerplate around it. The chosen
//! HTML is then flattened to text here, one line per block, with tables left out.

use std::io::Cursor;

use scraper::{ElementRef, Html, Node};
use tracing::debug;
use url::Url;

use crate::traits::content::ContentExtractor;

/// Subtrees whose text never reaches the extracted article.
const SKIPPED_TAGS: &[&str] = &[
    "table", "script", "style", "noscript", "form", "button", "iframe", "svg",
];

/// Elements that start a new line in the flattened text.
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "section", "article", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol", "li",
    "blockquote", "pre", "figure", "figcaption", "br",
];

/// Readability-based extractor.
#[derive(Debug, Clone)]
pub struct ReadabilityExtractor {
    min_chars: usize,
}

impl Default for ReadabilityExtractor {
    fn default() -> Self {
        Self { min_chars: 25 }
    }
}

impl ReadabilityExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Results shorter than this are treated as "nothing found".
    pub fn with_min_chars(mut self, min_chars: usize) -> Self {
        self.min_chars = min_chars;
        self
    }
}

impl ContentExtractor for ReadabilityExtractor {
    fn extract(&self, html: &str, url: &str) -> Option<String> {
        let base = match Url::parse(url) {
            Ok(base) => base,
            Err(e) => {
                debug!(url = %url, error = %e, "Unparseable page URL, skipping readability");
                return None;
            }
        };

        let mut cursor = Cursor::new(html.as_bytes());
        let product = match ::readability::extractor::extract(&mut cursor, &base) {
            Ok(product) => product,
            Err(e) => {
                debug!(url = %url, error = ?e, "Readability extraction failed");
                return None;
            }
        };

        let text = article_text(&product.content);
        if text.chars().count() < self.min_chars {
            debug!(url = %url, chars = text.chars().count(), "Readability found no main content");
            return None;
        }
        Some(text)
    }

    fn name(&self) -> &str {
        "readability"
    }
}

/// Text of a readability HTML fragment: one block per line, whitespace
/// collapsed, tables and scripts dropped.
fn article_text(content: &str) -> String {
    let fragment = Html::parse_fragment(content);
    let mut raw = String::new();
    collect_text(fragment.root_element(), &mut raw);

    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collect_text(el: ElementRef<'_>, out: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => {
                let name = element.name();
                if SKIPPED_TAGS.contains(&name) {
                    continue;
                }
                let Some(child_el) = ElementRef::wrap(child) else {
                    continue;
                };
                let block = BLOCK_TAGS.contains(&name);
                if block {
                    out.push('\n');
                }
                collect_text(child_el, out);
                if block {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://news.example.com/world/floods";

    const FIRST: &str = "Floodwater reached the southern delta on Tuesday, displacing thousands of families, \
        closing schools, and cutting the main highway in three places.";
    const SECOND: &str = "Relief agencies said boats, clean water, and temporary shelter were the most urgent \
        needs, while engineers inspected the levees upstream for further damage.";

    fn page(article_class: &str) -> String {
        format!(
            r#"<html><head><title>Dispatch</title></head><body>
            <nav><ul><li><a href="/">Home</a></li><li><a href="/world">World</a></li></ul></nav>
            <article class="{article_class}">
              <h2>Floods reach the delta</h2>
              <p>{FIRST}</p>
              <p>{SECOND}</p>
              <table><tr><td>Rainfall by district, in millimetres</td><td>312</td></tr></table>
            </article>
            <div class="promo"><p>Subscribe now and get fifty percent off your first year!</p></div>
            <footer><p>Copyright 2024 Example News and all of its affiliates.</p></footer>
            </body></html>"#
        )
    }

    #[test]
    fn test_extracts_article_paragraphs() {
        let text = ReadabilityExtractor::new()
            .extract(&page("correspondent-report"), URL)
            .unwrap();

        assert!(text.contains(FIRST), "{text}");
        assert!(text.contains(SECOND), "{text}");
        assert!(!text.contains("Subscribe now"));
        assert!(!text.contains("Copyright"));
    }

    #[test]
    fn test_tables_are_excluded() {
        let text = ReadabilityExtractor::new()
            .extract(&page("story"), URL)
            .unwrap();

        assert!(text.contains(FIRST));
        assert!(!text.contains("Rainfall by district"));
        assert!(!text.contains("312"));
    }

    #[test]
    fn test_comment_section_is_excluded() {
        let html = format!(
            r#"<html><body>
            <div id="story"><p>{FIRST}</p><p>{SECOND}</p></div>
            <div id="comments"><p>Great report, thanks for sharing this with everyone here!</p></div>
            </body></html>"#
        );

        let text = ReadabilityExtractor::new().extract(&html, URL).unwrap();

        assert!(text.contains(SECOND));
        assert!(!text.contains("Great report"));
    }

    #[test]
    fn test_blocks_are_separate_lines() {
        let text = article_text("<div><p>One  sentence\n here.</p><p>Another <b>bold</b> one.</p></div>");
        assert_eq!(text, "One sentence here.\nAnother bold one.");

        let text = article_text("<div><p>Kept</p><table><tr><td>Dropped</td></tr></table></div>");
        assert_eq!(text, "Kept");
    }

    #[test]
    fn test_no_main_content_is_none() {
        let extractor = ReadabilityExtractor::new();

        assert_eq!(extractor.extract("<html><body></body></html>", URL), None);
        assert_eq!(extractor.extract("", URL), None);
        assert_eq!(extractor.extract(&page("story"), "not a url"), None);
    }
}
