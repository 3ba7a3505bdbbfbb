//! Small DOM helpers shared by the strategies.

use scraper::{Html, Node, Selector};

/// Elements whose text never counts as visible page text.
const INVISIBLE_TAGS: &[&str] = &["script", "style", "nav", "footer", "aside"];

/// Text of the first `<title>` element, trimmed. `None` when absent or blank.
pub fn page_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
}

/// `content` of `<meta property="...">`, trimmed. `None` when absent or blank.
pub fn meta_property(document: &Html, property: &str) -> Option<String> {
    meta_content(document, &format!(r#"meta[property="{}"]"#, property))
}

/// `content` of `<meta name="...">`, trimmed. `None` when absent or blank.
pub fn meta_name(document: &Html, name: &str) -> Option<String> {
    meta_content(document, &format!(r#"meta[name="{}"]"#, name))
}

fn meta_content(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

/// All text outside script/style/nav/footer/aside, one space between nodes.
///
/// Never fails; a page with no visible text yields an empty string.
pub fn visible_text(document: &Html) -> String {
    let mut parts: Vec<&str> = Vec::new();

    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| INVISIBLE_TAGS.contains(&el.name()))
        });
        if hidden {
            continue;
        }
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            parts.push(trimmed);
        }
    }

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_title() {
        let doc = Html::parse_document("<html><head><title>  Page Title </title></head></html>");
        assert_eq!(page_title(&doc).as_deref(), Some("Page Title"));

        let doc = Html::parse_document("<html><body>No title</body></html>");
        assert_eq!(page_title(&doc), None);
    }

    #[test]
    fn test_meta_lookup() {
        let doc = Html::parse_document(
            r#"<html><head>
                <meta property="og:title" content=" Moon Landing ">
                <meta name="description" content="">
            </head></html>"#,
        );

        assert_eq!(meta_property(&doc, "og:title").as_deref(), Some("Moon Landing"));
        assert_eq!(meta_name(&doc, "description"), None);
        assert_eq!(meta_property(&doc, "og:description"), None);
    }

    #[test]
    fn test_visible_text_strips_chrome() {
        let doc = Html::parse_document(
            r#"<html><head><title>T</title><style>p{}</style></head><body>
                <nav>Home About</nav>
                <p>First  paragraph.</p>
                <script>var x = 1;</script>
                <div>Second <b>bold</b></div>
                <aside>Related</aside>
                <footer>Copyright</footer>
            </body></html>"#,
        );

        assert_eq!(visible_text(&doc), "T First  paragraph. Second bold");
    }

    #[test]
    fn test_visible_text_of_empty_page() {
        let doc = Html::parse_document("<html><body><script>x()</script></body></html>");
        assert_eq!(visible_text(&doc), "");
    }
}
