// src/checker/html.rs
// =============================================================================
// This module extracts raw link targets from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (built on html5ever)
// - Decodes entities in attribute values for us (&amp; -> &)
//
// Unlike a browser we do not resolve anything here. The values come back
// exactly as written in the page; `resolve.rs` decides what they point at.
// =============================================================================

use scraper::{ElementRef, Html};
use std::collections::BTreeSet;

// Attributes that carry a link target
static LINK_ATTRIBUTES: [&str; 2] = ["href", "src"];

// Extracts every distinct href/src value from HTML content
//
// Parameters:
//   html: the page content (borrowed as &str)
//
// Returns: the set of non-empty attribute values, as written in the page
//
// Example:
//   html = "<a href='/docs'>Docs</a><img src='logo.png'>"
//   result = {"/docs", "logo.png"}
pub fn extract_references(html: &str) -> BTreeSet<String> {
    let document = Html::parse_document(html);

    // Walk every element in the tree; start tags and self-closing tags
    // both end up as elements after parsing
    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .flat_map(|element| {
            LINK_ATTRIBUTES
                .iter()
                .filter_map(move |name| element.value().attr(name))
        })
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_href_and_src() {
        let html = r#"
            <html><head><link rel="stylesheet" href="style.css"></head>
            <body>
              <a href="/docs">Docs</a>
              <img src="logo.png"/>
              <script src="https://cdn.example.com/app.js"></script>
            </body></html>
        "#;
        let links = extract_references(html);
        let expected: BTreeSet<String> = ["/docs", "logo.png", "style.css", "https://cdn.example.com/app.js"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(links, expected);
    }

    #[test]
    fn test_duplicates_collapse() {
        let html = r#"<a href="a.html">1</a><a href="a.html">2</a>"#;
        assert_eq!(extract_references(html).len(), 1);
    }

    #[test]
    fn test_skip_empty_values() {
        let html = r#"<a href="">empty</a><img src="">"#;
        assert!(extract_references(html).is_empty());
    }

    #[test]
    fn test_entities_are_decoded() {
        let html = r#"<a href="page.html?a=1&amp;b=2">q</a>"#;
        let links = extract_references(html);
        assert!(links.contains("page.html?a=1&b=2"));
    }

    #[test]
    fn test_non_link_attributes_ignored() {
        let html = r#"<div data-href="nope" class="x">text</div>"#;
        assert!(extract_references(html).is_empty());
    }
}
