//! HTML link extraction
//!
//! Pulls raw href values out of anchor elements. Resolution, normalization,
//! and scope filtering are the url module's job; this layer only reads the
//! document.

use scraper::{Html, Selector};

/// Extracts the raw href value of every anchor element in the document.
///
/// Parsing is lenient: html5ever recovers from malformed markup, so this
/// returns whatever anchors were recognizable rather than failing. The
/// returned strings are exactly as written in the document, relative
/// references included.
pub fn extract_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    // Static selector, cannot fail to parse
    let selector = Selector::parse("a[href]").expect("valid selector");

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_links() {
        let html = r#"<html><head><title>Empty</title></head><body><p>nothing here</p></body></html>"#;
        assert!(extract_hrefs(html).is_empty());
    }

    #[test]
    fn test_single_link() {
        let html = r#"<html><body><a href="/twolinks">go</a></body></html>"#;
        assert_eq!(extract_hrefs(html), vec!["/twolinks"]);
    }

    #[test]
    fn test_multiple_links_in_document_order() {
        let html = r#"
            <html>
            <body>
                <a href="/">home</a>
                <a href="/nolinks">leaf</a>
                <a href="https://other.com/page">away</a>
            </body>
            </html>
        "#;
        assert_eq!(
            extract_hrefs(html),
            vec!["/", "/nolinks", "https://other.com/page"]
        );
    }

    #[test]
    fn test_anchor_without_href_ignored() {
        let html = r#"<html><body><a name="top">anchor</a><a href="/real">real</a></body></html>"#;
        assert_eq!(extract_hrefs(html), vec!["/real"]);
    }

    #[test]
    fn test_hrefs_returned_raw() {
        let html = r##"<html><body><a href="#section">jump</a><a href="mailto:x@y.z">mail</a></body></html>"##;
        // Hygiene filtering happens downstream; the extractor reports
        // everything it saw
        assert_eq!(extract_hrefs(html), vec!["#section", "mailto:x@y.z"]);
    }

    #[test]
    fn test_malformed_markup_yields_partial_results() {
        let html = r#"<html><body><a href="/ok">ok</a><div><a href="/also-ok">unclosed"#;
        assert_eq!(extract_hrefs(html), vec!["/ok", "/also-ok"]);
    }

    #[test]
    fn test_nested_and_duplicate_anchors() {
        let html = r#"
            <html><body>
                <ul>
                    <li><a href="/a">a</a></li>
                    <li><a href="/a">a again</a></li>
                </ul>
            </body></html>
        "#;
        // Duplicates are reported as-is; deduplication is the visited
        // set's job
        assert_eq!(extract_hrefs(html), vec!["/a", "/a"]);
    }
}
