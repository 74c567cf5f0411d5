//! Content-type gate
//!
//! Decides whether a response body is worth parsing for links. Only the
//! media type matters; parameters after `;` (charset and friends) are
//! ignored. A missing or empty header is not crawlable; skipping is the
//! safe default.

/// Extracts the media type from a Content-Type header value.
///
/// Takes the portion before the first `;` and trims surrounding
/// whitespace. Matching stays case-sensitive; servers emit lowercase media
/// types in practice.
pub fn media_type(header: &str) -> &str {
    header.split(';').next().unwrap_or("").trim()
}

/// Returns true if the Content-Type header names a media type in the
/// allow-list.
pub fn is_crawlable(header: &str, allowed: &[String]) -> bool {
    let media = media_type(header);
    if media.is_empty() {
        return false;
    }
    allowed.iter().any(|a| a == media)
}
