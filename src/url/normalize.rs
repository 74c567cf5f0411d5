use crate::url::Address;
use crate::UrlError;
use url::Url;

/// Normalizes a raw hyperlink reference into a canonical [`Address`].
///
/// # Normalization Steps
///
/// 1. An empty reference passes through as the empty address (no-op)
/// 2. Resolve the reference against `base` using standard URI resolution,
///    so relative references become absolute
/// 3. Reject schemes other than HTTP and HTTPS
/// 4. Lowercase the path (the `url` parser already case-folds scheme and
///    host)
/// 5. Remove the fragment; references differing only in fragment denote the
///    same resource
/// 6. Strip a single trailing path separator, if present
///
/// Normalization is idempotent: feeding a canonical address back in returns
/// it unchanged.
///
/// # Arguments
///
/// * `raw` - The reference as found in the document, possibly relative
/// * `base` - The address of the page the reference was discovered on
///
/// # Returns
///
/// * `Ok(Address)` - The canonical address
/// * `Err(UrlError)` - The reference is malformed or out of scheme; callers
///   drop the single reference and keep the rest of the batch
///
/// # Examples
///
/// ```
/// use kumo::url::normalize;
/// use url::Url;
///
/// let base = Url::parse("http://example.com/dir/page").unwrap();
/// let addr = normalize("../Other/", &base).unwrap();
/// assert_eq!(addr.as_str(), "http://example.com/other");
/// ```
pub fn normalize(raw: &str, base: &Url) -> Result<Address, UrlError> {
    if raw.is_empty() {
        return Ok(Address::from_canonical(String::new()));
    }

    let resolved = base
        .join(raw)
        .map_err(|e| UrlError::Parse(format!("{raw}: {e}")))?;

    if resolved.scheme() != "http" && resolved.scheme() != "https" {
        return Err(UrlError::InvalidScheme(resolved.scheme().to_string()));
    }

    Ok(canonicalize(resolved))
}

/// Reduces an already-resolved URL to its canonical string form.
pub(crate) fn canonicalize(mut url: Url) -> Address {
    url.set_fragment(None);

    let lowered = url.path().to_lowercase();
    url.set_path(&lowered);

    let mut canonical = url.to_string();
    if canonical.ends_with('/') {
        canonical.pop();
    }

    Address::from_canonical(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://example.com/dir/page").unwrap()
    }

    #[test]
    fn test_lowercase_and_trailing_slash() {
        let addr = normalize("http://Foo/Bar/", &base()).unwrap();
        assert_eq!(addr.as_str(), "http://foo/bar");
    }

    #[test]
    fn test_already_normalized_unchanged() {
        let addr = normalize("http://foo/bar", &base()).unwrap();
        assert_eq!(addr.as_str(), "http://foo/bar");
    }

    #[test]
    fn test_idempotent() {
        for raw in [
            "http://Foo/Bar/",
            "/absolute/Path",
            "relative",
            "http://example.com",
            "http://example.com/a?q=1",
        ] {
            let once = normalize(raw, &base()).unwrap();
            let twice = normalize(once.as_str(), &base()).unwrap();
            assert_eq!(once, twice, "not idempotent for {raw}");
        }
    }

    #[test]
    fn test_empty_input_is_noop() {
        let addr = normalize("", &base()).unwrap();
        assert!(addr.is_empty());
    }

    #[test]
    fn test_resolves_root_relative() {
        let addr = normalize("/other", &base()).unwrap();
        assert_eq!(addr.as_str(), "http://example.com/other");
    }

    #[test]
    fn test_resolves_path_relative() {
        let addr = normalize("sibling", &base()).unwrap();
        assert_eq!(addr.as_str(), "http://example.com/dir/sibling");
    }

    #[test]
    fn test_resolves_parent_reference() {
        let addr = normalize("../up", &base()).unwrap();
        assert_eq!(addr.as_str(), "http://example.com/up");
    }

    #[test]
    fn test_strips_fragment() {
        let addr = normalize("/page#section", &base()).unwrap();
        assert_eq!(addr.as_str(), "http://example.com/page");
    }

    #[test]
    fn test_host_case_folded() {
        let addr = normalize("HTTP://EXAMPLE.COM/Path", &base()).unwrap();
        assert_eq!(addr.as_str(), "http://example.com/path");
    }

    #[test]
    fn test_root_loses_trailing_slash() {
        let addr = normalize("http://example.com/", &base()).unwrap();
        assert_eq!(addr.as_str(), "http://example.com");
    }

    #[test]
    fn test_query_preserved() {
        let addr = normalize("/search?q=Term", &base()).unwrap();
        assert_eq!(addr.as_str(), "http://example.com/search?q=Term");
    }

    #[test]
    fn test_malformed_reference_errors() {
        let result = normalize("http://[broken", &base());
        assert!(matches!(result, Err(UrlError::Parse(_))));
    }

    #[test]
    fn test_non_http_scheme_errors() {
        let result = normalize("ftp://example.com/file", &base());
        assert!(matches!(result, Err(UrlError::InvalidScheme(_))));
    }
}
