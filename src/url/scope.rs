use crate::url::{canonicalize, Address};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Policy deciding which discovered references stay in the crawl.
///
/// The policy is applied after the usual href hygiene filtering (empty
/// references, non-navigational schemes, fragment-only anchors) and before
/// normalization admits the reference as an [`Address`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScopePolicy {
    /// Keep only references whose resolved origin (scheme, host, port)
    /// matches the seed's origin
    SameOrigin,

    /// Keep only references written relative to the current page; absolute
    /// and protocol-relative references are dropped
    RelativeOnly,

    /// Keep every resolvable HTTP(S) reference
    #[default]
    Unrestricted,
}

impl ScopePolicy {
    pub fn label(&self) -> &'static str {
        match self {
            Self::SameOrigin => "same-origin",
            Self::RelativeOnly => "relative-only",
            Self::Unrestricted => "unrestricted",
        }
    }
}

impl fmt::Display for ScopePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ScopePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "same-origin" => Ok(Self::SameOrigin),
            "relative-only" => Ok(Self::RelativeOnly),
            "unrestricted" => Ok(Self::Unrestricted),
            other => Err(format!(
                "unknown scope policy '{other}' (expected same-origin, relative-only, or unrestricted)"
            )),
        }
    }
}

/// Converts raw hrefs discovered on a page into in-scope canonical
/// addresses.
///
/// The filter is pure and shared read-only across fetch tasks; a reference
/// that fails any check is dropped individually without affecting the rest
/// of its batch.
#[derive(Debug)]
pub struct LinkFilter {
    root: Url,
    policy: ScopePolicy,
}

impl LinkFilter {
    /// Creates a filter rooted at the seed URL
    pub fn new(root: Url, policy: ScopePolicy) -> Self {
        Self { root, policy }
    }

    /// Resolves one raw href against the discovering page and returns its
    /// canonical address if it passes the scope policy.
    ///
    /// Returns `None` for references that are empty, non-navigational
    /// (`javascript:`, `mailto:`, `tel:`, `data:`), fragment-only,
    /// malformed, non-HTTP(S), or out of scope.
    pub fn admit(&self, href: &str, base: &Url) -> Option<Address> {
        let href = href.trim();

        if href.is_empty() {
            return None;
        }

        // Skip non-navigational schemes
        if href.starts_with("javascript:")
            || href.starts_with("mailto:")
            || href.starts_with("tel:")
            || href.starts_with("data:")
        {
            return None;
        }

        // Skip fragment-only links (same page anchors)
        if href.starts_with('#') {
            return None;
        }

        if self.policy == ScopePolicy::RelativeOnly && is_absolute_reference(href) {
            return None;
        }

        let resolved = base.join(href).ok()?;

        if resolved.scheme() != "http" && resolved.scheme() != "https" {
            return None;
        }

        if self.policy == ScopePolicy::SameOrigin && resolved.origin() != self.root.origin() {
            return None;
        }

        Some(canonicalize(resolved))
    }
}

/// A reference is absolute if it carries its own scheme or is
/// protocol-relative; both escape the current site under `relative-only`.
fn is_absolute_reference(href: &str) -> bool {
    href.starts_with("//") || Url::parse(href).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> Url {
        Url::parse("http://example.com/").unwrap()
    }

    fn filter(policy: ScopePolicy) -> LinkFilter {
        LinkFilter::new(root(), policy)
    }

    #[test]
    fn test_policy_labels_round_trip() {
        for policy in [
            ScopePolicy::SameOrigin,
            ScopePolicy::RelativeOnly,
            ScopePolicy::Unrestricted,
        ] {
            assert_eq!(policy.label().parse::<ScopePolicy>().unwrap(), policy);
        }
        assert!("everything".parse::<ScopePolicy>().is_err());
    }

    #[test]
    fn test_default_policy_is_unrestricted() {
        assert_eq!(ScopePolicy::default(), ScopePolicy::Unrestricted);
    }

    #[test]
    fn test_admits_relative_reference() {
        let f = filter(ScopePolicy::Unrestricted);
        let addr = f.admit("/page", &root()).unwrap();
        assert_eq!(addr.as_str(), "http://example.com/page");
    }

    #[test]
    fn test_drops_empty_and_fragment_only() {
        let f = filter(ScopePolicy::Unrestricted);
        assert!(f.admit("", &root()).is_none());
        assert!(f.admit("   ", &root()).is_none());
        assert!(f.admit("#section", &root()).is_none());
    }

    #[test]
    fn test_drops_non_navigational_schemes() {
        let f = filter(ScopePolicy::Unrestricted);
        assert!(f.admit("javascript:void(0)", &root()).is_none());
        assert!(f.admit("mailto:a@example.com", &root()).is_none());
        assert!(f.admit("tel:+123456", &root()).is_none());
        assert!(f.admit("data:text/html,hi", &root()).is_none());
    }

    #[test]
    fn test_drops_non_http_after_resolution() {
        let f = filter(ScopePolicy::Unrestricted);
        assert!(f.admit("ftp://example.com/file", &root()).is_none());
    }

    #[test]
    fn test_same_origin_keeps_same_host() {
        let f = filter(ScopePolicy::SameOrigin);
        assert!(f.admit("http://example.com/other", &root()).is_some());
        assert!(f.admit("/relative", &root()).is_some());
    }

    #[test]
    fn test_same_origin_drops_other_host_and_port() {
        let f = filter(ScopePolicy::SameOrigin);
        assert!(f.admit("http://elsewhere.com/", &root()).is_none());
        assert!(f.admit("http://example.com:8080/", &root()).is_none());
        assert!(f.admit("https://example.com/", &root()).is_none());
    }

    #[test]
    fn test_relative_only_drops_absolute() {
        let f = filter(ScopePolicy::RelativeOnly);
        assert!(f.admit("http://example.com/page", &root()).is_none());
        assert!(f.admit("//example.com/page", &root()).is_none());
        assert!(f.admit("/page", &root()).is_some());
        assert!(f.admit("sibling", &root()).is_some());
    }

    #[test]
    fn test_unrestricted_keeps_cross_origin() {
        let f = filter(ScopePolicy::Unrestricted);
        let addr = f.admit("https://elsewhere.com/Page/", &root()).unwrap();
        assert_eq!(addr.as_str(), "https://elsewhere.com/page");
    }

    #[test]
    fn test_duplicate_references_normalize_identically() {
        let f = filter(ScopePolicy::Unrestricted);
        let base = Url::parse("http://example.com/dir/page").unwrap();
        let a = f.admit("/Target/", &base).unwrap();
        let b = f.admit("http://EXAMPLE.com/target", &base).unwrap();
        assert_eq!(a, b);
    }
}
