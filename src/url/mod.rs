//! URL handling module for kumo
//!
//! This module provides the canonical [`Address`] type used as the crawl's
//! deduplication key, reference normalization against a base page, and the
//! configurable link scope policy.

mod normalize;
mod scope;

use crate::UrlError;
use std::fmt;
use url::Url;

// Re-export main functions
pub use normalize::normalize;
pub use scope::{LinkFilter, ScopePolicy};

pub(crate) use normalize::canonicalize;

/// A normalized address identifying a crawlable resource.
///
/// Two references that denote the same resource after normalization compare
/// equal, which is what makes this type usable as the visited-set key:
/// scheme, host, and path are case-folded, a single trailing path separator
/// is stripped, and fragments are removed. See [`normalize`] for the full
/// rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(String);

impl Address {
    /// Parses and canonicalizes an absolute URL string, typically the seed
    /// address given on the command line.
    pub fn parse(input: &str) -> Result<Self, UrlError> {
        let url = Url::parse(input).map_err(|e| UrlError::Parse(format!("{input}: {e}")))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(UrlError::InvalidScheme(url.scheme().to_string()));
        }
        Ok(canonicalize(url))
    }

    pub(crate) fn from_canonical(canonical: String) -> Self {
        Self(canonical)
    }

    /// Returns the canonical string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reparses the address for use as a resolution base or fetch target.
    pub fn to_url(&self) -> Result<Url, UrlError> {
        Url::parse(&self.0).map_err(|e| UrlError::Parse(format!("{}: {e}", self.0)))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
