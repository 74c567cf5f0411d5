/// Outcome definitions for addresses admitted into the crawl
///
/// Every address in the visited set carries exactly one outcome. An address
/// enters as `Pending` when it is admitted and moves to a terminal outcome
/// when its work batch is folded back in.
use std::fmt;

/// What happened to one admitted address
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// Admitted into the crawl; fetch not yet completed
    Pending,

    /// Fetched and parsed; carries the number of in-scope links discovered
    Crawled { links_found: usize },

    /// Fetched but not parsed: the response content type is not in the
    /// allow-list
    Skipped { content_type: String },

    /// The fetch failed (transport error or HTTP error status)
    Failed { reason: String },
}

impl PageOutcome {
    /// Returns true if this is a terminal outcome (no batch outstanding)
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Returns true if the page was fetched and parsed successfully
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Crawled { .. })
    }

    /// Returns true if the page was visited but yielded no links by policy
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }

    /// Returns true if the fetch failed
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Short label used in the report listing
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Crawled { .. } => "crawled",
            Self::Skipped { .. } => "skipped",
            Self::Failed { .. } => "failed",
        }
    }
}

impl fmt::Display for PageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Crawled { links_found } => write!(f, "crawled ({links_found} links)"),
            Self::Skipped { content_type } => write!(f, "skipped ({content_type})"),
            Self::Failed { reason } => write!(f, "failed ({reason})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_terminal() {
        assert!(!PageOutcome::Pending.is_terminal());

        assert!(PageOutcome::Crawled { links_found: 0 }.is_terminal());
        assert!(PageOutcome::Skipped {
            content_type: "application/pdf".to_string()
        }
        .is_terminal());
        assert!(PageOutcome::Failed {
            reason: "HTTP 500".to_string()
        }
        .is_terminal());
    }

    #[test]
    fn test_classification_helpers() {
        let crawled = PageOutcome::Crawled { links_found: 3 };
        let skipped = PageOutcome::Skipped {
            content_type: "image/png".to_string(),
        };
        let failed = PageOutcome::Failed {
            reason: "connection refused".to_string(),
        };

        assert!(crawled.is_success());
        assert!(!crawled.is_skipped());
        assert!(!crawled.is_error());

        assert!(skipped.is_skipped());
        assert!(!skipped.is_success());

        assert!(failed.is_error());
        assert!(!failed.is_success());
    }

    #[test]
    fn test_labels() {
        assert_eq!(PageOutcome::Pending.label(), "pending");
        assert_eq!(PageOutcome::Crawled { links_found: 1 }.label(), "crawled");
    }

    #[test]
    fn test_display() {
        assert_eq!(
            format!("{}", PageOutcome::Crawled { links_found: 2 }),
            "crawled (2 links)"
        );
        assert_eq!(
            format!(
                "{}",
                PageOutcome::Failed {
                    reason: "HTTP 404".to_string()
                }
            ),
            "failed (HTTP 404)"
        );
    }
}
