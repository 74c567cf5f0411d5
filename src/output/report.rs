use crate::state::{PageOutcome, VisitedSet};
use crate::url::Address;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Final result of one crawl run: the visited ledger plus run statistics.
#[derive(Debug)]
pub struct CrawlReport {
    visited: VisitedSet,
    started_at: DateTime<Utc>,
    elapsed: Duration,
}

impl CrawlReport {
    pub fn new(visited: VisitedSet, started_at: DateTime<Utc>, elapsed: Duration) -> Self {
        Self {
            visited,
            started_at,
            elapsed,
        }
    }

    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Total number of addresses ever admitted
    pub fn total(&self) -> usize {
        self.visited.len()
    }

    /// Addresses fetched and parsed successfully
    pub fn crawled(&self) -> usize {
        self.visited.count_where(PageOutcome::is_success)
    }

    /// Addresses visited but not parsed (content type outside the
    /// allow-list)
    pub fn skipped(&self) -> usize {
        self.visited.count_where(PageOutcome::is_skipped)
    }

    /// Addresses whose fetch failed
    pub fn failed(&self) -> usize {
        self.visited.count_where(PageOutcome::is_error)
    }

    /// The ledger sorted by address.
    ///
    /// Set enumeration order is unspecified; sorting is purely for
    /// readable output.
    pub fn listing(&self) -> Vec<(&Address, &PageOutcome)> {
        let mut entries: Vec<_> = self.visited.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

/// Prints the crawl report to stdout
pub fn print_report(report: &CrawlReport) {
    println!("=== Crawl Report ===");
    println!();

    for (address, outcome) in report.listing() {
        println!("  [{}] {}", outcome.label(), address);
    }

    println!();
    println!("Started:  {}", report.started_at().format("%Y-%m-%d %H:%M:%S UTC"));
    println!("Elapsed:  {:.2?}", report.elapsed());
    println!(
        "Visited:  {} total ({} crawled, {} skipped, {} failed)",
        report.total(),
        report.crawled(),
        report.skipped(),
        report.failed()
    );
}
