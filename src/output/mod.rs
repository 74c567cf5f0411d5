//! Output module for kumo
//!
//! Turns a finished crawl into something a person can read: the sorted
//! visited ledger with per-address outcomes and summary statistics.

mod report;

pub use report::{print_report, CrawlReport};
