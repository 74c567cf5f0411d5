//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - The single-writer coordinator and its termination-detection counter
//! - The `Fetch` collaborator seam and the reqwest-backed fetcher
//! - HTML link extraction
//! - The content-type gate

pub mod content_type;
mod coordinator;
mod fetcher;
mod parser;

pub use content_type::is_crawlable;
pub use coordinator::{Coordinator, WorkBatch};
pub use fetcher::{build_http_client, Fetch, FetchResult, HttpFetcher};
pub use parser::extract_hrefs;

use crate::config::Config;
use crate::output::CrawlReport;
use crate::url::Address;
use crate::KumoError;

/// Runs a complete crawl over HTTP
///
/// This is the main entry point for starting a crawl. It builds the HTTP
/// fetcher from the configuration, then drives the coordinator from the
/// seed address until the frontier drains.
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `seed` - The canonical address to start from
///
/// # Returns
///
/// * `Ok(CrawlReport)` - The visited ledger and run statistics
/// * `Err(KumoError)` - Startup failed (the crawl itself recovers from
///   per-page errors)
pub async fn crawl(config: Config, seed: Address) -> Result<CrawlReport, KumoError> {
    let fetcher = HttpFetcher::new(&config)?;
    let coordinator = Coordinator::new(config, fetcher);
    coordinator.run(seed).await
}
