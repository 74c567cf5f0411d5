//! Crawl coordinator - main crawl orchestration logic
//!
//! This module contains the single-writer crawl loop that drives a run from
//! one seed address to quiescence:
//! - Owning the visited ledger and the pending-work counter
//! - Spawning one fetch task per admitted address, throttled by the
//!   concurrency token pool
//! - Folding each task's discoveries back into the frontier
//! - Detecting termination without a fixed iteration count or timeout
//!
//! The visited set and the counter are mutated only on this loop; fetch
//! tasks communicate through a channel, so no lock is ever taken.

use crate::config::Config;
use crate::crawler::fetcher::{Fetch, FetchResult};
use crate::crawler::parser::extract_hrefs;
use crate::output::CrawlReport;
use crate::state::{PageOutcome, VisitedSet};
use crate::url::{Address, LinkFilter};
use crate::KumoError;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, Semaphore};

/// One retired fetch task's report back to the coordinator.
///
/// Every admitted address produces exactly one batch, possibly empty; the
/// pending counter decrements once per batch consumed.
#[derive(Debug)]
pub struct WorkBatch {
    /// The address this task was responsible for
    pub address: Address,

    /// What happened to the fetch
    pub outcome: PageOutcome,

    /// Newly discovered in-scope addresses, not yet deduplicated
    pub discovered: Vec<Address>,
}

/// Main crawler coordinator structure
pub struct Coordinator<F> {
    config: Config,
    fetcher: Arc<F>,
    limiter: Arc<Semaphore>,
}

impl<F: Fetch> Coordinator<F> {
    /// Creates a coordinator with the configured token pool capacity
    pub fn new(config: Config, fetcher: F) -> Self {
        let limiter = Arc::new(Semaphore::new(
            config.crawler.max_concurrent_fetches as usize,
        ));
        Self {
            config,
            fetcher: Arc::new(fetcher),
            limiter,
        }
    }

    /// Runs the crawl from the seed address until no work remains.
    ///
    /// The loop maintains one invariant: the pending counter equals the
    /// number of admitted addresses whose batch has not yet been folded
    /// back. It is incremented exactly once per admission and decremented
    /// exactly once per received batch, so counter == 0 means quiescence:
    /// no in-flight fetch and no undiscovered frontier.
    pub async fn run(&self, seed: Address) -> Result<CrawlReport, KumoError> {
        let root = seed.to_url()?;
        let filter = Arc::new(LinkFilter::new(root, self.config.crawler.scope));

        // One slot per token is enough; a task only sends after its fetch
        // retires, and the loop below is always draining
        let capacity = self.config.crawler.max_concurrent_fetches.max(1) as usize;
        let (batch_tx, mut batch_rx) = mpsc::channel::<WorkBatch>(capacity);

        let started_at = chrono::Utc::now();
        let start = Instant::now();

        tracing::info!("Starting crawl from {seed}");

        let mut visited = VisitedSet::new();
        let mut pending: usize = 0;

        visited.admit(seed.clone());
        pending += 1;
        self.spawn_fetch(seed, Arc::clone(&filter), batch_tx.clone());

        let mut batches_folded: u64 = 0;

        while pending > 0 {
            let Some(batch) = batch_rx.recv().await else {
                // Unreachable while this loop holds batch_tx
                return Err(KumoError::Crawl(format!(
                    "work channel closed with {pending} fetches outstanding"
                )));
            };
            pending -= 1;
            batches_folded += 1;

            tracing::debug!("{}: {}", batch.address, batch.outcome);
            visited.record(&batch.address, batch.outcome);

            for address in batch.discovered {
                if visited.admit(address.clone()) {
                    pending += 1;
                    self.spawn_fetch(address, Arc::clone(&filter), batch_tx.clone());
                }
            }

            if batches_folded % 10 == 0 {
                tracing::info!(
                    "Progress: {} addresses admitted, {} fetches outstanding",
                    visited.len(),
                    pending
                );
            }
        }

        tracing::info!(
            "Crawl complete: {} addresses visited in {:?}",
            visited.len(),
            start.elapsed()
        );

        Ok(CrawlReport::new(visited, started_at, start.elapsed()))
    }

    /// Launches one fetch task for an admitted address
    fn spawn_fetch(
        &self,
        address: Address,
        filter: Arc<LinkFilter>,
        batch_tx: mpsc::Sender<WorkBatch>,
    ) {
        let fetcher = Arc::clone(&self.fetcher);
        let limiter = Arc::clone(&self.limiter);

        tokio::spawn(async move {
            let batch = fetch_task(fetcher, limiter, filter, address).await;
            // The coordinator keeps receiving until the counter hits zero,
            // so a send failure means the run was already torn down
            if batch_tx.send(batch).await.is_err() {
                tracing::warn!("coordinator gone before batch delivery");
            }
        });
    }
}

/// Runs one fetch task to completion.
///
/// Delivers exactly one batch per admitted address, empty on any failure;
/// this is the liveness contract the pending counter depends on. The concurrency
/// token is held for the fetch and link processing and released (by drop)
/// before the batch is handed back.
async fn fetch_task<F: Fetch>(
    fetcher: Arc<F>,
    limiter: Arc<Semaphore>,
    filter: Arc<LinkFilter>,
    address: Address,
) -> WorkBatch {
    let _permit = match limiter.acquire_owned().await {
        Ok(permit) => permit,
        // The pool is never closed during a run; still report back rather
        // than strand the counter
        Err(_) => {
            return WorkBatch {
                address,
                outcome: PageOutcome::Failed {
                    reason: "token pool closed".to_string(),
                },
                discovered: Vec::new(),
            }
        }
    };

    let (outcome, discovered) = match fetcher.fetch(&address).await {
        FetchResult::Success { body, .. } => match address.to_url() {
            Ok(base) => {
                let discovered: Vec<Address> = extract_hrefs(&body)
                    .iter()
                    .filter_map(|href| filter.admit(href, &base))
                    .collect();
                (
                    PageOutcome::Crawled {
                        links_found: discovered.len(),
                    },
                    discovered,
                )
            }
            Err(e) => (
                PageOutcome::Failed {
                    reason: format!("unusable base address: {e}"),
                },
                Vec::new(),
            ),
        },

        FetchResult::NotCrawlable { content_type } => {
            (PageOutcome::Skipped { content_type }, Vec::new())
        }

        FetchResult::HttpError { status_code } => (
            PageOutcome::Failed {
                reason: format!("HTTP {status_code}"),
            },
            Vec::new(),
        ),

        FetchResult::NetworkError { error } => (PageOutcome::Failed { reason: error }, Vec::new()),
    };

    WorkBatch {
        address,
        outcome,
        discovered,
    }
}
