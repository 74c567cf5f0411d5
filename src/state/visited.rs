use crate::state::PageOutcome;
use crate::url::Address;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// The deduplication ledger: every address ever admitted into the crawl,
/// with the outcome of its visit.
///
/// The set grows monotonically for the lifetime of a run and never shrinks.
/// It is deliberately unsynchronized: only the coordinating loop owns a
/// `VisitedSet`, and fetch tasks report discoveries back over a channel, so
/// check-and-insert is atomic by construction regardless of how many tasks
/// discover the same address at once.
#[derive(Debug, Default)]
pub struct VisitedSet {
    pages: HashMap<Address, PageOutcome>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check-and-insert: admits the address if it has never been seen.
    ///
    /// Returns true if the address was newly admitted (and is now
    /// `Pending`), false if it was already in the ledger. Re-admitting an
    /// address never overwrites its recorded outcome.
    pub fn admit(&mut self, address: Address) -> bool {
        match self.pages.entry(address) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(PageOutcome::Pending);
                true
            }
        }
    }

    /// Records the terminal outcome for an admitted address.
    pub fn record(&mut self, address: &Address, outcome: PageOutcome) {
        if let Some(slot) = self.pages.get_mut(address) {
            *slot = outcome;
        } else {
            tracing::warn!("outcome reported for unadmitted address {address}");
        }
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.pages.contains_key(address)
    }

    pub fn outcome(&self, address: &Address) -> Option<&PageOutcome> {
        self.pages.get(address)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Iterates over the ledger in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&Address, &PageOutcome)> {
        self.pages.iter()
    }

    /// Counts entries whose outcome matches the predicate.
    pub fn count_where(&self, predicate: impl Fn(&PageOutcome) -> bool) -> usize {
        self.pages.values().filter(|o| predicate(o)).count()
    }
}
