//! Per-cycle reconciliation snapshots.

/// An active proposal the tracked address has not voted on.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NotVotedEntry {
    /// Proposal identifier.
    pub proposal_id: String,
    /// Proposal title, carried into the metric surface as metadata.
    pub title: String,
}

/// The complete result of one reconciliation cycle for one chain target.
///
/// Entirely replaces the previously published state for that target — the
/// publisher performs no incremental merge and retains no history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainSnapshot {
    /// Chain display name (the `chain` metric label).
    pub chain: String,
    /// Target alias (the `alias` metric label).
    pub alias: String,
    /// The tracked address.
    pub address: String,
    /// Active proposals with no vote from the tracked address.
    pub not_voted: Vec<NotVotedEntry>,
}

impl ChainSnapshot {
    /// A snapshot with no not-voted proposals, published when a cycle has
    /// nothing to report.
    pub fn empty(chain: &str, alias: &str, address: &str) -> Self {
        Self {
            chain: chain.to_string(),
            alias: alias.to_string(),
            address: address.to_string(),
            not_voted: Vec::new(),
        }
    }

    /// Number of active proposals the tracked address has not voted on.
    pub fn not_voted_count(&self) -> usize {
        self.not_voted.len()
    }
}
