//! Per-cycle view of a governance proposal.

use chrono::{DateTime, Utc};

/// A governance proposal as seen in one poll cycle.
///
/// Reconstructed from the node response every cycle; never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Proposal {
    /// Proposal identifier as reported by the node.
    pub id: String,
    /// Human-readable proposal title.
    pub title: String,
    /// Start of the voting window (UTC).
    pub voting_start_time: DateTime<Utc>,
    /// End of the voting window (UTC), inclusive.
    pub voting_end_time: DateTime<Utc>,
}
