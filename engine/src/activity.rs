//! Voting-window evaluation.

use chrono::{DateTime, Utc};

use govwatch_types::Proposal;

/// True iff the proposal's voting window contains `now`, inclusive on both
/// bounds.
///
/// `now` is sampled once per reconciliation cycle and applied uniformly to
/// every proposal in that cycle, so a window boundary cannot flap within
/// one cycle.
pub fn is_active(proposal: &Proposal, now: DateTime<Utc>) -> bool {
    proposal.voting_start_time <= now && now <= proposal.voting_end_time
}
