//! Per-chain reconciliation cycles.

use chrono::{DateTime, Utc};

use govwatch_chain::{ChainClient, ChainError, RetryPolicy};
use govwatch_types::{ChainSnapshot, ChainTarget, LookupMode, NotVotedEntry, Proposal, VoteLookup};

use crate::activity::is_active;

/// Runs reconciliation cycles for one configured chain target.
pub struct Reconciler {
    target: ChainTarget,
    client: ChainClient,
    retry: RetryPolicy,
}

impl Reconciler {
    pub fn new(target: ChainTarget, client: ChainClient, retry: RetryPolicy) -> Self {
        Self {
            target,
            client,
            retry,
        }
    }

    /// The chain target this reconciler evaluates.
    pub fn target(&self) -> &ChainTarget {
        &self.target
    }

    /// Run one stateless reconciliation cycle.
    ///
    /// `now` is the single evaluation instant applied to every proposal in
    /// this cycle. A proposal whose vote lookup fails is logged and left
    /// out of the not-voted list — an ambiguous lookup is not evidence of
    /// non-voting. An empty proposal fetch produces an empty snapshot, so
    /// a node outage clears the gauge for this cycle instead of crashing
    /// or carrying stale state.
    pub async fn run_cycle(&self, now: DateTime<Utc>) -> ChainSnapshot {
        let chain = self.target.name.as_str();
        let proposals = self.client.fetch_proposals().await;

        let mut snapshot =
            ChainSnapshot::empty(chain, self.target.alias_label(), &self.target.address);
        if proposals.is_empty() {
            tracing::info!(chain, "no proposals to evaluate this cycle");
            return snapshot;
        }

        let mut active = 0usize;
        for proposal in proposals {
            if !is_active(&proposal, now) {
                continue;
            }
            active += 1;
            match self.has_voted(&proposal).await {
                Ok(true) => {}
                Ok(false) => snapshot.not_voted.push(NotVotedEntry {
                    proposal_id: proposal.id,
                    title: proposal.title,
                }),
                Err(e) => {
                    tracing::error!(
                        chain,
                        proposal = %proposal.id,
                        "vote lookup failed, excluding proposal from this cycle: {e}"
                    );
                }
            }
        }

        tracing::info!(
            chain,
            active,
            not_voted = snapshot.not_voted_count(),
            "reconciliation cycle complete"
        );
        snapshot
    }

    /// Determine whether the tracked address voted on an active proposal,
    /// via the lookup variant configured for this target.
    async fn has_voted(&self, proposal: &Proposal) -> Result<bool, ChainError> {
        match self.target.mode {
            LookupMode::VoterList => {
                let voters = self.client.fetch_voters(&proposal.id).await?;
                Ok(voters.iter().any(|voter| voter == &self.target.address))
            }
            LookupMode::Direct => {
                match self
                    .retry
                    .fetch_vote(&self.client, &proposal.id, &self.target.address)
                    .await?
                {
                    VoteLookup::Voted(option) => {
                        tracing::debug!(
                            chain = %self.target.name,
                            proposal = %proposal.id,
                            %option,
                            "vote found"
                        );
                        Ok(true)
                    }
                    VoteLookup::NotVoted => Ok(false),
                }
            }
        }
    }
}
