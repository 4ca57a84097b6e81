//! Serde views of the gov module's REST responses.
//!
//! These structs mirror the JSON shapes the node returns and are converted
//! into the domain types at this boundary — including the application-level
//! error code carried in 400 bodies, which is decoded into [`GovQueryCode`]
//! here rather than inspected ad hoc at call sites.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use govwatch_types::Proposal;

/// `GET /cosmos/gov/v1/proposals` response body.
#[derive(Debug, Deserialize)]
pub struct ProposalsResponse {
    #[serde(default)]
    pub proposals: Vec<RawProposal>,
}

/// One proposal as the node reports it.
#[derive(Debug, Deserialize)]
pub struct RawProposal {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub voting_start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub voting_end_time: Option<DateTime<Utc>>,
}

impl RawProposal {
    /// Convert into the domain type.
    ///
    /// Proposals still in their deposit period carry null voting times and
    /// yield `None` — they cannot be in a voting window.
    pub fn into_proposal(self) -> Option<Proposal> {
        let voting_start_time = self.voting_start_time?;
        let voting_end_time = self.voting_end_time?;
        Some(Proposal {
            id: self.id,
            title: self.title,
            voting_start_time,
            voting_end_time,
        })
    }
}

/// `GET /cosmos/gov/v1beta1/proposals/{id}/votes` response body.
#[derive(Debug, Deserialize)]
pub struct VotesResponse {
    #[serde(default)]
    pub votes: Vec<RawVote>,
}

/// One voter entry in a proposal's vote list.
#[derive(Debug, Deserialize)]
pub struct RawVote {
    pub voter: String,
}

/// `GET /cosmos/gov/v1beta1/proposals/{id}/votes/{address}` success body.
#[derive(Debug, Deserialize)]
pub struct VoteResponse {
    pub vote: RawVoteDetail,
}

#[derive(Debug, Deserialize)]
pub struct RawVoteDetail {
    #[serde(default)]
    pub options: Vec<RawVoteOption>,
}

#[derive(Debug, Deserialize)]
pub struct RawVoteOption {
    pub option: String,
}

/// Error body the REST gateway attaches to 400 responses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

/// Application-level codes the gov module embeds in error bodies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GovQueryCode {
    /// `code: 3` — the node's canonical "no vote by this address on this
    /// proposal" signal. Not an error.
    VoteNotFound,
    /// Any other code.
    Other(i64),
}

impl ErrorBody {
    pub fn query_code(&self) -> GovQueryCode {
        match self.code {
            3 => GovQueryCode::VoteNotFound,
            other => GovQueryCode::Other(other),
        }
    }
}
