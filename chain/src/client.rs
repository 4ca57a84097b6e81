//! HTTP client for querying one node's governance endpoints.

use std::time::Duration;

use govwatch_types::{Proposal, VoteLookup};

use crate::error::ChainError;
use crate::wire::{ErrorBody, GovQueryCode, ProposalsResponse, VoteResponse, VotesResponse};

/// Default timeout for a single request.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default connection timeout.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default number of most-recent proposals requested per cycle.
const DEFAULT_PROPOSALS_PAGE_SIZE: u32 = 50;

/// Default voter-list page size for membership checks.
const DEFAULT_VOTERS_PAGE_SIZE: u32 = 200;

/// Client for one chain's REST endpoint.
///
/// Holds a reusable connection pool; every request carries a finite
/// timeout so one hung node cannot stall a poll cycle.
pub struct ChainClient {
    /// Base URL of the node, without trailing slash.
    base_url: String,
    /// HTTP client (reusable connection pool).
    http_client: reqwest::Client,
    /// How many of the most recent proposals to request.
    proposals_page_size: u32,
    /// Voter-list page size for `fetch_voters`.
    voters_page_size: u32,
}

impl ChainClient {
    /// Create a client with default timeouts and page sizes.
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom per-request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
            proposals_page_size: DEFAULT_PROPOSALS_PAGE_SIZE,
            voters_page_size: DEFAULT_VOTERS_PAGE_SIZE,
        }
    }

    /// Set how many of the most recent proposals each cycle requests.
    pub fn with_proposals_page_size(mut self, page_size: u32) -> Self {
        self.proposals_page_size = page_size;
        self
    }

    /// Set the voter-list page size used by [`fetch_voters`].
    ///
    /// [`fetch_voters`]: ChainClient::fetch_voters
    pub fn with_voters_page_size(mut self, page_size: u32) -> Self {
        self.voters_page_size = page_size;
        self
    }

    /// Fetch the most recent proposals, newest first.
    ///
    /// Failures are soft: any transport error or non-2xx status is logged
    /// and an empty list is returned. Callers must treat an empty result as
    /// "nothing to report this cycle", not as "zero proposals exist".
    pub async fn fetch_proposals(&self) -> Vec<Proposal> {
        match self.try_fetch_proposals().await {
            Ok(proposals) => proposals,
            Err(e) => {
                tracing::error!(node = %self.base_url, "failed to fetch proposals: {e}");
                Vec::new()
            }
        }
    }

    async fn try_fetch_proposals(&self) -> Result<Vec<Proposal>, ChainError> {
        let url = format!(
            "{}/cosmos/gov/v1/proposals?pagination.reverse=true&pagination.limit={}&pagination.count_total=true",
            self.base_url, self.proposals_page_size
        );
        tracing::debug!(%url, "fetching proposals");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(classify_transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ChainError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body: ProposalsResponse = response
            .json()
            .await
            .map_err(|e| ChainError::InvalidResponse(format!("proposals decode: {e}")))?;

        let proposals: Vec<Proposal> = body
            .proposals
            .into_iter()
            .filter_map(|raw| raw.into_proposal())
            .collect();
        tracing::debug!(node = %self.base_url, count = proposals.len(), "fetched proposals");
        Ok(proposals)
    }

    /// Fetch the voter addresses recorded on a proposal.
    ///
    /// Only a single page (bounded by the configured voter page size) is
    /// requested; a voter beyond that page is not visible to the caller.
    pub async fn fetch_voters(&self, proposal_id: &str) -> Result<Vec<String>, ChainError> {
        let url = format!(
            "{}/cosmos/gov/v1beta1/proposals/{}/votes?pagination.limit={}",
            self.base_url, proposal_id, self.voters_page_size
        );
        tracing::debug!(%url, "fetching voter list");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(classify_transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ChainError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body: VotesResponse = response
            .json()
            .await
            .map_err(|e| ChainError::InvalidResponse(format!("votes decode: {e}")))?;
        tracing::debug!(
            proposal = proposal_id,
            count = body.votes.len(),
            "fetched voter list"
        );
        Ok(body.votes.into_iter().map(|vote| vote.voter).collect())
    }

    /// Look up the tracked address's vote on a proposal.
    ///
    /// Status classification:
    /// - 2xx with a vote body → [`VoteLookup::Voted`] with the first option
    /// - 400 whose body carries the gov module's "vote not found" code →
    ///   [`VoteLookup::NotVoted`]
    /// - 429 → [`ChainError::RateLimited`] (the only retryable outcome)
    /// - anything else → error, no retry
    pub async fn fetch_vote(
        &self,
        proposal_id: &str,
        address: &str,
    ) -> Result<VoteLookup, ChainError> {
        let url = format!(
            "{}/cosmos/gov/v1beta1/proposals/{}/votes/{}",
            self.base_url, proposal_id, address
        );
        tracing::debug!(%url, "fetching vote");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(classify_transport)?;
        let status = response.status();

        if status.is_success() {
            let body: VoteResponse = response
                .json()
                .await
                .map_err(|e| ChainError::InvalidResponse(format!("vote decode: {e}")))?;
            let option = body
                .vote
                .options
                .first()
                .map(|opt| opt.option.clone())
                .ok_or_else(|| {
                    ChainError::InvalidResponse("vote body carried no options".into())
                })?;
            return Ok(VoteLookup::Voted(option));
        }

        match status.as_u16() {
            429 => Err(ChainError::RateLimited(url)),
            400 => {
                let body: ErrorBody = response
                    .json()
                    .await
                    .map_err(|e| ChainError::InvalidResponse(format!("error body decode: {e}")))?;
                match body.query_code() {
                    GovQueryCode::VoteNotFound => Ok(VoteLookup::NotVoted),
                    GovQueryCode::Other(code) => {
                        tracing::warn!(
                            proposal = proposal_id,
                            code,
                            message = %body.message,
                            "unrecognized application error from vote lookup"
                        );
                        Err(ChainError::UnexpectedStatus { status: 400, url })
                    }
                }
            }
            status => Err(ChainError::UnexpectedStatus { status, url }),
        }
    }
}

/// Map a reqwest transport failure onto the error taxonomy.
fn classify_transport(e: reqwest::Error) -> ChainError {
    if e.is_timeout() {
        ChainError::Unreachable(format!("request timed out: {e}"))
    } else if e.is_connect() {
        ChainError::Unreachable(format!("connection failed: {e}"))
    } else {
        ChainError::RequestFailed(e.to_string())
    }
}
