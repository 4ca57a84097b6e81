//! Bounded retry for the per-address vote lookup.
//!
//! Only rate limiting is transient and worth retrying. A definitive
//! no-vote answer and every other failure return immediately: the former
//! is a valid terminal outcome, the latter need operator attention rather
//! than silent masking.

use std::time::Duration;

use govwatch_types::VoteLookup;

use crate::client::ChainClient;
use crate::error::ChainError;

/// Retry knobs for the per-address vote lookup.
#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    /// Maximum number of retries after the initial attempt.
    pub max_retries: u32,
    /// Fixed wait between attempts (no exponential backoff).
    pub wait: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            wait: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Look up a vote, retrying on HTTP 429 up to `max_retries` times with
    /// a fixed wait between attempts.
    ///
    /// A [`VoteLookup::NotVoted`] answer consumes no retry. Waits suspend
    /// the task via [`tokio::time::sleep`], so concurrent chain evaluations
    /// are unaffected.
    pub async fn fetch_vote(
        &self,
        client: &ChainClient,
        proposal_id: &str,
        address: &str,
    ) -> Result<VoteLookup, ChainError> {
        let mut retries = 0u32;
        loop {
            match client.fetch_vote(proposal_id, address).await {
                Err(ChainError::RateLimited(url)) => {
                    if retries >= self.max_retries {
                        tracing::warn!(
                            proposal = proposal_id,
                            retries,
                            %url,
                            "vote lookup still rate limited, giving up"
                        );
                        return Err(ChainError::MaxRetriesExceeded { attempts: retries });
                    }
                    retries += 1;
                    tracing::debug!(
                        proposal = proposal_id,
                        attempt = retries,
                        wait_ms = self.wait.as_millis() as u64,
                        "rate limited, backing off"
                    );
                    tokio::time::sleep(self.wait).await;
                }
                outcome => return outcome,
            }
        }
    }
}
