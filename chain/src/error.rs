use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("node endpoint unreachable: {0}")]
    Unreachable(String),

    #[error("HTTP request to node failed: {0}")]
    RequestFailed(String),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("rate limited (HTTP 429) by {0}")]
    RateLimited(String),

    #[error("invalid response from node: {0}")]
    InvalidResponse(String),

    #[error("vote lookup still rate limited after {attempts} retries")]
    MaxRetriesExceeded { attempts: u32 },
}
