//! HTTP client for Cosmos governance REST endpoints.
//!
//! [`ChainClient`] wraps one node's base URL and performs the three
//! queries the exporter needs: the recent-proposal list, a proposal's
//! voter list, and the per-address vote lookup. Responses are classified
//! by status code into [`ChainError`] variants; [`RetryPolicy`] adds
//! bounded retry on rate limiting for the per-address lookup.

pub mod client;
pub mod error;
pub mod retry;
pub mod wire;

pub use client::ChainClient;
pub use error::ChainError;
pub use retry::RetryPolicy;
