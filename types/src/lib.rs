//! Fundamental types for the govwatch exporter.
//!
//! This crate defines the types shared across every other crate in the
//! workspace: the configured chain targets, the per-cycle view of a
//! governance proposal, vote lookup outcomes, and the snapshot handed to
//! the metrics publisher.

pub mod proposal;
pub mod snapshot;
pub mod target;
pub mod vote;

pub use proposal::Proposal;
pub use snapshot::{ChainSnapshot, NotVotedEntry};
pub use target::{ChainTarget, LookupMode};
pub use vote::VoteLookup;
