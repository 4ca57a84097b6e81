//! The reconciliation engine.
//!
//! One [`Reconciler`] per configured chain target drives the cycle:
//! fetch proposals, keep those whose voting window contains the cycle
//! instant, determine the tracked address's vote status per proposal, and
//! emit a [`ChainSnapshot`](govwatch_types::ChainSnapshot) for the
//! metrics publisher.

pub mod activity;
pub mod reconcile;

pub use activity::is_active;
pub use reconcile::Reconciler;
