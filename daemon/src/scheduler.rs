//! The poll scheduler.
//!
//! One sequential pass over the configured chains per tick. Each chain's
//! snapshot is published as soon as its cycle completes, and one chain's
//! failure never aborts the others — the reconciler absorbs everything
//! short of a panic into its snapshot and logs.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::broadcast;

use govwatch_engine::Reconciler;
use govwatch_metrics::SnapshotSink;

pub struct Scheduler {
    reconcilers: Vec<Reconciler>,
    sink: Arc<dyn SnapshotSink>,
    interval: Duration,
}

impl Scheduler {
    pub fn new(
        reconcilers: Vec<Reconciler>,
        sink: Arc<dyn SnapshotSink>,
        interval: Duration,
    ) -> Self {
        Self {
            reconcilers,
            sink,
            interval,
        }
    }

    /// Run a single pass over every chain, publishing each snapshot as it
    /// completes. The evaluation instant is sampled once and applied
    /// uniformly across the pass.
    ///
    /// Returns `true` if `shutdown` fired during the pass; the chain being
    /// evaluated at that moment is allowed to finish first, so a published
    /// cycle is never cut mid-chain.
    pub async fn run_once(&self, shutdown: &mut broadcast::Receiver<()>) -> bool {
        let now = Utc::now();
        for reconciler in &self.reconcilers {
            let snapshot = reconciler.run_cycle(now).await;
            self.sink.publish(&snapshot);
            if shutdown.try_recv().is_ok() {
                return true;
            }
        }
        false
    }

    /// Poll forever: one pass per interval tick, until shutdown.
    pub async fn run(&self, mut shutdown: broadcast::Receiver<()>) {
        let mut interval = tokio::time::interval(self.interval);
        loop {
            tokio::select! {
                biased;
                _ = shutdown.recv() => {
                    tracing::info!("scheduler shutting down");
                    break;
                }
                _ = interval.tick() => {
                    if self.run_once(&mut shutdown).await {
                        tracing::info!("scheduler shutting down after finishing current chain");
                        break;
                    }
                }
            }
        }
    }
}
