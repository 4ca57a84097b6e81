//! Prometheus metrics for the govwatch exporter.
//!
//! [`ExporterMetrics`] owns a dedicated [`Registry`] so the scrape surface
//! carries only domain metrics — no process or runtime collectors. Each
//! published [`ChainSnapshot`] fully replaces the previously exposed state
//! for its chain target: the count gauge is overwritten and per-proposal
//! records that no longer qualify are removed, so the surface never grows
//! unboundedly and never reports stale not-voted state.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use prometheus::{
    register_int_gauge_vec_with_registry, Encoder, IntGaugeVec, Opts, Registry, TextEncoder,
};

use govwatch_types::ChainSnapshot;

/// Destination for per-cycle snapshots.
///
/// The scheduler writes through this seam rather than a global registry,
/// so tests can substitute their own sink. Implementations must tolerate
/// concurrent publishes for different chain targets.
pub trait SnapshotSink: Send + Sync {
    fn publish(&self, snapshot: &ChainSnapshot);
}

/// Label values of one exposed not-voted record:
/// chain, alias, address, proposal id, title.
type InfoLabels = [String; 5];

/// Central collection of the exporter's Prometheus metrics.
pub struct ExporterMetrics {
    /// The registry that owns every metric below.
    registry: Registry,
    /// Not-voted count per (chain, alias).
    not_voted_count: IntGaugeVec,
    /// One constant-1 record per not-voted proposal, carrying the proposal
    /// title as label metadata.
    not_voted_info: IntGaugeVec,
    /// Label sets currently exposed per (chain, alias), so the next cycle
    /// can remove the ones that no longer qualify.
    published: Mutex<HashMap<(String, String), HashSet<InfoLabels>>>,
}

impl ExporterMetrics {
    /// Create a fresh set of metrics under a new [`Registry`].
    pub fn new() -> Self {
        let registry = Registry::new();

        let not_voted_count = register_int_gauge_vec_with_registry!(
            Opts::new(
                "govwatch_not_voted_proposals",
                "Number of active proposals the tracked address has not voted on"
            ),
            &["chain", "alias"],
            registry
        )
        .expect("failed to register not_voted_proposals gauge");

        let not_voted_info = register_int_gauge_vec_with_registry!(
            Opts::new(
                "govwatch_not_voted_proposal_info",
                "Details of active proposals the tracked address has not voted on"
            ),
            &["chain", "alias", "address", "proposal_id", "title"],
            registry
        )
        .expect("failed to register not_voted_proposal_info gauge");

        Self {
            registry,
            not_voted_count,
            not_voted_info,
            published: Mutex::new(HashMap::new()),
        }
    }

    /// The registry backing the scrape surface.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Encode the registry into the Prometheus text exposition format.
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }

    fn publish_snapshot(&self, snapshot: &ChainSnapshot) {
        self.not_voted_count
            .with_label_values(&[snapshot.chain.as_str(), snapshot.alias.as_str()])
            .set(snapshot.not_voted_count() as i64);

        let fresh: HashSet<InfoLabels> = snapshot
            .not_voted
            .iter()
            .map(|entry| {
                [
                    snapshot.chain.clone(),
                    snapshot.alias.clone(),
                    snapshot.address.clone(),
                    entry.proposal_id.clone(),
                    entry.title.clone(),
                ]
            })
            .collect();

        let key = (snapshot.chain.clone(), snapshot.alias.clone());
        let previous = {
            let mut published = self
                .published
                .lock()
                .expect("metrics bookkeeping lock poisoned");
            published.insert(key, fresh.clone()).unwrap_or_default()
        };

        for stale in previous.difference(&fresh) {
            let labels: Vec<&str> = stale.iter().map(String::as_str).collect();
            if self.not_voted_info.remove_label_values(&labels).is_err() {
                tracing::debug!(chain = %snapshot.chain, "stale record already absent");
            }
        }
        for labels in &fresh {
            let values: Vec<&str> = labels.iter().map(String::as_str).collect();
            self.not_voted_info.with_label_values(&values).set(1);
        }
    }
}

impl SnapshotSink for ExporterMetrics {
    fn publish(&self, snapshot: &ChainSnapshot) {
        self.publish_snapshot(snapshot);
    }
}

impl Default for ExporterMetrics {
    fn default() -> Self {
        Self::new()
    }
}
