//! Configured chain targets.

use serde::{Deserialize, Serialize};

/// How the exporter determines whether the tracked address voted on a
/// proposal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LookupMode {
    /// Fetch the proposal's voter list (one bounded page) and test
    /// membership of the tracked address.
    ///
    /// Best-effort: the list is paginated, so a voter beyond the configured
    /// page limit is indistinguishable from a non-voter.
    #[default]
    VoterList,
    /// Query the per-address vote endpoint directly. Authoritative — no
    /// pagination truncation — and rate-limit retries apply.
    Direct,
}

/// One chain/address pair the exporter watches.
///
/// Loaded once at startup from the configuration file and read-only
/// afterwards.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChainTarget {
    /// Display name of the chain, used as the `chain` metric label.
    pub name: String,
    /// Base URL of the chain's REST endpoint (trailing slash tolerated).
    pub node_url: String,
    /// The validator or account address whose votes are tracked.
    pub address: String,
    /// Optional label distinguishing multiple tracked addresses on the
    /// same chain. Defaults to the tracked address.
    #[serde(default)]
    pub alias: Option<String>,
    /// Vote lookup variant for this target.
    #[serde(default)]
    pub mode: LookupMode,
}

impl ChainTarget {
    /// The `alias` metric label for this target.
    pub fn alias_label(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alias_falls_back_to_address() {
        let target = ChainTarget {
            name: "testhub".into(),
            node_url: "http://localhost:1317".into(),
            address: "cosmos1abc".into(),
            alias: None,
            mode: LookupMode::default(),
        };
        assert_eq!(target.alias_label(), "cosmos1abc");
    }

    #[test]
    fn explicit_alias_wins() {
        let target = ChainTarget {
            name: "testhub".into(),
            node_url: "http://localhost:1317".into(),
            address: "cosmos1abc".into(),
            alias: Some("validator-main".into()),
            mode: LookupMode::Direct,
        };
        assert_eq!(target.alias_label(), "validator-main");
    }

    #[test]
    fn mode_deserializes_kebab_case() {
        let target: ChainTarget = serde_json::from_str(
            r#"{"name":"hub","node_url":"http://n","address":"a","mode":"voter-list"}"#,
        )
        .unwrap();
        assert_eq!(target.mode, LookupMode::VoterList);

        let target: ChainTarget = serde_json::from_str(
            r#"{"name":"hub","node_url":"http://n","address":"a","mode":"direct"}"#,
        )
        .unwrap();
        assert_eq!(target.mode, LookupMode::Direct);
    }

    #[test]
    fn mode_defaults_to_voter_list() {
        let target: ChainTarget = serde_json::from_str(
            r#"{"name":"hub","node_url":"http://n","address":"a"}"#,
        )
        .unwrap();
        assert_eq!(target.mode, LookupMode::VoterList);
        assert!(target.alias.is_none());
    }
}
