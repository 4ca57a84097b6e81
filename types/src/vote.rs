//! Vote lookup outcomes.

/// Terminal outcome of a per-address vote lookup.
///
/// "The address provably did not vote" is a valid answer, distinct from
/// any lookup failure — errors are carried separately so the two are never
/// conflated in metrics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VoteLookup {
    /// A vote exists; the payload is the first selected option.
    Voted(String),
    /// The node confirmed no vote by this address on this proposal.
    NotVoted,
}
