//! Result of one two-phase matching run.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Reference tier that a candidate was matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    Gold,
    Silver,
}

/// How the reference item was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMethod {
    Exact,
    Synonym,
}

/// A candidate that consumed a reference item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedEntry<I, K> {
    pub item: I,
    /// The reference item that was consumed.
    pub key: K,
    pub tier: MatchTier,
    pub method: MatchMethod,
}

impl<I, K> MatchedEntry<I, K> {
    pub fn is_silver(&self) -> bool {
        self.tier == MatchTier::Silver
    }
}

/// Silver matches are rendered with a `(sil)` prefix.
impl<I: fmt::Display, K> fmt::Display for MatchedEntry<I, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tier {
            MatchTier::Gold => write!(f, "{}", self.item),
            MatchTier::Silver => write!(f, "(sil){}", self.item),
        }
    }
}

/// Partitioned output of matching a round of candidates against gold and silver.
///
/// Every input candidate lands in exactly one of the four partitions, and each
/// gold item is either consumed by a matched entry or still present in the
/// remaining sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome<I, K: Ord> {
    pub mandatory_matched: Vec<MatchedEntry<I, K>>,
    pub optional_matched: Vec<MatchedEntry<I, K>>,
    pub mandatory_unmatched: Vec<I>,
    pub optional_unmatched: Vec<I>,
    /// Gold items not consumed by any mandatory candidate.
    pub remaining_gold_mandatory: BTreeSet<K>,
    /// Gold items not consumed by any candidate.
    pub remaining_gold_full: BTreeSet<K>,
    pub log: Vec<String>,
}

impl<I, K: Ord> MatchOutcome<I, K> {
    /// Total number of candidates across the four partitions.
    pub fn partition_len(&self) -> usize {
        self.mandatory_matched.len()
            + self.optional_matched.len()
            + self.mandatory_unmatched.len()
            + self.optional_unmatched.len()
    }

    pub fn all_matched(&self) -> impl Iterator<Item = &MatchedEntry<I, K>> {
        self.mandatory_matched
            .iter()
            .chain(self.optional_matched.iter())
    }

    pub fn all_unmatched(&self) -> impl Iterator<Item = &I> {
        self.mandatory_unmatched
            .iter()
            .chain(self.optional_unmatched.iter())
    }

    pub fn log_text(&self) -> String {
        self.log.join("\n")
    }
}
