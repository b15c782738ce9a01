//! Reference data for one dataset: gold/silver sets, synonyms and exemptions.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::ids::DatasetKey;
use crate::term::PairKey;

/// A standard term and the alternate spellings that should count as it.
///
/// This is the compact authoring form; the matcher expands it into a flat
/// synonym lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymGroup {
    pub standard: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
}

impl SynonymGroup {
    pub fn new<S: Into<String>>(
        standard: impl Into<String>,
        synonyms: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            standard: standard.into(),
            synonyms: synonyms.into_iter().map(Into::into).collect(),
        }
    }
}

/// Once `parent` (or any of its children) is matched, unmatched children are
/// not counted as false positives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonPunishRule {
    pub parent: String,
    #[serde(default)]
    pub children: Vec<String>,
}

impl NonPunishRule {
    pub fn new<S: Into<String>>(
        parent: impl Into<String>,
        children: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            parent: parent.into(),
            children: children.into_iter().map(Into::into).collect(),
        }
    }
}

/// Gold and silver tiers of normalized reference items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceSets<K: Ord> {
    pub gold: BTreeSet<K>,
    #[serde(default = "BTreeSet::new")]
    pub silver: BTreeSet<K>,
}

impl<K: Ord> Default for ReferenceSets<K> {
    fn default() -> Self {
        Self {
            gold: BTreeSet::new(),
            silver: BTreeSet::new(),
        }
    }
}

/// Everything the evaluator needs to score rounds for one dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetStandards {
    pub dataset: DatasetKey,
    pub classes: ReferenceSets<String>,
    pub associations: ReferenceSets<PairKey>,
    /// Shared by class and association matching, in authoring order.
    pub synonyms: Vec<SynonymGroup>,
    pub non_punish: Vec<NonPunishRule>,
}

impl DatasetStandards {
    pub fn empty(dataset: DatasetKey) -> Self {
        Self {
            dataset,
            classes: ReferenceSets::default(),
            associations: ReferenceSets::default(),
            synonyms: Vec::new(),
            non_punish: Vec::new(),
        }
    }
}
