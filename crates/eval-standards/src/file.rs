//! On-disk shape of one `<dataset>.toml` standards file.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use eval_match::normalize_word;
use eval_model::{DatasetKey, DatasetStandards, NonPunishRule, PairKey, ReferenceSets, SynonymGroup};

use crate::error::{Result, StandardsError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StandardsFile {
    #[serde(default)]
    pub class: ClassSection,
    #[serde(default)]
    pub association: AssociationSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassSection {
    #[serde(default)]
    pub gold: Vec<String>,
    #[serde(default)]
    pub silver: Vec<String>,
    #[serde(default)]
    pub synonyms: Vec<SynonymGroup>,
    #[serde(default)]
    pub non_punish: Vec<NonPunishRule>,
}

/// Pairs are written as two-element arrays: `gold = [["user", "feedback"]]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssociationSection {
    #[serde(default)]
    pub gold: Vec<Vec<String>>,
    #[serde(default)]
    pub silver: Vec<Vec<String>>,
}

pub fn parse_standards_file(path: &Path, text: &str) -> Result<StandardsFile> {
    toml::from_str(text).map_err(|source| StandardsError::Toml {
        path: path.to_path_buf(),
        source,
    })
}

fn normalize_terms(terms: &[String]) -> BTreeSet<String> {
    terms.iter().map(|t| normalize_word(t)).collect()
}

fn normalize_pairs(path: &Path, pairs: &[Vec<String>], offset: usize) -> Result<BTreeSet<PairKey>> {
    pairs
        .iter()
        .enumerate()
        .map(|(index, pair)| match pair.as_slice() {
            [left, right] => Ok(PairKey::new(normalize_word(left), normalize_word(right))),
            other => Err(StandardsError::InvalidPair {
                path: path.to_path_buf(),
                index: offset + index,
                found: other.len(),
            }),
        })
        .collect()
}

impl StandardsFile {
    /// Normalizes reference terms and pairs; synonyms and rules stay in
    /// authoring form and order.
    pub fn into_standards(self, dataset: DatasetKey, path: &Path) -> Result<DatasetStandards> {
        let gold_pairs = normalize_pairs(path, &self.association.gold, 0)?;
        let silver_pairs =
            normalize_pairs(path, &self.association.silver, self.association.gold.len())?;
        Ok(DatasetStandards {
            dataset,
            classes: ReferenceSets {
                gold: normalize_terms(&self.class.gold),
                silver: normalize_terms(&self.class.silver),
            },
            associations: ReferenceSets {
                gold: gold_pairs,
                silver: silver_pairs,
            },
            synonyms: self.class.synonyms,
            non_punish: self.class.non_punish,
        })
    }
}
