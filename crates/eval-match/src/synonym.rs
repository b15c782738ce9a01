//! Flat synonym lookup and substring candidate generation.

use std::collections::{BTreeMap, BTreeSet};

use eval_model::SynonymGroup;

use crate::normalize::normalize_word;

/// Normalized synonym → normalized standard term, iterated in insertion order.
///
/// Re-inserting an existing synonym replaces its standard but keeps the
/// synonym's original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynonymMap {
    entries: Vec<(String, String)>,
    index: BTreeMap<String, usize>,
}

impl SynonymMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, synonym: String, standard: String) {
        match self.index.get(&synonym) {
            Some(&position) => self.entries[position].1 = standard,
            None => {
                self.index.insert(synonym.clone(), self.entries.len());
                self.entries.push((synonym, standard));
            }
        }
    }

    pub fn get(&self, synonym: &str) -> Option<&str> {
        self.index
            .get(synonym)
            .map(|&position| self.entries[position].1.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Flattens `standard → [synonyms]` groups into a synonym lookup.
///
/// Both sides are normalized. A synonym listed under several standards maps
/// to the last one.
pub fn expand_synonym_mapping(groups: &[SynonymGroup]) -> SynonymMap {
    let mut map = SynonymMap::new();
    for group in groups {
        let standard = normalize_word(&group.standard);
        for synonym in &group.synonyms {
            map.insert(normalize_word(synonym), standard.clone());
        }
    }
    map
}

/// All spellings of `term` reachable by replacing synonym substrings with
/// their standard term.
///
/// Keys are visited once in map order; each visit rewrites every candidate
/// collected so far, so a later key also sees earlier replacements. The
/// original term is always included. Empty keys are ignored.
pub fn generate_candidates(term: &str, map: &SynonymMap) -> BTreeSet<String> {
    let mut candidates = BTreeSet::from([term.to_string()]);
    for (synonym, standard) in map.iter() {
        if synonym.is_empty() {
            continue;
        }
        let rewritten: Vec<String> = candidates
            .iter()
            .filter(|candidate| candidate.contains(synonym))
            .map(|candidate| candidate.replace(synonym, standard).trim().to_string())
            .collect();
        candidates.extend(rewritten);
    }
    candidates
}
