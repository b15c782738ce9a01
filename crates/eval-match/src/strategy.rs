//! What the two-phase engine compares for each kind of candidate.

use std::fmt;

use eval_model::{PairKey, Term, TermPair};

use crate::synonym::{SynonymMap, generate_candidates};

/// Adapts a candidate type to the two-phase engine.
///
/// Each pass asks the strategy for groups of reference keys. Groups are tried
/// in order; within a group the first key still present in gold is claimed,
/// otherwise the first key still present in silver.
pub trait MatchStrategy {
    type Item: Clone + fmt::Display;
    type Key: Ord + Clone + fmt::Display;

    fn is_optional(&self, item: &Self::Item) -> bool;

    /// Keys compared in the exact pass.
    fn exact_groups(&self, item: &Self::Item) -> Vec<Vec<Self::Key>>;

    /// Keys compared in the synonym pass.
    fn synonym_groups(&self, item: &Self::Item, synonyms: &SynonymMap) -> Vec<Vec<Self::Key>>;
}

/// Single terms. Each pass yields one group covering every `a/b` variant, so
/// a gold key reachable from any variant wins over a silver one.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassStrategy;

impl MatchStrategy for ClassStrategy {
    type Item = Term;
    type Key = String;

    fn is_optional(&self, item: &Term) -> bool {
        item.optional
    }

    fn exact_groups(&self, item: &Term) -> Vec<Vec<String>> {
        let variants = item.slash_variants().into_iter().map(str::to_string).collect();
        vec![variants]
    }

    fn synonym_groups(&self, item: &Term, synonyms: &SynonymMap) -> Vec<Vec<String>> {
        let candidates = item
            .slash_variants()
            .into_iter()
            .flat_map(|variant| generate_candidates(variant, synonyms))
            .collect();
        vec![candidates]
    }
}

/// Unordered pairs; the synonym pass tries every combination of the two
/// endpoints' candidates against gold before any against silver.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssociationStrategy;

impl MatchStrategy for AssociationStrategy {
    type Item = TermPair;
    type Key = PairKey;

    fn is_optional(&self, item: &TermPair) -> bool {
        item.optional
    }

    fn exact_groups(&self, item: &TermPair) -> Vec<Vec<PairKey>> {
        vec![vec![item.key()]]
    }

    fn synonym_groups(&self, item: &TermPair, synonyms: &SynonymMap) -> Vec<Vec<PairKey>> {
        let left = generate_candidates(&item.left, synonyms);
        let right = generate_candidates(&item.right, synonyms);
        let combinations = left
            .iter()
            .flat_map(|x| right.iter().map(move |y| PairKey::new(x.as_str(), y.as_str())))
            .collect();
        vec![combinations]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_variants_share_one_group() {
        let term = Term::normalized("parent/guardian", false);
        assert_eq!(
            ClassStrategy.exact_groups(&term),
            vec![vec!["parent".to_string(), "guardian".to_string()]]
        );
    }

    #[test]
    fn association_synonym_group_is_the_cross_product() {
        let mut synonyms = SynonymMap::new();
        synonyms.insert("kid".to_string(), "camper".to_string());
        let pair = TermPair::new("kid", "activity", false);
        let groups = AssociationStrategy.synonym_groups(&pair, &synonyms);
        assert_eq!(groups.len(), 1);
        assert_eq!(
            groups[0],
            vec![
                PairKey::new("activity", "camper"),
                PairKey::new("activity", "kid"),
            ]
        );
    }
}
