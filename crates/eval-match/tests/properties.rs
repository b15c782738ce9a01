use std::collections::BTreeSet;

use proptest::prelude::*;

use eval_match::{SynonymMap, expand_synonym_mapping, match_classes, normalize_word};
use eval_model::{MatchTier, ReferenceSets, SynonymGroup, Term};

const VOCABULARY: &[&str] = &[
    "camper",
    "camp worker",
    "worker",
    "parent",
    "guardian",
    "parent/guardian",
    "activity",
    "form",
    "medical form",
    "cabin",
];

fn vocabulary_word() -> impl Strategy<Value = String> {
    prop::sample::select(VOCABULARY).prop_map(str::to_string)
}

fn synonym_table() -> SynonymMap {
    let mut map = SynonymMap::new();
    map.insert("worker".to_string(), "camp worker".to_string());
    map.insert("guardian".to_string(), "parent".to_string());
    map.insert("kid".to_string(), "camper".to_string());
    map
}

proptest! {
    #[test]
    fn normalization_is_idempotent(word in "[a-zA-Z /]{0,24}") {
        let once = normalize_word(&word);
        prop_assert_eq!(normalize_word(&once), once);
    }

    #[test]
    fn expansion_is_idempotent(
        groups in prop::collection::vec(
            (vocabulary_word(), prop::collection::vec(vocabulary_word(), 0..4)),
            0..6,
        )
    ) {
        let groups: Vec<SynonymGroup> = groups
            .into_iter()
            .map(|(standard, synonyms)| SynonymGroup::new(standard, synonyms))
            .collect();
        prop_assert_eq!(expand_synonym_mapping(&groups), expand_synonym_mapping(&groups));
    }

    #[test]
    fn every_candidate_lands_in_one_partition(
        items in prop::collection::vec((vocabulary_word(), any::<bool>()), 0..12),
        gold in prop::collection::btree_set(vocabulary_word(), 0..6),
        silver in prop::collection::btree_set(vocabulary_word(), 0..4),
    ) {
        let terms: Vec<Term> = items
            .iter()
            .map(|(word, optional)| Term::normalized(word.as_str(), *optional))
            .collect();
        let reference = ReferenceSets { gold: gold.clone(), silver };
        let outcome = match_classes(&terms, &reference, &synonym_table());

        prop_assert_eq!(outcome.partition_len(), terms.len());
        let optional_count = terms.iter().filter(|t| t.optional).count();
        prop_assert_eq!(
            outcome.optional_matched.len() + outcome.optional_unmatched.len(),
            optional_count
        );
    }

    #[test]
    fn reference_items_are_claimed_at_most_once(
        items in prop::collection::vec((vocabulary_word(), any::<bool>()), 0..12),
        gold in prop::collection::btree_set(vocabulary_word(), 0..6),
        silver in prop::collection::btree_set(vocabulary_word(), 0..4),
    ) {
        let terms: Vec<Term> = items
            .iter()
            .map(|(word, optional)| Term::normalized(word.as_str(), *optional))
            .collect();
        let reference = ReferenceSets { gold: gold.clone(), silver };
        let outcome = match_classes(&terms, &reference, &synonym_table());

        let mut gold_claims = BTreeSet::new();
        let mut silver_claims = BTreeSet::new();
        let mut mandatory_gold_claims = BTreeSet::new();
        for entry in outcome.all_matched() {
            let fresh = match entry.tier {
                MatchTier::Gold => gold_claims.insert(entry.key.clone()),
                MatchTier::Silver => silver_claims.insert(entry.key.clone()),
            };
            prop_assert!(fresh, "{} claimed twice", entry.key);
        }
        for entry in &outcome.mandatory_matched {
            if entry.tier == MatchTier::Gold {
                mandatory_gold_claims.insert(entry.key.clone());
            }
        }

        prop_assert!(gold_claims.is_disjoint(&outcome.remaining_gold_full));
        let restored: BTreeSet<String> =
            gold_claims.union(&outcome.remaining_gold_full).cloned().collect();
        prop_assert_eq!(&restored, &gold);

        let expected_mandatory: BTreeSet<String> =
            gold.difference(&mandatory_gold_claims).cloned().collect();
        prop_assert_eq!(&outcome.remaining_gold_mandatory, &expected_mandatory);
    }
}
