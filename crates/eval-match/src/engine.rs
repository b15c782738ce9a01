//! Two-phase matching: exact keys first, synonym rewrites for what is left.

use std::collections::BTreeSet;

use tracing::debug;

use eval_model::{
    MatchMethod, MatchOutcome, MatchTier, MatchedEntry, PairKey, ReferenceSets, Term, TermPair,
};

use crate::strategy::{AssociationStrategy, ClassStrategy, MatchStrategy};
use crate::synonym::SynonymMap;

/// Per-run copies of the reference tiers, shrunk as candidates claim items.
///
/// `gold_full` only ever loses keys that `gold_mandatory` also lost or that an
/// optional candidate claimed, so it is always a subset of `gold_mandatory`.
struct WorkingSets<K: Ord> {
    gold_full: BTreeSet<K>,
    gold_mandatory: BTreeSet<K>,
    silver: BTreeSet<K>,
}

impl<K: Ord + Clone> WorkingSets<K> {
    fn new(gold: &BTreeSet<K>, silver: &BTreeSet<K>) -> Self {
        Self {
            gold_full: gold.clone(),
            gold_mandatory: gold.clone(),
            silver: silver.clone(),
        }
    }

    fn claim(&mut self, group: &[K], optional: bool) -> Option<(K, MatchTier)> {
        if let Some(key) = group.iter().find(|k| self.gold_full.contains(*k)).cloned() {
            self.gold_full.remove(&key);
            if !optional {
                self.gold_mandatory.remove(&key);
            }
            return Some((key, MatchTier::Gold));
        }
        let key = group.iter().find(|k| self.silver.contains(*k)).cloned()?;
        self.silver.remove(&key);
        Some((key, MatchTier::Silver))
    }
}

fn opt_tag(optional: bool) -> &'static str {
    if optional { "(Opt) " } else { "" }
}

/// Matches `items` against gold then silver, exactly first and through
/// synonym rewrites second.
///
/// Earlier items claim reference keys before later ones, and a claimed key is
/// never reassigned. The reference sets passed in are not modified.
pub fn perform_matching<S: MatchStrategy>(
    items: &[S::Item],
    gold: &BTreeSet<S::Key>,
    silver: &BTreeSet<S::Key>,
    synonyms: &SynonymMap,
    strategy: &S,
) -> MatchOutcome<S::Item, S::Key> {
    let mut sets = WorkingSets::new(gold, silver);
    let mut mandatory_matched = Vec::new();
    let mut optional_matched = Vec::new();
    let mut mandatory_unmatched = Vec::new();
    let mut optional_unmatched = Vec::new();
    let mut log = Vec::new();

    let mut deferred = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let optional = strategy.is_optional(item);
        let claimed = strategy
            .exact_groups(item)
            .iter()
            .find_map(|group| sets.claim(group, optional));
        let Some((key, tier)) = claimed else {
            deferred.push(index);
            continue;
        };
        debug!(item = %item, key = %key, ?tier, "exact match");
        if tier == MatchTier::Silver {
            log.push(format!("[Silver exact] {}{item}", opt_tag(optional)));
        }
        let entry = MatchedEntry {
            item: item.clone(),
            key,
            tier,
            method: MatchMethod::Exact,
        };
        if optional {
            optional_matched.push(entry);
        } else {
            mandatory_matched.push(entry);
        }
    }

    for index in deferred {
        let item = &items[index];
        let optional = strategy.is_optional(item);
        let claimed = strategy
            .synonym_groups(item, synonyms)
            .iter()
            .find_map(|group| sets.claim(group, optional));
        let Some((key, tier)) = claimed else {
            debug!(item = %item, "no match");
            if optional {
                optional_unmatched.push(item.clone());
            } else {
                mandatory_unmatched.push(item.clone());
            }
            continue;
        };
        debug!(item = %item, key = %key, ?tier, "synonym match");
        let label = match tier {
            MatchTier::Gold => "[Gold synonym]",
            MatchTier::Silver => "[Silver synonym]",
        };
        log.push(format!("{label} {}{item} → {key}", opt_tag(optional)));
        let entry = MatchedEntry {
            item: item.clone(),
            key,
            tier,
            method: MatchMethod::Synonym,
        };
        if optional {
            optional_matched.push(entry);
        } else {
            mandatory_matched.push(entry);
        }
    }

    log.extend(mandatory_matched.iter().map(|e| format!("[Matched] {e}")));
    log.extend(optional_matched.iter().map(|e| format!("[Matched] (Opt) {e}")));
    log.extend(mandatory_unmatched.iter().map(|i| format!("[Unmatched] {i}")));
    log.extend(optional_unmatched.iter().map(|i| format!("[Unmatched] (Opt) {i}")));

    MatchOutcome {
        mandatory_matched,
        optional_matched,
        mandatory_unmatched,
        optional_unmatched,
        remaining_gold_mandatory: sets.gold_mandatory,
        remaining_gold_full: sets.gold_full,
        log,
    }
}

/// Class matching over normalized terms.
pub fn match_classes(
    terms: &[Term],
    reference: &ReferenceSets<String>,
    synonyms: &SynonymMap,
) -> MatchOutcome<Term, String> {
    perform_matching(
        terms,
        &reference.gold,
        &reference.silver,
        synonyms,
        &ClassStrategy,
    )
}

/// Association matching over normalized unordered pairs.
pub fn match_associations(
    pairs: &[TermPair],
    reference: &ReferenceSets<PairKey>,
    synonyms: &SynonymMap,
) -> MatchOutcome<TermPair, PairKey> {
    perform_matching(
        pairs,
        &reference.gold,
        &reference.silver,
        synonyms,
        &AssociationStrategy,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gold(keys: &[&str]) -> ReferenceSets<String> {
        ReferenceSets {
            gold: keys.iter().map(|k| k.to_string()).collect(),
            silver: BTreeSet::new(),
        }
    }

    #[test]
    fn optional_claims_leave_mandatory_view_intact() {
        let terms = vec![Term::normalized("camper", true)];
        let outcome = match_classes(&terms, &gold(&["camper"]), &SynonymMap::new());
        assert_eq!(outcome.optional_matched.len(), 1);
        assert!(outcome.remaining_gold_full.is_empty());
        assert!(outcome.remaining_gold_mandatory.contains("camper"));
    }

    #[test]
    fn first_candidate_claims_the_key() {
        let terms = vec![
            Term::normalized("camper", false),
            Term::normalized("camper", false),
        ];
        let outcome = match_classes(&terms, &gold(&["camper"]), &SynonymMap::new());
        assert_eq!(outcome.mandatory_matched.len(), 1);
        assert_eq!(outcome.mandatory_unmatched.len(), 1);
    }

    #[test]
    fn any_slash_variant_may_match() {
        let terms = vec![Term::normalized("guardian/parent", false)];
        let outcome = match_classes(&terms, &gold(&["parent"]), &SynonymMap::new());
        assert_eq!(outcome.mandatory_matched[0].key, "parent");
        assert_eq!(outcome.log, vec!["[Matched] guardian/parent".to_string()]);
    }
}
