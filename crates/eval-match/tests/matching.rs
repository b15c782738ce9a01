use std::collections::BTreeSet;

use eval_match::{
    Evaluator, SynonymMap, compute_metrics, expand_synonym_mapping, match_associations,
    match_classes, normalize_word, remove_non_punished,
};
use eval_model::{
    DatasetKey, DatasetStandards, LabeledRound, MatchMethod, MatchTier, ModelId, NonPunishRule,
    PairKey, ReferenceSets, SynonymGroup, Term, TermPair,
};

fn term(raw: &str, optional: bool) -> Term {
    Term::new(raw, normalize_word(raw), optional)
}

fn classes(gold: &[&str], silver: &[&str]) -> ReferenceSets<String> {
    ReferenceSets {
        gold: gold.iter().map(|s| s.to_string()).collect(),
        silver: silver.iter().map(|s| s.to_string()).collect(),
    }
}

fn synonyms(pairs: &[(&str, &str)]) -> SynonymMap {
    let mut map = SynonymMap::new();
    for (synonym, standard) in pairs {
        map.insert(synonym.to_string(), standard.to_string());
    }
    map
}

#[test]
fn normalized_terms_match_exactly() {
    let terms = vec![term("feedback", false), term("complaints", false)];
    let outcome = match_classes(
        &terms,
        &classes(&["feedback", "complaint"], &[]),
        &SynonymMap::new(),
    );

    let matched: Vec<&str> = outcome
        .mandatory_matched
        .iter()
        .map(|e| e.item.raw.as_str())
        .collect();
    assert_eq!(matched, vec!["feedback", "complaints"]);
    assert!(outcome.remaining_gold_full.is_empty());
    assert!(outcome.remaining_gold_mandatory.is_empty());
    assert!(
        outcome
            .mandatory_matched
            .iter()
            .all(|e| e.method == MatchMethod::Exact)
    );
}

#[test]
fn synonym_pass_catches_what_exact_misses() {
    let terms = vec![term("worker", false)];
    let outcome = match_classes(
        &terms,
        &classes(&["camp worker"], &[]),
        &synonyms(&[("worker", "camp worker")]),
    );

    assert_eq!(outcome.mandatory_matched.len(), 1);
    let entry = &outcome.mandatory_matched[0];
    assert_eq!(entry.key, "camp worker");
    assert_eq!(entry.method, MatchMethod::Synonym);
    assert_eq!(entry.tier, MatchTier::Gold);
    assert!(outcome.mandatory_unmatched.is_empty());
}

#[test]
fn silver_matches_are_tagged_and_count_as_true_positives() {
    let terms = vec![term("cashier", false)];
    let outcome = match_classes(&terms, &classes(&[], &["cashier"]), &SynonymMap::new());

    let entry = &outcome.mandatory_matched[0];
    assert!(entry.is_silver());
    assert_eq!(entry.to_string(), "(sil)cashier");

    let matched: Vec<String> = outcome
        .mandatory_matched
        .iter()
        .map(ToString::to_string)
        .collect();
    let record = compute_metrics(
        &matched,
        &outcome.mandatory_unmatched,
        &outcome.remaining_gold_mandatory,
        0,
    );
    assert_eq!(record.tp, 1);
    assert_eq!(record.precision, 1.0);
}

#[test]
fn slash_variants_prefer_gold_over_silver() {
    let terms = vec![Term::normalized("a/b", false)];
    let outcome = match_classes(&terms, &classes(&["b"], &["a"]), &SynonymMap::new());

    let entry = &outcome.mandatory_matched[0];
    assert_eq!(entry.key, "b");
    assert_eq!(entry.tier, MatchTier::Gold);
    assert_eq!(entry.method, MatchMethod::Exact);
    assert!(outcome.remaining_gold_full.is_empty());
}

#[test]
fn synonym_rewrites_prefer_gold_over_silver() {
    let terms = vec![Term::normalized("xy", false)];
    let outcome = match_classes(
        &terms,
        &classes(&["xb"], &["ay"]),
        &synonyms(&[("x", "a"), ("y", "b")]),
    );

    let entry = &outcome.mandatory_matched[0];
    assert_eq!(entry.key, "xb");
    assert_eq!(entry.tier, MatchTier::Gold);
    assert_eq!(entry.method, MatchMethod::Synonym);
    assert!(outcome.remaining_gold_full.is_empty());
    assert!(outcome.remaining_gold_mandatory.is_empty());
}

#[test]
fn non_punishment_prunes_children_of_matched_parents() {
    let rules = vec![NonPunishRule::new("form", ["medical form"])];
    let mut log = Vec::new();
    let kept = remove_non_punished(
        &["medical form".to_string(), "teacher".to_string()],
        &["form".to_string()],
        &rules,
        &mut log,
    );

    assert_eq!(kept, vec!["teacher".to_string()]);
    assert_eq!(
        log,
        vec![
            "Non-punish: 'medical form' removed because its parent 'form' was matched."
                .to_string()
        ]
    );
}

#[test]
fn metrics_from_five_two_one() {
    let gold = BTreeSet::from(["missing"]);
    let record = compute_metrics(&[0; 5], &[0; 2], &gold, 0);

    assert_eq!((record.tp, record.fp, record.fn_), (5, 2, 1));
    assert!((record.precision - 5.0 / 7.0).abs() < 1e-9);
    assert!((record.recall - 5.0 / 6.0).abs() < 1e-9);
    assert!((record.f1 - 0.769).abs() < 1e-3);
}

#[test]
fn expansion_is_idempotent() {
    let groups = vec![
        SynonymGroup::new("camp worker", ["worker", "counselors"]),
        SynonymGroup::new("activity", ["events", "worker"]),
    ];
    assert_eq!(
        expand_synonym_mapping(&groups),
        expand_synonym_mapping(&groups)
    );
}

#[test]
fn associations_match_in_either_orientation() {
    let reference = ReferenceSets {
        gold: BTreeSet::from([PairKey::new("camper", "activity")]),
        silver: BTreeSet::new(),
    };
    let pairs = vec![TermPair::new("activity", "camper", false)];
    let outcome = match_associations(&pairs, &reference, &SynonymMap::new());

    assert_eq!(outcome.mandatory_matched.len(), 1);
    assert!(outcome.remaining_gold_full.is_empty());
}

#[test]
fn association_synonyms_cross_both_endpoints() {
    let reference = ReferenceSets {
        gold: BTreeSet::from([PairKey::new("camper", "activity")]),
        silver: BTreeSet::from([PairKey::new("kid", "event")]),
    };
    let pairs = vec![
        TermPair::new("kid", "event", false),
        TermPair::new("child", "event", true),
    ];
    let outcome = match_associations(
        &pairs,
        &reference,
        &synonyms(&[("kid", "camper"), ("child", "camper"), ("event", "activity")]),
    );

    assert_eq!(outcome.mandatory_matched.len(), 1);
    assert!(outcome.mandatory_matched[0].is_silver());
    let optional = &outcome.optional_matched[0];
    assert_eq!(optional.key, PairKey::new("activity", "camper"));
    assert_eq!(optional.tier, MatchTier::Gold);
    assert!(outcome.remaining_gold_full.is_empty());
    assert_eq!(outcome.remaining_gold_mandatory.len(), 1);
}

#[test]
fn match_log_lists_decisions_then_partitions() {
    let terms = vec![
        term("worker", false),
        term("cashier", true),
        term("parent", false),
        term("video", true),
    ];
    let outcome = match_classes(
        &terms,
        &classes(&["camp worker", "parent", "room"], &["cashier"]),
        &synonyms(&[("worker", "camp worker")]),
    );

    insta::assert_snapshot!(outcome.log_text(), @r"
    [Silver exact] (Opt) cashier
    [Gold synonym] worker → camp worker
    [Matched] parent
    [Matched] worker
    [Matched] (Opt) (sil)cashier
    [Unmatched] (Opt) video
    ");
}

fn camperplus() -> DatasetStandards {
    let mut standards = DatasetStandards::empty(DatasetKey::new("camperplus"));
    standards.classes = classes(&["camper", "form", "activity", "camp worker"], &["cabin"]);
    standards.synonyms = vec![SynonymGroup::new("camp worker", ["worker"])];
    standards.non_punish = vec![NonPunishRule::new("form", ["medical form", "consent form"])];
    standards
}

#[test]
fn evaluator_applies_exemptions_to_both_views() {
    let standards = camperplus();
    let evaluator = Evaluator::new(&standards);
    let round = evaluator.evaluate_class_round(
        0,
        "round1",
        &[
            term("Campers", false),
            term("Forms", true),
            term("Workers", false),
            term("Medical Forms", false),
            term("Teachers", true),
        ],
    );

    assert_eq!(round.round, 1);
    assert_eq!(round.false_positives, vec!["teacher".to_string()]);

    // Mandatory view: "form" was matched only optionally, so the rule is inactive.
    assert_eq!(round.mandatory.tp, 2);
    assert_eq!(round.mandatory.fp, 1);
    assert_eq!(round.mandatory.fn_, 2);

    assert_eq!(round.including_optional.tp, 3);
    assert_eq!(round.including_optional.fp, 1);
    assert_eq!(round.including_optional.fn_, 1);

    assert!(round.log.iter().any(|l| l.starts_with("Non-punish: 'medical form'")));
    assert_eq!(round.log.last().map(String::as_str), Some("[Missing] activity"));
}

#[test]
fn evaluator_rounds_do_not_share_state() {
    let standards = camperplus();
    let evaluator = Evaluator::new(&standards);
    let rounds = vec![
        LabeledRound::new("round1", vec![term("camper", false)]),
        LabeledRound::new("round2", vec![term("camper", false)]),
    ];
    let evaluation = evaluator.evaluate_classes(ModelId::Llama3_8b, &rounds);

    assert_eq!(evaluation.rounds.len(), 2);
    for (index, round) in evaluation.rounds.iter().enumerate() {
        assert_eq!(round.round, index + 1);
        assert_eq!(round.including_optional.tp, 1);
        assert_eq!(round.including_optional.fn_, 3);
    }
    assert_eq!(standards.classes.gold.len(), 4);
}
