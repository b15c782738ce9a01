use eval_model::{
    DatasetEvaluation, DatasetKey, ExperimentKind, MatchMethod, MatchTier, MatchedEntry,
    MetricsRecord, ModelId, RoundEvaluation, Term,
};

fn record(round: usize) -> MetricsRecord {
    MetricsRecord {
        round,
        total_identified: 3,
        tp: 2,
        fp: 1,
        fn_: 0,
        precision: 2.0 / 3.0,
        recall: 1.0,
        f_half: 0.714,
        f1: 0.8,
        f2: 0.909,
    }
}

fn round(index: usize, false_positives: &[&str]) -> RoundEvaluation {
    RoundEvaluation {
        round: index,
        label: format!("round{index}"),
        mandatory: record(index),
        including_optional: record(index),
        false_positives: false_positives.iter().map(|s| s.to_string()).collect(),
        log: Vec::new(),
    }
}

#[test]
fn metrics_record_serializes_with_report_column_names() {
    let json = serde_json::to_value(record(1)).expect("serialize record");
    assert_eq!(json["Round"], 1);
    assert_eq!(json["Total Identified"], 3);
    assert_eq!(json["FN"], 0);
    assert!(json.get("F-0.5").is_some());
}

#[test]
fn false_positive_counts_are_sorted_by_frequency_then_text() {
    let mut evaluation = DatasetEvaluation::new(
        ModelId::GptO1,
        DatasetKey::new("school"),
        ExperimentKind::Class,
    );
    evaluation.rounds.push(round(1, &["video", "teacher"]));
    evaluation.rounds.push(round(2, &["teacher", "room"]));
    evaluation.rounds.push(round(3, &["teacher", "video"]));

    let counts = evaluation.false_positive_counts();
    assert_eq!(
        counts,
        vec![
            ("teacher".to_string(), 3),
            ("video".to_string(), 2),
            ("room".to_string(), 1),
        ]
    );
}

#[test]
fn silver_entries_render_with_marker() {
    let entry = MatchedEntry {
        item: Term::normalized("cashier", false),
        key: "cashier".to_string(),
        tier: MatchTier::Silver,
        method: MatchMethod::Exact,
    };
    assert!(entry.is_silver());
    assert_eq!(entry.to_string(), "(sil)cashier");
}

#[test]
fn dataset_evaluation_round_trips_through_json() {
    let mut evaluation = DatasetEvaluation::new(
        ModelId::Qwen14b,
        DatasetKey::new("ticket"),
        ExperimentKind::Association,
    );
    evaluation.rounds.push(round(1, &["order-seat"]));
    let json = serde_json::to_string(&evaluation).expect("serialize");
    assert!(json.contains("\"qwen-14b\""));
    let back: DatasetEvaluation = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, evaluation);
}

#[test]
fn metric_values_follow_column_order() {
    let names: Vec<&str> = record(1).values().iter().map(|(name, _)| *name).collect();
    assert_eq!(names, MetricsRecord::COLUMNS);
}
