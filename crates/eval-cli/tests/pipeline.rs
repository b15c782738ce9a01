use std::fs;
use std::path::Path;

use eval_cli::pipeline::{EvaluateRequest, evaluate_rounds, extract_rounds, load_registry};
use eval_model::{DatasetKey, ExperimentKind, MetricsView, ModelId};
use eval_report::write_comparison;
use eval_standards::StandardsError;

const STANDARDS: &str = r#"
[class]
gold = ["campers", "guardians", "camp worker", "medical form"]
silver = ["cabin"]

[[class.synonyms]]
standard = "camp worker"
synonyms = ["worker", "staff"]

[association]
gold = [["camper", "guardian"]]
"#;

fn transcript(items: &str) -> String {
    format!(
        "Assistant : reading stories\nAssistant : candidates\n\
         Assistant : Here is the final list of classes:\n{items}"
    )
}

fn write(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create dir");
    }
    fs::write(path, contents).expect("write file");
}

#[test]
fn transcripts_are_extracted_then_scored() {
    let work = tempfile::tempdir().expect("temp dir");
    let standards = work.path().join("standards");
    write(&standards.join("camperplus.toml"), STANDARDS);

    let transcripts = work.path().join("transcripts");
    write(
        &transcripts.join("R1.txt"),
        &transcript("1. Campers\n2. Guardians\n3. Worker\n4. Tent\n\n5. Cabin (optional)\n"),
    );
    write(
        &transcripts.join("R2.txt"),
        &transcript("1. Campers\n2. Medical Forms\n"),
    );
    write(&transcripts.join("R3.txt"), "the model never answered");

    let rounds = work.path().join("rounds");
    let extraction = extract_rounds(ExperimentKind::Class, ModelId::Llama3_8b, &transcripts, &rounds)
        .expect("extract");
    assert_eq!(extraction.written.len(), 2);
    assert_eq!(extraction.written[0].entries, 5);
    assert_eq!(extraction.skipped, vec![3]);

    let registry = load_registry(Some(&standards)).expect("registry");
    let output = work.path().join("output");
    let run = evaluate_rounds(
        &registry,
        &EvaluateRequest {
            kind: ExperimentKind::Class,
            model: ModelId::Llama3_8b,
            dataset: DatasetKey::new("CamperPlus"),
            input: &rounds,
            output_root: Some(&output),
        },
    )
    .expect("evaluate");

    let mandatory = run.evaluation.records(MetricsView::Mandatory);
    assert_eq!(
        (mandatory[0].tp, mandatory[0].fp, mandatory[0].fn_),
        (3, 1, 1)
    );
    assert_eq!(
        (mandatory[1].tp, mandatory[1].fp, mandatory[1].fn_),
        (2, 0, 2)
    );
    let full = run.evaluation.records(MetricsView::IncludingOptional);
    assert_eq!((full[0].tp, full[0].fp, full[0].fn_), (4, 1, 1));
    assert_eq!(run.evaluation.rounds[0].false_positives, vec!["tent"]);
    assert_eq!(run.evaluation.rounds[0].label, "round1");

    let dir = run.output_dir.expect("output dir");
    assert!(dir.ends_with("class/llama3-8b/camperplus"));
    assert_eq!(run.files.len(), 5);
    let log = fs::read_to_string(dir.join("experiment_log.txt")).expect("log");
    assert!(log.starts_with("=== Round 1 (round1) ==="));
    assert!(log.contains("[Missing] medical form"));

    let compared = write_comparison(&output, ExperimentKind::Class).expect("compare");
    assert!(compared.iter().any(|p| p.ends_with("comparison_class.csv")));
}

#[test]
fn association_rounds_are_scored_without_writing_in_dry_run() {
    let work = tempfile::tempdir().expect("temp dir");
    let standards = work.path().join("standards");
    write(&standards.join("camperplus.toml"), STANDARDS);
    let rounds = work.path().join("rounds");
    write(
        &rounds.join("round1.csv"),
        "x,y\nGuardians,Campers\n(optional) Camper,Cabin\n",
    );

    let registry = load_registry(Some(&standards)).expect("registry");
    let run = evaluate_rounds(
        &registry,
        &EvaluateRequest {
            kind: ExperimentKind::Association,
            model: ModelId::GptO1,
            dataset: DatasetKey::new("camperplus"),
            input: &rounds,
            output_root: None,
        },
    )
    .expect("evaluate");

    let mandatory = run.evaluation.records(MetricsView::Mandatory);
    assert_eq!((mandatory[0].tp, mandatory[0].fp, mandatory[0].fn_), (1, 0, 0));
    let full = run.evaluation.records(MetricsView::IncludingOptional);
    assert_eq!((full[0].tp, full[0].fp), (1, 1));
    assert_eq!(run.evaluation.rounds[0].false_positives, vec!["cabin-camper"]);
    assert!(run.output_dir.is_none());
    assert!(run.files.is_empty());
}

#[test]
fn unknown_dataset_fails_before_reading_rounds() {
    let work = tempfile::tempdir().expect("temp dir");
    let standards = work.path().join("standards");
    write(&standards.join("camperplus.toml"), STANDARDS);
    let registry = load_registry(Some(&standards)).expect("registry");

    let missing = work.path().join("no-rounds-here");
    let err = evaluate_rounds(
        &registry,
        &EvaluateRequest {
            kind: ExperimentKind::Class,
            model: ModelId::Qwen14b,
            dataset: DatasetKey::new("bakery"),
            input: &missing,
            output_root: None,
        },
    )
    .expect_err("unknown dataset");
    assert!(matches!(
        err.downcast_ref::<StandardsError>(),
        Some(StandardsError::UnknownDataset { .. })
    ));
}

#[test]
fn extraction_needs_transcripts() {
    let work = tempfile::tempdir().expect("temp dir");
    let err = extract_rounds(
        ExperimentKind::Association,
        ModelId::GptO1,
        work.path(),
        &work.path().join("rounds"),
    )
    .expect_err("no transcripts");
    assert!(err.to_string().contains("no R<n>.txt transcripts"));
}
