use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info_span;

use eval_cli::pipeline::{
    EvaluateRequest, EvaluationRun, ExtractionResult, evaluate_rounds, extract_rounds,
    load_registry,
};
use eval_model::{DatasetKey, ExperimentKind};
use eval_report::write_comparison;
use eval_standards::StandardsRegistry;

use crate::cli::{CompareArgs, DatasetsArgs, EvaluateArgs, ExtractArgs};

pub fn run_extract(args: &ExtractArgs) -> Result<ExtractionResult> {
    extract_rounds(args.kind.into(), args.model.into(), &args.input, &args.output)
        .with_context(|| format!("extract {}", args.input.display()))
}

pub fn run_evaluate(args: &EvaluateArgs) -> Result<EvaluationRun> {
    let registry = load_registry(args.standards_dir.as_deref())?;
    let dataset = DatasetKey::new(&args.dataset);
    let _span = info_span!("dataset", dataset = %dataset).entered();
    let request = EvaluateRequest {
        kind: args.kind.into(),
        model: args.model.into(),
        dataset,
        input: &args.input,
        output_root: (!args.dry_run).then_some(args.output.as_path()),
    };
    evaluate_rounds(&registry, &request)
}

pub fn run_compare(args: &CompareArgs) -> Result<(ExperimentKind, Vec<PathBuf>)> {
    let kind = ExperimentKind::from(args.kind);
    let files = write_comparison(&args.output_root, kind)
        .with_context(|| format!("compare runs under {}", args.output_root.display()))?;
    Ok((kind, files))
}

pub fn run_datasets(args: &DatasetsArgs) -> Result<StandardsRegistry> {
    load_registry(args.standards_dir.as_deref())
}
