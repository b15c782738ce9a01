//! Output directory layout and the per-run file set.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;

use eval_model::{DatasetEvaluation, DatasetKey, ExperimentKind, MetricsView, ModelId};

use crate::summary::{RunSummary, SUMMARY_FILE, write_summary};
use crate::tables::{render_experiment_log, render_false_positives_csv, render_results_csv};

pub const EXPERIMENT_LOG_FILE: &str = "experiment_log.txt";
pub const FALSE_POSITIVES_FILE: &str = "false_positives.csv";

/// `results_mandatory.csv` or `results_including_optional.csv`.
pub fn results_file_name(view: MetricsView) -> String {
    format!("results_{}.csv", view.slug())
}

/// `<root>/<kind>/<model>/<dataset>`.
pub fn run_dir(root: &Path, kind: ExperimentKind, model: ModelId, dataset: &DatasetKey) -> PathBuf {
    root.join(kind.as_str())
        .join(model.as_str())
        .join(dataset.as_str())
}

fn write_file(path: PathBuf, contents: &str, outputs: &mut Vec<PathBuf>) -> Result<()> {
    std::fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
    outputs.push(path);
    Ok(())
}

/// Writes the log, both result tables, the false-positive table and the
/// summary into `dir`.
pub fn write_run_outputs(
    dir: &Path,
    evaluation: &DatasetEvaluation,
    standards_fingerprint: &str,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    let mut outputs = Vec::new();

    write_file(
        dir.join(EXPERIMENT_LOG_FILE),
        &render_experiment_log(evaluation),
        &mut outputs,
    )?;
    for view in MetricsView::ALL {
        let csv = render_results_csv(&evaluation.records(view))?;
        write_file(dir.join(results_file_name(view)), &csv, &mut outputs)?;
    }
    write_file(
        dir.join(FALSE_POSITIVES_FILE),
        &render_false_positives_csv(evaluation)?,
        &mut outputs,
    )?;

    let summary = RunSummary::new(evaluation, standards_fingerprint, Utc::now());
    let summary_path = dir.join(SUMMARY_FILE);
    write_summary(&summary_path, &summary)?;
    outputs.push(summary_path);

    info!(dir = %dir.display(), files = outputs.len(), "wrote run outputs");
    Ok(outputs)
}
