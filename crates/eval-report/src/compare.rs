//! Cross-model comparison over stored run summaries.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use eval_model::{DatasetKey, ExperimentKind, MetricsView, ModelId};

use crate::aggregate::{mean, sample_std_dev};
use crate::summary::{RunSummary, SUMMARY_FILE, read_summary};
use crate::tables::{AVG_ROW, STD_DEV_ROW, finish, format_optional};

/// Metrics shown per (model, view) column group: averaged F-measures, then
/// the round-to-round spread of precision and recall.
pub const CELL_HEADERS: [&str; 5] = [
    "F-0.5",
    "F-1",
    "F-2",
    "Precision STD-DEV",
    "Recall STD-DEV",
];

pub type Cell = [Option<f64>; 5];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ComparisonColumn {
    pub model: ModelId,
    pub view: MetricsView,
}

impl ComparisonColumn {
    /// `GPT-o1` for the mandatory view, `GPT-o1(Opt)` for the full view.
    pub fn label(&self) -> String {
        match self.view {
            MetricsView::Mandatory => self.model.display_name().to_string(),
            MetricsView::IncludingOptional => format!("{}(Opt)", self.model.display_name()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub dataset: DatasetKey,
    /// Parallel to [`ComparisonTable::columns`]; `None` when the run is absent.
    pub cells: Vec<Option<Cell>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonTable {
    pub kind: ExperimentKind,
    pub columns: Vec<ComparisonColumn>,
    pub rows: Vec<ComparisonRow>,
}

fn cell(summary: &RunSummary, view: MetricsView) -> Option<Cell> {
    let view = summary.view(view)?;
    Some([
        view.mean("F-0.5"),
        view.mean("F-1"),
        view.mean("F-2"),
        view.std_dev("Precision"),
        view.std_dev("Recall"),
    ])
}

impl ComparisonTable {
    /// Between-dataset mean and sample standard deviation of every cell value.
    pub fn between_datasets(&self) -> (Vec<Cell>, Vec<Cell>) {
        let mut averages = Vec::with_capacity(self.columns.len());
        let mut spreads = Vec::with_capacity(self.columns.len());
        for idx in 0..self.columns.len() {
            let mut avg: Cell = [None; 5];
            let mut spread: Cell = [None; 5];
            for metric in 0..CELL_HEADERS.len() {
                let values: Vec<f64> = self
                    .rows
                    .iter()
                    .filter_map(|row| row.cells[idx].and_then(|c| c[metric]))
                    .collect();
                avg[metric] = mean(&values);
                spread[metric] = sample_std_dev(&values);
            }
            averages.push(avg);
            spreads.push(spread);
        }
        (averages, spreads)
    }
}

/// Keeps one summary of `kind` per (dataset, model), the most recent one.
fn latest_runs(
    kind: ExperimentKind,
    summaries: &[RunSummary],
) -> BTreeMap<(DatasetKey, ModelId), &RunSummary> {
    let mut runs: BTreeMap<(DatasetKey, ModelId), &RunSummary> = BTreeMap::new();
    for summary in summaries.iter().filter(|s| s.kind == kind) {
        let key = (summary.dataset.clone(), summary.model);
        let newer = runs
            .get(&key)
            .is_none_or(|existing| existing.generated_at < summary.generated_at);
        if newer {
            runs.insert(key, summary);
        } else {
            warn!(
                dataset = %summary.dataset,
                model = summary.model.as_str(),
                "ignoring older duplicate run summary"
            );
        }
    }
    runs
}

pub fn build_comparison(kind: ExperimentKind, summaries: &[RunSummary]) -> ComparisonTable {
    let runs = latest_runs(kind, summaries);

    let models: BTreeSet<ModelId> = runs.keys().map(|(_, model)| *model).collect();
    let columns: Vec<ComparisonColumn> = models
        .iter()
        .flat_map(|model| {
            MetricsView::ALL.iter().map(move |view| ComparisonColumn {
                model: *model,
                view: *view,
            })
        })
        .collect();
    let datasets: BTreeSet<&DatasetKey> = runs.keys().map(|(dataset, _)| dataset).collect();

    let rows = datasets
        .into_iter()
        .map(|dataset| ComparisonRow {
            dataset: dataset.clone(),
            cells: columns
                .iter()
                .map(|column| {
                    runs.get(&(dataset.clone(), column.model))
                        .and_then(|summary| cell(summary, column.view))
                })
                .collect(),
        })
        .collect();

    ComparisonTable {
        kind,
        columns,
        rows,
    }
}

fn push_cell(row: &mut Vec<String>, cell: Option<&Cell>) {
    match cell {
        Some(values) => row.extend(values.iter().map(|v| format_optional(*v))),
        None => row.extend(std::iter::repeat_n(String::new(), CELL_HEADERS.len())),
    }
}

pub fn render_comparison_csv(table: &ComparisonTable) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    let mut header = vec!["Dataset".to_string()];
    for column in &table.columns {
        let label = column.label();
        header.extend(CELL_HEADERS.iter().map(|metric| format!("{label} {metric}")));
    }
    writer.write_record(&header)?;

    for row in &table.rows {
        let mut record = vec![row.dataset.to_string()];
        for cell in &row.cells {
            push_cell(&mut record, cell.as_ref());
        }
        writer.write_record(&record)?;
    }

    if !table.rows.is_empty() {
        let (averages, spreads) = table.between_datasets();
        for (label, cells) in [(AVG_ROW, averages), (STD_DEV_ROW, spreads)] {
            let mut record = vec![label.to_string()];
            for cell in &cells {
                push_cell(&mut record, Some(cell));
            }
            writer.write_record(&record)?;
        }
    }
    finish(writer)
}

/// False positives of one dataset, counted per model and in total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FalsePositiveTable {
    pub dataset: DatasetKey,
    pub models: Vec<ModelId>,
    /// `(item, per-model counts, total)`, highest total first.
    pub rows: Vec<(String, Vec<usize>, usize)>,
}

pub fn build_false_positive_tables(
    kind: ExperimentKind,
    summaries: &[RunSummary],
) -> Vec<FalsePositiveTable> {
    let runs = latest_runs(kind, summaries);

    let mut by_dataset: BTreeMap<&DatasetKey, Vec<&RunSummary>> = BTreeMap::new();
    for ((dataset, _), summary) in &runs {
        by_dataset.entry(dataset).or_default().push(*summary);
    }

    by_dataset
        .into_iter()
        .map(|(dataset, runs)| {
            let models: Vec<ModelId> = runs.iter().map(|run| run.model).collect();
            let mut counts: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
            for (idx, run) in runs.iter().enumerate() {
                for fp in &run.false_positives {
                    counts
                        .entry(fp.item.as_str())
                        .or_insert_with(|| vec![0; runs.len()])[idx] += fp.count;
                }
            }
            let mut rows: Vec<(String, Vec<usize>, usize)> = counts
                .into_iter()
                .map(|(item, per_model)| {
                    let total = per_model.iter().sum();
                    (item.to_string(), per_model, total)
                })
                .collect();
            rows.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.cmp(&b.0)));
            FalsePositiveTable {
                dataset: dataset.clone(),
                models,
                rows,
            }
        })
        .collect()
}

pub fn render_false_positive_table_csv(table: &FalsePositiveTable) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    let mut header = vec!["item".to_string(), "total_count".to_string()];
    header.extend(table.models.iter().map(|m| format!("count_{}", m.as_str())));
    writer.write_record(&header)?;
    for (item, per_model, total) in &table.rows {
        let mut record = vec![item.clone(), total.to_string()];
        record.extend(per_model.iter().map(usize::to_string));
        writer.write_record(&record)?;
    }
    finish(writer)
}

fn collect_summary_files(dir: &Path, found: &mut Vec<PathBuf>) -> Result<()> {
    let entries = std::fs::read_dir(dir).with_context(|| format!("read {}", dir.display()))?;
    for entry in entries {
        let path = entry
            .with_context(|| format!("read {}", dir.display()))?
            .path();
        if path.is_dir() {
            collect_summary_files(&path, found)?;
        } else if path.file_name().is_some_and(|name| name == SUMMARY_FILE) {
            found.push(path);
        }
    }
    Ok(())
}

/// Every `summary.json` below `root` for the given kind.
pub fn load_summaries(root: &Path, kind: ExperimentKind) -> Result<Vec<RunSummary>> {
    let mut files = Vec::new();
    collect_summary_files(root, &mut files)?;
    files.sort();
    let mut summaries = Vec::new();
    for path in files {
        let summary = read_summary(&path)?;
        if summary.kind == kind {
            summaries.push(summary);
        }
    }
    Ok(summaries)
}

pub fn comparison_file_name(kind: ExperimentKind) -> String {
    format!("comparison_{}.csv", kind.as_str())
}

pub fn false_positive_file_name(kind: ExperimentKind, dataset: &DatasetKey) -> String {
    format!("false_positives_{}_{}.csv", kind.as_str(), dataset.as_str())
}

/// Builds and writes the comparison and per-dataset false-positive tables
/// into `root`.
pub fn write_comparison(root: &Path, kind: ExperimentKind) -> Result<Vec<PathBuf>> {
    let summaries = load_summaries(root, kind)?;
    if summaries.is_empty() {
        bail!("no {} run summaries found under {}", kind.as_str(), root.display());
    }

    let mut outputs = Vec::new();
    let table = build_comparison(kind, &summaries);
    let path = root.join(comparison_file_name(kind));
    std::fs::write(&path, render_comparison_csv(&table)?)
        .with_context(|| format!("write {}", path.display()))?;
    outputs.push(path);

    for fp_table in build_false_positive_tables(kind, &summaries) {
        let path = root.join(false_positive_file_name(kind, &fp_table.dataset));
        std::fs::write(&path, render_false_positive_table_csv(&fp_table)?)
            .with_context(|| format!("write {}", path.display()))?;
        outputs.push(path);
    }
    info!(
        kind = kind.as_str(),
        runs = summaries.len(),
        files = outputs.len(),
        "wrote comparison"
    );
    Ok(outputs)
}
