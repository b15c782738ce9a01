//! Machine-readable run summary (`summary.json`).

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use eval_model::{DatasetEvaluation, DatasetKey, ExperimentKind, MetricsRecord, MetricsView, ModelId};

use crate::aggregate::{ColumnStats, column, summarize};

pub const SUMMARY_FILE: &str = "summary.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSummary {
    pub view: MetricsView,
    pub records: Vec<MetricsRecord>,
    pub aggregates: Vec<ColumnStats>,
}

impl ViewSummary {
    pub fn new(view: MetricsView, records: Vec<MetricsRecord>) -> Self {
        let aggregates = summarize(&records);
        Self {
            view,
            records,
            aggregates,
        }
    }

    pub fn mean(&self, name: &str) -> Option<f64> {
        column(&self.aggregates, name).and_then(|s| s.mean)
    }

    pub fn std_dev(&self, name: &str) -> Option<f64> {
        column(&self.aggregates, name).and_then(|s| s.std_dev)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FalsePositive {
    pub item: String,
    pub count: usize,
}

/// Everything a later comparison needs from one model/dataset run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub model: ModelId,
    pub dataset: DatasetKey,
    pub kind: ExperimentKind,
    pub standards_fingerprint: String,
    pub generated_at: DateTime<Utc>,
    pub views: Vec<ViewSummary>,
    pub false_positives: Vec<FalsePositive>,
}

impl RunSummary {
    pub fn new(
        evaluation: &DatasetEvaluation,
        standards_fingerprint: &str,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            model: evaluation.model,
            dataset: evaluation.dataset.clone(),
            kind: evaluation.kind,
            standards_fingerprint: standards_fingerprint.to_string(),
            generated_at,
            views: MetricsView::ALL
                .iter()
                .map(|view| ViewSummary::new(*view, evaluation.records(*view)))
                .collect(),
            false_positives: evaluation
                .false_positive_counts()
                .into_iter()
                .map(|(item, count)| FalsePositive { item, count })
                .collect(),
        }
    }

    pub fn view(&self, view: MetricsView) -> Option<&ViewSummary> {
        self.views.iter().find(|v| v.view == view)
    }
}

pub fn write_summary(path: &Path, summary: &RunSummary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary).context("serialize run summary")?;
    std::fs::write(path, json).with_context(|| format!("write {}", path.display()))
}

pub fn read_summary(path: &Path) -> Result<RunSummary> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))
}
