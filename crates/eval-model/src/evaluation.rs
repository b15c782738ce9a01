//! Evaluated rounds and their per-dataset collection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::{DatasetKey, ExperimentKind, ModelId};
use crate::metrics::{MetricsRecord, MetricsView};

/// Candidates of one round as handed to the evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledRound<T> {
    pub label: String,
    pub items: Vec<T>,
}

impl<T> LabeledRound<T> {
    pub fn new(label: impl Into<String>, items: Vec<T>) -> Self {
        Self {
            label: label.into(),
            items,
        }
    }
}

/// Scores and decisions for a single round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundEvaluation {
    /// 1-based round number.
    pub round: usize,
    /// Source label of the round (usually the round file stem).
    pub label: String,
    pub mandatory: MetricsRecord,
    pub including_optional: MetricsRecord,
    /// Unmatched candidates of the full view after exemptions.
    pub false_positives: Vec<String>,
    pub log: Vec<String>,
}

impl RoundEvaluation {
    pub fn record(&self, view: MetricsView) -> &MetricsRecord {
        match view {
            MetricsView::Mandatory => &self.mandatory,
            MetricsView::IncludingOptional => &self.including_optional,
        }
    }
}

/// All rounds of one model on one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetEvaluation {
    pub model: ModelId,
    pub dataset: DatasetKey,
    pub kind: ExperimentKind,
    pub rounds: Vec<RoundEvaluation>,
}

impl DatasetEvaluation {
    pub fn new(model: ModelId, dataset: DatasetKey, kind: ExperimentKind) -> Self {
        Self {
            model,
            dataset,
            kind,
            rounds: Vec::new(),
        }
    }

    pub fn records(&self, view: MetricsView) -> Vec<MetricsRecord> {
        self.rounds.iter().map(|r| *r.record(view)).collect()
    }

    /// False positives flattened across rounds, counted, most frequent first.
    ///
    /// Ties are ordered by item text so output is stable.
    pub fn false_positive_counts(&self) -> Vec<(String, usize)> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for round in &self.rounds {
            for item in &round.false_positives {
                *counts.entry(item.as_str()).or_insert(0) += 1;
            }
        }
        let mut ordered: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(item, count)| (item.to_string(), count))
            .collect();
        ordered.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ordered
    }
}
