use std::fmt;

use serde::{Deserialize, Serialize};

/// Which candidates a metrics record counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricsView {
    /// Mandatory candidates against gold items not consumed by mandatory candidates.
    Mandatory,
    /// Mandatory and optional candidates against the full gold set.
    IncludingOptional,
}

impl MetricsView {
    pub const ALL: [MetricsView; 2] = [MetricsView::Mandatory, MetricsView::IncludingOptional];

    pub fn label(&self) -> &'static str {
        match self {
            MetricsView::Mandatory => "mandatory",
            MetricsView::IncludingOptional => "including optional",
        }
    }

    /// File-name friendly form of the label.
    pub fn slug(&self) -> &'static str {
        match self {
            MetricsView::Mandatory => "mandatory",
            MetricsView::IncludingOptional => "including_optional",
        }
    }
}

impl fmt::Display for MetricsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-round scores. Values are kept at full precision; reports round them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    /// 1-based round number.
    #[serde(rename = "Round")]
    pub round: usize,
    #[serde(rename = "Total Identified")]
    pub total_identified: usize,
    #[serde(rename = "TP")]
    pub tp: usize,
    #[serde(rename = "FP")]
    pub fp: usize,
    #[serde(rename = "FN")]
    pub fn_: usize,
    #[serde(rename = "Precision")]
    pub precision: f64,
    #[serde(rename = "Recall")]
    pub recall: f64,
    #[serde(rename = "F-0.5")]
    pub f_half: f64,
    #[serde(rename = "F-1")]
    pub f1: f64,
    #[serde(rename = "F-2")]
    pub f2: f64,
}

impl MetricsRecord {
    /// Report column names of [`MetricsRecord::values`], in order.
    pub const COLUMNS: [&'static str; 9] = [
        "Total Identified",
        "TP",
        "FP",
        "FN",
        "Precision",
        "Recall",
        "F-0.5",
        "F-1",
        "F-2",
    ];

    /// Named metric values in report column order (everything except `Round`).
    pub fn values(&self) -> [(&'static str, f64); 9] {
        [
            ("Total Identified", self.total_identified as f64),
            ("TP", self.tp as f64),
            ("FP", self.fp as f64),
            ("FN", self.fn_ as f64),
            ("Precision", self.precision),
            ("Recall", self.recall),
            ("F-0.5", self.f_half),
            ("F-1", self.f1),
            ("F-2", self.f2),
        ]
    }
}
