//! Per-run CSV tables.

use anyhow::{Result, anyhow};

use eval_model::{DatasetEvaluation, MetricsRecord};

use crate::aggregate::{round3, summarize};

pub const ROUND_COLUMN: &str = "Round";
pub const AVG_ROW: &str = "AVG";
pub const STD_DEV_ROW: &str = "STD-DEV";

pub(crate) fn format_value(value: f64) -> String {
    round3(value).to_string()
}

pub(crate) fn format_optional(value: Option<f64>) -> String {
    value.map(format_value).unwrap_or_default()
}

pub(crate) fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|err| anyhow!("flush csv buffer: {}", err.error()))?;
    Ok(String::from_utf8(bytes)?)
}

/// One row per round, then `AVG` and `STD-DEV` rows.
pub fn render_results_csv(records: &[MetricsRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    let mut header = vec![ROUND_COLUMN];
    header.extend(MetricsRecord::COLUMNS);
    writer.write_record(&header)?;

    for record in records {
        let mut row = vec![record.round.to_string()];
        row.extend(record.values().iter().map(|(_, value)| format_value(*value)));
        writer.write_record(&row)?;
    }

    if !records.is_empty() {
        let stats = summarize(records);
        let mut avg = vec![AVG_ROW.to_string()];
        avg.extend(stats.iter().map(|s| format_optional(s.mean)));
        writer.write_record(&avg)?;
        let mut spread = vec![STD_DEV_ROW.to_string()];
        spread.extend(stats.iter().map(|s| format_optional(s.std_dev)));
        writer.write_record(&spread)?;
    }
    finish(writer)
}

/// `item,count`, most frequent first.
pub fn render_false_positives_csv(evaluation: &DatasetEvaluation) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["item", "count"])?;
    for (item, count) in evaluation.false_positive_counts() {
        writer.write_record([item, count.to_string()])?;
    }
    finish(writer)
}

/// `=== Round n (label) ===` blocks with each round's decision log.
pub fn render_experiment_log(evaluation: &DatasetEvaluation) -> String {
    let mut out = String::new();
    for round in &evaluation.rounds {
        out.push_str(&format!("=== Round {} ({}) ===\n", round.round, round.label));
        for line in &round.log {
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');
    }
    out
}
