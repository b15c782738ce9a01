//! Per-column averages and spread over rounds.

use serde::{Deserialize, Serialize};

use eval_model::MetricsRecord;

/// Mean and sample standard deviation of one metric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    pub column: String,
    pub mean: Option<f64>,
    /// `None` with fewer than two values.
    pub std_dev: Option<f64>,
}

/// Rounds to three decimals for reporting.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator).
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let avg = mean(values)?;
    let squares: f64 = values.iter().map(|v| (v - avg).powi(2)).sum();
    Some((squares / (values.len() - 1) as f64).sqrt())
}

/// Stats for every metric column, in report column order.
pub fn summarize(records: &[MetricsRecord]) -> Vec<ColumnStats> {
    let columns: Vec<[(&'static str, f64); 9]> = records.iter().map(MetricsRecord::values).collect();
    (0..9)
        .map(|idx| {
            let values: Vec<f64> = columns.iter().map(|row| row[idx].1).collect();
            ColumnStats {
                column: MetricsRecord::COLUMNS[idx].to_string(),
                mean: mean(&values),
                std_dev: sample_std_dev(&values),
            }
        })
        .collect()
}

/// Looks up a column by its report name.
pub fn column<'a>(stats: &'a [ColumnStats], name: &str) -> Option<&'a ColumnStats> {
    stats.iter().find(|s| s.column == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn std_dev_uses_sample_denominator() {
        let spread = sample_std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((spread - 2.138).abs() < 1e-3);
        assert_eq!(sample_std_dev(&[1.0]), None);
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn rounding_keeps_three_decimals() {
        assert_eq!(round3(5.0 / 7.0), 0.714);
        assert_eq!(round3(0.0), 0.0);
    }
}
