//! Precision, recall and F-measures from match counts.

use std::collections::BTreeSet;

use eval_model::MetricsRecord;

/// Weighted harmonic mean of precision and recall; 0 when both are 0.
pub fn f_measure(precision: f64, recall: f64, beta: f64) -> f64 {
    if precision + recall == 0.0 {
        return 0.0;
    }
    let beta2 = beta * beta;
    let denominator = beta2 * precision + recall;
    if denominator == 0.0 {
        return 0.0;
    }
    (1.0 + beta2) * precision * recall / denominator
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Builds a record from TP/FP/FN counts. `round_index` is 0-based.
pub fn metrics_from_counts(round_index: usize, tp: usize, fp: usize, fn_: usize) -> MetricsRecord {
    let precision = ratio(tp, tp + fp);
    let recall = ratio(tp, tp + fn_);
    MetricsRecord {
        round: round_index + 1,
        total_identified: tp + fp,
        tp,
        fp,
        fn_,
        precision,
        recall,
        f_half: f_measure(precision, recall, 0.5),
        f1: f_measure(precision, recall, 1.0),
        f2: f_measure(precision, recall, 2.0),
    }
}

/// TP is the number of matched items, FP the unmatched ones, FN the gold
/// items nobody claimed.
pub fn compute_metrics<M, U, K>(
    matched: &[M],
    unmatched: &[U],
    remaining_gold: &BTreeSet<K>,
    round_index: usize,
) -> MetricsRecord {
    metrics_from_counts(
        round_index,
        matched.len(),
        unmatched.len(),
        remaining_gold.len(),
    )
}
