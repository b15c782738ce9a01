#![deny(unsafe_code)]

//! Evaluation reports: per-run files and cross-model comparison tables.

pub mod aggregate;
pub mod compare;
pub mod outputs;
pub mod summary;
pub mod tables;

pub use aggregate::{ColumnStats, mean, round3, sample_std_dev, summarize};
pub use compare::{
    ComparisonColumn, ComparisonTable, FalsePositiveTable, build_comparison,
    build_false_positive_tables, load_summaries, render_comparison_csv,
    render_false_positive_table_csv, write_comparison,
};
pub use outputs::{results_file_name, run_dir, write_run_outputs};
pub use summary::{FalsePositive, RunSummary, ViewSummary, read_summary, write_summary};
pub use tables::{render_experiment_log, render_false_positives_csv, render_results_csv};
