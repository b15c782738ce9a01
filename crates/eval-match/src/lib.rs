#![deny(unsafe_code)]

//! Matching and scoring of extracted classes and associations against
//! gold and silver reference sets.

pub mod engine;
pub mod evaluate;
pub mod exemption;
pub mod metrics;
pub mod normalize;
pub mod strategy;
pub mod synonym;

pub use engine::{match_associations, match_classes, perform_matching};
pub use evaluate::Evaluator;
pub use exemption::remove_non_punished;
pub use metrics::{compute_metrics, f_measure, metrics_from_counts};
pub use normalize::{normalize_optional, normalize_word};
pub use strategy::{AssociationStrategy, ClassStrategy, MatchStrategy};
pub use synonym::{SynonymMap, expand_synonym_mapping, generate_candidates};
