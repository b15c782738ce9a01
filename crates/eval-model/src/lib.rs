#![deny(unsafe_code)]

pub mod error;
pub mod evaluation;
pub mod ids;
pub mod metrics;
pub mod outcome;
pub mod reference;
pub mod term;

pub use error::{EvalError, Result};
pub use evaluation::{DatasetEvaluation, LabeledRound, RoundEvaluation};
pub use ids::{DatasetKey, ExperimentKind, ModelId};
pub use metrics::{MetricsRecord, MetricsView};
pub use outcome::{MatchMethod, MatchOutcome, MatchTier, MatchedEntry};
pub use reference::{DatasetStandards, NonPunishRule, ReferenceSets, SynonymGroup};
pub use term::{PairKey, Term, TermPair};
