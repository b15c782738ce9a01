use std::path::PathBuf;

use eval_model::{ExperimentKind, ModelId};

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("failed to read transcript {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no final {} list found in {model} transcript", .kind.as_str())]
    SectionNotFound {
        model: ModelId,
        kind: ExperimentKind,
    },
}

pub type Result<T> = std::result::Result<T, ExtractError>;
