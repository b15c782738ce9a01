use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StandardsError {
    #[error("standards directory not found: {path}")]
    MissingDirectory { path: PathBuf },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML standards file {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid association #{index} in {path}: expected 2 terms, found {found}")]
    InvalidPair {
        path: PathBuf,
        index: usize,
        found: usize,
    },

    #[error("unknown dataset '{key}' (available: {available})")]
    UnknownDataset { key: String, available: String },
}

impl StandardsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, StandardsError>;
