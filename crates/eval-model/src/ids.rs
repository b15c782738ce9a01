//! Identifiers for evaluated models, experiment kinds and datasets.
//!
//! Model dispatch is driven by [`ModelId`] rather than free-form strings so
//! every per-model branch is matched exhaustively.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EvalError;

/// A language model whose transcripts are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ModelId {
    /// OpenAI o1, transcripts carry repeated `GPT-o1` headers.
    #[serde(rename = "gpt-o1")]
    GptO1,
    /// Llama 3 8B, transcripts use `Assistant :` turn markers.
    #[serde(rename = "llama3-8b")]
    Llama3_8b,
    /// Qwen 14B, transcripts use `Assistant :` turns and `<think>` blocks.
    #[serde(rename = "qwen-14b")]
    Qwen14b,
}

impl ModelId {
    /// Returns the lowercase identifier used on the command line and in paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelId::GptO1 => "gpt-o1",
            ModelId::Llama3_8b => "llama3-8b",
            ModelId::Qwen14b => "qwen-14b",
        }
    }

    /// Returns the human-readable name used in reports.
    pub fn display_name(&self) -> &'static str {
        match self {
            ModelId::GptO1 => "GPT-o1",
            ModelId::Llama3_8b => "Llama3-8B",
            ModelId::Qwen14b => "Qwen-14B",
        }
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ModelId {
    type Err = EvalError;

    /// Accepts the lowercase identifier or the display name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gpt-o1" => Ok(ModelId::GptO1),
            "llama3-8b" => Ok(ModelId::Llama3_8b),
            "qwen-14b" => Ok(ModelId::Qwen14b),
            _ => Err(EvalError::UnknownModel {
                name: s.to_string(),
            }),
        }
    }
}

/// Which extraction task is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperimentKind {
    Class,
    Association,
}

impl ExperimentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperimentKind::Class => "class",
            ExperimentKind::Association => "association",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExperimentKind::Class => "Class",
            ExperimentKind::Association => "Association",
        }
    }
}

impl fmt::Display for ExperimentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ExperimentKind {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "class" | "classes" => Ok(ExperimentKind::Class),
            "association" | "associations" => Ok(ExperimentKind::Association),
            _ => Err(EvalError::UnknownKind {
                name: s.to_string(),
            }),
        }
    }
}

/// Lowercased dataset identifier (e.g. `camperplus`, `fish&chips`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetKey(String);

impl DatasetKey {
    pub fn new(value: impl AsRef<str>) -> Self {
        Self(value.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DatasetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DatasetKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
