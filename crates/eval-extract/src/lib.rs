#![deny(unsafe_code)]

//! Transcript extraction: find the final list a model produced and turn it
//! into class names or association pairs.

pub mod associations;
mod clean;
pub mod classes;
pub mod error;
pub mod locate;

use std::path::Path;

use eval_model::{ExperimentKind, ModelId};

pub use crate::associations::{AssociationLine, parse_association_lines};
pub use crate::classes::{ClassLines, OPTIONAL_MARKER, parse_class_lines};
pub use crate::error::{ExtractError, Result};
pub use crate::locate::{locate_association_section, locate_class_section};

pub fn read_transcript(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Locates and parses the final class list of a transcript.
pub fn extract_classes(model: ModelId, transcript: &str) -> Result<ClassLines> {
    let section =
        locate_class_section(model, transcript).ok_or(ExtractError::SectionNotFound {
            model,
            kind: ExperimentKind::Class,
        })?;
    Ok(parse_class_lines(section))
}

/// Locates and parses the final association list of a transcript.
pub fn extract_associations(model: ModelId, transcript: &str) -> Result<Vec<AssociationLine>> {
    let section =
        locate_association_section(model, transcript).ok_or(ExtractError::SectionNotFound {
            model,
            kind: ExperimentKind::Association,
        })?;
    Ok(parse_association_lines(model, section))
}
