//! Extracted round files.
//!
//! Class rounds are a single `class` column; association rounds are `x,y`.
//! Optional entries carry a leading `(optional)` marker (on `x` for
//! associations).

use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use serde::Serialize;
use tracing::debug;

use eval_extract::{AssociationLine, ClassLines, OPTIONAL_MARKER};

use crate::error::{IngestError, Result};

pub const CLASS_COLUMN: &str = "class";
pub const LEFT_COLUMN: &str = "x";
pub const RIGHT_COLUMN: &str = "y";

#[derive(Serialize)]
struct ClassRow<'a> {
    class: &'a str,
}

#[derive(Serialize)]
struct AssociationRow<'a> {
    x: &'a str,
    y: &'a str,
}

/// A raw association row before preparation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPair {
    pub left: String,
    pub right: String,
}

impl RawPair {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }
}

fn csv_error(path: &Path) -> impl Fn(csv::Error) -> IngestError + '_ {
    move |source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    }
}

fn create(path: &Path) -> Result<csv::Writer<File>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| IngestError::Create {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    WriterBuilder::new().from_path(path).map_err(csv_error(path))
}

fn write_rows<R: Serialize>(path: &Path, rows: impl IntoIterator<Item = R>) -> Result<()> {
    let mut writer = create(path)?;
    for row in rows {
        writer.serialize(row).map_err(csv_error(path))?;
    }
    writer.flush().map_err(|source| IngestError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes mandatory classes followed by `(optional)`-marked ones.
pub fn write_class_round(path: &Path, lines: &ClassLines) -> Result<()> {
    let entries = lines.combined();
    write_rows(path, entries.iter().map(|class| ClassRow { class }))?;
    debug!(path = %path.display(), rows = entries.len(), "wrote class round");
    Ok(())
}

pub fn write_association_round(path: &Path, pairs: &[AssociationLine]) -> Result<()> {
    let lefts: Vec<String> = pairs
        .iter()
        .map(|pair| {
            if pair.optional {
                format!("{OPTIONAL_MARKER} {}", pair.left)
            } else {
                pair.left.clone()
            }
        })
        .collect();
    write_rows(
        path,
        lefts.iter().zip(pairs).map(|(x, pair)| AssociationRow {
            x,
            y: &pair.right,
        }),
    )?;
    debug!(path = %path.display(), rows = pairs.len(), "wrote association round");
    Ok(())
}

fn read_records(path: &Path, columns: &[&str]) -> Result<(Vec<usize>, Vec<StringRecord>)> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error(path))?;
    let headers = reader.headers().map_err(csv_error(path))?.clone();
    let indices = columns
        .iter()
        .map(|column| {
            headers
                .iter()
                .position(|h| h.trim_matches('\u{feff}').eq_ignore_ascii_case(column))
                .ok_or_else(|| IngestError::MissingColumn {
                    column: (*column).to_string(),
                    path: path.to_path_buf(),
                })
        })
        .collect::<Result<Vec<_>>>()?;
    let records = reader
        .records()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(csv_error(path))?;
    Ok((indices, records))
}

/// Class column values; blank cells are skipped.
pub fn read_class_round(path: &Path) -> Result<Vec<String>> {
    let (indices, records) = read_records(path, &[CLASS_COLUMN])?;
    let classes: Vec<String> = records
        .iter()
        .filter_map(|record| record.get(indices[0]))
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect();
    debug!(path = %path.display(), rows = classes.len(), "read class round");
    Ok(classes)
}

/// `x,y` rows; rows missing either side are skipped.
pub fn read_association_round(path: &Path) -> Result<Vec<RawPair>> {
    let (indices, records) = read_records(path, &[LEFT_COLUMN, RIGHT_COLUMN])?;
    let pairs: Vec<RawPair> = records
        .iter()
        .filter_map(|record| {
            let left = record.get(indices[0]).filter(|v| !v.is_empty())?;
            let right = record.get(indices[1]).filter(|v| !v.is_empty())?;
            Some(RawPair::new(left, right))
        })
        .collect();
    debug!(path = %path.display(), rows = pairs.len(), "read association round");
    Ok(pairs)
}
