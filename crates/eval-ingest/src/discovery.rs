//! Round file discovery.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{IngestError, Result};

/// A numbered round file such as `round3.csv` or `R3.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundFile {
    pub number: usize,
    pub path: PathBuf,
}

impl RoundFile {
    /// File stem, used as the round label in logs and reports.
    pub fn label(&self) -> String {
        self.path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default()
            .to_string()
    }
}

/// `<prefix><n>.<ext>` for round `n`.
pub fn round_file_name(prefix: &str, number: usize, ext: &str) -> String {
    format!("{prefix}{number}.{ext}")
}

fn round_number(path: &Path, prefix: &str, ext: &str) -> Option<usize> {
    let matches_ext = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext));
    if !matches_ext {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    let head = stem.get(..prefix.len())?;
    if !head.eq_ignore_ascii_case(prefix) {
        return None;
    }
    stem[prefix.len()..].parse().ok()
}

/// Lists the round files of `dir`, ordered by round number.
///
/// Files that do not follow `<prefix><n>.<ext>` are skipped.
pub fn discover_rounds(dir: &Path, prefix: &str, ext: &str) -> Result<Vec<RoundFile>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }
    let read_error = |source| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    };

    let mut rounds = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if !path.is_file() {
            continue;
        }
        match round_number(&path, prefix, ext) {
            Some(number) => rounds.push(RoundFile { number, path }),
            None => debug!(path = %path.display(), "skipping non-round file"),
        }
    }
    rounds.sort_by_key(|round| round.number);
    Ok(rounds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_numbers_need_prefix_and_extension() {
        assert_eq!(round_number(Path::new("R12.txt"), "R", "txt"), Some(12));
        assert_eq!(round_number(Path::new("round2.CSV"), "round", "csv"), Some(2));
        assert_eq!(round_number(Path::new("R1.csv"), "R", "txt"), None);
        assert_eq!(round_number(Path::new("notes.txt"), "R", "txt"), None);
        assert_eq!(round_number(Path::new("R.txt"), "R", "txt"), None);
    }
}
