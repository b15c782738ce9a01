use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use eval_model::{DatasetKey, DatasetStandards};

use crate::error::{Result, StandardsError};
use crate::file::parse_standards_file;
use crate::hash::{fingerprint, sha256_hex};

const STANDARDS_ENV_VAR: &str = "STORY_EVAL_STANDARDS_DIR";
const STANDARDS_EXTENSION: &str = "toml";

/// Standards root: `STORY_EVAL_STANDARDS_DIR` if set, else `standards/` at the
/// workspace root.
pub fn default_standards_root() -> PathBuf {
    if let Ok(root) = std::env::var(STANDARDS_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../standards")
}

/// One loaded standards file.
#[derive(Debug, Clone)]
pub struct StandardsSource {
    pub path: PathBuf,
    pub sha256: String,
}

/// Reference data for every dataset under a standards directory. Read-only
/// once loaded.
#[derive(Debug, Clone)]
pub struct StandardsRegistry {
    root: PathBuf,
    datasets: BTreeMap<DatasetKey, DatasetStandards>,
    sources: Vec<StandardsSource>,
    fingerprint: String,
}

impl StandardsRegistry {
    pub fn load_default() -> Result<Self> {
        Self::load(&default_standards_root())
    }

    /// Loads every `*.toml` file in `dir`; the file stem is the dataset key.
    pub fn load(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(StandardsError::MissingDirectory {
                path: dir.to_path_buf(),
            });
        }
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| StandardsError::io(dir, e))? {
            let path = entry.map_err(|e| StandardsError::io(dir, e))?.path();
            if path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(STANDARDS_EXTENSION))
            {
                paths.push(path);
            }
        }
        paths.sort();

        let mut datasets = BTreeMap::new();
        let mut sources = Vec::with_capacity(paths.len());
        let mut contents = Vec::with_capacity(paths.len());
        for path in paths {
            let bytes = fs::read(&path).map_err(|e| StandardsError::io(&path, e))?;
            let text = String::from_utf8_lossy(&bytes);
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let key = DatasetKey::new(stem);
            let standards = parse_standards_file(&path, &text)?.into_standards(key.clone(), &path)?;
            debug!(
                dataset = %key,
                gold_classes = standards.classes.gold.len(),
                gold_associations = standards.associations.gold.len(),
                "loaded standards file"
            );
            datasets.insert(key, standards);
            sources.push(StandardsSource {
                path: path.clone(),
                sha256: sha256_hex(&bytes),
            });
            contents.push((file_name(&path), bytes));
        }

        let fingerprint = fingerprint(
            contents
                .iter()
                .map(|(name, bytes)| (name.as_str(), bytes.as_slice())),
        );
        info!(
            root = %dir.display(),
            datasets = datasets.len(),
            fingerprint = %fingerprint,
            "standards loaded"
        );
        Ok(Self {
            root: dir.to_path_buf(),
            datasets,
            sources,
            fingerprint,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn sources(&self) -> &[StandardsSource] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &DatasetKey> {
        self.datasets.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DatasetStandards> {
        self.datasets.values()
    }

    /// Looks up a dataset; unknown keys are a configuration error.
    pub fn dataset(&self, key: &DatasetKey) -> Result<&DatasetStandards> {
        self.datasets
            .get(key)
            .ok_or_else(|| StandardsError::UnknownDataset {
                key: key.to_string(),
                available: self
                    .datasets
                    .keys()
                    .map(DatasetKey::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
