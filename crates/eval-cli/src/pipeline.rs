//! Extraction and evaluation runs behind the `extract` and `evaluate`
//! commands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{info, info_span, warn};

use eval_extract::{ExtractError, extract_associations, extract_classes, read_transcript};
use eval_ingest::{
    RoundFile, discover_rounds, prepare_association_pairs, prepare_class_terms,
    read_association_round, read_class_round, round_file_name, write_association_round,
    write_class_round,
};
use eval_match::Evaluator;
use eval_model::{DatasetEvaluation, DatasetKey, ExperimentKind, LabeledRound, ModelId};
use eval_report::{run_dir, write_run_outputs};
use eval_standards::StandardsRegistry;

pub const TRANSCRIPT_PREFIX: &str = "R";
pub const TRANSCRIPT_EXT: &str = "txt";
pub const ROUND_PREFIX: &str = "round";
pub const ROUND_EXT: &str = "csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedRound {
    pub number: usize,
    pub path: PathBuf,
    pub entries: usize,
}

#[derive(Debug, Default)]
pub struct ExtractionResult {
    pub written: Vec<ExtractedRound>,
    /// Round numbers whose transcript had no recognizable final list.
    pub skipped: Vec<usize>,
}

/// Writes the round file for one transcript; `None` when no list was found.
fn extract_one(
    kind: ExperimentKind,
    model: ModelId,
    transcript: &str,
    path: &Path,
) -> Result<Option<usize>> {
    let found = match kind {
        ExperimentKind::Class => extract_classes(model, transcript).map(|lines| {
            write_class_round(path, &lines).map(|()| lines.mandatory.len() + lines.optional.len())
        }),
        ExperimentKind::Association => extract_associations(model, transcript)
            .map(|pairs| write_association_round(path, &pairs).map(|()| pairs.len())),
    };
    match found {
        Ok(written) => Ok(Some(written?)),
        Err(ExtractError::SectionNotFound { .. }) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Turns every `R<n>.txt` transcript in `input` into `round<n>.csv` in `output`.
pub fn extract_rounds(
    kind: ExperimentKind,
    model: ModelId,
    input: &Path,
    output: &Path,
) -> Result<ExtractionResult> {
    let _span = info_span!("extract", kind = kind.as_str(), model = model.as_str()).entered();
    let transcripts = discover_rounds(input, TRANSCRIPT_PREFIX, TRANSCRIPT_EXT)
        .with_context(|| format!("scan transcripts in {}", input.display()))?;
    if transcripts.is_empty() {
        bail!("no R<n>.txt transcripts found in {}", input.display());
    }

    let mut result = ExtractionResult::default();
    for transcript in &transcripts {
        let text = read_transcript(&transcript.path)?;
        let path = output.join(round_file_name(ROUND_PREFIX, transcript.number, ROUND_EXT));
        match extract_one(kind, model, &text, &path)? {
            Some(entries) => {
                info!(round = transcript.number, entries, "extracted round");
                result.written.push(ExtractedRound {
                    number: transcript.number,
                    path,
                    entries,
                });
            }
            None => {
                warn!(round = transcript.number, path = %transcript.path.display(), "round skipped");
                result.skipped.push(transcript.number);
            }
        }
    }
    Ok(result)
}

pub fn load_registry(standards_dir: Option<&Path>) -> Result<StandardsRegistry> {
    match standards_dir {
        Some(dir) => StandardsRegistry::load(dir)
            .with_context(|| format!("load standards from {}", dir.display())),
        None => StandardsRegistry::load_default().context("load default standards"),
    }
}

#[derive(Debug, Clone)]
pub struct EvaluateRequest<'a> {
    pub kind: ExperimentKind,
    pub model: ModelId,
    pub dataset: DatasetKey,
    /// Folder of `round<n>.csv` files.
    pub input: &'a Path,
    /// Report root; `None` scores without writing files.
    pub output_root: Option<&'a Path>,
}

#[derive(Debug)]
pub struct EvaluationRun {
    pub evaluation: DatasetEvaluation,
    pub output_dir: Option<PathBuf>,
    pub files: Vec<PathBuf>,
}

fn labeled<T>(
    rounds: &[RoundFile],
    load: impl Fn(&Path) -> Result<Vec<T>>,
) -> Result<Vec<LabeledRound<T>>> {
    rounds
        .iter()
        .map(|round| Ok(LabeledRound::new(round.label(), load(&round.path)?)))
        .collect()
}

/// Scores every round file of `request.input` against the dataset's
/// standards. An unknown dataset fails before any round is read.
pub fn evaluate_rounds(
    registry: &StandardsRegistry,
    request: &EvaluateRequest<'_>,
) -> Result<EvaluationRun> {
    let standards = registry.dataset(&request.dataset)?;
    let rounds = discover_rounds(request.input, ROUND_PREFIX, ROUND_EXT)
        .with_context(|| format!("scan rounds in {}", request.input.display()))?;
    if rounds.is_empty() {
        bail!("no round<n>.csv files found in {}", request.input.display());
    }

    let evaluator = Evaluator::new(standards);
    let evaluation = match request.kind {
        ExperimentKind::Class => {
            let rounds = labeled(&rounds, |path| Ok(prepare_class_terms(&read_class_round(path)?)))?;
            evaluator.evaluate_classes(request.model, &rounds)
        }
        ExperimentKind::Association => {
            let rounds = labeled(&rounds, |path| {
                Ok(prepare_association_pairs(&read_association_round(path)?))
            })?;
            evaluator.evaluate_associations(request.model, &rounds)
        }
    };

    let Some(root) = request.output_root else {
        return Ok(EvaluationRun {
            evaluation,
            output_dir: None,
            files: Vec::new(),
        });
    };
    let dir = run_dir(root, request.kind, request.model, &request.dataset);
    let files = write_run_outputs(&dir, &evaluation, registry.fingerprint())?;
    Ok(EvaluationRun {
        evaluation,
        output_dir: Some(dir),
        files,
    })
}
