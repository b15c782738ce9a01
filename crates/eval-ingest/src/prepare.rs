//! Turning raw round entries into matcher input.

use std::sync::LazyLock;

use regex::Regex;

use eval_match::normalize_word;
use eval_model::{Term, TermPair};

use crate::rounds::RawPair;

static OPTIONAL_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\((?:opt|optional)\)\s*").expect("invalid optional prefix regex")
});
static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("invalid parenthetical regex"));

/// Splits off a leading `(opt)`/`(optional)` marker.
pub fn split_optional_marker(text: &str) -> (&str, bool) {
    match OPTIONAL_PREFIX.find(text.trim_start()) {
        Some(found) => (&text.trim_start()[found.end()..], true),
        None => (text, false),
    }
}

/// Class entries to terms. Parenthetical notes are dropped before
/// normalization; blank entries are skipped.
pub fn prepare_class_terms(raw: &[String]) -> Vec<Term> {
    raw.iter()
        .filter(|entry| !entry.trim().is_empty())
        .map(|entry| {
            let (name, optional) = split_optional_marker(entry);
            let name = PARENTHETICAL.replace_all(name, "");
            let name = name.trim();
            Term::new(name, normalize_word(name), optional)
        })
        .collect()
}

/// Association rows to normalized pairs; the marker is read from the left side.
pub fn prepare_association_pairs(raw: &[RawPair]) -> Vec<TermPair> {
    raw.iter()
        .map(|pair| {
            let (left, optional) = split_optional_marker(&pair.left);
            TermPair::new(normalize_word(left), normalize_word(&pair.right), optional)
        })
        .collect()
}
