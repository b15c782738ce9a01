//! Association list parsing (`X-Y` and `X-(verb)-Y` lines).

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use eval_model::ModelId;

use crate::clean::{has_opt_tag, remove_explanations, remove_opt_tags, strip_bullet};

static SIMPLE_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\d*\-.\s]*[\w\s()]+-[\w\s()]+$").expect("invalid pair regex")
});
static VERB_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\d*\-.\s]*[\w\s()]+-\([\w\s&]+\)-[\w\s()]+$").expect("invalid verb pair regex")
});

/// One extracted association.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociationLine {
    pub left: String,
    pub right: String,
    pub optional: bool,
}

impl AssociationLine {
    pub fn new(left: impl Into<String>, right: impl Into<String>, optional: bool) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
            optional,
        }
    }
}

/// Markdown emphasis and ` - commentary` are not part of the pair.
fn remove_trailing_notes(line: &str) -> String {
    let line = line.replace("**", "");
    let core = line.split_once(" - ").map_or(line.as_str(), |(head, _)| head);
    core.trim().to_string()
}

fn is_pair_line(line: &str) -> bool {
    SIMPLE_PAIR.is_match(line) || VERB_PAIR.is_match(line)
}

/// Reduces a pair line to its first and last `-` separated segment.
fn clean_pair(line: &str, optional: bool) -> Option<AssociationLine> {
    let body = remove_explanations(&remove_opt_tags(strip_bullet(line)));
    let parts: Vec<&str> = body.split('-').map(str::trim).collect();
    match parts.as_slice() {
        [left, .., right] if !left.is_empty() && !right.is_empty() => {
            Some(AssociationLine::new(*left, *right, optional))
        }
        _ => None,
    }
}

/// Parses the list section of an association transcript.
///
/// Lines tagged `(opt)`/`(optional)` are optional. Untagged lines before the
/// first blank line are mandatory; untagged lines after it are kept as
/// optional for GPT-o1 and dropped for the other models. Pairs are
/// de-duplicated on their endpoints, ignoring case; mandatory pairs come
/// first.
pub fn parse_association_lines(model: ModelId, section: &str) -> Vec<AssociationLine> {
    let keep_untagged_tail = match model {
        ModelId::GptO1 => true,
        ModelId::Llama3_8b | ModelId::Qwen14b => false,
    };
    let mut mandatory = Vec::new();
    let mut optional = Vec::new();
    let mut reading_mandatory = true;

    for raw in section.lines() {
        let line = remove_trailing_notes(raw);
        if line.is_empty() {
            reading_mandatory = false;
            continue;
        }
        if !is_pair_line(&line) {
            continue;
        }
        let tagged = has_opt_tag(&line);
        let target = if tagged {
            &mut optional
        } else if reading_mandatory {
            &mut mandatory
        } else if keep_untagged_tail {
            &mut optional
        } else {
            continue;
        };
        let is_optional = tagged || !reading_mandatory;
        if let Some(pair) = clean_pair(&line, is_optional) {
            target.push(pair);
        }
    }

    let mut seen = HashSet::new();
    let pairs: Vec<AssociationLine> = mandatory
        .into_iter()
        .chain(optional)
        .filter(|pair| seen.insert((pair.left.to_lowercase(), pair.right.to_lowercase())))
        .collect();
    debug!(model = model.as_str(), pairs = pairs.len(), "parsed association list");
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verb_pairs_keep_their_endpoints() {
        let pairs = parse_association_lines(ModelId::GptO1, "1. X-(type)-Y (optional) - extra\n");
        assert_eq!(pairs, vec![AssociationLine::new("X", "Y", true)]);
    }

    #[test]
    fn untagged_tail_depends_on_model() {
        let section = "1. Camper-Guardian\n\n2. Camp-Rule\n3. Camp-Group (optional)\n";
        let gpt = parse_association_lines(ModelId::GptO1, section);
        assert_eq!(
            gpt,
            vec![
                AssociationLine::new("Camper", "Guardian", false),
                AssociationLine::new("Camp", "Rule", true),
                AssociationLine::new("Camp", "Group", true),
            ]
        );
        let qwen = parse_association_lines(ModelId::Qwen14b, section);
        assert_eq!(
            qwen,
            vec![
                AssociationLine::new("Camper", "Guardian", false),
                AssociationLine::new("Camp", "Group", true),
            ]
        );
    }

    #[test]
    fn duplicate_pairs_are_dropped_ignoring_case() {
        let section = "1. User-Feedback\n2. user-feedback\n3. Feedback-User\n";
        let pairs = parse_association_lines(ModelId::Llama3_8b, section);
        assert_eq!(pairs.len(), 2);
    }
}
