//! Class list parsing.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::clean::{
    clean_class_name, expand_or_variants, has_optional_tag, has_or_alternatives, is_list_item,
    mentions_and, remove_opt_tags, remove_trailing_notes, split_and, split_commas, strip_bullet,
    strip_notes, strip_parentheticals,
};

static RATIONALE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:\d+\.\s*|\*\s*|-\s*)?\s*Rationale:").expect("invalid rationale regex")
});

/// Marker written in front of optional entries in extracted round files.
pub const OPTIONAL_MARKER: &str = "(optional)";

/// Class names found in a final list, split by the model's own tagging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassLines {
    pub mandatory: Vec<String>,
    pub optional: Vec<String>,
}

impl ClassLines {
    /// Mandatory names followed by `(optional) name` entries.
    pub fn combined(&self) -> Vec<String> {
        self.mandatory
            .iter()
            .cloned()
            .chain(
                self.optional
                    .iter()
                    .map(|name| format!("{OPTIONAL_MARKER} {name}")),
            )
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.mandatory.is_empty() && self.optional.is_empty()
    }
}

fn split_names(core: &str) -> Vec<String> {
    if core.contains(',') {
        split_commas(core)
    } else if mentions_and(core) {
        split_and(core)
    } else if has_or_alternatives(core) {
        vec![expand_or_variants(core).join("/")]
    } else {
        vec![core.to_string()]
    }
}

/// Case-insensitive, first spelling wins.
pub(crate) fn dedupe_case_insensitive(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.to_lowercase()))
        .collect()
}

/// Parses the list section of a class transcript.
///
/// Numbered or starred items before the first blank line are mandatory unless
/// tagged `(optional)`; after it only tagged items are kept. Rationale lines
/// are skipped. An optional name that is also mandatory is dropped.
pub fn parse_class_lines(section: &str) -> ClassLines {
    let mut mandatory = Vec::new();
    let mut optional = Vec::new();
    let mut reading_mandatory = true;

    for line in section.lines() {
        let text = line.trim();
        if RATIONALE.is_match(text) {
            continue;
        }
        if text.is_empty() {
            reading_mandatory = false;
            continue;
        }
        if !is_list_item(text) {
            continue;
        }

        let item = strip_bullet(text);
        let tagged = has_optional_tag(item);
        if !reading_mandatory && !tagged {
            continue;
        }
        let core = remove_opt_tags(remove_trailing_notes(&strip_notes(item)));

        for raw in split_names(&core) {
            let mut name = clean_class_name(&raw);
            if name.contains('(') {
                name = strip_parentheticals(&name);
            }
            if name.is_empty() {
                continue;
            }
            if tagged {
                optional.push(name);
            } else {
                mandatory.push(name);
            }
        }
    }

    let mandatory = dedupe_case_insensitive(mandatory);
    let known: HashSet<String> = mandatory.iter().map(|m| m.to_lowercase()).collect();
    let optional: Vec<String> = dedupe_case_insensitive(optional)
        .into_iter()
        .filter(|name| !known.contains(&name.to_lowercase()))
        .collect();
    debug!(
        mandatory = mandatory.len(),
        optional = optional.len(),
        "parsed class list"
    );
    ClassLines {
        mandatory,
        optional,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_mandatory_and_optional() {
        let section = "\
1. **Camper**
2. Guardians (parents of campers)
3. Camp Worker: staff on site
4. Medical Form (optional)

Rationale: kept short
5. Photo (optional) - nice to have
6. Schedule
";
        let lines = parse_class_lines(section);
        assert_eq!(lines.mandatory, vec!["Camper", "Guardians", "Camp Worker"]);
        assert_eq!(lines.optional, vec!["Medical Form", "Photo"]);
    }

    #[test]
    fn expands_grouped_names() {
        let section = "1. Payment and Invoice\n2. Group (or “CampGroup”)\n3. Rule, Policy\n";
        let lines = parse_class_lines(section);
        assert_eq!(
            lines.mandatory,
            vec!["Payment", "Invoice", "Group/CampGroup", "Rule", "Policy"]
        );
    }

    #[test]
    fn optional_duplicates_of_mandatory_names_are_dropped() {
        let section = "1. Camper\n2. camper (optional)\n3. Cabin (optional)\n";
        let lines = parse_class_lines(section);
        assert_eq!(lines.mandatory, vec!["Camper"]);
        assert_eq!(lines.optional, vec!["Cabin"]);
        assert_eq!(lines.combined(), vec!["Camper", "(optional) Cabin"]);
    }
}
