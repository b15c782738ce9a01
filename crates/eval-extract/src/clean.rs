//! Line-level cleanup shared by the class and association parsers.

use std::sync::LazyLock;

use regex::{Captures, Regex};

fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("invalid list cleanup regex")
}

static BULLET: LazyLock<Regex> = LazyLock::new(|| pattern(r"^(?:\d+\.\s*|\*\s*|-\s*)"));
static LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| pattern(r"^(?:\d+\.|\*)"));
static PARENTHETICAL: LazyLock<Regex> = LazyLock::new(|| pattern(r"\([^)]*\)"));
static KEPT_PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)^\(\s*(?:optional\)|or\b|and\b)"));
static SPACED_PARENTHETICAL: LazyLock<Regex> = LazyLock::new(|| pattern(r"\s*\([^)]*\)"));
static OPTIONAL_TAG: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)\(optional\)"));
static OPT_TAG: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)\(opt(?:ional)?\)"));
static BOLD: LazyLock<Regex> = LazyLock::new(|| pattern(r"\*{1,2}(.*?)\*{1,2}"));
static LEADING_STARS: LazyLock<Regex> = LazyLock::new(|| pattern(r"^\*+\s*"));
static AND_WORD: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)\band\b"));
static AND_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)\s+and\s+"));
static OR_OPEN: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)\(or\b"));
static OR_LEAD: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)^or(?:\s+simply)?\s*"));
static OR_SPLIT: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)\s*/\s*|\s+or\s+"));
static EXPLANATION: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)\([^)]*?Explanation:[^)]*\)"));

pub(crate) fn is_list_item(line: &str) -> bool {
    LIST_ITEM.is_match(line)
}

pub(crate) fn strip_bullet(line: &str) -> &str {
    match BULLET.find(line) {
        Some(found) => &line[found.end()..],
        None => line,
    }
}

pub(crate) fn has_optional_tag(text: &str) -> bool {
    OPTIONAL_TAG.is_match(text)
}

pub(crate) fn has_opt_tag(text: &str) -> bool {
    OPT_TAG.is_match(text)
}

pub(crate) fn remove_opt_tags(text: &str) -> String {
    OPT_TAG.replace_all(text, "").trim().to_string()
}

/// Drops `(...)` notes but keeps `(optional)`, `(or ...)` and `(and ...)`.
pub(crate) fn strip_notes(text: &str) -> String {
    PARENTHETICAL
        .replace_all(text, |caps: &Captures<'_>| {
            let whole = &caps[0];
            if KEPT_PARENTHETICAL.is_match(whole) {
                whole.to_string()
            } else {
                String::new()
            }
        })
        .trim()
        .to_string()
}

/// Everything after the first `:`, then the first `-`, is commentary.
pub(crate) fn remove_trailing_notes(line: &str) -> &str {
    let mut line = line;
    for separator in [':', '-'] {
        if let Some((head, _)) = line.split_once(separator) {
            line = head;
        }
    }
    line.trim()
}

/// Strips markdown emphasis and leading asterisks.
pub(crate) fn clean_class_name(text: &str) -> String {
    let unbolded = BOLD.replace_all(text, "$1");
    LEADING_STARS.replace(&unbolded, "").trim().to_string()
}

pub(crate) fn strip_parentheticals(text: &str) -> String {
    SPACED_PARENTHETICAL.replace_all(text, "").trim().to_string()
}

pub(crate) fn mentions_and(text: &str) -> bool {
    AND_WORD.is_match(text)
}

pub(crate) fn has_or_alternatives(text: &str) -> bool {
    OR_OPEN.is_match(text) || text.contains('/')
}

pub(crate) fn split_commas(text: &str) -> Vec<String> {
    text.split(',')
        .map(|part| strip_leading_and(part.trim()))
        .filter(|part| !part.is_empty())
        .collect()
}

fn strip_leading_and(text: &str) -> String {
    let lower = text.to_ascii_lowercase();
    if lower.starts_with("and ") {
        text[4..].trim().to_string()
    } else {
        text.to_string()
    }
}

pub(crate) fn split_and(text: &str) -> Vec<String> {
    AND_SEPARATOR
        .split(text)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// `Activity (or "Event" / "Task")` → `["Activity", "Event", "Task"]`.
pub(crate) fn expand_or_variants(entity: &str) -> Vec<String> {
    let text = entity.trim();
    let (head, rest) = match text.split_once('(') {
        Some((head, rest)) => (head, Some(rest)),
        None => (text, None),
    };
    let mut variants: Vec<String> = OR_SPLIT
        .split(head.trim())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();
    if let Some(inside) = rest {
        let inside = inside.trim_end_matches(')');
        let inside = OR_LEAD.replace(inside, "");
        for part in OR_SPLIT.split(&inside) {
            let cleaned = part
                .trim()
                .trim_matches(|c| matches!(c, '“' | '”' | '"' | '\''));
            if !cleaned.is_empty() {
                variants.push(cleaned.to_string());
            }
        }
    }
    variants
}

pub(crate) fn remove_explanations(text: &str) -> String {
    EXPLANATION.replace_all(text, "").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_and_stars_are_removed() {
        assert_eq!(clean_class_name("**Foo**"), "Foo");
        assert_eq!(clean_class_name("*Bar*"), "Bar");
    }

    #[test]
    fn trailing_notes_are_cut() {
        assert_eq!(remove_trailing_notes("Foo: details"), "Foo");
        assert_eq!(remove_trailing_notes("Bar - reason"), "Bar");
    }

    #[test]
    fn or_variants_are_expanded() {
        assert_eq!(
            expand_or_variants("Group (or “CampGroup”)"),
            vec!["Group", "CampGroup"]
        );
        assert_eq!(
            expand_or_variants("Activity (or “Event” / “Task”)"),
            vec!["Activity", "Event", "Task"]
        );
        assert_eq!(
            expand_or_variants("AttendanceRecord (or simply “Attendance”)"),
            vec!["AttendanceRecord", "Attendance"]
        );
        assert_eq!(expand_or_variants("Parent/Guardian"), vec!["Parent", "Guardian"]);
    }

    #[test]
    fn notes_are_stripped_but_markers_kept() {
        assert_eq!(
            strip_notes("Camper (participant) (optional)"),
            "Camper  (optional)"
        );
        assert_eq!(strip_notes("Group (or Team)"), "Group (or Team)");
    }

    #[test]
    fn comma_lists_drop_joining_and() {
        assert_eq!(split_commas("A, B, and C"), vec!["A", "B", "C"]);
    }
}
