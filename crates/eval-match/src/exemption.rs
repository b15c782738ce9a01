//! Non-punishment: unmatched children of a matched parent are not false positives.

use std::collections::BTreeSet;

use tracing::debug;

use eval_model::NonPunishRule;

use crate::normalize::normalize_word;

const MARKERS: [&str; 3] = ["(optional)", "(opt)", "(sil)"];

fn clean(item: &str) -> String {
    let mut text = item.to_string();
    for marker in MARKERS {
        text = text.replace(marker, "");
    }
    normalize_word(&text)
}

/// Drops the unmatched items a rule exempts. A dataset without rules is a
/// no-op.
///
/// A rule applies once its parent or any of its children is among the
/// matched items; it then exempts unmatched items equal to one of its
/// children. Markers such as `(sil)` are ignored on both sides. Each removal
/// is recorded in `log`; the first exempting rule is the one reported.
pub fn remove_non_punished(
    unmatched: &[String],
    matched: &[String],
    rules: &[NonPunishRule],
    log: &mut Vec<String>,
) -> Vec<String> {
    if rules.is_empty() {
        return unmatched.to_vec();
    }
    let matched: BTreeSet<String> = matched.iter().map(|m| clean(m)).collect();
    let active: Vec<(&NonPunishRule, BTreeSet<String>)> = rules
        .iter()
        .map(|rule| {
            let children: BTreeSet<String> =
                rule.children.iter().map(|c| normalize_word(c)).collect();
            (rule, children)
        })
        .filter(|(rule, children)| {
            matched.contains(&normalize_word(&rule.parent))
                || children.iter().any(|c| matched.contains(c))
        })
        .collect();

    let mut kept = Vec::with_capacity(unmatched.len());
    for item in unmatched {
        let cleaned = clean(item);
        match active.iter().find(|(_, children)| children.contains(&cleaned)) {
            Some((rule, _)) => {
                debug!(item = %item, parent = %rule.parent, "exempted from false positives");
                log.push(format!(
                    "Non-punish: '{item}' removed because its parent '{}' was matched.",
                    rule.parent
                ));
            }
            None => kept.push(item.clone()),
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn silver_marker_is_ignored_when_checking_parents() {
        let rules = vec![NonPunishRule::new("form", ["medical form"])];
        let mut log = Vec::new();
        let kept = remove_non_punished(
            &strings(&["medical forms"]),
            &strings(&["(sil)form"]),
            &rules,
            &mut log,
        );
        assert!(kept.is_empty());
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn a_matched_sibling_activates_the_rule() {
        let rules = vec![NonPunishRule::new("staff", ["cook", "driver"])];
        let mut log = Vec::new();
        let kept = remove_non_punished(&strings(&["driver"]), &strings(&["cook"]), &rules, &mut log);
        assert!(kept.is_empty());
    }

    #[test]
    fn inactive_rules_keep_items() {
        let rules = vec![NonPunishRule::new("form", ["medical form"])];
        let mut log = Vec::new();
        let kept = remove_non_punished(
            &strings(&["medical form"]),
            &strings(&["camper"]),
            &rules,
            &mut log,
        );
        assert_eq!(kept, strings(&["medical form"]));
        assert!(log.is_empty());
    }

    #[test]
    fn no_rules_is_a_no_op() {
        let mut log = Vec::new();
        let kept = remove_non_punished(
            &strings(&["medical form"]),
            &strings(&["form"]),
            &[],
            &mut log,
        );
        assert_eq!(kept, strings(&["medical form"]));
        assert!(log.is_empty());
    }
}
