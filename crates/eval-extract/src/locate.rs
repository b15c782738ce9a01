//! Finding the final list inside a raw chat transcript.
//!
//! Each model formats its conversation differently, so every model has its
//! own chain of markers. A marker chain narrows the transcript step by step;
//! the text after the last marker is the section.

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use eval_model::ModelId;

fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("invalid transcript marker regex")
}

static GPT_HEADER: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)GPT-o1"));
static GPT_CLASS_STEP: LazyLock<Regex> = LazyLock::new(|| {
    pattern(
        r"(?i)step\s*3\s*:\s*.*?final\s+(?:refined\s+)?(?:class(?:es)?|list(?:\s+of\s+classes)?|list of class candidates)",
    )
});
static GPT_CLASS_FINAL: LazyLock<Regex> = LazyLock::new(|| {
    pattern(
        r"(?i)final\s+(?:refined list of class candidates|list of class candidates|list of classes|list|class(?:es)?)[\s:]*",
    )
});
static GPT_NUMBERED_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?:.*\d+\.\d+)?\s*Numbered Format.*"));

static ASSISTANT: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)Assistant\s*:"));
static THINK_END: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)</think>"));
static LLAMA_CLASS_FINAL: LazyLock<Regex> = LazyLock::new(|| {
    pattern(
        r"(?i)(?:Here is the final list of classes:|#+\s*Final Class List|#+\s*Refined List of Classes|Here is the final class list in a structured format:)",
    )
});
static QWEN_CLASS_FINAL: LazyLock<Regex> = LazyLock::new(|| {
    pattern(
        r"(?i)(?:Here is the final list of classes:|#+\s*Final Class List|#+\s*Refined List of Classes)",
    )
});

static GPT_ASSOCIATION_STEP: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)Step\s*3:.*?Associations? in 'X-Y'"));
static ASSOCIATION_FINAL: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)Here is the final list of associations?:"));

/// Text after the `n`-th (1-based) match of `marker`, trimmed.
fn after_nth<'t>(text: &'t str, marker: &Regex, n: usize) -> Option<&'t str> {
    let found = marker.find_iter(text).nth(n.checked_sub(1)?)?;
    Some(text[found.end()..].trim())
}

fn after_first<'t>(text: &'t str, marker: &Regex) -> Option<&'t str> {
    after_nth(text, marker, 1)
}

/// Section holding the final class list, or `None` when a marker is missing.
pub fn locate_class_section(model: ModelId, transcript: &str) -> Option<&str> {
    let section = match model {
        ModelId::GptO1 => after_nth(transcript, &GPT_HEADER, 2)
            .and_then(|rest| after_first(rest, &GPT_CLASS_STEP))
            .and_then(|rest| {
                after_first(rest, &GPT_CLASS_FINAL)
                    .or_else(|| after_first(rest, &GPT_NUMBERED_FORMAT))
            }),
        ModelId::Llama3_8b => after_nth(transcript, &ASSISTANT, 3)
            .and_then(|rest| after_first(rest, &LLAMA_CLASS_FINAL)),
        ModelId::Qwen14b => after_nth(transcript, &ASSISTANT, 3)
            .and_then(|rest| after_first(rest, &THINK_END))
            .and_then(|rest| after_first(rest, &QWEN_CLASS_FINAL)),
    };
    if section.is_none() {
        warn!(model = model.as_str(), "final class list markers not found");
    }
    section
}

/// Section holding the final association list, or `None` when a marker is
/// missing.
pub fn locate_association_section(model: ModelId, transcript: &str) -> Option<&str> {
    let section = match model {
        ModelId::GptO1 => after_nth(transcript, &ASSISTANT, 2)
            .and_then(|rest| after_first(rest, &GPT_ASSOCIATION_STEP))
            .and_then(|rest| after_first(rest, &ASSOCIATION_FINAL)),
        ModelId::Llama3_8b => after_nth(transcript, &ASSISTANT, 3)
            .and_then(|rest| after_first(rest, &ASSOCIATION_FINAL)),
        ModelId::Qwen14b => after_nth(transcript, &ASSISTANT, 3)
            .and_then(|rest| after_first(rest, &THINK_END))
            .and_then(|rest| after_first(rest, &ASSOCIATION_FINAL)),
    };
    if section.is_none() {
        warn!(model = model.as_str(), "final association list markers not found");
    }
    section
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn after_nth_counts_from_one() {
        let marker = pattern("x");
        assert_eq!(after_nth("a x b x c", &marker, 2), Some("c"));
        assert_eq!(after_nth("a x b", &marker, 2), None);
        assert_eq!(after_nth("a x b", &marker, 0), None);
    }

    #[test]
    fn llama_needs_three_assistant_turns() {
        let transcript = "Assistant : one\nAssistant : two\nHere is the final list of classes:\n1. Camper";
        assert_eq!(locate_class_section(ModelId::Llama3_8b, transcript), None);
    }
}
