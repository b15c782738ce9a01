//! Canonical comparable form of a term: lowercase, trimmed, singular.

/// Terms that singularization would corrupt; returned as-is.
const PRESERVED_TERMS: &[&str] = &[
    "class",
    "process",
    "progress",
    "academic progress",
    "address",
    "delivery address",
    "status",
    "order status",
    "business",
    "scheduling process",
    "payment process",
    "hiring process",
];

/// Words with no distinct singular form.
const UNCOUNTABLE: &[&str] = &[
    "aircraft",
    "alias",
    "analytics",
    "atlas",
    "bias",
    "canvas",
    "cash",
    "chaos",
    "christmas",
    "data",
    "deer",
    "equipment",
    "feedback",
    "fish",
    "furniture",
    "gas",
    "has",
    "his",
    "information",
    "its",
    "lens",
    "logistics",
    "news",
    "personnel",
    "plus",
    "police",
    "series",
    "sheep",
    "software",
    "species",
    "staff",
    "this",
    "was",
    "yes",
];

const IRREGULAR: &[(&str, &str)] = &[
    ("analyses", "analysis"),
    ("bonuses", "bonus"),
    ("buses", "bus"),
    ("caches", "cache"),
    ("calories", "calorie"),
    ("calves", "calf"),
    ("campuses", "campus"),
    ("censuses", "census"),
    ("children", "child"),
    ("cookies", "cookie"),
    ("crises", "crisis"),
    ("criteria", "criterion"),
    ("diagnoses", "diagnosis"),
    ("echoes", "echo"),
    ("feet", "foot"),
    ("focuses", "focus"),
    ("geese", "goose"),
    ("halves", "half"),
    ("headaches", "headache"),
    ("heroes", "hero"),
    ("indices", "index"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("lies", "lie"),
    ("lives", "life"),
    ("loaves", "loaf"),
    ("matrices", "matrix"),
    ("men", "man"),
    ("mice", "mouse"),
    ("movies", "movie"),
    ("niches", "niche"),
    ("people", "person"),
    ("phenomena", "phenomenon"),
    ("pies", "pie"),
    ("potatoes", "potato"),
    ("quizzes", "quiz"),
    ("selves", "self"),
    ("shelves", "shelf"),
    ("statuses", "status"),
    ("teeth", "tooth"),
    ("theses", "thesis"),
    ("thieves", "thief"),
    ("ties", "tie"),
    ("tomatoes", "tomato"),
    ("vertices", "vertex"),
    ("vetoes", "veto"),
    ("viruses", "virus"),
    ("wives", "wife"),
    ("wolves", "wolf"),
    ("women", "woman"),
    ("zombies", "zombie"),
];

/// Normalizes a term for comparison.
///
/// Lowercases and trims, leaves preserved domain terms alone, and otherwise
/// singularizes the last word of the phrase. When no singular form exists the
/// lowercased text is returned unchanged. The result is a fixed point:
/// `normalize_word(&normalize_word(x)) == normalize_word(x)`.
pub fn normalize_word(word: &str) -> String {
    let mut current = word.trim().to_lowercase();
    loop {
        if PRESERVED_TERMS.contains(&current.as_str()) {
            return current;
        }
        match singularize_phrase(&current) {
            Some(next) if next != current => current = next,
            _ => return current,
        }
    }
}

/// Missing input normalizes to the empty string.
pub fn normalize_optional(word: Option<&str>) -> String {
    word.map(normalize_word).unwrap_or_default()
}

fn singularize_phrase(phrase: &str) -> Option<String> {
    let split_at = phrase
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map(|(idx, c)| idx + c.len_utf8());
    let (head, last) = match split_at {
        Some(idx) => phrase.split_at(idx),
        None => ("", phrase),
    };
    singular_noun(last).map(|singular| format!("{head}{singular}"))
}

/// Returns the singular form of a lowercase word, or `None` if it has none.
fn singular_noun(word: &str) -> Option<String> {
    if word.len() < 3 || UNCOUNTABLE.contains(&word) {
        return None;
    }
    if let Some((_, singular)) = IRREGULAR.iter().find(|(plural, _)| *plural == word) {
        return Some((*singular).to_string());
    }
    // `gases`, `aliases`, `lenses`: the singular itself ends in `s`.
    if let Some(stem) = word.strip_suffix("es")
        && stem.ends_with('s')
        && UNCOUNTABLE.contains(&stem)
    {
        return Some(stem.to_string());
    }
    if !word.ends_with('s') || word.ends_with("ss") || word.ends_with("us") || word.ends_with("is")
    {
        return None;
    }
    if let Some(stem) = word.strip_suffix("ies")
        && !stem.is_empty()
    {
        return Some(format!("{stem}y"));
    }
    if let Some(stem) = word.strip_suffix("sses") {
        return Some(format!("{stem}ss"));
    }
    for suffix in ["xes", "ches", "shes", "zzes"] {
        if word.ends_with(suffix) {
            return Some(word[..word.len() - 2].to_string());
        }
    }
    Some(word[..word.len() - 1].to_string())
}
