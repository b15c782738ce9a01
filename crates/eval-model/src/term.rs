//! Extracted candidate terms and term pairs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A candidate class produced by extraction.
///
/// `normalized` is what the matcher compares; `raw` is kept for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Term {
    pub raw: String,
    pub normalized: String,
    pub optional: bool,
}

impl Term {
    pub fn new(raw: impl Into<String>, normalized: impl Into<String>, optional: bool) -> Self {
        Self {
            raw: raw.into(),
            normalized: normalized.into(),
            optional,
        }
    }

    /// Builds a term whose text is already in normalized form.
    pub fn normalized(text: impl Into<String>, optional: bool) -> Self {
        let text = text.into();
        Self {
            raw: text.clone(),
            normalized: text,
            optional,
        }
    }

    /// Alternatives written as `a/b` are matched independently; any variant may match.
    pub fn slash_variants(&self) -> Vec<&str> {
        if self.normalized.contains('/') {
            self.normalized.split('/').map(str::trim).collect()
        } else {
            vec![self.normalized.as_str()]
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized)
    }
}

/// Order-independent identity of an association: the two endpoints, sorted.
///
/// `PairKey::new("b", "a") == PairKey::new("a", "b")`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PairKey {
    first: String,
    second: String,
}

impl PairKey {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        let a = a.into();
        let b = b.into();
        if a <= b {
            Self {
                first: a,
                second: b,
            }
        } else {
            Self {
                first: b,
                second: a,
            }
        }
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn second(&self) -> &str {
        &self.second
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.first, self.second)
    }
}

/// A candidate association with normalized endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TermPair {
    pub left: String,
    pub right: String,
    pub optional: bool,
}

impl TermPair {
    pub fn new(left: impl Into<String>, right: impl Into<String>, optional: bool) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
            optional,
        }
    }

    pub fn key(&self) -> PairKey {
        PairKey::new(self.left.clone(), self.right.clone())
    }
}

impl fmt::Display for TermPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.key().fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slash_variants_split_and_trim() {
        let term = Term::normalized("parent / guardian", false);
        assert_eq!(term.slash_variants(), vec!["parent", "guardian"]);
        let plain = Term::normalized("camper", false);
        assert_eq!(plain.slash_variants(), vec!["camper"]);
    }

    #[test]
    fn pair_keys_ignore_endpoint_order() {
        let a = TermPair::new("user", "feedback", false);
        let b = TermPair::new("feedback", "user", true);
        assert_eq!(a.key(), b.key());
        assert_eq!(a.to_string(), "feedback-user");
    }
}
