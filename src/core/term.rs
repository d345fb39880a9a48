use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Token that is not a decimal integer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{0}' is not an integer")]
pub struct InvalidTerm(pub String);

/// A single sequence term.
///
/// OEIS terms are frequently far larger than any machine integer, so a term is
/// kept as canonical decimal text: an optional `-`, no leading zeros and never
/// `-0`. Two terms compare equal exactly when the integers they denote are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Term(String);

impl Term {
    /// Canonical decimal text of the term
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The term as an `i64`, if it fits
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        self.0.parse().ok()
    }
}

impl FromStr for Term {
    type Err = InvalidTerm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let (negative, digits) = match token.as_bytes().first() {
            Some(b'-') => (true, &token[1..]),
            Some(b'+') => (false, &token[1..]),
            _ => (false, token),
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidTerm(s.to_string()));
        }

        let magnitude = digits.trim_start_matches('0');
        if magnitude.is_empty() {
            return Ok(Self("0".to_string()));
        }

        if negative {
            Ok(Self(format!("-{magnitude}")))
        } else {
            Ok(Self(magnitude.to_string()))
        }
    }
}

impl From<i64> for Term {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Small terms stay JSON numbers; anything wider than i64 is emitted as a string.
impl Serialize for Term {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.to_i64() {
            Some(value) => serializer.serialize_i64(value),
            None => serializer.serialize_str(&self.0),
        }
    }
}

/// Convert a slice of machine integers into terms
#[must_use]
pub fn terms_from(values: &[i64]) -> Vec<Term> {
    values.iter().copied().map(Term::from).collect()
}

/// Join terms with commas, optionally keeping only the first `max_terms`
#[must_use]
pub fn terms_to_query_string(terms: &[Term], max_terms: Option<usize>) -> String {
    let take = max_terms.unwrap_or(terms.len()).min(terms.len());
    terms[..take]
        .iter()
        .map(Term::as_str)
        .collect::<Vec<_>>()
        .join(",")
}
