use std::fmt;
use std::str::FromStr;

use crate::core::term::{terms_to_query_string, Term};
use crate::parsing::terms::parse_terms;
use crate::parsing::ParseError;

/// A validated OEIS catalog identifier such as `A000045`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ANumber(String);

impl ANumber {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ANumber {
    type Err = ParseError;

    /// Accepts surrounding whitespace and a lowercase `a`; requires `A` + 6 digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let candidate = s.trim().to_uppercase();
        let valid = candidate.len() == 7
            && candidate.starts_with('A')
            && candidate[1..].bytes().all(|b| b.is_ascii_digit());

        if valid {
            Ok(Self(candidate))
        } else {
            Err(ParseError::InvalidANumber(s.to_string()))
        }
    }
}

impl fmt::Display for ANumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The sequence being probed: a non-empty, ordered list of terms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    terms: Vec<Term>,
}

impl Query {
    /// Wrap terms as a query
    ///
    /// # Errors
    ///
    /// Returns `ParseError::EmptyInput` if `terms` is empty.
    pub fn new(terms: Vec<Term>) -> Result<Self, ParseError> {
        if terms.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        Ok(Self { terms })
    }

    /// Parse free-form term text (commas and/or whitespace)
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the text is blank or contains a non-integer token.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        Self::new(parse_terms(text)?)
    }

    #[must_use]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Always false; kept for API symmetry with `len`
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Comma-joined text of the first `max_terms` terms (all when `None`)
    #[must_use]
    pub fn to_query_string(&self, max_terms: Option<usize>) -> String {
        terms_to_query_string(&self.terms, max_terms)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string(None))
    }
}
