use serde::Serialize;

use crate::core::term::Term;

/// Number of data terms included when a hit is written out as JSON
pub const JSON_DATA_PREFIX: usize = 30;

/// Identifier used when a search record carries no usable id
pub const UNKNOWN_A_NUMBER: &str = "A??????";

/// Best contiguous alignment of a query inside a candidate's terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Alignment {
    /// Number of consecutive query terms matched
    len: usize,
    /// Index into the candidate's terms where the run starts (`None` when `len == 0`)
    start: Option<usize>,
}

impl Alignment {
    /// No shared run at all
    pub const NONE: Self = Self {
        len: 0,
        start: None,
    };

    #[must_use]
    pub fn new(len: usize, start: usize) -> Self {
        if len == 0 {
            Self::NONE
        } else {
            Self {
                len,
                start: Some(start),
            }
        }
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn start(self) -> Option<usize> {
        self.start
    }

    /// One past the last candidate index covered by the run
    #[must_use]
    pub fn end(self) -> Option<usize> {
        self.start.map(|start| start + self.len)
    }
}

/// One candidate sequence that matched (some of) the query.
///
/// Hits are value objects: they are built once by a source adapter and only
/// read afterwards by the merger, ranker and explainer.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    identifier: String,
    name: String,
    offset: String,
    data_terms: Vec<Term>,
    alignment: Alignment,
    score: f64,
}

impl Hit {
    #[must_use]
    pub fn new(
        identifier: impl Into<String>,
        name: impl Into<String>,
        offset: impl Into<String>,
        data_terms: Vec<Term>,
        alignment: Alignment,
        score: f64,
    ) -> Self {
        debug_assert!(
            alignment.end().map_or(true, |end| end <= data_terms.len()),
            "alignment {alignment:?} runs past {} data terms",
            data_terms.len()
        );
        Self {
            identifier: identifier.into(),
            name: name.into(),
            offset: offset.into(),
            data_terms,
            alignment,
            score,
        }
    }

    /// Catalog identifier (A-number), the merge key
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Offset annotation as given by the source
    #[must_use]
    pub fn offset(&self) -> &str {
        &self.offset
    }

    #[must_use]
    pub fn data_terms(&self) -> &[Term] {
        &self.data_terms
    }

    #[must_use]
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    #[must_use]
    pub fn match_len(&self) -> usize {
        self.alignment.len
    }

    #[must_use]
    pub fn match_at(&self) -> Option<usize> {
        self.alignment.start
    }

    /// Fraction of the shorter of query/candidate covered by the best run
    #[must_use]
    pub fn score(&self) -> f64 {
        self.score
    }

    /// JSON projection written to result files
    #[must_use]
    pub fn to_json_record(&self) -> HitRecord<'_> {
        HitRecord {
            a_number: &self.identifier,
            name: &self.name,
            offset: &self.offset,
            score: self.score,
            match_len: self.alignment.len,
            match_at: self.alignment.start,
            data_prefix: &self.data_terms[..self.data_terms.len().min(JSON_DATA_PREFIX)],
        }
    }
}

/// Serializable view of a [`Hit`]
#[derive(Debug, Serialize)]
pub struct HitRecord<'a> {
    pub a_number: &'a str,
    pub name: &'a str,
    pub offset: &'a str,
    pub score: f64,
    pub match_len: usize,
    pub match_at: Option<usize>,
    pub data_prefix: &'a [Term],
}
