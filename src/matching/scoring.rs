use crate::core::hit::Hit;
use crate::core::term::Term;
use crate::core::types::Query;
use crate::matching::subsequence::best_match;

/// Safely convert usize to f64 for ratio calculations
///
/// Sequence lengths are capped at a few hundred terms, far inside the range
/// f64 represents exactly.
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Score a run of `match_len` terms.
///
/// The run length is normalized by the shorter of query and candidate, so a
/// short query that appears in full inside a long catalog entry scores 1.0.
#[must_use]
pub fn score(match_len: usize, query_len: usize, haystack_len: usize) -> f64 {
    let denom = query_len.min(haystack_len).max(1);
    count_to_f64(match_len) / count_to_f64(denom)
}

/// Align `query` against a candidate's terms and package the result as a [`Hit`]
#[must_use]
pub fn score_candidate(
    query: &Query,
    identifier: impl Into<String>,
    name: impl Into<String>,
    offset: impl Into<String>,
    data_terms: Vec<Term>,
) -> Hit {
    let alignment = best_match(&data_terms, query.terms());
    let score = score(alignment.len(), query.len(), data_terms.len());
    Hit::new(identifier, name, offset, data_terms, alignment, score)
}
