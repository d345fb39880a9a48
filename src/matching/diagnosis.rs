use std::fmt;

use serde::Serialize;

use crate::core::hit::Hit;
use crate::core::term::Term;
use crate::core::types::Query;

/// Where a query stops agreeing with a candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MismatchDiagnosis {
    /// The whole query lines up with the candidate
    FullMatch {
        a_number: String,
        match_len: usize,
        query_len: usize,
    },

    /// No query term lines up with the candidate
    NoAlignment { a_number: String },

    /// The run of agreement ends before the query does
    Mismatch {
        a_number: String,
        /// 0-based index of the first query term that disagrees
        query_index: usize,
        /// Index into the candidate's terms at the same position
        hay_index: usize,
        /// Query term at `query_index`
        got: Term,
        /// Candidate term at `hay_index`, if the candidate is that long
        expected: Option<Term>,
    },
}

impl MismatchDiagnosis {
    /// Explain how `query` diverges from `hit`'s best alignment
    #[must_use]
    pub fn analyze(query: &Query, hit: &Hit) -> Self {
        let a_number = hit.identifier().to_string();
        let match_len = hit.match_len();

        if match_len >= query.len() {
            return Self::FullMatch {
                a_number,
                match_len,
                query_len: query.len(),
            };
        }

        let Some(match_at) = hit.match_at().filter(|_| match_len > 0) else {
            return Self::NoAlignment { a_number };
        };

        let query_index = match_len;
        let hay_index = match_at + match_len;
        Self::Mismatch {
            a_number,
            query_index,
            hay_index,
            got: query.terms()[query_index].clone(),
            expected: hit.data_terms().get(hay_index).cloned(),
        }
    }
}

impl fmt::Display for MismatchDiagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FullMatch {
                a_number,
                match_len,
                query_len,
            } => write!(f, "top {a_number}: full match ({match_len}/{query_len})"),
            Self::NoAlignment { a_number } => write!(f, "top {a_number}: no alignment"),
            Self::Mismatch {
                a_number,
                query_index,
                hay_index,
                got,
                expected,
            } => {
                let expected = expected.as_ref().map_or_else(|| "None".to_string(), Term::to_string);
                write!(
                    f,
                    "top {a_number}: first mismatch at query[{query_index}] (#{}) -> got {got}; \
                     expected {expected} (hit data index {hay_index})",
                    query_index + 1
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hit::Alignment;
    use crate::core::term::terms_from;

    fn query(values: &[i64]) -> Query {
        Query::new(terms_from(values)).unwrap()
    }

    #[test]
    fn test_reports_first_mismatch() {
        let hit = Hit::new(
            "A999999",
            "x",
            "",
            terms_from(&[0, 1, 3, 6, 2, 7, 13, 20, 12, 21, 11, 22]),
            Alignment::new(11, 0),
            0.9,
        );
        let q = query(&[0, 1, 3, 6, 2, 7, 13, 20, 12, 21, 11, 99]);

        let diagnosis = MismatchDiagnosis::analyze(&q, &hit);
        assert_eq!(
            diagnosis,
            MismatchDiagnosis::Mismatch {
                a_number: "A999999".to_string(),
                query_index: 11,
                hay_index: 11,
                got: Term::from(99),
                expected: Some(Term::from(22)),
            }
        );
        assert_eq!(
            diagnosis.to_string(),
            "top A999999: first mismatch at query[11] (#12) -> got 99; expected 22 (hit data index 11)"
        );
    }

    #[test]
    fn test_mismatch_past_end_of_candidate() {
        let hit = Hit::new("A000002", "", "", terms_from(&[9, 1, 2]), Alignment::new(2, 1), 1.0);
        let q = query(&[1, 2, 3]);

        match MismatchDiagnosis::analyze(&q, &hit) {
            MismatchDiagnosis::Mismatch {
                hay_index,
                got,
                expected,
                ..
            } => {
                assert_eq!(hay_index, 3);
                assert_eq!(got, Term::from(3));
                assert_eq!(expected, None);
            }
            other => panic!("expected mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_full_match() {
        let hit = Hit::new("A000027", "", "", terms_from(&[1, 2, 3, 4]), Alignment::new(3, 0), 1.0);
        let diagnosis = MismatchDiagnosis::analyze(&query(&[1, 2, 3]), &hit);
        assert_eq!(diagnosis.to_string(), "top A000027: full match (3/3)");
    }

    #[test]
    fn test_no_alignment() {
        let hit = Hit::new("A000001", "", "", terms_from(&[5, 6]), Alignment::NONE, 0.0);
        let diagnosis = MismatchDiagnosis::analyze(&query(&[1, 2]), &hit);
        assert_eq!(
            diagnosis,
            MismatchDiagnosis::NoAlignment {
                a_number: "A000001".to_string()
            }
        );
    }

    #[test]
    fn test_serializes_with_status_tag() {
        let hit = Hit::new("A000001", "", "", terms_from(&[1, 5]), Alignment::new(1, 0), 0.5);
        let json = serde_json::to_value(MismatchDiagnosis::analyze(&query(&[1, 2]), &hit)).unwrap();
        assert_eq!(json["status"], "mismatch");
        assert_eq!(json["query_index"], 1);
        assert_eq!(json["got"], 2);
        assert_eq!(json["expected"], 5);
    }
}
