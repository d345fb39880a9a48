//! Parsers for the text formats the prober consumes.
//!
//! - **Query terms**: free-form text such as `1, 2,3  4` ([`terms`])
//! - **Search payloads**: the JSON returned by the OEIS search endpoint ([`payload`])
//! - **Corpus files**: the `stripped` and `names` dumps, plain or gzip ([`corpus`])
//!
//! ## Example
//!
//! ```rust
//! use oeis_probe::parsing::terms::parse_terms;
//!
//! let terms = parse_terms("0 1 1 2, 3, 5").unwrap();
//! assert_eq!(terms.len(), 6);
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use thiserror::Error;

use crate::core::term::Term;

pub mod corpus;
pub mod payload;
pub mod terms;

/// Maximum number of terms kept from a single catalog entry
pub const MAX_DATA_TERMS: usize = 400;

/// Malformed user input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty terms string")]
    EmptyInput,

    #[error("bad term '{0}' (expected integer)")]
    BadTerm(String),

    #[error("expected A-number like A000045, got '{0}'")]
    InvalidANumber(String),
}

/// Check if the path is a gzip or bgzip file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
pub fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Open a plain or gzip-compressed text file for line reading.
///
/// Uses a multi-member decoder so bgzip files decode past their first block.
///
/// # Errors
///
/// Returns an IO error if the file cannot be opened.
pub fn open_text(path: &Path) -> std::io::Result<Box<dyn BufRead>> {
    let file = File::open(path)?;
    if is_gzipped(path) {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Parse a comma-separated list of terms, keeping at most `max_terms`.
///
/// Empty items are skipped. Parsing stops at the first malformed item and the
/// terms read so far are returned.
#[must_use]
pub fn parse_data_terms(data: &str, max_terms: usize) -> Vec<Term> {
    let mut out = Vec::new();
    for item in data.split(',').map(str::trim) {
        if out.len() >= max_terms {
            break;
        }
        if item.is_empty() {
            continue;
        }
        match item.parse::<Term>() {
            Ok(term) => out.push(term),
            Err(_) => break,
        }
    }
    out
}
