//! Subsequence search over a local `stripped` dump.

use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use tracing::debug;

use crate::catalog::CorpusError;
use crate::core::hit::Hit;
use crate::core::types::Query;
use crate::matching::ranking::{rank, RankPolicy};
use crate::matching::scoring::score_candidate;
use crate::parsing::corpus::{load_names, StrippedReader};
use crate::parsing::{open_text, parse_data_terms, MAX_DATA_TERMS};

/// Identifier -> sequence name
pub type NamesMap = HashMap<String, String>;

/// Limits for an offline scan
#[derive(Debug, Clone)]
pub struct OfflineSearch {
    /// Stop after this many matching lines
    pub max_hits: usize,
    /// Stop after this many corpus lines, if set
    pub max_scan: Option<usize>,
}

/// Load a names file
///
/// # Errors
///
/// Returns `CorpusError::Read` if the file cannot be opened or read.
pub fn load_names_map(path: &Path) -> Result<NamesMap, CorpusError> {
    load_names(path, None).map_err(|source| CorpusError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Search a `stripped` file (plain or gzip) for lines containing the query.
///
/// # Errors
///
/// Returns `CorpusError::Read` if the file cannot be opened or read.
pub fn search_stripped(
    query: &Query,
    stripped_path: &Path,
    names: Option<&NamesMap>,
    settings: &OfflineSearch,
) -> Result<Vec<Hit>, CorpusError> {
    let read_error = |source: std::io::Error| CorpusError::Read {
        path: stripped_path.to_path_buf(),
        source,
    };
    let reader = open_text(stripped_path).map_err(read_error)?;
    search_reader(query, reader, names, settings).map_err(read_error)
}

/// Scan `stripped`-format lines from any reader.
///
/// A line is a candidate only if `,t1,t2,...,tk,` occurs literally in its
/// term text; candidates are then aligned term by term. The scan stops once
/// `max_hits` candidates are found or `max_scan` valid lines were read.
///
/// # Errors
///
/// Returns an IO error if reading fails.
pub fn search_reader<R: BufRead>(
    query: &Query,
    reader: R,
    names: Option<&NamesMap>,
    settings: &OfflineSearch,
) -> std::io::Result<Vec<Hit>> {
    let mut hits = Vec::new();
    if settings.max_hits == 0 {
        return Ok(hits);
    }

    let needle = format!(",{},", query.to_query_string(None));
    let mut scanned = 0usize;

    for entry in StrippedReader::new(reader) {
        let entry = entry?;
        scanned += 1;

        if entry.terms.contains(&needle) {
            let name = names
                .and_then(|names| names.get(&entry.a_number))
                .map_or("", String::as_str);
            let data_terms = parse_data_terms(&entry.terms, MAX_DATA_TERMS);
            hits.push(score_candidate(query, entry.a_number.as_str(), name, "", data_terms));

            if hits.len() >= settings.max_hits {
                break;
            }
        }

        if settings.max_scan.is_some_and(|max_scan| scanned >= max_scan) {
            break;
        }
    }

    debug!("Offline scan read {scanned} lines, {} matched", hits.len());

    let mut ranked = rank(hits, RankPolicy::Strict);
    ranked.truncate(settings.max_hits);
    Ok(ranked)
}
