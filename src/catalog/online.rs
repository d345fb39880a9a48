//! Turns search responses into ranked hits.

use thiserror::Error;

use crate::catalog::client::{OeisClient, TransportError};
use crate::core::hit::Hit;
use crate::core::types::Query;
use crate::matching::ranking::{rank, RankPolicy};
use crate::matching::scoring::score_candidate;
use crate::parsing::payload::{PayloadError, SearchPayload};
use crate::parsing::{parse_data_terms, MAX_DATA_TERMS};

/// Records examined per requested hit
pub const CANDIDATES_PER_HIT: usize = 3;

/// Anything that makes the online probe come back empty-handed
#[derive(Error, Debug)]
pub enum OnlineError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Payload(#[from] PayloadError),
}

/// Score the records of a search response against `query`.
///
/// At most `3 * max_hits` records are examined. The result is ranked
/// `strict` and truncated to `max_hits`.
#[must_use]
pub fn hits_from_payload(query: &Query, payload: &SearchPayload, max_hits: usize) -> Vec<Hit> {
    let hits = payload
        .records()
        .iter()
        .take(max_hits.saturating_mul(CANDIDATES_PER_HIT))
        .map(|record| {
            score_candidate(
                query,
                record.a_number(),
                record.name(),
                record.offset(),
                parse_data_terms(record.data(), MAX_DATA_TERMS),
            )
        })
        .collect();

    let mut ranked = rank(hits, RankPolicy::Strict);
    ranked.truncate(max_hits);
    ranked
}

/// Settings for [`search_online`]
#[derive(Debug, Clone)]
pub struct OnlineSearch {
    pub max_hits: usize,
    /// Longest query prefix sent to the server
    pub max_query_terms: usize,
    /// Retry with shorter prefixes while the server finds nothing
    pub relax: bool,
    /// Shortest prefix tried in relax mode
    pub relax_min_terms: usize,
}

/// Hits from the online search plus the prefix length that produced them
#[derive(Debug, Clone)]
pub struct OnlineHits {
    pub hits: Vec<Hit>,
    pub query_terms_used: usize,
}

/// Query the server, shortening the prefix one term at a time in relax mode.
///
/// The first attempt sends `min(max_query_terms, len(query))` terms (at least
/// one). With `relax` set, each empty result drops the last term until a
/// result is non-empty or the prefix reaches `relax_min_terms`.
///
/// # Errors
///
/// Returns an `OnlineError` if any request fails or a response cannot be decoded.
pub fn search_online(
    client: &OeisClient,
    query: &Query,
    settings: &OnlineSearch,
) -> Result<OnlineHits, OnlineError> {
    let floor = settings.relax_min_terms.max(1);
    let mut query_len = query.len().min(settings.max_query_terms).max(1);

    loop {
        let value = client.search(query.terms(), query_len)?;
        let payload = SearchPayload::from_value(value)?;
        let hits = hits_from_payload(query, &payload, settings.max_hits);

        if !hits.is_empty() || !settings.relax || query_len <= floor {
            return Ok(OnlineHits {
                hits,
                query_terms_used: query_len,
            });
        }

        query_len -= 1;
        tracing::debug!("No online results, relaxing query to {query_len} terms");
    }
}
