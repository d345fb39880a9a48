use std::collections::HashMap;

use crate::core::hit::Hit;

/// Hits keyed by identifier, in first-insertion order
#[derive(Debug, Default)]
pub struct MergedHits {
    hits: Vec<Hit>,
    /// Index: identifier -> position in `hits`
    by_id: HashMap<String, usize>,
}

impl MergedHits {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `hit`, replacing any entry with the same identifier
    pub fn insert(&mut self, hit: Hit) {
        match self.by_id.get(hit.identifier()) {
            Some(&idx) => self.hits[idx] = hit,
            None => {
                self.by_id.insert(hit.identifier().to_string(), self.hits.len());
                self.hits.push(hit);
            }
        }
    }

    /// Store `hit` only if no entry exists or it beats the stored one on
    /// `(score, match_len)`
    pub fn offer(&mut self, hit: Hit) {
        match self.by_id.get(hit.identifier()) {
            Some(&idx) => {
                if beats(&hit, &self.hits[idx]) {
                    self.hits[idx] = hit;
                }
            }
            None => self.insert(hit),
        }
    }

    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&Hit> {
        self.by_id.get(identifier).map(|&idx| &self.hits[idx])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Hit> {
        self.hits
    }
}

/// Lexicographic `(score, match_len)` comparison, strictly greater
fn beats(candidate: &Hit, stored: &Hit) -> bool {
    candidate
        .score()
        .total_cmp(&stored.score())
        .then_with(|| candidate.match_len().cmp(&stored.match_len()))
        .is_gt()
}

/// Union offline and online hits by identifier.
///
/// Offline hits seed the map. An online hit replaces the stored entry only
/// when its `(score, match_len)` is strictly greater, so offline wins ties.
#[must_use]
pub fn merge_hits(offline: Vec<Hit>, online: Vec<Hit>) -> MergedHits {
    let mut merged = MergedHits::new();
    for hit in offline {
        merged.insert(hit);
    }
    for hit in online {
        merged.offer(hit);
    }
    merged
}

/// Drop hits whose run is shorter than `min_match_len` (clamped to at least 1)
#[must_use]
pub fn filter_min_match_len(hits: Vec<Hit>, min_match_len: usize) -> Vec<Hit> {
    let min_match_len = min_match_len.max(1);
    hits.into_iter()
        .filter(|hit| hit.match_len() >= min_match_len)
        .collect()
}
