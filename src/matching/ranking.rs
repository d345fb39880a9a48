use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::core::hit::Hit;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid rank policy '{0}' (expected 'strict' or 'prefer-early')")]
pub struct InvalidPolicy(pub String);

/// How ties between equally scored hits are ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum RankPolicy {
    /// Order by `(score, match_len)` only; ties keep input order
    #[default]
    Strict,
    /// Like `strict`, then prefer alignments nearer the start of the candidate
    PreferEarly,
}

impl RankPolicy {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::PreferEarly => "prefer-early",
        }
    }
}

impl FromStr for RankPolicy {
    type Err = InvalidPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(Self::Strict),
            "prefer-early" => Ok(Self::PreferEarly),
            other => Err(InvalidPolicy(other.to_string())),
        }
    }
}

impl fmt::Display for RankPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `1 / (1 + match_at)`, or 0 when the hit has no alignment
fn earliness(hit: &Hit) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    hit.match_at().map_or(0.0, |at| 1.0 / (1.0 + at as f64))
}

/// Compare two hits under `policy`, best first
#[must_use]
pub fn compare(a: &Hit, b: &Hit, policy: RankPolicy) -> Ordering {
    let primary = b
        .score()
        .total_cmp(&a.score())
        .then_with(|| b.match_len().cmp(&a.match_len()));

    match policy {
        RankPolicy::Strict => primary,
        RankPolicy::PreferEarly => primary.then_with(|| earliness(b).total_cmp(&earliness(a))),
    }
}

/// Sort hits best first. The sort is stable, so ranking twice is a no-op.
#[must_use]
pub fn rank(mut hits: Vec<Hit>, policy: RankPolicy) -> Vec<Hit> {
    hits.sort_by(|a, b| compare(a, b, policy));
    hits
}

/// Rank hits using a policy given by name
///
/// # Errors
///
/// Returns `InvalidPolicy` if `policy` is not `strict` or `prefer-early`.
pub fn rank_by_name(hits: Vec<Hit>, policy: &str) -> Result<Vec<Hit>, InvalidPolicy> {
    Ok(rank(hits, policy.parse()?))
}
