//! Alignment, scoring, ranking and reconciliation of candidate sequences.
//!
//! - [`subsequence`]: longest run of the query's leading terms found anywhere in a candidate
//! - [`scoring`]: turns an alignment into a [`Hit`](crate::core::hit::Hit) with a score
//! - [`ranking`]: `strict` and `prefer-early` orderings
//! - [`merge`]: union of online and offline hits by A-number
//! - [`diagnosis`]: where a query first diverges from a hit
//! - [`engine`]: [`ProbeEngine`] ties the sources and the steps above together
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use oeis_probe::{OfflineCorpus, ProbeConfig, ProbeEngine, Query};
//!
//! let query = Query::parse("0, 1, 1, 2, 3, 5, 8, 13").unwrap();
//! let corpus = OfflineCorpus {
//!     stripped: PathBuf::from("stripped.gz"),
//!     names: Some(PathBuf::from("names.gz")),
//! };
//!
//! let engine = ProbeEngine::new(ProbeConfig::default()).with_offline(&corpus);
//! let report = engine.probe(&query).unwrap();
//!
//! for hit in &report.hits {
//!     println!("{} {:.2} {}", hit.identifier(), hit.score(), hit.name());
//! }
//! ```

pub mod diagnosis;
pub mod engine;
pub mod merge;
pub mod ranking;
pub mod scoring;
pub mod subsequence;

pub use diagnosis::MismatchDiagnosis;
pub use engine::{OfflineCorpus, ProbeConfig, ProbeEngine, ProbeReport};
pub use ranking::RankPolicy;
