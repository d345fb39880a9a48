//! # oeis-probe
//!
//! A library for finding integer sequences in the On-Line Encyclopedia of
//! Integer Sequences (OEIS) from a run of their terms.
//!
//! Terms recovered from an experiment, a paper or a puzzle are often noisy: the
//! sequence may start at a different offset, or the last few values are wrong.
//! `oeis-probe` therefore scores each candidate by the longest run of the
//! query's leading terms found anywhere in the candidate, instead of demanding
//! an exact match, and can explain where the query first diverges from the
//! best hit.
//!
//! ## Features
//!
//! - **Online search**: OEIS JSON search API with an on-disk response cache
//! - **Relaxed search**: retries with shorter query prefixes when nothing is found
//! - **Offline search**: literal scan of a local `stripped` dump (plain or gzip)
//! - **Merging**: online and offline hits reconciled by A-number
//! - **Ranking**: `strict` or `prefer-early` tie breaking
//! - **Diagnosis**: first mismatch between the query and the top hit
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use oeis_probe::catalog::client::{HttpTransport, OeisClient, DEFAULT_OEIS_BASE};
//! use oeis_probe::{ProbeConfig, ProbeEngine, Query};
//!
//! let transport = HttpTransport::new(Duration::from_secs(10)).unwrap();
//! let client = OeisClient::new(DEFAULT_OEIS_BASE, Box::new(transport));
//!
//! let query = Query::parse("1, 2, 3, 6, 11, 23, 47, 106, 235").unwrap();
//! let engine = ProbeEngine::new(ProbeConfig::default()).with_client(&client);
//! let report = engine.probe(&query).unwrap();
//!
//! for hit in &report.hits {
//!     println!("{} {:.2} {}", hit.identifier(), hit.score(), hit.name());
//! }
//! if let Some(diagnosis) = report.explain_top(&query) {
//!     println!("{diagnosis}");
//! }
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Online client, response cache, and offline corpus search
//! - [`core`]: Terms, queries, A-numbers and hits
//! - [`matching`]: Alignment, scoring, ranking, merging and diagnosis
//! - [`parsing`]: Parsers for term lists, search payloads, and corpus files
//! - [`cli`]: Command-line interface implementation

pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use catalog::client::OeisClient;
pub use core::{ANumber, Alignment, Hit, Query, Term};
pub use matching::engine::{OfflineCorpus, ProbeConfig, ProbeEngine, ProbeReport};
pub use matching::{MismatchDiagnosis, RankPolicy};
