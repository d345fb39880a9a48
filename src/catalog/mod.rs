//! Sources of candidate sequences.
//!
//! - [`client`]: HTTP access to the OEIS search API
//! - [`cache`]: on-disk cache of raw responses
//! - [`online`]: search responses to hits, with the relax retry
//! - [`offline`]: literal subsequence search over a `stripped` dump

use std::path::PathBuf;

use thiserror::Error;

pub mod cache;
pub mod client;
pub mod offline;
pub mod online;

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("Failed to read corpus file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
