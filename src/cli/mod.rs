//! Command-line interface for oeis-probe.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **probe**: Find OEIS sequences containing a run of integer terms (default)
//! - **fetch**: Print the raw OEIS record for an A-number
//!
//! ## Usage
//!
//! ```text
//! # Probe online (the subcommand may be omitted)
//! oeis-probe "1,2,3,6,11,23,47,106,235"
//!
//! # Probe a local dump only, explaining the best hit
//! oeis-probe probe --no-online --offline-stripped stripped.gz \
//!     --offline-names names.gz --explain-top "0,1,1,2,3,5,8,13"
//!
//! # Fetch a sequence record
//! oeis-probe fetch A000045
//! ```

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::warn;

use crate::catalog::cache::{DiskCache, DEFAULT_CACHE_TTL_DAYS};
use crate::catalog::client::{HttpTransport, OeisClient, DEFAULT_OEIS_BASE, DEFAULT_TIMEOUT_SECS};

pub mod fetch;
pub mod probe;

#[derive(Parser)]
#[command(name = "oeis-probe")]
#[command(version)]
#[command(about = "Probe integer sequences against the OEIS")]
#[command(
    long_about = "oeis-probe looks up a list of integer terms in the On-Line Encyclopedia of Integer Sequences.\n\nIt queries the online JSON search and/or scans a local `stripped` dump, scores each candidate by the longest run of the query's leading terms it contains, and prints the best hits."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Probe by terms (default)
    Probe(probe::ProbeArgs),

    /// Fetch a sequence by A-number (online, JSON)
    Fetch(fetch::FetchArgs),
}

/// Options for talking to the OEIS server
#[derive(Args, Debug, Clone)]
pub struct OnlineArgs {
    /// Network timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: f64,

    /// Base URL of the OEIS server
    #[arg(long, default_value = DEFAULT_OEIS_BASE)]
    pub oeis_base: String,

    /// Directory for cached responses (defaults to the user cache directory)
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Cached responses older than this are fetched again
    #[arg(long, default_value_t = DEFAULT_CACHE_TTL_DAYS)]
    pub cache_ttl_days: u32,
}

impl OnlineArgs {
    /// Build a cached HTTP client from these options.
    ///
    /// A cache directory that cannot be created only disables caching.
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is not a finite non-negative number or
    /// the HTTP client cannot be built.
    pub fn build_client(&self) -> anyhow::Result<OeisClient> {
        let timeout = Duration::try_from_secs_f64(self.timeout)
            .with_context(|| format!("invalid --timeout {}", self.timeout))?;
        let transport = HttpTransport::new(timeout)?;
        let client = OeisClient::new(self.oeis_base.as_str(), Box::new(transport));

        let dir = self.cache_dir.clone().unwrap_or_else(DiskCache::default_dir);
        match DiskCache::open(&dir, self.cache_ttl_days) {
            Ok(cache) => Ok(client.with_cache(Box::new(cache))),
            Err(e) => {
                warn!("Response cache disabled ({}): {e}", dir.display());
                Ok(client)
            }
        }
    }
}

/// Insert the `probe` subcommand when the first argument names no subcommand.
///
/// `args` includes the program name, as from [`std::env::args_os`]. Leading
/// global `-v`/`--verbose` flags are skipped before looking for a subcommand.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    const PASSTHROUGH: [&str; 7] = ["probe", "fetch", "help", "-h", "--help", "-V", "--version"];
    const GLOBAL_FLAGS: [&str; 2] = ["-v", "--verbose"];

    let mut args: Vec<OsString> = args.into_iter().collect();
    let first = args
        .iter()
        .skip(1)
        .position(|arg| !arg.to_str().is_some_and(|arg| GLOBAL_FLAGS.contains(&arg)))
        .map_or(args.len(), |idx| idx + 1);

    let explicit = args
        .get(first)
        .and_then(|arg| arg.to_str())
        .is_some_and(|arg| PASSTHROUGH.contains(&arg));

    if !explicit {
        args.insert(first, OsString::from("probe"));
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalized(args: &[&str]) -> Vec<String> {
        normalize_args(args.iter().map(OsString::from))
            .into_iter()
            .map(|a| a.into_string().unwrap())
            .collect()
    }

    #[test]
    fn test_probe_inserted_before_terms() {
        assert_eq!(
            normalized(&["oeis-probe", "1,2,3"]),
            ["oeis-probe", "probe", "1,2,3"]
        );
    }

    #[test]
    fn test_probe_inserted_when_no_args() {
        assert_eq!(normalized(&["oeis-probe"]), ["oeis-probe", "probe"]);
    }

    #[test]
    fn test_explicit_subcommands_untouched() {
        assert_eq!(
            normalized(&["oeis-probe", "fetch", "A000045"]),
            ["oeis-probe", "fetch", "A000045"]
        );
        assert_eq!(normalized(&["oeis-probe", "--help"]), ["oeis-probe", "--help"]);
    }

    #[test]
    fn test_leading_verbose_is_skipped() {
        assert_eq!(
            normalized(&["oeis-probe", "-v", "fetch", "A000045"]),
            ["oeis-probe", "-v", "fetch", "A000045"]
        );
        assert_eq!(
            normalized(&["oeis-probe", "--verbose", "probe", "1,2"]),
            ["oeis-probe", "--verbose", "probe", "1,2"]
        );
        assert_eq!(
            normalized(&["oeis-probe", "-v", "1,2"]),
            ["oeis-probe", "-v", "probe", "1,2"]
        );
        assert_eq!(normalized(&["oeis-probe", "-v"]), ["oeis-probe", "-v", "probe"]);
    }

    #[test]
    fn test_parse_default_probe() {
        let cli = Cli::parse_from(normalize_args(
            ["oeis-probe", "--no-online", "1,2,3"].map(OsString::from),
        ));
        match cli.command {
            Commands::Probe(args) => {
                assert!(args.no_online);
                assert_eq!(args.terms.as_deref(), Some("1,2,3"));
                assert_eq!(args.max_hits, 10);
            }
            Commands::Fetch(_) => panic!("expected probe"),
        }
    }

    #[test]
    fn test_negative_leading_term_is_not_a_flag() {
        let cli = Cli::try_parse_from(normalize_args(
            ["oeis-probe", "probe", "-1,2,-3"].map(OsString::from),
        ))
        .unwrap();
        match cli.command {
            Commands::Probe(args) => assert_eq!(args.terms.as_deref(), Some("-1,2,-3")),
            Commands::Fetch(_) => panic!("expected probe"),
        }
    }

    #[test]
    fn test_terms_and_terms_file_conflict() {
        let result = Cli::try_parse_from(
            ["oeis-probe", "probe", "1,2", "--terms-file", "t.txt"].map(OsString::from),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_probe_requires_input() {
        assert!(Cli::try_parse_from(["oeis-probe", "probe"].map(OsString::from)).is_err());
    }

    #[test]
    fn test_invalid_timeout() {
        let args = OnlineArgs {
            timeout: -1.0,
            oeis_base: DEFAULT_OEIS_BASE.to_string(),
            cache_dir: None,
            cache_ttl_days: DEFAULT_CACHE_TTL_DAYS,
        };
        assert!(args.build_client().is_err());
    }
}
