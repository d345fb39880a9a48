use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgGroup, Args};

use crate::cli::OnlineArgs;
use crate::core::hit::Hit;
use crate::core::types::Query;
use crate::matching::engine::{
    OfflineCorpus, ProbeConfig, ProbeEngine, DEFAULT_MAX_HITS, DEFAULT_MAX_QUERY_TERMS,
    DEFAULT_RELAX_MIN_TERMS,
};
use crate::matching::ranking::RankPolicy;

/// Query terms echoed above the hit table
const ECHO_TERMS: usize = 12;

/// Longest name shown in the hit table
const NAME_WIDTH: usize = 56;

#[derive(Args)]
#[command(group(ArgGroup::new("input").required(true).args(["terms", "terms_file"])))]
pub struct ProbeArgs {
    /// Terms like "1,2,3,6,11,23" (commas and/or whitespace)
    #[arg(allow_hyphen_values = true)]
    pub terms: Option<String>,

    /// Read terms from a text file (comma/space-separated)
    #[arg(long)]
    pub terms_file: Option<PathBuf>,

    /// Number of hits to show
    #[arg(long, default_value_t = DEFAULT_MAX_HITS)]
    pub max_hits: usize,

    /// Longest query prefix sent to the server
    #[arg(long, default_value_t = DEFAULT_MAX_QUERY_TERMS)]
    pub max_query_terms: usize,

    #[command(flatten)]
    pub online: OnlineArgs,

    /// Disable online lookup
    #[arg(long)]
    pub no_online: bool,

    /// If online search returns no results, retry with a shorter query prefix
    #[arg(long)]
    pub relax_online: bool,

    /// Minimum number of terms to keep when --relax-online is enabled
    #[arg(long, default_value_t = DEFAULT_RELAX_MIN_TERMS)]
    pub relax_min_terms: usize,

    /// Path to stripped or stripped.gz
    #[arg(long)]
    pub offline_stripped: Option<PathBuf>,

    /// Path to names or names.gz (optional)
    #[arg(long)]
    pub offline_names: Option<PathBuf>,

    /// Stop the offline scan after N lines
    #[arg(long)]
    pub offline_max_scan: Option<usize>,

    /// Drop hits whose consecutive match is shorter than this
    #[arg(long, default_value_t = 1)]
    pub min_match_len: usize,

    /// Explain where the query first diverges from the top hit
    #[arg(long)]
    pub explain_top: bool,

    /// Write the JSON result to a file (the summary is still printed)
    #[arg(long)]
    pub json_out: Option<PathBuf>,

    /// Ranking: 'prefer-early' prefers smaller alignment offsets on ties
    #[arg(long, value_enum, default_value_t = RankPolicy::Strict)]
    pub rank: RankPolicy,
}

/// Execute probe subcommand
///
/// # Errors
///
/// Returns an error if the terms are malformed, the offline corpus cannot be
/// read, or the JSON result cannot be written. Online failures only warn.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ProbeArgs, verbose: bool) -> anyhow::Result<()> {
    let query = read_query(&args)?;

    if verbose {
        eprintln!("Parsed {} query terms", query.len());
    }

    let config = ProbeConfig {
        max_hits: args.max_hits,
        max_query_terms: args.max_query_terms,
        relax_online: args.relax_online,
        relax_min_terms: args.relax_min_terms.max(1),
        min_match_len: args.min_match_len.max(1),
        rank: args.rank,
        offline_max_scan: args.offline_max_scan,
    };

    let client = if args.no_online {
        None
    } else {
        Some(args.online.build_client()?)
    };
    let corpus = args.offline_stripped.clone().map(|stripped| OfflineCorpus {
        stripped,
        names: args.offline_names.clone(),
    });

    let mut engine = ProbeEngine::new(config);
    if let Some(client) = &client {
        engine = engine.with_client(client);
    }
    if let Some(corpus) = &corpus {
        engine = engine.with_offline(corpus);
    }

    let report = engine.probe(&query)?;

    if verbose {
        if let Some(used) = report.online_query_terms {
            eprintln!("Online search used {used} query terms");
        }
    }

    print!("{}", render_hits(&query, &report.hits));

    if args.explain_top {
        if let Some(diagnosis) = report.explain_top(&query) {
            println!("[explain] {diagnosis}");
        }
    }

    if let Some(err) = &report.online_error {
        println!("[warn] online lookup failed: {err}");
    }

    if let Some(path) = &args.json_out {
        let result = serde_json::json!({
            "query_terms": query.terms(),
            "online_enabled": !args.no_online,
            "offline_enabled": args.offline_stripped.is_some(),
            "rank": args.rank.as_str(),
            "min_match_len": engine.config().min_match_len,
            "relax_online": args.relax_online,
            "relax_min_terms": args.relax_min_terms,
            "explain_top": args.explain_top,
            "hits": report.hits.iter().map(Hit::to_json_record).collect::<Vec<_>>(),
        });
        std::fs::write(path, serde_json::to_string_pretty(&result)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    Ok(())
}

fn read_query(args: &ProbeArgs) -> anyhow::Result<Query> {
    let text = match (&args.terms_file, &args.terms) {
        (Some(path), _) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("Failed to read terms file {}", path.display()))?;
            String::from_utf8_lossy(&bytes).into_owned()
        }
        (None, Some(terms)) => terms.clone(),
        (None, None) => anyhow::bail!("probe: provide TERMS or --terms-file"),
    };
    Ok(Query::parse(&text)?)
}

/// Render the query echo and the hit table
fn render_hits(query: &Query, hits: &[Hit]) -> String {
    let mut out = String::new();
    let ellipsis = if query.len() > ECHO_TERMS { "…" } else { "" };
    let _ = writeln!(
        out,
        "Query terms ({}): {}{ellipsis}",
        query.len(),
        query.to_query_string(Some(ECHO_TERMS))
    );

    if hits.is_empty() {
        out.push_str("No hits.\n");
        return out;
    }

    out.push('\n');
    let _ = writeln!(out, "{:8}  {:>5}  {:>7}  {:>4}  name", "A-number", "score", "match", "at");
    let _ = writeln!(out, "{}", "-".repeat(78));
    for hit in hits {
        let at = hit.match_at().map(|at| at.to_string()).unwrap_or_default();
        let _ = writeln!(
            out,
            "{:8}  {:5.2}  {:7}  {at:>4}  {}",
            hit.identifier(),
            hit.score(),
            hit.match_len(),
            truncate_name(hit.name())
        );
    }
    out
}

fn truncate_name(name: &str) -> String {
    if name.chars().count() > NAME_WIDTH {
        let mut short: String = name.chars().take(NAME_WIDTH - 3).collect();
        short.push_str("...");
        short
    } else {
        name.to_string()
    }
}
