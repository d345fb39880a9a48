use clap::Parser;
use tracing_subscriber::EnvFilter;

use oeis_probe::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse_from(cli::normalize_args(std::env::args_os()));

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("oeis_probe=debug,info")
    } else {
        EnvFilter::new("oeis_probe=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Probe(args) => {
            cli::probe::run(args, cli.verbose)?;
        }
        cli::Commands::Fetch(args) => {
            cli::fetch::run(args, cli.verbose)?;
        }
    }

    Ok(())
}
