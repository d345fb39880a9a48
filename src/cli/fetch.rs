use clap::Args;

use crate::cli::OnlineArgs;
use crate::core::types::ANumber;

#[derive(Args)]
pub struct FetchArgs {
    /// A-number like A000045
    pub a_number: String,

    #[command(flatten)]
    pub online: OnlineArgs,
}

/// Execute fetch subcommand
///
/// # Errors
///
/// Returns an error if the A-number is malformed or the lookup fails.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: FetchArgs, verbose: bool) -> anyhow::Result<()> {
    let a_number: ANumber = args.a_number.parse()?;
    let client = args.online.build_client()?;

    if verbose {
        eprintln!("Fetching {}", client.id_url(&a_number));
    }

    let payload = client.fetch_by_id(&a_number)?;
    println!("{}", serde_json::to_string_pretty(&payload)?);

    Ok(())
}
