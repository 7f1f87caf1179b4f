//! Parse command — validate and decompose a single version string.

use clap::Args;
use tracing::{debug, instrument};

use vertxt_core::version;

/// Arguments for the `parse` subcommand.
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// The version text, checked exactly as given (no trimming, no `v` prefix)
    pub version: String,

    /// Label to show in errors, e.g. the file the text came from
    #[arg(long, default_value = "<argument>")]
    pub source: String,
}

/// Parse `args.version` and print the result.
#[instrument(name = "cmd_parse", skip_all, fields(source = %args.source))]
pub fn cmd_parse(args: ParseArgs, global_json: bool) -> anyhow::Result<()> {
    let parsed = version::parse(&args.version, &args.source)?;
    debug!(json_output = global_json, "executing parse command");

    if global_json {
        println!("{}", serde_json::to_string_pretty(&parsed)?);
    } else {
        super::print_version(&parsed, "");
    }

    Ok(())
}
