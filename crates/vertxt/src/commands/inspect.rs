//! Inspect command — evaluate version files named on the command line.
//!
//! Each file is handled on its own: a bad file is reported and the rest are
//! still evaluated, unless fail-fast is on. The command fails if any file did.

use std::path::PathBuf;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use vertxt_core::config::{Config, NamingConfig};
use vertxt_core::source::{self, VersionReport};

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Version files to evaluate (e.g. `Platform1.Version.txt`)
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Stop at the first file that fails
    #[arg(long)]
    pub fail_fast: bool,
}

#[derive(Debug, Serialize)]
struct Inspection {
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    artifact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<VersionReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl Inspection {
    fn success(path: String, report: VersionReport, naming: &NamingConfig) -> Self {
        Self {
            path,
            identifier: Some(report.names.identifier(&naming.identifier_suffix)),
            artifact: Some(report.names.artifact_name(&naming.artifact_extension)),
            report: Some(report),
            error: None,
        }
    }

    fn failure(path: String, error: String) -> Self {
        Self {
            path,
            identifier: None,
            artifact: None,
            report: None,
            error: Some(error),
        }
    }

    const fn failed(&self) -> bool {
        self.error.is_some()
    }
}

fn inspect_files(
    files: &[PathBuf],
    fail_fast: bool,
    naming: &NamingConfig,
) -> anyhow::Result<Vec<Inspection>> {
    let mut inspections = Vec::with_capacity(files.len());

    for file in files {
        let path = Utf8PathBuf::try_from(file.clone())
            .with_context(|| format!("path is not valid UTF-8: {}", file.display()))?;

        let inspection = match source::read_version_file(&path) {
            Ok(report) => Inspection::success(path.to_string(), report, naming),
            Err(err) => {
                warn!(path = %path, error = %err, "version file rejected");
                Inspection::failure(path.to_string(), err.to_string())
            }
        };

        let stop = fail_fast && inspection.failed();
        inspections.push(inspection);
        if stop {
            debug!(path = %path, "stopping at first failure");
            break;
        }
    }

    Ok(inspections)
}

/// Evaluate each file in `args.files` and print what it parses to.
///
/// `--fail-fast` and the `inspect.fail_fast` config key both enable
/// stopping at the first failure.
#[instrument(name = "cmd_inspect", skip_all, fields(files = args.files.len()))]
pub fn cmd_inspect(args: InspectArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    let fail_fast = args.fail_fast || config.inspect.fail_fast;
    debug!(json_output = global_json, fail_fast, "executing inspect command");

    let inspections = inspect_files(&args.files, fail_fast, &config.naming)?;
    let failures = inspections.iter().filter(|i| i.failed()).count();

    if global_json {
        println!("{}", serde_json::to_string_pretty(&inspections)?);
    } else {
        for inspection in &inspections {
            print_inspection(inspection);
        }
    }

    if failures > 0 {
        anyhow::bail!(
            "{failures} of {} version file(s) failed",
            inspections.len()
        );
    }
    Ok(())
}

fn print_inspection(inspection: &Inspection) {
    match (&inspection.report, &inspection.error) {
        (Some(report), _) => {
            println!("{} {}", "✓".green(), inspection.path.bold());
            if let Some(ref identifier) = inspection.identifier {
                println!("  {}: {}", "Identifier".dimmed(), identifier.cyan());
            }
            if let Some(ref artifact) = inspection.artifact {
                println!("  {}: {}", "Artifact".dimmed(), artifact.cyan());
            }
            super::print_version(&report.version, "  ");
        }
        (None, error) => {
            eprintln!(
                "{} {}: {}",
                "✗".red(),
                inspection.path.bold(),
                error.as_deref().unwrap_or("unknown error").red()
            );
        }
    }
}
