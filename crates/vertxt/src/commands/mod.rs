//! Command implementations

pub mod info;

pub mod inspect;

pub mod parse;

use owo_colors::OwoColorize;
use vertxt_core::ParsedVersion;

/// Print the fields of a parsed version, one per line, indented by `indent`.
///
/// Shared by `parse` and `inspect`.
pub fn print_version(version: &ParsedVersion, indent: &str) {
    let list = |items: &[String]| {
        if items.is_empty() {
            "[]".dimmed().to_string()
        } else {
            format!("[{}]", items.join(", "))
        }
    };

    println!("{indent}{}: {}", "Full".dimmed(), version.full().green());
    println!("{indent}{}: {}", "Core".dimmed(), version.core());
    println!(
        "{indent}{}: {} / {} / {}",
        "Major / minor / patch".dimmed(),
        version.major(),
        version.minor(),
        version.patch()
    );
    println!(
        "{indent}{}: {}",
        "Prerelease".dimmed(),
        if version.is_prerelease() {
            version.prerelease().yellow().to_string()
        } else {
            "no".to_string()
        }
    );
    println!(
        "{indent}{}: {}",
        "Prerelease identifiers".dimmed(),
        list(version.prerelease_identifiers())
    );
    println!("{indent}{}: {}", "Metadata".dimmed(), version.metadata().cyan());
    println!(
        "{indent}{}: {}",
        "Metadata identifiers".dimmed(),
        list(version.metadata_identifiers())
    );
}
