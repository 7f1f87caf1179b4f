//! Info command — show package and resolved configuration.

use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use vertxt_core::config::{self, LoadedConfig};

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {
    // No subcommand-specific arguments; uses global --json flag
}

#[derive(Serialize)]
struct PackageInfo {
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    repository: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    license: &'static str,
}

impl PackageInfo {
    const fn new() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
            repository: env!("CARGO_PKG_REPOSITORY"),
            license: env!("CARGO_PKG_LICENSE"),
        }
    }
}

#[derive(Serialize)]
struct ConfigInfo {
    config_files: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_config_dir: Option<String>,
    log_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    identifier_suffix: String,
    artifact_extension: String,
    fail_fast: bool,
}

impl ConfigInfo {
    fn from_loaded(loaded: &LoadedConfig) -> Self {
        let config = &loaded.config;
        Self {
            config_files: loaded.sources.iter().map(|p| p.to_string()).collect(),
            user_config_dir: config::user_config_dir().map(|p| p.to_string()),
            log_level: config.log_level.as_str().to_string(),
            log_dir: config.log_dir.as_ref().map(|p| p.to_string()),
            identifier_suffix: config.naming.identifier_suffix.clone(),
            artifact_extension: config.naming.artifact_extension.clone(),
            fail_fast: config.inspect.fail_fast,
        }
    }
}

#[derive(Serialize)]
struct FullInfo {
    #[serde(flatten)]
    package: PackageInfo,
    config: ConfigInfo,
}

/// Print package information and the configuration in effect.
#[instrument(name = "cmd_info", skip_all)]
pub fn cmd_info(_args: InfoArgs, global_json: bool, loaded: &LoadedConfig) -> anyhow::Result<()> {
    debug!(json_output = global_json, "executing info command");

    let info = FullInfo {
        package: PackageInfo::new(),
        config: ConfigInfo::from_loaded(loaded),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!(
        "{} {}",
        info.package.name.bold(),
        info.package.version.green()
    );
    if !info.package.description.is_empty() {
        println!("{}", info.package.description);
    }
    if !info.package.license.is_empty() {
        println!("{}: {}", "License".dimmed(), info.package.license);
    }
    if !info.package.repository.is_empty() {
        println!("{}: {}", "Repository".dimmed(), info.package.repository.cyan());
    }

    println!();
    println!("{}", "Configuration".bold().underline());
    if info.config.config_files.is_empty() {
        println!("{}: {}", "Config files".dimmed(), "none loaded".yellow());
    } else {
        println!("{}:", "Config files".dimmed());
        for path in &info.config.config_files {
            println!("  {}", path.cyan());
        }
    }
    if let Some(ref dir) = info.config.user_config_dir {
        println!("{}: {}", "User config directory".dimmed(), dir);
    }
    println!("{}: {}", "Log level".dimmed(), info.config.log_level);
    if let Some(ref dir) = info.config.log_dir {
        println!("{}: {}", "Log directory".dimmed(), dir);
    }
    println!(
        "{}: {}",
        "Identifier suffix".dimmed(),
        info.config.identifier_suffix
    );
    println!(
        "{}: .{}",
        "Artifact extension".dimmed(),
        info.config.artifact_extension
    );
    println!("{}: {}", "Fail fast".dimmed(), info.config.fail_fast);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use vertxt_core::Config;

    #[test]
    fn text_output_succeeds() {
        assert!(cmd_info(InfoArgs::default(), false, &LoadedConfig::default()).is_ok());
    }

    #[test]
    fn json_output_succeeds() {
        assert!(cmd_info(InfoArgs::default(), true, &LoadedConfig::default()).is_ok());
    }

    #[test]
    fn config_info_reflects_naming() {
        let info = ConfigInfo::from_loaded(&LoadedConfig::default());
        assert!(info.config_files.is_empty());
        assert_eq!(info.log_level, "info");
        assert_eq!(info.identifier_suffix, "Version");
        assert_eq!(info.artifact_extension, "g.rs");
        assert!(!info.fail_fast);
    }

    #[test]
    fn config_info_lists_loaded_sources() {
        let loaded = LoadedConfig {
            config: Config::default(),
            sources: vec![
                Utf8PathBuf::from("/home/dev/.config/vertxt/config.toml"),
                Utf8PathBuf::from("/work/repo/.vertxt.toml"),
            ],
        };
        let info = ConfigInfo::from_loaded(&loaded);
        assert_eq!(
            info.config_files,
            ["/home/dev/.config/vertxt/config.toml", "/work/repo/.vertxt.toml"]
        );
    }
}
