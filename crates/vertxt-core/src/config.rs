//! Configuration loading and discovery.
//!
//! Sources, lowest precedence first:
//! 1. Built-in defaults
//! 2. `~/.config/vertxt/config.<ext>` (user config)
//! 3. `.vertxt.<ext>` or `vertxt.<ext>` in the search root or any parent,
//!    stopping at a `.git` boundary
//! 4. Files added with [`ConfigLoader::with_file`]
//!
//! Where `<ext>` is one of: `toml`, `yaml`, `yml`, `json`
//!
//! # Example
//! ```no_run
//! use camino::Utf8PathBuf;
//! use vertxt_core::config::ConfigLoader;
//!
//! let cwd = std::env::current_dir().unwrap();
//! let cwd = Utf8PathBuf::try_from(cwd).expect("current directory is not valid UTF-8");
//! let loaded = ConfigLoader::new()
//!     .with_project_search(&cwd)
//!     .load()
//!     .unwrap();
//! println!("{} from {:?}", loaded.config.naming.identifier_suffix, loaded.sources);
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// The configuration for vertxt.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Log level for the application (e.g., "debug", "info", "warn", "error").
    pub log_level: LogLevel,
    /// Directory for JSONL log files (falls back to platform defaults if unset).
    pub log_dir: Option<Utf8PathBuf>,
    /// How derived names are turned into identifiers and artifact names.
    pub naming: NamingConfig,
    /// Behavior of `vertxt inspect`.
    pub inspect: InspectConfig,
}

/// Suffixes appended to [`DerivedNames`](crate::naming::DerivedNames).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct NamingConfig {
    /// Appended to the identifier label (`Platform1` becomes `Platform1Version`).
    pub identifier_suffix: String,
    /// Appended to the emission base name after a dot.
    pub artifact_extension: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            identifier_suffix: "Version".to_string(),
            artifact_extension: "g.rs".to_string(),
        }
    }
}

/// Batch behavior when inspecting several files.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct InspectConfig {
    /// Stop at the first file that fails instead of reporting every file.
    pub fail_fast: bool,
}

/// Log level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Verbose output for debugging and development.
    Debug,
    /// Standard operational information (default).
    #[default]
    Info,
    /// Warnings about potential issues.
    Warn,
    /// Errors that indicate failures.
    Error,
}

impl LogLevel {
    /// Returns the log level as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// A merged [`Config`] and the files it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedConfig {
    /// The merged configuration.
    pub config: Config,
    /// Files merged into `config`, lowest precedence first.
    pub sources: Vec<Utf8PathBuf>,
}

/// Supported configuration file extensions (in order of preference).
const CONFIG_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

/// Application name for XDG directory lookup and config file names.
const APP_NAME: &str = "vertxt";

/// Builder for loading configuration from multiple sources.
#[derive(Debug)]
pub struct ConfigLoader {
    project_search_root: Option<Utf8PathBuf>,
    include_user_config: bool,
    /// Stop walking up at a directory containing this entry.
    boundary_marker: Option<String>,
    explicit_files: Vec<Utf8PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a loader that reads user config and stops at `.git`.
    pub fn new() -> Self {
        Self {
            project_search_root: None,
            include_user_config: true,
            boundary_marker: Some(".git".to_string()),
            explicit_files: Vec::new(),
        }
    }

    /// Walk up from `path` looking for a project config file.
    pub fn with_project_search<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.project_search_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set whether to include user config from `~/.config/vertxt/`.
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.include_user_config = include;
        self
    }

    /// Stop the upward search at a directory containing `marker`.
    pub fn with_boundary_marker<S: Into<String>>(mut self, marker: S) -> Self {
        self.boundary_marker = Some(marker.into());
        self
    }

    /// Search all the way to the filesystem root.
    pub fn without_boundary_marker(mut self) -> Self {
        self.boundary_marker = None;
        self
    }

    /// Add an explicit config file. Later files take precedence.
    ///
    /// Unlike discovered files, it must exist when [`load`](Self::load) runs.
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.explicit_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Load configuration, merging all discovered sources.
    ///
    /// The returned [`LoadedConfig`] lists every file that was merged.
    #[tracing::instrument(skip(self), fields(search_root = ?self.project_search_root))]
    pub fn load(self) -> ConfigResult<LoadedConfig> {
        tracing::debug!("loading configuration");
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let mut sources = Vec::new();

        if self.include_user_config
            && let Some(user_config) = find_user_config()
        {
            sources.push(user_config);
        }

        if let Some(ref root) = self.project_search_root
            && let Some(project_config) = self.find_project_config(root)
        {
            sources.push(project_config);
        }

        for file in self.explicit_files {
            if !file.is_file() {
                return Err(ConfigError::Missing(file));
            }
            sources.push(file);
        }

        for file in &sources {
            figment = merge_file(figment, file);
        }

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        tracing::info!(
            log_level = config.log_level.as_str(),
            identifier_suffix = %config.naming.identifier_suffix,
            sources = sources.len(),
            "configuration loaded"
        );
        Ok(LoadedConfig { config, sources })
    }

    fn find_project_config(&self, start: &Utf8Path) -> Option<Utf8PathBuf> {
        let mut current = Some(start);

        while let Some(dir) = current {
            for ext in CONFIG_EXTENSIONS {
                let dotfile = dir.join(format!(".{APP_NAME}.{ext}"));
                if dotfile.is_file() {
                    return Some(dotfile);
                }

                let regular = dir.join(format!("{APP_NAME}.{ext}"));
                if regular.is_file() {
                    return Some(regular);
                }
            }

            // The directory holding the marker is searched, its parents are not.
            if let Some(ref marker) = self.boundary_marker
                && dir.join(marker).exists()
            {
                break;
            }

            current = dir.parent();
        }

        None
    }
}

fn find_user_config() -> Option<Utf8PathBuf> {
    let config_dir = user_config_dir()?;

    CONFIG_EXTENSIONS
        .iter()
        .map(|ext| config_dir.join(format!("config.{ext}")))
        .find(|path| path.is_file())
}

/// Merge a config file into the figment, detecting format from extension.
fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
    match path.extension() {
        Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path.as_str())),
        Some("json") => figment.merge(Json::file_exact(path.as_str())),
        _ => figment.merge(Toml::file_exact(path.as_str())),
    }
}

/// The user config directory (`~/.config/vertxt/` on Linux).
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("", "", APP_NAME)?;
    Utf8PathBuf::from_path_buf(proj_dirs.config_dir().to_path_buf()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> Utf8PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        Utf8PathBuf::try_from(path).unwrap()
    }

    fn load_file(path: &Utf8Path) -> Config {
        ConfigLoader::new()
            .with_user_config(false)
            .with_file(path)
            .load()
            .unwrap()
            .config
    }

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.log_dir.is_none());
        assert_eq!(config.naming.identifier_suffix, "Version");
        assert_eq!(config.naming.artifact_extension, "g.rs");
        assert!(!config.inspect.fail_fast);
    }

    #[test]
    fn loader_falls_back_to_defaults() {
        let loaded = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .load()
            .unwrap();
        assert_eq!(loaded.config, Config::default());
        assert!(loaded.sources.is_empty());
    }

    #[test]
    fn toml_overrides_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = write(
            &tmp,
            "config.toml",
            r#"log_level = "debug"
log_dir = "/tmp/vertxt"

[naming]
identifier_suffix = "Info"

[inspect]
fail_fast = true
"#,
        );

        let config = load_file(&path);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.log_dir.as_deref().map(Utf8Path::as_str), Some("/tmp/vertxt"));
        assert_eq!(config.naming.identifier_suffix, "Info");
        // Unset keys inside a section keep their defaults.
        assert_eq!(config.naming.artifact_extension, "g.rs");
        assert!(config.inspect.fail_fast);
    }

    #[test]
    fn yaml_and_json_are_supported() {
        let tmp = TempDir::new().unwrap();
        let yaml = write(&tmp, "config.yaml", "naming:\n  artifact_extension: g.cs\n");
        assert_eq!(load_file(&yaml).naming.artifact_extension, "g.cs");

        let json = write(&tmp, "config.json", r#"{"log_level": "warn"}"#);
        assert_eq!(load_file(&json).log_level, LogLevel::Warn);
    }

    #[test]
    fn later_file_overrides_earlier() {
        let tmp = TempDir::new().unwrap();
        let base = write(&tmp, "base.toml", r#"log_level = "warn""#);
        let over = write(&tmp, "override.toml", r#"log_level = "error""#);

        let config = ConfigLoader::new()
            .with_user_config(false)
            .with_file(&base)
            .with_file(&over)
            .load()
            .unwrap()
            .config;
        assert_eq!(config.log_level, LogLevel::Error);
    }

    #[test]
    fn project_config_found_from_subdirectory() {
        let tmp = TempDir::new().unwrap();
        let deep = tmp.path().join("project").join("src").join("deep");
        fs::create_dir_all(&deep).unwrap();
        fs::write(
            tmp.path().join("project").join(".vertxt.toml"),
            "[naming]\nidentifier_suffix = \"Ver\"\n",
        )
        .unwrap();

        let deep = Utf8PathBuf::try_from(deep).unwrap();
        let config = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .with_project_search(&deep)
            .load()
            .unwrap()
            .config;
        assert_eq!(config.naming.identifier_suffix, "Ver");
    }

    #[test]
    fn boundary_marker_stops_search() {
        let tmp = TempDir::new().unwrap();
        let parent = tmp.path().join("parent");
        let child = parent.join("child");
        let work = child.join("work");
        fs::create_dir_all(&work).unwrap();
        fs::write(parent.join("vertxt.toml"), r#"log_level = "warn""#).unwrap();
        fs::create_dir(child.join(".git")).unwrap();

        let work = Utf8PathBuf::try_from(work).unwrap();
        let loaded = ConfigLoader::new()
            .with_user_config(false)
            .with_boundary_marker(".git")
            .with_project_search(&work)
            .load()
            .unwrap();
        assert_eq!(loaded.config.log_level, LogLevel::Info);
        assert!(loaded.sources.is_empty());
    }

    #[test]
    fn config_beside_boundary_marker_is_found() {
        let tmp = TempDir::new().unwrap();
        let repo = tmp.path().join("repo");
        let src = repo.join("src");
        fs::create_dir_all(&src).unwrap();
        fs::create_dir(repo.join(".git")).unwrap();
        fs::write(repo.join(".vertxt.toml"), r#"log_level = "debug""#).unwrap();

        let src = Utf8PathBuf::try_from(src).unwrap();
        let loaded = ConfigLoader::new()
            .with_user_config(false)
            .with_project_search(&src)
            .load()
            .unwrap();
        assert_eq!(loaded.config.log_level, LogLevel::Debug);
        assert_eq!(loaded.sources, [Utf8PathBuf::try_from(repo.join(".vertxt.toml")).unwrap()]);
    }

    #[test]
    fn dotfile_preferred_over_regular_name() {
        let tmp = TempDir::new().unwrap();
        write(&tmp, ".vertxt.toml", r#"log_level = "debug""#);
        write(&tmp, "vertxt.toml", r#"log_level = "error""#);

        let root = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let loaded = ConfigLoader::new()
            .with_user_config(false)
            .with_project_search(&root)
            .load()
            .unwrap();
        assert_eq!(loaded.config.log_level, LogLevel::Debug);
        assert_eq!(loaded.sources.len(), 1);
        assert_eq!(loaded.sources[0].file_name(), Some(".vertxt.toml"));
    }

    #[test]
    fn explicit_file_overrides_project_config() {
        let tmp = TempDir::new().unwrap();
        write(&tmp, ".vertxt.toml", r#"log_level = "warn""#);
        let over = write(&tmp, "override.toml", r#"log_level = "error""#);

        let root = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let loaded = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .with_project_search(&root)
            .with_file(&over)
            .load()
            .unwrap();
        assert_eq!(loaded.config.log_level, LogLevel::Error);
        assert_eq!(loaded.sources.last(), Some(&over));
        assert_eq!(loaded.sources.len(), 2);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let absent = Utf8PathBuf::try_from(tmp.path().join("absent.toml")).unwrap();
        let result = ConfigLoader::new()
            .with_user_config(false)
            .with_file(&absent)
            .load();
        assert!(matches!(result, Err(ConfigError::Missing(path)) if path == absent));
    }

    #[test]
    fn invalid_value_is_a_deserialize_error() {
        let tmp = TempDir::new().unwrap();
        let path = write(&tmp, "bad.toml", r#"log_level = "loud""#);
        let result = ConfigLoader::new()
            .with_user_config(false)
            .with_file(&path)
            .load();
        assert!(matches!(result, Err(ConfigError::Deserialize(_))));
    }

    #[test]
    fn user_config_dir_names_the_app() {
        if let Some(path) = user_config_dir() {
            assert!(path.as_str().contains("vertxt"));
        }
    }
}
