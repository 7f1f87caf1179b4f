//! Core library for vertxt.
//!
//! Validates the SemVer 2.0.0 string kept in a `version.txt` file, splits it
//! into typed parts, and derives the names an emission layer uses for the
//! artifact it generates from that file. Everything here is pure except
//! [`source::read_version_file`] and configuration loading.
//!
//! # Modules
//!
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//! - [`naming`] - Names derived from `<label>[.]version.txt` filenames
//! - [`source`] - Evaluating a version file as a whole
//! - [`version`] - Grammar check and decomposition
//!
//! # Quick Start
//!
//! ```
//! use vertxt_core::{naming, version};
//!
//! let names = naming::derive("Platform1.Version.txt").unwrap();
//! let parsed = version::parse("2.3.4-alpha.5", "Platform1.Version.txt").unwrap();
//!
//! assert_eq!(names.identifier("Version"), "Platform1Version");
//! assert_eq!(parsed.prerelease_identifiers(), ["alpha", "5"]);
//! ```
#![deny(unsafe_code)]

pub mod config;

pub mod error;

pub mod naming;

pub mod source;

pub mod version;

pub use config::{Config, ConfigLoader, LoadedConfig, LogLevel};

pub use error::{
    ConfigError, ConfigResult, NameError, NameResult, SourceError, SourceResult, VersionError,
    VersionResult,
};

pub use naming::{DerivedNames, derive};

pub use source::{VersionReport, evaluate, read_version_file};

pub use version::{ParsedVersion, parse};

// Re-export semver so downstream crates don't need a direct dependency.
pub use semver;
