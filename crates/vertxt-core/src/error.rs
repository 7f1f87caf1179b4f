//! Error types for vertxt-core

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// A config file named explicitly does not exist.
    #[error("config file {0} does not exist")]
    Missing(Utf8PathBuf),
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors from validating and decomposing a version string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// The text does not satisfy the SemVer 2.0.0 grammar.
    #[error("invalid version from {source_label}: {raw_text:?}")]
    InvalidVersionSyntax {
        /// Where the text came from (usually a filename).
        source_label: String,
        /// The text exactly as it was supplied.
        raw_text: String,
    },

    /// A core component is too large for a `u64`.
    #[error("{component} version {value} from {source_label} does not fit in 64 bits")]
    NumericOverflow {
        /// Where the text came from (usually a filename).
        source_label: String,
        /// Which component overflowed (`major`, `minor` or `patch`).
        component: &'static str,
        /// The digits of the offending component.
        value: String,
    },
}

/// Result alias for version operations.
pub type VersionResult<T> = Result<T, VersionError>;

/// Errors from deriving names out of a version filename.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    /// The filename does not end with the `<label>[.]version.txt` convention.
    #[error("{filename:?} does not follow the <label>[.]version.txt naming convention")]
    MalformedFilename {
        /// The filename as supplied.
        filename: String,
    },
}

/// Result alias for naming operations.
pub type NameResult<T> = Result<T, NameError>;

/// Errors from evaluating a complete version file.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The filename could not be turned into names.
    #[error(transparent)]
    Name(#[from] NameError),

    /// The file content is not a valid version.
    #[error(transparent)]
    Version(#[from] VersionError),

    /// The path has no final file name component.
    #[error("{0} has no file name")]
    NoFileName(Utf8PathBuf),

    /// The version file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// The path that was read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// Result alias for version file evaluation.
pub type SourceResult<T> = Result<T, SourceError>;
