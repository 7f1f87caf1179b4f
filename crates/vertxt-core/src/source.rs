//! Evaluating a whole version file: names first, then the version.

use camino::Utf8Path;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::{SourceError, SourceResult};
use crate::naming::{self, DerivedNames};
use crate::version::{self, ParsedVersion};

/// Everything an emission layer needs for one version file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionReport {
    /// The filename the names were derived from.
    pub filename: String,
    /// Artifact and identifier names.
    pub names: DerivedNames,
    /// The parsed file content.
    pub version: ParsedVersion,
}

/// Derive names from `filename`, then parse `content`.
///
/// The filename doubles as the source label in version errors.
///
/// # Errors
///
/// Returns [`SourceError::Name`] if the filename breaks the naming
/// convention, otherwise [`SourceError::Version`] if the content is invalid.
#[instrument(skip(content))]
pub fn evaluate(content: &str, filename: &str) -> SourceResult<VersionReport> {
    let names = naming::derive(filename)?;
    let version = version::parse(content, filename)?;
    Ok(VersionReport {
        filename: filename.to_string(),
        names,
        version,
    })
}

/// Read the file at `path` and [`evaluate`] it.
///
/// Only the final path component is used for naming.
///
/// # Errors
///
/// Returns [`SourceError::Read`] if the file cannot be read as UTF-8, plus
/// anything [`evaluate`] returns.
#[instrument]
pub fn read_version_file(path: &Utf8Path) -> SourceResult<VersionReport> {
    let filename = path
        .file_name()
        .ok_or_else(|| SourceError::NoFileName(path.to_path_buf()))?;
    let content = std::fs::read_to_string(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(bytes = content.len(), "read version file");
    evaluate(&content, filename)
}
