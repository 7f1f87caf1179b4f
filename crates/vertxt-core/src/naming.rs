//! Names derived from a version filename.
//!
//! Version files follow the `<label>[.]version.txt` convention, matched
//! case-insensitively: `version.txt`, `Platform1.Version.txt`,
//! `serverVERSION.TXT`. The label names the generated identifier and the
//! part before `.txt` names the generated artifact.

use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::{NameError, NameResult};

const TXT: &str = ".txt";
const DOTTED_SUFFIX: &str = ".version.txt";
const SUFFIX: &str = "version.txt";

/// Names an emission layer needs for one version file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedNames {
    emission_base_name: String,
    identifier_label: String,
}

impl DerivedNames {
    /// The filename up to `.txt`, original case preserved.
    pub fn emission_base_name(&self) -> &str {
        &self.emission_base_name
    }

    /// The filename up to `.version.txt` (or `version.txt`). May be empty.
    pub fn identifier_label(&self) -> &str {
        &self.identifier_label
    }

    /// The label with `suffix` appended, e.g. `Platform1Version`.
    pub fn identifier(&self, suffix: &str) -> String {
        format!("{}{suffix}", self.identifier_label)
    }

    /// The base name with `.extension` appended, e.g. `Platform1.Version.g.rs`.
    pub fn artifact_name(&self, extension: &str) -> String {
        format!("{}.{}", self.emission_base_name, extension.trim_start_matches('.'))
    }
}

/// Derive the emission base name and identifier label from `filename`.
///
/// Positions are found in an ASCII-lowercased copy and cut from the
/// original, so case survives.
///
/// # Errors
///
/// [`NameError::MalformedFilename`] if the name contains no `version.txt`.
#[instrument]
pub fn derive(filename: &str) -> NameResult<DerivedNames> {
    let lower = filename.to_ascii_lowercase();
    let malformed = || NameError::MalformedFilename {
        filename: filename.to_string(),
    };

    let base_end = lower.find(TXT).ok_or_else(malformed)?;
    let label_end = lower
        .find(DOTTED_SUFFIX)
        .or_else(|| lower.find(SUFFIX))
        .ok_or_else(malformed)?;

    let names = DerivedNames {
        emission_base_name: filename[..base_end].to_string(),
        identifier_label: filename[..label_end].to_string(),
    };
    debug!(
        base = %names.emission_base_name,
        label = %names.identifier_label,
        "derived names"
    );
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(filename: &str) -> (String, String) {
        let derived = derive(filename).unwrap();
        (
            derived.emission_base_name().to_string(),
            derived.identifier_label().to_string(),
        )
    }

    #[test]
    fn dotted_label() {
        assert_eq!(
            names("Platform1.Version.txt"),
            ("Platform1.Version".to_string(), "Platform1".to_string())
        );
    }

    #[test]
    fn bare_version_file_has_empty_label() {
        let derived = derive("version.txt").unwrap();
        assert_eq!(derived.emission_base_name(), "version");
        assert_eq!(derived.identifier_label(), "");
        assert_eq!(derived.identifier("Version"), "Version");
    }

    #[test]
    fn undotted_label() {
        assert_eq!(
            names("serverVersion.txt"),
            ("serverVersion".to_string(), "server".to_string())
        );
    }

    #[test]
    fn search_ignores_case_but_keeps_it() {
        assert_eq!(
            names("Mobile.VERSION.TXT"),
            ("Mobile.VERSION".to_string(), "Mobile".to_string())
        );
        assert_eq!(
            names("ApiVeRsIoN.tXt"),
            ("ApiVeRsIoN".to_string(), "Api".to_string())
        );
    }

    #[test]
    fn first_txt_wins_for_base_name() {
        assert_eq!(
            names("a.txt.version.txt"),
            ("a".to_string(), "a.txt".to_string())
        );
    }

    #[test]
    fn non_ascii_label_is_sliced_safely() {
        assert_eq!(
            names("Ünïcødé.Version.txt"),
            ("Ünïcødé.Version".to_string(), "Ünïcødé".to_string())
        );
    }

    #[test]
    fn missing_suffix_is_malformed() {
        for filename in ["notes.txt", "Cargo.toml", "", "version.md", "versiontxt"] {
            assert_eq!(
                derive(filename),
                Err(NameError::MalformedFilename {
                    filename: filename.to_string(),
                }),
                "{filename:?}"
            );
        }
    }

    #[test]
    fn helpers_build_identifier_and_artifact() {
        let derived = derive("Platform2.version.txt").unwrap();
        assert_eq!(derived.identifier("Version"), "Platform2Version");
        assert_eq!(derived.artifact_name("g.rs"), "Platform2.version.g.rs");
        assert_eq!(derived.artifact_name(".g.cs"), "Platform2.version.g.cs");
    }
}
