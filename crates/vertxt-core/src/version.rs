//! Version validation and decomposition.
//!
//! A version file holds a single SemVer 2.0.0 string. [`parse`] checks the
//! text against the strict grammar *as supplied*, then trims it, drops one
//! leading `v`/`V`, and splits it into a [`ParsedVersion`].
//!
//! The grammar check runs before trimming. Surrounding whitespace and a `v`
//! prefix are therefore rejected; the only tolerated extra is one trailing
//! newline, which is how version files are usually saved.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::{VersionError, VersionResult};

/// SemVer 2.0.0, ASCII digits only, with an optional final `\n`.
const GRAMMAR: &str = concat!(
    r"^(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)",
    r"(?:-((?:0|[1-9][0-9]*|[0-9]*[a-zA-Z-][0-9a-zA-Z-]*)",
    r"(?:\.(?:0|[1-9][0-9]*|[0-9]*[a-zA-Z-][0-9a-zA-Z-]*))*))?",
    r"(?:\+([0-9a-zA-Z-]+(?:\.[0-9a-zA-Z-]+)*))?",
    r"\n?$",
);

static SEMVER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(GRAMMAR).expect("semver grammar must compile"));

/// Label used when a version is parsed through [`FromStr`].
const ANONYMOUS_SOURCE: &str = "<input>";

/// A validated version, split into its parts.
///
/// Every field is derived from the text handed to [`parse`]; nothing is
/// normalized. `full` is the trimmed text without its `v` prefix, so
/// `"1.0.0-rc.1+build.5"` keeps exactly that spelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedVersion {
    core: String,
    major: u64,
    minor: u64,
    patch: u64,
    is_prerelease: bool,
    prerelease: String,
    prerelease_identifiers: Vec<String>,
    metadata: String,
    metadata_identifiers: Vec<String>,
    full: String,
}

impl ParsedVersion {
    /// The `major.minor.patch` part, as written.
    pub fn core(&self) -> &str {
        &self.core
    }

    /// The major number.
    pub const fn major(&self) -> u64 {
        self.major
    }

    /// The minor number.
    pub const fn minor(&self) -> u64 {
        self.minor
    }

    /// The patch number.
    pub const fn patch(&self) -> u64 {
        self.patch
    }

    /// `true` when a `-` prerelease section is present.
    pub const fn is_prerelease(&self) -> bool {
        self.is_prerelease
    }

    /// Text between `-` and `+` (or the end). Empty when absent.
    pub fn prerelease(&self) -> &str {
        &self.prerelease
    }

    /// The prerelease section split on `.`.
    pub fn prerelease_identifiers(&self) -> &[String] {
        &self.prerelease_identifiers
    }

    /// Text after `+`. Empty when absent.
    pub fn metadata(&self) -> &str {
        &self.metadata
    }

    /// The build metadata section split on `.`.
    pub fn metadata_identifiers(&self) -> &[String] {
        &self.metadata_identifiers
    }

    /// The trimmed version text without a leading `v`.
    pub fn full(&self) -> &str {
        &self.full
    }

    /// Convert into a [`semver::Version`].
    ///
    /// Both accept the same grammar, so this only fails if the two ever
    /// disagree.
    pub fn to_semver(&self) -> Result<semver::Version, semver::Error> {
        semver::Version::parse(&self.full)
    }
}

impl fmt::Display for ParsedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full)
    }
}

impl FromStr for ParsedVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s, ANONYMOUS_SOURCE)
    }
}

/// Returns `true` if `text` passes the grammar check that [`parse`] applies.
pub fn is_valid(text: &str) -> bool {
    SEMVER.is_match(text)
}

/// Validate `raw_version_text` and decompose it.
///
/// `source_label` names where the text came from and only appears in
/// errors.
///
/// # Errors
///
/// [`VersionError::InvalidVersionSyntax`] if the text is not a SemVer 2.0.0
/// string, [`VersionError::NumericOverflow`] if a core number exceeds `u64`.
#[instrument(skip(raw_version_text))]
pub fn parse(raw_version_text: &str, source_label: &str) -> VersionResult<ParsedVersion> {
    if !is_valid(raw_version_text) {
        return Err(invalid(raw_version_text, source_label));
    }

    let trimmed = raw_version_text.trim();
    let full = trimmed.strip_prefix(['v', 'V']).unwrap_or(trimmed);

    // A '-' after the '+' belongs to the build metadata.
    let plus = full.find('+');
    let dash = full[..plus.unwrap_or(full.len())].find('-');

    let core = &full[..dash.or(plus).unwrap_or(full.len())];
    let mut numbers = core.split('.');
    let mut component = |name: &'static str| match numbers.next() {
        Some(digits) => digits
            .parse::<u64>()
            .map_err(|_| VersionError::NumericOverflow {
                source_label: source_label.to_string(),
                component: name,
                value: digits.to_string(),
            }),
        None => Err(invalid(raw_version_text, source_label)),
    };
    let major = component("major")?;
    let minor = component("minor")?;
    let patch = component("patch")?;

    let prerelease = dash.map_or("", |at| &full[at + 1..plus.unwrap_or(full.len())]);
    let metadata = plus.map_or("", |at| &full[at + 1..]);

    let version = ParsedVersion {
        core: core.to_string(),
        major,
        minor,
        patch,
        is_prerelease: dash.is_some(),
        prerelease: prerelease.to_string(),
        prerelease_identifiers: identifiers(prerelease),
        metadata: metadata.to_string(),
        metadata_identifiers: identifiers(metadata),
        full: full.to_string(),
    };
    debug!(
        full = %version.full,
        prerelease = version.is_prerelease,
        "parsed version"
    );
    Ok(version)
}

fn identifiers(section: &str) -> Vec<String> {
    if section.is_empty() {
        Vec::new()
    } else {
        section.split('.').map(str::to_string).collect()
    }
}

fn invalid(raw_text: &str, source_label: &str) -> VersionError {
    VersionError::InvalidVersionSyntax {
        source_label: source_label.to_string(),
        raw_text: raw_text.to_string(),
    }
}
