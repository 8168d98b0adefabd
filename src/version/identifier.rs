//! Dotted-numeric version identifiers with an optional pre- or post-release tag
//!
//! Accepted forms (surrounding whitespace ignored, optional `v` prefix):
//!
//! - `0.2.0`, `1`, `2024.10.1.4`
//! - `0.2.0-dev`, `0.2.0.dev0`, `1.0rc1`, `v2.1-beta.3`
//! - `0.2.0.post1`, `1.0-rev2`, `1.0r3`
//!
//! Anything else is rejected with [`VersionError::Malformed`]; the parser never
//! substitutes a fallback value. In particular, unknown labels (`1.0-nightly`),
//! combined tags (`1.0a1.dev0`, `1.0.post1.dev0`), epochs (`1!2.0`), local
//! versions (`1.0+abc`) and implicit post-releases (`1.0-1`) are all rejected.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::version::error::VersionError;

/// `release [sep? label [sep? number]]`
static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[vV]?(?P<release>[0-9]+(?:\.[0-9]+)*)(?:[-_.]?(?P<label>[A-Za-z]+)(?:[-_.]?(?P<number>[0-9]+))?)?$",
    )
    .unwrap()
});

/// Kind of pre-release, ordered from lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PreReleaseKind {
    Dev,
    Alpha,
    Beta,
    ReleaseCandidate,
}

impl PreReleaseKind {
    /// Map a lowercased label to its kind
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "dev" => Some(Self::Dev),
            "a" | "alpha" => Some(Self::Alpha),
            "b" | "beta" => Some(Self::Beta),
            "c" | "rc" | "pre" | "preview" => Some(Self::ReleaseCandidate),
            _ => None,
        }
    }

    /// Canonical label used when displaying a version
    pub fn label(self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Alpha => "alpha",
            Self::Beta => "beta",
            Self::ReleaseCandidate => "rc",
        }
    }
}

/// Pre-release qualifier such as `dev` or `rc2`
///
/// A missing number is stored as `0`, so `dev` and `dev0` are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PreRelease {
    pub kind: PreReleaseKind,
    pub number: u64,
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.label())?;
        if self.number > 0 {
            write!(f, "{}", self.number)?;
        }
        Ok(())
    }
}

/// Where a version sits relative to its release, ordered lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Pre(PreRelease),
    Final,
    Post(u64),
}

/// Parsed version identifier
///
/// Ordering: release components compare lexicographically (a longer sequence
/// wins when the shorter one is its prefix); for equal releases a pre-release
/// ranks below the release and a post-release above it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionIdentifier {
    // Field order drives the derived Ord
    release: Vec<u64>,
    stage: Stage,
}

impl VersionIdentifier {
    /// Numeric release components, never empty
    pub fn release(&self) -> &[u64] {
        &self.release
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn pre(&self) -> Option<&PreRelease> {
        match &self.stage {
            Stage::Pre(pre) => Some(pre),
            _ => None,
        }
    }

    pub fn post(&self) -> Option<u64> {
        match self.stage {
            Stage::Post(number) => Some(number),
            _ => None,
        }
    }

    pub fn is_prerelease(&self) -> bool {
        self.pre().is_some()
    }
}

/// Parse a raw version string.
///
/// Examples:
/// - "0.2.0" -> release [0, 2, 0]
/// - "0.2.0-dev" -> release [0, 2, 0], pre dev0
/// - "1.0rc1" -> release [1, 0], pre rc1
/// - "0.2.0.post1" -> release [0, 2, 0], post 1
/// - "not-a-version" -> Err(Malformed)
pub fn parse(raw: &str) -> Result<VersionIdentifier, VersionError> {
    let malformed = || VersionError::Malformed {
        input: raw.to_string(),
    };

    let caps = VERSION_RE.captures(raw.trim()).ok_or_else(malformed)?;

    // Components can still overflow u64 after matching the pattern
    let release = caps["release"]
        .split('.')
        .map(|component| component.parse::<u64>().map_err(|_| malformed()))
        .collect::<Result<Vec<_>, _>>()?;

    let stage = match caps.name("label") {
        Some(label) => {
            let number = match caps.name("number") {
                Some(number) => number.as_str().parse::<u64>().map_err(|_| malformed())?,
                None => 0,
            };
            let label = label.as_str().to_ascii_lowercase();
            match label.as_str() {
                "post" | "rev" | "r" => Stage::Post(number),
                _ => {
                    let kind = PreReleaseKind::from_label(&label).ok_or_else(malformed)?;
                    Stage::Pre(PreRelease { kind, number })
                }
            }
        }
        None => Stage::Final,
    };

    let version = VersionIdentifier { release, stage };
    debug!("Parsed version '{}' as {}", raw, version);
    Ok(version)
}

impl fmt::Display for VersionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, component) in self.release.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", component)?;
        }
        match &self.stage {
            Stage::Pre(pre) => write!(f, "-{}", pre),
            Stage::Final => Ok(()),
            Stage::Post(number) => write!(f, ".post{}", number),
        }
    }
}

impl FromStr for VersionIdentifier {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl TryFrom<String> for VersionIdentifier {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse(&value)
    }
}

impl From<VersionIdentifier> for String {
    fn from(version: VersionIdentifier) -> Self {
        version.to_string()
    }
}
