//! Baseline comparison for package versions

use std::cmp::Ordering;
use std::fmt;

#[cfg(test)]
use mockall::automock;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::CheckerConfig;
use crate::version::error::{CheckError, VersionError};
use crate::version::identifier::{VersionIdentifier, parse};

/// A package that advertises its version as a string
#[cfg_attr(test, automock)]
pub trait PackageVersion: Send + Sync {
    /// Package name, used in diagnostics
    fn name(&self) -> &str;

    /// Raw version string advertised by the package
    fn version(&self) -> &str;
}

/// Package whose name and version are fixed at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticPackage {
    name: String,
    version: String,
}

impl StaticPackage {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// This crate, as described by its Cargo manifest
    pub fn this_crate() -> Self {
        Self::new(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }
}

impl PackageVersion for StaticPackage {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> &str {
        &self.version
    }
}

/// Status of the current version relative to the baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum VersionStatus {
    /// Current version is newer than the baseline
    Newer,
    /// Current version equals the baseline
    Equal,
    /// Current version is older than the baseline
    TooOld,
}

impl VersionStatus {
    pub fn is_at_least(self) -> bool {
        self != Self::TooOld
    }
}

/// Result of checking a package against the baseline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionCheckResult {
    pub package: String,
    pub current_version: VersionIdentifier,
    pub baseline: VersionIdentifier,
    pub status: VersionStatus,
}

impl VersionCheckResult {
    /// Pretty-printed JSON form of the result
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for VersionCheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            VersionStatus::TooOld => write!(
                f,
                "{} {} is older than {}",
                self.package, self.current_version, self.baseline
            ),
            _ => write!(
                f,
                "{} {} is at least {}",
                self.package, self.current_version, self.baseline
            ),
        }
    }
}

/// Returns true if `current` is greater than or equal to `baseline`
pub fn is_at_least(current: &VersionIdentifier, baseline: &VersionIdentifier) -> bool {
    current >= baseline
}

/// Checks packages against a fixed baseline version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionChecker {
    baseline: VersionIdentifier,
}

impl VersionChecker {
    pub fn new(baseline: VersionIdentifier) -> Self {
        Self { baseline }
    }

    pub fn from_config(config: &CheckerConfig) -> Self {
        Self::new(config.baseline.clone())
    }

    pub fn baseline(&self) -> &VersionIdentifier {
        &self.baseline
    }

    /// Compare the package's advertised version with the baseline.
    ///
    /// A version older than the baseline is reported through
    /// [`VersionStatus::TooOld`]; only a malformed version is an error.
    pub fn check<P: PackageVersion + ?Sized>(
        &self,
        package: &P,
    ) -> Result<VersionCheckResult, VersionError> {
        let current = parse(package.version()).inspect_err(|e| {
            warn!("Failed to parse version of '{}': {}", package.name(), e);
        })?;

        let status = match current.cmp(&self.baseline) {
            Ordering::Greater => VersionStatus::Newer,
            Ordering::Equal => VersionStatus::Equal,
            Ordering::Less => VersionStatus::TooOld,
        };

        debug!(
            "Checked {} {} against baseline {}: {:?}",
            package.name(),
            current,
            self.baseline,
            status
        );

        Ok(VersionCheckResult {
            package: package.name().to_string(),
            current_version: current,
            baseline: self.baseline.clone(),
            status,
        })
    }

    /// Like [`check`](Self::check), but a version older than the baseline is an error
    pub fn ensure<P: PackageVersion + ?Sized>(
        &self,
        package: &P,
    ) -> Result<VersionCheckResult, CheckError> {
        let result = self.check(package)?;

        if !result.status.is_at_least() {
            warn!(
                "{} version {} is older than baseline {}",
                result.package, result.current_version, result.baseline
            );
            return Err(CheckError::TooOld {
                current: result.current_version.to_string(),
                baseline: result.baseline.to_string(),
                package: result.package,
            });
        }

        Ok(result)
    }
}

impl Default for VersionChecker {
    fn default() -> Self {
        Self::from_config(&CheckerConfig::default())
    }
}
