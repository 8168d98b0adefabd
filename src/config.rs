use serde::Deserialize;

use crate::version::identifier::VersionIdentifier;

/// Baseline used when no other is configured
pub const DEFAULT_BASELINE: &str = "0.2.0-dev";

/// Default `RUST_LOG` directive for the binary
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Checker configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckerConfig {
    /// Oldest acceptable version
    pub baseline: VersionIdentifier,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            baseline: default_baseline(),
        }
    }
}

/// Parsed form of [`DEFAULT_BASELINE`]
pub fn default_baseline() -> VersionIdentifier {
    DEFAULT_BASELINE
        .parse()
        .expect("DEFAULT_BASELINE is a valid version")
}
