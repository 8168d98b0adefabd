//! Version parsing and baseline checking
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────┐  version()  ┌────────────────┐   parse   ┌───────────────────┐
//! │ PackageVersion │────────────▶│ VersionChecker │──────────▶│ VersionIdentifier │
//! │ (under test)   │             │  (baseline)    │◀──────────│ (release + pre)   │
//! └────────────────┘             └────────────────┘    Ord    └───────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`identifier`]: Version identifier parsing and total ordering
//! - [`checker`]: Baseline comparison and the package version seam
//! - [`error`]: Error types for parsing and checking

pub mod checker;
pub mod error;
pub mod identifier;
