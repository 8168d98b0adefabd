use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("Malformed version: '{input}'")]
    Malformed { input: String },
}

#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    Malformed(#[from] VersionError),

    #[error("{package} version {current} is older than the baseline {baseline}")]
    TooOld {
        package: String,
        current: String,
        baseline: String,
    },
}
