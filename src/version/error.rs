use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no version found in file name")]
    NoVersionFound,

    #[error("invalid version: {0}")]
    InvalidVersion(#[from] semver::Error),
}

#[derive(Debug, Error)]
pub enum RangeError {
    #[error("empty version constraint")]
    Empty,

    #[error("invalid version constraint '{spec}': {reason}")]
    Malformed { spec: String, reason: String },
}
