//! Crate-level error taxonomy
//!
//! Domain errors (`ConfigError`, `ClientError`, `RangeError`) are wrapped
//! in [`ResourceError`] for unified handling at the step boundary. Only
//! configuration problems and client failures abort a step; everything
//! recoverable is handled where it occurs.

use thiserror::Error;

use crate::client::ClientError;
use crate::version::error::RangeError;

/// Invalid resource configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("a pattern is required, e.g. 'repo-local/myfile.txt' or 'repo-local/my*.zip'")]
    MissingPattern,

    #[error("an Artifactory url is required")]
    MissingUrl,

    #[error("credentials are required: either a user/password pair or an apiKey")]
    MissingCredentials,
}

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("malformed request: {0}")]
    Request(#[source] serde_json::Error),

    #[error("failed to write response: {0}")]
    Response(#[source] serde_json::Error),

    #[error("the request carries no version to fetch")]
    MissingVersion,

    #[error("a target in the form '<repository>/<path>' is required in the out params")]
    MissingTarget,

    #[error(transparent)]
    Constraint(#[from] RangeError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("{failed} file(s) failed to upload")]
    UploadFailed { failed: u64 },

    #[error("failed to read properties file '{path}': {source}")]
    PropsFile {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to write '{path}': {source}")]
    WriteFile {
        path: String,
        source: std::io::Error,
    },
}
