//! Repository client collaborator
//!
//! Search, download and upload are delegated to an injected client; the
//! steps only build file-matching specifications and interpret results.
//! Transport, authentication and checksum/retry mechanics all live behind
//! this seam.

pub mod jfrog_cli;

use std::collections::HashMap;

#[cfg(test)]
use mockall::automock;
use thiserror::Error;

pub use jfrog_cli::JfrogCliClient;

/// File-matching specification handed to the client: which files an
/// operation applies to and where they go.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSpec {
    pub pattern: String,
    pub target: String,
    pub props: String,
    pub recursive: bool,
    pub flat: bool,
    pub regexp: bool,
}

impl FileSpec {
    pub fn builder() -> FileSpecBuilder {
        FileSpecBuilder::default()
    }
}

#[derive(Debug, Default)]
pub struct FileSpecBuilder {
    spec: FileSpec,
}

impl FileSpecBuilder {
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.spec.pattern = pattern.into();
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.spec.target = target.into();
        self
    }

    pub fn props(mut self, props: impl Into<String>) -> Self {
        self.spec.props = props.into();
        self
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.spec.recursive = recursive;
        self
    }

    pub fn flat(mut self, flat: bool) -> Self {
        self.spec.flat = flat;
        self
    }

    pub fn regexp(mut self, regexp: bool) -> Self {
        self.spec.regexp = regexp;
        self
    }

    pub fn build(self) -> FileSpec {
        self.spec
    }
}

/// One artifact returned by a search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchEntry {
    pub path: String,
    pub properties: HashMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadOptions {
    pub threads: i64,
    pub split_count: i64,
    pub min_split: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadOptions {
    pub threads: i64,
    pub explode_archive: bool,
}

/// Outcome counts of a transfer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransferSummary {
    pub success: u64,
    pub failure: u64,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to run '{tool}': {source}")]
    Spawn {
        tool: String,
        source: std::io::Error,
    },

    #[error("{operation} failed: {stderr}")]
    CommandFailed { operation: String, stderr: String },

    #[error("unreadable client output: {0}")]
    InvalidResponse(String),

    #[error("failed to encode file spec: {0}")]
    Spec(#[from] serde_json::Error),

    #[error("failed to stage client configuration: {0}")]
    Staging(#[from] std::io::Error),
}

/// Operations the artifact repository collaborator provides.
///
/// Implementations own every transport concern; callers treat the
/// operations as synchronous and either fatal or fully successful.
#[cfg_attr(test, automock)]
pub trait ArtifactClient {
    /// Find the artifacts matching `spec`. The returned order carries no
    /// meaning.
    fn search(&self, spec: &FileSpec) -> Result<Vec<SearchEntry>, ClientError>;

    /// Download the artifacts matching `spec` to the spec's target.
    fn download(
        &self,
        spec: &FileSpec,
        options: &DownloadOptions,
    ) -> Result<TransferSummary, ClientError>;

    /// Upload local files matching `spec` to the spec's target.
    fn upload(
        &self,
        spec: &FileSpec,
        options: &UploadOptions,
    ) -> Result<TransferSummary, ClientError>;
}
