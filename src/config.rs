//! Resource configuration model
//!
//! Deserialized from the `source` and `params` blocks of the Concourse
//! request. JSON field names follow the resource's established wire
//! format, including the camel-cased `apiKey`.

use serde::Deserialize;

use crate::error::ConfigError;

/// Default number of transfer worker threads.
pub const DEFAULT_THREADS: i64 = 3;

/// Default number of parts a download is split into.
pub const DEFAULT_SPLIT_COUNT: i64 = 3;

/// Default minimum file size (in KB) before a download is split.
pub const DEFAULT_MIN_SPLIT: i64 = 5120;

/// Resource configuration (the pipeline's `source` block).
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Source {
    pub url: String,
    pub user: String,
    pub password: String,
    #[serde(rename = "apiKey")]
    pub api_key: String,
    pub ssh_key: String,
    pub pattern: String,
    pub props: String,
    pub recursive: bool,
    pub flat: bool,
    pub regexp: bool,
    /// Optional version constraint. Empty means "track raw file names".
    pub version: String,
    pub log_level: String,
    pub ca_cert: String,
}

impl Default for Source {
    fn default() -> Self {
        Self {
            url: String::new(),
            user: String::new(),
            password: String::new(),
            api_key: String::new(),
            ssh_key: String::new(),
            pattern: String::new(),
            props: String::new(),
            // `check` searches the whole pattern subtree unless the
            // pipeline opts out explicitly.
            recursive: true,
            flat: false,
            regexp: false,
            version: String::new(),
            log_level: String::new(),
            ca_cert: String::new(),
        }
    }
}

impl Source {
    /// Validate the connection settings every step needs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::MissingUrl);
        }
        if self.user.is_empty() && self.api_key.is_empty() {
            return Err(ConfigError::MissingCredentials);
        }
        Ok(())
    }

    /// `check` additionally needs a search pattern.
    pub fn validate_with_pattern(&self) -> Result<(), ConfigError> {
        if self.pattern.is_empty() {
            return Err(ConfigError::MissingPattern);
        }
        self.validate()
    }
}

/// Parameters of the `in` step.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct InParams {
    /// Rename the fetched artifact; defaults to its repository file name.
    pub filename: String,
    /// When set, the artifact's properties document is written here,
    /// relative to the step directory.
    pub props_filename: String,
    pub threads: i64,
    pub min_split: i64,
    pub split_count: i64,
    pub not_flat: bool,
}

impl InParams {
    /// Replace unset or nonsensical values with the step defaults.
    pub fn apply_defaults(&mut self) {
        if self.threads <= 0 {
            self.threads = DEFAULT_THREADS;
        }
        if self.split_count <= 0 {
            self.split_count = DEFAULT_SPLIT_COUNT;
        }
        if self.min_split <= 0 {
            self.min_split = DEFAULT_MIN_SPLIT;
        }
    }
}

/// Parameters of the `out` step.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutParams {
    /// Upload destination, `<repository>/<path>`. Required.
    pub target: String,
    /// Glob selecting the files to upload, relative to the step directory.
    pub source: String,
    pub props: String,
    /// File (relative to the step directory) whose contents are appended
    /// to `props`, semicolon-joined.
    pub props_from_file: String,
    pub threads: i64,
    pub explode_archive: bool,
}

impl OutParams {
    /// Replace unset or nonsensical values with the step defaults.
    pub fn apply_defaults(&mut self) {
        if self.threads <= 0 {
            self.threads = DEFAULT_THREADS;
        }
    }
}
