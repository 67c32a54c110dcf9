//! Concourse resource for Artifactory
//!
//! Implements the three resource steps — `check`, `in` and `out` — for
//! tracking, fetching and publishing artifacts in an Artifactory
//! repository. `check` ranks artifact files by the semantic version
//! embedded in their names and reports the ones newer than the last
//! observed build; `in` and `out` delegate transfers to an injected
//! repository client.
//!
//! # Modules
//!
//! - [`commands`]: the step implementations over injected I/O and client
//! - [`version`]: semantic version extraction, constraints and resolution
//! - [`client`]: the repository client seam and the JFrog CLI implementation
//! - [`config`]: the `source`/`params` wire model and validation
//! - [`protocol`]: the Concourse request/response envelope
//! - [`logging`]: stderr diagnostics setup

pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod paths;
pub mod protocol;
pub mod version;
