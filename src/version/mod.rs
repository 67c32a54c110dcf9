//! Artifact version resolution
//!
//! This module decides which artifact versions a `check` run should report,
//! based on the semantic versions embedded in artifact file names.
//!
//! # Modules
//!
//! - [`extract`]: semantic version extraction from artifact paths
//! - [`range`]: version constraint parsing and evaluation
//! - [`resolver`]: candidate filtering, ordering and result assembly
//! - [`semver`]: shared semver utilities
//! - [`error`]: error types for extraction and constraint parsing

pub mod error;
pub mod extract;
pub mod range;
pub mod resolver;
pub mod semver;
