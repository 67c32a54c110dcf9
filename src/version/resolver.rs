//! Candidate filtering, ordering and result assembly
//!
//! The heart of the `check` step: given the artifact paths a search
//! returned, the configured version constraint and the last build the
//! orchestrator reported, produce the ordered list of versions to emit.

use tracing::{info, warn};

use crate::version::error::RangeError;
use crate::version::extract::{SemverExtractor, SemverFile};
use crate::version::range::VersionRange;

/// Resolve the ordered list of qualifying artifact versions.
///
/// With an empty `constraint` every candidate is returned verbatim in
/// discovery order, without any version parsing. Otherwise candidates are
/// filtered through the constraint — tightened to "strictly newer" when
/// `previous_build` carries a parseable version — and returned in
/// ascending version order. A still-resolvable previous build is
/// re-announced as the first entry so downstream consumers always see the
/// last known version as a baseline.
///
/// Only a malformed constraint is fatal; candidates without a recognizable
/// version and candidates outside the range are skipped.
pub fn resolve_versions(
    candidates: &[String],
    constraint: &str,
    previous_build: &str,
) -> Result<Vec<String>, RangeError> {
    if candidates.is_empty() {
        return Ok(Vec::new());
    }
    if constraint.is_empty() {
        return Ok(candidates.to_vec());
    }

    let extractor = SemverExtractor::new();
    let previous = extractor.previous(previous_build);

    let mut range = VersionRange::parse(constraint)?;
    if let Some(prev) = &previous {
        range = range.above(&prev.version);
    }

    let mut versions = Vec::new();
    if let Some(prev) = &previous {
        versions.push(prev.path.clone());
    }
    versions.extend(
        filter_and_sort(&extractor, candidates, &range)
            .into_iter()
            .map(|file| file.path),
    );
    Ok(versions)
}

/// Extract every candidate, keep the ones satisfying `range`, and sort
/// them ascending by version precedence. The input list is not touched;
/// skipped candidates are logged for operator visibility.
pub fn filter_and_sort(
    extractor: &SemverExtractor,
    candidates: &[String],
    range: &VersionRange,
) -> Vec<SemverFile> {
    let mut files: Vec<SemverFile> = Vec::new();
    for path in candidates {
        let file = match extractor.extract(path) {
            Ok(file) => file,
            Err(err) => {
                warn!("skipping file '{}': {}", path, err);
                continue;
            }
        };
        if !range.matches(&file.version) {
            info!(
                "skipping file '{}' with version '{}': doesn't satisfy range '{}'",
                file.path, file.version, range
            );
            continue;
        }
        info!("found valid file '{}' in version '{}'", file.path, file.version);
        files.push(file);
    }
    files.sort_by(|a, b| a.version.cmp(&b.version));
    files
}
