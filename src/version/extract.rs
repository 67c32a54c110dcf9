//! Semantic version extraction from artifact paths
//!
//! Artifact file names embed versions with varying separators and optional
//! pre-release markers (`app-v1.2.3-beta.1.tar.gz`). Extraction scans the
//! file name for every version-looking token and keeps the rightmost one,
//! so a leading numeric token such as a build date does not shadow the
//! trailing version. The heuristic can still misfire on names carrying two
//! plausible versions ("app-2.0-for-1.5.zip" resolves to 1.5.0); that
//! behavior is part of the resource's observable contract and is kept.

use regex::Regex;
use semver::Version;

use crate::version::error::ExtractError;
use crate::version::semver::parse_sanitized;

/// Version tokens inside file names: an optional `v`, `-` or `_` marker,
/// one to three dotted numeric groups, and an optional dev/alpha/beta
/// suffix with an optional numeric index.
const VERSION_PATTERN: &str =
    r"(?i)(v|-|_)?v?((?:\d+)\.?(?:\d+)?\.?(?:\d+)?(?:(?:-|\+)(?:dev|alpha|beta)(\.[0-9]+)?)?)";

/// An artifact path paired with the version parsed from its file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemverFile {
    pub path: String,
    pub version: Version,
}

pub struct SemverExtractor {
    pattern: Regex,
}

impl SemverExtractor {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(VERSION_PATTERN).unwrap(),
        }
    }

    /// Extract the semantic version embedded in the file name of `path`.
    ///
    /// The file name is the text after the last `/`, with a trailing
    /// extension stripped. The rightmost version token wins; partial
    /// versions are padded before parsing.
    pub fn extract(&self, path: &str) -> Result<SemverFile, ExtractError> {
        let name = stem(path);
        let captures = self
            .pattern
            .captures_iter(name)
            .last()
            .ok_or(ExtractError::NoVersionFound)?;
        let token = captures.get(2).ok_or(ExtractError::NoVersionFound)?;
        let version = parse_sanitized(token.as_str())?;
        Ok(SemverFile {
            path: path.to_string(),
            version,
        })
    }

    /// Resolve the previously observed build identifier, if any.
    ///
    /// An empty or unparseable identifier degrades to `None`; a stale or
    /// odd previous build must never abort a check run.
    pub fn previous(&self, build: &str) -> Option<SemverFile> {
        if build.is_empty() {
            return None;
        }
        self.extract(build).ok()
    }
}

impl Default for SemverExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Final path segment with its extension stripped.
fn stem(path: &str) -> &str {
    let name = &path[path.rfind('/').map_or(0, |i| i + 1)..];
    match name.rfind('.') {
        Some(i) => &name[..i],
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("myapp-v1.2.3.tar.gz", "1.2.3")]
    #[case("repo/path/myapp-v1.2.3.tar.gz", "1.2.3")]
    #[case("build-20230101-2.5.0.zip", "2.5.0")] // rightmost match wins over the date
    #[case("app_1.2_beta.zip", "1.2.0")]
    #[case("app-v2.zip", "2.0.0")]
    #[case("app-1.2.3-beta.1.tar.gz", "1.2.3-beta.1")]
    #[case("app-1.2.3+dev.zip", "1.2.3+dev")]
    #[case("app-2.0-for-1.5.zip", "1.5.0")] // known heuristic limitation
    fn extracts_the_rightmost_version(#[case] path: &str, #[case] expected: &str) {
        let file = SemverExtractor::new().extract(path).unwrap();
        assert_eq!(file.version, Version::parse(expected).unwrap());
        assert_eq!(file.path, path);
    }

    #[rstest]
    #[case("no-version-here.txt")]
    #[case("plain")]
    #[case("")]
    fn fails_when_no_version_token_exists(#[case] path: &str) {
        let err = SemverExtractor::new().extract(path).unwrap_err();
        assert!(matches!(err, ExtractError::NoVersionFound));
    }

    #[test]
    fn previous_degrades_to_none() {
        let extractor = SemverExtractor::new();
        assert!(extractor.previous("").is_none());
        assert!(extractor.previous("no-version-here.txt").is_none());
        let prev = extractor.previous("a-1.0.0.zip").unwrap();
        assert_eq!(prev.version, Version::new(1, 0, 0));
    }

    #[rstest]
    #[case("repo/dir/file.tar.gz", "file.tar")]
    #[case("file.zip", "file")]
    #[case("file", "file")]
    #[case(".hidden", "")]
    #[case("dir/", "")]
    fn stem_strips_directory_and_extension(#[case] path: &str, #[case] expected: &str) {
        assert_eq!(stem(path), expected);
    }
}
