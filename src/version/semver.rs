use semver::Version;

/// Pad a partial version string to full major.minor.patch form.
///
/// "1" becomes "1.0.0" and "1.2" becomes "1.2.0"; anything with three or
/// more dot-separated components passes through unchanged, so the function
/// is idempotent on already-full versions.
pub fn sanitize_version(version: &str) -> String {
    match version.split('.').count() {
        1 => format!("{version}.0.0"),
        2 => format!("{version}.0"),
        _ => version.to_string(),
    }
}

/// Sanitize a version string and parse it.
pub fn parse_sanitized(version: &str) -> Result<Version, semver::Error> {
    Version::parse(&sanitize_version(version))
}
