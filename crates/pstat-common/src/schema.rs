//! Schema versioning and compatibility.

/// Current schema version for all JSON outputs.
///
/// Follows semver: MAJOR.MINOR.PATCH
/// - MAJOR: Breaking changes (field removals, type changes)
/// - MINOR: Additive changes (new optional fields)
/// - PATCH: Bug fixes, documentation
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Check if `version` shares a major version with `current`.
///
/// Output envelopes and settings files are versioned separately, so callers
/// pass the version they are checking against.
pub fn is_compatible(current: &str, version: &str) -> bool {
    major(current) == major(version)
}

fn major(version: &str) -> u32 {
    version
        .split('.')
        .next()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(0)
}
