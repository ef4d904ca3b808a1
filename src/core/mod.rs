//! Core types shared by both pipelines.
//!
//! This is the error taxonomy, its user-facing presentation, and the version
//! argument validation both commands apply before doing any I/O.

pub mod error;

pub use error::{ErrorContext, PackError, user_friendly_error};

/// Check that a version argument is usable.
///
/// Any non-empty token is accepted verbatim; no semantic-version parsing is
/// performed. The version ends up interpolated into a URL and the bundle
/// preamble, so blank strings are rejected up front.
pub fn validate_version(version: &str) -> Result<(), PackError> {
    if version.trim().is_empty() {
        return Err(PackError::InvalidArguments {
            reason: "version must be a non-empty string".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_version_accepts_arbitrary_tokens() {
        validate_version("3.10.1").unwrap();
        validate_version("v2").unwrap();
        validate_version("not-even-semver").unwrap();
    }

    #[test]
    fn test_validate_version_rejects_blank() {
        assert!(validate_version("").is_err());
        assert!(validate_version("   ").is_err());
    }
}
