//! Bundle Builder pipeline.
//!
//! Produces the single distributable file from the vendored dependency and
//! the first-party sources: minify the ordered file list through the
//! external tool, lift JSZip's license preamble out of the vendored file,
//! stamp the library's own version preamble on top, and write the artifact
//! atomically. Single pass, no retries; any failure aborts before the output
//! path is touched.

pub mod license;
pub mod minifier;

pub use minifier::{Minifier, UglifyJs};

use crate::config::ProjectConfig;
use crate::core::{PackError, validate_version};
use crate::utils::fs::{atomic_write, read_text_file};
use anyhow::Result;
use std::path::PathBuf;
use tracing::{debug, info};

/// Build the distributable bundle for `version`.
///
/// Artifact layout, byte-exact:
///
/// ```text
/// /*!
/// <library_name> v<version>
/// */
/// <license preamble from the vendored file>
/// <minifier stdout>
/// ```
///
/// The vendored file is always the first minifier input; the minifier is
/// trusted not to reorder across files. Returns the output path on success.
pub async fn build<M: Minifier>(
    config: &ProjectConfig,
    minifier: &M,
    version: &str,
) -> Result<PathBuf> {
    validate_version(version)?;

    let vendored_path = config.vendored_path();
    if !vendored_path.exists() {
        return Err(PackError::FilesystemError {
            operation: "read vendored dependency".to_string(),
            path: vendored_path.display().to_string(),
        }
        .into());
    }

    info!(
        "Bundling {} v{} from {} source file(s) + vendored dependency",
        config.library_name,
        version,
        config.sources.len()
    );

    let minified = minifier.minify(&config.minifier_inputs()).await?;

    // The license is extracted from the raw, pre-minification content; the
    // minifier may strip comments from its own output.
    let vendored_content = read_text_file(&vendored_path)?;
    let license_preamble = license::extract_preamble(&vendored_content, &vendored_path)?;
    debug!("Extracted {} byte license preamble", license_preamble.len());

    let own_preamble = format!("/*!\n{} v{}\n*/", config.library_name, version);

    let artifact = format!("{own_preamble}\n{license_preamble}\n{minified}");

    let output_path = config.output_path();
    atomic_write(&output_path, artifact.as_bytes())?;

    info!("Successfully wrote {}", output_path.display());
    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Stub minifier returning a canned string, recording nothing.
    struct StubMinifier(String);

    impl Minifier for StubMinifier {
        async fn minify(&self, _files: &[PathBuf]) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    /// Stub that captures the file list it was handed.
    struct RecordingMinifier(std::sync::Mutex<Vec<PathBuf>>);

    impl Minifier for RecordingMinifier {
        async fn minify(&self, files: &[PathBuf]) -> Result<String> {
            *self.0.lock().unwrap() = files.to_vec();
            Ok(String::new())
        }
    }

    fn project(vendored_content: &str) -> (TempDir, ProjectConfig) {
        let temp = TempDir::new().unwrap();
        let mut config = ProjectConfig::default();
        config.root = temp.path().to_path_buf();
        config.sources = vec![PathBuf::from("src/a.js")];

        fs::create_dir_all(temp.path().join("vendor")).unwrap();
        fs::create_dir_all(temp.path().join("src")).unwrap();
        fs::write(config.vendored_path(), vendored_content).unwrap();
        fs::write(temp.path().join("src/a.js"), "console.log(1);").unwrap();

        (temp, config)
    }

    #[tokio::test]
    async fn test_end_to_end_artifact_layout() {
        let (_temp, config) = project("/* MIT License */\nvar X={};");
        let minifier = StubMinifier("var X={};console.log(1);".to_string());

        let output = build(&config, &minifier, "2.0.0").await.unwrap();

        let artifact = fs::read_to_string(output).unwrap();
        assert_eq!(
            artifact,
            "/*!\nImageSequenceAnimation v2.0.0\n*/\n/* MIT License */\nvar X={};console.log(1);"
        );
    }

    #[tokio::test]
    async fn test_first_two_lines_carry_version() {
        let (_temp, config) = project("/* MIT */\nx");
        let minifier = StubMinifier("y".to_string());

        let output = build(&config, &minifier, "1.4.7-rc.1").await.unwrap();

        let artifact = fs::read_to_string(output).unwrap();
        let mut lines = artifact.lines();
        assert_eq!(lines.next(), Some("/*!"));
        assert_eq!(lines.next(), Some("ImageSequenceAnimation v1.4.7-rc.1"));
    }

    #[tokio::test]
    async fn test_missing_license_preamble_writes_no_output() {
        let (_temp, config) = project("var X = {}; // no block comment");
        let minifier = StubMinifier("whatever".to_string());

        let err = build(&config, &minifier, "2.0.0").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PackError>(),
            Some(PackError::MissingLicensePreamble { .. })
        ));
        assert!(!config.output_path().exists());
    }

    #[tokio::test]
    async fn test_empty_version_is_invalid_arguments() {
        let (_temp, config) = project("/* MIT */\nx");
        let minifier = StubMinifier(String::new());

        let err = build(&config, &minifier, "").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PackError>(),
            Some(PackError::InvalidArguments { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_vendored_file_fails_before_minifying() {
        let temp = TempDir::new().unwrap();
        let mut config = ProjectConfig::default();
        config.root = temp.path().to_path_buf();

        let recorder = RecordingMinifier(std::sync::Mutex::new(vec![]));
        let err = build(&config, &recorder, "1.0.0").await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<PackError>(),
            Some(PackError::FilesystemError { .. })
        ));
        assert!(recorder.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_vendored_file_passed_to_minifier_first() {
        let (_temp, config) = project("/* MIT */\nx");
        let recorder = RecordingMinifier(std::sync::Mutex::new(vec![]));

        build(&config, &recorder, "1.0.0").await.unwrap();

        let files = recorder.0.lock().unwrap().clone();
        assert_eq!(files[0], config.vendored_path());
        assert_eq!(files[1..], config.source_paths()[..]);
    }

    #[tokio::test]
    async fn test_rebuild_is_byte_identical() {
        let (_temp, config) = project("/* MIT License */\nvar X={};");
        let minifier = StubMinifier("var X={};".to_string());

        let first = build(&config, &minifier, "2.0.0").await.unwrap();
        let first_bytes = fs::read(&first).unwrap();

        let second = build(&config, &minifier, "2.0.0").await.unwrap();
        let second_bytes = fs::read(&second).unwrap();

        assert_eq!(first, second);
        assert_eq!(first_bytes, second_bytes);
    }
}
