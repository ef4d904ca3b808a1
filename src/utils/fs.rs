//! File system utilities for the packaging pipelines.
//!
//! Both pipelines end in a "replace this file wholesale" step, so writes go
//! through [`atomic_write`]: the artifact and the vendored file are never
//! observable in a partially written state, and a failed run leaves the
//! previous content untouched.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Ensures a directory exists, creating it and all parents if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if path.exists() {
        if !path.is_dir() {
            anyhow::bail!("Path exists but is not a directory: {}", path.display());
        }
        return Ok(());
    }

    fs::create_dir_all(path)
        .with_context(|| format!("Failed to create directory: {}", path.display()))
}

/// Atomically writes bytes to a file using a write-then-rename strategy.
///
/// Content is written to a sibling `.tmp` file, synced, and renamed over the
/// target. Readers never see a partial file, and an interrupted write cannot
/// corrupt an existing target. Parent directories are created as needed.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }

    let temp_path = path.with_extension("tmp");

    {
        let mut file = fs::File::create(&temp_path)
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

        file.write_all(content)
            .with_context(|| format!("Failed to write to temp file: {}", temp_path.display()))?;

        file.sync_all().with_context(|| "Failed to sync file to disk")?;
    }

    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;

    Ok(())
}

/// Reads a file as UTF-8 text with a path-bearing error message.
pub fn read_text_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_creates_parents() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("dist/nested/out.js");

        atomic_write(&target, b"var x=1;").unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"var x=1;");
        // No temp file left behind
        assert!(!target.with_extension("tmp").exists());
    }

    #[test]
    fn test_atomic_write_overwrites_existing() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("out.js");

        atomic_write(&target, b"old").unwrap();
        atomic_write(&target, b"new").unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"new");
    }

    #[test]
    fn test_ensure_dir_rejects_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file");
        fs::write(&file, "x").unwrap();

        assert!(ensure_dir(&file).is_err());
    }

    #[test]
    fn test_read_text_file_names_path_on_error() {
        let err = read_text_file(Path::new("/no/such/file.js")).unwrap_err();
        assert!(err.to_string().contains("/no/such/file.js"));
    }
}
