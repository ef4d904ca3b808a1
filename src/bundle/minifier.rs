//! External minifier invocation.
//!
//! The minifier is a black-box collaborator: it gets the ordered input file
//! list on its command line and hands back the minified bundle on stdout.
//! Only the exit status is interpreted; stderr is surfaced verbatim in the
//! error when the tool fails. The [`Minifier`] trait exists so the bundle
//! pipeline can be exercised with a stub instead of a real subprocess.

use crate::config::MinifierConfig;
use crate::core::PackError;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

/// A tool that rewrites the given source files into one minified text.
///
/// Implementations must preserve the order of `files` in their output; the
/// first file defines globals the later files reference.
pub trait Minifier {
    /// Minify the ordered file list and return the result as text.
    fn minify(&self, files: &[PathBuf]) -> impl Future<Output = Result<String>> + Send;
}

/// Subprocess-backed [`Minifier`] running `uglifyjs` (or whatever the
/// project config names) with identifier mangling and compression flags.
pub struct UglifyJs {
    program: String,
    flags: Vec<String>,
    timeout_duration: Duration,
}

impl UglifyJs {
    /// Build from the project's minifier settings.
    #[must_use]
    pub fn from_config(config: &MinifierConfig) -> Self {
        Self {
            program: config.program.clone(),
            flags: config.flags.clone(),
            timeout_duration: config.timeout(),
        }
    }

    fn failed(&self, reason: impl Into<String>) -> anyhow::Error {
        PackError::MinifierFailed {
            program: self.program.clone(),
            reason: reason.into(),
        }
        .into()
    }
}

impl Minifier for UglifyJs {
    async fn minify(&self, files: &[PathBuf]) -> Result<String> {
        // Pre-flight the program lookup so a missing tool produces a clear
        // message instead of a raw spawn error.
        let program = if Path::new(&self.program).components().count() > 1 {
            PathBuf::from(&self.program)
        } else {
            which::which(&self.program)
                .map_err(|_| self.failed("program not found in PATH"))?
        };

        let mut cmd = Command::new(&program);
        cmd.args(files);
        cmd.args(&self.flags);
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        debug!(
            "Executing minifier: {} {} {}",
            program.display(),
            files
                .iter()
                .map(|f| f.display().to_string())
                .collect::<Vec<_>>()
                .join(" "),
            self.flags.join(" ")
        );

        let output = match timeout(self.timeout_duration, cmd.output()).await {
            Ok(result) => result
                .with_context(|| format!("Failed to execute {}", program.display()))?,
            Err(_) => {
                return Err(self.failed(format!(
                    "timed out after {} seconds",
                    self.timeout_duration.as_secs()
                )));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(self.failed(format!(
                "exit status {}: {}",
                output.status.code().map_or_else(
                    || "terminated by signal".to_string(),
                    |c| c.to_string()
                ),
                stderr.trim()
            )));
        }

        debug!("Minifier produced {} bytes", output.stdout.len());

        String::from_utf8(output.stdout)
            .map_err(|e| self.failed(format!("produced non-UTF-8 output: {e}")))
    }
}
