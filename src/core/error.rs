//! Error handling for isapack
//!
//! The error system is split into two types:
//! - [`PackError`] - strongly-typed failure cases for the two pipelines
//! - [`ErrorContext`] - wrapper that adds user-facing suggestions and details
//!
//! Every error is fatal: neither pipeline retries or falls back. The CLI
//! entry point converts whatever bubbles up into an [`ErrorContext`] via
//! [`user_friendly_error`] and prints a single colored diagnostic.

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for isapack operations
///
/// Each variant represents one failure mode of the vendoring or bundling
/// pipeline and carries the path, URL, or argument that caused it so the
/// diagnostic can point at the offending input.
#[derive(Error, Debug)]
pub enum PackError {
    /// The command was invoked with an unusable argument
    ///
    /// Argument *count* is enforced by the CLI parser; this variant covers
    /// values that parse but are not usable, such as an empty version string.
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Why the argument was rejected
        reason: String,
    },

    /// Downloading the upstream release archive failed
    ///
    /// Raised for transport errors, timeouts, and non-2xx responses. The URL
    /// and the underlying cause are both preserved.
    #[error("Failed to download {url}: {reason}")]
    DownloadFailed {
        /// The archive URL that was requested
        url: String,
        /// The transport error or HTTP status that caused the failure
        reason: String,
    },

    /// The downloaded archive does not contain the expected entry
    ///
    /// Usually means upstream changed its release layout, or the requested
    /// version uses a different top-level directory name.
    #[error("Archive from {url} has no entry '{entry}'")]
    MissingArchiveEntry {
        /// The URL the archive was downloaded from
        url: String,
        /// The entry path that was expected inside the archive
        entry: String,
    },

    /// The vendored dependency file has no `/* ... */` license block
    ///
    /// License attribution is a legal requirement of redistribution, so this
    /// is a hard stop rather than a warning.
    #[error("No license preamble found in {path}")]
    MissingLicensePreamble {
        /// The vendored file that was searched
        path: String,
    },

    /// The external minifier is unavailable or exited with an error
    #[error("Minifier '{program}' failed: {reason}")]
    MinifierFailed {
        /// The minifier program that was invoked
        program: String,
        /// Exit status and stderr, or the spawn error
        reason: String,
    },

    /// A read, write, or copy on an expected path failed
    #[error("File system error during {operation}: {path}")]
    FilesystemError {
        /// The operation that failed (e.g., "read", "atomic write")
        operation: String,
        /// The path the operation was applied to
        path: String,
    },

    /// A problem with the isapack.toml project configuration
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// Standard I/O error wrapper
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing error wrapper for configuration files
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Catch-all for errors without a dedicated variant
    #[error("{message}")]
    Other {
        /// The error message
        message: String,
    },
}

impl Clone for PackError {
    fn clone(&self) -> Self {
        match self {
            Self::InvalidArguments { reason } => Self::InvalidArguments {
                reason: reason.clone(),
            },
            Self::DownloadFailed { url, reason } => Self::DownloadFailed {
                url: url.clone(),
                reason: reason.clone(),
            },
            Self::MissingArchiveEntry { url, entry } => Self::MissingArchiveEntry {
                url: url.clone(),
                entry: entry.clone(),
            },
            Self::MissingLicensePreamble { path } => Self::MissingLicensePreamble {
                path: path.clone(),
            },
            Self::MinifierFailed { program, reason } => Self::MinifierFailed {
                program: program.clone(),
                reason: reason.clone(),
            },
            Self::FilesystemError { operation, path } => Self::FilesystemError {
                operation: operation.clone(),
                path: path.clone(),
            },
            Self::ConfigError { message } => Self::ConfigError {
                message: message.clone(),
            },
            // For errors that don't implement Clone, convert to Other
            Self::IoError(e) => Self::Other {
                message: format!("IO error: {e}"),
            },
            Self::TomlError(e) => Self::Other {
                message: format!("TOML parsing error: {e}"),
            },
            Self::Other { message } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// User-facing wrapper around a [`PackError`]
///
/// Adds an optional suggestion (actionable next step, shown green) and
/// optional details (why it happened, shown yellow) to the error itself.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying isapack error
    pub error: PackError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details
    #[must_use]
    pub const fn new(error: PackError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add an actionable suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining why the error occurred
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error, details, and suggestion to stderr with colors
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into a user-friendly [`ErrorContext`]
///
/// Recognizes [`PackError`] variants and attaches tailored suggestions;
/// I/O and TOML errors get filesystem/syntax guidance; anything else is
/// rendered with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(pack_error) = error.downcast_ref::<PackError>() {
        return create_error_context(pack_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(PackError::FilesystemError {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check file ownership or run with elevated permissions")
                .with_details(
                    "isapack does not have permission to read or write one of the project paths",
                );
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(PackError::FilesystemError {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(PackError::ConfigError {
            message: toml_error.to_string(),
        })
        .with_suggestion(
            "Check the TOML syntax in isapack.toml. Verify quotes, brackets, and key names",
        );
    }

    // Generic error - include the full error chain for better diagnostics
    let mut message = error.to_string();

    let chain: Vec<String> = error
        .chain()
        .skip(1) // Skip the root cause which is already in to_string()
        .map(std::string::ToString::to_string)
        .collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(PackError::Other { message })
}

/// Map each [`PackError`] variant to an [`ErrorContext`] with a tailored
/// suggestion and details.
fn create_error_context(error: PackError) -> ErrorContext {
    match &error {
        PackError::InvalidArguments { .. } => ErrorContext::new(error.clone()).with_suggestion(
            "Pass exactly one non-empty version string, e.g. 'isapack bundle 2.0.0'",
        ),

        PackError::DownloadFailed { url, .. } => {
            let suggestion =
                format!("Check your internet connection and that the release exists: {url}");
            ErrorContext::new(error.clone())
                .with_suggestion(suggestion)
                .with_details("Downloads are not retried; the vendored file was left unchanged")
        }

        PackError::MissingArchiveEntry { .. } => ErrorContext::new(error.clone())
            .with_suggestion(
                "Verify the version number, or check whether upstream changed its release layout",
            )
            .with_details("The vendored file was left unchanged"),

        PackError::MissingLicensePreamble { path } => {
            let details = format!(
                "License attribution is required for redistribution; {path} must contain a /* ... */ comment block"
            );
            ErrorContext::new(error.clone())
                .with_suggestion("Re-vendor the dependency with 'isapack vendor <VERSION>'")
                .with_details(details)
        }

        PackError::MinifierFailed { program, .. } => {
            let suggestion = format!(
                "Check that '{program}' is installed and on your PATH (e.g. 'npm install -g uglify-js')"
            );
            ErrorContext::new(error.clone()).with_suggestion(suggestion)
        }

        PackError::FilesystemError { operation, .. } if operation.contains("vendored") => {
            ErrorContext::new(error.clone())
                .with_suggestion("Run 'isapack vendor <VERSION>' to fetch the vendored dependency")
        }

        PackError::ConfigError { .. } => ErrorContext::new(error.clone())
            .with_suggestion("Check the isapack.toml at the project root"),

        _ => ErrorContext::new(error.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = PackError::DownloadFailed {
            url: "https://github.com/Stuk/jszip/archive/v3.10.1.zip".to_string(),
            reason: "HTTP 403 Forbidden".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("v3.10.1.zip"));
        assert!(msg.contains("403"));
    }

    #[test]
    fn test_clone_folds_io_error_into_other() {
        let error = PackError::IoError(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        match error.clone() {
            PackError::Other { message } => assert!(message.contains("gone")),
            _ => panic!("Expected Other"),
        }
    }

    #[test]
    fn test_user_friendly_error_attaches_suggestion() {
        let error = PackError::MinifierFailed {
            program: "uglifyjs".to_string(),
            reason: "spawn failed".to_string(),
        };
        let ctx = user_friendly_error(anyhow::Error::from(error));
        assert!(ctx.suggestion.unwrap().contains("uglifyjs"));
    }

    #[test]
    fn test_error_context_display_format() {
        let ctx = ErrorContext::new(PackError::MissingLicensePreamble {
            path: "vendor/jszip.min.js".to_string(),
        })
        .with_suggestion("re-vendor");

        let rendered = format!("{ctx}");
        assert!(rendered.contains("vendor/jszip.min.js"));
        assert!(rendered.contains("Suggestion: re-vendor"));
    }
}
