//! Command-line interface for isapack.
//!
//! Two subcommands, one per pipeline:
//! - `isapack bundle <VERSION>` - build the distributable bundle
//! - `isapack vendor <VERSION>` - refresh the vendored JSZip build
//!
//! Each takes exactly one positional version argument; clap rejects a
//! missing or extra argument with a usage message and non-zero exit before
//! any filesystem or network I/O happens. Global flags control verbosity
//! and the project root the fixed layout is resolved against.

mod bundle;
mod vendor;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Top-level CLI for the release packaging pipelines.
#[derive(Parser)]
#[command(
    name = "isapack",
    about = "Release packaging for the ImageSequenceAnimation JavaScript library",
    version,
    long_about = "isapack bundles, minifies, and version-stamps the ImageSequenceAnimation \
                  library together with its vendored JSZip dependency, and refreshes that \
                  vendored dependency from upstream GitHub releases."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose (debug) output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Project root the layout is resolved against (defaults to the current
    /// directory). Must contain vendor/ and src/ per the configured layout.
    #[arg(long, global = true, value_name = "DIR")]
    project_root: Option<PathBuf>,
}

/// Available subcommands, one per pipeline.
#[derive(Subcommand)]
enum Commands {
    /// Build the minified, versioned, license-annotated bundle
    Bundle(bundle::BundleCommand),

    /// Replace the vendored JSZip build with an upstream release
    Vendor(vendor::VendorCommand),
}

impl Cli {
    /// Install the log subscriber and dispatch to the selected pipeline.
    pub async fn execute(self) -> Result<()> {
        self.init_logging();

        let root = match self.project_root {
            Some(root) => root,
            None => std::env::current_dir().context("Failed to resolve current directory")?,
        };

        match self.command {
            Commands::Bundle(cmd) => cmd.execute(&root).await,
            Commands::Vendor(cmd) => cmd.execute(&root).await,
        }
    }

    /// `--verbose` wins over `RUST_LOG`; `--quiet` keeps errors only.
    fn init_logging(&self) {
        let filter = if self.verbose {
            EnvFilter::new("debug")
        } else if self.quiet {
            EnvFilter::new("error")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_bundle_requires_exactly_one_version() {
        assert!(Cli::try_parse_from(["isapack", "bundle"]).is_err());
        assert!(Cli::try_parse_from(["isapack", "bundle", "1.0.0", "2.0.0"]).is_err());
        assert!(Cli::try_parse_from(["isapack", "bundle", "1.0.0"]).is_ok());
    }

    #[test]
    fn test_vendor_requires_exactly_one_version() {
        assert!(Cli::try_parse_from(["isapack", "vendor"]).is_err());
        assert!(Cli::try_parse_from(["isapack", "vendor", "3.10.1", "extra"]).is_err());
        assert!(Cli::try_parse_from(["isapack", "vendor", "3.10.1"]).is_ok());
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["isapack", "-v", "-q", "bundle", "1.0.0"]).is_err());
    }
}
