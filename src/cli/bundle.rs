//! The `isapack bundle` command.

use crate::bundle::{self, UglifyJs};
use crate::config::ProjectConfig;
use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::Path;

/// Build the distributable bundle for one release version.
///
/// Runs the external minifier over the vendored JSZip build and the
/// first-party sources (in that order), lifts JSZip's license preamble out
/// of the vendored file, stamps the library preamble with the given version,
/// and writes `dist/ImageSequenceAnimation.bundle.min.js`.
#[derive(Parser, Debug)]
pub struct BundleCommand {
    /// Version stamped into the bundle preamble, e.g. "2.0.0". Any non-empty
    /// string is accepted verbatim.
    #[arg(value_name = "VERSION")]
    pub version: String,
}

impl BundleCommand {
    /// Execute the bundle pipeline against the project at `root`.
    pub async fn execute(self, root: &Path) -> Result<()> {
        let config = ProjectConfig::load(root)?;
        let minifier = UglifyJs::from_config(&config.minifier);

        let output = bundle::build(&config, &minifier, &self.version).await?;

        println!(
            "{} Successfully wrote the file {}",
            "✓".green(),
            output.display()
        );
        Ok(())
    }
}
