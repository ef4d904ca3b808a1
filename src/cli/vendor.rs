//! The `isapack vendor` command.

use crate::config::ProjectConfig;
use crate::vendor::{self, HttpFetcher};
use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::Path;

/// Replace the vendored JSZip build with the one from an upstream release.
///
/// Downloads `https://github.com/Stuk/jszip/archive/v<VERSION>.zip`, extracts
/// `jszip-<VERSION>/dist/jszip.min.js` from it, and atomically overwrites
/// `vendor/jszip.min.js`. Any failure leaves the previous vendored file
/// untouched.
#[derive(Parser, Debug)]
pub struct VendorCommand {
    /// Upstream release version to vendor, e.g. "3.10.1" (without the 'v'
    /// tag prefix).
    #[arg(value_name = "VERSION")]
    pub version: String,
}

impl VendorCommand {
    /// Execute the updater pipeline against the project at `root`.
    pub async fn execute(self, root: &Path) -> Result<()> {
        let config = ProjectConfig::load(root)?;
        let fetcher = HttpFetcher::from_config(&config.upstream);

        let vendored = vendor::update(&config, &fetcher, &self.version).await?;

        println!(
            "{} Vendored {} v{} at {}",
            "✓".green(),
            config.upstream.repo,
            self.version,
            vendored.display()
        );
        Ok(())
    }
}
