//! Project configuration for the packaging pipelines.
//!
//! The original pipeline hard-coded every path relative to the invocation
//! directory. Here the layout is explicit configuration: a [`ProjectConfig`]
//! is resolved against a project root, with defaults reproducing the fixed
//! layout of the ImageSequenceAnimation repository. An optional
//! `isapack.toml` at the project root overrides any field:
//!
//! ```toml
//! library_name = "ImageSequenceAnimation"
//! vendored_file = "vendor/jszip.min.js"
//! sources = ["src/ImageSequenceAnimation.js", "src/ImageSequenceAnimationControls.js"]
//! output_file = "dist/ImageSequenceAnimation.bundle.min.js"
//!
//! [minifier]
//! program = "uglifyjs"
//! flags = ["--mangle", "--compress"]
//!
//! [upstream]
//! org = "Stuk"
//! repo = "jszip"
//! package = "jszip"
//! file = "jszip.min.js"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// File name of the optional project configuration, looked up at the root.
pub const CONFIG_FILE_NAME: &str = "isapack.toml";

/// Settings for the external minifier subprocess.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MinifierConfig {
    /// Program to invoke, resolved via `PATH`.
    pub program: String,
    /// Flags appended after the input file list.
    pub flags: Vec<String>,
    /// Upper bound on the subprocess runtime, in seconds.
    pub timeout_secs: u64,
}

impl Default for MinifierConfig {
    fn default() -> Self {
        Self {
            program: "uglifyjs".to_string(),
            flags: vec!["--mangle".to_string(), "--compress".to_string()],
            timeout_secs: 300,
        }
    }
}

impl MinifierConfig {
    /// Subprocess timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Identity of the upstream dependency release on GitHub.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpstreamConfig {
    /// GitHub organization or user (e.g., "Stuk").
    pub org: String,
    /// GitHub repository name (e.g., "jszip").
    pub repo: String,
    /// Package directory prefix inside the release archive (e.g., "jszip").
    pub package: String,
    /// Built artifact file name under `dist/` inside the archive.
    pub file: String,
    /// `User-Agent` header sent with the archive request. GitHub's archive
    /// endpoint answers 403 to requests without a browser-like agent.
    pub user_agent: String,
    /// Upper bound on the whole download, in seconds.
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            org: "Stuk".to_string(),
            repo: "jszip".to_string(),
            package: "jszip".to_string(),
            file: "jszip.min.js".to_string(),
            user_agent: "Mozilla/5.0 (Windows; U; Windows NT 5.1; en-US; rv:1.9.0.7) \
                         Gecko/2009021910 Firefox/3.0.7"
                .to_string(),
            timeout_secs: 120,
        }
    }
}

impl UpstreamConfig {
    /// Archive URL for a release version, e.g.
    /// `https://github.com/Stuk/jszip/archive/v3.10.1.zip`.
    #[must_use]
    pub fn archive_url(&self, version: &str) -> String {
        format!(
            "https://github.com/{}/{}/archive/v{}.zip",
            self.org, self.repo, version
        )
    }

    /// Entry path expected inside the archive, e.g.
    /// `jszip-3.10.1/dist/jszip.min.js`.
    #[must_use]
    pub fn entry_path(&self, version: &str) -> String {
        format!("{}-{}/dist/{}", self.package, version, self.file)
    }

    /// Download timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Complete layout and settings for one project, resolved against a root.
///
/// All relative paths are interpreted relative to `root`. The defaults match
/// the layout the pipelines were written for; `isapack.toml` can override
/// individual fields, e.g. to point at a different minifier in tests.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Name stamped into the bundle's own preamble.
    pub library_name: String,
    /// Vendored dependency file, written by the updater and read by the builder.
    pub vendored_file: PathBuf,
    /// Ordered first-party sources. Order determines concatenation order in
    /// the bundle; the vendored file always goes first and is not listed here.
    pub sources: Vec<PathBuf>,
    /// Final distributable artifact path.
    pub output_file: PathBuf,
    /// External minifier settings.
    pub minifier: MinifierConfig,
    /// Upstream release identity.
    pub upstream: UpstreamConfig,

    /// Project root all relative paths resolve against. Not read from the
    /// config file; set when the config is loaded.
    #[serde(skip)]
    pub root: PathBuf,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            library_name: "ImageSequenceAnimation".to_string(),
            vendored_file: PathBuf::from("vendor/jszip.min.js"),
            sources: vec![
                PathBuf::from("src/ImageSequenceAnimation.js"),
                PathBuf::from("src/ImageSequenceAnimationControls.js"),
            ],
            output_file: PathBuf::from("dist/ImageSequenceAnimation.bundle.min.js"),
            minifier: MinifierConfig::default(),
            upstream: UpstreamConfig::default(),
            root: PathBuf::from("."),
        }
    }
}

impl ProjectConfig {
    /// Load the configuration for a project root.
    ///
    /// Reads `isapack.toml` from the root if present, otherwise uses the
    /// defaults. Either way the returned config is anchored at `root`.
    pub fn load(root: &Path) -> Result<Self> {
        let config_path = root.join(CONFIG_FILE_NAME);

        let mut config = if config_path.exists() {
            debug!("Loading project config from {}", config_path.display());
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            toml::from_str::<Self>(&content)
                .with_context(|| format!("Failed to parse {}", config_path.display()))?
        } else {
            debug!(
                "No {} at {}, using default layout",
                CONFIG_FILE_NAME,
                root.display()
            );
            Self::default()
        };

        config.root = root.to_path_buf();
        Ok(config)
    }

    /// Absolute path of the vendored dependency file.
    #[must_use]
    pub fn vendored_path(&self) -> PathBuf {
        self.root.join(&self.vendored_file)
    }

    /// Absolute path of the output artifact.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.root.join(&self.output_file)
    }

    /// Absolute paths of the first-party sources, in bundle order.
    #[must_use]
    pub fn source_paths(&self) -> Vec<PathBuf> {
        self.sources.iter().map(|s| self.root.join(s)).collect()
    }

    /// The full ordered input list for the minifier: vendored file first,
    /// then the first-party sources. First-party code references globals the
    /// dependency defines, so this order is load-bearing.
    #[must_use]
    pub fn minifier_inputs(&self) -> Vec<PathBuf> {
        let mut inputs = Vec::with_capacity(self.sources.len() + 1);
        inputs.push(self.vendored_path());
        inputs.extend(self.source_paths());
        inputs
    }
}
