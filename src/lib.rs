//! isapack - release packaging for the ImageSequenceAnimation JS library
//!
//! Two independent pipelines, composed only through the filesystem:
//!
//! - [`vendor`] - the Dependency Updater: downloads an upstream JSZip release
//!   archive, extracts the built `dist/jszip.min.js`, and atomically replaces
//!   the local vendored copy.
//! - [`bundle`] - the Bundle Builder: minifies the vendored dependency plus
//!   the first-party sources through an external minifier, prepends a
//!   version preamble and JSZip's license preamble, and writes the single
//!   distributable artifact.
//!
//! Data flow: `vendor` → (vendored file on disk) → `bundle` → (artifact on
//! disk). No network access happens inside the Bundle Builder; no
//! minification happens inside the Dependency Updater. Both pipelines are
//! single-pass and fail-fast: every error is fatal, nothing is retried.
//!
//! # Modules
//!
//! - [`cli`] - clap-based command-line interface (`bundle`, `vendor`)
//! - [`config`] - explicit project layout and settings (`isapack.toml`)
//! - [`core`] - error taxonomy ([`core::PackError`]) and user-facing display
//! - [`bundle`] - Bundle Builder pipeline and the [`bundle::Minifier`] seam
//! - [`vendor`] - Dependency Updater pipeline and the [`vendor::Fetcher`] seam
//! - [`utils`] - atomic writes and other shared filesystem helpers
//!
//! # Output artifact format
//!
//! Byte-exact:
//!
//! ```text
//! /*!
//! ImageSequenceAnimation v<VERSION>
//! */
//! <first /* ... */ block from the vendored file>
//! <minifier stdout>
//! ```

pub mod bundle;
pub mod cli;
pub mod config;
pub mod core;
pub mod utils;
pub mod vendor;
