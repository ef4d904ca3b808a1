//! License preamble extraction from the vendored dependency.
//!
//! Redistributing JSZip inside the bundle requires carrying its license
//! header along, so the bundle builder lifts the leading `/* ... */` block
//! out of the vendored file verbatim on every build. Absence of the block is
//! a fatal configuration error, not a warning.

use crate::core::PackError;
use anyhow::Result;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use tracing::warn;

/// Lazy match so the shortest enclosing comment wins; `(?s)` lets the block
/// span multiple lines.
fn block_comment_regex() -> &'static Regex {
    static BLOCK_COMMENT: OnceLock<Regex> = OnceLock::new();
    BLOCK_COMMENT.get_or_init(|| Regex::new(r"(?s)/\*.*?\*/").expect("static pattern is valid"))
}

/// Extract the first block comment from the vendored file's content.
///
/// Returns the matched block byte-identical to its occurrence in `content`.
/// A match that does not start at offset 0 is suspicious (the file may carry
/// an internal comment ahead of the actual license header) and is logged,
/// but the first match is still what gets embedded.
pub fn extract_preamble<'a>(content: &'a str, path: &Path) -> Result<&'a str> {
    let m = block_comment_regex()
        .find(content)
        .ok_or_else(|| PackError::MissingLicensePreamble {
            path: path.display().to_string(),
        })?;

    if m.start() != 0 {
        warn!(
            "License preamble in {} starts at byte {}, not at the top of the file; \
             the extracted block may not be the license header",
            path.display(),
            m.start()
        );
    }

    Ok(m.as_str())
}
