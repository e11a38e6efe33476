//! Extraction of structured mod metadata from an archive's embedded
//! `mods.toml` style document.
//!
//! The raw text is cleaned before it reaches the TOML parser: dependency
//! tables are dropped entirely and line comments are cut off. Comment
//! removal works on the first `#` byte of each line and does not know about
//! quoted strings, so a value containing `#` is truncated.

use crate::error::{Result, ToolError};
use crate::model::ArchiveMetadata;

/// Start of the first dependency table; everything from here on is ignored.
pub const DEPENDENCY_MARKER: &str = "[[dependencies";
/// Line comment marker.
pub const COMMENT_MARKER: char = '#';

/// Produces the cleaned text handed to the TOML parser.
pub fn clean_metadata_text(raw: &str) -> String {
    let body = match raw.find(DEPENDENCY_MARKER) {
        Some(position) => &raw[..position],
        None => raw,
    };

    let mut cleaned = String::with_capacity(body.len());
    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(COMMENT_MARKER) {
            continue;
        }
        let kept = match line.find(COMMENT_MARKER) {
            Some(position) => line[..position].trim_end(),
            None => line,
        };
        cleaned.push_str(kept);
        cleaned.push('\n');
    }
    cleaned
}

/// Cleans and parses metadata text.
///
/// Fails with [`ToolError::MetadataParse`] on malformed syntax or when a
/// mandatory field is missing; no partial result is produced.
pub fn parse_metadata_text(raw: &str) -> Result<ArchiveMetadata> {
    let cleaned = clean_metadata_text(raw);
    toml::from_str(&cleaned).map_err(|error| ToolError::MetadataParse(error.to_string()))
}

/// Parses the raw bytes of an embedded metadata entry.
pub fn parse_metadata_bytes(raw: &[u8]) -> Result<ArchiveMetadata> {
    let text = std::str::from_utf8(raw)
        .map_err(|error| ToolError::MetadataParse(format!("metadata is not UTF-8: {error}")))?;
    parse_metadata_text(text)
}
