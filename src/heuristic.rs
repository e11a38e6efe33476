//! Best-effort identity guessing from archive filenames.
//!
//! Used when an archive carries no usable embedded metadata. Filenames such as
//! `1.20.1-maid_storage_manager-1.14.5-all.jar` or
//! `modernfix-forge-5.26.2+mc1.20.1.jar` are split into tokens and the first
//! plausible name token plus the last semantic version token are kept.

use std::sync::LazyLock;

use regex::Regex;
use semver::Version;

use crate::model::HeuristicIdentity;

/// Extension identifying mod archives.
pub const ARCHIVE_EXTENSION: &str = ".jar";

/// Tokens that never carry identity.
const NOISE_TOKENS: &[&str] = &["forge", "all"];

/// Delimiters separating filename tokens.
const TOKEN_DELIMITERS: [char; 2] = ['-', '+'];

/// Version-like runs embedded inside a token, e.g. the `1.3` in `Endermod1.3`.
static RE_EMBEDDED_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)+").expect("Invalid regex"));

/// Returns `name` without a trailing `.jar` (case-insensitive).
pub fn strip_archive_extension(name: &str) -> &str {
    let split = name.len().saturating_sub(ARCHIVE_EXTENSION.len());
    match name.get(split..) {
        Some(suffix) if suffix.eq_ignore_ascii_case(ARCHIVE_EXTENSION) => &name[..split],
        _ => name,
    }
}

/// Whether a directory entry should be treated as a mod archive.
pub fn is_archive_name(name: &str) -> bool {
    strip_archive_extension(name).len() != name.len()
}

/// Guesses a name and version from a bare filename.
///
/// Returns `None` only when nothing is left once the extension is removed.
/// Empty tokens produced by consecutive delimiters are skipped.
pub fn parse_filename(file_name: &str) -> Option<HeuristicIdentity> {
    let stem = strip_archive_extension(file_name);
    if stem.is_empty() {
        return None;
    }

    let mut name: Option<String> = None;
    let mut version: Option<String> = None;

    for token in stem.split(TOKEN_DELIMITERS) {
        if NOISE_TOKENS.contains(&token) || is_minecraft_marker(token) {
            continue;
        }
        if Version::parse(token).is_ok() {
            version = Some(token.to_string());
            continue;
        }
        if name.is_none() {
            let (stripped, embedded) = strip_embedded_versions(token);
            if stripped.is_empty() {
                continue;
            }
            name = Some(stripped);
            if version.is_none() {
                version = embedded;
            }
        }
    }

    Some(HeuristicIdentity {
        name: name.unwrap_or_else(|| stem.to_string()),
        version,
    })
}

/// `mc1.20.1` style tokens naming the game version rather than the mod.
fn is_minecraft_marker(token: &str) -> bool {
    token.starts_with("mc") && token.as_bytes().get(2).is_some_and(u8::is_ascii_digit)
}

/// Removes version-like runs from a token, returning the remainder and the
/// first run removed.
fn strip_embedded_versions(token: &str) -> (String, Option<String>) {
    let embedded = RE_EMBEDDED_VERSION
        .find(token)
        .map(|found| found.as_str().to_string());
    let stripped = RE_EMBEDDED_VERSION.replace_all(token, "");
    let stripped = stripped.trim_matches(|c: char| c == '_' || c == '.' || c.is_whitespace());
    (stripped.to_string(), embedded)
}
