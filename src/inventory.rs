//! Builds an inventory of archive records from a local or remote source.

use tracing::{debug, info, instrument, warn};

use crate::error::{Result, ToolError};
use crate::heuristic::{is_archive_name, parse_filename};
use crate::metadata::parse_metadata_bytes;
use crate::model::ArchiveRecord;

/// One directory entry reported by a source listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub file_name: String,
    /// Path usable by the same source to fetch the entry again.
    pub path: String,
}

/// A directory of mod archives that can be listed and read.
pub trait ArchiveSource {
    /// Short label used in logs, e.g. a directory path or `host:dir`.
    fn describe(&self) -> String;

    /// Lists directory entries in enumeration order. Non-archive entries
    /// may be included; they are filtered out by [`build_inventory`].
    fn list_entries(&self) -> Result<Vec<ArchiveEntry>>;

    /// Returns the raw bytes of the archive's embedded metadata entry.
    fn fetch_metadata(&self, entry: &ArchiveEntry) -> Result<Vec<u8>>;
}

/// Scans every archive of `source`, producing one record per archive in
/// listing order.
///
/// A listing failure aborts the scan. Per-archive fetch or parse failures
/// are logged and fall back to the filename heuristic.
#[instrument(level = "info", skip_all, fields(source = %source.describe()))]
pub fn build_inventory<S>(source: &S) -> Result<Vec<ArchiveRecord>>
where
    S: ArchiveSource + ?Sized,
{
    let entries = source.list_entries()?;
    debug!(entry_count = entries.len(), "listed source entries");

    let records: Vec<ArchiveRecord> = entries
        .iter()
        .filter(|entry| is_archive_name(&entry.file_name))
        .map(|entry| build_record(entry, source.fetch_metadata(entry)))
        .collect();

    let unidentified = records.iter().filter(|record| record.is_unidentified()).count();
    info!(
        archive_count = records.len(),
        unidentified, "inventory built"
    );
    Ok(records)
}

/// Turns the outcome of one metadata fetch into an archive record.
pub fn build_record(entry: &ArchiveEntry, fetched: Result<Vec<u8>>) -> ArchiveRecord {
    match fetched.and_then(|raw| parse_metadata_bytes(&raw)) {
        Ok(metadata) => {
            debug!(
                archive = %entry.file_name,
                mod_count = metadata.mods.len(),
                loader = %metadata.mod_loader,
                "parsed embedded metadata"
            );
            ArchiveRecord::with_mods(&entry.file_name, &entry.path, metadata.mods)
        }
        Err(error) => {
            log_fallback(entry, &error);
            let heuristic = parse_filename(&entry.file_name);
            if heuristic.is_none() {
                warn!(archive = %entry.file_name, "no identity could be derived");
            }
            ArchiveRecord::with_heuristic(&entry.file_name, &entry.path, heuristic)
        }
    }
}

fn log_fallback(entry: &ArchiveEntry, error: &ToolError) {
    match error {
        ToolError::MetadataParse(_) => warn!(
            archive = %entry.file_name,
            %error,
            "embedded metadata unparsable, guessing identity from filename"
        ),
        _ => warn!(
            archive = %entry.file_name,
            %error,
            "embedded metadata unavailable, guessing identity from filename"
        ),
    }
}
