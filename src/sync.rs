use std::io::Write;
use std::path::Path;

use tracing::{info, instrument};

use crate::config::Settings;
use crate::error::{Result, ToolError};
use crate::inventory::{ArchiveEntry, ArchiveSource, build_inventory, build_record};
use crate::io::local::{LocalSource, read_metadata_entry};
use crate::io::remote::RemoteSource;
use crate::model::ArchiveRecord;
use crate::reconcile::{MatchOptions, reconcile_with};
use crate::report::{ReportFormat, write_report};

/// Compares the configured local directory against the remote one and
/// writes the report to `out`.
#[instrument(
    level = "info",
    skip_all,
    fields(local = %settings.local_dir.display(), remote = %settings.remote)
)]
pub fn compare<W: Write>(settings: &Settings, format: ReportFormat, out: &mut W) -> Result<()> {
    let local = LocalSource::new(&settings.local_dir, settings.metadata_entries.clone())?;
    let remote = RemoteSource::new(settings.remote.clone(), settings.metadata_entries.clone());
    compare_sources(&local, &remote, &settings.options, format, out)
}

/// Builds both inventories, reconciles them, and renders the result.
pub fn compare_sources<W: Write>(
    local: &dyn ArchiveSource,
    remote: &dyn ArchiveSource,
    options: &MatchOptions,
    format: ReportFormat,
    out: &mut W,
) -> Result<()> {
    let local_records = build_inventory(local)?;
    let remote_records = build_inventory(remote)?;

    let report = reconcile_with(&local_records, &remote_records, options);
    info!(
        matched = report.matches.len(),
        only_local = report.unmatched_local.len(),
        only_remote = report.unmatched_remote.len(),
        "reconciliation complete"
    );
    write_report(&report, format, out)
}

/// Extracts the identity of a single local archive.
#[instrument(level = "info", skip(entries), fields(path = %path.display()))]
pub fn inspect(path: &Path, entries: &[String]) -> Result<ArchiveRecord> {
    if !path.is_file() {
        return Err(ToolError::MissingInput(path.to_path_buf()));
    }
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let entry = ArchiveEntry {
        file_name,
        path: path.display().to_string(),
    };
    Ok(build_record(&entry, read_metadata_entry(path, entries)))
}
