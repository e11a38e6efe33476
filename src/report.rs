use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::model::{ArchiveRecord, ReconciliationReport};

/// Output format of a rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Writes `report` to `out` in the requested format.
pub fn write_report<W: Write>(
    report: &ReconciliationReport<'_>,
    format: ReportFormat,
    out: &mut W,
) -> Result<()> {
    match format {
        ReportFormat::Text => render_text(report, out),
        ReportFormat::Json => {
            let json = render_json(report)?;
            writeln!(out, "{json}")?;
            Ok(())
        }
    }
}

/// Pretty printed JSON form of the report.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Plain column layout: matches, then each side's leftovers, then a summary.
pub fn render_text<W: Write>(report: &ReconciliationReport<'_>, out: &mut W) -> Result<()> {
    let width = report
        .matches
        .iter()
        .map(|found| found.local.file_name.len())
        .max()
        .unwrap_or(0);

    writeln!(out, "Matched ({}):", report.matches.len())?;
    for found in &report.matches {
        writeln!(
            out,
            "  {:<width$} <-> {} ({})",
            found.local.file_name,
            found.remote.file_name,
            format_percent(found.similarity),
        )?;
    }

    write_unmatched(out, "Only local", &report.unmatched_local)?;
    write_unmatched(out, "Only remote", &report.unmatched_remote)?;

    writeln!(
        out,
        "{} matched, {} only local, {} only remote",
        report.matches.len(),
        report.unmatched_local.len(),
        report.unmatched_remote.len()
    )?;
    Ok(())
}

/// Similarity as a whole percentage, e.g. `0.5` -> `50%`.
pub fn format_percent(similarity: f64) -> String {
    format!("{:.0}%", similarity * 100.0)
}

fn write_unmatched<W: Write>(out: &mut W, title: &str, records: &[&ArchiveRecord]) -> Result<()> {
    writeln!(out, "{title} ({}):", records.len())?;
    let width = records
        .iter()
        .map(|record| record.file_name.len())
        .max()
        .unwrap_or(0);
    for record in records {
        writeln!(
            out,
            "  {:<width$}  [{}]",
            record.file_name,
            record.display_identity()
        )?;
    }
    Ok(())
}
