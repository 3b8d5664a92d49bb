//! Efficiency table output: the live progress table and the results file.

use std::io::{self, Write};
use std::path::Path;

use geoeff_core::{PointReport, SweepResult};
use tempfile::NamedTempFile;

/// Header line of the results file.
pub const RESULTS_HEADER: &str = "z/rd \t point source \t Model \t Relative uncertainty ";

/// Column titles of the progress table.
#[must_use]
pub fn progress_header() -> String {
    "Completion(%)\tEfficiency (%)\t \tRelative error (%)".to_string()
}

/// One progress table row for a finished grid point.
#[must_use]
pub fn progress_row(report: &PointReport) -> String {
    format!(
        "{:.1}\t{:.6}\t \t{:.6}",
        report.completion * 100.0,
        report.point.efficiency,
        report.point.relative_uncertainty
    )
}

/// Render the tab-separated results table.
#[must_use]
pub fn format_results(result: &SweepResult) -> String {
    let mut out = String::with_capacity(64 * (result.len() + 1));
    out.push_str(RESULTS_HEADER);
    out.push('\n');
    for point in result.iter() {
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\n",
            point.z, point.point_source, point.efficiency, point.relative_uncertainty
        ));
    }
    out
}

/// Write the results table to `path`.
///
/// The table is written to a uniquely named temporary file in the same directory
/// and renamed into place, so a failed write never leaves a partial results file
/// behind and concurrent runs never share a temporary file.
pub fn write_results(path: &Path, result: &SweepResult) -> io::Result<()> {
    atomic_write(path, &format_results(result))?;
    tracing::info!(path = %path.display(), rows = result.len(), "wrote results");
    Ok(())
}

fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // Dropping the temporary file on any error removes it
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(content.as_bytes())?;
    file.flush()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}
