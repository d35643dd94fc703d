//! Export adapters for decoded results.
//!
//! Adapters consume the decoded structure through [`SwmmOutput`] only; they
//! never reinterpret the raw container bytes.

pub mod json;
pub mod table;

use std::path::Path;

use super::reader::SwmmOutput;
use super::types::error::Result;

/// Supported export targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// One JSON document with header, metadata and summary.
    Json,
    /// A single field/value summary table.
    SummaryCsv,
    /// A directory of per-object-kind tables plus the summary table.
    Tables,
}

impl ExportFormat {
    /// Infer a format from the target path: `.json` and `.csv` select the
    /// single-file exports, an extension-less path selects the table
    /// directory, anything else defaults to JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::SummaryCsv,
            Some(_) => Self::Json,
            None => Self::Tables,
        }
    }
}

/// Write an export to `path`, inferring the format from the path when none
/// is given.
pub fn write_to_path(
    output: &SwmmOutput,
    path: impl AsRef<Path>,
    format: Option<ExportFormat>,
) -> Result<()> {
    let path = path.as_ref();
    match format.unwrap_or_else(|| ExportFormat::from_path(path)) {
        ExportFormat::Json => json::write_json(output, path, true),
        ExportFormat::SummaryCsv => table::write_summary_table(output, path),
        ExportFormat::Tables => table::write_tables(output, path),
    }
}
