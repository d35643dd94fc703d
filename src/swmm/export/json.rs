//! JSON export: restates the decoded structure, nothing more.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use log::info;
use serde::Serialize;

use crate::swmm::reader::{Summary, SwmmOutput};
use crate::swmm::types::error::Result;
use crate::swmm::types::models::{OutputHeader, OutputMetadata};

/// The exported document: decoded header and metadata verbatim, plus the
/// facade's aggregate summary.
#[derive(Serialize)]
struct Document<'a> {
    header: &'a OutputHeader,
    metadata: &'a OutputMetadata,
    summary: Summary,
}

fn document(output: &SwmmOutput) -> Document<'_> {
    Document {
        header: &output.decoded().header,
        metadata: &output.decoded().metadata,
        summary: output.summary(),
    }
}

/// Render the export document as an in-memory JSON value.
pub fn to_json_value(output: &SwmmOutput) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(document(output))?)
}

/// Write the export document to a file, creating parent directories.
pub fn write_json(output: &SwmmOutput, path: impl AsRef<Path>, pretty: bool) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let writer = BufWriter::new(File::create(path)?);
    if pretty {
        serde_json::to_writer_pretty(writer, &document(output))?;
    } else {
        serde_json::to_writer(writer, &document(output))?;
    }

    info!("Wrote JSON export to {}", path.display());
    Ok(())
}
