//! Tabular export: one CSV table per object kind plus a field/value summary.
//!
//! Mirrors the decoded structure only; columns are the union of property
//! names for the kind, rows follow label (ordinal) order.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use log::info;

use crate::swmm::reader::SwmmOutput;
use crate::swmm::types::error::Result;
use crate::swmm::types::models::{PropertyTable, PropertyValue};

/// Write `subcatchments.csv` / `nodes.csv` / `links.csv` (kinds with no
/// objects are skipped) and `summary.csv` into `dir`.
pub fn write_tables(output: &SwmmOutput, dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    if !output.subcatchment_labels().is_empty() {
        write_object_table(
            &dir.join("subcatchments.csv"),
            output.subcatchment_labels(),
            output.subcatchment_properties(),
        )?;
    }
    if !output.node_labels().is_empty() {
        write_object_table(&dir.join("nodes.csv"), output.node_labels(), output.node_properties())?;
    }
    if !output.link_labels().is_empty() {
        write_object_table(&dir.join("links.csv"), output.link_labels(), output.link_properties())?;
    }
    write_summary_table(output, dir.join("summary.csv"))?;

    info!("Wrote CSV tables to {}", dir.display());
    Ok(())
}

/// Write the field/value summary table for a results file.
pub fn write_summary_table(output: &SwmmOutput, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["field", "value"])?;

    // Serialize the typed summary and walk its fields in declaration order.
    if let serde_json::Value::Object(fields) = serde_json::to_value(output.summary())? {
        for (field, value) in fields {
            writer.write_record([field.as_str(), flatten(&value).as_str()])?;
        }
    }

    writer.flush()?;
    Ok(())
}

fn write_object_table(path: &Path, labels: &[String], table: &PropertyTable) -> Result<()> {
    let columns: BTreeSet<&String> = table.values().flat_map(|props| props.keys()).collect();

    let mut writer = csv::Writer::from_path(path)?;
    let mut header = Vec::with_capacity(columns.len() + 1);
    header.push("id");
    header.extend(columns.iter().map(|c| c.as_str()));
    writer.write_record(&header)?;

    for label in labels {
        let Some(props) = table.get(label) else {
            continue;
        };
        let mut row = Vec::with_capacity(columns.len() + 1);
        row.push(label.clone());
        for column in &columns {
            row.push(match props.get(*column) {
                Some(PropertyValue::Kind(kind)) => kind.clone(),
                Some(PropertyValue::Value(v)) => v.to_string(),
                None => String::new(),
            });
        }
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

fn flatten(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Array(items) => items
            .iter()
            .map(flatten)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}
