//! High-level facade over a decoded results container.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::Serialize;

use super::decoder::{decode_file, DecodeOptions};
use super::types::codes::{ConcentrationUnit, FlowUnit};
use super::types::error::Result;
use super::types::models::{DecodeDiagnostics, DecodedOutput, PropertyMap, PropertyTable};

/// Read-only view over a decoded .out results file.
///
/// All accessors are pure queries; the underlying structure is built once
/// by [`open`](SwmmOutput::open) and never mutated.
#[derive(Debug)]
pub struct SwmmOutput {
    path: Option<PathBuf>,
    data: DecodedOutput,
}

/// One object's identity plus its static properties, as returned by the
/// per-label lookups.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectRecord {
    pub id: String,
    #[serde(flatten)]
    pub properties: PropertyMap,
}

/// Aggregate overview of a results file.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub version: String,
    pub flow_unit: FlowUnit,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub duration_seconds: i64,
    pub report_interval_seconds: i64,
    pub n_periods: usize,
    pub n_subcatchments: usize,
    pub n_nodes: usize,
    pub n_links: usize,
    pub n_pollutants: usize,
    pub pollutants: Vec<String>,
}

impl SwmmOutput {
    /// Decode a results file with default (tolerant) options.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, DecodeOptions::default())
    }

    /// Decode a results file with explicit options.
    pub fn open_with(path: impl AsRef<Path>, options: DecodeOptions) -> Result<Self> {
        let path = path.as_ref();
        let data = decode_file(path, options)?;
        Ok(Self {
            path: Some(path.to_path_buf()),
            data,
        })
    }

    /// Wrap an already decoded structure.
    pub fn from_decoded(data: DecodedOutput) -> Self {
        Self { path: None, data }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The full decoded structure.
    pub fn decoded(&self) -> &DecodedOutput {
        &self.data
    }

    pub fn diagnostics(&self) -> DecodeDiagnostics {
        self.data.diagnostics
    }

    /// Engine version as `major.minor.patch`.
    pub fn version(&self) -> String {
        self.data.header.version_string()
    }

    pub fn flow_unit(&self) -> FlowUnit {
        self.data.header.flow_unit
    }

    pub fn start_date(&self) -> NaiveDateTime {
        self.data.metadata.start_date
    }

    /// Timestamp of the last reporting period, or the start date when the
    /// file holds no periods.
    pub fn end_date(&self) -> NaiveDateTime {
        self.data
            .time_index
            .last()
            .copied()
            .unwrap_or(self.data.metadata.start_date)
    }

    pub fn report_interval_seconds(&self) -> i64 {
        self.data.metadata.report_interval_seconds
    }

    pub fn n_periods(&self) -> usize {
        self.data.metadata.n_periods
    }

    pub fn time_index(&self) -> &[NaiveDateTime] {
        &self.data.time_index
    }

    pub fn n_subcatchments(&self) -> usize {
        self.data.header.n_subcatchments
    }

    pub fn n_nodes(&self) -> usize {
        self.data.header.n_nodes
    }

    pub fn n_links(&self) -> usize {
        self.data.header.n_links
    }

    pub fn n_pollutants(&self) -> usize {
        self.data.header.n_pollutants
    }

    pub fn subcatchment_labels(&self) -> &[String] {
        &self.data.metadata.labels.subcatchments
    }

    pub fn node_labels(&self) -> &[String] {
        &self.data.metadata.labels.nodes
    }

    pub fn link_labels(&self) -> &[String] {
        &self.data.metadata.labels.links
    }

    pub fn pollutant_labels(&self) -> &[String] {
        &self.data.metadata.labels.pollutants
    }

    pub fn pollutant_units(&self) -> &BTreeMap<String, ConcentrationUnit> {
        &self.data.metadata.pollutant_units
    }

    pub fn subcatchment_properties(&self) -> &PropertyTable {
        &self.data.metadata.properties.subcatchment
    }

    pub fn node_properties(&self) -> &PropertyTable {
        &self.data.metadata.properties.node
    }

    pub fn link_properties(&self) -> &PropertyTable {
        &self.data.metadata.properties.link
    }

    /// Look up one node by label.
    pub fn get_node(&self, id: &str) -> Option<ObjectRecord> {
        Self::record(&self.data.metadata.properties.node, id)
    }

    /// Look up one link by label.
    pub fn get_link(&self, id: &str) -> Option<ObjectRecord> {
        Self::record(&self.data.metadata.properties.link, id)
    }

    /// Look up one subcatchment by label.
    pub fn get_subcatchment(&self, id: &str) -> Option<ObjectRecord> {
        Self::record(&self.data.metadata.properties.subcatchment, id)
    }

    fn record(table: &PropertyTable, id: &str) -> Option<ObjectRecord> {
        table.get(id).map(|properties| ObjectRecord {
            id: id.to_string(),
            properties: properties.clone(),
        })
    }

    /// Aggregate overview of the file contents.
    pub fn summary(&self) -> Summary {
        let start = self.start_date();
        let end = self.end_date();
        Summary {
            version: self.version(),
            flow_unit: self.flow_unit(),
            start_date: start,
            end_date: end,
            duration_seconds: (end - start).num_seconds(),
            report_interval_seconds: self.report_interval_seconds(),
            n_periods: self.n_periods(),
            n_subcatchments: self.n_subcatchments(),
            n_nodes: self.n_nodes(),
            n_links: self.n_links(),
            n_pollutants: self.n_pollutants(),
            pollutants: self.pollutant_labels().to_vec(),
        }
    }
}
