//! Core data structures for decoded .out containers.
//!
//! Everything here is built once by the decoder and immutable afterwards;
//! consumers (facade, exporters) only ever read it.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use super::codes::{ConcentrationUnit, FlowUnit};

/// Sentinel value at byte offset 0 of every .out container.
pub const MAGIC_NUMBER: i32 = 516_114_522;

/// Parsed file header: sentinel-validated identity plus object counts.
#[derive(Debug, Clone, Serialize)]
pub struct OutputHeader {
    /// Engine version as the raw encoded integer (e.g. `50200`).
    pub version: i32,
    pub flow_unit: FlowUnit,
    pub n_subcatchments: usize,
    pub n_nodes: usize,
    pub n_links: usize,
    pub n_pollutants: usize,
}

impl OutputHeader {
    /// Decode the packed version integer into `major.minor.patch`,
    /// e.g. `50200` becomes `"5.2.0"`.
    pub fn version_string(&self) -> String {
        let v = self.version;
        format!("{}.{}.{}", v / 10_000, (v / 100) % 100, v % 100)
    }
}

/// Object label sequences, one per kind, in file order.
///
/// An object's position in its sequence is its ordinal ID, used to correlate
/// labels with unit codes and property values read from parallel tables.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Labels {
    #[serde(rename = "subcatchment")]
    pub subcatchments: Vec<String>,
    #[serde(rename = "node")]
    pub nodes: Vec<String>,
    #[serde(rename = "link")]
    pub links: Vec<String>,
    #[serde(rename = "pollutant")]
    pub pollutants: Vec<String>,
}

/// A single static property value.
///
/// The `type` property is categorical (a resolved kind name); every other
/// property the format defines is a single-precision float.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Kind(String),
    Value(f32),
}

impl PropertyValue {
    pub fn as_kind(&self) -> Option<&str> {
        match self {
            Self::Kind(name) => Some(name),
            Self::Value(_) => None,
        }
    }

    pub fn as_value(&self) -> Option<f32> {
        match self {
            Self::Kind(_) => None,
            Self::Value(v) => Some(*v),
        }
    }
}

/// Property name -> value for one object. Keyed by name because the set of
/// properties present is itself data-driven (the file declares its codes).
pub type PropertyMap = BTreeMap<String, PropertyValue>;

/// Object label -> property map for one object kind.
pub type PropertyTable = BTreeMap<String, PropertyMap>;

/// Static property tables for the three kinds that carry them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PropertyTables {
    pub subcatchment: PropertyTable,
    pub node: PropertyTable,
    pub link: PropertyTable,
}

/// How many time-varying result variables each object kind records per step.
///
/// This decoder only carries the counts; the per-step value blocks beyond the
/// metadata boundary are not decoded.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct VariableCounts {
    pub subcatchment: i32,
    pub node: i32,
    pub link: i32,
    pub system: i32,
}

/// Everything between the header and the per-step result blocks, plus the
/// footer-derived period count.
#[derive(Debug, Clone, Serialize)]
pub struct OutputMetadata {
    pub labels: Labels,
    /// Pollutant label -> concentration unit, paired by ordinal ID.
    pub pollutant_units: BTreeMap<String, ConcentrationUnit>,
    pub properties: PropertyTables,
    pub variables: VariableCounts,
    pub start_date: NaiveDateTime,
    pub report_interval_seconds: i64,
    /// Number of reporting periods, from footer index 3.
    pub n_periods: usize,
}

/// Counters for anomalies the tolerant decode absorbed into the data.
///
/// Decode semantics are unchanged by these; they exist so pipelines can
/// detect silent degradation after the fact.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct DecodeDiagnostics {
    /// Primitive reads that ran past end-of-file and yielded zero values.
    pub short_reads: u32,
    /// Unit/kind/property codes outside their tables, resolved to placeholders.
    pub unknown_codes: u32,
    /// Calendar fields that fell back to the fixed default timestamp.
    pub invalid_dates: u32,
    /// The file was too short to hold a footer; period count degraded to 0.
    pub missing_footer: bool,
}

impl DecodeDiagnostics {
    /// True when every field decoded cleanly.
    pub fn is_clean(&self) -> bool {
        self.short_reads == 0
            && self.unknown_codes == 0
            && self.invalid_dates == 0
            && !self.missing_footer
    }
}

/// A fully decoded .out container. Immutable; safe to share read-only.
#[derive(Debug, Clone, Serialize)]
pub struct DecodedOutput {
    pub header: OutputHeader,
    pub metadata: OutputMetadata,
    /// Absolute timestamp of every reporting period:
    /// `start_date + report_interval * i` for i in `0..n_periods`.
    pub time_index: Vec<NaiveDateTime>,
    #[serde(skip)]
    pub diagnostics: DecodeDiagnostics,
}
