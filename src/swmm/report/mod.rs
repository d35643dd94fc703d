//! Decoder for the textual summary report (.rpt) an engine run produces.
//!
//! The report is a human-readable document, not a wire format: sections are
//! framed by asterisk banners and tables are whitespace-aligned. Extraction
//! is therefore regex- and split-based, and deliberately forgiving: a
//! section that is absent or malformed parses to its empty value, never an
//! error. This pipeline shares no code path with the binary container
//! decoder; only I/O failures surface as `Err`.

mod sections;
mod value;

pub use value::{safe_float, safe_int};

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::info;
use serde::Serialize;

use super::types::error::Result;

/// A parsed summary report.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    pub header: ReportHeader,
    pub element_count: ElementCount,
    pub analysis_options: AnalysisOptions,
    pub continuity: Continuity,
    pub subcatchment_runoff: Vec<SubcatchmentRunoff>,
    pub node_depth: Vec<NodeDepth>,
    pub node_inflow: Vec<NodeInflow>,
    pub node_flooding: NodeFlooding,
    pub node_surcharge: Vec<NodeSurcharge>,
    pub storage_volume: Vec<StorageVolume>,
    pub outfall_loading: Vec<OutfallLoading>,
    pub link_flow: Vec<LinkFlow>,
    /// Engine message when no conduits surcharged; `None` when the section
    /// is absent.
    pub conduit_surcharge: Option<String>,
    pub pumping: Vec<PumpingSummary>,
    pub analysis_time: AnalysisTime,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Version/build banner and model title.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportHeader {
    pub version: Option<String>,
    pub build: Option<String>,
    pub title: Option<String>,
}

/// Model element counts from the Element Count section.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ElementCount {
    pub rain_gages: Option<i64>,
    pub subcatchments: Option<i64>,
    pub nodes: Option<i64>,
    pub links: Option<i64>,
    pub pollutants: Option<i64>,
    pub land_uses: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisOptions {
    pub flow_units: Option<String>,
    pub infiltration_method: Option<String>,
    pub flow_routing_method: Option<String>,
    pub starting_date: Option<String>,
    pub ending_date: Option<String>,
}

/// Mass-balance continuity tables; each row maps a normalized label to its
/// two printed columns.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Continuity {
    pub runoff_quantity: BTreeMap<String, [f64; 2]>,
    pub flow_routing: BTreeMap<String, [f64; 2]>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubcatchmentRunoff {
    pub name: String,
    pub total_precip: f64,
    pub total_runon: f64,
    pub total_evap: f64,
    pub total_infil: f64,
    pub imperv_runoff: f64,
    pub perv_runoff: f64,
    pub total_runoff: f64,
    pub total_runoff_mgal: f64,
    pub peak_runoff: f64,
    pub runoff_coeff: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeDepth {
    pub name: String,
    pub node_type: String,
    pub average_depth: f64,
    pub maximum_depth: f64,
    pub maximum_hgl: f64,
    pub time_of_max_days: i64,
    pub time_of_max: String,
    pub reported_max_depth: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeInflow {
    pub name: String,
    pub node_type: String,
    pub maximum_lateral_inflow: f64,
    pub maximum_total_inflow: f64,
    pub time_of_max_days: i64,
    pub time_of_max: String,
    pub lateral_inflow_volume: f64,
    pub total_inflow_volume: Option<f64>,
    pub flow_balance_error: Option<f64>,
}

/// Outcome of the Node Flooding Summary section.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeFlooding {
    /// Section absent, or present but with no parseable rows.
    #[default]
    NotReported,
    /// The engine reported that no nodes were flooded.
    NoneFlooded,
    Flooded(Vec<FloodedNode>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloodedNode {
    pub name: String,
    pub hours_flooded: f64,
    pub maximum_rate: f64,
    pub time_of_max_days: i64,
    pub time_of_max: String,
    pub total_flood_volume: Option<f64>,
    pub maximum_ponded_depth: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeSurcharge {
    pub name: String,
    pub node_type: String,
    pub hours_surcharged: f64,
    pub max_height_above_crown: f64,
    pub min_depth_below_rim: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StorageVolume {
    pub storage_unit: String,
    pub avg_volume: f64,
    pub avg_pct_full: f64,
    pub evap_pct_loss: f64,
    pub exfil_pct_loss: f64,
    pub max_volume: f64,
    pub max_pct_full: f64,
    pub time_of_max_days: i64,
    pub time_of_max: String,
    pub max_outflow: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutfallLoading {
    pub name: String,
    pub flow_freq: f64,
    pub avg_flow: f64,
    pub max_flow: f64,
    pub total_volume: Option<f64>,
    pub pollutant_loads: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LinkFlow {
    pub name: String,
    pub link_type: String,
    pub maximum_flow: f64,
    pub time_of_max_days: i64,
    pub time_of_max: String,
    pub maximum_velocity: f64,
    pub max_over_full_flow: Option<f64>,
    pub max_over_full_depth: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PumpingSummary {
    pub pump_name: String,
    pub percent_utilized: f64,
    pub num_startups: i64,
    pub min_flow: f64,
    pub avg_flow: f64,
    pub max_flow: f64,
    pub total_volume: f64,
    pub power_usage: f64,
    pub pct_time_off_curve_low: f64,
    pub pct_time_off_curve_high: f64,
}

/// Wall-clock bookkeeping printed at the end of a run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisTime {
    pub begun: Option<String>,
    pub ended: Option<String>,
    pub elapsed: Option<String>,
}

/// Read and parse a report file. The file is decoded lossily, matching the
/// engine's loose output encoding.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Report> {
    let path = path.as_ref();
    info!("Parsing report file: {}", path.display());
    let bytes = fs::read(path)?;
    Ok(parse_str(&String::from_utf8_lossy(&bytes)))
}

/// Parse report text already in memory. Infallible by design: missing or
/// malformed sections resolve to their empty values.
pub fn parse_str(content: &str) -> Report {
    Report {
        header: sections::parse_header(content),
        element_count: sections::parse_element_count(content),
        analysis_options: sections::parse_analysis_options(content),
        continuity: sections::parse_continuity(content),
        subcatchment_runoff: sections::parse_subcatchment_runoff(content),
        node_depth: sections::parse_node_depth(content),
        node_inflow: sections::parse_node_inflow(content),
        node_flooding: sections::parse_node_flooding(content),
        node_surcharge: sections::parse_node_surcharge(content),
        storage_volume: sections::parse_storage_volume(content),
        outfall_loading: sections::parse_outfall_loading(content),
        link_flow: sections::parse_link_flow(content),
        conduit_surcharge: sections::parse_conduit_surcharge(content),
        pumping: sections::parse_pumping_summary(content),
        analysis_time: sections::parse_analysis_time(content),
        errors: sections::parse_errors(content),
        warnings: sections::parse_warnings(content),
    }
}
