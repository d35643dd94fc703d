//! Per-section extraction from report text.
//!
//! Sections are located by their banner headings; tables are consumed line
//! by line, skipping the whitespace-aligned column headers. Rows that fail
//! to parse are dropped, matching the report's informational nature.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use super::value::{safe_float, safe_int};
use super::{
    AnalysisOptions, AnalysisTime, Continuity, ElementCount, FloodedNode, LinkFlow, NodeDepth,
    NodeFlooding, NodeInflow, NodeSurcharge, OutfallLoading, PumpingSummary, ReportHeader,
    StorageVolume, SubcatchmentRunoff,
};

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid report pattern")
}

/// Captures group 1 of `pattern` in `content`.
fn section_body(content: &str, pattern: &str) -> Option<String> {
    regex(pattern).captures(content).map(|c| c[1].to_string())
}

/// Body of a banner-framed table section, up to the next banner.
fn table_section(content: &str, heading: &str) -> Option<String> {
    section_body(
        content,
        &format!(r"(?s){}\s*\*+(.+?)(?:\n\s*\n\s*\*+|\z)", regex::escape(heading)),
    )
}

pub(super) fn parse_header(content: &str) -> ReportHeader {
    static VERSION_RE: OnceLock<Regex> = OnceLock::new();
    static BUILD_RE: OnceLock<Regex> = OnceLock::new();

    let version = VERSION_RE
        .get_or_init(|| regex(r"EPA STORM WATER MANAGEMENT MODEL - VERSION ([\d.]+)"))
        .captures(content)
        .map(|c| c[1].to_string());
    let build = BUILD_RE
        .get_or_init(|| regex(r"Build ([\d.]+)"))
        .captures(content)
        .map(|c| c[1].to_string());

    // The model title sits a few lines below the version banner.
    let lines: Vec<&str> = content.lines().collect();
    let mut title = None;
    if let Some(banner) = lines
        .iter()
        .position(|l| l.contains("EPA STORM WATER MANAGEMENT MODEL"))
    {
        for line in lines.iter().skip(banner + 3).take(7) {
            let candidate = line.trim();
            if !candidate.is_empty() && !candidate.starts_with('*') {
                title = Some(candidate.to_string());
                break;
            }
        }
    }

    ReportHeader { version, build, title }
}

pub(super) fn parse_element_count(content: &str) -> ElementCount {
    let Some(section) =
        section_body(content, r"(?s)\*+\s*Element Count\s*\*+(.+?)(?:\n\s*\n|\*+|\z)")
    else {
        return ElementCount::default();
    };

    let count = |phrase: &str| -> Option<i64> {
        regex(&format!(r"Number of {}\s*\.+\s*(\d+)", phrase))
            .captures(&section)
            .and_then(|c| c[1].parse().ok())
    };

    ElementCount {
        rain_gages: count("rain gages"),
        subcatchments: count("subcatchments"),
        nodes: count("nodes"),
        links: count("links"),
        pollutants: count("pollutants"),
        land_uses: count("land uses"),
    }
}

pub(super) fn parse_analysis_options(content: &str) -> AnalysisOptions {
    let Some(section) =
        section_body(content, r"(?s)\*+\s*Analysis Options\s*\*+(.+?)(?:\n\s*\n\s*\*+|\z)")
    else {
        return AnalysisOptions::default();
    };

    let field = |pattern: &str| -> Option<String> {
        regex(pattern)
            .captures(&section)
            .map(|c| c[1].trim().to_string())
    };

    AnalysisOptions {
        flow_units: field(r"Flow Units\s*\.+\s*(\w+)"),
        infiltration_method: field(r"Infiltration Method\s*\.+\s*(\w+)"),
        flow_routing_method: field(r"Flow Routing Method\s*\.+\s*(\w+)"),
        starting_date: field(r"Starting Date\s*\.+\s*(.+)"),
        ending_date: field(r"Ending Date\s*\.+\s*(.+)"),
    }
}

pub(super) fn parse_continuity(content: &str) -> Continuity {
    let runoff = section_body(
        content,
        r"(?s)Runoff Quantity Continuity\s+acre-feet\s+inches\s*\*+(.+?)(?:\n\s*\n\s*\*+|\z)",
    );
    let routing = section_body(
        content,
        r"(?s)Flow Routing Continuity\s+acre-feet\s+10\^6 gal\s*\*+(.+?)(?:\n\s*\n\s*\*+|\z)",
    );

    Continuity {
        runoff_quantity: runoff.map(|t| continuity_table(&t)).unwrap_or_default(),
        flow_routing: routing.map(|t| continuity_table(&t)).unwrap_or_default(),
    }
}

/// Rows like `Total Precipitation ......    8.176    6.655`.
fn continuity_table(text: &str) -> BTreeMap<String, [f64; 2]> {
    static ROW_RE: OnceLock<Regex> = OnceLock::new();
    let row_re = ROW_RE
        .get_or_init(|| regex(r"^([A-Za-z\s()%]+?)\s*\.+\s+([\d.><*-]+)\s+([\d.><*-]+)"));

    let mut data = BTreeMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('-') {
            continue;
        }
        let Some(caps) = row_re.captures(line) else {
            continue;
        };
        let key = caps[1]
            .trim()
            .to_lowercase()
            .replace(' ', "_")
            .replace(['(', ')'], "")
            .replace('%', "percent");
        let (Some(first), Some(second)) = (safe_float(&caps[2]), safe_float(&caps[3])) else {
            continue;
        };
        data.insert(key, [first, second]);
    }
    data
}

pub(super) fn parse_subcatchment_runoff(content: &str) -> Vec<SubcatchmentRunoff> {
    let Some(section) = table_section(content, "Subcatchment Runoff Summary") else {
        return Vec::new();
    };

    let mut rows = Vec::new();
    let mut data_started = false;
    for line in section.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('-') {
            continue;
        }
        if line.starts_with("Subcatchment") && !(line.contains("Precip") || line.contains("Runon"))
        {
            data_started = true;
            continue;
        }
        if !data_started {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() >= 10 {
            if let Some(row) = subcatchment_runoff_row(&parts) {
                rows.push(row);
            }
        }
    }
    rows
}

fn subcatchment_runoff_row(parts: &[&str]) -> Option<SubcatchmentRunoff> {
    Some(SubcatchmentRunoff {
        name: parts[0].to_string(),
        total_precip: safe_float(parts[1])?,
        total_runon: safe_float(parts[2])?,
        total_evap: safe_float(parts[3])?,
        total_infil: safe_float(parts[4])?,
        imperv_runoff: safe_float(parts[5])?,
        perv_runoff: safe_float(parts[6])?,
        total_runoff: safe_float(parts[7])?,
        total_runoff_mgal: safe_float(parts[8])?,
        peak_runoff: safe_float(parts[9])?,
        runoff_coeff: parts.get(10).and_then(|v| safe_float(v)),
    })
}

pub(super) fn parse_node_depth(content: &str) -> Vec<NodeDepth> {
    let Some(section) = table_section(content, "Node Depth Summary") else {
        return Vec::new();
    };

    let mut rows = Vec::new();
    let mut data_started = false;
    for line in section.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('-') {
            continue;
        }
        if line.contains("Node") && line.contains("Type") {
            data_started = true;
            continue;
        }
        if !data_started {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() >= 7 {
            if let Some(row) = node_depth_row(&parts) {
                rows.push(row);
            }
        }
    }
    rows
}

fn node_depth_row(parts: &[&str]) -> Option<NodeDepth> {
    Some(NodeDepth {
        name: parts[0].to_string(),
        node_type: parts[1].to_string(),
        average_depth: safe_float(parts[2])?,
        maximum_depth: safe_float(parts[3])?,
        maximum_hgl: safe_float(parts[4])?,
        time_of_max_days: safe_int(parts[5])?,
        time_of_max: parts[6].to_string(),
        reported_max_depth: parts.get(7).and_then(|v| safe_float(v)),
    })
}

pub(super) fn parse_node_inflow(content: &str) -> Vec<NodeInflow> {
    let Some(section) = table_section(content, "Node Inflow Summary") else {
        return Vec::new();
    };

    let mut rows = Vec::new();
    let mut data_started = false;
    for line in section.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('-') {
            continue;
        }
        if line.contains("Node") && line.contains("Type") {
            data_started = true;
            continue;
        }
        if !data_started {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() >= 8 {
            if let Some(row) = node_inflow_row(&parts) {
                rows.push(row);
            }
        }
    }
    rows
}

fn node_inflow_row(parts: &[&str]) -> Option<NodeInflow> {
    Some(NodeInflow {
        name: parts[0].to_string(),
        node_type: parts[1].to_string(),
        maximum_lateral_inflow: safe_float(parts[2])?,
        maximum_total_inflow: safe_float(parts[3])?,
        time_of_max_days: safe_int(parts[4])?,
        time_of_max: parts[5].to_string(),
        lateral_inflow_volume: safe_float(parts[6])?,
        total_inflow_volume: parts.get(7).and_then(|v| safe_float(v)),
        flow_balance_error: parts.get(8).and_then(|v| safe_float(v)),
    })
}

pub(super) fn parse_node_flooding(content: &str) -> NodeFlooding {
    let Some(section) = table_section(content, "Node Flooding Summary") else {
        return NodeFlooding::NotReported;
    };
    if section.contains("No nodes were flooded") {
        return NodeFlooding::NoneFlooded;
    }

    let mut rows = Vec::new();
    let mut data_started = false;
    for line in section.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('-') {
            continue;
        }
        if line.contains("Node") && line.contains("Flooded") {
            data_started = true;
            continue;
        }
        if line.contains("Flooding refers to") {
            continue;
        }
        if !data_started {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() >= 7 {
            if let Some(row) = flooded_node_row(&parts) {
                rows.push(row);
            }
        }
    }

    if rows.is_empty() {
        NodeFlooding::NotReported
    } else {
        NodeFlooding::Flooded(rows)
    }
}

fn flooded_node_row(parts: &[&str]) -> Option<FloodedNode> {
    Some(FloodedNode {
        name: parts[0].to_string(),
        hours_flooded: safe_float(parts[1])?,
        maximum_rate: safe_float(parts[2])?,
        time_of_max_days: safe_int(parts[3])?,
        time_of_max: parts[4].to_string(),
        total_flood_volume: parts.get(5).and_then(|v| safe_float(v)),
        maximum_ponded_depth: parts.get(6).and_then(|v| safe_float(v)),
    })
}

pub(super) fn parse_node_surcharge(content: &str) -> Vec<NodeSurcharge> {
    let Some(section) = section_body(
        content,
        r"(?s)Node Surcharge Summary\s*\*+.+?-+\s*(.+?)(?:\n\s*\n\s*\*+|\z)",
    ) else {
        return Vec::new();
    };

    let mut rows = Vec::new();
    for line in section.lines() {
        let line = line.trim();
        if line.is_empty()
            || line.starts_with('-')
            || line.contains("Node")
            || line.contains("Surcharging occurs")
        {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() >= 5 {
            if let Some(row) = node_surcharge_row(&parts) {
                rows.push(row);
            }
        }
    }
    rows
}

fn node_surcharge_row(parts: &[&str]) -> Option<NodeSurcharge> {
    Some(NodeSurcharge {
        name: parts[0].to_string(),
        node_type: parts[1].to_string(),
        hours_surcharged: safe_float(parts[2])?,
        max_height_above_crown: safe_float(parts[3])?,
        min_depth_below_rim: safe_float(parts[4])?,
    })
}

pub(super) fn parse_storage_volume(content: &str) -> Vec<StorageVolume> {
    let Some(section) = section_body(
        content,
        r"(?s)Storage Volume Summary\s*\*+.+?-+\s*(.+?)(?:\n\s*\n\s*\*+|\z)",
    ) else {
        return Vec::new();
    };

    let mut rows = Vec::new();
    for line in section.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('-') || line.contains("Storage Unit") {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() >= 9 {
            if let Some(row) = storage_volume_row(&parts) {
                rows.push(row);
            }
        }
    }
    rows
}

fn storage_volume_row(parts: &[&str]) -> Option<StorageVolume> {
    Some(StorageVolume {
        storage_unit: parts[0].to_string(),
        avg_volume: safe_float(parts[1])?,
        avg_pct_full: safe_float(parts[2])?,
        evap_pct_loss: safe_float(parts[3])?,
        exfil_pct_loss: safe_float(parts[4])?,
        max_volume: safe_float(parts[5])?,
        max_pct_full: safe_float(parts[6])?,
        time_of_max_days: safe_int(parts[7])?,
        time_of_max: parts[8].to_string(),
        max_outflow: parts.get(9).and_then(|v| safe_float(v)),
    })
}

pub(super) fn parse_outfall_loading(content: &str) -> Vec<OutfallLoading> {
    let Some(section) = table_section(content, "Outfall Loading Summary") else {
        return Vec::new();
    };

    let mut rows = Vec::new();
    let mut data_started = false;
    for line in section.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('-') {
            continue;
        }
        if line.contains("Outfall Node") {
            data_started = true;
            continue;
        }
        if !data_started {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() >= 4 && parts[0] != "System" {
            if let Some(row) = outfall_loading_row(&parts) {
                rows.push(row);
            }
        }
    }
    rows
}

fn outfall_loading_row(parts: &[&str]) -> Option<OutfallLoading> {
    Some(OutfallLoading {
        name: parts[0].to_string(),
        flow_freq: safe_float(parts[1])?,
        avg_flow: safe_float(parts[2])?,
        max_flow: safe_float(parts[3])?,
        total_volume: parts.get(4).and_then(|v| safe_float(v)),
        pollutant_loads: parts
            .get(5..)
            .unwrap_or_default()
            .iter()
            .filter_map(|v| safe_float(v))
            .collect(),
    })
}

pub(super) fn parse_link_flow(content: &str) -> Vec<LinkFlow> {
    let Some(section) = table_section(content, "Link Flow Summary") else {
        return Vec::new();
    };

    let mut rows = Vec::new();
    let mut data_started = false;
    for line in section.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('-') {
            continue;
        }
        if line.contains("Link") && line.contains("Type") {
            data_started = true;
            continue;
        }
        if !data_started {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() >= 8 {
            if let Some(row) = link_flow_row(&parts) {
                rows.push(row);
            }
        }
    }
    rows
}

fn link_flow_row(parts: &[&str]) -> Option<LinkFlow> {
    Some(LinkFlow {
        name: parts[0].to_string(),
        link_type: parts[1].to_string(),
        maximum_flow: safe_float(parts[2])?,
        time_of_max_days: safe_int(parts[3])?,
        time_of_max: parts[4].to_string(),
        maximum_velocity: safe_float(parts[5])?,
        max_over_full_flow: parts.get(6).and_then(|v| safe_float(v)),
        max_over_full_depth: parts.get(7).and_then(|v| safe_float(v)),
    })
}

pub(super) fn parse_conduit_surcharge(content: &str) -> Option<String> {
    let section = table_section(content, "Conduit Surcharge Summary")?;
    if section.contains("No conduits were surcharged") {
        return Some("No conduits were surcharged".to_string());
    }
    None
}

const PUMPING_HEADER_WORDS: [&str; 13] = [
    "Pump", "Percent", "Number", "Flow", "Utilized", "Min", "Avg", "Max", "Total", "Power",
    "Time", "Curve", "Start-Ups",
];

pub(super) fn parse_pumping_summary(content: &str) -> Vec<PumpingSummary> {
    let Some(section) = section_body(
        content,
        r"(?s)Pumping Summary\s*\*+.+?-+\s*(.+?)(?:\n\s*\n|\z)",
    ) else {
        return Vec::new();
    };

    let mut rows = Vec::new();
    for line in section.lines() {
        let line = line.trim();
        if line.is_empty()
            || line.starts_with('-')
            || PUMPING_HEADER_WORDS.iter().any(|w| line.contains(w))
        {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() >= 10 {
            if let Some(row) = pumping_row(&parts) {
                rows.push(row);
            }
        }
    }
    rows
}

fn pumping_row(parts: &[&str]) -> Option<PumpingSummary> {
    Some(PumpingSummary {
        pump_name: parts[0].to_string(),
        percent_utilized: safe_float(parts[1])?,
        num_startups: safe_int(parts[2])?,
        min_flow: safe_float(parts[3])?,
        avg_flow: safe_float(parts[4])?,
        max_flow: safe_float(parts[5])?,
        total_volume: safe_float(parts[6])?,
        power_usage: safe_float(parts[7])?,
        pct_time_off_curve_low: safe_float(parts[8])?,
        pct_time_off_curve_high: safe_float(parts[9])?,
    })
}

pub(super) fn parse_analysis_time(content: &str) -> AnalysisTime {
    static BEGUN_RE: OnceLock<Regex> = OnceLock::new();
    static ENDED_RE: OnceLock<Regex> = OnceLock::new();
    static ELAPSED_RE: OnceLock<Regex> = OnceLock::new();

    let capture = |re: &Regex| re.captures(content).map(|c| c[1].trim().to_string());

    AnalysisTime {
        begun: capture(BEGUN_RE.get_or_init(|| regex(r"Analysis begun on:\s*(.+)"))),
        ended: capture(ENDED_RE.get_or_init(|| regex(r"Analysis ended on:\s*(.+)"))),
        elapsed: capture(ELAPSED_RE.get_or_init(|| regex(r"Total elapsed time:\s*(.+)"))),
    }
}

pub(super) fn parse_errors(content: &str) -> Vec<String> {
    static ERROR_RE: OnceLock<Regex> = OnceLock::new();
    let re = ERROR_RE.get_or_init(|| regex(r"(?i)^ERROR\s+\d+"));
    collect_tagged_lines(content, re)
}

pub(super) fn parse_warnings(content: &str) -> Vec<String> {
    static WARNING_RE: OnceLock<Regex> = OnceLock::new();
    let re = WARNING_RE.get_or_init(|| regex(r"(?i)^WARNING\s+\d+"));
    collect_tagged_lines(content, re)
}

fn collect_tagged_lines(content: &str, re: &Regex) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| re.is_match(line))
        .map(str::to_string)
        .collect()
}
