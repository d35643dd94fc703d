//! Metadata section parsing: labels, pollutant units, property blocks,
//! variable counts and time-stepping parameters.
//!
//! The section is strictly sequential. Label sequences come first, one per
//! object kind in fixed order, with lengths taken from the header counts.
//! Property blocks are self-describing: each declares its property count and
//! codes before the per-object values.

use std::collections::BTreeMap;
use std::io::Read;

use log::{debug, info, warn};

use crate::swmm::layout::SectionReader;
use crate::swmm::types::codes::{self, ConcentrationUnit};
use crate::swmm::types::error::Result;
use crate::swmm::types::models::{
    Labels, OutputHeader, OutputMetadata, PropertyMap, PropertyTable, PropertyTables,
    PropertyValue, VariableCounts,
};

/// Object kinds that carry a static property block, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ObjectClass {
    Subcatchment,
    Node,
    Link,
}

impl ObjectClass {
    fn label(&self) -> &'static str {
        match self {
            Self::Subcatchment => "subcatchment",
            Self::Node => "node",
            Self::Link => "link",
        }
    }

    /// Resolve a categorical `type` code for this kind, if it has one.
    fn kind_name(&self, code: i32) -> Option<&'static str> {
        match self {
            Self::Subcatchment => None,
            Self::Node => codes::node_kind(code),
            Self::Link => codes::link_kind(code),
        }
    }
}

/// Parses everything between the header and the per-step result blocks.
///
/// The returned metadata has `n_periods` set to 0; the decoder fills it in
/// from the footer, which lives past the undecoded result blocks.
pub fn parse<R: Read>(
    reader: &mut SectionReader<R>,
    header: &OutputHeader,
) -> Result<OutputMetadata> {
    info!("Parsing metadata section");

    let labels = Labels {
        subcatchments: read_label_array(reader, header.n_subcatchments)?,
        nodes: read_label_array(reader, header.n_nodes)?,
        links: read_label_array(reader, header.n_links)?,
        pollutants: read_label_array(reader, header.n_pollutants)?,
    };

    let pollutant_units = read_pollutant_units(reader, &labels.pollutants)?;

    let properties = PropertyTables {
        subcatchment: read_property_block(reader, ObjectClass::Subcatchment, &labels.subcatchments)?,
        node: read_property_block(reader, ObjectClass::Node, &labels.nodes)?,
        link: read_property_block(reader, ObjectClass::Link, &labels.links)?,
    };

    let variables = VariableCounts {
        subcatchment: reader.read_i32()?,
        node: reader.read_i32()?,
        link: reader.read_i32()?,
        system: reader.read_i32()?,
    };

    let start_date = reader.read_datetime5()?;
    let report_interval_seconds = reader.read_i32()? as i64;

    debug!(
        "Metadata: start={}, interval={}s, variables=({}, {}, {}, {})",
        start_date,
        report_interval_seconds,
        variables.subcatchment,
        variables.node,
        variables.link,
        variables.system
    );

    Ok(OutputMetadata {
        labels,
        pollutant_units,
        properties,
        variables,
        start_date,
        report_interval_seconds,
        n_periods: 0,
    })
}

/// Read `count` length-prefixed labels in ordinal order.
fn read_label_array<R: Read>(reader: &mut SectionReader<R>, count: usize) -> Result<Vec<String>> {
    let mut labels = Vec::with_capacity(count);
    for _ in 0..count {
        labels.push(reader.read_prefixed_string()?);
    }
    Ok(labels)
}

/// One unit code per pollutant, paired with labels by ordinal ID.
fn read_pollutant_units<R: Read>(
    reader: &mut SectionReader<R>,
    pollutants: &[String],
) -> Result<BTreeMap<String, ConcentrationUnit>> {
    let mut units = BTreeMap::new();
    for label in pollutants {
        let code = reader.read_i32()?;
        let unit = ConcentrationUnit::from_code(code);
        if !unit.is_known() {
            warn!("Unknown concentration unit code {} for '{}'", code, label);
            reader.diagnostics_mut().unknown_codes += 1;
        }
        units.insert(label.clone(), unit);
    }
    Ok(units)
}

/// Read one self-describing property block: a property count, that many
/// property codes, then one value per (object, property) pair in label order.
fn read_property_block<R: Read>(
    reader: &mut SectionReader<R>,
    class: ObjectClass,
    labels: &[String],
) -> Result<PropertyTable> {
    let n_props = reader.read_i32()?.max(0) as usize;

    let mut prop_names = Vec::with_capacity(n_props);
    for _ in 0..n_props {
        let code = reader.read_i32()?;
        let name = match codes::property_name(code) {
            Some(name) => name.to_string(),
            None => {
                warn!("Unknown {} property code {}", class.label(), code);
                reader.diagnostics_mut().unknown_codes += 1;
                format!("property_{code}")
            }
        };
        prop_names.push(name);
    }

    debug!(
        "{} property block: {} properties ({:?}) over {} objects",
        class.label(),
        n_props,
        prop_names,
        labels.len()
    );

    let mut table = PropertyTable::new();
    for label in labels {
        let mut props = PropertyMap::new();
        for name in &prop_names {
            if name == codes::TYPE_PROPERTY {
                let code = reader.read_i32()?;
                // Subcatchments have no kind table; the code is consumed
                // but yields no property, matching the wire layout.
                let Some(kind) = resolve_kind(reader, class, code) else {
                    continue;
                };
                props.insert(name.clone(), PropertyValue::Kind(kind));
            } else {
                props.insert(name.clone(), PropertyValue::Value(reader.read_f32()?));
            }
        }
        table.insert(label.clone(), props);
    }

    Ok(table)
}

fn resolve_kind<R: Read>(
    reader: &mut SectionReader<R>,
    class: ObjectClass,
    code: i32,
) -> Option<String> {
    if class == ObjectClass::Subcatchment {
        return None;
    }
    match class.kind_name(code) {
        Some(kind) => Some(kind.to_string()),
        None => {
            warn!("Unknown {} kind code {}", class.label(), code);
            reader.diagnostics_mut().unknown_codes += 1;
            Some(format!("UNKNOWN_{code}"))
        }
    }
}
