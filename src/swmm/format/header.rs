//! .out file header parsing.
//!
//! The header is the only section with a hard integrity gate: the 4-byte
//! sentinel at offset 0 must match the magic number, or the file is not a
//! results container at all and decoding aborts with no partial structure.

use std::io::{Read, Seek, SeekFrom};

use log::{debug, info, warn};

use crate::swmm::layout::SectionReader;
use crate::swmm::types::codes::FlowUnit;
use crate::swmm::types::error::{Result, SwmmError};
use crate::swmm::types::models::{OutputHeader, MAGIC_NUMBER};

/// Parses the fixed header at the start of the stream.
///
/// # Header Structure
/// ```text
/// [4 bytes] Sentinel (must equal 516114522)
/// [4 bytes] Engine version, packed decimal (50200 = 5.2.0)
/// [4 bytes] Flow unit code
/// [4 bytes] Subcatchment count
/// [4 bytes] Node count
/// [4 bytes] Link count
/// [4 bytes] Pollutant count
/// ```
pub fn parse<R: Read + Seek>(reader: &mut SectionReader<R>) -> Result<OutputHeader> {
    info!("Parsing results file header");

    reader.seek(SeekFrom::Start(0))?;
    let magic = reader.read_i32()?;
    if magic != MAGIC_NUMBER {
        return Err(SwmmError::MagicMismatch {
            expected: MAGIC_NUMBER,
            actual: magic,
        });
    }

    let version = reader.read_i32()?;
    let flow_unit_code = reader.read_i32()?;
    let flow_unit = FlowUnit::from_code(flow_unit_code);
    if !flow_unit.is_known() {
        warn!("Unknown flow unit code {}; reported as UNKNOWN", flow_unit_code);
        reader.diagnostics_mut().unknown_codes += 1;
    }

    // Negative counts cannot index anything; clamp to empty.
    let n_subcatchments = reader.read_i32()?.max(0) as usize;
    let n_nodes = reader.read_i32()?.max(0) as usize;
    let n_links = reader.read_i32()?.max(0) as usize;
    let n_pollutants = reader.read_i32()?.max(0) as usize;

    debug!(
        "Header: version={}, flow_unit={}, subcatchments={}, nodes={}, links={}, pollutants={}",
        version, flow_unit, n_subcatchments, n_nodes, n_links, n_pollutants
    );

    Ok(OutputHeader {
        version,
        flow_unit,
        n_subcatchments,
        n_nodes,
        n_links,
        n_pollutants,
    })
}
