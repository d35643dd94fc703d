//! Fixed code tables for the .out container.
//!
//! The binary format identifies units, object kinds and static properties by
//! small integer codes. The tables here are hand-authored, matching the
//! engine's enumerations. Out-of-range codes never abort a decode: the unit
//! enums carry an `Unknown` variant, and the string tables return `None` so
//! the decoder can substitute a tagged placeholder.

use std::fmt;

use serde::{Serialize, Serializer};

/// Flow units declared in the file header (codes 0-5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowUnit {
    Cfs,
    Gpm,
    Mgd,
    Cms,
    Lps,
    Mld,
    Unknown(i32),
}

impl FlowUnit {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Cfs,
            1 => Self::Gpm,
            2 => Self::Mgd,
            3 => Self::Cms,
            4 => Self::Lps,
            5 => Self::Mld,
            other => Self::Unknown(other),
        }
    }

    /// The unit name as the engine prints it in reports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cfs => "CFS",
            Self::Gpm => "GPM",
            Self::Mgd => "MGD",
            Self::Cms => "CMS",
            Self::Lps => "LPS",
            Self::Mld => "MLD",
            Self::Unknown(_) => "UNKNOWN",
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::Cfs => 0,
            Self::Gpm => 1,
            Self::Mgd => 2,
            Self::Cms => 3,
            Self::Lps => 4,
            Self::Mld => 5,
            Self::Unknown(code) => *code,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl fmt::Display for FlowUnit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for FlowUnit {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Pollutant concentration units (codes 0-2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConcentrationUnit {
    Mg,
    Ug,
    Counts,
    Unknown(i32),
}

impl ConcentrationUnit {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Mg,
            1 => Self::Ug,
            2 => Self::Counts,
            other => Self::Unknown(other),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Mg => "MG",
            Self::Ug => "UG",
            Self::Counts => "COUNTS",
            Self::Unknown(_) => "UNKNOWN",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl fmt::Display for ConcentrationUnit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for ConcentrationUnit {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

const NODE_KINDS: [&str; 4] = ["JUNCTION", "OUTFALL", "STORAGE", "DIVIDER"];
const LINK_KINDS: [&str; 5] = ["CONDUIT", "PUMP", "ORIFICE", "WEIR", "OUTLET"];
const PROPERTY_NAMES: [&str; 6] = ["type", "area", "invert", "max_depth", "offset", "length"];

/// Node-kind code table (JUNCTION/OUTFALL/STORAGE/DIVIDER).
/// `None` for out-of-range codes; the decoder tags those `UNKNOWN_<code>`.
pub fn node_kind(code: i32) -> Option<&'static str> {
    lookup(&NODE_KINDS, code)
}

/// Link-kind code table (CONDUIT/PUMP/ORIFICE/WEIR/OUTLET).
pub fn link_kind(code: i32) -> Option<&'static str> {
    lookup(&LINK_KINDS, code)
}

/// Property code table; `None` codes decode as `property_<code>`.
pub fn property_name(code: i32) -> Option<&'static str> {
    lookup(&PROPERTY_NAMES, code)
}

fn lookup(table: &'static [&'static str], code: i32) -> Option<&'static str> {
    usize::try_from(code).ok().and_then(|i| table.get(i)).copied()
}

/// The one property whose value is a categorical kind code rather than a float.
pub const TYPE_PROPERTY: &str = "type";
