//! File format parsing layer for .out result containers.
//!
//! This module provides the mid-level parsing layer that bridges between
//! raw byte reads and the high-level [`SwmmOutput`](crate::swmm::reader::SwmmOutput).
//!
//! # Module Organization
//!
//! - [`header`]: Validates the sentinel and reads version, units and counts
//! - [`metadata`]: Reads labels, pollutant units, property blocks and time parameters
//! - [`footer`]: Reads the fixed trailer carrying the authoritative period count
//!
//! # Architecture
//!
//! ```text
//! File Structure:
//! ┌──────────────────────┐
//! │  Header              │ ← header::parse()
//! │  (sentinel, version, │
//! │   units, counts)     │
//! ├──────────────────────┤
//! │  Metadata            │ ← metadata::parse()
//! │  (labels, units,     │
//! │   properties, time)  │
//! ├──────────────────────┤
//! │  Per-step results    │   (not decoded; skipped via the
//! │  (variable blocks)   │    end-relative footer seek)
//! ├──────────────────────┤
//! │  Footer (EOF − 24)   │ ← footer::parse()
//! └──────────────────────┘
//! ```

pub mod footer;
pub mod header;
pub mod metadata;
