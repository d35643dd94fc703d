//! # swmm-reader
//!
//! A reader for SWMM simulation result files.
//!
//! Decodes the binary results container (`.out`) into a typed, immutable
//! structure, parses the textual summary report (`.rpt`), and re-emits
//! decoded results as JSON or CSV tables.
//!
//! **Note:** this crate never runs a simulation; it only decodes and
//! re-encodes the container formats an external engine produces.
pub mod swmm;

// Re-export the main types for convenience
pub use swmm::{
    decoder::{decode_file, decode_stream, DecodeOptions},
    export::ExportFormat,
    reader::SwmmOutput,
    report::Report,
    types::{
        error::{Result, SwmmError},
        models::{DecodedOutput, OutputHeader, OutputMetadata, PropertyValue},
    },
};
