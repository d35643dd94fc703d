//! Core SWMM results reading module

pub mod decoder;
pub mod export;
pub mod format;
pub mod layout;
pub mod reader;
pub mod report;
pub mod types;

pub use decoder::{decode_file, decode_stream, DecodeOptions};
pub use reader::SwmmOutput;
pub use types::error::{Result, SwmmError};
