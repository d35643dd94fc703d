//! Decode orchestration for .out result containers.
//!
//! A decode is one sequential pass: header, metadata, then a single
//! end-relative seek for the footer, then time-index derivation. The only
//! hard failure is the sentinel gate in the header (plus truncation, when
//! strict mode is requested); every other anomaly degrades into the data
//! and is counted in [`DecodeDiagnostics`](crate::swmm::types::models::DecodeDiagnostics).

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use chrono::{Duration, NaiveDateTime};
use log::info;

use super::format;
use super::layout::SectionReader;
use super::types::error::Result;
use super::types::models::DecodedOutput;

/// Decode-time knobs.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeOptions {
    /// When set, short reads and a missing footer raise
    /// [`SwmmError::Truncated`](crate::SwmmError::Truncated) instead of
    /// degrading to zero values.
    pub strict: bool,
}

impl DecodeOptions {
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

/// Decode a results container from any seekable byte stream.
pub fn decode_stream<R: Read + Seek>(stream: R, options: DecodeOptions) -> Result<DecodedOutput> {
    let mut reader = SectionReader::new(stream, options.strict);

    let header = format::header::parse(&mut reader)?;
    let mut metadata = format::metadata::parse(&mut reader, &header)?;
    let footer = format::footer::parse(&mut reader)?;
    metadata.n_periods = footer.n_periods();

    let time_index = build_time_index(
        metadata.start_date,
        metadata.report_interval_seconds,
        metadata.n_periods,
    );

    let diagnostics = reader.diagnostics();
    info!(
        "Results file decoded: version {}, {} nodes, {} links, {} periods{}",
        header.version_string(),
        header.n_nodes,
        header.n_links,
        metadata.n_periods,
        if diagnostics.is_clean() { "" } else { " (with tolerated anomalies)" }
    );

    Ok(DecodedOutput {
        header,
        metadata,
        time_index,
        diagnostics,
    })
}

/// Open, decode and close a results file.
///
/// The handle is scoped to this call; it is released on every exit path,
/// including decode failures.
pub fn decode_file(path: impl AsRef<Path>, options: DecodeOptions) -> Result<DecodedOutput> {
    let path = path.as_ref();
    info!("Opening results file: {}", path.display());
    let file = File::open(path)?;
    decode_stream(BufReader::new(file), options)
}

/// Absolute timestamps for every reporting period: `start + interval * i`.
///
/// Offsets that would overflow the calendar clamp to the start date; a
/// garbage interval must not panic the decode.
fn build_time_index(
    start: NaiveDateTime,
    interval_seconds: i64,
    n_periods: usize,
) -> Vec<NaiveDateTime> {
    (0..n_periods)
        .map(|i| {
            interval_seconds
                .checked_mul(i as i64)
                .and_then(Duration::try_seconds)
                .and_then(|offset| start.checked_add_signed(offset))
                .unwrap_or(start)
        })
        .collect()
}
