//! Footer parsing.
//!
//! The footer is a fixed-size trailer of six int32 records at EOF − 24
//! bytes. It is the format's authoritative index: the per-step result
//! blocks before it have no predictable total size, so the period count
//! (record index 3) can only be found by seeking from the end.

use std::io::{Read, Seek, SeekFrom};

use log::{debug, warn};

use crate::swmm::layout::SectionReader;
use crate::swmm::types::error::{Result, SwmmError};

/// Size of the footer in bytes: 6 int32 records.
pub const FOOTER_LEN: u64 = 24;

/// Index of the period count within the footer records.
const PERIOD_COUNT_INDEX: usize = 3;

/// The raw footer records.
#[derive(Debug, Clone, Copy)]
pub struct Footer {
    pub records: [i32; 6],
}

impl Footer {
    /// Number of reporting periods; negatives clamp to zero.
    pub fn n_periods(&self) -> usize {
        self.records[PERIOD_COUNT_INDEX].max(0) as usize
    }
}

/// Seek to EOF − 24 and read the six footer records.
///
/// The primitive reads would silently yield zeros near end-of-file, so this
/// structural boundary validates the stream length itself: a stream shorter
/// than the footer degrades to an all-zero footer in tolerant mode and
/// errors in strict mode.
pub fn parse<R: Read + Seek>(reader: &mut SectionReader<R>) -> Result<Footer> {
    let len = reader.stream_len()?;
    if len < FOOTER_LEN {
        if reader.strict() {
            return Err(SwmmError::Truncated {
                context: "footer",
                needed: FOOTER_LEN,
                available: len,
            });
        }
        warn!(
            "Stream too short for footer ({} of {} bytes); period count degrades to 0",
            len, FOOTER_LEN
        );
        reader.diagnostics_mut().missing_footer = true;
        return Ok(Footer { records: [0; 6] });
    }

    reader.seek(SeekFrom::End(-(FOOTER_LEN as i64)))?;
    let mut records = [0i32; 6];
    for record in &mut records {
        *record = reader.read_i32()?;
    }

    debug!("Footer records: {:?}", records);
    Ok(Footer { records })
}
