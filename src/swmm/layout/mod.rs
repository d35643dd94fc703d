//! Low-level byte reading over a .out stream.
//!
//! All multi-byte fields in the container are little-endian. Reads advance a
//! forward cursor; the footer is the single place the decoder seeks
//! backwards, via [`SectionReader::seek`].
//!
//! Short reads follow the format's tolerant contract: a primitive read that
//! runs past end-of-file yields a zero value and bumps a diagnostics counter
//! instead of failing. Strict mode upgrades those short reads to
//! [`SwmmError::Truncated`] for callers that want hard validation.

use std::io::{self, Read, Seek, SeekFrom};

use byteorder::{ByteOrder, LittleEndian};
use chrono::{NaiveDate, NaiveDateTime};
use log::warn;

use super::types::error::{Result, SwmmError};
use super::types::models::DecodeDiagnostics;

/// Timestamp substituted for start dates with out-of-range calendar fields.
pub fn fallback_timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2000, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("fixed fallback timestamp")
}

/// Typed primitive reads advancing a cursor over a byte source.
pub struct SectionReader<R> {
    inner: R,
    strict: bool,
    diagnostics: DecodeDiagnostics,
}

impl<R> SectionReader<R> {
    pub fn new(inner: R, strict: bool) -> Self {
        Self {
            inner,
            strict,
            diagnostics: DecodeDiagnostics::default(),
        }
    }

    pub fn diagnostics(&self) -> DecodeDiagnostics {
        self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut DecodeDiagnostics {
        &mut self.diagnostics
    }

    pub fn strict(&self) -> bool {
        self.strict
    }
}

impl<R: Read> SectionReader<R> {
    /// Read a 4-byte little-endian signed integer.
    ///
    /// Fewer than 4 bytes remaining yields 0 in tolerant mode; callers at
    /// structural boundaries (the footer) validate length separately.
    pub fn read_i32(&mut self) -> Result<i32> {
        let mut buf = [0u8; 4];
        let got = self.fill(&mut buf)?;
        if got < buf.len() {
            self.short_read("int32", buf.len(), got)?;
            return Ok(0);
        }
        Ok(LittleEndian::read_i32(&buf))
    }

    /// Read a 4-byte little-endian IEEE float; 0.0 on short read.
    pub fn read_f32(&mut self) -> Result<f32> {
        let mut buf = [0u8; 4];
        let got = self.fill(&mut buf)?;
        if got < buf.len() {
            self.short_read("float32", buf.len(), got)?;
            return Ok(0.0);
        }
        Ok(LittleEndian::read_f32(&buf))
    }

    /// Read an 8-byte little-endian IEEE double; 0.0 on short read.
    pub fn read_f64(&mut self) -> Result<f64> {
        let mut buf = [0u8; 8];
        let got = self.fill(&mut buf)?;
        if got < buf.len() {
            self.short_read("float64", buf.len(), got)?;
            return Ok(0.0);
        }
        Ok(LittleEndian::read_f64(&buf))
    }

    /// Read a length-prefixed string: one int32 length N, then N bytes of
    /// UTF-8 (lossy-decoded, trailing NUL padding stripped).
    ///
    /// A non-positive length yields `""` and consumes only the 4-byte prefix.
    pub fn read_prefixed_string(&mut self) -> Result<String> {
        let len = self.read_i32()?;
        if len <= 0 {
            return Ok(String::new());
        }

        // The length field is untrusted; take() bounds the allocation to
        // what the stream actually holds.
        let mut buf = Vec::new();
        let got = (&mut self.inner).take(len as u64).read_to_end(&mut buf)?;
        if (got as u64) < len as u64 {
            self.short_read("string payload", len as usize, got)?;
        }

        let text = String::from_utf8_lossy(&buf);
        Ok(text.trim_end_matches('\0').to_string())
    }

    /// Read a packed date/time: 5 int32 fields (year, month, day, hour,
    /// minute). Out-of-range combinations substitute the fixed fallback
    /// timestamp rather than failing, even in strict mode; a bad start date
    /// must not abort an otherwise useful decode.
    pub fn read_datetime5(&mut self) -> Result<NaiveDateTime> {
        let year = self.read_i32()?;
        let month = self.read_i32()?;
        let day = self.read_i32()?;
        let hour = self.read_i32()?;
        let minute = self.read_i32()?;

        match compose_timestamp(year, month, day, hour, minute) {
            Some(ts) => Ok(ts),
            None => {
                warn!(
                    "Invalid start date/time fields ({}-{}-{} {}:{}); substituting fallback",
                    year, month, day, hour, minute
                );
                self.diagnostics.invalid_dates += 1;
                Ok(fallback_timestamp())
            }
        }
    }

    /// Read `buf.len()` bytes, or as many as remain before end-of-file.
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(filled)
    }

    fn short_read(&mut self, context: &'static str, needed: usize, available: usize) -> Result<()> {
        if self.strict {
            return Err(SwmmError::Truncated {
                context,
                needed: needed as u64,
                available: available as u64,
            });
        }
        warn!(
            "Short read while decoding {} ({} of {} bytes); substituting zero",
            context, available, needed
        );
        self.diagnostics.short_reads += 1;
        Ok(())
    }
}

impl<R: Seek> SectionReader<R> {
    pub fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        Ok(self.inner.seek(pos)?)
    }

    /// Total stream length; restores the cursor afterwards.
    pub fn stream_len(&mut self) -> Result<u64> {
        let pos = self.inner.stream_position()?;
        let len = self.inner.seek(SeekFrom::End(0))?;
        self.inner.seek(SeekFrom::Start(pos))?;
        Ok(len)
    }
}

fn compose_timestamp(year: i32, month: i32, day: i32, hour: i32, minute: i32) -> Option<NaiveDateTime> {
    let date = NaiveDate::from_ymd_opt(
        year,
        u32::try_from(month).ok()?,
        u32::try_from(day).ok()?,
    )?;
    date.and_hms_opt(u32::try_from(hour).ok()?, u32::try_from(minute).ok()?, 0)
}
