//! Lenient numeric parsing for report table cells.
//!
//! The engine caps displayed values (`>50.00`, `<0.01`) and prints asterisk
//! markers (`***`, `****.*`) when a result overflows its column width, so
//! cells cannot be fed straight into `str::parse`.

/// Parse a float cell.
///
/// `>N`/`<N` drop the comparator; asterisk overflow markers become
/// infinity; `NaN`, `N/A`, `-` and empty cells become 0. Returns `None`
/// only for cells that are not numeric at all (callers skip the row).
pub fn safe_float(value: &str) -> Option<f64> {
    let s = value.trim();

    if let Some(rest) = s.strip_prefix('>').or_else(|| s.strip_prefix('<')) {
        return rest.parse().ok();
    }

    if s.contains('*') {
        return Some(f64::INFINITY);
    }

    if matches!(s.to_ascii_lowercase().as_str(), "nan" | "n/a" | "-" | "") {
        return Some(0.0);
    }

    s.parse().ok()
}

/// Parse an integer cell with the same special-value handling; overflow
/// markers and placeholders become 0.
pub fn safe_int(value: &str) -> Option<i64> {
    let s = value.trim();

    if let Some(rest) = s.strip_prefix('>').or_else(|| s.strip_prefix('<')) {
        return rest.parse::<f64>().ok().map(|v| v as i64);
    }

    if s.contains('*') {
        return Some(0);
    }

    if matches!(s.to_ascii_lowercase().as_str(), "nan" | "n/a" | "-" | "") {
        return Some(0);
    }

    s.parse().ok()
}
