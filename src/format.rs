//! Human-readable magnitudes for counts and byte sizes.

/// Decimal places used when the caller has no preference.
pub const DEFAULT_PRECISION: usize = 2;

const COUNT_UNITS: [&str; 5] = ["", "K", "M", "B", "T"];
const DATA_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Divides `value` by the largest power of `base` not exceeding it and
/// appends the matching unit.
fn scale(value: i64, base: f64, units: &[&str], precision: usize) -> String {
    let mut exp = 0;
    while exp + 1 < units.len() && value as f64 >= base.powi(exp as i32 + 1) {
        exp += 1;
    }
    let size = value as f64 / base.powi(exp as i32);
    format!("{size:.precision$}{}", units[exp])
}

/// Formats a count with decimal (`K`, `M`, `B`, `T`) suffixes.
///
/// # Arguments
/// * `number` - The count to format.
/// * `precision` - Decimal places to keep.
///
/// # Returns
/// The scaled number followed by its suffix, e.g. `1.50K`.
pub fn convert_number(number: i64, precision: usize) -> String {
    scale(number, 1000.0, &COUNT_UNITS, precision)
}

/// Formats a byte size with binary (`KB`, `MB`, `GB`, `TB`) suffixes.
///
/// # Arguments
/// * `bytes` - The size to format.
/// * `precision` - Decimal places to keep.
///
/// # Returns
/// The scaled size followed by its unit, e.g. `1.50KB`.
pub fn convert_data(bytes: i64, precision: usize) -> String {
    scale(bytes, 1024.0, &DATA_UNITS, precision)
}
