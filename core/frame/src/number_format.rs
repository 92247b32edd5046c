//! FILENAME: core/frame/src/number_format.rs
//! PURPOSE: Number and timestamp formatting for display text.
//! CONTEXT: Fields either carry an explicit `decimals` setting or fall back
//! to the general format, which picks the shortest sensible representation.

use chrono::DateTime;

/// Upper bound on the decimals setting.
pub const MAX_DECIMALS: u32 = 20;

/// Format a number with the field's decimals setting, or in general format.
/// Decimals above `MAX_DECIMALS` are clamped.
pub fn format_number(value: f64, decimals: Option<u32>) -> String {
    if !value.is_finite() {
        return format_non_finite(value);
    }
    match decimals {
        Some(places) => format!("{:.prec$}", value, prec = places.min(MAX_DECIMALS) as usize),
        None => format_general(value),
    }
}

/// Format a number in general format (auto-detect best representation).
pub fn format_general(value: f64) -> String {
    if !value.is_finite() {
        return format_non_finite(value);
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let abs_value = value.abs();

    // Use scientific notation for very large or very small numbers
    if abs_value >= 1e15 || abs_value < 1e-6 {
        return trim_scientific(&format!("{:.5e}", value));
    }

    // For integers, don't show decimal point
    if value.fract() == 0.0 {
        return format!("{:.0}", value);
    }

    let formatted = format!("{:.10}", value);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Format a millisecond timestamp as a UTC date time.
pub fn format_time(millis: i64) -> String {
    match DateTime::from_timestamp_millis(millis) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => millis.to_string(),
    }
}

fn format_non_finite(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value > 0.0 {
        "Infinity".to_string()
    } else {
        "-Infinity".to_string()
    }
}

/// Trims trailing zeros from the mantissa of `{:e}` output ("1.50000e20" -> "1.5e20").
fn trim_scientific(s: &str) -> String {
    match s.split_once('e') {
        Some((mantissa, exponent)) => {
            let mantissa = if mantissa.contains('.') {
                mantissa.trim_end_matches('0').trim_end_matches('.')
            } else {
                mantissa
            };
            format!("{}e{}", mantissa, exponent)
        }
        None => s.to_string(),
    }
}
