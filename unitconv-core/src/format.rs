//! Display formatting for conversion results.

/// Results at or above this magnitude switch to scientific notation.
const SCIENTIFIC_UPPER: f64 = 1e6;
/// Nonzero results below this magnitude switch to scientific notation.
const SCIENTIFIC_LOWER: f64 = 1e-6;
const DECIMALS: i32 = 6;

/// Format a result the same way for every category.
///
/// Large and tiny magnitudes use normalized scientific notation with six
/// fractional digits (`1.500000e+6`). Everything else is rounded to six
/// decimals with trailing zeros removed, so `2.50` prints as `2.5` and `3.0`
/// as `3`.
pub fn format_result(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude >= SCIENTIFIC_UPPER || magnitude < SCIENTIFIC_LOWER {
        return scientific(value);
    }

    let scale = 10f64.powi(DECIMALS);
    // Halves round toward positive infinity: -0.0078125 becomes -0.007812.
    let rounded = (value * scale + 0.5).floor() / scale;
    // Display for f64 prints the shortest decimal that round-trips, which for
    // a value with at most six decimals is exactly those digits.
    rounded.to_string()
}

fn scientific(value: f64) -> String {
    let formatted = format!("{:.*e}", DECIMALS as usize, value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if exponent.starts_with('-') => {
            format!("{}e{}", mantissa, exponent)
        }
        Some((mantissa, exponent)) => format!("{}e+{}", mantissa, exponent),
        None => formatted,
    }
}
