//! Two-operand sum with forgiving input.

const DECIMALS: usize = 6;

/// Parse an operand from its leading numeric prefix.
///
/// Leading whitespace is skipped and anything after the number is ignored,
/// so `"12abc"` reads as 12. Text with no numeric prefix counts as zero.
pub fn operand(text: &str) -> f64 {
    let text = text.trim_start();
    text[..numeric_prefix_len(text)]
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// Sum two free-form operands. Never fails: bad operands count as zero.
pub fn sum(a: &str, b: &str) -> f64 {
    operand(a) + operand(b)
}

/// Format a sum for display.
///
/// Whole numbers print as-is (`1000001`). Anything else is rounded to six
/// decimals with trailing zeros removed, so `0.0000001` prints as `0`.
/// Scientific notation is never used.
pub fn format_sum(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    if value.fract() == 0.0 {
        return format!("{}", value + 0.0);
    }

    let fixed = format!("{:.*}", DECIMALS, value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Length of the longest prefix of `text` that reads as a decimal number:
/// optional sign, digits with an optional fraction, optional exponent.
fn numeric_prefix_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = count_digits(&bytes[exp..]);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }
    end
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
