//! Numeral parsing and default numeric formatting.
//!
//! Strings coerce to numbers only when the whole string (ignoring
//! surrounding whitespace) is a numeral. `inf`, `nan` and friends are
//! spellings Rust's float parser accepts but that are not numerals here.

/// Parse a string as a numeral, returning `None` when it is not one.
pub(crate) fn parse(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let (negative, body) = match trimmed.as_bytes().first()? {
        b'-' => (true, &trimmed[1..]),
        b'+' => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let magnitude = match body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        Some(digits) => parse_hex(digits)?,
        None => parse_decimal(body)?,
    };
    Some(if negative { -magnitude } else { magnitude })
}

fn parse_hex(digits: &str) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(16).map(|d| acc.mul_add(16.0, f64::from(d)))
    })
}

fn parse_decimal(body: &str) -> Option<f64> {
    let well_formed = body
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    let starts_with_mantissa = body
        .bytes()
        .next()
        .is_some_and(|b| b.is_ascii_digit() || b == b'.');
    if !well_formed || !starts_with_mantissa {
        return None;
    }
    body.parse::<f64>().ok()
}

/// Render a number in the default numeric format.
///
/// Integral values print without a fractional part; very large and very
/// small magnitudes switch to exponent notation.
pub(crate) fn format(n: f64) -> String {
    if n.is_nan() {
        return "nan".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let magnitude = n.abs();
    if magnitude != 0.0 && !(1e-4..1e15).contains(&magnitude) {
        format!("{n:e}")
    } else {
        format!("{n}")
    }
}
