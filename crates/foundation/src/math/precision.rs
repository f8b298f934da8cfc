//! Precision policies.
//!
//! Coordinates are kept as full `f64` internally. Anything written to the
//! application store is rendered as a fixed-point decimal string.

/// Fractional digits used for coordinates persisted to the store.
pub const STORE_DECIMALS: usize = 6;

/// Canonicalize a floating-point value.
///
/// Rules:
/// - `-0.0` becomes `0.0`
/// - all NaNs become a single canonical NaN
pub fn canonical_f64(v: f64) -> f64 {
    if v == 0.0 {
        // Handles +0.0 and -0.0.
        0.0
    } else if v.is_nan() {
        f64::NAN
    } else {
        v
    }
}

/// Formats `v` with exactly `decimals` fractional digits, rounding to nearest.
///
/// Exact ties round away from zero (`0.0078125` -> `"0.007813"`). Values that
/// round to zero are written without a sign.
pub fn format_fixed(v: f64, decimals: usize) -> String {
    let v = canonical_f64(v);
    let s = if is_tie(v, decimals) {
        // The expansion one digit further is exact and ends in `5`.
        let wide = format!("{:.*}", decimals + 1, v);
        round_up_last_digit(&wide[..wide.len() - 1])
    } else {
        format!("{:.*}", decimals, v)
    };
    match s.strip_prefix('-') {
        Some(rest) if rest.bytes().all(|b| b == b'0' || b == b'.') => rest.to_string(),
        _ => s,
    }
}

/// `v` lies exactly halfway between two `decimals`-digit values.
///
/// A halfway value is `k / 2^(decimals + 1)` with odd `k`; any other binary
/// fraction either needs more digits or lands on a representable step.
fn is_tie(v: f64, decimals: usize) -> bool {
    let Ok(exp) = i32::try_from(decimals + 1) else {
        return false;
    };
    let scaled = v.abs() * 2f64.powi(exp);
    scaled.is_finite() && scaled.fract() == 0.0 && scaled % 2.0 == 1.0
}

/// Adds one unit in the last place of a decimal string, away from zero.
/// A trailing `.` is dropped.
fn round_up_last_digit(s: &str) -> String {
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s),
    };
    let mut bytes: Vec<u8> = digits.trim_end_matches('.').bytes().collect();
    let mut carry = true;
    for b in bytes.iter_mut().rev() {
        match *b {
            b'.' => continue,
            b'9' => *b = b'0',
            _ => {
                *b += 1;
                carry = false;
                break;
            }
        }
    }
    let mut out = String::with_capacity(bytes.len() + 2);
    out.push_str(sign);
    if carry {
        out.push('1');
    }
    out.extend(bytes.iter().map(|&b| char::from(b)));
    out
}

/// `format_fixed` at the store precision.
pub fn format_coordinate(v: f64) -> String {
    format_fixed(v, STORE_DECIMALS)
}
