//! src/format.rs
//!
//! Pure number rendering used by the reducers. Nothing here keeps state
//! between calls.

const GUARD_DIGITS: usize = 12;

/// Rounds half-up at `places` decimals and drops trailing zeros, so
/// `50.0` renders as `50` and `4.125` as `4.13` at two places.
pub fn round_half_up(value: f64, places: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let expanded = format!("{:.*}", places + GUARD_DIGITS, value.abs());
    let (int_part, frac_part) = expanded.split_once('.').unwrap_or((&expanded, ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(places))
        .map(|b| b - b'0')
        .collect();
    let round_up = frac_part
        .as_bytes()
        .get(places)
        .is_some_and(|next| *next >= b'5');

    if round_up {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, 1);
        }
    }

    let split = digits.len() - places;
    let render = |ds: &[u8]| ds.iter().map(|d| char::from(b'0' + d)).collect::<String>();
    let whole = render(&digits[..split]);
    let fraction = render(&digits[split..]);
    let fraction = fraction.trim_end_matches('0');

    let mut out = String::new();
    let is_zero = digits.iter().all(|d| *d == 0);
    if value.is_sign_negative() && !is_zero {
        out.push('-');
    }
    out.push_str(&whole);
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Shortest round-trip rendering of a double. Plain decimal with at least one
/// fractional digit inside `[1e-3, 1e7)`, otherwise scientific notation with
/// an upper-case exponent marker such as `1.2345E7`.
pub fn render_double(value: f64) -> String {
    if !value.is_finite() {
        return if value.is_nan() {
            "NaN".to_string()
        } else if value.is_sign_negative() {
            "-Infinity".to_string()
        } else {
            "Infinity".to_string()
        };
    }
    let magnitude = value.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        return format!("{value:?}");
    }
    let scientific = format!("{value:e}");
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    if mantissa.contains('.') {
        format!("{mantissa}E{exponent}")
    } else {
        format!("{mantissa}.0E{exponent}")
    }
}
