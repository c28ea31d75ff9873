//! Lenient numeric fields
//!
//! Billing forms post whatever the input box holds: JSON numbers, numeric
//! strings (`"12.50"`), empty strings or `null`. Fields tagged with
//! [`lenient_f64`] accept all of these. Strings are read with `parseFloat`
//! rules (longest numeric prefix wins), and anything that has no numeric
//! reading becomes `NaN` so the validation layer can decide whether to
//! reject it or zero it.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

/// Deserialize a number, numeric string or `null` into `f64`.
///
/// Unreadable values map to `f64::NAN`. Combine with `#[serde(default)]`
/// so that a missing field reads as `0.0`.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<NumberOrText>::deserialize(deserializer)? {
        Some(NumberOrText::Number(n)) => n,
        Some(NumberOrText::Text(s)) => parse_float(&s).unwrap_or(f64::NAN),
        None => f64::NAN,
    })
}

/// Parse the longest numeric prefix of `raw`, like JavaScript's `parseFloat`.
///
/// Leading whitespace is skipped. Returns `None` when no digits are found.
///
/// ```
/// use shared::billing::parse_float;
///
/// assert_eq!(parse_float(" 12.5kg"), Some(12.5));
/// assert_eq!(parse_float("-.5"), Some(-0.5));
/// assert_eq!(parse_float("1e3x"), Some(1000.0));
/// assert_eq!(parse_float("abc"), None);
/// ```
pub fn parse_float(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let rest = &s[end..];
    if rest.starts_with("Infinity") {
        return Some(if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
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
        return None;
    }

    // Exponent only counts when at least one digit follows it
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
