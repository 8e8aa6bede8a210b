//! # Format Module
//!
//! Turns raw `f64` amounts into the strings shown next to the swap inputs.
//!
//! ## Tiers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  format_large_number                                                    │
//! │                                                                         │
//! │  value ≥ 1e12  ──►  "1.23T"                                            │
//! │  value ≥ 1e9   ──►  "2.00B"                                            │
//! │  value ≥ 1e6   ──►  "1.50M"                                            │
//! │  value ≥ 1e3   ──►  "1,234.50"   (comma-grouped)                       │
//! │  otherwise     ──►  "999.00"     (negatives land here too)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding
//! Rounding works on the exact decimal expansion of the `f64`, so an amount
//! that sits exactly halfway (e.g. `0.125` to two places) rounds away from
//! zero: `0.13`, `-0.13`. Magnitudes of `1e21` and above render in exponent
//! form (`1.5e+21`) instead of as digits.

// =============================================================================
// Primitives
// =============================================================================

/// Decimals needed to print any finite `f64` without loss (subnormals
/// reach 1074).
const EXACT_DIGITS: usize = 1100;

/// Exact decimal digits of `|value|`, plus how many of them sit left of the
/// decimal point.
fn exact_decimal(value: f64) -> (Vec<u8>, usize) {
    let text = format!("{:.*}", EXACT_DIGITS, value.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let digits = int_part
        .bytes()
        .chain(frac_part.bytes())
        .map(|b| b - b'0')
        .collect();
    (digits, int_part.len())
}

/// Keeps the first `keep` digits, rounding half away from zero.
///
/// Returns `true` when the carry ran off the front and added a new leading
/// digit.
fn round_digits(digits: &mut Vec<u8>, keep: usize) -> bool {
    let round_up = digits.get(keep).is_some_and(|&d| d >= 5);
    digits.truncate(keep);
    if !round_up {
        return false;
    }

    for d in digits.iter_mut().rev() {
        if *d == 9 {
            *d = 0;
        } else {
            *d += 1;
            return false;
        }
    }
    digits.insert(0, 1);
    true
}

fn digits_to_str(digits: &[u8]) -> String {
    digits.iter().map(|&d| char::from(b'0' + d)).collect()
}

/// Renders `value` with exactly `digits` decimals.
///
/// Non-finite values render as `NaN`, `Infinity` and `-Infinity`.
///
/// ## Example
/// ```rust
/// use swapdesk_core::format::to_fixed;
///
/// assert_eq!(to_fixed(20000.0, 3), "20000.000");
/// assert_eq!(to_fixed(0.125, 2), "0.13");
/// assert_eq!(to_fixed(-0.0, 2), "0.00");
/// assert_eq!(to_fixed(f64::NAN, 2), "NaN");
/// ```
pub fn to_fixed(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value.abs() >= 1e21 {
        return format!("{:e}", value).replacen('e', "e+", 1);
    }

    // Negative zero prints without a sign
    let sign = if value < 0.0 { "-" } else { "" };
    let (mut all, mut int_len) = exact_decimal(value);
    if round_digits(&mut all, int_len + digits) {
        int_len += 1;
    }

    let int_part = digits_to_str(&all[..int_len]);
    if digits == 0 {
        format!("{}{}", sign, int_part)
    } else {
        format!("{}{}.{}", sign, int_part, digits_to_str(&all[int_len..]))
    }
}

/// Renders `value` with `precision` significant digits, switching to
/// exponent notation (`1.5e+21`) for very large or very small magnitudes.
fn to_precision(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return to_fixed(value, 0);
    }

    let precision = precision.max(1);
    if value == 0.0 {
        return to_fixed(0.0, precision - 1);
    }

    let (mut all, mut int_len) = exact_decimal(value);
    let lead = all.iter().position(|&d| d != 0).unwrap_or(0);
    if round_digits(&mut all, lead + precision) {
        int_len += 1;
    }

    // Rounding can carry into the zero before the old leading digit
    let lead = all.iter().position(|&d| d != 0).unwrap_or(0);
    let exponent = int_len as i32 - 1 - lead as i32;

    if exponent < -6 || exponent >= precision as i32 {
        let significant: Vec<u8> = all[lead..].iter().copied().take(precision).collect();
        let mantissa = match significant.split_first() {
            Some((first, rest)) if !rest.is_empty() => {
                format!("{}.{}", first, digits_to_str(rest))
            }
            _ => digits_to_str(&significant),
        };
        let sign = if value < 0.0 { "-" } else { "" };
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        return format!("{}{}e{}{}", sign, mantissa, exp_sign, exponent.abs());
    }

    let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
    to_fixed(value, decimals)
}

/// Parses the longest numeric prefix of `text`, ignoring any trailing junk.
///
/// Returns NaN when no digits lead the text.
fn parse_float_prefix(text: &str) -> f64 {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    if text[end..].starts_with("Infinity") {
        return text[..end + "Infinity".len()].parse::<f64>().unwrap_or(f64::NAN);
    }

    let mut digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            digits += 1;
        }
    }
    if digits == 0 {
        return f64::NAN;
    }

    // Exponent only counts when at least one digit follows it
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    text[..end].parse::<f64>().unwrap_or(f64::NAN)
}

/// Inserts thousands separators into the integer part of a fixed string.
fn group_thousands(fixed: &str) -> String {
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

// =============================================================================
// Public Formatters
// =============================================================================

/// Abbreviates a magnitude into a suffix tier, always with two decimals.
///
/// ## Example
/// ```rust
/// use swapdesk_core::format::format_large_number;
///
/// assert_eq!(format_large_number(1_500_000.0), "1.50M");
/// assert_eq!(format_large_number(999.0), "999.00");
/// assert_eq!(format_large_number(2_000_000_000.0), "2.00B");
/// assert_eq!(format_large_number(1234.5), "1,234.50");
/// ```
pub fn format_large_number(num: f64) -> String {
    if num >= 1e12 {
        format!("{}T", to_fixed(num / 1e12, 2))
    } else if num >= 1e9 {
        format!("{}B", to_fixed(num / 1e9, 2))
    } else if num >= 1e6 {
        format!("{}M", to_fixed(num / 1e6, 2))
    } else if num >= 1e3 {
        group_thousands(&to_fixed(num, 2))
    } else {
        to_fixed(num, 2)
    }
}

/// Bounds a recalculated amount to 15 significant digits (and 15 characters)
/// while rendering three decimal places.
///
/// The integer part is never truncated: a 15-digit integer keeps all 15
/// digits and loses its fraction instead.
///
/// ## Example
/// ```rust
/// use swapdesk_core::format::format_recalculated_amount;
///
/// assert_eq!(format_recalculated_amount(1234.5678), "1234.568");
/// assert_eq!(format_recalculated_amount(0.1 + 0.2), "0.300");
/// ```
pub fn format_recalculated_amount(amount: f64) -> String {
    let fixed = to_fixed(amount, 3);
    let int_len = fixed.split('.').next().map(str::len).unwrap_or(0);
    let precision = 15usize.min(15 - 3 + int_len);

    let bounded: String = to_precision(amount, precision).chars().take(15).collect();
    to_fixed(parse_float_prefix(&bounded), 3)
}

// =============================================================================
// Unit Tests
// =============================================================================
