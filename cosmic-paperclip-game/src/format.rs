//! Human-readable rendering of quantities for display layers.
use crate::numbers::round_f64_to_i64;
use crate::quantity::Quantity;

/// Largest magnitude printed as a grouped integer.
const PLAIN_LIMIT: f64 = 1_000_000.0;
/// Magnitude at which suffixes give way to scientific notation.
const SCIENTIFIC_LIMIT: f64 = 1e15;

const SUFFIXES: [(f64, &str); 3] = [(1e12, "T"), (1e9, "B"), (1e6, "M")];

/// Render `value` for display.
///
/// Below one million the value is rounded and grouped with commas. Up to a
/// quadrillion it is scaled to an M/B/T suffix with at most two decimals.
/// Anything larger uses `m.mme+X`, and infinity renders as `∞`.
#[must_use]
pub fn format_number(value: &Quantity) -> String {
    if !value.is_finite() {
        return "∞".to_string();
    }
    let magnitude = value.abs();
    if magnitude < Quantity::from_f64(PLAIN_LIMIT) {
        return group_thousands(round_f64_to_i64(value.to_f64()));
    }
    if magnitude < Quantity::from_f64(SCIENTIFIC_LIMIT) {
        let native = value.to_f64();
        for (cutoff, suffix) in SUFFIXES {
            if native.abs() >= cutoff {
                return format!("{} {suffix}", trim_zeros(&format!("{:.2}", native / cutoff)));
            }
        }
    }
    scientific(*value)
}

/// Render a per-second rate, e.g. `"1.5 M/s"`.
#[must_use]
pub fn format_rate(per_second: &Quantity) -> String {
    format!("{}/s", format_number(per_second))
}

fn scientific(value: Quantity) -> String {
    let (mut mantissa, mut exponent) = value.to_scientific();
    mantissa = (mantissa * 100.0).round() / 100.0;
    if mantissa.abs() >= 10.0 {
        mantissa /= 10.0;
        exponent += 1;
    }
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa:.2}e{sign}{}", exponent.unsigned_abs())
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn trim_zeros(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}
