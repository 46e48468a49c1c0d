//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

// i64::MAX is not exactly representable, so the upper clamp lands on 2^63.
fn saturate(value: f64) -> i64 {
    if value > 0.0 { i64::MAX } else { i64::MIN }
}

/// Round a f64 and clamp it to the i64 range, returning 0 for NaN values.
#[must_use]
pub fn round_f64_to_i64(value: f64) -> i64 {
    if value.is_nan() {
        return 0;
    }
    let min = cast::<i64, f64>(i64::MIN).unwrap_or(f64::MIN);
    let max = cast::<i64, f64>(i64::MAX).unwrap_or(f64::MAX);
    let clamped = value.clamp(min, max).round();
    cast::<f64, i64>(clamped).unwrap_or_else(|| saturate(clamped))
}

/// Floor a f64 and clamp it to the i64 range, returning 0 for non-finite values.
#[must_use]
pub fn floor_f64_to_i64(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    let min = cast::<i64, f64>(i64::MIN).unwrap_or(f64::MIN);
    let max = cast::<i64, f64>(i64::MAX).unwrap_or(f64::MAX);
    let clamped = value.clamp(min, max).floor();
    cast::<f64, i64>(clamped).unwrap_or_else(|| saturate(clamped))
}

/// Clamp an i64 into the u32 range.
#[must_use]
pub fn clamp_i64_to_u32(value: i64) -> u32 {
    cast::<i64, u32>(value.clamp(0, i64::from(u32::MAX))).unwrap_or(0)
}

/// Convert i64 to f64 while allowing precision loss in a single location.
#[must_use]
pub fn i64_to_f64(value: i64) -> f64 {
    cast::<i64, f64>(value).unwrap_or(0.0)
}

/// Convert a unit count to f64 for rate math.
#[must_use]
pub fn count_to_f64(value: u32) -> f64 {
    f64::from(value)
}

/// Convert a non-negative saved number (v1 counts, trust) into a u32, treating
/// fractional, negative, and non-finite input as the nearest valid count.
#[must_use]
pub fn saved_number_to_u32(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    clamp_i64_to_u32(floor_f64_to_i64(value))
}
