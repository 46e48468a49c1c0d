//! Extended-range quantities for matter, wire, clips, and probes.
//!
//! Values below `1e300` in magnitude are held as a plain `f64`, so everyday
//! integer arithmetic stays exact up to 2^53. Anything larger is kept as a
//! base-10 mantissa in `[1, 10)` paired with an `i64` exponent, which lets the
//! late stages (the universal budget alone is `1e53`, and probe counts grow
//! without bound) keep ordering and formatting instead of collapsing into
//! `f64::INFINITY`.
//!
//! Infinity is still representable: it is the defined result of dividing by
//! zero. NaN never escapes an operation; it is folded to zero.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;
use thiserror::Error;

use crate::numbers::{floor_f64_to_i64, i64_to_f64};

/// Magnitude at which values leave the native representation.
const NATIVE_LIMIT: f64 = 1e300;
/// Exponent gap past which the smaller addend cannot change the larger one.
const ALIGN_DIGITS: i64 = 17;
/// Decimal places kept from an aligned mantissa sum.
const SUM_DECIMALS: usize = 14;
/// Shifts past this produce infinity or zero in f64 anyway.
const SHIFT_LIMIT: i64 = 400;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuantityParseError {
    #[error("empty quantity string")]
    Empty,
    #[error("invalid quantity mantissa `{0}`")]
    Mantissa(String),
    #[error("invalid quantity exponent `{0}`")]
    Exponent(String),
}

/// Non-overflowing real number used for every resource stock.
#[derive(Debug, Clone, Copy)]
pub struct Quantity {
    /// Native value when `exponent == 0`, otherwise a mantissa in `[1, 10)`.
    mantissa: f64,
    /// Zero for native values; at least 300 for scaled values.
    exponent: i64,
}

/// Split a finite, non-zero f64 into `(mantissa, exponent)` with `1 <= |mantissa| < 10`.
///
/// Reads the digits off the shortest round-trip text, so `1e300` splits into
/// exactly `(1.0, 300)`.
fn split_native(value: f64) -> (f64, i64) {
    let text = format!("{value:e}");
    text.split_once('e')
        .and_then(|(mantissa, exponent)| {
            Some((mantissa.parse::<f64>().ok()?, exponent.parse::<i64>().ok()?))
        })
        .unwrap_or((value, 0))
}

/// `value × 10^exponent`, correctly rounded by the decimal parser.
fn scale10(value: f64, exponent: i64) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let (mantissa, shift) = split_native(value);
    let exponent = exponent
        .saturating_add(shift)
        .clamp(-SHIFT_LIMIT, SHIFT_LIMIT);
    format!("{mantissa}e{exponent}").parse().unwrap_or(value)
}

/// Round an aligned mantissa sum so cancellation leaves no binary residue.
fn snap_sum(sum: f64) -> f64 {
    format!("{sum:.prec$}", prec = SUM_DECIMALS).parse().unwrap_or(sum)
}

impl Quantity {
    pub const ZERO: Self = Self {
        mantissa: 0.0,
        exponent: 0,
    };
    pub const ONE: Self = Self {
        mantissa: 1.0,
        exponent: 0,
    };
    pub const INFINITY: Self = Self {
        mantissa: f64::INFINITY,
        exponent: 0,
    };

    /// Build a quantity from a native float. NaN becomes zero.
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() || value == 0.0 {
            return Self::ZERO;
        }
        if value.is_infinite() || value.abs() < NATIVE_LIMIT {
            return Self {
                mantissa: value,
                exponent: 0,
            };
        }
        let (mantissa, exponent) = split_native(value);
        Self { mantissa, exponent }
    }

    /// Build `mantissa × 10^exponent`, folding back to native form when it fits.
    #[must_use]
    pub fn from_parts(mantissa: f64, exponent: i64) -> Self {
        if mantissa.is_nan() || mantissa == 0.0 {
            return Self::ZERO;
        }
        if mantissa.is_infinite() {
            return Self::from_f64(mantissa);
        }
        let (mantissa, shift) = split_native(mantissa);
        let exponent = exponent.saturating_add(shift);
        if exponent < 300 {
            return Self::from_f64(scale10(mantissa, exponent));
        }
        if exponent == i64::MAX {
            return Self::from_f64(mantissa * f64::INFINITY);
        }
        Self { mantissa, exponent }
    }

    /// Scientific decomposition `(mantissa, exponent)`; zero yields `(0.0, 0)`.
    #[must_use]
    pub fn to_scientific(self) -> (f64, i64) {
        if self.exponent != 0 {
            return (self.mantissa, self.exponent);
        }
        if self.mantissa == 0.0 || !self.mantissa.is_finite() {
            return (self.mantissa, 0);
        }
        split_native(self.mantissa)
    }

    /// Best-effort native approximation; only for display.
    #[must_use]
    pub fn to_f64(self) -> f64 {
        if self.exponent == 0 {
            self.mantissa
        } else {
            scale10(self.mantissa, self.exponent)
        }
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.exponent == 0 && self.mantissa == 0.0
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.mantissa.is_finite()
    }

    #[must_use]
    pub fn is_negative(self) -> bool {
        self.mantissa < 0.0
    }

    #[must_use]
    pub fn abs(self) -> Self {
        if self.is_negative() {
            self.negated()
        } else {
            self
        }
    }

    fn signum(self) -> i8 {
        if self.mantissa > 0.0 {
            1
        } else if self.mantissa < 0.0 {
            -1
        } else {
            0
        }
    }

    fn is_native(self) -> bool {
        self.exponent == 0
    }

    #[must_use]
    pub fn plus(self, rhs: Self) -> Self {
        if self.is_native() && rhs.is_native() {
            let sum = self.mantissa + rhs.mantissa;
            if sum.is_finite() || !self.is_finite() || !rhs.is_finite() {
                return Self::from_f64(sum);
            }
        }
        if !self.is_finite() || !rhs.is_finite() {
            return Self::from_f64(self.mantissa + rhs.mantissa);
        }
        if self.is_zero() {
            return rhs;
        }
        if rhs.is_zero() {
            return self;
        }
        let (lm, le) = self.to_scientific();
        let (rm, re) = rhs.to_scientific();
        if le >= re {
            let gap = le - re;
            if gap > ALIGN_DIGITS {
                return self;
            }
            Self::from_parts(snap_sum(lm + scale10(rm, -gap)), le)
        } else {
            let gap = re - le;
            if gap > ALIGN_DIGITS {
                return rhs;
            }
            Self::from_parts(snap_sum(rm + scale10(lm, -gap)), re)
        }
    }

    #[must_use]
    pub fn minus(self, rhs: Self) -> Self {
        self.plus(rhs.negated())
    }

    /// Subtract, clamping the result at zero.
    #[must_use]
    pub fn saturating_sub(self, rhs: Self) -> Self {
        let diff = self.minus(rhs);
        if diff.is_negative() { Self::ZERO } else { diff }
    }

    #[must_use]
    pub fn negated(self) -> Self {
        if self.is_zero() {
            return self;
        }
        Self {
            mantissa: -self.mantissa,
            exponent: self.exponent,
        }
    }

    #[must_use]
    pub fn times(self, rhs: Self) -> Self {
        if self.is_native() && rhs.is_native() {
            let product = self.mantissa * rhs.mantissa;
            if product.is_finite() || !self.is_finite() || !rhs.is_finite() {
                return Self::from_f64(product);
            }
        }
        if !self.is_finite() || !rhs.is_finite() {
            return Self::from_f64(self.to_f64() * rhs.to_f64());
        }
        if self.is_zero() || rhs.is_zero() {
            return Self::ZERO;
        }
        let (lm, le) = self.to_scientific();
        let (rm, re) = rhs.to_scientific();
        Self::from_parts(lm * rm, le.saturating_add(re))
    }

    /// Divide; any zero divisor yields the infinite sentinel.
    #[must_use]
    pub fn divided_by(self, rhs: Self) -> Self {
        if rhs.is_zero() {
            return if self.is_negative() {
                Self::INFINITY.negated()
            } else {
                Self::INFINITY
            };
        }
        if self.is_native() && rhs.is_native() {
            let quotient = self.mantissa / rhs.mantissa;
            if quotient.is_finite() || !self.is_finite() || !rhs.is_finite() {
                return Self::from_f64(quotient);
            }
        }
        if !self.is_finite() {
            return Self::from_f64(self.mantissa * f64::from(rhs.signum()));
        }
        if !rhs.is_finite() || self.is_zero() {
            return Self::ZERO;
        }
        let (lm, le) = self.to_scientific();
        let (rm, re) = rhs.to_scientific();
        Self::from_parts(lm / rm, le.saturating_sub(re))
    }

    /// Raise to a real power.
    #[must_use]
    pub fn pow(self, power: f64) -> Self {
        if self.is_native() {
            let raised = self.mantissa.powf(power);
            if raised.is_finite() || !self.is_finite() {
                return Self::from_f64(raised);
            }
        }
        if self.signum() <= 0 {
            return Self::from_f64(self.to_f64().powf(power));
        }
        let (mantissa, exponent) = self.to_scientific();
        let log = power * (mantissa.log10() + i64_to_f64(exponent));
        if !log.is_finite() {
            return if log > 0.0 { Self::INFINITY } else { Self::ZERO };
        }
        let whole = log.floor();
        Self::from_parts(10f64.powf(log - whole), floor_f64_to_i64(whole))
    }

    /// Round to the nearest integer. Scaled values are already integral.
    #[must_use]
    pub fn round(self) -> Self {
        if self.is_native() {
            Self::from_f64(self.mantissa.round())
        } else {
            self
        }
    }

    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        if self.is_native() && other.is_native() {
            return self
                .mantissa
                .partial_cmp(&other.mantissa)
                .unwrap_or(Ordering::Equal);
        }
        let (ls, rs) = (self.signum(), other.signum());
        if ls != rs {
            return ls.cmp(&rs);
        }
        let magnitude = match (self.is_finite(), other.is_finite()) {
            (false, false) => Ordering::Equal,
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (true, true) => {
                let (lm, le) = self.to_scientific();
                let (rm, re) = other.to_scientific();
                le.cmp(&re).then(
                    lm.abs()
                        .partial_cmp(&rm.abs())
                        .unwrap_or(Ordering::Equal),
                )
            }
        };
        if ls < 0 {
            magnitude.reverse()
        } else {
            magnitude
        }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ZERO
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for Quantity {}

impl PartialOrd for Quantity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl Ord for Quantity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl From<f64> for Quantity {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl From<u32> for Quantity {
    fn from(value: u32) -> Self {
        Self::from_f64(f64::from(value))
    }
}

impl Add for Quantity {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        self.plus(rhs)
    }
}

impl Sub for Quantity {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self.minus(rhs)
    }
}

impl Mul for Quantity {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.times(rhs)
    }
}

impl Mul<f64> for Quantity {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        self.times(Self::from_f64(rhs))
    }
}

impl Div for Quantity {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        self.divided_by(rhs)
    }
}

impl Neg for Quantity {
    type Output = Self;
    fn neg(self) -> Self {
        self.negated()
    }
}

fn write_native(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_infinite() {
        return f.write_str(if value > 0.0 { "Infinity" } else { "-Infinity" });
    }
    let abs = value.abs();
    if abs != 0.0 && !(1e-7..1e21).contains(&abs) {
        write!(f, "{value:e}")
    } else {
        write!(f, "{value}")
    }
}

/// Canonical decimal text: shortest round-trip digits, exponential outside
/// `[1e-7, 1e21)`.
impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_native() {
            write_native(f, self.mantissa)
        } else {
            write!(f, "{}e{}", self.mantissa, self.exponent)
        }
    }
}

impl FromStr for Quantity {
    type Err = QuantityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() {
            return Err(QuantityParseError::Empty);
        }
        match text {
            "Infinity" | "inf" | "+Infinity" => return Ok(Self::INFINITY),
            "-Infinity" | "-inf" => return Ok(Self::INFINITY.negated()),
            _ => {}
        }
        let (mantissa_text, exponent_text) = match text.find(['e', 'E']) {
            Some(idx) => (&text[..idx], Some(&text[idx + 1..])),
            None => (text, None),
        };
        let mantissa: f64 = mantissa_text
            .parse()
            .map_err(|_| QuantityParseError::Mantissa(mantissa_text.to_string()))?;
        if mantissa.is_nan() {
            return Err(QuantityParseError::Mantissa(mantissa_text.to_string()));
        }
        let exponent: i64 = match exponent_text {
            Some(raw) => raw
                .parse()
                .map_err(|_| QuantityParseError::Exponent(raw.to_string()))?,
            None => 0,
        };
        if let Ok(native) = text.parse::<f64>()
            && native.is_finite()
            && native.abs() < NATIVE_LIMIT
        {
            return Ok(Self::from_f64(native));
        }
        Ok(Self::from_parts(mantissa, exponent))
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
