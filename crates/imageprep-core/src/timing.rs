//! Exact frame timing for animated sequences.
//!
//! Durations are rational seconds to avoid floating-point accumulation
//! errors across long frame lists. Zero means "unspecified".

use num_rational::Rational64;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Div, Mul};

/// Fallback per-frame duration when a sequence carries no timing: 100 ms,
/// the universal unclamped-delay floor across animated-image formats.
pub const UNSPECIFIED_FRAME_DURATION: FrameDuration = FrameDuration {
    value: Rational64::new_raw(1, 10),
};

/// A frame display duration in rational seconds. Non-negative by caller
/// contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FrameDuration {
    value: Rational64,
}

impl FrameDuration {
    /// Zero duration ("unspecified").
    pub const ZERO: Self = Self {
        value: Rational64::new_raw(0, 1),
    };

    /// Duration from whole milliseconds.
    #[inline]
    pub fn from_millis(ms: i64) -> Self {
        Self {
            value: Rational64::new(ms, 1000),
        }
    }

    /// Duration from seconds as a float.
    ///
    /// Rounded to microsecond precision; finer input cannot round-trip.
    pub fn from_seconds_f64(seconds: f64) -> Self {
        const PRECISION: i64 = 1_000_000;
        Self {
            value: Rational64::new((seconds * PRECISION as f64).round() as i64, PRECISION),
        }
    }

    /// Whole milliseconds, rounded to nearest.
    #[inline]
    pub fn to_millis(self) -> i64 {
        (self.value * 1000).round().to_integer()
    }

    /// Convert to seconds as f64.
    #[inline]
    pub fn to_seconds_f64(self) -> f64 {
        *self.value.numer() as f64 / *self.value.denom() as f64
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        *self.value.numer() == 0
    }
}

impl Default for FrameDuration {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Add for FrameDuration {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            value: self.value + rhs.value,
        }
    }
}

impl Mul<i64> for FrameDuration {
    type Output = Self;
    fn mul(self, rhs: i64) -> Self {
        Self {
            value: self.value * rhs,
        }
    }
}

impl Div<i64> for FrameDuration {
    type Output = Self;
    fn div(self, rhs: i64) -> Self {
        Self {
            value: self.value / rhs,
        }
    }
}

impl Sum for FrameDuration {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for FrameDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.to_seconds_f64())
    }
}
