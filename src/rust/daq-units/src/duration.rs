// Copyright 2026 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use num_traits::{AsPrimitive, Float};
use std::fmt::Result as FormatterResult;
use std::fmt::{self, Debug, Display, Formatter};
use std::ops::{Add, Div, Mul, Sub};

/// A unit of time, expressed by how many seconds one unit spans.
pub trait TimeUnit: Copy + Default + Display {
    const SECONDS_PER_UNIT: f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Seconds;

impl TimeUnit for Seconds {
    const SECONDS_PER_UNIT: f64 = 1.0;
}

impl Display for Seconds {
    fn fmt(&self, f: &mut Formatter<'_>) -> FormatterResult {
        write!(f, "s")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Milliseconds;

impl TimeUnit for Milliseconds {
    const SECONDS_PER_UNIT: f64 = 1e-3;
}

impl Display for Milliseconds {
    fn fmt(&self, f: &mut Formatter<'_>) -> FormatterResult {
        write!(f, "ms")
    }
}

/// A duration represented with unit type.
///
/// # Type Parameter
/// - `U`: The unit of the value (a zero-sized [`TimeUnit`])
/// - `T`: The underlying value (typically a floating point number)
///
/// # Examples
/// ```rust
/// use daq_units::duration::{milliseconds, seconds};
///
/// let pulse = milliseconds(20.0);
/// assert_eq!(pulse.to_seconds(), seconds(0.02));
/// ```
#[derive(Clone, Copy)]
pub struct Duration<U, T = f64> {
    value: T,
    unit: U,
}

impl<U: Copy, T: Copy> Duration<U, T> {
    pub fn value(&self) -> T {
        self.value
    }
}

impl<U: TimeUnit> Duration<U, f64> {
    /// Converts the duration into seconds.
    pub fn to_seconds(self) -> Duration<Seconds> {
        seconds(self.value * U::SECONDS_PER_UNIT)
    }
}

impl<T: Float, U> PartialEq for Duration<U, T> {
    fn eq(&self, other: &Self) -> bool {
        let a = self.value;
        let b = other.value;
        if a.is_zero() && b.is_zero() {
            true
        } else {
            a == b
        }
    }
}

impl<T: Float, U> PartialOrd for Duration<U, T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl<T: Debug, U: Display> Debug for Duration<U, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FormatterResult {
        f.debug_struct("Duration")
            .field("value", &self.value)
            .field("unit", &self.unit.to_string())
            .finish()
    }
}

impl<U, T> Add for Duration<U, T>
where
    T: Add<Output = T> + Copy,
    U: Copy,
{
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Duration {
            value: self.value + rhs.value,
            unit: self.unit,
        }
    }
}

impl<U, T> Sub for Duration<U, T>
where
    T: Sub<Output = T> + Copy,
    U: Copy,
{
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Duration {
            value: self.value - rhs.value,
            unit: self.unit,
        }
    }
}

impl<U, T> Mul<T> for Duration<U, T>
where
    T: Mul<T, Output = T> + Copy,
    U: Copy,
{
    type Output = Self;

    fn mul(self, rhs: T) -> Self::Output {
        Duration {
            value: self.value * rhs,
            unit: self.unit,
        }
    }
}

impl<U, T> Div<T> for Duration<U, T>
where
    T: Div<T, Output = T> + Copy,
    U: Copy,
{
    type Output = Self;

    fn div(self, rhs: T) -> Self::Output {
        Duration {
            value: self.value / rhs,
            unit: self.unit,
        }
    }
}

impl<U, T> Display for Duration<U, T>
where
    T: Display + Debug + AsPrimitive<f64> + Float,
    U: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.value, f)?;
        write!(f, " ")?;
        self.unit.fmt(f)
    }
}

impl<T: Float, U: Default> From<T> for Duration<U, T> {
    fn from(value: T) -> Self {
        Duration {
            value,
            unit: U::default(),
        }
    }
}

impl<U> From<Duration<U, f64>> for f64 {
    fn from(duration: Duration<U, f64>) -> Self {
        duration.value
    }
}

pub const fn seconds<T>(value: T) -> Duration<Seconds, T> {
    Duration {
        value,
        unit: Seconds,
    }
}

pub const fn milliseconds<T>(value: T) -> Duration<Milliseconds, T> {
    Duration {
        value,
        unit: Milliseconds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creation() {
        let duration: Duration<Seconds> = 1e-3.into();
        assert_eq!(duration.value(), 1e-3);
        assert_eq!(f64::from(milliseconds(5.0)), 5.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", seconds(0.5)), "0.5 s");
        assert_eq!(format!("{}", milliseconds(20.0)), "20.0 ms");
    }

    #[test]
    fn test_unit_conversion() {
        assert_eq!(milliseconds(250.0).to_seconds(), seconds(0.25));
        assert_eq!(milliseconds(100.0).to_seconds(), seconds(0.1));
    }

    #[test]
    fn test_eq() {
        assert_eq!(seconds(0.0), seconds(-0.0));
        assert_ne!(seconds(1.0), seconds(-1.0));
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(milliseconds(10.0) + milliseconds(5.0), milliseconds(15.0));
        assert_eq!(milliseconds(10.0) - milliseconds(5.0), milliseconds(5.0));
        assert_eq!(seconds(2.0) * 3.0, seconds(6.0));
        assert_eq!(seconds(3.0) / 2.0, seconds(1.5));
        assert!(seconds(1.0) < seconds(2.0));
    }
}
