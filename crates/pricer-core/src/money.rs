//! # Money Module
//!
//! Provides the `Money` type used when solved figures leave the solver.
//!
//! ## Where Rounding Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The solver works in f64: a price is the root of a linear equation     │
//! │  and is rarely a whole number of satang.                               │
//! │                                                                         │
//! │    solver ──► 180.73377913… (f64)                                       │
//! │                      │                                                  │
//! │                      ▼  Money::from_amount (half away from zero)        │
//! │               18073 satang                                              │
//! │                      │                                                  │
//! │                      ▼  Display                                         │
//! │                  "180.73"                                               │
//! │                                                                         │
//! │  Rounding happens exactly once, at the reporting boundary.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pricer_core::money::Money;
//!
//! let price = Money::from_amount(180.7337);
//! assert_eq!(price.satang(), 18073);
//! assert_eq!(price.to_string(), "180.73");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A baht amount held in satang (1/100 baht).
///
/// ## Design Decisions
/// - **i64 (signed)**: profits and fee bases can be negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from satang.
    ///
    /// ## Example
    /// ```rust
    /// use pricer_core::money::Money;
    ///
    /// let fee = Money::from_satang(31993);
    /// assert_eq!(fee.to_string(), "319.93");
    /// ```
    #[inline]
    pub const fn from_satang(satang: i64) -> Self {
        Money(satang)
    }

    /// Rounds a baht amount to the nearest satang, halves away from zero.
    ///
    /// Non-finite input becomes zero; out-of-range input saturates.
    ///
    /// ## Example
    /// ```rust
    /// use pricer_core::money::Money;
    ///
    /// assert_eq!(Money::from_amount(2.346).satang(), 235);
    /// assert_eq!(Money::from_amount(-5.5).satang(), -550);
    /// assert_eq!(Money::from_amount(f64::NAN).satang(), 0);
    /// ```
    pub fn from_amount(amount: f64) -> Self {
        if !amount.is_finite() {
            return Money::zero();
        }
        Money((amount * 100.0).round() as i64)
    }

    /// Returns the value in satang.
    #[inline]
    pub const fn satang(&self) -> i64 {
        self.0
    }

    /// Returns the whole-baht portion (truncated toward zero).
    #[inline]
    pub const fn baht(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the satang portion (always 0-99).
    #[inline]
    pub const fn satang_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain two-decimal form (`1234.56`, `-0.50`) so spreadsheets read it as a
/// number. No currency symbol, no thousands separator.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.baht().abs(), self.satang_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Saturates at the `i64` bounds, matching [`Money::from_amount`].
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_satang() {
        let money = Money::from_satang(1099);
        assert_eq!(money.satang(), 1099);
        assert_eq!(money.baht(), 10);
        assert_eq!(money.satang_part(), 99);
    }

    #[test]
    fn test_from_amount_rounding() {
        assert_eq!(Money::from_amount(180.7337).satang(), 18073);
        assert_eq!(Money::from_amount(180.7362).satang(), 18074);
        assert_eq!(Money::from_amount(0.004).satang(), 0);
        assert_eq!(Money::from_amount(-0.006).satang(), -1);
        assert_eq!(Money::from_amount(319.93).satang(), 31993);
    }

    #[test]
    fn test_from_amount_non_finite() {
        assert!(Money::from_amount(f64::NAN).is_zero());
        assert!(Money::from_amount(f64::INFINITY).is_zero());
        assert!(Money::from_amount(f64::NEG_INFINITY).is_zero());
    }

    #[test]
    fn test_addition_saturates() {
        let big = Money::from_satang(i64::MAX - 10);
        assert_eq!((big + Money::from_satang(100)).satang(), i64::MAX);

        let mut total = Money::from_satang(i64::MIN + 10);
        total += Money::from_satang(-100);
        assert_eq!(total.satang(), i64::MIN);

        assert_eq!((Money::from_satang(150) + Money::from_satang(-50)).satang(), 100);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_satang(1099).to_string(), "10.99");
        assert_eq!(Money::from_satang(500).to_string(), "5.00");
        assert_eq!(Money::from_satang(-550).to_string(), "-5.50");
        assert_eq!(Money::from_satang(-50).to_string(), "-0.50");
        assert_eq!(Money::from_satang(0).to_string(), "0.00");
        assert_eq!(Money::from_satang(123_456_789).to_string(), "1234567.89");
    }

    #[test]
    fn test_addition() {
        let mut total = Money::from_satang(1000) + Money::from_satang(-250);
        assert_eq!(total.satang(), 750);
        total += Money::from_satang(50);
        assert_eq!(total.satang(), 800);
    }

    #[test]
    fn test_sign_checks() {
        assert!(Money::zero().is_zero());
        assert!(Money::from_satang(1).is_positive());
        assert!(Money::from_satang(-1).is_negative());
        assert!(!Money::from_satang(-1).is_positive());
    }
}
