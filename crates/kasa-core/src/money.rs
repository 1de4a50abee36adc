//! # Money Module
//!
//! Provides the `Money` type for payment amounts typed in by the cashier.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer grosze (1/100 of the unit)                       │
//! │    "120,50" ──► 12050                                                   │
//! │    "99.9"   ──► 9990                                                    │
//! │    "abc"    ──► AmountError::Malformed (entry is dropped)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kasa_core::money::Money;
//!
//! let cash = Money::parse_entry("120,50").unwrap();
//! let card = Money::parse_entry("79.50").unwrap();
//! assert_eq!((cash + card).minor_units(), 20000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use ts_rs::TS;

use crate::error::AmountError;

/// Longest accepted whole-unit part; keeps `i64` arithmetic far from overflow.
const MAX_WHOLE_DIGITS: usize = 12;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in minor units (grosze).
///
/// Amounts entered at the till are never negative; refunds are not a
/// concern of this engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor_units(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion.
    #[inline]
    pub const fn whole(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the fractional portion (always 0-99).
    #[inline]
    pub const fn fraction(&self) -> i64 {
        (self.0 % 100).abs()
    }

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

    /// Parses a payment entry as typed into the cash or card field.
    ///
    /// ## Accepted Forms
    /// - `"120"`, `"120.5"`, `"120,50"` (comma or dot separator)
    /// - Surrounding whitespace is ignored
    ///
    /// ## Rejected
    /// - Blank input, signs, letters, more than two decimals
    ///
    /// ## Example
    /// ```rust
    /// use kasa_core::money::Money;
    ///
    /// assert_eq!(Money::parse_entry(" 99,9 ").unwrap().minor_units(), 9990);
    /// assert!(Money::parse_entry("").is_err());
    /// assert!(Money::parse_entry("-5").is_err());
    /// assert!(Money::parse_entry("1.005").is_err());
    /// ```
    pub fn parse_entry(input: &str) -> Result<Money, AmountError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(AmountError::Blank);
        }

        let normalized = trimmed.replace(',', ".");
        let (whole, fraction) = match normalized.split_once('.') {
            Some((w, f)) => (w, f),
            None => (normalized.as_str(), ""),
        };

        let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction)
        {
            return Err(AmountError::Malformed(trimmed.to_string()));
        }
        if fraction.len() > 2 {
            return Err(AmountError::TooManyDecimals(trimmed.to_string()));
        }
        if whole.trim_start_matches('0').len() > MAX_WHOLE_DIGITS {
            return Err(AmountError::Overflow(trimmed.to_string()));
        }

        let whole_units: i64 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| AmountError::Overflow(trimmed.to_string()))?
        };
        let fraction_units: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().unwrap_or(0) * 10,
            _ => fraction.parse::<i64>().unwrap_or(0),
        };

        Ok(Money(whole_units * 100 + fraction_units))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount with two decimals and a comma, as printed in Polish tills.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{},{:02}", sign, self.whole().abs(), self.fraction())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
