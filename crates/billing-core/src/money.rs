//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Across a 40-line invoice the drift shows up in the tax breakdown:     │
//! │    Σ(line tax) ≠ breakdown amount by a fraction of a cent              │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    50.00 × 5.5% = 5000 cents × 550 bps / 10000 = 275 cents             │
//! │    Every line is rounded once, every sum is exact                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use billing_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(1099); // $10.99
//!
//! // Arithmetic operations
//! let doubled = price * 2;
//! let total = price + Money::from_cents(500);
//! assert_eq!(doubled.cents(), 2198);
//! assert_eq!(total.cents(), 1599);
//!
//! // Form input is parsed as a decimal string, never through f64
//! let typed: Money = "12.5".parse().unwrap();
//! assert_eq!(typed.cents(), 1250);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::{DiscountRate, Quantity, TaxRate};

/// Basis points in one whole (100%).
pub(crate) const BPS_SCALE: i128 = 10_000;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: negative values are legal (credit notes, oversized
///   discounts); the calculators never clamp
/// - **Single field tuple struct**: Zero-cost abstraction over i64
///
/// ## Where Money Flows
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  CatalogProduct.unit_price ──► LineItem.unit_price                      │
/// │                                      │                                  │
/// │                    × quantity − line discount                           │
/// │                                      ▼                                  │
/// │                               LineTotals.net ──► × tax rate ──► tax    │
/// │                                      │                                  │
/// │  Σ net ──► subtotal ──► + Σ tax − document discount ──► total          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use billing_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-5, 50)` is -$5.50.
    ///
    /// ```rust
    /// use billing_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
    /// assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Calculates tax at `rate`, rounded half away from zero to the cent.
    ///
    /// ## Implementation
    /// Integer math in i128: `amount × bps / 10000`, then one rounding step.
    ///
    /// ## Example
    /// ```rust
    /// use billing_core::money::Money;
    /// use billing_core::types::TaxRate;
    ///
    /// let net = Money::from_cents(5000);  // $50.00
    /// let rate = TaxRate::from_bps(550);  // 5.5%
    /// assert_eq!(net.calculate_tax(rate).cents(), 275);
    ///
    /// // $10.00 × 8.25% = $0.825 → $0.83
    /// assert_eq!(Money::from_cents(1000).calculate_tax(TaxRate::from_bps(825)).cents(), 83);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        Money(div_round(self.0 as i128 * rate.bps() as i128, BPS_SCALE))
    }

    /// Returns `rate` percent of this amount (the discount, not the
    /// discounted amount), rounded half away from zero.
    ///
    /// ```rust
    /// use billing_core::money::Money;
    /// use billing_core::types::DiscountRate;
    ///
    /// let subtotal = Money::from_cents(14000);
    /// assert_eq!(subtotal.percentage(DiscountRate::from_bps(1000)).cents(), 1400);
    /// ```
    pub fn percentage(&self, rate: DiscountRate) -> Money {
        Money(div_round(self.0 as i128 * rate.bps() as i128, BPS_SCALE))
    }

    /// Multiplies a unit price by a (possibly fractional) quantity.
    ///
    /// ## Example
    /// ```rust
    /// use billing_core::money::Money;
    /// use billing_core::types::Quantity;
    ///
    /// let hourly = Money::from_cents(12000);          // $120.00 / hour
    /// let line = hourly.multiply_quantity(Quantity::from_milli(1500)); // 1.5 h
    /// assert_eq!(line.cents(), 18000);
    /// ```
    pub fn multiply_quantity(&self, qty: Quantity) -> Money {
        Money(div_round(
            self.0 as i128 * qty.milli() as i128,
            Quantity::SCALE as i128,
        ))
    }
}

/// Integer division rounded half away from zero. `denominator` must be > 0.
///
/// Results outside the `i64` range saturate at `i64::MIN` / `i64::MAX`.
pub(crate) fn div_round(numerator: i128, denominator: i128) -> i64 {
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    let rounded = if remainder.abs() * 2 >= denominator {
        quotient + numerator.signum()
    } else {
        quotient
    };
    i64::try_from(rounded).unwrap_or(if rounded < 0 { i64::MIN } else { i64::MAX })
}

/// Parses a plain decimal string ("12", "-3.5", ".25") into an integer
/// scaled by `10^decimals`. Rejects more fractional digits than `decimals`.
pub(crate) fn parse_scaled(input: &str, decimals: u32) -> Option<i64> {
    let input = input.trim();
    let (negative, digits) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };

    let (whole, frac) = match digits.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (digits, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if frac.len() > decimals as usize {
        return None;
    }
    if !whole.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }

    let scale = 10_i64.checked_pow(decimals)?;
    let whole_value = if whole.is_empty() {
        0
    } else {
        whole.parse::<i64>().ok()?
    };
    let frac_value = if frac.is_empty() {
        0
    } else {
        // "5" with two decimals means 50
        frac.parse::<i64>().ok()? * 10_i64.pow(decimals - frac.len() as u32)
    };

    let value = whole_value.checked_mul(scale)?.checked_add(frac_value)?;
    Some(if negative { -value } else { value })
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// For debugging and logs; the editor config formats with the tenant's
/// currency symbol for anything user-facing.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_scaled(s, 2)
            .map(Money)
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "amount".to_string(),
                reason: format!("'{}' is not a decimal amount with at most 2 decimals", s.trim()),
            })
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

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

/// Multiplication by a whole count.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((b - a).cents(), -500);
        assert_eq!((-a).cents(), -1000);
        assert_eq!((a * 3).cents(), 3000);

        let total: Money = [a, b, b].iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_tax_calculation_exact() {
        // Scenario B's second line: $50.00 at 5.5% is exactly $2.75
        let tax = Money::from_cents(5000).calculate_tax(TaxRate::from_bps(550));
        assert_eq!(tax.cents(), 275);
    }

    #[test]
    fn test_tax_rounds_half_away_from_zero() {
        // $10.00 at 8.25% = 82.5 cents → 83
        assert_eq!(
            Money::from_cents(1000).calculate_tax(TaxRate::from_bps(825)).cents(),
            83
        );
        // Credit line: -$10.00 at 8.25% = -82.5 cents → -83
        assert_eq!(
            Money::from_cents(-1000).calculate_tax(TaxRate::from_bps(825)).cents(),
            -83
        );
        // 82.4 cents → 82
        assert_eq!(
            Money::from_cents(999).calculate_tax(TaxRate::from_bps(825)).cents(),
            82
        );
    }

    #[test]
    fn test_percentage() {
        let subtotal = Money::from_cents(10000);
        assert_eq!(subtotal.percentage(DiscountRate::from_bps(1000)).cents(), 1000);
        assert_eq!(subtotal.percentage(DiscountRate::zero()).cents(), 0);
    }

    #[test]
    fn test_multiply_fractional_quantity() {
        let price = Money::from_cents(999);
        // 0.333 × 9.99 = 3.32667 → 333 cents
        assert_eq!(price.multiply_quantity(Quantity::from_milli(333)).cents(), 333);
        assert_eq!(price.multiply_quantity(Quantity::from_units(3)).cents(), 2997);
        assert_eq!(price.multiply_quantity(Quantity::from_milli(0)).cents(), 0);
    }

    #[test]
    fn test_parse() {
        assert_eq!("12.34".parse::<Money>().unwrap().cents(), 1234);
        assert_eq!("12.5".parse::<Money>().unwrap().cents(), 1250);
        assert_eq!("7".parse::<Money>().unwrap().cents(), 700);
        assert_eq!(" .25 ".parse::<Money>().unwrap().cents(), 25);
        assert_eq!("-3.10".parse::<Money>().unwrap().cents(), -310);

        assert!("".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!("1.234".parse::<Money>().is_err());
        assert!("1,50".parse::<Money>().is_err());
        assert!(".".parse::<Money>().is_err());
    }

    #[test]
    fn test_div_round() {
        assert_eq!(div_round(5, 10), 1);
        assert_eq!(div_round(4, 10), 0);
        assert_eq!(div_round(-5, 10), -1);
        assert_eq!(div_round(-4, 10), 0);
        assert_eq!(div_round(20, 10), 2);
    }

    #[test]
    fn test_oversized_products_saturate() {
        let huge = Money::from_cents(i64::MAX);
        assert_eq!(huge.multiply_quantity(Quantity::from_units(2)).cents(), i64::MAX);
        assert_eq!(
            (-huge).multiply_quantity(Quantity::from_units(3)).cents(),
            i64::MIN
        );
        assert_eq!(div_round(i128::from(i64::MAX) * 10, 1), i64::MAX);
    }
}
