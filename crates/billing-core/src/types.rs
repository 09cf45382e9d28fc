//! # Domain Types
//!
//! Value types shared by the line item calculators and the editor.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │  DiscountRate   │   │    Quantity     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  bps (u32)      │   │  milli (i64)    │       │
//! │  │  550 = 5.5%     │   │  1000 = 10%     │   │  1500 = 1.5     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │      Unit       │   │ CatalogProduct  │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  hour, day, ... │   │  unit_price     │                             │
//! │  │  display only   │   │  tax_rate       │                             │
//! │  └─────────────────┘   │  tax_exempt     │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every numeric type is an integer in disguise. Rates are basis points,
//! quantities are thousandths, so the whole calculation pipeline stays exact.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::{parse_scaled, Money};

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 550 bps = 5.5% (French reduced VAT), 2000 bps = 20%
///
/// Ordered so it can key the tax breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    ///
    /// Negative input saturates to zero.
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round().max(0.0) as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

/// Shows the rate the way the breakdown prints it: "20%", "5.5%".
impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_bps(self.0, f)
    }
}

/// Parses a percentage such as "20" or "5.5".
impl FromStr for TaxRate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_bps(s, "tax_rate").map(TaxRate)
    }
}

// =============================================================================
// Discount Rate
// =============================================================================

/// Percentage discount in basis points (1000 = 10%).
///
/// Used both per line (applied before tax) and per document (applied after
/// tax). The [0, 100%] range is a validation rule, not a type guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a discount from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a discount from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        DiscountRate((pct * 100.0).round().max(0.0) as u32)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::zero()
    }
}

impl fmt::Display for DiscountRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_bps(self.0, f)
    }
}

impl FromStr for DiscountRate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_bps(s, "discount_percent").map(DiscountRate)
    }
}

fn fmt_bps(bps: u32, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let whole = bps / 100;
    let frac = bps % 100;
    if frac == 0 {
        write!(f, "{}%", whole)
    } else if frac % 10 == 0 {
        write!(f, "{}.{}%", whole, frac / 10)
    } else {
        write!(f, "{}.{:02}%", whole, frac)
    }
}

fn parse_bps(input: &str, field: &str) -> Result<u32, ValidationError> {
    let invalid = || ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: format!("'{}' is not a percentage with at most 2 decimals", input.trim()),
    };

    let bps = parse_scaled(input, 2).ok_or_else(invalid)?;
    u32::try_from(bps).map_err(|_| invalid())
}

// =============================================================================
// Quantity
// =============================================================================

/// A line quantity with three decimal places, stored as thousandths.
///
/// Quantities are not required to be integral: 1.5 hours, 0.25 days and
/// 12.125 kilograms are all exact.
///
/// ```rust
/// use billing_core::types::Quantity;
///
/// let hours: Quantity = "1.5".parse().unwrap();
/// assert_eq!(hours.milli(), 1500);
/// assert_eq!(hours.to_string(), "1.5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Quantity(i64);

impl Quantity {
    /// Thousandths per whole unit.
    pub const SCALE: i64 = 1000;

    #[inline]
    pub const fn from_milli(milli: i64) -> Self {
        Quantity(milli)
    }

    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Quantity(units * Self::SCALE)
    }

    /// Exactly one unit, the quantity of a freshly added line.
    #[inline]
    pub const fn one() -> Self {
        Quantity(Self::SCALE)
    }

    #[inline]
    pub const fn milli(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::one()
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let whole = (self.0 / Self::SCALE).abs();
        let frac = (self.0 % Self::SCALE).abs();
        if frac == 0 {
            return write!(f, "{}{}", sign, whole);
        }
        let frac = format!("{:03}", frac);
        write!(f, "{}{}.{}", sign, whole, frac.trim_end_matches('0'))
    }
}

impl FromStr for Quantity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_scaled(s, 3)
            .map(Quantity)
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "quantity".to_string(),
                reason: format!("'{}' is not a number with at most 3 decimals", s.trim()),
            })
    }
}

// =============================================================================
// Unit of Measure
// =============================================================================

/// Unit-of-measure label for a line.
///
/// Display only: the arithmetic never looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    #[default]
    Unit,
    Hour,
    Day,
    Month,
    FlatFee,
    Kilogram,
    SquareMeter,
}

impl Unit {
    /// Every unit, in the order the form's select lists them.
    pub const ALL: [Unit; 7] = [
        Unit::Unit,
        Unit::Hour,
        Unit::Day,
        Unit::Month,
        Unit::FlatFee,
        Unit::Kilogram,
        Unit::SquareMeter,
    ];

    /// The serialized name ("flat_fee").
    pub const fn as_str(&self) -> &'static str {
        match self {
            Unit::Unit => "unit",
            Unit::Hour => "hour",
            Unit::Day => "day",
            Unit::Month => "month",
            Unit::FlatFee => "flat_fee",
            Unit::Kilogram => "kilogram",
            Unit::SquareMeter => "square_meter",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive; accepts `-` or space in place of `_`.
impl FromStr for Unit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Unit::ALL
            .into_iter()
            .find(|unit| unit.as_str() == normalized)
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "unit".to_string(),
                reason: format!("unknown unit '{}'", s.trim()),
            })
    }
}

// =============================================================================
// Catalog Product
// =============================================================================

/// A catalog entry a line can be filled from.
///
/// Selecting a product overwrites the line's description, price, unit and
/// tax rate in one step. Tax-exempt products always land at a 0% rate,
/// whatever `tax_rate` says.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    /// Catalog identifier, copied onto the line as `product_id`.
    pub id: String,

    /// Name shown in the catalog; becomes the line description.
    pub name: String,

    /// Pre-tax price per unit.
    pub unit_price: Money,

    pub unit: Unit,

    pub tax_rate: TaxRate,

    #[serde(default)]
    pub tax_exempt: bool,
}

impl CatalogProduct {
    /// The rate a line gets when this product is selected.
    #[inline]
    pub fn effective_tax_rate(&self) -> TaxRate {
        if self.tax_exempt {
            TaxRate::zero()
        } else {
            self.tax_rate
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
