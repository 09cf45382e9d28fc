//! # Form Input Coercion
//!
//! Turns the raw text of the line inputs into typed patches.
//!
//! The calculators assume well-formed numbers, so anything the user types
//! that does not parse is replaced by a safe default here, before it ever
//! reaches the editor:
//!
//! | Field            | Blank / unparsable becomes |
//! |------------------|----------------------------|
//! | quantity         | 1                          |
//! | unit price       | 0                          |
//! | discount percent | no discount                |
//! | tax rate         | 0%                         |
//! | unit             | default unit               |
//!
//! A comma is accepted as the decimal separator ("1,5" hours).

use billing_core::{DiscountRate, DocumentDiscount, LinePatch, Money, Quantity, TaxRate, Unit};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Raw values of one line row, exactly as typed.
///
/// Only the fields present are applied; an absent field leaves the line
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineForm {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub unit_price: Option<String>,
    #[serde(default)]
    pub discount_percent: Option<String>,
    #[serde(default)]
    pub tax_rate: Option<String>,
}

impl LineForm {
    /// Coerces every present field into a [`LinePatch`].
    ///
    /// ```rust
    /// use billing_core::{Money, Quantity};
    /// use invoice_editor::form::LineForm;
    ///
    /// let form = LineForm {
    ///     quantity: Some("abc".to_string()),
    ///     unit_price: Some("12,50".to_string()),
    ///     ..Default::default()
    /// };
    /// let patch = form.into_patch();
    /// assert_eq!(patch.quantity, Some(Quantity::one()));
    /// assert_eq!(patch.unit_price, Some(Money::from_cents(1250)));
    /// ```
    pub fn into_patch(self) -> LinePatch {
        LinePatch {
            product_id: None,
            description: self.description,
            quantity: self.quantity.as_deref().map(coerce_quantity),
            unit: self.unit.as_deref().map(coerce_unit),
            unit_price: self.unit_price.as_deref().map(coerce_price),
            discount: self.discount_percent.as_deref().map(coerce_discount),
            tax_rate: self.tax_rate.as_deref().map(coerce_tax_rate),
        }
    }
}

/// Raw values of the document discount inputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountForm {
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub percent: Option<String>,
}

impl DiscountForm {
    /// Blank or unparsable fields count as not set.
    pub fn into_discount(self) -> DocumentDiscount {
        DocumentDiscount {
            amount: self
                .amount
                .as_deref()
                .and_then(|raw| parse_lenient::<Money>(raw, "discount_amount")),
            percent: self.percent.as_deref().and_then(coerce_discount),
        }
    }
}

/// Unparsable quantity falls back to 1.
pub fn coerce_quantity(raw: &str) -> Quantity {
    parse_lenient(raw, "quantity").unwrap_or_else(Quantity::one)
}

/// Unparsable price falls back to 0.
pub fn coerce_price(raw: &str) -> Money {
    parse_lenient(raw, "unit_price").unwrap_or_default()
}

/// Blank or unparsable discount means no discount.
pub fn coerce_discount(raw: &str) -> Option<DiscountRate> {
    parse_lenient(raw, "discount_percent")
}

/// Unparsable tax rate falls back to 0%.
pub fn coerce_tax_rate(raw: &str) -> TaxRate {
    parse_lenient(raw, "tax_rate").unwrap_or_default()
}

/// Unknown unit falls back to the default unit.
pub fn coerce_unit(raw: &str) -> Unit {
    raw.parse().unwrap_or_else(|_| {
        debug!(input = %raw, "Unknown unit, using default");
        Unit::default()
    })
}

fn parse_lenient<T: std::str::FromStr>(raw: &str, field: &str) -> Option<T> {
    let normalized = raw.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    match normalized.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            debug!(field, input = %raw, "Unparsable form input, using default");
            None
        }
    }
}
