//! # Line Items
//!
//! One billable row of a quote or invoice, the patch the form sends when a
//! field changes, and the per-line calculator.
//!
//! ## Line Arithmetic
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  quantity × unit_price ─────────────────────────► base                  │
//! │                                                     │                   │
//! │  base × discount% (0 when no discount) ─────────► discount              │
//! │                                                     │                   │
//! │  base − discount ───────────────────────────────► net   (pre-tax)      │
//! │                                                     │                   │
//! │  net × tax_rate% ───────────────────────────────► tax                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each step rounds once to the cent. Nothing is clamped and nothing is
//! validated here: a negative quantity yields a negative line.

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Money;
use crate::types::{CatalogProduct, DiscountRate, Quantity, TaxRate, Unit};

// =============================================================================
// Line Item
// =============================================================================

/// A billable row: product or free text, quantity × price, optional
/// discount, taxed at its own rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Opaque id (UUID v4), stable for the life of the row.
    /// The form uses it as the list-reconciliation key.
    pub id: String,

    /// Catalog reference; `None` for free-text lines.
    pub product_id: Option<String>,

    pub description: String,

    pub quantity: Quantity,

    pub unit: Unit,

    /// Pre-tax price per unit.
    pub unit_price: Money,

    /// Line discount, applied to the base before tax.
    pub discount: Option<DiscountRate>,

    pub tax_rate: TaxRate,
}

impl LineItem {
    /// Creates the empty row the form shows when the user adds a line.
    ///
    /// ```rust
    /// use billing_core::line_item::LineItem;
    /// use billing_core::types::{Quantity, TaxRate};
    ///
    /// let line = LineItem::blank(TaxRate::from_bps(2000));
    /// assert_eq!(line.quantity, Quantity::one());
    /// assert!(line.unit_price.is_zero());
    /// assert!(line.product_id.is_none());
    /// ```
    pub fn blank(default_tax_rate: TaxRate) -> Self {
        LineItem {
            id: Uuid::new_v4().to_string(),
            product_id: None,
            description: String::new(),
            quantity: Quantity::one(),
            unit: Unit::default(),
            unit_price: Money::zero(),
            discount: None,
            tax_rate: default_tax_rate,
        }
    }

    /// Computes this line's totals.
    #[inline]
    pub fn totals(&self) -> LineTotals {
        LineTotals::of(self)
    }

    /// Shallow-merges `patch` into this line. Absent fields are untouched.
    pub fn apply(&mut self, patch: LinePatch) {
        if let Some(product_id) = patch.product_id {
            self.product_id = product_id;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(unit) = patch.unit {
            self.unit = unit;
        }
        if let Some(unit_price) = patch.unit_price {
            self.unit_price = unit_price;
        }
        if let Some(discount) = patch.discount {
            self.discount = discount;
        }
        if let Some(tax_rate) = patch.tax_rate {
            self.tax_rate = tax_rate;
        }
    }

    /// Fills this line from a catalog product.
    ///
    /// Overwrites product reference, description, price, unit and tax rate
    /// together. Quantity and discount keep whatever the user entered.
    pub fn fill_from_product(&mut self, product: &CatalogProduct) {
        self.product_id = Some(product.id.clone());
        self.description = product.name.clone();
        self.unit_price = product.unit_price;
        self.unit = product.unit;
        self.tax_rate = product.effective_tax_rate();
    }
}

// =============================================================================
// Line Patch
// =============================================================================

/// A partial update to a line.
///
/// `product_id` and `discount` are tri-state: field absent leaves the line
/// alone, `null` clears it, a value sets it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LinePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "present")]
    #[ts(optional, type = "string | null")]
    pub product_id: Option<Option<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub quantity: Option<Quantity>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub unit: Option<Unit>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub unit_price: Option<Money>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "present")]
    #[ts(optional, type = "number | null")]
    pub discount: Option<Option<DiscountRate>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub tax_rate: Option<TaxRate>,
}

impl LinePatch {
    /// True when the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        *self == LinePatch::default()
    }
}

/// Marks a field as present, so `null` becomes `Some(None)` instead of `None`.
fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

// =============================================================================
// Line Total Calculator
// =============================================================================

/// The computed amounts of one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineTotals {
    /// quantity × unit price
    pub base: Money,
    /// Line-level discount amount (zero without a discount)
    pub discount: Money,
    /// base − discount, before tax
    pub net: Money,
    /// net × tax rate
    pub tax: Money,
}

impl LineTotals {
    /// Computes a line's totals. Pure and deterministic.
    ///
    /// ```rust
    /// use billing_core::line_item::{LineItem, LineTotals};
    /// use billing_core::money::Money;
    /// use billing_core::types::{DiscountRate, TaxRate};
    ///
    /// let mut line = LineItem::blank(TaxRate::from_bps(2000));
    /// line.unit_price = Money::from_cents(10000);
    /// line.discount = Some(DiscountRate::from_bps(1000));
    ///
    /// let totals = LineTotals::of(&line);
    /// assert_eq!(totals.net.cents(), 9000);
    /// assert_eq!(totals.tax.cents(), 1800);
    /// ```
    pub fn of(line: &LineItem) -> Self {
        let base = line.unit_price.multiply_quantity(line.quantity);
        let discount = line
            .discount
            .map(|rate| base.percentage(rate))
            .unwrap_or_default();
        let net = base - discount;
        let tax = net.calculate_tax(line.tax_rate);

        LineTotals {
            base,
            discount,
            net,
            tax,
        }
    }

    /// Net plus tax.
    #[inline]
    pub fn gross(&self) -> Money {
        self.net + self.tax
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(qty_milli: i64, price_cents: i64, discount_bps: Option<u32>, tax_bps: u32) -> LineItem {
        let mut line = LineItem::blank(TaxRate::from_bps(tax_bps));
        line.quantity = Quantity::from_milli(qty_milli);
        line.unit_price = Money::from_cents(price_cents);
        line.discount = discount_bps.map(DiscountRate::from_bps);
        line
    }

    #[test]
    fn test_no_discount_net_is_base() {
        let totals = line(2000, 10000, None, 2000).totals();
        assert_eq!(totals.base.cents(), 20000);
        assert_eq!(totals.discount.cents(), 0);
        assert_eq!(totals.net.cents(), 20000);
        assert_eq!(totals.tax.cents(), 4000);
        assert_eq!(totals.gross().cents(), 24000);
    }

    #[test]
    fn test_discount_applies_before_tax() {
        let totals = line(1000, 10000, Some(1000), 2000).totals();
        assert_eq!(totals.discount.cents(), 1000);
        assert_eq!(totals.net.cents(), 9000);
        assert_eq!(totals.tax.cents(), 1800);
    }

    #[test]
    fn test_zero_quantity_or_price_is_zero() {
        let totals = line(0, 10000, None, 2000).totals();
        assert!(totals.net.is_zero());
        assert!(totals.tax.is_zero());

        let totals = line(3000, 0, Some(500), 2000).totals();
        assert!(totals.net.is_zero());
        assert!(totals.tax.is_zero());
    }

    #[test]
    fn test_negative_inputs_are_not_clamped() {
        let totals = line(-1000, 5000, None, 1000).totals();
        assert_eq!(totals.net.cents(), -5000);
        assert_eq!(totals.tax.cents(), -500);
    }

    #[test]
    fn test_fractional_quantity() {
        // 1.5 hours at $85.00, 20% tax
        let totals = line(1500, 8500, None, 2000).totals();
        assert_eq!(totals.net.cents(), 12750);
        assert_eq!(totals.tax.cents(), 2550);
    }

    #[test]
    fn test_blank_lines_get_distinct_ids() {
        let a = LineItem::blank(TaxRate::zero());
        let b = LineItem::blank(TaxRate::zero());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_apply_merges_only_present_fields() {
        let mut item = line(2000, 10000, Some(500), 2000);
        let before = item.clone();

        item.apply(LinePatch {
            description: Some("Consulting".to_string()),
            ..Default::default()
        });

        assert_eq!(item.description, "Consulting");
        assert_eq!(item.quantity, before.quantity);
        assert_eq!(item.unit_price, before.unit_price);
        assert_eq!(item.discount, before.discount);
        assert_eq!(item.id, before.id);
    }

    #[test]
    fn test_apply_can_clear_discount() {
        let mut item = line(1000, 10000, Some(500), 2000);
        item.apply(LinePatch {
            discount: Some(None),
            ..Default::default()
        });
        assert!(item.discount.is_none());
    }

    #[test]
    fn test_patch_json_distinguishes_null_from_absent() {
        let patch: LinePatch = serde_json::from_str(r#"{"discount": null}"#).unwrap();
        assert_eq!(patch.discount, Some(None));

        let patch: LinePatch = serde_json::from_str(r#"{"quantity": 1500}"#).unwrap();
        assert_eq!(patch.discount, None);
        assert_eq!(patch.quantity, Some(Quantity::from_milli(1500)));

        let patch: LinePatch = serde_json::from_str("{}").unwrap();
        assert!(patch.is_empty());

        let patch: LinePatch = serde_json::from_str(r#"{"productId": "p-1"}"#).unwrap();
        assert_eq!(patch.product_id, Some(Some("p-1".to_string())));
    }

    #[test]
    fn test_patch_bindings_allow_null_for_tri_state_fields() {
        let decl = LinePatch::decl();
        assert!(decl.contains("productId?: string | null"));
        assert!(decl.contains("discount?: number | null"));
    }

    #[test]
    fn test_fill_from_product_keeps_quantity_and_discount() {
        let mut item = line(3000, 100, Some(1500), 2000);
        item.description = "typed by hand".to_string();

        let product = CatalogProduct {
            id: "prod-42".to_string(),
            name: "Support plan".to_string(),
            unit_price: Money::from_cents(4900),
            unit: Unit::Month,
            tax_rate: TaxRate::from_bps(1000),
            tax_exempt: false,
        };
        item.fill_from_product(&product);

        assert_eq!(item.product_id.as_deref(), Some("prod-42"));
        assert_eq!(item.description, "Support plan");
        assert_eq!(item.unit_price.cents(), 4900);
        assert_eq!(item.unit, Unit::Month);
        assert_eq!(item.tax_rate.bps(), 1000);
        assert_eq!(item.quantity, Quantity::from_units(3));
        assert_eq!(item.discount, Some(DiscountRate::from_bps(1500)));
    }
}
