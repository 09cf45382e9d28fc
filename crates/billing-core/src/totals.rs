//! # Document Totals
//!
//! Tax breakdown by rate and the document-level totals.
//!
//! ## Calculation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  lines ──► LineTotals (per line)                                        │
//! │               │                                                         │
//! │               ├── Σ net ─────────────────────────────► subtotal         │
//! │               │                                                         │
//! │               └── tax grouped by rate ───────────────► vat_breakdown    │
//! │                        (zero amounts dropped,              │            │
//! │                         ascending by rate)                 ▼            │
//! │                                               Σ amounts ► total_vat     │
//! │                                                                         │
//! │  subtotal + total_vat ───────────────────────────────► raw_total        │
//! │  raw_total − document discount ──────────────────────► total            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The document discount is taken after tax while the line discount is
//! taken before it. Both behaviours are kept as-is: changing either would
//! silently change the amount on issued invoices.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::line_item::LineItem;
use crate::money::Money;
use crate::types::{DiscountRate, TaxRate};

// =============================================================================
// Tax Breakdown
// =============================================================================

/// Tax owed at one rate across the whole document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxBreakdownEntry {
    pub rate: TaxRate,
    pub amount: Money,
}

/// Groups line taxes by rate.
///
/// - one entry per distinct rate, sorted ascending
/// - lines whose tax is zero contribute nothing
/// - rates whose summed tax is zero are left out
///
/// The result depends only on the set of lines, never on their order.
///
/// ```rust
/// use billing_core::line_item::LineItem;
/// use billing_core::money::Money;
/// use billing_core::totals::tax_breakdown;
/// use billing_core::types::TaxRate;
///
/// let mut standard = LineItem::blank(TaxRate::from_bps(2000));
/// standard.unit_price = Money::from_cents(10000);
/// let mut exempt = LineItem::blank(TaxRate::zero());
/// exempt.unit_price = Money::from_cents(5000);
///
/// let breakdown = tax_breakdown(&[standard, exempt]);
/// assert_eq!(breakdown.len(), 1);
/// assert_eq!(breakdown[0].amount.cents(), 2000);
/// ```
pub fn tax_breakdown(items: &[LineItem]) -> Vec<TaxBreakdownEntry> {
    let mut by_rate: BTreeMap<TaxRate, Money> = BTreeMap::new();

    for item in items {
        let tax = item.totals().tax;
        if tax.is_zero() {
            continue;
        }
        *by_rate.entry(item.tax_rate).or_default() += tax;
    }

    by_rate
        .into_iter()
        .filter(|(_, amount)| !amount.is_zero())
        .map(|(rate, amount)| TaxBreakdownEntry { rate, amount })
        .collect()
}

// =============================================================================
// Document Discount
// =============================================================================

/// Discount on the whole document: a flat amount, a percentage of the
/// subtotal, or neither.
///
/// ## Precedence
/// When a non-zero `percent` is set it wins and `amount` is ignored. The
/// form does not stop the user from filling both fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDiscount {
    #[serde(default)]
    pub amount: Option<Money>,
    #[serde(default)]
    pub percent: Option<DiscountRate>,
}

impl DocumentDiscount {
    /// No document discount.
    pub const fn none() -> Self {
        DocumentDiscount {
            amount: None,
            percent: None,
        }
    }

    /// A flat discount.
    pub const fn flat(amount: Money) -> Self {
        DocumentDiscount {
            amount: Some(amount),
            percent: None,
        }
    }

    /// A percentage of the subtotal.
    pub const fn percent(rate: DiscountRate) -> Self {
        DocumentDiscount {
            amount: None,
            percent: Some(rate),
        }
    }

    /// The discount actually subtracted for a given subtotal.
    ///
    /// ```rust
    /// use billing_core::money::Money;
    /// use billing_core::totals::DocumentDiscount;
    /// use billing_core::types::DiscountRate;
    ///
    /// let both = DocumentDiscount {
    ///     amount: Some(Money::from_cents(500)),
    ///     percent: Some(DiscountRate::from_bps(1000)),
    /// };
    /// // 10% of 140.00 wins over the flat 5.00
    /// assert_eq!(both.effective(Money::from_cents(14000)).cents(), 1400);
    /// ```
    pub fn effective(&self, subtotal: Money) -> Money {
        match self.percent {
            Some(rate) if !rate.is_zero() => subtotal.percentage(rate),
            _ => self.amount.unwrap_or_default(),
        }
    }

    /// True when nothing would be subtracted from any subtotal.
    pub fn is_none(&self) -> bool {
        let no_percent = self.percent.map_or(true, |rate| rate.is_zero());
        let no_amount = self.amount.map_or(true, |amount| amount.is_zero());
        no_percent && no_amount
    }
}

// =============================================================================
// Document Totals
// =============================================================================

/// Every derived amount of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTotals {
    /// Σ line net totals (pre-tax, after line discounts).
    pub subtotal: Money,
    pub vat_breakdown: Vec<TaxBreakdownEntry>,
    /// Σ breakdown amounts.
    pub total_vat: Money,
    /// subtotal + total_vat, before the document discount.
    pub raw_total: Money,
    /// Effective document discount.
    pub discount: Money,
    /// raw_total − discount. May be negative.
    pub total: Money,
}

impl DocumentTotals {
    /// Computes the totals of `items` under `discount`.
    ///
    /// An empty slice yields all-zero totals.
    pub fn compute(items: &[LineItem], discount: &DocumentDiscount) -> Self {
        let subtotal: Money = items.iter().map(|item| item.totals().net).sum();
        let vat_breakdown = tax_breakdown(items);

        Self::from_parts(subtotal, vat_breakdown, discount)
    }

    /// Combines an already computed subtotal and breakdown with a discount.
    pub fn from_parts(
        subtotal: Money,
        vat_breakdown: Vec<TaxBreakdownEntry>,
        discount: &DocumentDiscount,
    ) -> Self {
        let total_vat: Money = vat_breakdown.iter().map(|entry| entry.amount).sum();
        let raw_total = subtotal + total_vat;
        let discount = discount.effective(subtotal);

        DocumentTotals {
            subtotal,
            vat_breakdown,
            total_vat,
            raw_total,
            discount,
            total: raw_total - discount,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Quantity;

    fn line(qty_milli: i64, price_cents: i64, discount_bps: Option<u32>, tax_bps: u32) -> LineItem {
        let mut line = LineItem::blank(TaxRate::from_bps(tax_bps));
        line.quantity = Quantity::from_milli(qty_milli);
        line.unit_price = Money::from_cents(price_cents);
        line.discount = discount_bps.map(DiscountRate::from_bps);
        line
    }

    fn entry(rate_bps: u32, cents: i64) -> TaxBreakdownEntry {
        TaxBreakdownEntry {
            rate: TaxRate::from_bps(rate_bps),
            amount: Money::from_cents(cents),
        }
    }

    #[test]
    fn test_scenario_a_single_line() {
        let items = vec![line(2000, 10000, None, 2000)];
        let totals = DocumentTotals::compute(&items, &DocumentDiscount::none());

        assert_eq!(totals.subtotal.cents(), 20000);
        assert_eq!(totals.vat_breakdown, vec![entry(2000, 4000)]);
        assert_eq!(totals.total_vat.cents(), 4000);
        assert_eq!(totals.total.cents(), 24000);
    }

    #[test]
    fn test_scenario_b_two_rates() {
        let items = vec![
            line(1000, 10000, Some(1000), 2000),
            line(1000, 5000, Some(0), 550),
        ];
        let totals = DocumentTotals::compute(&items, &DocumentDiscount::none());

        assert_eq!(items[0].totals().net.cents(), 9000);
        assert_eq!(items[0].totals().tax.cents(), 1800);
        assert_eq!(items[1].totals().net.cents(), 5000);
        assert_eq!(items[1].totals().tax.cents(), 275);

        assert_eq!(totals.subtotal.cents(), 14000);
        assert_eq!(
            totals.vat_breakdown,
            vec![entry(550, 275), entry(2000, 1800)]
        );
        assert_eq!(totals.total.cents(), 16075);
    }

    #[test]
    fn test_scenario_c_percent_document_discount() {
        let totals = DocumentTotals::from_parts(
            Money::from_cents(14000),
            vec![entry(550, 275), entry(2000, 1800)],
            &DocumentDiscount::percent(DiscountRate::from_bps(1000)),
        );

        assert_eq!(totals.total_vat.cents(), 2075);
        assert_eq!(totals.raw_total.cents(), 16075);
        assert_eq!(totals.discount.cents(), 1400);
        assert_eq!(totals.total.cents(), 14675);
    }

    #[test]
    fn test_scenario_e_zero_rate_line() {
        let items = vec![line(1000, 10000, None, 2000), line(1000, 3000, None, 0)];
        let totals = DocumentTotals::compute(&items, &DocumentDiscount::none());

        assert_eq!(totals.subtotal.cents(), 13000);
        assert_eq!(totals.vat_breakdown, vec![entry(2000, 2000)]);
    }

    #[test]
    fn test_same_rate_lines_merge_into_one_entry() {
        let items = vec![
            line(1000, 1999, None, 2000),
            line(3000, 1234, Some(500), 2000),
            line(1500, 999, None, 2000),
        ];
        let expected: Money = items.iter().map(|item| item.totals().tax).sum();

        let breakdown = tax_breakdown(&items);
        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown[0].rate.bps(), 2000);
        assert_eq!(breakdown[0].amount, expected);
    }

    #[test]
    fn test_breakdown_sorted_without_duplicates() {
        let items = vec![
            line(1000, 1000, None, 2000),
            line(1000, 1000, None, 550),
            line(1000, 1000, None, 1000),
            line(1000, 2000, None, 550),
            line(1000, 1000, None, 2000),
        ];
        let rates: Vec<u32> = tax_breakdown(&items)
            .iter()
            .map(|entry| entry.rate.bps())
            .collect();
        assert_eq!(rates, vec![550, 1000, 2000]);
    }

    #[test]
    fn test_breakdown_drops_rates_that_cancel_out() {
        // A credit line exactly offsetting a charge at the same rate
        let items = vec![line(1000, 5000, None, 1000), line(-1000, 5000, None, 1000)];
        assert!(tax_breakdown(&items).is_empty());
    }

    #[test]
    fn test_breakdown_independent_of_order() {
        let mut items = vec![
            line(1000, 1000, None, 2000),
            line(2000, 700, None, 550),
            line(1000, 333, Some(1000), 1000),
        ];
        let forward = tax_breakdown(&items);
        items.reverse();
        assert_eq!(tax_breakdown(&items), forward);
    }

    #[test]
    fn test_empty_document_is_all_zero() {
        let totals = DocumentTotals::compute(&[], &DocumentDiscount::none());
        assert_eq!(totals, DocumentTotals::default());
        assert!(totals.vat_breakdown.is_empty());
    }

    #[test]
    fn test_percent_overrides_flat_amount() {
        let discount = DocumentDiscount {
            amount: Some(Money::from_cents(9999)),
            percent: Some(DiscountRate::from_bps(1000)),
        };
        assert_eq!(discount.effective(Money::from_cents(14000)).cents(), 1400);
    }

    #[test]
    fn test_zero_percent_falls_back_to_flat_amount() {
        let discount = DocumentDiscount {
            amount: Some(Money::from_cents(500)),
            percent: Some(DiscountRate::zero()),
        };
        assert_eq!(discount.effective(Money::from_cents(14000)).cents(), 500);
    }

    #[test]
    fn test_flat_discount_applied_after_tax() {
        let items = vec![line(1000, 10000, None, 2000)];
        let totals = DocumentTotals::compute(&items, &DocumentDiscount::flat(Money::from_cents(1000)));

        // Tax is still 20% of the undiscounted subtotal
        assert_eq!(totals.total_vat.cents(), 2000);
        assert_eq!(totals.total.cents(), 11000);
    }

    #[test]
    fn test_oversized_discount_goes_negative() {
        let items = vec![line(1000, 1000, None, 0)];
        let totals = DocumentTotals::compute(&items, &DocumentDiscount::flat(Money::from_cents(2500)));
        assert_eq!(totals.total.cents(), -1500);
    }

    #[test]
    fn test_discount_is_none() {
        assert!(DocumentDiscount::none().is_none());
        assert!(DocumentDiscount::percent(DiscountRate::zero()).is_none());
        assert!(!DocumentDiscount::flat(Money::from_cents(1)).is_none());
    }
}
