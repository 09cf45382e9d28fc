//! # Persistence Payload
//!
//! The shape handed to the backend when a quote or invoice is saved, and
//! read back when one is opened for editing.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  LineItemEditor ──► DocumentPayload::from_editor ──► JSON ──► backend   │
//! │                                                                         │
//! │  backend ──► JSON ──► DocumentPayload::into_line_items ──► editor       │
//! │                        (positions sort the lines, ids regenerated)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Amounts are integer minor units, rates integer basis points and
//! quantities integer thousandths, same as billing-core.

use billing_core::{
    DiscountRate, DocumentDiscount, LineItem, LineItemEditor, Money, Quantity, TaxBreakdownEntry,
    TaxRate, Unit,
};
use serde::{Deserialize, Serialize};

use crate::state::EditorConfig;

/// One persisted line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinePayload {
    /// 0-based display position.
    pub position: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    pub description: String,
    pub quantity: Quantity,
    pub unit: Unit,
    pub unit_price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<DiscountRate>,
    pub tax_rate: TaxRate,
    /// Computed on save; ignored when loading.
    #[serde(default)]
    pub line_net_total: Money,
    /// Computed on save; ignored when loading.
    #[serde(default)]
    pub line_tax: Money,
}

impl LinePayload {
    /// Snapshots a line at `position` together with its computed totals.
    pub fn from_line(position: usize, item: &LineItem) -> Self {
        let totals = item.totals();
        LinePayload {
            position,
            product_id: item.product_id.clone(),
            description: item.description.clone(),
            quantity: item.quantity,
            unit: item.unit,
            unit_price: item.unit_price,
            discount_percent: item.discount,
            tax_rate: item.tax_rate,
            line_net_total: totals.net,
            line_tax: totals.tax,
        }
    }

    /// Rebuilds an editable line. Stored totals are not trusted: they are
    /// recomputed by the editor. The line gets a fresh id.
    pub fn into_line_item(self) -> LineItem {
        let mut item = LineItem::blank(self.tax_rate);
        item.product_id = self.product_id;
        item.description = self.description;
        item.quantity = self.quantity;
        item.unit = self.unit;
        item.unit_price = self.unit_price;
        item.discount = self.discount_percent;
        item
    }
}

/// One persisted document (quote or invoice body).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPayload {
    /// Owning tenant; empty until [`DocumentPayload::tagged`].
    #[serde(default)]
    pub tenant_id: String,
    /// ISO 4217 code the amounts are expressed in.
    #[serde(default)]
    pub currency_code: String,
    pub lines: Vec<LinePayload>,
    #[serde(default)]
    pub subtotal: Money,
    /// Total tax across all rates.
    #[serde(default)]
    pub vat_amount: Money,
    #[serde(default)]
    pub vat_breakdown: Vec<TaxBreakdownEntry>,
    #[serde(default)]
    pub total: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_amount: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<DiscountRate>,
}

impl DocumentPayload {
    /// Snapshots the editor's lines and totals.
    ///
    /// ```rust
    /// use billing_core::{LineItemEditor, LinePatch, Money, TaxRate};
    /// use invoice_editor::payload::DocumentPayload;
    ///
    /// let mut editor = LineItemEditor::new(TaxRate::from_bps(2000));
    /// editor.update_item(0, LinePatch {
    ///     unit_price: Some(Money::from_cents(10000)),
    ///     ..Default::default()
    /// });
    ///
    /// let payload = DocumentPayload::from_editor(&editor);
    /// assert_eq!(payload.lines[0].line_tax.cents(), 2000);
    /// assert_eq!(payload.total.cents(), 12000);
    /// ```
    pub fn from_editor(editor: &LineItemEditor) -> Self {
        let totals = editor.totals();
        let discount = editor.discount();

        DocumentPayload {
            tenant_id: String::new(),
            currency_code: String::new(),
            lines: editor
                .items()
                .iter()
                .enumerate()
                .map(|(position, item)| LinePayload::from_line(position, item))
                .collect(),
            subtotal: totals.subtotal,
            vat_amount: totals.total_vat,
            vat_breakdown: totals.vat_breakdown.clone(),
            total: totals.total,
            discount_amount: discount.amount,
            discount_percent: discount.percent,
        }
    }

    /// Stamps the tenant and currency the document is saved under.
    pub fn tagged(mut self, config: &EditorConfig) -> Self {
        self.tenant_id = config.tenant_id.clone();
        self.currency_code = config.currency_code.clone();
        self
    }

    /// The stored document discount.
    pub fn discount(&self) -> DocumentDiscount {
        DocumentDiscount {
            amount: self.discount_amount,
            percent: self.discount_percent,
        }
    }

    /// Editable lines in position order.
    pub fn into_line_items(self) -> Vec<LineItem> {
        let mut lines = self.lines;
        lines.sort_by_key(|line| line.position);
        lines.into_iter().map(LinePayload::into_line_item).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use billing_core::LinePatch;

    fn scenario_b() -> LineItemEditor {
        let mut editor = LineItemEditor::new(TaxRate::from_bps(2000));
        editor.update_item(
            0,
            LinePatch {
                description: Some("Design".to_string()),
                unit_price: Some(Money::from_cents(10000)),
                discount: Some(Some(DiscountRate::from_bps(1000))),
                ..Default::default()
            },
        );
        editor.add_item();
        editor.update_item(
            1,
            LinePatch {
                description: Some("Printing".to_string()),
                unit_price: Some(Money::from_cents(5000)),
                tax_rate: Some(TaxRate::from_bps(550)),
                ..Default::default()
            },
        );
        editor
    }

    #[test]
    fn test_from_editor_carries_computed_amounts() {
        let payload = DocumentPayload::from_editor(&scenario_b());

        assert_eq!(payload.lines.len(), 2);
        assert_eq!(payload.lines[0].line_net_total.cents(), 9000);
        assert_eq!(payload.lines[0].line_tax.cents(), 1800);
        assert_eq!(payload.lines[1].position, 1);
        assert_eq!(payload.lines[1].line_tax.cents(), 275);
        assert_eq!(payload.subtotal.cents(), 14000);
        assert_eq!(payload.vat_amount.cents(), 2075);
        assert_eq!(payload.total.cents(), 16075);
    }

    #[test]
    fn test_json_shape_is_camel_case() {
        let mut editor = scenario_b();
        editor.set_discount(DocumentDiscount::percent(DiscountRate::from_bps(1000)));

        let json = serde_json::to_value(DocumentPayload::from_editor(&editor)).unwrap();
        assert_eq!(json["vatAmount"], 2075);
        assert_eq!(json["discountPercent"], 1000);
        assert_eq!(json["total"], 14675);
        assert_eq!(json["lines"][0]["lineNetTotal"], 9000);
        assert_eq!(json["lines"][1]["taxRate"], 550);
        assert_eq!(json["vatBreakdown"][0]["rate"], 550);
        assert!(json.get("discountAmount").is_none());
        assert_eq!(json["tenantId"], "");
        assert!(json["lines"][1].get("discountPercent").is_none());
    }

    #[test]
    fn test_loading_sorts_by_position_and_ignores_stored_totals() {
        let mut payload = DocumentPayload::from_editor(&scenario_b());
        payload.lines.reverse();
        payload.lines[0].line_net_total = Money::from_cents(1);

        let discount = payload.discount();
        let editor = LineItemEditor::with_items(TaxRate::zero(), payload.into_line_items());

        assert_eq!(editor.items()[0].description, "Design");
        assert_eq!(editor.items()[1].description, "Printing");
        assert_eq!(editor.subtotal().cents(), 14000);
        assert!(discount.is_none());
    }

    #[test]
    fn test_tagged_carries_tenant_and_currency() {
        let config = EditorConfig {
            tenant_id: "org-42".to_string(),
            currency_code: "EUR".to_string(),
            ..EditorConfig::default()
        };
        let payload = DocumentPayload::from_editor(&scenario_b()).tagged(&config);

        assert_eq!(payload.tenant_id, "org-42");
        assert_eq!(payload.currency_code, "EUR");
        assert_eq!(payload.total.cents(), 16075);

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["tenantId"], "org-42");
        assert_eq!(json["currencyCode"], "EUR");
    }

    #[test]
    fn test_minimal_json_loads() {
        let json = r#"{
            "lines": [
                { "position": 0, "description": "Retainer", "quantity": 1000,
                  "unit": "month", "unitPrice": 150000, "taxRate": 2000 }
            ]
        }"#;
        let payload: DocumentPayload = serde_json::from_str(json).unwrap();
        let items = payload.into_line_items();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].unit, Unit::Month);
        assert_eq!(items[0].totals().tax.cents(), 30000);
    }
}
