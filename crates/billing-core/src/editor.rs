//! # Line Item Editor
//!
//! The ordered, mutable list of lines behind a quote or invoice form, with
//! its totals kept current.
//!
//! ## Editor Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Form Action              Editor Operation         State Change         │
//! │  ───────────              ────────────────         ────────────         │
//! │                                                                         │
//! │  Click "Add line" ──────► add_item() ────────────► push blank line     │
//! │  Click trash icon ──────► remove_item(i) ────────► remove (keeps ≥ 1)  │
//! │  Edit a field ──────────► update_item(i, patch) ─► merge patch         │
//! │  Pick from catalog ─────► select_product(i, p) ──► overwrite 5 fields  │
//! │  Drag a row ────────────► move_item(from, to) ───► reorder             │
//! │  Open existing doc ─────► replace_items(lines) ──► swap whole list     │
//! │  Edit discount ─────────► set_discount(d) ───────► store discount      │
//! │                                                                         │
//! │  Every mutation ends with ONE recompute of DocumentTotals, so what     │
//! │  the caller reads next is never stale.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these operations fail. An index outside the list is ignored and
//! reported through the `bool` return value.

use serde::Serialize;

use crate::line_item::{LineItem, LinePatch, LineTotals};
use crate::money::Money;
use crate::totals::{DocumentDiscount, DocumentTotals, TaxBreakdownEntry};
use crate::types::{CatalogProduct, TaxRate, Unit};

/// Owns the lines of one document being authored.
///
/// ## Invariants
/// - At least one line at all times
/// - `totals` always reflects `items` and `discount`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemEditor {
    items: Vec<LineItem>,
    discount: DocumentDiscount,
    default_tax_rate: TaxRate,
    default_unit: Unit,
    totals: DocumentTotals,
}

impl LineItemEditor {
    /// Creates an editor holding a single blank line.
    ///
    /// ```rust
    /// use billing_core::editor::LineItemEditor;
    /// use billing_core::types::TaxRate;
    ///
    /// let editor = LineItemEditor::new(TaxRate::from_bps(2000));
    /// assert_eq!(editor.len(), 1);
    /// assert!(editor.total().is_zero());
    /// ```
    pub fn new(default_tax_rate: TaxRate) -> Self {
        let mut editor = LineItemEditor {
            items: vec![LineItem::blank(default_tax_rate)],
            discount: DocumentDiscount::none(),
            default_tax_rate,
            default_unit: Unit::default(),
            totals: DocumentTotals::default(),
        };
        editor.recompute();
        editor
    }

    /// Creates an editor over existing lines (e.g. a saved invoice).
    pub fn with_items(default_tax_rate: TaxRate, items: Vec<LineItem>) -> Self {
        let mut editor = LineItemEditor::new(default_tax_rate);
        editor.replace_items(items);
        editor
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Appends a blank line at the document's default tax rate and unit.
    pub fn add_item(&mut self) {
        let line = self.blank_line();
        self.items.push(line);
        self.recompute();
    }

    /// Removes the line at `index`.
    ///
    /// Does nothing when it is the last remaining line or when `index` is
    /// out of range. Returns whether a line was removed.
    pub fn remove_item(&mut self, index: usize) -> bool {
        if self.items.len() <= 1 || index >= self.items.len() {
            return false;
        }
        self.items.remove(index);
        self.recompute();
        true
    }

    /// Shallow-merges `patch` into the line at `index`.
    pub fn update_item(&mut self, index: usize, patch: LinePatch) -> bool {
        let Some(item) = self.items.get_mut(index) else {
            return false;
        };
        item.apply(patch);
        self.recompute();
        true
    }

    /// Fills the line at `index` from a catalog product.
    ///
    /// Product reference, description, price, unit and tax rate are replaced
    /// together; quantity and discount stay as the user entered them.
    pub fn select_product(&mut self, index: usize, product: &CatalogProduct) -> bool {
        let Some(item) = self.items.get_mut(index) else {
            return false;
        };
        item.fill_from_product(product);
        self.recompute();
        true
    }

    /// Moves one line from `from` to `to`, keeping the relative order of
    /// every other line. Totals do not change.
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        let len = self.items.len();
        if from >= len || to >= len {
            return false;
        }
        if from != to {
            let item = self.items.remove(from);
            self.items.insert(to, item);
            self.recompute();
        }
        true
    }

    /// Replaces every line, e.g. when a saved document is opened.
    ///
    /// An empty list is replaced by one blank line.
    pub fn replace_items(&mut self, items: Vec<LineItem>) {
        self.items = items;
        if self.items.is_empty() {
            let line = self.blank_line();
            self.items.push(line);
        }
        self.recompute();
    }

    /// Sets the document-level discount.
    pub fn set_discount(&mut self, discount: DocumentDiscount) {
        self.discount = discount;
        self.recompute();
    }

    /// Changes the rate given to lines added from now on.
    /// Existing lines keep their rate.
    pub fn set_default_tax_rate(&mut self, rate: TaxRate) {
        self.default_tax_rate = rate;
    }

    /// Changes the unit given to lines added from now on.
    pub fn set_default_unit(&mut self, unit: Unit) {
        self.default_unit = unit;
    }

    fn blank_line(&self) -> LineItem {
        let mut line = LineItem::blank(self.default_tax_rate);
        line.unit = self.default_unit;
        line
    }

    fn recompute(&mut self) {
        self.totals = DocumentTotals::compute(&self.items, &self.discount);
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Lines in display order.
    #[inline]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the editor holds no lines. Removal stops at the last line and
    /// an empty replacement is re-seeded, so this stays false.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn discount(&self) -> &DocumentDiscount {
        &self.discount
    }

    #[inline]
    pub fn default_tax_rate(&self) -> TaxRate {
        self.default_tax_rate
    }

    #[inline]
    pub fn default_unit(&self) -> Unit {
        self.default_unit
    }

    /// Totals of the line at `index`.
    pub fn line_totals(&self, index: usize) -> Option<LineTotals> {
        self.items.get(index).map(LineItem::totals)
    }

    #[inline]
    pub fn totals(&self) -> &DocumentTotals {
        &self.totals
    }

    #[inline]
    pub fn subtotal(&self) -> Money {
        self.totals.subtotal
    }

    #[inline]
    pub fn vat_breakdown(&self) -> &[TaxBreakdownEntry] {
        &self.totals.vat_breakdown
    }

    #[inline]
    pub fn total_vat(&self) -> Money {
        self.totals.total_vat
    }

    #[inline]
    pub fn total(&self) -> Money {
        self.totals.total
    }
}

impl Default for LineItemEditor {
    fn default() -> Self {
        LineItemEditor::new(TaxRate::zero())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
