//! # billing-core: Pure Line Item Logic for Suite Billing
//!
//! This crate holds the arithmetic behind every quote and invoice form in
//! the suite, as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Suite Billing Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Quote / Invoice Form (UI)                    │   │
//! │  │    Line rows ──► Catalog picker ──► Discount ──► Totals panel   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              invoice-editor (session host)                      │   │
//! │  │    add_line, update_line, select_product, submit_document       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ billing-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │ line_item │  │  totals   │  │  editor   │  │   │
//! │  │   │   Money   │  │ LineItem  │  │ breakdown │  │ LineItem  │  │   │
//! │  │   │  rounding │  │ LineTotals│  │ discount  │  │  Editor   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Rates, quantities, units, catalog products
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`line_item`] - Line items, patches and the line calculator
//! - [`totals`] - Tax breakdown, document discount and document totals
//! - [`editor`] - The ordered line collection behind a form
//! - [`validation`] - Submission rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use billing_core::{DiscountRate, LineItemEditor, LinePatch, Money, Quantity, TaxRate};
//!
//! let mut editor = LineItemEditor::new(TaxRate::from_bps(2000));
//! editor.update_item(0, LinePatch {
//!     quantity: Some(Quantity::from_units(1)),
//!     unit_price: Some(Money::from_cents(10000)),
//!     discount: Some(Some(DiscountRate::from_bps(1000))),
//!     ..Default::default()
//! });
//! editor.add_item();
//! editor.update_item(1, LinePatch {
//!     unit_price: Some(Money::from_cents(5000)),
//!     tax_rate: Some(TaxRate::from_bps(550)),
//!     ..Default::default()
//! });
//!
//! assert_eq!(editor.subtotal().cents(), 14000);
//! assert_eq!(editor.total_vat().cents(), 2075);
//! assert_eq!(editor.total().cents(), 16075);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod editor;
pub mod error;
pub mod line_item;
pub mod money;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use editor::LineItemEditor;
pub use error::{CoreError, CoreResult, ValidationError};
pub use line_item::{LineItem, LinePatch, LineTotals};
pub use money::Money;
pub use totals::{tax_breakdown, DocumentDiscount, DocumentTotals, TaxBreakdownEntry};
pub use types::*;
