//! # Editor Commands
//!
//! Everything the form UI can ask of the editor.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (response type, exports)
//! ├── lines.rs     ◄─── Add / remove / edit / reorder lines
//! ├── document.rs  ◄─── Discount, load, submit, reset
//! └── config.rs    ◄─── Read / reload configuration
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Form UI                                                                │
//! │  ───────                                                                │
//! │  updateLineForm(1, { quantity: "2,5" })                                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  commands::update_line_form(&state, 1, form)                            │
//! │         │   coerce ─► LinePatch ─► editor.update_item ─► recompute      │
//! │         ▼                                                               │
//! │  Result<EditorResponse, ApiError>                                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  UI re-renders lines, per-line totals, breakdown and grand total        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutating command answers with the full [`EditorResponse`], so the
//! UI never computes anything itself.

mod config;
mod document;
mod lines;

pub use config::*;
pub use document::*;
pub use lines::*;

use billing_core::{CoreError, DocumentTotals, LineItem, LineItemEditor, LineTotals};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Editor response including lines, per-line amounts and document totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorResponse {
    pub items: Vec<LineItem>,
    /// Same order as `items`.
    pub line_totals: Vec<LineTotals>,
    pub totals: DocumentTotals,
}

impl From<&LineItemEditor> for EditorResponse {
    fn from(editor: &LineItemEditor) -> Self {
        EditorResponse {
            items: editor.items().to_vec(),
            line_totals: editor.items().iter().map(LineTotals::of).collect(),
            totals: editor.totals().clone(),
        }
    }
}

/// Fails with `NOT_FOUND` unless `index` addresses an existing line.
fn ensure_line(editor: &LineItemEditor, index: usize) -> Result<(), ApiError> {
    if index < editor.len() {
        Ok(())
    } else {
        Err(CoreError::LineNotFound {
            index,
            len: editor.len(),
        }
        .into())
    }
}
