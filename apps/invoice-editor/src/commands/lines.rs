//! # Line Commands
//!
//! Adding, removing, editing and reordering the lines of the open document.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  #  Description        Qty  Unit   Price    Disc  Tax     Net           │
//! │  ─  ─────────────────  ───  ─────  ───────  ────  ─────   ───────       │
//! │  1  Design             1    unit   100.00   10%   20%      90.00        │
//! │  2  Printing           1    unit    50.00         5.5%     50.00        │
//! │                                                                         │
//! │  [+ Add line]          update_line_form / select_product / move_line    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A line index past the end is a `NOT_FOUND` error. Removing the only
//! remaining line is not an error: the document is returned unchanged.

use billing_core::{CatalogProduct, LinePatch};
use tracing::debug;

use super::{ensure_line, EditorResponse};
use crate::error::ApiError;
use crate::form::LineForm;
use crate::state::EditorState;

/// Gets the current lines and totals.
pub fn get_editor(state: &EditorState) -> EditorResponse {
    debug!("get_editor command");
    state.with_editor(|editor| EditorResponse::from(editor))
}

/// Appends a blank line at the default tax rate and unit.
pub fn add_line(state: &EditorState) -> EditorResponse {
    state.with_editor_mut(|editor| {
        editor.add_item();
        debug!(lines = editor.len(), "add_line command");
        EditorResponse::from(&*editor)
    })
}

/// Removes the line at `index`.
///
/// ## Behavior
/// - Last remaining line: kept, unchanged response
/// - Unknown index: `NOT_FOUND`
pub fn remove_line(state: &EditorState, index: usize) -> Result<EditorResponse, ApiError> {
    debug!(index, "remove_line command");

    state.with_editor_mut(|editor| {
        ensure_line(editor, index)?;
        if !editor.remove_item(index) {
            debug!(index, "Refusing to remove the last line");
        }
        Ok(EditorResponse::from(&*editor))
    })
}

/// Applies a typed patch to the line at `index`.
pub fn update_line(
    state: &EditorState,
    index: usize,
    patch: LinePatch,
) -> Result<EditorResponse, ApiError> {
    debug!(index, empty = patch.is_empty(), "update_line command");

    state.with_editor_mut(|editor| {
        ensure_line(editor, index)?;
        editor.update_item(index, patch);
        Ok(EditorResponse::from(&*editor))
    })
}

/// Applies raw form input to the line at `index`.
///
/// Unparsable values are coerced to their safe defaults first
/// (see [`crate::form`]).
pub fn update_line_form(
    state: &EditorState,
    index: usize,
    form: LineForm,
) -> Result<EditorResponse, ApiError> {
    debug!(index, "update_line_form command");
    update_line(state, index, form.into_patch())
}

/// Fills the line at `index` from a catalog product.
///
/// Description, price, unit and tax rate come from the product; a
/// tax-exempt product gets a 0% rate.
pub fn select_product(
    state: &EditorState,
    index: usize,
    product: &CatalogProduct,
) -> Result<EditorResponse, ApiError> {
    debug!(index, product_id = %product.id, "select_product command");

    state.with_editor_mut(|editor| {
        ensure_line(editor, index)?;
        editor.select_product(index, product);
        Ok(EditorResponse::from(&*editor))
    })
}

/// Moves the line at `from` to position `to`.
pub fn move_line(state: &EditorState, from: usize, to: usize) -> Result<EditorResponse, ApiError> {
    debug!(from, to, "move_line command");

    state.with_editor_mut(|editor| {
        ensure_line(editor, from)?;
        ensure_line(editor, to)?;
        editor.move_item(from, to);
        Ok(EditorResponse::from(&*editor))
    })
}
