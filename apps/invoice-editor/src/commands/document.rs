//! # Document Commands
//!
//! Document-level operations: the discount, opening a saved document,
//! submitting the current one and starting over.
//!
//! ## Document Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────┐  load_document   ┌──────────┐  submit_document  ┌───────┐ │
//! │  │  Blank   │─────────────────►│ Editing  │──────────────────►│ Saved │ │
//! │  │ (1 line) │                  │          │  (validated)      │       │ │
//! │  └──────────┘◄─────────────────└──────────┘                   └───────┘ │
//! │                 reset_editor      line commands (lines.rs)              │
//! │                                   set_discount                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use billing_core::validation::{validate_document, validate_document_discount};
use tracing::{debug, info};

use super::EditorResponse;
use crate::error::ApiError;
use crate::form::DiscountForm;
use crate::payload::DocumentPayload;
use crate::state::{EditorConfig, EditorState};

/// Sets the document discount from the raw discount inputs.
///
/// A non-zero percent wins over the flat amount. The discount is taken
/// off after tax.
pub fn set_discount(state: &EditorState, form: DiscountForm) -> EditorResponse {
    let discount = form.into_discount();
    debug!(
        amount = ?discount.amount.map(|m| m.cents()),
        percent = ?discount.percent.map(|p| p.bps()),
        "set_discount command"
    );

    state.with_editor_mut(|editor| {
        editor.set_discount(discount);
        EditorResponse::from(&*editor)
    })
}

/// Opens a saved document for editing.
///
/// Lines are ordered by their stored position and get fresh ids. Stored
/// amounts are ignored and recomputed.
pub fn load_document(state: &EditorState, payload: DocumentPayload) -> EditorResponse {
    let discount = payload.discount();
    let items = payload.into_line_items();
    let count = items.len();

    state.with_editor_mut(|editor| {
        editor.replace_items(items);
        editor.set_discount(discount);
        info!(
            lines = count,
            total = editor.total().cents(),
            "Document loaded"
        );
        EditorResponse::from(&*editor)
    })
}

/// Validates the open document and returns what should be persisted,
/// tagged with the configured tenant and currency.
///
/// ## Errors
/// - `VALIDATION_ERROR` naming the first invalid line (1-based)
/// - `VALIDATION_ERROR` for a negative or out-of-range discount
pub fn submit_document(
    state: &EditorState,
    config: &EditorConfig,
) -> Result<DocumentPayload, ApiError> {
    debug!("submit_document command");

    state.with_editor(|editor| {
        validate_document(editor.items())?;
        validate_document_discount(editor.discount())?;

        let payload = DocumentPayload::from_editor(editor).tagged(config);
        info!(
            tenant_id = %payload.tenant_id,
            lines = payload.lines.len(),
            total = payload.total.cents(),
            "Document submitted"
        );
        Ok(payload)
    })
}

/// Discards the open document and starts a blank one.
pub fn reset_editor(state: &EditorState, config: &EditorConfig) -> EditorResponse {
    debug!("reset_editor command");
    state.reset(config);
    state.with_editor(|editor| EditorResponse::from(editor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::update_line_form;
    use crate::error::ErrorCode;
    use crate::form::LineForm;
    use billing_core::{DiscountRate, Money};

    fn priced(state: &EditorState, index: usize, description: &str, price: &str) {
        update_line_form(
            state,
            index,
            LineForm {
                description: Some(description.to_string()),
                unit_price: Some(price.to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    }

    #[test]
    fn test_percent_discount_wins_over_amount() {
        let state = EditorState::new(&EditorConfig::default());
        priced(&state, 0, "Design", "100");

        let response = set_discount(
            &state,
            DiscountForm {
                amount: Some("5".to_string()),
                percent: Some("10".to_string()),
            },
        );
        // 10% of the 100.00 subtotal
        assert_eq!(response.totals.discount.cents(), 1000);
        assert_eq!(response.totals.total.cents(), 11000);
    }

    #[test]
    fn test_flat_discount_after_tax() {
        let state = EditorState::new(&EditorConfig::default());
        priced(&state, 0, "Design", "100");

        let response = set_discount(
            &state,
            DiscountForm {
                amount: Some("20".to_string()),
                percent: None,
            },
        );
        assert_eq!(response.totals.total_vat.cents(), 2000);
        assert_eq!(response.totals.total.cents(), 10000);
    }

    #[test]
    fn test_submit_rejects_line_without_description() {
        let state = EditorState::new(&EditorConfig::default());
        priced(&state, 0, "Design", "100");
        crate::commands::add_line(&state);

        let err = submit_document(&state, &EditorConfig::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.starts_with("Line 2:"));
    }

    #[test]
    fn test_submit_then_load_round_trip() {
        let state = EditorState::new(&EditorConfig::default());
        priced(&state, 0, "Design", "100");
        set_discount(
            &state,
            DiscountForm {
                amount: None,
                percent: Some("10".to_string()),
            },
        );
        let saved = submit_document(&state, &EditorConfig::default()).unwrap();
        assert_eq!(saved.total.cents(), 11000);
        assert_eq!(saved.currency_code, "USD");
        assert_eq!(saved.discount_percent, Some(DiscountRate::from_bps(1000)));

        let other = EditorState::new(&EditorConfig::default());
        let response = load_document(&other, saved.clone());
        assert_eq!(response.items[0].description, "Design");
        assert_eq!(response.totals.total, saved.total);
        assert_ne!(response.items[0].id, get_id(&state));
    }

    fn get_id(state: &EditorState) -> String {
        state.with_editor(|editor| editor.items()[0].id.clone())
    }

    #[test]
    fn test_loading_empty_document_leaves_one_line() {
        let state = EditorState::new(&EditorConfig::default());
        let response = load_document(&state, DocumentPayload::default());
        assert_eq!(response.items.len(), 1);
    }

    #[test]
    fn test_reset_starts_over() {
        let config = EditorConfig::default();
        let state = EditorState::new(&config);
        priced(&state, 0, "Design", "100");
        crate::commands::add_line(&state);

        let response = reset_editor(&state, &config);
        assert_eq!(response.items.len(), 1);
        assert_eq!(response.totals.total, Money::zero());
    }
}
