//! # Invoice Editor Host
//!
//! Host layer for the quote/invoice line item editor. Holds the editor
//! session, exposes it as commands, coerces raw form input and produces
//! the payload persisted by the backend.
//!
//! ## Module Organization
//! ```text
//! invoice_editor/
//! ├── lib.rs          ◄─── You are here (tracing setup, draft runner)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── editor.rs   ◄─── Editor session (Arc<Mutex<LineItemEditor>>)
//! │   └── config.rs   ◄─── Configuration (env + defaults)
//! ├── commands/
//! │   ├── mod.rs      ◄─── EditorResponse, exports
//! │   ├── lines.rs    ◄─── Line commands
//! │   ├── document.rs ◄─── Discount, load, submit, reset
//! │   └── config.rs   ◄─── Read / reload configuration
//! ├── form.rs         ◄─── Raw input coercion
//! ├── payload.rs      ◄─── Persistence hand-off shape
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! All arithmetic lives in `billing-core`; nothing here computes an amount.

pub mod commands;
pub mod error;
pub mod form;
pub mod payload;
pub mod state;

use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::EnvFilter;

use error::ApiError;
use form::{DiscountForm, LineForm};
use payload::DocumentPayload;
use state::{EditorConfig, EditorState};

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so stdout stays reserved for command output.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every command
/// - `RUST_LOG=invoice_editor=trace` - Trace for this crate only
/// - Default: INFO level
///
/// Calling it again is harmless: the first subscriber stays installed.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// A complete document as typed into the form, in one JSON object.
///
/// ```json
/// {
///   "lines": [
///     { "description": "Design", "unitPrice": "100", "discountPercent": "10" },
///     { "description": "Printing", "unitPrice": "50", "taxRate": "5.5" }
///   ],
///   "discountPercent": "10"
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    #[serde(default)]
    pub lines: Vec<LineForm>,
    #[serde(default)]
    pub discount_amount: Option<String>,
    #[serde(default)]
    pub discount_percent: Option<String>,
}

/// Runs a JSON draft through a fresh editor and returns the validated
/// payload.
///
/// Lines start from the configured defaults, so a line without a
/// `taxRate` gets the default rate.
pub fn run_draft(input: &str, config: &EditorConfig) -> Result<DocumentPayload, ApiError> {
    let draft: Draft = serde_json::from_str(input)?;
    info!(lines = draft.lines.len(), "Running draft");

    let state = EditorState::new(config);
    for (index, line) in draft.lines.into_iter().enumerate() {
        if index > 0 {
            commands::add_line(&state);
        }
        commands::update_line_form(&state, index, line)?;
    }

    commands::set_discount(
        &state,
        DiscountForm {
            amount: draft.discount_amount,
            percent: draft.discount_percent,
        },
    );
    commands::submit_document(&state, config)
}
