//! # Config Commands
//!
//! Reading the editor configuration and applying a reloaded one to the
//! open document.

use tracing::{debug, info};

use super::EditorResponse;
use crate::state::{EditorConfig, EditorState};

/// Gets the current editor configuration.
///
/// ## When Used
/// - Form startup (currency symbol, default tax rate)
/// - Rendering amounts with [`EditorConfig::format_currency`]
pub fn get_config(config: &EditorConfig) -> EditorConfig {
    debug!("get_config command");
    config.clone()
}

/// Applies a reloaded configuration to the open document.
///
/// Only lines added afterwards pick up the new default tax rate and unit;
/// existing lines and totals are left as they are.
pub fn apply_config(state: &EditorState, config: &EditorConfig) -> EditorResponse {
    info!(
        default_tax_rate = %config.default_tax_rate,
        default_unit = %config.default_unit,
        "Applying editor configuration"
    );

    state.with_editor_mut(|editor| {
        editor.set_default_tax_rate(config.default_tax_rate);
        editor.set_default_unit(config.default_unit);
        EditorResponse::from(&*editor)
    })
}
