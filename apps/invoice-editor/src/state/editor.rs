//! # Editor State
//!
//! Holds the line item editor of one open form.
//!
//! ## Thread Safety
//! The editor is wrapped in `Arc<Mutex<T>>` so a host that dispatches
//! commands from several threads still applies them one at a time. Each
//! command runs to completion, totals included, before the lock is released.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use billing_core::LineItemEditor;

use super::EditorConfig;

/// Shared handle to one form's editor.
#[derive(Debug, Clone)]
pub struct EditorState {
    editor: Arc<Mutex<LineItemEditor>>,
}

impl EditorState {
    /// Creates a state holding a fresh editor seeded from `config`.
    pub fn new(config: &EditorConfig) -> Self {
        EditorState {
            editor: Arc::new(Mutex::new(fresh_editor(config))),
        }
    }

    /// Executes a function with read access to the editor.
    ///
    /// ## Usage
    /// ```rust
    /// use invoice_editor::state::{EditorConfig, EditorState};
    ///
    /// let state = EditorState::new(&EditorConfig::default());
    /// let lines = state.with_editor(|editor| editor.len());
    /// assert_eq!(lines, 1);
    /// ```
    pub fn with_editor<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&LineItemEditor) -> R,
    {
        let editor = self.lock();
        f(&editor)
    }

    /// Executes a function with write access to the editor.
    pub fn with_editor_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut LineItemEditor) -> R,
    {
        let mut editor = self.lock();
        f(&mut editor)
    }

    /// Discards the current document and starts over with one blank line.
    pub fn reset(&self, config: &EditorConfig) {
        *self.lock() = fresh_editor(config);
    }

    // A panic inside a command leaves the editor itself consistent (every
    // mutation recomputes before returning), so a poisoned lock is reused.
    fn lock(&self) -> MutexGuard<'_, LineItemEditor> {
        self.editor.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

fn fresh_editor(config: &EditorConfig) -> LineItemEditor {
    let mut editor = LineItemEditor::new(config.default_tax_rate);
    editor.set_default_unit(config.default_unit);
    // re-seed the first line so it carries the configured unit too
    editor.replace_items(Vec::new());
    editor
}
