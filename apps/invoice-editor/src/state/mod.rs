//! # State Module
//!
//! Session state for the editor host.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────┐        ┌──────────────────────────┐      │
//! │  │      EditorState         │        │      EditorConfig        │      │
//! │  │                          │        │                          │      │
//! │  │  Arc<Mutex<              │        │  tenant_id               │      │
//! │  │    LineItemEditor        │        │  currency                │      │
//! │  │  >>                      │        │  default tax rate / unit │      │
//! │  └──────────────────────────┘        └──────────────────────────┘      │
//! │                                                                         │
//! │  • EditorState: one per open form, exclusive access per command        │
//! │  • EditorConfig: read-only after initialization                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod editor;

pub use config::EditorConfig;
pub use editor::EditorState;
