//! UI Components
//!
//! Reusable TUI widgets for the editor.

pub mod dialogs;
pub mod editor_view;
pub mod input_field;
pub mod layout;
pub mod scroll;
pub mod statusline;
pub mod toolbar;

// Re-exports
pub use dialogs::{ConfirmDialog, PathDialog};
pub use editor_view::EditorView;
pub use scroll::ScrollState;
pub use statusline::{HelpBar, MessageType, StatusLine};
pub use toolbar::Toolbar;
