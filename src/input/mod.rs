//! Input Module
//!
//! Handles keyboard input with vim-style modal editing.

pub mod keymap;
pub mod modes;
pub mod observer;
pub mod text_buffer;
pub mod vim;

// Re-exports
pub use modes::{InputMode, ModeState, VimMode};
pub use observer::{ModalStatus, Subscription};
pub use text_buffer::{handle_text_key, TextBuffer, TextEditing};
pub use vim::{Vim, VimOutcome};
