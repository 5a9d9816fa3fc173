//! Input Modes
//!
//! Vim editing modes plus the application-level overlays (command line,
//! path prompt, confirmation) that temporarily take over the keyboard.

use super::{TextBuffer, TextEditing};

/// Editing mode of the modal layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VimMode {
    #[default]
    Normal,
    Insert,
    Visual,
    VisualLine,
}

impl VimMode {
    pub fn indicator(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Insert => "INSERT",
            Self::Visual => "VISUAL",
            Self::VisualLine => "V-LINE",
        }
    }

    pub fn is_visual(&self) -> bool {
        matches!(self, Self::Visual | Self::VisualLine)
    }
}

/// Who currently receives keystrokes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Keys go to the editor and its modal layer
    Editing,
    Command,
    Prompt,
    Confirm,
}

impl InputMode {
    /// Overlay indicator; `None` means the editor's own mode is shown.
    pub fn indicator(&self) -> Option<&'static str> {
        match self {
            Self::Editing => None,
            Self::Command => Some("COMMAND"),
            Self::Prompt => Some("PROMPT"),
            Self::Confirm => Some("CONFIRM"),
        }
    }
}

/// Mode state with the line buffer used by text overlays
#[derive(Debug, Clone)]
pub struct ModeState {
    pub mode: InputMode,
    pub buffer: TextBuffer,
}

impl Default for ModeState {
    fn default() -> Self {
        Self {
            mode: InputMode::Editing,
            buffer: TextBuffer::new(),
        }
    }
}

impl ModeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_mode(&mut self, mode: InputMode) {
        self.mode = mode;
        self.buffer.clear();
    }

    pub fn to_editing(&mut self) {
        self.set_mode(InputMode::Editing);
    }

    pub fn to_command(&mut self) {
        self.set_mode(InputMode::Command);
    }

    /// Opens the path prompt pre-filled with `initial`
    pub fn to_prompt(&mut self, initial: &str) {
        self.mode = InputMode::Prompt;
        self.buffer = TextBuffer::with_content(initial);
    }

    pub fn to_confirm(&mut self) {
        self.set_mode(InputMode::Confirm);
    }

    pub fn get_buffer(&self) -> &str {
        self.buffer.content()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_transitions() {
        let mut state = ModeState::new();
        assert_eq!(state.mode, InputMode::Editing);

        state.to_command();
        assert_eq!(state.mode, InputMode::Command);

        state.to_editing();
        assert_eq!(state.mode, InputMode::Editing);
    }

    #[test]
    fn test_command_mode_input() {
        let mut state = ModeState::new();
        state.to_command();
        for c in "wq".chars() {
            state.buffer.insert_char(c);
        }
        assert_eq!(state.get_buffer(), "wq");

        state.to_editing();
        assert_eq!(state.get_buffer(), "");
    }

    #[test]
    fn test_prompt_prefill() {
        let mut state = ModeState::new();
        state.to_prompt("document.md");
        assert_eq!(state.get_buffer(), "document.md");
        assert_eq!(state.buffer.cursor(), 11);

        state.buffer.delete_word();
        state.buffer.delete_word();
        assert_eq!(state.get_buffer(), "");
    }

    #[test]
    fn test_indicators() {
        assert_eq!(VimMode::Normal.indicator(), "NORMAL");
        assert_eq!(VimMode::VisualLine.indicator(), "V-LINE");
        assert_eq!(InputMode::Editing.indicator(), None);
        assert_eq!(InputMode::Prompt.indicator(), Some("PROMPT"));
    }

    #[test]
    fn test_is_visual() {
        assert!(VimMode::Visual.is_visual());
        assert!(VimMode::VisualLine.is_visual());
        assert!(!VimMode::Insert.is_visual());
    }
}
