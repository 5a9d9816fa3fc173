//! Keymap
//!
//! Application-level bindings. Keys not bound here go to the modal layer
//! while editing, or to the line buffer while a text overlay is open.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::format::FormatAction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    ToggleLineNumbers,
    TogglePreview,
    Save,
    Open,
    Format(FormatAction),
    Submit,
    Cancel,
    Confirm,
}

/// Bindings active in every editing mode, insert included
pub fn global_action(key: KeyEvent) -> Option<Action> {
    let action = match (key.code, key.modifiers) {
        (KeyCode::F(2), _) => Action::ToggleLineNumbers,
        (KeyCode::F(3), _) => Action::TogglePreview,
        (KeyCode::Char('s'), KeyModifiers::CONTROL) => Action::Save,
        (KeyCode::Char('o'), KeyModifiers::CONTROL) => Action::Open,
        (KeyCode::Char(c), KeyModifiers::ALT) => Action::Format(format_binding(c)?),
        _ => return None,
    };
    Some(action)
}

fn format_binding(c: char) -> Option<FormatAction> {
    match c {
        'b' => Some(FormatAction::Bold),
        'i' => Some(FormatAction::Italic),
        'u' => Some(FormatAction::Underline),
        '1' => Some(FormatAction::Heading1),
        '2' => Some(FormatAction::Heading2),
        '0' => Some(FormatAction::Clear),
        _ => None,
    }
}

/// Command line and path prompt. `Action::None` means the key edits the line.
pub fn text_input_action(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Enter, _) => Action::Submit,
        (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Cancel,
        _ => Action::None,
    }
}

pub fn confirm_action(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Action::Confirm,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Char('q') | KeyCode::Esc => Action::Cancel,
        _ => Action::None,
    }
}
