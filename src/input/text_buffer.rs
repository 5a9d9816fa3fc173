//! Text Buffer
//!
//! Single-line editing buffer with cursor management, used by the command
//! line and the path prompt.

use crossterm::event::{KeyCode, KeyModifiers};

/// Trait for single-line text editing operations.
///
/// Cursor positions count chars, not bytes.
pub trait TextEditing {
    fn content(&self) -> &str;
    fn cursor(&self) -> usize;
    fn insert_char(&mut self, c: char);
    fn delete_char(&mut self);
    fn delete_char_forward(&mut self);
    fn delete_word(&mut self);
    fn clear_to_start(&mut self);
    fn clear(&mut self);
    fn cursor_left(&mut self);
    fn cursor_right(&mut self);
    fn cursor_home(&mut self);
    fn cursor_end(&mut self);
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool;
}

/// Handle common text input keys, returns true if key was handled
pub fn handle_text_key<T: TextEditing>(buf: &mut T, code: KeyCode, mods: KeyModifiers) -> bool {
    match (code, mods) {
        (KeyCode::Backspace, KeyModifiers::CONTROL | KeyModifiers::ALT) => buf.delete_word(),
        (KeyCode::Char('w'), KeyModifiers::CONTROL) => buf.delete_word(),
        (KeyCode::Backspace, _) => buf.delete_char(),
        (KeyCode::Delete, _) => buf.delete_char_forward(),
        (KeyCode::Char('a'), KeyModifiers::CONTROL) | (KeyCode::Home, _) => buf.cursor_home(),
        (KeyCode::Char('e'), KeyModifiers::CONTROL) | (KeyCode::End, _) => buf.cursor_end(),
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => buf.clear_to_start(),
        (KeyCode::Left, _) => buf.cursor_left(),
        (KeyCode::Right, _) => buf.cursor_right(),
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => buf.insert_char(c),
        _ => return false,
    }
    true
}

/// Char index of the start of the word before `from`.
pub fn find_word_boundary_back(s: &str, from: usize) -> usize {
    let chars: Vec<char> = s.chars().take(from).collect();
    let mut pos = chars.len();
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let is_punct = |c: char| !c.is_whitespace() && !is_word(c);

    while pos > 0 && chars[pos - 1].is_whitespace() {
        pos -= 1;
    }
    if pos == 0 {
        return 0;
    }

    if is_word(chars[pos - 1]) {
        while pos > 0 && is_word(chars[pos - 1]) {
            pos -= 1;
        }
    } else {
        // Path separators count as punctuation: `/tmp/` goes back to `/`
        while pos > 0 && is_punct(chars[pos - 1]) {
            pos -= 1;
        }
        while pos > 0 && is_word(chars[pos - 1]) {
            pos -= 1;
        }
    }
    pos
}

fn byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices().nth(char_idx).map_or(s.len(), |(i, _)| i)
}

#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    content: String,
    cursor: usize,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(content: impl Into<String>) -> Self {
        let content = content.into();
        let cursor = content.chars().count();
        Self { content, cursor }
    }

    #[cfg(test)]
    pub fn set_cursor(&mut self, pos: usize) {
        self.cursor = pos.min(self.len());
    }
}

impl TextEditing for TextBuffer {
    fn content(&self) -> &str {
        &self.content
    }

    fn cursor(&self) -> usize {
        self.cursor
    }

    fn len(&self) -> usize {
        self.content.chars().count()
    }

    fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    fn insert_char(&mut self, c: char) {
        let at = byte_index(&self.content, self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
    }

    fn delete_char(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = byte_index(&self.content, self.cursor);
        self.content.remove(at);
    }

    fn delete_char_forward(&mut self) {
        if self.cursor >= self.len() {
            return;
        }
        let at = byte_index(&self.content, self.cursor);
        self.content.remove(at);
    }

    fn delete_word(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let new_cursor = find_word_boundary_back(&self.content, self.cursor);
        let start = byte_index(&self.content, new_cursor);
        let end = byte_index(&self.content, self.cursor);
        self.content.drain(start..end);
        self.cursor = new_cursor;
    }

    fn clear_to_start(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let end = byte_index(&self.content, self.cursor);
        self.content.drain(..end);
        self.cursor = 0;
    }

    fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn cursor_right(&mut self) {
        if self.cursor < self.len() {
            self.cursor += 1;
        }
    }

    fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    fn cursor_end(&mut self) {
        self.cursor = self.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_delete() {
        let mut buf = TextBuffer::new();
        buf.insert_char('w');
        buf.insert_char('q');
        assert_eq!(buf.content(), "wq");
        assert_eq!(buf.cursor(), 2);

        buf.delete_char();
        assert_eq!(buf.content(), "w");
        assert_eq!(buf.cursor(), 1);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut buf = TextBuffer::with_content("notes/é.md");
        buf.set_cursor(7);
        buf.delete_char();
        assert_eq!(buf.content(), "notes/.md");
        buf.insert_char('ü');
        assert_eq!(buf.content(), "notes/ü.md");
        assert_eq!(buf.cursor(), 7);
    }

    #[test]
    fn test_cursor_movement() {
        let mut buf = TextBuffer::with_content("draft");
        assert_eq!(buf.cursor(), 5);

        buf.cursor_home();
        assert_eq!(buf.cursor(), 0);

        buf.cursor_left();
        assert_eq!(buf.cursor(), 0);

        buf.cursor_end();
        buf.cursor_right();
        assert_eq!(buf.cursor(), 5);
    }

    #[test]
    fn test_delete_word_path_segment() {
        let mut buf = TextBuffer::with_content("w /tmp/notes");
        buf.delete_word();
        assert_eq!(buf.content(), "w /tmp/");
        buf.delete_word();
        assert_eq!(buf.content(), "w /");
    }

    #[test]
    fn test_delete_word_with_spaces() {
        let mut buf = TextBuffer::with_content("set   ");
        buf.delete_word();
        assert_eq!(buf.content(), "");
    }

    #[test]
    fn test_clear_to_start() {
        let mut buf = TextBuffer::with_content("e README.md");
        buf.set_cursor(2);
        buf.clear_to_start();
        assert_eq!(buf.content(), "README.md");
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn test_handle_text_key() {
        let mut buf = TextBuffer::new();

        assert!(handle_text_key(&mut buf, KeyCode::Char('q'), KeyModifiers::NONE));
        assert_eq!(buf.content(), "q");

        assert!(handle_text_key(&mut buf, KeyCode::Backspace, KeyModifiers::NONE));
        assert_eq!(buf.content(), "");

        assert!(!handle_text_key(&mut buf, KeyCode::Enter, KeyModifiers::NONE));
    }
}
