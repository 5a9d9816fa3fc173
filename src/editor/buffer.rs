//! Document Buffer
//!
//! Thin adapter over the `tui-textarea` engine, which owns the lines, the
//! cursor and the undo history. Positions are `(row, col)` with `col`
//! counted in chars, matching the engine.

use crossterm::event::KeyEvent;
use tui_textarea::{CursorMove, TextArea};

pub type Pos = (usize, usize);

/// Undo depth kept by the engine
const MAX_HISTORY: usize = 200;

pub struct DocumentBuffer {
    area: TextArea<'static>,
    dirty: bool,
}

fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(String::from).collect()
}

/// CRLF line endings become LF
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n")
}

fn clamp_u16(n: usize) -> u16 {
    n.min(u16::MAX as usize) as u16
}

impl DocumentBuffer {
    pub fn new(text: &str) -> Self {
        let mut area = TextArea::new(split_lines(text));
        area.set_max_histories(MAX_HISTORY);
        Self { area, dirty: false }
    }

    pub fn text(&self) -> String {
        self.area.lines().join("\n")
    }

    pub fn lines(&self) -> &[String] {
        self.area.lines()
    }

    pub fn line(&self, row: usize) -> &str {
        self.lines().get(row).map_or("", String::as_str)
    }

    pub fn line_len(&self, row: usize) -> usize {
        self.line(row).chars().count()
    }

    pub fn line_count(&self) -> usize {
        self.lines().len()
    }

    pub fn last_row(&self) -> usize {
        self.line_count().saturating_sub(1)
    }

    pub fn cursor(&self) -> Pos {
        self.area.cursor()
    }

    /// True once since the last call if any edit may have changed the text
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn jump(&mut self, (row, col): Pos) {
        self.area.move_cursor(CursorMove::Jump(clamp_u16(row), clamp_u16(col)));
    }

    pub fn move_cursor(&mut self, m: CursorMove) {
        self.area.move_cursor(m);
    }

    /// First non-blank column of `row`
    pub fn first_non_blank(&self, row: usize) -> usize {
        self.line(row).chars().take_while(|c| c.is_whitespace()).count()
    }

    /// Text between two positions, `end` exclusive
    pub fn slice(&self, start: Pos, end: Pos) -> String {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        let lines = self.lines();
        if start.0 >= lines.len() {
            return String::new();
        }
        if start.0 == end.0 {
            return lines[start.0]
                .chars()
                .skip(start.1)
                .take(end.1.saturating_sub(start.1))
                .collect();
        }

        let mut out: String = lines[start.0].chars().skip(start.1).collect();
        for line in &lines[start.0 + 1..end.0.min(lines.len())] {
            out.push('\n');
            out.push_str(line);
        }
        if end.0 < lines.len() {
            out.push('\n');
            out.extend(lines[end.0].chars().take(end.1));
        }
        out
    }

    /// Deletes `[start, end)` as one undoable edit and leaves the cursor at `start`
    pub fn delete_range(&mut self, start: Pos, end: Pos) -> String {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        let removed = self.slice(start, end);
        self.area.cancel_selection();
        self.jump(start);
        if removed.is_empty() {
            return removed;
        }
        self.area.start_selection();
        self.jump(end);
        self.area.cut();
        self.area.cancel_selection();
        self.dirty = true;
        removed
    }

    /// Inserts text at the cursor; newlines split lines
    pub fn insert_str(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.area.insert_str(text);
        self.dirty = true;
    }

    pub fn insert_newline(&mut self) {
        self.area.insert_newline();
        self.dirty = true;
    }

    /// Replaces the whole document as a single edit, keeping undo history.
    /// The cursor returns to its old position, clamped to the new text.
    pub fn replace_all(&mut self, text: &str) {
        let cursor = self.cursor();
        let end = (self.last_row(), self.line_len(self.last_row()));
        self.delete_range((0, 0), end);
        self.insert_str(text);
        self.jump(cursor);
        self.dirty = true;
    }

    /// Feeds a key to the engine's own editing keymap (insert mode)
    pub fn input(&mut self, key: KeyEvent) {
        self.area.input(key);
        self.dirty = true;
    }

    pub fn undo(&mut self) -> bool {
        let changed = self.area.undo();
        self.dirty |= changed;
        changed
    }

    pub fn redo(&mut self) -> bool {
        let changed = self.area.redo();
        self.dirty |= changed;
        changed
    }
}
