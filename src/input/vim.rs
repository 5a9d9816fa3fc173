//! Vim Layer
//!
//! Normal, insert and visual mode keys mapped onto [`DocumentBuffer`]
//! operations. Counts, the `d`/`c`/`y` operators with motions, linewise
//! doubles (`dd`, `yy`, `cc`) and the unnamed register are supported.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_textarea::CursorMove;

use crate::editor::buffer::{DocumentBuffer, Pos};

use super::observer::{ModalObserver, ModalStatus, Subscription};
use super::VimMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Delete,
    Change,
    Yank,
}

impl Operator {
    fn from_char(c: char) -> Option<Self> {
        match c {
            'd' => Some(Self::Delete),
            'c' => Some(Self::Change),
            'y' => Some(Self::Yank),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Motion {
    Left,
    Right,
    Up,
    Down,
    WordForward,
    WordBack,
    WordEnd,
    LineStart,
    FirstNonBlank,
    LineEnd,
    FileStart,
    FileEnd,
    ParagraphForward,
    ParagraphBack,
}

impl Motion {
    fn from_key(code: KeyCode) -> Option<Self> {
        let motion = match code {
            KeyCode::Char('h') | KeyCode::Left | KeyCode::Backspace => Self::Left,
            KeyCode::Char('l') | KeyCode::Right | KeyCode::Char(' ') => Self::Right,
            KeyCode::Char('k') | KeyCode::Up => Self::Up,
            KeyCode::Char('j') | KeyCode::Down => Self::Down,
            KeyCode::Char('w') => Self::WordForward,
            KeyCode::Char('b') => Self::WordBack,
            KeyCode::Char('e') => Self::WordEnd,
            KeyCode::Char('0') | KeyCode::Home => Self::LineStart,
            KeyCode::Char('^') => Self::FirstNonBlank,
            KeyCode::Char('$') | KeyCode::End => Self::LineEnd,
            KeyCode::Char('G') => Self::FileEnd,
            KeyCode::Char('}') => Self::ParagraphForward,
            KeyCode::Char('{') => Self::ParagraphBack,
            _ => return None,
        };
        Some(motion)
    }

    fn is_linewise(self) -> bool {
        matches!(self, Self::Up | Self::Down | Self::FileStart | Self::FileEnd)
    }

    /// Operator ranges include the char the motion lands on
    fn is_inclusive(self) -> bool {
        self == Self::WordEnd
    }
}

/// Largest count accepted before a command
const MAX_COUNT: usize = 10_000;

/// Unnamed register
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Register {
    pub text: String,
    pub linewise: bool,
}

#[derive(Debug, Default)]
struct Pending {
    count: Option<usize>,
    operator: Option<(Operator, usize)>,
    g: bool,
    replace: bool,
    keys: String,
}

impl Pending {
    fn take_count(&mut self) -> usize {
        self.count.take().unwrap_or(1)
    }

    fn push_digit(&mut self, digit: usize) {
        let count = self.count.unwrap_or(0).saturating_mul(10).saturating_add(digit);
        self.count = Some(count.min(MAX_COUNT));
    }

    fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// What the caller should do after a key was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VimOutcome {
    Handled,
    /// `:` pressed; in visual mode the selection stays until the command ran
    CommandLine,
    /// `gx` pressed: follow the link under the cursor
    FollowLink,
    Ignored,
}

pub struct Vim {
    mode: VimMode,
    pending: Pending,
    anchor: Pos,
    register: Register,
    page_height: usize,
    observer: ModalObserver,
}

impl Default for Vim {
    fn default() -> Self {
        Self::new()
    }
}

fn plain(mods: KeyModifiers) -> bool {
    mods == KeyModifiers::NONE || mods == KeyModifiers::SHIFT
}

impl Vim {
    pub fn new() -> Self {
        Self {
            mode: VimMode::Normal,
            pending: Pending::default(),
            anchor: (0, 0),
            register: Register::default(),
            page_height: 20,
            observer: ModalObserver::new(),
        }
    }

    pub fn mode(&self) -> VimMode {
        self.mode
    }

    #[cfg(test)]
    pub fn pending_keys(&self) -> &str {
        &self.pending.keys
    }

    #[cfg(test)]
    pub fn register(&self) -> &Register {
        &self.register
    }

    pub fn set_page_height(&mut self, height: usize) {
        self.page_height = height.max(2);
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&ModalStatus) + 'static) -> Subscription {
        self.observer.subscribe(listener)
    }

    /// Delivers the status accumulated since the last frame
    pub fn flush(&mut self) -> bool {
        self.observer.flush()
    }

    fn set_mode(&mut self, mode: VimMode) {
        self.mode = mode;
        self.pending = Pending::default();
    }

    fn publish(&mut self) {
        self.observer.publish(ModalStatus {
            mode: self.mode,
            pending: self.pending.keys.clone(),
        });
    }

    /// Selected range with exclusive end, in visual modes only
    pub fn selection(&self, buf: &DocumentBuffer) -> Option<(Pos, Pos)> {
        let cursor = buf.cursor();
        let (start, end) = if self.anchor <= cursor { (self.anchor, cursor) } else { (cursor, self.anchor) };
        match self.mode {
            VimMode::Visual => {
                let end = if end.1 >= buf.line_len(end.0) && end.0 < buf.last_row() {
                    (end.0 + 1, 0)
                } else {
                    (end.0, (end.1 + 1).min(buf.line_len(end.0)))
                };
                Some((start, end))
            }
            VimMode::VisualLine => Some(((start.0, 0), (end.0, buf.line_len(end.0)))),
            VimMode::Normal | VimMode::Insert => None,
        }
    }

    /// Leaves visual mode, e.g. after an external edit replaced the selection
    pub fn exit_visual(&mut self, buf: &mut DocumentBuffer) {
        if self.mode.is_visual() {
            self.set_mode(VimMode::Normal);
            self.clamp_cursor(buf);
            self.publish();
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, buf: &mut DocumentBuffer) -> VimOutcome {
        let outcome = match self.mode {
            VimMode::Insert => self.handle_insert(key, buf),
            VimMode::Normal | VimMode::Visual | VimMode::VisualLine => self.handle_command_key(key, buf),
        };
        self.publish();
        outcome
    }

    fn handle_insert(&mut self, key: KeyEvent, buf: &mut DocumentBuffer) -> VimOutcome {
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                self.set_mode(VimMode::Normal);
                if buf.cursor().1 > 0 {
                    buf.move_cursor(CursorMove::Back);
                }
            }
            _ => buf.input(key),
        }
        VimOutcome::Handled
    }

    fn handle_command_key(&mut self, key: KeyEvent, buf: &mut DocumentBuffer) -> VimOutcome {
        let (code, mods) = (key.code, key.modifiers);

        if code == KeyCode::Esc {
            let was_visual = self.mode.is_visual();
            self.set_mode(VimMode::Normal);
            if was_visual {
                self.clamp_cursor(buf);
            }
            return VimOutcome::Handled;
        }

        if mods == KeyModifiers::CONTROL {
            return self.handle_ctrl(code, buf);
        }
        if !plain(mods) {
            return VimOutcome::Ignored;
        }

        if self.pending.replace {
            if let KeyCode::Char(c) = code {
                self.replace_char(c, buf);
            }
            self.pending = Pending::default();
            return VimOutcome::Handled;
        }

        if self.pending.g {
            return self.handle_g(code, buf);
        }

        if let KeyCode::Char(c @ '0'..='9') = code {
            if c != '0' || self.pending.count.is_some() {
                self.pending.push_digit(c as usize - '0' as usize);
                self.pending.keys.push(c);
                return VimOutcome::Handled;
            }
        }

        if let Some(motion) = Motion::from_key(code) {
            self.handle_motion(motion, buf);
            return VimOutcome::Handled;
        }

        let KeyCode::Char(c) = code else {
            self.pending = Pending::default();
            return VimOutcome::Ignored;
        };

        if let Some(op) = Operator::from_char(c) {
            return self.handle_operator_key(op, c, buf);
        }

        if self.mode.is_visual() {
            return self.handle_visual_command(c, buf);
        }
        self.handle_normal_command(c, buf)
    }

    fn handle_ctrl(&mut self, code: KeyCode, buf: &mut DocumentBuffer) -> VimOutcome {
        let half = self.page_height / 2;
        let (row, col) = buf.cursor();
        match code {
            KeyCode::Char('r') if self.mode == VimMode::Normal => {
                buf.redo();
            }
            KeyCode::Char('d') => buf.jump(((row + half).min(buf.last_row()), col)),
            KeyCode::Char('u') => buf.jump((row.saturating_sub(half), col)),
            _ => {
                self.pending = Pending::default();
                return VimOutcome::Ignored;
            }
        }
        self.pending = Pending::default();
        self.clamp_cursor(buf);
        VimOutcome::Handled
    }

    fn handle_g(&mut self, code: KeyCode, buf: &mut DocumentBuffer) -> VimOutcome {
        self.pending.g = false;
        match code {
            KeyCode::Char('g') => {
                self.handle_motion(Motion::FileStart, buf);
                VimOutcome::Handled
            }
            KeyCode::Char('x') if self.pending.operator.is_none() => {
                self.pending = Pending::default();
                VimOutcome::FollowLink
            }
            _ => {
                self.pending = Pending::default();
                VimOutcome::Ignored
            }
        }
    }

    fn handle_operator_key(&mut self, op: Operator, c: char, buf: &mut DocumentBuffer) -> VimOutcome {
        if self.mode.is_visual() {
            self.apply_visual(op, buf);
            return VimOutcome::Handled;
        }

        match self.pending.operator {
            Some((pending_op, op_count)) if pending_op == op => {
                let lines = op_count.saturating_mul(self.pending.take_count()).min(MAX_COUNT);
                let row = buf.cursor().0;
                let last = row.saturating_add(lines - 1).min(buf.last_row());
                self.pending = Pending::default();
                self.apply_linewise(op, row, last, buf);
            }
            Some(_) => self.pending = Pending::default(),
            None => {
                let count = self.pending.take_count();
                self.pending.operator = Some((op, count));
                self.pending.keys.push(c);
            }
        }
        VimOutcome::Handled
    }

    fn handle_motion(&mut self, motion: Motion, buf: &mut DocumentBuffer) {
        let explicit_count = self.pending.count.is_some();
        let count = self.pending.take_count();

        let Some((op, op_count)) = self.pending.operator else {
            self.run_motion(motion, count, explicit_count, buf);
            self.pending = Pending::default();
            if self.mode == VimMode::Normal {
                self.clamp_cursor(buf);
            }
            return;
        };
        self.pending = Pending::default();

        // `cw` changes to the end of the word, like `ce`
        let motion = if op == Operator::Change && motion == Motion::WordForward {
            Motion::WordEnd
        } else {
            motion
        };

        let start = buf.cursor();
        self.run_motion(motion, count.saturating_mul(op_count).min(MAX_COUNT), explicit_count, buf);
        let mut end = buf.cursor();

        if motion.is_linewise() {
            let (first, last) = if start.0 <= end.0 { (start.0, end.0) } else { (end.0, start.0) };
            buf.jump(start);
            self.apply_linewise(op, first, last, buf);
            return;
        }

        if motion == Motion::WordForward && end.0 > start.0 {
            end = (start.0, buf.line_len(start.0));
        }
        if motion.is_inclusive() && end >= start {
            end = (end.0, (end.1 + 1).min(buf.line_len(end.0)));
        }
        self.apply_charwise(op, start, end, buf);
    }

    fn run_motion(&mut self, motion: Motion, count: usize, explicit_count: bool, buf: &mut DocumentBuffer) {
        match motion {
            Motion::FileStart | Motion::FileEnd => {
                let row = match (motion, explicit_count) {
                    (_, true) => count.saturating_sub(1).min(buf.last_row()),
                    (Motion::FileStart, false) => 0,
                    _ => buf.last_row(),
                };
                buf.jump((row, buf.first_non_blank(row)));
            }
            _ => {
                for _ in 0..count {
                    let before = buf.cursor();
                    move_once(motion, buf);
                    if buf.cursor() == before {
                        break;
                    }
                }
            }
        }
    }

    fn handle_normal_command(&mut self, c: char, buf: &mut DocumentBuffer) -> VimOutcome {
        if self.pending.operator.is_some() {
            self.pending = Pending::default();
            return VimOutcome::Ignored;
        }

        let count = self.pending.take_count();
        let (row, col) = buf.cursor();

        match c {
            'g' => {
                self.pending.count = (count > 1).then_some(count);
                self.pending.g = true;
                self.pending.keys.push('g');
                return VimOutcome::Handled;
            }
            'r' => {
                self.pending.replace = true;
                self.pending.keys.push('r');
                return VimOutcome::Handled;
            }
            ':' => {
                self.pending = Pending::default();
                return VimOutcome::CommandLine;
            }
            'x' => {
                let end = (row, (col + count).min(buf.line_len(row)));
                self.apply_charwise(Operator::Delete, (row, col), end, buf);
            }
            'X' => {
                let start = (row, col.saturating_sub(count));
                self.apply_charwise(Operator::Delete, start, (row, col), buf);
            }
            'D' | 'C' => {
                let op = if c == 'D' { Operator::Delete } else { Operator::Change };
                self.apply_charwise(op, (row, col), (row, buf.line_len(row)), buf);
            }
            's' => {
                let end = (row, (col + count).min(buf.line_len(row)));
                self.apply_charwise(Operator::Change, (row, col), end, buf);
            }
            'p' | 'P' => {
                for _ in 0..count {
                    self.put(c == 'p', buf);
                }
            }
            'u' => {
                for _ in 0..count {
                    if !buf.undo() {
                        break;
                    }
                }
            }
            'J' => {
                let joins = (count.max(2) - 1).min(buf.last_row().saturating_sub(row));
                for _ in 0..joins {
                    join_line(buf);
                }
            }
            'i' => self.set_mode(VimMode::Insert),
            'a' => {
                if col < buf.line_len(row) {
                    buf.move_cursor(CursorMove::Forward);
                }
                self.set_mode(VimMode::Insert);
            }
            'I' => {
                buf.jump((row, buf.first_non_blank(row)));
                self.set_mode(VimMode::Insert);
            }
            'A' => {
                buf.move_cursor(CursorMove::End);
                self.set_mode(VimMode::Insert);
            }
            'o' => {
                buf.move_cursor(CursorMove::End);
                buf.insert_newline();
                self.set_mode(VimMode::Insert);
            }
            'O' => {
                buf.move_cursor(CursorMove::Head);
                buf.insert_newline();
                buf.move_cursor(CursorMove::Up);
                self.set_mode(VimMode::Insert);
            }
            'v' => {
                self.anchor = (row, col);
                self.set_mode(VimMode::Visual);
            }
            'V' => {
                self.anchor = (row, col);
                self.set_mode(VimMode::VisualLine);
            }
            _ => {
                self.pending = Pending::default();
                return VimOutcome::Ignored;
            }
        }

        if self.mode == VimMode::Normal {
            self.pending = Pending::default();
            self.clamp_cursor(buf);
        }
        VimOutcome::Handled
    }

    fn handle_visual_command(&mut self, c: char, buf: &mut DocumentBuffer) -> VimOutcome {
        self.pending = Pending::default();
        match c {
            'x' => self.apply_visual(Operator::Delete, buf),
            's' => self.apply_visual(Operator::Change, buf),
            ':' => return VimOutcome::CommandLine,
            'o' => {
                let cursor = buf.cursor();
                buf.jump(self.anchor);
                self.anchor = cursor;
            }
            'v' | 'V' => {
                let target = if c == 'v' { VimMode::Visual } else { VimMode::VisualLine };
                let next = if self.mode == target { VimMode::Normal } else { target };
                self.set_mode(next);
                self.clamp_cursor(buf);
            }
            'g' => {
                self.pending.g = true;
                self.pending.keys.push('g');
            }
            _ => return VimOutcome::Ignored,
        }
        VimOutcome::Handled
    }

    fn apply_visual(&mut self, op: Operator, buf: &mut DocumentBuffer) {
        let Some((start, end)) = self.selection(buf) else { return };
        if self.mode == VimMode::VisualLine {
            self.set_mode(VimMode::Normal);
            self.apply_linewise(op, start.0, end.0, buf);
        } else {
            self.set_mode(VimMode::Normal);
            self.apply_charwise(op, start, end, buf);
        }
    }

    fn apply_charwise(&mut self, op: Operator, start: Pos, end: Pos, buf: &mut DocumentBuffer) {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        let text = match op {
            Operator::Yank => {
                buf.jump(start);
                buf.slice(start, end)
            }
            Operator::Delete | Operator::Change => buf.delete_range(start, end),
        };
        self.register = Register { text, linewise: false };

        if op == Operator::Change {
            self.set_mode(VimMode::Insert);
        } else {
            self.clamp_cursor(buf);
        }
    }

    fn apply_linewise(&mut self, op: Operator, first: usize, last: usize, buf: &mut DocumentBuffer) {
        let last_len = buf.line_len(last);
        let mut text = buf.slice((first, 0), (last, last_len));
        text.push('\n');
        self.register = Register { text, linewise: true };

        match op {
            Operator::Yank => {
                let col = buf.cursor().1;
                buf.jump((first, col));
                self.clamp_cursor(buf);
            }
            Operator::Change => {
                buf.delete_range((first, 0), (last, last_len));
                self.set_mode(VimMode::Insert);
            }
            Operator::Delete => {
                if last < buf.last_row() {
                    buf.delete_range((first, 0), (last + 1, 0));
                } else if first > 0 {
                    let prev = first - 1;
                    buf.delete_range((prev, buf.line_len(prev)), (last, last_len));
                } else {
                    buf.delete_range((0, 0), (last, last_len));
                }
                let row = first.min(buf.last_row());
                buf.jump((row, buf.first_non_blank(row)));
            }
        }
    }

    fn put(&mut self, after: bool, buf: &mut DocumentBuffer) {
        if self.register.text.is_empty() {
            return;
        }
        let (row, col) = buf.cursor();

        if self.register.linewise {
            let body = self.register.text.strip_suffix('\n').unwrap_or(&self.register.text).to_string();
            let target = if after { row + 1 } else { row };
            if target > buf.last_row() {
                buf.jump((buf.last_row(), buf.line_len(buf.last_row())));
                buf.insert_newline();
                buf.insert_str(&body);
            } else {
                buf.jump((target, 0));
                buf.insert_str(&body);
                buf.insert_newline();
            }
            buf.jump((target, buf.first_non_blank(target)));
            return;
        }

        if after && col < buf.line_len(row) {
            buf.move_cursor(CursorMove::Forward);
        }
        let text = self.register.text.clone();
        buf.insert_str(&text);
        if buf.cursor().1 > 0 {
            buf.move_cursor(CursorMove::Back);
        }
    }

    fn replace_char(&mut self, c: char, buf: &mut DocumentBuffer) {
        let (row, col) = buf.cursor();
        if col >= buf.line_len(row) {
            return;
        }
        buf.delete_range((row, col), (row, col + 1));
        buf.insert_str(&c.to_string());
        buf.jump((row, col));
    }

    /// Normal mode never rests past the last char of a line
    fn clamp_cursor(&self, buf: &mut DocumentBuffer) {
        if self.mode == VimMode::Insert {
            return;
        }
        let (row, col) = buf.cursor();
        let len = buf.line_len(row);
        if len > 0 && col >= len {
            buf.jump((row, len - 1));
        }
    }
}

fn move_once(motion: Motion, buf: &mut DocumentBuffer) {
    let (row, col) = buf.cursor();
    match motion {
        Motion::Left if col > 0 => buf.move_cursor(CursorMove::Back),
        Motion::Right if col < buf.line_len(row) => buf.move_cursor(CursorMove::Forward),
        Motion::Left | Motion::Right => {}
        Motion::Up => buf.move_cursor(CursorMove::Up),
        Motion::Down => buf.move_cursor(CursorMove::Down),
        Motion::WordForward => buf.move_cursor(CursorMove::WordForward),
        Motion::WordBack => buf.move_cursor(CursorMove::WordBack),
        Motion::WordEnd => buf.move_cursor(CursorMove::WordEnd),
        Motion::LineStart => buf.move_cursor(CursorMove::Head),
        Motion::FirstNonBlank => buf.jump((row, buf.first_non_blank(row))),
        Motion::LineEnd => buf.move_cursor(CursorMove::End),
        Motion::ParagraphForward => buf.move_cursor(CursorMove::ParagraphForward),
        Motion::ParagraphBack => buf.move_cursor(CursorMove::ParagraphBack),
        Motion::FileStart => buf.jump((0, 0)),
        Motion::FileEnd => buf.jump((buf.last_row(), 0)),
    }
}

fn join_line(buf: &mut DocumentBuffer) {
    let row = buf.cursor().0;
    if row >= buf.last_row() {
        return;
    }
    let len = buf.line_len(row);
    let next_indent = buf.first_non_blank(row + 1);
    let next_empty = buf.line_len(row + 1) == next_indent;
    buf.delete_range((row, len), (row + 1, next_indent));
    if len > 0 && !next_empty {
        buf.insert_str(" ");
    }
    buf.jump((row, len));
}
