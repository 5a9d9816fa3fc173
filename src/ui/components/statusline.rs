//! Status Line Component
//!
//! Displays mode indicator, pending keys, messages and document info.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::input::{InputMode, VimMode};

use super::layout::truncate_with_ellipsis;

const MAX_FILE_NAME: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Info,
    Success,
    Warning,
    Error,
}

impl MessageType {
    pub fn color(&self) -> Color {
        match self {
            Self::Info => Color::Blue,
            Self::Success => Color::Green,
            Self::Warning => Color::Yellow,
            Self::Error => Color::Red,
        }
    }
}

pub struct StatusLine<'a> {
    vim_mode: VimMode,
    input_mode: InputMode,
    pending: &'a str,
    command_buffer: Option<&'a str>,
    message: Option<(&'a str, MessageType)>,
    file_name: &'a str,
    modified: bool,
    cursor: Option<(usize, usize)>,
}

impl<'a> StatusLine<'a> {
    pub fn new(vim_mode: VimMode, input_mode: InputMode) -> Self {
        Self {
            vim_mode,
            input_mode,
            pending: "",
            command_buffer: None,
            message: None,
            file_name: "[No Name]",
            modified: false,
            cursor: None,
        }
    }

    pub fn pending(mut self, keys: &'a str) -> Self {
        self.pending = keys;
        self
    }

    pub fn command_buffer(mut self, buffer: &'a str) -> Self {
        self.command_buffer = Some(buffer);
        self
    }

    pub fn message(mut self, msg: &'a str, msg_type: MessageType) -> Self {
        self.message = Some((msg, msg_type));
        self
    }

    pub fn file(mut self, name: &'a str, modified: bool) -> Self {
        self.file_name = name;
        self.modified = modified;
        self
    }

    /// Zero-based (row, col), shown one-based
    pub fn cursor(mut self, row: usize, col: usize) -> Self {
        self.cursor = Some((row, col));
        self
    }

    fn indicator(&self) -> &'static str {
        self.input_mode.indicator().unwrap_or_else(|| self.vim_mode.indicator())
    }

    fn mode_style(&self) -> Style {
        let base = Style::default().fg(Color::Black);
        match (self.input_mode, self.vim_mode) {
            (InputMode::Command, _) | (InputMode::Confirm, _) => base.bg(Color::Red),
            (InputMode::Prompt, _) => base.bg(Color::Yellow),
            (InputMode::Editing, VimMode::Normal) => base.bg(Color::Magenta),
            (InputMode::Editing, VimMode::Insert) => base.bg(Color::Blue),
            (InputMode::Editing, VimMode::Visual | VimMode::VisualLine) => base.bg(Color::Green),
        }
    }
}

fn render_mode_indicator(buf: &mut Buffer, area: Rect, text: &str, style: Style) -> u16 {
    let mode_text = format!(" {} ", text);
    buf.set_string(area.x, area.y, &mode_text, style.add_modifier(Modifier::BOLD));
    mode_text.len() as u16
}

fn render_command_or_message(
    buf: &mut Buffer,
    x: u16,
    y: u16,
    command_buffer: Option<&str>,
    message: Option<(&str, MessageType)>,
) {
    let style_base = Style::default().bg(Color::DarkGray);

    if let Some(buffer) = command_buffer {
        buf.set_string(x, y, format!(":{}", buffer), style_base.fg(Color::White));
        return;
    }

    if let Some((msg, msg_type)) = message {
        buf.set_string(x, y, msg, style_base.fg(msg_type.color()));
    }
}

fn build_right_line<'a>(
    pending: &'a str,
    file_name: &'a str,
    modified: bool,
    cursor: Option<(usize, usize)>,
) -> Line<'a> {
    let bg = Style::default().bg(Color::DarkGray);
    let sep = Span::styled(" | ", bg.fg(Color::White));
    let mut spans: Vec<Span> = Vec::new();

    if !pending.is_empty() {
        spans.push(Span::styled(pending, bg.fg(Color::Yellow).add_modifier(Modifier::BOLD)));
        spans.push(sep.clone());
    }

    spans.push(Span::styled(truncate_with_ellipsis(file_name, MAX_FILE_NAME), bg.fg(Color::Gray)));
    if modified {
        spans.push(Span::styled(" [+]", bg.fg(Color::Yellow)));
    }

    if let Some((row, col)) = cursor {
        spans.push(sep);
        spans.push(Span::styled(
            format!("{}:{}", row + 1, col + 1),
            bg.fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
    }

    Line::from(spans)
}

impl<'a> Widget for StatusLine<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        buf.set_style(area, Style::default().bg(Color::DarkGray));

        let mode_width = render_mode_indicator(buf, area, self.indicator(), self.mode_style());
        let x = area.x + mode_width + 1;

        // The command line owns the whole row while it is open
        if self.command_buffer.is_some() {
            render_command_or_message(buf, x, area.y, self.command_buffer, None);
            return;
        }

        let line = build_right_line(self.pending, self.file_name, self.modified, self.cursor);
        let width = line.width() as u16;
        let right_x = area.x + area.width.saturating_sub(width + 1);
        render_command_or_message(buf, x, area.y, None, self.message);
        buf.set_line(right_x, area.y, &line, width);
    }
}

pub struct HelpBar<'a> {
    hints: Vec<(&'a str, &'a str)>,
}

impl<'a> HelpBar<'a> {
    pub fn for_mode(input_mode: InputMode, vim_mode: VimMode) -> Self {
        Self { hints: hints_for_mode(input_mode, vim_mode) }
    }
}

fn hints_for_mode(input_mode: InputMode, vim_mode: VimMode) -> Vec<(&'static str, &'static str)> {
    match (input_mode, vim_mode) {
        (InputMode::Editing, VimMode::Normal) => vec![
            ("i/a/o", "insert"),
            ("v/V", "visual"),
            (":w", "save"),
            (":q", "quit"),
            ("gx", "open link"),
            ("F2", "numbers"),
            ("F3", "raw/preview"),
        ],
        (InputMode::Editing, VimMode::Insert) => vec![
            ("esc", "normal"),
            ("alt+b/i/u", "bold/italic/underline"),
            ("alt+1/2", "heading"),
            ("ctrl+s", "save"),
        ],
        (InputMode::Editing, _) => vec![
            ("esc", "normal"),
            ("d/y/c", "delete/yank/change"),
            ("alt+b/i/u", "format"),
            ("alt+0", "clear"),
        ],
        (InputMode::Command, _) => vec![
            ("esc", "cancel"),
            ("enter", "execute"),
        ],
        (InputMode::Prompt, _) => vec![
            ("esc", "cancel"),
            ("enter", "confirm"),
        ],
        (InputMode::Confirm, _) => vec![
            ("y", "yes"),
            ("n", "no"),
        ],
    }
}

fn build_hint_spans<'a>(hints: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    let mut spans: Vec<Span> = Vec::new();

    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(*key, Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)));
        spans.push(Span::styled(format!(" {}", desc), Style::default().fg(Color::Gray)));
    }

    spans
}

impl<'a> Widget for HelpBar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let spans = build_hint_spans(&self.hints);
        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
