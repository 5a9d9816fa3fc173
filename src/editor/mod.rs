//! Editor Component
//!
//! Composes the document buffer, the vim layer and the markdown styles into
//! one component driven by props. The owner passes the document value and
//! display flags down and hears about edits through the change callback.

pub mod buffer;

use crossterm::event::KeyEvent;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};
use tracing::debug;

use crate::input::{ModalStatus, Subscription, Vim, VimOutcome};
use crate::markdown::{highlight_document, link_target_at, StyleSet};
use crate::ui::components::editor_view::display_col;
use crate::ui::components::{EditorView, ScrollState};

use buffer::{DocumentBuffer, Pos};

/// Inputs pushed down by the owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorProps {
    pub value: String,
    pub show_line_numbers: bool,
    pub preview: bool,
}

/// Requests the editor cannot serve itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    None,
    CommandLine,
    FollowLink(String),
    NoLink,
}

pub type ChangeHandler = Box<dyn FnMut(&str)>;

pub struct Editor {
    buffer: DocumentBuffer,
    vim: Vim,
    styles: StyleSet,
    show_line_numbers: bool,
    scroll: ScrollState,
    last_text: String,
    on_change: ChangeHandler,
}

impl Editor {
    pub fn mount(props: EditorProps, on_change: ChangeHandler) -> Self {
        Self {
            buffer: DocumentBuffer::new(&props.value),
            vim: Vim::new(),
            styles: StyleSet::from_preview(props.preview),
            show_line_numbers: props.show_line_numbers,
            scroll: ScrollState::default(),
            last_text: props.value,
            on_change,
        }
    }

    /// Reconfigures the live editor. A differing value replaces the whole
    /// document through the engine without firing the change callback.
    pub fn set_props(&mut self, props: &EditorProps) {
        self.show_line_numbers = props.show_line_numbers;
        if self.styles.is_preview() != props.preview {
            debug!(preview = props.preview, "switching markdown styles");
            self.styles = self.styles.toggled();
        }

        if props.value == self.buffer.text() {
            return;
        }
        debug!(len = props.value.len(), "replacing editor content from props");
        self.buffer.replace_all(&props.value);
        self.buffer.take_dirty();
        self.last_text = props.value.clone();
        self.vim.exit_visual(&mut self.buffer);
        self.scroll.reset();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> EditorEvent {
        let outcome = self.vim.handle_key(key, &mut self.buffer);
        self.notify_change();

        match outcome {
            VimOutcome::CommandLine => EditorEvent::CommandLine,
            VimOutcome::FollowLink => match self.link_under_cursor() {
                Some(target) => EditorEvent::FollowLink(target),
                None => EditorEvent::NoLink,
            },
            VimOutcome::Handled | VimOutcome::Ignored => EditorEvent::None,
        }
    }

    fn notify_change(&mut self) {
        if !self.buffer.take_dirty() {
            return;
        }
        let text = self.buffer.text();
        if text == self.last_text {
            return;
        }
        (self.on_change)(&text);
        self.last_text = text;
    }

    fn link_under_cursor(&self) -> Option<String> {
        let (row, col) = self.buffer.cursor();
        link_target_at(self.buffer.line(row), col)
    }

    #[cfg(test)]
    pub fn text(&self) -> String {
        self.buffer.text()
    }

    pub fn cursor(&self) -> Pos {
        self.buffer.cursor()
    }

    #[cfg(test)]
    pub fn mode(&self) -> crate::input::VimMode {
        self.vim.mode()
    }

    #[cfg(test)]
    pub fn styles(&self) -> StyleSet {
        self.styles
    }

    #[cfg(test)]
    pub fn show_line_numbers(&self) -> bool {
        self.show_line_numbers
    }

    /// Selected text, empty outside visual modes
    pub fn selection(&self) -> String {
        self.vim
            .selection(&self.buffer)
            .map(|(start, end)| self.buffer.slice(start, end))
            .unwrap_or_default()
    }

    /// Replaces the selection, or inserts at the cursor when nothing is
    /// selected, as one undoable edit
    pub fn replace_selection(&mut self, text: &str) {
        if let Some((start, end)) = self.vim.selection(&self.buffer) {
            self.buffer.delete_range(start, end);
        }
        self.buffer.insert_str(text);
        self.vim.exit_visual(&mut self.buffer);
        self.notify_change();
    }

    /// Drops a visual selection kept alive across the command line
    pub fn exit_visual(&mut self) {
        self.vim.exit_visual(&mut self.buffer);
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&ModalStatus) + 'static) -> Subscription {
        self.vim.subscribe(listener)
    }

    /// Delivers pending modal status changes; call once per frame
    pub fn flush_modal(&mut self) -> bool {
        self.vim.flush()
    }

    /// Draws into `area`. An empty area is a silent no-op.
    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let gutter = EditorView::gutter_width(self.show_line_numbers, self.buffer.line_count());
        let height = area.height as usize;
        let width = area.width.saturating_sub(gutter) as usize;

        self.vim.set_page_height(height);
        let (row, col) = self.buffer.cursor();
        let vx = display_col(self.buffer.line(row), col);
        self.scroll.follow((row, vx), height, width);

        let syntax = highlight_document(self.buffer.lines());
        EditorView::new(self.buffer.lines(), &syntax)
            .styles(self.styles)
            .cursor(self.buffer.cursor(), self.vim.mode())
            .selection(self.vim.selection(&self.buffer))
            .line_numbers(self.show_line_numbers)
            .scroll(self.scroll)
            .render(area, buf);
    }
}
