//! Frame renderer
//!
//! Lays out toolbar, editor, status line and help bar, then draws any open
//! dialog on top.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    widgets::Widget,
    Frame,
};

use crate::app::DisplayConfig;
use crate::editor::buffer::Pos;
use crate::editor::Editor;
use crate::host::protocol::FileFilter;
use crate::input::{InputMode, ModalStatus};

use super::components::{ConfirmDialog, HelpBar, MessageType, PathDialog, StatusLine, Toolbar};

/// Path prompt contents while a host dialog is waiting
pub struct PromptView<'a> {
    pub title: &'a str,
    pub value: &'a str,
    pub cursor: usize,
    pub filters: &'a [FileFilter],
}

/// Everything one frame needs, borrowed from the app
pub struct UiState<'a> {
    pub editor: &'a mut Editor,
    pub display: DisplayConfig,
    pub desktop: bool,
    pub input_mode: InputMode,
    pub modal: &'a ModalStatus,
    pub command_buffer: Option<&'a str>,
    pub message: Option<(&'a str, MessageType)>,
    pub file_name: &'a str,
    pub modified: bool,
    pub cursor: Pos,
    pub confirm_message: Option<&'a str>,
    pub prompt: Option<PromptView<'a>>,
}

pub struct Renderer;

impl Renderer {
    pub fn render(frame: &mut Frame, state: &mut UiState) {
        let area = frame.area();
        Self::render_to(area, frame.buffer_mut(), state);
    }

    pub fn render_to(area: Rect, buf: &mut Buffer, state: &mut UiState) {
        let [toolbar, body, status, help] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        Toolbar::new(state.display.show_line_numbers, state.display.preview)
            .desktop(state.desktop)
            .render(toolbar, buf);

        state.editor.render(body, buf);

        Self::status_line(state).render(status, buf);
        HelpBar::for_mode(state.input_mode, state.modal.mode).render(help, buf);

        if let Some(message) = state.confirm_message {
            ConfirmDialog::new(" Confirm ", message).render(area, buf);
        }
        if let Some(prompt) = &state.prompt {
            PathDialog::new(prompt.title, prompt.value, prompt.cursor)
                .filters(prompt.filters)
                .render(area, buf);
        }
    }

    fn status_line<'a>(state: &'a UiState) -> StatusLine<'a> {
        let (row, col) = state.cursor;
        let mut status = StatusLine::new(state.modal.mode, state.input_mode)
            .pending(&state.modal.pending)
            .file(state.file_name, state.modified)
            .cursor(row, col);

        if let Some(buffer) = state.command_buffer {
            status = status.command_buffer(buffer);
        }
        if let Some((msg, msg_type)) = state.message {
            status = status.message(msg, msg_type);
        }
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::EditorProps;
    use crate::host::protocol::file_filters;

    fn editor(text: &str) -> Editor {
        let props = EditorProps {
            value: text.to_string(),
            show_line_numbers: false,
            preview: true,
        };
        Editor::mount(props, Box::new(|_| {}))
    }

    fn state<'a>(editor: &'a mut Editor, modal: &'a ModalStatus) -> UiState<'a> {
        UiState {
            editor,
            display: DisplayConfig { show_line_numbers: false, preview: true },
            desktop: true,
            input_mode: InputMode::Editing,
            modal,
            command_buffer: None,
            message: None,
            file_name: "notes.md",
            modified: false,
            cursor: (0, 0),
            confirm_message: None,
            prompt: None,
        }
    }

    fn rows(buf: &Buffer) -> Vec<String> {
        let area = buf.area;
        (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol().to_string()).collect())
            .collect()
    }

    #[test]
    fn test_layout_rows() {
        let mut ed = editor("# Title\nbody");
        let modal = ModalStatus::default();
        let mut st = state(&mut ed, &modal);

        let area = Rect::new(0, 0, 80, 10);
        let mut buf = Buffer::empty(area);
        Renderer::render_to(area, &mut buf, &mut st);

        let text = rows(&buf);
        assert!(text[0].contains("Show Numbers"));
        assert!(text[1].contains("Title"));
        assert!(text[2].starts_with("body"));
        assert!(text[8].starts_with(" NORMAL "));
        assert!(text[8].contains("notes.md"));
        assert!(text[9].contains("insert"));
    }

    #[test]
    fn test_prompt_overlay() {
        let mut ed = editor("");
        let modal = ModalStatus::default();
        let filters = file_filters();
        let mut st = state(&mut ed, &modal);
        st.input_mode = InputMode::Prompt;
        st.prompt = Some(PromptView { title: " Save As ", value: "document.md", cursor: 11, filters: &filters });

        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        Renderer::render_to(area, &mut buf, &mut st);

        let text = rows(&buf);
        assert!(text.iter().any(|l| l.contains("Save As")));
        assert!(text[18].starts_with(" PROMPT "));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let mut ed = editor("text");
        let modal = ModalStatus::default();
        let mut st = state(&mut ed, &modal);
        st.confirm_message = Some("Discard unsaved changes and quit?");

        let area = Rect::new(0, 0, 10, 2);
        let mut buf = Buffer::empty(area);
        Renderer::render_to(area, &mut buf, &mut st);
    }
}
