//! Application State
//!
//! Core application logic tying together the editor, the file host and the UI.

mod command;
mod config;
mod download;
mod file_handler;
pub mod format;
mod input;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::{Duration, Instant};

use ratatui::Frame;
use tracing::info;

use crate::editor::buffer::normalize_newlines;
use crate::editor::{Editor, EditorProps};
use crate::host::protocol::FileFilter;
use crate::host::HostClient;
use crate::input::{InputMode, ModalStatus, ModeState, Subscription, TextEditing};
use crate::ui::components::MessageType;
use crate::ui::renderer::{PromptView, Renderer, UiState};

pub use config::{AppConfig, DisplayConfig, PendingAction, APP_NAME};
pub use download::DownloadSaver;
pub use format::FormatAction;

/// Where saves go
pub enum SaveBackend {
    /// Desktop build: a host thread with file dialogs
    Host(HostClient),
    /// No host: always `document.md` in the download directory
    Download(DownloadSaver),
}

/// The application-owned copy of the document
#[derive(Debug, Default)]
pub struct Document {
    pub text: String,
    pub modified: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Save,
    Open,
}

impl PromptKind {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Save => " Save As ",
            Self::Open => " Open File ",
        }
    }
}

/// A host dialog waiting on the path prompt
#[derive(Debug, Clone)]
pub struct PathPrompt {
    pub kind: PromptKind,
    pub filters: Vec<FileFilter>,
}

pub struct App {
    pub config: AppConfig,
    pub display: DisplayConfig,
    pub document: Rc<RefCell<Document>>,
    pub editor: Editor,
    pub mode_state: ModeState,
    pub backend: SaveBackend,
    pub current_path: Option<PathBuf>,
    pub message: Option<(String, MessageType, Instant)>,
    pub pending_action: Option<PendingAction>,
    pub prompt: Option<PathPrompt>,
    pub should_quit: bool,
    quit_after_save: bool,
    /// Text sent with each host save still awaiting a reply, oldest first
    saves_in_flight: VecDeque<String>,
    status: Rc<RefCell<ModalStatus>>,
    _status_subscription: Subscription,
}

impl App {
    pub fn new(config: AppConfig, backend: SaveBackend) -> Self {
        let display = config.display();
        let text = normalize_newlines(config.initial_text());
        let document = Rc::new(RefCell::new(Document { text: text.clone(), modified: false }));

        let sink = Rc::clone(&document);
        let on_change = Box::new(move |text: &str| {
            let mut doc = sink.borrow_mut();
            doc.text = text.to_string();
            doc.modified = true;
        });
        let props = EditorProps {
            value: text,
            show_line_numbers: display.show_line_numbers,
            preview: display.preview,
        };
        let mut editor = Editor::mount(props, on_change);

        let status = Rc::new(RefCell::new(ModalStatus::default()));
        let mirror = Rc::clone(&status);
        let subscription = editor.subscribe(move |s| *mirror.borrow_mut() = s.clone());

        Self {
            config,
            display,
            document,
            editor,
            mode_state: ModeState::new(),
            backend,
            current_path: None,
            message: None,
            pending_action: None,
            prompt: None,
            should_quit: false,
            quit_after_save: false,
            saves_in_flight: VecDeque::new(),
            status,
            _status_subscription: subscription,
        }
    }

    pub fn text(&self) -> String {
        self.document.borrow().text.clone()
    }

    pub fn is_modified(&self) -> bool {
        self.document.borrow().modified
    }

    pub fn is_desktop(&self) -> bool {
        matches!(self.backend, SaveBackend::Host(_))
    }

    fn props(&self) -> EditorProps {
        EditorProps {
            value: self.text(),
            show_line_numbers: self.display.show_line_numbers,
            preview: self.display.preview,
        }
    }

    /// Pushes the current document and display flags into the editor
    fn sync_editor(&mut self) {
        let props = self.props();
        self.editor.set_props(&props);
    }

    /// Replaces the document wholesale, e.g. after opening a file.
    /// Line endings are stored as LF.
    pub fn load_document(&mut self, text: String, path: Option<PathBuf>) {
        {
            let mut doc = self.document.borrow_mut();
            doc.text = normalize_newlines(&text);
            doc.modified = false;
        }
        self.current_path = path;
        self.sync_editor();
    }

    pub fn toggle_line_numbers(&mut self) {
        self.set_line_numbers(!self.display.show_line_numbers);
    }

    pub fn set_line_numbers(&mut self, show: bool) {
        self.display.show_line_numbers = show;
        self.sync_editor();
    }

    pub fn toggle_preview(&mut self) {
        self.set_preview(!self.display.preview);
    }

    pub fn set_preview(&mut self, preview: bool) {
        self.display.preview = preview;
        self.sync_editor();
        let label = if preview { "Preview" } else { "Raw" };
        self.set_message(&format!("{} view", label), MessageType::Info);
    }

    pub fn apply_format(&mut self, action: FormatAction) {
        let selected = self.editor.selection();
        let replacement = action.apply(&selected);
        self.editor.replace_selection(&replacement);
    }

    pub fn request_quit(&mut self, force: bool) {
        if force || !self.is_modified() {
            info!("quitting");
            self.should_quit = true;
            return;
        }
        self.pending_action = Some(PendingAction::Quit);
        self.mode_state.to_confirm();
    }

    pub fn write_quit(&mut self) {
        self.quit_after_save = true;
        self.save();
    }

    /// Runs a confirmed pending action
    pub fn confirm_pending(&mut self) {
        let Some(action) = self.pending_action.take() else { return };
        self.mode_state.to_editing();
        match action {
            PendingAction::Quit => self.request_quit(true),
        }
    }

    pub fn cancel_pending(&mut self) {
        self.pending_action = None;
        self.mode_state.to_editing();
    }

    /// Delivers modal status changes to subscribers; once per frame
    pub fn flush_modal(&mut self) {
        self.editor.flush_modal();
    }

    pub fn file_name(&self) -> String {
        self.current_path
            .as_deref()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "[No Name]".to_string())
    }

    pub fn render(&mut self, frame: &mut Frame) {
        self.check_message_expiry();

        let status = self.status.borrow().clone();
        let file_name = self.file_name();
        let modified = self.is_modified();
        let cursor = self.editor.cursor();
        let desktop = self.is_desktop();

        let message = self.message.as_ref().map(|(m, t, _)| (m.as_str(), *t));
        let command_buffer = (self.mode_state.mode == InputMode::Command)
            .then(|| self.mode_state.get_buffer());
        let confirm_message = self.pending_action.as_ref().map(|a| a.confirm_message());
        let prompt = self.prompt.as_ref().map(|p| PromptView {
            title: p.kind.title(),
            value: self.mode_state.get_buffer(),
            cursor: self.mode_state.buffer.cursor(),
            filters: &p.filters,
        });

        let mut state = UiState {
            editor: &mut self.editor,
            display: self.display,
            desktop,
            input_mode: self.mode_state.mode,
            modal: &status,
            command_buffer,
            message,
            file_name: &file_name,
            modified,
            cursor,
            confirm_message,
            prompt,
        };

        Renderer::render(frame, &mut state);
    }

    fn check_message_expiry(&mut self) {
        let expired = self
            .message
            .as_ref()
            .is_some_and(|(_, _, time)| time.elapsed() > Duration::from_secs(5));

        if expired {
            self.message = None;
        }
    }

    pub fn set_message(&mut self, msg: &str, msg_type: MessageType) {
        self.message = Some((msg.to_string(), msg_type, Instant::now()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::config::WELCOME_TEXT;
    use crate::input::VimMode;
    use crossterm::event::{KeyCode, KeyEvent};
    use tempfile::TempDir;

    pub(super) fn download_app(dir: &Path) -> App {
        let config = AppConfig {
            download_dir: dir.to_path_buf(),
            ..AppConfig::default()
        };
        let backend = SaveBackend::Download(DownloadSaver::new(dir));
        App::new(config, backend)
    }

    #[test]
    fn test_starts_with_welcome_text() {
        let dir = TempDir::new().unwrap();
        let app = download_app(dir.path());
        assert_eq!(app.text(), WELCOME_TEXT);
        assert_eq!(app.editor.text(), WELCOME_TEXT);
        assert!(!app.is_modified());
        assert_eq!(app.file_name(), "[No Name]");
    }

    #[test]
    fn test_toggle_preview_twice_keeps_text() {
        let dir = TempDir::new().unwrap();
        let mut app = download_app(dir.path());
        app.load_document("# Title\n\nBody".into(), None);

        app.toggle_preview();
        assert!(!app.editor.styles().is_preview());
        app.toggle_preview();
        assert!(app.editor.styles().is_preview());
        assert_eq!(app.editor.text(), "# Title\n\nBody");
        assert_eq!(app.text(), "# Title\n\nBody");
    }

    #[test]
    fn test_toggle_line_numbers() {
        let dir = TempDir::new().unwrap();
        let mut app = download_app(dir.path());
        app.toggle_line_numbers();
        assert!(app.editor.show_line_numbers());
        app.toggle_line_numbers();
        assert!(!app.editor.show_line_numbers());
    }

    #[test]
    fn test_load_document_replaces_editor_surface() {
        let dir = TempDir::new().unwrap();
        let mut app = download_app(dir.path());
        app.load_document("fresh".into(), Some(PathBuf::from("/tmp/fresh.md")));
        assert_eq!(app.editor.text(), "fresh");
        assert!(!app.is_modified());
        assert_eq!(app.file_name(), "fresh.md");
    }

    #[test]
    fn test_crlf_document_matches_editor() {
        let dir = TempDir::new().unwrap();
        let mut app = download_app(dir.path());
        app.load_document("a\r\nb".into(), None);
        assert_eq!(app.text(), "a\nb");
        assert_eq!(app.editor.text(), app.text());

        app.toggle_preview();
        assert_eq!(app.editor.text(), "a\nb");
        assert!(!app.is_modified());
    }

    #[test]
    fn test_format_then_clear_restores_text() {
        let dir = TempDir::new().unwrap();
        let mut app = download_app(dir.path());
        app.load_document("plain".into(), None);

        app.editor.handle_key(KeyEvent::from(KeyCode::Char('v')));
        app.editor.handle_key(KeyEvent::from(KeyCode::Char('$')));
        app.apply_format(FormatAction::Bold);
        assert_eq!(app.text(), "**plain**");

        app.editor.handle_key(KeyEvent::from(KeyCode::Char('0')));
        app.editor.handle_key(KeyEvent::from(KeyCode::Char('v')));
        app.editor.handle_key(KeyEvent::from(KeyCode::Char('$')));
        app.apply_format(FormatAction::Clear);
        assert_eq!(app.text(), "plain");
        assert_eq!(app.editor.text(), "plain");
    }

    #[test]
    fn test_format_without_selection_inserts_markers() {
        let dir = TempDir::new().unwrap();
        let mut app = download_app(dir.path());
        app.load_document("".into(), None);
        app.apply_format(FormatAction::Heading1);
        assert_eq!(app.text(), "# ");
        assert!(app.is_modified());
    }

    #[test]
    fn test_quit_with_unsaved_changes_asks() {
        let dir = TempDir::new().unwrap();
        let mut app = download_app(dir.path());
        app.request_quit(false);
        assert!(app.should_quit);

        let mut app = download_app(dir.path());
        app.apply_format(FormatAction::Bold);
        app.request_quit(false);
        assert!(!app.should_quit);
        assert_eq!(app.pending_action, Some(PendingAction::Quit));

        app.cancel_pending();
        assert!(!app.should_quit);

        app.request_quit(false);
        app.confirm_pending();
        assert!(app.should_quit);
    }

    #[test]
    fn test_modal_status_mirrored_after_flush() {
        let dir = TempDir::new().unwrap();
        let mut app = download_app(dir.path());
        app.editor.handle_key(KeyEvent::from(KeyCode::Char('i')));
        assert_eq!(app.status.borrow().mode, VimMode::Normal);
        app.flush_modal();
        assert_eq!(app.status.borrow().mode, VimMode::Insert);
    }
}
