use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::editor::EditorEvent;
use crate::input::{
    handle_text_key,
    keymap::{confirm_action, global_action, text_input_action, Action},
    InputMode, TextEditing,
};
use crate::ui::components::MessageType;

use super::command::{parse_command, Command};
use super::App;

impl App {
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.mode_state.mode {
            InputMode::Editing => self.handle_editing_key(key),
            InputMode::Command | InputMode::Prompt => self.handle_text_input(key),
            InputMode::Confirm => {
                let action = confirm_action(key);
                self.execute_action(action);
            }
        }
    }

    fn handle_editing_key(&mut self, key: KeyEvent) {
        if let Some(action) = global_action(key) {
            self.execute_action(action);
            return;
        }

        match self.editor.handle_key(key) {
            EditorEvent::None => {}
            EditorEvent::CommandLine => self.mode_state.to_command(),
            EditorEvent::FollowLink(target) => self.follow_link(&target),
            EditorEvent::NoLink => self.set_message("No link under cursor", MessageType::Warning),
        }
    }

    fn handle_text_input(&mut self, key: KeyEvent) {
        match text_input_action(key) {
            Action::Submit => self.submit_text_input(),
            Action::Cancel => self.cancel_text_input(),
            _ => {
                // Backspace on an empty command line leaves it, as in vim
                let leaves = self.mode_state.mode == InputMode::Command
                    && key.code == KeyCode::Backspace
                    && self.mode_state.buffer.is_empty();
                if leaves {
                    self.mode_state.to_editing();
                    self.editor.exit_visual();
                } else {
                    handle_text_key(&mut self.mode_state.buffer, key.code, key.modifiers);
                }
            }
        }
    }

    fn submit_text_input(&mut self) {
        let mode = self.mode_state.mode;
        let buffer = self.mode_state.get_buffer().to_string();
        self.mode_state.to_editing();

        match mode {
            InputMode::Command => {
                // Runs against the visual selection the command line was opened from
                self.execute_command(&buffer);
                self.editor.exit_visual();
            }
            InputMode::Prompt => self.answer_prompt(Some(buffer)),
            _ => {}
        }
    }

    fn cancel_text_input(&mut self) {
        let mode = self.mode_state.mode;
        self.mode_state.to_editing();
        match mode {
            InputMode::Command => self.editor.exit_visual(),
            InputMode::Prompt => self.answer_prompt(None),
            _ => {}
        }
    }

    pub fn execute_action(&mut self, action: Action) {
        match action {
            Action::None | Action::Submit => {}
            Action::ToggleLineNumbers => self.toggle_line_numbers(),
            Action::TogglePreview => self.toggle_preview(),
            Action::Save => self.save(),
            Action::Open => self.open(),
            Action::Format(format) => self.apply_format(format),
            Action::Confirm => self.confirm_pending(),
            Action::Cancel => self.cancel_pending(),
        }
    }

    pub fn execute_command(&mut self, input: &str) {
        match parse_command(input) {
            Command::Empty => {}
            Command::Quit { force } => self.request_quit(force),
            Command::Write => self.save(),
            Command::WriteAs(path) => self.save_as(&path),
            Command::WriteQuit => self.write_quit(),
            Command::Edit => self.open(),
            Command::EditPath(path) => self.open_path(&path),
            Command::SetLineNumbers(show) => self.set_line_numbers(show),
            Command::Preview(preview) => self.set_preview(preview),
            Command::Format(format) => self.apply_format(format),
            Command::Unknown(cmd) => {
                self.set_message(&format!("Unknown command: {}", cmd), MessageType::Error);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::app::tests::download_app;
    use crate::input::{InputMode, VimMode};
    use crate::ui::components::MessageType;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
    use std::fs;
    use tempfile::TempDir;

    fn press(app: &mut crate::app::App, code: KeyCode) {
        app.handle_key_event(KeyEvent::from(code));
    }

    fn type_str(app: &mut crate::app::App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_release_events_ignored() {
        let dir = TempDir::new().unwrap();
        let mut app = download_app(dir.path());
        let mut key = KeyEvent::from(KeyCode::Char('i'));
        key.kind = KeyEventKind::Release;
        app.handle_key_event(key);
        assert_eq!(app.editor.mode(), VimMode::Normal);
    }

    #[test]
    fn test_colon_opens_command_line() {
        let dir = TempDir::new().unwrap();
        let mut app = download_app(dir.path());
        press(&mut app, KeyCode::Char(':'));
        assert_eq!(app.mode_state.mode, InputMode::Command);

        type_str(&mut app, "set nu");
        assert_eq!(app.mode_state.get_buffer(), "set nu");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode_state.mode, InputMode::Editing);
        assert!(app.editor.show_line_numbers());
    }

    #[test]
    fn test_command_line_escape_and_backspace() {
        let dir = TempDir::new().unwrap();
        let mut app = download_app(dir.path());
        type_str(&mut app, ":q");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode_state.mode, InputMode::Editing);
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Char(':'));
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.mode_state.mode, InputMode::Editing);
    }

    #[test]
    fn test_unknown_command_reports_error() {
        let dir = TempDir::new().unwrap();
        let mut app = download_app(dir.path());
        app.execute_command("frobnicate");
        let (text, kind, _) = app.message.as_ref().unwrap();
        assert_eq!(text, "Unknown command: frobnicate");
        assert_eq!(*kind, MessageType::Error);
    }

    #[test]
    fn test_write_command_saves_download() {
        let dir = TempDir::new().unwrap();
        let mut app = download_app(dir.path());
        type_str(&mut app, ":w");
        press(&mut app, KeyCode::Enter);
        assert!(dir.path().join("document.md").exists());
    }

    #[test]
    fn test_quit_confirm_keys() {
        let dir = TempDir::new().unwrap();
        let mut app = download_app(dir.path());
        type_str(&mut app, "x:q");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode_state.mode, InputMode::Confirm);

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.mode_state.mode, InputMode::Editing);
        assert!(!app.should_quit);

        type_str(&mut app, ":q");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('y'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_force_quit_skips_confirm() {
        let dir = TempDir::new().unwrap();
        let mut app = download_app(dir.path());
        type_str(&mut app, "x:q!");
        press(&mut app, KeyCode::Enter);
        assert!(app.should_quit);
    }

    #[test]
    fn test_global_bindings_work_in_insert_mode() {
        let dir = TempDir::new().unwrap();
        let mut app = download_app(dir.path());
        app.load_document(String::new(), None);
        press(&mut app, KeyCode::Char('i'));
        app.handle_key_event(KeyEvent::new(KeyCode::Char('b'), KeyModifiers::ALT));
        assert_eq!(app.text(), "****");
        assert_eq!(app.editor.mode(), VimMode::Insert);

        press(&mut app, KeyCode::F(3));
        assert!(!app.editor.styles().is_preview());
        press(&mut app, KeyCode::F(2));
        assert!(app.editor.show_line_numbers());
    }

    #[test]
    fn test_edit_path_command_in_download_build() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("other.md");
        fs::write(&path, "other").unwrap();

        let mut app = download_app(dir.path());
        app.execute_command(&format!("e {}", path.display()));
        assert_eq!(app.text(), "other");
        assert_eq!(app.file_name(), "other.md");
    }

    #[test]
    fn test_format_command_from_visual_selection() {
        let dir = TempDir::new().unwrap();
        let mut app = download_app(dir.path());
        app.load_document("make bold".into(), None);
        type_str(&mut app, "wv$:");
        assert_eq!(app.mode_state.mode, InputMode::Command);
        assert_eq!(app.editor.mode(), VimMode::Visual);

        type_str(&mut app, "bold");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.text(), "make **bold**");
        assert_eq!(app.editor.mode(), VimMode::Normal);
    }

    #[test]
    fn test_cancelled_command_drops_visual_selection() {
        let dir = TempDir::new().unwrap();
        let mut app = download_app(dir.path());
        type_str(&mut app, "v:");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode_state.mode, InputMode::Editing);
        assert_eq!(app.editor.mode(), VimMode::Normal);

        type_str(&mut app, "v:set nu");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.editor.mode(), VimMode::Normal);
        assert!(app.editor.show_line_numbers());
    }

    #[test]
    fn test_gx_without_link_warns() {
        let dir = TempDir::new().unwrap();
        let mut app = download_app(dir.path());
        app.load_document("plain".into(), None);
        type_str(&mut app, "gx");
        let (_, kind, _) = app.message.as_ref().unwrap();
        assert_eq!(*kind, MessageType::Warning);
    }
}
