//! Save, open and host message handling

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::host::{check_navigation, HostMessage, Navigation, OpenFileResponse, SaveFileResponse};
use crate::ui::components::MessageType;

use super::config::expand_tilde;
use super::{App, DownloadSaver, PathPrompt, PromptKind, SaveBackend};

impl App {
    /// Saves to the current path, or asks the host where to save
    pub fn save(&mut self) {
        let text = self.text();
        match &self.backend {
            SaveBackend::Host(client) => {
                match client.save_file(&text, self.current_path.clone()) {
                    Ok(()) => self.saves_in_flight.push_back(text),
                    Err(e) => self.host_failed(&e.to_string()),
                }
            }
            SaveBackend::Download(saver) => {
                let response = match saver.save(&text) {
                    Ok(path) => SaveFileResponse::saved(path),
                    Err(e) => SaveFileResponse::failed(e.to_string()),
                };
                self.saved(response, &text, false);
            }
        }
    }

    pub fn save_as(&mut self, path: &Path) {
        let SaveBackend::Host(client) = &self.backend else {
            self.quit_after_save = false;
            self.set_message("Save as needs the desktop build", MessageType::Error);
            return;
        };
        let path = self.resolve(path);
        let text = self.text();
        match client.save_file(&text, Some(path)) {
            Ok(()) => self.saves_in_flight.push_back(text),
            Err(e) => self.host_failed(&e.to_string()),
        }
    }

    pub fn open(&mut self) {
        let SaveBackend::Host(client) = &self.backend else {
            self.set_message("Open needs the desktop build", MessageType::Error);
            return;
        };
        if let Err(e) = client.open_file() {
            self.host_failed(&e.to_string());
        }
    }

    pub fn open_path(&mut self, path: &Path) {
        let path = self.resolve(path);
        match &self.backend {
            SaveBackend::Host(client) => {
                if let Err(e) = client.open_path(path) {
                    self.host_failed(&e.to_string());
                }
            }
            SaveBackend::Download(_) => {
                let response = match fs::read_to_string(&path) {
                    Ok(content) => OpenFileResponse::opened(path, content),
                    Err(e) => OpenFileResponse::failed(e.to_string()),
                };
                self.opened(response);
            }
        }
    }

    /// Follows a link target, which must stay on the local filesystem
    pub fn follow_link(&mut self, target: &str) {
        match check_navigation(target) {
            Navigation::Allowed(path) => {
                info!(target, "following link");
                self.open_path(&path);
            }
            Navigation::Denied(reason) => {
                warn!(target, "navigation blocked");
                self.set_message(&reason, MessageType::Warning);
            }
        }
    }

    /// Relative paths resolve against the current file's directory
    fn resolve(&self, path: &Path) -> PathBuf {
        let path = expand_tilde(path);
        if path.is_absolute() {
            return path;
        }
        match self.current_path.as_deref().and_then(Path::parent) {
            Some(dir) if !dir.as_os_str().is_empty() => dir.join(path),
            _ => path,
        }
    }

    /// Drains every message the host has sent since the last frame
    pub fn poll_host(&mut self) {
        loop {
            let SaveBackend::Host(client) = &self.backend else { return };
            match client.poll() {
                Ok(Some(message)) => self.handle_host_message(message),
                Ok(None) => return,
                Err(e) => {
                    self.host_failed(&e.to_string());
                    return;
                }
            }
        }
    }

    pub fn handle_host_message(&mut self, message: HostMessage) {
        match message {
            HostMessage::SaveFile(response) => {
                let quit = std::mem::take(&mut self.quit_after_save);
                let sent = self.saves_in_flight.pop_front().unwrap_or_default();
                self.saved(response, &sent, quit);
            }
            HostMessage::OpenFile(response) => self.opened(response),
            HostMessage::PickSavePath { default_name, filters } => {
                let initial = match &self.current_path {
                    Some(path) => path.display().to_string(),
                    None => default_name,
                };
                self.prompt = Some(PathPrompt { kind: PromptKind::Save, filters });
                self.mode_state.to_prompt(&initial);
            }
            HostMessage::PickOpenPath { filters } => {
                self.prompt = Some(PathPrompt { kind: PromptKind::Open, filters });
                self.mode_state.to_prompt("");
            }
        }
    }

    /// Sends the path prompt's answer back to the blocked host
    pub fn answer_prompt(&mut self, input: Option<String>) {
        if self.prompt.take().is_none() {
            return;
        }
        let answer = input
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(|s| expand_tilde(Path::new(&s)));

        if let SaveBackend::Host(client) = &self.backend {
            if let Err(e) = client.answer_dialog(answer) {
                self.host_failed(&e.to_string());
            }
        }
    }

    /// `sent` is the text the save wrote; edits made since keep the document modified
    fn saved(&mut self, response: SaveFileResponse, sent: &str, quit: bool) {
        match (response.success, response.file_path) {
            (true, Some(path)) => {
                {
                    let mut doc = self.document.borrow_mut();
                    if doc.text == sent {
                        doc.modified = false;
                    }
                }
                self.set_message(&format!("Saved {}", path.display()), MessageType::Success);
                // Download saves always target document.md, never a working path
                if self.is_desktop() {
                    self.current_path = Some(path);
                }
                if quit || self.quit_after_save {
                    self.quit_after_save = false;
                    self.request_quit(false);
                }
            }
            _ => {
                self.quit_after_save = false;
                let error = response.error.unwrap_or_else(|| "Save failed".to_string());
                self.set_message(&error, MessageType::Error);
            }
        }
    }

    fn opened(&mut self, response: OpenFileResponse) {
        match (response.success, response.content) {
            (true, Some(content)) => {
                let path = response.file_path;
                let name = path.as_ref().map(|p| p.display().to_string()).unwrap_or_default();
                self.load_document(content, path);
                self.set_message(&format!("Opened {}", name), MessageType::Success);
            }
            _ => {
                let error = response.error.unwrap_or_else(|| "Open failed".to_string());
                self.set_message(&error, MessageType::Error);
            }
        }
    }

    /// The host thread is gone: keep working with download saves
    fn host_failed(&mut self, error: &str) {
        warn!(error, "file host unavailable, falling back to download saves");
        self.backend = SaveBackend::Download(DownloadSaver::new(&self.config.download_dir));
        self.prompt = None;
        self.quit_after_save = false;
        self.saves_in_flight.clear();
        self.set_message(&format!("File host unavailable: {}", error), MessageType::Error);
    }
}
