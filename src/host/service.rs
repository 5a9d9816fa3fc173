//! File host service
//!
//! Owns file dialogs and file I/O. Results are plain response values;
//! cancellation and I/O failures are reported in them, never raised.

use std::fs;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};

use tracing::{debug, info, warn};

use super::dialog::FileDialog;
use super::protocol::{
    decode, encode, file_filters, HostMessage, HostRequest, OpenFileResponse, SaveFileResponse,
    DEFAULT_FILE_NAME,
};

pub struct FileHost<D: FileDialog> {
    dialog: D,
}

impl<D: FileDialog> FileHost<D> {
    pub fn new(dialog: D) -> Self {
        Self { dialog }
    }

    /// Writes `content` to `path`, prompting for a destination when none is given
    pub fn save_file(&mut self, content: &str, path: Option<PathBuf>) -> SaveFileResponse {
        let path = match path {
            Some(path) => path,
            None => match self.dialog.pick_save_path(DEFAULT_FILE_NAME, &file_filters()) {
                Some(path) => path,
                None => {
                    debug!("save cancelled");
                    return SaveFileResponse::failed("Save cancelled");
                }
            },
        };

        match fs::write(&path, content) {
            Ok(()) => {
                info!(path = %path.display(), bytes = content.len(), "saved file");
                SaveFileResponse::saved(path)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "save failed");
                SaveFileResponse::failed(e.to_string())
            }
        }
    }

    pub fn open_file(&mut self) -> OpenFileResponse {
        match self.dialog.pick_open_path(&file_filters()) {
            Some(path) => self.open_path(path),
            None => {
                debug!("open cancelled");
                OpenFileResponse::failed("Open cancelled")
            }
        }
    }

    /// Reads a known path without prompting
    pub fn open_path(&mut self, path: PathBuf) -> OpenFileResponse {
        match fs::read_to_string(&path) {
            Ok(content) => {
                info!(path = %path.display(), bytes = content.len(), "opened file");
                OpenFileResponse::opened(path, content)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "open failed");
                OpenFileResponse::failed(e.to_string())
            }
        }
    }

    pub fn handle(&mut self, request: HostRequest) -> HostMessage {
        match request {
            HostRequest::SaveFile { content, file_path } => {
                HostMessage::SaveFile(self.save_file(&content, file_path))
            }
            HostRequest::OpenFile => HostMessage::OpenFile(self.open_file()),
            HostRequest::OpenPath { file_path } => HostMessage::OpenFile(self.open_path(file_path)),
        }
    }

    /// Serves requests one at a time until the editor side hangs up
    pub fn serve(mut self, requests: Receiver<String>, events: Sender<String>) {
        for raw in requests {
            let request = match decode::<HostRequest>(&raw) {
                Ok(request) => request,
                Err(e) => {
                    warn!(error = %e, "dropping malformed request");
                    continue;
                }
            };
            let reply = match encode(&self.handle(request)) {
                Ok(reply) => reply,
                Err(e) => {
                    warn!(error = %e, "failed to encode reply");
                    continue;
                }
            };
            if events.send(reply).is_err() {
                break;
            }
        }
        info!("file host stopped");
    }
}
