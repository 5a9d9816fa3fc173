//! File dialogs
//!
//! The host asks for paths through [`FileDialog`]. In the terminal build the
//! dialog is a bridge: the request travels to the UI thread, which shows a
//! path prompt and sends the answer back.

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};

use tracing::warn;

use super::protocol::{decode, encode, DialogAnswer, FileFilter, HostMessage};

pub trait FileDialog {
    /// Asks for a destination. `None` when the user cancels.
    fn pick_save_path(&mut self, default_name: &str, filters: &[FileFilter]) -> Option<PathBuf>;

    /// Asks for an existing file. `None` when the user cancels.
    fn pick_open_path(&mut self, filters: &[FileFilter]) -> Option<PathBuf>;
}

/// Forwards prompts to the UI and blocks until it answers
pub struct ChannelDialog {
    events: Sender<String>,
    answers: Receiver<String>,
}

impl ChannelDialog {
    pub fn new(events: Sender<String>, answers: Receiver<String>) -> Self {
        Self { events, answers }
    }

    fn ask(&self, prompt: HostMessage) -> Option<PathBuf> {
        let raw = match encode(&prompt) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "failed to encode dialog prompt");
                return None;
            }
        };
        // A closed channel means the UI is gone; treat as cancel
        self.events.send(raw).ok()?;
        let answer = self.answers.recv().ok()?;
        match decode::<DialogAnswer>(&answer) {
            Ok(path) => path,
            Err(e) => {
                warn!(error = %e, "malformed dialog answer");
                None
            }
        }
    }
}

impl FileDialog for ChannelDialog {
    fn pick_save_path(&mut self, default_name: &str, filters: &[FileFilter]) -> Option<PathBuf> {
        self.ask(HostMessage::PickSavePath {
            default_name: default_name.to_string(),
            filters: filters.to_vec(),
        })
    }

    fn pick_open_path(&mut self, filters: &[FileFilter]) -> Option<PathBuf> {
        self.ask(HostMessage::PickOpenPath { filters: filters.to_vec() })
    }
}
