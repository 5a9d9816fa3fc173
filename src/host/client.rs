//! Host client
//!
//! The editor's end of the host channel. Calls only enqueue requests; the
//! UI loop collects replies and dialog prompts with [`HostClient::poll`].

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use tracing::{debug, info};

use crate::error::{HostError, HostResult};

use super::dialog::{ChannelDialog, FileDialog};
use super::protocol::{decode, encode, DialogAnswer, HostMessage, HostRequest};
use super::service::FileHost;

pub struct HostClient {
    requests: Sender<String>,
    events: Receiver<String>,
    answers: Sender<String>,
}

impl HostClient {
    /// Starts a host whose path prompts are shown by the UI
    pub fn spawn() -> HostResult<Self> {
        let (event_tx, event_rx) = mpsc::channel();
        let (answer_tx, answer_rx) = mpsc::channel();
        let dialog = ChannelDialog::new(event_tx.clone(), answer_rx);
        Self::start(dialog, event_tx, event_rx, answer_tx)
    }

    /// Starts a host with its own dialog implementation
    #[cfg(test)]
    pub fn spawn_with<D: FileDialog + Send + 'static>(dialog: D) -> HostResult<Self> {
        let (event_tx, event_rx) = mpsc::channel();
        let (answer_tx, _answer_rx) = mpsc::channel();
        Self::start(dialog, event_tx, event_rx, answer_tx)
    }

    fn start<D: FileDialog + Send + 'static>(
        dialog: D,
        event_tx: Sender<String>,
        event_rx: Receiver<String>,
        answer_tx: Sender<String>,
    ) -> HostResult<Self> {
        let (request_tx, request_rx) = mpsc::channel();
        thread::Builder::new()
            .name("file-host".into())
            .spawn(move || FileHost::new(dialog).serve(request_rx, event_tx))
            .map_err(HostError::Spawn)?;
        info!("file host started");

        Ok(Self {
            requests: request_tx,
            events: event_rx,
            answers: answer_tx,
        })
    }

    fn send(&self, request: &HostRequest) -> HostResult<()> {
        let raw = encode(request)?;
        self.requests.send(raw).map_err(|_| HostError::Disconnected)
    }

    pub fn save_file(&self, content: &str, path: Option<PathBuf>) -> HostResult<()> {
        debug!(has_path = path.is_some(), "requesting save");
        self.send(&HostRequest::SaveFile {
            content: content.to_string(),
            file_path: path,
        })
    }

    pub fn open_file(&self) -> HostResult<()> {
        self.send(&HostRequest::OpenFile)
    }

    pub fn open_path(&self, path: PathBuf) -> HostResult<()> {
        self.send(&HostRequest::OpenPath { file_path: path })
    }

    /// Answers the prompt the host is blocked on
    pub fn answer_dialog(&self, answer: DialogAnswer) -> HostResult<()> {
        let raw = encode(&answer)?;
        self.answers.send(raw).map_err(|_| HostError::Disconnected)
    }

    /// Next message from the host, without blocking
    pub fn poll(&self) -> HostResult<Option<HostMessage>> {
        match self.events.try_recv() {
            Ok(raw) => Ok(Some(decode(&raw)?)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(HostError::Disconnected),
        }
    }

    #[cfg(test)]
    pub fn wait(&self, timeout: std::time::Duration) -> HostResult<HostMessage> {
        use mpsc::RecvTimeoutError;

        match self.events.recv_timeout(timeout) {
            Ok(raw) => decode(&raw),
            Err(RecvTimeoutError::Timeout) => Err(HostError::Timeout),
            Err(RecvTimeoutError::Disconnected) => Err(HostError::Disconnected),
        }
    }
}
