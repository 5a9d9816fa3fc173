//! Download saver
//!
//! Save target for builds without the file host: the document always goes
//! to `document.md` in the download directory, overwriting, never prompting.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::host::protocol::DEFAULT_FILE_NAME;

#[derive(Debug, Clone)]
pub struct DownloadSaver {
    dir: PathBuf,
}

impl DownloadSaver {
    pub fn new(dir: &Path) -> Self {
        Self { dir: dir.to_path_buf() }
    }

    pub fn target(&self) -> PathBuf {
        self.dir.join(DEFAULT_FILE_NAME)
    }

    pub fn save(&self, content: &str) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let target = self.target();
        fs::write(&target, content)?;
        info!(path = %target.display(), bytes = content.len(), "downloaded document");
        Ok(target)
    }
}
