//! Host wire protocol
//!
//! Every message crossing the host boundary is a JSON string. Requests flow
//! from the editor to the host; the host answers with results and, while it
//! handles a request, may ask the editor to show a path prompt.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::HostResult;

pub const DEFAULT_FILE_NAME: &str = "document.md";

/// Advisory file type filter offered by path prompts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFilter {
    pub name: String,
    pub extensions: Vec<String>,
}

impl FileFilter {
    fn new(name: &str, extensions: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
        }
    }

    pub fn matches(&self, path: &Path) -> bool {
        if self.extensions.iter().any(|e| e == "*") {
            return true;
        }
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}

pub fn file_filters() -> Vec<FileFilter> {
    vec![
        FileFilter::new("Markdown Files", &["md"]),
        FileFilter::new("Text Files", &["txt"]),
        FileFilter::new("All Files", &["*"]),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostRequest {
    #[serde(rename_all = "camelCase")]
    SaveFile {
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file_path: Option<PathBuf>,
    },
    OpenFile,
    #[serde(rename_all = "camelCase")]
    OpenPath { file_path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveFileResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SaveFileResponse {
    pub fn saved(path: PathBuf) -> Self {
        Self { success: true, file_path: Some(path), error: None }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self { success: false, file_path: None, error: Some(error.into()) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenFileResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OpenFileResponse {
    pub fn opened(path: PathBuf, content: String) -> Self {
        Self { success: true, content: Some(content), file_path: Some(path), error: None }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self { success: false, content: None, file_path: None, error: Some(error.into()) }
    }
}

/// Everything the host sends back to the editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostMessage {
    SaveFile(SaveFileResponse),
    OpenFile(OpenFileResponse),
    #[serde(rename_all = "camelCase")]
    PickSavePath { default_name: String, filters: Vec<FileFilter> },
    PickOpenPath { filters: Vec<FileFilter> },
}

/// Answer to a path prompt; `None` means cancelled
pub type DialogAnswer = Option<PathBuf>;

pub fn encode<T: Serialize>(value: &T) -> HostResult<String> {
    Ok(serde_json::to_string(value)?)
}

pub fn decode<'a, T: Deserialize<'a>>(raw: &'a str) -> HostResult<T> {
    Ok(serde_json::from_str(raw)?)
}
