use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ConfigError;

pub const APP_NAME: &str = "vim-editor";

pub const WELCOME_TEXT: &str = "# Welcome to Vim Editor\n\nStart typing here...\n\n**Bold text** and *italic text*\n\n## Features\n- Markdown support\n- Vim keybindings\n- Clean interface";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub show_line_numbers: bool,

    #[serde(default = "default_preview")]
    pub preview: bool,

    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,

    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    /// Document shown when no file is opened at startup
    #[serde(default)]
    pub initial_content: Option<String>,
}

fn default_preview() -> bool {
    true
}

fn default_download_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn default_tick_rate_ms() -> u64 {
    100
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            show_line_numbers: false,
            preview: default_preview(),
            download_dir: default_download_dir(),
            tick_rate_ms: default_tick_rate_ms(),
            initial_content: None,
        }
    }
}

impl AppConfig {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_NAME)
            .join("config.toml")
    }

    pub fn parse(raw: &str, path: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.download_dir = expand_tilde(&config.download_dir);
        Ok(config)
    }

    /// `Ok(None)` when the file does not exist
    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        match fs::read_to_string(path) {
            Ok(raw) => Self::parse(&raw, path).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Loads the user config, falling back to defaults on any problem
    pub fn load() -> Self {
        let path = Self::config_path();
        match Self::load_from(&path) {
            Ok(Some(config)) => {
                info!(path = %path.display(), "loaded config");
                config
            }
            Ok(None) => Self::default(),
            Err(e) => {
                warn!(error = %e, "using default config");
                Self::default()
            }
        }
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(10))
    }

    pub fn display(&self) -> DisplayConfig {
        DisplayConfig {
            show_line_numbers: self.show_line_numbers,
            preview: self.preview,
        }
    }

    pub fn initial_text(&self) -> &str {
        self.initial_content.as_deref().unwrap_or(WELCOME_TEXT)
    }
}

/// Display flags owned by the application and pushed into the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    pub show_line_numbers: bool,
    pub preview: bool,
}

/// Replaces a leading `~` with the home directory
pub fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    Quit,
}

impl PendingAction {
    pub fn confirm_message(&self) -> &'static str {
        match self {
            Self::Quit => "Discard unsaved changes and quit?",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(!config.show_line_numbers);
        assert!(config.preview);
        assert_eq!(config.tick_rate(), Duration::from_millis(100));
        assert_eq!(config.initial_text(), WELCOME_TEXT);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = AppConfig::parse("show_line_numbers = true\n", Path::new("c.toml")).unwrap();
        assert!(config.show_line_numbers);
        assert!(config.preview);
        assert_eq!(config.tick_rate_ms, 100);
    }

    #[test]
    fn test_full_file() {
        let raw = r#"
            show_line_numbers = true
            preview = false
            download_dir = "/tmp/out"
            tick_rate_ms = 50
            initial_content = "hello"
        "#;
        let config = AppConfig::parse(raw, Path::new("c.toml")).unwrap();
        assert_eq!(config.display(), DisplayConfig { show_line_numbers: true, preview: false });
        assert_eq!(config.download_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.initial_text(), "hello");
    }

    #[test]
    fn test_parse_error_names_file() {
        let err = AppConfig::parse("preview = \"yes\"", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn test_load_from_missing_and_present() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        assert_eq!(AppConfig::load_from(&path).unwrap(), None);

        fs::write(&path, "preview = false").unwrap();
        let config = AppConfig::load_from(&path).unwrap().unwrap();
        assert!(!config.preview);
    }

    #[test]
    fn test_expand_tilde() {
        assert_eq!(expand_tilde(Path::new("/abs/x")), PathBuf::from("/abs/x"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde(Path::new("~/notes")), home.join("notes"));
        }
    }
}
