//! Desktop Host
//!
//! A dedicated thread that owns file dialogs and file I/O. The editor talks
//! to it only through JSON messages on channels and never shares state.

pub mod client;
pub mod dialog;
pub mod policy;
pub mod protocol;
pub mod service;

// Re-exports
pub use client::HostClient;
pub use policy::{check_navigation, Navigation};
pub use protocol::{HostMessage, OpenFileResponse, SaveFileResponse};
