//! UI Module
//!
//! Terminal user interface using ratatui.

pub mod components;
pub mod renderer;

