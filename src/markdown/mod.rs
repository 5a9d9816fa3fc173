//! Markdown Module
//!
//! Syntax-aware restyling of markdown source. No HTML conversion happens;
//! the presentation layer only decides how each char of the source looks.

pub mod style;
pub mod syntax;

pub use style::StyleSet;
pub use syntax::{highlight_document, link_target_at, LineSyntax};
