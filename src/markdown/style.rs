//! Preview and raw style sets
//!
//! Both sets style the same source text. Preview formats headings, emphasis,
//! links, quotes and lists and conceals URL markup; raw keeps every markdown
//! character visible with light colouring only.

use ratatui::style::{Color, Modifier, Style};

use super::syntax::{LineSyntax, Tag};

pub const TEXT: Color = Color::Rgb(0x24, 0x29, 0x2e);
pub const LINK: Color = Color::Rgb(0x09, 0x69, 0xda);
pub const MUTED: Color = Color::Rgb(0x6a, 0x73, 0x7d);
pub const HEADING2: Color = Color::Rgb(0x1f, 0x6f, 0xeb);
pub const HEADING3: Color = Color::Rgb(0x82, 0x50, 0xdf);
pub const CODE: Color = Color::Rgb(0xcf, 0x22, 0x2e);
pub const PAPER: Color = Color::Rgb(0xff, 0xff, 0xff);
pub const GUTTER: Color = Color::Rgb(0xf6, 0xf8, 0xfa);
pub const SELECTION: Color = Color::Rgb(0xb6, 0xd7, 0xff);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StyleSet {
    #[default]
    Preview,
    Raw,
}

impl StyleSet {
    pub fn from_preview(preview: bool) -> Self {
        if preview { Self::Preview } else { Self::Raw }
    }

    pub fn is_preview(&self) -> bool {
        *self == Self::Preview
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Preview => Self::Raw,
            Self::Raw => Self::Preview,
        }
    }

    pub fn style_for(&self, tag: Tag) -> Style {
        match self {
            Self::Preview => preview_style(tag),
            Self::Raw => raw_style(tag),
        }
    }

    /// Style of one char: the line's block style patched with its inline tag
    pub fn style_at(&self, syntax: &LineSyntax, col: usize) -> Style {
        let base = self.style_for(syntax.block);
        match syntax.inline_at(col) {
            Some(tag) => base.patch(self.style_for(tag)),
            None => base,
        }
    }
}

fn preview_style(tag: Tag) -> Style {
    let bold = Modifier::BOLD;
    match tag {
        Tag::Plain => Style::default(),
        Tag::Heading1 => Style::default().fg(TEXT).add_modifier(bold | Modifier::UNDERLINED),
        Tag::Heading2 => Style::default().fg(HEADING2).add_modifier(bold),
        Tag::Heading3 => Style::default().fg(HEADING3).add_modifier(bold),
        Tag::Strong => Style::default().add_modifier(bold),
        Tag::Emphasis => Style::default().add_modifier(Modifier::ITALIC),
        Tag::Link => Style::default().fg(LINK).add_modifier(Modifier::UNDERLINED),
        Tag::Url => Style::default().add_modifier(Modifier::HIDDEN),
        Tag::Quote => Style::default().fg(MUTED).add_modifier(Modifier::ITALIC),
        Tag::List => Style::default().fg(TEXT),
        Tag::Code | Tag::CodeFence => Style::default().fg(CODE),
        Tag::Rule => Style::default().fg(MUTED),
    }
}

fn raw_style(tag: Tag) -> Style {
    match tag {
        Tag::Heading1 | Tag::Heading2 | Tag::Heading3 | Tag::Quote | Tag::List => {
            Style::default().fg(TEXT)
        }
        Tag::Strong => Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
        Tag::Emphasis => Style::default().fg(TEXT).add_modifier(Modifier::ITALIC),
        Tag::Link => Style::default().fg(LINK),
        Tag::Url => Style::default().fg(LINK).add_modifier(Modifier::UNDERLINED),
        Tag::Plain | Tag::Code | Tag::CodeFence | Tag::Rule => Style::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::syntax::highlight_line;

    #[test]
    fn test_toggle_twice_restores_set() {
        let set = StyleSet::Preview;
        assert_eq!(set.toggled(), StyleSet::Raw);
        assert_eq!(set.toggled().toggled(), set);
    }

    #[test]
    fn test_preview_conceals_urls_raw_shows_them() {
        let preview = StyleSet::Preview.style_for(Tag::Url);
        let raw = StyleSet::Raw.style_for(Tag::Url);
        assert!(preview.add_modifier.contains(Modifier::HIDDEN));
        assert!(!raw.add_modifier.contains(Modifier::HIDDEN));
    }

    #[test]
    fn test_no_raw_style_hides_text() {
        let all = [
            Tag::Plain, Tag::Heading1, Tag::Heading2, Tag::Heading3, Tag::Strong,
            Tag::Emphasis, Tag::Link, Tag::Url, Tag::Quote, Tag::List, Tag::Code,
            Tag::CodeFence, Tag::Rule,
        ];
        for tag in all {
            assert!(!StyleSet::Raw.style_for(tag).add_modifier.contains(Modifier::HIDDEN));
        }
    }

    #[test]
    fn test_style_at_patches_inline_over_block() {
        let (syntax, _) = highlight_line("# Title with *emphasis*", false);
        let style = StyleSet::Preview.style_at(&syntax, 15);
        assert!(style.add_modifier.contains(Modifier::BOLD));
        assert!(style.add_modifier.contains(Modifier::ITALIC));
        assert_eq!(StyleSet::Preview.style_at(&syntax, 2).fg, Some(TEXT));
    }

    #[test]
    fn test_from_preview() {
        assert!(StyleSet::from_preview(true).is_preview());
        assert_eq!(StyleSet::from_preview(false), StyleSet::Raw);
    }
}
