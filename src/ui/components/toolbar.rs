//! Toolbar Component
//!
//! One row of action buttons whose labels follow the display flags.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::markdown::style::{GUTTER, TEXT};

pub struct Toolbar {
    show_line_numbers: bool,
    preview: bool,
    desktop: bool,
}

impl Toolbar {
    pub fn new(show_line_numbers: bool, preview: bool) -> Self {
        Self { show_line_numbers, preview, desktop: false }
    }

    /// Adds the open button, which needs the file host
    pub fn desktop(mut self, desktop: bool) -> Self {
        self.desktop = desktop;
        self
    }

    /// (key, label) per button, left to right
    pub fn buttons(&self) -> Vec<(&'static str, &'static str)> {
        let numbers = if self.show_line_numbers { "Hide Numbers" } else { "Show Numbers" };
        let view = if self.preview { "Show Raw" } else { "Show Preview" };
        let mut buttons = vec![("F2", numbers), ("F3", view), ("^S", "Save as .md")];
        if self.desktop {
            buttons.push(("^O", "Open"));
        }
        buttons
    }
}

impl Widget for Toolbar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let bar = Style::default().bg(GUTTER).fg(TEXT);
        buf.set_style(area, bar);

        let mut spans = vec![Span::styled(" ", bar)];
        for (key, label) in self.buttons() {
            spans.push(Span::styled(key, bar.fg(Color::Magenta).add_modifier(Modifier::BOLD)));
            spans.push(Span::styled(format!(" [{}]", label), bar));
            spans.push(Span::styled("  ", bar));
        }
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_follow_flags() {
        let labels: Vec<_> = Toolbar::new(false, true).buttons().into_iter().map(|(_, l)| l).collect();
        assert_eq!(labels, vec!["Show Numbers", "Show Raw", "Save as .md"]);

        let labels: Vec<_> = Toolbar::new(true, false).buttons().into_iter().map(|(_, l)| l).collect();
        assert_eq!(labels, vec!["Hide Numbers", "Show Preview", "Save as .md"]);
    }

    #[test]
    fn test_open_button_only_on_desktop() {
        assert_eq!(Toolbar::new(false, true).desktop(true).buttons().len(), 4);
        assert_eq!(Toolbar::new(false, true).buttons().len(), 3);
    }

    #[test]
    fn test_render() {
        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buffer::empty(area);
        Toolbar::new(false, true).render(area, &mut buf);
        let text: String = (0..80).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(text.contains("F2 [Show Numbers]"));
        assert!(text.contains("^S [Save as .md]"));
    }
}
