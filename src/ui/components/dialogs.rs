//! Dialog popups (confirm, file path)

use std::path::Path;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Widget, Wrap},
};

use crate::host::protocol::FileFilter;

use super::input_field::InputField;
use super::layout::{centered_rect_fixed, create_popup_block};

pub struct ConfirmDialog<'a> {
    title: &'a str,
    message: &'a str,
}

impl<'a> ConfirmDialog<'a> {
    pub fn new(title: &'a str, message: &'a str) -> Self {
        Self { title, message }
    }
}

impl Widget for ConfirmDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_area = centered_rect_fixed(50, 6, area);
        Clear.render(popup_area, buf);

        let block = create_popup_block(self.title, Color::Yellow);
        let inner = block.inner(popup_area);
        block.render(popup_area, buf);
        if inner.height < 4 {
            return;
        }

        Paragraph::new(self.message)
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: true })
            .render(Rect::new(inner.x, inner.y, inner.width, 2), buf);

        let hint = Line::from(vec![
            Span::styled("[y]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" Yes  "),
            Span::styled("[n]", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(" No"),
        ]);
        buf.set_line(inner.x, inner.y + 3, &hint, inner.width);
    }
}

/// Stands in for the native file dialog: a path entry with the filter list
pub struct PathDialog<'a> {
    title: &'a str,
    value: &'a str,
    cursor: usize,
    filters: &'a [FileFilter],
}

impl<'a> PathDialog<'a> {
    pub fn new(title: &'a str, value: &'a str, cursor: usize) -> Self {
        Self { title, value, cursor, filters: &[] }
    }

    pub fn filters(mut self, filters: &'a [FileFilter]) -> Self {
        self.filters = filters;
        self
    }
}

/// "Markdown Files (*.md)"
pub fn describe_filter(filter: &FileFilter) -> String {
    let patterns: Vec<String> = filter
        .extensions
        .iter()
        .map(|ext| if ext == "*" { "*".to_string() } else { format!("*.{}", ext) })
        .collect();
    format!("{} ({})", filter.name, patterns.join(", "))
}

/// Index of the first filter accepting `value`, wildcards included
pub fn matching_filter(filters: &[FileFilter], value: &str) -> Option<usize> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    filters.iter().position(|f| f.matches(Path::new(value)))
}

fn filter_line(filters: &[FileFilter], active: Option<usize>, width: usize) -> Line<'static> {
    let mut spans = Vec::new();
    let mut used = 0;
    for (i, filter) in filters.iter().enumerate() {
        let sep = if i > 0 { " | " } else { "" };
        let text = format!("{}{}", sep, describe_filter(filter));
        let len = text.chars().count();
        if used + len > width {
            spans.push(Span::styled("…", Style::default().fg(Color::DarkGray)));
            break;
        }
        used += len;
        let style = if active == Some(i) {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(text, style));
    }
    Line::from(spans)
}

impl Widget for PathDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_area = centered_rect_fixed(60, 7, area);
        Clear.render(popup_area, buf);

        let block = create_popup_block(self.title, Color::Magenta);
        let inner = block.inner(popup_area);
        block.render(popup_area, buf);
        if inner.height < 2 {
            return;
        }

        InputField::new("Path:", self.value, self.cursor)
            .render(Rect::new(inner.x, inner.y, inner.width, 2), buf);

        if inner.height >= 4 && !self.filters.is_empty() {
            let active = matching_filter(self.filters, self.value);
            let line = filter_line(self.filters, active, inner.width as usize);
            buf.set_line(inner.x, inner.y + 3, &line, inner.width);
        }
        if inner.height >= 5 {
            let hint = Line::from(vec![
                Span::styled("enter", Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)),
                Span::styled(" confirm  ", Style::default().fg(Color::Gray)),
                Span::styled("esc", Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)),
                Span::styled(" cancel", Style::default().fg(Color::Gray)),
            ]);
            buf.set_line(inner.x, inner.y + 4, &hint, inner.width);
        }
    }
}
