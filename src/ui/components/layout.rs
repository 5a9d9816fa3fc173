//! Layout helpers and common rendering utilities

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, BorderType, Borders},
};

/// Fixed size rect centred in `r`, clipped to it
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    let x = r.x + (r.width - width) / 2;
    let y = r.y + (r.height - height) / 2;
    Rect::new(x, y, width, height)
}

pub fn create_popup_block(title: &str, color: Color) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(Color::Black))
}

pub fn fill_row(buf: &mut Buffer, x: u16, y: u16, width: u16, style: Style) {
    for px in x..x.saturating_add(width) {
        if let Some(cell) = buf.cell_mut((px, y)) {
            cell.set_style(style);
        }
    }
}

/// Shortens to `max_len` chars, marking the cut with an ellipsis
pub fn truncate_with_ellipsis(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len == 0 {
        return String::new();
    }
    let kept: String = s.chars().take(max_len - 1).collect();
    format!("{}…", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fixed() {
        let r = Rect::new(0, 0, 80, 24);
        assert_eq!(centered_rect_fixed(40, 6, r), Rect::new(20, 9, 40, 6));
        // Clipped to a small terminal
        assert_eq!(centered_rect_fixed(40, 6, Rect::new(0, 0, 20, 4)), Rect::new(0, 0, 20, 4));
    }

    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("short", 10), "short");
        assert_eq!(truncate_with_ellipsis("document.md", 6), "docum…");
        assert_eq!(truncate_with_ellipsis("日本語テキスト", 4), "日本語…");
        assert_eq!(truncate_with_ellipsis("abc", 0), "");
    }
}
