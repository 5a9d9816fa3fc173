//! Single line input field

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use super::layout::fill_row;

/// Label on the first row, value on the second. The value scrolls
/// horizontally to keep the cursor visible.
pub struct InputField<'a> {
    label: &'a str,
    value: &'a str,
    cursor: usize,
    style: Style,
}

impl<'a> InputField<'a> {
    pub fn new(label: &'a str, value: &'a str, cursor: usize) -> Self {
        Self { label, value, cursor, style: Style::default().fg(Color::Yellow) }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

/// First visible char so that `cursor` fits in `width` cells
pub fn visible_offset(cursor: usize, width: usize) -> usize {
    if width == 0 {
        return cursor;
    }
    (cursor + 1).saturating_sub(width)
}

impl Widget for InputField<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 2 || area.width == 0 {
            return;
        }
        buf.set_string(area.x, area.y, self.label, Style::default().fg(Color::Cyan));

        let input_y = area.y + 1;
        let width = area.width as usize;
        fill_row(buf, area.x, input_y, area.width, Style::default().bg(Color::DarkGray));

        let offset = visible_offset(self.cursor, width);
        let visible: String = self.value.chars().skip(offset).take(width).collect();
        buf.set_string(area.x, input_y, &visible, self.style.bg(Color::DarkGray));

        let cursor_x = area.x + (self.cursor - offset) as u16;
        if let Some(cell) = buf.cell_mut((cursor_x, input_y)) {
            cell.set_style(Style::default().bg(Color::White).fg(Color::Black));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_offset() {
        assert_eq!(visible_offset(0, 10), 0);
        assert_eq!(visible_offset(9, 10), 0);
        assert_eq!(visible_offset(10, 10), 1);
        assert_eq!(visible_offset(25, 10), 16);
    }

    #[test]
    fn test_long_value_scrolls_to_cursor() {
        let area = Rect::new(0, 0, 5, 2);
        let mut buf = Buffer::empty(area);
        let value = "/home/user/notes.md";
        InputField::new("Path", value, value.chars().count()).render(area, &mut buf);

        let row: String = (0..5).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert_eq!(row, "s.md ");
        assert_eq!(buf[(4, 1)].style().bg, Some(Color::White));
    }
}
