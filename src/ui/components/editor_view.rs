//! Editor view widget
//!
//! Draws document lines with per-char markdown styling, an optional
//! line-number gutter, the visual selection and the cursor. Lines are not
//! wrapped; the view scrolls horizontally instead. Horizontal positions are
//! display columns: tabs expand to the next stop and wide chars take two cells.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};
use unicode_width::UnicodeWidthChar;

use crate::editor::buffer::Pos;
use crate::input::VimMode;
use crate::markdown::style::{GUTTER, MUTED, PAPER, SELECTION, TEXT};
use crate::markdown::{LineSyntax, StyleSet};

use super::scroll::ScrollState;

const TAB_WIDTH: usize = 4;

/// Cells taken by `ch` when it starts at display column `vx`
fn char_width(ch: char, vx: usize) -> usize {
    if ch == '\t' {
        return TAB_WIDTH - vx % TAB_WIDTH;
    }
    ch.width().unwrap_or(1).max(1)
}

/// Display column where char column `col` of `line` starts
pub fn display_col(line: &str, col: usize) -> usize {
    line.chars().take(col).fold(0, |vx, ch| vx + char_width(ch, vx))
}

pub struct EditorView<'a> {
    lines: &'a [String],
    syntax: &'a [LineSyntax],
    styles: StyleSet,
    cursor: Pos,
    mode: VimMode,
    selection: Option<(Pos, Pos)>,
    show_line_numbers: bool,
    scroll: ScrollState,
}

impl<'a> EditorView<'a> {
    pub fn new(lines: &'a [String], syntax: &'a [LineSyntax]) -> Self {
        Self {
            lines,
            syntax,
            styles: StyleSet::default(),
            cursor: (0, 0),
            mode: VimMode::Normal,
            selection: None,
            show_line_numbers: false,
            scroll: ScrollState::default(),
        }
    }

    pub fn styles(mut self, styles: StyleSet) -> Self {
        self.styles = styles;
        self
    }

    pub fn cursor(mut self, cursor: Pos, mode: VimMode) -> Self {
        self.cursor = cursor;
        self.mode = mode;
        self
    }

    pub fn selection(mut self, selection: Option<(Pos, Pos)>) -> Self {
        self.selection = selection;
        self
    }

    pub fn line_numbers(mut self, show: bool) -> Self {
        self.show_line_numbers = show;
        self
    }

    pub fn scroll(mut self, scroll: ScrollState) -> Self {
        self.scroll = scroll;
        self
    }

    /// Columns taken by the gutter, separator included
    pub fn gutter_width(show: bool, line_count: usize) -> u16 {
        if !show {
            return 0;
        }
        let digits = line_count.max(1).to_string().len().max(3);
        digits as u16 + 1
    }

    fn is_selected(&self, pos: Pos) -> bool {
        self.selection.is_some_and(|(start, end)| start <= pos && pos < end)
    }

    fn cursor_style(&self) -> Style {
        match self.mode {
            VimMode::Insert => Style::default().add_modifier(Modifier::UNDERLINED | Modifier::SLOW_BLINK),
            _ => Style::default().add_modifier(Modifier::REVERSED),
        }
    }
}

impl Widget for EditorView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        buf.set_style(area, Style::default().bg(PAPER).fg(TEXT));

        let gutter = Self::gutter_width(self.show_line_numbers, self.lines.len()).min(area.width);
        let text_x = area.x + gutter;
        let text_width = area.width - gutter;
        if text_width == 0 {
            return;
        }

        for screen_row in 0..area.height {
            let row = self.scroll.v_scroll + screen_row as usize;
            let y = area.y + screen_row;

            let Some(line) = self.lines.get(row) else {
                buf.set_string(text_x, y, "~", Style::default().fg(MUTED));
                continue;
            };

            if gutter > 0 {
                render_gutter(buf, area.x, y, gutter, row);
            }
            self.render_line(buf, text_x, y, text_width, row, line);
        }
    }
}

impl EditorView<'_> {
    fn render_line(&self, buf: &mut Buffer, x: u16, y: u16, width: u16, row: usize, line: &str) {
        let syntax = self.syntax.get(row);
        let h_scroll = self.scroll.h_scroll;
        let right = h_scroll + width as usize;
        let mut vx = 0;

        for (col, ch) in line.chars().enumerate() {
            if vx >= right {
                break;
            }
            let w = char_width(ch, vx);
            let start = vx;
            vx += w;
            if vx <= h_scroll {
                continue;
            }

            let mut style = syntax.map_or_else(Style::default, |s| self.styles.style_at(s, col));
            if self.is_selected((row, col)) {
                style = style.bg(SELECTION);
            }

            // Tabs, control chars and wide chars cut by an edge become blanks
            let whole = start >= h_scroll && vx <= right;
            let symbol = if ch.is_control() || !whole { ' ' } else { ch };
            let first = start.max(h_scroll);
            let last = vx.min(right);
            for cell_x in first..last {
                let Some(cell) = buf.cell_mut((x + (cell_x - h_scroll) as u16, y)) else { continue };
                if cell_x == first || symbol == ' ' {
                    cell.set_char(symbol).set_style(style);
                } else {
                    // Trailing half of a wide char
                    cell.set_symbol("").set_style(style);
                }
            }
        }

        // Empty lines inside a selection still show one selected cell
        if line.is_empty() && h_scroll == 0 && self.is_selected((row, 0)) {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_bg(SELECTION);
            }
        }

        if row == self.cursor.0 {
            self.render_cursor(buf, x, y, width, line);
        }
    }

    fn render_cursor(&self, buf: &mut Buffer, x: u16, y: u16, width: u16, line: &str) {
        let vx = display_col(line, self.cursor.1);
        if vx < self.scroll.h_scroll || vx - self.scroll.h_scroll >= width as usize {
            return;
        }
        let cx = x + (vx - self.scroll.h_scroll) as u16;
        let style = self.cursor_style();
        if let Some(cell) = buf.cell_mut((cx, y)) {
            // Concealed chars are revealed under the cursor
            let current = cell.style().remove_modifier(Modifier::HIDDEN);
            cell.set_style(current.patch(style));
        }
    }
}

fn render_gutter(buf: &mut Buffer, x: u16, y: u16, width: u16, row: usize) {
    let number = format!("{:>w$} ", row + 1, w = width.saturating_sub(1) as usize);
    let style = Style::default().fg(MUTED).bg(GUTTER);
    buf.set_string(x, y, &number, style);
    if let Some(cell) = buf.cell_mut((x + width - 1, y)) {
        cell.set_fg(Color::Reset).set_bg(GUTTER);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::highlight_document;

    fn lines(text: &str) -> Vec<String> {
        text.split('\n').map(String::from).collect()
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol().to_string()).collect()
    }

    #[test]
    fn test_renders_text_without_gutter() {
        let doc = lines("# Title\n\nBody");
        let syntax = highlight_document(&doc[..]);
        let area = Rect::new(0, 0, 10, 4);
        let mut buf = Buffer::empty(area);
        EditorView::new(&doc, &syntax).render(area, &mut buf);

        assert_eq!(row_text(&buf, 0), "# Title   ");
        assert_eq!(row_text(&buf, 2), "Body      ");
        assert_eq!(row_text(&buf, 3), "~         ");
        assert!(buf[(2, 0)].modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_gutter_numbers() {
        let doc = lines("a\nb");
        let syntax = highlight_document(&doc[..]);
        let area = Rect::new(0, 0, 8, 2);
        let mut buf = Buffer::empty(area);
        EditorView::new(&doc, &syntax).line_numbers(true).render(area, &mut buf);

        assert_eq!(EditorView::gutter_width(true, 2), 4);
        assert_eq!(row_text(&buf, 0), "  1 a   ");
        assert_eq!(row_text(&buf, 1), "  2 b   ");
    }

    #[test]
    fn test_empty_area_is_noop() {
        let doc = lines("text");
        let syntax = highlight_document(&doc[..]);
        let mut buf = Buffer::empty(Rect::new(0, 0, 4, 1));
        let before = buf.clone();
        EditorView::new(&doc, &syntax).render(Rect::new(0, 0, 0, 0), &mut buf);
        assert_eq!(buf, before);
    }

    #[test]
    fn test_selection_and_cursor_styles() {
        let doc = lines("select me");
        let syntax = highlight_document(&doc[..]);
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);
        EditorView::new(&doc, &syntax)
            .selection(Some(((0, 0), (0, 6))))
            .cursor((0, 7), VimMode::Normal)
            .render(area, &mut buf);

        assert_eq!(buf[(3, 0)].bg, SELECTION);
        assert_eq!(buf[(6, 0)].bg, PAPER);
        assert!(buf[(7, 0)].modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_horizontal_scroll() {
        let doc = lines("0123456789");
        let syntax = highlight_document(&doc[..]);
        let area = Rect::new(0, 0, 4, 1);
        let mut buf = Buffer::empty(area);
        EditorView::new(&doc, &syntax)
            .scroll(ScrollState { v_scroll: 0, h_scroll: 6 })
            .render(area, &mut buf);
        assert_eq!(row_text(&buf, 0), "6789");
    }

    #[test]
    fn test_tabs_expand_to_tab_stops() {
        let doc = lines("\tx\nab\tc");
        let syntax = highlight_document(&doc[..]);
        let area = Rect::new(0, 0, 8, 2);
        let mut buf = Buffer::empty(area);
        EditorView::new(&doc, &syntax).cursor((0, 1), VimMode::Normal).render(area, &mut buf);

        assert_eq!(row_text(&buf, 0), "    x   ");
        assert_eq!(row_text(&buf, 1), "ab  c   ");
        assert!(buf[(4, 0)].modifier.contains(Modifier::REVERSED));
        assert_eq!(display_col("ab\tc", 3), 4);
    }

    #[test]
    fn test_wide_chars_take_two_cells() {
        let doc = lines("日本x");
        let syntax = highlight_document(&doc[..]);
        let area = Rect::new(0, 0, 6, 1);
        let mut buf = Buffer::empty(area);
        EditorView::new(&doc, &syntax).cursor((0, 2), VimMode::Normal).render(area, &mut buf);

        assert_eq!(buf[(0, 0)].symbol(), "日");
        assert_eq!(buf[(2, 0)].symbol(), "本");
        assert_eq!(buf[(4, 0)].symbol(), "x");
        assert!(buf[(4, 0)].modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_wide_char_cut_by_scroll_is_blank() {
        let doc = lines("日本");
        let syntax = highlight_document(&doc[..]);
        let area = Rect::new(0, 0, 3, 1);
        let mut buf = Buffer::empty(area);
        EditorView::new(&doc, &syntax)
            .scroll(ScrollState { v_scroll: 0, h_scroll: 1 })
            .render(area, &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), " ");
        assert_eq!(buf[(1, 0)].symbol(), "本");
    }

    #[test]
    fn test_preview_hides_url_raw_shows_it() {
        let doc = lines("[a](b)");
        let syntax = highlight_document(&doc[..]);
        let area = Rect::new(0, 0, 6, 1);

        let mut preview = Buffer::empty(area);
        EditorView::new(&doc, &syntax).cursor((1, 0), VimMode::Normal).render(area, &mut preview);
        assert!(preview[(4, 0)].modifier.contains(Modifier::HIDDEN));

        let mut raw = Buffer::empty(area);
        EditorView::new(&doc, &syntax)
            .styles(StyleSet::Raw)
            .cursor((1, 0), VimMode::Normal)
            .render(area, &mut raw);
        assert!(!raw[(4, 0)].modifier.contains(Modifier::HIDDEN));
        assert_eq!(row_text(&raw, 0), row_text(&preview, 0));
    }
}
