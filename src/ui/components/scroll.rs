//! Scroll state management

/// Top-left offset of a viewport into the document
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScrollState {
    pub v_scroll: usize,
    pub h_scroll: usize,
}

impl ScrollState {
    pub fn reset(&mut self) {
        self.v_scroll = 0;
        self.h_scroll = 0;
    }

    /// Scrolls the least amount that brings `(row, col)` into a view of
    /// `height` rows and `width` columns
    pub fn follow(&mut self, (row, col): (usize, usize), height: usize, width: usize) {
        if height > 0 {
            if row < self.v_scroll {
                self.v_scroll = row;
            } else if row >= self.v_scroll + height {
                self.v_scroll = row + 1 - height;
            }
        }
        if width > 0 {
            if col < self.h_scroll {
                self.h_scroll = col;
            } else if col >= self.h_scroll + width {
                self.h_scroll = col + 1 - width;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_down_and_up() {
        let mut scroll = ScrollState::default();
        scroll.follow((12, 0), 10, 40);
        assert_eq!(scroll.v_scroll, 3);
        scroll.follow((5, 0), 10, 40);
        assert_eq!(scroll.v_scroll, 3);
        scroll.follow((1, 0), 10, 40);
        assert_eq!(scroll.v_scroll, 1);
    }

    #[test]
    fn test_follow_horizontal() {
        let mut scroll = ScrollState::default();
        scroll.follow((0, 45), 10, 40);
        assert_eq!(scroll.h_scroll, 6);
        scroll.follow((0, 0), 10, 40);
        assert_eq!(scroll.h_scroll, 0);
    }

    #[test]
    fn test_zero_sized_view_keeps_offsets() {
        let mut scroll = ScrollState { v_scroll: 4, h_scroll: 2 };
        scroll.follow((100, 100), 0, 0);
        assert_eq!(scroll, ScrollState { v_scroll: 4, h_scroll: 2 });
        scroll.reset();
        assert_eq!(scroll, ScrollState::default());
    }
}
