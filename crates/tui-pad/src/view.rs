//! Cell-width arithmetic for the text area.

use unicode_width::UnicodeWidthChar;

/// Columns a tab advances.
pub const TAB_WIDTH: usize = 4;

/// Terminal cells occupied by `c`. Control characters are drawn as one replacement cell.
pub fn cell_width(c: char) -> usize {
    match c {
        '\t' => TAB_WIDTH,
        c if c.is_control() => 1,
        c => c.width().unwrap_or(1),
    }
}

/// Cells occupied by the first `column` characters of `line`.
pub fn visual_x(line: &str, column: usize) -> usize {
    line.chars().take(column).map(cell_width).sum()
}

/// Scroll offset keeping `position` inside a window of `extent` cells starting at `scroll`.
pub fn scroll_to_fit(position: usize, scroll: usize, extent: usize) -> usize {
    if extent == 0 {
        return scroll;
    }
    if position < scroll {
        position
    } else if position >= scroll + extent {
        position + 1 - extent
    } else {
        scroll
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_and_tab_widths() {
        assert_eq!(cell_width('a'), 1);
        assert_eq!(cell_width('中'), 2);
        assert_eq!(cell_width('\t'), TAB_WIDTH);
        assert_eq!(visual_x("a中b", 2), 3);
        assert_eq!(visual_x("a中b", 10), 4);
    }

    #[test]
    fn test_scroll_to_fit() {
        assert_eq!(scroll_to_fit(5, 0, 10), 0);
        assert_eq!(scroll_to_fit(12, 0, 10), 3);
        assert_eq!(scroll_to_fit(2, 5, 10), 2);
        assert_eq!(scroll_to_fit(7, 7, 0), 7);
    }
}
