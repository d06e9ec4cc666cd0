// SPDX-License-Identifier: MIT

//! The line renderer the status composer writes into.

use crossterm::style::Color;
use unicode_width::UnicodeWidthChar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Style {
    pub fg: Color,
    pub bg: Color,
    pub reversed: bool,
}

impl Style {
    /// Toggle reverse video, the attribute used for alerts and the fake
    /// prompt cursor.
    pub(crate) fn reverse(self) -> Self {
        Self {
            reversed: !self.reversed,
            ..self
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fg: Color::Reset,
            bg: Color::Reset,
            reversed: false,
        }
    }
}

/// A single status row accepting cursor moves and styled writes. The
/// composer never owns the renderer; it is handed one per redraw.
pub(crate) trait Screen {
    fn cursor_move(&mut self, col: usize);

    fn put_char(&mut self, ch: char, style: Style);

    fn put_str(&mut self, text: &str, style: Style) {
        for ch in text.chars() {
            self.put_char(ch, style);
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Cell {
    ch: char,
    style: Style,
}

/// Fixed-width row of styled cells. Writes past the declared width are
/// dropped, never wrapped. Wide characters occupy extra cells, marked with
/// a NUL continuation so `contents` stays column-accurate.
#[derive(Debug)]
pub(crate) struct GridScreen {
    cells: Vec<Cell>,
    cursor: usize,
}

impl GridScreen {
    pub(crate) fn new(width: usize) -> Self {
        Self {
            cells: vec![
                Cell {
                    ch: ' ',
                    style: Style::default(),
                };
                width
            ],
            cursor: 0,
        }
    }

    pub(crate) fn width(&self) -> usize {
        self.cells.len()
    }

    pub(crate) fn contents(&self) -> String {
        self.cells
            .iter()
            .filter(|cell| cell.ch != '\0')
            .map(|cell| cell.ch)
            .collect()
    }

    pub(crate) fn char_at(&self, col: usize) -> Option<char> {
        self.cells.get(col).map(|cell| cell.ch)
    }

    pub(crate) fn style_at(&self, col: usize) -> Option<Style> {
        self.cells.get(col).map(|cell| cell.style)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (char, Style)> + '_ {
        self.cells.iter().map(|cell| (cell.ch, cell.style))
    }
}

impl Screen for GridScreen {
    fn cursor_move(&mut self, col: usize) {
        self.cursor = col;
    }

    fn put_char(&mut self, ch: char, style: Style) {
        let width = UnicodeWidthChar::width(ch).unwrap_or(1).max(1);
        if self.cursor + width > self.cells.len() {
            self.cursor += width;
            return;
        }
        self.cells[self.cursor] = Cell { ch, style };
        for k in 1..width {
            self.cells[self.cursor + k] = Cell { ch: '\0', style };
        }
        self.cursor += width;
    }
}

pub(crate) fn display_width(text: &str) -> usize {
    text.chars()
        .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(1).max(1))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_past_width_are_dropped() {
        let mut grid = GridScreen::new(4);
        grid.put_str("abcdef", Style::default());
        assert_eq!(grid.contents(), "abcd");
    }

    #[test]
    fn test_cursor_move_overwrites() {
        let mut grid = GridScreen::new(8);
        grid.put_str("aaaaaaaa", Style::default());
        grid.cursor_move(2);
        grid.put_str("bb", Style::default());
        assert_eq!(grid.contents(), "aabbaaaa");
    }

    #[test]
    fn test_wide_char_occupies_two_cells() {
        let mut grid = GridScreen::new(4);
        assert_eq!(grid.width(), 4);
        grid.put_char('界', Style::default());
        grid.put_char('x', Style::default());
        assert_eq!(grid.char_at(0), Some('界'));
        assert_eq!(grid.char_at(1), Some('\0'));
        assert_eq!(grid.char_at(2), Some('x'));
        assert_eq!(grid.contents(), "界x ");
    }

    #[test]
    fn test_style_recorded_per_cell() {
        let mut grid = GridScreen::new(4);
        let rev = Style::default().reverse();
        grid.put_char('a', rev);
        grid.put_char('b', Style::default());
        assert!(grid.style_at(0).is_some_and(|s| s.reversed));
        assert!(grid.style_at(1).is_some_and(|s| !s.reversed));
    }
}
