//! Grid geometry for the 5x5 calendar.
//!
//! Provides:
//! - Row-major day <-> (row, col) mapping
//! - Cursor navigation helpers
//! - Cell rectangle computation with gutters

use ratatui::layout::Rect;

use crate::calendar::DAY_COUNT;

/// Horizontal gap between cells
const GUTTER_X: u16 = 2;
/// Vertical gap between cells
const GUTTER_Y: u16 = 1;

/// Fixed 5x5 grid of day cells, numbered 1..=25 in row-major order:
/// ```text
///  1  2  3  4  5
///  6  7  8  9 10
///      ...
/// 21 22 23 24 25
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CalendarLayout {
    pub columns: u16,
    pub rows: u16,
}

impl Default for CalendarLayout {
    fn default() -> Self {
        Self { columns: 5, rows: 5 }
    }
}

/// Cursor movement on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl CalendarLayout {
    /// Convert a day number (1..=25) to (row, col).
    pub fn day_to_position(&self, day: u8) -> (u16, u16) {
        let index = day as u16 - 1;
        (index / self.columns, index % self.columns)
    }

    /// Convert (row, col) back to a day number.
    pub fn position_to_day(&self, row: u16, col: u16) -> u8 {
        (row * self.columns + col + 1) as u8
    }

    /// New day under the cursor after moving in `direction`, clamped at the
    /// grid edges.
    pub fn step(&self, day: u8, direction: Direction) -> u8 {
        let (row, col) = self.day_to_position(day);
        let (row, col) = match direction {
            Direction::Up => (row.saturating_sub(1), col),
            Direction::Down => ((row + 1).min(self.rows - 1), col),
            Direction::Left => (row, col.saturating_sub(1)),
            Direction::Right => (row, (col + 1).min(self.columns - 1)),
        };
        self.position_to_day(row, col).min(DAY_COUNT)
    }

    /// Rectangle of one cell inside `area`, or None when the terminal is too
    /// small to fit that cell.
    pub fn cell_rect(&self, area: Rect, day: u8) -> Option<Rect> {
        let (row, col) = self.day_to_position(day);

        let total_gutter_x = GUTTER_X * (self.columns - 1);
        let total_gutter_y = GUTTER_Y * (self.rows - 1);
        let cell_width = area.width.saturating_sub(total_gutter_x) / self.columns;
        let cell_height = area.height.saturating_sub(total_gutter_y) / self.rows;
        if cell_width < 3 || cell_height == 0 {
            return None;
        }

        let x = area.x + col * (cell_width + GUTTER_X);
        let y = area.y + row * (cell_height + GUTTER_Y);
        if y + cell_height > area.y + area.height {
            return None;
        }

        Some(Rect {
            x,
            y,
            width: cell_width,
            height: cell_height,
        })
    }
}
