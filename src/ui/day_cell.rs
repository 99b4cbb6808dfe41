//! Day cell widget.
//!
//! Renders one calendar cell: background by lock/open state, day number
//! centered, cursor marker on the selected cell.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use super::theme::Theme;

/// Visual state of a cell, resolved by the caller from calendar state and
/// the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    /// Unlock date still in the future
    Locked,
    /// Openable but not yet opened this session
    Openable,
    /// Opened this session
    Opened,
}

pub struct DayCell<'a> {
    day: u8,
    state: CellState,
    selected: bool,
    theme: &'a Theme,
}

impl<'a> DayCell<'a> {
    pub fn new(day: u8, state: CellState, theme: &'a Theme) -> Self {
        Self {
            day,
            state,
            selected: false,
            theme,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    fn label(&self) -> String {
        if self.selected {
            format!("[ {} ]", self.day)
        } else {
            self.day.to_string()
        }
    }
}

impl<'a> Widget for DayCell<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let (bg, fg) = match self.state {
            CellState::Locked => (self.theme.cell_locked_bg, self.theme.cell_locked_fg),
            CellState::Openable => (self.theme.cell_bg, self.theme.foreground),
            CellState::Opened => (self.theme.cell_opened_bg, self.theme.background),
        };

        // Fill background
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_bg(bg);
                    cell.set_char(' ');
                }
            }
        }

        // Day number, centered
        let label = self.label();
        let label_width = label.width() as u16;
        if label_width > area.width {
            return;
        }
        let x = area.x + (area.width - label_width) / 2;
        let y = area.y + area.height / 2;

        let mut style = Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD);
        if self.selected {
            style = style.fg(self.theme.cursor);
        }
        buf.set_string(x, y, label, style);
    }
}
