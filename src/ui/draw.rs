use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::reveal::{RevealPanel, RevealState};

use super::day_cell::{CellState, DayCell};
use super::theme::Theme;

/// Reveal panel width in columns, matching the original dialog size.
const PANEL_WIDTH: u16 = 50;

/// Main draw function
pub fn draw(f: &mut Frame, app: &App) {
    let theme = app.theme();
    let area = f.area();

    // Fill background with theme color
    let bg_block = Block::default().style(Style::default().bg(theme.background));
    f.render_widget(bg_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Calendar grid
            Constraint::Length(1), // Notice line
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_header(f, app, chunks[0], &theme);
    draw_grid(f, app, chunks[1], &theme);
    draw_notice(f, app, chunks[2], &theme);
    draw_status_bar(f, app, chunks[3], &theme);

    // Reveal panel floats above everything else
    if let Some(panel) = app.panel() {
        draw_reveal_panel(f, panel, area, &theme);
    }
}

fn draw_header(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let title = format!(
        "Advent Calendar — day 1 opens {}",
        app.calendar().start_date()
    );
    let header = Paragraph::new(title)
        .style(Style::default().fg(theme.foreground).bg(theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent))
                .title(" advent-tui ")
                .style(Style::default().bg(theme.background)),
        );
    f.render_widget(header, area);
}

fn draw_grid(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    // Inset the grid a little so cells don't touch the screen edges
    let inner = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: area.height.saturating_sub(2),
    };
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let today = app.today();
    let layout = app.layout();

    for day_record in app.calendar().days() {
        let day = day_record.day;
        let Some(cell_area) = layout.cell_rect(inner, day) else {
            continue;
        };

        let state = if day_record.opened {
            CellState::Opened
        } else if app.calendar().is_locked(day, today) {
            CellState::Locked
        } else {
            CellState::Openable
        };

        let cell = DayCell::new(day, state, theme).selected(day == app.selected_day());
        f.render_widget(cell, cell_area);
    }
}

fn draw_notice(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let Some(notice) = app.notice() else {
        return;
    };
    let line = Paragraph::new(format!(" {}", notice.text))
        .style(
            Style::default()
                .fg(theme.notice)
                .bg(theme.background)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(line, area);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let status = if app.panel().is_some() {
        " Enter/Esc: close | t: theme"
    } else {
        " ↑↓←→/hjkl: move | Enter: open | t: theme | q: quit"
    };
    let status_bar =
        Paragraph::new(status).style(Style::default().fg(theme.dimmed).bg(theme.background));
    f.render_widget(status_bar, area);
}

/// Draw the reveal panel as a centered dialog over the grid.
fn draw_reveal_panel(f: &mut Frame, panel: &RevealPanel, area: Rect, theme: &Theme) {
    let text = panel.display_text();

    let width = PANEL_WIDTH.min(area.width.saturating_sub(4)).max(20);
    let inner_width = width.saturating_sub(4) as usize;
    // Wrapped body lines plus padding, borders, and the close hint
    let body_lines = (text.width() / inner_width.max(1) + 1) as u16;
    let height = (body_lines + 5).min(area.height.saturating_sub(2)).max(7);

    let dialog = centered_rect(width, height, area);
    f.render_widget(Clear, dialog);

    let body_style = match panel.state() {
        RevealState::Loading => Style::default().fg(theme.dimmed),
        RevealState::Revealed(_) => Style::default().fg(theme.foreground),
        RevealState::Failed(_) => Style::default().fg(theme.error),
    };

    let mut lines = vec![
        Line::default(),
        Line::styled(text, body_style),
        Line::default(),
    ];
    if !panel.is_loading() {
        lines.push(Line::styled(
            "Press Enter to close",
            Style::default().fg(theme.dimmed),
        ));
    }

    let dialog_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
        .title(format!(" Day {} ", panel.day()))
        .style(Style::default().bg(theme.background));

    let paragraph = Paragraph::new(lines)
        .style(Style::default().bg(theme.background))
        .block(dialog_block)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, dialog);
}

fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + r.width.saturating_sub(width) / 2;
    let y = r.y + r.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(r.width),
        height: height.min(r.height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let outer = Rect::new(0, 0, 80, 24);
        let dialog = centered_rect(50, 8, outer);
        assert_eq!(dialog.width, 50);
        assert_eq!(dialog.height, 8);
        assert_eq!(dialog.x, 15);
        assert_eq!(dialog.y, 8);
    }

    #[test]
    fn test_centered_rect_clamps_to_outer() {
        let outer = Rect::new(0, 0, 30, 6);
        let dialog = centered_rect(50, 8, outer);
        assert!(dialog.width <= outer.width);
        assert!(dialog.height <= outer.height);
    }
}
