//! Typed UI events.
//!
//! Key presses are mapped to a tagged `AppEvent` before dispatch, so the app
//! context never inspects raw key codes or string widget ids.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ui::layout::Direction;

/// Everything the UI loop can ask the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// Activate the day cell under the cursor (or a specific day).
    DayActivated(u8),
    /// Close the open reveal panel.
    CloseRequested,
    /// Move the grid cursor.
    MoveCursor(Direction),
    /// Flip between the dark and light theme.
    ToggleTheme,
    /// Leave the application.
    Quit,
}

/// Map a key press to an event. `selected_day` is the day currently under the
/// grid cursor; `panel_open` routes close/quit keys to the right target.
pub fn from_key(key: KeyEvent, selected_day: u8, panel_open: bool) -> Option<AppEvent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(AppEvent::Quit);
    }

    if panel_open {
        // A reveal panel swallows everything except its close keys and the
        // theme toggle; Esc closes the panel rather than the app.
        return match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Some(AppEvent::CloseRequested),
            KeyCode::Char('t') => Some(AppEvent::ToggleTheme),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => Some(AppEvent::Quit),
        KeyCode::Enter | KeyCode::Char(' ') => Some(AppEvent::DayActivated(selected_day)),
        KeyCode::Up | KeyCode::Char('k') => Some(AppEvent::MoveCursor(Direction::Up)),
        KeyCode::Down | KeyCode::Char('j') => Some(AppEvent::MoveCursor(Direction::Down)),
        KeyCode::Left | KeyCode::Char('h') => Some(AppEvent::MoveCursor(Direction::Left)),
        KeyCode::Right | KeyCode::Char('l') => Some(AppEvent::MoveCursor(Direction::Right)),
        KeyCode::Char('t') => Some(AppEvent::ToggleTheme),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_grid_keys() {
        assert_eq!(
            from_key(key(KeyCode::Enter), 7, false),
            Some(AppEvent::DayActivated(7))
        );
        assert_eq!(
            from_key(key(KeyCode::Char('j')), 1, false),
            Some(AppEvent::MoveCursor(Direction::Down))
        );
        assert_eq!(from_key(key(KeyCode::Esc), 1, false), Some(AppEvent::Quit));
        assert_eq!(
            from_key(key(KeyCode::Char('t')), 1, false),
            Some(AppEvent::ToggleTheme)
        );
    }

    #[test]
    fn test_panel_keys() {
        assert_eq!(
            from_key(key(KeyCode::Esc), 7, true),
            Some(AppEvent::CloseRequested)
        );
        assert_eq!(
            from_key(key(KeyCode::Enter), 7, true),
            Some(AppEvent::CloseRequested)
        );
        // Grid navigation is inert while a panel is open
        assert_eq!(from_key(key(KeyCode::Up), 7, true), None);
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(from_key(key, 1, false), Some(AppEvent::Quit));
        assert_eq!(from_key(key, 1, true), Some(AppEvent::Quit));
    }
}
