//! Theme system for the calendar UI.
//!
//! Two presets, dark and light, toggled at runtime with no effect on
//! calendar state. Cell colors distinguish locked, openable, and
//! already-opened days.

use ratatui::style::Color;

/// Which preset is active. Toggling is purely cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    pub fn toggled(self) -> Self {
        match self {
            ThemeVariant::Dark => ThemeVariant::Light,
            ThemeVariant::Light => ThemeVariant::Dark,
        }
    }

    pub fn theme(self) -> Theme {
        match self {
            ThemeVariant::Dark => Theme::dark(),
            ThemeVariant::Light => Theme::light(),
        }
    }

    /// Parse a preset name from config. Unknown names fall back to dark.
    pub fn from_preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "dark" | "default" => Some(ThemeVariant::Dark),
            "light" => Some(ThemeVariant::Light),
            _ => None,
        }
    }
}

/// Theme colors for the UI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Main background color
    pub background: Color,
    /// Primary text color
    pub foreground: Color,
    /// Accent color (borders, titles)
    pub accent: Color,
    /// Dimmed text (status bar, hints)
    pub dimmed: Color,
    /// Background of an openable, not-yet-opened cell
    pub cell_bg: Color,
    /// Background of a locked cell
    pub cell_locked_bg: Color,
    /// Text color on a locked cell
    pub cell_locked_fg: Color,
    /// Background of an opened cell
    pub cell_opened_bg: Color,
    /// Border highlight for the cell under the cursor
    pub cursor: Color,
    /// Locked-day notice text
    pub notice: Color,
    /// Failed-request panel text
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark preset. Cell colors follow the original calendar styling:
    /// grey unopened, green opened, red locked.
    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(13, 17, 22),      // #0d1116
            foreground: Color::Rgb(229, 234, 241),   // #e5eaf1
            accent: Color::Rgb(26, 116, 49),         // #1a7431 (pine green)
            dimmed: Color::Rgb(156, 163, 175),       // #9ca3af
            cell_bg: Color::Rgb(51, 51, 51),         // #333333
            cell_locked_bg: Color::Rgb(238, 46, 49), // #ee2e31
            cell_locked_fg: Color::Rgb(255, 204, 204), // #ffcccc
            cell_opened_bg: Color::Rgb(45, 198, 83), // #2dc653
            cursor: Color::Rgb(250, 189, 47),        // #fabd2f
            notice: Color::Rgb(249, 226, 175),       // #f9e2af
            error: Color::Rgb(243, 139, 168),        // #f38ba8
        }
    }

    /// Light preset
    pub fn light() -> Self {
        Self {
            background: Color::Rgb(239, 241, 245),    // #eff1f5
            foreground: Color::Rgb(76, 79, 105),      // #4c4f69
            accent: Color::Rgb(26, 116, 49),          // #1a7431
            dimmed: Color::Rgb(108, 111, 133),        // #6c6f85
            cell_bg: Color::Rgb(204, 208, 218),       // #ccd0da
            cell_locked_bg: Color::Rgb(221, 120, 120), // #dd7878
            cell_locked_fg: Color::Rgb(114, 17, 19),  // #721113
            cell_opened_bg: Color::Rgb(109, 212, 140), // #6dd48c
            cursor: Color::Rgb(223, 142, 29),         // #df8e1d
            notice: Color::Rgb(136, 57, 239),         // #8839ef
            error: Color::Rgb(210, 15, 57),           // #d20f39
        }
    }
}
