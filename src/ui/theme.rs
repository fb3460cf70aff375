//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::WaitClass;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Badge color for free-flowing traffic.
    pub clear: Color,
    /// Badge color for any reported delay.
    pub delayed: Color,
    /// Badge color for missing readings.
    pub unavailable: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for header rows in tables.
    pub header: Style,
    /// Style for selected/highlighted rows.
    pub selected: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Magenta,
            clear: Color::Green,
            delayed: Color::Red,
            unavailable: Color::Gray,
            border: Color::Gray,
            header: Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Magenta,
            clear: Color::Green,
            delayed: Color::Red,
            unavailable: Color::Gray,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightMagenta).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Badge color for a wait-time class.
    pub fn wait_color(&self, class: WaitClass) -> Color {
        match class {
            WaitClass::Unavailable => self.unavailable,
            WaitClass::Clear => self.clear,
            WaitClass::Delayed => self.delayed,
        }
    }

    /// Badge style for a wait-time cell: white text on the class color.
    pub fn wait_style(&self, class: WaitClass) -> Style {
        let style = Style::default().bg(self.wait_color(class));
        match class {
            WaitClass::Unavailable => style.fg(Color::Black),
            WaitClass::Clear | WaitClass::Delayed => {
                style.fg(Color::White).add_modifier(Modifier::BOLD)
            }
        }
    }
}
