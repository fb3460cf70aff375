//! Terminal UI rendering using ratatui.
//!
//! ## Submodules
//!
//! - [`table`]: One direction's wait-time table with colored badges
//! - [`common`]: Shared components (header, tabs, status bar, panels, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │ Tabs (common::render_tabs)           │
//! ├──────────────────────────────────────┤
//! │ USA to Canada   (table::render)      │
//! │ Canada to USA   (table::render)      │
//! │   or loading / error / no-data panel │
//! ├──────────────────────────────────────┤
//! │ Footer (common::render_footer)       │
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlay rendered on top:
//!    - common::render_help
//! ```

pub mod common;
pub mod table;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, PageState};
use crate::data::Board;

/// Minimum terminal size for usable display.
pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 12;

/// Screen row of the tab bar.
pub const TAB_ROW: u16 = 1;

/// Draw the whole screen for the current state.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = format!(
            "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );
        let paragraph = Paragraph::new(msg)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(paragraph, common::centered(area, area.width, 5));
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header bar
        Constraint::Length(1), // Tabs
        Constraint::Min(8),    // Content
        Constraint::Length(1), // Footer
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    common::render_header(frame, app, chunks[0]);
    common::render_tabs(frame, app, chunks[1]);

    match &app.state {
        PageState::Loading => common::render_loading(frame, chunks[2]),
        PageState::Error(message) => common::render_error(frame, app, message, chunks[2]),
        PageState::Ready(board) if board.is_empty() => common::render_no_data(frame, chunks[2]),
        PageState::Ready(board) => render_board(frame, app, board, chunks[2]),
    }

    common::render_footer(frame, app, chunks[3]);
    common::render_status_bar(frame, app, chunks[4]);

    if app.show_help {
        common::render_help(frame, app, area);
    }
}

fn render_board(frame: &mut Frame, app: &App, board: &Board, area: Rect) {
    match app.current_view.direction() {
        Some(direction) => {
            if let Some(table) = board.table(direction) {
                table::render(frame, app, table, area, Some(app.selected_row));
            }
        }
        None => {
            let chunks =
                Layout::vertical(board.tables.iter().map(|_| Constraint::Fill(1))).split(area);
            for (table, chunk) in board.tables.iter().zip(chunks.iter()) {
                table::render(frame, app, table, *chunk, None);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::View;
    use crate::data::TableLayout;
    use crate::settings::ErrorPolicy;
    use crate::source::{ChannelSource, LoadError, Update, WaitTimesDocument};
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::Terminal;
    use tokio::sync::watch;

    fn app_with_sender(update: Update) -> (watch::Sender<Update>, App) {
        let (tx, source) = ChannelSource::create("test");
        let mut app = App::with_theme(
            Box::new(source),
            TableLayout::ByVehicle,
            ErrorPolicy::Panel,
            Theme::dark(),
        );
        tx.send(update).unwrap();
        app.reload_data();
        (tx, app)
    }

    fn app_with(update: Update) -> App {
        app_with_sender(update).1
    }

    fn row_text(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width).map(|x| buffer[(x, y)].symbol()).collect()
    }

    fn render(app: &App, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    /// Position of the first occurrence of `needle` on screen.
    fn find(buffer: &Buffer, needle: &str) -> Option<(u16, u16)> {
        let chars: Vec<String> = needle.chars().map(|c| c.to_string()).collect();
        let area = buffer.area;
        for y in 0..area.height {
            for x in 0..area.width {
                let matches = chars.iter().enumerate().all(|(i, c)| {
                    let cx = x + i as u16;
                    cx < area.width && buffer[(cx, y)].symbol() == c
                });
                if matches {
                    return Some((x, y));
                }
            }
        }
        None
    }

    #[test]
    fn test_end_to_end_render() {
        let doc = WaitTimesDocument::from_json(
            br#"{"timestamp":"t","to_canada":{"Autos":{"Rainbow":"No Delay","PeaceBridge":"20 MIN"}},"to_usa":{}}"#,
        )
        .unwrap();
        let app = app_with(Update::Loaded(doc));
        let buffer = render(&app, 100, 30);

        assert!(find(&buffer, "USA to Canada (2/2)").is_some());
        assert!(find(&buffer, "Canada to USA (0/0)").is_some());
        assert!(find(&buffer, "Rainbow Bridge").is_some());
        assert!(find(&buffer, "Peace Bridge").is_some());
        assert!(find(&buffer, "Updated: t").is_some());
        assert!(find(&buffer, common::FOOTER).is_some());

        let (x, y) = find(&buffer, "No Delay").unwrap();
        assert_eq!(buffer[(x, y)].bg, Color::Green);

        let (x, y) = find(&buffer, "20 MIN").unwrap();
        assert_eq!(buffer[(x, y)].bg, Color::Red);
    }

    #[test]
    fn test_single_direction_view() {
        let doc = WaitTimesDocument::from_json(
            br#"{"to_canada":{"Autos":{"LewistonQueenston":"5 MIN"}},"to_usa":{"Autos":{"Rainbow":"No Delay","PeaceBridge":"N/A"}}}"#,
        )
        .unwrap();
        let mut app = app_with(Update::Loaded(doc));
        app.set_view(View::ToUsa);
        let buffer = render(&app, 100, 30);

        assert!(find(&buffer, "Canada to USA (2/2)").is_some());
        assert!(find(&buffer, "Lewiston-Queenston").is_none());
        assert!(find(&buffer, "▶ Rainbow Bridge").is_some());

        // Second row is not selected, so the badge keeps its own background.
        let (x, y) = find(&buffer, "N/A").unwrap();
        assert_eq!(buffer[(x, y)].bg, Color::Gray);
    }

    #[test]
    fn test_loading_panel() {
        let app = app_with(Update::Fetching);
        let buffer = render(&app, 100, 30);
        assert!(find(&buffer, "Loading border wait times...").is_some());
    }

    #[test]
    fn test_error_panel() {
        let app = app_with(Update::Failed(LoadError::Status(404)));
        let buffer = render(&app, 100, 30);
        assert!(find(&buffer, "Error Loading Data").is_some());
        assert!(find(&buffer, "HTTP error! status: 404").is_some());
    }

    #[test]
    fn test_background_poll_leaves_screen_unchanged() {
        let doc = WaitTimesDocument::from_json(
            br#"{"timestamp":"t","to_canada":{"Autos":{"Rainbow":"No Delay"}}}"#,
        )
        .unwrap();
        let (tx, mut app) = app_with_sender(Update::Loaded(doc));
        let before = render(&app, 100, 30);

        tx.send(Update::Fetching).unwrap();
        assert!(app.reload_data());
        assert!(app.fetching);
        let after = render(&app, 100, 30);

        assert!(find(&after, "refreshing").is_none());
        assert!(find(&after, "Rainbow Bridge").is_some());
        assert_eq!(row_text(&before, 0), row_text(&after, 0));
        assert_eq!(row_text(&before, 29), row_text(&after, 29));
    }

    #[test]
    fn test_error_header() {
        let app = app_with(Update::Failed(LoadError::Status(500)));
        let buffer = render(&app, 100, 30);
        assert!(row_text(&buffer, 0).contains("Error loading data"));
        assert!(find(&buffer, "Loading...").is_none());
    }

    #[test]
    fn test_no_data_panel() {
        let app = app_with(Update::Loaded(WaitTimesDocument::default()));
        let buffer = render(&app, 100, 30);
        assert!(find(&buffer, "No data available").is_some());
    }

    #[test]
    fn test_terminal_too_small() {
        let app = app_with(Update::Fetching);
        let buffer = render(&app, 40, 10);
        assert!(find(&buffer, "Terminal too small: 40x10").is_some());
    }
}
