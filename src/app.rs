//! Application state and navigation logic.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::warn;

use crate::data::{Board, DisplayRow, TableLayout, WaitTable};
use crate::settings::ErrorPolicy;
use crate::source::{DataSource, Direction, Update, WaitTimesDocument};
use crate::ui::Theme;

/// The current view/tab in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Both directions stacked.
    Both,
    /// Only crossings into Canada.
    ToCanada,
    /// Only crossings into the USA.
    ToUsa,
}

impl View {
    pub const ALL: [View; 3] = [View::Both, View::ToCanada, View::ToUsa];

    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Both => View::ToCanada,
            View::ToCanada => View::ToUsa,
            View::ToUsa => View::Both,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        match self {
            View::Both => View::ToUsa,
            View::ToCanada => View::Both,
            View::ToUsa => View::ToCanada,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Both => "All",
            View::ToCanada => Direction::ToCanada.title(),
            View::ToUsa => Direction::ToUsa.title(),
        }
    }

    /// The single direction shown, if any.
    pub fn direction(&self) -> Option<Direction> {
        match self {
            View::Both => None,
            View::ToCanada => Some(Direction::ToCanada),
            View::ToUsa => Some(Direction::ToUsa),
        }
    }
}

/// What the page is showing.
///
/// `Loading` moves to `Ready` or `Error` after the first poll. Later polls
/// replace `Ready` in place; there is no visible "refreshing" state.
#[derive(Debug, Clone)]
pub enum PageState {
    Loading,
    Ready(Board),
    Error(String),
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,

    // Data source
    source: Box<dyn DataSource>,
    pub state: PageState,
    /// A request is in flight.
    pub fetching: bool,
    document: Option<WaitTimesDocument>,
    pub layout: TableLayout,
    pub on_error: ErrorPolicy,

    // Navigation state (single-direction views)
    pub selected_row: usize,

    // Search/filter
    pub filter_text: String,
    pub filter_active: bool,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App, picking a theme from the terminal background.
    pub fn new(source: Box<dyn DataSource>, layout: TableLayout, on_error: ErrorPolicy) -> Self {
        Self::with_theme(source, layout, on_error, Theme::auto_detect())
    }

    /// Create a new App with an explicit theme.
    pub fn with_theme(
        source: Box<dyn DataSource>,
        layout: TableLayout,
        on_error: ErrorPolicy,
        theme: Theme,
    ) -> Self {
        Self {
            running: true,
            current_view: View::Both,
            show_help: false,
            source,
            state: PageState::Loading,
            fetching: false,
            document: None,
            layout,
            on_error,
            selected_row: 0,
            filter_text: String::new(),
            filter_active: false,
            theme,
            status_message: None,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// The board currently on screen, if any.
    pub fn board(&self) -> Option<&Board> {
        match &self.state {
            PageState::Ready(board) => Some(board),
            _ => None,
        }
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Drain pending updates from the data source.
    ///
    /// Returns true if anything changed.
    pub fn reload_data(&mut self) -> bool {
        let mut changed = false;
        while let Some(update) = self.source.poll() {
            self.apply(update);
            changed = true;
        }
        changed
    }

    /// Apply one update to the page state.
    pub fn apply(&mut self, update: Update) {
        match update {
            Update::Fetching => self.fetching = true,
            Update::Loaded(document) => {
                self.fetching = false;
                self.state = PageState::Ready(Board::from_document(&document, self.layout));
                self.document = Some(document);
                self.clamp_selection();
            }
            Update::Failed(err) => {
                self.fetching = false;
                match self.on_error {
                    ErrorPolicy::Panel => self.state = PageState::Error(err.to_string()),
                    ErrorPolicy::Retain => {
                        warn!(error = %err, "Keeping previous wait times after failed fetch")
                    }
                }
            }
        }
    }

    /// Ask the source for a fresh document now.
    pub fn refresh(&mut self) {
        self.source.request_refresh();
        self.set_status_message("Refreshing...".to_string());
    }

    /// Switch between the vehicle-type and bridge layouts.
    pub fn toggle_layout(&mut self) {
        self.layout = match self.layout {
            TableLayout::ByVehicle => TableLayout::ByBridge,
            TableLayout::ByBridge => TableLayout::ByVehicle,
        };
        if let (PageState::Ready(_), Some(document)) = (&self.state, &self.document) {
            self.state = PageState::Ready(Board::from_document(document, self.layout));
            self.clamp_selection();
        }
        let label = match self.layout {
            TableLayout::ByVehicle => "Layout: by vehicle type",
            TableLayout::ByBridge => "Layout: by bridge",
        };
        self.set_status_message(label.to_string());
    }

    /// Switch to the next view (cycles through All → USA to Canada → Canada to USA).
    pub fn next_view(&mut self) {
        self.set_view(self.current_view.next());
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.set_view(self.current_view.prev());
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
        self.selected_row = 0;
    }

    /// The table in focus (single-direction views only).
    pub fn focused_table(&self) -> Option<&WaitTable> {
        let direction = self.current_view.direction()?;
        self.board()?.table(direction)
    }

    /// Rows of a table that match the current filter.
    pub fn visible_rows<'a>(&self, table: &'a WaitTable) -> Vec<&'a DisplayRow> {
        table.rows.iter().filter(|r| self.matches_filter(&r.label)).collect()
    }

    fn focused_row_count(&self) -> usize {
        self.focused_table().map_or(0, |t| self.visible_rows(t).len())
    }

    fn clamp_selection(&mut self) {
        let count = self.focused_row_count();
        if self.selected_row >= count {
            self.selected_row = count.saturating_sub(1);
        }
    }

    /// Move selection down by one row.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection up by one row.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down by n rows.
    pub fn select_next_n(&mut self, n: usize) {
        let max = self.focused_row_count().saturating_sub(1);
        self.selected_row = (self.selected_row + n).min(max);
    }

    /// Move selection up by n rows.
    pub fn select_prev_n(&mut self, n: usize) {
        self.selected_row = self.selected_row.saturating_sub(n);
    }

    /// Jump to the first row.
    pub fn select_first(&mut self) {
        self.selected_row = 0;
    }

    /// Jump to the last row.
    pub fn select_last(&mut self) {
        self.selected_row = self.focused_row_count().saturating_sub(1);
    }

    /// Navigate back: clear the filter first, then return to the combined view.
    pub fn go_back(&mut self) {
        if !self.filter_text.is_empty() {
            self.clear_filter();
        } else if self.current_view != View::Both {
            self.set_view(View::Both);
        }
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Enter filter input mode (starts capturing keystrokes for search).
    pub fn start_filter(&mut self) {
        self.filter_active = true;
    }

    /// Exit filter input mode without clearing the filter text.
    pub fn cancel_filter(&mut self) {
        self.filter_active = false;
    }

    /// Clear the filter text and exit filter mode.
    pub fn clear_filter(&mut self) {
        self.filter_text.clear();
        self.filter_active = false;
    }

    /// Append a character to the filter text.
    pub fn filter_push(&mut self, c: char) {
        self.filter_text.push(c);
        self.clamp_selection();
    }

    /// Remove the last character from the filter text.
    pub fn filter_pop(&mut self) {
        self.filter_text.pop();
    }

    /// Check if a bridge label matches the current filter.
    pub fn matches_filter(&self, name: &str) -> bool {
        if self.filter_text.is_empty() {
            return true;
        }
        name.to_lowercase().contains(&self.filter_text.to_lowercase())
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export the board on screen to a file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        let Some(board) = self.board() else {
            anyhow::bail!("No data to export");
        };
        export_board(board, path)
    }
}

/// Write a board as pretty-printed JSON.
pub fn export_board(board: &Board, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(board)?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{ChannelSource, LoadError};
    use tokio::sync::watch;

    fn sample_document() -> WaitTimesDocument {
        WaitTimesDocument::from_json(
            br#"{
                "timestamp": "t",
                "to_canada": {"Autos": {"Rainbow": "No Delay", "PeaceBridge": "20 MIN", "LewistonQueenston": ""}},
                "to_usa": {"Autos": {"Rainbow": "5 MIN"}, "Trucks": {"PeaceBridge": "No Delay"}}
            }"#,
        )
        .unwrap()
    }

    fn app_with(on_error: ErrorPolicy) -> (watch::Sender<Update>, App) {
        let (tx, source) = ChannelSource::create("test");
        let app = App::with_theme(
            Box::new(source),
            TableLayout::ByVehicle,
            on_error,
            Theme::dark(),
        );
        (tx, app)
    }

    #[test]
    fn test_loading_then_ready() {
        let (tx, mut app) = app_with(ErrorPolicy::Panel);

        assert!(app.reload_data());
        assert!(matches!(app.state, PageState::Loading));
        assert!(app.fetching);

        tx.send(Update::Loaded(sample_document())).unwrap();
        assert!(app.reload_data());
        assert!(!app.fetching);
        let board = app.board().unwrap();
        assert_eq!(board.tables[0].rows.len(), 3);

        assert!(!app.reload_data());
    }

    #[test]
    fn test_failure_shows_error_panel() {
        let (tx, mut app) = app_with(ErrorPolicy::Panel);
        tx.send(Update::Loaded(sample_document())).unwrap();
        app.reload_data();

        tx.send(Update::Failed(LoadError::Status(404))).unwrap();
        app.reload_data();
        match &app.state {
            PageState::Error(msg) => assert_eq!(msg, "HTTP error! status: 404"),
            other => panic!("expected error state, got {:?}", other),
        }

        // The next good poll recovers.
        tx.send(Update::Loaded(sample_document())).unwrap();
        app.reload_data();
        assert!(app.board().is_some());
    }

    #[test]
    fn test_failure_retains_previous_board() {
        let (tx, mut app) = app_with(ErrorPolicy::Retain);
        tx.send(Update::Loaded(sample_document())).unwrap();
        app.reload_data();

        tx.send(Update::Failed(LoadError::Parse("eof".into()))).unwrap();
        app.reload_data();
        assert_eq!(app.board().unwrap().timestamp, "t");
    }

    #[test]
    fn test_retain_policy_stays_loading_without_data() {
        let (tx, mut app) = app_with(ErrorPolicy::Retain);
        app.reload_data();
        tx.send(Update::Failed(LoadError::Read("missing".into()))).unwrap();
        app.reload_data();
        assert!(matches!(app.state, PageState::Loading));
        assert!(!app.fetching);
    }

    #[test]
    fn test_view_cycle() {
        assert_eq!(View::Both.next(), View::ToCanada);
        assert_eq!(View::ToUsa.next(), View::Both);
        assert_eq!(View::Both.prev(), View::ToUsa);
        assert_eq!(View::ToCanada.label(), "USA to Canada");
        assert_eq!(View::Both.direction(), None);
    }

    #[test]
    fn test_selection_is_clamped_to_focused_table() {
        let (tx, mut app) = app_with(ErrorPolicy::Panel);
        tx.send(Update::Loaded(sample_document())).unwrap();
        app.reload_data();

        app.set_view(View::ToCanada);
        app.select_next_n(10);
        assert_eq!(app.selected_row, 2);

        app.set_view(View::ToUsa);
        assert_eq!(app.selected_row, 0);
        app.select_last();
        assert_eq!(app.selected_row, 1);
        app.select_prev_n(5);
        assert_eq!(app.selected_row, 0);
    }

    #[test]
    fn test_filter_matches_labels() {
        let (tx, mut app) = app_with(ErrorPolicy::Panel);
        tx.send(Update::Loaded(sample_document())).unwrap();
        app.reload_data();

        app.filter_push('p');
        app.filter_push('e');
        let table = &app.board().unwrap().tables[0];
        let labels: Vec<&str> = app.visible_rows(table).iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Peace Bridge"]);

        app.go_back();
        assert!(app.filter_text.is_empty());
    }

    #[test]
    fn test_toggle_layout_rebuilds_board() {
        let (tx, mut app) = app_with(ErrorPolicy::Panel);
        tx.send(Update::Loaded(sample_document())).unwrap();
        app.reload_data();

        app.toggle_layout();
        assert_eq!(app.layout, TableLayout::ByBridge);
        let table = app.board().unwrap().table(Direction::ToUsa).unwrap();
        let cols: Vec<&str> = table.columns.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(cols, vec!["Autos", "Trucks", "NEXUS"]);
    }

    #[test]
    fn test_export_state() {
        let (tx, mut app) = app_with(ErrorPolicy::Panel);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");

        assert!(app.export_state(&path).is_err());

        tx.send(Update::Loaded(sample_document())).unwrap();
        app.reload_data();
        app.export_state(&path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["timestamp"], "t");
        assert_eq!(json["tables"][0]["title"], "USA to Canada");
        assert_eq!(json["tables"][0]["rows"][1]["cells"][0]["class"], "delayed");
    }
}
