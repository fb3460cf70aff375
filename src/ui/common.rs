//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, footer, the
//! help overlay and the full-screen loading, error and empty panels.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::app::{App, PageState, View};
use crate::data::WaitClass;

/// Page title, as on the published site.
pub const TITLE: &str = "Niagara Border Wait Times";

/// Attribution shown under the tables.
pub const FOOTER: &str = "Data sourced from Niagara Falls Bridges";

/// Render the header bar with the snapshot overview.
///
/// Displays: overall indicator, upstream timestamp, cell counts by class.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let Some(board) = app.board() else {
        let state = match app.state {
            PageState::Error(_) => Span::styled(
                "│ Error loading data",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            _ => Span::raw("│ Loading..."),
        };
        let line = Line::from(vec![
            Span::styled(
                format!(" {} ", TITLE),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            state,
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let clear = board.count(WaitClass::Clear);
    let delayed = board.count(WaitClass::Delayed);
    let unavailable = board.count(WaitClass::Unavailable);

    let indicator = if delayed > 0 {
        WaitClass::Delayed
    } else if clear > 0 {
        WaitClass::Clear
    } else {
        WaitClass::Unavailable
    };

    let line = Line::from(vec![
        Span::styled(" ● ", Style::default().fg(app.theme.wait_color(indicator))),
        Span::styled(
            format!("{} ", TITLE),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("│ "),
        Span::raw(format!("Updated: {} │ ", board.timestamp_label())),
        Span::styled(format!("{}", clear), Style::default().fg(app.theme.clear)),
        Span::raw(" clear "),
        if delayed > 0 {
            Span::styled(
                format!("{}", delayed),
                Style::default().fg(app.theme.delayed).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        },
        Span::raw(" delayed "),
        Span::styled(
            format!("{}", unavailable),
            Style::default().add_modifier(Modifier::DIM),
        ),
        Span::raw(" n/a"),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Title of a tab as drawn in the tab bar.
pub fn tab_title(index: usize, view: View) -> String {
    format!(" {}:{} ", index + 1, view.label())
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = View::ALL
        .iter()
        .enumerate()
        .map(|(index, view)| Line::from(tab_title(index, *view)))
        .collect();

    let selected = View::ALL
        .iter()
        .position(|v| *v == app.current_view)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .padding("", "")
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows: source, time since last update, available controls.
/// Also displays temporary status messages and errors.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = if let Some(board) = app.board() {
        let controls = if app.filter_active {
            "Type to search | Enter:apply Esc:cancel"
        } else {
            "/:search v:layout r:refresh Tab:switch ?:help q:quit"
        };

        format!(
            " {} | Fetched {:.0}s ago | {}",
            app.source_description(),
            board.received_at.elapsed().as_secs_f64(),
            controls,
        )
    } else if let PageState::Error(ref err) = app.state {
        format!(" Error: {} | r:retry q:quit", err)
    } else {
        " Loading... | q:quit".to_string()
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the attribution line.
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let paragraph = Paragraph::new(FOOTER)
        .alignment(Alignment::Center)
        .style(Style::default().fg(app.theme.highlight).add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Centered rectangle of at most `width` x `height` inside `area`.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

/// Render the loading panel shown before the first document arrives.
pub fn render_loading(frame: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new("Loading border wait times...")
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, centered(area, area.width, 1));
}

/// Render the error panel with the failure and a hint about the data file.
pub fn render_error(frame: &mut Frame, app: &App, message: &str, area: Rect) {
    let text = vec![
        Line::from(Span::styled(
            "Error Loading Data",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "Make sure the data file exists ({}) and the scraper is running.",
                app.source_description()
            ),
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(Color::Red));

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, centered(area, 64, 9));
}

/// Render the panel shown when a document has no rows at all.
pub fn render_no_data(frame: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new("No data available")
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, centered(area, area.width, 1));
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ←/→ h/l     Switch views"),
        Line::from("  1/2/3       All / To Canada / To USA"),
        Line::from("  ↑/↓ j/k     Select bridge"),
        Line::from("  PgUp/PgDn   Jump 10 rows"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  Esc         Clear filter / go back"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Tables",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  /           Filter bridges"),
        Line::from("  c           Clear filter"),
        Line::from("  v           Toggle layout"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r           Refresh now"),
        Line::from("  e           Export to JSON"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    let help_area = centered(
        area,
        44u16.min(area.width.saturating_sub(4)),
        25u16.min(area.height.saturating_sub(2)),
    );

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
