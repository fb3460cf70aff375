//! Wait-time table rendering.
//!
//! Draws one direction as a table: bridges down the side, vehicle types
//! across the top, each cell a colored badge.

use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::data::WaitTable;

/// Render a table. `selected` highlights a visible row.
pub fn render(frame: &mut Frame, app: &App, table: &WaitTable, area: Rect, selected: Option<usize>) {
    let rows = app.visible_rows(table);

    let header = Row::new(
        std::iter::once(Cell::from("Bridge"))
            .chain(table.columns.iter().map(|c| Cell::from(c.label.clone()))),
    )
    .height(1)
    .style(app.theme.header);

    let body: Vec<Row> = rows
        .iter()
        .map(|row| {
            let cells = std::iter::once(Cell::from(row.label.clone())).chain(
                row.cells.iter().map(|cell| {
                    Cell::from(Line::from(Span::styled(
                        format!(" {} ", cell.text),
                        app.theme.wait_style(cell.class),
                    )))
                }),
            );
            Row::new(cells)
        })
        .collect();

    let widths: Vec<Constraint> = std::iter::once(Constraint::Fill(2))
        .chain(table.columns.iter().map(|_| Constraint::Fill(1)))
        .collect();

    let filter_info = if app.filter_active {
        format!(" /{}_", app.filter_text)
    } else if !app.filter_text.is_empty() {
        format!(" /{}/ [c:clear]", app.filter_text)
    } else {
        String::new()
    };

    let title = format!(
        " {} ({}/{}){} ",
        table.title,
        rows.len(),
        table.rows.len(),
        filter_info
    );

    let widget = Table::new(body, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(selected.filter(|_| !rows.is_empty()));

    frame.render_stateful_widget(widget, area, &mut state);
}
