//! Terminal UI rendering.
//!
//! All drawing logic lives here, separated from application state ([`App`])
//! and input handling ([`crate::input`]).  The list block's title is the
//! controller's title output; the status bar shows the page cursor and the
//! loading indicator.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::App;

/// Draw the complete UI for one frame.
pub fn draw(app: &mut App, frame: &mut Frame) {
    let [main_area, status_area] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_feed_list(app, frame, main_area);
    draw_status_bar(app, frame, status_area);
}

/// Render the scrollable cell list.
fn draw_feed_list(app: &mut App, frame: &mut Frame, area: Rect) {
    let list_items: Vec<ListItem> = app
        .cells
        .iter()
        .map(|cell| {
            let mut spans = vec![
                Span::styled(
                    format!("{:<18}", cell.date_line()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(" "),
                Span::styled(&cell.title, Style::default().fg(Color::White)),
            ];
            if let Some(author) = &cell.author {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(
                    format!("[{author}]"),
                    Style::default().fg(Color::Cyan),
                ));
            }

            let mut lines = vec![Line::from(spans)];
            if let Some(subtitle) = &cell.subtitle {
                lines.push(Line::from(Span::styled(
                    format!("{:19}{subtitle}", ""),
                    Style::default().fg(Color::Gray),
                )));
            }
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(list_items)
        .block(
            Block::default()
                .title(format!(" {} ", app.title))
                .borders(Borders::ALL),
        )
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

/// Render the bottom status bar.
fn draw_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let state = if app.loading {
        Span::styled("loading", Style::default().fg(Color::Yellow))
    } else {
        Span::styled("idle", Style::default().fg(Color::Green))
    };
    let status = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        state,
        Span::raw("  "),
        Span::styled(
            format!("page {}", app.page()),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("  "),
        Span::styled(
            format!("{} items", app.cells.len()),
            Style::default().fg(Color::Green),
        ),
        Span::raw("  q: quit  r: refresh  ↑/↓: scroll  Home/End: jump"),
    ]));
    frame.render_widget(status, area);
}
