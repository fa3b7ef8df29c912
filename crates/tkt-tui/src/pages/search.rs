//! Ticket search page (the `/queries` route).

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::{titled_block, truncate};
use crate::state::{AppState, InputMode};

pub fn render(app: &AppState, frame: &mut Frame, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let cursor = if app.mode == InputMode::Search { "▌" } else { "" };
    let query_line = Paragraph::new(format!("{}{cursor}", app.query))
        .block(titled_block("Query"));
    frame.render_widget(query_line, rows[0]);

    render_ticket_table(app, frame, rows[1]);
}

/// Renders the tickets slice as a key/status/summary table.
///
/// Shared with the dashboard page.
pub fn render_ticket_table(app: &AppState, frame: &mut Frame, area: Rect) {
    let tickets = app.store.read(tkt_core::store::State::tickets);

    let mut lines = Vec::new();
    if tickets.is_empty() {
        let text = if app.is_loading() {
            "Loading tickets…"
        } else {
            "No tickets found."
        };
        lines.push(Line::from(Span::styled(
            text,
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            format!("{:<12} {:<14} Summary", "Key", "Status"),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        let width = area.width.saturating_sub(30) as usize;
        for ticket in &tickets {
            lines.push(Line::from(format!(
                "{:<12} {:<14} {}",
                ticket.key,
                truncate(&ticket.status.name, 14),
                truncate(&ticket.summary, width),
            )));
        }
    }

    let title = format!("Tickets ({})", tickets.len());
    frame.render_widget(Paragraph::new(lines).block(titled_block(&title)), area);
}
