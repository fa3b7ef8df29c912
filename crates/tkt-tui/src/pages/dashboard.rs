//! Dashboard page: the logged-in user's tickets.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::search::render_ticket_table;
use super::titled_block;
use crate::state::AppState;

pub fn render(app: &AppState, frame: &mut Frame, area: Rect) {
    let user = app.store.read(|s| s.current_user().cloned());

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let greeting = match user {
        Some(user) if !user.full_name.is_empty() => format!("Hello, {}.", user.full_name),
        Some(user) => format!("Hello, {}.", user.username),
        None => "Not logged in — press l to log in.".to_string(),
    };

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            greeting,
            Style::default().fg(Color::Cyan),
        )))
        .block(titled_block("Dashboard")),
        rows[0],
    );

    render_ticket_table(app, frame, rows[1]);
}
