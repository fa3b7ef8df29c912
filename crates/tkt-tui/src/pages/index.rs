//! Landing page.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::titled_block;
use crate::state::AppState;

pub fn render(app: &AppState, frame: &mut Frame, area: Rect) {
    let logged_in = app.store.read(|s| s.current_user().is_some());

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Welcome to tkt",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("  t  search tickets"),
        Line::from("  p  browse projects"),
        Line::from("  c  create a ticket"),
        Line::from("  d  dashboard"),
    ];

    if !logged_in {
        lines.push(Line::from(""));
        lines.push(Line::from("  l  log in"));
        lines.push(Line::from("  g  then /register to create an account"));
    }

    frame.render_widget(Paragraph::new(lines).block(titled_block("tkt")), area);
}
