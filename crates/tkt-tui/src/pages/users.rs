//! User profile page.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tkt_types::User;

use super::titled_block;
use crate::state::AppState;

pub fn render(app: &AppState, frame: &mut Frame, area: Rect) {
    let profile: Option<User> = app.store.read(|s| s.slice_as("profile"));

    let Some(user) = profile.filter(|u| !u.username.is_empty()) else {
        let text = if app.is_loading() {
            "Loading profile…"
        } else {
            "Profile not available."
        };
        frame.render_widget(Paragraph::new(text).block(titled_block("Profile")), area);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            user.full_name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("@{}", user.username)),
        Line::from(format!("Email: {}", user.email)),
    ];

    if user.is_admin {
        lines.push(Line::from(Span::styled(
            "Administrator",
            Style::default().fg(Color::Yellow),
        )));
    }
    if let Some(project) = &user.settings.default_project {
        lines.push(Line::from(format!("Default project: {project}")));
    }

    frame.render_widget(
        Paragraph::new(lines).block(titled_block(&user.username)),
        area,
    );
}
