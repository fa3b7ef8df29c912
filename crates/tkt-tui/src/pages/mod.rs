//! Per-page render functions, one per route table entry.

mod auth;
mod dashboard;
mod index;
mod projects;
mod search;
mod tickets;
mod users;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use tkt_core::routes::Page;
use unicode_width::UnicodeWidthStr;

use crate::state::{AppState, Form};

/// Dispatches to the render function for the current route.
pub fn render_page(app: &AppState, frame: &mut Frame, area: Rect) {
    match app.route.page {
        Page::Index => index::render(app, frame, area),
        Page::Search => search::render(app, frame, area),
        Page::ProjectList => projects::render_list(app, frame, area),
        Page::ProjectShow => projects::render_show(app, frame, area),
        Page::TicketCreate => tickets::render_create(app, frame, area),
        Page::TicketShow => tickets::render_show(app, frame, area),
        Page::UserProfile => users::render(app, frame, area),
        Page::Login => auth::render(app, frame, area, "Log in"),
        Page::Register => auth::render(app, frame, area, "Register"),
        Page::Dashboard => dashboard::render(app, frame, area),
        Page::NotFound => render_not_found(frame, area),
    }
}

fn render_not_found(frame: &mut Frame, area: Rect) {
    let para = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Whoops, you're off the beaten path!",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Press g and enter a path like /tickets/TEST-1."),
    ])
    .block(titled_block("404"));
    frame.render_widget(para, area);
}

/// A bordered block with a title, shared by all pages.
pub fn titled_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "))
}

/// Renders a form with the focused field highlighted.
pub fn render_form(form: &Form, frame: &mut Frame, area: Rect, title: &str, hint: &str) {
    let mut lines = vec![Line::from("")];

    for (i, field) in form.fields.iter().enumerate() {
        let focused = i == form.focus;
        let marker = if focused { "> " } else { "  " };
        let shown = if field.masked {
            "*".repeat(field.value.chars().count())
        } else {
            field.value.clone()
        };
        let cursor = if focused { "▌" } else { "" };

        let style = if focused {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(format!("{:<12}", field.label), style),
            Span::raw(shown),
            Span::styled(cursor, Style::default().fg(Color::Yellow)),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        hint.to_string(),
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Paragraph::new(lines).block(titled_block(title)), area);
}

/// Truncates a string to a display width, appending an ellipsis.
pub fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }

    let mut out = String::new();
    let mut width = 0;
    for c in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if width + w > max_width.saturating_sub(1) {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_respects_width() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer string", 8), "a longe…");
    }
}
