//! Ticket detail and creation pages.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use tkt_core::markdown;
use tkt_types::Ticket;

use super::{render_form, titled_block};
use crate::state::AppState;

pub fn render_show(app: &AppState, frame: &mut Frame, area: Rect) {
    let ticket: Option<Ticket> = app.store.read(|s| s.slice_as("ticket"));

    let Some(ticket) = ticket.filter(|t| !t.key.is_empty()) else {
        let text = if app.is_loading() {
            "Loading ticket…"
        } else {
            "Ticket not available."
        };
        frame.render_widget(
            Paragraph::new(text).block(titled_block("Ticket")),
            area,
        );
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            ticket.summary.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(
                format!("{} · {}", ticket.ticket_type.name, ticket.status.name),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw("  "),
            Span::styled(
                format!(
                    "reporter {} · assignee {}",
                    ticket.reporter.username, ticket.assignee.username
                ),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(""),
    ];

    for text_line in markdown::render_plain(&ticket.description).lines() {
        lines.push(Line::from(text_line.to_string()));
    }

    if !ticket.comments.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Comments ({})", ticket.comments.len()),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for comment in &ticket.comments {
            lines.push(Line::from(Span::styled(
                format!("— {}", comment.author.username),
                Style::default().fg(Color::Cyan),
            )));
            for text_line in markdown::render_plain(&comment.body).lines() {
                lines.push(Line::from(format!("  {text_line}")));
            }
        }
    }

    let para = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(titled_block(&ticket.key));
    frame.render_widget(para, area);
}

pub fn render_create(app: &AppState, frame: &mut Frame, area: Rect) {
    render_form(
        &app.form,
        frame,
        area,
        "New ticket",
        "Tab next field · Enter on the last field submits · Esc cancels",
    );
}
