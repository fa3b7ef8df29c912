//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState` by immutable reference, draw to a
//! ratatui Frame, and never mutate state or return effects. Per-page
//! rendering lives in `pages`.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::pages;
use crate::state::{AppState, InputMode};
use crate::update::parse_px;

/// Height of the header bar.
const HEADER_HEIGHT: u16 = 1;

/// Height of the status/hint bar.
const STATUS_HEIGHT: u16 = 1;

/// Rough width of one terminal cell in pixels, used to map the store's
/// CSS-shaped sidebar width onto columns.
const CELL_PX: u32 = 8;

/// Spinner frames for the loading indicator.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);

    render_header(app, frame, rows[0]);
    render_body(app, frame, rows[1]);
    render_status(app, frame, rows[2]);
}

fn render_header(app: &AppState, frame: &mut Frame, area: Rect) {
    let user = app
        .store
        .read(|s| s.current_user().map(|u| u.username.clone()));

    let mut spans = vec![
        Span::styled(" tkt ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(app.route.name),
    ];

    if app.is_loading() {
        let spinner = SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()];
        spans.push(Span::raw(" "));
        spans.push(Span::styled(spinner, Style::default().fg(Color::Yellow)));
    }

    let right = match user {
        Some(name) => format!("{name} "),
        None => "not logged in ".to_string(),
    };
    let pad = (area.width as usize)
        .saturating_sub(spans.iter().map(|s| s.content.len()).sum::<usize>() + right.len());
    spans.push(Span::raw(" ".repeat(pad)));
    spans.push(Span::styled(right, Style::default().fg(Color::DarkGray)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_body(app: &AppState, frame: &mut Frame, area: Rect) {
    let show_sidebar = app.store.read(|s| s.show_sidebar());

    let content = if show_sidebar {
        let width = app.store.read(|s| s.sidebar_width().to_string());
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([sidebar_constraint(&width), Constraint::Min(1)])
            .split(area);
        render_sidebar(app, frame, cols[0]);
        cols[1]
    } else {
        area
    };

    pages::render_page(app, frame, content);
}

fn render_sidebar(app: &AppState, frame: &mut Frame, area: Rect) {
    let block = Block::default().borders(Borders::RIGHT);

    let lines = vec![
        Line::from(Span::styled(
            "Navigate",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("d dashboard"),
        Line::from("t tickets"),
        Line::from("p projects"),
        Line::from("c new ticket"),
        Line::from("l login"),
        Line::from(""),
        Line::from(Span::styled(
            "Sidebar",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("s hide"),
        Line::from("[ ] resize"),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_status(app: &AppState, frame: &mut Frame, area: Rect) {
    let error_count = app.store.read(|s| s.errors().len());

    let text = match app.mode {
        InputMode::Goto => format!("goto: {}▌", app.goto),
        InputMode::Search => format!("query: {}▌  (Enter to search, Esc to leave)", app.query),
        _ => {
            let mut parts: Vec<String> = Vec::new();
            if let Some(status) = &app.status {
                parts.push(status.clone());
            }
            if error_count > 0 {
                parts.push(format!("{error_count} error(s) — x to clear"));
            }
            if parts.is_empty() {
                parts.push("g goto · r refresh · s sidebar · q quit".to_string());
            }
            parts.join("  ·  ")
        }
    };

    let style = if error_count > 0 && app.mode == InputMode::Normal {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    frame.render_widget(Paragraph::new(text).style(style), area);
}

/// Maps the store's width string onto a layout constraint.
///
/// Percentages map directly; pixel widths assume `CELL_PX` pixels per
/// column. Anything unparseable falls back to the default width.
fn sidebar_constraint(width: &str) -> Constraint {
    if let Some(pct) = width.strip_suffix('%') {
        if let Ok(pct) = pct.trim().parse::<u16>() {
            return Constraint::Percentage(pct.min(100));
        }
    }

    let px = parse_px(width);
    Constraint::Length((px / CELL_PX).max(12) as u16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sidebar_constraint_shapes() {
        assert_eq!(sidebar_constraint("10%"), Constraint::Percentage(10));
        assert_eq!(sidebar_constraint("250px"), Constraint::Length(31));
        assert_eq!(sidebar_constraint("nonsense"), Constraint::Length(31));
        assert_eq!(sidebar_constraint("40px"), Constraint::Length(12));
    }
}
