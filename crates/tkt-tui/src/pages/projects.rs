//! Project list and detail pages.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tkt_types::Project;

use super::{titled_block, truncate};
use crate::state::AppState;

pub fn render_list(app: &AppState, frame: &mut Frame, area: Rect) {
    let projects: Vec<Project> = app
        .store
        .read(|s| s.slice_as("projects"))
        .unwrap_or_default();

    let mut lines = Vec::new();
    if projects.is_empty() {
        let text = if app.is_loading() {
            "Loading projects…"
        } else {
            "No projects found."
        };
        lines.push(Line::from(Span::styled(
            text,
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            format!("{:<10} {:<24} Lead", "Key", "Name"),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for project in &projects {
            lines.push(Line::from(format!(
                "{:<10} {:<24} {}",
                project.key,
                truncate(&project.name, 24),
                project.lead,
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "g then /projects/KEY opens a project",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let title = format!("Projects ({})", projects.len());
    frame.render_widget(Paragraph::new(lines).block(titled_block(&title)), area);
}

pub fn render_show(app: &AppState, frame: &mut Frame, area: Rect) {
    let project: Option<Project> = app.store.read(|s| s.slice_as("project"));

    let Some(project) = project.filter(|p| !p.key.is_empty()) else {
        let text = if app.is_loading() {
            "Loading project…"
        } else {
            "Project not available."
        };
        frame.render_widget(Paragraph::new(text).block(titled_block("Project")), area);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            project.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Lead: {}", project.lead)),
        Line::from(format!(
            "Visibility: {}",
            if project.public { "public" } else { "private" }
        )),
    ];

    if let Some(homepage) = &project.homepage {
        lines.push(Line::from(format!("Homepage: {homepage}")));
    }
    if let Some(repo) = &project.repo {
        lines.push(Line::from(format!("Repo: {repo}")));
    }
    if !project.ticket_types.is_empty() {
        lines.push(Line::from(format!(
            "Ticket types: {}",
            project.ticket_types.join(", ")
        )));
    }

    frame.render_widget(
        Paragraph::new(lines).block(titled_block(&project.key)),
        area,
    );
}
