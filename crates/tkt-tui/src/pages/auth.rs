//! Login and registration pages.

use ratatui::Frame;
use ratatui::layout::Rect;

use super::render_form;
use crate::state::AppState;

pub fn render(app: &AppState, frame: &mut Frame, area: Rect, title: &str) {
    render_form(
        &app.form,
        frame,
        area,
        title,
        "Tab next field · Enter on the last field submits · Esc cancels",
    );
}
