//! TUI application state.
//!
//! `AppState` combines the shared store with the purely visual state the
//! reducer owns: the current route, the active input mode, and transient
//! status text. All durable data (tickets, session, sidebar) lives in the
//! store so pages render from the same getters the CLI uses.

use std::sync::Arc;

use tkt_core::routes::{self, RouteMatch};
use tkt_core::store::Store;

/// What the keyboard is currently editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    /// Normal navigation keys.
    Normal,
    /// The goto prompt is open ("g").
    Goto,
    /// The search query line is focused (search page).
    Search,
    /// A form (login, register, ticket create) is focused.
    Form,
}

/// One editable field of a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
    /// Render as asterisks (passwords).
    pub masked: bool,
}

impl FormField {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            masked: false,
        }
    }

    pub fn masked(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            masked: true,
        }
    }

    pub fn with_value(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
            masked: false,
        }
    }
}

/// A focused sequence of fields; pages decide what the values mean.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    pub fields: Vec<FormField>,
    pub focus: usize,
}

impl Form {
    pub fn new(fields: Vec<FormField>) -> Self {
        Self { fields, focus: 0 }
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    pub fn focused_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.focus)
    }

    /// The value of field `i`, empty when out of range.
    pub fn value(&self, i: usize) -> &str {
        self.fields.get(i).map_or("", |f| f.value.as_str())
    }

    /// True when focus sits on the last field (Enter submits there).
    pub fn on_last_field(&self) -> bool {
        self.focus + 1 == self.fields.len()
    }
}

/// Combined state for the TUI.
pub struct AppState {
    /// Shared store (state slices, session, sidebar).
    pub store: Arc<Store>,
    /// The resolved route being rendered.
    pub route: RouteMatch,
    /// Active input mode.
    pub mode: InputMode,
    /// Buffer for the goto prompt.
    pub goto: String,
    /// Buffer for the search query line.
    pub query: String,
    /// The active form, when `mode == Form`.
    pub form: Form,
    /// Number of fetches still in flight for the current route.
    pub pending_fetches: usize,
    /// Transient status line text.
    pub status: Option<String>,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
    /// Project key used to prefill the ticket creation form.
    pub default_project: Option<String>,
    /// Flag indicating the app should quit.
    pub should_quit: bool,
}

impl AppState {
    /// Creates the state, starting on the dashboard when a session exists.
    pub fn new(store: Arc<Store>, default_project: Option<String>) -> Self {
        let start = if store.read(|s| s.token().is_some()) {
            "/dashboard"
        } else {
            "/"
        };

        Self {
            store,
            route: routes::resolve(start),
            mode: InputMode::Normal,
            goto: String::new(),
            query: String::new(),
            form: Form::default(),
            pending_fetches: 0,
            status: None,
            spinner_frame: 0,
            default_project,
            should_quit: false,
        }
    }

    /// True while any fetch for the current route is in flight.
    pub fn is_loading(&self) -> bool {
        self.pending_fetches > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_focus_wraps() {
        let mut form = Form::new(vec![FormField::new("a"), FormField::new("b")]);
        assert_eq!(form.focus, 0);
        form.focus_next();
        assert!(form.on_last_field());
        form.focus_next();
        assert_eq!(form.focus, 0);
        form.focus_prev();
        assert_eq!(form.focus, 1);
    }

    #[test]
    fn test_form_value_out_of_range_is_empty() {
        let form = Form::new(vec![FormField::with_value("a", "x")]);
        assert_eq!(form.value(0), "x");
        assert_eq!(form.value(5), "");
    }
}
