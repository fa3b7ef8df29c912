//! TUI reducer (update function).
//!
//! All state transitions happen here. The runtime calls `update(app, event)`
//! and executes the returned effects. Keeping the reducer synchronous and
//! side-effect free makes navigation testable without a terminal.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tkt_core::routes::{self, Page};
use tkt_core::store::{Mutation, SidebarWidth};
use tkt_types::{NewTicket, NewUser, Project, TicketType};

use crate::events::{UiEffect, UiEvent};
use crate::state::{AppState, Form, FormField, InputMode};

const SIDEBAR_STEP: u32 = 25;
const SIDEBAR_MIN: u32 = 100;
const SIDEBAR_MAX: u32 = 500;

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(term_event) => match term_event {
            Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
            _ => vec![],
        },
        UiEvent::Fetched { .. } => {
            app.pending_fetches = app.pending_fetches.saturating_sub(1);
            vec![]
        }
        UiEvent::LoggedIn(result) => match result {
            Ok(user) => {
                app.status = Some(format!("Logged in as {}", user.username));
                app.mode = InputMode::Normal;
                navigate(app, "/dashboard")
            }
            Err(err) => {
                app.status = Some(format!("Login failed: {}", err.message()));
                vec![]
            }
        },
        UiEvent::Registered(result) => match result {
            Ok(user) => {
                app.status = Some(format!("Welcome, {}", user.username));
                app.mode = InputMode::Normal;
                navigate(app, "/dashboard")
            }
            Err(err) => {
                app.status = Some(format!("Registration failed: {}", err.message()));
                vec![]
            }
        },
        UiEvent::Created(result) => match result {
            Ok(ticket) => {
                app.status = Some(format!("Created {}", ticket.key));
                app.mode = InputMode::Normal;
                navigate(app, &format!("/tickets/{}", ticket.key))
            }
            Err(err) => {
                app.status = Some(format!("Create failed: {}", err.message()));
                vec![]
            }
        },
    }
}

/// Navigates to a path, resetting per-page input state.
///
/// Returns the fetch effects the new page needs; `pending_fetches` tracks
/// them so the renderer can show a spinner until they settle.
pub fn navigate(app: &mut AppState, path: &str) -> Vec<UiEffect> {
    app.route = routes::resolve(path);
    app.status = None;

    app.mode = match app.route.page {
        Page::Login => {
            app.form = Form::new(vec![FormField::new("Username"), FormField::masked("Password")]);
            InputMode::Form
        }
        Page::Register => {
            app.form = Form::new(vec![
                FormField::new("Username"),
                FormField::masked("Password"),
                FormField::new("Email"),
                FormField::new("Full name"),
            ]);
            InputMode::Form
        }
        Page::TicketCreate => {
            let project = app.default_project.clone().unwrap_or_default();
            app.form = Form::new(vec![
                FormField::with_value("Project", project),
                FormField::new("Summary"),
                FormField::with_value("Type", "Task"),
                FormField::new("Description"),
            ]);
            InputMode::Form
        }
        Page::Search => {
            app.query.clear();
            InputMode::Search
        }
        _ => InputMode::Normal,
    };

    let effects = fetches_for(app);
    app.pending_fetches = effects.len();
    effects
}

/// The fetches a route needs, expressed as generic store requests.
fn fetches_for(app: &AppState) -> Vec<UiEffect> {
    let fetch = |path: String, key: &str| UiEffect::Fetch {
        path,
        key: key.to_string(),
    };

    match app.route.page {
        Page::Search | Page::Dashboard => {
            vec![fetch("/api/v1/tickets".to_string(), "tickets")]
        }
        Page::ProjectList => vec![fetch("/api/v1/projects".to_string(), "projects")],
        Page::ProjectShow => match app.route.param("key") {
            Some(key) => vec![fetch(format!("/api/v1/projects/{key}"), "project")],
            None => vec![],
        },
        Page::TicketShow => match app.route.param("key") {
            Some(key) => vec![fetch(format!("/api/v1/tickets/{key}"), "ticket")],
            None => vec![],
        },
        Page::UserProfile => match app.route.param("username") {
            Some(username) => vec![fetch(format!("/api/v1/users/{username}"), "profile")],
            None => vec![],
        },
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return vec![];
    }

    match app.mode {
        InputMode::Normal => handle_normal_key(app, key),
        InputMode::Goto => handle_goto_key(app, key),
        InputMode::Search => handle_search_key(app, key),
        InputMode::Form => handle_form_key(app, key),
    }
}

fn handle_normal_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            vec![]
        }
        KeyCode::Char('g') => {
            app.mode = InputMode::Goto;
            app.goto = "/".to_string();
            vec![]
        }
        KeyCode::Char('r') => {
            let effects = fetches_for(app);
            app.pending_fetches = effects.len();
            effects
        }
        KeyCode::Char('/') if app.route.page == Page::Search => {
            app.mode = InputMode::Search;
            vec![]
        }
        KeyCode::Char('s') => {
            let shown = app.store.read(|s| s.show_sidebar());
            app.store.commit(Mutation::SetSidebarShown(!shown));
            vec![]
        }
        KeyCode::Char('[') => {
            adjust_sidebar(app, -(SIDEBAR_STEP as i64));
            vec![]
        }
        KeyCode::Char(']') => {
            adjust_sidebar(app, SIDEBAR_STEP as i64);
            vec![]
        }
        KeyCode::Char('x') => {
            app.store.commit(Mutation::ClearErrors);
            app.status = None;
            vec![]
        }
        KeyCode::Char('d') => navigate(app, "/dashboard"),
        KeyCode::Char('t') => navigate(app, "/queries"),
        KeyCode::Char('p') => navigate(app, "/projects"),
        KeyCode::Char('c') => navigate(app, "/tickets/create"),
        KeyCode::Char('l') => navigate(app, "/login"),
        KeyCode::Char('o') => {
            if app.store.read(|s| s.token().is_some()) {
                app.status = Some("Logged out".to_string());
                vec![UiEffect::Logout]
            } else {
                vec![]
            }
        }
        _ => vec![],
    }
}

fn handle_goto_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Esc => {
            app.mode = InputMode::Normal;
            app.goto.clear();
            vec![]
        }
        KeyCode::Enter => {
            let path = std::mem::take(&mut app.goto);
            navigate(app, &path)
        }
        KeyCode::Backspace => {
            app.goto.pop();
            vec![]
        }
        KeyCode::Char(c) => {
            app.goto.push(c);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_search_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Esc => {
            app.mode = InputMode::Normal;
            vec![]
        }
        KeyCode::Enter => {
            app.pending_fetches = 1;
            let encoded: String =
                url::form_urlencoded::byte_serialize(app.query.as_bytes()).collect();
            let path = if encoded.is_empty() {
                "/api/v1/tickets".to_string()
            } else {
                format!("/api/v1/tickets?q={encoded}")
            };
            vec![UiEffect::Fetch {
                path,
                key: "tickets".to_string(),
            }]
        }
        KeyCode::Backspace => {
            app.query.pop();
            vec![]
        }
        KeyCode::Char(c) => {
            app.query.push(c);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_form_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Esc => {
            app.mode = InputMode::Normal;
            vec![]
        }
        KeyCode::Tab | KeyCode::Down => {
            app.form.focus_next();
            vec![]
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.form.focus_prev();
            vec![]
        }
        KeyCode::Enter => {
            if app.form.on_last_field() {
                submit_form(app).into_iter().collect()
            } else {
                app.form.focus_next();
                vec![]
            }
        }
        KeyCode::Backspace => {
            if let Some(field) = app.form.focused_mut() {
                field.value.pop();
            }
            vec![]
        }
        KeyCode::Char(c) => {
            if let Some(field) = app.form.focused_mut() {
                field.value.push(c);
            }
            vec![]
        }
        _ => vec![],
    }
}

/// Builds the submission effect for the form on the current page.
fn submit_form(app: &mut AppState) -> Option<UiEffect> {
    match app.route.page {
        Page::Login => Some(UiEffect::Login {
            username: app.form.value(0).to_string(),
            password: app.form.value(1).to_string(),
        }),
        Page::Register => Some(UiEffect::Register(NewUser {
            username: app.form.value(0).to_string(),
            password: app.form.value(1).to_string(),
            email: app.form.value(2).to_string(),
            full_name: app.form.value(3).to_string(),
        })),
        Page::TicketCreate => {
            let ticket = NewTicket {
                summary: app.form.value(1).to_string(),
                description: app.form.value(3).to_string(),
                ticket_type: TicketType {
                    id: 0,
                    name: app.form.value(2).to_string(),
                },
                project: Project {
                    key: app.form.value(0).to_string(),
                    ..Project::default()
                },
                labels: Vec::new(),
            };
            Some(UiEffect::CreateTicket(Box::new(ticket)))
        }
        _ => None,
    }
}

fn adjust_sidebar(app: &mut AppState, delta: i64) {
    let current = app.store.read(|s| parse_px(s.sidebar_width()));
    let next = (i64::from(current) + delta).clamp(i64::from(SIDEBAR_MIN), i64::from(SIDEBAR_MAX));
    app.store
        .commit(Mutation::SetSidebarWidth(Some(SidebarWidth::Pixels(
            next as u32,
        ))));
}

/// Parses a `"250px"`-style width, defaulting when it isn't pixel-shaped.
pub fn parse_px(width: &str) -> u32 {
    width
        .strip_suffix("px")
        .and_then(|n| n.trim().parse().ok())
        .unwrap_or(250)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tkt_core::api::ApiClient;
    use tkt_core::store::Store;

    use super::*;

    fn test_app() -> AppState {
        let client = ApiClient::with_base_url("http://127.0.0.1:1", None).unwrap();
        AppState::new(Arc::new(Store::new(client)), Some("TEST".to_string()))
    }

    fn press(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            update(app, press(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_starts_on_index_when_logged_out() {
        let app = test_app();
        assert_eq!(app.route.page, Page::Index);
    }

    #[test]
    fn test_goto_navigates_and_requests_fetches() {
        let mut app = test_app();
        update(&mut app, press(KeyCode::Char('g')));
        assert_eq!(app.mode, InputMode::Goto);

        type_text(&mut app, "projects");
        let effects = update(&mut app, press(KeyCode::Enter));

        assert_eq!(app.route.page, Page::ProjectList);
        assert_eq!(
            effects,
            vec![UiEffect::Fetch {
                path: "/api/v1/projects".to_string(),
                key: "projects".to_string(),
            }]
        );
        assert_eq!(app.pending_fetches, 1);
    }

    #[test]
    fn test_goto_unknown_path_lands_on_not_found() {
        let mut app = test_app();
        update(&mut app, press(KeyCode::Char('g')));
        type_text(&mut app, "bogus/path");
        let effects = update(&mut app, press(KeyCode::Enter));

        assert_eq!(app.route.page, Page::NotFound);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_ticket_show_fetch_uses_route_param() {
        let mut app = test_app();
        let effects = navigate(&mut app, "/tickets/TEST-1");
        assert_eq!(
            effects,
            vec![UiEffect::Fetch {
                path: "/api/v1/tickets/TEST-1".to_string(),
                key: "ticket".to_string(),
            }]
        );
    }

    #[test]
    fn test_sidebar_toggle_and_resize() {
        let mut app = test_app();
        assert!(!app.store.read(|s| s.show_sidebar()));

        update(&mut app, press(KeyCode::Char('s')));
        assert!(app.store.read(|s| s.show_sidebar()));

        update(&mut app, press(KeyCode::Char(']')));
        assert_eq!(app.store.read(|s| s.sidebar_width().to_string()), "275px");

        update(&mut app, press(KeyCode::Char('[')));
        update(&mut app, press(KeyCode::Char('[')));
        assert_eq!(app.store.read(|s| s.sidebar_width().to_string()), "225px");
    }

    #[test]
    fn test_login_form_submits_credentials() {
        let mut app = test_app();
        navigate(&mut app, "/login");
        assert_eq!(app.mode, InputMode::Form);

        type_text(&mut app, "foouser");
        update(&mut app, press(KeyCode::Tab));
        type_text(&mut app, "hunter2");
        let effects = update(&mut app, press(KeyCode::Enter));

        assert_eq!(
            effects,
            vec![UiEffect::Login {
                username: "foouser".to_string(),
                password: "hunter2".to_string(),
            }]
        );
    }

    #[test]
    fn test_create_form_prefills_default_project() {
        let mut app = test_app();
        navigate(&mut app, "/tickets/create");
        assert_eq!(app.form.value(0), "TEST");
        assert_eq!(app.form.value(2), "Task");
    }

    #[test]
    fn test_search_enter_fetches_with_query() {
        let mut app = test_app();
        navigate(&mut app, "/queries");
        assert_eq!(app.mode, InputMode::Search);

        type_text(&mut app, "status = Open");
        let effects = update(&mut app, press(KeyCode::Enter));
        assert_eq!(
            effects,
            vec![UiEffect::Fetch {
                path: "/api/v1/tickets?q=status+%3D+Open".to_string(),
                key: "tickets".to_string(),
            }]
        );
    }

    #[test]
    fn test_fetched_decrements_pending() {
        let mut app = test_app();
        navigate(&mut app, "/projects");
        assert_eq!(app.pending_fetches, 1);

        update(
            &mut app,
            UiEvent::Fetched {
                key: "projects".to_string(),
            },
        );
        assert_eq!(app.pending_fetches, 0);
        assert!(!app.is_loading());
    }

    #[test]
    fn test_quit_keys() {
        let mut app = test_app();
        update(&mut app, press(KeyCode::Char('q')));
        assert!(app.should_quit);

        let mut app = test_app();
        update(
            &mut app,
            UiEvent::Terminal(Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
            ))),
        );
        assert!(app.should_quit);
    }
}
