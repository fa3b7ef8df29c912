//! Events consumed by the reducer and effects it produces.

use tkt_core::api::ApiError;
use tkt_types::{NewTicket, NewUser, Ticket, User};

/// An event delivered to the reducer.
#[derive(Debug)]
pub enum UiEvent {
    /// Periodic tick; drives spinner animation and renders.
    Tick,
    /// A terminal input event.
    Terminal(crossterm::event::Event),
    /// A store `request` for `key` settled (success or failure).
    Fetched { key: String },
    /// A login attempt finished.
    LoggedIn(Result<User, ApiError>),
    /// A registration attempt finished.
    Registered(Result<User, ApiError>),
    /// A ticket creation attempt finished.
    Created(Result<Box<Ticket>, ApiError>),
}

/// A side effect requested by the reducer, executed by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEffect {
    /// Fetch `path` into the state slice `key` via the store.
    Fetch { path: String, key: String },
    /// Exchange credentials for a session.
    Login { username: String, password: String },
    /// Register a new account.
    Register(NewUser),
    /// Create a ticket.
    CreateTicket(Box<NewTicket>),
    /// Clear the session.
    Logout,
}
