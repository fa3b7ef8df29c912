//! Shared application state and its mutations.
//!
//! The state is an explicit value, not a global: pages read it through
//! getters and every change goes through [`State::apply`] with a named
//! [`Mutation`], so a test can drive the store deterministically by
//! applying mutations in order.
//!
//! [`Store`] adds the asynchronous side: it owns the state behind a mutex
//! together with the [`ApiClient`], and exposes the `request` action that
//! fetches a URL and commits the result under a caller-supplied key.
//! Each key carries a generation counter; a request may only commit if no
//! newer request for the same key has started since, so a stale, slower
//! response can never overwrite a fresher one.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tkt_types::{Ticket, User};
use tracing::{debug, warn};

use crate::api::{ApiClient, ApiError};
use crate::session::SavedSession;

/// Default sidebar width applied at startup and on reset.
pub const DEFAULT_SIDEBAR_WIDTH: &str = "250px";

/// Width argument for [`Mutation::SetSidebarWidth`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarWidth {
    /// A bare number, rendered as `"{n}px"`.
    Pixels(u32),
    /// A pre-formatted CSS width ("10%", "3rem"), used verbatim.
    Raw(String),
}

/// One recorded request failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEntry {
    /// The state key the failed request was for.
    pub key: String,
    pub error: ApiError,
}

/// A named, synchronous state transition.
#[derive(Debug, Clone)]
pub enum Mutation {
    /// Replace `state[key]` with the response payload.
    ApiSuccess { key: String, data: Value },
    /// Reset `state[key]` to its empty shape and record the error.
    ApiFailure { key: String, error: ApiError },
    /// Drop all recorded errors.
    ClearErrors,
    /// Install the authenticated session.
    Login { token: String, user: User },
    /// Clear the authenticated session.
    Logout,
    /// Set the sidebar width; `None` restores the default.
    SetSidebarWidth(Option<SidebarWidth>),
    /// Show or hide the sidebar.
    SetSidebarShown(bool),
}

/// Shared client state: fetched data slices plus session and UI fields.
#[derive(Debug, Clone)]
pub struct State {
    slices: BTreeMap<String, Value>,
    errors: Vec<ErrorEntry>,
    current_user: Option<User>,
    token: Option<String>,
    sidebar_width: String,
    show_sidebar: bool,
    generations: BTreeMap<String, u64>,
}

impl Default for State {
    fn default() -> Self {
        let mut slices = BTreeMap::new();
        slices.insert("tickets".to_string(), Value::Array(Vec::new()));

        Self {
            slices,
            errors: Vec::new(),
            current_user: None,
            token: None,
            sidebar_width: DEFAULT_SIDEBAR_WIDTH.to_string(),
            show_sidebar: false,
            generations: BTreeMap::new(),
        }
    }
}

impl State {
    /// Applies a mutation. This is the only way state changes.
    pub fn apply(&mut self, mutation: Mutation) {
        match mutation {
            Mutation::ApiSuccess { key, data } => {
                self.slices.insert(key, data);
            }
            Mutation::ApiFailure { key, error } => {
                // Keep the slice usable for rendering: an array collapses to
                // an empty array, anything else to an empty object.
                let empty = match self.slices.get(&key) {
                    Some(Value::Array(_)) => Value::Array(Vec::new()),
                    _ => Value::Object(serde_json::Map::new()),
                };
                self.slices.insert(key.clone(), empty);
                self.errors.push(ErrorEntry { key, error });
            }
            Mutation::ClearErrors => self.errors.clear(),
            Mutation::Login { token, user } => {
                self.token = Some(token);
                self.current_user = Some(user);
            }
            Mutation::Logout => {
                self.token = None;
                self.current_user = None;
            }
            Mutation::SetSidebarWidth(width) => {
                self.sidebar_width = match width {
                    Some(SidebarWidth::Pixels(n)) => format!("{n}px"),
                    Some(SidebarWidth::Raw(s)) => s,
                    None => DEFAULT_SIDEBAR_WIDTH.to_string(),
                };
            }
            Mutation::SetSidebarShown(show) => self.show_sidebar = show,
        }
    }

    // ========================================================================
    // Getters (pure projections)
    // ========================================================================

    /// The raw value stored under a key, if any.
    pub fn slice(&self, key: &str) -> Option<&Value> {
        self.slices.get(key)
    }

    /// Deserializes the value under a key; `None` if absent or mismatched.
    pub fn slice_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.slices
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// The tickets slice, empty when unset or reset by a failure.
    pub fn tickets(&self) -> Vec<Ticket> {
        self.slice_as("tickets").unwrap_or_default()
    }

    pub fn errors(&self) -> &[ErrorEntry] {
        &self.errors
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn sidebar_width(&self) -> &str {
        &self.sidebar_width
    }

    pub fn show_sidebar(&self) -> bool {
        self.show_sidebar
    }

    // ========================================================================
    // Request bookkeeping
    // ========================================================================

    /// Starts a request for a key, invalidating any in-flight request for it.
    ///
    /// Returns the generation the new request must present to commit.
    pub fn begin_request(&mut self, key: &str) -> u64 {
        let entry = self.generations.entry(key.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }

    /// The generation of the most recently started request for a key.
    pub fn generation(&self, key: &str) -> u64 {
        self.generations.get(key).copied().unwrap_or(0)
    }
}

/// The shared store: state plus the API client that feeds it.
#[derive(Debug)]
pub struct Store {
    state: Mutex<State>,
    client: ApiClient,
}

impl Store {
    /// Creates a store with the default initial state.
    pub fn new(client: ApiClient) -> Self {
        Self::with_state(client, State::default())
    }

    /// Creates a store with an explicit initial state (tests, rehydration).
    pub fn with_state(client: ApiClient, state: State) -> Self {
        Self {
            state: Mutex::new(state),
            client,
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs a closure against a snapshot of the state.
    pub fn read<R>(&self, f: impl FnOnce(&State) -> R) -> R {
        f(&self.lock())
    }

    /// Applies a mutation to the state.
    pub fn commit(&self, mutation: Mutation) {
        self.lock().apply(mutation);
    }

    /// The API client requests are issued through.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    // ========================================================================
    // Actions (async, may perform I/O, commit mutations when done)
    // ========================================================================

    /// Fetches `path` and commits the result under `key`.
    ///
    /// On success the slice is replaced wholesale; on failure it is reset
    /// to its empty shape and the error is recorded. A response whose
    /// generation is no longer current is discarded without committing.
    pub async fn request(&self, path: &str, key: &str) {
        let generation = self.lock().begin_request(key);
        debug!(path, key, generation, "store request");

        let result = self.client.get_json(path).await;

        let mut state = self.lock();
        if state.generation(key) != generation {
            debug!(key, generation, "discarding stale response");
            return;
        }

        match result {
            Ok(data) => state.apply(Mutation::ApiSuccess {
                key: key.to_string(),
                data,
            }),
            Err(error) => {
                warn!(key, %error, "request failed");
                state.apply(Mutation::ApiFailure {
                    key: key.to_string(),
                    error,
                });
            }
        }
    }

    /// Exchanges credentials for a token and installs the session.
    ///
    /// # Errors
    /// Returns the classified API error; state is untouched on failure.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, ApiError> {
        let resp = self.client.create_session(username, password).await?;
        self.login_with(resp.token, resp.user.clone());
        Ok(resp.user)
    }

    /// Installs an already-obtained session: state, auth header, blob.
    pub fn login_with(&self, token: String, user: User) {
        self.client.set_token(Some(token.clone()));

        if let Err(err) = SavedSession::new(token.clone(), user.clone()).save() {
            warn!("failed to persist session: {err:#}");
        }

        self.commit(Mutation::Login { token, user });
    }

    /// Clears the session: state, auth header, persisted blob.
    pub fn logout(&self) {
        self.client.set_token(None);

        if let Err(err) = SavedSession::clear() {
            warn!("failed to remove persisted session: {err:#}");
        }

        self.commit(Mutation::Logout);
    }

    /// Restores a persisted session at startup, if one exists.
    ///
    /// A missing or corrupted blob leaves the store unauthenticated.
    pub fn rehydrate(&self) {
        let saved = SavedSession::load_or_default();
        if let (Some(token), Some(user)) = (saved.token, saved.user) {
            if token.is_empty() {
                return;
            }
            self.client.set_token(Some(token.clone()));
            self.commit(Mutation::Login { token, user });
        }
    }
}
