//! TUI runtime - owns the terminal, runs the event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here. The
//! reducer stays pure and produces effects; this module executes them.
//!
//! Async results arrive through an inbox channel: effect handlers send
//! `UiEvent`s to `inbox_tx`, and the loop drains `inbox_rx` every frame.

use std::io::Stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tkt_core::config::Config;
use tkt_core::store::Store;
use tokio::sync::mpsc;

use crate::events::{UiEffect, UiEvent};
use crate::state::AppState;
use crate::{render, terminal, update};

/// Tick cadence; caps the frame rate and drives the spinner.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Terminal state is restored on drop paths
/// via the panic hook plus the caller's `restore_terminal`.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    inbox_tx: mpsc::UnboundedSender<UiEvent>,
    inbox_rx: mpsc::UnboundedReceiver<UiEvent>,
    last_tick: Instant,
}

impl TuiRuntime {
    /// Creates the runtime: panic hook, alternate screen, initial state.
    pub fn new(config: &Config, store: Arc<Store>) -> Result<Self> {
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let state = AppState::new(store, config.default_project.clone());
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            state,
            inbox_tx,
            inbox_rx,
            last_tick: Instant::now(),
        })
    }

    /// Runs the main event loop until the user quits.
    pub fn run(&mut self) -> Result<()> {
        // Kick off the fetches for the starting page.
        let start = if self.state.store.read(|s| s.token().is_some()) {
            "/dashboard"
        } else {
            "/"
        };
        let effects = update::navigate(&mut self.state, start);
        self.execute_effects(effects);

        let mut dirty = true;

        while !self.state.should_quit {
            let mut events = Vec::new();

            // Drain inbox - all async results arrive here.
            while let Ok(event) = self.inbox_rx.try_recv() {
                events.push(event);
            }

            // Poll terminal input until the next tick is due.
            let timeout = TICK_INTERVAL.saturating_sub(self.last_tick.elapsed());
            if crossterm::event::poll(timeout).context("Failed to poll terminal events")? {
                events.push(UiEvent::Terminal(
                    crossterm::event::read().context("Failed to read terminal event")?,
                ));
            }

            if self.last_tick.elapsed() >= TICK_INTERVAL {
                events.push(UiEvent::Tick);
                self.last_tick = Instant::now();
            }

            for event in events {
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
                dirty = true;
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Executes one effect, usually by spawning a task that reports back
    /// through the inbox.
    fn execute_effect(&mut self, effect: UiEffect) {
        let store = Arc::clone(&self.state.store);
        let tx = self.inbox_tx.clone();

        match effect {
            UiEffect::Fetch { path, key } => {
                tokio::spawn(async move {
                    store.request(&path, &key).await;
                    let _ = tx.send(UiEvent::Fetched { key });
                });
            }
            UiEffect::Login { username, password } => {
                tokio::spawn(async move {
                    let result = store.login(&username, &password).await;
                    let _ = tx.send(UiEvent::LoggedIn(result));
                });
            }
            UiEffect::Register(new_user) => {
                tokio::spawn(async move {
                    let result = store.client().register(&new_user).await.map(|resp| {
                        store.login_with(resp.token.clone(), resp.user.clone());
                        resp.user
                    });
                    let _ = tx.send(UiEvent::Registered(result));
                });
            }
            UiEffect::CreateTicket(ticket) => {
                tokio::spawn(async move {
                    let result = store.client().create_ticket(&ticket).await.map(Box::new);
                    let _ = tx.send(UiEvent::Created(result));
                });
            }
            UiEffect::Logout => {
                // Synchronous: clears state, header, and the session blob.
                store.logout();
            }
        }
    }
}
