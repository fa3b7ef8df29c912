//! Full-screen TUI for the tkt client.
//!
//! The TUI follows the Elm shape: `state` holds everything the renderer
//! needs, `update` is the single reducer turning events into state changes
//! plus effects, and `runtime` owns the terminal and executes effects.
//! Pages are resolved through the route table in `tkt-core`; the goto
//! prompt accepts the same paths the web client used.

pub mod events;
pub mod pages;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};
use std::sync::Arc;

use anyhow::Result;
use tkt_core::config::Config;
use tkt_core::store::Store;

pub use runtime::TuiRuntime;

/// Runs the interactive TUI until the user quits.
///
/// The store should already be rehydrated; the TUI navigates to the
/// dashboard when a session exists and the index page otherwise.
pub async fn run(config: &Config, store: Arc<Store>) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The TUI requires a terminal.\n\
             Use `tkt tickets list` and friends for non-interactive use."
        );
    }

    let mut runtime = TuiRuntime::new(config, store)?;
    let result = runtime.run();
    terminal::restore_terminal()?;
    result
}
