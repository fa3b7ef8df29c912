//! Login/logout command handlers.
//!
//! Credentials are read from stdin so the password never lands in shell
//! history or the process list.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use tkt_core::store::Store;

pub async fn login(store: &Store, username: Option<String>) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let username = match username {
        Some(username) => username,
        None => prompt(&mut lines, "Username: ")?,
    };
    let password = prompt(&mut lines, "Password: ")?;

    let user = store
        .login(&username, &password)
        .await
        .context("login failed")?;

    println!("Logged in as {}", user.username);
    Ok(())
}

pub fn logout(store: &Store) -> Result<()> {
    if store.read(|s| s.token().is_none()) {
        println!("Not logged in.");
        return Ok(());
    }

    store.logout();
    println!("Logged out.");
    Ok(())
}

fn prompt(
    lines: &mut std::io::Lines<io::StdinLock<'_>>,
    label: &str,
) -> Result<String> {
    print!("{label}");
    io::stdout().flush().context("flush prompt")?;

    let line = lines
        .next()
        .transpose()
        .context("read from stdin")?
        .unwrap_or_default();
    Ok(line.trim().to_string())
}
