//! User command handlers.

use anyhow::{Context, Result};
use tkt_core::store::Store;

pub async fn show(store: &Store, username: &str) -> Result<()> {
    let user = store
        .client()
        .user(username)
        .await
        .with_context(|| format!("show user '{username}'"))?;

    if user.full_name.is_empty() {
        println!("@{}", user.username);
    } else {
        println!("{} (@{})", user.full_name, user.username);
    }
    if !user.email.is_empty() {
        println!("Email: {}", user.email);
    }
    if user.is_admin {
        println!("Administrator");
    }
    if let Some(project) = &user.settings.default_project {
        println!("Default project: {project}");
    }

    Ok(())
}
