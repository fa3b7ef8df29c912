//! Project command handlers.

use anyhow::{Context, Result};
use comfy_table::{ContentArrangement, Table};
use tkt_core::store::Store;

pub async fn list(store: &Store) -> Result<()> {
    let projects = store.client().projects().await.context("list projects")?;

    if projects.is_empty() {
        println!("No projects found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(["Key", "Name", "Lead", "Public"]);
    for project in &projects {
        table.add_row([
            project.key.as_str(),
            project.name.as_str(),
            project.lead.as_str(),
            if project.public { "yes" } else { "no" },
        ]);
    }
    println!("{table}");
    Ok(())
}

pub async fn show(store: &Store, key: &str) -> Result<()> {
    let project = store
        .client()
        .project(key)
        .await
        .with_context(|| format!("show project '{key}'"))?;

    println!("{} {}", project.key, project.name);
    println!("Lead: {}", project.lead);
    if let Some(homepage) = &project.homepage {
        println!("Homepage: {homepage}");
    }
    if let Some(repo) = &project.repo {
        println!("Repo: {repo}");
    }
    if !project.ticket_types.is_empty() {
        println!("Ticket types: {}", project.ticket_types.join(", "));
    }

    Ok(())
}
