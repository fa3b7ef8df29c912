//! Ticket command handlers.

use anyhow::{Context, Result};
use comfy_table::{ContentArrangement, Table};
use tkt_core::markdown;
use tkt_core::store::Store;
use tkt_types::{NewTicket, Project, TicketType};

pub async fn list(store: &Store, query: Option<&str>) -> Result<()> {
    let tickets = match query {
        Some(query) => store.client().search_tickets(query).await,
        None => store.client().tickets().await,
    }
    .context("list tickets")?;

    if tickets.is_empty() {
        println!("No tickets found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(["Key", "Type", "Status", "Assignee", "Summary"]);
    for ticket in &tickets {
        table.add_row([
            ticket.key.as_str(),
            ticket.ticket_type.name.as_str(),
            ticket.status.name.as_str(),
            ticket.assignee.username.as_str(),
            ticket.summary.as_str(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub async fn show(store: &Store, key: &str) -> Result<()> {
    let ticket = store
        .client()
        .ticket(key)
        .await
        .with_context(|| format!("show ticket '{key}'"))?;

    println!("{} {}", ticket.key, ticket.summary);
    println!(
        "{} · {} · reporter {} · assignee {}",
        ticket.ticket_type.name,
        ticket.status.name,
        ticket.reporter.username,
        ticket.assignee.username
    );

    if !ticket.description.is_empty() {
        println!();
        println!("{}", markdown::render_plain(&ticket.description));
    }

    if !ticket.comments.is_empty() {
        println!();
        println!("Comments ({}):", ticket.comments.len());
        for comment in &ticket.comments {
            println!("— {}", comment.author.username);
            println!("  {}", markdown::render_plain(&comment.body));
        }
    }

    Ok(())
}

pub async fn create(
    store: &Store,
    project: &str,
    summary: &str,
    ticket_type: &str,
    description: &str,
) -> Result<()> {
    let new_ticket = NewTicket {
        summary: summary.to_string(),
        description: description.to_string(),
        ticket_type: TicketType {
            id: 0,
            name: ticket_type.to_string(),
        },
        project: Project {
            key: project.to_string(),
            ..Project::default()
        },
        labels: Vec::new(),
    };

    let ticket = store
        .client()
        .create_ticket(&new_ticket)
        .await
        .context("create ticket")?;

    println!("Created {}", ticket.key);
    Ok(())
}
