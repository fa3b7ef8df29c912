//! CLI entry and dispatch.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tkt_core::api::ApiClient;
use tkt_core::config::Config;
use tkt_core::logging;
use tkt_core::store::Store;

mod commands;

#[derive(Parser)]
#[command(name = "tkt")]
#[command(version)]
#[command(about = "Terminal client for a ticket tracker")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override the API base URL from config
    #[arg(long, value_name = "URL", global = true)]
    base_url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Work with tickets
    Tickets {
        #[command(subcommand)]
        command: TicketCommands,
    },
    /// Work with projects
    Projects {
        #[command(subcommand)]
        command: ProjectCommands,
    },
    /// Work with users
    Users {
        #[command(subcommand)]
        command: UserCommands,
    },
    /// Log in and store a session
    Login {
        /// Username to log in as (prompted when omitted)
        #[arg(long)]
        username: Option<String>,
    },
    /// Log out and clear the stored session
    Logout,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum TicketCommands {
    /// List tickets, optionally filtered by a query
    List {
        /// Query string passed to the server
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Show one ticket by key
    Show { key: String },
    /// Create a ticket
    Create {
        /// Project key the ticket belongs to
        #[arg(long)]
        project: String,
        /// One-line summary
        #[arg(long)]
        summary: String,
        /// Ticket type name
        #[arg(long, default_value = "Task")]
        ticket_type: String,
        /// Markdown description
        #[arg(long, default_value = "")]
        description: String,
    },
}

#[derive(clap::Subcommand)]
enum ProjectCommands {
    /// List projects
    List,
    /// Show one project by key
    Show { key: String },
}

#[derive(clap::Subcommand)]
enum UserCommands {
    /// Show a user's profile
    Show { username: String },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Print the config file path
    Path,
    /// Create a default config file
    Init,
}

/// Parses arguments and runs the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Config-only commands must work without a reachable server or logs dir.
    if let Some(Commands::Config { command }) = &cli.command {
        return match command {
            ConfigCommands::Path => commands::config::path(),
            ConfigCommands::Init => commands::config::init(),
        };
    }

    let mut config = Config::load().context("load config")?;
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }

    // Logging is best-effort; a read-only home must not break the CLI.
    let _log_guard = logging::init().ok();
    tracing::debug!(base_url = %config.base_url, "starting");

    let client = ApiClient::new(&config).context("build API client")?;
    let store = Arc::new(Store::new(client));
    store.rehydrate();

    let runtime = tokio::runtime::Runtime::new().context("create async runtime")?;
    runtime.block_on(dispatch(cli, config, store))
}

async fn dispatch(cli: Cli, config: Config, store: Arc<Store>) -> Result<()> {
    match cli.command {
        None => tkt_tui::run(&config, store).await,
        Some(Commands::Tickets { command }) => match command {
            TicketCommands::List { query } => {
                commands::tickets::list(&store, query.as_deref()).await
            }
            TicketCommands::Show { key } => commands::tickets::show(&store, &key).await,
            TicketCommands::Create {
                project,
                summary,
                ticket_type,
                description,
            } => {
                commands::tickets::create(&store, &project, &summary, &ticket_type, &description)
                    .await
            }
        },
        Some(Commands::Projects { command }) => match command {
            ProjectCommands::List => commands::projects::list(&store).await,
            ProjectCommands::Show { key } => commands::projects::show(&store, &key).await,
        },
        Some(Commands::Users { command }) => match command {
            UserCommands::Show { username } => commands::users::show(&store, &username).await,
        },
        Some(Commands::Login { username }) => commands::auth::login(&store, username).await,
        Some(Commands::Logout) => commands::auth::logout(&store),
        Some(Commands::Config { .. }) => unreachable!("handled before dispatch"),
    }
}
