//! Command handlers, one module per subcommand group.

pub mod auth;
pub mod config;
pub mod projects;
pub mod tickets;
pub mod users;
