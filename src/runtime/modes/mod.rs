//! Mode routing
//!
//! - Server mode (HTTP lookup server, default)
//! - CLI mode (recompute, import/export, lookup, config)

pub mod cli;
pub mod server;

pub use cli::run_cli;
pub use server::run_server;

use crate::cli::Commands;

/// Mode detection result
#[derive(Debug, PartialEq)]
pub enum Mode {
    Server,
    Cli,
}

/// No subcommand or `serve` runs the server; everything else is a CLI command
pub fn detect_mode(command: Option<&Commands>) -> Mode {
    match command {
        None | Some(Commands::Serve) => Mode::Server,
        Some(_) => Mode::Cli,
    }
}
