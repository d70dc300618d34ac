//! CLI module for the team registry
//!
//! Provides subcommands:
//! - `serve`: run the HTTP API

pub mod serve;

use clap::{Parser, Subcommand};

/// Team Registry - registers teams with their members and looks them up by name
#[derive(Parser)]
#[command(name = "team-registry")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve(serve::ServeArgs),
}
