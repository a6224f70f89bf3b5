//! CLI command definitions for the `qforge` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod games;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Generate adventure games with an LLM and keep a library of the results.
#[derive(Parser)]
#[command(name = "qforge", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Data directory holding config.toml and the game store.
    #[arg(long, global = true, env = "QUESTFORGE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server.
    Serve {
        /// Address to bind (overrides config.toml).
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config.toml).
        #[arg(long, short)]
        port: Option<u16>,
    },

    /// Inspect the stored game library.
    Games {
        #[command(subcommand)]
        action: games::GamesCommand,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
