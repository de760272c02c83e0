//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Postern micropub endpoint CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Site root directory (where the static-site project lives)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: postern.toml)
    #[arg(short = 'C', long, default_value = "postern.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the micropub endpoint
    Serve {
        /// Interface to bind on
        #[arg(short, long)]
        interface: Option<String>,

        /// The port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the decoded source of a published post as JSON
    Source {
        /// Public URL of the post
        url: String,

        /// Limit the output to the named properties
        #[arg(short, long = "property")]
        properties: Vec<String>,
    },
}

impl Cli {
    pub const fn is_serve(&self) -> bool {
        matches!(self.command, Commands::Serve { .. })
    }
}
