//! Postern - a micropub write endpoint for static-site blogs.

mod build;
mod cli;
mod config;
mod content;
mod hooks;
mod logger;
mod micropub;
mod ops;
mod paths;
mod serve;
mod storage;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use hooks::HookRegistry;
use serve::serve_endpoint;
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    // Silo-specific context and syndication hooks get registered here as
    // they are written; the registry stays explicit and enumerable.
    let registry = HookRegistry::new();

    match &cli.command {
        Commands::Serve { .. } => serve_endpoint(&config, &registry),
        Commands::Source { url, properties } => print_source(&config, url, properties),
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<Config> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = Config::from_path(&config_path)
        .with_context(|| format!("Failed to load `{}`", config_path.display()))?;
    config.apply_cli(cli);
    config.validate(cli.is_serve())?;

    Ok(config)
}

/// Print a post's decoded property set, the same shape the query endpoint
/// answers with.
fn print_source(config: &Config, url: &str, properties: &[String]) -> Result<()> {
    let properties = ops::source(config, url, properties)?;
    let output = serde_json::json!({ "properties": properties });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
