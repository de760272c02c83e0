//! Endpoint configuration management for `postern.toml`.
//!
//! # Sections
//!
//! | Section         | Purpose                                         |
//! |-----------------|-------------------------------------------------|
//! | `[site]`        | Site identity (public url, project root)        |
//! | `[content]`     | Content tree layout, per-type subdirectories    |
//! | `[build]`       | Site-builder trigger (command, enable)          |
//! | `[serve]`       | Endpoint server (interface, port)               |
//! | `[syndication]` | Silo targets and their handler settings         |
//!
//! The configuration is loaded once in `main` and passed by reference into
//! every component that needs it.
//!
//! # Example
//!
//! ```toml
//! [site]
//! url = "https://example.com"
//! root = "/home/alice/blog"
//!
//! [content.paths]
//! note = "micro"
//!
//! [build]
//! command = ["hugo", "--quiet"]
//!
//! [serve]
//! port = 9473
//! ```

mod build;
mod content;
pub mod defaults;
mod error;
mod serve;
mod site;
mod syndication;

use build::BuildSection;
use content::ContentSection;
use error::ConfigError;
use serve::ServeSection;
use site::SiteSection;
use syndication::SyndicationSection;

use crate::cli::{Cli, Commands};
use anyhow::{Context, Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Root configuration structure representing postern.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Site identity
    #[serde(default)]
    pub site: SiteSection,

    /// Content tree layout
    #[serde(default)]
    pub content: ContentSection,

    /// Site-builder trigger
    #[serde(default)]
    pub build: BuildSection,

    /// Endpoint server settings
    #[serde(default)]
    pub serve: ServeSection,

    /// Syndication targets
    #[serde(default)]
    pub syndication: SyndicationSection,
}

impl Config {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Fold CLI overrides in and normalize paths and the site URL.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(root) = &cli.root {
            self.site.root = root.clone();
        }

        self.config_path = Self::normalize_path(&self.site.root.join(&cli.config));
        self.site.root = Self::normalize_path(&self.site.root);
        // A trailing slash on the base URL would double up in resolved paths.
        self.site.url = self.site.url.trim_end_matches('/').to_owned();

        if let Commands::Serve { interface, port } = &cli.command {
            if let Some(interface) = interface {
                self.serve.interface = interface.clone();
            }
            if let Some(port) = port {
                self.serve.port = *port;
            }
        }
    }

    /// Directory holding source documents: `<site.root>/<content.dir>`.
    pub fn content_root(&self) -> PathBuf {
        self.site.root.join(&self.content.dir)
    }

    /// Directory holding rendered output: `<site.root>/<content.output>`.
    pub fn output_root(&self) -> PathBuf {
        self.site.root.join(&self.content.output)
    }

    /// Validate configuration for the current command. Builder checks only
    /// matter when the endpoint will actually serve writes.
    pub fn validate(&self, serving: bool) -> Result<()> {
        if self.site.url.is_empty() {
            bail!(ConfigError::Validation("[site.url] is required".into()));
        }
        if !self.site.url.starts_with("http") {
            bail!(ConfigError::Validation(
                "[site.url] must start with http:// or https://".into()
            ));
        }

        if serving && self.build.enable {
            if self.build.command.is_empty() {
                bail!(ConfigError::Validation(
                    "[build.command] must have at least one element".into()
                ));
            }
            let cmd = &self.build.command[0];
            which::which(cmd)
                .with_context(|| format!("`{cmd}` not found. Please install it first."))?;
        }

        Ok(())
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
