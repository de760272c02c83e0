//! `[build]` section configuration.
//!
//! Controls the external site-builder trigger.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[build]` section in postern.toml - site rebuild trigger.
///
/// # Example
/// ```toml
/// [build]
/// enable = true
/// command = ["hugo", "--quiet"]
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BuildSection {
    /// Run the builder after each content-affecting write.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,

    /// Builder command line, executed in the site root.
    #[serde(default = "defaults::build::command")]
    #[educe(Default = defaults::build::command())]
    pub command: Vec<String>,
}
