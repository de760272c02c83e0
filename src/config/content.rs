//! `[content]` section configuration.
//!
//! Where source documents and rendered output live, plus the per-type
//! storage layout.

use super::defaults;
use educe::Educe;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[content]` section in postern.toml - content tree layout.
///
/// # Example
/// ```toml
/// [content]
/// dir = "content"
/// output = "public"
///
/// [content.paths]
/// note = "micro"
/// reply = "reply"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ContentSection {
    /// Source content directory, relative to the site root.
    #[serde(default = "defaults::content::dir")]
    #[educe(Default = defaults::content::dir())]
    pub dir: PathBuf,

    /// Rendered output directory, relative to the site root. Deleting a
    /// post unlinks its rendered file under this tree.
    #[serde(default = "defaults::content::output")]
    #[educe(Default = defaults::content::output())]
    pub output: PathBuf,

    /// Subdirectory per post type. Types without an entry land directly in
    /// the content directory.
    #[serde(default)]
    pub paths: IndexMap<String, String>,
}

impl ContentSection {
    /// Subdirectory for a post type, if one is configured.
    pub fn subdir(&self, post_type: &str) -> Option<&str> {
        self.paths.get(post_type).map(String::as_str)
    }
}
