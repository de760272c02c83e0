//! `[syndication]` section configuration.
//!
//! Each target table is passed verbatim to the registered handler for that
//! target; this crate never interprets the settings itself.

use educe::Educe;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// `[syndication]` section in postern.toml - silo targets.
///
/// # Example
/// ```toml
/// [syndication.targets.mastodon]
/// server = "https://hachyderm.io"
/// token_path = "/home/alice/.config/postern/mastodon-token"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SyndicationSection {
    /// Settings per target name, keyed the way clients request them in
    /// `mp-syndicate-to`.
    #[serde(default)]
    pub targets: IndexMap<String, toml::Table>,
}

impl SyndicationSection {
    /// Names of all configured targets.
    pub fn target_names(&self) -> Vec<&str> {
        self.targets.keys().map(String::as_str).collect()
    }
}
