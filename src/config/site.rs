//! `[site]` section configuration.
//!
//! Identifies the published site and the static-site project it is built
//! from.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[site]` section in postern.toml - the site this endpoint writes into.
///
/// # Example
/// ```toml
/// [site]
/// url = "https://example.com"
/// root = "/home/alice/blog"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteSection {
    /// Public base URL of the site. Required; post URLs are resolved
    /// against it and requests for other hosts are rejected.
    pub url: String,

    /// Root directory of the static-site project (the directory the
    /// builder runs in).
    #[serde(default = "defaults::site::root")]
    #[educe(Default = defaults::site::root())]
    pub root: PathBuf,
}
