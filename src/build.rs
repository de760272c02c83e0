//! Site-builder trigger.
//!
//! The builder runs synchronously after each content-affecting write: when
//! a client gets its success response, the post is viewable. Builder
//! failures are logged and swallowed — the source document is already
//! durable, and the next successful build picks it up.

use crate::{config::Config, log, utils::command::exec};

/// Run the configured site builder, if enabled.
pub fn trigger(config: &Config) {
    if !config.build.enable {
        return;
    }

    match exec(Some(&config.site.root), &config.build.command) {
        Ok(_) => log!("build"; "site rebuilt"),
        Err(err) => log!("build"; "builder failed: {err:#}"),
    }
}
