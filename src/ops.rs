//! The write-side operations: create, update, delete, undelete, source.
//!
//! Each operation runs start to finish within one request. The document is
//! always durable on disk before any side effect that depends on it (build
//! trigger, syndication) runs.

use crate::{
    build,
    config::Config,
    content::{self, ContentError, Document, PropertySet, UpdateRequest, normalize},
    hooks::{self, HookRegistry},
    log,
    micropub::CreateRequest,
    paths, storage,
    utils::slug::slugify,
};
use chrono::Local;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Where a freshly created post ended up.
#[derive(Debug)]
pub struct CreatedPost {
    /// Canonical public URL, for the Location response header.
    pub url: String,
    /// Source document path.
    pub path: PathBuf,
}

// ============================================================================
// Create
// ============================================================================

/// Create a post from a normalized creation request.
///
/// The pipeline, in order: extract the body, default the post type, run
/// reply/repost enrichment, merge uploaded media, default date and
/// publication state, discover the effective post type and slug, write the
/// document (never clobbering an existing slug), trigger the site build,
/// then syndicate and fold the resulting silo URLs back into the file.
pub fn create(
    config: &Config,
    registry: &HookRegistry,
    request: CreateRequest,
    photos: &[Value],
) -> Result<CreatedPost, ContentError> {
    let mut post_type = request
        .entry_type
        .strip_prefix("h-")
        .unwrap_or(&request.entry_type)
        .to_owned();
    let mut properties = request.properties;

    let body = extract_content(&mut properties);

    // Post-type discovery starts from "article" and revises downward.
    properties.set_scalar("posttype", "article");

    let (mut properties, body) = hooks::enrich(registry, properties, body);

    if !photos.is_empty() {
        properties.append("photo", photos.to_vec());
    }

    let now = Local::now();
    if !properties.contains("date") {
        properties.set_scalar("date", now.format("%Y-%m-%d %H:%M:%S").to_string());
    }

    let draft = properties
        .remove("post-status")
        .is_some_and(|values| values.first().and_then(Value::as_str) == Some("draft"));
    properties.set_scalar("published", !draft);

    // Entries with neither a title nor a slug are notes; they get a
    // time-based slug. A reply/repost hook may already have claimed a more
    // specific posttype, which wins over "note".
    if post_type == "entry" && !properties.contains("name") && !properties.contains("slug") {
        post_type = "note".into();
        properties.set_scalar("slug", now.format("%H%M%S").to_string());
        if properties.first_str("posttype") == Some("article") {
            properties.set_scalar("posttype", "note");
        }
    }

    if properties.contains("name") && !properties.contains("slug") {
        let slug = properties.first_str("name").map(slugify).unwrap_or_default();
        properties.set_scalar("slug", slug);
    }
    // Client-supplied slugs go through the same pass; whatever reaches the
    // filesystem is safe.
    if let Some(slug) = properties.first_str("slug").map(slugify) {
        properties.set_scalar("slug", slug);
    }

    let slug = properties.first_str("slug").unwrap_or_default().to_owned();
    let (path, url) = paths::post_destination(config, &post_type, &slug);

    let text = content::encode(&normalize(&properties), &body)?;
    storage::write(&path, &text, false)?;

    build::trigger(config);

    syndicate(
        config,
        registry,
        &mut properties,
        &body,
        &url,
        &request.syndicate_to,
        &path,
    )?;

    Ok(CreatedPost { url, path })
}

/// Pull the body out of the property set: a rich `content.html` field wins
/// over a flat scalar; no content at all is an empty body. The `content`
/// key never stays in the set — body and front matter are disjoint in
/// storage.
fn extract_content(properties: &mut PropertySet) -> String {
    let Some(first) = properties
        .remove("content")
        .and_then(|values| values.into_iter().next())
    else {
        return String::new();
    };

    match first {
        Value::String(text) => text,
        Value::Object(ref rich) => match rich.get("html").and_then(Value::as_str) {
            Some(html) => html.to_owned(),
            None => first.to_string(),
        },
        other => other.to_string(),
    }
}

/// Run requested syndication targets and fold returned silo URLs back into
/// the just-written document. This rewrite does not re-trigger a build —
/// syndication links are cosmetic, not content.
fn syndicate(
    config: &Config,
    registry: &HookRegistry,
    properties: &mut PropertySet,
    body: &str,
    url: &str,
    targets: &[String],
    path: &Path,
) -> Result<(), ContentError> {
    if targets.is_empty() {
        return Ok(());
    }

    let no_settings = toml::Table::new();
    let mut syndicated = Vec::new();

    for target in targets {
        let Some(handler) = registry.syndicator_for(target) else {
            log!("syndicate"; "no handler for `{target}`, skipped");
            continue;
        };
        let settings = config
            .syndication
            .targets
            .get(target)
            .unwrap_or(&no_settings);

        match handler.syndicate(settings, properties, body, url) {
            Ok(Some(silo_url)) => syndicated.push((format!("{target}-url"), silo_url)),
            Ok(None) => log!("syndicate"; "`{target}` declined"),
            Err(err) => log!("syndicate"; "`{target}` failed: {err:#}"),
        }
    }

    if syndicated.is_empty() {
        return Ok(());
    }

    for (name, silo_url) in syndicated {
        properties.set_scalar(name, silo_url);
    }
    let text = content::encode(&normalize(properties), body)?;
    storage::write(path, &text, true)
}

// ============================================================================
// Update / Delete / Undelete
// ============================================================================

/// Apply a partial update to an existing post.
///
/// Replace, add and delete all run against the one snapshot decoded from
/// storage; the body is addressable as `content` for the duration.
pub fn update(config: &Config, url: &str, update: &UpdateRequest) -> Result<(), ContentError> {
    let path = paths::source_from_url(config, url)?;
    let document = Document::read(&path)?;

    let mut properties = document.properties;
    properties.set("content", vec![Value::String(document.body)]);

    content::apply(&mut properties, update);

    let body = match properties
        .remove("content")
        .and_then(|values| values.into_iter().next())
    {
        Some(Value::String(text)) => text,
        Some(other) => other.to_string(),
        None => String::new(),
    };

    let text = content::encode(&normalize(&properties), &body)?;
    storage::write(&path, &text, true)?;
    build::trigger(config);
    Ok(())
}

/// Delete a post: unpublish it and unlink its rendered artifact.
///
/// The source document stays on disk with `published: false`; only the
/// rendered output disappears.
pub fn delete(config: &Config, url: &str) -> Result<(), ContentError> {
    let artifact = paths::artifact_from_url(config, url)?;
    storage::remove_artifact(&artifact)?;
    update(
        config,
        url,
        &UpdateRequest::replace_one("published", vec![Value::Bool(false)]),
    )
}

/// Undelete a post: republish it. The rendered artifact is not restored
/// here; the build regenerates it.
pub fn undelete(config: &Config, url: &str) -> Result<(), ContentError> {
    update(
        config,
        url,
        &UpdateRequest::replace_one("published", vec![Value::Bool(true)]),
    )
}

// ============================================================================
// Source query
// ============================================================================

/// Decoded source of a published post, optionally filtered to the
/// requested property names. The body is exposed as a `content` singleton,
/// in parse shape (list-valued, not normalized).
pub fn source(
    config: &Config,
    url: &str,
    names: &[String],
) -> Result<PropertySet, ContentError> {
    let path = paths::source_from_url(config, url)?;
    let document = Document::read(&path)?;

    let mut properties = document.properties;
    properties.set("content", vec![Value::String(document.body)]);

    Ok(if names.is_empty() {
        properties
    } else {
        properties.filtered(names)
    })
}

// ============================================================================
// Tests
// ============================================================================
