//! URL ↔ path resolution.
//!
//! Pure string transforms between a post's public URL and its on-disk
//! locations (source document, rendered artifact). No filesystem access.

use crate::{config::Config, content::ContentError};
use std::path::PathBuf;

/// Resolve a public URL to its source document under the content tree.
///
/// Three suffix shapes are recognized, checked in order:
/// - `.../index.html` → `... .md`
/// - a trailing `/`   → stripped, then `.md`
/// - anything else    → `.md` appended (the URL names the post directory)
pub fn source_from_url(config: &Config, url: &str) -> Result<PathBuf, ContentError> {
    let rel = strip_site_url(config, url)?;

    let rel = if let Some(stem) = rel.strip_suffix("/index.html") {
        format!("{stem}.md")
    } else if let Some(stem) = rel.strip_suffix('/') {
        format!("{stem}.md")
    } else {
        format!("{rel}.md")
    };

    Ok(config.content_root().join(rel))
}

/// Resolve a public URL to its rendered artifact under the output tree.
pub fn artifact_from_url(config: &Config, url: &str) -> Result<PathBuf, ContentError> {
    let rel = strip_site_url(config, url)?;

    let rel = if rel.ends_with("/index.html") {
        rel.to_owned()
    } else {
        format!("{}/index.html", rel.trim_end_matches('/'))
    };

    Ok(config.output_root().join(rel))
}

/// Destination of a new post: source file path and canonical public URL.
///
/// Post types with a configured subdirectory nest under it; everything
/// else lands directly in the content directory.
pub fn post_destination(config: &Config, post_type: &str, slug: &str) -> (PathBuf, String) {
    let base = &config.site.url;
    match config.content.subdir(post_type) {
        Some(subdir) => (
            config.content_root().join(subdir).join(format!("{slug}.md")),
            format!("{base}/{subdir}/{slug}/index.html"),
        ),
        None => (
            config.content_root().join(format!("{slug}.md")),
            format!("{base}/{slug}/index.html"),
        ),
    }
}

/// Strip the configured site URL, leaving the post's relative part without
/// a leading slash.
fn strip_site_url<'a>(config: &Config, url: &'a str) -> Result<&'a str, ContentError> {
    url.strip_prefix(&config.site.url)
        .map(|rel| rel.trim_start_matches('/'))
        .ok_or_else(|| ContentError::InvalidUrl(url.to_owned()))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        let mut config = Config::default();
        config.site.url = "https://example.com".into();
        config.site.root = "/srv/blog".into();
        config
            .content
            .paths
            .insert("note".into(), "micro".into());
        config
    }

    #[test]
    fn test_source_from_index_html_url() {
        let path =
            source_from_url(&config(), "https://example.com/my-post/index.html").unwrap();
        assert_eq!(path, PathBuf::from("/srv/blog/content/my-post.md"));
    }

    #[test]
    fn test_source_from_trailing_slash_url() {
        let path = source_from_url(&config(), "https://example.com/my-post/").unwrap();
        assert_eq!(path, PathBuf::from("/srv/blog/content/my-post.md"));
    }

    #[test]
    fn test_source_from_bare_url() {
        let path = source_from_url(&config(), "https://example.com/my-post").unwrap();
        assert_eq!(path, PathBuf::from("/srv/blog/content/my-post.md"));
    }

    #[test]
    fn test_source_nested_url() {
        let path = source_from_url(&config(), "https://example.com/micro/123456/").unwrap();
        assert_eq!(path, PathBuf::from("/srv/blog/content/micro/123456.md"));
    }

    #[test]
    fn test_source_foreign_url_rejected() {
        let err = source_from_url(&config(), "https://elsewhere.org/my-post/").unwrap_err();
        assert!(matches!(err, ContentError::InvalidUrl(_)));
        assert_eq!(err.code(), "invalid_url");
    }

    #[test]
    fn test_artifact_from_trailing_slash_url() {
        let path = artifact_from_url(&config(), "https://example.com/my-post/").unwrap();
        assert_eq!(path, PathBuf::from("/srv/blog/public/my-post/index.html"));
    }

    #[test]
    fn test_artifact_from_index_html_url() {
        let path =
            artifact_from_url(&config(), "https://example.com/my-post/index.html").unwrap();
        assert_eq!(path, PathBuf::from("/srv/blog/public/my-post/index.html"));
    }

    #[test]
    fn test_post_destination_with_subdir() {
        let (path, url) = post_destination(&config(), "note", "123456");
        assert_eq!(path, PathBuf::from("/srv/blog/content/micro/123456.md"));
        assert_eq!(url, "https://example.com/micro/123456/index.html");
    }

    #[test]
    fn test_post_destination_without_subdir() {
        let (path, url) = post_destination(&config(), "entry", "my-first-post");
        assert_eq!(path, PathBuf::from("/srv/blog/content/my-first-post.md"));
        assert_eq!(url, "https://example.com/my-first-post/index.html");
    }
}
