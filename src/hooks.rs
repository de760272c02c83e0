//! Hook registries for reply/repost enrichment and syndication.
//!
//! Handlers are registered explicitly at startup and looked up by key —
//! `(domain, relation)` for context hooks, target name for syndicators —
//! so the hook set is enumerable and each handler can be tested alone.
//! A missing hook is never an error: enrichment passes data through
//! unchanged and unsyndicatable targets are skipped. A *failing* hook is
//! logged and treated the same way; the primary write must not depend on
//! silo availability.

use crate::{
    content::PropertySet,
    log,
};

/// How a post relates to another site's post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Reply,
    Repost,
}

impl Relation {
    /// A post is a reply or a repost or neither, never both, so a fixed
    /// probe order is safe.
    pub const ALL: [Self; 2] = [Self::Repost, Self::Reply];

    /// The property carrying the target URL for this relation.
    pub const fn property(self) -> &'static str {
        match self {
            Self::Reply => "in-reply-to",
            Self::Repost => "repost-of",
        }
    }
}

/// Silo-specific enrichment for replies and reposts: may rewrite both the
/// properties and the content (e.g. quoting the remote post).
pub trait ContextHook {
    /// Domain of the silo this hook understands (e.g. `news.ycombinator.com`).
    fn domain(&self) -> &str;

    fn relation(&self) -> Relation;

    fn enrich(
        &self,
        properties: PropertySet,
        content: String,
    ) -> anyhow::Result<(PropertySet, String)>;
}

/// Copies a post to an external silo, returning the URL of the silo copy,
/// or `None` when the post was not syndicated.
pub trait Syndicator {
    /// Target name as clients request it in `mp-syndicate-to`.
    fn name(&self) -> &str;

    fn syndicate(
        &self,
        settings: &toml::Table,
        properties: &PropertySet,
        content: &str,
        url: &str,
    ) -> anyhow::Result<Option<String>>;
}

// ============================================================================
// Registry
// ============================================================================

/// All hooks known to the endpoint, populated once at startup.
#[derive(Default)]
pub struct HookRegistry {
    context: Vec<Box<dyn ContextHook>>,
    syndicators: Vec<Box<dyn Syndicator>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_context(&mut self, hook: Box<dyn ContextHook>) {
        self.context.push(hook);
    }

    pub fn register_syndicator(&mut self, hook: Box<dyn Syndicator>) {
        self.syndicators.push(hook);
    }

    pub fn context_for(&self, domain: &str, relation: Relation) -> Option<&dyn ContextHook> {
        self.context
            .iter()
            .find(|hook| hook.relation() == relation && hook.domain() == domain)
            .map(|hook| &**hook)
    }

    pub fn syndicator_for(&self, name: &str) -> Option<&dyn Syndicator> {
        self.syndicators
            .iter()
            .find(|hook| hook.name() == name)
            .map(|hook| &**hook)
    }
}

/// Run the matching context hook for a reply or repost, if any.
///
/// Properties and content pass through unchanged when the post carries no
/// relation, the target domain has no registered hook, or the hook fails.
pub fn enrich(
    registry: &HookRegistry,
    mut properties: PropertySet,
    mut content: String,
) -> (PropertySet, String) {
    for relation in Relation::ALL {
        let Some(target) = properties.first_str(relation.property()) else {
            continue;
        };
        let Some(domain) = url_host(target) else {
            continue;
        };
        let Some(hook) = registry.context_for(&domain, relation) else {
            continue;
        };
        match hook.enrich(properties.clone(), content.clone()) {
            Ok((enriched_properties, enriched_content)) => {
                properties = enriched_properties;
                content = enriched_content;
            }
            Err(err) => {
                log!("hooks"; "{} enrichment for {domain} failed: {err:#}", relation.property());
            }
        }
    }
    (properties, content)
}

/// Host portion of a URL, without a userinfo, port or path.
fn url_host(url: &str) -> Option<String> {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let rest = rest.rsplit_once('@').map_or(rest, |(_, rest)| rest);
    let host = rest
        .split(['/', '?', '#'])
        .next()?
        .split(':')
        .next()?;
    (!host.is_empty()).then(|| host.to_owned())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct QuoteHook;

    impl ContextHook for QuoteHook {
        fn domain(&self) -> &str {
            "remote.example"
        }

        fn relation(&self) -> Relation {
            Relation::Reply
        }

        fn enrich(
            &self,
            mut properties: PropertySet,
            content: String,
        ) -> anyhow::Result<(PropertySet, String)> {
            properties.set_scalar("posttype", "reply");
            Ok((properties, format!("> quoted\n\n{content}")))
        }
    }

    struct FailingHook;

    impl ContextHook for FailingHook {
        fn domain(&self) -> &str {
            "remote.example"
        }

        fn relation(&self) -> Relation {
            Relation::Repost
        }

        fn enrich(
            &self,
            _properties: PropertySet,
            _content: String,
        ) -> anyhow::Result<(PropertySet, String)> {
            anyhow::bail!("silo unreachable")
        }
    }

    fn reply_properties() -> PropertySet {
        PropertySet::from_loose([(
            "in-reply-to".to_owned(),
            json!("https://remote.example/post/1"),
        )])
    }

    #[test]
    fn test_url_host() {
        assert_eq!(url_host("https://remote.example/post/1"), Some("remote.example".into()));
        assert_eq!(url_host("https://remote.example:8443/p"), Some("remote.example".into()));
        assert_eq!(url_host("https://user@remote.example/p"), Some("remote.example".into()));
        assert_eq!(url_host("https://"), None);
    }

    #[test]
    fn test_enrich_without_hook_passes_through() {
        let registry = HookRegistry::new();
        let (properties, content) =
            enrich(&registry, reply_properties(), "hello".into());
        assert_eq!(content, "hello");
        assert!(!properties.contains("posttype"));
    }

    #[test]
    fn test_enrich_applies_matching_hook() {
        let mut registry = HookRegistry::new();
        registry.register_context(Box::new(QuoteHook));

        let (properties, content) =
            enrich(&registry, reply_properties(), "hello".into());

        assert_eq!(properties.first_str("posttype"), Some("reply"));
        assert!(content.starts_with("> quoted"));
    }

    #[test]
    fn test_enrich_wrong_relation_is_skipped() {
        let mut registry = HookRegistry::new();
        registry.register_context(Box::new(QuoteHook));

        let properties = PropertySet::from_loose([(
            "repost-of".to_owned(),
            json!("https://remote.example/post/1"),
        )]);
        let (properties, content) = enrich(&registry, properties, "hello".into());

        assert_eq!(content, "hello");
        assert!(!properties.contains("posttype"));
    }

    #[test]
    fn test_enrich_hook_failure_passes_through() {
        let mut registry = HookRegistry::new();
        registry.register_context(Box::new(FailingHook));

        let properties = PropertySet::from_loose([(
            "repost-of".to_owned(),
            json!("https://remote.example/post/1"),
        )]);
        let (properties, content) = enrich(&registry, properties, "hello".into());

        assert_eq!(content, "hello");
        assert!(properties.contains("repost-of"));
    }

    #[test]
    fn test_syndicator_lookup_by_name() {
        struct Echo;
        impl Syndicator for Echo {
            fn name(&self) -> &str {
                "echo"
            }
            fn syndicate(
                &self,
                _settings: &toml::Table,
                _properties: &PropertySet,
                _content: &str,
                url: &str,
            ) -> anyhow::Result<Option<String>> {
                Ok(Some(format!("https://echo.example/{url}")))
            }
        }

        let mut registry = HookRegistry::new();
        registry.register_syndicator(Box::new(Echo));

        assert!(registry.syndicator_for("echo").is_some());
        assert!(registry.syndicator_for("other").is_none());
    }
}
