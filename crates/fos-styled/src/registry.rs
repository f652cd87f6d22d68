//! Style registry
//!
//! Reference-counts the CSS of mounted component instances. Every mounted
//! style id has exactly one count (>= 1) and exactly one [`TagEntry`]; the
//! two maps always share the same key set.
//!
//! Single-rule styles get a `<style>` element of their own. Multi-rule
//! styles are appended to the shared sheet. Tags emitted by the server
//! render are adopted instead of creating new ones.
//!
//! Calls for one id must follow mount, update*, unmount order. The
//! registry is single-threaded and not reentrant.

use std::collections::HashMap;
use std::ops::Range;

use fos_dom::Document;
use serde_json::Value;

use crate::config::RegistryConfig;
use crate::error::{StyleError, StyleResult};
use crate::hash::StyleHasher;
use crate::host::StyleHost;
use crate::id_cache::IdCache;
use crate::props::{Css, EffectiveStyle, StyleProps};
use crate::selector_cache::SelectorCache;
use crate::server_tags::ServerTagIndex;
use crate::shared_sheet::SharedSheet;

/// Where the CSS of a mounted style id lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagEntry<T> {
    /// Own `<style>` element, created here or adopted from the server
    Standalone(T),
    /// Rules `start..end` of the shared sheet
    SharedRange(Range<usize>),
}

/// Derives effective ids and rules through the memo caches
#[derive(Debug)]
struct Resolver {
    ids: IdCache,
    selectors: SelectorCache,
}

impl Resolver {
    fn style_id(&mut self, props: &StyleProps) -> String {
        match &props.dynamic {
            Some(dynamic) => self.ids.compute(&props.style_id, dynamic),
            None => props.style_id.clone(),
        }
    }

    fn resolve(&mut self, props: &StyleProps) -> EffectiveStyle {
        let style_id = self.style_id(props);
        let rules = match &props.dynamic {
            Some(_) => props.css.rules()
                .map(|rule| self.selectors.compute(&style_id, rule))
                .collect(),
            None => props.css.rules().map(str::to_string).collect(),
        };
        EffectiveStyle { style_id, rules }
    }
}

/// Client-side registry of mounted component styles
///
/// Owns the instance counts, the tag map and the server tag index. Build
/// one per document with [`StyleRegistry::new`]; [`StyleRegistry::detached`]
/// gives a registry with no document whose mutations are no-ops.
#[derive(Debug)]
pub struct StyleRegistry<H: StyleHost = Document> {
    host: Option<H>,
    config: RegistryConfig,
    resolver: Resolver,
    server: ServerTagIndex<H::Tag>,
    sheet: SharedSheet<H::Tag>,
    instances: HashMap<String, usize>,
    tags: HashMap<String, TagEntry<H::Tag>>,
}

impl<H: StyleHost> StyleRegistry<H> {
    /// Registry managing styles in `host`
    pub fn new(host: H) -> Self {
        Self::with_config(host, RegistryConfig::default())
    }

    pub fn with_config(host: H, config: RegistryConfig) -> Self {
        Self::build(Some(host), config)
    }

    /// Registry without a live document
    pub fn detached() -> Self {
        Self::build(None, RegistryConfig::default())
    }

    fn build(host: Option<H>, config: RegistryConfig) -> Self {
        let resolver = Resolver {
            ids: IdCache::new(&config.id_prefix),
            selectors: SelectorCache::new(&config.placeholder_token),
        };
        Self {
            host,
            config,
            resolver,
            server: ServerTagIndex::default(),
            sheet: SharedSheet::default(),
            instances: HashMap::new(),
            tags: HashMap::new(),
        }
    }

    /// Replace the hash primitive behind computed ids.
    ///
    /// Ids memoized so far are dropped.
    pub fn with_hasher(mut self, hasher: Box<dyn StyleHasher>) -> Self {
        self.resolver.ids = IdCache::with_hasher(&self.config.id_prefix, hasher);
        self
    }

    /// Short id for a base id and its dynamic values
    pub fn compute_id(&mut self, base_id: &str, dynamic: &Value) -> String {
        self.resolver.ids.compute(base_id, dynamic)
    }

    /// Rule template with the placeholder replaced by `style_id`
    pub fn compute_selector(&mut self, style_id: &str, template: &str) -> String {
        self.resolver.selectors.compute(style_id, template)
    }

    /// Effective id and rules for `props`
    pub fn resolve(&mut self, props: &StyleProps) -> EffectiveStyle {
        self.resolver.resolve(props)
    }

    /// Mount one instance of `props`
    pub fn insert(&mut self, props: &StyleProps) -> StyleResult<()> {
        let Some(host) = self.host.as_mut() else {
            return Ok(());
        };
        self.server.ensure(&*host, &self.config.ssr_attribute);

        let EffectiveStyle { style_id, rules } = self.resolver.resolve(props);

        if let Some(count) = self.instances.get_mut(&style_id) {
            *count += 1;
            tracing::trace!(%style_id, count = *count, "style instance added");
            return Ok(());
        }

        let entry = if let Some(tag) = self.server.get(&style_id) {
            tracing::debug!(%style_id, ?tag, "adopted server-rendered style tag");
            TagEntry::Standalone(tag.clone())
        } else {
            match &props.css {
                Css::Dynamic(_) => {
                    let rule = rules.first().map_or("", String::as_str);
                    let tag = host.create_style(rule, &self.config.client_attribute)?;
                    tracing::debug!(%style_id, ?tag, "created style tag");
                    TagEntry::Standalone(tag)
                }
                Css::Static(_) => {
                    let range = self.sheet.append(host, &self.config.client_attribute, &rules)?;
                    tracing::debug!(%style_id, ?range, "appended rules to shared sheet");
                    TagEntry::SharedRange(range)
                }
            }
        };

        self.instances.insert(style_id.clone(), 1);
        self.tags.insert(style_id, entry);
        Ok(())
    }

    /// Unmount one instance of `props`
    pub fn remove(&mut self, props: &StyleProps) -> StyleResult<()> {
        let Some(host) = self.host.as_mut() else {
            return Ok(());
        };
        let style_id = self.resolver.style_id(props);

        let Some(count) = self.instances.get_mut(&style_id) else {
            tracing::warn!(%style_id, "remove called for a style that is not mounted");
            return Err(StyleError::NotMounted(style_id));
        };
        if *count > 1 {
            *count -= 1;
            tracing::trace!(%style_id, count = *count, "style instance removed");
            return Ok(());
        }

        // Last instance: tear down the CSS first so a host failure leaves
        // the style tracked
        let entry = self.tags.get(&style_id)
            .cloned()
            .ok_or_else(|| StyleError::MissingTag(style_id.clone()))?;

        match entry {
            TagEntry::Standalone(tag) => {
                host.detach_style(&tag)?;
                self.server.forget(&style_id);
                tracing::debug!(%style_id, ?tag, "detached style tag");
            }
            TagEntry::SharedRange(range) => {
                self.sheet.release(host, range, &self.config.deleted_rule)?;
            }
        }
        self.instances.remove(&style_id);
        self.tags.remove(&style_id);
        Ok(())
    }

    /// Move one instance from `props` to `next`.
    ///
    /// The sole instance of a single-rule style has its tag rewritten in
    /// place and re-keyed; everything else mounts `next` before unmounting
    /// `props`, so an unchanged id never drops to zero instances.
    pub fn update(&mut self, props: &StyleProps, next: &StyleProps) -> StyleResult<()> {
        if self.host.is_none() {
            return Ok(());
        }
        if self.update_in_place(props, next)? {
            return Ok(());
        }
        self.insert(next)?;
        self.remove(props)
    }

    fn update_in_place(&mut self, props: &StyleProps, next: &StyleProps) -> StyleResult<bool> {
        if !props.css.is_dynamic() || !next.css.is_dynamic() {
            return Ok(false);
        }
        let style_id = self.resolver.style_id(props);
        if self.instances.get(&style_id) != Some(&1) {
            return Ok(false);
        }
        let Some(TagEntry::Standalone(tag)) = self.tags.get(&style_id) else {
            return Ok(false);
        };
        let tag = tag.clone();

        let EffectiveStyle { style_id: next_id, rules } = self.resolver.resolve(next);
        if next_id != style_id && self.instances.contains_key(&next_id) {
            // Another instance already owns the next id.
            return Ok(false);
        }

        let Some(host) = self.host.as_mut() else {
            return Ok(false);
        };
        host.set_style_text(&tag, rules.first().map_or("", String::as_str))?;

        if next_id != style_id {
            self.instances.remove(&style_id);
            self.tags.remove(&style_id);
            self.server.forget(&style_id);
            self.instances.insert(next_id.clone(), 1);
            self.tags.insert(next_id.clone(), TagEntry::Standalone(tag));
        }
        tracing::debug!(from = %style_id, to = %next_id, "updated style tag in place");
        Ok(true)
    }

    /// Live instances of an effective style id
    pub fn instance_count(&self, style_id: &str) -> Option<usize> {
        self.instances.get(style_id).copied()
    }

    /// Tag entry of an effective style id
    pub fn tag(&self, style_id: &str) -> Option<&TagEntry<H::Tag>> {
        self.tags.get(style_id)
    }

    /// Mounted style ids with their instance counts
    pub fn mounted(&self) -> impl Iterator<Item = (&str, usize)> {
        self.instances.iter().map(|(id, &count)| (id.as_str(), count))
    }

    /// Number of mounted style ids
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Whether a live document backs this registry
    pub fn is_attached(&self) -> bool {
        self.host.is_some()
    }

    /// The shared sheet tag, once created
    pub fn shared_sheet(&self) -> Option<&H::Tag> {
        self.sheet.tag()
    }

    /// Server tags not yet reclaimed
    pub fn server_tags(&self) -> &ServerTagIndex<H::Tag> {
        &self.server
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn host(&self) -> Option<&H> {
        self.host.as_ref()
    }

    pub fn host_mut(&mut self) -> Option<&mut H> {
        self.host.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry() -> StyleRegistry {
        StyleRegistry::new(Document::default())
    }

    #[test]
    fn test_detached_is_noop() {
        let mut reg: StyleRegistry = StyleRegistry::detached();
        let props = StyleProps::new("a", ["a{}"]);

        assert!(!reg.is_attached());
        reg.insert(&props).unwrap();
        reg.update(&props, &props).unwrap();
        reg.remove(&props).unwrap();
        // Unbalanced removes are tolerated without a document
        reg.remove(&props).unwrap();

        assert!(reg.is_empty());
        assert!(!reg.server_tags().is_built());
        assert!(reg.compute_id("a", &json!(1)).starts_with("jsx-"));
    }

    #[test]
    fn test_resolve_static_keeps_id() {
        let mut reg = registry();
        let style = reg.resolve(&StyleProps::new("jsx-1", ["a{}", "b{}"]));
        assert_eq!(style.style_id, "jsx-1");
        assert_eq!(style.rules, vec!["a{}", "b{}"]);
    }

    #[test]
    fn test_resolve_dynamic_substitutes_id() {
        let mut reg = registry();
        let props = StyleProps::new("jsx-1", ".jsx-xxx{color:red}").with_dynamic(json!(["red"]));
        let style = reg.resolve(&props);

        assert_eq!(style.style_id, reg.compute_id("jsx-1", &json!(["red"])));
        assert_eq!(style.rules, vec![format!(".{}{{color:red}}", style.style_id)]);
    }

    #[test]
    fn test_dynamic_insert_creates_own_tag() {
        let mut reg = registry();
        let props = StyleProps::new("jsx-1", "a{color:red}");
        reg.insert(&props).unwrap();

        let Some(TagEntry::Standalone(tag)) = reg.tag("jsx-1").cloned() else {
            panic!("expected a standalone tag");
        };
        let doc = reg.host().unwrap();
        assert_eq!(doc.text_content(tag), "a{color:red}");
        assert_eq!(doc.get_attribute(tag, "data-jsx-client"), Some(""));
        assert!(reg.shared_sheet().is_none());
    }

    #[test]
    fn test_remove_unknown_is_error() {
        let mut reg = registry();
        let props = StyleProps::new("ghost", ["a{}"]);
        assert_eq!(reg.remove(&props), Err(StyleError::NotMounted("ghost".to_string())));
        assert_eq!(reg.instance_count("ghost"), None);
    }

    #[test]
    fn test_update_slow_path_same_id() {
        let mut reg = registry();
        let props = StyleProps::new("s", ["a{}"]);
        reg.insert(&props).unwrap();
        reg.update(&props, &props).unwrap();

        assert_eq!(reg.instance_count("s"), Some(1));
        assert_eq!(reg.tag("s"), Some(&TagEntry::SharedRange(0..1)));
    }
}
