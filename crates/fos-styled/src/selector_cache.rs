//! Selector cache
//!
//! Substitutes a resolved style id for the placeholder token in a rule
//! template. The memo is keyed by the id alone: once an id has been
//! resolved, later calls with the same id return the first result no
//! matter which template they pass. Callers must hand in the same rule
//! whenever an id repeats.

use std::collections::HashMap;

use crate::id_cache::CacheStats;

#[derive(Debug)]
struct Entry {
    template: String,
    resolved: String,
}

/// Memoized placeholder substitution
#[derive(Debug)]
pub struct SelectorCache {
    placeholder: String,
    cache: HashMap<String, Entry>,
    stats: CacheStats,
}

impl Default for SelectorCache {
    fn default() -> Self {
        Self::new("jsx-xxx")
    }
}

impl SelectorCache {
    pub fn new(placeholder: &str) -> Self {
        Self {
            placeholder: placeholder.to_string(),
            cache: HashMap::new(),
            stats: CacheStats::default(),
        }
    }

    /// `template` with every placeholder replaced by `style_id`
    pub fn compute(&mut self, style_id: &str, template: &str) -> String {
        if let Some(entry) = self.cache.get(style_id) {
            self.stats.hits += 1;
            if entry.template != template {
                tracing::warn!(
                    style_id,
                    cached = %entry.template,
                    requested = template,
                    "selector cache hit with a different rule template; returning cached rule"
                );
            }
            return entry.resolved.clone();
        }

        self.stats.misses += 1;
        let resolved = template.replace(&self.placeholder, style_id);
        self.cache.insert(style_id.to_string(), Entry {
            template: template.to_string(),
            resolved: resolved.clone(),
        });
        resolved
    }

    /// Number of memoized ids
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replaces_every_placeholder() {
        let mut selectors = SelectorCache::default();
        let rule = selectors.compute("jsx-42", ".jsx-xxx p, .jsx-xxx a{color:red}");
        assert_eq!(rule, ".jsx-42 p, .jsx-42 a{color:red}");
    }

    #[test]
    fn test_keyed_by_id_only() {
        let mut selectors = SelectorCache::default();
        let first = selectors.compute("jsx-1", ".jsx-xxx{color:red}");
        let second = selectors.compute("jsx-1", ".jsx-xxx{color:blue}");

        assert_eq!(first, ".jsx-1{color:red}");
        assert_eq!(second, first);
        assert_eq!(selectors.len(), 1);
        assert_eq!(selectors.stats(), CacheStats { hits: 1, misses: 1 });
    }

    #[test]
    fn test_template_without_placeholder() {
        let mut selectors = SelectorCache::new("__ID__");
        assert_eq!(selectors.compute("x", "div{}"), "div{}");
        assert_eq!(selectors.compute("y", "#__ID__{}"), "#y{}");
    }
}
