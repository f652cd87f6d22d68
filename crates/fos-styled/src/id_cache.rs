//! Identifier cache
//!
//! Maps a base style id plus per-instance dynamic values to a short,
//! stable identifier. Entries live as long as the cache; there is no
//! eviction.

use std::collections::HashMap;

use serde_json::Value;

use crate::hash::{StringHash, StyleHasher};

/// Hit/miss counters shared by the memo caches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    /// Hit rate in percent
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64 * 100.0
        }
    }
}

/// Memoized `(base id, dynamic values) -> short id`
pub struct IdCache {
    prefix: String,
    hasher: Box<dyn StyleHasher>,
    cache: HashMap<String, String>,
    stats: CacheStats,
}

impl std::fmt::Debug for IdCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdCache")
            .field("prefix", &self.prefix)
            .field("entries", &self.cache.len())
            .field("stats", &self.stats)
            .finish()
    }
}

impl Default for IdCache {
    fn default() -> Self {
        Self::new("jsx-")
    }
}

impl IdCache {
    pub fn new(prefix: &str) -> Self {
        Self::with_hasher(prefix, Box::new(StringHash))
    }

    pub fn with_hasher(prefix: &str, hasher: Box<dyn StyleHasher>) -> Self {
        Self {
            prefix: prefix.to_string(),
            hasher,
            cache: HashMap::new(),
            stats: CacheStats::default(),
        }
    }

    /// Short id for `base_id` under `dynamic`: `prefix + hash(base_id + "-" + values)`.
    ///
    /// The memo is keyed on the hash input itself, so two pairs share an
    /// entry only when they would hash identically anyway.
    pub fn compute(&mut self, base_id: &str, dynamic: &Value) -> String {
        let key = format!("{base_id}-{}", dynamic_key(dynamic));

        if let Some(id) = self.cache.get(&key) {
            self.stats.hits += 1;
            return id.clone();
        }

        self.stats.misses += 1;
        let id = format!("{}{}", self.prefix, self.hasher.hash(&key));
        self.cache.insert(key, id.clone());
        id
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

/// Canonical string form of dynamic values.
///
/// Strings render raw, sequences join their elements with `,` (a `null`
/// element renders empty) and mappings render as compact JSON with
/// sorted keys. Whole floats drop their fraction, so `1.0` renders as `1`.
pub fn dynamic_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => number_key(n),
        Value::Array(items) => items.iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => dynamic_key(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

fn number_key(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 => {
            if f == 0.0 {
                // -0 renders as 0
                "0".to_string()
            } else {
                format!("{f:.0}")
            }
        }
        _ => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::hash::string_hash;

    #[test]
    fn test_dynamic_key_forms() {
        assert_eq!(dynamic_key(&json!("red")), "red");
        assert_eq!(dynamic_key(&json!(12)), "12");
        assert_eq!(dynamic_key(&json!(1.5)), "1.5");
        assert_eq!(dynamic_key(&json!(true)), "true");
        assert_eq!(dynamic_key(&json!(null)), "null");
        assert_eq!(dynamic_key(&json!(["red", 2, null, [3, 4]])), "red,2,,3,4");
        assert_eq!(dynamic_key(&json!({"b": 2, "a": "x"})), r#"{"a":"x","b":2}"#);
    }

    #[test]
    fn test_compute_format() {
        let mut ids = IdCache::default();
        let id = ids.compute("jsx-123", &json!(["red"]));
        assert_eq!(id, format!("jsx-{}", string_hash("jsx-123-red")));
    }

    #[test]
    fn test_compute_is_memoized() {
        let mut ids = IdCache::default();
        let first = ids.compute("jsx-1", &json!({"color": "red"}));
        let second = ids.compute("jsx-1", &json!({"color": "red"}));

        assert_eq!(first, second);
        assert_eq!(ids.len(), 1);
        assert_eq!(ids.stats(), CacheStats { hits: 1, misses: 1 });
        assert!((ids.stats().hit_rate() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_distinct_inputs_distinct_ids() {
        let mut ids = IdCache::default();
        let red = ids.compute("jsx-1", &json!({"color": "red"}));
        let blue = ids.compute("jsx-1", &json!({"color": "blue"}));
        let other_base = ids.compute("jsx-2", &json!({"color": "red"}));

        assert_ne!(red, blue);
        assert_ne!(red, other_base);
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_base_and_values_do_not_share_memo_entry() {
        let mut ids = IdCache::default();
        // Both pairs concatenate to "jsx-123"
        let first = ids.compute("jsx-1", &json!("23"));
        let second = ids.compute("jsx-12", &json!("3"));

        assert_ne!(first, second);
        assert_eq!(second, format!("jsx-{}", string_hash("jsx-12-3")));
        assert_eq!(ids.len(), 2);
        assert_eq!(ids.stats(), CacheStats { hits: 0, misses: 2 });
    }

    #[test]
    fn test_whole_floats_render_as_integers() {
        assert_eq!(dynamic_key(&json!(1.0)), "1");
        assert_eq!(dynamic_key(&json!(-0.0)), "0");
        assert_eq!(dynamic_key(&json!(-3.0)), "-3");
        assert_eq!(dynamic_key(&json!(1e20)), "100000000000000000000");
        assert_eq!(dynamic_key(&json!(0.25)), "0.25");
        assert_eq!(dynamic_key(&json!([1.0, 2.5])), "1,2.5");

        let mut ids = IdCache::default();
        assert_eq!(ids.compute("jsx-1", &json!(1.0)), ids.compute("jsx-1", &json!(1)));
    }

    #[test]
    fn test_custom_hasher_and_prefix() {
        struct Len;
        impl StyleHasher for Len {
            fn hash(&self, input: &str) -> String {
                input.len().to_string()
            }
        }

        let mut ids = IdCache::with_hasher("st-", Box::new(Len));
        // "a-1" is three bytes
        assert_eq!(ids.compute("a", &json!(1)), "st-3");
    }
}
