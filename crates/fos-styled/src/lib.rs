//! fOS Styled - Scoped style registry
//!
//! Injects, deduplicates, updates and removes the CSS of component
//! instances, reconciling with style tags already present in
//! server-rendered markup.
//!
//! Single-rule ("dynamic") styles get a `<style>` element each. Multi-rule
//! ("static") styles share one lazily created sheet in which every style id
//! owns a stable range of rule indices.
//!
//! ```
//! use fos_dom::Document;
//! use fos_styled::{StyleProps, StyleRegistry};
//!
//! let mut registry = StyleRegistry::new(Document::default());
//! let props = StyleProps::new("jsx-1", ["p{color:red}"]);
//!
//! registry.insert(&props).unwrap();
//! registry.insert(&props).unwrap();
//! assert_eq!(registry.instance_count("jsx-1"), Some(2));
//!
//! registry.remove(&props).unwrap();
//! registry.remove(&props).unwrap();
//! assert!(registry.is_empty());
//! ```

mod config;
mod error;
mod hash;
mod host;
mod id_cache;
mod props;
mod registry;
mod selector_cache;
mod server_tags;
mod shared_sheet;

pub use config::RegistryConfig;
pub use error::{StyleError, StyleResult};
pub use hash::{string_hash, StringHash, StyleHasher};
pub use host::StyleHost;
pub use id_cache::{dynamic_key, CacheStats, IdCache};
pub use props::{Css, EffectiveStyle, StyleProps};
pub use registry::{StyleRegistry, TagEntry};
pub use selector_cache::SelectorCache;
pub use server_tags::ServerTagIndex;
pub use shared_sheet::SharedSheet;
