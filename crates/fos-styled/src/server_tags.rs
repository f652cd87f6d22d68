//! Server tag index
//!
//! Style tags emitted by the server render carry the style id in a marker
//! attribute. The index is built once, on first use, and shrinks as the
//! adopted tags are torn down.

use std::collections::HashMap;

use crate::host::StyleHost;

/// Style id -> server-rendered style tag
#[derive(Debug)]
pub struct ServerTagIndex<T> {
    tags: Option<HashMap<String, T>>,
}

impl<T> Default for ServerTagIndex<T> {
    fn default() -> Self {
        Self { tags: None }
    }
}

impl<T: Clone> ServerTagIndex<T> {
    /// Scan the document once; later calls are no-ops.
    ///
    /// When two tags claim the same id the later one in document order wins.
    pub fn ensure<H>(&mut self, host: &H, attribute: &str)
    where
        H: StyleHost<Tag = T>,
    {
        if self.tags.is_some() {
            return;
        }
        let tags: HashMap<String, T> = host.tagged_styles(attribute).into_iter().collect();
        tracing::debug!(count = tags.len(), attribute, "indexed server-rendered style tags");
        self.tags = Some(tags);
    }

    /// Whether the document has been scanned
    pub fn is_built(&self) -> bool {
        self.tags.is_some()
    }

    /// Server tag for `style_id`, if it has not been reclaimed yet
    pub fn get(&self, style_id: &str) -> Option<&T> {
        self.tags.as_ref()?.get(style_id)
    }

    /// Drop `style_id` once its CSS has been torn down
    pub fn forget(&mut self, style_id: &str) -> Option<T> {
        self.tags.as_mut()?.remove(style_id)
    }

    /// Number of server tags still indexed
    pub fn len(&self) -> usize {
        self.tags.as_ref().map_or(0, HashMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
