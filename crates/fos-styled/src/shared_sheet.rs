//! Shared sheet manager
//!
//! One lazily created `<style>` element holds the rules of every static
//! style. Each style id owns a contiguous range of the rule list. Rules
//! are only ever appended at the tail, and a freed range is overwritten
//! with placeholder rules instead of being deleted, so the indices of all
//! other ranges stay valid for the lifetime of the sheet.

use std::fmt::Debug;
use std::ops::Range;

use crate::error::{StyleError, StyleResult};
use crate::host::StyleHost;

/// Handle to the shared `<style>` element, created on first use
#[derive(Debug)]
pub struct SharedSheet<T> {
    tag: Option<T>,
}

impl<T> Default for SharedSheet<T> {
    fn default() -> Self {
        Self { tag: None }
    }
}

impl<T: Clone + Debug> SharedSheet<T> {
    /// The shared tag, if it exists yet
    pub fn tag(&self) -> Option<&T> {
        self.tag.as_ref()
    }

    /// Create the shared tag when absent
    pub fn ensure<H>(&mut self, host: &mut H, marker: &str) -> StyleResult<T>
    where
        H: StyleHost<Tag = T>,
    {
        if let Some(tag) = &self.tag {
            return Ok(tag.clone());
        }
        let tag = host.create_style("", marker)?;
        tracing::debug!(?tag, "created shared style sheet");
        self.tag = Some(tag.clone());
        Ok(tag)
    }

    /// Append `rules` at the tail, returning the range they occupy
    pub fn append<H, S>(&mut self, host: &mut H, marker: &str, rules: &[S]) -> StyleResult<Range<usize>>
    where
        H: StyleHost<Tag = T>,
        S: AsRef<str>,
    {
        let tag = self.ensure(host, marker)?;
        let start = host.rule_count(&tag)?;
        for (offset, rule) in rules.iter().enumerate() {
            host.insert_rule(&tag, rule.as_ref(), start + offset)?;
        }
        Ok(start..start + rules.len())
    }

    /// Swap every rule in `range` for `placeholder`, keeping indices stable
    pub fn release<H>(&mut self, host: &mut H, range: Range<usize>, placeholder: &str) -> StyleResult<()>
    where
        H: StyleHost<Tag = T>,
    {
        let tag = self.tag.clone().ok_or(StyleError::NoSharedSheet)?;
        for index in range.clone() {
            host.delete_rule(&tag, index)?;
            host.insert_rule(&tag, placeholder, index)?;
        }
        tracing::debug!(?range, "released shared sheet range");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fos_dom::Document;

    fn rules(doc: &Document, sheet: &SharedSheet<fos_dom::NodeId>) -> Vec<String> {
        let tag = sheet.tag().copied().unwrap();
        doc.sheet(tag).unwrap().rules().map(str::to_string).collect()
    }

    #[test]
    fn test_created_lazily_once() {
        let mut doc = Document::default();
        let mut sheet: SharedSheet<fos_dom::NodeId> = SharedSheet::default();
        assert!(sheet.tag().is_none());

        let first = sheet.ensure(&mut doc, "data-jsx-client").unwrap();
        let second = sheet.ensure(&mut doc, "data-jsx-client").unwrap();
        assert_eq!(first, second);
        assert_eq!(doc.style_elements(), vec![first]);
    }

    #[test]
    fn test_append_ranges_are_contiguous() {
        let mut doc = Document::default();
        let mut sheet: SharedSheet<fos_dom::NodeId> = SharedSheet::default();

        let a = sheet.append(&mut doc, "m", &["a1{}", "a2{}"]).unwrap();
        let b = sheet.append(&mut doc, "m", &["b1{}"]).unwrap();
        let empty = sheet.append::<_, &str>(&mut doc, "m", &[]).unwrap();

        assert_eq!(a, 0..2);
        assert_eq!(b, 2..3);
        assert!(empty.is_empty());
        assert_eq!(rules(&doc, &sheet), vec!["a1{}", "a2{}", "b1{}"]);
    }

    #[test]
    fn test_release_swaps_placeholders() {
        let mut doc = Document::default();
        let mut sheet: SharedSheet<fos_dom::NodeId> = SharedSheet::default();

        sheet.append(&mut doc, "m", &["a{}"]).unwrap();
        let b = sheet.append(&mut doc, "m", &["b1{}", "b2{}"]).unwrap();
        sheet.append(&mut doc, "m", &["c{}"]).unwrap();

        sheet.release(&mut doc, b, "deleted {}").unwrap();
        assert_eq!(rules(&doc, &sheet), vec!["a{}", "deleted {}", "deleted {}", "c{}"]);
    }

    #[test]
    fn test_release_without_sheet() {
        let mut doc = Document::default();
        let mut sheet: SharedSheet<fos_dom::NodeId> = SharedSheet::default();
        assert_eq!(sheet.release(&mut doc, 0..1, "x {}"), Err(StyleError::NoSharedSheet));
    }
}
