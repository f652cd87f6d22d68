//! Style engine seam
//!
//! The registry only ever touches the document through [`StyleHost`].
//! [`fos_dom::Document`] is the in-tree implementation.

use std::fmt::Debug;

use fos_dom::{Document, DomResult, NodeId};

/// Operations the registry needs from a live document
pub trait StyleHost {
    /// Handle to a `<style>` element
    type Tag: Clone + PartialEq + Debug;

    /// Elements carrying `attribute`, paired with its value, in document order
    fn tagged_styles(&self, attribute: &str) -> Vec<(String, Self::Tag)>;

    /// Create a `<style>` holding `css`, mark it with `marker` and append it
    /// to `<head>`
    fn create_style(&mut self, css: &str, marker: &str) -> DomResult<Self::Tag>;

    /// Replace the text (and therefore the rules) of a style element
    fn set_style_text(&mut self, tag: &Self::Tag, css: &str) -> DomResult<()>;

    /// Remove a style element from the document
    fn detach_style(&mut self, tag: &Self::Tag) -> DomResult<()>;

    /// Length of the element's rule list
    fn rule_count(&self, tag: &Self::Tag) -> DomResult<usize>;

    /// Insert `rule` at `index` of the element's rule list
    fn insert_rule(&mut self, tag: &Self::Tag, rule: &str, index: usize) -> DomResult<usize>;

    /// Delete the rule at `index` of the element's rule list
    fn delete_rule(&mut self, tag: &Self::Tag, index: usize) -> DomResult<()>;
}

impl StyleHost for Document {
    type Tag = NodeId;

    fn tagged_styles(&self, attribute: &str) -> Vec<(String, NodeId)> {
        self.query_by_attribute(attribute)
            .into_iter()
            .filter_map(|id| {
                let value = self.get_attribute(id, attribute)?;
                Some((value.to_string(), id))
            })
            .collect()
    }

    fn create_style(&mut self, css: &str, marker: &str) -> DomResult<NodeId> {
        let tag = self.create_element("style");
        self.set_attribute(tag, marker, "")?;
        self.set_text_content(tag, css)?;
        self.append_to_head(tag)
    }

    fn set_style_text(&mut self, tag: &NodeId, css: &str) -> DomResult<()> {
        self.set_text_content(*tag, css)
    }

    fn detach_style(&mut self, tag: &NodeId) -> DomResult<()> {
        self.remove(*tag)
    }

    fn rule_count(&self, tag: &NodeId) -> DomResult<usize> {
        Ok(self.sheet(*tag)?.len())
    }

    fn insert_rule(&mut self, tag: &NodeId, rule: &str, index: usize) -> DomResult<usize> {
        self.sheet_mut(*tag)?.insert_rule(rule, index)
    }

    fn delete_rule(&mut self, tag: &NodeId, index: usize) -> DomResult<()> {
        self.sheet_mut(*tag)?.delete_rule(index)
    }
}
