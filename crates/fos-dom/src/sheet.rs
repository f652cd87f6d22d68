//! Style sheet rule list
//!
//! Rules are opaque strings. Indices follow `CSSStyleSheet.insertRule` /
//! `deleteRule`: insertion is allowed at `0..=len`, deletion at `0..len`.

use crate::{DomError, DomResult};

/// Rule list owned by a `<style>` element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSheet {
    rules: Vec<String>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the sheet for a style element's text content.
    ///
    /// The text is kept as a single rule; blank text yields an empty sheet.
    pub fn from_text(text: &str) -> Self {
        let mut sheet = Self::new();
        sheet.replace_text(text);
        sheet
    }

    /// Replace every rule with the given text
    pub fn replace_text(&mut self, text: &str) {
        self.rules.clear();
        if !text.trim().is_empty() {
            self.rules.push(text.to_string());
        }
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule text at `index`
    pub fn rule(&self, index: usize) -> Option<&str> {
        self.rules.get(index).map(String::as_str)
    }

    /// All rules in order
    pub fn rules(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(String::as_str)
    }

    /// Insert a rule before `index`, returning the index it landed at
    pub fn insert_rule(&mut self, rule: &str, index: usize) -> DomResult<usize> {
        if index > self.rules.len() {
            return Err(DomError::IndexSize { index, len: self.rules.len() });
        }
        self.rules.insert(index, rule.to_string());
        Ok(index)
    }

    /// Delete the rule at `index`
    pub fn delete_rule(&mut self, index: usize) -> DomResult<()> {
        if index >= self.rules.len() {
            return Err(DomError::IndexSize { index, len: self.rules.len() });
        }
        self.rules.remove(index);
        Ok(())
    }
}
