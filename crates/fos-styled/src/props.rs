//! Style props handed over by the markup layer

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// CSS carried by a component instance
///
/// A single rule gets its own `<style>` tag; a rule sequence is appended
/// to the shared sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Css {
    /// One rule, possibly varying per instance
    Dynamic(String),
    /// Fixed rules shared by every instance with the same id
    Static(Vec<String>),
}

impl Css {
    /// Own-tag style
    #[inline]
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Css::Dynamic(_))
    }

    /// Shared-sheet style
    #[inline]
    pub fn uses_shared_sheet(&self) -> bool {
        matches!(self, Css::Static(_))
    }

    /// Rules as a slice-like iterator, single rule included
    pub fn rules(&self) -> impl Iterator<Item = &str> {
        let (single, many) = match self {
            Css::Dynamic(rule) => (Some(rule.as_str()), &[][..]),
            Css::Static(rules) => (None, rules.as_slice()),
        };
        single.into_iter().chain(many.iter().map(String::as_str))
    }
}

impl From<&str> for Css {
    fn from(rule: &str) -> Self {
        Css::Dynamic(rule.to_string())
    }
}

impl From<Vec<String>> for Css {
    fn from(rules: Vec<String>) -> Self {
        Css::Static(rules)
    }
}

impl<const N: usize> From<[&str; N]> for Css {
    fn from(rules: [&str; N]) -> Self {
        Css::Static(rules.iter().map(|r| r.to_string()).collect())
    }
}

/// Props a component instance passes on mount, update and unmount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleProps {
    /// Base style identifier
    pub style_id: String,
    /// Rule text
    pub css: Css,
    /// Per-instance values; when present the effective id is recomputed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic: Option<Value>,
}

impl StyleProps {
    pub fn new(style_id: impl Into<String>, css: impl Into<Css>) -> Self {
        Self {
            style_id: style_id.into(),
            css: css.into(),
            dynamic: None,
        }
    }

    /// Attach per-instance dynamic values
    pub fn with_dynamic(mut self, dynamic: Value) -> Self {
        self.dynamic = Some(dynamic);
        self
    }
}

/// Identifier and rules derived from [`StyleProps`] on every call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveStyle {
    pub style_id: String,
    pub rules: Vec<String>,
}
