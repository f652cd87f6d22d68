//! Document - High-level document API

use crate::{DomError, DomResult, DomTree, ElementData, NodeId, StyleSheet};

/// HTML Document
#[derive(Debug)]
pub struct Document {
    /// The DOM tree; mutated only through `Document` so style sheets
    /// track their text
    tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a new document with `<html>`, `<head>` and `<body>`
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();
        let root = tree.root();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        // Freshly created nodes under a fresh root cannot fail to link.
        let _ = tree.append_child(root, html);
        let _ = tree.append_child(html, head);
        let _ = tree.append_child(html, body);

        Self {
            tree,
            url: url.to_string(),
            html_element: html,
            head_element: head,
            body_element: body,
        }
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
        }
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Create a detached element
    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.tree.create_element(name)
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.tree.create_text(content)
    }

    /// Append `child` under `parent`, keeping style sheets in sync
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.tree.append_child(parent, child)?;
        self.sync_sheet(parent);
        Ok(child)
    }

    /// Append `child` to `<head>`, falling back to the document root when
    /// the document has no head.
    pub fn append_to_head(&mut self, child: NodeId) -> DomResult<NodeId> {
        let target = if self.head_element.is_valid() {
            self.head_element
        } else {
            self.tree.root()
        };
        self.append_child(target, child)
    }

    /// Unlink a node from its parent
    pub fn remove(&mut self, id: NodeId) -> DomResult<()> {
        let parent = self.tree.parent(id);
        if self.tree.get(id).is_none() {
            return Err(DomError::NotFound);
        }
        self.tree.detach(id);
        if let Some(parent) = parent {
            self.sync_sheet(parent);
        }
        Ok(())
    }

    /// Whether the node is reachable from the document root
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.tree.get(id).is_some() && self.tree.is_inclusive_ancestor(self.tree.root(), id)
    }

    fn element(&self, id: NodeId) -> DomResult<&ElementData> {
        self.tree.get(id)
            .ok_or(DomError::NotFound)?
            .as_element()
            .ok_or(DomError::InvalidNodeType)
    }

    fn element_mut(&mut self, id: NodeId) -> DomResult<&mut ElementData> {
        self.tree.get_mut(id)
            .ok_or(DomError::NotFound)?
            .as_element_mut()
            .ok_or(DomError::InvalidNodeType)
    }

    /// Get an attribute of an element
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).ok()?.get_attr(name)
    }

    /// Set an attribute on an element
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        self.element_mut(id)?.set_attr(name, value);
        Ok(())
    }

    /// Text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        self.tree.text_content(id)
    }

    /// Replace all children with a single text node
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> DomResult<()> {
        self.element(id)?;
        self.tree.clear_children(id);
        if !text.is_empty() {
            let node = self.tree.create_text(text);
            self.tree.append_child(id, node)?;
        }
        self.sync_sheet(id);
        Ok(())
    }

    /// Connected elements carrying `attr`, in document order
    pub fn query_by_attribute(&self, attr: &str) -> Vec<NodeId> {
        self.tree.descendants(self.tree.root())
            .filter(|(_, node)| node.as_element().is_some_and(|e| e.has_attr(attr)))
            .map(|(id, _)| id)
            .collect()
    }

    /// Connected `<style>` elements, in document order
    pub fn style_elements(&self) -> Vec<NodeId> {
        self.tree.descendants(self.tree.root())
            .filter(|(_, node)| node.as_element().is_some_and(ElementData::is_style))
            .map(|(id, _)| id)
            .collect()
    }

    /// Rule list of a `<style>` element
    pub fn sheet(&self, id: NodeId) -> DomResult<&StyleSheet> {
        self.element(id)?.sheet.as_ref().ok_or(DomError::InvalidNodeType)
    }

    /// Mutable rule list of a `<style>` element
    pub fn sheet_mut(&mut self, id: NodeId) -> DomResult<&mut StyleSheet> {
        self.element_mut(id)?.sheet.as_mut().ok_or(DomError::InvalidNodeType)
    }

    /// Rebuild a style element's sheet after its text children changed
    fn sync_sheet(&mut self, id: NodeId) {
        let is_style = self.element(id).is_ok_and(ElementData::is_style);
        if !is_style {
            return;
        }
        let text = self.tree.text_content(id);
        if let Ok(sheet) = self.sheet_mut(id) {
            sheet.replace_text(&text);
            tracing::trace!(?id, rules = sheet.len(), "style sheet rebuilt from text");
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
