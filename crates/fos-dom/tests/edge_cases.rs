//! Edge case tests for fos-dom
//!
//! Style element handling: sheet bookkeeping across tree mutations and
//! rule-list index boundaries.

use fos_dom::{Document, DomError, NodeData};

// ============================================================================
// STYLE SHEET EDGE CASES
// ============================================================================

#[test]
fn test_insert_rule_at_tail_repeatedly() {
    let mut doc = Document::default();
    let style = doc.create_element("style");
    doc.append_to_head(style).unwrap();

    for i in 0..100 {
        let sheet = doc.sheet_mut(style).unwrap();
        let len = sheet.len();
        sheet.insert_rule(&format!(".r{i}{{}}"), len).unwrap();
    }

    let sheet = doc.sheet(style).unwrap();
    assert_eq!(sheet.len(), 100);
    assert_eq!(sheet.rule(0), Some(".r0{}"));
    assert_eq!(sheet.rule(99), Some(".r99{}"));
}

#[test]
fn test_delete_then_insert_keeps_indices() {
    let mut doc = Document::default();
    let style = doc.create_element("style");
    doc.append_to_head(style).unwrap();

    let sheet = doc.sheet_mut(style).unwrap();
    for rule in ["a{}", "b{}", "c{}"] {
        let len = sheet.len();
        sheet.insert_rule(rule, len).unwrap();
    }

    sheet.delete_rule(1).unwrap();
    sheet.insert_rule("gone {}", 1).unwrap();

    assert_eq!(sheet.rules().collect::<Vec<_>>(), vec!["a{}", "gone {}", "c{}"]);
}

#[test]
fn test_rule_index_out_of_range() {
    let mut doc = Document::default();
    let style = doc.create_element("style");

    let sheet = doc.sheet_mut(style).unwrap();
    assert_eq!(
        sheet.insert_rule("a{}", 3),
        Err(DomError::IndexSize { index: 3, len: 0 })
    );
    assert!(sheet.delete_rule(0).is_err());
    assert_eq!(sheet.rule(0), None);
}

#[test]
fn test_detached_style_keeps_its_sheet() {
    let mut doc = Document::default();
    let style = doc.create_element("style");
    doc.append_to_head(style).unwrap();
    doc.set_text_content(style, "p{margin:0}").unwrap();

    doc.remove(style).unwrap();

    assert!(!doc.is_connected(style));
    assert!(doc.style_elements().is_empty());
    assert_eq!(doc.sheet(style).unwrap().rule(0), Some("p{margin:0}"));
}

#[test]
fn test_appending_text_node_updates_sheet() {
    let mut doc = Document::default();
    let style = doc.create_element("style");
    doc.append_to_head(style).unwrap();

    let text = doc.create_text("div{color:red}");
    doc.append_child(style, text).unwrap();

    assert_eq!(doc.sheet(style).unwrap().len(), 1);
    assert!(matches!(
        doc.tree().get(text).map(|n| &n.data),
        Some(NodeData::Text(t)) if t == "div{color:red}"
    ));

    doc.remove(text).unwrap();
    assert!(doc.sheet(style).unwrap().is_empty());
}

// ============================================================================
// ATTRIBUTE QUERIES
// ============================================================================

#[test]
fn test_query_by_attribute_document_order() {
    let mut doc = Document::default();
    let body = doc.body();

    let first = doc.create_element("style");
    let second = doc.create_element("style");
    let plain = doc.create_element("style");
    doc.set_attribute(first, "data-jsx-ssr", "jsx-1").unwrap();
    doc.set_attribute(second, "data-jsx-ssr", "").unwrap();

    doc.append_child(body, second).unwrap();
    doc.append_to_head(first).unwrap();
    doc.append_to_head(plain).unwrap();

    // <head> precedes <body>
    assert_eq!(doc.query_by_attribute("data-jsx-ssr"), vec![first, second]);
    assert_eq!(doc.get_attribute(second, "data-jsx-ssr"), Some(""));
    assert_eq!(doc.get_attribute(plain, "data-jsx-ssr"), None);
}

#[test]
fn test_remove_missing_node() {
    let mut doc = Document::default();
    let style = doc.create_element("style");

    // Detached nodes can be removed again without error
    assert_eq!(doc.remove(style), Ok(()));
    assert_eq!(doc.remove(style), Ok(()));
}
