//! HTML parsing and text extraction using html5ever

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::ParseOpts;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Elements whose text is never visible
const HIDDEN: [&str; 3] = ["script", "style", "template"];

/// Parse HTML content into a DOM tree
pub fn parse_html(html: &str) -> RcDom {
    parse_document(RcDom::default(), ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes())
}

/// Local name of an element node, `None` for anything else
pub fn element_name(handle: &Handle) -> Option<&str> {
    match handle.data {
        NodeData::Element { ref name, .. } => Some(&*name.local),
        _ => None,
    }
}

/// Find the first element with the given local name, depth first
pub fn find_element(handle: &Handle, name: &str) -> Option<Handle> {
    if element_name(handle) == Some(name) {
        return Some(handle.clone());
    }
    handle
        .children
        .borrow()
        .iter()
        .find_map(|child| find_element(child, name))
}

/// All elements whose local name is in `names`, in document order.
///
/// Matches nested inside other matches are returned as well.
pub fn find_elements(handle: &Handle, names: &[&str]) -> Vec<Handle> {
    let mut results = Vec::new();
    find_elements_recursive(handle, names, &mut results);
    results
}

fn find_elements_recursive(handle: &Handle, names: &[&str], results: &mut Vec<Handle>) {
    if let Some(name) = element_name(handle) {
        if HIDDEN.contains(&name) {
            return;
        }
        if names.contains(&name) {
            results.push(handle.clone());
        }
    }
    for child in handle.children.borrow().iter() {
        find_elements_recursive(child, names, results);
    }
}

/// Visible text nodes under `handle`, joined with `separator`
pub fn text_content(handle: &Handle, separator: &str) -> String {
    let mut parts = Vec::new();
    collect_text(handle, &mut parts);
    parts.join(separator)
}

fn collect_text(handle: &Handle, parts: &mut Vec<String>) {
    match handle.data {
        NodeData::Text { ref contents } => {
            parts.push(contents.borrow().to_string());
        }
        NodeData::Element { ref name, .. } if HIDDEN.contains(&&*name.local) => {}
        _ => {
            for child in handle.children.borrow().iter() {
                collect_text(child, parts);
            }
        }
    }
}

/// Visible text of the whole document, one text node per line
pub fn document_text(dom: &RcDom) -> String {
    text_content(&dom.document, "\n")
}

/// Visible text of the document's `<body>`, one text node per line
pub fn body_text(dom: &RcDom) -> String {
    match find_element(&dom.document, "body") {
        Some(body) => text_content(&body, "\n"),
        None => document_text(dom),
    }
}
