//! Host-tree substrate.
//!
//! Thin helpers over `markup5ever_rcdom` trees. The engine never owns or
//! rebuilds the document; it only reads and rewrites nodes in place.
//!
//! ## Key Invariants
//!
//! 1. **Identity**: node identity is pointer identity (`Rc::ptr_eq`)
//! 2. **Order**: every traversal here yields document order (pre-order)
//! 3. **Inertness**: attribute/class helpers are no-ops on non-element nodes

use std::cell::RefCell;
use std::rc::Rc;

use html5ever::tendril::TendrilSink;
use html5ever::{namespace_url, ns, parse_document, Attribute, LocalName, QualName};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom};
use tendril::StrTendril;

/// Parse an HTML string into a live document tree.
pub fn parse_html(html: &str) -> RcDom {
    parse_document(RcDom::default(), Default::default()).one(html)
}

/// Pointer identity between two handles.
pub fn same_node(a: &Handle, b: &Handle) -> bool {
    Rc::ptr_eq(a, b)
}

pub fn is_element(node: &Handle) -> bool {
    matches!(node.data, NodeData::Element { .. })
}

/// Lowercased tag name, or `None` for non-element nodes.
pub fn tag_name(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.to_string()),
        _ => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ATTRIBUTES
// ═══════════════════════════════════════════════════════════════════════════════

pub fn get_attr(node: &Handle, name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| attr.name.local.as_ref() == name)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

pub fn has_attr(node: &Handle, name: &str) -> bool {
    get_attr(node, name).is_some()
}

/// Set an attribute, updating it in place when it already exists.
pub fn set_attr(node: &Handle, name: &str, value: &str) {
    if let NodeData::Element { attrs, .. } = &node.data {
        let mut attrs = attrs.borrow_mut();
        if let Some(attr) = attrs.iter_mut().find(|attr| attr.name.local.as_ref() == name) {
            attr.value = StrTendril::from(value);
            return;
        }
        attrs.push(Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: StrTendril::from(value),
        });
    }
}

/// Drop an attribute entirely. No-op when absent.
pub fn remove_attr(node: &Handle, name: &str) {
    if let NodeData::Element { attrs, .. } = &node.data {
        attrs
            .borrow_mut()
            .retain(|attr| attr.name.local.as_ref() != name);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// CLASS LIST
// ═══════════════════════════════════════════════════════════════════════════════

/// The node's class tokens in authored order.
pub fn class_list(node: &Handle) -> Vec<String> {
    get_attr(node, "class")
        .map(|raw| raw.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

pub fn has_class(node: &Handle, token: &str) -> bool {
    class_list(node).iter().any(|t| t == token)
}

/// Insert a class token if absent. Idempotent.
pub fn add_class(node: &Handle, token: &str) {
    let mut classes = class_list(node);
    if classes.iter().any(|t| t == token) {
        return;
    }
    classes.push(token.to_string());
    set_attr(node, "class", &classes.join(" "));
}

/// Remove a class token if present. Idempotent.
pub fn remove_class(node: &Handle, token: &str) {
    let classes = class_list(node);
    if !classes.iter().any(|t| t == token) {
        return;
    }
    let kept: Vec<String> = classes.into_iter().filter(|t| t != token).collect();
    set_attr(node, "class", &kept.join(" "));
}

pub fn toggle_class(node: &Handle, token: &str) {
    if has_class(node, token) {
        remove_class(node, token);
    } else {
        add_class(node, token);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TRAVERSAL
// ═══════════════════════════════════════════════════════════════════════════════

/// All nodes strictly beneath `root`, in document order.
pub fn descendants(root: &Handle) -> Vec<Handle> {
    let mut out = Vec::new();
    walk(root, &mut out);
    out
}

fn walk(node: &Handle, out: &mut Vec<Handle>) {
    for child in node.children.borrow().iter() {
        out.push(child.clone());
        walk(child, out);
    }
}

/// Elements beneath `root` bearing the given attribute, document order.
pub fn elements_with_attr(root: &Handle, name: &str) -> Vec<Handle> {
    descendants(root)
        .into_iter()
        .filter(|node| is_element(node) && has_attr(node, name))
        .collect()
}

/// Elements beneath `root` whose class list contains `token`, document order.
pub fn elements_with_class(root: &Handle, token: &str) -> Vec<Handle> {
    descendants(root)
        .into_iter()
        .filter(|node| is_element(node) && has_class(node, token))
        .collect()
}

pub fn first_with_class(root: &Handle, token: &str) -> Option<Handle> {
    elements_with_class(root, token).into_iter().next()
}

// ═══════════════════════════════════════════════════════════════════════════════
// TEXT & NODE CONSTRUCTION
// ═══════════════════════════════════════════════════════════════════════════════

/// Concatenated text of all descendant text nodes.
pub fn text_content(node: &Handle) -> String {
    let mut out = String::new();
    collect_text(node, &mut out);
    out
}

fn collect_text(node: &Handle, out: &mut String) {
    if let NodeData::Text { contents } = &node.data {
        out.push_str(&contents.borrow());
    }
    for child in node.children.borrow().iter() {
        collect_text(child, out);
    }
}

/// Replace the node's children with a single text node.
pub fn set_text(node: &Handle, text: &str) {
    let mut children = node.children.borrow_mut();
    for child in children.iter() {
        child.parent.set(None);
    }
    children.clear();
    let text_node = Node::new(NodeData::Text {
        contents: RefCell::new(StrTendril::from(text)),
    });
    text_node.parent.set(Some(Rc::downgrade(node)));
    children.push(text_node);
}

/// Build a detached element node, for host-driven tree insertion.
pub fn new_element(tag: &str, attrs: &[(&str, &str)]) -> Handle {
    let attrs = attrs
        .iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(*name)),
            value: StrTendril::from(*value),
        })
        .collect();
    Node::new(NodeData::Element {
        name: QualName::new(None, ns!(html), LocalName::from(tag)),
        attrs: RefCell::new(attrs),
        template_contents: RefCell::new(None),
        mathml_annotation_xml_integration_point: false,
    })
}

pub fn append_child(parent: &Handle, child: &Handle) {
    child.parent.set(Some(Rc::downgrade(parent)));
    parent.children.borrow_mut().push(child.clone());
}
