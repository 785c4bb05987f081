//! Ancestor resolver.
//!
//! Walks ownership upward from a starting node to the nearest enclosing node
//! matching a token. A token matches when it is one of the node's classes or
//! equals its tag name. The walk starts at the node itself and stops at the
//! document root.

use markup5ever_rcdom::{Handle, NodeData};

use crate::dom;

/// Nearest enclosing node (including `start` itself) matching `token`.
pub fn closest_ancestor(start: &Handle, token: &str) -> Option<Handle> {
    let mut current = Some(start.clone());
    while let Some(node) = current {
        if matches!(node.data, NodeData::Document) {
            return None;
        }
        if matches(&node, token) {
            return Some(node);
        }
        current = node.parent.take().and_then(|weak| {
            let parent = weak.upgrade();
            node.parent.set(Some(weak));
            parent
        });
    }
    None
}

fn matches(node: &Handle, token: &str) -> bool {
    dom::has_class(node, token) || dom::tag_name(node).as_deref() == Some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{first_with_class, parse_html};

    #[test]
    fn test_class_match_walks_upward() {
        let dom = parse_html(
            r#"<div class="outer"><div class="inner"><span class="leaf"></span></div></div>"#,
        );
        let leaf = first_with_class(&dom.document, "leaf").unwrap();
        let inner = closest_ancestor(&leaf, "inner").unwrap();
        assert!(dom::has_class(&inner, "inner"));
        let outer = closest_ancestor(&leaf, "outer").unwrap();
        assert!(dom::has_class(&outer, "outer"));
    }

    #[test]
    fn test_start_node_itself_matches() {
        let dom = parse_html(r#"<div class="self"></div>"#);
        let node = first_with_class(&dom.document, "self").unwrap();
        let found = closest_ancestor(&node, "self").unwrap();
        assert!(dom::same_node(&found, &node));
    }

    #[test]
    fn test_tag_name_match() {
        let dom = parse_html(r#"<section><span class="leaf"></span></section>"#);
        let leaf = first_with_class(&dom.document, "leaf").unwrap();
        let section = closest_ancestor(&leaf, "section").unwrap();
        assert_eq!(dom::tag_name(&section).as_deref(), Some("section"));
    }

    #[test]
    fn test_no_match_is_none() {
        let dom = parse_html(r#"<div class="leaf"></div>"#);
        let leaf = first_with_class(&dom.document, "leaf").unwrap();
        assert!(closest_ancestor(&leaf, "missing").is_none());
    }
}
