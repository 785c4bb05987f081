//! Target resolution.
//!
//! For one directive index, determines the candidate set of nodes a mutation
//! applies to: either a document-global class lookup, or a lookup scoped to
//! the nearest ancestor matching the scope token.
//!
//! ## Key Invariants
//!
//! 1. **Carry-forward**: a list shorter than the index count re-yields its
//!    last defined element for every later index, never "absent"
//! 2. **Scope sentinel**: a scope of `"false"` (or no scope at all) means
//!    document-global resolution
//! 3. **Ancestor prepend**: when the scope ancestor itself matches the target
//!    token it joins the candidate set exactly once, ahead of its descendants
//! 4. **No-match is a no-op**: an unresolved scope or target yields an empty
//!    set for that index only; it is not an error

use markup5ever_rcdom::Handle;

use crate::ancestor::closest_ancestor;
use crate::dom;

/// Carry-forward reader over one parallel list. At index `i` it yields the
/// element at `i` when defined, otherwise the last defined element before it.
pub struct Cursor<'a, T> {
    items: &'a [T],
    last: Option<&'a T>,
}

impl<'a, T> Cursor<'a, T> {
    pub fn new(items: &'a [T]) -> Self {
        Self { items, last: None }
    }

    /// Read the effective element for `index`. Indices must be visited in
    /// ascending order for the carry-forward law to hold.
    pub fn at(&mut self, index: usize) -> Option<&'a T> {
        if let Some(item) = self.items.get(index) {
            self.last = Some(item);
        }
        self.last
    }
}

/// Resolve the candidate set for one index, in document order.
pub fn resolve_targets(
    document: &Handle,
    trigger: &Handle,
    target_token: &str,
    scope_token: Option<&str>,
) -> Vec<Handle> {
    match scope_token {
        None | Some("false") => dom::elements_with_class(document, target_token),
        Some(scope) => {
            let Some(scope_root) = closest_ancestor(trigger, scope) else {
                return Vec::new();
            };
            let mut candidates = dom::elements_with_class(&scope_root, target_token);
            if dom::has_class(&scope_root, target_token) {
                candidates.insert(0, scope_root);
            }
            candidates
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{first_with_class, get_attr, parse_html};

    #[test]
    fn test_cursor_carries_last_defined_value() {
        let items = vec!["a".to_string(), "b".to_string()];
        let mut cursor = Cursor::new(&items);
        assert_eq!(cursor.at(0).map(String::as_str), Some("a"));
        assert_eq!(cursor.at(1).map(String::as_str), Some("b"));
        assert_eq!(cursor.at(2).map(String::as_str), Some("b"));
        assert_eq!(cursor.at(3).map(String::as_str), Some("b"));
    }

    #[test]
    fn test_cursor_empty_list_yields_none() {
        let items: Vec<String> = Vec::new();
        let mut cursor = Cursor::new(&items);
        assert_eq!(cursor.at(0), None);
        assert_eq!(cursor.at(5), None);
    }

    #[test]
    fn test_global_resolution_in_document_order() {
        let dom = parse_html(
            r#"<div class="js-elem" id="1"></div>
               <div class="trigger"><span class="js-elem" id="2"></span></div>"#,
        );
        let trigger = first_with_class(&dom.document, "trigger").unwrap();
        let set = resolve_targets(&dom.document, &trigger, "js-elem", None);
        let ids: Vec<String> = set.iter().map(|n| get_attr(n, "id").unwrap()).collect();
        assert_eq!(ids, vec!["1", "2"]);

        let same = resolve_targets(&dom.document, &trigger, "js-elem", Some("false"));
        assert_eq!(same.len(), 2);
    }

    #[test]
    fn test_scoped_resolution_excludes_outsiders() {
        let dom = parse_html(
            r#"<div class="js-parent">
                 <div class="trigger"></div>
                 <div class="js-elem" id="in"></div>
               </div>
               <div class="js-elem" id="out"></div>"#,
        );
        let trigger = first_with_class(&dom.document, "trigger").unwrap();
        let set = resolve_targets(&dom.document, &trigger, "js-elem", Some("js-parent"));
        assert_eq!(set.len(), 1);
        assert_eq!(get_attr(&set[0], "id").as_deref(), Some("in"));
    }

    #[test]
    fn test_unresolved_scope_is_empty() {
        let dom = parse_html(r#"<div class="trigger"></div><div class="js-elem"></div>"#);
        let trigger = first_with_class(&dom.document, "trigger").unwrap();
        let set = resolve_targets(&dom.document, &trigger, "js-elem", Some("js-missing"));
        assert!(set.is_empty());
    }

    #[test]
    fn test_unresolved_target_is_empty() {
        let dom = parse_html(r#"<div class="trigger"></div>"#);
        let trigger = first_with_class(&dom.document, "trigger").unwrap();
        assert!(resolve_targets(&dom.document, &trigger, "js-nothing", None).is_empty());
    }

    #[test]
    fn test_ancestor_prepended_exactly_once() {
        let dom = parse_html(
            r#"<div class="js-parent" id="scope">
                 <div class="trigger"></div>
                 <div class="js-parent" id="nested"></div>
               </div>"#,
        );
        let trigger = first_with_class(&dom.document, "trigger").unwrap();
        let set = resolve_targets(&dom.document, &trigger, "js-parent", Some("js-parent"));
        let ids: Vec<String> = set.iter().map(|n| get_attr(n, "id").unwrap()).collect();
        assert_eq!(ids, vec!["scope", "nested"]);
    }
}
