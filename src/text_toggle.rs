//! Text toggle directive.
//!
//! `data-toggle-text` elements swap their text content between the authored
//! original (cached at registration) and the attribute value.

use markup5ever_rcdom::Handle;

use crate::dom;

pub const VALUE_ATTR: &str = "data-toggle-text";
pub const SWIPE_ATTR: &str = "data-toggle-text-swipe";
pub const ORIGINAL_ATTR: &str = "data-toggle-text-original";
pub const REGISTERED_ATTR: &str = "data-toggle-text-registered";

/// Cache the element's current text so later toggles can restore it. Called
/// once at registration.
pub fn cache_original(node: &Handle) {
    let original = dom::text_content(node);
    dom::set_attr(node, ORIGINAL_ATTR, original.trim());
}

/// Swap between the cached original and the toggle value.
pub fn toggle(node: &Handle) {
    let Some(toggle_text) = dom::get_attr(node, VALUE_ATTR) else {
        return;
    };
    let original = dom::get_attr(node, ORIGINAL_ATTR).unwrap_or_default();
    if dom::text_content(node).trim() == toggle_text {
        dom::set_text(node, &original);
    } else {
        dom::set_text(node, &toggle_text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{elements_with_attr, parse_html, text_content};

    #[test]
    fn test_round_trip() {
        let dom = parse_html(r#"<div data-toggle-text="Goodbye">Hello</div>"#);
        let node = elements_with_attr(&dom.document, VALUE_ATTR)
            .into_iter()
            .next()
            .unwrap();
        cache_original(&node);

        toggle(&node);
        assert_eq!(text_content(&node), "Goodbye");
        toggle(&node);
        assert_eq!(text_content(&node), "Hello");
        toggle(&node);
        assert_eq!(text_content(&node), "Goodbye");
    }
}
