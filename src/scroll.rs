//! Scroll directive.
//!
//! `data-scroll` elements produce a scroll intent on click: a signed integer
//! token scrolls the viewport by that many pixels, anything else names a
//! class whose first document instance the viewport should scroll to. The
//! crate only classifies; the host performs the actual scrolling.

use lazy_static::lazy_static;
use markup5ever_rcdom::Handle;
use regex::Regex;

use crate::dom;

pub const VALUE_ATTR: &str = "data-scroll";
pub const REGISTERED_ATTR: &str = "data-scroll-registered";

lazy_static! {
    static ref OFFSET_RE: Regex = Regex::new(r"^-?[0-9]+$").unwrap();
}

/// A resolved scroll request for the host.
pub enum ScrollIntent {
    ToElement(Handle),
    ByOffset(i64),
}

/// Classify a scroll token against the document. A zero offset reads as an
/// element token, matching the directive's original truthiness rule.
pub fn classify(document: &Handle, token: &str) -> Option<ScrollIntent> {
    if OFFSET_RE.is_match(token) {
        if let Ok(offset) = token.parse::<i64>() {
            if offset != 0 {
                return Some(ScrollIntent::ByOffset(offset));
            }
        }
    }
    dom::first_with_class(document, token).map(ScrollIntent::ToElement)
}
