//! Cookie directive.
//!
//! `data-set-cookie` elements emit a set-cookie intent on click; cookie
//! storage belongs to the host.

use markup5ever_rcdom::Handle;

use crate::dom;

pub const VALUE_ATTR: &str = "data-set-cookie";
pub const REGISTERED_ATTR: &str = "data-set-cookie-registered";

pub fn cookie_name(node: &Handle) -> Option<String> {
    dom::get_attr(node, VALUE_ATTR).filter(|name| !name.trim().is_empty())
}
