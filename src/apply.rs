//! Mutation application.
//!
//! Applies one value token to one target node under an add/remove/toggle
//! behavior. The representation is probed per target: a node already carrying
//! an attribute literally named the value token is mutated through that
//! attribute's `"true"`/`"false"` value; any other node is mutated through
//! class membership.

use markup5ever_rcdom::Handle;

use crate::dom;
use crate::parse::Behavior;

/// Where a value token lives on a given target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    ClassMembership,
    BooleanAttribute,
}

/// Probe which representation the value token uses on this node. The probe is
/// case-sensitive and requires a non-empty attribute value.
pub fn representation_of(node: &Handle, value_token: &str) -> Representation {
    match dom::get_attr(node, value_token) {
        Some(current) if !current.is_empty() => Representation::BooleanAttribute,
        _ => Representation::ClassMembership,
    }
}

/// Apply `behavior` for `value_token` on one target node. Idempotent for
/// `Add` and `Remove`; an involution for `Toggle`.
pub fn apply(node: &Handle, value_token: &str, behavior: Behavior) {
    match representation_of(node, value_token) {
        Representation::BooleanAttribute => {
            let next = match behavior {
                Behavior::Add => true,
                Behavior::Remove => false,
                // Any current value other than "true" reads as false.
                Behavior::Toggle => {
                    dom::get_attr(node, value_token).as_deref() != Some("true")
                }
            };
            dom::set_attr(node, value_token, if next { "true" } else { "false" });
        }
        Representation::ClassMembership => match behavior {
            Behavior::Add => dom::add_class(node, value_token),
            Behavior::Remove => dom::remove_class(node, value_token),
            Behavior::Toggle => dom::toggle_class(node, value_token),
        },
    }
}
