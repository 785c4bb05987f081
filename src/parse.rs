//! Directive spec parsing.
//!
//! Converts an annotated element's raw attribute strings into the parallel
//! ordered lists a trigger run walks, plus the resolved swipe binding.
//!
//! ## Key Invariants
//!
//! 1. **Separator**: every list attribute splits on `", "` exactly
//! 2. **Absence is empty**: a missing modifier attribute parses to an empty
//!    list, never an error; only the primary value attribute is required
//! 3. **Self fallback**: a missing target list collapses the instance to one
//!    index aimed at the trigger element itself
//! 4. **Freshness**: specs are parsed per trigger, never cached, so attribute
//!    edits made by the host take effect on the next interaction

use std::fmt;

use markup5ever_rcdom::Handle;
use serde::{Deserialize, Serialize};

use crate::dom;
use crate::swipe::Direction;

// ═══════════════════════════════════════════════════════════════════════════════
// ATTRIBUTE FAMILIES
// ═══════════════════════════════════════════════════════════════════════════════

/// The two directive attribute families the engine interprets. Both share the
/// same grammar and processing; only the attribute prefix differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectiveKind {
    Class,
    State,
}

impl DirectiveKind {
    pub const ALL: [Self; 2] = [Self::Class, Self::State];

    /// The primary value-list attribute.
    pub fn value_attr(self) -> &'static str {
        match self {
            Self::Class => "data-class",
            Self::State => "data-state",
        }
    }

    pub fn element_attr(self) -> &'static str {
        match self {
            Self::Class => "data-class-element",
            Self::State => "data-state-element",
        }
    }

    pub fn behaviour_attr(self) -> &'static str {
        match self {
            Self::Class => "data-class-behaviour",
            Self::State => "data-state-behaviour",
        }
    }

    pub fn scope_attr(self) -> &'static str {
        match self {
            Self::Class => "data-class-scope",
            Self::State => "data-state-scope",
        }
    }

    pub fn swipe_attr(self) -> &'static str {
        match self {
            Self::Class => "data-class-swipe",
            Self::State => "data-state-swipe",
        }
    }

    /// Engine-written marker preventing duplicate handler binding.
    pub fn registered_attr(self) -> &'static str {
        match self {
            Self::Class => "data-class-registered",
            Self::State => "data-state-registered",
        }
    }

    /// Host-fireable notification name requesting a re-scan for this family.
    pub fn rescan_event(self) -> &'static str {
        match self {
            Self::Class => "dataClass",
            Self::State => "dataState",
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// BEHAVIOR & SWIPE
// ═══════════════════════════════════════════════════════════════════════════════

/// Mutation behavior for one directive index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Behavior {
    Add,
    Remove,
    #[default]
    Toggle,
}

impl Behavior {
    /// Unknown tokens read as `Toggle`, the catch-all branch.
    pub fn from_token(token: &str) -> Self {
        match token {
            "add" => Self::Add,
            "remove" => Self::Remove,
            _ => Self::Toggle,
        }
    }
}

/// Resolved swipe binding: the direction that triggers processing, and
/// whether the binding replaces the click handler or coexists with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeSpec {
    pub direction: Direction,
    pub replace_click: bool,
}

impl SwipeSpec {
    /// Parse `"<direction>, <true|false>"`. An unknown direction yields no
    /// binding at all; a missing or garbled flag reads as `false`.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.split(", ");
        let direction = Direction::parse(parts.next()?.trim())?;
        if direction == Direction::None {
            return None;
        }
        let replace_click = parts.next().map(|flag| flag.trim() == "true").unwrap_or(false);
        Some(Self {
            direction,
            replace_click,
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// DIRECTIVE SPEC
// ═══════════════════════════════════════════════════════════════════════════════

/// The parallel lists derived from one annotated element's current
/// attributes. Ephemeral; rebuilt on every trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectiveSpec {
    pub values: Vec<String>,
    pub targets: Vec<String>,
    pub behaviors: Vec<Behavior>,
    pub scopes: Vec<String>,
    /// Target list was absent: the single index resolves to the trigger
    /// element itself, ignoring the scope list.
    pub self_target: bool,
}

impl DirectiveSpec {
    /// Number of indices a trigger run walks.
    pub fn index_count(&self) -> usize {
        if self.self_target {
            1
        } else {
            self.values.len().max(self.targets.len())
        }
    }
}

/// The primary value attribute was absent or empty. The element stays inert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedDirective {
    pub attr: &'static str,
}

impl fmt::Display for MalformedDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "missing or empty required attribute '{}'", self.attr)
    }
}

/// Parse the element's current attributes into a directive spec.
pub fn parse_directive(
    node: &Handle,
    kind: DirectiveKind,
) -> Result<DirectiveSpec, MalformedDirective> {
    let raw_values = dom::get_attr(node, kind.value_attr())
        .filter(|raw| !raw.trim().is_empty())
        .ok_or(MalformedDirective {
            attr: kind.value_attr(),
        })?;

    let values = split_list(&raw_values);
    let behaviors = list_attr(node, kind.behaviour_attr())
        .iter()
        .map(|token| Behavior::from_token(token))
        .collect();
    let scopes = list_attr(node, kind.scope_attr());

    let raw_targets = dom::get_attr(node, kind.element_attr()).filter(|raw| !raw.trim().is_empty());
    match raw_targets {
        Some(raw) => Ok(DirectiveSpec {
            values,
            targets: split_list(&raw),
            behaviors,
            scopes,
            self_target: false,
        }),
        None => Ok(DirectiveSpec {
            values,
            targets: Vec::new(),
            behaviors,
            scopes,
            self_target: true,
        }),
    }
}

/// Parse the element's swipe attribute, if any.
pub fn parse_swipe(node: &Handle, kind: DirectiveKind) -> Option<SwipeSpec> {
    dom::get_attr(node, kind.swipe_attr()).and_then(|raw| SwipeSpec::parse(&raw))
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(", ").map(str::to_string).collect()
}

fn list_attr(node: &Handle, name: &str) -> Vec<String> {
    dom::get_attr(node, name)
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| split_list(&raw))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{elements_with_attr, parse_html};

    fn annotated(html: &str, kind: DirectiveKind) -> Handle {
        let dom = parse_html(html);
        elements_with_attr(&dom.document, kind.value_attr())
            .into_iter()
            .next()
            .unwrap()
    }

    #[test]
    fn test_parallel_lists() {
        let node = annotated(
            r#"<div data-class="is-active, is-invalid, is-hidden"
                    data-class-element="js-elem, js-elem2, js-elem3"
                    data-class-behaviour="toggle, remove, add"
                    data-class-scope="false, js-parent"></div>"#,
            DirectiveKind::Class,
        );
        let spec = parse_directive(&node, DirectiveKind::Class).unwrap();
        assert_eq!(spec.values, vec!["is-active", "is-invalid", "is-hidden"]);
        assert_eq!(spec.targets, vec!["js-elem", "js-elem2", "js-elem3"]);
        assert_eq!(
            spec.behaviors,
            vec![Behavior::Toggle, Behavior::Remove, Behavior::Add]
        );
        assert_eq!(spec.scopes, vec!["false", "js-parent"]);
        assert!(!spec.self_target);
        assert_eq!(spec.index_count(), 3);
    }

    #[test]
    fn test_index_count_is_max_of_values_and_targets() {
        let node = annotated(
            r#"<div data-state="is-active" data-state-element="js-a, js-b, js-c"></div>"#,
            DirectiveKind::State,
        );
        let spec = parse_directive(&node, DirectiveKind::State).unwrap();
        assert_eq!(spec.index_count(), 3);
    }

    #[test]
    fn test_missing_primary_is_malformed() {
        let dom = parse_html(r#"<div class="plain"></div>"#);
        let node = crate::dom::first_with_class(&dom.document, "plain").unwrap();
        let err = parse_directive(&node, DirectiveKind::State).unwrap_err();
        assert_eq!(err.attr, "data-state");

        let empty = annotated(r#"<div data-state=""></div>"#, DirectiveKind::State);
        assert!(parse_directive(&empty, DirectiveKind::State).is_err());
    }

    #[test]
    fn test_missing_target_list_is_self_targeting() {
        let node = annotated(
            r#"<div class="js-self" data-state="is-active" data-state-scope="js-parent"></div>"#,
            DirectiveKind::State,
        );
        let spec = parse_directive(&node, DirectiveKind::State).unwrap();
        assert!(spec.self_target);
        assert_eq!(spec.index_count(), 1);
    }

    #[test]
    fn test_unknown_behaviour_reads_as_toggle() {
        assert_eq!(Behavior::from_token("blink"), Behavior::Toggle);
        assert_eq!(Behavior::from_token("add"), Behavior::Add);
        assert_eq!(Behavior::from_token("remove"), Behavior::Remove);
    }

    #[test]
    fn test_swipe_spec() {
        assert_eq!(
            SwipeSpec::parse("left, true"),
            Some(SwipeSpec {
                direction: Direction::Left,
                replace_click: true,
            })
        );
        assert_eq!(
            SwipeSpec::parse("up"),
            Some(SwipeSpec {
                direction: Direction::Up,
                replace_click: false,
            })
        );
        assert_eq!(
            SwipeSpec::parse("down, yes"),
            Some(SwipeSpec {
                direction: Direction::Down,
                replace_click: false,
            })
        );
        assert_eq!(SwipeSpec::parse("sideways, true"), None);
        assert_eq!(SwipeSpec::parse("none, true"), None);
    }

    #[test]
    fn test_spec_serializes() {
        let node = annotated(
            r#"<div data-class="is-active" data-class-element="js-elem"></div>"#,
            DirectiveKind::Class,
        );
        let spec = parse_directive(&node, DirectiveKind::Class).unwrap();
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["values"][0], "is-active");
        assert_eq!(json["selfTarget"], false);
    }
}
