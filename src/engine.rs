//! Directive engine.
//!
//! Scans a host-owned document for annotated elements, records one
//! registration per element/directive pair, and runs the parse → resolve →
//! apply pipeline when the host reports an interaction.
//!
//! ## Key Invariants
//!
//! 1. **Registration is terminal**: an element moves Unregistered →
//!    Registered once; re-scans never attach duplicate handlers. The marker
//!    lives on the element itself (`data-…-registered`)
//! 2. **Fresh parse per trigger**: directive attributes are re-read on every
//!    interaction, so host edits take effect on the next trigger
//! 3. **Silent-skip errors**: a malformed directive leaves the element inert;
//!    an unresolved scope or target skips that index only
//! 4. **No transaction boundary**: candidates already mutated stay mutated if
//!    a later index resolves to nothing; every candidate mutation is
//!    independent and idempotent
//! 5. **Synchronous**: a trigger run completes in full before control returns
//!    to the host; the engine holds `Rc` handles and is single-threaded

use log::{debug, trace};
use markup5ever_rcdom::{Handle, RcDom};
use serde::Serialize;

use crate::apply::apply;
use crate::cookie;
use crate::dom;
use crate::parse::{parse_directive, parse_swipe, DirectiveKind, SwipeSpec};
use crate::resolve::{resolve_targets, Cursor};
use crate::scroll::{self, ScrollIntent};
use crate::swipe::{Direction, PointerSample, SwipeTracker, Thresholds};
use crate::text_toggle;

/// A side-effect intent the host must perform; the engine mutates the tree
/// directly but never owns the viewport or the cookie jar.
pub enum Effect {
    ScrollTo(Handle),
    ScrollBy(i64),
    SetCookie { name: String },
}

impl PartialEq for Effect {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::ScrollTo(a), Self::ScrollTo(b)) => dom::same_node(a, b),
            (Self::ScrollBy(a), Self::ScrollBy(b)) => a == b,
            (Self::SetCookie { name: a }, Self::SetCookie { name: b }) => a == b,
            _ => false,
        }
    }
}

impl std::fmt::Debug for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ScrollTo(node) => {
                write!(f, "ScrollTo(<{}>)", dom::tag_name(node).unwrap_or_default())
            }
            Self::ScrollBy(offset) => write!(f, "ScrollBy({})", offset),
            Self::SetCookie { name } => write!(f, "SetCookie({})", name),
        }
    }
}

/// Result of one trigger entry point: how many registrations processed the
/// interaction, and the side-effect intents they produced. Tree mutations
/// happen directly; a consumed outcome tells the host to suppress the
/// input's default action.
#[derive(Debug, PartialEq)]
pub struct TriggerOutcome {
    pub fired: usize,
    pub effects: Vec<Effect>,
}

impl TriggerOutcome {
    fn none() -> Self {
        Self {
            fired: 0,
            effects: Vec::new(),
        }
    }

    /// True when at least one registration fired.
    pub fn consumed(&self) -> bool {
        self.fired > 0
    }
}

/// What a registration binds: a class/state directive family or one of the
/// single-purpose directives.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Binding {
    Directive(DirectiveKind),
    TextToggle,
    Scroll,
    Cookie,
}

impl Binding {
    fn label(self) -> &'static str {
        match self {
            Self::Directive(DirectiveKind::Class) => "class",
            Self::Directive(DirectiveKind::State) => "state",
            Self::TextToggle => "toggle-text",
            Self::Scroll => "scroll",
            Self::Cookie => "set-cookie",
        }
    }
}

#[derive(Clone)]
struct Registration {
    node: Handle,
    binding: Binding,
    swipe: Option<SwipeSpec>,
}

/// Serializable view of one registration, for host inspection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationInfo {
    pub directive: String,
    pub element: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swipe: Option<SwipeSpec>,
}

/// The directive engine. Owns the parsed document and the registration list;
/// all entry points run synchronously on the caller's turn.
pub struct Engine {
    dom: RcDom,
    registrations: Vec<Registration>,
    tracker: SwipeTracker,
    thresholds: Thresholds,
}

impl Engine {
    /// Wrap a document without scanning it; call [`Engine::scan`] to activate.
    pub fn new(dom: RcDom) -> Self {
        Self::with_thresholds(dom, Thresholds::default())
    }

    pub fn with_thresholds(dom: RcDom, thresholds: Thresholds) -> Self {
        Self {
            dom,
            registrations: Vec::new(),
            tracker: SwipeTracker::new(),
            thresholds,
        }
    }

    pub fn document(&self) -> &Handle {
        &self.dom.document
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // REGISTRATION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Walk the whole document and register every annotated element not yet
    /// carrying its registration marker. Returns the number of new
    /// registrations. Safe to call repeatedly.
    pub fn scan(&mut self) -> usize {
        let document = self.dom.document.clone();
        let mut added = 0;
        for node in dom::descendants(&document) {
            if !dom::is_element(&node) {
                continue;
            }
            added += self.register_node(&node);
        }
        if added > 0 {
            debug!("scan registered {} element(s)", added);
        }
        added
    }

    /// Re-scan after the host mutated the tree. Identical to [`Engine::scan`];
    /// already-registered elements are skipped via their markers.
    pub fn rescan(&mut self) -> usize {
        self.scan()
    }

    /// Fire a named notification. A name matching a directive family's
    /// re-scan event (`"dataClass"`, `"dataState"`) triggers a re-scan.
    pub fn notify(&mut self, event: &str) -> bool {
        if DirectiveKind::ALL.iter().any(|kind| kind.rescan_event() == event) {
            self.rescan();
            true
        } else {
            false
        }
    }

    fn register_node(&mut self, node: &Handle) -> usize {
        let mut added = 0;

        for kind in DirectiveKind::ALL {
            if !dom::has_attr(node, kind.value_attr()) {
                continue;
            }
            if dom::get_attr(node, kind.registered_attr()).as_deref() == Some("true") {
                continue;
            }
            // Malformed directives stay inert and unmarked.
            if let Err(err) = parse_directive(node, kind) {
                debug!("skipping inert element: {}", err);
                continue;
            }
            let swipe = parse_swipe(node, kind);
            self.push_registration(node, Binding::Directive(kind), swipe, kind.registered_attr());
            added += 1;
        }

        if dom::has_attr(node, text_toggle::VALUE_ATTR)
            && dom::get_attr(node, text_toggle::REGISTERED_ATTR).as_deref() != Some("true")
        {
            text_toggle::cache_original(node);
            let swipe =
                dom::get_attr(node, text_toggle::SWIPE_ATTR).and_then(|raw| SwipeSpec::parse(&raw));
            self.push_registration(node, Binding::TextToggle, swipe, text_toggle::REGISTERED_ATTR);
            added += 1;
        }

        if dom::has_attr(node, scroll::VALUE_ATTR)
            && dom::get_attr(node, scroll::REGISTERED_ATTR).as_deref() != Some("true")
        {
            self.push_registration(node, Binding::Scroll, None, scroll::REGISTERED_ATTR);
            added += 1;
        }

        if dom::has_attr(node, cookie::VALUE_ATTR)
            && dom::get_attr(node, cookie::REGISTERED_ATTR).as_deref() != Some("true")
        {
            self.push_registration(node, Binding::Cookie, None, cookie::REGISTERED_ATTR);
            added += 1;
        }

        added
    }

    fn push_registration(
        &mut self,
        node: &Handle,
        binding: Binding,
        swipe: Option<SwipeSpec>,
        marker: &str,
    ) {
        dom::set_attr(node, marker, "true");
        debug!(
            "registered {} directive on <{}>",
            binding.label(),
            dom::tag_name(node).unwrap_or_default()
        );
        self.registrations.push(Registration {
            node: node.clone(),
            binding,
            swipe,
        });
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // TRIGGERS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Handle a click on `node`. Registrations whose swipe binding replaces
    /// the click handler do not fire. When the outcome reads as consumed the
    /// host suppresses the input's default action before anything else
    /// observes it.
    pub fn click(&self, node: &Handle) -> TriggerOutcome {
        let mut outcome = TriggerOutcome::none();
        for reg in self.registrations_for(node) {
            if reg.swipe.map(|s| s.replace_click).unwrap_or(false) {
                continue;
            }
            self.run(&reg, &mut outcome.effects);
            outcome.fired += 1;
        }
        outcome
    }

    /// Handle a completed gesture on `node`. Only registrations bound to the
    /// matching direction fire; everything else is a no-op.
    pub fn gesture(&self, node: &Handle, direction: Direction) -> TriggerOutcome {
        let mut outcome = TriggerOutcome::none();
        if direction == Direction::None {
            return outcome;
        }
        for reg in self.registrations_for(node) {
            if reg.swipe.map(|s| s.direction) == Some(direction) {
                self.run(&reg, &mut outcome.effects);
                outcome.fired += 1;
            }
        }
        outcome
    }

    /// Record the start of a pointer contact on `node`.
    pub fn touch_start(&mut self, node: &Handle, sample: PointerSample) {
        self.tracker.start(node, sample);
    }

    /// Complete a pointer contact on `node`, classify it, and run any
    /// matching gesture bindings.
    pub fn touch_end(&mut self, node: &Handle, sample: PointerSample) -> TriggerOutcome {
        let direction = self.tracker.end(node, sample, self.thresholds);
        self.gesture(node, direction)
    }

    fn registrations_for(&self, node: &Handle) -> Vec<Registration> {
        self.registrations
            .iter()
            .filter(|reg| dom::same_node(&reg.node, node))
            .cloned()
            .collect()
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // PROCESSING
    // ═══════════════════════════════════════════════════════════════════════════

    fn run(&self, reg: &Registration, effects: &mut Vec<Effect>) {
        match reg.binding {
            Binding::Directive(kind) => self.run_directive(&reg.node, kind),
            Binding::TextToggle => text_toggle::toggle(&reg.node),
            Binding::Scroll => {
                if let Some(token) = dom::get_attr(&reg.node, scroll::VALUE_ATTR) {
                    match scroll::classify(self.document(), &token) {
                        Some(ScrollIntent::ToElement(target)) => {
                            effects.push(Effect::ScrollTo(target));
                        }
                        Some(ScrollIntent::ByOffset(offset)) => {
                            effects.push(Effect::ScrollBy(offset));
                        }
                        None => {}
                    }
                }
            }
            Binding::Cookie => {
                if let Some(name) = cookie::cookie_name(&reg.node) {
                    effects.push(Effect::SetCookie { name });
                }
            }
        }
    }

    /// One full directive run: fresh parse, then resolve and apply per index
    /// with carry-forward on every list.
    fn run_directive(&self, node: &Handle, kind: DirectiveKind) {
        let spec = match parse_directive(node, kind) {
            Ok(spec) => spec,
            Err(err) => {
                debug!("trigger ignored: {}", err);
                return;
            }
        };

        let mut values = Cursor::new(&spec.values);
        let mut targets = Cursor::new(&spec.targets);
        let mut behaviors = Cursor::new(&spec.behaviors);
        let mut scopes = Cursor::new(&spec.scopes);

        for index in 0..spec.index_count() {
            let Some(value) = values.at(index) else {
                break;
            };
            let behavior = behaviors.at(index).copied().unwrap_or_default();

            let candidates = if spec.self_target {
                vec![node.clone()]
            } else {
                let Some(target) = targets.at(index) else {
                    break;
                };
                let scope = scopes.at(index).map(String::as_str);
                resolve_targets(self.document(), node, target, scope)
            };

            trace!(
                "{} index {}: value '{}' applies to {} candidate(s)",
                kind.value_attr(),
                index,
                value,
                candidates.len()
            );
            for candidate in &candidates {
                apply(candidate, value, behavior);
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // INSPECTION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Serializable view of every registration, in registration order.
    pub fn snapshot(&self) -> Vec<RegistrationInfo> {
        self.registrations
            .iter()
            .map(|reg| RegistrationInfo {
                directive: reg.binding.label().to_string(),
                element: dom::tag_name(&reg.node).unwrap_or_default(),
                swipe: reg.swipe,
            })
            .collect()
    }

    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.snapshot()).unwrap_or_default()
    }
}
