//! # dom-directives
//!
//! A declarative-attribute interpreter for live HTML trees. Elements annotate
//! themselves with directive attributes (`data-class`, `data-state`,
//! `data-toggle-text`, `data-scroll`, `data-set-cookie`); the engine scans
//! the document, registers interaction bindings, and mutates target elements
//! when the host reports a click or swipe.
//!
//! ## Ground Truth Invariants
//!
//! 1. **Parallel lists**: a directive's value/target/behaviour/scope
//!    attributes are `", "`-separated lists walked index by index; the index
//!    count is `max(len(values), len(targets))`.
//!
//! 2. **Carry-forward**: when any list is shorter than the index count, the
//!    last defined element at or before the current index is reused. A short
//!    list is never read as "absent".
//!
//! 3. **Scoping**: a scope token restricts target resolution to the subtree
//!    of the nearest matching ancestor (which joins the candidate set itself
//!    when it matches the target token, exactly once). `"false"` or no scope
//!    means document-global.
//!
//! 4. **Representation probe**: a target already carrying an attribute named
//!    the value token is mutated through that attribute's `"true"`/`"false"`
//!    value; otherwise through class membership.
//!
//! 5. **Terminal registration**: elements transition Unregistered →
//!    Registered once, marked by a `data-…-registered` attribute; re-scans
//!    (including the host-fired rescan notification) never duplicate
//!    bindings.
//!
//! 6. **Silent failure**: a malformed directive leaves its element inert; an
//!    unresolved scope or target is an empty candidate set for that index
//!    only. The host document is never crashed by bad markup.
//!
//! ## Host Contract
//!
//! The engine never owns the viewport, the cookie jar, or the event loop.
//! Interactions come in through [`Engine::click`] / [`Engine::gesture`] /
//! [`Engine::touch_end`]; side effects the engine cannot perform go back out
//! as [`Effect`] intents. After inserting annotated nodes, the host calls
//! [`Engine::rescan`] (or fires the per-family notification through
//! [`Engine::notify`]).

pub mod ancestor;
pub mod apply;
pub mod cookie;
pub mod dom;
pub mod engine;
pub mod parse;
pub mod resolve;
pub mod scroll;
pub mod swipe;
pub mod text_toggle;

pub use engine::{Effect, Engine, RegistrationInfo, TriggerOutcome};
pub use parse::{Behavior, DirectiveKind, DirectiveSpec, MalformedDirective, SwipeSpec};
pub use swipe::{Direction, PointerSample, Thresholds};
