//! Swipe gesture detection.
//!
//! Classifies a start/end pointer pair into a discrete direction using
//! distance, restraint and time thresholds. Independent of the directive
//! engine; the engine feeds it samples and consumes the direction signal.

use std::collections::HashMap;
use std::rc::Rc;

use markup5ever_rcdom::Handle;
use serde::{Deserialize, Serialize};

/// Discrete gesture direction. `None` means the interaction did not qualify
/// as a swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
    None,
}

impl Direction {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "up" => Some(Self::Up),
            "right" => Some(Self::Right),
            "down" => Some(Self::Down),
            "left" => Some(Self::Left),
            "none" => Some(Self::None),
            _ => None,
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = ();

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Self::parse(token).ok_or(())
    }
}

/// One pointer contact sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub x: f64,
    pub y: f64,
    pub time_ms: u64,
}

/// Swipe qualification thresholds.
#[derive(Debug, Clone, Copy)]
pub struct Thresholds {
    /// Minimum travel along the swipe axis.
    pub distance: f64,
    /// Maximum travel allowed on the perpendicular axis.
    pub restraint: f64,
    /// Maximum contact duration.
    pub allowed_time_ms: u64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            distance: 100.0,
            restraint: 100.0,
            allowed_time_ms: 300,
        }
    }
}

/// Classify a completed pointer interaction. The horizontal axis is tested
/// first; an interaction qualifying on both axes reads as horizontal.
pub fn classify(start: PointerSample, end: PointerSample, thresholds: Thresholds) -> Direction {
    let elapsed = end.time_ms.saturating_sub(start.time_ms);
    if elapsed > thresholds.allowed_time_ms {
        return Direction::None;
    }
    let dist_x = end.x - start.x;
    let dist_y = end.y - start.y;
    if dist_x.abs() >= thresholds.distance && dist_y.abs() <= thresholds.restraint {
        if dist_x < 0.0 {
            Direction::Left
        } else {
            Direction::Right
        }
    } else if dist_y.abs() >= thresholds.distance && dist_x.abs() <= thresholds.restraint {
        if dist_y < 0.0 {
            Direction::Up
        } else {
            Direction::Down
        }
    } else {
        Direction::None
    }
}

/// Per-node start-sample store, so a host can feed raw touch events and read
/// back a direction when the contact ends.
#[derive(Default)]
pub struct SwipeTracker {
    starts: HashMap<usize, PointerSample>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, node: &Handle, sample: PointerSample) {
        self.starts.insert(key(node), sample);
    }

    /// Complete the interaction on `node`. Returns `Direction::None` when no
    /// start sample was recorded for the node.
    pub fn end(&mut self, node: &Handle, sample: PointerSample, thresholds: Thresholds) -> Direction {
        match self.starts.remove(&key(node)) {
            Some(start) => classify(start, sample, thresholds),
            None => Direction::None,
        }
    }
}

fn key(node: &Handle) -> usize {
    Rc::as_ptr(node) as usize
}
