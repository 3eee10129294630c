//! Reveal-on-scroll.
//!
//! A one-shot intersection observer: each registered element is watched
//! until it first intersects the viewport, then it is marked revealed and
//! dropped from the watch list. The revealed set only ever grows.

use std::collections::BTreeSet;

use crate::dom::NodeId;
use crate::render::layout::{Layout, LayoutBox, Viewport};

/// Fraction of an element that must be inside the root to count.
pub const VISIBILITY_THRESHOLD: f32 = 0.1;
/// The root's bottom edge is pulled up by this much (`rootMargin: 0 0 -50px 0`).
pub const ROOT_MARGIN_BOTTOM: f32 = 50.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealRole {
    /// Just gets the visible flag.
    Plain,
    /// The statistics container: also starts the counters inside it.
    Stats,
    /// Fans the flag out to these children, one step apart.
    Stagger(Vec<NodeId>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Pending,
    Revealed,
}

#[derive(Debug, Clone)]
struct ObservedTarget {
    node: NodeId,
    role: RevealRole,
}

/// Emitted the first (and only) time a target intersects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealEvent {
    pub node: NodeId,
    pub role: RevealRole,
}

/// Portion of `b` inside the vertical band `[top, bottom)`.
pub fn intersection_ratio(b: LayoutBox, top: f32, bottom: f32) -> f32 {
    let overlap = (b.bottom().min(bottom) - b.y.max(top)).max(0.0);
    if b.height <= 0.0 {
        // Zero-height targets count once their edge is inside the band.
        return if b.y >= top && b.y < bottom { 1.0 } else { 0.0 };
    }
    overlap / b.height
}

#[derive(Debug, Default)]
pub struct VisibilityObserver {
    watching: Vec<ObservedTarget>,
    revealed: BTreeSet<NodeId>,
}

impl VisibilityObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start watching `node`. Already watched or revealed nodes are ignored.
    pub fn observe(&mut self, node: NodeId, role: RevealRole) {
        if self.revealed.contains(&node) || self.watching.iter().any(|t| t.node == node) {
            return;
        }
        self.watching.push(ObservedTarget { node, role });
    }

    /// Mark a node revealed without going through intersection (stagger
    /// children). Returns whether this was the first reveal.
    pub fn reveal(&mut self, node: NodeId) -> bool {
        self.watching.retain(|t| t.node != node);
        self.revealed.insert(node)
    }

    /// Test every watched target against the viewport at `scroll`. Targets
    /// that intersect are revealed and unobserved.
    pub fn check(&mut self, layout: &Layout, scroll: f32, viewport: Viewport) -> Vec<RevealEvent> {
        let top = scroll;
        let bottom = scroll + viewport.height - ROOT_MARGIN_BOTTOM;

        let mut events = Vec::new();
        let mut still_watching = Vec::with_capacity(self.watching.len());
        for target in self.watching.drain(..) {
            let ratio = intersection_ratio(layout.get(target.node), top, bottom);
            if ratio >= VISIBILITY_THRESHOLD && ratio > 0.0 {
                log::debug!("revealed node {:?} ({:?})", target.node, target.role);
                self.revealed.insert(target.node);
                events.push(RevealEvent {
                    node: target.node,
                    role: target.role,
                });
            } else {
                still_watching.push(target);
            }
        }
        self.watching = still_watching;
        events
    }

    pub fn state(&self, node: NodeId) -> RevealState {
        if self.revealed.contains(&node) {
            RevealState::Revealed
        } else {
            RevealState::Pending
        }
    }

    pub fn is_revealed(&self, node: NodeId) -> bool {
        self.revealed.contains(&node)
    }

    pub fn revealed(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.revealed.iter().copied()
    }

    pub fn watching(&self) -> usize {
        self.watching.len()
    }
}
