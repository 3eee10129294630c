//! Pointer-driven ambient motion and the custom cursor.
//!
//! Both loops are frame-paced and exponentially smooth a tracked position
//! toward the latest pointer sample. Each starts only on wide viewports and,
//! once started, runs until the page goes away.

use crate::dom::css::Transform;
use crate::dom::{Document, NodeId};
use crate::render::layout::Viewport;

/// Pointer position normalized to `[-0.5, 0.5]` of the viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
}

impl PointerSample {
    pub fn normalize(px: f32, py: f32, viewport: Viewport) -> Self {
        let w = viewport.width.max(1.0);
        let h = viewport.height.max(1.0);
        Self {
            x: (px / w - 0.5).clamp(-0.5, 0.5),
            y: (py / h - 0.5).clamp(-0.5, 0.5),
        }
    }
}

/// Latest raw pointer state as reported by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub raw_x: f32,
    pub raw_y: f32,
    pub normalized: PointerSample,
}

impl PointerState {
    pub fn record(&mut self, x: f32, y: f32, viewport: Viewport) {
        self.raw_x = x;
        self.raw_y = y;
        self.normalized = PointerSample::normalize(x, y, viewport);
    }
}

/// A position that trails its target.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Smoothed {
    pub x: f32,
    pub y: f32,
}

impl Smoothed {
    /// `current += (target - current) * factor`
    pub fn step(&mut self, tx: f32, ty: f32, factor: f32) {
        self.x += (tx - self.x) * factor;
        self.y += (ty - self.y) * factor;
    }
}

/// Pixel amplitude of each orb's pointer drift.
pub fn ambient_speed(index: usize) -> f32 {
    (index + 1) as f32 * 20.0
}

/// Orb drift following the pointer.
#[derive(Debug, Clone)]
pub struct AmbientMotion {
    orbs: Vec<NodeId>,
    current: Smoothed,
}

impl AmbientMotion {
    /// `None` on viewports not wider than `min_width`.
    pub fn start(orbs: Vec<NodeId>, viewport: Viewport, min_width: f32) -> Option<Self> {
        if viewport.width <= min_width || orbs.is_empty() {
            return None;
        }
        log::debug!("ambient motion started for {} orbs", orbs.len());
        Some(Self {
            orbs,
            current: Smoothed::default(),
        })
    }

    pub fn position(&self) -> Smoothed {
        self.current
    }

    /// Advance one frame and return the transform for every orb.
    pub fn step(&mut self, target: PointerSample, factor: f32) -> Vec<(NodeId, Transform)> {
        self.current.step(target.x, target.y, factor);
        self.orbs
            .iter()
            .enumerate()
            .map(|(i, &node)| {
                let speed = ambient_speed(i);
                (
                    node,
                    Transform::Translate {
                        x: self.current.x * speed,
                        y: self.current.y * speed,
                    },
                )
            })
            .collect()
    }
}

/// Custom cursor: a ring pinned to the pointer and a dot trailing it.
#[derive(Debug, Clone)]
pub struct CursorFollower {
    pub ring: NodeId,
    pub dot: NodeId,
    dot_pos: Smoothed,
    active: bool,
}

impl CursorFollower {
    /// Create the cursor elements under `parent`. `None` on viewports not
    /// wider than `min_width`.
    pub fn start(doc: &mut Document, parent: NodeId, viewport: Viewport, min_width: f32) -> Option<Self> {
        if viewport.width <= min_width {
            return None;
        }
        let ring = doc.create_element(parent, "div", &["cursor"]);
        let dot = doc.create_element(parent, "div", &["cursor-follower"]);
        Some(Self {
            ring,
            dot,
            dot_pos: Smoothed::default(),
            active: false,
        })
    }

    /// Advance one frame; returns (ring, dot) transforms.
    pub fn step(&mut self, pointer: &PointerState, factor: f32) -> [(NodeId, Transform); 2] {
        self.dot_pos.step(pointer.raw_x, pointer.raw_y, factor);
        [
            (
                self.ring,
                Transform::Translate {
                    x: pointer.raw_x,
                    y: pointer.raw_y,
                },
            ),
            (
                self.dot,
                Transform::Translate {
                    x: self.dot_pos.x,
                    y: self.dot_pos.y,
                },
            ),
        ]
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn dot_position(&self) -> Smoothed {
        self.dot_pos
    }
}
