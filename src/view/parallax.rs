//! Scroll-driven parallax.
//!
//! Two paths share one throttled recompute:
//! - Hero: background orbs drift at `offset * speed`, the foreground fades
//!   out over `hero_fade_distance` while moving at half scroll speed.
//! - Sections: every non-hero section in view offsets its header and its
//!   cards relative to how far the section has scrolled into view. Cards
//!   get index-derived speeds so siblings separate slightly. Nothing is
//!   clamped.

use std::time::{Duration, Instant};

use crate::dom::NodeId;
use crate::dom::css::Transform;
use crate::render::compositor::{Compositor, Layer};
use crate::render::layout::{Layout, Viewport};

pub const ORB_BASE_SPEED: f32 = 0.3;
pub const ORB_SPEED_STEP: f32 = 0.1;
pub const HEADER_SPEED: f32 = 0.03;
pub const CARD_BASE_SPEED: f32 = 0.05;
pub const CARD_SPEED_STEP: f32 = 0.02;
pub const CARD_STAGGER: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParallaxKind {
    Orb,
    SectionHeader,
    Card,
}

/// An element registered for parallax, with its coefficient fixed at
/// registration time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxTarget {
    pub node: NodeId,
    pub speed: f32,
    pub kind: ParallaxKind,
    /// Position among its siblings of the same kind.
    pub index: usize,
}

impl ParallaxTarget {
    pub fn orb(node: NodeId, index: usize) -> Self {
        Self {
            node,
            speed: ORB_BASE_SPEED + ORB_SPEED_STEP * index as f32,
            kind: ParallaxKind::Orb,
            index,
        }
    }

    pub fn header(node: NodeId) -> Self {
        Self {
            node,
            speed: HEADER_SPEED,
            kind: ParallaxKind::SectionHeader,
            index: 0,
        }
    }

    pub fn card(node: NodeId, index: usize) -> Self {
        Self {
            node,
            speed: CARD_BASE_SPEED + (index % 3) as f32 * CARD_SPEED_STEP,
            kind: ParallaxKind::Card,
            index,
        }
    }

    /// Vertical offset for this target given the section's relative scroll.
    pub fn section_offset(&self, relative_scroll: f32) -> f32 {
        match self.kind {
            ParallaxKind::Card => -(relative_scroll - self.index as f32 * CARD_STAGGER) * self.speed,
            _ => -relative_scroll * self.speed,
        }
    }
}

/// Hero section bindings.
#[derive(Debug, Clone, Default)]
pub struct HeroTargets {
    pub section: Option<NodeId>,
    pub content: Option<NodeId>,
    pub orbs: Vec<ParallaxTarget>,
}

/// A non-hero section's parallax bindings.
#[derive(Debug, Clone)]
pub struct SectionTargets {
    pub node: NodeId,
    pub header: Option<ParallaxTarget>,
    pub cards: Vec<ParallaxTarget>,
}

/// Leading-edge rate limiter: runs at most once per `interval`, dropping
/// calls in between.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn ready(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

pub fn hero_content_opacity(offset: f32, fade_distance: f32) -> f32 {
    (1.0 - offset / fade_distance).max(0.0)
}

pub fn section_in_view(scroll: f32, viewport_height: f32, top: f32, height: f32) -> bool {
    scroll + viewport_height > top && scroll < top + height
}

pub fn relative_scroll(scroll: f32, viewport_height: f32, top: f32) -> f32 {
    scroll + viewport_height - top
}

/// Apply the hero path. Skipped entirely once the hero is scrolled past.
pub fn update_hero(
    hero: &HeroTargets,
    offset: f32,
    viewport: Viewport,
    fade_distance: f32,
    compositor: &mut Compositor,
) {
    if offset >= viewport.height {
        return;
    }
    for orb in &hero.orbs {
        compositor.set_transform(orb.node, Layer::Scroll, Transform::TranslateY(offset * orb.speed));
    }
    if let Some(content) = hero.content {
        let opacity = hero_content_opacity(offset, fade_distance);
        if opacity > 0.0 {
            compositor.set_transform(content, Layer::Scroll, Transform::TranslateY(offset * 0.5));
        }
        compositor.set_opacity(content, opacity);
    }
}

/// Apply the section path to every section currently in view.
pub fn update_sections(
    sections: &[SectionTargets],
    layout: &Layout,
    offset: f32,
    viewport: Viewport,
    compositor: &mut Compositor,
) {
    for section in sections {
        let b = layout.get(section.node);
        if !section_in_view(offset, viewport.height, b.y, b.height) {
            continue;
        }
        let rel = relative_scroll(offset, viewport.height, b.y);
        for target in section.header.iter().chain(section.cards.iter()) {
            compositor.set_transform(
                target.node,
                Layer::Scroll,
                Transform::TranslateY(target.section_offset(rel)),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coefficients_follow_index() {
        assert!((ParallaxTarget::orb(NodeId(1), 2).speed - 0.5).abs() < 1e-6);
        let speeds: Vec<f32> = (0..4).map(|i| ParallaxTarget::card(NodeId(1), i).speed).collect();
        assert!((speeds[0] - 0.05).abs() < 1e-6);
        assert!((speeds[1] - 0.07).abs() < 1e-6);
        assert!((speeds[2] - 0.09).abs() < 1e-6);
        assert!((speeds[3] - 0.05).abs() < 1e-6);
    }

    #[test]
    fn card_offsets_are_staggered() {
        let c0 = ParallaxTarget::card(NodeId(1), 0);
        let c1 = ParallaxTarget::card(NodeId(2), 1);
        assert!((c0.section_offset(200.0) - -10.0).abs() < 1e-4);
        assert!((c1.section_offset(200.0) - -10.5).abs() < 1e-4);
        assert!((ParallaxTarget::header(NodeId(3)).section_offset(200.0) - -6.0).abs() < 1e-4);
    }

    #[test]
    fn hero_fades_out_over_distance() {
        assert_eq!(hero_content_opacity(0.0, 600.0), 1.0);
        assert_eq!(hero_content_opacity(300.0, 600.0), 0.5);
        assert_eq!(hero_content_opacity(900.0, 600.0), 0.0);
    }

    #[test]
    fn throttle_drops_calls_inside_window() {
        let t0 = Instant::now();
        let mut th = Throttle::new(Duration::from_millis(10));
        let runs = (0..100)
            .filter(|i| th.ready(t0 + Duration::from_micros(i * 99)))
            .count();
        assert_eq!(runs, 1);
        assert!(th.ready(t0 + Duration::from_millis(10)));
    }

    #[test]
    fn section_visibility_window() {
        assert!(section_in_view(0.0, 800.0, 700.0, 500.0));
        assert!(!section_in_view(0.0, 800.0, 800.0, 500.0));
        assert!(!section_in_view(1200.0, 800.0, 700.0, 500.0));
    }
}
