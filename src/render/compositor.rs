//! Per-frame style compositing.
//!
//! Subsystems never touch element styles directly. They post transforms
//! into a layer and opacities into a side table; `flush` resolves each
//! node once per frame and writes the result into the document.
//!
//! Compositing rule: a node's `Ambient` transform (pointer-driven, updated
//! every frame) replaces its `Scroll` transform (parallax, updated on
//! throttled scroll). The two are never summed.

use std::collections::{BTreeMap, BTreeSet};

use crate::dom::css::Transform;
use crate::dom::{Document, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Scroll,
    Ambient,
}

#[derive(Debug, Default)]
pub struct Compositor {
    scroll: BTreeMap<NodeId, Transform>,
    ambient: BTreeMap<NodeId, Transform>,
    opacity: BTreeMap<NodeId, f32>,
    dirty: BTreeSet<NodeId>,
}

impl Compositor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_transform(&mut self, node: NodeId, layer: Layer, t: Transform) {
        let table = match layer {
            Layer::Scroll => &mut self.scroll,
            Layer::Ambient => &mut self.ambient,
        };
        if table.insert(node, t) != Some(t) {
            self.dirty.insert(node);
        }
    }

    pub fn set_opacity(&mut self, node: NodeId, opacity: f32) {
        if self.opacity.insert(node, opacity) != Some(opacity) {
            self.dirty.insert(node);
        }
    }

    /// The transform that wins for `node` under the compositing rule.
    pub fn resolve(&self, node: NodeId) -> Option<Transform> {
        self.ambient
            .get(&node)
            .or_else(|| self.scroll.get(&node))
            .copied()
    }

    pub fn layer_value(&self, node: NodeId, layer: Layer) -> Option<Transform> {
        match layer {
            Layer::Scroll => self.scroll.get(&node).copied(),
            Layer::Ambient => self.ambient.get(&node).copied(),
        }
    }

    /// Write every changed node's resolved style. Returns the number of
    /// nodes written.
    pub fn flush(&mut self, doc: &mut Document) -> usize {
        let dirty = std::mem::take(&mut self.dirty);
        for &node in &dirty {
            let transform = self.resolve(node);
            let opacity = self.opacity.get(&node).copied();
            let style = doc.style_mut(node);
            if transform.is_some() {
                style.transform = transform;
            }
            if opacity.is_some() {
                style.opacity = opacity;
            }
        }
        dirty.len()
    }
}
