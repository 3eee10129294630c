//! Painting helpers for the page canvas.
//!
//! Stateless functions that map document nodes to colors, font sizes and
//! fills. The palette follows the portfolio stylesheet's dark theme.

use std::collections::HashSet;

use eframe::egui::{self, Color32};
use folio_view::dom::{Document, NodeId, NodeType};
use folio_view::view::registry::{PageRegistry, CARD_CLASSES};
use folio_view::view::reveal::RevealRole;

// ─── Palette ──────────────────────────────────────────────────────────────────

pub const BG: Color32 = Color32::from_rgb(16, 19, 25);
pub const BG_SECONDARY: Color32 = Color32::from_rgb(25, 29, 36);
pub const BG_TERTIARY: Color32 = Color32::from_rgb(34, 39, 47);
pub const TEXT: Color32 = Color32::from_rgb(242, 242, 242);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(179, 179, 179);
pub const PRIMARY: Color32 = Color32::from_rgb(51, 153, 255);
pub const PRIMARY_LIGHT: Color32 = Color32::from_rgb(102, 178, 255);
pub const ACCENT: Color32 = Color32::from_rgb(187, 77, 255);
pub const BORDER: Color32 = Color32::from_rgb(43, 48, 59);

/// Tags that are never painted directly.
const UNPAINTED: &[&str] = &["head", "title", "meta", "link", "script", "style", "noscript"];

pub fn is_painted(doc: &Document, id: NodeId) -> bool {
    let node = doc.node(id);
    match node.node_type {
        NodeType::Document => true,
        NodeType::Text => true,
        NodeType::Element => !UNPAINTED.contains(&node.tag.as_str()),
    }
}

// ─── Typography ───────────────────────────────────────────────────────────────

/// Font size for a text node, taken from the nearest sized ancestor.
pub fn font_size(doc: &Document, text_node: NodeId) -> f32 {
    let sized = doc.closest(text_node, |n| {
        n.is_element()
            && (matches!(n.tag.as_str(), "h1" | "h2" | "h3" | "h4" | "small")
                || n.has_class("stat-number")
                || n.has_class("logo-text"))
    });
    let Some(id) = sized else {
        return 16.0;
    };
    let node = doc.node(id);
    if node.has_class("stat-number") {
        return 36.0;
    }
    if node.has_class("logo-text") {
        return 24.0;
    }
    match node.tag.as_str() {
        "h1" => 48.0,
        "h2" => 36.0,
        "h3" => 20.0,
        "h4" => 18.0,
        "small" => 12.0,
        _ => 16.0,
    }
}

pub fn text_color(doc: &Document, text_node: NodeId) -> Color32 {
    let link = doc.closest(text_node, |n| n.is_element() && n.tag == "a");
    if let Some(link) = link {
        let node = doc.node(link);
        if node.has_class("nav-link") {
            return if node.has_class("active") { PRIMARY } else { TEXT_SECONDARY };
        }
        if node.has_class("btn") {
            return TEXT;
        }
        return PRIMARY_LIGHT;
    }
    let accented = doc.closest(text_node, |n| {
        n.has_class("gradient-text")
            || n.has_class("stat-number")
            || n.has_class("section-tag")
            || n.has_class("accent")
    });
    if accented.is_some() {
        return PRIMARY;
    }
    let muted = doc.closest(text_node, |n| {
        matches!(n.tag.as_str(), "p" | "li" | "label") || n.has_class("stat-label")
    });
    if muted.is_some() {
        TEXT_SECONDARY
    } else {
        TEXT
    }
}

// ─── Boxes ────────────────────────────────────────────────────────────────────

/// How an element's box is filled: color and corner radius.
pub fn element_fill(doc: &Document, id: NodeId) -> Option<(Color32, f32)> {
    let node = doc.node(id);
    if !node.is_element() {
        return None;
    }
    if node.has_class("navbar") {
        let alpha = if node.has_class("scrolled") { 235 } else { 0 };
        return Some((Color32::from_rgba_unmultiplied(16, 19, 25, alpha), 0.0));
    }
    if node.has_class("btn-primary") || node.tag == "button" && node.has_class("btn") {
        return Some((PRIMARY, 8.0));
    }
    if node.has_class("btn-secondary") {
        return Some((BG_TERTIARY, 8.0));
    }
    if node.has_class("scroll-top") {
        return Some((ACCENT, 25.0));
    }
    if CARD_CLASSES.iter().any(|c| node.has_class(c)) {
        return Some((BG_SECONDARY, 12.0));
    }
    if matches!(node.tag.as_str(), "input" | "textarea") {
        return Some((BG_TERTIARY, 6.0));
    }
    if node.tag == "section" && node.has_class("hero") {
        return Some((BG, 0.0));
    }
    None
}

pub fn orb_color(index: usize) -> Color32 {
    match index % 3 {
        0 => Color32::from_rgba_unmultiplied(51, 153, 255, 60),
        1 => Color32::from_rgba_unmultiplied(187, 77, 255, 50),
        _ => Color32::from_rgba_unmultiplied(51, 102, 204, 40),
    }
}

/// Elements that stay transparent until the controller marks them visible.
pub fn reveal_targets(registry: &PageRegistry) -> HashSet<NodeId> {
    let mut out = HashSet::new();
    for (node, role) in &registry.reveal {
        match role {
            RevealRole::Stagger(children) => out.extend(children.iter().copied()),
            _ => {
                out.insert(*node);
            }
        }
    }
    out
}

pub fn to_rect(b: folio_view::render::layout::LayoutBox, offset: egui::Vec2) -> egui::Rect {
    egui::Rect::from_min_size(egui::pos2(b.x, b.y) + offset, egui::vec2(b.width, b.height))
}
