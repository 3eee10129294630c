//! Content-area rendering for `FolioApp`.
//!
//! - `draw_content`     : input routing, controller frame, and painting
//! - `draw_form_fields` : text edits over the contact form inputs
//! - `draw_modal`       : the project dialog as an egui window
//! - `draw_stats_panel` : right-side view-state panel

use std::collections::HashSet;
use std::time::Instant;

use eframe::egui;

use folio_view::dom::{Document, NodeId, NodeType};
use folio_view::render::layout::{Layout, Viewport};
use folio_view::view::ViewController;

use super::FolioApp;
use crate::ui::{element_fill, font_size, is_painted, orb_color, text_color, to_rect};

/// Fixed-position chrome, painted without the scroll offset.
const CHROME_CLASSES: &[&str] = &["navbar", "scroll-top", "modal", "cursor", "cursor-follower"];

fn is_chrome(doc: &Document, id: NodeId) -> bool {
    CHROME_CLASSES.iter().any(|c| doc.has_class(id, c))
}

struct PagePainter<'a> {
    doc: &'a Document,
    layout: &'a Layout,
    hidden_until_visible: &'a HashSet<NodeId>,
    painter: &'a egui::Painter,
}

impl PagePainter<'_> {
    fn paint(&self, id: NodeId, origin: egui::Vec2, alpha: f32, orbs: &mut usize, flow: bool) {
        if !is_painted(self.doc, id) || (flow && is_chrome(self.doc, id)) {
            return;
        }
        let node = self.doc.node(id);
        let style = self.doc.style(id);
        let b = self.layout.get(id);

        let mut origin = origin;
        if let Some(t) = style.transform {
            origin += egui::vec2(t.dx(), t.dy(b.height));
        }
        let alpha = alpha * style.effective_opacity();
        if alpha <= 0.01
            || (self.hidden_until_visible.contains(&id) && !node.has_class("visible"))
        {
            return;
        }
        let rect = to_rect(b, origin);

        match node.node_type {
            NodeType::Text => {
                if !rect.intersects(self.painter.clip_rect()) {
                    return;
                }
                let Some(parent) = node.parent else {
                    return;
                };
                if matches!(self.doc.node(parent).tag.as_str(), "textarea" | "input") {
                    return;
                }
                let color = text_color(self.doc, id).gamma_multiply(alpha);
                let galley = self.painter.layout(
                    node.text.trim().to_string(),
                    egui::FontId::proportional(font_size(self.doc, id)),
                    color,
                    b.width.max(1.0),
                );
                self.painter.galley(rect.min, galley, color);
            }
            NodeType::Element if node.has_class("gradient-orb") => {
                let radius = b.width.min(b.height) * 0.5;
                self.painter
                    .circle_filled(rect.center(), radius, orb_color(*orbs).gamma_multiply(alpha));
                *orbs += 1;
            }
            NodeType::Element => {
                if let Some((fill, rounding)) = element_fill(self.doc, id) {
                    if b.height > 0.0 {
                        self.painter.rect_filled(rect, rounding, fill.gamma_multiply(alpha));
                    }
                }
                for &child in &node.children {
                    self.paint(child, origin, alpha, orbs, flow);
                }
            }
            NodeType::Document => {
                for &child in &node.children {
                    self.paint(child, origin, alpha, orbs, flow);
                }
            }
        }
    }
}

impl FolioApp {
    pub fn draw_content(&mut self, ui: &mut egui::Ui, ctx: &egui::Context, now: Instant) {
        if let Some(err) = &self.error {
            ui.centered_and_justified(|ui| {
                ui.colored_label(egui::Color32::from_rgb(255, 100, 100), err);
            });
            return;
        }
        if self.view.is_none() {
            ui.centered_and_justified(|ui| ui.spinner());
            return;
        }

        let rect = ui.max_rect();
        let viewport = Viewport::new(rect.width(), rect.height());
        if viewport != self.viewport {
            self.viewport = viewport;
            self.loader.set_viewport(viewport);
            if let Some(view) = &mut self.view {
                folio_view::engine::pipeline::relayout(view, viewport);
            }
            self.scroll_to(self.scroll, now);
        }

        let response = ui.allocate_rect(rect, egui::Sense::click());
        self.route_input(ui, &response, ctx, now);

        let Some(view) = &mut self.view else {
            return;
        };
        view.frame(now);

        let painter = ui.painter_at(rect);
        let page = PagePainter {
            doc: view.document(),
            layout: view.layout(),
            hidden_until_visible: &self.reveal_targets,
            painter: &painter,
        };
        let mut orbs = 0;
        let doc_origin = rect.min.to_vec2() - egui::vec2(0.0, self.scroll);
        page.paint(view.document().root(), doc_origin, 1.0, &mut orbs, true);

        let reg = view.registry();
        if let Some(nav) = reg.navbar {
            page.paint(nav, rect.min.to_vec2(), 1.0, &mut orbs, false);
        }
        if let Some(btn) = reg.scroll_top.filter(|&b| view.document().has_class(b, "visible")) {
            page.paint(btn, rect.min.to_vec2(), 1.0, &mut orbs, false);
        }

        if let Some(cursor) = view.cursor() {
            let doc = view.document();
            let at = |id: NodeId| {
                let t = doc.style(id).transform.unwrap_or(folio_view::dom::css::Transform::IDENTITY);
                rect.min + egui::vec2(t.dx(), t.dy(0.0))
            };
            let ring_radius = if cursor.is_active() { 24.0 } else { 16.0 };
            painter.circle_stroke(at(cursor.ring), ring_radius, egui::Stroke::new(1.5, crate::ui::PRIMARY));
            painter.circle_filled(at(cursor.dot), 4.0, crate::ui::ACCENT);
            ctx.set_cursor_icon(egui::CursorIcon::None);
        }

        self.draw_form_fields(ui, rect);
    }

    /// Feed wheel, keyboard, pointer and click input to the controller.
    fn route_input(
        &mut self,
        ui: &egui::Ui,
        response: &egui::Response,
        ctx: &egui::Context,
        now: Instant,
    ) {
        let (wheel, escape, page_down, page_up, home, end) = ui.input(|i| {
            (
                i.smooth_scroll_delta.y,
                i.key_pressed(egui::Key::Escape),
                i.key_pressed(egui::Key::PageDown),
                i.key_pressed(egui::Key::PageUp),
                i.key_pressed(egui::Key::Home),
                i.key_pressed(egui::Key::End),
            )
        });

        if response.hovered() && wheel != 0.0 {
            self.scroll_by(-wheel, now);
        }
        let page = self.viewport.height * 0.9;
        if page_down {
            self.scroll_by(page, now);
        }
        if page_up {
            self.scroll_by(-page, now);
        }
        if home {
            self.scroll_to(0.0, now);
        }
        if end {
            self.scroll_to(f32::MAX, now);
        }

        let origin = response.rect.min;
        let scroll = self.scroll;
        let Some(view) = &mut self.view else {
            return;
        };
        if escape {
            view.on_escape();
        }

        if let Some(pos) = response.hover_pos() {
            let local = pos - origin;
            view.on_pointer_move(local.x, local.y);
            let target = hit(view, local.x, local.y, scroll);
            view.on_pointer_over(target);
        } else {
            view.on_pointer_over(None);
        }

        let mut action = None;
        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let local = pos - origin;
                let target = match view.registry().modal {
                    // The dialog window eats its own clicks; anything that
                    // reaches the page landed on the backdrop.
                    Some(slots) if view.modal().is_open() => Some(slots.dialog),
                    _ => hit(view, local.x, local.y, scroll),
                };
                if let Some(target) = target {
                    log::trace!("click on {:?}", target);
                    action = view.on_click(target, now);
                }
            }
        }
        if let Some(action) = action {
            self.handle_action(action, ctx, now);
        }
    }

    /// Text edits laid over the contact form's inputs.
    fn draw_form_fields(&mut self, ui: &mut egui::Ui, rect: egui::Rect) {
        let Some(view) = &mut self.view else {
            return;
        };
        let Some(slots) = view.registry().form.clone() else {
            return;
        };
        if self.reveal_targets.contains(&slots.form) && !view.document().has_class(slots.form, "visible") {
            return;
        }
        let origin = rect.min.to_vec2() - egui::vec2(0.0, self.scroll);
        for (name, node) in &slots.fields {
            let b = view.layout().get(*node);
            let field_rect = to_rect(b, origin);
            if !field_rect.intersects(rect) {
                continue;
            }
            let mut value = view
                .form()
                .and_then(|f| f.field(name))
                .unwrap_or_default()
                .to_string();
            let multiline = view.document().node(*node).tag == "textarea";
            let edit = if multiline {
                egui::TextEdit::multiline(&mut value)
            } else {
                egui::TextEdit::singleline(&mut value)
            };
            let hint = view.document().attr(*node, "type").unwrap_or(name.as_str()).to_string();
            if ui.put(field_rect, edit.hint_text(hint)).changed() {
                view.set_field(name, &value);
            }
        }
    }

    pub fn draw_modal(&mut self, ctx: &egui::Context, now: Instant) {
        let Some(view) = &mut self.view else {
            return;
        };
        let Some(detail) = view.modal().selection().cloned() else {
            return;
        };
        let close_node = view.registry().modal.and_then(|s| s.close);

        let mut close = false;
        egui::Window::new(detail.title)
            .id(egui::Id::new("project-modal"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_max_width(560.0);
                ui.label(detail.description);
                ui.add_space(8.0);
                ui.label(egui::RichText::new("Technologies").strong());
                ui.label(egui::RichText::new(detail.tech_summary).color(crate::ui::PRIMARY));
                ui.add_space(8.0);
                close = ui.button("Close").clicked();
            });

        if close {
            match close_node {
                Some(node) => {
                    view.on_click(node, now);
                }
                None => view.close_project(),
            }
        }
    }

    pub fn draw_stats_panel(&mut self, ui: &mut egui::Ui) {
        let Some(view) = &self.view else {
            return;
        };
        let state = view.state();
        egui::Grid::new("view_stats").num_columns(2).show(ui, |ui| {
            let row = |ui: &mut egui::Ui, k: &str, v: String| {
                ui.label(k);
                ui.monospace(v);
                ui.end_row();
            };
            row(ui, "offset", format!("{:.0}", state.scroll.offset));
            let direction = if state.scroll.scrolling_down { "down" } else { "up" };
            row(ui, "direction", direction.to_string());
            row(ui, "nav scrolled", state.flags.nav_scrolled.to_string());
            row(ui, "nav hidden", state.flags.nav_hidden.to_string());
            row(ui, "back to top", state.flags.back_to_top_visible.to_string());
            row(ui, "section", view.active_section_id().unwrap_or("-").to_string());
            row(ui, "parallax", state.parallax_recomputes.to_string());
            row(ui, "frames", state.frames.to_string());
            row(ui, "revealed", view.observer().revealed().count().to_string());
            row(ui, "watching", view.observer().watching().to_string());
            row(ui, "timers", view.pending_timers().to_string());
            row(
                ui,
                "pointer",
                format!("{:+.2}, {:+.2}", state.pointer.normalized.x, state.pointer.normalized.y),
            );
        });
    }
}

/// Fixed chrome first (in window coordinates), then the scrolled document.
fn hit(view: &ViewController, x: f32, y: f32, scroll: f32) -> Option<NodeId> {
    let doc = view.document();
    let layout = view.layout();
    let reg = view.registry();
    let chrome = [
        reg.navbar.filter(|_| !view.state().flags.nav_hidden),
        reg.scroll_top.filter(|&b| doc.has_class(b, "visible")),
    ];
    for root in chrome.into_iter().flatten() {
        if layout.get(root).contains(x, y) {
            return layout.hit_test(doc, root, x, y).or(Some(root));
        }
    }
    let body = reg.body.unwrap_or_else(|| doc.root());
    layout.hit_test(doc, body, x, y + scroll)
}
