//! `ViewController`: owns the document and every view subsystem.
//!
//! Input handlers (`on_scroll`, `on_pointer_move`, `on_click`, ...) only
//! update state. `frame` is the single render step: it delivers
//! intersections and due timers, advances the pointer loops, and then
//! writes all classes, text and styles to the document in one pass.

use std::collections::BTreeMap;
use std::time::Instant;

use crate::config::SiteConfig;
use crate::content::project_catalog;
use crate::dom::css::Transform;
use crate::dom::{Document, NodeId};
use crate::engine::scheduler::Scheduler;
use crate::net::form::FormOutcome;
use crate::render::compositor::{Compositor, Layer};
use crate::render::layout::{Layout, Viewport};
use crate::view::counter::CounterAnimation;
use crate::view::form::ContactForm;
use crate::view::modal::ModalController;
use crate::view::parallax::{update_hero, update_sections};
use crate::view::pointer::{AmbientMotion, CursorFollower};
use crate::view::registry::PageRegistry;
use crate::view::reveal::{RevealEvent, RevealRole, VisibilityObserver};
use crate::view::sections::{active_section, SectionSpan};
use crate::view::state::ViewState;

/// Deferred work, the equivalent of the page's `setTimeout` calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewTask {
    RevealChild(NodeId),
    CounterTick(NodeId),
    EnableSubmit,
}

/// Something the host has to carry out on the controller's behalf.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewAction {
    /// Scroll the window to this document offset.
    ScrollTo(f32),
    /// Post these fields to the form endpoint and report back through
    /// `finish_submit`.
    SubmitForm(Vec<(String, String)>),
}

pub struct ViewController {
    document: Document,
    layout: Layout,
    config: SiteConfig,
    registry: PageRegistry,
    state: ViewState,
    scheduler: Scheduler<ViewTask>,
    compositor: Compositor,
    observer: VisibilityObserver,
    counters: BTreeMap<NodeId, CounterAnimation>,
    ambient: Option<AmbientMotion>,
    cursor: Option<CursorFollower>,
    modal: ModalController,
    form: Option<ContactForm>,
    rendered_project: Option<&'static str>,
}

impl ViewController {
    pub fn new(
        mut document: Document,
        layout: Layout,
        config: SiteConfig,
        viewport: Viewport,
        now: Instant,
    ) -> Self {
        let registry = PageRegistry::build(&document);

        let mut observer = VisibilityObserver::new();
        for (node, role) in &registry.reveal {
            observer.observe(*node, role.clone());
        }

        let ambient = AmbientMotion::start(
            registry.hero.orbs.iter().map(|o| o.node).collect(),
            viewport,
            config.ambient_min_width,
        );
        let cursor = registry
            .body
            .and_then(|body| CursorFollower::start(&mut document, body, viewport, config.cursor_min_width));

        let form = registry.form.as_ref().map(|slots| {
            let label = slots
                .submit
                .map(|b| document.text_content(b))
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| String::from("Send Message"));
            ContactForm::new(slots.fields.iter().map(|(name, _)| name.clone()), label)
        });

        let mut ctl = Self {
            document,
            layout,
            state: ViewState::new(viewport, &config),
            config,
            registry,
            scheduler: Scheduler::new(),
            compositor: Compositor::new(),
            observer,
            counters: BTreeMap::new(),
            ambient,
            cursor,
            modal: ModalController::new(project_catalog()),
            form,
            rendered_project: None,
        };
        ctl.on_scroll(0.0, now);
        log::info!(
            "view ready: {} sections, ambient {}, cursor {}",
            ctl.registry.sections.len(),
            if ctl.ambient.is_some() { "on" } else { "off" },
            if ctl.cursor.is_some() { "on" } else { "off" },
        );
        ctl
    }

    // ── input ────────────────────────────────────────────────────────────

    pub fn on_scroll(&mut self, offset: f32, now: Instant) {
        let offset = offset.max(0.0);
        self.state.flags = self.state.scroll.update(offset, &self.state.thresholds);
        self.update_active_section();

        if !self.state.parallax_throttle.ready(now) {
            return;
        }
        self.state.parallax_recomputes += 1;
        update_hero(
            &self.registry.hero,
            offset,
            self.state.viewport,
            self.config.hero_fade_distance,
            &mut self.compositor,
        );
        update_sections(
            &self.registry.parallax_sections,
            &self.layout,
            offset,
            self.state.viewport,
            &mut self.compositor,
        );
    }

    /// Breakpoint gating is decided at startup only; resizing never starts
    /// or stops the pointer loops.
    pub fn on_resize(&mut self, viewport: Viewport) {
        self.state.viewport = viewport;
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        self.state.pointer.record(x, y, self.state.viewport);
    }

    /// Pointer entered `target` (or left every element).
    pub fn on_pointer_over(&mut self, target: Option<NodeId>) {
        let interactive = target.is_some_and(|t| self.registry.is_interactive(&self.document, t));
        if let Some(cursor) = &mut self.cursor {
            cursor.set_active(interactive);
        }
    }

    pub fn on_click(&mut self, target: NodeId, now: Instant) -> Option<ViewAction> {
        if let Some(slots) = self.registry.modal {
            if self.modal.is_open() {
                let on_close = slots
                    .close
                    .is_some_and(|c| self.document.is_ancestor_or_self(c, target));
                // Only the backdrop itself dismisses, not the dialog content.
                if target == slots.dialog || on_close {
                    self.modal.close();
                }
                return None;
            }
        }

        if let Some(trigger) = self.document.closest(target, |n| n.attr("data-project").is_some()) {
            if let Some(id) = self.registry.project_triggers.get(&trigger).cloned() {
                self.open_project(&id);
                return None;
            }
        }

        if let Some(h) = self.registry.hamburger {
            if self.document.is_ancestor_or_self(h, target) {
                self.state.menu.toggle();
                return None;
            }
        }

        let link_target = self
            .registry
            .nav_links
            .iter()
            .find(|l| self.document.is_ancestor_or_self(l.node, target))
            .map(|l| l.target.clone());
        if let Some(section_id) = link_target {
            self.state.menu.close();
            return self.scroll_target(&section_id).map(ViewAction::ScrollTo);
        }

        if let Some(btn) = self.registry.scroll_top {
            if self.document.is_ancestor_or_self(btn, target) {
                return Some(ViewAction::ScrollTo(0.0));
            }
        }

        let submit = self.registry.form.as_ref().and_then(|f| f.submit);
        if submit.is_some_and(|s| self.document.is_ancestor_or_self(s, target)) {
            return self.begin_submit(now).map(ViewAction::SubmitForm);
        }
        None
    }

    pub fn on_escape(&mut self) {
        self.modal.close();
    }

    /// Show the project dialog. Unknown ids are logged and ignored.
    pub fn open_project(&mut self, id: &str) -> bool {
        match self.modal.open(id) {
            Ok(detail) => {
                log::debug!("opening project {}", detail.id);
                true
            }
            Err(e) => {
                log::warn!("{}", e);
                false
            }
        }
    }

    pub fn close_project(&mut self) {
        self.modal.close();
    }

    // ── contact form ─────────────────────────────────────────────────────

    pub fn set_field(&mut self, name: &str, value: &str) -> bool {
        self.form.as_mut().is_some_and(|f| f.set_field(name, value))
    }

    /// Lock the submit button and return the payload to post. The button
    /// unlocks on a timer whether or not the request has finished.
    pub fn begin_submit(&mut self, now: Instant) -> Option<Vec<(String, String)>> {
        let payload = self.form.as_mut()?.begin_submit()?;
        self.scheduler
            .schedule_after(now, self.config.submit_reenable(), ViewTask::EnableSubmit);
        Some(payload)
    }

    pub fn finish_submit(&mut self, outcome: &FormOutcome) {
        if let Some(form) = &mut self.form {
            form.finish(outcome);
        }
    }

    // ── frame ────────────────────────────────────────────────────────────

    pub fn frame(&mut self, now: Instant) {
        self.state.frames += 1;

        let events = self
            .observer
            .check(&self.layout, self.state.scroll.offset, self.state.viewport);
        for event in events {
            self.handle_reveal(event, now);
        }

        self.run_timers(now);

        let smoothing = self.config.smoothing;
        if let Some(ambient) = &mut self.ambient {
            for (node, t) in ambient.step(self.state.pointer.normalized, smoothing) {
                self.compositor.set_transform(node, Layer::Ambient, t);
            }
        }
        if let Some(cursor) = &mut self.cursor {
            for (node, t) in cursor.step(&self.state.pointer, smoothing) {
                self.compositor.set_transform(node, Layer::Ambient, t);
            }
        }

        self.render();
    }

    fn handle_reveal(&mut self, event: RevealEvent, now: Instant) {
        match event.role {
            RevealRole::Plain => {}
            RevealRole::Stats => self.start_counters(now),
            RevealRole::Stagger(children) => {
                let step = self.config.stagger_step();
                for (i, child) in children.into_iter().enumerate() {
                    self.scheduler
                        .schedule_after(now, step * i as u32, ViewTask::RevealChild(child));
                }
            }
        }
    }

    fn start_counters(&mut self, now: Instant) {
        let duration = self.config.counter_duration();
        let tick = self.config.counter_tick();
        for &node in &self.registry.stat_numbers {
            if self.counters.contains_key(&node) {
                continue;
            }
            let text = self.document.text_content(node);
            match CounterAnimation::from_text(node, &text, duration, tick) {
                Some(mut counter) => {
                    counter.start();
                    self.counters.insert(node, counter);
                    self.scheduler
                        .schedule_after(now, tick, ViewTask::CounterTick(node));
                }
                None => log::warn!("stat {:?} has no numeric value: {:?}", node, text),
            }
        }
    }

    fn run_timers(&mut self, now: Instant) {
        let tick = self.config.counter_tick();
        while let Some((due, task)) = self.scheduler.pop_due(now) {
            match task {
                ViewTask::RevealChild(node) => {
                    self.observer.reveal(node);
                }
                ViewTask::CounterTick(node) => {
                    if let Some(counter) = self.counters.get_mut(&node) {
                        if counter.tick() {
                            self.scheduler.schedule_at(due + tick, ViewTask::CounterTick(node));
                        }
                    }
                }
                ViewTask::EnableSubmit => {
                    if let Some(form) = &mut self.form {
                        form.reenable();
                    }
                }
            }
        }
    }

    fn render(&mut self) {
        let doc = &mut self.document;
        let flags = self.state.flags;

        if let Some(nav) = self.registry.navbar {
            doc.set_class(nav, "scrolled", flags.nav_scrolled);
            let t = if flags.nav_hidden {
                Transform::TranslateYPercent(-100.0)
            } else {
                Transform::IDENTITY
            };
            self.compositor.set_transform(nav, Layer::Scroll, t);
        }
        if let Some(btn) = self.registry.scroll_top {
            doc.set_class(btn, "visible", flags.back_to_top_visible);
        }

        let active_id = self
            .state
            .active_section
            .and_then(|i| self.registry.sections.get(i))
            .map(|s| s.html_id.as_str());
        for link in &self.registry.nav_links {
            doc.set_class(link.node, "active", Some(link.target.as_str()) == active_id);
        }

        let menu_open = self.state.menu.is_open();
        for node in [self.registry.nav_menu, self.registry.hamburger].into_iter().flatten() {
            doc.set_class(node, "active", menu_open);
        }

        for node in self.observer.revealed() {
            doc.add_class(node, "visible");
        }

        for counter in self.counters.values() {
            let text = counter.display();
            if doc.text_content(counter.node) != text {
                write_text(doc, &mut self.layout, counter.node, &text);
            }
        }

        if let Some(slots) = self.registry.modal {
            let selection = self.modal.selection();
            doc.set_class(slots.dialog, "active", selection.is_some());
            match selection {
                Some(detail) if self.rendered_project != Some(detail.id) => {
                    for (slot, text) in [
                        (slots.title, detail.title),
                        (slots.description, detail.description),
                        (slots.tech, detail.tech_summary),
                    ] {
                        if let Some(slot) = slot {
                            write_text(doc, &mut self.layout, slot, text);
                        }
                    }
                    self.rendered_project = Some(detail.id);
                }
                Some(_) => {}
                None => self.rendered_project = None,
            }
        }

        if let Some(cursor) = &self.cursor {
            doc.set_class(cursor.ring, "active", cursor.is_active());
            doc.set_class(cursor.dot, "active", cursor.is_active());
        }

        if let (Some(slots), Some(form)) = (&self.registry.form, &self.form) {
            for (name, node) in &slots.fields {
                let value = form.field(name).unwrap_or_default();
                if doc.node(*node).tag == "textarea" {
                    if doc.text_content(*node) != value {
                        write_text(doc, &mut self.layout, *node, value);
                    }
                } else {
                    doc.set_attr(*node, "value", value);
                }
            }
            if let Some(submit) = slots.submit {
                if doc.text_content(submit) != form.button_label() {
                    write_text(doc, &mut self.layout, submit, form.button_label());
                }
                if form.button_disabled() {
                    doc.set_attr(submit, "disabled", "");
                } else {
                    doc.remove_attr(submit, "disabled");
                }
            }
            if let (Some(status), Some(text)) = (slots.status, form.status()) {
                if doc.text_content(status) != text {
                    write_text(doc, &mut self.layout, status, text);
                }
            }
        }

        self.compositor.flush(doc);
    }

    // ── geometry ─────────────────────────────────────────────────────────

    fn update_active_section(&mut self) {
        let spans: Vec<SectionSpan> = self
            .registry
            .sections
            .iter()
            .map(|s| {
                let b = self.layout.get(s.node);
                SectionSpan::new(b.y, b.height)
            })
            .collect();
        self.state.active_section = active_section(
            self.state.scroll.offset,
            self.config.section_probe_offset,
            &spans,
        );
    }

    fn scroll_target(&self, section_id: &str) -> Option<f32> {
        let index = self.registry.section_index(section_id)?;
        let top = self.layout.get(self.registry.sections[index].node).y;
        Some((top - self.config.navbar_height).max(0.0))
    }

    /// Replace the geometry (e.g. after the host re-measured the page).
    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
        self.update_active_section();
    }

    // ── accessors ────────────────────────────────────────────────────────

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn registry(&self) -> &PageRegistry {
        &self.registry
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    pub fn modal(&self) -> &ModalController {
        &self.modal
    }

    pub fn form(&self) -> Option<&ContactForm> {
        self.form.as_ref()
    }

    pub fn counter(&self, node: NodeId) -> Option<&CounterAnimation> {
        self.counters.get(&node)
    }

    pub fn observer(&self) -> &VisibilityObserver {
        &self.observer
    }

    pub fn ambient(&self) -> Option<&AmbientMotion> {
        self.ambient.as_ref()
    }

    pub fn cursor(&self) -> Option<&CursorFollower> {
        self.cursor.as_ref()
    }

    pub fn active_section_id(&self) -> Option<&str> {
        self.state
            .active_section
            .and_then(|i| self.registry.sections.get(i))
            .map(|s| s.html_id.as_str())
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.len()
    }
}

/// Write an element's text. A text node that has no geometry yet takes its
/// parent's box so the host can paint it in place until the next relayout.
fn write_text(doc: &mut Document, layout: &mut Layout, node: NodeId, text: &str) {
    let text_node = doc.set_text(node, text);
    if layout.get(text_node).height <= 0.0 {
        layout.set_box(text_node, layout.get(node));
    }
}
