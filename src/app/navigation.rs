//! Navigation methods for `FolioApp`.
//!
//! Covers the asynchronous page-fetch lifecycle (`reload`, `check_fetch`),
//! window scrolling, and the background form submission.

use std::sync::mpsc;
use std::time::Instant;

use eframe::egui;

use folio_view::net::form::{FormClient, FormOutcome};
use folio_view::view::ViewAction;

use super::FolioApp;
use crate::ui::reveal_targets;

impl FolioApp {
    /// Start an async page fetch for the current source.
    pub fn reload(&mut self, ctx: &egui::Context) {
        if self.loading {
            return;
        }
        self.loading = true;
        self.error = None;

        let (tx, rx) = mpsc::channel();
        self.fetch_rx = Some(rx);

        let loader = self.loader.clone();
        let source = self.source.clone();
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let _ = tx.send(loader.fetch(&source));
            ctx.request_repaint();
        });
    }

    /// Poll the fetch channel and build the controller when markup arrives.
    pub fn check_fetch(&mut self, now: Instant) {
        let Some(rx) = &self.fetch_rx else {
            return;
        };
        let Ok(result) = rx.try_recv() else {
            return;
        };
        match result {
            Ok(page) => {
                self.loader.set_viewport(self.viewport);
                let view = self.loader.process_html(&page.html, &page.url, now);
                self.reveal_targets = reveal_targets(view.registry());
                self.scroll = 0.0;
                log::info!("loaded {} ({})", page.url, view.document().title);
                self.view = Some(view);
                self.error = None;
            }
            Err(e) => {
                log::error!("load failed: {}", e);
                self.error = Some(e.to_string());
                self.view = None;
            }
        }
        self.loading = false;
        self.fetch_rx = None;
    }

    /// Largest scroll offset that still fills the window.
    pub fn max_scroll(&self) -> f32 {
        self.view
            .as_ref()
            .map(|v| (v.layout().document_height() - self.viewport.height).max(0.0))
            .unwrap_or(0.0)
    }

    pub fn scroll_to(&mut self, offset: f32, now: Instant) {
        self.scroll = offset.clamp(0.0, self.max_scroll());
        if let Some(view) = &mut self.view {
            view.on_scroll(self.scroll, now);
        }
    }

    pub fn scroll_by(&mut self, delta: f32, now: Instant) {
        self.scroll_to(self.scroll + delta, now);
    }

    pub fn handle_action(&mut self, action: ViewAction, ctx: &egui::Context, now: Instant) {
        match action {
            ViewAction::ScrollTo(y) => self.scroll_to(y, now),
            ViewAction::SubmitForm(fields) => self.submit(fields, ctx),
        }
    }

    /// Post the form on a worker thread; the outcome comes back through
    /// `check_submit`.
    fn submit(&mut self, fields: Vec<(String, String)>, ctx: &egui::Context) {
        let endpoint = self.loader.config().form_endpoint.clone();
        let (tx, rx) = mpsc::channel();
        self.submit_rx = Some(rx);
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let outcome = match FormClient::http(endpoint) {
                Ok(client) => client.submit(&fields),
                Err(e) => {
                    log::error!("form client unavailable: {}", e);
                    FormOutcome::failure()
                }
            };
            let _ = tx.send(outcome);
            ctx.request_repaint();
        });
    }

    pub fn check_submit(&mut self) {
        let Some(rx) = &self.submit_rx else {
            return;
        };
        if let Ok(outcome) = rx.try_recv() {
            if let Some(view) = &mut self.view {
                view.finish_submit(&outcome);
            }
            self.submit_rx = None;
        }
    }
}
