//! `FolioApp`, the top-level egui application state.
//!
//! This module declares the `FolioApp` struct and its `eframe::App` impl.
//! All other methods are split across the sibling sub-modules:
//!
//! - `navigation` : page loading, scrolling, async form submission
//! - `toolbar`    : status strip and controls
//! - `content`    : page canvas, input routing, modal and form widgets

pub mod content;
pub mod navigation;
pub mod toolbar;

use std::collections::HashSet;
use std::sync::mpsc;
use std::time::Instant;

use eframe::egui;

use folio_view::dom::NodeId;
use folio_view::engine::pipeline::{PageLoader, PageSource};
use folio_view::error::Result;
use folio_view::net::fetch::FetchResult;
use folio_view::net::form::FormOutcome;
use folio_view::render::layout::Viewport;
use folio_view::view::ViewController;

// ─── Application state ───────────────────────────────────────────────────────

pub struct FolioApp {
    pub loader: PageLoader,
    pub source: PageSource,
    pub view: Option<ViewController>,
    pub error: Option<String>,
    pub loading: bool,
    pub fetch_rx: Option<mpsc::Receiver<Result<FetchResult>>>,
    pub submit_rx: Option<mpsc::Receiver<FormOutcome>>,
    /// Window scroll offset; the controller only ever sees it via `on_scroll`.
    pub scroll: f32,
    pub viewport: Viewport,
    pub reveal_targets: HashSet<NodeId>,
    pub show_stats: bool,
}

impl FolioApp {
    pub fn new(loader: PageLoader, source: PageSource, ctx: &egui::Context) -> Self {
        let viewport = loader.viewport();
        let mut app = Self {
            loader,
            source,
            view: None,
            error: None,
            loading: false,
            fetch_rx: None,
            submit_rx: None,
            scroll: 0.0,
            viewport,
            reveal_targets: HashSet::new(),
            show_stats: false,
        };
        app.reload(ctx);
        app
    }
}

impl eframe::App for FolioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.check_fetch(now);
        self.check_submit();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui, ctx);
        });

        if self.show_stats {
            egui::SidePanel::right("stats").show(ctx, |ui| self.draw_stats_panel(ui));
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(crate::ui::BG))
            .show(ctx, |ui| self.draw_content(ui, ctx, now));

        self.draw_modal(ctx, now);

        // Timers, counters and pointer smoothing all advance per frame.
        ctx.request_repaint();
    }
}
