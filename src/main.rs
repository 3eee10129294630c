//! Desktop viewer for the portfolio page.
//!
//! Loads the page (bundled, a local file or a URL), lays it out, and drives
//! the view controller from egui input every frame.

mod app;
mod ui;

use std::path::PathBuf;

use clap::Parser;
use eframe::egui;

use folio_view::config::SiteConfig;
use folio_view::engine::pipeline::{PageLoader, PageSource};
use folio_view::render::layout::Viewport;

use crate::app::FolioApp;

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), version, about = "Portfolio page viewer")]
struct Cli {
    /// Page to open: a local HTML file or a URL. Defaults to the bundled page.
    page: Option<String>,

    /// JSON file overriding the default site settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial window width.
    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    /// Initial window height.
    #[arg(long, default_value_t = 800.0)]
    height: f32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SiteConfig::load(path)?,
        None => SiteConfig::default(),
    };
    let source = PageSource::from_arg(cli.page.as_deref());
    log::info!("opening {:?}", source);

    let loader = PageLoader::new(config, Viewport::new(cli.width, cli.height));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([cli.width, cli.height]),
        ..Default::default()
    };

    eframe::run_native(
        "Folio View",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(FolioApp::new(loader, source, &cc.egui_ctx)))
        }),
    )?;
    Ok(())
}
