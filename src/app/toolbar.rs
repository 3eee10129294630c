//! Toolbar rendering for `FolioApp`.
//!
//! Shows the page source, a reload button, the active section, and the
//! stats toggle.

use eframe::egui;
use folio_view::engine::pipeline::PageSource;

use super::FolioApp;

impl FolioApp {
    /// Render the top toolbar strip.
    pub fn draw_toolbar(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.horizontal(|ui| {
            ui.add_space(4.0);

            let source = match &self.source {
                PageSource::Bundled => String::from("bundled portfolio"),
                PageSource::File(path) => path.display().to_string(),
                PageSource::Url(url) => url.clone(),
            };
            ui.label(egui::RichText::new(source).monospace());

            if ui
                .add_enabled(!self.loading, egui::Button::new("\u{21BB} Reload"))
                .clicked()
            {
                self.reload(ctx);
            }
            if self.loading {
                ui.spinner();
            }

            ui.separator();

            if let Some(view) = &self.view {
                let section = view.active_section_id().unwrap_or("-");
                ui.label(format!("#{}", section));
                ui.label(format!("{:.0}px", self.scroll));
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.toggle_value(&mut self.show_stats, "Stats");
            });
        });
    }
}
