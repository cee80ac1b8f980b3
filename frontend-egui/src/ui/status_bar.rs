//! Status bar showing the stats source and refresh state.

use backend::SummaryScreen;
use eframe::egui;
use std::path::Path;

pub struct StatusBar;

impl StatusBar {
    pub fn show(ui: &mut egui::Ui, screen: &SummaryScreen, stats_path: &Path) {
        ui.separator();
        ui.horizontal(|ui| {
            ui.label(format!("Source: {}", stats_path.display()));

            ui.separator();
            ui.label(format!("Kept: {}%", screen.stats().kept_percentage()));

            if screen.is_refreshing() {
                ui.separator();
                ui.spinner();
                ui.label("Refreshing...");
            }
        });
    }
}
