//! Header component with title, summary toggle and refresh.

use eframe::egui;

pub struct Header {
    pub show_summary: bool,
}

impl Header {
    pub fn new(show_summary: bool) -> Self {
        Self { show_summary }
    }

    /// Returns true when a refresh was requested.
    pub fn show(&mut self, ui: &mut egui::Ui) -> bool {
        let mut refresh_requested = false;

        ui.horizontal(|ui| {
            ui.heading("swiped.");

            ui.add_space(20.0);
            ui.checkbox(&mut self.show_summary, "Show summary");

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let refresh = ui.add_enabled(self.show_summary, egui::Button::new("Refresh"));
                if refresh
                    .on_hover_text("Re-read kept, deleted, saved and score from the stats file.")
                    .clicked()
                {
                    refresh_requested = true;
                }
            });
        });

        refresh_requested
    }
}
