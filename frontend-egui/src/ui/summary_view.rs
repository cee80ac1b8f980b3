//! Summary panel: keep/delete dot grid, totals and the Continue button.

use backend::{CellMark, DisplayLines, GridCell, SummaryScreen, SummaryView, GRID_SIDE};
use eframe::egui;

const BRAND_GREEN: egui::Color32 = egui::Color32::from_rgb(52, 199, 89);
const BRAND_RED: egui::Color32 = egui::Color32::from_rgb(200, 40, 40);

const DOT_SPACING: f32 = 8.0;
const TEXT_SIZE: f32 = 18.0;

pub struct SummaryPanel {
    max_width: f32,
    fading: bool,
}

impl SummaryPanel {
    pub fn new(max_width: f32) -> Self {
        Self {
            max_width,
            fading: false,
        }
    }

    pub fn is_fading(&self) -> bool {
        self.fading
    }

    pub fn show(&mut self, ui: &mut egui::Ui, screen: &mut SummaryScreen) {
        let (grid, lines, opacity) = match screen.view() {
            SummaryView::Hidden => {
                self.fading = false;
                return;
            }
            SummaryView::Visible {
                grid,
                lines,
                opacity,
                ..
            } => (grid, lines, opacity),
        };
        self.fading = opacity < 1.0;

        let mut continue_clicked = false;
        ui.vertical_centered(|ui| {
            ui.set_max_width(self.max_width);
            ui.add_space(40.0);

            dot_grid(ui, grid, opacity);
            ui.add_space(20.0);
            totals(ui, lines, opacity);
            ui.add_space(20.0);

            let button = egui::Button::new(
                egui::RichText::new("Continue")
                    .size(16.0)
                    .strong()
                    .color(egui::Color32::BLACK.gamma_multiply(opacity)),
            )
            .fill(BRAND_GREEN.gamma_multiply(opacity))
            .rounding(8.0)
            .min_size(egui::vec2(ui.available_width(), 44.0));

            continue_clicked = ui.add(button).clicked();
        });

        if continue_clicked {
            screen.tap_continue();
        }
    }
}

fn dot_grid(ui: &mut egui::Ui, grid: &[GridCell], opacity: f32) {
    let gaps = DOT_SPACING * (GRID_SIDE - 1) as f32;
    let diameter = ((ui.available_width() - gaps) / GRID_SIDE as f32).clamp(4.0, 36.0);

    for row in grid.chunks(GRID_SIDE) {
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = DOT_SPACING;
            for cell in row {
                let (rect, _) =
                    ui.allocate_exact_size(egui::vec2(diameter, diameter), egui::Sense::hover());
                let color = match cell.mark {
                    CellMark::Kept => BRAND_GREEN,
                    CellMark::Deleted => BRAND_RED,
                };
                ui.painter()
                    .circle_filled(rect.center(), diameter / 2.0, color.gamma_multiply(opacity));
            }
        });
    }
}

fn totals(ui: &mut egui::Ui, lines: &DisplayLines, opacity: f32) {
    let text = egui::Color32::WHITE.gamma_multiply(opacity);

    ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| {
        for line in [&lines.kept, &lines.deleted, &lines.saved] {
            ui.label(egui::RichText::new(line).size(TEXT_SIZE).strong().color(text));
        }
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("★").size(TEXT_SIZE).color(text));
            ui.label(egui::RichText::new(&lines.score).size(TEXT_SIZE).color(text));
        });
    });
}
