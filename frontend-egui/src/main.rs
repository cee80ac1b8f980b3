use backend::{SnapshotFileStore, StatsStore, SummaryEvent, SummaryScreen};
use config::AppConfig;
use eframe::{egui, App};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::header::Header;
use ui::status_bar::StatusBar;
use ui::summary_view::SummaryPanel;

mod config;
mod ui;

#[tokio::main]
async fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("swiped_egui=info,backend=info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::load();
    info!(stats = %config.stats_path.display(), "starting swiped summary");

    let runtime = Handle::current();
    let native_options = eframe::NativeOptions::default();
    eframe::run_native(
        "swiped.",
        native_options,
        Box::new(move |cc| {
            // Global black theme
            let mut visuals = egui::Visuals::dark();
            visuals.override_text_color = Some(egui::Color32::WHITE);
            visuals.panel_fill = egui::Color32::BLACK;
            visuals.window_fill = egui::Color32::BLACK;
            cc.egui_ctx.set_visuals(visuals);

            let mut style = (*cc.egui_ctx.style()).clone();
            style.spacing.item_spacing = egui::vec2(10.0, 10.0);
            style.spacing.button_padding = egui::vec2(12.0, 8.0);
            cc.egui_ctx.set_style(style);

            Box::new(SummaryApp::new(config, runtime))
        }),
    )
}

struct SummaryApp {
    runtime: Handle,
    store: Arc<dyn StatsStore>,
    screen: SummaryScreen,
    events: UnboundedReceiver<SummaryEvent>,
    header: Header,
    panel: SummaryPanel,
    config: AppConfig,
}

impl SummaryApp {
    fn new(config: AppConfig, runtime: Handle) -> Self {
        let (tx, events) = mpsc::unbounded_channel();
        let store: Arc<dyn StatsStore> = Arc::new(SnapshotFileStore::new(&config.stats_path));
        let mut screen = SummaryScreen::new(tx).with_fade_in(config.fade_in());
        screen.set_summary_visible(config.start_visible, &runtime, Arc::clone(&store));

        Self {
            runtime,
            store,
            screen,
            events,
            header: Header::new(config.start_visible),
            panel: SummaryPanel::new(config.max_width),
            config,
        }
    }

    fn handle_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                // Continuing leaves the summary; the swipe deck would take over here.
                SummaryEvent::ContinueTapped => self.header.show_summary = false,
            }
        }
    }
}

impl App for SummaryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.screen.poll();

        egui::CentralPanel::default().show(ctx, |ui| {
            let refresh_requested = self.header.show(ui);
            ui.add_space(6.0);

            if refresh_requested {
                self.screen.hide();
            }
            self.screen.set_summary_visible(
                self.header.show_summary,
                &self.runtime,
                Arc::clone(&self.store),
            );

            self.panel.show(ui, &mut self.screen);

            ui.add_space(6.0);
            StatusBar::show(ui, &self.screen, &self.config.stats_path);
        });

        self.handle_events();

        // Keep frames coming while a refresh is pending or the fade is running.
        if self.screen.is_refreshing() || self.panel.is_fading() {
            ctx.request_repaint_after(Duration::from_millis(16));
        }
    }
}
