use eframe::egui::{self, ScrollArea, Ui};

use crate::cli::Cli;
use crate::state::AppState;
use crate::ui::{card, panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct MovieDashboardApp {
    pub state: AppState,
}

impl MovieDashboardApp {
    /// Build the app and load the start-up dataset named on the command line.
    pub fn new(config: Cli) -> Self {
        let mut state = AppState::new(config);
        let path = state.config.data.clone();
        state.open(&path);
        Self { state }
    }
}

impl eframe::App for MovieDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: detail card and charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dataset.is_none() {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading("Open a movie table to start  (File → Open…)");
                });
                return;
            }
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    panels::title_banner(ui);
                    ui.add_space(8.0);
                    card::detail_card(ui, &self.state);
                    plot::chart_grid(ui, &self.state);
                });
        });
    }
}
