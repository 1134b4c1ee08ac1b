use eframe::egui::{self, RichText, Ui};

use crate::color::ACCENT;
use crate::state::AppState;

/// Render the selected-title card: key facts, description and rating rank.
pub fn detail_card(ui: &mut Ui, state: &AppState) {
    ui.heading("Selected title");

    let Some(selection) = &state.selection else {
        ui.label(RichText::new("No title matches the current filters.").italics());
        ui.separator();
        return;
    };
    let record = &selection.record;

    ui.columns(4, |cols: &mut [Ui]| {
        metric(&mut cols[0], "Title", &record.title);
        metric(&mut cols[1], "Year", &record.year.to_string());
        metric(&mut cols[2], "Genre", record.genre_label());
        let rating = record
            .rating
            .map(|r| format!("{r:.1}"))
            .unwrap_or_else(|| "–".to_string());
        metric(&mut cols[3], "Rating", &rating);
    });

    ui.add_space(12.0);
    ui.horizontal_top(|ui: &mut Ui| {
        let desc_width = ui.available_width() * 0.75;
        ui.allocate_ui(egui::vec2(desc_width, 0.0), |ui: &mut Ui| {
            ui.vertical(|ui: &mut Ui| {
                ui.strong("Description");
                if record.description.trim().is_empty() {
                    ui.label(RichText::new("No description available.").italics());
                } else {
                    ui.label(record.description.trim());
                }
            });
        });
        ui.add_space(24.0);
        let rank = match &selection.rank {
            Ok(rank) => format!("#{rank} of {}", state.visible_indices.len()),
            Err(_) => "–".to_string(),
        };
        ui.vertical(|ui: &mut Ui| metric(ui, "Rating rank", &rank));
    });

    ui.separator();
}

fn metric(ui: &mut Ui, label: &str, value: &str) {
    ui.label(RichText::new(label).small().weak());
    ui.label(RichText::new(value).size(22.0).strong().color(ACCENT));
}
