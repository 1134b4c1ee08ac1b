use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::ACCENT;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    // ---- Logo (centered) ----
    if state.config.logo.is_file() {
        let uri = format!("file://{}", state.config.logo.display());
        ui.vertical_centered(|ui: &mut Ui| {
            ui.add(
                egui::Image::new(uri)
                    .max_width(ui.available_width() * 0.8)
                    .max_height(120.0)
                    .corner_radius(4.0),
            );
        });
        ui.add_space(4.0);
    }

    ui.heading("Filters");
    ui.separator();

    let Some(mut criteria) = state.criteria.clone() else {
        ui.label("No dataset loaded.");
        return;
    };
    let Some(dataset) = state.dataset.clone() else {
        return;
    };
    let (year_lo, year_hi) = dataset.year_bounds().unwrap_or((criteria.year_min, criteria.year_max));
    let (rating_lo, rating_hi) = dataset
        .rating_bounds()
        .unwrap_or((criteria.rating_min, criteria.rating_max));

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Genre ----
            ui.strong("Genre");
            egui::ComboBox::from_id_salt("genre_filter")
                .selected_text(&criteria.genre)
                .width(ui.available_width())
                .show_ui(ui, |ui: &mut Ui| {
                    for genre in &state.genres {
                        let text = RichText::new(genre).color(state.genre_colors.color_for(genre));
                        ui.selectable_value(&mut criteria.genre, genre.clone(), text);
                    }
                });
            ui.add_space(8.0);

            // ---- Year range ----
            ui.strong("Year");
            ui.add(egui::Slider::new(&mut criteria.year_min, year_lo..=year_hi).text("from"));
            ui.add(egui::Slider::new(&mut criteria.year_max, year_lo..=year_hi).text("to"));
            if criteria.year_min > criteria.year_max {
                std::mem::swap(&mut criteria.year_min, &mut criteria.year_max);
            }
            ui.add_space(8.0);

            // ---- Rating range ----
            ui.strong("Rating");
            ui.add(
                egui::Slider::new(&mut criteria.rating_min, rating_lo..=rating_hi)
                    .text("from")
                    .fixed_decimals(1),
            );
            ui.add(
                egui::Slider::new(&mut criteria.rating_max, rating_lo..=rating_hi)
                    .text("to")
                    .fixed_decimals(1),
            );
            if criteria.rating_min > criteria.rating_max {
                std::mem::swap(&mut criteria.rating_min, &mut criteria.rating_max);
            }
            criteria.snap_ratings(rating_lo, rating_hi);

            // Recompute visible rows when anything above changed.
            state.set_criteria(criteria);

            ui.separator();

            // ---- Title ----
            ui.strong("Title");
            if state.titles.is_empty() {
                ui.label(RichText::new("No titles match these filters.").italics());
                return;
            }
            let current = state.selected_title.clone().unwrap_or_default();
            let mut picked = None;
            egui::ComboBox::from_id_salt("title_select")
                .selected_text(&current)
                .width(ui.available_width())
                .show_ui(ui, |ui: &mut Ui| {
                    for title in &state.titles {
                        if ui.selectable_label(current == *title, title).clicked() {
                            picked = Some(title.clone());
                        }
                    }
                });
            if let Some(title) = picked {
                state.select_title(&title);
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = !state.visible_indices.is_empty();
            if ui
                .add_enabled(can_export, egui::Button::new("Export filtered view…"))
                .clicked()
            {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            let source = state.source_name().unwrap_or_default();
            ui.label(format!(
                "{source}: {} titles loaded, {} visible",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

/// Large page heading above the dashboard.
pub fn title_banner(ui: &mut Ui) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(
            RichText::new("Movie Dashboard")
                .size(32.0)
                .strong()
                .color(ACCENT),
        );
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open movie table")
        .add_filter("Supported files", &["csv", "tsv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv", "tsv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export filtered view")
        .add_filter("CSV", &["csv"])
        .set_file_name("filtered_movies.csv")
        .save_file();

    if let Some(path) = file {
        match state.export_view(&path) {
            Ok(n) => {
                log::info!("Exported {n} titles to {}", path.display());
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Export failed: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
