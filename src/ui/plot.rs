use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use eframe::egui::{RichText, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Legend, Line, Plot, PlotPoints,
    Points,
};

use crate::color::{red_shades, GenreColors, ACCENT};
use crate::data::aggregate::{BoxStats, YearGenreCount};
use crate::data::model::MovieRecord;
use crate::state::{AppState, CatalogueCharts, ViewCharts};

const CHART_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Chart grid (central panel)
// ---------------------------------------------------------------------------

/// Render the six dashboard charts, two per row, each with a one-line caption.
pub fn chart_grid(ui: &mut Ui, state: &AppState) {
    let view = &state.view_charts;
    let cat = &state.catalogue;
    let colors = &state.genre_colors;

    ui.columns(2, |cols: &mut [Ui]| {
        chart_block(&mut cols[0], "Top voted", votes_caption(view), |ui| {
            top_votes_chart(ui, &view.top_votes, colors)
        });
        chart_block(&mut cols[1], "Best rated", rating_caption(view), |ui| {
            top_rated_chart(ui, &view.top_rated)
        });
    });
    ui.separator();
    ui.columns(2, |cols: &mut [Ui]| {
        chart_block(&mut cols[0], "Genres with most titles", genre_count_caption(cat), |ui| {
            top_genres_chart(ui, &cat.top_genres, colors)
        });
        chart_block(&mut cols[1], "Rating distribution by genre", genre_mode_caption(cat), |ui| {
            rating_box_chart(ui, &cat.rating_by_genre)
        });
    });
    ui.separator();
    ui.columns(2, |cols: &mut [Ui]| {
        chart_block(&mut cols[0], "Votes vs rating", scatter_caption(view), |ui| {
            votes_vs_rating_chart(ui, &view.votes_vs_rating)
        });
        chart_block(&mut cols[1], "Genre popularity over time", popularity_caption(cat), |ui| {
            popularity_chart(ui, &cat.popularity, colors)
        });
    });
}

/// Heading, chart and caption; a placeholder replaces both when there is no data.
fn chart_block(ui: &mut Ui, title: &str, caption: Option<String>, draw: impl FnOnce(&mut Ui)) {
    ui.label(RichText::new(title).strong().size(16.0));
    match caption {
        Some(text) => {
            draw(ui);
            ui.label(text);
        }
        None => {
            ui.add_space(CHART_HEIGHT / 2.0);
            ui.vertical_centered(|ui: &mut Ui| {
                ui.label(RichText::new("No data for the current filters").italics());
            });
            ui.add_space(CHART_HEIGHT / 2.0);
        }
    }
}

/// Axis formatter showing `labels[i]` at integer position `i`.
fn category_axis(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark, _range| {
        let i = mark.value.round();
        if (mark.value - i).abs() > 1e-6 || i < 0.0 {
            return String::new();
        }
        labels.get(i as usize).map(|l| shorten(l, 14)).unwrap_or_default()
    }
}

fn shorten(label: &str, max: usize) -> String {
    if label.chars().count() <= max {
        label.to_string()
    } else {
        let head: String = label.chars().take(max - 1).collect();
        format!("{head}…")
    }
}

fn base_plot(id: &str) -> Plot<'static> {
    Plot::new(id)
        .height(CHART_HEIGHT)
        .allow_scroll(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
}

// ---------------------------------------------------------------------------
// Individual charts
// ---------------------------------------------------------------------------

fn top_votes_chart(ui: &mut Ui, rows: &[MovieRecord], colors: &GenreColors) {
    let bars = rows
        .iter()
        .enumerate()
        .map(|(i, r)| {
            Bar::new(i as f64, r.votes as f64)
                .name(&r.title)
                .fill(colors.color_for(r.genre_label()))
                .width(0.7)
        })
        .collect();
    let labels = rows.iter().map(|r| r.title.clone()).collect();

    base_plot("top_votes")
        .x_axis_formatter(category_axis(labels))
        .y_axis_label("Votes")
        .show(ui, |plot_ui| plot_ui.bar_chart(BarChart::new(bars).name("Votes")));
}

fn top_rated_chart(ui: &mut Ui, rows: &[MovieRecord]) {
    let shades = red_shades(rows.len());
    let bars = rows
        .iter()
        .zip(shades)
        .enumerate()
        .map(|(i, (r, color))| {
            Bar::new(i as f64, r.rating.unwrap_or_default())
                .name(&r.title)
                .fill(color)
                .width(0.7)
        })
        .collect();
    let labels = rows.iter().map(|r| r.title.clone()).collect();

    base_plot("top_rated")
        .x_axis_formatter(category_axis(labels))
        .y_axis_label("Rating")
        .show(ui, |plot_ui| plot_ui.bar_chart(BarChart::new(bars).name("Rating")));
}

fn top_genres_chart(ui: &mut Ui, counts: &[(String, usize)], colors: &GenreColors) {
    let bars = counts
        .iter()
        .enumerate()
        .map(|(i, (genre, count))| {
            Bar::new(i as f64, *count as f64)
                .name(genre)
                .fill(colors.color_for(genre))
                .width(0.7)
        })
        .collect();
    let labels = counts.iter().map(|(g, _)| g.clone()).collect();

    base_plot("top_genres")
        .x_axis_formatter(category_axis(labels))
        .y_axis_label("Titles")
        .show(ui, |plot_ui| plot_ui.bar_chart(BarChart::new(bars).name("Titles")));
}

fn rating_box_chart(ui: &mut Ui, groups: &[(String, BoxStats)]) {
    let boxes = groups
        .iter()
        .enumerate()
        .map(|(i, (genre, s))| {
            BoxElem::new(i as f64, BoxSpread::new(s.min, s.q1, s.median, s.q3, s.max))
                .name(genre)
                .box_width(0.6)
                .fill(ACCENT.gamma_multiply(0.4))
                .stroke(Stroke::new(1.5, ACCENT))
        })
        .collect();
    let labels = groups.iter().map(|(g, _)| g.clone()).collect();

    base_plot("rating_by_genre")
        .x_axis_formatter(category_axis(labels))
        .y_axis_label("Rating")
        .show(ui, |plot_ui| plot_ui.box_plot(BoxPlot::new(boxes).name("Rating")));
}

fn votes_vs_rating_chart(ui: &mut Ui, points: &[(f64, f64, String)]) {
    let series: PlotPoints = points.iter().map(|(v, r, _)| [*v, *r]).collect();

    base_plot("votes_vs_rating")
        .x_axis_label("Votes")
        .y_axis_label("Rating")
        .label_formatter(|_name, value| format!("votes: {:.0}\nrating: {:.1}", value.x, value.y))
        .show(ui, |plot_ui| {
            plot_ui.points(Points::new(series).radius(3.0).color(ACCENT).name("Titles"))
        });
}

fn popularity_chart(ui: &mut Ui, rows: &[YearGenreCount], colors: &GenreColors) {
    let mut series: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for row in rows {
        series
            .entry(row.genre.as_str())
            .or_default()
            .push([row.year as f64, row.count as f64]);
    }

    base_plot("genre_popularity")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Titles")
        .show(ui, |plot_ui| {
            for (genre, points) in series {
                let line = Line::new(PlotPoints::from(points))
                    .name(genre)
                    .color(colors.color_for(genre))
                    .width(1.5);
                plot_ui.line(line);
            }
        });
}

// ---------------------------------------------------------------------------
// Captions
// ---------------------------------------------------------------------------

fn votes_caption(view: &ViewCharts) -> Option<String> {
    let lead = view.top_votes.first()?;
    Some(format!("'{}' leads with {} votes.", lead.title, lead.votes))
}

fn rating_caption(view: &ViewCharts) -> Option<String> {
    let lead = view.top_rated.first()?;
    Some(format!(
        "'{}' has the highest rating at {:.1}.",
        lead.title,
        lead.rating?
    ))
}

fn genre_count_caption(cat: &CatalogueCharts) -> Option<String> {
    let (genre, count) = cat.top_genres.first()?;
    Some(format!("'{genre}' leads with {count} titles."))
}

fn genre_mode_caption(cat: &CatalogueCharts) -> Option<String> {
    if cat.rating_by_genre.is_empty() {
        return None;
    }
    let genre = cat.genre_mode.as_ref()?;
    Some(format!("'{genre}' is the most represented genre in the catalogue."))
}

fn scatter_caption(view: &ViewCharts) -> Option<String> {
    let (_, _, title) = view.votes_vs_rating.first()?;
    Some(format!("'{title}' stands out for its rating and votes."))
}

fn popularity_caption(cat: &CatalogueCharts) -> Option<String> {
    let first = cat.popularity.first()?;
    Some(format!("'{}' has been growing since {}.", first.genre, first.year))
}
