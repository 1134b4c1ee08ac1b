use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::Cli;
use crate::color::GenreColors;
use crate::data::aggregate::{
    genre_mode, genre_popularity_over_time, rank_of, rating_distribution_by_genre,
    top_genres_by_count, top_n_by_rating, top_n_by_votes, BoxStats, YearGenreCount,
};
use crate::data::cache::load_cached;
use crate::data::error::NotFoundError;
use crate::data::export::export_csv;
use crate::data::filter::{distinct_titles, filter, select_title, FilterCriteria, FilteredView};
use crate::data::model::{MovieDataset, MovieRecord};

// ---------------------------------------------------------------------------
// Derived chart inputs
// ---------------------------------------------------------------------------

/// Aggregates over the whole dataset; rebuilt only when a new file is loaded.
#[derive(Debug, Clone, Default)]
pub struct CatalogueCharts {
    pub top_genres: Vec<(String, usize)>,
    pub rating_by_genre: Vec<(String, BoxStats)>,
    pub popularity: Vec<YearGenreCount>,
    pub genre_mode: Option<String>,
}

impl CatalogueCharts {
    fn build(dataset: &MovieDataset, top_n: usize) -> Self {
        CatalogueCharts {
            top_genres: top_genres_by_count(dataset, top_n),
            rating_by_genre: rating_distribution_by_genre(dataset),
            popularity: genre_popularity_over_time(dataset),
            genre_mode: genre_mode(dataset),
        }
    }
}

/// Aggregates over the filtered rows; rebuilt on every criteria change.
#[derive(Debug, Clone, Default)]
pub struct ViewCharts {
    pub top_votes: Vec<MovieRecord>,
    pub top_rated: Vec<MovieRecord>,
    /// (votes, rating, title) for every visible row.
    pub votes_vs_rating: Vec<(f64, f64, String)>,
}

impl ViewCharts {
    fn build(view: &FilteredView<'_>, top_n: usize) -> Self {
        ViewCharts {
            top_votes: top_n_by_votes(view, top_n).into_iter().cloned().collect(),
            top_rated: top_n_by_rating(view, top_n).into_iter().cloned().collect(),
            votes_vs_rating: view
                .records()
                .filter_map(|r| Some((r.votes as f64, r.rating?, r.title.clone())))
                .collect(),
        }
    }
}

/// The title shown in the detail card.
#[derive(Debug, Clone)]
pub struct Selection {
    pub record: MovieRecord,
    pub rank: Result<usize, NotFoundError>,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: Cli,

    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<Arc<MovieDataset>>,

    /// File the dataset came from.
    pub source: Option<PathBuf>,

    /// Genre choices for the selector, in first-appearance order.
    pub genres: Vec<String>,

    pub genre_colors: GenreColors,

    /// Current filter; None when the dataset has no genre to select.
    pub criteria: Option<FilterCriteria>,

    /// Indices of rows passing the current filter (cached).
    pub visible_indices: Vec<usize>,

    /// Distinct titles among the visible rows.
    pub titles: Vec<String>,

    pub selected_title: Option<String>,
    pub selection: Option<Selection>,

    pub catalogue: CatalogueCharts,
    pub view_charts: ViewCharts,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: Cli) -> Self {
        Self {
            config,
            dataset: None,
            source: None,
            genres: Vec::new(),
            genre_colors: GenreColors::default(),
            criteria: None,
            visible_indices: Vec::new(),
            titles: Vec::new(),
            selected_title: None,
            selection: None,
            catalogue: CatalogueCharts::default(),
            view_charts: ViewCharts::default(),
            status_message: None,
        }
    }

    fn top_n(&self) -> usize {
        usize::from(self.config.top_n)
    }

    /// Load (or reuse) a dataset. On failure the previous dataset is dropped so
    /// no partial dashboard is shown, and the error lands in the status bar.
    pub fn open(&mut self, path: &Path) -> bool {
        match load_cached(path) {
            Ok(dataset) => {
                self.source = Some(path.to_path_buf());
                self.set_dataset(dataset);
                true
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                *self = Self::new(self.config.clone());
                self.status_message = Some(format!("Error: {e}"));
                false
            }
        }
    }

    /// Ingest a newly loaded dataset, initialise filters and charts.
    pub fn set_dataset(&mut self, dataset: Arc<MovieDataset>) {
        self.genres = dataset.genres();
        self.genre_colors = GenreColors::new(&self.genres);
        self.criteria = FilterCriteria::full_range(&dataset);
        self.catalogue = CatalogueCharts::build(&dataset, self.top_n());
        self.selected_title = None;
        self.status_message = if dataset.is_empty() {
            log::warn!("No rows survived cleaning");
            Some("No titles with a readable year".to_string())
        } else {
            match dataset.report.quality_errors.len() {
                0 => None,
                n => Some(format!("{n} rows skipped: unreadable votes or rating")),
            }
        };
        self.dataset = Some(dataset);
        self.refilter();
    }

    /// File name of the loaded source, for the top bar.
    pub fn source_name(&self) -> Option<String> {
        let path = self.source.as_deref()?;
        Some(path.file_name().unwrap_or(path.as_os_str()).to_string_lossy().into_owned())
    }

    /// Rows passing the current filter.
    pub fn view(&self) -> Option<FilteredView<'_>> {
        let dataset = self.dataset.as_deref()?;
        Some(FilteredView::from_indices(dataset, &self.visible_indices))
    }

    /// Replace the filter; recomputes only when something actually changed.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        if self.criteria.as_ref() != Some(&criteria) {
            self.criteria = Some(criteria);
            self.refilter();
        }
    }

    /// Recompute visible rows, title choices, view charts and the selection.
    pub fn refilter(&mut self) {
        let (Some(dataset), Some(criteria)) = (self.dataset.clone(), self.criteria.clone()) else {
            self.visible_indices.clear();
            self.titles.clear();
            self.view_charts = ViewCharts::default();
            self.selection = None;
            return;
        };

        let view = filter(&dataset, &criteria);
        log::debug!("{} of {} titles pass {:?}", view.len(), dataset.len(), criteria);

        self.visible_indices = view.indices().to_vec();
        self.titles = distinct_titles(&view).into_iter().map(str::to_string).collect();
        self.view_charts = ViewCharts::build(&view, self.top_n());

        let keep = self
            .selected_title
            .as_ref()
            .is_some_and(|t| self.titles.contains(t));
        if !keep {
            self.selected_title = self.titles.first().cloned();
        }
        self.selection = selection_for(&view, self.selected_title.as_deref());
    }

    pub fn select_title(&mut self, title: &str) {
        if self.selected_title.as_deref() == Some(title) {
            return;
        }
        self.selected_title = Some(title.to_string());
        self.selection = self
            .view()
            .and_then(|view| selection_for(&view, Some(title)));
    }

    /// Write the visible rows to `path`.
    pub fn export_view(&self, path: &Path) -> anyhow::Result<usize> {
        let view = self
            .view()
            .ok_or_else(|| anyhow::anyhow!("no dataset loaded"))?;
        if view.is_empty() {
            anyhow::bail!("no titles match the current filters");
        }
        export_csv(view.records(), path)
    }
}

fn selection_for(view: &FilteredView<'_>, title: Option<&str>) -> Option<Selection> {
    let record = select_title(view, title?)?;
    Some(Selection {
        record: record.clone(),
        rank: rank_of(view, &record.title),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;

    use super::*;

    fn state_with(csv_body: &str) -> (AppState, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movies.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "title,year,genre,rating,votes,duration,description").unwrap();
        file.write_all(csv_body.as_bytes()).unwrap();
        drop(file);

        let mut state = AppState::new(Cli::parse_from(["movie-dashboard", "--top-n", "2"]));
        assert!(state.open(&path));
        (state, dir)
    }

    const BODY: &str = "\
A,2000,Drama,8.5,100,90 min,first\n\
B,2000,Drama,9.0,50,100 min,second\n\
C,2003,\"Comedy, Drama\",6.0,\"1,000\",80 min,third\n\
D,TBD,Drama,7.0,10,,gone\n\
E,2010,Drama,5.0,5,,fifth\n";

    #[test]
    fn opening_selects_first_genre_and_title() {
        let (state, _dir) = state_with(BODY);
        assert_eq!(state.genres, vec!["Drama".to_string(), "Comedy".to_string()]);
        assert_eq!(state.criteria.as_ref().unwrap().genre, "Drama");
        assert_eq!(state.visible_indices, vec![0, 1, 3]);
        assert_eq!(state.titles, vec!["A", "B", "E"]);
        assert_eq!(state.selected_title.as_deref(), Some("A"));

        let selection = state.selection.as_ref().unwrap();
        assert_eq!(selection.record.title, "A");
        assert_eq!(selection.rank, Ok(2));

        let top_votes: Vec<_> = state.view_charts.top_votes.iter().map(|r| &r.title).collect();
        assert_eq!(top_votes, vec!["A", "B"]);
        assert_eq!(state.catalogue.top_genres[0], ("Drama".to_string(), 3));
    }

    #[test]
    fn narrowing_the_filter_moves_the_selection() {
        let (mut state, _dir) = state_with(BODY);
        let mut criteria = state.criteria.clone().unwrap();
        criteria.year_min = 2005;
        state.set_criteria(criteria);

        assert_eq!(state.titles, vec!["E"]);
        assert_eq!(state.selected_title.as_deref(), Some("E"));
        assert_eq!(state.selection.as_ref().unwrap().rank, Ok(1));
    }

    #[test]
    fn empty_filter_result_clears_everything_derived() {
        let (mut state, _dir) = state_with(BODY);
        let mut criteria = state.criteria.clone().unwrap();
        criteria.genre = "Western".into();
        state.set_criteria(criteria);

        assert!(state.visible_indices.is_empty());
        assert!(state.titles.is_empty());
        assert!(state.selection.is_none());
        assert!(state.view_charts.top_votes.is_empty());
        assert!(state.view_charts.top_rated.is_empty());
        // dataset-wide charts are unaffected
        assert_eq!(state.catalogue.top_genres.len(), 2);
    }

    #[test]
    fn selecting_a_title_ranks_it() {
        let (mut state, _dir) = state_with(BODY);
        state.select_title("B");
        let selection = state.selection.as_ref().unwrap();
        assert_eq!(selection.record.description, "second");
        assert_eq!(selection.rank, Ok(1));

        state.select_title("Nope");
        assert!(state.selection.is_none());
    }

    #[test]
    fn failed_open_leaves_no_partial_dashboard() {
        let (mut state, dir) = state_with(BODY);
        assert!(!state.open(&dir.path().join("missing.csv")));
        assert!(state.dataset.is_none());
        assert!(state.view().is_none());
        assert!(state.status_message.as_deref().unwrap().starts_with("Error"));
    }

    #[test]
    fn export_writes_visible_rows() {
        let (state, dir) = state_with(BODY);
        let out = dir.path().join("out.csv");
        assert_eq!(state.export_view(&out).unwrap(), 3);
    }

    #[test]
    fn exporting_an_empty_view_fails_without_writing() {
        let (mut state, dir) = state_with(BODY);
        let mut criteria = state.criteria.clone().unwrap();
        criteria.genre = "Western".into();
        state.set_criteria(criteria);

        let out = dir.path().join("out.csv");
        assert!(state.export_view(&out).is_err());
        assert!(!out.exists());
    }

    #[test]
    fn source_name_follows_the_opened_file() {
        let (mut state, dir) = state_with(BODY);
        assert_eq!(state.source_name().as_deref(), Some("movies.csv"));

        assert!(!state.open(&dir.path().join("missing.csv")));
        assert_eq!(state.source_name(), None);
    }

    #[test]
    fn dataset_without_years_reports_it() {
        let (state, _dir) = state_with("A,TBD,Drama,8.5,100,90 min,gone\n");
        assert!(state.dataset.as_ref().unwrap().is_empty());
        assert!(state.criteria.is_none());
        assert_eq!(
            state.status_message.as_deref(),
            Some("No titles with a readable year")
        );
    }
}
