use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use super::error::DataQualityError;

// ---------------------------------------------------------------------------
// RawCell – one untyped cell of the source table
// ---------------------------------------------------------------------------

/// A cell as read from the source file, before any cleaning.
///
/// Empty CSV fields and JSON / Parquet nulls are `Missing`; everything else is
/// kept verbatim as text so every format goes through the same cleaning rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawCell {
    Text(String),
    Missing,
}

impl RawCell {
    /// Build a cell from a CSV field: the empty string means "no value".
    pub fn from_field(field: &str) -> Self {
        if field.is_empty() {
            RawCell::Missing
        } else {
            RawCell::Text(field.to_string())
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawCell::Text(s) => Some(s),
            RawCell::Missing => None,
        }
    }
}

impl fmt::Display for RawCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawCell::Text(s) => write!(f, "{s}"),
            RawCell::Missing => write!(f, "<missing>"),
        }
    }
}

/// The seven source columns every input table must carry.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "title",
    "year",
    "genre",
    "rating",
    "votes",
    "duration",
    "description",
];

/// One source row, cells in [`REQUIRED_COLUMNS`] order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub title: RawCell,
    pub year: RawCell,
    pub genre: RawCell,
    pub rating: RawCell,
    pub votes: RawCell,
    pub duration: RawCell,
    pub description: RawCell,
}

// ---------------------------------------------------------------------------
// MovieRecord – one cleaned row
// ---------------------------------------------------------------------------

/// A single title after cleaning.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieRecord {
    pub title: String,
    /// First four-digit run of the source year field.
    pub year: i32,
    /// First comma-separated token of the source genre list; `None` when the
    /// source cell was empty.
    pub genre: Option<String>,
    pub rating: Option<f64>,
    pub votes: u64,
    /// Minutes.
    pub duration: Option<f64>,
    pub description: String,
}

impl MovieRecord {
    pub fn genre_label(&self) -> &str {
        self.genre.as_deref().unwrap_or("<none>")
    }
}

// ---------------------------------------------------------------------------
// MovieDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// What the cleaner threw away while building a [`MovieDataset`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub source_rows: usize,
    /// Rows whose year field had no four-digit run.
    pub dropped_without_year: usize,
    /// Rows dropped because a numeric field held unparseable text.
    pub quality_errors: Vec<DataQualityError>,
}

/// The full cleaned table. Never mutated after load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieDataset {
    /// Cleaned rows in source order.
    pub records: Vec<MovieRecord>,
    pub report: LoadReport,
}

impl MovieDataset {
    pub fn new(records: Vec<MovieRecord>, report: LoadReport) -> Self {
        MovieDataset { records, report }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct genres in order of first appearance. Rows without a genre are skipped.
    pub fn genres(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter_map(|r| r.genre.as_deref())
            .filter(|g| seen.insert(*g))
            .map(str::to_string)
            .collect()
    }

    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let min = self.records.iter().map(|r| r.year).min()?;
        let max = self.records.iter().map(|r| r.year).max()?;
        Some((min, max))
    }

    /// Smallest and largest rating; rows without a rating are ignored.
    pub fn rating_bounds(&self) -> Option<(f64, f64)> {
        self.records
            .iter()
            .filter_map(|r| r.rating)
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

#[cfg(test)]
pub(crate) fn record(title: &str, year: i32, genre: &str, rating: f64, votes: u64) -> MovieRecord {
    MovieRecord {
        title: title.to_string(),
        year,
        genre: Some(genre.to_string()),
        rating: Some(rating),
        votes,
        duration: None,
        description: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genres_keep_first_appearance_order() {
        let mut missing = record("X", 2001, "Drama", 5.0, 1);
        missing.genre = None;
        let ds = MovieDataset::new(
            vec![
                record("A", 2000, "Drama", 8.5, 100),
                record("B", 2000, "Action", 9.0, 50),
                missing,
                record("C", 2003, "Drama", 7.0, 10),
            ],
            LoadReport::default(),
        );
        assert_eq!(ds.genres(), vec!["Drama".to_string(), "Action".to_string()]);
    }

    #[test]
    fn bounds_skip_missing_ratings() {
        let mut unrated = record("X", 1950, "Drama", 0.0, 1);
        unrated.rating = None;
        let ds = MovieDataset::new(
            vec![record("A", 2000, "Drama", 8.5, 100), unrated, record("B", 2010, "Drama", 6.0, 1)],
            LoadReport::default(),
        );
        assert_eq!(ds.year_bounds(), Some((1950, 2010)));
        assert_eq!(ds.rating_bounds(), Some((6.0, 8.5)));
    }

    #[test]
    fn empty_dataset_has_no_bounds() {
        let ds = MovieDataset::default();
        assert!(ds.is_empty());
        assert_eq!(ds.year_bounds(), None);
        assert_eq!(ds.rating_bounds(), None);
        assert!(ds.genres().is_empty());
    }

    #[test]
    fn raw_cell_treats_empty_field_as_missing() {
        assert_eq!(RawCell::from_field(""), RawCell::Missing);
        assert_eq!(RawCell::from_field(" "), RawCell::Text(" ".into()));
    }
}
