use std::collections::HashSet;
use std::ops::RangeInclusive;

use super::model::{MovieDataset, MovieRecord};

// ---------------------------------------------------------------------------
// Filter predicate: one genre plus inclusive year and rating windows
// ---------------------------------------------------------------------------

/// The user's current selection in the side panel.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    /// Exact, case-sensitive match against the cleaned genre.
    pub genre: String,
    pub year_min: i32,
    pub year_max: i32,
    pub rating_min: f64,
    pub rating_max: f64,
}

impl FilterCriteria {
    /// First genre in the dataset with the widest year and rating windows.
    /// `None` when the dataset has no genre at all.
    pub fn full_range(dataset: &MovieDataset) -> Option<Self> {
        let genre = dataset.genres().into_iter().next()?;
        let (year_min, year_max) = dataset.year_bounds()?;
        let (rating_min, rating_max) = dataset.rating_bounds().unwrap_or((0.0, 10.0));
        Some(FilterCriteria {
            genre,
            year_min,
            year_max,
            rating_min,
            rating_max,
        })
    }

    /// Round both rating bounds to one decimal, the precision ratings are
    /// published at, then clamp them to `lo..=hi`. Slider drags produce values
    /// like `7.300000000000001` that would otherwise exclude a 7.3 title.
    pub fn snap_ratings(&mut self, lo: f64, hi: f64) {
        let snap = |v: f64| ((v * 10.0).round() / 10.0).clamp(lo, hi);
        self.rating_min = snap(self.rating_min);
        self.rating_max = snap(self.rating_max);
    }

    pub fn years(&self) -> RangeInclusive<i32> {
        self.year_min..=self.year_max
    }

    pub fn ratings(&self) -> RangeInclusive<f64> {
        self.rating_min..=self.rating_max
    }

    /// Whether a single record passes every constraint. Records without a
    /// rating never pass.
    pub fn matches(&self, record: &MovieRecord) -> bool {
        record.genre.as_deref() == Some(self.genre.as_str())
            && self.years().contains(&record.year)
            && record.rating.is_some_and(|r| self.ratings().contains(&r))
    }
}

// ---------------------------------------------------------------------------
// FilteredView – the rows passing the current criteria
// ---------------------------------------------------------------------------

/// The subset of a dataset matching some [`FilterCriteria`], in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView<'a> {
    dataset: &'a MovieDataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// Rebuild a view from indices computed earlier against the same dataset.
    /// Out-of-range indices are skipped.
    pub fn from_indices(dataset: &'a MovieDataset, indices: &[usize]) -> Self {
        FilteredView {
            dataset,
            indices: indices
                .iter()
                .copied()
                .filter(|&i| i < dataset.len())
                .collect(),
        }
    }

    /// Positions of the visible rows inside the dataset.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn records(&self) -> impl Iterator<Item = &'a MovieRecord> + '_ {
        let dataset = self.dataset;
        self.indices.iter().map(move |&i| &dataset.records[i])
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Return the rows of `dataset` that pass all of `criteria`.
pub fn filter<'a>(dataset: &'a MovieDataset, criteria: &FilterCriteria) -> FilteredView<'a> {
    let indices = dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| criteria.matches(r))
        .map(|(i, _)| i)
        .collect();
    FilteredView { dataset, indices }
}

/// Unique titles in view order, for the title selector.
pub fn distinct_titles<'a>(view: &FilteredView<'a>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    view.records()
        .map(|r| r.title.as_str())
        .filter(|t| seen.insert(*t))
        .collect()
}

/// The first record in `view` carrying `title`.
pub fn select_title<'a>(view: &FilteredView<'a>, title: &str) -> Option<&'a MovieRecord> {
    view.records().find(|r| r.title == title)
}
