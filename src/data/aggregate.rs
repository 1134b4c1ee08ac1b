use std::collections::{BTreeMap, HashMap};

use super::error::NotFoundError;
use super::filter::FilteredView;
use super::model::{MovieDataset, MovieRecord};

// ---------------------------------------------------------------------------
// Top-N over a filtered view
// ---------------------------------------------------------------------------

/// The `n` most voted rows, ties kept in view order.
pub fn top_n_by_votes<'a>(view: &FilteredView<'a>, n: usize) -> Vec<&'a MovieRecord> {
    let mut rows: Vec<_> = view.records().collect();
    rows.sort_by(|a, b| b.votes.cmp(&a.votes));
    rows.truncate(n);
    rows
}

/// The `n` best rated rows, ties kept in view order. Unrated rows are left out.
pub fn top_n_by_rating<'a>(view: &FilteredView<'a>, n: usize) -> Vec<&'a MovieRecord> {
    let mut rows = by_rating_desc(view);
    rows.truncate(n);
    rows
}

fn by_rating_desc<'a>(view: &FilteredView<'a>) -> Vec<&'a MovieRecord> {
    let mut rows: Vec<_> = view.records().filter(|r| r.rating.is_some()).collect();
    rows.sort_by(|a, b| {
        let (a, b) = (a.rating.unwrap_or(f64::MIN), b.rating.unwrap_or(f64::MIN));
        b.total_cmp(&a)
    });
    rows
}

/// 1-based position of `title` in `view` ordered by rating, best first.
/// With duplicate titles the best placed one wins.
pub fn rank_of(view: &FilteredView<'_>, title: &str) -> Result<usize, NotFoundError> {
    by_rating_desc(view)
        .iter()
        .position(|r| r.title == title)
        .map(|i| i + 1)
        .ok_or_else(|| NotFoundError {
            title: title.to_string(),
        })
}

// ---------------------------------------------------------------------------
// Whole-dataset aggregates
// ---------------------------------------------------------------------------

/// Row count per genre, in order of first appearance.
fn genre_counts(dataset: &MovieDataset) -> Vec<(String, usize)> {
    let mut order: Vec<(String, usize)> = Vec::new();
    let mut slot: HashMap<&str, usize> = HashMap::new();
    for genre in dataset.records.iter().filter_map(|r| r.genre.as_deref()) {
        match slot.get(genre) {
            Some(&i) => order[i].1 += 1,
            None => {
                slot.insert(genre, order.len());
                order.push((genre.to_string(), 1));
            }
        }
    }
    order
}

/// The `n` genres with the most titles over the whole dataset, most first.
/// Equal counts keep first-appearance order.
pub fn top_genres_by_count(dataset: &MovieDataset, n: usize) -> Vec<(String, usize)> {
    let mut counts = genre_counts(dataset);
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(n);
    counts
}

/// Most frequent genre; equal counts resolve to the alphabetically first.
pub fn genre_mode(dataset: &MovieDataset) -> Option<String> {
    genre_counts(dataset)
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
        .map(|(genre, _)| genre)
}

/// Five-number summary of a set of ratings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxStats {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub count: usize,
}

impl BoxStats {
    /// Quartiles use linear interpolation between closest ranks: the `p`
    /// quantile of `n` sorted values sits at position `p * (n - 1)`.
    pub fn from_values(values: &mut [f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        values.sort_by(f64::total_cmp);
        Some(BoxStats {
            min: values[0],
            q1: quantile(values, 0.25),
            median: quantile(values, 0.5),
            q3: quantile(values, 0.75),
            max: values[values.len() - 1],
            count: values.len(),
        })
    }
}

fn quantile(sorted: &[f64], p: f64) -> f64 {
    let pos = p * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Rating summary per genre over the whole dataset, genres in first-appearance
/// order. Genres with no rated title are omitted.
pub fn rating_distribution_by_genre(dataset: &MovieDataset) -> Vec<(String, BoxStats)> {
    let mut groups: Vec<(String, Vec<f64>)> = Vec::new();
    let mut slot: HashMap<&str, usize> = HashMap::new();
    for r in &dataset.records {
        let (Some(genre), Some(rating)) = (r.genre.as_deref(), r.rating) else {
            continue;
        };
        let i = *slot.entry(genre).or_insert_with(|| {
            groups.push((genre.to_string(), Vec::new()));
            groups.len() - 1
        });
        groups[i].1.push(rating);
    }

    groups
        .into_iter()
        .filter_map(|(genre, mut ratings)| Some((genre, BoxStats::from_values(&mut ratings)?)))
        .collect()
}

/// Titles released per (year, genre).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearGenreCount {
    pub year: i32,
    pub genre: String,
    pub count: usize,
}

/// Title counts per (year, genre) over the whole dataset, by year then genre.
pub fn genre_popularity_over_time(dataset: &MovieDataset) -> Vec<YearGenreCount> {
    let mut counts: BTreeMap<(i32, &str), usize> = BTreeMap::new();
    for r in &dataset.records {
        if let Some(genre) = r.genre.as_deref() {
            *counts.entry((r.year, genre)).or_default() += 1;
        }
    }
    counts
        .into_iter()
        .map(|((year, genre), count)| YearGenreCount {
            year,
            genre: genre.to_string(),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filter, FilterCriteria};
    use crate::data::model::{record, LoadReport};

    fn dataset(records: Vec<MovieRecord>) -> MovieDataset {
        MovieDataset::new(records, LoadReport::default())
    }

    fn everything(genre: &str) -> FilterCriteria {
        FilterCriteria {
            genre: genre.to_string(),
            year_min: 1900,
            year_max: 2100,
            rating_min: 0.0,
            rating_max: 10.0,
        }
    }

    fn titles(rows: &[&MovieRecord]) -> Vec<String> {
        rows.iter().map(|r| r.title.clone()).collect()
    }

    #[test]
    fn two_row_drama_example() {
        let ds = dataset(vec![
            record("A", 2000, "Drama", 8.5, 100),
            record("B", 2000, "Drama", 9.0, 50),
        ]);
        let c = FilterCriteria {
            year_min: 2000,
            year_max: 2000,
            ..everything("Drama")
        };
        let view = filter(&ds, &c);
        assert_eq!(view.len(), 2);
        assert_eq!(titles(&top_n_by_rating(&view, 1)), vec!["B"]);
        assert_eq!(rank_of(&view, "A"), Ok(2));
        assert_eq!(rank_of(&view, "B"), Ok(1));
    }

    #[test]
    fn top_votes_is_stable_and_bounded() {
        let ds = dataset(vec![
            record("A", 2000, "Drama", 5.0, 10),
            record("B", 2000, "Drama", 5.0, 30),
            record("C", 2000, "Drama", 5.0, 10),
            record("D", 2000, "Drama", 5.0, 30),
        ]);
        let view = filter(&ds, &everything("Drama"));
        assert_eq!(titles(&top_n_by_votes(&view, 3)), vec!["B", "D", "A"]);
        assert_eq!(top_n_by_votes(&view, 10).len(), 4);
        assert!(top_n_by_votes(&view, 0).is_empty());
    }

    #[test]
    fn top_rating_ties_keep_view_order() {
        let ds = dataset(vec![
            record("A", 2000, "Drama", 7.0, 1),
            record("B", 2000, "Drama", 9.0, 1),
            record("C", 2000, "Drama", 9.0, 1),
        ]);
        let view = filter(&ds, &everything("Drama"));
        assert_eq!(titles(&top_n_by_rating(&view, 3)), vec!["B", "C", "A"]);
        assert_eq!(rank_of(&view, "C"), Ok(2));
    }

    #[test]
    fn empty_view_yields_no_data() {
        let ds = dataset(vec![record("A", 2000, "Drama", 7.0, 1)]);
        let view = filter(&ds, &everything("Western"));
        assert!(top_n_by_votes(&view, 10).is_empty());
        assert!(top_n_by_rating(&view, 10).is_empty());
        assert_eq!(
            rank_of(&view, "A"),
            Err(NotFoundError { title: "A".into() })
        );
        // whole-dataset views ignore the filter
        assert_eq!(top_genres_by_count(&ds, 10), vec![("Drama".to_string(), 1)]);
    }

    #[test]
    fn genre_counts_break_ties_by_first_appearance() {
        let mut unlabelled = record("X", 2001, "", 1.0, 1);
        unlabelled.genre = None;
        let ds = dataset(vec![
            record("A", 2000, "Comedy", 7.0, 1),
            record("B", 2000, "Drama", 7.0, 1),
            unlabelled,
            record("C", 2001, "Drama", 7.0, 1),
            record("D", 2001, "Action", 7.0, 1),
            record("E", 2002, "Comedy", 7.0, 1),
            record("F", 2002, "Horror", 7.0, 1),
        ]);
        assert_eq!(
            top_genres_by_count(&ds, 3),
            vec![
                ("Comedy".to_string(), 2),
                ("Drama".to_string(), 2),
                ("Action".to_string(), 1)
            ]
        );
        assert_eq!(genre_mode(&ds), Some("Comedy".to_string()));
        assert_eq!(genre_mode(&MovieDataset::default()), None);
    }

    #[test]
    fn genre_mode_prefers_alphabetical_on_ties() {
        let ds = dataset(vec![
            record("A", 2000, "Drama", 7.0, 1),
            record("B", 2000, "Action", 7.0, 1),
        ]);
        assert_eq!(genre_mode(&ds), Some("Action".to_string()));
    }

    #[test]
    fn box_stats_interpolate_quartiles() {
        let stats = BoxStats::from_values(&mut [4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.q1, 1.75);
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.q3, 3.25);
        assert_eq!(stats.max, 4.0);
        assert_eq!(stats.count, 4);

        let single = BoxStats::from_values(&mut [6.5]).unwrap();
        assert_eq!((single.min, single.median, single.max), (6.5, 6.5, 6.5));
        assert_eq!(BoxStats::from_values(&mut []), None);
    }

    #[test]
    fn rating_distribution_groups_by_genre() {
        let mut unrated = record("U", 2000, "Horror", 0.0, 1);
        unrated.rating = None;
        let ds = dataset(vec![
            record("A", 2000, "Drama", 8.0, 1),
            record("B", 2000, "Comedy", 6.0, 1),
            record("C", 2000, "Drama", 6.0, 1),
            unrated,
        ]);
        let dist = rating_distribution_by_genre(&ds);
        assert_eq!(dist.len(), 2);
        assert_eq!(dist[0].0, "Drama");
        assert_eq!(dist[0].1.median, 7.0);
        assert_eq!(dist[1].0, "Comedy");
        assert_eq!(dist[1].1.count, 1);
    }

    #[test]
    fn popularity_is_ordered_by_year_then_genre() {
        let ds = dataset(vec![
            record("A", 2001, "Drama", 8.0, 1),
            record("B", 2000, "Drama", 6.0, 1),
            record("C", 2001, "Action", 6.0, 1),
            record("D", 2001, "Drama", 6.0, 1),
        ]);
        let rows = genre_popularity_over_time(&ds);
        let flat: Vec<_> = rows
            .iter()
            .map(|r| (r.year, r.genre.as_str(), r.count))
            .collect();
        assert_eq!(
            flat,
            vec![(2000, "Drama", 1), (2001, "Action", 1), (2001, "Drama", 2)]
        );
    }
}
