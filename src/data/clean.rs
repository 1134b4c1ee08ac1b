use once_cell::sync::Lazy;
use regex::Regex;

use super::error::DataQualityError;
use super::model::{LoadReport, MovieDataset, MovieRecord, RawCell, RawRow};

// ASCII digits only; `\d` also matches other scripts.
static FOUR_DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]{4}").expect("valid year regex"));
static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").expect("valid digit regex"));

// ---------------------------------------------------------------------------
// Dataset construction
// ---------------------------------------------------------------------------

/// Clean every raw row and assemble the dataset.
///
/// Rows are dropped in two cases only: the year has no four-digit run, or a
/// numeric column holds text that cannot be parsed (see [`clean_row`]).
/// Surviving rows keep their source order.
pub fn clean_rows(rows: Vec<RawRow>) -> MovieDataset {
    let mut report = LoadReport {
        source_rows: rows.len(),
        ..LoadReport::default()
    };
    let mut records = Vec::with_capacity(rows.len());

    for (i, raw) in rows.into_iter().enumerate() {
        match clean_row(i + 1, raw) {
            Ok(Some(record)) => records.push(record),
            Ok(None) => report.dropped_without_year += 1,
            Err(e) => {
                log::warn!("Dropping {e}");
                report.quality_errors.push(e);
            }
        }
    }

    MovieDataset::new(records, report)
}

/// Clean one row. `Ok(None)` means the year field had no four-digit run.
pub fn clean_row(row: usize, raw: RawRow) -> Result<Option<MovieRecord>, DataQualityError> {
    let Some(year) = extract_year(&raw.year) else {
        return Ok(None);
    };

    let votes = parse_votes(&raw.votes).ok_or_else(|| DataQualityError {
        row,
        column: "votes",
        value: raw.votes.to_string(),
    })?;
    let rating = parse_rating(&raw.rating).map_err(|()| DataQualityError {
        row,
        column: "rating",
        value: raw.rating.to_string(),
    })?;

    Ok(Some(MovieRecord {
        title: into_text(raw.title),
        year,
        genre: primary_genre(raw.genre),
        rating,
        votes,
        duration: extract_duration(&raw.duration),
        description: into_text(raw.description),
    }))
}

// ---------------------------------------------------------------------------
// Per-column rules
// ---------------------------------------------------------------------------

/// First run of four digits, e.g. `"(2010–2022)"` → 2010, `"1990s"` → 1990.
pub fn extract_year(cell: &RawCell) -> Option<i32> {
    let text = cell.as_text()?;
    FOUR_DIGITS.find(text)?.as_str().parse().ok()
}

/// First comma-separated token, trimmed. A missing cell stays missing.
pub fn primary_genre(cell: RawCell) -> Option<String> {
    match cell {
        RawCell::Text(s) => Some(s.split(',').next().unwrap_or_default().trim().to_string()),
        RawCell::Missing => None,
    }
}

/// Strip thousands separators; a missing or blank cell counts as zero votes.
/// Returns `None` when the remaining text is not a non-negative integer.
pub fn parse_votes(cell: &RawCell) -> Option<u64> {
    match cell {
        RawCell::Missing => Some(0),
        RawCell::Text(s) => {
            let cleaned = s.replace(',', "");
            let cleaned = cleaned.trim();
            if cleaned.is_empty() {
                Some(0)
            } else {
                cleaned.parse().ok()
            }
        }
    }
}

/// Missing → `Ok(None)`; text that is not a finite float → `Err(())`.
fn parse_rating(cell: &RawCell) -> Result<Option<f64>, ()> {
    match cell {
        RawCell::Missing => Ok(None),
        RawCell::Text(s) if s.trim().is_empty() => Ok(None),
        RawCell::Text(s) => match s.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Some(v)),
            _ => Err(()),
        },
    }
}

/// Minutes from the first digit run, e.g. `"148 min"` → 148.0.
pub fn extract_duration(cell: &RawCell) -> Option<f64> {
    let text = cell.as_text()?;
    DIGIT_RUN.find(text)?.as_str().parse().ok()
}

fn into_text(cell: RawCell) -> String {
    match cell {
        RawCell::Text(s) => s,
        RawCell::Missing => String::new(),
    }
}

#[cfg(test)]
pub(crate) fn raw_row(cells: [&str; 7]) -> RawRow {
    let [title, year, genre, rating, votes, duration, description] = cells.map(RawCell::from_field);
    RawRow {
        title,
        year,
        genre,
        rating,
        votes,
        duration,
        description,
    }
}
