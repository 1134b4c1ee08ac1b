use std::path::Path;
use std::sync::Arc;

use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
};
use arrow::datatypes::DataType;
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::clean::clean_rows;
use super::error::DataLoadError;
use super::model::{MovieDataset, RawCell, RawRow, REQUIRED_COLUMNS};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and clean a movie table. Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.tsv` – header row plus one title per line
/// * `.json`         – `[{ "title": ..., "year": ..., ... }, ...]`
/// * `.parquet`      – one column per field, any scalar type
///
/// All seven columns of [`REQUIRED_COLUMNS`] must be present; extra columns are ignored.
pub fn load(path: &Path) -> Result<MovieDataset, DataLoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = match ext.as_str() {
        "csv" => read_delimited(path, b',')?,
        "tsv" => read_delimited(path, b'\t')?,
        "json" => read_json(path)?,
        "parquet" | "pq" => read_parquet(path)?,
        _ => {
            return Err(DataLoadError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: ext,
            })
        }
    };

    let dataset = clean_rows(rows);
    log::info!(
        "Loaded {} titles from {} ({} source rows, {} without a year, {} with bad numbers)",
        dataset.len(),
        path.display(),
        dataset.report.source_rows,
        dataset.report.dropped_without_year,
        dataset.report.quality_errors.len()
    );
    Ok(dataset)
}

/// Positions of the required columns inside a header, in [`REQUIRED_COLUMNS`] order.
fn locate_columns<S: AsRef<str>>(
    path: &Path,
    headers: &[S],
) -> Result<[usize; 7], DataLoadError> {
    let mut idx = [0usize; 7];
    for (slot, column) in idx.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h.as_ref().trim() == column)
            .ok_or_else(|| DataLoadError::MissingColumn {
                path: path.to_path_buf(),
                column,
            })?;
    }
    Ok(idx)
}

fn row_from_cells(mut cell: impl FnMut(usize) -> RawCell, idx: &[usize; 7]) -> RawRow {
    RawRow {
        title: cell(idx[0]),
        year: cell(idx[1]),
        genre: cell(idx[2]),
        rating: cell(idx[3]),
        votes: cell(idx[4]),
        duration: cell(idx[5]),
        description: cell(idx[6]),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn read_delimited(path: &Path, delimiter: u8) -> Result<Vec<RawRow>, DataLoadError> {
    let csv_err = |source| DataLoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let file = std::fs::File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(|h| h.to_string())
        .collect();
    let idx = locate_columns(path, &headers)?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(csv_err)?;
        rows.push(row_from_cells(
            |i| RawCell::from_field(record.get(i).unwrap_or("")),
            &idx,
        ));
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`).
/// A key absent from a record reads as a missing cell, but every required key
/// must appear in at least one record.
fn read_json(path: &Path) -> Result<Vec<RawRow>, DataLoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root: JsonValue = serde_json::from_str(&text).map_err(|source| DataLoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let malformed = |detail: String| DataLoadError::Malformed {
        path: path.to_path_buf(),
        detail,
    };
    let records = root
        .as_array()
        .ok_or_else(|| malformed("expected a top-level JSON array".into()))?;

    let mut objects = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| malformed(format!("record {i} is not a JSON object")))?;
        objects.push(obj);
    }

    if !objects.is_empty() {
        for column in REQUIRED_COLUMNS {
            if !objects.iter().any(|o| o.contains_key(column)) {
                return Err(DataLoadError::MissingColumn {
                    path: path.to_path_buf(),
                    column,
                });
            }
        }
    }

    let idx = [0, 1, 2, 3, 4, 5, 6];
    Ok(objects
        .into_iter()
        .map(|obj| row_from_cells(|i| json_to_cell(obj.get(REQUIRED_COLUMNS[i])), &idx))
        .collect())
}

fn json_to_cell(val: Option<&JsonValue>) -> RawCell {
    match val {
        None | Some(JsonValue::Null) => RawCell::Missing,
        Some(JsonValue::String(s)) => RawCell::from_field(s),
        Some(JsonValue::Number(n)) => RawCell::Text(number_text(n)),
        Some(other) => RawCell::Text(other.to_string()),
    }
}

/// Numbers read the same as from a Parquet column: `2500.0` → `"2500"`.
fn number_text(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else if let Some(f) = n.as_f64() {
        f.to_string()
    } else {
        n.to_string()
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`). Numeric columns are rendered back to text
/// so the cleaner sees the same values a CSV export would contain.
fn read_parquet(path: &Path) -> Result<Vec<RawRow>, DataLoadError> {
    let parquet_err = |source| DataLoadError::Parquet {
        path: path.to_path_buf(),
        source,
    };

    let file = std::fs::File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file).map_err(parquet_err)?;

    let field_names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let idx = locate_columns(path, &field_names)?;

    let reader = builder.build().map_err(parquet_err)?;
    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.map_err(|source| DataLoadError::Arrow {
            path: path.to_path_buf(),
            source,
        })?;

        for row in 0..batch.num_rows() {
            rows.push(row_from_cells(|i| extract_cell(batch.column(i), row), &idx));
        }
    }

    Ok(rows)
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> RawCell {
    if col.is_null(row) {
        return RawCell::Missing;
    }
    let text = match col.data_type() {
        DataType::Utf8 => col.as_string::<i32>().value(row).to_string(),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row).to_string(),
        DataType::Int32 => match col.as_any().downcast_ref::<Int32Array>() {
            Some(arr) => arr.value(row).to_string(),
            None => return RawCell::Missing,
        },
        DataType::Int64 => match col.as_any().downcast_ref::<Int64Array>() {
            Some(arr) => arr.value(row).to_string(),
            None => return RawCell::Missing,
        },
        DataType::Float32 => match col.as_any().downcast_ref::<Float32Array>() {
            Some(arr) => arr.value(row).to_string(),
            None => return RawCell::Missing,
        },
        DataType::Float64 => match col.as_any().downcast_ref::<Float64Array>() {
            Some(arr) => arr.value(row).to_string(),
            None => return RawCell::Missing,
        },
        DataType::Boolean => match col.as_any().downcast_ref::<BooleanArray>() {
            Some(arr) => arr.value(row).to_string(),
            None => return RawCell::Missing,
        },
        _ => match array_value_to_string(col, row) {
            Ok(s) => s,
            Err(e) => {
                log::debug!("Unreadable {:?} cell at row {row}: {e}", col.data_type());
                return RawCell::Missing;
            }
        },
    };
    RawCell::from_field(&text)
}
