use std::path::PathBuf;

use thiserror::Error;

/// The source table could not be turned into a dataset at all.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("malformed JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot read parquet file {}: {source}", path.display())]
    Parquet {
        path: PathBuf,
        #[source]
        source: parquet::errors::ParquetError,
    },

    #[error("cannot decode record batch in {}: {source}", path.display())]
    Arrow {
        path: PathBuf,
        #[source]
        source: arrow::error::ArrowError,
    },

    #[error("{} is missing required column '{column}'", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("unsupported file extension '.{extension}' for {}", path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("malformed table {}: {detail}", path.display())]
    Malformed { path: PathBuf, detail: String },
}

/// A single cell that failed its expected format during cleaning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("row {row}: column '{column}' has unusable value {value:?}")]
pub struct DataQualityError {
    /// 1-based data row (header excluded).
    pub row: usize,
    pub column: &'static str,
    pub value: String,
}

/// A lookup by title found nothing in the view it searched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{title}' is not part of the current selection")]
pub struct NotFoundError {
    pub title: String,
}
