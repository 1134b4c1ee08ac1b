use std::path::PathBuf;

use clap::Parser;

/// Explore a movie catalogue: filter by genre, year and rating.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(version, about)]
pub struct Cli {
    /// Movie table to open at start-up (.csv, .tsv, .json, .parquet)
    #[arg(default_value = "n_movies.csv")]
    pub data: PathBuf,

    /// Image shown above the filters
    #[arg(long, default_value = "netflix.png")]
    pub logo: PathBuf,

    /// Number of bars in the top-N charts
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u16).range(1..))]
    pub top_n: u16,
}
