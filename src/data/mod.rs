/// Data layer: cleaning, loading, filtering and chart aggregates.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  read cells → RawRow      (cache: once per file + mtime)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  clean   │  year / genre / votes / duration rules → MovieDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  genre + year + rating → FilteredView
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  top-N, genre counts, box stats, popularity, rank
///   └───────────┘
/// ```

pub mod aggregate;
pub mod cache;
pub mod clean;
pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
