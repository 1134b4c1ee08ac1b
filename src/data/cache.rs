use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::SystemTime;

use once_cell::sync::Lazy;

use super::error::DataLoadError;
use super::loader::load;
use super::model::MovieDataset;

/// Identity of a source file: where it lives and when it last changed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct SourceKey {
    path: PathBuf,
    modified: Option<SystemTime>,
}

impl SourceKey {
    fn of(path: &Path) -> Result<Self, DataLoadError> {
        let io_err = |source| DataLoadError::Io {
            path: path.to_path_buf(),
            source,
        };
        let path = std::fs::canonicalize(path).map_err(io_err)?;
        let modified = std::fs::metadata(&path).map_err(io_err)?.modified().ok();
        Ok(SourceKey { path, modified })
    }
}

/// Datasets loaded during this process, never evicted.
static DATASETS: Lazy<Mutex<HashMap<SourceKey, Arc<MovieDataset>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Load `path` once per (file, modification time) and share the result.
///
/// A file touched since the last call is parsed again under a new key. Errors
/// are returned to the caller and never remembered.
pub fn load_cached(path: &Path) -> Result<Arc<MovieDataset>, DataLoadError> {
    let key = SourceKey::of(path)?;
    let mut datasets = DATASETS.lock().unwrap_or_else(PoisonError::into_inner);

    if let Some(ds) = datasets.get(&key) {
        log::debug!("Reusing cached dataset for {}", key.path.display());
        return Ok(Arc::clone(ds));
    }

    let ds = Arc::new(load(&key.path)?);
    datasets.insert(key, Arc::clone(&ds));
    Ok(ds)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::time::Duration;

    use super::*;

    fn write_csv(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("movies.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "title,year,genre,rating,votes,duration,description").unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn repeated_loads_share_one_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "A,2000,Drama,8.5,100,,\n");

        let first = load_cached(&path).unwrap();
        let second = load_cached(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.len(), 1);
    }

    #[test]
    fn modified_file_is_reloaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "A,2000,Drama,8.5,100,,\n");
        let first = load_cached(&path).unwrap();

        let path = write_csv(dir.path(), "A,2000,Drama,8.5,100,,\nB,2001,Drama,9.0,50,,\n");
        let later = SystemTime::now() + Duration::from_secs(60);
        std::fs::File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(later)
            .unwrap();

        let second = load_cached(&path).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 2);
    }

    #[test]
    fn failures_are_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.csv");
        assert!(matches!(load_cached(&missing), Err(DataLoadError::Io { .. })));

        let path = dir.path().join("bad.csv");
        std::fs::write(&path, "title,year\nA,2000\n").unwrap();
        assert!(load_cached(&path).is_err());
        assert!(load_cached(&path).is_err());
    }
}
