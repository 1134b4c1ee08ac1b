use std::path::Path;

use anyhow::{Context, Result};

use super::model::MovieRecord;

/// Write cleaned records as CSV, header included.
pub fn export_csv<'a>(
    records: impl IntoIterator<Item = &'a MovieRecord>,
    path: &Path,
) -> Result<usize> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut written = 0;
    for record in records {
        writer
            .serialize(record)
            .with_context(|| format!("writing '{}' to {}", record.title, path.display()))?;
        written += 1;
    }
    writer.flush().context("flushing CSV writer")?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load;
    use crate::data::model::record;

    #[test]
    fn exported_view_reloads_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view.csv");
        let mut a = record("A, the sequel", 2000, "Drama", 8.5, 1_500);
        a.duration = Some(121.0);
        a.description = "Two lines\nof text".into();
        let b = record("B", 2001, "Drama", 9.0, 0);

        assert_eq!(export_csv([&a, &b], &path).unwrap(), 2);

        let reloaded = load(&path).unwrap();
        assert_eq!(reloaded.records, vec![a, b]);
    }
}
