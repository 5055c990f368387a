//! Reference dataset selection by vintage year.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PagerError;
use crate::Result;

/// A versioned reference dataset (population snapshot).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    /// Vintage year of the dataset
    pub year: i32,
    /// Location of the dataset on disk
    pub path: PathBuf,
}

impl ReferenceEntry {
    pub fn new(year: i32, path: impl Into<PathBuf>) -> Self {
        Self {
            year,
            path: path.into(),
        }
    }
}

/// Fail with [`PagerError::MissingDataset`] unless `path` exists.
pub(crate) fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(PagerError::MissingDataset(path.to_path_buf()))
    }
}

/// Pick the entry whose year is nearest to `event_year`.
///
/// Every entry's path is checked before selection, so a registry with one bad
/// path is rejected even if that entry would not have been picked. Ties keep
/// the earliest entry in `entries`.
pub fn select_reference(entries: &[ReferenceEntry], event_year: i32) -> Result<&ReferenceEntry> {
    if entries.is_empty() {
        return Err(PagerError::EmptyRegistry);
    }
    for entry in entries {
        ensure_exists(&entry.path)?;
    }

    let mut selected = &entries[0];
    let mut best = selected.year.abs_diff(event_year);
    for entry in &entries[1..] {
        let distance = entry.year.abs_diff(event_year);
        if distance < best {
            best = distance;
            selected = entry;
        }
    }

    debug!(
        event_year,
        year = selected.year,
        path = %selected.path.display(),
        "selected population dataset"
    );
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn fixture(years: &[(i32, &str)]) -> (TempDir, Vec<ReferenceEntry>) {
        let dir = tempdir().unwrap();
        let entries = years
            .iter()
            .map(|(year, name)| {
                let path = dir.path().join(name);
                fs::write(&path, b"").unwrap();
                ReferenceEntry::new(*year, path)
            })
            .collect();
        (dir, entries)
    }

    #[test]
    fn test_selects_nearest_year() {
        let (_dir, entries) = fixture(&[(2000, "a"), (2015, "b"), (2020, "c")]);
        let selected = select_reference(&entries, 2018).unwrap();
        assert_eq!(selected.year, 2020);
        assert!(selected.path.ends_with("c"));
    }

    #[test]
    fn test_tie_keeps_earliest_entry() {
        let (_dir, entries) = fixture(&[(2010, "a"), (2020, "b")]);
        let selected = select_reference(&entries, 2015).unwrap();
        assert!(selected.path.ends_with("a"));

        let (_dir, entries) = fixture(&[(2020, "b"), (2010, "a")]);
        let selected = select_reference(&entries, 2015).unwrap();
        assert!(selected.path.ends_with("b"));
    }

    #[test]
    fn test_event_before_and_after_range() {
        let (_dir, entries) = fixture(&[(2000, "a"), (2015, "b"), (2020, "c")]);
        assert_eq!(select_reference(&entries, 1950).unwrap().year, 2000);
        assert_eq!(select_reference(&entries, 2099).unwrap().year, 2020);
        assert_eq!(select_reference(&entries, 2015).unwrap().year, 2015);
    }

    #[test]
    fn test_extreme_years_do_not_overflow() {
        let (_dir, entries) = fixture(&[(-2_147_483_000, "a"), (2020, "b")]);
        assert_eq!(select_reference(&entries, 2018).unwrap().year, 2020);
        assert_eq!(select_reference(&entries, i32::MIN).unwrap().year, -2_147_483_000);

        let (_dir, entries) = fixture(&[(i32::MAX, "a")]);
        assert_eq!(select_reference(&entries, i32::MIN).unwrap().year, i32::MAX);
    }

    #[test]
    fn test_empty_registry() {
        let err = select_reference(&[], 2018).unwrap_err();
        assert!(matches!(err, PagerError::EmptyRegistry));
    }

    #[test]
    fn test_missing_path_rejected_before_selection() {
        let (dir, mut entries) = fixture(&[(2015, "b")]);
        // Far from the event year, so it would never be picked.
        entries.push(ReferenceEntry::new(1975, dir.path().join("missing")));

        let err = select_reference(&entries, 2015).unwrap_err();
        match err {
            PagerError::MissingDataset(path) => assert!(path.ends_with("missing")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
