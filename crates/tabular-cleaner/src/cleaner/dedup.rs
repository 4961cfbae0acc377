//! Exact duplicate row removal.

use crate::dataset::Dataset;
use crate::error::Result;
use std::collections::HashSet;

/// Flag every row that repeats an earlier row across all columns.
///
/// Missing cells compare equal to each other. The first occurrence is kept.
pub(crate) fn first_occurrence_mask(dataset: &Dataset) -> Result<Vec<bool>> {
    let columns = dataset.text_columns()?;
    let mut seen: HashSet<Vec<Option<&str>>> = HashSet::with_capacity(dataset.height());

    let keep = (0..dataset.height())
        .map(|row| {
            let key: Vec<Option<&str>> = columns.iter().map(|col| col[row].as_deref()).collect();
            seen.insert(key)
        })
        .collect();

    Ok(keep)
}

/// Remove duplicate rows in place, preserving the order of survivors.
///
/// Returns the number of rows removed.
pub fn remove_duplicates(dataset: &mut Dataset) -> Result<usize> {
    let keep = first_occurrence_mask(dataset)?;
    let removed = keep.iter().filter(|k| !**k).count();
    if removed > 0 {
        dataset.retain_rows(&keep)?;
    }
    Ok(removed)
}
