//! Data profiling: missing values, column kinds and descriptive statistics.

pub mod statistics;
mod type_inference;

pub(crate) use type_inference::{coerce_to_float, infer_column_kind};

use crate::dataset::Dataset;
use crate::error::Result;
use crate::types::{ColumnMap, ColumnProfile, DatasetProfile, MissingReport, MissingStat};
use crate::utils::percentage;
use tracing::debug;

/// Data profiler for analyzing dataset structure and distributions.
pub struct DataProfiler;

impl DataProfiler {
    /// Profile every column of a dataset.
    ///
    /// Statistics are computed for numeric columns only.
    pub fn profile_dataset(dataset: &Dataset, file: &str) -> Result<DatasetProfile> {
        let profiles = dataset
            .column_names()
            .iter()
            .map(|name| Self::profile_column(dataset, name))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "Profiled {} columns ({} numeric)",
            profiles.len(),
            profiles.iter().filter(|p| p.summary.is_some()).count()
        );

        Ok(DatasetProfile::from_columns(file, dataset.height(), profiles))
    }

    /// Missing counts and percentages for every column, no statistics.
    pub fn missing_report(dataset: &Dataset, file: &str) -> Result<MissingReport> {
        let mut missing_by_column = ColumnMap::new();
        for name in dataset.column_names() {
            let stat = Self::missing_stat(dataset, &name)?;
            missing_by_column.insert(name, stat);
        }

        Ok(MissingReport {
            file: file.to_string(),
            total_rows: dataset.height(),
            missing_by_column,
        })
    }

    fn profile_column(dataset: &Dataset, name: &str) -> Result<ColumnProfile> {
        let kind = dataset.kind(name).unwrap_or(crate::types::ColumnKind::Text);
        let missing = Self::missing_stat(dataset, name)?;

        let summary = if kind.is_numeric() {
            let values = dataset.numeric_values(name)?;
            Some(statistics::describe(&values))
        } else {
            None
        };

        Ok(ColumnProfile {
            name: name.to_string(),
            kind,
            missing,
            summary,
        })
    }

    fn missing_stat(dataset: &Dataset, name: &str) -> Result<MissingStat> {
        let missing_count = dataset.missing_count(name)?;
        Ok(MissingStat {
            missing_count,
            missing_pct: percentage(missing_count, dataset.height()),
        })
    }
}
