//! Data cleaning for numeric datasets.
//!
//! A clean run applies three steps in a fixed order:
//! 1. Fill missing numeric values with the column median
//! 2. Remove exact duplicate rows (first occurrence kept)
//! 3. Cap numeric values at the configured lower/upper percentiles

mod dedup;
mod outliers;

pub use dedup::remove_duplicates;
pub use outliers::OutlierHandler;

use crate::config::CleanerConfig;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::imputers::StatisticalImputer;
use crate::types::{CapRecord, ColumnMap, FillRecord};
use tracing::{debug, info};

/// Changes made by the cleaning steps, before file paths are attached.
#[derive(Debug, Clone)]
pub struct CleaningOutcome {
    pub original_rows: usize,
    pub filled_missing: ColumnMap<FillRecord>,
    pub duplicates_removed: usize,
    pub capped_outliers: ColumnMap<CapRecord>,
    pub cleaned_rows: usize,
}

/// Data cleaner for automatic dataset cleaning operations.
pub struct DataCleaner<'a> {
    config: &'a CleanerConfig,
}

impl<'a> DataCleaner<'a> {
    pub fn new(config: &'a CleanerConfig) -> Self {
        Self { config }
    }

    /// Run impute, deduplicate and cap on the dataset in place.
    pub fn clean(&self, dataset: &mut Dataset) -> Result<CleaningOutcome> {
        let original_rows = dataset.height();
        info!("Cleaning {} rows x {} columns", original_rows, dataset.width());

        // 1. Median imputation
        let filled_missing = StatisticalImputer::impute_numeric_medians(dataset)?;
        debug!("Filled missing values in {} columns", filled_missing.len());

        // 2. Duplicate removal
        let duplicates_removed = remove_duplicates(dataset)?;
        if duplicates_removed > 0 {
            debug!("Removed {} duplicate rows", duplicates_removed);
        } else {
            debug!("No duplicate rows found");
        }

        // 3. Percentile capping
        let capped_outliers = OutlierHandler::cap_outliers(
            dataset,
            self.config.lower_percentile,
            self.config.upper_percentile,
        )?;
        debug!("Capped outliers in {} columns", capped_outliers.len());

        Ok(CleaningOutcome {
            original_rows,
            filled_missing,
            duplicates_removed,
            capped_outliers,
            cleaned_rows: dataset.height(),
        })
    }
}
