//! Median imputation for numeric columns.

use crate::dataset::Dataset;
use crate::error::{CleanerError, Result};
use crate::profiler::statistics::{STAT_DECIMALS, median};
use crate::types::{ColumnMap, FillRecord};
use crate::utils::{fill_numeric_nulls, round_to};
use tracing::{debug, warn};

/// Statistical imputation methods for filling missing values.
pub struct StatisticalImputer;

impl StatisticalImputer {
    /// Fill every numeric column that has missing values with its median.
    ///
    /// Returns one record per filled column, in column order.
    pub fn impute_numeric_medians(dataset: &mut Dataset) -> Result<ColumnMap<FillRecord>> {
        let mut filled = ColumnMap::new();
        for name in dataset.numeric_columns() {
            if let Some(record) = Self::apply_numeric_median(dataset, &name)? {
                filled.insert(name, record);
            }
        }
        Ok(filled)
    }

    /// Fill the missing cells of one numeric column with the column median.
    ///
    /// The stored value is the exact median; the record carries it rounded to
    /// 4 decimals. Returns `None` when nothing was filled, either because the
    /// column is complete or because it has no values to take a median of.
    pub fn apply_numeric_median(dataset: &mut Dataset, name: &str) -> Result<Option<FillRecord>> {
        let missing = dataset.missing_count(name)?;
        if missing == 0 {
            return Ok(None);
        }

        let values = dataset.numeric_values(name)?;
        let Some(median_val) = median(&values) else {
            warn!("Column '{}' has no values; leaving {} cells missing", name, missing);
            return Ok(None);
        };

        let filled = fill_numeric_nulls(dataset.series(name)?, median_val)
            .map_err(|e| CleanerError::type_coercion(name, e))?;
        dataset.replace_series(filled)?;

        debug!("Filled {} missing values in '{}' with median {}", missing, name, median_val);
        Ok(Some(FillRecord {
            filled_count: missing,
            fill_value: round_to(median_val, STAT_DECIMALS),
        }))
    }
}
