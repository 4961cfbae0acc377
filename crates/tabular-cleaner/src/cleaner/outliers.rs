//! Outlier capping (winsorizing) for numeric columns.

use crate::dataset::Dataset;
use crate::error::Result;
use crate::profiler::statistics::{STAT_DECIMALS, quantile_sorted, sorted};
use crate::types::{CapRecord, ColumnMap};
use crate::utils::round_to;
use polars::prelude::*;
use tracing::{debug, warn};

/// Handles outlier detection and treatment.
pub struct OutlierHandler;

impl OutlierHandler {
    /// Cap every numeric column at the given lower/upper quantiles.
    ///
    /// Only columns where at least one value was clipped get a record. Values
    /// already inside the bounds are left bit-for-bit unchanged.
    pub fn cap_outliers(
        dataset: &mut Dataset,
        lower_q: f64,
        upper_q: f64,
    ) -> Result<ColumnMap<CapRecord>> {
        let mut capped = ColumnMap::new();
        for name in dataset.numeric_columns() {
            if let Some(record) = Self::cap_column(dataset, &name, lower_q, upper_q)? {
                capped.insert(name, record);
            }
        }
        Ok(capped)
    }

    /// Clip one numeric column to `[quantile(lower_q), quantile(upper_q)]`.
    ///
    /// Missing cells stay missing and do not take part in the quantiles.
    pub fn cap_column(
        dataset: &mut Dataset,
        name: &str,
        lower_q: f64,
        upper_q: f64,
    ) -> Result<Option<CapRecord>> {
        let cells = dataset.numeric_cells(name)?;
        let values: Vec<f64> = cells.iter().flatten().copied().collect();
        let ordered = sorted(&values);

        let (Some(lower), Some(upper)) = (
            quantile_sorted(&ordered, lower_q),
            quantile_sorted(&ordered, upper_q),
        ) else {
            return Ok(None);
        };

        // clamp panics on NaN or inverted bounds
        if !lower.is_finite() || !upper.is_finite() || lower > upper {
            warn!(
                "Skipping capping of '{}': unusable bounds [{}, {}]",
                name, lower, upper
            );
            return Ok(None);
        }

        let capped_count = values.iter().filter(|v| **v < lower || **v > upper).count();
        if capped_count == 0 {
            return Ok(None);
        }

        let clipped: Vec<Option<f64>> = cells
            .into_iter()
            .map(|cell| cell.map(|v| v.clamp(lower, upper)))
            .collect();
        dataset.replace_series(Series::new(name.into(), clipped))?;

        debug!(
            "Capped {} values in '{}' to [{}, {}]",
            capped_count, name, lower, upper
        );
        Ok(Some(CapRecord {
            capped_count,
            lower: round_to(lower, STAT_DECIMALS),
            upper: round_to(upper, STAT_DECIMALS),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CleanerConfig;
    use polars::prelude::*;

    fn dataset(df: DataFrame) -> Dataset {
        Dataset::from_frame(df, &CleanerConfig::default()).unwrap()
    }

    #[test]
    fn test_cap_column_extreme_values() {
        // 101 values: the 1st/99th percentiles land exactly on the 2nd and 100th
        let mut values: Vec<f64> = (1..=99).map(|x| x as f64).collect();
        values.insert(0, -1000.0);
        values.push(1000.0);
        let mut ds = dataset(df!["v" => values.clone()].unwrap());

        let record = OutlierHandler::cap_column(&mut ds, "v", 0.01, 0.99)
            .unwrap()
            .unwrap();

        assert_eq!(record.capped_count, 2);
        assert_eq!(record.lower, 1.0);
        assert_eq!(record.upper, 99.0);

        let capped = ds.numeric_values("v").unwrap();
        assert_eq!(capped[0], 1.0);
        assert_eq!(capped[100], 99.0);
        // Values inside the range are untouched
        assert_eq!(&capped[1..100], &values[1..100]);
    }

    #[test]
    fn test_cap_column_interpolated_bounds() {
        // 10 values: position 9 * 0.01 = 0.09 -> 1 + 0.09 * (2 - 1)
        let mut ds = dataset(df!["v" => [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]].unwrap());

        let record = OutlierHandler::cap_column(&mut ds, "v", 0.01, 0.99)
            .unwrap()
            .unwrap();

        assert_eq!(record.capped_count, 2);
        assert_eq!(record.lower, 1.09);
        assert_eq!(record.upper, 9.91);
        assert_eq!(ds.height(), 10);
    }

    #[test]
    fn test_constant_column_not_capped() {
        let mut ds = dataset(df!["v" => [5.0, 5.0, 5.0, 5.0]].unwrap());
        assert!(OutlierHandler::cap_column(&mut ds, "v", 0.01, 0.99).unwrap().is_none());
    }

    #[test]
    fn test_capping_keeps_missing_cells() {
        let mut ds = dataset(df!["v" => [Some(1.0), None, Some(2.0), Some(100.0)]].unwrap());
        OutlierHandler::cap_column(&mut ds, "v", 0.01, 0.99).unwrap();
        assert_eq!(ds.missing_count("v").unwrap(), 1);
    }

    #[test]
    fn test_untouched_integer_column_keeps_dtype() {
        let mut ds = dataset(df!["v" => [3i64, 3, 3]].unwrap());
        let capped = OutlierHandler::cap_outliers(&mut ds, 0.01, 0.99).unwrap();
        assert!(capped.is_empty());
        assert_eq!(ds.series("v").unwrap().dtype(), &DataType::Int64);
    }

    #[test]
    fn test_cap_outliers_skips_text_columns() {
        let mut ds = dataset(
            df![
                "label" => ["a", "b", "c", "d"],
                "v" => [1.0, 2.0, 3.0, 400.0],
            ]
            .unwrap(),
        );
        let capped = OutlierHandler::cap_outliers(&mut ds, 0.01, 0.99).unwrap();
        assert_eq!(capped.keys().collect::<Vec<_>>(), vec!["v"]);
    }

    #[test]
    fn test_capping_is_stable_when_bounds_hit_sample_points() {
        let mut values: Vec<f64> = (0..101).map(|x| (x as f64) * 0.5).collect();
        values[0] = -50.0;
        values[100] = 500.0;
        let mut ds = dataset(df!["v" => values].unwrap());

        assert!(OutlierHandler::cap_column(&mut ds, "v", 0.01, 0.99).unwrap().is_some());
        assert!(OutlierHandler::cap_column(&mut ds, "v", 0.01, 0.99).unwrap().is_none());
    }

    #[test]
    fn test_non_finite_bounds_skip_capping() {
        // Bypasses load-time normalisation to reach the guard directly
        let values = vec![Some(0.0), Some(1.0), Some(2.0), Some(f64::NAN)];
        let mut ds = dataset(df!["v" => [0.0, 1.0, 2.0, 3.0]].unwrap());
        ds.replace_series(Series::new("v".into(), values)).unwrap();

        let capped = OutlierHandler::cap_outliers(&mut ds, 0.01, 0.99).unwrap();
        assert!(capped.is_empty());
    }

    #[test]
    fn test_inverted_quantiles_skip_capping() {
        let mut ds = dataset(df!["v" => [1.0, 2.0, 3.0, 400.0]].unwrap());
        let record = OutlierHandler::cap_column(&mut ds, "v", 0.99, 0.01).unwrap();
        assert!(record.is_none());
        assert_eq!(ds.numeric_values("v").unwrap(), vec![1.0, 2.0, 3.0, 400.0]);
    }

    #[test]
    fn test_empty_dataset() {
        let mut ds = dataset(df!["v" => Vec::<f64>::new()].unwrap());
        let capped = OutlierHandler::cap_outliers(&mut ds, 0.01, 0.99).unwrap();
        assert!(capped.is_empty());
        assert_eq!(ds.height(), 0);
    }
}
