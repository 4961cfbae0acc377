//! Configuration types for the tabular cleaner.
//!
//! Use [`CleanerConfig::builder()`] for a validated configuration, or
//! [`CleanerConfig::default()`] for the standard 1st/99th percentile capping.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Cell values read as missing in addition to empty fields.
///
/// Matches the tokens common CSV tooling (pandas `read_csv`) treats as NA.
pub const DEFAULT_NULL_VALUES: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn default_null_values() -> Vec<String> {
    DEFAULT_NULL_VALUES.iter().map(|token| token.to_string()).collect()
}

/// Configuration for loading, profiling and cleaning datasets.
///
/// # Example
///
/// ```rust
/// use tabular_cleaner::CleanerConfig;
///
/// let config = CleanerConfig::builder()
///     .lower_percentile(0.05)
///     .upper_percentile(0.95)
///     .build()
///     .unwrap();
/// assert_eq!(config.lower_percentile, 0.05);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanerConfig {
    /// Quantile used as the lower capping bound (0.0 - 1.0).
    /// Default: 0.01
    pub lower_percentile: f64,

    /// Quantile used as the upper capping bound (0.0 - 1.0).
    /// Default: 0.99
    pub upper_percentile: f64,

    /// String columns with at most this many distinct values are categorical.
    /// Default: 20
    pub categorical_max_unique: usize,

    /// Number of rows polars scans to infer column dtypes.
    /// `None` scans the whole file so a late non-numeric value is never missed.
    /// Default: None
    pub infer_schema_rows: Option<usize>,

    /// Exact cell values read as missing. Empty fields are always missing.
    /// Default: [`DEFAULT_NULL_VALUES`]
    #[serde(default = "default_null_values")]
    pub null_values: Vec<String>,

    /// Directory holding the CSV datasets (used by `list` and `generate`).
    /// Default: "data"
    pub data_dir: PathBuf,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            lower_percentile: 0.01,
            upper_percentile: 0.99,
            categorical_max_unique: 20,
            infer_schema_rows: None,
            null_values: default_null_values(),
            data_dir: PathBuf::from("data"),
        }
    }
}

impl CleanerConfig {
    /// Create a new configuration builder.
    pub fn builder() -> CleanerConfigBuilder {
        CleanerConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        for (field, value) in [
            ("lower_percentile", self.lower_percentile),
            ("upper_percentile", self.upper_percentile),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigValidationError::InvalidPercentile {
                    field: field.to_string(),
                    value,
                });
            }
        }

        if self.lower_percentile >= self.upper_percentile {
            return Err(ConfigValidationError::InvertedBounds {
                lower: self.lower_percentile,
                upper: self.upper_percentile,
            });
        }

        if self.categorical_max_unique == 0 {
            return Err(ConfigValidationError::InvalidCategoricalLimit(
                self.categorical_max_unique,
            ));
        }

        if self.infer_schema_rows == Some(0) {
            return Err(ConfigValidationError::InvalidSchemaRows);
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid percentile for '{field}': {value} (must be between 0.0 and 1.0)")]
    InvalidPercentile { field: String, value: f64 },

    #[error("Lower percentile {lower} must be below upper percentile {upper}")]
    InvertedBounds { lower: f64, upper: f64 },

    #[error("Invalid categorical limit: {0} (must be at least 1)")]
    InvalidCategoricalLimit(usize),

    #[error("Schema inference needs at least one row")]
    InvalidSchemaRows,
}

/// Builder for [`CleanerConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct CleanerConfigBuilder {
    lower_percentile: Option<f64>,
    upper_percentile: Option<f64>,
    categorical_max_unique: Option<usize>,
    infer_schema_rows: Option<usize>,
    null_values: Option<Vec<String>>,
    data_dir: Option<PathBuf>,
}

impl CleanerConfigBuilder {
    /// Set the lower capping quantile (e.g., 0.01 = 1st percentile).
    pub fn lower_percentile(mut self, quantile: f64) -> Self {
        self.lower_percentile = Some(quantile);
        self
    }

    /// Set the upper capping quantile (e.g., 0.99 = 99th percentile).
    pub fn upper_percentile(mut self, quantile: f64) -> Self {
        self.upper_percentile = Some(quantile);
        self
    }

    /// Set the distinct-value limit under which string columns are categorical.
    pub fn categorical_max_unique(mut self, limit: usize) -> Self {
        self.categorical_max_unique = Some(limit);
        self
    }

    /// Limit dtype inference to the first `rows` rows.
    pub fn infer_schema_rows(mut self, rows: usize) -> Self {
        self.infer_schema_rows = Some(rows);
        self
    }

    /// Replace the tokens read as missing values.
    pub fn null_values<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.null_values = Some(tokens.into_iter().map(Into::into).collect());
        self
    }

    /// Set the dataset directory.
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(path.into());
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `CleanerConfig` or an error if validation fails.
    pub fn build(self) -> Result<CleanerConfig, ConfigValidationError> {
        let defaults = CleanerConfig::default();
        let config = CleanerConfig {
            lower_percentile: self.lower_percentile.unwrap_or(defaults.lower_percentile),
            upper_percentile: self.upper_percentile.unwrap_or(defaults.upper_percentile),
            categorical_max_unique: self
                .categorical_max_unique
                .unwrap_or(defaults.categorical_max_unique),
            infer_schema_rows: self.infer_schema_rows.or(defaults.infer_schema_rows),
            null_values: self.null_values.unwrap_or(defaults.null_values),
            data_dir: self.data_dir.unwrap_or(defaults.data_dir),
        };

        config.validate()?;
        Ok(config)
    }
}
