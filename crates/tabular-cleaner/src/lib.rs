//! Tabular Data Profiling and Cleaning Library
//!
//! Profiles and cleans comma-separated tabular files with Polars, returning
//! structured reports that serialize straight to JSON for agent tool calls.
//!
//! # Overview
//!
//! - **Profiling**: shape, column kinds, missing values and describe-style
//!   statistics for every numeric column
//! - **Missing value report**: per-column missing counts and percentages
//! - **Cleaning**: median imputation, duplicate removal and percentile capping,
//!   written to a new CSV file
//! - **Sample data**: a synthetic housing dataset with gaps and outliers
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use tabular_cleaner::{CleanerConfig, TabularCleaner};
//!
//! let cleaner = TabularCleaner::new(CleanerConfig::default())?;
//!
//! let profile = cleaner.profile("data/housing.csv")?;
//! println!("{} rows x {} columns", profile.rows, profile.columns);
//!
//! let report = cleaner.clean("data/housing.csv", "output/housing_clean.csv")?;
//! println!("Removed {} duplicates", report.duplicates_removed);
//! ```
//!
//! # Tool boundary
//!
//! The [`tools`] module wraps each operation so that it always yields a
//! `serde_json::Value`; failures become `{"error": ..., "code": ...}` with a
//! code from [`CleanerError::error_code`].
//!
//! ```rust,ignore
//! use tabular_cleaner::{TabularCleaner, tools};
//!
//! let payload = tools::check_missing(&TabularCleaner::default(), "missing.csv");
//! assert_eq!(payload["code"], "NOT_FOUND");
//! ```
//!
//! # Configuration
//!
//! Use [`CleanerConfig`] to change capping bounds or categorical detection:
//!
//! ```rust,ignore
//! use tabular_cleaner::CleanerConfig;
//!
//! let config = CleanerConfig::builder()
//!     .lower_percentile(0.05)
//!     .upper_percentile(0.95)
//!     .categorical_max_unique(10)
//!     .build()?;
//! ```

pub mod cleaner;
pub mod config;
pub mod dataset;
pub mod error;
pub mod imputers;
pub mod operations;
pub mod profiler;
pub mod synthetic;
pub mod tools;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use cleaner::{CleaningOutcome, DataCleaner, OutlierHandler, remove_duplicates};
pub use config::{CleanerConfig, CleanerConfigBuilder, ConfigValidationError};
pub use dataset::Dataset;
pub use error::{CleanerError, Result as CleanerResult};
pub use imputers::StatisticalImputer;
pub use operations::TabularCleaner;
pub use profiler::DataProfiler;
pub use synthetic::{HousingParams, generate_housing};
pub use types::{
    CapRecord, CleaningReport, ColumnKind, ColumnMap, ColumnProfile, DatasetEntry, DatasetListing,
    DatasetProfile, FillRecord, MissingReport, MissingStat, NumericSummary,
};

// One cleaner instance may be shared across threads serving tool calls
static_assertions::assert_impl_all!(TabularCleaner: Send, Sync, Clone);
static_assertions::assert_impl_all!(CleanerError: Send, Sync, std::error::Error);
