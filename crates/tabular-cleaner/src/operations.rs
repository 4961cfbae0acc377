//! File-level operations: every call loads its input fresh from disk.

use crate::cleaner::DataCleaner;
use crate::config::{CleanerConfig, ConfigValidationError};
use crate::dataset::Dataset;
use crate::error::{CleanerError, Result};
use crate::profiler::DataProfiler;
use crate::synthetic::{HousingParams, generate_housing};
use crate::types::{CleaningReport, DatasetEntry, DatasetListing, DatasetProfile, MissingReport};
use crate::utils::round_to;
use std::path::Path;
use tracing::{info, warn};

/// Profiles and cleans CSV files.
///
/// Holds only configuration; no state survives between calls, so one
/// instance can serve any number of independent invocations.
#[derive(Debug, Clone, Default)]
pub struct TabularCleaner {
    config: CleanerConfig,
}

impl TabularCleaner {
    /// Wrap a configuration, rejecting one that fails
    /// [`CleanerConfig::validate`].
    pub fn new(config: CleanerConfig) -> std::result::Result<Self, ConfigValidationError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CleanerConfig {
        &self.config
    }

    /// Shape, column kinds, missing values and numeric statistics of a file.
    pub fn profile(&self, path: impl AsRef<Path>) -> Result<DatasetProfile> {
        let path = path.as_ref();
        let dataset = Dataset::load(path, &self.config)?;
        DataProfiler::profile_dataset(&dataset, &path.display().to_string())
    }

    /// Missing count and percentage of every column.
    pub fn check_missing(&self, path: impl AsRef<Path>) -> Result<MissingReport> {
        let path = path.as_ref();
        let dataset = Dataset::load(path, &self.config)?;
        DataProfiler::missing_report(&dataset, &path.display().to_string())
    }

    /// Impute, deduplicate and cap `input`, writing the result to `output`.
    ///
    /// The input file is never modified. `output` is overwritten if present.
    pub fn clean(&self, input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<CleaningReport> {
        let (input, output) = (input.as_ref(), output.as_ref());
        let mut dataset = Dataset::load(input, &self.config)?;

        let outcome = DataCleaner::new(&self.config).clean(&mut dataset)?;
        dataset.write_csv(output)?;

        info!(
            "Cleaned {}: {} -> {} rows, {} columns filled, {} columns capped",
            input.display(),
            outcome.original_rows,
            outcome.cleaned_rows,
            outcome.filled_missing.len(),
            outcome.capped_outliers.len()
        );

        Ok(CleaningReport {
            input_file: input.display().to_string(),
            output_file: output.display().to_string(),
            original_rows: outcome.original_rows,
            filled_missing: outcome.filled_missing,
            duplicates_removed: outcome.duplicates_removed,
            capped_outliers: outcome.capped_outliers,
            cleaned_rows: outcome.cleaned_rows,
        })
    }

    /// CSV files in `dir`, sorted by name.
    ///
    /// A missing or empty directory yields an empty listing with a hint.
    pub fn list_datasets(&self, dir: impl AsRef<Path>) -> Result<DatasetListing> {
        let dir = dir.as_ref();
        let directory = dir.display().to_string();

        if !dir.is_dir() {
            warn!("Data directory {} does not exist", directory);
            return Ok(DatasetListing {
                directory,
                datasets: Vec::new(),
                message: Some(
                    "No data directory found. Run `tabular-cleaner generate` to create sample data."
                        .to_string(),
                ),
            });
        }

        let entries = std::fs::read_dir(dir).map_err(|_| CleanerError::not_found(dir))?;
        let mut datasets = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            let is_csv = path.extension().is_some_and(|ext| ext == "csv");
            if !is_csv || !path.is_file() {
                continue;
            }
            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            datasets.push(DatasetEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                size_kb: round_to(size as f64 / 1024.0, 1),
            });
        }
        datasets.sort_by(|a, b| a.name.cmp(&b.name));

        let message = datasets.is_empty().then(|| {
            format!(
                "No CSV files found in {}. Run `tabular-cleaner generate` to create sample data.",
                directory
            )
        });

        Ok(DatasetListing {
            directory,
            datasets,
            message,
        })
    }

    /// Write a synthetic housing dataset to `output`.
    pub fn generate(&self, params: &HousingParams, output: impl AsRef<Path>) -> Result<Dataset> {
        let output = output.as_ref();
        let frame =
            generate_housing(params).map_err(|e| CleanerError::io(output, std::io::Error::other(e)))?;
        let mut dataset = Dataset::from_frame(frame, &self.config)?;
        dataset.write_csv(output)?;
        Ok(dataset)
    }
}
