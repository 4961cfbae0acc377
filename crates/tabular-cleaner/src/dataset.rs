//! In-memory dataset: a polars DataFrame plus one [`ColumnKind`] per column.
//!
//! Kinds are inferred once in [`Dataset::from_frame`]. String columns whose
//! values all parse as numbers are converted to Float64 at that point, so
//! every later numeric computation reads a real numeric column.

use crate::config::CleanerConfig;
use crate::error::{CleanerError, Result};
use crate::profiler::{coerce_to_float, infer_column_kind};
use crate::types::ColumnKind;
use crate::utils::{float_cells, is_numeric_dtype, null_non_finite};
use polars::io::csv::read::NullValues;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

/// A loaded table with its column kinds.
#[derive(Debug, Clone)]
pub struct Dataset {
    frame: DataFrame,
    kinds: Vec<ColumnKind>,
}

impl Dataset {
    /// Load a comma-separated file with a header row.
    ///
    /// Empty fields and the configured null tokens (`NA`, `null`, ...)
    /// become missing values.
    pub fn load(path: impl AsRef<Path>, config: &CleanerConfig) -> Result<Self> {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(CleanerError::not_found(path));
        }

        let null_values = (!config.null_values.is_empty()).then(|| {
            NullValues::AllColumns(
                config
                    .null_values
                    .iter()
                    .map(|token| PlSmallStr::from(token.as_str()))
                    .collect(),
            )
        });

        let frame = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(config.infer_schema_rows)
            .map_parse_options(|opts| opts.with_null_values(null_values.clone()))
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .map_err(|e| {
                debug!("Could not open {}: {}", path.display(), e);
                CleanerError::not_found(path)
            })?
            .finish()
            .map_err(|e| CleanerError::parse(path, e))?;

        info!("Loaded {}: {:?}", path.display(), frame.shape());

        Self::from_frame(frame, config).map_err(|e| match e {
            // coercion only fails on malformed content at load time
            CleanerError::TypeCoercion { column, reason } => {
                CleanerError::parse(path, format!("column '{column}': {reason}"))
            }
            other => other,
        })
    }

    /// Wrap an existing DataFrame, inferring column kinds.
    pub fn from_frame(mut frame: DataFrame, config: &CleanerConfig) -> Result<Self> {
        let mut kinds = Vec::with_capacity(frame.width());
        let mut coerced = Vec::new();

        for column in frame.get_columns() {
            let series = column.as_materialized_series();
            let kind = infer_column_kind(series, config.categorical_max_unique)
                .map_err(|e| CleanerError::type_coercion(series.name().as_str(), e))?;

            if kind.is_numeric() {
                if !is_numeric_dtype(series.dtype()) {
                    coerced.push(coerce_to_float(series)?);
                } else if let Some(finite) = null_non_finite(series)
                    .map_err(|e| CleanerError::type_coercion(series.name().as_str(), e))?
                {
                    coerced.push(finite);
                }
            }
            kinds.push(kind);
        }

        // NaN and infinities are stored as missing values
        for series in coerced {
            let name = series.name().to_string();
            debug!("Converted column '{}' to finite Float64", name);
            frame
                .replace(&name, series)
                .map_err(|e| CleanerError::type_coercion(&name, e))?;
        }

        Ok(Self { frame, kinds })
    }

    /// Write the dataset as CSV, creating parent directories and overwriting
    /// any existing file.
    pub fn write_csv(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| CleanerError::io(parent, e))?;
        }

        let file = File::create(path).map_err(|e| CleanerError::io(path, e))?;
        CsvWriter::new(file)
            .include_header(true)
            .finish(&mut self.frame)
            .map_err(|e| CleanerError::io(path, std::io::Error::other(e)))?;

        info!("Wrote {} rows to {}", self.height(), path.display());
        Ok(())
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn width(&self) -> usize {
        self.frame.width()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    pub fn kinds(&self) -> &[ColumnKind] {
        &self.kinds
    }

    pub fn kind(&self, name: &str) -> Option<ColumnKind> {
        let idx = self.frame.get_column_index(name)?;
        self.kinds.get(idx).copied()
    }

    /// Names of the numeric columns, in column order.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.column_names()
            .into_iter()
            .zip(self.kinds.iter())
            .filter(|(_, kind)| kind.is_numeric())
            .map(|(name, _)| name)
            .collect()
    }

    pub fn series(&self, name: &str) -> Result<&Series> {
        self.frame
            .column(name)
            .map(|col| col.as_materialized_series())
            .map_err(|e| CleanerError::type_coercion(name, e))
    }

    pub fn missing_count(&self, name: &str) -> Result<usize> {
        Ok(self.series(name)?.null_count())
    }

    /// Cells of a numeric column (None = missing).
    ///
    /// Fails with `TypeCoercion` if the column is not numeric.
    pub fn numeric_cells(&self, name: &str) -> Result<Vec<Option<f64>>> {
        match self.kind(name) {
            Some(ColumnKind::Numeric) => {}
            Some(kind) => {
                return Err(CleanerError::type_coercion(
                    name,
                    format!("column holds {kind} values"),
                ));
            }
            None => return Err(CleanerError::type_coercion(name, "no such column")),
        }
        float_cells(self.series(name)?).map_err(|e| CleanerError::type_coercion(name, e))
    }

    /// Non-missing values of a numeric column, in row order.
    pub fn numeric_values(&self, name: &str) -> Result<Vec<f64>> {
        Ok(self.numeric_cells(name)?.into_iter().flatten().collect())
    }

    /// Replace a column with a Series of the same name and length.
    pub fn replace_series(&mut self, series: Series) -> Result<()> {
        let name = series.name().to_string();
        self.frame
            .replace(&name, series)
            .map_err(|e| CleanerError::type_coercion(&name, e))?;
        Ok(())
    }

    /// Keep only the rows whose flag is `true`, preserving order.
    pub fn retain_rows(&mut self, keep: &[bool]) -> Result<()> {
        let mask = BooleanChunked::from_slice("keep".into(), keep);
        self.frame = self
            .frame
            .filter(&mask)
            .map_err(|e| CleanerError::type_coercion("<rows>", e))?;
        Ok(())
    }

    /// Every cell rendered as text, column by column (None = missing).
    ///
    /// Used to compare whole rows for equality.
    pub(crate) fn text_columns(&self) -> Result<Vec<Vec<Option<String>>>> {
        self.frame
            .get_columns()
            .iter()
            .map(|col| {
                let series = col.as_materialized_series();
                let name = series.name().to_string();
                let as_text = series
                    .cast(&DataType::String)
                    .map_err(|e| CleanerError::type_coercion(&name, e))?;
                let cells = as_text
                    .str()
                    .map_err(|e| CleanerError::type_coercion(&name, e))?
                    .into_iter()
                    .map(|cell| cell.map(str::to_owned))
                    .collect();
                Ok(cells)
            })
            .collect()
    }
}
