//! Shared helpers for dtype checks, numeric parsing and rounding.

use polars::prelude::*;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Check if a DataType is boolean.
#[inline]
pub fn is_boolean_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Boolean)
}

/// Check if a DataType holds strings.
#[inline]
pub fn is_string_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::String | DataType::Categorical(_, _))
}

// =============================================================================
// String Parsing Utilities
// =============================================================================

/// Parse a cell as a finite floating-point number.
///
/// Surrounding whitespace is ignored. `NaN` and infinities are rejected so a
/// column of literal `"nan"` strings is never mistaken for numbers.
pub fn parse_numeric_string(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// True for text that parses as a float but not a finite one (`inf`, `-inf`, `NaN`).
///
/// Such cells are read as missing values.
pub fn is_non_finite_number(s: &str) -> bool {
    s.trim().parse::<f64>().is_ok_and(|v| !v.is_finite())
}

// =============================================================================
// Rounding Utilities
// =============================================================================

/// Round to a fixed number of decimal places (half away from zero).
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let rounded = (value * factor).round() / factor;
    if rounded.is_finite() { rounded } else { value }
}

/// Share of `part` in `total` as a percentage rounded to 2 decimals.
///
/// An empty table has no missing values, so a zero total yields 0.0.
pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_to(part as f64 / total as f64 * 100.0, 2)
}

// =============================================================================
// Series Utilities
// =============================================================================

/// Collect a numeric Series as `Option<f64>` cells (None = missing).
pub fn float_cells(series: &Series) -> PolarsResult<Vec<Option<f64>>> {
    let float_series = series.cast(&DataType::Float64)?;
    Ok(float_series.f64()?.into_iter().collect())
}

/// Replace NaN and infinities in a float Series with nulls.
///
/// Returns `None` when the Series is not a float column or holds only finite
/// values.
pub fn null_non_finite(series: &Series) -> PolarsResult<Option<Series>> {
    if !matches!(series.dtype(), DataType::Float32 | DataType::Float64) {
        return Ok(None);
    }
    let cells = float_cells(series)?;
    if cells.iter().flatten().all(|v| v.is_finite()) {
        return Ok(None);
    }
    let finite: Vec<Option<f64>> = cells
        .into_iter()
        .map(|cell| cell.filter(|v| v.is_finite()))
        .collect();
    Ok(Some(Series::new(series.name().clone(), finite)))
}

/// Fill null values in a numeric Series with a specific value.
///
/// The result is always Float64, the same promotion an integer column
/// undergoes once a fractional median is written into it.
pub fn fill_numeric_nulls(series: &Series, fill_value: f64) -> PolarsResult<Series> {
    let filled: Vec<f64> = float_cells(series)?
        .into_iter()
        .map(|cell| cell.unwrap_or(fill_value))
        .collect();
    Ok(Series::new(series.name().clone(), filled))
}

// =============================================================================
// Tests
// =============================================================================
