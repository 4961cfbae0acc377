//! Column kind inference.

use crate::error::{CleanerError, Result};
use crate::types::ColumnKind;
use crate::utils::{
    is_boolean_dtype, is_non_finite_number, is_numeric_dtype, is_string_dtype, parse_numeric_string,
};
use polars::prelude::*;

/// Decide the semantic kind of a column.
///
/// A column is numeric when every non-missing value is a number, which makes
/// an entirely missing column numeric too. Booleans and strings with at most
/// `categorical_max_unique` distinct values are categorical; everything else
/// is text.
pub(crate) fn infer_column_kind(
    series: &Series,
    categorical_max_unique: usize,
) -> PolarsResult<ColumnKind> {
    let dtype = series.dtype();

    if is_numeric_dtype(dtype) || series.null_count() == series.len() {
        return Ok(ColumnKind::Numeric);
    }

    if is_boolean_dtype(dtype) {
        return Ok(ColumnKind::Categorical);
    }

    if !is_string_dtype(dtype) {
        return Ok(ColumnKind::Text);
    }

    let as_text = series.cast(&DataType::String)?;
    let all_numeric = as_text
        .str()?
        .into_iter()
        .flatten()
        .all(|value| parse_numeric_string(value).is_some() || is_non_finite_number(value));
    if all_numeric {
        return Ok(ColumnKind::Numeric);
    }

    let distinct = series.drop_nulls().n_unique()?;
    if distinct <= categorical_max_unique {
        Ok(ColumnKind::Categorical)
    } else {
        Ok(ColumnKind::Text)
    }
}

/// Convert a column whose values all parse as numbers into Float64.
///
/// `inf` and `NaN` cells become missing values.
///
/// Fails with `TypeCoercion` naming the first value that does not parse.
pub(crate) fn coerce_to_float(series: &Series) -> Result<Series> {
    let name = series.name().to_string();

    if is_numeric_dtype(series.dtype()) {
        return series
            .cast(&DataType::Float64)
            .map_err(|e| CleanerError::type_coercion(&name, e));
    }

    let as_text = series
        .cast(&DataType::String)
        .map_err(|e| CleanerError::type_coercion(&name, e))?;
    let chunked = as_text
        .str()
        .map_err(|e| CleanerError::type_coercion(&name, e))?;

    let mut values: Vec<Option<f64>> = Vec::with_capacity(chunked.len());
    for (row, cell) in chunked.into_iter().enumerate() {
        match cell {
            None => values.push(None),
            Some(text) => match parse_numeric_string(text) {
                Some(value) => values.push(Some(value)),
                None if is_non_finite_number(text) => values.push(None),
                None => {
                    return Err(CleanerError::type_coercion(
                        &name,
                        format!("value '{text}' at row {row} is not a number"),
                    ));
                }
            },
        }
    }

    Ok(Series::new(series.name().clone(), values))
}
