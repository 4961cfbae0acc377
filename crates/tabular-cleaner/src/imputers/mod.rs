//! Imputation of missing values.
//!
//! Numeric columns are filled with the median of their non-missing values.

mod statistical;

pub use statistical::StatisticalImputer;
