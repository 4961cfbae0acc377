use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic type of a column, decided once when the dataset is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Every non-missing value is a finite number.
    Numeric,
    /// Free-form strings.
    Text,
    /// Booleans and low-cardinality strings.
    Categorical,
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Text => "text",
            Self::Categorical => "categorical",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric)
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Column-ordered map
// ============================================================================

/// Map keyed by column name that keeps insertion (column) order.
///
/// Serializes as a JSON object whose keys appear in column order, so reports
/// read the same way as the CSV header.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for ColumnMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> ColumnMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any previous value for the same column.
    pub fn insert(&mut self, column: impl Into<String>, value: V) {
        let column = column.into();
        match self.entries.iter_mut().find(|(name, _)| *name == column) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((column, value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<V: Serialize> Serialize for ColumnMap<V> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

// ============================================================================
// Profiling types
// ============================================================================

/// Missing-value count and share for one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MissingStat {
    pub missing_count: usize,
    /// Percentage of rows, rounded to 2 decimals.
    pub missing_pct: f64,
}

/// Descriptive statistics of a numeric column, rounded to 4 decimals.
///
/// Field names follow the usual `describe()` layout so the agent layer sees
/// familiar keys. Every statistic except `count` is `None` for a column
/// without values; `std` also needs at least two values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    #[serde(rename = "25%")]
    pub p25: Option<f64>,
    #[serde(rename = "50%")]
    pub p50: Option<f64>,
    #[serde(rename = "75%")]
    pub p75: Option<f64>,
    pub max: Option<f64>,
}

/// Derived view over a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    pub kind: ColumnKind,
    pub missing: MissingStat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<NumericSummary>,
}

/// Structured summary of a dataset's shape and per-column distribution.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetProfile {
    pub file: String,
    pub rows: usize,
    pub columns: usize,
    pub column_names: Vec<String>,
    pub dtypes: ColumnMap<ColumnKind>,
    pub missing_counts: ColumnMap<usize>,
    pub missing_pct: ColumnMap<f64>,
    /// Numeric columns only.
    pub statistics: ColumnMap<NumericSummary>,
    #[serde(skip)]
    pub column_profiles: Vec<ColumnProfile>,
}

impl DatasetProfile {
    /// Assemble the profile from per-column profiles, keeping column order.
    pub fn from_columns(file: impl Into<String>, rows: usize, profiles: Vec<ColumnProfile>) -> Self {
        let mut dtypes = ColumnMap::new();
        let mut missing_counts = ColumnMap::new();
        let mut missing_pct = ColumnMap::new();
        let mut statistics = ColumnMap::new();

        for profile in &profiles {
            dtypes.insert(profile.name.clone(), profile.kind);
            missing_counts.insert(profile.name.clone(), profile.missing.missing_count);
            missing_pct.insert(profile.name.clone(), profile.missing.missing_pct);
            if let Some(summary) = &profile.summary {
                statistics.insert(profile.name.clone(), summary.clone());
            }
        }

        Self {
            file: file.into(),
            rows,
            columns: profiles.len(),
            column_names: profiles.iter().map(|p| p.name.clone()).collect(),
            dtypes,
            missing_counts,
            missing_pct,
            statistics,
            column_profiles: profiles,
        }
    }
}

/// Missing values of every column, without any statistics.
#[derive(Debug, Clone, Serialize)]
pub struct MissingReport {
    pub file: String,
    pub total_rows: usize,
    pub missing_by_column: ColumnMap<MissingStat>,
}

// ============================================================================
// Cleaning types
// ============================================================================

/// Median imputation applied to one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FillRecord {
    pub filled_count: usize,
    /// Median used for the fill, rounded to 4 decimals.
    pub fill_value: f64,
}

/// Percentile capping applied to one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapRecord {
    pub capped_count: usize,
    pub lower: f64,
    pub upper: f64,
}

/// Record of every change a clean run made.
#[derive(Debug, Clone, Serialize)]
pub struct CleaningReport {
    pub input_file: String,
    pub output_file: String,
    pub original_rows: usize,
    pub filled_missing: ColumnMap<FillRecord>,
    pub duplicates_removed: usize,
    pub capped_outliers: ColumnMap<CapRecord>,
    pub cleaned_rows: usize,
}

// ============================================================================
// Dataset listing
// ============================================================================

/// A CSV file found in the data directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetEntry {
    pub name: String,
    /// File size in kilobytes, rounded to 1 decimal.
    pub size_kb: f64,
}

/// CSV files available for analysis.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetListing {
    pub directory: String,
    pub datasets: Vec<DatasetEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
