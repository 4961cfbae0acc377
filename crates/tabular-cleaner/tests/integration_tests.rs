//! Integration tests for the tabular cleaner.
//!
//! These tests run each operation end to end against CSV files on disk.

use pretty_assertions::assert_eq;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tabular_cleaner::{
    CleanerConfig, CleanerError, ColumnKind, Dataset, HousingParams, TabularCleaner, tools,
};

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixture(filename: &str) -> PathBuf {
    fixtures_path().join(filename)
}

fn load(path: &Path) -> Dataset {
    Dataset::load(path, &CleanerConfig::default()).expect("Failed to load CSV file")
}

/// 101 distinct rows so the 1st/99th percentiles land on sample points.
fn write_sensor_csv(path: &Path) {
    let mut content = String::from("x,y,label\n");
    for i in 0..101usize {
        let x = match i {
            0 => "-500".to_string(),
            50 => String::new(),
            100 => "900".to_string(),
            _ => format!("{}", i as f64 * 1.5),
        };
        let y = if i == 10 { 10_000 } else { (i * 7) % 101 };
        writeln!(content, "{},{},r{}", x, y, i).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

// ============================================================================
// Error Handling
// ============================================================================

#[test]
fn test_nonexistent_path_errors() {
    let cleaner = TabularCleaner::default();
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does_not_exist.csv");
    let output = dir.path().join("out.csv");

    assert!(matches!(
        cleaner.profile(&missing),
        Err(CleanerError::NotFound { .. })
    ));
    assert!(matches!(
        cleaner.check_missing(&missing),
        Err(CleanerError::NotFound { .. })
    ));
    assert!(matches!(
        cleaner.clean(&missing, &output),
        Err(CleanerError::NotFound { .. })
    ));
    assert!(!output.exists(), "No output should be written on failure");
}

#[test]
fn test_nonexistent_path_tool_payloads() {
    let cleaner = TabularCleaner::default();
    let payload = tools::clean_data(&cleaner, "missing/input.csv", "missing/output.csv");
    assert_eq!(payload["code"], "NOT_FOUND");
    assert!(payload["error"].as_str().unwrap().contains("missing/input.csv"));
}

#[test]
fn test_unwritable_output_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    // A regular file where the output directory should be
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();

    let result = TabularCleaner::default().clean(fixture("employees.csv"), blocker.join("out.csv"));
    let err = result.unwrap_err();
    assert_eq!(err.error_code(), "IO_ERROR");
}

// ============================================================================
// Profiling
// ============================================================================

#[test]
fn test_profile_employees() {
    let profile = TabularCleaner::default()
        .profile(fixture("employees.csv"))
        .unwrap();

    assert_eq!(profile.rows, 10);
    assert_eq!(profile.columns, 4);
    assert_eq!(profile.column_names, vec!["name", "department", "age", "salary"]);
    assert_eq!(profile.dtypes.get("age"), Some(&ColumnKind::Numeric));
    assert_eq!(profile.dtypes.get("department"), Some(&ColumnKind::Categorical));
    assert_eq!(profile.missing_counts.get("age"), Some(&1));
    assert_eq!(profile.missing_pct.get("salary"), Some(&10.0));

    let age = profile.statistics.get("age").unwrap();
    assert_eq!(age.count, 9);
    assert_eq!(age.mean, Some(38.1111));
    assert_eq!(age.min, Some(28.0));
    assert_eq!(age.p25, Some(31.0));
    assert_eq!(age.p50, Some(38.0));
    assert_eq!(age.p75, Some(45.0));
    assert_eq!(age.max, Some(52.0));
    assert!(profile.statistics.get("name").is_none());
}

#[test]
fn test_check_missing_agrees_with_profile() {
    let cleaner = TabularCleaner::default();
    let path = fixture("orders.csv");

    let profile = cleaner.profile(&path).unwrap();
    let report = cleaner.check_missing(&path).unwrap();

    assert_eq!(report.total_rows, profile.rows);
    assert_eq!(report.missing_by_column.len(), profile.columns);
    for (name, stat) in report.missing_by_column.iter() {
        assert_eq!(Some(&stat.missing_count), profile.missing_counts.get(name));
        assert_eq!(Some(&stat.missing_pct), profile.missing_pct.get(name));
    }
    assert_eq!(report.missing_by_column.get("status").unwrap().missing_count, 1);
    assert_eq!(report.missing_by_column.get("amount").unwrap().missing_pct, 16.67);
}

#[test]
fn test_null_tokens_read_as_missing() {
    let cleaner = TabularCleaner::default();
    let path = fixture("na_tokens.csv");

    let profile = cleaner.profile(&path).unwrap();
    assert_eq!(profile.dtypes.get("score"), Some(&ColumnKind::Numeric));
    assert_eq!(profile.missing_counts.get("score"), Some(&2));
    assert_eq!(profile.missing_counts.get("grade"), Some(&1));
    assert_eq!(profile.statistics.get("score").unwrap().p50, Some(30.0));

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("na_tokens_clean.csv");
    let report = cleaner.clean(&path, &output).unwrap();
    let score = report.filled_missing.get("score").unwrap();
    assert_eq!(score.filled_count, 2);
    assert_eq!(score.fill_value, 30.0);
    assert!(report.filled_missing.get("grade").is_none());
    assert_eq!(load(&output).missing_count("score").unwrap(), 0);
}

fn write_non_finite_csv(path: &Path) {
    let mut content = String::from("v,label\n");
    for i in 0..20 {
        writeln!(content, "{},r{}", i, i).unwrap();
    }
    content.push_str("NaN,r20\ninf,r21\n-inf,r22\n");
    std::fs::write(path, content).unwrap();
}

#[test]
fn test_non_finite_cells_are_missing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("readings.csv");
    write_non_finite_csv(&input);

    let no_tokens = CleanerConfig::builder()
        .null_values(Vec::<String>::new())
        .build()
        .unwrap();
    for cleaner in [
        TabularCleaner::default(),
        TabularCleaner::new(no_tokens).unwrap(),
    ] {
        let profile = cleaner.profile(&input).unwrap();
        assert_eq!(profile.dtypes.get("v"), Some(&ColumnKind::Numeric));
        assert_eq!(profile.missing_counts.get("v"), Some(&3));
        assert_eq!(profile.statistics.get("v").unwrap().max, Some(19.0));

        let output = dir.path().join("readings_clean.csv");
        let report = cleaner.clean(&input, &output).unwrap();
        let fill = report.filled_missing.get("v").unwrap();
        assert_eq!(fill.filled_count, 3);
        assert_eq!(fill.fill_value, 9.5);

        let cap = report.capped_outliers.get("v").unwrap();
        assert!(cap.lower.is_finite() && cap.upper.is_finite());

        let cleaned = load(&output).numeric_values("v").unwrap();
        assert_eq!(cleaned.len(), 23);
        assert!(cleaned.iter().all(|v| (cap.lower..=cap.upper).contains(v)));
    }
}

// ============================================================================
// Cleaning
// ============================================================================

#[test]
fn test_clean_removes_single_duplicate() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("employees_clean.csv");

    let report = TabularCleaner::default()
        .clean(fixture("employees.csv"), &output)
        .unwrap();

    assert_eq!(report.original_rows, 10);
    assert_eq!(report.duplicates_removed, 1);
    assert_eq!(report.cleaned_rows, 9);

    let age = report.filled_missing.get("age").unwrap();
    assert_eq!(age.filled_count, 1);
    assert_eq!(age.fill_value, 38.0);
    let salary = report.filled_missing.get("salary").unwrap();
    assert_eq!(salary.fill_value, 66000.0);

    assert!(report.capped_outliers.contains_key("age"));
    assert!(!report.capped_outliers.contains_key("name"));

    let cleaned = load(&output);
    assert_eq!(cleaned.height(), 9);
    assert_eq!(cleaned.column_names(), vec!["name", "department", "age", "salary"]);
}

#[test]
fn test_clean_leaves_input_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("orders.csv");
    std::fs::copy(fixture("orders.csv"), &input).unwrap();
    let before = std::fs::read(&input).unwrap();

    TabularCleaner::default()
        .clean(&input, dir.path().join("nested/deeper/orders_clean.csv"))
        .unwrap();

    assert_eq!(std::fs::read(&input).unwrap(), before);
    assert!(dir.path().join("nested/deeper/orders_clean.csv").is_file());
}

#[test]
fn test_clean_fills_numeric_gaps_only() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("orders_clean.csv");

    let report = TabularCleaner::default()
        .clean(fixture("orders.csv"), &output)
        .unwrap();

    let filled: Vec<&str> = report.filled_missing.keys().collect();
    assert_eq!(filled, vec!["amount", "quantity"]);

    let cleaned = load(&output);
    for name in cleaned.numeric_columns() {
        assert_eq!(cleaned.missing_count(&name).unwrap(), 0, "{name} still has gaps");
    }
    // Text gaps are left alone
    assert_eq!(cleaned.missing_count("status").unwrap(), 1);
}

#[test]
fn test_clean_overwrites_existing_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.csv");
    std::fs::write(&output, "stale,content\n1,2\n").unwrap();

    TabularCleaner::default()
        .clean(fixture("employees.csv"), &output)
        .unwrap();

    let cleaned = load(&output);
    assert_eq!(cleaned.width(), 4);
    assert_eq!(cleaned.height(), 9);
}

#[test]
fn test_capping_bounds_and_untouched_values() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sensors.csv");
    let output = dir.path().join("sensors_clean.csv");
    write_sensor_csv(&input);

    let report = TabularCleaner::default().clean(&input, &output).unwrap();
    assert_eq!(report.duplicates_removed, 0);

    let y = report.capped_outliers.get("y").unwrap();
    assert_eq!(y.capped_count, 2);
    // 70 is replaced by the outlier, so the 99th percentile lands on 100
    assert_eq!(y.lower, 1.0);
    assert_eq!(y.upper, 100.0);

    let original = load(&input).numeric_values("y").unwrap();
    let cleaned = load(&output).numeric_values("y").unwrap();
    assert_eq!(original.len(), cleaned.len());
    for (before, after) in original.iter().zip(&cleaned) {
        assert!((y.lower..=y.upper).contains(after));
        if (y.lower..=y.upper).contains(before) {
            assert_eq!(before, after);
        }
    }
}

#[test]
fn test_second_clean_is_fixed_point() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sensors.csv");
    let first = dir.path().join("pass1.csv");
    let second = dir.path().join("pass2.csv");
    write_sensor_csv(&input);

    let cleaner = TabularCleaner::default();
    let report = cleaner.clean(&input, &first).unwrap();
    assert!(!report.filled_missing.is_empty());
    assert!(!report.capped_outliers.is_empty());

    let again = cleaner.clean(&first, &second).unwrap();
    assert_eq!(again.duplicates_removed, 0);
    assert!(again.filled_missing.is_empty());
    assert!(again.capped_outliers.is_empty());
    assert_eq!(again.cleaned_rows, report.cleaned_rows);
}

#[test]
fn test_custom_percentiles() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sensors.csv");
    write_sensor_csv(&input);

    let config = CleanerConfig::builder()
        .lower_percentile(0.1)
        .upper_percentile(0.9)
        .build()
        .unwrap();
    let report = TabularCleaner::new(config)
        .unwrap()
        .clean(&input, dir.path().join("out.csv"))
        .unwrap();

    let y = report.capped_outliers.get("y").unwrap();
    assert_eq!(y.lower, 10.0);
    assert_eq!(y.upper, 91.0);
    assert_eq!(y.capped_count, 20);
}

// ============================================================================
// Synthetic Housing Scenario
// ============================================================================

#[test]
fn test_synthetic_housing_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let raw = dir.path().join("data/housing.csv");
    let clean = dir.path().join("output/housing_clean.csv");
    let cleaner = TabularCleaner::default();

    cleaner.generate(&HousingParams::default(), &raw).unwrap();

    let missing = cleaner.check_missing(&raw).unwrap();
    assert_eq!(missing.total_rows, 1000);

    let report = cleaner.clean(&raw, &clean).unwrap();
    assert_eq!(report.duplicates_removed, 0);
    assert_eq!(report.cleaned_rows, 1000);

    let med_inc = report.filled_missing.get("MedInc").unwrap();
    assert!(
        (30..=70).contains(&med_inc.filled_count),
        "MedInc filled {} values",
        med_inc.filled_count
    );
    assert_eq!(
        med_inc.filled_count,
        missing.missing_by_column.get("MedInc").unwrap().missing_count
    );

    let income_cap = report.capped_outliers.get("MedInc").unwrap();
    assert!(income_cap.upper < 20.0, "Injected incomes must be capped");
    assert!(report.capped_outliers.contains_key("Population"));

    let after = cleaner.check_missing(&clean).unwrap();
    for (name, stat) in after.missing_by_column.iter() {
        assert_eq!(stat.missing_count, 0, "{name} still has gaps");
    }

    let incomes = load(&clean).numeric_values("MedInc").unwrap();
    let tolerance = 1e-4;
    assert!(incomes.iter().all(|v| {
        *v >= income_cap.lower - tolerance && *v <= income_cap.upper + tolerance
    }));
}

#[test]
fn test_list_generated_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let cleaner = TabularCleaner::default();
    let params = HousingParams {
        n_samples: 100,
        ..HousingParams::default()
    };
    cleaner.generate(&params, dir.path().join("housing.csv")).unwrap();

    let payload = tools::invoke(
        &cleaner,
        "list_datasets",
        &serde_json::json!({ "directory": dir.path().to_str().unwrap() }),
    );
    assert_eq!(payload["datasets"][0]["name"], "housing.csv");
    assert!(payload["datasets"][0]["size_kb"].as_f64().unwrap() > 0.0);
    assert!(payload.get("message").is_none());
}
