//! End-to-end tests for the pipeline facade: load -> clean -> statistics -> report.

use datasift::pipeline::Pipeline;
use datasift::report::ReportError;
use datasift::stats::StatsError;
use datasift::{ColumnKind, DegenerateRange, PipelineConfig, CLEANED_KEY};
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

fn csv_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

const SALES: &str = "\
region,units,price
north,10,2.5
north,10,2.5
south,,4.0
east,30,
,20,1.5
";

#[test]
fn load_reports_success_and_failure() {
    let file = csv_file(SALES);
    let mut pipeline = Pipeline::new();

    assert!(!pipeline.load("/does/not/exist.csv"));
    assert!(!pipeline.is_loaded());

    assert!(pipeline.load(file.path()));
    let table = pipeline.table().unwrap();
    assert_eq!(table.height(), 5);
    assert_eq!(table.kind("region"), Some(ColumnKind::Categorical));
    assert_eq!(table.kind("units"), Some(ColumnKind::Numeric));
}

#[test]
fn statistics_before_load_fails() {
    let pipeline = Pipeline::new();
    assert!(matches!(pipeline.statistics("units"), Err(StatsError::NoData)));
}

#[test]
fn statistics_for_unknown_column_names_it() {
    let file = csv_file(SALES);
    let mut pipeline = Pipeline::new();
    assert!(pipeline.load(file.path()));

    match pipeline.statistics("revenue") {
        Err(StatsError::ColumnNotFound(column)) => assert_eq!(column, "revenue"),
        other => panic!("expected ColumnNotFound, got {other:?}"),
    }
}

#[test]
fn statistics_read_source_table() {
    let file = csv_file(SALES);
    let mut pipeline = Pipeline::new();
    assert!(pipeline.load(file.path()));

    // units: 10, 10, 30, 20 (duplicate row still counted, absent skipped)
    let stats = pipeline.statistics("units").unwrap();
    assert!((stats.mean - 17.5).abs() < 1e-9);
    assert!((stats.median - 15.0).abs() < 1e-9);
}

#[test]
fn clean_end_to_end() {
    let file = csv_file(SALES);
    let mut pipeline = Pipeline::new();
    assert!(pipeline.load(file.path()));

    let cleaned = pipeline.clean().unwrap();
    assert_eq!(cleaned.height(), 4);
    assert_eq!(
        cleaned.column_names(),
        vec![
            "region",
            "units",
            "price",
            "units_normalized",
            "price_normalized"
        ]
    );

    // units after dedup: 10, absent, 30, 20 -> mean 20
    assert_eq!(
        cleaned.numeric_cells("units").unwrap(),
        vec![Some(10.0), Some(20.0), Some(30.0), Some(20.0)]
    );
    assert_eq!(
        cleaned.numeric_cells("units_normalized").unwrap(),
        vec![Some(0.0), Some(0.5), Some(1.0), Some(0.5)]
    );
    assert_eq!(
        cleaned.categorical_cells("region").unwrap()[3].as_deref(),
        Some("unknown")
    );

    assert_eq!(pipeline.cached(CLEANED_KEY).unwrap().height(), 4);
    assert_eq!(pipeline.table().unwrap().height(), 5);
}

#[test]
fn cleaning_twice_keeps_rows_and_values() {
    let file = csv_file(SALES);
    let mut pipeline = Pipeline::new();
    assert!(pipeline.load(file.path()));
    let once = pipeline.clean().unwrap().clone();

    let mut again = Pipeline::new().with_table(once.clone());
    let twice = again.clean().unwrap();

    assert_eq!(twice.height(), once.height());
    for column in once.numeric_columns() {
        assert_eq!(
            twice.numeric_cells(&column).unwrap(),
            once.numeric_cells(&column).unwrap()
        );
    }
    // normalized columns get normalized again
    assert!(twice
        .column_names()
        .contains(&"units_normalized_normalized".to_string()));
}

#[test]
fn custom_config_flows_through() {
    let file = csv_file("tag,v\n,3\nb,3\n");
    let config = PipelineConfig {
        missing_category: "n/a".to_string(),
        normalized_suffix: "_scaled".to_string(),
        degenerate_range: DegenerateRange::Nan,
        ..PipelineConfig::default()
    };
    let mut pipeline = Pipeline::with_config(config);
    assert!(pipeline.load(file.path()));

    let cleaned = pipeline.clean().unwrap();
    assert_eq!(cleaned.categorical_cells("tag").unwrap()[0].as_deref(), Some("n/a"));
    assert!(cleaned
        .numeric_cells("v_scaled")
        .unwrap()
        .iter()
        .all(|v| v.is_some_and(f64::is_nan)));
}

#[test]
fn report_contains_statistics() {
    let file = csv_file("score\n10\n20\n30\n");
    let dir = tempdir().unwrap();
    let out = dir.path().join("report.txt");
    std::fs::write(&out, "stale contents").unwrap();

    let mut pipeline = Pipeline::new();
    assert!(pipeline.load(file.path()));
    pipeline.generate_report(&out).unwrap();

    let report = std::fs::read_to_string(&out).unwrap();
    assert!(report.starts_with("Data Analysis Report - "));
    assert!(report.lines().any(|l| l.starts_with("mean: 20.00")));
    assert!(report.contains("Total Records: 3"));
    assert!(report.contains("Total Features: 1"));
    assert!(!report.contains("stale"));
}

#[test]
fn report_to_unwritable_path_fails() {
    let file = csv_file("score\n1\n");
    let dir = tempdir().unwrap();
    let out = dir.path().join("missing_dir").join("report.txt");

    let mut pipeline = Pipeline::new();
    assert!(pipeline.load(file.path()));
    assert!(matches!(
        pipeline.generate_report(&out),
        Err(ReportError::Io(_))
    ));
}

#[test]
fn reload_replaces_table_and_clears_cache() {
    let first = csv_file(SALES);
    let second = csv_file("x\n1\n2\n");
    let mut pipeline = Pipeline::new();

    assert!(pipeline.load(first.path()));
    pipeline.clean().unwrap();
    assert!(pipeline.load(second.path()));

    assert_eq!(pipeline.table().unwrap().column_names(), vec!["x"]);
    assert!(pipeline.cached(CLEANED_KEY).is_none());
}

#[test]
fn empty_column_stays_absent_through_clean_and_report() {
    let file = csv_file("a,b\n1,\n2,\n");
    let dir = tempdir().unwrap();
    let out = dir.path().join("report.txt");

    let mut pipeline = Pipeline::new();
    assert!(pipeline.load(file.path()));

    let cleaned = pipeline.clean().unwrap();
    assert_eq!(cleaned.kind("b"), Some(ColumnKind::Numeric));
    assert_eq!(cleaned.numeric_cells("b").unwrap(), vec![None, None]);
    assert_eq!(
        cleaned.numeric_cells("b_normalized").unwrap(),
        vec![None, None]
    );

    let stats = pipeline.statistics("b").unwrap();
    assert!(stats.mean.is_nan());
    assert!(stats.median.is_nan());

    pipeline.generate_report(&out).unwrap();
    let report = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = report.lines().collect();
    let block = lines
        .iter()
        .position(|l| *l == "Statistics for b:")
        .expect("block for the empty column");
    assert_eq!(lines[block + 1], "mean: nan");
}
