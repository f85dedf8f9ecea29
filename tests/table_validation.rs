//! End-to-end validation scenarios against the in-memory backend.

use tableguard::{
    unify, Check, ColumnSchema, Discrepancy, Frame, FrameType, LiveColumn, LiveTable,
    MemoryBackend, NativeType, SchemaError, Series, Table, TableRef, TableSchema, TypeDescriptor,
    UnifiedType, ValidateOptions, Value,
};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn single_column_backend(type_name: &str, nullable: bool) -> MemoryBackend {
    let mut backend = MemoryBackend::new();
    backend.insert(
        TableRef::with_namespace("example_table", "public"),
        LiveTable::new(vec![LiveColumn::new("column", type_name, nullable)]),
    );
    backend
}

fn single_column_table(dtype: impl Into<TypeDescriptor>) -> Table {
    Table::with_namespace(
        "example_table",
        "public",
        TableSchema::new().column(ColumnSchema::new("column", dtype)),
    )
}

#[test]
fn single_column_valid_dtypes() {
    init_tracing();

    let cases = [
        (FrameType::Bool, "boolean"),
        (FrameType::Int64, "bigint"),
        (FrameType::Int32, "integer"),
        (FrameType::Float64, "double precision"),
        (FrameType::Utf8, "text"),
        (FrameType::Datetime, "timestamp without time zone"),
        (FrameType::Date, "date"),
        (FrameType::Duration, "interval"),
    ];

    for (dtype, type_name) in cases {
        let table = single_column_table(dtype);
        let mut backend = single_column_backend(type_name, false);
        assert!(
            table.validate(&mut backend, ValidateOptions::default()).is_ok(),
            "{dtype:?} should accept live column of type {type_name:?}"
        );
    }
}

#[test]
fn single_column_invalid_dtypes() {
    init_tracing();

    let cases = [
        (FrameType::Bool, "text", UnifiedType::String),
        (FrameType::Int64, "double precision", UnifiedType::Float),
        (FrameType::Int64, "text", UnifiedType::String),
        (FrameType::Float64, "bigint", UnifiedType::Integer),
        (FrameType::Utf8, "boolean", UnifiedType::Boolean),
        (FrameType::Datetime, "date", UnifiedType::Date),
        (FrameType::Date, "timestamp", UnifiedType::DateTime),
        (FrameType::Duration, "bigint", UnifiedType::Integer),
    ];

    for (dtype, type_name, live_unified) in cases {
        let table = single_column_table(dtype);
        let mut backend = single_column_backend(type_name, false);

        let err = table
            .validate(&mut backend, ValidateOptions::default())
            .unwrap_err();
        let report = err.report().expect("validation failure carries a report");
        assert_eq!(
            report.discrepancies,
            vec![Discrepancy::TypeMismatch {
                column: "column".to_string(),
                expected: unify(dtype).unwrap(),
                actual: live_unified,
            }],
            "{dtype:?} vs live {type_name:?}"
        );
    }
}

#[test]
fn nullability_is_only_checked_on_request() {
    init_tracing();

    let table = Table::with_namespace(
        "example_table",
        "public",
        TableSchema::new().column(ColumnSchema::new("column", FrameType::Utf8).nullable(false)),
    );

    let mut backend = single_column_backend("character varying(40)", true);
    assert!(table
        .validate(&mut backend, ValidateOptions::default())
        .is_ok());

    let err = table
        .validate(&mut backend, ValidateOptions::new().check_nullable(true))
        .unwrap_err();
    let report = err.report().unwrap();
    assert_eq!(
        report.discrepancies,
        vec![Discrepancy::NullabilityMismatch {
            column: "column".to_string(),
            expected: false,
            actual: true,
        }]
    );
}

#[test]
fn declared_superset_fails_with_one_missing_column_each() {
    init_tracing();

    let table = Table::with_namespace(
        "example_table",
        "public",
        TableSchema::new()
            .column(ColumnSchema::new("a", FrameType::Utf8))
            .column(ColumnSchema::new("b", FrameType::Utf8)),
    );

    let mut backend = MemoryBackend::new();
    backend.insert(
        TableRef::with_namespace("example_table", "public"),
        LiveTable::new(vec![LiveColumn::new("a", "text", false)]),
    );

    let err = table
        .validate(&mut backend, ValidateOptions::default())
        .unwrap_err();
    let report = err.report().unwrap();
    assert_eq!(
        report.discrepancies,
        vec![Discrepancy::MissingColumn {
            column: "b".to_string()
        }]
    );
}

#[test]
fn live_superset_passes_by_default() {
    init_tracing();

    let table = Table::with_namespace(
        "example_table",
        "public",
        TableSchema::new().column(ColumnSchema::new("a", FrameType::Utf8)),
    );

    let mut backend = MemoryBackend::new();
    backend.insert(
        TableRef::with_namespace("example_table", "public"),
        LiveTable::new(vec![
            LiveColumn::new("a", "text", false),
            LiveColumn::new("b", "bigint", false),
        ]),
    );

    assert!(table
        .validate(&mut backend, ValidateOptions::default())
        .is_ok());
}

struct ValuesInRange {
    min: f64,
    max: f64,
}

impl Check for ValuesInRange {
    fn name(&self) -> &str {
        "values_in_range"
    }

    fn run(&self, series: &Series) -> Result<(), String> {
        for value in series.values().iter().flatten() {
            if let Value::Float(v) = value {
                if *v < self.min || *v > self.max {
                    return Err(format!("value {v} outside [{}, {}]", self.min, self.max));
                }
            }
        }
        Ok(())
    }
}

#[test]
fn value_checks_run_against_materialized_rows() {
    init_tracing();

    let table = Table::with_namespace(
        "example_table",
        "public",
        TableSchema::new().column(
            ColumnSchema::new("column", FrameType::Float64)
                .with_check(ValuesInRange { min: 0.0, max: 1.0 }),
        ),
    );

    let mut backend = MemoryBackend::new();
    backend.insert_with_rows(
        TableRef::with_namespace("example_table", "public"),
        LiveTable::new(vec![LiveColumn::new("column", "double precision", false)]),
        Frame::new().with_series(Series::from_values(
            "column",
            vec![Value::Float(0.4), Value::Float(7.5)],
        )),
    );

    let err = table
        .validate(&mut backend, ValidateOptions::default())
        .unwrap_err();
    let report = err.report().unwrap();
    assert_eq!(report.discrepancies.len(), 1);
    assert!(matches!(
        &report.discrepancies[0],
        Discrepancy::ValueCheckFailure { column, check, message }
            if column == "column" && check == "values_in_range" && message.contains("7.5")
    ));
}

#[test]
fn missing_table_is_not_a_validation_failure() {
    init_tracing();

    let table = single_column_table(NativeType::Int);
    let mut backend = MemoryBackend::new();

    let err = table
        .validate(&mut backend, ValidateOptions::default())
        .unwrap_err();
    match err {
        SchemaError::TableNotFound { table } => assert_eq!(table, "public.example_table"),
        other => panic!("expected TableNotFound, got {other:?}"),
    }
}

#[test]
fn report_serializes_with_kind_tags() {
    init_tracing();

    let table = single_column_table(FrameType::Int64);
    let mut backend = single_column_backend("double precision", false);

    let report = table
        .diff(&mut backend, ValidateOptions::default())
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

    assert_eq!(json["table"], "public.example_table");
    assert_eq!(json["discrepancies"][0]["kind"], "type_mismatch");
    assert_eq!(json["discrepancies"][0]["expected"], "integer");
    assert_eq!(json["discrepancies"][0]["actual"], "float");
}

#[test]
fn unify_is_usable_standalone() {
    assert_eq!(unify("character varying(255)").unwrap(), UnifiedType::String);
    assert_eq!(unify(FrameType::UInt32).unwrap(), UnifiedType::Integer);
    assert_eq!(unify(NativeType::Duration).unwrap(), UnifiedType::Timedelta);
    assert_eq!(unify(TypeDescriptor::Untyped).unwrap(), UnifiedType::Null);
    assert!(unify("no_such_type").is_err());
}
