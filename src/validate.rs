//! Schema comparison engine
//!
//! Compares a declared schema against freshly reflected live columns and
//! accumulates every discrepancy found, so callers get one complete
//! report to fix drift in a single pass instead of one mismatch at a time.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

use crate::error::Result;
use crate::frame::Frame;
use crate::reflect::LiveTable;
use crate::schema::TableSchema;
use crate::unified::{unify, UnifiedColumn, UnifiedType};

/// Options controlling a validation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateOptions {
    /// Compare declared nullability against the live column. Off by
    /// default: many reflection backends report permissive nullability,
    /// and enforcing it blindly produces false positives.
    pub check_nullable: bool,
    /// Record live columns missing from the declared schema. Off by
    /// default: a table is allowed to be a superset of its declared
    /// contract, so producers can add columns without breaking consumers.
    pub deny_undeclared: bool,
}

impl ValidateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable nullability comparison
    pub fn check_nullable(mut self, check: bool) -> Self {
        self.check_nullable = check;
        self
    }

    /// Treat undeclared live columns as discrepancies
    pub fn deny_undeclared(mut self, deny: bool) -> Self {
        self.deny_undeclared = deny;
        self
    }
}

/// One structural or value-level mismatch between declared and live schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Discrepancy {
    /// Declared but absent from the live table
    MissingColumn { column: String },
    /// Present in the live table but not declared
    UnexpectedColumn { column: String },
    /// Unified types differ
    TypeMismatch {
        column: String,
        expected: UnifiedType,
        actual: UnifiedType,
    },
    /// Declared and live nullability differ (either direction)
    NullabilityMismatch {
        column: String,
        expected: bool,
        actual: bool,
    },
    /// An opaque value-level check failed
    ValueCheckFailure {
        column: String,
        check: String,
        message: String,
    },
}

impl Discrepancy {
    /// The column this discrepancy concerns
    pub fn column(&self) -> &str {
        match self {
            Discrepancy::MissingColumn { column }
            | Discrepancy::UnexpectedColumn { column }
            | Discrepancy::TypeMismatch { column, .. }
            | Discrepancy::NullabilityMismatch { column, .. }
            | Discrepancy::ValueCheckFailure { column, .. } => column,
        }
    }
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Discrepancy::MissingColumn { column } => {
                write!(f, "column '{}' is declared but missing from the table", column)
            }
            Discrepancy::UnexpectedColumn { column } => {
                write!(f, "column '{}' exists in the table but is not declared", column)
            }
            Discrepancy::TypeMismatch {
                column,
                expected,
                actual,
            } => write!(
                f,
                "column '{}': expected type {}, found {}",
                column, expected, actual
            ),
            Discrepancy::NullabilityMismatch {
                column,
                expected,
                actual,
            } => write!(
                f,
                "column '{}': expected nullable={}, found nullable={}",
                column, expected, actual
            ),
            Discrepancy::ValueCheckFailure {
                column,
                check,
                message,
            } => write!(f, "column '{}': check '{}' failed: {}", column, check, message),
        }
    }
}

/// Complete result of one validation pass over one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Qualified name of the validated table
    pub table: String,
    /// Every discrepancy found, in declared-column order
    pub discrepancies: Vec<Discrepancy>,
}

impl ValidationReport {
    /// An empty (passing) report for a table
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            discrepancies: Vec::new(),
        }
    }

    /// Record a discrepancy
    pub fn push(&mut self, discrepancy: Discrepancy) {
        self.discrepancies.push(discrepancy);
    }

    /// A run passes iff no discrepancies were accumulated
    pub fn passed(&self) -> bool {
        self.discrepancies.is_empty()
    }

    /// One-line summary of the outcome
    pub fn summary(&self) -> String {
        if self.passed() {
            format!("table '{}' matches its declared schema", self.table)
        } else {
            format!(
                "table '{}' failed schema validation with {} discrepancies",
                self.table,
                self.discrepancies.len()
            )
        }
    }

    /// Serialize the report as pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())?;
        for discrepancy in &self.discrepancies {
            write!(f, "\n  - {}", discrepancy)?;
        }
        Ok(())
    }
}

/// Compare a declared schema against reflected live columns.
///
/// Pure and side-effect free: collects every structural discrepancy in
/// declared-column order, followed by undeclared live columns when
/// `deny_undeclared` is set. A declared column missing from the live table
/// is recorded once; no type comparison is attempted for it.
///
/// # Errors
///
/// Unification failures on either side are hard errors surfaced
/// immediately. An unrecognized type must never be reported as a mere
/// mismatch.
pub fn compare(
    schema: &TableSchema,
    live: &LiveTable,
    options: ValidateOptions,
) -> Result<Vec<Discrepancy>> {
    let mut found = Vec::new();

    for declared in schema.columns() {
        let Some(actual) = live.get(&declared.name) else {
            trace!(column = %declared.name, "declared column missing from live table");
            found.push(Discrepancy::MissingColumn {
                column: declared.name.clone(),
            });
            continue;
        };

        let expected = UnifiedColumn::new(&declared.name, declared.dtype.unify()?);
        let observed = UnifiedColumn::new(&actual.name, unify(actual.type_name.as_str())?);

        if expected != observed {
            found.push(Discrepancy::TypeMismatch {
                column: declared.name.clone(),
                expected: expected.dtype,
                actual: observed.dtype,
            });
        }

        if options.check_nullable && declared.nullable != actual.nullable {
            found.push(Discrepancy::NullabilityMismatch {
                column: declared.name.clone(),
                expected: declared.nullable,
                actual: actual.nullable,
            });
        }
    }

    if options.deny_undeclared {
        for column in live.columns() {
            if schema.get(&column.name).is_none() {
                found.push(Discrepancy::UnexpectedColumn {
                    column: column.name.clone(),
                });
            }
        }
    }

    Ok(found)
}

/// Run every declared value check against the materialized data.
///
/// A declared column absent from the frame is skipped here; its absence
/// is already recorded structurally.
pub fn run_checks(schema: &TableSchema, frame: &Frame) -> Vec<Discrepancy> {
    let mut found = Vec::new();

    for column in schema.columns() {
        if column.checks.is_empty() {
            continue;
        }
        let Some(series) = frame.get(&column.name) else {
            continue;
        };
        for check in &column.checks {
            trace!(column = %column.name, check = check.name(), "running value check");
            if let Err(message) = check.run(series) {
                found.push(Discrepancy::ValueCheckFailure {
                    column: column.name.clone(),
                    check: check.name().to_string(),
                    message,
                });
            }
        }
    }

    found
}
