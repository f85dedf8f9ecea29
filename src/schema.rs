//! Declared table schemas
//!
//! The caller's expectation of a table's structure: an ordered set of
//! columns, each with an expected type descriptor, a nullability flag, and
//! zero or more opaque value-level checks. A declared schema is read-only
//! input for the lifetime of a validation call.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::frame::Series;
use crate::types::TypeDescriptor;

/// A value-level check delegated to the caller's validation model.
///
/// The engine treats checks as opaque: it runs each one against the
/// matching materialized column and reports failures, but never interprets
/// what a check means.
pub trait Check: Send + Sync {
    /// Short name used in failure reports
    fn name(&self) -> &str;

    /// Run against a materialized column; the `Err` message is surfaced
    /// verbatim as a value-check discrepancy.
    fn run(&self, series: &Series) -> std::result::Result<(), String>;
}

/// Declared expectation for a single column.
#[derive(Clone, Serialize, Deserialize)]
pub struct ColumnSchema {
    /// Column name, matched exactly against the live table
    pub name: String,
    /// Expected type, drawn from any supported vocabulary
    pub dtype: TypeDescriptor,
    /// Whether the column is allowed to hold nulls
    pub nullable: bool,
    /// Opaque value-level checks, run after structural comparison
    #[serde(skip)]
    pub checks: Vec<Arc<dyn Check>>,
}

impl ColumnSchema {
    /// Declare a column. Columns are non-nullable unless stated otherwise.
    pub fn new(name: impl Into<String>, dtype: impl Into<TypeDescriptor>) -> Self {
        Self {
            name: name.into(),
            dtype: dtype.into(),
            nullable: false,
            checks: Vec::new(),
        }
    }

    /// Set the nullability expectation
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Attach a value-level check
    pub fn with_check(mut self, check: impl Check + 'static) -> Self {
        self.checks.push(Arc::new(check));
        self
    }
}

impl fmt::Debug for ColumnSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSchema")
            .field("name", &self.name)
            .field("dtype", &self.dtype)
            .field("nullable", &self.nullable)
            .field(
                "checks",
                &self.checks.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

// Checks carry no identity worth comparing; two declarations are equal when
// their structural expectations are.
impl PartialEq for ColumnSchema {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.dtype == other.dtype && self.nullable == other.nullable
    }
}

/// Ordered set of declared columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    columns: Vec<ColumnSchema>,
}

impl TableSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a declared column, builder style. Declaration order is kept
    /// and drives report ordering.
    pub fn column(mut self, column: ColumnSchema) -> Self {
        self.columns.push(column);
        self
    }

    /// Look up a declared column by exact name
    pub fn get(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn columns(&self) -> &[ColumnSchema] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Whether any declared column carries a value-level check
    pub fn has_checks(&self) -> bool {
        self.columns.iter().any(|c| !c.checks.is_empty())
    }
}

impl From<Vec<ColumnSchema>> for TableSchema {
    fn from(columns: Vec<ColumnSchema>) -> Self {
        Self { columns }
    }
}
