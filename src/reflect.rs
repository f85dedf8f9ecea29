//! Reflection interface to live database metadata
//!
//! The validator reaches the outside world through two capability traits:
//! a [`SchemaReflector`] that returns the actual column layout of a table,
//! and a [`DataMaterializer`] that loads its rows for value-level checks.
//! Connection handling, SQL, and driver concerns live entirely behind these
//! traits. A live descriptor is fetched fresh on every validation call and
//! never cached; drift must always be checked against current reality.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::{Result, SchemaError};
use crate::frame::Frame;

/// Identifies a table, optionally qualified by a namespace (the database
/// schema in most engines).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableRef {
    pub name: String,
    pub namespace: Option<String>,
}

impl TableRef {
    /// An unqualified table name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
        }
    }

    /// A namespace-qualified table name
    pub fn with_namespace(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: Some(namespace.into()),
        }
    }

    /// `namespace.name`, or just `name` when unqualified
    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{}.{}", ns, self.name),
            None => self.name.clone(),
        }
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{}.{}", ns, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A column as the database reports it: name, native type name, and
/// whether the engine allows nulls in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveColumn {
    pub name: String,
    pub type_name: String,
    pub nullable: bool,
}

impl LiveColumn {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>, nullable: bool) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            nullable,
        }
    }
}

/// Freshly reflected columns of a live table, in table order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveTable {
    columns: Vec<LiveColumn>,
}

impl LiveTable {
    pub fn new(columns: Vec<LiveColumn>) -> Self {
        Self { columns }
    }

    /// Look up a live column by exact name
    pub fn get(&self, name: &str) -> Option<&LiveColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn columns(&self) -> &[LiveColumn] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Capability to reflect the actual column layout of a table.
///
/// Implementations fail with [`SchemaError::TableNotFound`] when the table
/// does not exist, and with [`SchemaError::Reflection`] for other metadata
/// failures. Neither is ever reported as a validation error.
pub trait SchemaReflector {
    fn reflect(&mut self, table: &TableRef) -> Result<LiveTable>;
}

/// Capability to load a table's rows into a [`Frame`] for value checks.
pub trait DataMaterializer {
    fn materialize(&mut self, table: &TableRef) -> Result<Frame>;
}

/// In-memory backend implementing both capabilities, for tests and
/// documentation examples.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    tables: HashMap<String, (LiveTable, Frame)>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table with columns only (no rows)
    pub fn insert(&mut self, table: TableRef, columns: LiveTable) {
        self.insert_with_rows(table, columns, Frame::new());
    }

    /// Register a table with columns and materialized rows
    pub fn insert_with_rows(&mut self, table: TableRef, columns: LiveTable, rows: Frame) {
        self.tables.insert(table.qualified_name(), (columns, rows));
    }
}

impl SchemaReflector for MemoryBackend {
    fn reflect(&mut self, table: &TableRef) -> Result<LiveTable> {
        self.tables
            .get(&table.qualified_name())
            .map(|(columns, _)| columns.clone())
            .ok_or_else(|| SchemaError::TableNotFound {
                table: table.qualified_name(),
            })
    }
}

impl DataMaterializer for MemoryBackend {
    fn materialize(&mut self, table: &TableRef) -> Result<Frame> {
        self.tables
            .get(&table.qualified_name())
            .map(|(_, rows)| rows.clone())
            .ok_or_else(|| SchemaError::TableNotFound {
                table: table.qualified_name(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_name() {
        assert_eq!(TableRef::new("events").qualified_name(), "events");
        assert_eq!(
            TableRef::with_namespace("events", "public").qualified_name(),
            "public.events"
        );
    }

    #[test]
    fn test_live_table_lookup() {
        let live = LiveTable::new(vec![
            LiveColumn::new("id", "bigint", false),
            LiveColumn::new("name", "text", true),
        ]);
        assert_eq!(live.len(), 2);
        assert_eq!(live.get("name").unwrap().type_name, "text");
        assert!(live.get("missing").is_none());
    }

    #[test]
    fn test_memory_backend_reflects_registered_tables() {
        let mut backend = MemoryBackend::new();
        backend.insert(
            TableRef::with_namespace("users", "public"),
            LiveTable::new(vec![LiveColumn::new("id", "bigint", false)]),
        );

        let live = backend
            .reflect(&TableRef::with_namespace("users", "public"))
            .unwrap();
        assert_eq!(live.len(), 1);
    }

    #[test]
    fn test_memory_backend_unknown_table() {
        let mut backend = MemoryBackend::new();
        let err = backend.reflect(&TableRef::new("ghost")).unwrap_err();
        assert!(matches!(err, SchemaError::TableNotFound { .. }));

        let err = backend.materialize(&TableRef::new("ghost")).unwrap_err();
        assert!(matches!(err, SchemaError::TableNotFound { .. }));
    }
}
