//! Declared-schema-bound tables
//!
//! A [`Table`] pairs a table identifier with the schema it is expected to
//! satisfy, and is the validation entry point. The connection handle is an
//! explicit parameter on every call; the validator holds no connection,
//! no cache, and no state between calls.

use tracing::debug;

use crate::error::{Result, SchemaError};
use crate::reflect::{DataMaterializer, SchemaReflector, TableRef};
use crate::schema::TableSchema;
use crate::validate::{compare, run_checks, ValidateOptions, ValidationReport};

/// A table identity bound to its declared schema.
#[derive(Debug, Clone)]
pub struct Table {
    table: TableRef,
    schema: TableSchema,
}

impl Table {
    /// Bind a schema to an unqualified table name
    pub fn new(name: impl Into<String>, schema: TableSchema) -> Self {
        Self {
            table: TableRef::new(name),
            schema,
        }
    }

    /// Bind a schema to a namespace-qualified table name
    pub fn with_namespace(
        name: impl Into<String>,
        namespace: impl Into<String>,
        schema: TableSchema,
    ) -> Self {
        Self {
            table: TableRef::with_namespace(name, namespace),
            schema,
        }
    }

    pub fn table_ref(&self) -> &TableRef {
        &self.table
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    /// Compare the declared schema against the live table and return the
    /// full report without judging it.
    ///
    /// Reflects the live columns fresh, runs the structural comparison,
    /// then materializes rows and runs value checks, but only when the
    /// schema declares any, so check-free validations cost a single
    /// metadata round-trip.
    ///
    /// # Errors
    ///
    /// Collaborator failures ([`SchemaError::TableNotFound`],
    /// [`SchemaError::Reflection`], [`SchemaError::Materialization`]) and
    /// unrecognized type descriptors propagate unchanged; they are never
    /// folded into the report.
    pub fn diff<C>(&self, conn: &mut C, options: ValidateOptions) -> Result<ValidationReport>
    where
        C: SchemaReflector + DataMaterializer,
    {
        debug!(table = %self.table, "reflecting live columns");
        let live = conn.reflect(&self.table)?;

        let mut report = ValidationReport::new(self.table.qualified_name());
        for discrepancy in compare(&self.schema, &live, options)? {
            report.push(discrepancy);
        }

        if self.schema.has_checks() {
            debug!(table = %self.table, "materializing rows for value checks");
            let frame = conn.materialize(&self.table)?;
            for discrepancy in run_checks(&self.schema, &frame) {
                report.push(discrepancy);
            }
        }

        Ok(report)
    }

    /// Validate the live table against the declared schema.
    ///
    /// Returns `Ok(())` when the table satisfies the declaration, or
    /// [`SchemaError::Validation`] carrying every discrepancy found,
    /// structural and value-level together. Never just the first.
    pub fn validate<C>(&self, conn: &mut C, options: ValidateOptions) -> Result<()>
    where
        C: SchemaReflector + DataMaterializer,
    {
        let report = self.diff(conn, options)?;
        if report.passed() {
            debug!(table = %self.table, "schema validation passed");
            Ok(())
        } else {
            debug!(
                table = %self.table,
                discrepancies = report.discrepancies.len(),
                "schema validation failed"
            );
            Err(SchemaError::Validation(report))
        }
    }
}
