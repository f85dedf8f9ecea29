//! Tableguard
//!
//! Validates that a live database table conforms to a declared tabular
//! schema, catching schema drift between a producing pipeline's
//! assumptions and a table's real structure before downstream consumers
//! fail or silently compute on wrong types.
//!
//! ## Features
//!
//! - **Unified type taxonomy**: native scalar tokens, DataFrame-library
//!   types, and raw database type names all collapse into seven canonical
//!   categories plus a no-type sentinel
//! - **Complete diagnostics**: a validation pass accumulates every
//!   discrepancy (missing columns, type mismatches, nullability drift,
//!   value-check failures) into one structured report
//! - **Superset tolerance**: tables may carry undeclared columns without
//!   failing their declared consumers (opt out with `deny_undeclared`)
//! - **Pluggable backends**: reflection and row materialization are
//!   capability traits; the core never touches a driver
//!
//! ## Example
//!
//! ```
//! use tableguard::{
//!     ColumnSchema, FrameType, LiveColumn, LiveTable, MemoryBackend, Table,
//!     TableRef, TableSchema, ValidateOptions,
//! };
//!
//! let schema = TableSchema::new()
//!     .column(ColumnSchema::new("id", FrameType::Int64))
//!     .column(ColumnSchema::new("name", FrameType::Utf8).nullable(true));
//!
//! let mut backend = MemoryBackend::new();
//! backend.insert(
//!     TableRef::with_namespace("users", "public"),
//!     LiveTable::new(vec![
//!         LiveColumn::new("id", "bigint", false),
//!         LiveColumn::new("name", "character varying(80)", true),
//!     ]),
//! );
//!
//! let table = Table::with_namespace("users", "public", schema);
//! table.validate(&mut backend, ValidateOptions::default())?;
//! # Ok::<(), tableguard::SchemaError>(())
//! ```

pub mod error;
pub mod frame;
pub mod reflect;
pub mod schema;
pub mod table;
pub mod types;
pub mod unified;
pub mod validate;

pub use error::{Result, SchemaError};
pub use frame::{Frame, Series, Value};
pub use reflect::{
    DataMaterializer, LiveColumn, LiveTable, MemoryBackend, SchemaReflector, TableRef,
};
pub use schema::{Check, ColumnSchema, TableSchema};
pub use table::Table;
pub use types::{FrameType, NativeType, TypeDescriptor};
pub use unified::{unify, UnifiedColumn, UnifiedType};
pub use validate::{compare, run_checks, Discrepancy, ValidateOptions, ValidationReport};
