//! Unified type taxonomy
//!
//! Collapses the three source vocabularies into seven canonical semantic
//! categories plus a no-type sentinel. Resolution is layered in a fixed
//! priority order: native tokens, then DataFrame-library families, then
//! database type-name families, then the sentinel. The first family that
//! claims a descriptor wins; descriptors claimed by no family are an error,
//! never silently admitted.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use crate::error::{Result, SchemaError};
use crate::types::{FrameType, NativeType, TypeDescriptor};

/// Canonical semantic category of a column type.
///
/// `Null` is the sentinel for the absence of a type (a database's
/// null/untyped marker). It is never produced as a fallback for
/// unrecognized input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnifiedType {
    Boolean,
    Integer,
    Float,
    String,
    Date,
    DateTime,
    Timedelta,
    Null,
}

impl UnifiedType {
    /// Category name used in reports and error messages
    pub fn name(&self) -> &'static str {
        match self {
            UnifiedType::Boolean => "boolean",
            UnifiedType::Integer => "integer",
            UnifiedType::Float => "float",
            UnifiedType::String => "string",
            UnifiedType::Date => "date",
            UnifiedType::DateTime => "datetime",
            UnifiedType::Timedelta => "timedelta",
            UnifiedType::Null => "null",
        }
    }
}

impl fmt::Display for UnifiedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The canonical descriptor for each category.
///
/// Makes unification idempotent: wrapping a unified type back into a
/// descriptor and unifying again yields the same category.
impl From<UnifiedType> for TypeDescriptor {
    fn from(t: UnifiedType) -> Self {
        match t {
            UnifiedType::Boolean => TypeDescriptor::Native(NativeType::Bool),
            UnifiedType::Integer => TypeDescriptor::Native(NativeType::Int),
            UnifiedType::Float => TypeDescriptor::Native(NativeType::Float),
            UnifiedType::String => TypeDescriptor::Native(NativeType::Str),
            UnifiedType::Date => TypeDescriptor::Native(NativeType::Date),
            UnifiedType::DateTime => TypeDescriptor::Native(NativeType::DateTime),
            UnifiedType::Timedelta => TypeDescriptor::Native(NativeType::Duration),
            UnifiedType::Null => TypeDescriptor::Untyped,
        }
    }
}

/// A column normalized to its name and unified type.
///
/// Equality is the core comparison primitive: two columns match iff their
/// names and unified types are both equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnifiedColumn {
    pub name: String,
    pub dtype: UnifiedType,
}

impl UnifiedColumn {
    /// Create a new unified column
    pub fn new(name: impl Into<String>, dtype: UnifiedType) -> Self {
        Self {
            name: name.into(),
            dtype,
        }
    }
}

impl fmt::Display for UnifiedColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.dtype)
    }
}

/// Resolve any descriptor (or bare vocabulary token) to its unified type.
///
/// Accepts anything convertible into a [`TypeDescriptor`], so callers can
/// pass a `NativeType`, a `FrameType`, a raw SQL type name, or an already
/// wrapped descriptor interchangeably.
///
/// # Errors
///
/// Returns [`SchemaError::UnrecognizedType`] when the descriptor belongs to
/// no known family.
pub fn unify(descriptor: impl Into<TypeDescriptor>) -> Result<UnifiedType> {
    descriptor.into().unify()
}

impl TypeDescriptor {
    /// Resolve this descriptor to its unified type.
    ///
    /// Dispatch order is fixed: native, frame, SQL, sentinel.
    pub fn unify(&self) -> Result<UnifiedType> {
        match self {
            TypeDescriptor::Native(t) => Ok(native_family(*t)),
            TypeDescriptor::Frame(t) => Ok(frame_family(*t)),
            TypeDescriptor::Sql(name) => sql_family(name),
            TypeDescriptor::Untyped => Ok(UnifiedType::Null),
        }
    }
}

fn native_family(t: NativeType) -> UnifiedType {
    match t {
        NativeType::Bool => UnifiedType::Boolean,
        NativeType::Int => UnifiedType::Integer,
        NativeType::Float => UnifiedType::Float,
        NativeType::Str => UnifiedType::String,
        NativeType::Date => UnifiedType::Date,
        NativeType::DateTime => UnifiedType::DateTime,
        NativeType::Duration => UnifiedType::Timedelta,
    }
}

fn frame_family(t: FrameType) -> UnifiedType {
    match t {
        FrameType::Bool => UnifiedType::Boolean,
        FrameType::Int8
        | FrameType::Int16
        | FrameType::Int32
        | FrameType::Int64
        | FrameType::UInt8
        | FrameType::UInt16
        | FrameType::UInt32
        | FrameType::UInt64 => UnifiedType::Integer,
        FrameType::Float32 | FrameType::Float64 => UnifiedType::Float,
        FrameType::Utf8 => UnifiedType::String,
        FrameType::Date => UnifiedType::Date,
        FrameType::Datetime => UnifiedType::DateTime,
        FrameType::Duration => UnifiedType::Timedelta,
    }
}

/// One SQL type-name family: a membership predicate and its target category.
struct SqlFamily {
    unified: UnifiedType,
    matches: fn(&str) -> bool,
}

fn is_boolean(name: &str) -> bool {
    matches!(name, "bool" | "boolean")
}

fn is_integer(name: &str) -> bool {
    matches!(
        name,
        "smallint" | "int2" | "int" | "int4" | "integer" | "bigint" | "int8"
    )
}

fn is_float(name: &str) -> bool {
    matches!(
        name,
        "real" | "float4" | "float" | "float8" | "double precision" | "numeric" | "decimal"
    )
}

fn is_string(name: &str) -> bool {
    matches!(
        name,
        "char" | "character" | "bpchar" | "varchar" | "character varying" | "text"
    )
}

fn is_date(name: &str) -> bool {
    name == "date"
}

fn is_datetime(name: &str) -> bool {
    matches!(
        name,
        "timestamp"
            | "timestamp without time zone"
            | "timestamp with time zone"
            | "timestamptz"
            | "datetime"
    )
}

fn is_interval(name: &str) -> bool {
    name == "interval"
}

fn is_null(name: &str) -> bool {
    name == "null"
}

/// Matchers run in this order; the first family that claims a name wins.
/// The families are disjoint by construction; an overlap would be a
/// design smell, not a feature.
const SQL_FAMILIES: &[SqlFamily] = &[
    SqlFamily {
        unified: UnifiedType::Boolean,
        matches: is_boolean,
    },
    SqlFamily {
        unified: UnifiedType::Integer,
        matches: is_integer,
    },
    SqlFamily {
        unified: UnifiedType::Float,
        matches: is_float,
    },
    SqlFamily {
        unified: UnifiedType::String,
        matches: is_string,
    },
    SqlFamily {
        unified: UnifiedType::Date,
        matches: is_date,
    },
    SqlFamily {
        unified: UnifiedType::DateTime,
        matches: is_datetime,
    },
    SqlFamily {
        unified: UnifiedType::Timedelta,
        matches: is_interval,
    },
    SqlFamily {
        unified: UnifiedType::Null,
        matches: is_null,
    },
];

fn sql_family(raw: &str) -> Result<UnifiedType> {
    let name = normalize_sql_name(raw);
    SQL_FAMILIES
        .iter()
        .find(|family| (family.matches)(&name))
        .map(|family| family.unified)
        .ok_or_else(|| SchemaError::UnrecognizedType {
            descriptor: raw.to_string(),
        })
}

/// Normalize a reflected type name before family matching: lowercase, strip
/// length/precision arguments, collapse whitespace.
///
/// `"CHARACTER VARYING(255)"` becomes `"character varying"`,
/// `"Numeric(10, 2)"` becomes `"numeric"`.
fn normalize_sql_name(raw: &str) -> String {
    static ARGS: OnceLock<Regex> = OnceLock::new();
    static SPACES: OnceLock<Regex> = OnceLock::new();
    let args = ARGS.get_or_init(|| Regex::new(r"\(.*\)").expect("valid regex"));
    let spaces = SPACES.get_or_init(|| Regex::new(r"\s+").expect("valid regex"));

    let lowered = raw.trim().to_ascii_lowercase();
    let stripped = args.replace_all(&lowered, "");
    spaces.replace_all(stripped.trim(), " ").into_owned()
}
