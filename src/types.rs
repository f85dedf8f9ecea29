//! Source type vocabularies
//!
//! Three independently-evolving vocabularies can describe a column type:
//! native scalar tokens, the columnar-validation library's width-variant
//! types, and the textual type names a live database reports. A
//! [`TypeDescriptor`] wraps any of them so callers never need to
//! pre-normalize before asking for a unified type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Native scalar and temporal type tokens.
///
/// Mirrors the plain Rust representation of a column value: `bool`, `i64`,
/// `f64`, `String`, `chrono::NaiveDate`, `chrono::NaiveDateTime`, and
/// `chrono::Duration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NativeType {
    /// Boolean
    Bool,
    /// 64-bit signed integer
    Int,
    /// 64-bit floating point
    Float,
    /// UTF-8 string
    Str,
    /// Calendar date without time
    Date,
    /// Date and time without timezone
    DateTime,
    /// Signed duration
    Duration,
}

impl NativeType {
    /// Token name used in descriptors and error messages
    pub fn name(&self) -> &'static str {
        match self {
            NativeType::Bool => "bool",
            NativeType::Int => "int",
            NativeType::Float => "float",
            NativeType::Str => "str",
            NativeType::Date => "date",
            NativeType::DateTime => "datetime",
            NativeType::Duration => "duration",
        }
    }
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Column types of the DataFrame-validation vocabulary.
///
/// Width variants (`Int8`..`Int64`, `UInt8`..`UInt64`, `Float32`/`Float64`)
/// all belong to one semantic family each; the unifier collapses them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameType {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Utf8,
    Date,
    Datetime,
    Duration,
}

impl FrameType {
    /// Token name used in descriptors and error messages
    pub fn name(&self) -> &'static str {
        match self {
            FrameType::Bool => "bool",
            FrameType::Int8 => "int8",
            FrameType::Int16 => "int16",
            FrameType::Int32 => "int32",
            FrameType::Int64 => "int64",
            FrameType::UInt8 => "uint8",
            FrameType::UInt16 => "uint16",
            FrameType::UInt32 => "uint32",
            FrameType::UInt64 => "uint64",
            FrameType::Float32 => "float32",
            FrameType::Float64 => "float64",
            FrameType::Utf8 => "utf8",
            FrameType::Date => "date",
            FrameType::Datetime => "datetime",
            FrameType::Duration => "duration",
        }
    }

    /// Whether this type belongs to the signed or unsigned integer family
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            FrameType::Int8
                | FrameType::Int16
                | FrameType::Int32
                | FrameType::Int64
                | FrameType::UInt8
                | FrameType::UInt16
                | FrameType::UInt32
                | FrameType::UInt64
        )
    }

    /// Whether this type belongs to the floating-point family
    pub fn is_float(&self) -> bool {
        matches!(self, FrameType::Float32 | FrameType::Float64)
    }
}

impl fmt::Display for FrameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A type descriptor drawn from any of the supported vocabularies.
///
/// `Sql` carries a raw type name exactly as a database reports it
/// (`"character varying(255)"`, `"timestamptz"`); this vocabulary is open,
/// which is where unification can fail. `Untyped` is the explicit no-type
/// sentinel a database uses for NULL-only columns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "vocabulary", content = "name", rename_all = "lowercase")]
pub enum TypeDescriptor {
    /// Native scalar token
    Native(NativeType),
    /// DataFrame-library token
    Frame(FrameType),
    /// Raw database type name
    Sql(String),
    /// Explicit absence of a type
    Untyped,
}

impl TypeDescriptor {
    /// Wrap a raw database type name
    pub fn sql(name: impl Into<String>) -> Self {
        TypeDescriptor::Sql(name.into())
    }
}

impl From<NativeType> for TypeDescriptor {
    fn from(t: NativeType) -> Self {
        TypeDescriptor::Native(t)
    }
}

impl From<FrameType> for TypeDescriptor {
    fn from(t: FrameType) -> Self {
        TypeDescriptor::Frame(t)
    }
}

impl From<&str> for TypeDescriptor {
    fn from(name: &str) -> Self {
        TypeDescriptor::Sql(name.to_string())
    }
}

impl From<String> for TypeDescriptor {
    fn from(name: String) -> Self {
        TypeDescriptor::Sql(name)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Native(t) => write!(f, "native:{}", t),
            TypeDescriptor::Frame(t) => write!(f, "frame:{}", t),
            TypeDescriptor::Sql(name) => write!(f, "sql:{}", name),
            TypeDescriptor::Untyped => write!(f, "untyped"),
        }
    }
}
