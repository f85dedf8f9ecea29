//! Materialized tabular data
//!
//! The minimal column-major representation a [`DataMaterializer`] hands to
//! value-level checks. Nulls are `None` cells.
//!
//! [`DataMaterializer`]: crate::reflect::DataMaterializer

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::unified::UnifiedType;

/// A single cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Duration(Duration),
}

impl Value {
    /// The unified category this value belongs to
    pub fn unified(&self) -> UnifiedType {
        match self {
            Value::Bool(_) => UnifiedType::Boolean,
            Value::Int(_) => UnifiedType::Integer,
            Value::Float(_) => UnifiedType::Float,
            Value::Str(_) => UnifiedType::String,
            Value::Date(_) => UnifiedType::Date,
            Value::DateTime(_) => UnifiedType::DateTime,
            Value::Duration(_) => UnifiedType::Timedelta,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

/// One materialized column: a name and its cells in row order.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    name: String,
    values: Vec<Option<Value>>,
}

impl Series {
    /// Create a series from cells
    pub fn new(name: impl Into<String>, values: Vec<Option<Value>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Convenience constructor for a series without nulls
    pub fn from_values(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self::new(name, values.into_iter().map(Some).collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[Option<Value>] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of null cells
    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }

    pub fn has_nulls(&self) -> bool {
        self.null_count() > 0
    }
}

/// Column-major table of materialized rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    series: Vec<Series>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column, builder style
    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    /// Look up a column by exact name
    pub fn get(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name == name)
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_counting() {
        let series = Series::new(
            "score",
            vec![Some(Value::Float(1.5)), None, Some(Value::Float(2.5)), None],
        );
        assert_eq!(series.len(), 4);
        assert_eq!(series.null_count(), 2);
        assert!(series.has_nulls());
    }

    #[test]
    fn test_from_values_has_no_nulls() {
        let series = Series::from_values("id", vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(series.null_count(), 0);
        assert!(!series.has_nulls());
    }

    #[test]
    fn test_frame_lookup() {
        let frame = Frame::new()
            .with_series(Series::from_values("id", vec![Value::Int(1)]))
            .with_series(Series::from_values("name", vec![Value::from("a")]));
        assert!(frame.get("id").is_some());
        assert!(frame.get("name").is_some());
        assert!(frame.get("missing").is_none());
    }

    #[test]
    fn test_value_unified_categories() {
        assert_eq!(Value::Bool(true).unified(), UnifiedType::Boolean);
        assert_eq!(Value::Int(7).unified(), UnifiedType::Integer);
        assert_eq!(Value::from("x").unified(), UnifiedType::String);
        assert_eq!(
            Value::Date(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()).unified(),
            UnifiedType::Date
        );
    }
}
