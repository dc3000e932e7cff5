//! Literal values for ontology definitions.
//!
//! Literals are the static data an action definition can carry: parameter
//! defaults, conditional override values, comparison operands in conditions
//! and static property values in logic rules.

use serde::Serialize;
use std::fmt;

/// A statically known value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Literal {
    /// Null/missing value.
    Null,
    /// Boolean value.
    Boolean(bool),
    /// 64-bit signed integer.
    Integer(i64),
    /// 64-bit floating point.
    Double(f64),
    /// UTF-8 string.
    String(String),
    /// Calendar date in `YYYY-MM-DD` form.
    Date(String),
    /// ISO-8601 timestamp.
    Timestamp(String),
    /// List of values.
    List(Vec<Literal>),
}

impl Literal {
    /// Create a date literal.
    pub fn date(value: impl Into<String>) -> Self {
        Literal::Date(value.into())
    }

    /// Create a timestamp literal.
    pub fn timestamp(value: impl Into<String>) -> Self {
        Literal::Timestamp(value.into())
    }

    /// Create a list literal from anything convertible to literals.
    pub fn list<T: Into<Literal>>(items: impl IntoIterator<Item = T>) -> Self {
        Literal::List(items.into_iter().map(Into::into).collect())
    }

    /// Returns true if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Literal::Null)
    }

    /// Returns true if this is a list value.
    pub fn is_list(&self) -> bool {
        matches!(self, Literal::List(_))
    }

    /// Get as boolean if this is a Boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Literal::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as integer if this is an Integer value.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Literal::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as float if this is a Double or Integer value.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Literal::Double(d) => Some(*d),
            Literal::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Get as string reference if this is a String value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the items if this is a List value.
    pub fn as_list(&self) -> Option<&[Literal]> {
        match self {
            Literal::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Literal::Null => "null",
            Literal::Boolean(_) => "boolean",
            Literal::Integer(_) => "integer",
            Literal::Double(_) => "double",
            Literal::String(_) => "string",
            Literal::Date(_) => "date",
            Literal::Timestamp(_) => "timestamp",
            Literal::List(_) => "list",
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => write!(f, "null"),
            Literal::Boolean(b) => write!(f, "{}", b),
            Literal::Integer(i) => write!(f, "{}", i),
            Literal::Double(d) => write!(f, "{}", d),
            Literal::String(s) => write!(f, "\"{}\"", s),
            Literal::Date(d) => write!(f, "date:{}", d),
            Literal::Timestamp(t) => write!(f, "ts:{}", t),
            Literal::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::Boolean(b)
    }
}

impl From<i64> for Literal {
    fn from(i: i64) -> Self {
        Literal::Integer(i)
    }
}

impl From<i32> for Literal {
    fn from(i: i32) -> Self {
        Literal::Integer(i as i64)
    }
}

impl From<f64> for Literal {
    fn from(f: f64) -> Self {
        Literal::Double(f)
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::String(s)
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::String(s.to_string())
    }
}
