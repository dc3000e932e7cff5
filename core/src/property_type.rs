//! Underlying value types of ontology properties.

use serde::Serialize;
use std::fmt;

/// A field of a struct-typed property.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructField {
    /// Field api name.
    pub api_name: String,
    /// Field value type.
    pub field_type: PropertyType,
}

impl StructField {
    pub fn new(api_name: impl Into<String>, field_type: PropertyType) -> Self {
        Self {
            api_name: api_name.into(),
            field_type,
        }
    }
}

/// The value type carried by a property or shared property type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PropertyType {
    String,
    Boolean,
    Byte,
    Short,
    Integer,
    Long,
    Float,
    Double,
    Decimal,
    Date,
    Timestamp,
    Geopoint,
    Geoshape,
    Attachment,
    Marking,
    MediaReference,
    GeotimeSeries,
    Vector,
    Struct { fields: Vec<StructField> },
    Array { item: Box<PropertyType> },
}

impl PropertyType {
    /// Create an array type.
    pub fn array(item: PropertyType) -> Self {
        PropertyType::Array {
            item: Box::new(item),
        }
    }

    /// Create a struct type.
    pub fn structure(fields: impl IntoIterator<Item = StructField>) -> Self {
        PropertyType::Struct {
            fields: fields.into_iter().collect(),
        }
    }

    /// Returns true if this is an array type.
    pub fn is_array(&self) -> bool {
        matches!(self, PropertyType::Array { .. })
    }

    /// The element type for arrays, the type itself otherwise.
    pub fn item_type(&self) -> &PropertyType {
        match self {
            PropertyType::Array { item } => item,
            other => other,
        }
    }

    /// Returns the type name used in messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyType::String => "string",
            PropertyType::Boolean => "boolean",
            PropertyType::Byte => "byte",
            PropertyType::Short => "short",
            PropertyType::Integer => "integer",
            PropertyType::Long => "long",
            PropertyType::Float => "float",
            PropertyType::Double => "double",
            PropertyType::Decimal => "decimal",
            PropertyType::Date => "date",
            PropertyType::Timestamp => "timestamp",
            PropertyType::Geopoint => "geopoint",
            PropertyType::Geoshape => "geoshape",
            PropertyType::Attachment => "attachment",
            PropertyType::Marking => "marking",
            PropertyType::MediaReference => "mediaReference",
            PropertyType::GeotimeSeries => "geotimeSeries",
            PropertyType::Vector => "vector",
            PropertyType::Struct { .. } => "struct",
            PropertyType::Array { .. } => "array",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyType::Array { item } => write!(f, "array<{}>", item),
            other => f.write_str(other.type_name()),
        }
    }
}
