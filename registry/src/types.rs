//! Schema definition types.

use ontoc_core::{Identifier, PropertyType};
use serde::Serialize;

/// Shared property type definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedPropertyTypeDef {
    /// Qualified identifier.
    pub id: Identifier,
    /// Underlying value type.
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    /// Display name.
    pub display_name: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Value type constraining this property, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_type: Option<Identifier>,
}

impl SharedPropertyTypeDef {
    pub fn new(id: Identifier, property_type: PropertyType) -> Self {
        let display_name = id.local_name().to_string();
        Self {
            id,
            property_type,
            display_name,
            description: None,
            value_type: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_value_type(mut self, value_type: Identifier) -> Self {
        self.value_type = Some(value_type);
        self
    }
}

/// A property declared on an interface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InterfacePropertyDef {
    /// Reference to a registered shared property type.
    #[serde(rename_all = "camelCase")]
    Shared {
        shared_property_type: Identifier,
        required: bool,
    },
    /// Property defined directly on the interface.
    #[serde(rename_all = "camelCase")]
    Inline {
        id: Identifier,
        property_type: PropertyType,
        display_name: String,
        required: bool,
    },
}

impl InterfacePropertyDef {
    /// Identifier the property is addressed by.
    pub fn id(&self) -> &Identifier {
        match self {
            InterfacePropertyDef::Shared {
                shared_property_type,
                ..
            } => shared_property_type,
            InterfacePropertyDef::Inline { id, .. } => id,
        }
    }

    /// Whether implementing objects must map this property.
    pub fn is_required(&self) -> bool {
        match self {
            InterfacePropertyDef::Shared { required, .. }
            | InterfacePropertyDef::Inline { required, .. } => *required,
        }
    }
}

/// Interface type definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceTypeDef {
    /// Qualified identifier.
    pub id: Identifier,
    /// Display name.
    pub display_name: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Extended interfaces (weak references).
    pub extends: Vec<Identifier>,
    /// Own properties in declaration order.
    pub properties: Vec<InterfacePropertyDef>,
}

impl InterfaceTypeDef {
    pub fn new(id: Identifier) -> Self {
        let display_name = id.local_name().to_string();
        Self {
            id,
            display_name,
            description: None,
            extends: Vec::new(),
            properties: Vec::new(),
        }
    }

    /// Get an own property by identifier.
    pub fn get_property(&self, id: &Identifier) -> Option<&InterfacePropertyDef> {
        self.properties.iter().find(|p| p.id() == id)
    }
}

/// Property declared on an object type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectPropertyDef {
    /// Local api name.
    pub api_name: String,
    /// Value type.
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    /// Display name.
    pub display_name: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Backing shared property type, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_property_type: Option<Identifier>,
}

impl ObjectPropertyDef {
    pub fn new(api_name: impl Into<String>, property_type: PropertyType) -> Self {
        let api_name = api_name.into();
        Self {
            display_name: api_name.clone(),
            api_name,
            property_type,
            description: None,
            shared_property_type: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_shared_property_type(mut self, spt: Identifier) -> Self {
        self.shared_property_type = Some(spt);
        self
    }
}

/// Mapping of one interface property onto an object property.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyMapping {
    pub interface_property: Identifier,
    pub object_property: String,
}

/// An interface implemented by an object type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceImplementation {
    pub interface: Identifier,
    pub property_mappings: Vec<PropertyMapping>,
}

/// Column-mapped datasource record of an object type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Datasource {
    pub columns: Vec<ColumnMapping>,
}

/// One property-to-column mapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMapping {
    pub property: String,
    pub column: String,
}

/// Object type definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectTypeDef {
    /// Qualified identifier.
    pub id: Identifier,
    /// Display name.
    pub display_name: String,
    /// Plural display name.
    pub plural_display_name: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Primary key property api name.
    pub primary_key: String,
    /// Title property api name.
    pub title_property: String,
    /// Properties in declaration order.
    pub properties: Vec<ObjectPropertyDef>,
    /// Implemented interfaces.
    pub implements: Vec<InterfaceImplementation>,
}

impl ObjectTypeDef {
    /// Get a property definition by api name.
    pub fn get_property(&self, api_name: &str) -> Option<&ObjectPropertyDef> {
        self.properties.iter().find(|p| p.api_name == api_name)
    }

    /// Check if this object type has a property.
    pub fn has_property(&self, api_name: &str) -> bool {
        self.get_property(api_name).is_some()
    }

    /// Get all property api names in declaration order.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|p| p.api_name.as_str())
    }

    /// Check whether the object implements an interface directly.
    pub fn implements_interface(&self, interface: &Identifier) -> bool {
        self.implements.iter().any(|i| &i.interface == interface)
    }

    /// Derive the column-mapped datasource from the declared properties.
    pub fn datasource(&self) -> Datasource {
        Datasource {
            columns: self
                .properties
                .iter()
                .map(|p| ColumnMapping {
                    property: p.api_name.clone(),
                    column: p.api_name.clone(),
                })
                .collect(),
        }
    }
}

/// Value type definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueTypeDef {
    /// Qualified identifier.
    pub id: Identifier,
    /// Version string.
    pub version: String,
    /// Base property type the value type refines.
    pub base_type: PropertyType,
    /// Display name.
    pub display_name: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ValueTypeDef {
    pub fn new(id: Identifier, version: impl Into<String>, base_type: PropertyType) -> Self {
        let display_name = id.local_name().to_string();
        Self {
            id,
            version: version.into(),
            base_type,
            display_name,
            description: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Submission restriction recorded for an action type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPermission {
    pub action_type: Identifier,
    pub submitter_groups: Vec<String>,
}
