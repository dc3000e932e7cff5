//! Registry error types.

use ontoc_core::{CoreError, Identifier, PropertyType};
use thiserror::Error;

/// Errors that can occur while defining or resolving entities.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Core naming error.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Shared property type {id} referenced by {referenced_by} is not defined")]
    UnknownSharedPropertyType { id: Identifier, referenced_by: String },

    #[error("Interface type {id} referenced by {referenced_by} is not defined")]
    UnknownInterfaceType { id: Identifier, referenced_by: String },

    #[error("Object type {id} is not defined")]
    UnknownObjectType { id: Identifier },

    #[error("Value type {id} referenced by {referenced_by} is not defined")]
    UnknownValueType { id: Identifier, referenced_by: String },

    #[error("Object type {object} does not declare a primary key")]
    MissingPrimaryKey { object: Identifier },

    #[error("Property {property} does not exist on {entity}")]
    UnknownProperty { property: String, entity: String },

    #[error("Property {property} is declared more than once on {entity}")]
    DuplicateProperty { property: String, entity: String },

    #[error(
        "Property {property} resolves to conflicting types {first} and {second} in interface type {interface}"
    )]
    ConflictingPropertyType {
        property: Identifier,
        interface: Identifier,
        first: PropertyType,
        second: PropertyType,
    },

    #[error("Interface type {interface} extends itself through {path}")]
    InterfaceCycle { interface: Identifier, path: String },

    #[error("Required property {property} of interface type {interface} is not mapped by object type {object}")]
    UnmappedInterfaceProperty {
        property: Identifier,
        interface: Identifier,
        object: Identifier,
    },

    #[error("Property {object_property} of type {actual} cannot implement {property} of type {expected} on interface type {interface}")]
    MappingTypeMismatch {
        property: Identifier,
        interface: Identifier,
        object_property: String,
        expected: PropertyType,
        actual: PropertyType,
    },
}

impl RegistryError {
    pub fn unknown_shared_property_type(id: &Identifier, referenced_by: impl Into<String>) -> Self {
        Self::UnknownSharedPropertyType {
            id: id.clone(),
            referenced_by: referenced_by.into(),
        }
    }

    pub fn unknown_interface_type(id: &Identifier, referenced_by: impl Into<String>) -> Self {
        Self::UnknownInterfaceType {
            id: id.clone(),
            referenced_by: referenced_by.into(),
        }
    }

    pub fn unknown_object_type(id: &Identifier) -> Self {
        Self::UnknownObjectType { id: id.clone() }
    }

    pub fn unknown_value_type(id: &Identifier, referenced_by: impl Into<String>) -> Self {
        Self::UnknownValueType {
            id: id.clone(),
            referenced_by: referenced_by.into(),
        }
    }

    pub fn unknown_property(property: impl Into<String>, entity: impl Into<String>) -> Self {
        Self::UnknownProperty {
            property: property.into(),
            entity: entity.into(),
        }
    }

    pub fn duplicate_property(property: impl Into<String>, entity: impl Into<String>) -> Self {
        Self::DuplicateProperty {
            property: property.into(),
            entity: entity.into(),
        }
    }

    pub fn conflicting_property_type(
        property: &Identifier,
        interface: &Identifier,
        first: &PropertyType,
        second: &PropertyType,
    ) -> Self {
        Self::ConflictingPropertyType {
            property: property.clone(),
            interface: interface.clone(),
            first: first.clone(),
            second: second.clone(),
        }
    }

    pub fn interface_cycle(interface: &Identifier, path: &[Identifier]) -> Self {
        let path = path
            .iter()
            .map(Identifier::as_str)
            .collect::<Vec<_>>()
            .join(" -> ");
        Self::InterfaceCycle {
            interface: interface.clone(),
            path,
        }
    }

    pub fn unmapped_interface_property(
        property: &Identifier,
        interface: &Identifier,
        object: &Identifier,
    ) -> Self {
        Self::UnmappedInterfaceProperty {
            property: property.clone(),
            interface: interface.clone(),
            object: object.clone(),
        }
    }
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
