//! The entity a generated action operates on, resolved against the registry.

use crate::{CompileError, CompileResult, CrudTarget};
use ontoc_core::{Identifier, PropertyType};
use ontoc_registry::{PropertyResolver, Registry, RegistryError};
use std::collections::HashMap;

/// One property of the target, as the synthesizer sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetProperty {
    /// Object api name, or shared property type identifier for interfaces.
    pub key: String,
    /// Id of the parameter generated for this property.
    pub parameter_id: String,
    pub property_type: PropertyType,
    pub display_name: String,
}

/// A resolved action target.
#[derive(Debug, Clone)]
pub struct ActionTarget {
    id: Identifier,
    display_name: String,
    interface: bool,
    primary_key: Option<String>,
    properties: Vec<TargetProperty>,
}

impl ActionTarget {
    /// Resolve a target and its effective properties.
    pub fn resolve(registry: &Registry, target: &CrudTarget) -> CompileResult<Self> {
        match target {
            CrudTarget::Object(id) => {
                let object = registry
                    .get_object_type(id)
                    .ok_or_else(|| RegistryError::unknown_object_type(id))?;
                let properties = object
                    .properties
                    .iter()
                    .map(|p| TargetProperty {
                        key: p.api_name.clone(),
                        parameter_id: p.api_name.clone(),
                        property_type: p.property_type.clone(),
                        display_name: p.display_name.clone(),
                    })
                    .collect();
                Ok(Self {
                    id: id.clone(),
                    display_name: object.display_name.clone(),
                    interface: false,
                    primary_key: Some(object.primary_key.clone()),
                    properties,
                })
            }
            CrudTarget::Interface(id) => {
                let interface = registry
                    .get_interface_type(id)
                    .ok_or_else(|| RegistryError::unknown_interface_type(id, "action"))?;
                let resolved = PropertyResolver::new(registry).interface_properties(id)?;

                let mut owners: HashMap<String, Identifier> = HashMap::new();
                let mut properties = Vec::with_capacity(resolved.len());
                for property in resolved {
                    let parameter_id = property.id.local_name().to_string();
                    if let Some(first) = owners.get(&parameter_id) {
                        return Err(CompileError::ParameterIdCollision {
                            parameter: parameter_id,
                            first: first.clone(),
                            second: property.id,
                        });
                    }
                    owners.insert(parameter_id.clone(), property.id.clone());
                    properties.push(TargetProperty {
                        key: property.id.to_string(),
                        parameter_id,
                        property_type: property.property_type,
                        display_name: property.display_name,
                    });
                }
                Ok(Self {
                    id: id.clone(),
                    display_name: interface.display_name.clone(),
                    interface: true,
                    primary_key: None,
                    properties,
                })
            }
        }
    }

    pub fn id(&self) -> &Identifier {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn is_interface(&self) -> bool {
        self.interface
    }

    /// Primary key api name; interfaces have none.
    pub fn primary_key(&self) -> Option<&str> {
        self.primary_key.as_deref()
    }

    /// Effective properties in declaration order.
    pub fn properties(&self) -> &[TargetProperty] {
        &self.properties
    }

    /// Find a property by key.
    pub fn property(&self, key: &str) -> Option<&TargetProperty> {
        self.properties.iter().find(|p| p.key == key)
    }

    /// Find a property by the id of the parameter it generates.
    pub fn property_for_parameter(&self, parameter_id: &str) -> Option<&TargetProperty> {
        self.properties.iter().find(|p| p.parameter_id == parameter_id)
    }

    /// Find a property by key, failing with the error matching the target kind.
    pub fn require_property(&self, key: &str) -> CompileResult<&TargetProperty> {
        self.property(key).ok_or_else(|| self.unknown_property(key))
    }

    /// Error for a property key the target does not have.
    pub fn unknown_property(&self, key: &str) -> CompileError {
        if self.interface {
            CompileError::shared_property_not_in_interface(key, &self.id)
        } else {
            CompileError::unknown_property(key, &self.id)
        }
    }
}
