//! Property resolution: effective property sets of interfaces and objects.

use crate::{
    InterfacePropertyDef, ObjectPropertyDef, Registry, RegistryError, RegistryResult,
};
use ontoc_core::{Identifier, PropertyType};
use std::collections::HashMap;

/// Where a resolved interface property comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertySource {
    /// A registered shared property type.
    Shared,
    /// An inline property declared on the given interface.
    Inline { interface: Identifier },
}

/// A property of an interface after walking its `extends` chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProperty {
    pub id: Identifier,
    pub property_type: PropertyType,
    pub display_name: String,
    pub required: bool,
    pub source: PropertySource,
}

/// The entity whose property type is requested.
#[derive(Debug, Clone, Copy)]
pub enum PropertyOwner<'a> {
    Object(&'a Identifier),
    Interface(&'a Identifier),
}

/// Computes effective property sets against a registry.
#[derive(Debug, Clone, Copy)]
pub struct PropertyResolver<'r> {
    registry: &'r Registry,
}

impl<'r> PropertyResolver<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Effective properties of an interface: own properties first, then
    /// each extended interface depth-first, de-duplicated by identifier.
    pub fn interface_properties(&self, id: &Identifier) -> RegistryResult<Vec<ResolvedProperty>> {
        let mut result = Vec::new();
        let mut seen: HashMap<Identifier, usize> = HashMap::new();
        let mut path = Vec::new();
        self.collect_interface_properties(id, id, &mut path, &mut result, &mut seen)?;
        Ok(result)
    }

    fn collect_interface_properties(
        &self,
        root: &Identifier,
        id: &Identifier,
        path: &mut Vec<Identifier>,
        result: &mut Vec<ResolvedProperty>,
        seen: &mut HashMap<Identifier, usize>,
    ) -> RegistryResult<()> {
        if path.contains(id) {
            path.push(id.clone());
            return Err(RegistryError::interface_cycle(root, path));
        }
        let referenced_by = path
            .last()
            .map(|p| p.to_string())
            .unwrap_or_else(|| "action".to_string());
        let interface = self
            .registry
            .get_interface_type(id)
            .ok_or_else(|| RegistryError::unknown_interface_type(id, referenced_by))?;
        path.push(id.clone());

        for property in &interface.properties {
            let resolved = self.resolve_interface_property(interface.id.clone(), property)?;
            match seen.get(&resolved.id) {
                Some(&index) => {
                    let existing = &result[index];
                    if existing.property_type != resolved.property_type {
                        return Err(RegistryError::conflicting_property_type(
                            &resolved.id,
                            root,
                            &existing.property_type,
                            &resolved.property_type,
                        ));
                    }
                }
                None => {
                    seen.insert(resolved.id.clone(), result.len());
                    result.push(resolved);
                }
            }
        }

        for parent in &interface.extends {
            self.collect_interface_properties(root, parent, path, result, seen)?;
        }

        path.pop();
        Ok(())
    }

    fn resolve_interface_property(
        &self,
        interface: Identifier,
        property: &InterfacePropertyDef,
    ) -> RegistryResult<ResolvedProperty> {
        match property {
            InterfacePropertyDef::Shared {
                shared_property_type,
                required,
            } => {
                let spt = self
                    .registry
                    .get_shared_property_type(shared_property_type)
                    .ok_or_else(|| {
                        RegistryError::unknown_shared_property_type(
                            shared_property_type,
                            interface.to_string(),
                        )
                    })?;
                Ok(ResolvedProperty {
                    id: spt.id.clone(),
                    property_type: spt.property_type.clone(),
                    display_name: spt.display_name.clone(),
                    required: *required,
                    source: PropertySource::Shared,
                })
            }
            InterfacePropertyDef::Inline {
                id,
                property_type,
                display_name,
                required,
            } => Ok(ResolvedProperty {
                id: id.clone(),
                property_type: property_type.clone(),
                display_name: display_name.clone(),
                required: *required,
                source: PropertySource::Inline { interface },
            }),
        }
    }

    /// Effective properties of an object: its own declared properties.
    pub fn object_properties(&self, id: &Identifier) -> RegistryResult<&'r [ObjectPropertyDef]> {
        self.registry
            .get_object_type(id)
            .map(|o| o.properties.as_slice())
            .ok_or_else(|| RegistryError::unknown_object_type(id))
    }

    /// Normalized type of one property of an entity.
    pub fn property_type(&self, owner: PropertyOwner<'_>, property: &str) -> RegistryResult<PropertyType> {
        match owner {
            PropertyOwner::Object(id) => self
                .object_properties(id)?
                .iter()
                .find(|p| p.api_name == property)
                .map(|p| p.property_type.clone())
                .ok_or_else(|| RegistryError::unknown_property(property, id.to_string())),
            PropertyOwner::Interface(id) => self
                .interface_properties(id)?
                .into_iter()
                .find(|p| p.id.as_str() == property)
                .map(|p| p.property_type)
                .ok_or_else(|| RegistryError::unknown_property(property, id.to_string())),
        }
    }
}
