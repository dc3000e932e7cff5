//! Builders that validate entity definitions and register them.
//!
//! Every builder stages its work and touches the [`Registry`] only from
//! `done()`, after validation succeeded. A failing definition leaves the
//! registry exactly as it was.

use crate::{
    Entity, InterfaceImplementation, InterfacePropertyDef, InterfaceTypeDef, ObjectPropertyDef,
    ObjectTypeDef, PropertyMapping, PropertyResolver, Registry, RegistryError, RegistryResult,
    SharedPropertyTypeDef, ValueTypeDef,
};
use ontoc_core::{validate_api_name, EntityName, Identifier, Namespace, PropertyType};
use std::collections::HashSet;

/// Builder for a shared property type.
pub struct SharedPropertyTypeBuilder<'a> {
    registry: &'a mut Registry,
    namespace: &'a Namespace,
    def: SharedPropertyTypeDef,
    value_type: Option<EntityName>,
    strict: bool,
}

impl<'a> SharedPropertyTypeBuilder<'a> {
    pub fn new(
        registry: &'a mut Registry,
        namespace: &'a Namespace,
        name: impl Into<EntityName>,
        property_type: PropertyType,
    ) -> Self {
        let id = namespace.qualify(name);
        Self {
            registry,
            namespace,
            def: SharedPropertyTypeDef::new(id, property_type),
            value_type: None,
            strict: true,
        }
    }

    /// Toggle identifier syntax validation.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.def.display_name = display_name.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.def.description = Some(description.into());
        self
    }

    /// Constrain the property with a registered value type.
    pub fn value_type(mut self, name: impl Into<EntityName>) -> Self {
        self.value_type = Some(name.into());
        self
    }

    /// Finish building this shared property type.
    pub fn done(mut self) -> RegistryResult<Identifier> {
        if self.strict {
            self.def.id.validate()?;
        }
        if let Some(name) = self.value_type.take() {
            let value_type = self.namespace.qualify(name);
            if self.registry.get_value_type(&value_type).is_none() {
                return Err(RegistryError::unknown_value_type(
                    &value_type,
                    self.def.id.to_string(),
                ));
            }
            self.def.value_type = Some(value_type);
        }
        let id = self.def.id.clone();
        self.registry.register(Entity::SharedPropertyType(self.def));
        Ok(id)
    }
}

/// Builder for an interface type.
pub struct InterfaceTypeBuilder<'a> {
    registry: &'a mut Registry,
    namespace: &'a Namespace,
    def: InterfaceTypeDef,
    /// Shared property types defined inline, registered with the interface.
    staged: Vec<SharedPropertyTypeDef>,
    strict: bool,
}

impl<'a> InterfaceTypeBuilder<'a> {
    pub fn new(
        registry: &'a mut Registry,
        namespace: &'a Namespace,
        name: impl Into<EntityName>,
    ) -> Self {
        let id = namespace.qualify(name);
        Self {
            registry,
            namespace,
            def: InterfaceTypeDef::new(id),
            staged: Vec::new(),
            strict: true,
        }
    }

    /// Toggle identifier syntax validation.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.def.display_name = display_name.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.def.description = Some(description.into());
        self
    }

    /// Extend another interface.
    pub fn extends(mut self, name: impl Into<EntityName>) -> Self {
        self.def.extends.push(self.namespace.qualify(name));
        self
    }

    /// Reference a registered shared property type as a required property.
    pub fn property(mut self, spt: impl Into<EntityName>) -> Self {
        self.def.properties.push(InterfacePropertyDef::Shared {
            shared_property_type: self.namespace.qualify(spt),
            required: true,
        });
        self
    }

    /// Reference a registered shared property type as an optional property.
    pub fn optional_property(mut self, spt: impl Into<EntityName>) -> Self {
        self.def.properties.push(InterfacePropertyDef::Shared {
            shared_property_type: self.namespace.qualify(spt),
            required: false,
        });
        self
    }

    /// Define a shared property type together with the interface and reference it.
    pub fn define_property(
        mut self,
        spt: impl Into<EntityName>,
        property_type: PropertyType,
    ) -> Self {
        let id = self.namespace.qualify(spt);
        self.staged.push(SharedPropertyTypeDef::new(id.clone(), property_type));
        self.def.properties.push(InterfacePropertyDef::Shared {
            shared_property_type: id,
            required: true,
        });
        self
    }

    /// Declare a property that only exists on this interface.
    pub fn inline_property(
        mut self,
        api_name: impl Into<EntityName>,
        property_type: PropertyType,
    ) -> Self {
        let id = self.namespace.qualify(api_name);
        let display_name = id.local_name().to_string();
        self.def.properties.push(InterfacePropertyDef::Inline {
            id,
            property_type,
            display_name,
            required: true,
        });
        self
    }

    /// Finish building this interface type.
    pub fn done(self) -> RegistryResult<Identifier> {
        let id = self.def.id.clone();
        if self.strict {
            id.validate()?;
            for property in &self.def.properties {
                property.id().validate()?;
            }
        }

        let mut seen = HashSet::new();
        for property in &self.def.properties {
            if !seen.insert(property.id().clone()) {
                return Err(RegistryError::duplicate_property(
                    property.id().to_string(),
                    id.to_string(),
                ));
            }
        }

        // Resolve against a staged copy so conflicts, cycles and dangling
        // references are rejected before anything is committed.
        let mut staged = self.registry.clone();
        for spt in self.staged {
            staged.register(Entity::SharedPropertyType(spt));
        }
        staged.register(Entity::InterfaceType(self.def));
        PropertyResolver::new(&staged).interface_properties(&id)?;

        *self.registry = staged;
        Ok(id)
    }
}

/// A property declared on an object builder, resolved in `done()`.
enum PendingProperty {
    Declared(ObjectPropertyDef),
    Shared {
        api_name: String,
        spt: Identifier,
    },
}

impl PendingProperty {
    fn api_name(&self) -> &str {
        match self {
            PendingProperty::Declared(def) => &def.api_name,
            PendingProperty::Shared { api_name, .. } => api_name,
        }
    }
}

/// Builder for an object type.
pub struct ObjectTypeBuilder<'a> {
    registry: &'a mut Registry,
    namespace: &'a Namespace,
    id: Identifier,
    display_name: Option<String>,
    plural_display_name: Option<String>,
    description: Option<String>,
    primary_key: Option<String>,
    title_property: Option<String>,
    properties: Vec<PendingProperty>,
    implements: Vec<(Identifier, Vec<PropertyMapping>)>,
    strict: bool,
}

impl<'a> ObjectTypeBuilder<'a> {
    pub fn new(
        registry: &'a mut Registry,
        namespace: &'a Namespace,
        name: impl Into<EntityName>,
    ) -> Self {
        let id = namespace.qualify(name);
        Self {
            registry,
            namespace,
            id,
            display_name: None,
            plural_display_name: None,
            description: None,
            primary_key: None,
            title_property: None,
            properties: Vec::new(),
            implements: Vec::new(),
            strict: true,
        }
    }

    /// Toggle identifier syntax validation.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn plural_display_name(mut self, plural: impl Into<String>) -> Self {
        self.plural_display_name = Some(plural.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn primary_key(mut self, api_name: impl Into<String>) -> Self {
        self.primary_key = Some(api_name.into());
        self
    }

    pub fn title_property(mut self, api_name: impl Into<String>) -> Self {
        self.title_property = Some(api_name.into());
        self
    }

    /// Add a property.
    pub fn property(mut self, api_name: impl Into<String>, property_type: PropertyType) -> Self {
        self.properties
            .push(PendingProperty::Declared(ObjectPropertyDef::new(api_name, property_type)));
        self
    }

    /// Add a fully specified property.
    pub fn property_def(mut self, def: ObjectPropertyDef) -> Self {
        self.properties.push(PendingProperty::Declared(def));
        self
    }

    /// Add a property backed by a shared property type.
    pub fn shared_property(mut self, api_name: impl Into<String>, spt: impl Into<EntityName>) -> Self {
        self.properties.push(PendingProperty::Shared {
            api_name: api_name.into(),
            spt: self.namespace.qualify(spt),
        });
        self
    }

    /// Implement an interface with explicit (interface property, object property) mappings.
    pub fn implements<N, P>(
        mut self,
        interface: impl Into<EntityName>,
        mappings: impl IntoIterator<Item = (N, P)>,
    ) -> Self
    where
        N: Into<EntityName>,
        P: Into<String>,
    {
        let namespace = self.namespace;
        let interface = namespace.qualify(interface);
        let mappings = mappings
            .into_iter()
            .map(|(property, object_property)| PropertyMapping {
                interface_property: namespace.qualify(property),
                object_property: object_property.into(),
            })
            .collect();
        self.implements.push((interface, mappings));
        self
    }

    /// Finish building this object type.
    pub fn done(self) -> RegistryResult<Identifier> {
        let id = self.id.clone();
        let entity = id.to_string();
        if self.strict {
            id.validate()?;
            for property in &self.properties {
                validate_api_name(property.api_name())?;
            }
        }

        let mut properties = Vec::with_capacity(self.properties.len());
        let mut seen = HashSet::new();
        for pending in self.properties {
            if !seen.insert(pending.api_name().to_string()) {
                return Err(RegistryError::duplicate_property(pending.api_name(), &entity));
            }
            let def = match pending {
                PendingProperty::Declared(def) => def,
                PendingProperty::Shared { api_name, spt } => {
                    let shared = self
                        .registry
                        .get_shared_property_type(&spt)
                        .ok_or_else(|| RegistryError::unknown_shared_property_type(&spt, &entity))?;
                    ObjectPropertyDef::new(api_name, shared.property_type.clone())
                        .with_display_name(shared.display_name.clone())
                        .with_shared_property_type(spt)
                }
            };
            properties.push(def);
        }

        let primary_key = self
            .primary_key
            .ok_or_else(|| RegistryError::MissingPrimaryKey { object: id.clone() })?;
        if !properties.iter().any(|p| p.api_name == primary_key) {
            return Err(RegistryError::unknown_property(&primary_key, &entity));
        }
        let title_property = self.title_property.unwrap_or_else(|| primary_key.clone());
        if !properties.iter().any(|p| p.api_name == title_property) {
            return Err(RegistryError::unknown_property(&title_property, &entity));
        }

        let resolver = PropertyResolver::new(&*self.registry);
        let mut implements = Vec::with_capacity(self.implements.len());
        for (interface, mappings) in self.implements {
            implements.push(resolve_implementation(
                &resolver,
                &id,
                &properties,
                interface,
                mappings,
            )?);
        }

        let display_name = self
            .display_name
            .unwrap_or_else(|| id.local_name().to_string());
        let plural_display_name = self
            .plural_display_name
            .unwrap_or_else(|| format!("{}s", display_name));

        self.registry.register(Entity::ObjectType(ObjectTypeDef {
            id: id.clone(),
            display_name,
            plural_display_name,
            description: self.description,
            primary_key,
            title_property,
            properties,
            implements,
        }));
        Ok(id)
    }
}

/// Check an interface implementation and complete its mappings with
/// properties backed by the interface's shared property types.
fn resolve_implementation(
    resolver: &PropertyResolver<'_>,
    object: &Identifier,
    properties: &[ObjectPropertyDef],
    interface: Identifier,
    mut mappings: Vec<PropertyMapping>,
) -> RegistryResult<InterfaceImplementation> {
    let effective = resolver.interface_properties(&interface)?;

    for mapping in &mappings {
        let expected = effective
            .iter()
            .find(|p| p.id == mapping.interface_property)
            .ok_or_else(|| {
                RegistryError::unknown_property(
                    mapping.interface_property.to_string(),
                    interface.to_string(),
                )
            })?;
        let actual = properties
            .iter()
            .find(|p| p.api_name == mapping.object_property)
            .ok_or_else(|| {
                RegistryError::unknown_property(&mapping.object_property, object.to_string())
            })?;
        if expected.property_type != actual.property_type {
            return Err(RegistryError::MappingTypeMismatch {
                property: expected.id.clone(),
                interface: interface.clone(),
                object_property: actual.api_name.clone(),
                expected: expected.property_type.clone(),
                actual: actual.property_type.clone(),
            });
        }
    }

    for property in &effective {
        if mappings.iter().any(|m| m.interface_property == property.id) {
            continue;
        }
        // Properties backed by the same shared property type map implicitly
        let backing = properties
            .iter()
            .find(|p| p.shared_property_type.as_ref() == Some(&property.id));
        match backing {
            Some(def) => mappings.push(PropertyMapping {
                interface_property: property.id.clone(),
                object_property: def.api_name.clone(),
            }),
            None if property.required => {
                return Err(RegistryError::unmapped_interface_property(
                    &property.id,
                    &interface,
                    object,
                ))
            }
            None => {}
        }
    }

    Ok(InterfaceImplementation {
        interface,
        property_mappings: mappings,
    })
}

/// Builder for a value type.
pub struct ValueTypeBuilder<'a> {
    registry: &'a mut Registry,
    def: ValueTypeDef,
}

impl<'a> ValueTypeBuilder<'a> {
    pub fn new(
        registry: &'a mut Registry,
        namespace: &Namespace,
        name: impl Into<EntityName>,
        version: impl Into<String>,
        base_type: PropertyType,
    ) -> Self {
        let id = namespace.qualify(name);
        Self {
            registry,
            def: ValueTypeDef::new(id, version, base_type),
        }
    }

    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.def.display_name = display_name.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.def.description = Some(description.into());
        self
    }

    /// Finish building this value type.
    pub fn done(self) -> RegistryResult<Identifier> {
        self.def.id.validate()?;
        let id = self.def.id.clone();
        self.registry.register(Entity::ValueType(self.def));
        Ok(id)
    }
}
