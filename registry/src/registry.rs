//! The Registry - per-session entity store.

use crate::{
    ActionPermission, ActionType, InterfaceTypeDef, ObjectTypeDef, SharedPropertyTypeDef,
    ValueTypeDef,
};
use ontoc_core::Identifier;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// The kinds of entity the registry stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    SharedPropertyType,
    InterfaceType,
    ObjectType,
    ActionType,
    ValueType,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::SharedPropertyType => "shared property type",
            EntityKind::InterfaceType => "interface type",
            EntityKind::ObjectType => "object type",
            EntityKind::ActionType => "action type",
            EntityKind::ValueType => "value type",
        };
        f.write_str(name)
    }
}

/// An owned entity, as passed to [`Registry::register`] and [`Registry::import`].
#[derive(Debug, Clone)]
pub enum Entity {
    SharedPropertyType(SharedPropertyTypeDef),
    InterfaceType(InterfaceTypeDef),
    ObjectType(ObjectTypeDef),
    ActionType(Box<ActionType>),
    ValueType(ValueTypeDef),
}

impl Entity {
    /// The identifier of the wrapped entity.
    pub fn id(&self) -> &Identifier {
        match self {
            Entity::SharedPropertyType(d) => &d.id,
            Entity::InterfaceType(d) => &d.id,
            Entity::ObjectType(d) => &d.id,
            Entity::ActionType(d) => &d.id,
            Entity::ValueType(d) => &d.id,
        }
    }

    /// The kind of the wrapped entity.
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::SharedPropertyType(_) => EntityKind::SharedPropertyType,
            Entity::InterfaceType(_) => EntityKind::InterfaceType,
            Entity::ObjectType(_) => EntityKind::ObjectType,
            Entity::ActionType(_) => EntityKind::ActionType,
            Entity::ValueType(_) => EntityKind::ValueType,
        }
    }
}

/// A borrowed entity returned by [`Registry::lookup`].
#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'a> {
    SharedPropertyType(&'a SharedPropertyTypeDef),
    InterfaceType(&'a InterfaceTypeDef),
    ObjectType(&'a ObjectTypeDef),
    ActionType(&'a ActionType),
    ValueType(&'a ValueTypeDef),
}

/// One bucket of ontology entities.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OntologyBlock {
    pub shared_property_types: BTreeMap<Identifier, SharedPropertyTypeDef>,
    pub interface_types: BTreeMap<Identifier, InterfaceTypeDef>,
    pub object_types: BTreeMap<Identifier, ObjectTypeDef>,
    pub action_types: BTreeMap<Identifier, ActionType>,
}

impl OntologyBlock {
    fn insert(&mut self, entity: Entity, value_types: &mut BTreeMap<Identifier, ValueTypeDef>) -> bool {
        match entity {
            Entity::SharedPropertyType(d) => self.shared_property_types.insert(d.id.clone(), d).is_some(),
            Entity::InterfaceType(d) => self.interface_types.insert(d.id.clone(), d).is_some(),
            Entity::ObjectType(d) => self.object_types.insert(d.id.clone(), d).is_some(),
            Entity::ActionType(d) => self.action_types.insert(d.id.clone(), *d).is_some(),
            Entity::ValueType(d) => value_types.insert(d.id.clone(), d).is_some(),
        }
    }

    /// Returns true if the block holds no entities.
    pub fn is_empty(&self) -> bool {
        self.shared_property_types.is_empty()
            && self.interface_types.is_empty()
            && self.object_types.is_empty()
            && self.action_types.is_empty()
    }
}

/// The Registry holds every entity defined or imported in one session.
///
/// Local entities are emitted by [`Registry::dump`] under `ontology`;
/// imported entities take part in lookups and validation but are dumped
/// separately as reference-only.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    /// Locally defined entities.
    local: OntologyBlock,
    /// Reference-only imported entities.
    imported: OntologyBlock,
    /// Locally defined value types.
    value_types: BTreeMap<Identifier, ValueTypeDef>,
    /// Imported value types.
    imported_value_types: BTreeMap<Identifier, ValueTypeDef>,
    /// Submission restrictions keyed by action type.
    action_permissions: BTreeMap<Identifier, ActionPermission>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every entity.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    // ==================== Mutation ====================

    /// Insert or overwrite a locally defined entity.
    pub fn register(&mut self, entity: Entity) {
        let kind = entity.kind();
        let id = entity.id().clone();
        if self.local.insert(entity, &mut self.value_types) {
            tracing::warn!(%id, %kind, "overwriting previously registered entity");
        } else {
            tracing::debug!(%id, %kind, "registered entity");
        }
    }

    /// Insert a reference-only entity.
    pub fn import(&mut self, entity: Entity) {
        let kind = entity.kind();
        let id = entity.id().clone();
        self.imported.insert(entity, &mut self.imported_value_types);
        tracing::debug!(%id, %kind, "imported entity");
    }

    /// Record the submission restriction of an action type.
    pub fn register_action_permission(&mut self, permission: ActionPermission) {
        self.action_permissions
            .insert(permission.action_type.clone(), permission);
    }

    /// Drop the submission restriction of an action type, if any.
    pub fn clear_action_permission(&mut self, action_type: &Identifier) {
        self.action_permissions.remove(action_type);
    }

    // ==================== Lookups ====================

    /// Look up an entity of any kind, local entities first.
    pub fn lookup(&self, kind: EntityKind, id: &Identifier) -> Option<EntityRef<'_>> {
        match kind {
            EntityKind::SharedPropertyType => self
                .get_shared_property_type(id)
                .map(EntityRef::SharedPropertyType),
            EntityKind::InterfaceType => self.get_interface_type(id).map(EntityRef::InterfaceType),
            EntityKind::ObjectType => self.get_object_type(id).map(EntityRef::ObjectType),
            EntityKind::ActionType => self.get_action_type(id).map(EntityRef::ActionType),
            EntityKind::ValueType => self.get_value_type(id).map(EntityRef::ValueType),
        }
    }

    /// Returns true if the entity was imported rather than defined locally.
    pub fn is_imported(&self, kind: EntityKind, id: &Identifier) -> bool {
        match kind {
            EntityKind::SharedPropertyType => {
                !self.local.shared_property_types.contains_key(id)
                    && self.imported.shared_property_types.contains_key(id)
            }
            EntityKind::InterfaceType => {
                !self.local.interface_types.contains_key(id)
                    && self.imported.interface_types.contains_key(id)
            }
            EntityKind::ObjectType => {
                !self.local.object_types.contains_key(id)
                    && self.imported.object_types.contains_key(id)
            }
            EntityKind::ActionType => {
                !self.local.action_types.contains_key(id)
                    && self.imported.action_types.contains_key(id)
            }
            EntityKind::ValueType => {
                !self.value_types.contains_key(id) && self.imported_value_types.contains_key(id)
            }
        }
    }

    /// Get a shared property type by identifier.
    pub fn get_shared_property_type(&self, id: &Identifier) -> Option<&SharedPropertyTypeDef> {
        self.local
            .shared_property_types
            .get(id)
            .or_else(|| self.imported.shared_property_types.get(id))
    }

    /// Get an interface type by identifier.
    pub fn get_interface_type(&self, id: &Identifier) -> Option<&InterfaceTypeDef> {
        self.local
            .interface_types
            .get(id)
            .or_else(|| self.imported.interface_types.get(id))
    }

    /// Get an object type by identifier.
    pub fn get_object_type(&self, id: &Identifier) -> Option<&ObjectTypeDef> {
        self.local
            .object_types
            .get(id)
            .or_else(|| self.imported.object_types.get(id))
    }

    /// Get an action type by identifier.
    pub fn get_action_type(&self, id: &Identifier) -> Option<&ActionType> {
        self.local
            .action_types
            .get(id)
            .or_else(|| self.imported.action_types.get(id))
    }

    /// Get a value type by identifier.
    pub fn get_value_type(&self, id: &Identifier) -> Option<&ValueTypeDef> {
        self.value_types
            .get(id)
            .or_else(|| self.imported_value_types.get(id))
    }

    /// Get the submission restriction of an action type.
    pub fn get_action_permission(&self, id: &Identifier) -> Option<&ActionPermission> {
        self.action_permissions.get(id)
    }

    /// Locally defined entities.
    pub fn local(&self) -> &OntologyBlock {
        &self.local
    }

    /// Imported entities.
    pub fn imported(&self) -> &OntologyBlock {
        &self.imported
    }

    /// Locally defined value types.
    pub fn value_types(&self) -> &BTreeMap<Identifier, ValueTypeDef> {
        &self.value_types
    }

    /// Imported value types.
    pub fn imported_value_types(&self) -> &BTreeMap<Identifier, ValueTypeDef> {
        &self.imported_value_types
    }

    /// All recorded submission restrictions.
    pub fn action_permissions(&self) -> &BTreeMap<Identifier, ActionPermission> {
        &self.action_permissions
    }
}
