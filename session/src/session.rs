//! Ontology definition session.

use ontoc_compiler::{CrudKind, CrudTarget};
use ontoc_core::{EntityName, Identifier, Namespace, PropertyType};
use ontoc_registry::{
    Entity, InterfaceTypeBuilder, ObjectTypeBuilder, OntologyDump, Registry,
    SharedPropertyTypeBuilder, ValueTypeBuilder,
};

use crate::actions::{CrudActionBuilder, ManualActionBuilder};
use crate::config::SessionOptions;
use crate::error::SessionResult;

/// One ontology definition session: the active namespace plus the registry
/// every define call reads and writes.
#[derive(Debug, Clone)]
pub struct Session {
    /// Active namespace.
    namespace: Namespace,
    /// Entities defined or imported so far.
    registry: Registry,
    options: SessionOptions,
}

impl Session {
    /// Create a session with an empty registry.
    pub fn new(options: SessionOptions) -> SessionResult<Self> {
        let namespace = Namespace::new(options.namespace.as_str())?;
        Ok(Self {
            namespace,
            registry: Registry::new(),
            options,
        })
    }

    /// Get the active namespace.
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Get the registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub(crate) fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Get the options this session was created with.
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Drop every defined and imported entity.
    pub fn reset(&mut self) {
        self.registry.reset();
    }

    /// Qualify a name with the active namespace.
    pub fn qualify(&self, name: impl Into<EntityName>) -> Identifier {
        self.namespace.qualify(name)
    }

    // ==================== Entity Definitions ====================

    /// Start defining a shared property type.
    pub fn shared_property_type(
        &mut self,
        name: impl Into<EntityName>,
        property_type: PropertyType,
    ) -> SharedPropertyTypeBuilder<'_> {
        SharedPropertyTypeBuilder::new(&mut self.registry, &self.namespace, name, property_type)
            .strict(self.options.strict_identifiers)
    }

    /// Start defining an interface type.
    pub fn interface_type(&mut self, name: impl Into<EntityName>) -> InterfaceTypeBuilder<'_> {
        InterfaceTypeBuilder::new(&mut self.registry, &self.namespace, name)
            .strict(self.options.strict_identifiers)
    }

    /// Start defining an object type.
    pub fn object_type(&mut self, name: impl Into<EntityName>) -> ObjectTypeBuilder<'_> {
        ObjectTypeBuilder::new(&mut self.registry, &self.namespace, name)
            .strict(self.options.strict_identifiers)
    }

    /// Start defining a value type.
    pub fn value_type(
        &mut self,
        name: impl Into<EntityName>,
        version: impl Into<String>,
        base_type: PropertyType,
    ) -> ValueTypeBuilder<'_> {
        ValueTypeBuilder::new(&mut self.registry, &self.namespace, name, version, base_type)
    }

    /// Add a pre-qualified external entity as reference-only.
    pub fn import(&mut self, entity: Entity) {
        self.registry.import(entity);
    }

    // ==================== Action Definitions ====================

    fn crud_action(&mut self, kind: CrudKind, target: CrudTarget) -> CrudActionBuilder<'_> {
        CrudActionBuilder::new(self, kind, target)
    }

    /// Action creating an object of the given type.
    pub fn create_object_action(&mut self, object: impl Into<EntityName>) -> CrudActionBuilder<'_> {
        let target = CrudTarget::Object(self.qualify(object));
        self.crud_action(CrudKind::Create, target)
    }

    /// Action modifying an object of the given type.
    pub fn modify_object_action(&mut self, object: impl Into<EntityName>) -> CrudActionBuilder<'_> {
        let target = CrudTarget::Object(self.qualify(object));
        self.crud_action(CrudKind::Modify, target)
    }

    /// Action deleting an object of the given type.
    pub fn delete_object_action(&mut self, object: impl Into<EntityName>) -> CrudActionBuilder<'_> {
        let target = CrudTarget::Object(self.qualify(object));
        self.crud_action(CrudKind::Delete, target)
    }

    /// Action creating or modifying an object of the given type.
    pub fn create_or_modify_object_action(
        &mut self,
        object: impl Into<EntityName>,
    ) -> CrudActionBuilder<'_> {
        let target = CrudTarget::Object(self.qualify(object));
        self.crud_action(CrudKind::CreateOrModify, target)
    }

    /// Action creating an object implementing the given interface.
    pub fn create_interface_action(
        &mut self,
        interface: impl Into<EntityName>,
    ) -> CrudActionBuilder<'_> {
        let target = CrudTarget::Interface(self.qualify(interface));
        self.crud_action(CrudKind::Create, target)
    }

    /// Action modifying an object through the given interface.
    pub fn modify_interface_action(
        &mut self,
        interface: impl Into<EntityName>,
    ) -> CrudActionBuilder<'_> {
        let target = CrudTarget::Interface(self.qualify(interface));
        self.crud_action(CrudKind::Modify, target)
    }

    /// Action deleting an object through the given interface.
    pub fn delete_interface_action(
        &mut self,
        interface: impl Into<EntityName>,
    ) -> CrudActionBuilder<'_> {
        let target = CrudTarget::Interface(self.qualify(interface));
        self.crud_action(CrudKind::Delete, target)
    }

    /// Action creating or modifying an object through the given interface.
    pub fn create_or_modify_interface_action(
        &mut self,
        interface: impl Into<EntityName>,
    ) -> CrudActionBuilder<'_> {
        let target = CrudTarget::Interface(self.qualify(interface));
        self.crud_action(CrudKind::CreateOrModify, target)
    }

    /// Action with explicit parameters and rules.
    pub fn action(&mut self, api_name: impl Into<EntityName>) -> ManualActionBuilder<'_> {
        let id = self.qualify(api_name);
        ManualActionBuilder::new(self, id)
    }

    // ==================== Output ====================

    /// Deterministic snapshot of the session.
    pub fn dump(&self) -> OntologyDump {
        self.registry.dump(self.options.randomness_key.clone())
    }

    /// The snapshot rendered as pretty-printed JSON.
    pub fn to_json(&self) -> SessionResult<String> {
        Ok(serde_json::to_string_pretty(&self.dump())?)
    }
}

/// Run a body of define calls in a fresh session and return its snapshot.
///
/// The first failing define call aborts the body.
pub fn define_ontology<F>(options: SessionOptions, body: F) -> SessionResult<OntologyDump>
where
    F: FnOnce(&mut Session) -> SessionResult<()>,
{
    let mut session = Session::new(options)?;
    tracing::debug!(namespace = %session.namespace(), "defining ontology");
    body(&mut session)?;
    let dump = session.dump();
    tracing::debug!(
        object_types = dump.ontology.object_types.len(),
        action_types = dump.ontology.action_types.len(),
        "ontology defined"
    );
    Ok(dump)
}
