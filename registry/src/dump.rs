//! Full-metadata snapshot of a registry.

use crate::{
    ActionPermission, ActionType, Datasource, InterfaceTypeDef, ObjectTypeDef, OntologyBlock,
    Registry, SharedPropertyTypeDef, ValueTypeDef,
};
use ontoc_core::Identifier;
use serde::Serialize;
use std::collections::BTreeMap;

/// An object type together with its derived datasource.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectTypeIr {
    #[serde(flatten)]
    pub object_type: ObjectTypeDef,
    pub datasource: Datasource,
}

/// Emitted form of one [`OntologyBlock`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OntologyIr {
    pub shared_property_types: BTreeMap<Identifier, SharedPropertyTypeDef>,
    pub interface_types: BTreeMap<Identifier, InterfaceTypeDef>,
    pub object_types: BTreeMap<Identifier, ObjectTypeIr>,
    pub action_types: BTreeMap<Identifier, ActionType>,
}

impl From<&OntologyBlock> for OntologyIr {
    fn from(block: &OntologyBlock) -> Self {
        Self {
            shared_property_types: block.shared_property_types.clone(),
            interface_types: block.interface_types.clone(),
            // Datasources are derived again on every dump
            object_types: block
                .object_types
                .iter()
                .map(|(id, object)| {
                    (
                        id.clone(),
                        ObjectTypeIr {
                            datasource: object.datasource(),
                            object_type: object.clone(),
                        },
                    )
                })
                .collect(),
            action_types: block.action_types.clone(),
        }
    }
}

/// Deterministic snapshot of everything a session defined or imported.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OntologyDump {
    pub ontology: OntologyIr,
    pub imported_ontology: OntologyIr,
    pub value_types: BTreeMap<Identifier, ValueTypeDef>,
    pub imported_value_types: BTreeMap<Identifier, ValueTypeDef>,
    pub action_permissions: BTreeMap<Identifier, ActionPermission>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub randomness_key: Option<String>,
}

impl Registry {
    /// Snapshot the registry for emission.
    pub fn dump(&self, randomness_key: Option<String>) -> OntologyDump {
        OntologyDump {
            ontology: OntologyIr::from(self.local()),
            imported_ontology: OntologyIr::from(self.imported()),
            value_types: self.value_types().clone(),
            imported_value_types: self.imported_value_types().clone(),
            action_permissions: self.action_permissions().clone(),
            randomness_key,
        }
    }
}
