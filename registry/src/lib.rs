//! Ontoc Registry
//!
//! The per-session store of ontology entities and everything that reads it:
//! - Entity definitions (shared property types, interfaces, objects, value types)
//! - The action type IR the compiler emits
//! - Local and imported buckets with namespace-qualified lookups
//! - Effective property resolution across interface hierarchies
//! - Builders that validate definitions before registering them
//! - The deterministic metadata dump

mod action;
mod builder;
mod dump;
mod error;
mod registry;
mod resolve;
mod types;

pub use action::*;
pub use builder::{
    InterfaceTypeBuilder, ObjectTypeBuilder, SharedPropertyTypeBuilder, ValueTypeBuilder,
};
pub use dump::{ObjectTypeIr, OntologyDump, OntologyIr};
pub use error::{RegistryError, RegistryResult};
pub use registry::{Entity, EntityKind, EntityRef, OntologyBlock, Registry};
pub use resolve::{PropertyOwner, PropertyResolver, PropertySource, ResolvedProperty};
pub use types::*;
