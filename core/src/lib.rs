//! Ontoc Core Types
//!
//! This crate provides the foundational types used throughout ontoc:
//! - Identifiers and namespace qualification (Identifier, Namespace, EntityName)
//! - Property value types (the PropertyType enum)
//! - Literal values for defaults, overrides, conditions and rules
//! - Common error types and user-facing strings

mod error;
mod id;
pub mod messages;
mod property_type;
mod value;

pub use error::*;
pub use id::*;
pub use property_type::*;
pub use value::*;
