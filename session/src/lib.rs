//! Ontoc Session
//!
//! The authoring surface of ontoc:
//! - Session configuration (namespace, randomness key, strictness)
//! - Entity and action builders bound to one registry
//! - Running a definition body and emitting the deterministic dump

mod actions;
mod config;
mod error;
mod session;

pub use actions::{CrudActionBuilder, ManualActionBuilder};
pub use config::SessionOptions;
pub use error::{SessionError, SessionResult};
pub use session::{define_ontology, Session};
