//! Ontoc Integration Test Framework
//!
//! Provides a fluent API for writing integration tests against ontoc.
//!
//! # Structure
//!
//! - **fixtures** - Reusable ontologies defined into a session
//! - **scenarios** - A session, its setup and action steps with assertions
//!
//! A step that fails must leave the session untouched; the runner checks
//! this for every failing step.
//!
//! # Example
//!
//! ```ignore
//! use ontoc_tests::prelude::*;
//!
//! Scenario::new("create")
//!     .setup(fixtures::foo_object)
//!     .step("create", |s| s.create_object_action("foo").done(), |a| {
//!         a.rules(&["addObject"]).optional("bar")
//!     })
//!     .run()
//!     .unwrap();
//! ```

pub mod fixtures;
mod scenario;

pub use assertion::{Assertion, AssertionBuilder};
pub use error::{ScenarioError, ScenarioResult};
pub use scenario::{Scenario, Setup, Step};

use tracing_subscriber::EnvFilter;

/// Install a test-friendly tracing subscriber once per process.
///
/// Honors `RUST_LOG`; silent beyond warnings otherwise.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::assertion::{Assertion, AssertionBuilder};
    pub use crate::error::{ScenarioError, ScenarioResult};
    pub use crate::fixtures;
    pub use crate::init_tracing;
    pub use crate::scenario::Scenario;
    pub use ontoc_compiler::{
        ConditionSpec, ParameterConfig, ParameterMatch, SectionDef, TargetParameter,
    };
    pub use ontoc_core::{EntityName, Identifier, Literal, PropertyType};
    pub use ontoc_registry::{
        ComparisonOperator, LogicRule, LogicValue, ParameterOverride, ParameterType,
        PropertyBinding, RequiredConstraint, SharedPropertyBinding, Visibility,
    };
    pub use ontoc_session::{define_ontology, Session, SessionError, SessionOptions};
}
