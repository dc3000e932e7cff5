//! Ontoc Compiler
//!
//! Expand compact action descriptions into fully specified action types.
//!
//! Responsibilities:
//! - Resolve the target entity and synthesize parameters from its properties
//! - Build default parameter validation and layer configured overrides
//! - Lower condition inputs into the canonical condition tree
//! - Emit the logic rule binding parameters to properties
//! - Lay out sections and the form content ordering
//! - Check every cross-reference eagerly, failing with a descriptive error

mod compiler;
mod condition;
mod definition;
mod error;
mod invariant;
mod logic;
mod parameters;
mod sections;
mod target;
mod validation;

pub use compiler::{ActionCompiler, CompiledAction};
pub use condition::{group_condition, ConditionCompiler};
pub use definition::*;
pub use error::{CompileError, CompileResult, ErrorCategory, TargetParameter};
pub use invariant::check_parameter_ordering;
pub use logic::{validate_rule, LogicBuilder, ParameterTypes};
pub use parameters::{
    structural_parameters, ParameterSynthesizer, SynthesizedParameter,
    INTERFACE_OBJECT_TO_MODIFY_PARAMETER, OBJECT_TO_CREATE_OR_MODIFY_PARAMETER,
    OBJECT_TO_DELETE_PARAMETER, OBJECT_TO_MODIFY_PARAMETER, OBJECT_TYPE_PARAMETER,
};
pub use sections::{build_sections, form_content_ordering, SectionLayout};
pub use target::{ActionTarget, TargetProperty};
pub use validation::{
    apply_overrides, check_static_value, default_validation, literal_matches, parameter_type_for,
    required_constraint,
};
