//! Compiler error types.

use ontoc_core::{CoreError, Identifier, Literal};
use ontoc_registry::{ParameterType, RegistryError};
use std::fmt;
use thiserror::Error;

/// Broad class of a compile failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A property, parameter or entity is absent from its target.
    UnknownReference,
    /// A literal or ordering does not have the expected shape.
    ShapeMismatch,
    /// A mandatory target parameter is missing.
    StructuralRequirement,
    /// An interface rule names a property outside the interface.
    CrossEntity,
    /// Failure raised by the registry or naming layer.
    Registry,
}

/// Structural parameters whose presence a rule requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetParameter {
    ObjectToModify,
    ObjectToDelete,
    ObjectToCreateOrModify,
    InterfaceObjectToModify,
    ObjectType,
}

impl fmt::Display for TargetParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TargetParameter::ObjectToModify => "Object to modify",
            TargetParameter::ObjectToDelete => "Object to delete",
            TargetParameter::ObjectToCreateOrModify => "Object to create or modify",
            TargetParameter::InterfaceObjectToModify => "Interface object to modify",
            TargetParameter::ObjectType => "Object type",
        };
        f.write_str(name)
    }
}

fn braced(ids: &[String]) -> String {
    format!("{{{}}}", ids.join(", "))
}

fn bracketed(ids: &[String]) -> String {
    format!("[{}]", ids.join(", "))
}

/// Errors raised while compiling an action type.
#[derive(Debug, Error)]
pub enum CompileError {
    /// Registry error.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Naming error.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Parameter {parameter} does not exist as a property on {entity} and its type is not explicitly defined")]
    UndeclaredParameter { parameter: String, entity: String },

    #[error("Property {property} does not exist on object type {object}")]
    UnknownProperty { property: String, object: Identifier },

    #[error("Shared property type {property} does not exist in interface type {interface}")]
    SharedPropertyNotInInterface {
        property: String,
        interface: Identifier,
    },

    #[error("Action parameter condition references unknown parameter {parameter}")]
    UnknownConditionParameter { parameter: String },

    #[error("Parameters {} were referenced but not defined", bracketed(.parameters))]
    UndefinedParameters { parameters: Vec<String> },

    #[error("Default static value for parameter {parameter} does not match type {expected}")]
    DefaultValueTypeMismatch {
        parameter: String,
        expected: ParameterType,
        value: Literal,
    },

    #[error("Condition value {value} compared with {subject} does not match type {expected}")]
    ConditionValueTypeMismatch {
        subject: String,
        expected: ParameterType,
        value: Literal,
    },

    #[error("Static value for property {property} does not match type {expected}")]
    PropertyValueTypeMismatch {
        property: String,
        expected: ParameterType,
        value: Literal,
    },

    #[error(
        "Action parameter ordering for {action} does not match expected parameters. Extraneous parameters in ordering: {}, Missing parameters in ordering: {}",
        braced(.extraneous),
        braced(.missing)
    )]
    ParameterOrderingMismatch {
        action: Identifier,
        extraneous: Vec<String>,
        missing: Vec<String>,
    },

    #[error("{parameter} parameter must be defined in parameters")]
    MissingTargetParameter { parameter: TargetParameter },

    #[error("Property {property} of type {property_type} cannot be used as an action parameter")]
    UnsupportedPropertyType {
        property: String,
        property_type: String,
    },

    #[error("Interface properties {first} and {second} both map to parameter {parameter}")]
    ParameterIdCollision {
        parameter: String,
        first: Identifier,
        second: Identifier,
    },

    #[error("Parameter {parameter} is declared more than once")]
    DuplicateParameter { parameter: String },

    #[error("Section {section} is declared more than once")]
    DuplicateSection { section: String },

    #[error("Parameter {parameter} is placed in both section {first} and section {second}")]
    ParameterInMultipleSections {
        parameter: String,
        first: String,
        second: String,
    },

    #[error("Parameter {parameter} names a property of {entity} that this action leaves out and its type is not explicitly defined")]
    OmittedPropertyParameter { parameter: String, entity: String },

    #[error("Property {property} is the primary key of {object} and cannot be modified")]
    PrimaryKeyNotModifiable { property: String, object: Identifier },

    #[error("List length for parameter {parameter} has minimum {min} greater than maximum {max}")]
    InvalidListLength { parameter: String, min: u32, max: u32 },

    #[error("Parameter {parameter} must reference {expected} to be used as {role}")]
    TargetParameterType {
        parameter: String,
        role: TargetParameter,
        expected: &'static str,
    },
}

impl CompileError {
    pub fn undeclared_parameter(parameter: impl Into<String>, entity: impl Into<String>) -> Self {
        Self::UndeclaredParameter {
            parameter: parameter.into(),
            entity: entity.into(),
        }
    }

    pub fn omitted_property_parameter(
        parameter: impl Into<String>,
        entity: impl Into<String>,
    ) -> Self {
        Self::OmittedPropertyParameter {
            parameter: parameter.into(),
            entity: entity.into(),
        }
    }

    pub fn primary_key_not_modifiable(property: impl Into<String>, object: &Identifier) -> Self {
        Self::PrimaryKeyNotModifiable {
            property: property.into(),
            object: object.clone(),
        }
    }

    pub fn unknown_property(property: impl Into<String>, object: &Identifier) -> Self {
        Self::UnknownProperty {
            property: property.into(),
            object: object.clone(),
        }
    }

    pub fn shared_property_not_in_interface(
        property: impl Into<String>,
        interface: &Identifier,
    ) -> Self {
        Self::SharedPropertyNotInInterface {
            property: property.into(),
            interface: interface.clone(),
        }
    }

    pub fn unknown_condition_parameter(parameter: impl Into<String>) -> Self {
        Self::UnknownConditionParameter {
            parameter: parameter.into(),
        }
    }

    pub fn undefined_parameters(parameters: Vec<String>) -> Self {
        Self::UndefinedParameters { parameters }
    }

    pub fn default_value_type_mismatch(
        parameter: impl Into<String>,
        expected: &ParameterType,
        value: &Literal,
    ) -> Self {
        Self::DefaultValueTypeMismatch {
            parameter: parameter.into(),
            expected: expected.clone(),
            value: value.clone(),
        }
    }

    pub fn condition_value_type_mismatch(
        subject: impl Into<String>,
        expected: &ParameterType,
        value: &Literal,
    ) -> Self {
        Self::ConditionValueTypeMismatch {
            subject: subject.into(),
            expected: expected.clone(),
            value: value.clone(),
        }
    }

    pub fn property_value_type_mismatch(
        property: impl Into<String>,
        expected: &ParameterType,
        value: &Literal,
    ) -> Self {
        Self::PropertyValueTypeMismatch {
            property: property.into(),
            expected: expected.clone(),
            value: value.clone(),
        }
    }

    pub fn parameter_ordering_mismatch(
        action: &Identifier,
        extraneous: Vec<String>,
        missing: Vec<String>,
    ) -> Self {
        Self::ParameterOrderingMismatch {
            action: action.clone(),
            extraneous,
            missing,
        }
    }

    pub fn missing_target_parameter(parameter: TargetParameter) -> Self {
        Self::MissingTargetParameter { parameter }
    }

    pub fn duplicate_parameter(parameter: impl Into<String>) -> Self {
        Self::DuplicateParameter {
            parameter: parameter.into(),
        }
    }

    /// The failure class this error belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            CompileError::Registry(_) | CompileError::Core(_) => ErrorCategory::Registry,
            CompileError::UndeclaredParameter { .. }
            | CompileError::UnknownProperty { .. }
            | CompileError::UnknownConditionParameter { .. }
            | CompileError::UndefinedParameters { .. } => ErrorCategory::UnknownReference,
            CompileError::DefaultValueTypeMismatch { .. }
            | CompileError::ConditionValueTypeMismatch { .. }
            | CompileError::PropertyValueTypeMismatch { .. }
            | CompileError::ParameterOrderingMismatch { .. }
            | CompileError::UnsupportedPropertyType { .. }
            | CompileError::ParameterIdCollision { .. }
            | CompileError::DuplicateParameter { .. }
            | CompileError::DuplicateSection { .. }
            | CompileError::ParameterInMultipleSections { .. }
            | CompileError::InvalidListLength { .. } => ErrorCategory::ShapeMismatch,
            CompileError::MissingTargetParameter { .. }
            | CompileError::TargetParameterType { .. }
            | CompileError::OmittedPropertyParameter { .. }
            | CompileError::PrimaryKeyNotModifiable { .. } => ErrorCategory::StructuralRequirement,
            CompileError::SharedPropertyNotInInterface { .. } => ErrorCategory::CrossEntity,
        }
    }
}

/// Result type for compile operations.
pub type CompileResult<T> = Result<T, CompileError>;
