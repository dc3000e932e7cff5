//! Logic Rule Builder: emits the executable rule of an action.
//!
//! Generated actions bind every target property to its fixed value, else to
//! the same-named parameter, else leave it out. Hand-written rules are
//! checked against the registry and the declared parameters.

use crate::invariant::{check_declared, require_parameter};
use crate::parameters::{
    INTERFACE_OBJECT_TO_MODIFY_PARAMETER, OBJECT_TO_CREATE_OR_MODIFY_PARAMETER,
    OBJECT_TO_DELETE_PARAMETER, OBJECT_TO_MODIFY_PARAMETER, OBJECT_TYPE_PARAMETER,
};
use crate::validation::{literal_matches, parameter_type_for};
use crate::{
    ActionTarget, CompileError, CompileResult, CrudActionDef, CrudKind, TargetParameter,
};
use ontoc_core::{Identifier, PropertyType};
use ontoc_registry::{
    LogicRule, LogicValue, ParameterType, PropertyBinding, PropertyResolver, Registry,
    RegistryError, SharedPropertyBinding,
};
use std::collections::{HashMap, HashSet};

/// Parameter types of an action keyed by parameter id.
pub type ParameterTypes<'a> = HashMap<&'a str, &'a ParameterType>;

/// Check a value bound to a property of the given type.
fn check_value(
    registry: &Registry,
    parameters: &ParameterTypes<'_>,
    property: &str,
    property_type: &PropertyType,
    value: &LogicValue,
) -> CompileResult<()> {
    if let Some(parameter) = value.referenced_parameter() {
        let declared: HashSet<&str> = parameters.keys().copied().collect();
        check_declared([parameter], &declared)?;
    }
    match value {
        LogicValue::StaticValue { value: literal } => {
            let expected = parameter_type_for(property_type).ok_or_else(|| {
                CompileError::UnsupportedPropertyType {
                    property: property.to_string(),
                    property_type: property_type.to_string(),
                }
            })?;
            if !literal_matches(literal, &expected)? {
                return Err(CompileError::property_value_type_mismatch(
                    property, &expected, literal,
                ));
            }
        }
        LogicValue::ObjectParameterPropertyValue {
            parameter_id,
            property: source,
        } => {
            if let Some(ParameterType::ObjectReference { object_type }) =
                parameters.get(parameter_id.as_str()).copied()
            {
                let object = registry
                    .get_object_type(object_type)
                    .ok_or_else(|| RegistryError::unknown_object_type(object_type))?;
                if !object.has_property(source) {
                    return Err(CompileError::unknown_property(source, object_type));
                }
            }
        }
        _ => {}
    }
    Ok(())
}

// ==================== Generated Actions ====================

/// Builds the rule of a generated action.
pub struct LogicBuilder<'a> {
    registry: &'a Registry,
    def: &'a CrudActionDef,
    target: &'a ActionTarget,
    parameters: &'a ParameterTypes<'a>,
}

impl<'a> LogicBuilder<'a> {
    pub fn new(
        registry: &'a Registry,
        def: &'a CrudActionDef,
        target: &'a ActionTarget,
        parameters: &'a ParameterTypes<'a>,
    ) -> Self {
        Self {
            registry,
            def,
            target,
            parameters,
        }
    }

    /// Emit the rule for the action kind.
    pub fn build(&self) -> CompileResult<LogicRule> {
        let rule = match (self.target.is_interface(), self.def.kind) {
            (false, CrudKind::Create) => self.add_object()?,
            (false, CrudKind::Modify) => self.modify_object()?,
            (false, CrudKind::Delete) => self.delete_object()?,
            (false, CrudKind::CreateOrModify) => self.add_or_modify_object()?,
            (true, CrudKind::Create) => self.add_interface()?,
            (true, CrudKind::Modify) => self.modify_interface(None)?,
            (true, CrudKind::Delete) => self.delete_object()?,
            (true, CrudKind::CreateOrModify) => {
                self.require(OBJECT_TYPE_PARAMETER, TargetParameter::ObjectType)?;
                self.modify_interface(Some(OBJECT_TYPE_PARAMETER.to_string()))?
            }
        };
        tracing::trace!(rule = rule.kind_name(), action = %self.def.id, "emitted logic rule");
        Ok(rule)
    }

    fn require(&self, id: &str, role: TargetParameter) -> CompileResult<String> {
        require_parameter(self.parameters, id, role)?;
        Ok(id.to_string())
    }

    /// Value of every bound property in declaration order.
    fn bindings(&self, skip_primary_key: bool) -> CompileResult<Vec<(String, LogicValue)>> {
        let mut bindings = Vec::new();
        for property in self.target.properties() {
            if skip_primary_key && self.target.primary_key() == Some(property.key.as_str()) {
                continue;
            }
            let value = match self.def.non_parameter_mapping(&property.key) {
                Some(value) => {
                    check_value(
                        self.registry,
                        self.parameters,
                        &property.key,
                        &property.property_type,
                        value,
                    )?;
                    value.clone()
                }
                None if self.parameters.contains_key(property.parameter_id.as_str()) => {
                    LogicValue::parameter(property.parameter_id.as_str())
                }
                None => continue,
            };
            bindings.push((property.key.clone(), value));
        }
        Ok(bindings)
    }

    fn property_values(&self, skip_primary_key: bool) -> CompileResult<Vec<PropertyBinding>> {
        Ok(self
            .bindings(skip_primary_key)?
            .into_iter()
            .map(|(property, value)| PropertyBinding { property, value })
            .collect())
    }

    fn shared_property_values(&self) -> CompileResult<Vec<SharedPropertyBinding>> {
        Ok(self
            .bindings(false)?
            .into_iter()
            .map(|(property, value)| SharedPropertyBinding {
                shared_property_type: Identifier::new(property),
                value,
            })
            .collect())
    }

    fn add_object(&self) -> CompileResult<LogicRule> {
        Ok(LogicRule::AddObject {
            object_type: self.target.id().clone(),
            property_values: self.property_values(false)?,
        })
    }

    fn modify_object(&self) -> CompileResult<LogicRule> {
        Ok(LogicRule::ModifyObject {
            object_to_modify: self
                .require(OBJECT_TO_MODIFY_PARAMETER, TargetParameter::ObjectToModify)?,
            property_values: self.property_values(true)?,
        })
    }

    fn delete_object(&self) -> CompileResult<LogicRule> {
        Ok(LogicRule::DeleteObject {
            object_to_delete: self
                .require(OBJECT_TO_DELETE_PARAMETER, TargetParameter::ObjectToDelete)?,
        })
    }

    fn add_or_modify_object(&self) -> CompileResult<LogicRule> {
        Ok(LogicRule::AddOrModifyObject {
            object_to_modify: self.require(
                OBJECT_TO_CREATE_OR_MODIFY_PARAMETER,
                TargetParameter::ObjectToCreateOrModify,
            )?,
            property_values: self.property_values(false)?,
        })
    }

    fn add_interface(&self) -> CompileResult<LogicRule> {
        Ok(LogicRule::AddInterface {
            interface_type: self.target.id().clone(),
            object_type_parameter: self
                .require(OBJECT_TYPE_PARAMETER, TargetParameter::ObjectType)?,
            shared_property_values: self.shared_property_values()?,
        })
    }

    fn modify_interface(&self, object_type_parameter: Option<String>) -> CompileResult<LogicRule> {
        Ok(LogicRule::ModifyInterface {
            interface_type: self.target.id().clone(),
            interface_object_to_modify: self.require(
                INTERFACE_OBJECT_TO_MODIFY_PARAMETER,
                TargetParameter::InterfaceObjectToModify,
            )?,
            object_type_parameter,
            shared_property_values: self.shared_property_values()?,
        })
    }
}

// ==================== Hand-written Rules ====================

/// Check a hand-written rule against the registry and the declared parameters.
pub fn validate_rule(
    registry: &Registry,
    parameters: &ParameterTypes<'_>,
    rule: &LogicRule,
) -> CompileResult<()> {
    match rule {
        LogicRule::AddObject {
            object_type,
            property_values,
        } => check_object_bindings(registry, parameters, object_type, property_values),
        LogicRule::ModifyObject {
            object_to_modify,
            property_values,
        } => {
            let ty = require_parameter(parameters, object_to_modify, TargetParameter::ObjectToModify)?;
            let object_type = referenced_object(object_to_modify, ty, TargetParameter::ObjectToModify)?;
            check_object_bindings(registry, parameters, object_type, property_values)
        }
        LogicRule::AddOrModifyObject {
            object_to_modify,
            property_values,
        } => {
            let ty = require_parameter(
                parameters,
                object_to_modify,
                TargetParameter::ObjectToCreateOrModify,
            )?;
            let object_type =
                referenced_object(object_to_modify, ty, TargetParameter::ObjectToCreateOrModify)?;
            check_object_bindings(registry, parameters, object_type, property_values)
        }
        LogicRule::DeleteObject { object_to_delete } => {
            let ty = require_parameter(parameters, object_to_delete, TargetParameter::ObjectToDelete)?;
            match ty {
                ParameterType::ObjectReference { .. } | ParameterType::InterfaceReference { .. } => {
                    Ok(())
                }
                _ => Err(CompileError::TargetParameterType {
                    parameter: object_to_delete.clone(),
                    role: TargetParameter::ObjectToDelete,
                    expected: "an object or interface",
                }),
            }
        }
        LogicRule::AddInterface {
            interface_type,
            object_type_parameter,
            shared_property_values,
        } => {
            require_parameter(parameters, object_type_parameter, TargetParameter::ObjectType)?;
            check_interface_bindings(registry, parameters, interface_type, shared_property_values)
        }
        LogicRule::ModifyInterface {
            interface_type,
            interface_object_to_modify,
            object_type_parameter,
            shared_property_values,
        } => {
            require_parameter(
                parameters,
                interface_object_to_modify,
                TargetParameter::InterfaceObjectToModify,
            )?;
            if let Some(object_type_parameter) = object_type_parameter {
                require_parameter(parameters, object_type_parameter, TargetParameter::ObjectType)?;
            }
            check_interface_bindings(registry, parameters, interface_type, shared_property_values)
        }
    }
}

fn referenced_object<'p>(
    parameter: &str,
    ty: &'p ParameterType,
    role: TargetParameter,
) -> CompileResult<&'p Identifier> {
    match ty {
        ParameterType::ObjectReference { object_type } => Ok(object_type),
        _ => Err(CompileError::TargetParameterType {
            parameter: parameter.to_string(),
            role,
            expected: "an object",
        }),
    }
}

fn check_object_bindings(
    registry: &Registry,
    parameters: &ParameterTypes<'_>,
    object_type: &Identifier,
    bindings: &[PropertyBinding],
) -> CompileResult<()> {
    let object = registry
        .get_object_type(object_type)
        .ok_or_else(|| RegistryError::unknown_object_type(object_type))?;
    for binding in bindings {
        let property = object
            .get_property(&binding.property)
            .ok_or_else(|| CompileError::unknown_property(&binding.property, object_type))?;
        check_value(
            registry,
            parameters,
            &binding.property,
            &property.property_type,
            &binding.value,
        )?;
    }
    Ok(())
}

fn check_interface_bindings(
    registry: &Registry,
    parameters: &ParameterTypes<'_>,
    interface_type: &Identifier,
    bindings: &[SharedPropertyBinding],
) -> CompileResult<()> {
    let effective = PropertyResolver::new(registry).interface_properties(interface_type)?;
    for binding in bindings {
        let property = effective
            .iter()
            .find(|p| p.id == binding.shared_property_type)
            .ok_or_else(|| {
                CompileError::shared_property_not_in_interface(
                    binding.shared_property_type.to_string(),
                    interface_type,
                )
            })?;
        check_value(
            registry,
            parameters,
            binding.shared_property_type.as_str(),
            &property.property_type,
            &binding.value,
        )?;
    }
    Ok(())
}
