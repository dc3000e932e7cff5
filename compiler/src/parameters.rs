//! Parameter Synthesizer: derives action parameters from a target's properties.

use crate::validation::parameter_type_for;
use crate::{ActionTarget, CompileError, CompileResult, CrudActionDef, CrudKind};
use ontoc_core::messages::{
    CREATE_OR_MODIFY_OBJECT_DISPLAY, DELETE_OBJECT_DISPLAY, INTERFACE_OBJECT_TO_MODIFY_DISPLAY,
    MODIFY_OBJECT_DISPLAY, OBJECT_TYPE_TO_CREATE_DISPLAY,
};
use ontoc_registry::ParameterType;
use std::collections::HashSet;

pub const OBJECT_TO_MODIFY_PARAMETER: &str = "objectToModifyParameter";
pub const OBJECT_TO_DELETE_PARAMETER: &str = "objectToDeleteParameter";
pub const OBJECT_TO_CREATE_OR_MODIFY_PARAMETER: &str = "objectToCreateOrModifyParameter";
pub const OBJECT_TYPE_PARAMETER: &str = "objectTypeParameter";
pub const INTERFACE_OBJECT_TO_MODIFY_PARAMETER: &str = "interfaceObjectToModifyParameter";

/// A parameter before its validation is built.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizedParameter {
    pub id: String,
    pub display_name: String,
    pub description: Option<String>,
    pub parameter_type: ParameterType,
    /// Base requiredness, before configuration overrides.
    pub required: bool,
}

impl SynthesizedParameter {
    fn structural(
        id: &str,
        display_name: &str,
        parameter_type: ParameterType,
        required: bool,
    ) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            description: None,
            parameter_type,
            required,
        }
    }
}

/// The target parameters a generated action starts with.
pub fn structural_parameters(kind: CrudKind, target: &ActionTarget) -> Vec<SynthesizedParameter> {
    let id = target.id().clone();
    let object_type_reference = || ParameterType::ObjectTypeReference {
        interface_types: vec![id.clone()],
    };

    if target.is_interface() {
        match kind {
            CrudKind::Create => vec![SynthesizedParameter::structural(
                OBJECT_TYPE_PARAMETER,
                OBJECT_TYPE_TO_CREATE_DISPLAY,
                object_type_reference(),
                true,
            )],
            CrudKind::Modify => vec![SynthesizedParameter::structural(
                INTERFACE_OBJECT_TO_MODIFY_PARAMETER,
                INTERFACE_OBJECT_TO_MODIFY_DISPLAY,
                ParameterType::interface_reference(id.clone()),
                true,
            )],
            CrudKind::Delete => vec![SynthesizedParameter::structural(
                OBJECT_TO_DELETE_PARAMETER,
                DELETE_OBJECT_DISPLAY,
                ParameterType::interface_reference(id.clone()),
                true,
            )],
            // An empty target means a new object of the chosen type
            CrudKind::CreateOrModify => vec![
                SynthesizedParameter::structural(
                    INTERFACE_OBJECT_TO_MODIFY_PARAMETER,
                    INTERFACE_OBJECT_TO_MODIFY_DISPLAY,
                    ParameterType::interface_reference(id.clone()),
                    false,
                ),
                SynthesizedParameter::structural(
                    OBJECT_TYPE_PARAMETER,
                    OBJECT_TYPE_TO_CREATE_DISPLAY,
                    object_type_reference(),
                    false,
                ),
            ],
        }
    } else {
        match kind {
            CrudKind::Create => Vec::new(),
            CrudKind::Modify => vec![SynthesizedParameter::structural(
                OBJECT_TO_MODIFY_PARAMETER,
                MODIFY_OBJECT_DISPLAY,
                ParameterType::object_reference(id.clone()),
                true,
            )],
            CrudKind::Delete => vec![SynthesizedParameter::structural(
                OBJECT_TO_DELETE_PARAMETER,
                DELETE_OBJECT_DISPLAY,
                ParameterType::object_reference(id.clone()),
                true,
            )],
            CrudKind::CreateOrModify => vec![SynthesizedParameter::structural(
                OBJECT_TO_CREATE_OR_MODIFY_PARAMETER,
                CREATE_OR_MODIFY_OBJECT_DISPLAY,
                ParameterType::object_reference(id.clone()),
                false,
            )],
        }
    }
}

/// Builds the ordered parameter list of a generated action.
pub struct ParameterSynthesizer<'a> {
    def: &'a CrudActionDef,
    target: &'a ActionTarget,
}

impl<'a> ParameterSynthesizer<'a> {
    pub fn new(def: &'a CrudActionDef, target: &'a ActionTarget) -> Self {
        Self { def, target }
    }

    /// Structural parameters, then property parameters in declaration
    /// order, then free-standing configured parameters.
    pub fn synthesize(&self) -> CompileResult<Vec<SynthesizedParameter>> {
        self.check_property_keys()?;

        let mut parameters = structural_parameters(self.def.kind, self.target);
        parameters.extend(self.property_parameters()?);

        let mut seen: HashSet<String> = HashSet::new();
        let mut extras = Vec::new();
        for (key, config) in &self.def.parameter_configuration {
            if !seen.insert(key.clone()) {
                return Err(CompileError::duplicate_parameter(key));
            }
            if parameters.iter().any(|p| &p.id == key) {
                continue;
            }
            let parameter_type = match &config.parameter_type {
                Some(parameter_type) => parameter_type.clone(),
                None if self.target.property_for_parameter(key).is_some() => {
                    return Err(CompileError::omitted_property_parameter(
                        key,
                        self.target.id().to_string(),
                    ))
                }
                None => {
                    return Err(CompileError::undeclared_parameter(
                        key,
                        self.target.id().to_string(),
                    ))
                }
            };
            tracing::trace!(parameter = %key, "free-standing parameter");
            extras.push(SynthesizedParameter {
                id: key.clone(),
                display_name: config.display_name.clone().unwrap_or_else(|| key.clone()),
                description: config.description.clone(),
                parameter_type,
                required: config.required.unwrap_or(false),
            });
        }
        parameters.extend(extras);

        for parameter in &mut parameters {
            if let Some(config) = self.def.parameter_config(&parameter.id) {
                if let Some(display_name) = &config.display_name {
                    parameter.display_name = display_name.clone();
                }
                if config.description.is_some() {
                    parameter.description = config.description.clone();
                }
            }
        }
        Ok(parameters)
    }

    /// Excluded and fixed-value keys must name target properties. A modify
    /// action never writes the primary key, so neither may name it.
    fn check_property_keys(&self) -> CompileResult<()> {
        let keys = self
            .def
            .excluded_properties
            .iter()
            .chain(self.def.non_parameter_mappings.iter().map(|(key, _)| key));
        for key in keys {
            self.target.require_property(key)?;
            if self.skips_primary_key() && self.target.primary_key() == Some(key.as_str()) {
                return Err(CompileError::primary_key_not_modifiable(key, self.target.id()));
            }
        }
        Ok(())
    }

    fn skips_primary_key(&self) -> bool {
        self.def.kind == CrudKind::Modify && !self.target.is_interface()
    }

    fn property_parameters(&self) -> CompileResult<Vec<SynthesizedParameter>> {
        if self.def.kind == CrudKind::Delete {
            return Ok(Vec::new());
        }
        let skip_primary_key = self.skips_primary_key();

        let mut parameters = Vec::new();
        for property in self.target.properties() {
            if skip_primary_key && self.target.primary_key() == Some(property.key.as_str()) {
                continue;
            }
            if self.def.excluded_properties.contains(&property.key)
                || self.def.non_parameter_mapping(&property.key).is_some()
            {
                continue;
            }

            let config = self.def.parameter_config(&property.parameter_id);
            let parameter_type = match config.and_then(|c| c.parameter_type.clone()) {
                Some(custom) => custom,
                None => parameter_type_for(&property.property_type).ok_or_else(|| {
                    CompileError::UnsupportedPropertyType {
                        property: property.key.clone(),
                        property_type: property.property_type.to_string(),
                    }
                })?,
            };
            tracing::trace!(
                parameter = %property.parameter_id,
                parameter_type = %parameter_type,
                "property parameter"
            );
            parameters.push(SynthesizedParameter {
                id: property.parameter_id.clone(),
                display_name: property.display_name.clone(),
                description: None,
                parameter_type,
                required: false,
            });
        }
        Ok(parameters)
    }
}
