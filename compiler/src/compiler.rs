//! The Action Type Compiler.
//!
//! Compiles action definitions against a borrowed registry. The compiler
//! never mutates the registry; callers register the returned action type.

use crate::condition::group_condition;
use crate::invariant::{check_parameter_ordering, check_unique};
use crate::logic::{validate_rule, LogicBuilder, ParameterTypes};
use crate::sections::{build_sections, form_content_ordering};
use crate::validation::{apply_overrides, default_validation};
use crate::{
    ActionMetadata, ActionTarget, ActionValidationDef, CompileResult, ConditionCompiler,
    CrudActionDef, ManualActionDef, ParameterConfig, ParameterSynthesizer, SectionDef,
    SynthesizedParameter,
};
use ontoc_core::messages::ERR_SUBMITTER_NOT_IN_GROUP;
use ontoc_core::Identifier;
use ontoc_registry::{
    ActionDisplay, ActionParameter, ActionPermission, ActionType, ActionValidation,
    ActionValidationRule, Condition, LogicRule, ParameterValidation, Registry,
};

/// An action type plus its entry for the permission side table.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledAction {
    pub action_type: ActionType,
    pub permission: Option<ActionPermission>,
}

/// Everything the final assembly step needs.
struct ActionParts<'d> {
    id: &'d Identifier,
    metadata: &'d ActionMetadata,
    display_name: String,
    logic: Vec<LogicRule>,
    parameter_ordering: Vec<String>,
    sections: &'d [SectionDef],
    validation: &'d [ActionValidationDef],
    submitter_groups: &'d [String],
}

/// Compiles action definitions against a registry.
#[derive(Debug, Clone, Copy)]
pub struct ActionCompiler<'r> {
    registry: &'r Registry,
}

impl<'r> ActionCompiler<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Compile a generated create/modify/delete/create-or-modify action.
    pub fn compile_crud_action(&self, def: &CrudActionDef) -> CompileResult<CompiledAction> {
        let target = ActionTarget::resolve(self.registry, &def.target)?;
        let synthesized = ParameterSynthesizer::new(def, &target).synthesize()?;

        let ids: Vec<String> = synthesized.iter().map(|p| p.id.clone()).collect();
        let parameter_ordering = match &def.parameter_ordering {
            Some(ordering) => {
                check_parameter_ordering(&def.id, &ids, ordering)?;
                ordering.clone()
            }
            None => ids,
        };

        let types: ParameterTypes<'_> = synthesized
            .iter()
            .map(|p| (p.id.as_str(), &p.parameter_type))
            .collect();
        let conditions = ConditionCompiler::new(types.iter().map(|(id, ty)| (*id, *ty)));

        let parameters = synthesized
            .iter()
            .map(|p| build_parameter(p, def.parameter_config(&p.id), &conditions))
            .collect::<CompileResult<Vec<_>>>()?;

        let rule = LogicBuilder::new(self.registry, def, &target, &types).build()?;

        let parts = ActionParts {
            id: &def.id,
            metadata: &def.metadata,
            display_name: def
                .metadata
                .display_name
                .clone()
                .unwrap_or_else(|| def.kind.default_display_name(target.display_name())),
            logic: vec![rule],
            parameter_ordering,
            sections: &def.sections,
            validation: &def.validation,
            submitter_groups: &def.submitter_groups,
        };
        self.assemble(parts, parameters, &conditions)
    }

    /// Compile a hand-written action.
    pub fn compile_manual_action(&self, def: &ManualActionDef) -> CompileResult<CompiledAction> {
        check_unique(def.parameters.iter().map(|p| p.id.as_str()))?;

        let ids: Vec<String> = def.parameters.iter().map(|p| p.id.clone()).collect();
        let parameter_ordering = match &def.parameter_ordering {
            Some(ordering) => {
                check_parameter_ordering(&def.id, &ids, ordering)?;
                ordering.clone()
            }
            None => ids,
        };

        let types: ParameterTypes<'_> = def
            .parameters
            .iter()
            .map(|p| (p.id.as_str(), &p.parameter_type))
            .collect();
        let conditions = ConditionCompiler::new(types.iter().map(|(id, ty)| (*id, *ty)));

        for rule in &def.logic {
            validate_rule(self.registry, &types, rule)?;
        }

        let parameters = def
            .parameters
            .iter()
            .map(|p| {
                let synthesized = SynthesizedParameter {
                    id: p.id.clone(),
                    display_name: p.config.display_name.clone().unwrap_or_else(|| p.id.clone()),
                    description: p.config.description.clone(),
                    parameter_type: p.parameter_type.clone(),
                    required: p.config.required.unwrap_or(false),
                };
                build_parameter(&synthesized, Some(&p.config), &conditions)
            })
            .collect::<CompileResult<Vec<_>>>()?;

        let parts = ActionParts {
            id: &def.id,
            metadata: &def.metadata,
            display_name: def
                .metadata
                .display_name
                .clone()
                .unwrap_or_else(|| def.id.local_name().to_string()),
            logic: def.logic.clone(),
            parameter_ordering,
            sections: &def.sections,
            validation: &def.validation,
            submitter_groups: &def.submitter_groups,
        };
        self.assemble(parts, parameters, &conditions)
    }

    fn assemble(
        &self,
        parts: ActionParts<'_>,
        parameters: Vec<ActionParameter>,
        conditions: &ConditionCompiler<'_>,
    ) -> CompileResult<CompiledAction> {
        let layout = build_sections(parts.sections, &parts.parameter_ordering, conditions)?;
        let form_content_ordering = form_content_ordering(&layout.sections, &parts.parameter_ordering);

        let mut action_level = parts
            .validation
            .iter()
            .map(|rule| {
                Ok(ActionValidationRule {
                    condition: conditions.compile(&rule.condition)?,
                    failure_message: rule.failure_message.clone(),
                })
            })
            .collect::<CompileResult<Vec<_>>>()?;
        if !parts.submitter_groups.is_empty() {
            action_level.push(ActionValidationRule {
                condition: Condition::Or {
                    conditions: parts
                        .submitter_groups
                        .iter()
                        .map(|group| group_condition(group))
                        .collect(),
                },
                failure_message: ERR_SUBMITTER_NOT_IN_GROUP.to_string(),
            });
        }
        if action_level.is_empty() {
            action_level.push(ActionValidationRule::always());
        }

        let permission = (!parts.submitter_groups.is_empty()).then(|| ActionPermission {
            action_type: parts.id.clone(),
            submitter_groups: parts.submitter_groups.to_vec(),
        });

        let metadata = parts.metadata;
        let action_type = ActionType {
            id: parts.id.clone(),
            display: ActionDisplay {
                display_name: parts.display_name,
                description: metadata.description.clone(),
                icon: metadata.icon.clone(),
                status: metadata.status,
                default_format: metadata.default_format,
                enable_layout_switch: metadata.enable_layout_switch,
            },
            logic: parts.logic,
            parameters,
            parameter_ordering: parts.parameter_ordering,
            validation: ActionValidation {
                action_level,
                sections: layout.validations,
            },
            sections: layout.sections,
            form_content_ordering,
            submission: metadata.submission.clone(),
        };

        tracing::debug!(
            action = %action_type.id,
            parameters = action_type.parameters.len(),
            sections = action_type.sections.len(),
            "compiled action type"
        );
        Ok(CompiledAction {
            action_type,
            permission,
        })
    }
}

/// Default validation of a parameter with its configuration layered on top.
fn build_parameter(
    parameter: &SynthesizedParameter,
    config: Option<&ParameterConfig>,
    conditions: &ConditionCompiler<'_>,
) -> CompileResult<ActionParameter> {
    let base = default_validation(&parameter.parameter_type, parameter.required);
    let validation = match config {
        Some(config) => apply_overrides(
            &base,
            &parameter.id,
            &parameter.parameter_type,
            config,
            conditions,
        )?,
        None => ParameterValidation {
            default_validation: base,
            conditional_overrides: Vec::new(),
        },
    };
    tracing::trace!(parameter = %parameter.id, "built parameter validation");
    Ok(ActionParameter {
        id: parameter.id.clone(),
        display_name: parameter.display_name.clone(),
        description: parameter.description.clone(),
        parameter_type: parameter.parameter_type.clone(),
        validation,
    })
}
