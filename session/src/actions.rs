//! Action builders.
//!
//! Builders collect an action definition, compile it against the session
//! registry on `done()` and register the result only when compilation
//! succeeds. A failed `done()` leaves the session untouched.

use ontoc_compiler::{
    ActionCompiler, ActionMetadata, ActionParameterDef, ActionValidationDef, CompiledAction,
    ConditionSpec, CrudActionDef, CrudKind, CrudTarget, ManualActionDef, ParameterConfig,
    SectionDef,
};
use ontoc_core::{validate_api_name, EntityName, Identifier};
use ontoc_registry::{
    ActionStatus, Entity, FormFormat, Icon, LogicRule, LogicValue, ParameterType,
};

use crate::error::SessionResult;
use crate::session::Session;

/// Register a compiled action and keep the permission table in step.
fn register(session: &mut Session, compiled: CompiledAction) -> Identifier {
    let id = compiled.action_type.id.clone();
    let registry = session.registry_mut();
    registry.register(Entity::ActionType(Box::new(compiled.action_type)));
    match compiled.permission {
        Some(permission) => registry.register_action_permission(permission),
        None => registry.clear_action_permission(&id),
    }
    id
}

// ==================== CRUD Actions ====================

/// Builder for a generated create/modify/delete/create-or-modify action.
pub struct CrudActionBuilder<'s> {
    session: &'s mut Session,
    def: CrudActionDef,
}

impl<'s> CrudActionBuilder<'s> {
    pub(crate) fn new(session: &'s mut Session, kind: CrudKind, target: CrudTarget) -> Self {
        let id = session.qualify(target.default_api_name(kind));
        Self {
            session,
            def: CrudActionDef::new(id, kind, target),
        }
    }

    /// Override the generated api name.
    pub fn api_name(mut self, api_name: impl Into<EntityName>) -> Self {
        self.def.id = self.session.qualify(api_name);
        self
    }

    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.def.metadata.display_name = Some(display_name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.def.metadata.description = Some(description.into());
        self
    }

    pub fn icon(mut self, locator: impl Into<String>, color: impl Into<String>) -> Self {
        self.def.metadata.icon = Some(Icon {
            locator: locator.into(),
            color: color.into(),
        });
        self
    }

    pub fn status(mut self, status: ActionStatus) -> Self {
        self.def.metadata.status = status;
        self
    }

    pub fn default_format(mut self, format: FormFormat) -> Self {
        self.def.metadata.default_format = format;
        self
    }

    pub fn enable_layout_switch(mut self) -> Self {
        self.def.metadata.enable_layout_switch = true;
        self
    }

    pub fn success_message(mut self, message: impl Into<String>) -> Self {
        self.def.metadata.submission.success_message = Some(message.into());
        self
    }

    pub fn submit_button_text(mut self, text: impl Into<String>) -> Self {
        self.def.metadata.submission.submit_button_text = Some(text.into());
        self
    }

    /// Leave a target property out of the generated parameters.
    ///
    /// Interface properties are named by shared property type.
    pub fn exclude(mut self, property: impl Into<EntityName>) -> Self {
        let key = self.property_key(property);
        self.def.excluded_properties.push(key);
        self
    }

    /// Configure a generated parameter, or declare a free-standing one
    /// through [`ParameterConfig::custom_type`].
    pub fn parameter(mut self, id: impl Into<String>, config: ParameterConfig) -> Self {
        self.def.parameter_configuration.push((id.into(), config));
        self
    }

    /// Bind a target property to a fixed value instead of a parameter.
    pub fn fixed_value(mut self, property: impl Into<EntityName>, value: LogicValue) -> Self {
        let key = self.property_key(property);
        self.def.non_parameter_mappings.push((key, value));
        self
    }

    /// Explicit parameter ordering; must list every parameter exactly once.
    pub fn ordering<S: Into<String>>(mut self, ordering: impl IntoIterator<Item = S>) -> Self {
        self.def.parameter_ordering = Some(ordering.into_iter().map(Into::into).collect());
        self
    }

    pub fn section(mut self, section: SectionDef) -> Self {
        self.def.sections.push(section);
        self
    }

    pub fn validation(mut self, condition: ConditionSpec, failure_message: impl Into<String>) -> Self {
        self.def
            .validation
            .push(ActionValidationDef::new(condition, failure_message));
        self
    }

    /// Restrict submission to members of `group`. Repeatable.
    pub fn submitter_group(mut self, group: impl Into<String>) -> Self {
        self.def.submitter_groups.push(group.into());
        self
    }

    fn property_key(&self, property: impl Into<EntityName>) -> String {
        let property = property.into();
        if self.def.target.is_interface() {
            self.session.qualify(property).to_string()
        } else {
            property.as_str().to_string()
        }
    }

    /// Compile and register the action.
    pub fn done(self) -> SessionResult<Identifier> {
        if self.session.options().strict_identifiers {
            self.def.id.validate()?;
            for (key, _) in &self.def.parameter_configuration {
                validate_api_name(key)?;
            }
        }
        let compiled = ActionCompiler::new(self.session.registry()).compile_crud_action(&self.def)?;
        Ok(register(self.session, compiled))
    }
}

// ==================== Manual Actions ====================

/// Builder for an action with explicit parameters and rules.
pub struct ManualActionBuilder<'s> {
    session: &'s mut Session,
    def: ManualActionDef,
}

impl<'s> ManualActionBuilder<'s> {
    pub(crate) fn new(session: &'s mut Session, id: Identifier) -> Self {
        Self {
            session,
            def: ManualActionDef::new(id),
        }
    }

    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.def.metadata.display_name = Some(display_name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.def.metadata.description = Some(description.into());
        self
    }

    pub fn icon(mut self, locator: impl Into<String>, color: impl Into<String>) -> Self {
        self.def.metadata.icon = Some(Icon {
            locator: locator.into(),
            color: color.into(),
        });
        self
    }

    pub fn status(mut self, status: ActionStatus) -> Self {
        self.def.metadata.status = status;
        self
    }

    pub fn metadata(mut self, metadata: ActionMetadata) -> Self {
        self.def.metadata = metadata;
        self
    }

    pub fn parameter(mut self, id: impl Into<String>, parameter_type: ParameterType) -> Self {
        self.def
            .parameters
            .push(ActionParameterDef::new(id, parameter_type));
        self
    }

    pub fn parameter_with(
        mut self,
        id: impl Into<String>,
        parameter_type: ParameterType,
        config: ParameterConfig,
    ) -> Self {
        self.def
            .parameters
            .push(ActionParameterDef::new(id, parameter_type).with_config(config));
        self
    }

    pub fn rule(mut self, rule: LogicRule) -> Self {
        self.def.logic.push(rule);
        self
    }

    pub fn ordering<S: Into<String>>(mut self, ordering: impl IntoIterator<Item = S>) -> Self {
        self.def.parameter_ordering = Some(ordering.into_iter().map(Into::into).collect());
        self
    }

    pub fn section(mut self, section: SectionDef) -> Self {
        self.def.sections.push(section);
        self
    }

    pub fn validation(mut self, condition: ConditionSpec, failure_message: impl Into<String>) -> Self {
        self.def
            .validation
            .push(ActionValidationDef::new(condition, failure_message));
        self
    }

    pub fn submitter_group(mut self, group: impl Into<String>) -> Self {
        self.def.submitter_groups.push(group.into());
        self
    }

    /// Compile and register the action.
    pub fn done(self) -> SessionResult<Identifier> {
        if self.session.options().strict_identifiers {
            self.def.id.validate()?;
            for parameter in &self.def.parameters {
                validate_api_name(&parameter.id)?;
            }
        }
        let compiled =
            ActionCompiler::new(self.session.registry()).compile_manual_action(&self.def)?;
        Ok(register(self.session, compiled))
    }
}
