//! Compact action descriptions accepted by the compiler.
//!
//! Definitions carry already qualified entity identifiers. Object property
//! keys are local api names; interface property keys are shared property type
//! identifiers. Parameter ids are always local.

use ontoc_core::{kebab_case, Identifier, Literal};
use ontoc_registry::{
    ActionStatus, AllowedValues, ComparisonOperator, ConditionValue, FormFormat, Icon, LogicRule,
    LogicValue, ParameterOverride, ParameterType, Prefill, RenderHint, SectionVisibility,
    SubmissionMetadata, UserProperty, UserReference, Visibility,
};

// ==================== CRUD Actions ====================

/// The four generated action kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrudKind {
    Create,
    Modify,
    Delete,
    CreateOrModify,
}

impl CrudKind {
    fn api_prefix(&self) -> &'static str {
        match self {
            CrudKind::Create => "create",
            CrudKind::Modify => "modify",
            CrudKind::Delete => "delete",
            CrudKind::CreateOrModify => "create-or-modify",
        }
    }

    /// Display name of the generated action for a target display name.
    pub fn default_display_name(&self, target_display: &str) -> String {
        match self {
            CrudKind::Create => format!("Create {}", target_display),
            CrudKind::Modify => format!("Modify {}", target_display),
            CrudKind::Delete => format!("Delete {}", target_display),
            CrudKind::CreateOrModify => format!("Create or modify {}", target_display),
        }
    }
}

/// The entity a generated action operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrudTarget {
    Object(Identifier),
    Interface(Identifier),
}

impl CrudTarget {
    pub fn id(&self) -> &Identifier {
        match self {
            CrudTarget::Object(id) | CrudTarget::Interface(id) => id,
        }
    }

    pub fn is_interface(&self) -> bool {
        matches!(self, CrudTarget::Interface(_))
    }

    /// Unqualified api name used when none is given, e.g. `create-object-employee`.
    pub fn default_api_name(&self, kind: CrudKind) -> String {
        let entity = match self {
            CrudTarget::Object(_) => "object",
            CrudTarget::Interface(_) => "interface-object",
        };
        format!(
            "{}-{}-{}",
            kind.api_prefix(),
            entity,
            kebab_case(self.id().local_name())
        )
    }
}

/// Display and submission metadata shared by every action.
#[derive(Debug, Clone, Default)]
pub struct ActionMetadata {
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<Icon>,
    pub status: ActionStatus,
    pub default_format: FormFormat,
    pub enable_layout_switch: bool,
    pub submission: SubmissionMetadata,
}

/// A generated create/modify/delete/create-or-modify action.
#[derive(Debug, Clone)]
pub struct CrudActionDef {
    pub id: Identifier,
    pub kind: CrudKind,
    pub target: CrudTarget,
    pub metadata: ActionMetadata,
    /// Target properties that get no parameter.
    pub excluded_properties: Vec<String>,
    /// Per-parameter configuration keyed by parameter id, in declaration order.
    pub parameter_configuration: Vec<(String, ParameterConfig)>,
    /// Target properties bound to a fixed value instead of a parameter.
    pub non_parameter_mappings: Vec<(String, LogicValue)>,
    pub parameter_ordering: Option<Vec<String>>,
    pub sections: Vec<SectionDef>,
    pub validation: Vec<ActionValidationDef>,
    pub submitter_groups: Vec<String>,
}

impl CrudActionDef {
    pub fn new(id: Identifier, kind: CrudKind, target: CrudTarget) -> Self {
        Self {
            id,
            kind,
            target,
            metadata: ActionMetadata::default(),
            excluded_properties: Vec::new(),
            parameter_configuration: Vec::new(),
            non_parameter_mappings: Vec::new(),
            parameter_ordering: None,
            sections: Vec::new(),
            validation: Vec::new(),
            submitter_groups: Vec::new(),
        }
    }

    /// Configuration of one parameter, if any.
    pub fn parameter_config(&self, id: &str) -> Option<&ParameterConfig> {
        self.parameter_configuration
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, config)| config)
    }

    /// Fixed value of one target property, if any.
    pub fn non_parameter_mapping(&self, property: &str) -> Option<&LogicValue> {
        self.non_parameter_mappings
            .iter()
            .find(|(key, _)| key == property)
            .map(|(_, value)| value)
    }
}

// ==================== Manual Actions ====================

/// A parameter declared by hand.
#[derive(Debug, Clone)]
pub struct ActionParameterDef {
    pub id: String,
    pub parameter_type: ParameterType,
    pub config: ParameterConfig,
}

impl ActionParameterDef {
    pub fn new(id: impl Into<String>, parameter_type: ParameterType) -> Self {
        Self {
            id: id.into(),
            parameter_type,
            config: ParameterConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ParameterConfig) -> Self {
        self.config = config;
        self
    }
}

/// An action with explicit parameters and rules.
#[derive(Debug, Clone)]
pub struct ManualActionDef {
    pub id: Identifier,
    pub metadata: ActionMetadata,
    pub parameters: Vec<ActionParameterDef>,
    pub logic: Vec<LogicRule>,
    pub parameter_ordering: Option<Vec<String>>,
    pub sections: Vec<SectionDef>,
    pub validation: Vec<ActionValidationDef>,
    pub submitter_groups: Vec<String>,
}

impl ManualActionDef {
    pub fn new(id: Identifier) -> Self {
        Self {
            id,
            metadata: ActionMetadata::default(),
            parameters: Vec::new(),
            logic: Vec::new(),
            parameter_ordering: None,
            sections: Vec::new(),
            validation: Vec::new(),
            submitter_groups: Vec::new(),
        }
    }
}

// ==================== Parameter Configuration ====================

/// Overrides for one parameter.
#[derive(Debug, Clone, Default)]
pub struct ParameterConfig {
    pub display_name: Option<String>,
    pub description: Option<String>,
    /// Explicit type; required for parameters that match no property.
    pub parameter_type: Option<ParameterType>,
    pub required: Option<bool>,
    pub list_min: Option<u32>,
    pub list_max: Option<u32>,
    pub visibility: Option<Visibility>,
    pub render_hint: Option<RenderHint>,
    pub allowed_values: Option<AllowedValues>,
    pub prefill: Option<Prefill>,
    pub conditional_overrides: Vec<ConditionalOverrideDef>,
}

impl ParameterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn custom_type(mut self, parameter_type: ParameterType) -> Self {
        self.parameter_type = Some(parameter_type);
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Bounds on the number of values of a list parameter.
    pub fn list_length(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.list_min = min;
        self.list_max = max;
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = Some(visibility);
        self
    }

    pub fn render_hint(mut self, render_hint: RenderHint) -> Self {
        self.render_hint = Some(render_hint);
        self
    }

    pub fn allowed_values(mut self, allowed_values: AllowedValues) -> Self {
        self.allowed_values = Some(allowed_values);
        self
    }

    pub fn prefill(mut self, prefill: Prefill) -> Self {
        self.prefill = Some(prefill);
        self
    }

    /// Prefill with a static literal.
    pub fn default_value(self, value: impl Into<Literal>) -> Self {
        self.prefill(Prefill::StaticValue {
            value: value.into(),
        })
    }

    /// Apply `overrides` whenever `condition` holds.
    pub fn override_when(
        mut self,
        condition: ConditionSpec,
        overrides: impl IntoIterator<Item = ParameterOverride>,
    ) -> Self {
        self.conditional_overrides.push(ConditionalOverrideDef {
            condition,
            overrides: overrides.into_iter().collect(),
        });
        self
    }
}

/// Parameter overrides guarded by a condition.
#[derive(Debug, Clone)]
pub struct ConditionalOverrideDef {
    pub condition: ConditionSpec,
    pub overrides: Vec<ParameterOverride>,
}

// ==================== Conditions ====================

/// Right-hand side of a parameter comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterMatch {
    Parameter(String),
    Static(Literal),
}

/// Condition input before lowering into the canonical tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionSpec {
    Always,
    /// The submitting user belongs to the group.
    Group(String),
    Parameter {
        parameter_id: String,
        operator: ComparisonOperator,
        value: ParameterMatch,
    },
    UserProperty {
        user: UserReference,
        property: UserProperty,
        operator: ComparisonOperator,
        value: ParameterMatch,
    },
    And(Vec<ConditionSpec>),
    Or(Vec<ConditionSpec>),
    /// Already canonical comparison, checked and passed through.
    Comparison {
        operator: ComparisonOperator,
        left: ConditionValue,
        right: ConditionValue,
    },
}

impl ConditionSpec {
    pub fn group(group: impl Into<String>) -> Self {
        ConditionSpec::Group(group.into())
    }

    /// `parameter == value`
    pub fn parameter_equals(parameter_id: impl Into<String>, value: impl Into<Literal>) -> Self {
        ConditionSpec::Parameter {
            parameter_id: parameter_id.into(),
            operator: ComparisonOperator::Equals,
            value: ParameterMatch::Static(value.into()),
        }
    }

    pub fn parameter(
        parameter_id: impl Into<String>,
        operator: ComparisonOperator,
        value: ParameterMatch,
    ) -> Self {
        ConditionSpec::Parameter {
            parameter_id: parameter_id.into(),
            operator,
            value,
        }
    }

    pub fn current_user(
        property: UserProperty,
        operator: ComparisonOperator,
        value: ParameterMatch,
    ) -> Self {
        ConditionSpec::UserProperty {
            user: UserReference::CurrentUser,
            property,
            operator,
            value,
        }
    }

    pub fn and(conditions: impl IntoIterator<Item = ConditionSpec>) -> Self {
        ConditionSpec::And(conditions.into_iter().collect())
    }

    pub fn or(conditions: impl IntoIterator<Item = ConditionSpec>) -> Self {
        ConditionSpec::Or(conditions.into_iter().collect())
    }
}

// ==================== Sections and Validation ====================

/// Section visibility guarded by a condition.
#[derive(Debug, Clone)]
pub struct SectionOverrideDef {
    pub condition: ConditionSpec,
    pub visibility: SectionVisibility,
}

/// A section of the action form.
#[derive(Debug, Clone)]
pub struct SectionDef {
    pub id: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub collapsed_by_default: bool,
    pub parameters: Vec<String>,
    pub default_visibility: SectionVisibility,
    pub conditional_overrides: Vec<SectionOverrideDef>,
}

impl SectionDef {
    pub fn new<S: Into<String>>(
        id: impl Into<String>,
        parameters: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: None,
            description: None,
            collapsed_by_default: false,
            parameters: parameters.into_iter().map(Into::into).collect(),
            default_visibility: SectionVisibility::Visible,
            conditional_overrides: Vec::new(),
        }
    }

    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn collapsed(mut self) -> Self {
        self.collapsed_by_default = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.default_visibility = SectionVisibility::Hidden;
        self
    }

    pub fn visibility_when(mut self, condition: ConditionSpec, visibility: SectionVisibility) -> Self {
        self.conditional_overrides.push(SectionOverrideDef {
            condition,
            visibility,
        });
        self
    }
}

/// An action-level validation rule.
#[derive(Debug, Clone)]
pub struct ActionValidationDef {
    pub condition: ConditionSpec,
    pub failure_message: String,
}

impl ActionValidationDef {
    pub fn new(condition: ConditionSpec, failure_message: impl Into<String>) -> Self {
        Self {
            condition,
            failure_message: failure_message.into(),
        }
    }
}
