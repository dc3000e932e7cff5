//! Action type intermediate representation.
//!
//! These are the fully expanded, declarative shapes the compiler emits. A
//! separate runtime interprets them; nothing here executes anything.

use ontoc_core::{Identifier, Literal, StructField};
use serde::Serialize;
use std::fmt;

// ==================== Parameter Types ====================

/// The value type of an action parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ParameterType {
    Boolean,
    Integer,
    Long,
    Double,
    Decimal,
    String,
    Date,
    Timestamp,
    Geohash,
    Geoshape,
    Attachment,
    Marking,
    MediaReference,
    GeotimeSeriesReference,
    Struct {
        fields: Vec<StructField>,
    },
    #[serde(rename_all = "camelCase")]
    ObjectReference {
        object_type: Identifier,
    },
    #[serde(rename_all = "camelCase")]
    InterfaceReference {
        interface_type: Identifier,
    },
    #[serde(rename_all = "camelCase")]
    ObjectTypeReference {
        interface_types: Vec<Identifier>,
    },
    #[serde(rename_all = "camelCase")]
    ObjectSet {
        object_type: Identifier,
    },
    User,
    Group,
    List {
        item: Box<ParameterType>,
    },
}

impl ParameterType {
    /// Create a list type.
    pub fn list(item: ParameterType) -> Self {
        ParameterType::List {
            item: Box::new(item),
        }
    }

    /// Create an object reference type.
    pub fn object_reference(object_type: Identifier) -> Self {
        ParameterType::ObjectReference { object_type }
    }

    /// Create an interface reference type.
    pub fn interface_reference(interface_type: Identifier) -> Self {
        ParameterType::InterfaceReference { interface_type }
    }

    /// Returns true if this is a list type.
    pub fn is_list(&self) -> bool {
        matches!(self, ParameterType::List { .. })
    }

    /// The element type for lists, the type itself otherwise.
    pub fn item_type(&self) -> &ParameterType {
        match self {
            ParameterType::List { item } => item,
            other => other,
        }
    }

    /// Returns the type name used in messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            ParameterType::Boolean => "boolean",
            ParameterType::Integer => "integer",
            ParameterType::Long => "long",
            ParameterType::Double => "double",
            ParameterType::Decimal => "decimal",
            ParameterType::String => "string",
            ParameterType::Date => "date",
            ParameterType::Timestamp => "timestamp",
            ParameterType::Geohash => "geohash",
            ParameterType::Geoshape => "geoshape",
            ParameterType::Attachment => "attachment",
            ParameterType::Marking => "marking",
            ParameterType::MediaReference => "mediaReference",
            ParameterType::GeotimeSeriesReference => "geotimeSeriesReference",
            ParameterType::Struct { .. } => "struct",
            ParameterType::ObjectReference { .. } => "objectReference",
            ParameterType::InterfaceReference { .. } => "interfaceReference",
            ParameterType::ObjectTypeReference { .. } => "objectTypeReference",
            ParameterType::ObjectSet { .. } => "objectSet",
            ParameterType::User => "user",
            ParameterType::Group => "group",
            ParameterType::List { .. } => "list",
        }
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterType::List { item } => write!(f, "{}List", item),
            other => f.write_str(other.type_name()),
        }
    }
}

// ==================== Parameter Validation ====================

/// How the form renders a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RenderHint {
    Dropdown,
    RadioButtons,
    Checkbox,
    TextInput,
    TextArea,
    NumericInput,
    DateTimePicker,
    FilePicker,
    MandatoryMarkingPicker,
    MediaUploader,
    GeohashInput,
    GeoshapeInput,
    UserDropdown,
    GroupDropdown,
}

/// Visibility of a parameter in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Visibility {
    #[default]
    Editable,
    ReadOnly,
    Hidden,
}

/// Visibility of a section in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionVisibility {
    #[default]
    Visible,
    Hidden,
}

/// Constraint on the values a parameter accepts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AllowedValues {
    Boolean,
    #[serde(rename_all = "camelCase")]
    Text {
        min_length: Option<u32>,
        max_length: Option<u32>,
    },
    Range {
        min: Option<Literal>,
        max: Option<Literal>,
    },
    Datetime {
        min: Option<Literal>,
        max: Option<Literal>,
    },
    Geohash,
    Geoshape,
    Attachment,
    Marking,
    MediaReference,
    GeotimeSeriesReference,
    Struct {
        fields: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    ObjectQuery {
        object_type: Identifier,
    },
    #[serde(rename_all = "camelCase")]
    InterfaceObjectQuery {
        interface_type: Identifier,
    },
    #[serde(rename_all = "camelCase")]
    ObjectTypeReference {
        interface_types: Vec<Identifier>,
    },
    #[serde(rename_all = "camelCase")]
    ObjectSet {
        object_type: Identifier,
    },
    User,
    Group,
    OneOf {
        values: Vec<Literal>,
    },
}

/// Requiredness of a parameter: a flag for scalars, length bounds for lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RequiredConstraint {
    Required {
        required: bool,
    },
    #[serde(rename_all = "camelCase")]
    ListLength {
        min: Option<u32>,
        max: Option<u32>,
    },
}

impl RequiredConstraint {
    /// Returns true if a value must be supplied.
    pub fn is_required(&self) -> bool {
        match self {
            RequiredConstraint::Required { required } => *required,
            RequiredConstraint::ListLength { min, .. } => min.map(|m| m > 0).unwrap_or(false),
        }
    }
}

/// Value prefilled into a parameter when the form opens.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Prefill {
    StaticValue {
        value: Literal,
    },
    #[serde(rename_all = "camelCase")]
    ObjectParameterPropertyValue {
        parameter_id: String,
        property: String,
    },
    CurrentUser,
    CurrentTime,
}

/// Validation block of a parameter (default or overridden).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterValidationBlock {
    pub render_hint: RenderHint,
    pub visibility: Visibility,
    pub allowed_values: AllowedValues,
    pub required: RequiredConstraint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefill: Option<Prefill>,
}

/// Effect applied to a parameter when an override condition holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ParameterOverride {
    Visibility {
        visibility: Visibility,
    },
    Required {
        required: RequiredConstraint,
    },
    Prefill {
        prefill: Prefill,
    },
    #[serde(rename_all = "camelCase")]
    AllowedValues {
        allowed_values: AllowedValues,
    },
}

/// Overrides applied when a condition holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalOverride {
    pub condition: Condition,
    pub overrides: Vec<ParameterOverride>,
}

/// Full validation of a parameter: default block plus ordered overrides.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterValidation {
    pub default_validation: ParameterValidationBlock,
    pub conditional_overrides: Vec<ConditionalOverride>,
}

/// An action parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionParameter {
    pub id: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub parameter_type: ParameterType,
    pub validation: ParameterValidation,
}

// ==================== Conditions ====================

/// Comparison operators available in conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComparisonOperator {
    Equals,
    NotEquals,
    LessThan,
    LessThanOrEquals,
    GreaterThan,
    GreaterThanOrEquals,
    Intersects,
    Includes,
    IsIncludedIn,
    Matches,
    StartsWith,
}

impl ComparisonOperator {
    /// Returns true for operators that only make sense on ordered values.
    pub fn is_ordering(&self) -> bool {
        matches!(
            self,
            ComparisonOperator::LessThan
                | ComparisonOperator::LessThanOrEquals
                | ComparisonOperator::GreaterThan
                | ComparisonOperator::GreaterThanOrEquals
        )
    }
}

/// The user whose property a condition inspects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum UserReference {
    CurrentUser,
    #[serde(rename_all = "camelCase")]
    Parameter { parameter_id: String },
}

/// A property of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum UserProperty {
    UserId,
    Username,
    Email,
    Organization,
    GroupIds,
    Attribute { name: String },
}

/// One side of a comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ConditionValue {
    #[serde(rename_all = "camelCase")]
    ParameterId { parameter_id: String },
    StaticValue { value: Literal },
    UserProperty {
        user: UserReference,
        property: UserProperty,
    },
}

impl ConditionValue {
    pub fn parameter(id: impl Into<String>) -> Self {
        ConditionValue::ParameterId {
            parameter_id: id.into(),
        }
    }

    pub fn literal(value: impl Into<Literal>) -> Self {
        ConditionValue::StaticValue {
            value: value.into(),
        }
    }

    pub fn current_user(property: UserProperty) -> Self {
        ConditionValue::UserProperty {
            user: UserReference::CurrentUser,
            property,
        }
    }
}

/// Canonical condition tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Condition {
    True,
    Comparison {
        operator: ComparisonOperator,
        left: ConditionValue,
        right: ConditionValue,
    },
    And {
        conditions: Vec<Condition>,
    },
    Or {
        conditions: Vec<Condition>,
    },
}

// ==================== Action-level and Section Validation ====================

/// Action-level validation rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionValidationRule {
    pub condition: Condition,
    pub failure_message: String,
}

impl ActionValidationRule {
    /// The always-passing rule used when no validation is declared.
    pub fn always() -> Self {
        Self {
            condition: Condition::True,
            failure_message: String::new(),
        }
    }
}

/// Visibility change applied to a section when a condition holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionConditionalOverride {
    pub condition: Condition,
    pub visibility: SectionVisibility,
}

/// Validation of one section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionValidation {
    pub section_id: String,
    pub default_visibility: SectionVisibility,
    pub conditional_overrides: Vec<SectionConditionalOverride>,
}

/// Action-level and per-section validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionValidation {
    pub action_level: Vec<ActionValidationRule>,
    pub sections: Vec<SectionValidation>,
}

// ==================== Logic ====================

/// The value bound to a property by a logic rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LogicValue {
    #[serde(rename_all = "camelCase")]
    ParameterId { parameter_id: String },
    StaticValue { value: Literal },
    CurrentUser,
    CurrentTime,
    #[serde(rename_all = "camelCase")]
    ObjectParameterPropertyValue {
        parameter_id: String,
        property: String,
    },
}

impl LogicValue {
    pub fn parameter(id: impl Into<String>) -> Self {
        LogicValue::ParameterId {
            parameter_id: id.into(),
        }
    }

    pub fn literal(value: impl Into<Literal>) -> Self {
        LogicValue::StaticValue {
            value: value.into(),
        }
    }

    /// The parameter this value reads, if any.
    pub fn referenced_parameter(&self) -> Option<&str> {
        match self {
            LogicValue::ParameterId { parameter_id }
            | LogicValue::ObjectParameterPropertyValue { parameter_id, .. } => Some(parameter_id),
            _ => None,
        }
    }
}

/// Object property binding in a logic rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyBinding {
    pub property: String,
    pub value: LogicValue,
}

/// Interface property binding in a logic rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedPropertyBinding {
    pub shared_property_type: Identifier,
    pub value: LogicValue,
}

/// The executable rule of an action.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LogicRule {
    #[serde(rename_all = "camelCase")]
    AddObject {
        object_type: Identifier,
        property_values: Vec<PropertyBinding>,
    },
    #[serde(rename_all = "camelCase")]
    ModifyObject {
        object_to_modify: String,
        property_values: Vec<PropertyBinding>,
    },
    #[serde(rename_all = "camelCase")]
    DeleteObject { object_to_delete: String },
    #[serde(rename_all = "camelCase")]
    AddOrModifyObject {
        object_to_modify: String,
        property_values: Vec<PropertyBinding>,
    },
    #[serde(rename_all = "camelCase")]
    AddInterface {
        interface_type: Identifier,
        object_type_parameter: String,
        shared_property_values: Vec<SharedPropertyBinding>,
    },
    #[serde(rename_all = "camelCase")]
    ModifyInterface {
        interface_type: Identifier,
        interface_object_to_modify: String,
        /// When set, a new object of the chosen type is created if the
        /// target parameter is empty.
        #[serde(skip_serializing_if = "Option::is_none")]
        object_type_parameter: Option<String>,
        shared_property_values: Vec<SharedPropertyBinding>,
    },
}

impl LogicRule {
    /// Short name of the rule kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            LogicRule::AddObject { .. } => "addObject",
            LogicRule::ModifyObject { .. } => "modifyObject",
            LogicRule::DeleteObject { .. } => "deleteObject",
            LogicRule::AddOrModifyObject { .. } => "addOrModifyObject",
            LogicRule::AddInterface { .. } => "addInterface",
            LogicRule::ModifyInterface { .. } => "modifyInterface",
        }
    }
}

// ==================== Layout and Display ====================

/// A group of parameters rendered together.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub collapsed_by_default: bool,
    pub parameters: Vec<String>,
}

/// An entry of the form content ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FormContent {
    #[serde(rename_all = "camelCase")]
    Parameter { parameter_id: String },
    #[serde(rename_all = "camelCase")]
    Section { section_id: String },
}

/// Lifecycle status of an action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionStatus {
    Experimental,
    #[default]
    Active,
    Deprecated,
}

/// Initial layout of the action form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FormFormat {
    #[default]
    Form,
    Table,
}

/// Icon shown next to the action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Icon {
    pub locator: String,
    pub color: String,
}

/// Display and layout metadata of an action.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionDisplay {
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    pub status: ActionStatus,
    pub default_format: FormFormat,
    pub enable_layout_switch: bool,
}

/// Metadata shown around submission.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submit_button_text: Option<String>,
}

/// A fully compiled action type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionType {
    pub id: Identifier,
    pub display: ActionDisplay,
    pub logic: Vec<LogicRule>,
    pub parameters: Vec<ActionParameter>,
    pub parameter_ordering: Vec<String>,
    pub validation: ActionValidation,
    pub sections: Vec<Section>,
    pub form_content_ordering: Vec<FormContent>,
    pub submission: SubmissionMetadata,
}

impl ActionType {
    /// Get a parameter by id.
    pub fn get_parameter(&self, id: &str) -> Option<&ActionParameter> {
        self.parameters.iter().find(|p| p.id == id)
    }

    /// Get a section by id.
    pub fn get_section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }
}
