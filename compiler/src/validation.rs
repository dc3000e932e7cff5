//! Validation Builder: default parameter validation and override layering.

use crate::{CompileError, CompileResult, ConditionCompiler, ParameterConfig};
use ontoc_core::{cached_regex, Literal, PropertyType};
use ontoc_registry::{
    AllowedValues, ConditionalOverride, ParameterOverride, ParameterType, ParameterValidation,
    ParameterValidationBlock, Prefill, RenderHint, RequiredConstraint, Visibility,
};
use regex_lite::Regex;
use std::sync::OnceLock;

const DATE_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}$";
const TIMESTAMP_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}T";

static DATE_REGEX: OnceLock<Regex> = OnceLock::new();
static TIMESTAMP_REGEX: OnceLock<Regex> = OnceLock::new();

// ==================== Type Mapping ====================

/// Parameter type generated for a property, if the property can be a parameter.
pub fn parameter_type_for(property_type: &PropertyType) -> Option<ParameterType> {
    let ty = match property_type {
        PropertyType::String => ParameterType::String,
        PropertyType::Boolean => ParameterType::Boolean,
        PropertyType::Byte | PropertyType::Short | PropertyType::Integer => ParameterType::Integer,
        PropertyType::Long => ParameterType::Long,
        PropertyType::Float | PropertyType::Double => ParameterType::Double,
        PropertyType::Decimal => ParameterType::Decimal,
        PropertyType::Date => ParameterType::Date,
        PropertyType::Timestamp => ParameterType::Timestamp,
        PropertyType::Geopoint => ParameterType::Geohash,
        PropertyType::Geoshape => ParameterType::Geoshape,
        PropertyType::Attachment => ParameterType::Attachment,
        PropertyType::Marking => ParameterType::Marking,
        PropertyType::MediaReference => ParameterType::MediaReference,
        PropertyType::GeotimeSeries => ParameterType::GeotimeSeriesReference,
        PropertyType::Struct { fields } => ParameterType::Struct {
            fields: fields.clone(),
        },
        PropertyType::Array { item } => ParameterType::list(parameter_type_for(item)?),
        PropertyType::Vector => return None,
    };
    Some(ty)
}

// ==================== Default Validation ====================

/// Render hint and allowed values of a scalar parameter type.
fn scalar_defaults(parameter_type: &ParameterType) -> (RenderHint, AllowedValues) {
    match parameter_type {
        ParameterType::Boolean => (RenderHint::Dropdown, AllowedValues::Boolean),
        ParameterType::Integer
        | ParameterType::Long
        | ParameterType::Double
        | ParameterType::Decimal => (
            RenderHint::NumericInput,
            AllowedValues::Range {
                min: None,
                max: None,
            },
        ),
        ParameterType::String => (
            RenderHint::TextInput,
            AllowedValues::Text {
                min_length: None,
                max_length: None,
            },
        ),
        ParameterType::Date | ParameterType::Timestamp => (
            RenderHint::DateTimePicker,
            AllowedValues::Datetime {
                min: None,
                max: None,
            },
        ),
        ParameterType::Geohash => (RenderHint::GeohashInput, AllowedValues::Geohash),
        ParameterType::Geoshape => (RenderHint::GeoshapeInput, AllowedValues::Geoshape),
        ParameterType::Attachment => (RenderHint::FilePicker, AllowedValues::Attachment),
        ParameterType::Marking => (RenderHint::MandatoryMarkingPicker, AllowedValues::Marking),
        ParameterType::MediaReference => (RenderHint::MediaUploader, AllowedValues::MediaReference),
        ParameterType::GeotimeSeriesReference => {
            (RenderHint::Dropdown, AllowedValues::GeotimeSeriesReference)
        }
        ParameterType::Struct { fields } => (
            RenderHint::TextInput,
            AllowedValues::Struct {
                fields: fields.iter().map(|f| f.api_name.clone()).collect(),
            },
        ),
        ParameterType::ObjectReference { object_type } => (
            RenderHint::Dropdown,
            AllowedValues::ObjectQuery {
                object_type: object_type.clone(),
            },
        ),
        ParameterType::InterfaceReference { interface_type } => (
            RenderHint::Dropdown,
            AllowedValues::InterfaceObjectQuery {
                interface_type: interface_type.clone(),
            },
        ),
        ParameterType::ObjectTypeReference { interface_types } => (
            RenderHint::Dropdown,
            AllowedValues::ObjectTypeReference {
                interface_types: interface_types.clone(),
            },
        ),
        ParameterType::ObjectSet { object_type } => (
            RenderHint::Dropdown,
            AllowedValues::ObjectSet {
                object_type: object_type.clone(),
            },
        ),
        ParameterType::User => (RenderHint::UserDropdown, AllowedValues::User),
        ParameterType::Group => (RenderHint::GroupDropdown, AllowedValues::Group),
        ParameterType::List { item } => scalar_defaults(item),
    }
}

/// Requiredness of a parameter: a flag for scalars, length bounds for lists.
///
/// A required list without an explicit minimum needs at least one value.
pub fn required_constraint(
    parameter_type: &ParameterType,
    required: bool,
    min: Option<u32>,
    max: Option<u32>,
) -> RequiredConstraint {
    if parameter_type.is_list() {
        let min = match min {
            Some(min) => Some(min),
            None if required => Some(1),
            None => None,
        };
        RequiredConstraint::ListLength { min, max }
    } else {
        RequiredConstraint::Required { required }
    }
}

/// Default validation block for a parameter type.
pub fn default_validation(parameter_type: &ParameterType, required: bool) -> ParameterValidationBlock {
    let (render_hint, allowed_values) = scalar_defaults(parameter_type);
    ParameterValidationBlock {
        render_hint,
        visibility: Visibility::Editable,
        allowed_values,
        required: required_constraint(parameter_type, required, None, None),
        prefill: None,
    }
}

/// A list length constraint must be satisfiable.
fn check_list_length(parameter_id: &str, required: &RequiredConstraint) -> CompileResult<()> {
    match required {
        RequiredConstraint::ListLength {
            min: Some(min),
            max: Some(max),
        } if min > max => Err(CompileError::InvalidListLength {
            parameter: parameter_id.to_string(),
            min: *min,
            max: *max,
        }),
        _ => Ok(()),
    }
}

// ==================== Literal Checks ====================

/// Returns true if `value` is a valid literal of `parameter_type`.
pub fn literal_matches(value: &Literal, parameter_type: &ParameterType) -> CompileResult<bool> {
    let matches = match (parameter_type, value) {
        (ParameterType::Boolean, Literal::Boolean(_)) => true,
        (ParameterType::Integer, Literal::Integer(i)) => i32::try_from(*i).is_ok(),
        (ParameterType::Long, Literal::Integer(_)) => true,
        (ParameterType::Double | ParameterType::Decimal, Literal::Double(_) | Literal::Integer(_)) => {
            true
        }
        (
            ParameterType::String
            | ParameterType::User
            | ParameterType::Group
            | ParameterType::Geohash,
            Literal::String(_),
        ) => true,
        (ParameterType::Date, Literal::Date(d)) => {
            cached_regex(&DATE_REGEX, DATE_PATTERN)?.is_match(d)
        }
        (ParameterType::Timestamp, Literal::Timestamp(t)) => {
            cached_regex(&TIMESTAMP_REGEX, TIMESTAMP_PATTERN)?.is_match(t)
        }
        (ParameterType::List { item }, Literal::List(values)) => {
            for value in values {
                if !literal_matches(value, item)? {
                    return Ok(false);
                }
            }
            true
        }
        _ => false,
    };
    Ok(matches)
}

/// Check a static default or override value of a parameter.
pub fn check_static_value(
    parameter_id: &str,
    parameter_type: &ParameterType,
    value: &Literal,
) -> CompileResult<()> {
    if literal_matches(value, parameter_type)? {
        Ok(())
    } else {
        Err(CompileError::default_value_type_mismatch(
            parameter_id,
            parameter_type,
            value,
        ))
    }
}

fn check_prefill(
    parameter_id: &str,
    parameter_type: &ParameterType,
    prefill: &Prefill,
) -> CompileResult<()> {
    match prefill {
        Prefill::StaticValue { value } => check_static_value(parameter_id, parameter_type, value),
        _ => Ok(()),
    }
}

fn check_allowed_values(
    parameter_id: &str,
    parameter_type: &ParameterType,
    allowed: &AllowedValues,
) -> CompileResult<()> {
    if let AllowedValues::OneOf { values } = allowed {
        let item = parameter_type.item_type();
        for value in values {
            check_static_value(parameter_id, item, value)?;
        }
    }
    Ok(())
}

// ==================== Overrides ====================

/// Layer configuration and compiled conditional overrides over a base block.
///
/// The base block is left untouched.
pub fn apply_overrides(
    base: &ParameterValidationBlock,
    parameter_id: &str,
    parameter_type: &ParameterType,
    config: &ParameterConfig,
    conditions: &ConditionCompiler<'_>,
) -> CompileResult<ParameterValidation> {
    let mut block = base.clone();

    if let Some(render_hint) = config.render_hint {
        block.render_hint = render_hint;
    }
    if let Some(visibility) = config.visibility {
        block.visibility = visibility;
    }
    if let Some(allowed) = &config.allowed_values {
        check_allowed_values(parameter_id, parameter_type, allowed)?;
        block.allowed_values = allowed.clone();
    }
    if config.required.is_some() || config.list_min.is_some() || config.list_max.is_some() {
        let required = config.required.unwrap_or_else(|| base.required.is_required());
        block.required =
            required_constraint(parameter_type, required, config.list_min, config.list_max);
        check_list_length(parameter_id, &block.required)?;
    }
    if let Some(prefill) = &config.prefill {
        check_prefill(parameter_id, parameter_type, prefill)?;
        block.prefill = Some(prefill.clone());
    }

    let mut conditional_overrides = Vec::with_capacity(config.conditional_overrides.len());
    for def in &config.conditional_overrides {
        let condition = conditions.compile(&def.condition)?;
        let mut overrides = Vec::with_capacity(def.overrides.len());
        for effect in &def.overrides {
            overrides.push(normalize_override(parameter_id, parameter_type, effect)?);
        }
        conditional_overrides.push(ConditionalOverride {
            condition,
            overrides,
        });
    }

    Ok(ParameterValidation {
        default_validation: block,
        conditional_overrides,
    })
}

/// Check an override effect; list parameters get length bounds instead of a flag.
fn normalize_override(
    parameter_id: &str,
    parameter_type: &ParameterType,
    effect: &ParameterOverride,
) -> CompileResult<ParameterOverride> {
    match effect {
        ParameterOverride::Prefill { prefill } => {
            check_prefill(parameter_id, parameter_type, prefill)?;
        }
        ParameterOverride::AllowedValues { allowed_values } => {
            check_allowed_values(parameter_id, parameter_type, allowed_values)?;
        }
        ParameterOverride::Required {
            required: RequiredConstraint::Required { required },
        } if parameter_type.is_list() => {
            return Ok(ParameterOverride::Required {
                required: required_constraint(parameter_type, *required, None, None),
            });
        }
        ParameterOverride::Required { required } => {
            check_list_length(parameter_id, required)?;
        }
        _ => {}
    }
    Ok(effect.clone())
}
