//! Condition Compiler: lowers condition inputs into the canonical tree.
//!
//! One compiler instance serves action-level validation, parameter overrides
//! and section overrides of a single action.

use crate::validation::literal_matches;
use crate::{CompileError, CompileResult, ConditionSpec, ParameterMatch};
use ontoc_core::Literal;
use ontoc_registry::{
    ComparisonOperator, Condition, ConditionValue, ParameterType, UserProperty, UserReference,
};
use std::collections::HashMap;

/// Compiles conditions against the parameters of one action.
#[derive(Debug, Clone)]
pub struct ConditionCompiler<'a> {
    parameters: HashMap<&'a str, &'a ParameterType>,
}

impl<'a> ConditionCompiler<'a> {
    pub fn new(parameters: impl IntoIterator<Item = (&'a str, &'a ParameterType)>) -> Self {
        Self {
            parameters: parameters.into_iter().collect(),
        }
    }

    fn parameter_type(&self, id: &str) -> CompileResult<&'a ParameterType> {
        self.parameters
            .get(id)
            .copied()
            .ok_or_else(|| CompileError::unknown_condition_parameter(id))
    }

    /// Lower a condition input.
    pub fn compile(&self, spec: &ConditionSpec) -> CompileResult<Condition> {
        match spec {
            ConditionSpec::Always => Ok(Condition::True),
            ConditionSpec::Group(group) => Ok(group_condition(group)),
            ConditionSpec::Parameter {
                parameter_id,
                operator,
                value,
            } => {
                let subject = self.parameter_type(parameter_id)?;
                let right = self.match_value(parameter_id, subject, *operator, value)?;
                Ok(Condition::Comparison {
                    operator: *operator,
                    left: ConditionValue::parameter(parameter_id.as_str()),
                    right,
                })
            }
            ConditionSpec::UserProperty {
                user,
                property,
                operator,
                value,
            } => {
                self.check_user(user)?;
                let subject = user_property_type(property);
                let right = self.match_value(&property_label(property), &subject, *operator, value)?;
                Ok(Condition::Comparison {
                    operator: *operator,
                    left: ConditionValue::UserProperty {
                        user: user.clone(),
                        property: property.clone(),
                    },
                    right,
                })
            }
            ConditionSpec::And(children) => Ok(Condition::And {
                conditions: self.compile_all(children)?,
            }),
            ConditionSpec::Or(children) => Ok(Condition::Or {
                conditions: self.compile_all(children)?,
            }),
            ConditionSpec::Comparison {
                operator,
                left,
                right,
            } => {
                self.check_comparison(*operator, left, right)?;
                Ok(Condition::Comparison {
                    operator: *operator,
                    left: left.clone(),
                    right: right.clone(),
                })
            }
        }
    }

    fn compile_all(&self, specs: &[ConditionSpec]) -> CompileResult<Vec<Condition>> {
        specs.iter().map(|spec| self.compile(spec)).collect()
    }

    fn match_value(
        &self,
        subject: &str,
        subject_type: &ParameterType,
        operator: ComparisonOperator,
        value: &ParameterMatch,
    ) -> CompileResult<ConditionValue> {
        match value {
            ParameterMatch::Parameter(other) => {
                self.parameter_type(other)?;
                Ok(ConditionValue::parameter(other.as_str()))
            }
            ParameterMatch::Static(literal) => {
                check_literal(subject, subject_type, operator, literal)?;
                Ok(ConditionValue::StaticValue {
                    value: literal.clone(),
                })
            }
        }
    }

    fn check_user(&self, user: &UserReference) -> CompileResult<()> {
        match user {
            UserReference::CurrentUser => Ok(()),
            UserReference::Parameter { parameter_id } => {
                self.parameter_type(parameter_id).map(|_| ())
            }
        }
    }

    /// Type of a comparison side, if it is not a literal.
    fn side_type(&self, side: &ConditionValue) -> CompileResult<Option<(String, ParameterType)>> {
        match side {
            ConditionValue::ParameterId { parameter_id } => {
                let ty = self.parameter_type(parameter_id)?;
                Ok(Some((parameter_id.clone(), ty.clone())))
            }
            ConditionValue::UserProperty { user, property } => {
                self.check_user(user)?;
                Ok(Some((property_label(property), user_property_type(property))))
            }
            ConditionValue::StaticValue { .. } => Ok(None),
        }
    }

    fn check_comparison(
        &self,
        operator: ComparisonOperator,
        left: &ConditionValue,
        right: &ConditionValue,
    ) -> CompileResult<()> {
        let left_type = self.side_type(left)?;
        let right_type = self.side_type(right)?;
        match (left_type, right) {
            (Some((subject, ty)), ConditionValue::StaticValue { value }) => {
                check_literal(&subject, &ty, operator, value)
            }
            _ => match (right_type, left) {
                (Some((subject, ty)), ConditionValue::StaticValue { value }) => {
                    check_literal(&subject, &ty, operator, value)
                }
                _ => Ok(()),
            },
        }
    }
}

/// `currentUser.groupIds INTERSECTS [group]`
pub fn group_condition(group: &str) -> Condition {
    Condition::Comparison {
        operator: ComparisonOperator::Intersects,
        left: ConditionValue::current_user(UserProperty::GroupIds),
        right: ConditionValue::literal(Literal::List(vec![Literal::String(group.to_string())])),
    }
}

/// Type a literal must have to be compared with a value of `subject_type`.
fn expected_literal_type(operator: ComparisonOperator, subject_type: &ParameterType) -> ParameterType {
    match operator {
        ComparisonOperator::Includes => subject_type.item_type().clone(),
        ComparisonOperator::IsIncludedIn => ParameterType::list(subject_type.clone()),
        ComparisonOperator::Matches | ComparisonOperator::StartsWith => ParameterType::String,
        _ => subject_type.clone(),
    }
}

fn check_literal(
    subject: &str,
    subject_type: &ParameterType,
    operator: ComparisonOperator,
    literal: &Literal,
) -> CompileResult<()> {
    let expected = expected_literal_type(operator, subject_type);
    if literal_matches(literal, &expected)? {
        Ok(())
    } else {
        Err(CompileError::condition_value_type_mismatch(
            subject, &expected, literal,
        ))
    }
}

fn user_property_type(property: &UserProperty) -> ParameterType {
    match property {
        UserProperty::GroupIds => ParameterType::list(ParameterType::String),
        _ => ParameterType::String,
    }
}

fn property_label(property: &UserProperty) -> String {
    match property {
        UserProperty::UserId => "user id".to_string(),
        UserProperty::Username => "username".to_string(),
        UserProperty::Email => "email".to_string(),
        UserProperty::Organization => "organization".to_string(),
        UserProperty::GroupIds => "group ids".to_string(),
        UserProperty::Attribute { name } => format!("user attribute {}", name),
    }
}
