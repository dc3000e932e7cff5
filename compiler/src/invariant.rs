//! Cross-cutting checks shared by every compile stage.

use crate::{CompileError, CompileResult, TargetParameter};
use ontoc_core::Identifier;
use ontoc_registry::ParameterType;
use std::collections::{HashMap, HashSet};

/// An explicit parameter ordering must be a permutation of the expected ids.
///
/// Ids listed twice are reported as extraneous.
pub fn check_parameter_ordering(
    action: &Identifier,
    expected: &[String],
    ordering: &[String],
) -> CompileResult<()> {
    let expected_set: HashSet<&str> = expected.iter().map(String::as_str).collect();

    let mut seen = HashSet::new();
    let mut extraneous = Vec::new();
    for id in ordering {
        if !expected_set.contains(id.as_str()) || !seen.insert(id.as_str()) {
            extraneous.push(id.clone());
        }
    }
    let missing: Vec<String> = expected
        .iter()
        .filter(|id| !seen.contains(id.as_str()))
        .cloned()
        .collect();

    if extraneous.is_empty() && missing.is_empty() {
        Ok(())
    } else {
        Err(CompileError::parameter_ordering_mismatch(
            action, extraneous, missing,
        ))
    }
}

/// Every referenced parameter must be declared; reports all offenders at once.
pub fn check_declared<'a>(
    referenced: impl IntoIterator<Item = &'a str>,
    declared: &HashSet<&str>,
) -> CompileResult<()> {
    let mut undefined: Vec<String> = Vec::new();
    for id in referenced {
        if !declared.contains(id) && !undefined.iter().any(|u| u == id) {
            undefined.push(id.to_string());
        }
    }
    if undefined.is_empty() {
        Ok(())
    } else {
        Err(CompileError::undefined_parameters(undefined))
    }
}

/// Parameter ids must be unique.
pub fn check_unique<'a>(ids: impl IntoIterator<Item = &'a str>) -> CompileResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CompileError::duplicate_parameter(id));
        }
    }
    Ok(())
}

/// A rule's target parameter must be declared.
pub fn require_parameter<'p>(
    parameters: &HashMap<&str, &'p ParameterType>,
    id: &str,
    role: TargetParameter,
) -> CompileResult<&'p ParameterType> {
    parameters
        .get(id)
        .copied()
        .ok_or_else(|| CompileError::missing_target_parameter(role))
}
