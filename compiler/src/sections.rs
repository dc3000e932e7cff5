//! Section/Layout Builder: sections, section validation and form ordering.

use crate::invariant::check_declared;
use crate::{CompileError, CompileResult, ConditionCompiler, SectionDef};
use ontoc_registry::{FormContent, Section, SectionConditionalOverride, SectionValidation};
use std::collections::{HashMap, HashSet};

/// Compiled sections and their validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionLayout {
    pub sections: Vec<Section>,
    pub validations: Vec<SectionValidation>,
}

/// Validate sections against the declared parameters and compile their overrides.
pub fn build_sections(
    defs: &[SectionDef],
    parameter_ids: &[String],
    conditions: &ConditionCompiler<'_>,
) -> CompileResult<SectionLayout> {
    let declared: HashSet<&str> = parameter_ids.iter().map(String::as_str).collect();
    check_declared(
        defs.iter()
            .flat_map(|def| def.parameters.iter().map(String::as_str)),
        &declared,
    )?;

    let mut layout = SectionLayout::default();
    let mut placed: HashMap<&str, &str> = HashMap::new();
    for def in defs {
        if layout.sections.iter().any(|s| s.id == def.id) {
            return Err(CompileError::DuplicateSection {
                section: def.id.clone(),
            });
        }
        for parameter in &def.parameters {
            if let Some(first) = placed.insert(parameter.as_str(), def.id.as_str()) {
                return Err(CompileError::ParameterInMultipleSections {
                    parameter: parameter.clone(),
                    first: first.to_string(),
                    second: def.id.clone(),
                });
            }
        }

        let mut conditional_overrides = Vec::with_capacity(def.conditional_overrides.len());
        for rule in &def.conditional_overrides {
            conditional_overrides.push(SectionConditionalOverride {
                condition: conditions.compile(&rule.condition)?,
                visibility: rule.visibility,
            });
        }

        layout.sections.push(Section {
            id: def.id.clone(),
            display_name: def.display_name.clone().unwrap_or_else(|| def.id.clone()),
            description: def.description.clone(),
            collapsed_by_default: def.collapsed_by_default,
            parameters: def.parameters.clone(),
        });
        layout.validations.push(SectionValidation {
            section_id: def.id.clone(),
            default_visibility: def.default_visibility,
            conditional_overrides,
        });
    }
    Ok(layout)
}

/// Walk the parameter ordering, replacing each parameter that belongs to a
/// section by that section at its first occurrence. Sections without any
/// ordered parameter go last, in declaration order.
pub fn form_content_ordering(sections: &[Section], parameter_ordering: &[String]) -> Vec<FormContent> {
    let section_of: HashMap<&str, &str> = sections
        .iter()
        .flat_map(|s| s.parameters.iter().map(move |p| (p.as_str(), s.id.as_str())))
        .collect();

    let mut emitted: HashSet<&str> = HashSet::new();
    let mut content = Vec::new();
    for parameter in parameter_ordering {
        match section_of.get(parameter.as_str()) {
            Some(section) => {
                if emitted.insert(*section) {
                    content.push(FormContent::Section {
                        section_id: section.to_string(),
                    });
                }
            }
            None => content.push(FormContent::Parameter {
                parameter_id: parameter.clone(),
            }),
        }
    }
    for section in sections {
        if !emitted.contains(section.id.as_str()) {
            content.push(FormContent::Section {
                section_id: section.id.clone(),
            });
        }
    }
    content
}
