//! Form layout, condition and hand-written action integration tests.
//!
//! Test modules:
//! - sections: section layout and form content ordering
//! - conditions: action-level rules and conditional parameter overrides
//! - manual: hand-written actions with explicit parameters and rules

use ontoc_tests::prelude::*;

mod sections {
    use super::*;

    #[test]
    fn test_section_absorbs_its_parameters() {
        Scenario::new("sections")
            .setup(fixtures::ticket_object)
            .step(
                "create",
                |s| {
                    s.create_object_action("ticket")
                        .section(
                            SectionDef::new("planning", ["priority", "dueDate"])
                                .display_name("Planning")
                                .collapsed(),
                        )
                        .section(SectionDef::new("notes", Vec::<String>::new()))
                        .done()
                },
                |a| {
                    a.sections(&["planning", "notes"]).form_content(&[
                        "ticketId",
                        "title",
                        "section:planning",
                        "estimate",
                        "urgent",
                        "tags",
                        "section:notes",
                    ])
                },
            )
            .run()
            .unwrap();
    }

    #[test]
    fn test_section_with_unknown_parameters() {
        Scenario::new("section_unknown")
            .setup(fixtures::foo_object)
            .step(
                "create",
                |s| {
                    s.create_object_action("foo")
                        .section(SectionDef::new("main", ["bar", "baz", "qux"]))
                        .done()
                },
                |a| a.error("Parameters [baz, qux] were referenced but not defined"),
            )
            .run()
            .unwrap();
    }

    #[test]
    fn test_section_cannot_hold_excluded_parameter() {
        Scenario::new("section_excluded")
            .setup(fixtures::foo_object)
            .step(
                "create",
                |s| {
                    s.create_object_action("foo")
                        .exclude("optionalProp")
                        .section(SectionDef::new("main", ["optionalProp"]))
                        .done()
                },
                |a| a.error("Parameters [optionalProp] were referenced but not defined"),
            )
            .run()
            .unwrap();
    }

    #[test]
    fn test_section_visibility_override() {
        Scenario::new("section_visibility")
            .setup(fixtures::ticket_object)
            .step(
                "modify",
                |s| {
                    s.modify_object_action("ticket")
                        .section(
                            SectionDef::new("escalation", ["priority"])
                                .hidden()
                                .visibility_when(
                                    ConditionSpec::parameter_equals("urgent", true),
                                    ontoc_registry::SectionVisibility::Visible,
                                ),
                        )
                        .done()
                },
                |a| {
                    a.custom(|action| {
                        let validation = &action.validation.sections[0];
                        validation.section_id == "escalation"
                            && validation.conditional_overrides.len() == 1
                    })
                },
            )
            .run()
            .unwrap();
    }
}

mod conditions {
    use super::*;
    use pretty_assertions::assert_eq;
    use ontoc_registry::{Condition, ConditionValue};

    #[test]
    fn test_action_level_rule() {
        // GIVEN
        let session = Scenario::new("action_rule")
            .setup(fixtures::ticket_object)
            .step(
                "modify",
                |s| {
                    s.modify_object_action("ticket")
                        .validation(
                            ConditionSpec::parameter("priority", ComparisonOperator::LessThan, ParameterMatch::Static(Literal::Integer(5))),
                            "Priority must be below 5",
                        )
                        .done()
                },
                |a| a.action_rules(1),
            )
            .run()
            .unwrap();

        // WHEN
        let action = session
            .registry()
            .get_action_type(&session.qualify("modify-object-ticket"))
            .unwrap();

        // THEN
        let rule = &action.validation.action_level[0];
        assert_eq!(rule.failure_message, "Priority must be below 5");
        assert_eq!(
            rule.condition,
            Condition::Comparison {
                operator: ComparisonOperator::LessThan,
                left: ConditionValue::parameter("priority"),
                right: ConditionValue::literal(5),
            }
        );
    }

    #[test]
    fn test_condition_on_unknown_parameter() {
        Scenario::new("unknown_condition_parameter")
            .setup(fixtures::foo_object)
            .step(
                "create",
                |s| {
                    s.create_object_action("foo")
                        .validation(ConditionSpec::parameter_equals("missing", "x"), "never")
                        .done()
                },
                |a| a.error("Action parameter condition references unknown parameter missing"),
            )
            .run()
            .unwrap();
    }

    #[test]
    fn test_condition_literal_must_match_type() {
        Scenario::new("condition_mismatch")
            .setup(fixtures::ticket_object)
            .step(
                "create",
                |s| {
                    s.create_object_action("ticket")
                        .validation(ConditionSpec::parameter_equals("urgent", "yes"), "never")
                        .done()
                },
                |a| a.error("does not match type"),
            )
            .run()
            .unwrap();
    }

    #[test]
    fn test_group_rule_is_combined_with_submitter_groups() {
        Scenario::new("group_rules")
            .setup(fixtures::foo_object)
            .step(
                "delete",
                |s| {
                    s.delete_object_action("foo")
                        .validation(
                            ConditionSpec::or([
                                ConditionSpec::group("editors"),
                                ConditionSpec::group("owners"),
                            ]),
                            "Only editors or owners",
                        )
                        .submitter_group("admins")
                        .done()
                },
                |a| a.action_rules(2).submitter_groups(&["admins"]),
            )
            .run()
            .unwrap();
    }

    #[test]
    fn test_conditional_parameter_override() {
        Scenario::new("parameter_override")
            .setup(fixtures::ticket_object)
            .step(
                "create",
                |s| {
                    s.create_object_action("ticket")
                        .parameter(
                            "dueDate",
                            ParameterConfig::new().override_when(
                                ConditionSpec::parameter_equals("urgent", true),
                                [
                                    ParameterOverride::Required {
                                        required: RequiredConstraint::Required { required: true },
                                    },
                                    ParameterOverride::Visibility {
                                        visibility: Visibility::Editable,
                                    },
                                ],
                            ),
                        )
                        .done()
                },
                |a| {
                    a.optional("dueDate").custom(|action| {
                        action
                            .get_parameter("dueDate")
                            .map(|p| p.validation.conditional_overrides.len() == 1)
                            .unwrap_or(false)
                    })
                },
            )
            .run()
            .unwrap();
    }

    #[test]
    fn test_required_list_parameter_needs_one_value() {
        Scenario::new("required_list")
            .setup(fixtures::ticket_object)
            .step(
                "create",
                |s| {
                    s.create_object_action("ticket")
                        .parameter("tags", ParameterConfig::new().required(true))
                        .done()
                },
                |a| {
                    a.required("tags").custom(|action| {
                        action.get_parameter("tags").map(|p| {
                            p.validation.default_validation.required
                                == RequiredConstraint::ListLength {
                                    min: Some(1),
                                    max: None,
                                }
                        }) == Some(true)
                    })
                },
            )
            .run()
            .unwrap();
    }

    #[test]
    fn test_list_length_bounds_must_be_ordered() {
        Scenario::new("list_bounds")
            .setup(fixtures::ticket_object)
            .step(
                "create",
                |s| {
                    s.create_object_action("ticket")
                        .parameter("tags", ParameterConfig::new().list_length(Some(5), Some(1)))
                        .done()
                },
                |a| a.error("List length for parameter tags has minimum 5 greater than maximum 1"),
            )
            .step(
                "create_required",
                |s| {
                    s.create_object_action("ticket")
                        .parameter(
                            "tags",
                            ParameterConfig::new().required(true).list_length(None, Some(3)),
                        )
                        .done()
                },
                |a| a.required("tags"),
            )
            .run()
            .unwrap();
    }
}

mod manual {
    use super::*;

    fn bump(s: &mut Session) -> Result<Identifier, SessionError> {
        let foo = s.qualify("foo");
        s.action("bump-foo")
            .display_name("Bump foo")
            .parameter("target", ParameterType::object_reference(foo))
            .parameter_with(
                "note",
                ParameterType::String,
                ParameterConfig::new().display_name("Note").required(true),
            )
            .rule(LogicRule::ModifyObject {
                object_to_modify: "target".into(),
                property_values: vec![PropertyBinding {
                    property: "optionalProp".into(),
                    value: LogicValue::parameter("note"),
                }],
            })
            .done()
    }

    #[test]
    fn test_manual_action() {
        Scenario::new("manual")
            .setup(fixtures::foo_object)
            .step("bump", bump, |a| {
                a.parameters(&["target", "note"])
                    .rules(&["modifyObject"])
                    .required("note")
                    .optional("target")
                    .parameter_display("note", "Note")
                    .parameter_display("target", "target")
                    .display_name("Bump foo")
            })
            .run()
            .unwrap();
    }

    #[test]
    fn test_manual_modify_needs_its_target_parameter() {
        Scenario::new("manual_missing_target")
            .setup(fixtures::foo_object)
            .step(
                "bump",
                |s| {
                    s.action("bump-foo")
                        .parameter("note", ParameterType::String)
                        .rule(LogicRule::ModifyObject {
                            object_to_modify: "target".into(),
                            property_values: Vec::new(),
                        })
                        .done()
                },
                |a| a.error("Object to modify parameter must be defined in parameters"),
            )
            .run()
            .unwrap();
    }

    #[test]
    fn test_manual_delete_needs_its_target_parameter() {
        Scenario::new("manual_missing_delete_target")
            .setup(fixtures::foo_object)
            .step(
                "drop",
                |s| {
                    s.action("drop-foo")
                        .rule(LogicRule::DeleteObject {
                            object_to_delete: "target".into(),
                        })
                        .done()
                },
                |a| a.error("Object to delete parameter must be defined in parameters"),
            )
            .run()
            .unwrap();
    }

    #[test]
    fn test_manual_rule_with_unknown_property() {
        Scenario::new("manual_unknown_property")
            .setup(fixtures::foo_object)
            .step(
                "bump",
                |s| {
                    let foo = s.qualify("foo");
                    s.action("bump-foo")
                        .parameter("target", ParameterType::object_reference(foo))
                        .rule(LogicRule::ModifyObject {
                            object_to_modify: "target".into(),
                            property_values: vec![PropertyBinding {
                                property: "color".into(),
                                value: LogicValue::literal("red"),
                            }],
                        })
                        .done()
                },
                |a| a.error("Property color does not exist on object type com.example.foo"),
            )
            .run()
            .unwrap();
    }

    #[test]
    fn test_manual_rule_with_undeclared_parameter() {
        Scenario::new("manual_undeclared")
            .setup(fixtures::foo_object)
            .step(
                "create",
                |s| {
                    let foo = s.qualify("foo");
                    s.action("make-foo")
                        .rule(LogicRule::AddObject {
                            object_type: foo,
                            property_values: vec![PropertyBinding {
                                property: "bar".into(),
                                value: LogicValue::parameter("barId"),
                            }],
                        })
                        .done()
                },
                |a| a.error("Parameters [barId] were referenced but not defined"),
            )
            .run()
            .unwrap();
    }

    #[test]
    fn test_manual_ordering_mismatch() {
        Scenario::new("manual_ordering")
            .setup(fixtures::foo_object)
            .step(
                "note",
                |s| {
                    s.action("note")
                        .parameter("a", ParameterType::String)
                        .parameter("b", ParameterType::String)
                        .ordering(["b", "c"])
                        .done()
                },
                |a| {
                    a.error_matches(
                        r"Extraneous parameters in ordering: \{c\}, Missing parameters in ordering: \{a\}$",
                    )
                },
            )
            .run()
            .unwrap();
    }
}
