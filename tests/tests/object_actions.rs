//! Object action integration tests.
//!
//! Test modules:
//! - crud: the four generated actions over a simple object type
//! - ordering: default and explicit parameter ordering
//! - mappings: excluded properties, fixed values and free-standing parameters
//! - permissions: submitter groups and the permission table

use ontoc_tests::prelude::*;

mod crud {
    use super::*;
    use pretty_assertions::assert_eq;

    pub fn scenario() -> Scenario {
        Scenario::new("object_crud")
            .setup(fixtures::foo_object)
            .step(
                "create",
                |s| s.create_object_action("foo").done(),
                |a| {
                    a.parameters(&["bar", "optionalProp"])
                        .rules(&["addObject"])
                        .optional("bar")
                        .optional("optionalProp")
                        .display_name("Create foo")
                        .action_rules(1)
                        .unrestricted()
                },
            )
            .step(
                "modify",
                |s| s.modify_object_action("foo").done(),
                |a| {
                    a.parameters(&["objectToModifyParameter", "optionalProp"])
                        .rules(&["modifyObject"])
                        .required("objectToModifyParameter")
                        .parameter_display("objectToModifyParameter", "Modify object")
                        .display_name("Modify foo")
                },
            )
            .step(
                "delete",
                |s| s.delete_object_action("foo").done(),
                |a| {
                    a.parameters(&["objectToDeleteParameter"])
                        .rules(&["deleteObject"])
                        .required("objectToDeleteParameter")
                        .parameter_display("objectToDeleteParameter", "Delete object")
                        .display_name("Delete foo")
                },
            )
            .step(
                "create_or_modify",
                |s| s.create_or_modify_object_action("foo").done(),
                |a| {
                    a.parameters(&["objectToCreateOrModifyParameter", "bar", "optionalProp"])
                        .rules(&["addOrModifyObject"])
                        .optional("objectToCreateOrModifyParameter")
                        .display_name("Create or modify foo")
                },
            )
    }

    #[test]
    fn test_object_crud() {
        scenario().run().unwrap();
    }

    #[test]
    fn test_create_binds_each_property_to_its_parameter() {
        // GIVEN
        let session = scenario().run().unwrap();
        let id = session.qualify("create-object-foo");

        // WHEN
        let action = session.registry().get_action_type(&id).unwrap();

        // THEN
        assert_eq!(
            action.logic,
            vec![LogicRule::AddObject {
                object_type: session.qualify("foo"),
                property_values: vec![
                    PropertyBinding {
                        property: "bar".into(),
                        value: LogicValue::parameter("bar"),
                    },
                    PropertyBinding {
                        property: "optionalProp".into(),
                        value: LogicValue::parameter("optionalProp"),
                    },
                ],
            }]
        );
    }

    #[test]
    fn test_delete_uses_single_object_query_parameter() {
        let session = scenario().run().unwrap();
        let action = session
            .registry()
            .get_action_type(&session.qualify("delete-object-foo"))
            .unwrap();

        assert_eq!(
            action.logic,
            vec![LogicRule::DeleteObject {
                object_to_delete: "objectToDeleteParameter".into()
            }]
        );
        assert_eq!(action.parameters.len(), 1);
        assert_eq!(
            action.parameters[0].parameter_type,
            ParameterType::object_reference(session.qualify("foo"))
        );
    }

    #[test]
    fn test_unknown_object_type() {
        Scenario::new("unknown_object")
            .step(
                "create",
                |s| s.create_object_action("nope").done(),
                |a| a.error("Object type com.example.nope is not defined"),
            )
            .run()
            .unwrap();
    }

    #[test]
    fn test_api_name_and_metadata_overrides() {
        Scenario::new("object_metadata")
            .setup(fixtures::employee_object)
            .step(
                "hire",
                |s| {
                    s.create_object_action("employee")
                        .api_name("hire-employee")
                        .display_name("Hire")
                        .description("Add a new hire")
                        .success_message("Hired")
                        .done()
                },
                |a| {
                    a.display_name("Hire")
                        .custom(|action| {
                            action.id.as_str() == "com.example.hire-employee"
                                && action.submission.success_message.as_deref() == Some("Hired")
                        })
                },
            )
            .run()
            .unwrap();
    }
}

mod ordering {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_ordering_follows_declaration_order() {
        Scenario::new("default_ordering")
            .setup(fixtures::employee_object)
            .step(
                "create",
                |s| s.create_object_action("employee").done(),
                |a| a.parameters(&["name", "id", "foo"]).display_name("Create Employee"),
            )
            .run()
            .unwrap();
    }

    #[test]
    fn test_explicit_default_ordering_is_identical() {
        // GIVEN
        let implicit = Scenario::new("implicit")
            .setup(fixtures::ticket_object)
            .step(
                "modify",
                |s| s.modify_object_action("ticket").done(),
                |a| a,
            )
            .run()
            .unwrap();
        let id = implicit.qualify("modify-object-ticket");
        let default_ordering = implicit
            .registry()
            .get_action_type(&id)
            .unwrap()
            .parameter_ordering
            .clone();

        // WHEN
        let explicit = Scenario::new("explicit")
            .setup(fixtures::ticket_object)
            .step(
                "modify",
                move |s| {
                    s.modify_object_action("ticket")
                        .ordering(default_ordering.clone())
                        .done()
                },
                |a| a,
            )
            .run()
            .unwrap();

        // THEN
        assert_eq!(
            implicit.registry().get_action_type(&id),
            explicit.registry().get_action_type(&id)
        );
    }

    #[test]
    fn test_mismatched_ordering_reports_both_sides() {
        Scenario::new("ordering_mismatch")
            .setup(fixtures::employee_object)
            .step(
                "create",
                |s| {
                    s.create_object_action("employee")
                        .exclude("id")
                        .ordering(["foo", "id"])
                        .done()
                },
                |a| {
                    a.error(
                        "Action parameter ordering for com.example.create-object-employee does not \
                         match expected parameters. Extraneous parameters in ordering: {id}, \
                         Missing parameters in ordering: {name}",
                    )
                },
            )
            .run()
            .unwrap();
    }

    #[test]
    fn test_reordered_parameters_are_kept() {
        Scenario::new("reordered")
            .setup(fixtures::employee_object)
            .step(
                "create",
                |s| {
                    s.create_object_action("employee")
                        .ordering(["id", "foo", "name"])
                        .done()
                },
                |a| a.parameters(&["id", "foo", "name"]).form_content(&["id", "foo", "name"]),
            )
            .run()
            .unwrap();
    }
}

mod mappings {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fixed_value_replaces_parameter() {
        // GIVEN
        let session = Scenario::new("fixed_value")
            .setup(fixtures::foo_object)
            .step(
                "create",
                |s| {
                    s.create_object_action("foo")
                        .fixed_value("optionalProp", LogicValue::literal("n/a"))
                        .done()
                },
                |a| a.parameters(&["bar"]),
            )
            .run()
            .unwrap();

        // WHEN
        let action = session
            .registry()
            .get_action_type(&session.qualify("create-object-foo"))
            .unwrap();

        // THEN
        match &action.logic[0] {
            LogicRule::AddObject {
                property_values, ..
            } => assert_eq!(
                property_values[1],
                PropertyBinding {
                    property: "optionalProp".into(),
                    value: LogicValue::literal("n/a"),
                }
            ),
            other => panic!("unexpected rule: {:?}", other),
        }
    }

    #[test]
    fn test_fixed_value_must_match_property_type() {
        Scenario::new("fixed_value_mismatch")
            .setup(fixtures::ticket_object)
            .step(
                "create",
                |s| {
                    s.create_object_action("ticket")
                        .fixed_value("priority", LogicValue::literal("high"))
                        .done()
                },
                |a| a.error("Static value for property priority does not match type"),
            )
            .run()
            .unwrap();
    }

    #[test]
    fn test_excluded_property_is_left_unbound() {
        Scenario::new("excluded")
            .setup(fixtures::ticket_object)
            .step(
                "create",
                |s| {
                    s.create_object_action("ticket")
                        .exclude("estimate")
                        .exclude("tags")
                        .done()
                },
                |a| {
                    a.parameters(&["ticketId", "title", "priority", "urgent", "dueDate"])
                        .custom(|action| match &action.logic[0] {
                            LogicRule::AddObject {
                                property_values, ..
                            } => property_values.len() == 5,
                            _ => false,
                        })
                },
            )
            .run()
            .unwrap();
    }

    #[test]
    fn test_unknown_excluded_property() {
        Scenario::new("unknown_excluded")
            .setup(fixtures::foo_object)
            .step(
                "create",
                |s| s.create_object_action("foo").exclude("missing").done(),
                |a| a.error("Property missing does not exist on object type com.example.foo"),
            )
            .run()
            .unwrap();
    }

    #[test]
    fn test_modify_cannot_fix_primary_key() {
        Scenario::new("fixed_primary_key")
            .setup(fixtures::foo_object)
            .step(
                "modify",
                |s| {
                    s.modify_object_action("foo")
                        .fixed_value("bar", LogicValue::literal("x"))
                        .done()
                },
                |a| a.error("Property bar is the primary key of com.example.foo and cannot be modified"),
            )
            .step(
                "modify_excluding_key",
                |s| s.modify_object_action("foo").exclude("bar").done(),
                |a| a.error("Property bar is the primary key of com.example.foo and cannot be modified"),
            )
            .step(
                "create_or_modify",
                |s| {
                    s.create_or_modify_object_action("foo")
                        .fixed_value("bar", LogicValue::literal("x"))
                        .done()
                },
                |a| a.parameters(&["objectToCreateOrModifyParameter", "optionalProp"]),
            )
            .run()
            .unwrap();
    }

    #[test]
    fn test_configuring_an_excluded_property() {
        Scenario::new("configured_excluded")
            .setup(fixtures::foo_object)
            .step(
                "create",
                |s| {
                    s.create_object_action("foo")
                        .exclude("optionalProp")
                        .parameter("optionalProp", ParameterConfig::new().display_name("Note"))
                        .done()
                },
                |a| {
                    a.error(
                        "Parameter optionalProp names a property of com.example.foo that this \
                         action leaves out and its type is not explicitly defined",
                    )
                },
            )
            .run()
            .unwrap();
    }

    #[test]
    fn test_undeclared_parameter_needs_a_type() {
        Scenario::new("undeclared")
            .setup(fixtures::foo_object)
            .step(
                "create",
                |s| {
                    s.create_object_action("foo")
                        .parameter("reason", ParameterConfig::new().display_name("Reason"))
                        .done()
                },
                |a| {
                    a.error(
                        "Parameter reason does not exist as a property on com.example.foo and \
                         its type is not explicitly defined",
                    )
                },
            )
            .run()
            .unwrap();
    }

    #[test]
    fn test_free_standing_parameter_is_appended() {
        Scenario::new("free_standing")
            .setup(fixtures::foo_object)
            .step(
                "modify",
                |s| {
                    s.modify_object_action("foo")
                        .parameter(
                            "reason",
                            ParameterConfig::new()
                                .custom_type(ParameterType::String)
                                .required(true),
                        )
                        .done()
                },
                |a| {
                    a.parameters(&["objectToModifyParameter", "optionalProp", "reason"])
                        .required("reason")
                        .parameter_display("reason", "reason")
                },
            )
            .run()
            .unwrap();
    }

    #[test]
    fn test_parameter_configuration_overrides_display() {
        Scenario::new("configured")
            .setup(fixtures::foo_object)
            .step(
                "create",
                |s| {
                    s.create_object_action("foo")
                        .parameter(
                            "bar",
                            ParameterConfig::new()
                                .display_name("Bar id")
                                .required(true)
                                .default_value("bar-1"),
                        )
                        .done()
                },
                |a| a.required("bar").parameter_display("bar", "Bar id"),
            )
            .run()
            .unwrap();
    }

    #[test]
    fn test_default_value_must_match_parameter_type() {
        Scenario::new("default_mismatch")
            .setup(fixtures::ticket_object)
            .step(
                "create",
                |s| {
                    s.create_object_action("ticket")
                        .parameter("urgent", ParameterConfig::new().default_value("yes"))
                        .done()
                },
                |a| a.error("Default static value for parameter urgent does not match type"),
            )
            .run()
            .unwrap();
    }
}

mod permissions {
    use super::*;

    #[test]
    fn test_submitter_groups() {
        Scenario::new("submitter_groups")
            .setup(fixtures::foo_object)
            .step(
                "delete",
                |s| {
                    s.delete_object_action("foo")
                        .submitter_group("admins")
                        .submitter_group("operators")
                        .done()
                },
                |a| a.submitter_groups(&["admins", "operators"]).action_rules(1),
            )
            .step(
                "redefine",
                |s| s.delete_object_action("foo").done(),
                |a| a.unrestricted(),
            )
            .run()
            .unwrap();
    }
}
