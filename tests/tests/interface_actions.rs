//! Interface action integration tests.
//!
//! Test modules:
//! - crud: the four generated actions over an interface hierarchy
//! - shared_properties: bindings keyed by shared property type
//! - imports: actions over imported interfaces

use ontoc_tests::prelude::*;

mod crud {
    use super::*;
    use pretty_assertions::assert_eq;

    pub fn scenario() -> Scenario {
        Scenario::new("interface_crud")
            .setup(fixtures::asset_interface)
            .step(
                "create",
                |s| s.create_interface_action("asset").done(),
                |a| {
                    a.parameters(&["objectTypeParameter", "serialNumber", "installedOn", "assetName"])
                        .rules(&["addInterface"])
                        .required("objectTypeParameter")
                        .optional("serialNumber")
                        .parameter_display("objectTypeParameter", "Object type to create")
                        .parameter_display("serialNumber", "Serial number")
                        .display_name("Create Asset")
                },
            )
            .step(
                "modify",
                |s| s.modify_interface_action("asset").done(),
                |a| {
                    a.parameters(&[
                        "interfaceObjectToModifyParameter",
                        "serialNumber",
                        "installedOn",
                        "assetName",
                    ])
                    .rules(&["modifyInterface"])
                    .required("interfaceObjectToModifyParameter")
                    .display_name("Modify Asset")
                },
            )
            .step(
                "delete",
                |s| s.delete_interface_action("asset").done(),
                |a| {
                    a.parameters(&["objectToDeleteParameter"])
                        .rules(&["deleteObject"])
                        .required("objectToDeleteParameter")
                        .parameter_display("objectToDeleteParameter", "Delete object")
                },
            )
            .step(
                "create_or_modify",
                |s| s.create_or_modify_interface_action("asset").done(),
                |a| {
                    a.parameters(&[
                        "interfaceObjectToModifyParameter",
                        "objectTypeParameter",
                        "serialNumber",
                        "installedOn",
                        "assetName",
                    ])
                    .rules(&["modifyInterface"])
                    .optional("interfaceObjectToModifyParameter")
                    .optional("objectTypeParameter")
                },
            )
    }

    #[test]
    fn test_interface_crud() {
        scenario().run().unwrap();
    }

    #[test]
    fn test_default_api_names() {
        let session = scenario().run().unwrap();
        let ids: Vec<String> = session
            .registry()
            .local()
            .action_types
            .keys()
            .map(|id| id.to_string())
            .collect();

        assert_eq!(
            ids,
            vec![
                "com.example.create-interface-object-asset",
                "com.example.create-or-modify-interface-object-asset",
                "com.example.delete-interface-object-asset",
                "com.example.modify-interface-object-asset",
            ]
        );
    }

    #[test]
    fn test_create_or_modify_carries_object_type_parameter() {
        let session = scenario().run().unwrap();
        let action = session
            .registry()
            .get_action_type(&session.qualify("create-or-modify-interface-object-asset"))
            .unwrap();

        match &action.logic[0] {
            LogicRule::ModifyInterface {
                interface_object_to_modify,
                object_type_parameter,
                ..
            } => {
                assert_eq!(interface_object_to_modify, "interfaceObjectToModifyParameter");
                assert_eq!(object_type_parameter.as_deref(), Some("objectTypeParameter"));
            }
            other => panic!("unexpected rule: {:?}", other),
        }
    }
}

mod shared_properties {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bindings_use_shared_property_types() {
        // GIVEN
        let session = Scenario::new("interface_bindings")
            .setup(fixtures::asset_interface)
            .step(
                "create",
                |s| {
                    s.create_interface_action("asset")
                        .exclude("installedOn")
                        .done()
                },
                |a| a.parameters(&["objectTypeParameter", "serialNumber", "assetName"]),
            )
            .run()
            .unwrap();

        // WHEN
        let action = session
            .registry()
            .get_action_type(&session.qualify("create-interface-object-asset"))
            .unwrap();

        // THEN
        assert_eq!(
            action.logic,
            vec![LogicRule::AddInterface {
                interface_type: session.qualify("asset"),
                object_type_parameter: "objectTypeParameter".into(),
                shared_property_values: vec![
                    SharedPropertyBinding {
                        shared_property_type: session.qualify("serialNumber"),
                        value: LogicValue::parameter("serialNumber"),
                    },
                    SharedPropertyBinding {
                        shared_property_type: session.qualify("assetName"),
                        value: LogicValue::parameter("assetName"),
                    },
                ],
            }]
        );
    }

    fn color(session: &mut Session) -> Result<(), SessionError> {
        session
            .shared_property_type("color", PropertyType::String)
            .done()?;
        Ok(())
    }

    #[test]
    fn test_fixed_value_for_foreign_shared_property() {
        Scenario::new("foreign_fixed_value")
            .setup(fixtures::asset_interface)
            .setup(color)
            .step(
                "create",
                |s| {
                    s.create_interface_action("asset")
                        .fixed_value("color", LogicValue::literal("red"))
                        .done()
                },
                |a| {
                    a.error(
                        "Shared property type com.example.color does not exist in interface \
                         type com.example.asset",
                    )
                },
            )
            .run()
            .unwrap();
    }

    #[test]
    fn test_hand_written_rule_with_foreign_shared_property() {
        Scenario::new("foreign_rule")
            .setup(fixtures::asset_interface)
            .setup(color)
            .step(
                "paint",
                |s| {
                    let asset = s.qualify("asset");
                    let color = s.qualify("color");
                    s.action("paint-asset")
                        .parameter(
                            "objectTypeParameter",
                            ParameterType::ObjectTypeReference {
                                interface_types: vec![asset.clone()],
                            },
                        )
                        .parameter("color", ParameterType::String)
                        .rule(LogicRule::AddInterface {
                            interface_type: asset,
                            object_type_parameter: "objectTypeParameter".into(),
                            shared_property_values: vec![SharedPropertyBinding {
                                shared_property_type: color,
                                value: LogicValue::parameter("color"),
                            }],
                        })
                        .done()
                },
                |a| {
                    a.error(
                        "Shared property type com.example.color does not exist in interface \
                         type com.example.asset",
                    )
                },
            )
            .run()
            .unwrap();
    }

    #[test]
    fn test_inherited_shared_property_can_be_fixed() {
        Scenario::new("inherited_fixed_value")
            .setup(fixtures::asset_interface)
            .step(
                "create",
                |s| {
                    s.create_interface_action("asset")
                        .fixed_value("assetName", LogicValue::literal("unnamed"))
                        .done()
                },
                |a| a.parameters(&["objectTypeParameter", "serialNumber", "installedOn"]),
            )
            .run()
            .unwrap();
    }

    #[test]
    fn test_unknown_interface() {
        Scenario::new("unknown_interface")
            .step(
                "create",
                |s| s.create_interface_action("nope").done(),
                |a| a.error("Interface type com.example.nope"),
            )
            .run()
            .unwrap();
    }
}

mod imports {
    use super::*;
    use pretty_assertions::assert_eq;
    use ontoc_registry::{Entity, InterfacePropertyDef, InterfaceTypeDef, SharedPropertyTypeDef};

    fn imported_interface(session: &mut Session) -> Result<(), SessionError> {
        let spt = Identifier::new("com.vendor.location");
        session.import(Entity::SharedPropertyType(SharedPropertyTypeDef::new(
            spt.clone(),
            PropertyType::String,
        )));
        let mut interface = InterfaceTypeDef::new(Identifier::new("com.vendor.site"));
        interface.properties.push(InterfacePropertyDef::Shared {
            shared_property_type: spt,
            required: true,
        });
        session.import(Entity::InterfaceType(interface));
        Ok(())
    }

    #[test]
    fn test_action_over_imported_interface() {
        let session = Scenario::new("imported_interface")
            .setup(imported_interface)
            .step(
                "create",
                |s| s.create_interface_action("com.vendor.site").done(),
                |a| a.parameters(&["objectTypeParameter", "location"]),
            )
            .run()
            .unwrap();

        let dump = session.dump();
        assert_eq!(dump.ontology.interface_types.len(), 0);
        assert_eq!(dump.imported_ontology.interface_types.len(), 1);
        assert_eq!(dump.ontology.action_types.len(), 1);
    }
}
