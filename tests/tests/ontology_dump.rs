//! Session and dump integration tests.
//!
//! Test modules:
//! - sessions: independent sessions and all-or-nothing definitions
//! - dump: the deterministic metadata snapshot

use ontoc_tests::prelude::*;

fn options() -> SessionOptions {
    SessionOptions::new()
        .with_namespace("com.example")
        .with_randomness_key("seed-1")
}

fn ontology(session: &mut Session) -> Result<(), SessionError> {
    fixtures::asset_interface(session)?;
    fixtures::ticket_object(session)?;
    session.create_object_action("ticket").done()?;
    session
        .delete_interface_action("asset")
        .submitter_group("admins")
        .done()?;
    Ok(())
}

mod sessions {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sessions_are_independent() {
        // GIVEN
        init_tracing();
        let mut first = Session::new(options()).unwrap();
        let second = Session::new(options()).unwrap();

        // WHEN
        fixtures::foo_object(&mut first).unwrap();

        // THEN
        assert_eq!(first.registry().local().object_types.len(), 1);
        assert!(second.registry().local().is_empty());
    }

    #[test]
    fn test_failing_interface_leaves_no_inline_property() {
        // GIVEN
        let mut session = Session::new(options()).unwrap();

        // WHEN
        let result = session
            .interface_type("vehicle")
            .define_property("wheelCount", PropertyType::Integer)
            .extends("missing")
            .done();

        // THEN
        assert!(result.is_err());
        assert!(session.registry().local().is_empty());
    }

    #[test]
    fn test_define_ontology_stops_at_first_failure() {
        let result = define_ontology(options(), |s| {
            fixtures::foo_object(s)?;
            s.create_object_action("foo").ordering(["bar"]).done()?;
            s.delete_object_action("foo").done()?;
            Ok(())
        });

        let err = result.unwrap_err();
        assert!(err.as_compile_error().is_some());
        assert!(err.to_string().contains("Missing parameters in ordering: {optionalProp}"));
    }

    #[test]
    fn test_strict_identifiers_can_be_relaxed() {
        // GIVEN
        let mut strict = Session::new(options()).unwrap();
        let mut relaxed =
            Session::new(options().with_strict_identifiers(false)).unwrap();

        // WHEN
        let strict_result = strict
            .object_type("2fast")
            .primary_key("id")
            .property("id", PropertyType::String)
            .done();
        let relaxed_result = relaxed
            .object_type("2fast")
            .primary_key("id")
            .property("id", PropertyType::String)
            .done();

        // THEN
        assert!(strict_result.is_err());
        assert!(relaxed_result.is_ok());
    }
}

mod dump {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_dump_contents() {
        // WHEN
        let dump = define_ontology(options(), ontology).unwrap();

        // THEN
        assert_eq!(dump.ontology.shared_property_types.len(), 3);
        assert_eq!(dump.ontology.interface_types.len(), 2);
        assert_eq!(dump.ontology.object_types.len(), 2);
        assert_eq!(dump.ontology.action_types.len(), 2);
        assert_eq!(dump.action_permissions.len(), 1);
        assert_eq!(dump.randomness_key.as_deref(), Some("seed-1"));
    }

    #[test]
    fn test_dump_is_reproducible() {
        let first = define_ontology(options(), ontology).unwrap();
        let second = define_ontology(options(), ontology).unwrap();

        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_json_shape() {
        // GIVEN
        let mut session = Session::new(options()).unwrap();
        ontology(&mut session).unwrap();

        // WHEN
        let json: serde_json::Value = serde_json::from_str(&session.to_json().unwrap()).unwrap();

        // THEN
        let action = &json["ontology"]["actionTypes"]["com.example.create-object-ticket"];
        assert_eq!(action["parameterOrdering"][0], "ticketId");
        assert_eq!(action["logic"][0]["type"], "addObject");
        assert_eq!(json["randomnessKey"], "seed-1");
        assert!(json["ontology"]["objectTypes"]["com.example.ticket"]["datasource"].is_object());
    }

    #[test]
    fn test_imported_entities_are_not_emitted_locally() {
        // GIVEN
        let mut session = Session::new(options()).unwrap();
        let mut other = Session::new(SessionOptions::new().with_namespace("com.vendor")).unwrap();
        fixtures::foo_object(&mut other).unwrap();
        let foo = other
            .registry()
            .get_object_type(&Identifier::new("com.vendor.foo"))
            .cloned()
            .unwrap();

        // WHEN
        session.import(ontoc_registry::Entity::ObjectType(foo));
        session.delete_object_action("com.vendor.foo").done().unwrap();
        let dump = session.dump();

        // THEN
        assert!(dump.ontology.object_types.is_empty());
        assert_eq!(dump.imported_ontology.object_types.len(), 1);
        assert!(dump
            .ontology
            .action_types
            .contains_key(&Identifier::new("com.example.delete-object-foo")));
    }
}
