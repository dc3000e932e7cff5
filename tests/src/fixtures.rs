//! Reusable ontologies for scenarios.
//!
//! Every fixture defines into the session's active namespace.

use ontoc_core::PropertyType;
use ontoc_session::{Session, SessionResult};

/// `foo` with primary key `bar` and one optional string property.
pub fn foo_object(session: &mut Session) -> SessionResult<()> {
    session
        .object_type("foo")
        .primary_key("bar")
        .property("bar", PropertyType::String)
        .property("optionalProp", PropertyType::String)
        .done()?;
    Ok(())
}

/// `employee` with properties `name`, `id`, `foo` in that order.
pub fn employee_object(session: &mut Session) -> SessionResult<()> {
    session
        .object_type("employee")
        .display_name("Employee")
        .primary_key("id")
        .title_property("name")
        .property("name", PropertyType::String)
        .property("id", PropertyType::String)
        .property("foo", PropertyType::String)
        .done()?;
    Ok(())
}

/// `ticket`, an object with one property of most value types.
pub fn ticket_object(session: &mut Session) -> SessionResult<()> {
    session
        .object_type("ticket")
        .display_name("Ticket")
        .primary_key("ticketId")
        .property("ticketId", PropertyType::String)
        .property("title", PropertyType::String)
        .property("priority", PropertyType::Integer)
        .property("estimate", PropertyType::Double)
        .property("urgent", PropertyType::Boolean)
        .property("dueDate", PropertyType::Date)
        .property("tags", PropertyType::array(PropertyType::String))
        .done()?;
    Ok(())
}

/// The `asset` interface over two shared property types, extending
/// `named`, and a `pump` object implementing it.
pub fn asset_interface(session: &mut Session) -> SessionResult<()> {
    session
        .shared_property_type("assetName", PropertyType::String)
        .display_name("Asset name")
        .done()?;
    session
        .shared_property_type("serialNumber", PropertyType::String)
        .display_name("Serial number")
        .done()?;
    session
        .shared_property_type("installedOn", PropertyType::Date)
        .done()?;
    session
        .interface_type("named")
        .property("assetName")
        .done()?;
    session
        .interface_type("asset")
        .display_name("Asset")
        .extends("named")
        .property("serialNumber")
        .optional_property("installedOn")
        .done()?;
    session
        .object_type("pump")
        .primary_key("pumpId")
        .property("pumpId", PropertyType::String)
        .shared_property("label", "assetName")
        .shared_property("serial", "serialNumber")
        .implements("asset", std::iter::empty::<(&str, &str)>())
        .done()?;
    Ok(())
}
