//! Common user-facing strings used across ontoc components.
//!
//! Generated display metadata and failure messages are read from here so
//! every compiled action uses the same wording.

/// Display name of the structural parameter of a modify-object action.
pub const MODIFY_OBJECT_DISPLAY: &str = "Modify object";

/// Display name of the structural parameter of a delete action.
pub const DELETE_OBJECT_DISPLAY: &str = "Delete object";

/// Display name of the structural parameter of a create-or-modify action.
pub const CREATE_OR_MODIFY_OBJECT_DISPLAY: &str = "Create or modify object";

/// Display name of the object type parameter of an interface create action.
pub const OBJECT_TYPE_TO_CREATE_DISPLAY: &str = "Object type to create";

/// Display name of the structural parameter of an interface modify action.
pub const INTERFACE_OBJECT_TO_MODIFY_DISPLAY: &str = "Interface object to modify";

/// Failure message of the action-level rule generated from submitter groups.
pub const ERR_SUBMITTER_NOT_IN_GROUP: &str = "You do not have permission to submit this action";
