//! Identity types for ontology entities.
//!
//! Every entity (object type, interface, shared property type, action type,
//! value type) is addressed by a namespace-qualified [`Identifier`]:
//! - Short names are prefixed with the active [`Namespace`]
//! - Dotted names are treated as already qualified
//! - [`EntityName::raw`] opts a name out of qualification entirely
//!
//! Qualification happens exactly once, in [`Namespace::qualify`], when a
//! definition is constructed.

use crate::{CoreError, CoreResult};
use regex_lite::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

/// Dot-separated segments, each starting with a letter.
const QUALIFIED_PATTERN: &str = r"^[A-Za-z][A-Za-z0-9_-]*(\.[A-Za-z][A-Za-z0-9_-]*)*$";

/// Local api names (object properties, parameter ids).
const API_NAME_PATTERN: &str = r"^[a-z][A-Za-z0-9_]*$";

static QUALIFIED_REGEX: OnceLock<Regex> = OnceLock::new();
static API_NAME_REGEX: OnceLock<Regex> = OnceLock::new();

/// Compile `pattern` into `cell` on first use and return the shared regex.
pub fn cached_regex(cell: &'static OnceLock<Regex>, pattern: &str) -> CoreResult<&'static Regex> {
    if let Some(re) = cell.get() {
        return Ok(re);
    }
    let re = Regex::new(pattern).map_err(|e| CoreError::invalid_pattern(pattern, e.to_string()))?;
    Ok(cell.get_or_init(|| re))
}

/// A globally unique, namespace-qualified entity identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Wrap an already qualified identifier (e.g. an imported entity).
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Parse and validate an already qualified identifier.
    pub fn parse(value: impl Into<String>) -> CoreResult<Self> {
        let id = Self(value.into());
        id.validate()?;
        Ok(id)
    }

    /// Get the raw string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The last dot-separated segment.
    pub fn local_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }

    /// Everything before the last dot, if qualified.
    pub fn namespace(&self) -> Option<&str> {
        self.0.rsplit_once('.').map(|(ns, _)| ns)
    }

    /// Check the identifier syntax.
    pub fn validate(&self) -> CoreResult<()> {
        if cached_regex(&QUALIFIED_REGEX, QUALIFIED_PATTERN)?.is_match(&self.0) {
            Ok(())
        } else {
            Err(CoreError::invalid_identifier(
                &self.0,
                "segments must start with a letter and contain only letters, digits, '_' or '-'",
            ))
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A user-supplied entity name, before qualification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityName {
    /// Qualified with the active namespace unless it already contains a dot.
    Auto(String),
    /// Used verbatim.
    Raw(String),
}

impl EntityName {
    /// Mark a name as non-namespaced.
    pub fn raw(name: impl Into<String>) -> Self {
        EntityName::Raw(name.into())
    }

    /// Get the name as written.
    pub fn as_str(&self) -> &str {
        match self {
            EntityName::Auto(s) | EntityName::Raw(s) => s,
        }
    }
}

impl From<&str> for EntityName {
    fn from(name: &str) -> Self {
        EntityName::Auto(name.to_string())
    }
}

impl From<String> for EntityName {
    fn from(name: String) -> Self {
        EntityName::Auto(name)
    }
}

impl From<&String> for EntityName {
    fn from(name: &String) -> Self {
        EntityName::Auto(name.clone())
    }
}

impl From<Identifier> for EntityName {
    fn from(id: Identifier) -> Self {
        EntityName::Raw(id.0)
    }
}

impl From<&Identifier> for EntityName {
    fn from(id: &Identifier) -> Self {
        EntityName::Raw(id.0.clone())
    }
}

/// The namespace prefix active for an ontology-definition session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Namespace {
    /// Prefix including the trailing dot, or empty.
    prefix: String,
}

impl Namespace {
    /// Create a namespace. A missing trailing dot is added.
    pub fn new(prefix: impl Into<String>) -> CoreResult<Self> {
        let mut prefix = prefix.into();
        if prefix.is_empty() {
            return Ok(Self::none());
        }
        if !prefix.ends_with('.') {
            prefix.push('.');
        }
        let bare = &prefix[..prefix.len() - 1];
        if !cached_regex(&QUALIFIED_REGEX, QUALIFIED_PATTERN)?.is_match(bare) {
            return Err(CoreError::invalid_namespace(
                &prefix,
                "segments must start with a letter and contain only letters, digits, '_' or '-'",
            ));
        }
        Ok(Self { prefix })
    }

    /// The empty namespace.
    pub fn none() -> Self {
        Self {
            prefix: String::new(),
        }
    }

    /// Get the prefix (with trailing dot).
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns true if no prefix is applied.
    pub fn is_empty(&self) -> bool {
        self.prefix.is_empty()
    }

    /// Qualify a name. Total: every name maps to exactly one identifier.
    pub fn qualify(&self, name: impl Into<EntityName>) -> Identifier {
        match name.into() {
            EntityName::Raw(s) => Identifier(s),
            EntityName::Auto(s) if s.contains('.') => Identifier(s),
            EntityName::Auto(s) => Identifier(format!("{}{}", self.prefix, s)),
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefix)
    }
}

/// Check a local api name (object property, parameter id, section id).
pub fn validate_api_name(name: &str) -> CoreResult<()> {
    if cached_regex(&API_NAME_REGEX, API_NAME_PATTERN)?.is_match(name) {
        Ok(())
    } else {
        Err(CoreError::invalid_identifier(
            name,
            "api names must start with a lowercase letter and contain only letters, digits or '_'",
        ))
    }
}

/// Convert a camelCase api name to kebab-case.
pub fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else if ch == '_' {
            out.push('-');
        } else {
            out.push(ch);
        }
    }
    out
}
