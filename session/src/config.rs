//! Session configuration.

/// Options of one ontology definition session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    /// Prefix applied to short entity names (`com.example` or `com.example.`).
    pub namespace: String,
    /// Passed through to the dump untouched.
    pub randomness_key: Option<String>,
    /// Validate identifier and api name syntax on every definition.
    pub strict_identifiers: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            namespace: String::new(),
            randomness_key: None,
            strict_identifiers: true,
        }
    }
}

impl SessionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_randomness_key(mut self, key: impl Into<String>) -> Self {
        self.randomness_key = Some(key.into());
        self
    }

    pub fn with_strict_identifiers(mut self, strict: bool) -> Self {
        self.strict_identifiers = strict;
        self
    }
}
