//! Human-readable names for fields.
//!
//! When a column has no explicit title it asks a [`DisplayNameResolver`] for
//! a label for the field its accessor reads. A missing or empty label is not
//! an error: the raw field name is used instead.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::accessor::FieldDescriptor;

/// Looks up a display label for a field of a type.
pub trait DisplayNameResolver: Send + Sync {
    /// Returns the label for `field_name` declared on `declaring_type`.
    fn display_name(&self, declaring_type: &str, field_name: &str) -> Option<String>;
}

impl<F> DisplayNameResolver for F
where
    F: Fn(&str, &str) -> Option<String> + Send + Sync,
{
    fn display_name(&self, declaring_type: &str, field_name: &str) -> Option<String> {
        self(declaring_type, field_name)
    }
}

/// A resolver that knows no names.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDisplayNames;

impl DisplayNameResolver for NoDisplayNames {
    fn display_name(&self, _declaring_type: &str, _field_name: &str) -> Option<String> {
        None
    }
}

/// A thread-safe table of display names keyed by `(type, field)`.
///
/// # Example
///
/// ```ignore
/// let names = DisplayNameRegistry::new()
///     .with("Person", "dob", "Date of birth")
///     .with("Person", "age", "Age (years)");
///
/// names.register("Person", "name", "Full name");
/// ```
#[derive(Debug, Default)]
pub struct DisplayNameRegistry {
    names: RwLock<HashMap<(String, String), String>>,
}

impl DisplayNameRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a name, builder style.
    pub fn with(
        self,
        declaring_type: impl Into<String>,
        field_name: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        self.register(declaring_type, field_name, display_name);
        self
    }

    /// Registers a name, returning the one it replaced.
    pub fn register(
        &self,
        declaring_type: impl Into<String>,
        field_name: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Option<String> {
        self.names.write().insert(
            (declaring_type.into(), field_name.into()),
            display_name.into(),
        )
    }

    /// Removes a name.
    pub fn unregister(&self, declaring_type: &str, field_name: &str) -> Option<String> {
        self.names
            .write()
            .remove(&(declaring_type.to_string(), field_name.to_string()))
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.names.read().len()
    }

    /// Returns `true` if no names are registered.
    pub fn is_empty(&self) -> bool {
        self.names.read().is_empty()
    }
}

impl DisplayNameResolver for DisplayNameRegistry {
    fn display_name(&self, declaring_type: &str, field_name: &str) -> Option<String> {
        self.names
            .read()
            .get(&(declaring_type.to_string(), field_name.to_string()))
            .cloned()
    }
}

/// Resolves the title for `field`: a non-empty display name, else the raw
/// field name.
pub fn resolve_title(resolver: &dyn DisplayNameResolver, field: &FieldDescriptor) -> String {
    resolver
        .display_name(field.declaring_type(), field.field_name())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| field.field_name().to_string())
}
