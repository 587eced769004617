//! Row accessors: functions that select one value from a row.
//!
//! An [`Accessor`] is a shared handle to a selector function. Cloning the
//! handle keeps its identity, so a column can tell "the same accessor again"
//! apart from "a new accessor" with [`Accessor::same_as`] and skip
//! re-deriving its cell text and sort rule.
//!
//! Accessors that read a plain field can carry a [`FieldDescriptor`]. The
//! descriptor is what a column uses to derive a default title and what a sort
//! rule reports for server-side sorting. The [`field!`](crate::field) macro
//! builds both at once:
//!
//! ```ignore
//! use bound_grid::field;
//!
//! struct Person {
//!     name: String,
//!     age: u32,
//! }
//!
//! let age = field!(Person, age);
//! assert_eq!(age.field_descriptor().unwrap().field_name(), "age");
//! ```

use std::fmt;
use std::sync::Arc;

/// Names the field an accessor reads and the type that declares it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    field_name: String,
    declaring_type: String,
}

impl FieldDescriptor {
    /// Creates a descriptor for `field_name` on `declaring_type`.
    pub fn new(field_name: impl Into<String>, declaring_type: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            declaring_type: declaring_type.into(),
        }
    }

    /// The field's name.
    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    /// The name of the type declaring the field.
    pub fn declaring_type(&self) -> &str {
        &self.declaring_type
    }
}

impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.declaring_type, self.field_name)
    }
}

struct AccessorInner<R, V> {
    select: Box<dyn Fn(&R) -> V + Send + Sync>,
    field: Option<FieldDescriptor>,
}

/// A shared, identity-carrying selector from a row `R` to a value `V`.
pub struct Accessor<R, V> {
    inner: Arc<AccessorInner<R, V>>,
}

impl<R, V> Accessor<R, V> {
    /// Wraps an opaque selector. Columns using it get no default title.
    pub fn new<F>(select: F) -> Self
    where
        F: Fn(&R) -> V + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(AccessorInner {
                select: Box::new(select),
                field: None,
            }),
        }
    }

    /// Wraps a selector that reads the field described by `field`.
    pub fn field<F>(field: FieldDescriptor, select: F) -> Self
    where
        F: Fn(&R) -> V + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(AccessorInner {
                select: Box::new(select),
                field: Some(field),
            }),
        }
    }

    /// Selects the value from `row`.
    #[inline]
    pub fn get(&self, row: &R) -> V {
        (self.inner.select)(row)
    }

    /// The field this accessor reads, if known.
    pub fn field_descriptor(&self) -> Option<&FieldDescriptor> {
        self.inner.field.as_ref()
    }

    /// Returns `true` if both handles refer to the same accessor.
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<R, V> Clone for Accessor<R, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R, V> fmt::Debug for Accessor<R, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor")
            .field("field", &self.inner.field)
            .finish_non_exhaustive()
    }
}

/// Builds an [`Accessor`] that clones a named field and records a
/// [`FieldDescriptor`] for it.
///
/// `field!(Row, name)` reads `row.name`. The declaring type is recorded as
/// written, so `field!(Person, age)` describes `Person.age`.
#[macro_export]
macro_rules! field {
    ($row:ty, $field:ident) => {
        $crate::Accessor::field(
            $crate::FieldDescriptor::new(stringify!($field), stringify!($row)),
            |row: &$row| ::std::clone::Clone::clone(&row.$field),
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Person {
        name: String,
        age: u32,
    }

    fn alice() -> Person {
        Person {
            name: "Alice".into(),
            age: 30,
        }
    }

    #[test]
    fn test_opaque_accessor() {
        let initials = Accessor::new(|p: &Person| p.name.chars().next());
        assert_eq!(initials.get(&alice()), Some('A'));
        assert!(initials.field_descriptor().is_none());
    }

    #[test]
    fn test_field_macro() {
        let age = crate::field!(Person, age);
        assert_eq!(age.get(&alice()), 30);

        let field = age.field_descriptor().unwrap();
        assert_eq!(field.field_name(), "age");
        assert_eq!(field.declaring_type(), "Person");
        assert_eq!(field.to_string(), "Person.age");
    }

    #[test]
    fn test_identity() {
        let name = crate::field!(Person, name);
        let same = name.clone();
        let other = crate::field!(Person, name);

        assert!(name.same_as(&same));
        assert!(!name.same_as(&other));
        assert_eq!(other.get(&alice()), "Alice");
    }
}
