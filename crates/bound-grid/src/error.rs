//! Error types for grid columns.

/// Result type alias for column operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or driving a column.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The column's value type cannot satisfy the requested configuration,
    /// e.g. a format pattern on a type without pattern rendering, or sorting
    /// on a type without an ordering and no explicit comparer.
    #[error("Invalid column configuration: {message}")]
    Configuration { message: String },

    /// The operation is not available on this kind of column.
    #[error("{column_kind} does not support '{operation}'; for this, see '{alternative}'")]
    UnsupportedOperation {
        operation: &'static str,
        column_kind: &'static str,
        alternative: &'static str,
    },

    /// A header mode label did not name any known mode.
    #[error("Unknown header mode '{0}'")]
    UnknownHeaderMode(String),
}

impl Error {
    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an unsupported-operation error.
    pub fn unsupported(
        operation: &'static str,
        column_kind: &'static str,
        alternative: &'static str,
    ) -> Self {
        Self::UnsupportedOperation {
            operation,
            column_kind,
            alternative,
        }
    }

    /// Returns `true` for [`Error::Configuration`].
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }

    /// Returns `true` for [`Error::UnsupportedOperation`].
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedOperation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_message() {
        let err = Error::configuration("no ordering for 'Point'");
        assert!(err.is_configuration());
        assert!(!err.is_unsupported());
        assert_eq!(
            err.to_string(),
            "Invalid column configuration: no ordering for 'Point'"
        );
    }

    #[test]
    fn test_unsupported_names_alternative() {
        let err = Error::unsupported("set_sort_by", "PropertyColumn", "TemplateColumn");
        assert!(err.is_unsupported());
        let text = err.to_string();
        assert!(text.contains("PropertyColumn"));
        assert!(text.contains("TemplateColumn"));
    }
}
