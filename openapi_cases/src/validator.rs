//! The schema validation capability the harness drives.

use thiserror::Error;

use crate::{SchemaCategory, Values};

/// Rejection reported by a schema validator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SchemaValidationError {
    message: String,
}

impl SchemaValidationError {
    /// Wraps the validator's human-readable explanation.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The validator's explanation.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Validates a values tree against the schema of one module and category.
///
/// `values` holds the case instance nested under `module_name`, which is how
/// module schemas address their values. Closures with the same signature
/// implement the trait, which keeps fakes in tests short.
pub trait ValuesValidator {
    /// Checks `values` against the `category` schema of `module_name`.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaValidationError`] when the values do not conform.
    fn validate_values(
        &self,
        category: SchemaCategory,
        module_name: &str,
        values: &Values,
    ) -> Result<(), SchemaValidationError>;
}

impl<F> ValuesValidator for F
where
    F: Fn(SchemaCategory, &str, &Values) -> Result<(), SchemaValidationError>,
{
    fn validate_values(
        &self,
        category: SchemaCategory,
        module_name: &str,
        values: &Values,
    ) -> Result<(), SchemaValidationError> {
        self(category, module_name, values)
    }
}
