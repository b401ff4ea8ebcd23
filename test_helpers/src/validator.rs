//! Fake schema validators that record what they were asked to check.
//!
//! # Examples
//!
//! ```
//! use openapi_cases::{SchemaCategory, Values, ValuesValidator};
//! use openapi_cases_test_helpers::validator;
//!
//! let fake = validator::accepting();
//! assert!(fake.validate_values(SchemaCategory::Values, "foo", &Values::new()).is_ok());
//! assert_eq!(fake.call_count(), 1);
//! ```

use openapi_cases::{SchemaCategory, SchemaValidationError, Values, ValuesValidator};
use parking_lot::Mutex;

/// One invocation observed by a [`RecordingValidator`].
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    /// Category passed to the validator.
    pub category: SchemaCategory,
    /// Module name passed to the validator.
    pub module_name: String,
    /// Values tree passed to the validator.
    pub values: Values,
}

/// Validator delegating the verdict to a closure and recording every call.
pub struct RecordingValidator<F> {
    verdict: F,
    calls: Mutex<Vec<Call>>,
}

impl<F> RecordingValidator<F>
where
    F: Fn(SchemaCategory, &str, &Values) -> Result<(), SchemaValidationError>,
{
    /// Wraps `verdict`.
    pub fn new(verdict: F) -> Self {
        Self {
            verdict,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of the calls made so far.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    /// Number of calls made so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

impl<F> ValuesValidator for RecordingValidator<F>
where
    F: Fn(SchemaCategory, &str, &Values) -> Result<(), SchemaValidationError>,
{
    fn validate_values(
        &self,
        category: SchemaCategory,
        module_name: &str,
        values: &Values,
    ) -> Result<(), SchemaValidationError> {
        self.calls.lock().push(Call {
            category,
            module_name: module_name.to_owned(),
            values: values.clone(),
        });
        (self.verdict)(category, module_name, values)
    }
}

/// Validator accepting every values tree.
#[must_use]
pub fn accepting()
-> RecordingValidator<impl Fn(SchemaCategory, &str, &Values) -> Result<(), SchemaValidationError>> {
    RecordingValidator::new(|_: SchemaCategory, _: &str, _: &Values| {
        Ok::<(), SchemaValidationError>(())
    })
}

/// Validator rejecting every values tree with `message`.
#[must_use]
pub fn rejecting(
    message: impl Into<String>,
) -> RecordingValidator<impl Fn(SchemaCategory, &str, &Values) -> Result<(), SchemaValidationError>> {
    let reason: String = message.into();
    RecordingValidator::new(move |_: SchemaCategory, _: &str, _: &Values| {
        Err::<(), _>(SchemaValidationError::new(reason.clone()))
    })
}

/// Validator rejecting a module whose `replicas` value is negative, in every
/// category.
#[must_use]
pub fn non_negative_replicas()
-> RecordingValidator<impl Fn(SchemaCategory, &str, &Values) -> Result<(), SchemaValidationError>> {
    RecordingValidator::new(
        |_: SchemaCategory, module_name: &str, values: &Values| -> Result<(), SchemaValidationError> {
            let replicas = values
                .get(module_name)
                .and_then(|module| module.get("replicas"))
                .and_then(serde_json::Value::as_i64);
            match replicas {
                Some(count) if count < 0 => Err(SchemaValidationError::new(format!(
                    "{module_name}.replicas in body should be greater than or equal to 0"
                ))),
                _ => Ok(()),
            }
        },
    )
}
