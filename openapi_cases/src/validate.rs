//! Positive and negative case checks.

use tracing::{debug, info};

use crate::{
    CasesError, CasesResult, SchemaCategory, Values, ValuesValidator, is_focused, strip_focus,
};

/// Result of a case check that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseOutcome {
    /// The validator was consulted and returned the expected verdict.
    Passed,
    /// The case was not focused during a focused run.
    Skipped,
}

/// Nests `instance` under `module_name`, the key module schemas expect.
fn module_values(module_name: &str, instance: &Values) -> Values {
    let mut values = Values::new();
    values.insert(
        module_name.to_owned(),
        serde_json::Value::Object(instance.clone()),
    );
    values
}

/// Checks that `instance` validates against the `category` schema of
/// `module_name`.
///
/// When `run_focused` is set, unfocused instances are skipped without calling
/// the validator. The focus marker is removed from `instance` before it is
/// validated.
///
/// # Errors
///
/// Returns [`CasesError::PositiveRejected`] carrying the validator's error when
/// the instance is rejected.
pub fn validate_positive_case<V>(
    validator: &V,
    module_name: &str,
    category: SchemaCategory,
    instance: &mut Values,
    run_focused: bool,
) -> CasesResult<CaseOutcome>
where
    V: ValuesValidator + ?Sized,
{
    if run_focused && !is_focused(instance) {
        debug!(module = %module_name, %category, "skipping unfocused positive case");
        return Ok(CaseOutcome::Skipped);
    }
    strip_focus(instance);

    validator
        .validate_values(category, module_name, &module_values(module_name, instance))
        .map_err(|source| CasesError::PositiveRejected {
            module: module_name.to_owned(),
            category,
            source,
        })?;
    Ok(CaseOutcome::Passed)
}

/// Checks that `instance` is rejected by the `category` schema of
/// `module_name`.
///
/// Skipping and marker stripping follow [`validate_positive_case`]. For a
/// focused instance the validator's rejection is logged at `info` level so the
/// reason a negative case fails can be inspected while debugging it.
///
/// # Errors
///
/// Returns [`CasesError::NegativeAccepted`] with a YAML rendering of the
/// instance when the validator accepts it.
pub fn validate_negative_case<V>(
    validator: &V,
    module_name: &str,
    category: SchemaCategory,
    instance: &mut Values,
    run_focused: bool,
) -> CasesResult<CaseOutcome>
where
    V: ValuesValidator + ?Sized,
{
    let focused = is_focused(instance);
    if run_focused && !focused {
        debug!(module = %module_name, %category, "skipping unfocused negative case");
        return Ok(CaseOutcome::Skipped);
    }
    strip_focus(instance);

    match validator.validate_values(category, module_name, &module_values(module_name, instance)) {
        Ok(()) => Err(CasesError::NegativeAccepted {
            module: module_name.to_owned(),
            category,
            rendered: values_to_string(instance),
        }),
        Err(err) => {
            if focused {
                info!(
                    module = %module_name,
                    %category,
                    error = %err,
                    "expected error for negative case"
                );
            }
            Ok(CaseOutcome::Passed)
        }
    }
}

/// Renders `values` as YAML for diagnostics.
///
/// Returns an empty string if the values cannot be serialized.
#[must_use]
pub fn values_to_string(values: &Values) -> String {
    serde_yaml::to_string(values).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    //! Engine behaviour against closure validators.

    use std::cell::RefCell;

    use anyhow::{Result, anyhow, ensure};
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::{FOCUS_FIELD_NAME, SchemaValidationError};

    fn values(value: serde_json::Value) -> Result<Values> {
        match value {
            serde_json::Value::Object(map) => Ok(map),
            other => Err(anyhow!("expected an object, got {other}")),
        }
    }

    /// Rejects any module whose `replicas` is negative.
    fn replicas_validator(
        _category: SchemaCategory,
        module_name: &str,
        values: &Values,
    ) -> Result<(), SchemaValidationError> {
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
    }

    #[rstest]
    fn positive_case_returns_validator_error() -> Result<()> {
        let mut instance = values(json!({ "replicas": -1 }))?;
        let err = validate_positive_case(
            &replicas_validator,
            "foo",
            SchemaCategory::Values,
            &mut instance,
            false,
        )
        .err()
        .ok_or_else(|| anyhow!("negative replicas should be rejected"))?;
        match err {
            CasesError::PositiveRejected {
                module,
                category,
                source,
            } => {
                ensure!(module == "foo", "unexpected module {module}");
                ensure!(category == SchemaCategory::Values, "unexpected category");
                ensure!(
                    source.message() == "foo.replicas in body should be greater than or equal to 0",
                    "validator error altered: {source}"
                );
            }
            other => return Err(anyhow!("unexpected error: {other}")),
        }
        Ok(())
    }

    #[rstest]
    fn negative_case_passes_when_validator_rejects() -> Result<()> {
        let mut instance = values(json!({ "replicas": -1 }))?;
        let outcome = validate_negative_case(
            &replicas_validator,
            "foo",
            SchemaCategory::Values,
            &mut instance,
            false,
        )
        .map_err(|err| anyhow!(err.to_string()))?;
        ensure!(outcome == CaseOutcome::Passed, "got {outcome:?}");
        Ok(())
    }

    #[rstest]
    fn negative_case_fails_when_validator_accepts() -> Result<()> {
        let mut instance = values(json!({ "replicas": 3, FOCUS_FIELD_NAME: true }))?;
        let err = validate_negative_case(
            &replicas_validator,
            "foo",
            SchemaCategory::HelmValues,
            &mut instance,
            true,
        )
        .err()
        .ok_or_else(|| anyhow!("accepted negative case must fail"))?;
        let CasesError::NegativeAccepted { rendered, .. } = &err else {
            return Err(anyhow!("unexpected error: {err}"));
        };
        ensure!(rendered.contains("replicas: 3"), "rendering: {rendered}");
        ensure!(
            !rendered.contains(FOCUS_FIELD_NAME),
            "marker leaked into rendering: {rendered}"
        );
        ensure!(
            err.to_string().contains("should not pass validation"),
            "message: {err}"
        );
        Ok(())
    }

    #[rstest]
    #[case::positive(true)]
    #[case::negative(false)]
    fn unfocused_cases_skip_without_validating(#[case] positive: bool) -> Result<()> {
        let calls = RefCell::new(0_usize);
        let validator = |_: SchemaCategory, _: &str, _: &Values| {
            *calls.borrow_mut() += 1;
            Ok::<(), SchemaValidationError>(())
        };
        let mut instance = values(json!({ "replicas": 3 }))?;
        let outcome = if positive {
            validate_positive_case(&validator, "foo", SchemaCategory::Values, &mut instance, true)
        } else {
            validate_negative_case(&validator, "foo", SchemaCategory::Values, &mut instance, true)
        }
        .map_err(|err| anyhow!(err.to_string()))?;
        ensure!(outcome == CaseOutcome::Skipped, "got {outcome:?}");
        ensure!(*calls.borrow() == 0, "validator must not be called");
        Ok(())
    }

    #[rstest]
    #[case::positive(true)]
    #[case::negative(false)]
    fn focused_cases_run_without_marker(#[case] positive: bool) -> Result<()> {
        let seen = RefCell::new(Vec::new());
        let validator = |_: SchemaCategory, module: &str, values: &Values| {
            seen.borrow_mut().push((module.to_owned(), values.clone()));
            Err::<(), _>(SchemaValidationError::new("rejected"))
        };
        let mut instance = values(json!({ "replicas": 3, FOCUS_FIELD_NAME: true }))?;
        // Focus only gates skipping; both passes still consult the validator.
        let result = if positive {
            validate_positive_case(&validator, "foo", SchemaCategory::Values, &mut instance, false)
        } else {
            validate_negative_case(&validator, "foo", SchemaCategory::Values, &mut instance, false)
        };
        ensure!(result.is_ok() != positive, "verdict must come from the validator");

        let expected = values(json!({ "foo": { "replicas": 3 } }))?;
        let calls = seen.borrow();
        ensure!(calls.len() == 1, "expected one call, got {}", calls.len());
        ensure!(
            calls.iter().all(|(module, tree)| module == "foo" && *tree == expected),
            "validator saw {calls:?}"
        );
        ensure!(!is_focused(&instance), "marker must be stripped in place");
        Ok(())
    }

    #[rstest]
    fn rendering_round_trips() -> Result<()> {
        let map = values(json!({
            "replicas": 3,
            "name": "foo",
            "enabled": true,
            "ratio": 0.5,
            "nothing": null,
            "nested": { "list": [1, "two", { "three": 3 }] },
        }))?;
        let rendered = values_to_string(&map);
        let parsed: Values = serde_yaml::from_str(&rendered)?;
        ensure!(parsed == map, "round trip changed values:\n{rendered}");
        Ok(())
    }
}
