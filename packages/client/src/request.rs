//! Pieces shared by the request builders.

use crate::error::{ClientError, Result, ValidationErrors, ValidationFailure};

/// Validate a numeric option that must be strictly positive.
pub(crate) fn positive(
    value: i64,
    failure: fn(i64) -> ValidationFailure,
) -> std::result::Result<u64, ValidationFailure> {
    u64::try_from(value)
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| failure(value))
}

/// Store the outcome of one setter call: the value on success, the failure otherwise.
pub(crate) fn record<T>(
    failures: &mut Vec<ValidationFailure>,
    outcome: std::result::Result<T, ValidationFailure>,
) -> Option<T> {
    match outcome {
        Ok(value) => Some(value),
        Err(failure) => {
            tracing::debug!(%failure, "Rejected request option");
            failures.push(failure);
            None
        }
    }
}

/// Fail with every recorded failure, or succeed when there are none.
pub(crate) fn ensure_valid(failures: &[ValidationFailure]) -> Result<()> {
    match ValidationErrors::from_failures(failures) {
        Some(errors) => Err(ClientError::Validation(errors)),
        None => Ok(()),
    }
}
