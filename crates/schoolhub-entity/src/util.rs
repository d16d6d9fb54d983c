//! Small helpers shared by the entity modules.

use std::borrow::Cow;

use schoolhub_core::AppError;

/// Borrow an optional string field as display text.
pub(crate) fn opt(value: &Option<String>) -> Option<Cow<'_, str>> {
    value.as_deref().map(Cow::Borrowed)
}

/// Build the error returned by a status `FromStr` impl.
pub(crate) fn invalid_variant(what: &str, got: &str, expected: &[&str]) -> AppError {
    AppError::validation(format!(
        "Invalid {what}: '{got}'. Expected one of: {}",
        expected.join(", ")
    ))
}

/// Percentage of `part` in `whole`, 0 when `whole` is 0.
pub(crate) fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        (part as f64 / whole as f64) * 100.0
    }
}
