//! Form values and the parse-then-validate pipeline for create/edit dialogs.
//!
//! Dialogs collect raw text per field. Before anything reaches the API the
//! text is parsed into a typed draft; numeric fields that are blank or not
//! numbers are rejected with a validation error instead of being sent as
//! garbage.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;
use crate::result::AppResult;

/// Raw text entered into a form, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues(BTreeMap<String, String>);

impl FormValues {
    /// Create an empty set of values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set a field.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Set a field, replacing any previous text.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    /// Raw text of a field; missing fields read as empty.
    pub fn get(&self, field: &str) -> &str {
        self.0.get(field).map(String::as_str).unwrap_or("")
    }

    /// Iterate over `(field, text)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Trimmed text of a field.
    pub fn text(&self, field: &str) -> String {
        self.get(field).trim().to_string()
    }

    /// Trimmed text, or `None` when blank.
    pub fn optional_text(&self, field: &str) -> Option<String> {
        let text = self.text(field);
        if text.is_empty() { None } else { Some(text) }
    }

    /// Trimmed text that must not be blank.
    pub fn require(&self, field: &str) -> AppResult<String> {
        self.optional_text(field)
            .ok_or_else(|| AppError::validation(format!("{field} is required")))
    }

    /// Parse a required field with `FromStr` (integers, dates, enums).
    pub fn parse<T>(&self, field: &str) -> AppResult<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let raw = self.require(field)?;
        raw.parse::<T>()
            .map_err(|e| AppError::validation(format!("{field} is invalid: {e}")))
    }

    /// Parse an optional field; blank means `None`.
    pub fn parse_optional<T>(&self, field: &str) -> AppResult<Option<T>>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        match self.optional_text(field) {
            None => Ok(None),
            Some(_) => self.parse(field).map(Some),
        }
    }

    /// Parse a required decimal. `NaN` and infinities are rejected.
    pub fn decimal(&self, field: &str) -> AppResult<f64> {
        let raw = self.require(field)?;
        let value: f64 = raw
            .parse()
            .map_err(|_| AppError::validation(format!("{field} must be a number")))?;
        if !value.is_finite() {
            return Err(AppError::validation(format!("{field} must be a number")));
        }
        Ok(value)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A typed draft built from dialog input.
pub trait Form: Sized + Validate {
    /// Field names in display order, used to prompt for input.
    const FIELDS: &'static [&'static str];

    /// Values the dialog shows when it opens for a new record.
    fn defaults() -> FormValues;

    /// Parse raw values into the draft. Must not perform range checks
    /// that `validator` attributes already express.
    fn parse(values: &FormValues) -> AppResult<Self>;

    /// Parse and then validate.
    fn from_values(values: &FormValues) -> AppResult<Self> {
        let draft = Self::parse(values)?;
        draft.validate()?;
        Ok(draft)
    }
}
