//! Outcome of a validation run.

use indexmap::IndexMap;
use serde::Serialize;

use crate::foundation::{Data, Value};

/// Errors grouped by field plus the subset of data that passed.
///
/// A field is present in [`validated`](Self::validated) if and only if it
/// has no errors. Field order follows the order in which rules were given.
///
/// # Examples
///
/// ```
/// use ruleset_validator::{Data, Validator, Value};
///
/// let data: Data = [
///     ("name".to_owned(), Value::from("Ada")),
///     ("email".to_owned(), Value::from("nope")),
/// ]
/// .into_iter()
/// .collect();
///
/// let result = Validator::new()
///     .validate(&data, [("name", "required"), ("email", "required|email")])
///     .unwrap();
///
/// assert!(!result.is_valid());
/// assert_eq!(result.validated_value("name"), Some(&Value::from("Ada")));
/// assert_eq!(
///     result.first_error("email"),
///     Some("The email field must be a valid email address.")
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationResult {
    errors: IndexMap<String, Vec<String>>,
    validated: Data,
}

impl ValidationResult {
    /// Creates an empty, valid result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_error(&mut self, field: &str, message: String) {
        self.errors.entry(field.to_owned()).or_default().push(message);
    }

    pub(crate) fn insert_validated(&mut self, field: &str, value: Value) {
        self.validated.insert(field.to_owned(), value);
    }

    pub(crate) fn remove_validated(&mut self, field: &str) {
        self.validated.shift_remove(field);
    }

    /// Returns `true` if no field has errors.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns `true` if any field has errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.is_valid()
    }

    /// Messages per failing field, in rule order.
    #[must_use]
    pub fn errors(&self) -> &IndexMap<String, Vec<String>> {
        &self.errors
    }

    /// Messages for one field; empty if it passed or was not validated.
    #[must_use]
    pub fn field_errors(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns `true` if `field` has at least one error.
    #[must_use]
    pub fn has_field_errors(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// First message for `field`.
    #[must_use]
    pub fn first_error(&self, field: &str) -> Option<&str> {
        self.field_errors(field).first().map(String::as_str)
    }

    /// Every message, flattened in field then rule order.
    #[must_use]
    pub fn all_errors(&self) -> Vec<&str> {
        self.errors.values().flatten().map(String::as_str).collect()
    }

    /// Total number of messages.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    /// Fields that passed every rule, with their sanitized values.
    #[must_use]
    pub fn validated(&self) -> &Data {
        &self.validated
    }

    /// Validated value of `field`.
    #[must_use]
    pub fn validated_value(&self, field: &str) -> Option<&Value> {
        self.validated.get(field)
    }

    /// Validated value of `field`, or `default` when it did not pass.
    #[must_use]
    pub fn validated_value_or<'a>(&'a self, field: &str, default: &'a Value) -> &'a Value {
        self.validated_value(field).unwrap_or(default)
    }

    /// Consumes the result, returning the validated data.
    #[must_use]
    pub fn into_validated(self) -> Data {
        self.validated
    }
}
