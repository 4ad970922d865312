//! Numeric and size rules
//!
//! `min`, `max` and `size` measure a value by its kind: strings by
//! character count, numbers by value, lists by element count and uploads
//! by byte size. A missing or unparsable bound fails the value.

use super::param_f64;
use crate::foundation::Value;

/// Measures `value` for `min`/`max`/`size`.
fn measure(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => Some(s.chars().count() as f64),
        Value::Int(n) => Some(*n as f64),
        Value::Float(f) => Some(*f),
        Value::List(items) => Some(items.len() as f64),
        Value::Upload(file) => Some(file.size as f64),
        Value::Null | Value::Bool(_) => None,
    }
}

fn compare(value: &Value, params: &[String], cmp: impl Fn(f64, f64) -> bool) -> bool {
    match (measure(value), param_f64(params, 0)) {
        (Some(actual), Some(bound)) => cmp(actual, bound),
        _ => false,
    }
}

crate::rule! {
    /// The value must be a number or a numeric string.
    pub Numeric = "numeric", "The :field field must be a number.";
    check(value) { value.is_numeric() }
}

crate::rule! {
    /// The measured value must be at least the first parameter.
    pub Min = "min", "The :field field must be at least :min characters.";
    check(value, params) { compare(value, params, |actual, min| actual >= min) }
}

crate::rule! {
    /// The measured value must not exceed the first parameter.
    pub Max = "max", "The :field field may not be greater than :max characters.";
    check(value, params) { compare(value, params, |actual, max| actual <= max) }
}

crate::rule! {
    /// The value must lie within `[params[0], params[1]]`, both inclusive.
    ///
    /// Numbers and numeric strings compare by value, other strings by
    /// character count.
    pub Between = "between", "The :field field must be between :min and :max.";
    check(value, params) {
        let (Some(min), Some(max)) = (param_f64(params, 0), param_f64(params, 1)) else {
            return false;
        };
        let actual = match value {
            Value::String(s) => value.as_number().unwrap_or(s.chars().count() as f64),
            other => match other.as_number() {
                Some(n) => n,
                None => return false,
            },
        };
        (min..=max).contains(&actual)
    }
}

crate::rule! {
    /// The measured value must equal the first parameter exactly.
    ///
    /// Numbers are truncated to an integer before comparison.
    pub Size = "size", "The :field field must have a size of :size.";
    check(value, params) {
        let actual = match value {
            Value::Float(f) => Some(f.trunc()),
            other => measure(other),
        };
        match (actual, param_f64(params, 0)) {
            (Some(actual), Some(size)) => actual == size.trunc(),
            _ => false,
        }
    }
}
