//! Presence rules
//!
//! These run even when the value is absent; every other non cross-field
//! rule is skipped for `null` and `""`.

use crate::foundation::{UploadedFile, Value};
use crate::sanitize::TRIMMED;

crate::rule! {
    /// The value must be present and non-empty.
    ///
    /// Strings are trimmed before the check, lists must hold an element and
    /// an upload must actually carry a file.
    pub Required = "required", "The :field field is required.";
    check(value) {
        match value {
            Value::Null => false,
            Value::String(s) => !s.trim_matches(TRIMMED).is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Upload(file) => file.error != UploadedFile::NO_FILE,
            Value::Bool(_) | Value::Int(_) | Value::Float(_) => true,
        }
    }
}

crate::rule! {
    /// When present the value must be non-empty; a missing field passes.
    pub Filled = "filled", "The :field field must have a value.";
    check(value) {
        match value {
            Value::Null => true,
            Value::String(s) => !s.trim_matches(TRIMMED).is_empty(),
            Value::List(items) => !items.is_empty(),
            _ => true,
        }
    }
}

crate::rule! {
    /// The value must be an affirmative answer: `yes`, `on`, `true` or `1`.
    pub Accepted = "accepted", "The :field field must be accepted.";
    check(value) {
        match value {
            Value::Bool(b) => *b,
            Value::String(s) => {
                let lower = s.trim().to_ascii_lowercase();
                matches!(lower.as_str(), "1" | "true" | "yes" | "on")
            }
            other => other.as_number() == Some(1.0),
        }
    }
}
