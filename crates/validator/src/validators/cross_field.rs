//! Cross-field rules
//!
//! These entries only carry a name and a message template. Their predicate
//! always passes; [`Validator`](crate::Validator) compares the field with its
//! sibling and records the failure itself.

crate::rule! {
    /// The field must equal `<field>_confirmation`.
    pub Confirmed = "confirmed", "The :field field confirmation does not match.";
    check(value) { true }
}

crate::rule! {
    /// The field must equal the field named by the first parameter.
    pub Same = "same", "The :field field must match :other.";
    check(value) { true }
}

crate::rule! {
    /// The field must differ from the field named by the first parameter.
    pub Different = "different", "The :field field must be different from :other.";
    check(value) { true }
}

/// Names of the rules evaluated by the validator against a sibling field.
pub const CROSS_FIELD_RULES: &[&str] = &["confirmed", "same", "different"];

/// Returns `true` for `confirmed`, `same` and `different`.
#[must_use]
pub fn is_cross_field(rule: &str) -> bool {
    CROSS_FIELD_RULES.contains(&rule)
}
