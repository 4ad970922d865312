//! The rule seam.
//!
//! A rule is a stateless predicate over a value and its positional string
//! parameters. Anything callable as `Fn(&Value, &[String]) -> bool` is a rule,
//! so custom rules can be plain closures.

use crate::foundation::Value;

// ============================================================================
// RULE TRAIT
// ============================================================================

/// A named predicate evaluated against one field value.
///
/// Implementations must be pure: the same value and parameters always produce
/// the same answer, and no state is mutated.
///
/// # Examples
///
/// ```
/// use ruleset_validator::foundation::{Rule, Value};
///
/// let starts_with = |value: &Value, params: &[String]| {
///     value
///         .as_str()
///         .zip(params.first())
///         .is_some_and(|(s, prefix)| s.starts_with(prefix.as_str()))
/// };
///
/// assert!(starts_with.check(&Value::from("ticket-1"), &["ticket".to_owned()]));
/// ```
pub trait Rule: Send + Sync {
    /// Returns `true` when `value` satisfies the rule.
    fn check(&self, value: &Value, params: &[String]) -> bool;
}

impl<F> Rule for F
where
    F: Fn(&Value, &[String]) -> bool + Send + Sync,
{
    fn check(&self, value: &Value, params: &[String]) -> bool {
        self(value, params)
    }
}

/// A rule that carries its registry name and default message template.
///
/// Built-in rules implement this through the [`rule!`](crate::rule) macro.
pub trait NamedRule: Rule {
    /// Registry key, also the locale-table message key.
    const NAME: &'static str;

    /// Template used when neither a custom message nor a locale entry exists.
    const MESSAGE: &'static str;
}
