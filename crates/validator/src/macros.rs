//! Macros for declaring rules with minimal boilerplate.
//!
//! # Available Macros
//!
//! - [`rule!`]: declare a unit rule type with its `Rule` and `NamedRule` impls
//! - [`rule_spec!`]: build a [`RuleSpec`](crate::RuleSpec) inline
//!
//! # Examples
//!
//! ```rust,ignore
//! use ruleset_validator::rule;
//!
//! rule! {
//!     /// Accepts even integers.
//!     pub Even = "even", "The :field field must be even.";
//!     check(value) { matches!(value, Value::Int(n) if n % 2 == 0) }
//! }
//! ```

// ============================================================================
// RULE MACRO
// ============================================================================

/// Declares a rule: a zero-sized struct, its [`Rule`](crate::foundation::Rule)
/// implementation and its [`NamedRule`](crate::foundation::NamedRule) constants.
///
/// `#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]` is always applied.
///
/// # Variants
///
/// **Value only**:
/// ```rust,ignore
/// rule! {
///     pub Numeric = "numeric", "The :field field must be a number.";
///     check(value) { value.is_numeric() }
/// }
/// ```
///
/// **Value and parameters**:
/// ```rust,ignore
/// rule! {
///     pub Min = "min", "The :field field must be at least :min.";
///     check(value, params) { ... }
/// }
/// ```
#[macro_export]
macro_rules! rule {
    // ── Variant 1: value only ───────────────────────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident = $key:literal, $message:literal;
        check($val:ident) $body:block
    ) => {
        $crate::rule! {
            $(#[$meta])*
            $vis $name = $key, $message;
            check($val, _params) $body
        }
    };

    // ── Variant 2: value and parameters ─────────────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident = $key:literal, $message:literal;
        check($val:ident, $params:ident) $body:block
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        $vis struct $name;

        impl $crate::foundation::Rule for $name {
            #[allow(unused_variables)]
            fn check(&self, $val: &$crate::foundation::Value, $params: &[String]) -> bool $body
        }

        impl $crate::foundation::NamedRule for $name {
            const NAME: &'static str = $key;
            const MESSAGE: &'static str = $message;
        }
    };
}

// ============================================================================
// RULE SPEC MACRO
// ============================================================================

/// Builds a [`RuleSpec`](crate::RuleSpec) from `name => [params]` pairs.
///
/// Useful when a parameter contains `|` or `,` and cannot be written in the
/// rule-string grammar.
///
/// ```
/// use ruleset_validator::rule_spec;
///
/// let spec = rule_spec! {
///     "required" => [],
///     "pattern" => ["/^(a|b),c$/"],
/// };
/// assert_eq!(spec.len(), 2);
/// assert_eq!(spec.get("pattern"), Some(&["/^(a|b),c$/".to_owned()][..]));
/// ```
#[macro_export]
macro_rules! rule_spec {
    ($($name:expr => [$($param:expr),* $(,)?]),* $(,)?) => {{
        let mut spec = $crate::RuleSpec::new();
        $(
            spec.insert($name, vec![$(::std::string::String::from($param)),*]);
        )*
        spec
    }};
}

#[cfg(test)]
mod tests {
    use crate::foundation::{NamedRule, Rule, Value};

    crate::rule! {
        /// Test rule over integers.
        Even = "even", "The :field field must be even.";
        check(value) { matches!(value, Value::Int(n) if n % 2 == 0) }
    }

    crate::rule! {
        StartsWith = "starts_with", "The :field field must start with :value.";
        check(value, params) {
            match (value.as_str(), params.first()) {
                (Some(s), Some(prefix)) => s.starts_with(prefix.as_str()),
                _ => false,
            }
        }
    }

    #[test]
    fn declared_rule_constants() {
        assert_eq!(Even::NAME, "even");
        assert_eq!(Even::MESSAGE, "The :field field must be even.");
    }

    #[test]
    fn declared_rule_checks() {
        assert!(Even.check(&Value::Int(4), &[]));
        assert!(!Even.check(&Value::Int(3), &[]));
        assert!(StartsWith.check(&Value::from("abc"), &["ab".to_owned()]));
        assert!(!StartsWith.check(&Value::from("abc"), &[]));
    }

    #[test]
    fn rule_spec_macro_keeps_order() {
        let spec = crate::rule_spec! {
            "required" => [],
            "between" => ["1", "5"],
        };
        let names: Vec<&str> = spec.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["required", "between"]);
    }
}
