//! Rule registry.
//!
//! Maps rule names to their definitions. Registration overwrites any
//! existing rule of the same name, which is how callers override built-ins.
//! The registry is only mutated while a [`Validator`](crate::Validator) is
//! being configured; `validate` reads it through a shared reference.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::foundation::{ConfigError, NamedRule, Result, Rule, Value};

// ============================================================================
// RULE DEFINITION
// ============================================================================

/// A registered rule: name, predicate and default message template.
#[derive(Clone)]
pub struct RuleDefinition {
    name: String,
    rule: Arc<dyn Rule>,
    default_message: Cow<'static, str>,
}

impl RuleDefinition {
    /// Creates a definition.
    pub fn new(
        name: impl Into<String>,
        rule: impl Rule + 'static,
        default_message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            name: name.into(),
            rule: Arc::new(rule),
            default_message: default_message.into(),
        }
    }

    /// Creates a definition from a [`NamedRule`].
    pub fn named<R: NamedRule + 'static>(rule: R) -> Self {
        Self::new(R::NAME, rule, R::MESSAGE)
    }

    /// Registry key.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Template used when no custom message or locale entry exists.
    #[must_use]
    pub fn default_message(&self) -> &str {
        &self.default_message
    }

    /// Evaluates the predicate.
    #[must_use]
    pub fn check(&self, value: &Value, params: &[String]) -> bool {
        self.rule.check(value, params)
    }
}

impl fmt::Debug for RuleDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleDefinition")
            .field("name", &self.name)
            .field("default_message", &self.default_message)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// RULE REGISTRY
// ============================================================================

/// Name-keyed table of rule definitions.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: HashMap<String, RuleDefinition>,
}

impl RuleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in rule.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::validators::register_builtins(&mut registry);
        registry
    }

    /// Registers a rule, replacing any rule with the same name.
    ///
    /// # Examples
    ///
    /// ```
    /// use ruleset_validator::foundation::Value;
    /// use ruleset_validator::registry::RuleRegistry;
    ///
    /// let mut registry = RuleRegistry::new();
    /// registry.register(
    ///     "even",
    ///     |value: &Value, _: &[String]| matches!(value, Value::Int(n) if n % 2 == 0),
    ///     "The :field field must be even.",
    /// );
    /// assert!(registry.has("even"));
    /// ```
    pub fn register(
        &mut self,
        name: impl Into<String>,
        rule: impl Rule + 'static,
        default_message: impl Into<Cow<'static, str>>,
    ) -> &mut Self {
        self.insert(RuleDefinition::new(name, rule, default_message))
    }

    /// Registers a [`NamedRule`] under its own name.
    pub fn register_named<R: NamedRule + 'static>(&mut self, rule: R) -> &mut Self {
        self.insert(RuleDefinition::named(rule))
    }

    /// Registers a prepared definition.
    pub fn insert(&mut self, definition: RuleDefinition) -> &mut Self {
        if let Some(previous) = self.rules.insert(definition.name.clone(), definition) {
            debug!(rule = %previous.name, "rule overridden");
        }
        self
    }

    /// Returns `true` if a rule with this name is registered.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Looks a rule up by name.
    pub fn get(&self, name: &str) -> Result<&RuleDefinition> {
        self.rules
            .get(name)
            .ok_or_else(|| ConfigError::unknown_rule(name))
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if no rule is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn always(result: bool) -> impl Fn(&Value, &[String]) -> bool + Send + Sync {
        move |_: &Value, _: &[String]| result
    }

    #[test]
    fn get_unknown_fails() {
        let registry = RuleRegistry::new();
        let err = registry.get("bogus_rule").unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownRule {
                name: "bogus_rule".into()
            }
        );
    }

    #[test]
    fn last_registration_wins() {
        let mut registry = RuleRegistry::new();
        registry.register("x", always(false), "first");
        registry.register("x", always(true), "second");

        let rule = registry.get("x").unwrap();
        assert_eq!(rule.default_message(), "second");
        assert!(rule.check(&Value::Null, &[]));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn builtins_are_registered() {
        let registry = RuleRegistry::with_builtins();
        for name in [
            "required", "filled", "accepted", "boolean", "email", "url", "numeric", "min", "max",
            "between", "size", "in", "pattern", "alpha", "alpha_num", "alpha_dash", "json",
            "uuid", "ip", "ipv4", "ipv6", "date", "before", "after", "file", "image",
            "confirmed", "same", "different",
        ] {
            assert!(registry.has(name), "missing built-in `{name}`");
        }
        assert_eq!(registry.len(), 29);
    }

    #[test]
    fn builtins_can_be_overridden() {
        let mut registry = RuleRegistry::with_builtins();
        registry.register("email", always(true), "custom");
        assert!(registry.get("email").unwrap().check(&Value::from("nope"), &[]));
    }

    #[test]
    fn names_are_sorted() {
        let mut registry = RuleRegistry::new();
        registry.register("b", always(true), "");
        registry.register("a", always(true), "");
        assert_eq!(registry.names(), vec!["a", "b"]);
    }
}
