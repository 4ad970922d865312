//! The validation orchestrator.
//!
//! [`Validator`] owns a rule registry, a translator and the custom message
//! overrides. It is configured once and then used through `&self`, so a
//! configured instance can be shared across threads.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::ValidatorConfig;
use crate::foundation::{Data, NamedRule, Result, Rule, Value};
use crate::i18n::Translator;
use crate::message::{self, CustomMessages};
use crate::parser::RuleSpec;
use crate::registry::RuleRegistry;
use crate::result::ValidationResult;
use crate::sanitize::sanitize_value;
use crate::validators::cross_field::is_cross_field;
use crate::validators::{Confirmed, Different, Filled, Required};

// ============================================================================
// FIELD RULES
// ============================================================================

/// Rules for one field: a rule string or a prepared [`RuleSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldRules {
    /// Rule string such as `"required|min:3"`, parsed on every run.
    Text(String),
    /// Already parsed rules.
    Spec(RuleSpec),
}

impl FieldRules {
    /// Returns the parsed form, parsing text rules.
    pub fn to_spec(&self) -> Result<Cow<'_, RuleSpec>> {
        match self {
            Self::Text(text) => RuleSpec::parse(text).map(Cow::Owned),
            Self::Spec(spec) => Ok(Cow::Borrowed(spec)),
        }
    }
}

impl From<&str> for FieldRules {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for FieldRules {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<RuleSpec> for FieldRules {
    fn from(spec: RuleSpec) -> Self {
        Self::Spec(spec)
    }
}

impl From<&FieldRules> for FieldRules {
    fn from(rules: &FieldRules) -> Self {
        rules.clone()
    }
}

/// Value seen by rules for a field missing from the input.
static ABSENT: Value = Value::Null;

/// Name of the field `confirmed` compares against.
#[must_use]
pub fn confirmation_field(field: &str) -> String {
    format!("{field}_confirmation")
}

// ============================================================================
// VALIDATOR
// ============================================================================

/// Validates flat input records against per-field rule sets.
///
/// # Examples
///
/// ```
/// use ruleset_validator::{Data, Validator, Value};
///
/// let data: Data = [("age".to_owned(), Value::from("25"))].into_iter().collect();
///
/// let result = Validator::new()
///     .with_locale("fr")
///     .validate(&data, [("age", "numeric|between:10,20")])
///     .unwrap();
///
/// assert_eq!(
///     result.first_error("age"),
///     Some("Le champ age doit être entre 10 et 20.")
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    registry: RuleRegistry,
    translator: Translator,
    messages: CustomMessages,
    sanitize: bool,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Creates a validator with every built-in rule, the default locale
    /// and sanitization enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: RuleRegistry::with_builtins(),
            translator: Translator::default(),
            messages: CustomMessages::new(),
            sanitize: true,
        }
    }

    /// Creates a validator from a [`ValidatorConfig`], loading any extra
    /// locale files it names.
    pub fn from_config(config: ValidatorConfig) -> Result<Self> {
        let mut translator = Translator::with_fallback(&config.locale, &config.fallback_locale);
        for (locale, path) in &config.locale_files {
            translator.load_file(locale, path)?;
        }
        // Extra files may have added the requested locale.
        translator.set_locale(&config.locale);

        debug!(
            locale = translator.locale(),
            sanitize = config.sanitize,
            custom_messages = config.messages.len(),
            "validator configured"
        );

        Ok(Self {
            registry: RuleRegistry::with_builtins(),
            translator,
            messages: config.messages,
            sanitize: config.sanitize,
        })
    }

    // ------------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------------

    /// Registers a rule, replacing any rule of the same name.
    pub fn register_rule(
        &mut self,
        name: impl Into<String>,
        rule: impl Rule + 'static,
        default_message: impl Into<Cow<'static, str>>,
    ) -> &mut Self {
        self.registry.register(name, rule, default_message);
        self
    }

    /// Registers a [`NamedRule`] under its own name.
    pub fn register_named<R: NamedRule + 'static>(&mut self, rule: R) -> &mut Self {
        self.registry.register_named(rule);
        self
    }

    /// Replaces the custom message overrides.
    pub fn set_custom_messages(&mut self, messages: CustomMessages) -> &mut Self {
        self.messages = messages;
        self
    }

    /// Switches the message locale. Unknown locales select the fallback.
    pub fn set_locale(&mut self, locale: &str) -> &mut Self {
        self.translator.set_locale(locale);
        self
    }

    /// Enables or disables input sanitization.
    pub fn set_sanitize(&mut self, sanitize: bool) -> &mut Self {
        self.sanitize = sanitize;
        self
    }

    /// Builder form of [`register_rule`](Self::register_rule).
    #[must_use = "builder methods must be chained or built"]
    pub fn with_rule(
        mut self,
        name: impl Into<String>,
        rule: impl Rule + 'static,
        default_message: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.register_rule(name, rule, default_message);
        self
    }

    /// Builder form of [`set_custom_messages`](Self::set_custom_messages).
    #[must_use = "builder methods must be chained or built"]
    pub fn with_custom_messages(mut self, messages: CustomMessages) -> Self {
        self.set_custom_messages(messages);
        self
    }

    /// Builder form of [`set_locale`](Self::set_locale).
    #[must_use = "builder methods must be chained or built"]
    pub fn with_locale(mut self, locale: &str) -> Self {
        self.set_locale(locale);
        self
    }

    /// Builder form of [`set_sanitize`](Self::set_sanitize).
    #[must_use = "builder methods must be chained or built"]
    pub fn with_sanitize(mut self, sanitize: bool) -> Self {
        self.set_sanitize(sanitize);
        self
    }

    /// The rule registry.
    #[must_use]
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// The translator.
    #[must_use]
    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    /// Mutable access to the translator, for loading extra tables.
    pub fn translator_mut(&mut self) -> &mut Translator {
        &mut self.translator
    }

    /// The active locale.
    #[must_use]
    pub fn locale(&self) -> &str {
        self.translator.locale()
    }

    /// The custom message overrides.
    #[must_use]
    pub fn custom_messages(&self) -> &CustomMessages {
        &self.messages
    }

    /// Returns `true` if values are sanitized before validation.
    #[must_use]
    pub fn sanitizes(&self) -> bool {
        self.sanitize
    }

    // ------------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------------

    /// Validates `data` against `rules`.
    ///
    /// Fields are processed in the order `rules` yields them; fields of
    /// `data` without rules are ignored. Every failing rule adds a message,
    /// and a field reaches the validated data only when none failed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`](crate::ConfigError) for a malformed rule
    /// string or a rule name that is not registered. Data that fails its
    /// rules is never an error.
    pub fn validate<I, K, R>(&self, data: &Data, rules: I) -> Result<ValidationResult>
    where
        I: IntoIterator<Item = (K, R)>,
        K: AsRef<str>,
        R: Into<FieldRules>,
    {
        let mut result = ValidationResult::new();
        let mut fields = 0usize;

        for (field, field_rules) in rules {
            let field = field.as_ref();
            let field_rules = field_rules.into();
            let spec = field_rules.to_spec()?;
            fields += 1;

            let value = self.prepare(data.get(field).unwrap_or(&ABSENT));

            for (name, params) in spec.iter() {
                let definition = self.registry.get(name)?;

                let passed = if is_cross_field(name) {
                    self.sibling_matches(name, field, &value, params, data)
                } else if value.is_absent() && name != Required::NAME && name != Filled::NAME {
                    continue;
                } else {
                    definition.check(&value, params)
                };

                if !passed {
                    trace!(field, rule = name, value_kind = value.kind(), "rule failed");
                    let message =
                        message::render(field, definition, params, &self.messages, &self.translator);
                    result.add_error(field, message);
                }
            }

            // A field listed more than once keeps every earlier error.
            if result.has_field_errors(field) {
                result.remove_validated(field);
            } else {
                result.insert_validated(field, value.into_owned());
            }
        }

        debug!(
            fields,
            errors = result.error_count(),
            locale = self.translator.locale(),
            "validation finished"
        );
        Ok(result)
    }

    /// Applies sanitization when enabled; `null` is never touched.
    fn prepare<'a>(&self, value: &'a Value) -> Cow<'a, Value> {
        if self.sanitize && !matches!(value, Value::Null) {
            Cow::Owned(sanitize_value(value))
        } else {
            Cow::Borrowed(value)
        }
    }

    /// Evaluates `confirmed`, `same` and `different` against the sibling
    /// field, prepared the same way as the field itself.
    ///
    /// A sibling that is missing or `null` does not exist: `confirmed` and
    /// `same` fail, `different` passes.
    fn sibling_matches(
        &self,
        rule: &str,
        field: &str,
        value: &Value,
        params: &[String],
        data: &Data,
    ) -> bool {
        let sibling_name = if rule == Confirmed::NAME {
            Some(confirmation_field(field))
        } else {
            params.first().cloned()
        };

        let sibling = sibling_name
            .as_deref()
            .and_then(|name| data.get(name))
            .filter(|sibling| !matches!(sibling, Value::Null))
            .map(|sibling| self.prepare(sibling));

        if rule == Different::NAME {
            sibling.is_none_or(|sibling| *sibling != *value)
        } else {
            sibling.is_some_and(|sibling| *sibling == *value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::ConfigError;
    use pretty_assertions::assert_eq;

    fn data(pairs: &[(&str, Value)]) -> Data {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.clone()))
            .collect()
    }

    #[test]
    fn required_on_empty_string_fails() {
        let result = Validator::new()
            .validate(&data(&[("name", Value::from(""))]), [("name", "required")])
            .unwrap();
        assert!(!result.is_valid());
        assert_eq!(result.field_errors("name"), ["The name field is required."]);
        assert!(result.validated().is_empty());
    }

    #[test]
    fn confirmed_matches_sibling() {
        let input = data(&[
            ("password", Value::from("secret")),
            ("password_confirmation", Value::from("secret")),
        ]);
        let result = Validator::new()
            .validate(&input, [("password", "confirmed")])
            .unwrap();
        assert!(result.is_valid());
        assert_eq!(result.validated_value("password"), Some(&Value::from("secret")));
    }

    #[test]
    fn between_reports_bounds() {
        let result = Validator::new()
            .validate(&data(&[("age", Value::from("25"))]), [("age", "between:10,20")])
            .unwrap();
        let message = result.first_error("age").unwrap();
        assert!(message.contains("10") && message.contains("20"), "{message}");
    }

    #[test]
    fn absent_optional_field_passes() {
        let result = Validator::new()
            .validate(&Data::new(), [("phone", "min:10")])
            .unwrap();
        assert!(result.is_valid());
        assert_eq!(result.validated_value("phone"), Some(&Value::Null));
    }

    #[test]
    fn unknown_rule_aborts() {
        let err = Validator::new()
            .validate(&data(&[("x", Value::Int(1))]), [("x", "bogus_rule")])
            .unwrap_err();
        assert_eq!(err, ConfigError::UnknownRule { name: "bogus_rule".into() });
    }

    #[test]
    fn unknown_rule_aborts_even_after_failures() {
        let err = Validator::new()
            .validate(
                &data(&[("a", Value::from("")), ("b", Value::Int(1))]),
                [("a", "required"), ("b", "bogus_rule")],
            )
            .unwrap_err();
        assert_eq!(err.code(), "RULE_UNKNOWN");
    }

    #[test]
    fn malformed_rule_string_aborts() {
        let err = Validator::new()
            .validate(&Data::new(), [("a", "required|:5")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::MalformedRuleString { .. }));
    }

    #[test]
    fn failures_accumulate_in_rule_order() {
        let result = Validator::new()
            .validate(&data(&[("code", Value::from("a!"))]), [("code", "min:3|alpha_num|numeric")])
            .unwrap();
        assert_eq!(
            result.field_errors("code"),
            [
                "The code field must be at least 3 characters.",
                "The code field may only contain letters and numbers.",
                "The code field must be a number.",
            ]
        );
    }

    #[test]
    fn filled_fails_on_empty_but_not_on_missing() {
        let validator = Validator::new();
        let empty = validator
            .validate(&data(&[("nick", Value::from(""))]), [("nick", "filled")])
            .unwrap();
        assert!(empty.has_field_errors("nick"));

        let missing = validator.validate(&Data::new(), [("nick", "filled")]).unwrap();
        assert!(missing.is_valid());
    }

    #[test]
    fn sanitized_value_is_validated_and_returned() {
        let result = Validator::new()
            .validate(&data(&[("bio", Value::from("  <b>hi</b>  "))]), [("bio", "max:30")])
            .unwrap();
        assert_eq!(
            result.validated_value("bio"),
            Some(&Value::from("&lt;b&gt;hi&lt;/b&gt;"))
        );
    }

    #[test]
    fn whitespace_only_fails_required_with_sanitization_off() {
        let result = Validator::new()
            .with_sanitize(false)
            .validate(&data(&[("name", Value::from("   "))]), [("name", "required")])
            .unwrap();
        assert!(result.has_field_errors("name"));
    }

    #[test]
    fn same_and_different() {
        let input = data(&[
            ("a", Value::from("x")),
            ("b", Value::from("x")),
            ("c", Value::from("y")),
        ]);
        let result = Validator::new()
            .validate(&input, [("a", "same:b|different:c"), ("b", "different:a"), ("c", "same:missing")])
            .unwrap();
        assert!(!result.has_field_errors("a"));
        assert_eq!(result.field_errors("b"), ["The b field must be different from a."]);
        assert_eq!(result.field_errors("c"), ["The c field must match missing."]);
    }

    #[test]
    fn cross_field_rules_are_strict() {
        let input = data(&[("pin", Value::Int(1234)), ("pin_confirmation", Value::from("1234"))]);
        let result = Validator::new().validate(&input, [("pin", "confirmed")]).unwrap();
        assert_eq!(result.field_errors("pin"), ["The pin field confirmation does not match."]);
    }

    #[test]
    fn confirmed_runs_on_absent_value() {
        let input = data(&[("password_confirmation", Value::from("secret"))]);
        let result = Validator::new().validate(&input, [("password", "confirmed")]).unwrap();
        assert!(result.has_field_errors("password"));
    }

    #[test]
    fn custom_rules_participate() {
        let validator = Validator::new().with_rule(
            "even",
            |value: &Value, _: &[String]| value.as_number().is_some_and(|n| n % 2.0 == 0.0),
            "The :field field must be even.",
        );
        let result = validator
            .validate(&data(&[("n", Value::Int(3))]), [("n", "even")])
            .unwrap();
        assert_eq!(result.first_error("n"), Some("The n field must be even."));
    }

    #[test]
    fn prepared_specs_are_accepted() {
        let spec = RuleSpec::new().with("pattern", ["/^a|b$/"]);
        let result = Validator::new()
            .validate(&data(&[("v", Value::from("b"))]), [("v", spec)])
            .unwrap();
        assert!(result.is_valid());
    }

    #[test]
    fn fields_without_rules_are_dropped() {
        let input = data(&[("name", Value::from("Ada")), ("extra", Value::from("x"))]);
        let result = Validator::new().validate(&input, [("name", "required")]).unwrap();
        assert_eq!(result.validated().keys().collect::<Vec<_>>(), ["name"]);
    }

    #[test]
    fn locale_switch_changes_messages() {
        let mut validator = Validator::new();
        let input = data(&[("email", Value::from("invalid"))]);

        let en = validator.validate(&input, [("email", "email")]).unwrap();
        validator.set_locale("fr");
        let fr = validator.validate(&input, [("email", "email")]).unwrap();

        assert_eq!(en.error_count(), 1);
        assert_eq!(fr.error_count(), 1);
        assert_ne!(en.first_error("email"), fr.first_error("email"));
        assert_eq!(validator.locale(), "fr");
    }
}
