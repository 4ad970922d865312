//! Failure message rendering.
//!
//! Template selection, first match wins:
//!
//! 1. custom message keyed `"field.rule"`
//! 2. custom message nested under `field` then `rule`
//! 3. custom message keyed by `rule` alone
//! 4. the active locale's template for `rule`
//! 5. the rule's default template
//!
//! The selected template is then interpolated exactly once with the
//! placeholders derived from the field name, rule name and parameters.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::i18n::{Translator, interpolate};
use crate::registry::RuleDefinition;

// ============================================================================
// CUSTOM MESSAGES
// ============================================================================

/// One entry of a custom message map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageEntry {
    /// A template, keyed by `"field.rule"` or by `rule`.
    Text(String),
    /// Templates for one field, keyed by rule.
    Nested(IndexMap<String, String>),
}

/// Caller-supplied message overrides.
///
/// Accepts both flat (`"email.required"`) and nested (`email → required`)
/// keys, as well as rule-wide overrides (`"required"`).
///
/// ```
/// use ruleset_validator::message::CustomMessages;
///
/// let messages = CustomMessages::new()
///     .with("email.required", "We need your email.")
///     .with_field("age", "between", "Age must be :min to :max.")
///     .with("required", ":field is mandatory.");
///
/// assert_eq!(messages.resolve("email", "required"), Some("We need your email."));
/// assert_eq!(messages.resolve("age", "between"), Some("Age must be :min to :max."));
/// assert_eq!(messages.resolve("name", "required"), Some(":field is mandatory."));
/// assert_eq!(messages.resolve("name", "min"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomMessages {
    entries: IndexMap<String, MessageEntry>,
}

impl CustomMessages {
    /// Creates an empty override map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a flat override keyed by `"field.rule"` or `rule`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.insert(key, template);
        self
    }

    /// Adds a nested override for `field` and `rule`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(
        mut self,
        field: impl Into<String>,
        rule: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        self.insert_nested(field, rule, template);
        self
    }

    /// Adds a flat override.
    pub fn insert(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.entries
            .insert(key.into(), MessageEntry::Text(template.into()));
    }

    /// Adds a nested override, turning a flat entry under `field` into a
    /// nested one if needed.
    pub fn insert_nested(
        &mut self,
        field: impl Into<String>,
        rule: impl Into<String>,
        template: impl Into<String>,
    ) {
        let entry = self
            .entries
            .entry(field.into())
            .or_insert_with(|| MessageEntry::Nested(IndexMap::new()));
        if let MessageEntry::Text(_) = entry {
            *entry = MessageEntry::Nested(IndexMap::new());
        }
        if let MessageEntry::Nested(rules) = entry {
            rules.insert(rule.into(), template.into());
        }
    }

    /// Selects the override for `field`/`rule`, if any.
    #[must_use]
    pub fn resolve(&self, field: &str, rule: &str) -> Option<&str> {
        if let Some(MessageEntry::Text(text)) = self.entries.get(&format!("{field}.{rule}")) {
            return Some(text);
        }
        if let Some(MessageEntry::Nested(rules)) = self.entries.get(field) {
            if let Some(text) = rules.get(rule) {
                return Some(text);
            }
        }
        match self.entries.get(rule) {
            Some(MessageEntry::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Returns `true` if no override is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of top-level entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<K, V> FromIterator<(K, V)> for CustomMessages
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut messages = Self::new();
        for (key, template) in iter {
            messages.insert(key, template);
        }
        messages
    }
}

// ============================================================================
// RENDERING
// ============================================================================

/// Placeholder values for one failure.
///
/// `:field` is always set. Rule-specific placeholders:
///
/// | rule | placeholders |
/// |------|--------------|
/// | `between` | `:min`, `:max` |
/// | `in` | `:allowed` (comma-joined) |
/// | `min`, `max`, `size` | same-named, from the first parameter |
/// | `same`, `different` | `:other` (the sibling field) |
/// | `confirmed` | `:other` (`<field>_confirmation`) |
///
/// Any rule with parameters also gets `:value` from the first one.
#[must_use]
pub fn placeholders(field: &str, rule: &str, params: &[String]) -> Vec<(&'static str, String)> {
    let mut out = vec![("field", field.to_owned())];
    let first = params.first().cloned();

    match rule {
        "between" => {
            out.extend(params.first().map(|p| ("min", p.clone())));
            out.extend(params.get(1).map(|p| ("max", p.clone())));
        }
        "in" => out.push(("allowed", params.join(", "))),
        "min" | "max" | "size" => {
            if let Some(first) = &first {
                out.push((placeholder_for(rule), first.clone()));
            }
        }
        "same" | "different" => out.extend(first.clone().map(|p| ("other", p))),
        "confirmed" => out.push(("other", crate::validator::confirmation_field(field))),
        _ => {}
    }

    out.extend(first.map(|p| ("value", p)));
    out
}

fn placeholder_for(rule: &str) -> &'static str {
    match rule {
        "min" => "min",
        "max" => "max",
        _ => "size",
    }
}

/// Renders the failure message for `field` failing `definition`.
#[must_use]
pub fn render(
    field: &str,
    definition: &RuleDefinition,
    params: &[String],
    messages: &CustomMessages,
    translator: &Translator,
) -> String {
    let rule = definition.name();
    let template = messages
        .resolve(field, rule)
        .or_else(|| translator.template(rule))
        .unwrap_or_else(|| definition.default_message());

    interpolate(template, &placeholders(field, rule, params))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::Value;
    use pretty_assertions::assert_eq;

    fn definition(name: &str) -> RuleDefinition {
        RuleDefinition::new(
            name.to_owned(),
            |_: &Value, _: &[String]| false,
            "Default :field message.",
        )
    }

    fn params(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_owned()).collect()
    }

    #[test]
    fn flat_key_beats_nested_and_rule_keys() {
        let messages = CustomMessages::new()
            .with("required", "rule")
            .with_field("email", "required", "nested")
            .with("email.required", "flat");
        assert_eq!(messages.resolve("email", "required"), Some("flat"));
    }

    #[test]
    fn nested_key_beats_rule_key() {
        let messages = CustomMessages::new()
            .with("required", "rule")
            .with_field("email", "required", "nested");
        assert_eq!(messages.resolve("email", "required"), Some("nested"));
        assert_eq!(messages.resolve("name", "required"), Some("rule"));
    }

    #[test]
    fn deserializes_mixed_shapes() {
        let messages: CustomMessages = serde_json::from_str(
            r#"{"email.required": "flat", "age": {"min": "nested"}, "required": "rule"}"#,
        )
        .unwrap();
        assert_eq!(messages.resolve("email", "required"), Some("flat"));
        assert_eq!(messages.resolve("age", "min"), Some("nested"));
        assert_eq!(messages.resolve("x", "required"), Some("rule"));
    }

    #[test]
    fn between_placeholders() {
        let out = placeholders("age", "between", &params(&["10", "20"]));
        assert_eq!(
            out,
            vec![
                ("field", "age".to_owned()),
                ("min", "10".to_owned()),
                ("max", "20".to_owned()),
                ("value", "10".to_owned()),
            ]
        );
    }

    #[test]
    fn in_joins_allowed_values() {
        let out = placeholders("status", "in", &params(&["active", "inactive"]));
        assert!(out.contains(&("allowed", "active, inactive".to_owned())));
    }

    #[test]
    fn confirmed_names_its_sibling() {
        let out = placeholders("password", "confirmed", &[]);
        assert!(out.contains(&("other", "password_confirmation".to_owned())));
    }

    #[test]
    fn render_uses_locale_then_default() {
        let translator = Translator::new("en");
        let messages = CustomMessages::new();

        let localized = render("age", &definition("min"), &params(&["18"]), &messages, &translator);
        assert_eq!(localized, "The age field must be at least 18 characters.");

        let fallback = render("age", &definition("even"), &[], &messages, &translator);
        assert_eq!(fallback, "Default age message.");
    }

    #[test]
    fn custom_messages_are_interpolated_once() {
        let translator = Translator::new("en");
        let messages = CustomMessages::new().with("age.between", ":field: :min-:max (:unknown)");
        let out = render(
            "age",
            &definition("between"),
            &params(&["10", "20"]),
            &messages,
            &translator,
        );
        assert_eq!(out, "age: 10-20 (:unknown)");
    }
}
