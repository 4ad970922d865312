//! JSON entry points.
//!
//! Lets API handlers validate a decoded request body directly:
//!
//! ```
//! use ruleset_validator::Validator;
//! use serde_json::json;
//!
//! let result = Validator::new()
//!     .validate_json(
//!         &json!({"email": "ada@example.com", "tags": ["a", "b"]}),
//!         &json!({"email": "required|email", "tags": ["required", "in:a,b,c"]}),
//!     )
//!     .unwrap();
//! assert!(result.is_valid());
//! ```
//!
//! Objects inside data are only accepted when they describe an upload
//! (`error`, `tmp_path`, `size` and optionally `declared_mime`); nested
//! records are not supported.

use indexmap::IndexMap;
use serde_json::{Map, Number, Value as Json};

use crate::foundation::{ConfigError, Data, Result, UploadedFile, Value};
use crate::parser::RuleSpec;
use crate::result::ValidationResult;
use crate::validator::{FieldRules, Validator};

// ============================================================================
// VALUES
// ============================================================================

impl TryFrom<Json> for Value {
    type Error = ConfigError;

    fn try_from(json: Json) -> Result<Self> {
        Ok(match json {
            Json::Null => Self::Null,
            Json::Bool(b) => Self::Bool(b),
            Json::Number(n) => number(&n),
            Json::String(s) => Self::String(s),
            Json::Array(items) => Self::List(
                items
                    .into_iter()
                    .map(Self::try_from)
                    .collect::<Result<_>>()?,
            ),
            Json::Object(object) => Self::Upload(upload(object)?),
        })
    }
}

impl From<Value> for Json {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Int(n) => Self::from(n),
            Value::Float(f) => Number::from_f64(f).map_or(Self::Null, Self::Number),
            Value::String(s) => Self::String(s),
            Value::List(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Upload(file) => serde_json::to_value(file).unwrap_or(Self::Null),
        }
    }
}

fn number(n: &Number) -> Value {
    match n.as_i64() {
        Some(i) => Value::Int(i),
        None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
    }
}

fn upload(object: Map<String, Json>) -> Result<UploadedFile> {
    serde_json::from_value(Json::Object(object)).map_err(|err| {
        ConfigError::json(format!("objects are only supported as upload descriptors: {err}"))
    })
}

// ============================================================================
// RECORDS AND RULES
// ============================================================================

/// Converts a JSON object into input data.
///
/// # Errors
///
/// [`ConfigError::UnsupportedJson`] if `json` is not an object or holds a
/// nested object that is not an upload descriptor.
pub fn data_from_json(json: &Json) -> Result<Data> {
    let Json::Object(object) = json else {
        return Err(ConfigError::json("input data must be a JSON object"));
    };
    object
        .iter()
        .map(|(field, value)| -> Result<(String, Value)> {
            Ok((field.clone(), Value::try_from(value.clone())?))
        })
        .collect()
}

/// Converts a JSON object of per-field rules.
///
/// Each field accepts one of:
///
/// - a rule string: `"required|min:3"`
/// - an array of single rules: `["required", "pattern:/^(a|b)$/"]`
/// - an object of rule to parameters: `{"between": [1, 5], "required": []}`
///
/// Parameters in the object form may be strings or numbers, and a lone
/// scalar stands for a one-element list.
pub fn rules_from_json(json: &Json) -> Result<IndexMap<String, FieldRules>> {
    let Json::Object(object) = json else {
        return Err(ConfigError::json("rules must be a JSON object"));
    };
    object
        .iter()
        .map(|(field, rules)| -> Result<(String, FieldRules)> {
            Ok((field.clone(), field_rules(field, rules)?))
        })
        .collect()
}

fn field_rules(field: &str, rules: &Json) -> Result<FieldRules> {
    match rules {
        Json::String(text) => Ok(FieldRules::Text(text.clone())),
        Json::Array(items) => {
            let mut spec = RuleSpec::new();
            for item in items {
                let Json::String(segment) = item else {
                    return Err(ConfigError::json(format!(
                        "rules for `{field}` must be strings, found {item}"
                    )));
                };
                spec.push_segment(segment)?;
            }
            Ok(FieldRules::Spec(spec))
        }
        Json::Object(object) => {
            let mut spec = RuleSpec::new();
            for (name, params) in object {
                spec.insert(name.as_str(), rule_params(field, name, params)?);
            }
            Ok(FieldRules::Spec(spec))
        }
        other => Err(ConfigError::json(format!(
            "rules for `{field}` must be a string, array or object, found {other}"
        ))),
    }
}

fn rule_params(field: &str, rule: &str, params: &Json) -> Result<Vec<String>> {
    let scalar = |param: &Json| match param {
        Json::String(s) => Ok(s.clone()),
        Json::Number(n) => Ok(n.to_string()),
        Json::Bool(b) => Ok(b.to_string()),
        other => Err(ConfigError::json(format!(
            "parameter of `{field}.{rule}` must be a scalar, found {other}"
        ))),
    };

    match params {
        Json::Null => Ok(Vec::new()),
        Json::Array(items) => items.iter().map(scalar).collect(),
        other => Ok(vec![scalar(other)?]),
    }
}

impl Validator {
    /// Validates a JSON object against JSON rules.
    ///
    /// See [`data_from_json`] and [`rules_from_json`] for the accepted
    /// shapes.
    pub fn validate_json(&self, data: &Json, rules: &Json) -> Result<ValidationResult> {
        let data = data_from_json(data)?;
        let rules = rules_from_json(rules)?;
        self.validate(&data, &rules)
    }
}
