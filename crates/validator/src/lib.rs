//! # ruleset-validator
//!
//! Validates flat input records (field name to raw value) against per-field
//! rule strings such as `"required|email"` or `"between:10,20"`, and reports
//! every violated rule with a localized message.
//!
//! ## Quick Start
//!
//! ```
//! use ruleset_validator::prelude::*;
//!
//! let data: Data = [
//!     ("name".to_owned(), Value::from("  Ada  ")),
//!     ("age".to_owned(), Value::from("9")),
//! ]
//! .into_iter()
//! .collect();
//!
//! let result = Validator::new()
//!     .validate(&data, [("name", "required|alpha"), ("age", "required|numeric|between:18,99")])
//!     .unwrap();
//!
//! assert!(!result.is_valid());
//! assert_eq!(result.validated_value("name"), Some(&Value::from("Ada")));
//! assert_eq!(result.field_errors("age"), ["The age field must be between 18 and 99."]);
//! ```
//!
//! ## Pipeline
//!
//! For each field, in rule order:
//!
//! 1. rule strings are parsed into a [`RuleSpec`]
//! 2. the value is sanitized (trimmed and HTML-escaped) unless disabled
//! 3. every rule runs; rules other than `required` and `filled` are skipped
//!    for absent values (`null` or `""`), and `confirmed`, `same` and
//!    `different` compare against a sibling field
//! 4. each failure renders a message from custom overrides, the active
//!    locale or the rule's default template
//!
//! A field without failures lands in [`ValidationResult::validated`].
//! Unknown rule names and malformed rule strings abort with a
//! [`ConfigError`]; failing data never does.
//!
//! ## Custom Rules
//!
//! Any `Fn(&Value, &[String]) -> bool` is a [`Rule`]. Use the [`rule!`] macro
//! for named rule types, or register a closure directly with
//! [`Validator::register_rule`]. Registering an existing name replaces it.

pub mod config;
pub mod foundation;
pub mod i18n;
pub mod json;
mod macros;
pub mod message;
pub mod parser;
pub mod prelude;
pub mod registry;
pub mod result;
pub mod sanitize;
pub mod validator;
pub mod validators;

pub use config::ValidatorConfig;
pub use foundation::{ConfigError, Data, NamedRule, Result, Rule, UploadedFile, Value};
pub use i18n::{LocaleTable, Translator};
pub use json::{data_from_json, rules_from_json};
pub use message::CustomMessages;
pub use parser::RuleSpec;
pub use registry::{RuleDefinition, RuleRegistry};
pub use result::ValidationResult;
pub use validator::{FieldRules, Validator};
