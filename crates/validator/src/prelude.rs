//! Prelude module for convenient imports.
//!
//! ```
//! use ruleset_validator::prelude::*;
//!
//! let validator = Validator::new().with_locale("es");
//! assert_eq!(validator.locale(), "es");
//! ```

// ============================================================================
// FOUNDATION: values, rule traits, errors
// ============================================================================

pub use crate::foundation::{ConfigError, Data, NamedRule, Rule, UploadedFile, Value};

// ============================================================================
// ENGINE: validator, rules, results, messages
// ============================================================================

pub use crate::config::ValidatorConfig;
pub use crate::message::CustomMessages;
pub use crate::parser::RuleSpec;
pub use crate::registry::RuleRegistry;
pub use crate::result::ValidationResult;
pub use crate::validator::{FieldRules, Validator};

// ============================================================================
// MACROS
// ============================================================================

pub use crate::{rule, rule_spec};
