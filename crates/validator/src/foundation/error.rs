//! Configuration errors.
//!
//! These are programmer mistakes (a rule name that was never registered, a
//! rule string that cannot be parsed, a broken locale table). They abort a
//! call immediately and never appear inside a
//! [`ValidationResult`](crate::ValidationResult): data-driven failures are
//! collected there instead.

use std::path::PathBuf;

/// Error raised for caller configuration mistakes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A rule spec references a name the registry does not know.
    #[error("unknown validation rule `{name}`")]
    UnknownRule { name: String },

    /// A rule string could not be parsed.
    #[error("malformed rule string `{input}`: {reason}")]
    MalformedRuleString { input: String, reason: String },

    /// A locale table could not be decoded.
    #[error("invalid locale table for `{locale}`: {reason}")]
    InvalidLocaleTable { locale: String, reason: String },

    /// A configuration or locale file could not be read.
    #[error("failed to read `{}`: {reason}", path.display())]
    Io { path: PathBuf, reason: String },

    /// A JSON document does not have the expected shape.
    #[error("unsupported JSON input: {reason}")]
    UnsupportedJson { reason: String },
}

impl ConfigError {
    /// Broad error category for grouping in logs.
    #[must_use]
    pub fn category(&self) -> &str {
        match self {
            Self::UnknownRule { .. } => "configuration",
            Self::MalformedRuleString { .. } => "configuration",
            Self::InvalidLocaleTable { .. } => "locale",
            Self::Io { .. } => "input",
            Self::UnsupportedJson { .. } => "input",
        }
    }

    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::UnknownRule { .. } => "RULE_UNKNOWN",
            Self::MalformedRuleString { .. } => "RULE_MALFORMED",
            Self::InvalidLocaleTable { .. } => "LOCALE_INVALID",
            Self::Io { .. } => "INPUT_IO",
            Self::UnsupportedJson { .. } => "INPUT_JSON",
        }
    }

    pub(crate) fn unknown_rule(name: impl Into<String>) -> Self {
        Self::UnknownRule { name: name.into() }
    }

    pub(crate) fn malformed(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRuleString {
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            reason: err.to_string(),
        }
    }

    pub(crate) fn json(reason: impl Into<String>) -> Self {
        Self::UnsupportedJson {
            reason: reason.into(),
        }
    }
}

/// Result alias used across the crate.
pub type Result<T, E = ConfigError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_rule_display() {
        let err = ConfigError::unknown_rule("bogus_rule");
        assert_eq!(err.to_string(), "unknown validation rule `bogus_rule`");
        assert_eq!(err.code(), "RULE_UNKNOWN");
        assert_eq!(err.category(), "configuration");
    }

    #[test]
    fn malformed_display() {
        let err = ConfigError::malformed(":5", "empty rule name");
        assert_eq!(
            err.to_string(),
            "malformed rule string `:5`: empty rule name"
        );
        assert_eq!(err.code(), "RULE_MALFORMED");
    }

    #[test]
    fn io_carries_path() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = ConfigError::io("/tmp/nope.json", &io);
        assert!(err.to_string().contains("/tmp/nope.json"));
        assert_eq!(err.category(), "input");
    }
}
