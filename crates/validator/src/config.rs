//! Configuration for [`Validator`](crate::Validator).

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::foundation::{ConfigError, Result};
use crate::i18n::DEFAULT_LOCALE;
use crate::message::CustomMessages;

/// Validator settings, typically read from a JSON file.
///
/// Every field is optional when deserializing:
///
/// ```json
/// {
///   "locale": "fr-CA",
///   "fallback_locale": "en",
///   "sanitize": true,
///   "messages": { "email.required": "We need your email." },
///   "locale_files": { "de": "locales/de.json" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Message locale.
    pub locale: String,
    /// Locale used when `locale` has no table.
    pub fallback_locale: String,
    /// Trim and HTML-escape input before validating.
    pub sanitize: bool,
    /// Custom message overrides, flat or nested.
    pub messages: CustomMessages,
    /// Extra locale tables to load, by locale.
    pub locale_files: IndexMap<String, PathBuf>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_owned(),
            fallback_locale: DEFAULT_LOCALE.to_owned(),
            sanitize: true,
            messages: CustomMessages::new(),
            locale_files: IndexMap::new(),
        }
    }
}

impl ValidatorConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| ConfigError::json(err.to_string()))
    }

    /// Reads and decodes a JSON configuration file.
    ///
    /// Relative `locale_files` paths are resolved against the directory of
    /// the configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|err| ConfigError::io(path, &err))?;
        let mut config = Self::from_json_str(&json)?;

        if let Some(base) = path.parent() {
            for file in config.locale_files.values_mut() {
                if file.is_relative() {
                    *file = base.join(&*file);
                }
            }
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(ValidatorConfig::from_json_str("{}").unwrap(), ValidatorConfig::default());
    }

    #[test]
    fn partial_config() {
        let config = ValidatorConfig::from_json_str(
            r#"{"locale": "es", "sanitize": false, "messages": {"age": {"min": "too young"}}}"#,
        )
        .unwrap();
        assert_eq!(config.locale, "es");
        assert_eq!(config.fallback_locale, "en");
        assert!(!config.sanitize);
        assert_eq!(config.messages.resolve("age", "min"), Some("too young"));
    }

    #[test]
    fn invalid_json_is_reported() {
        let err = ValidatorConfig::from_json_str(r#"{"sanitize": "yes"}"#).unwrap_err();
        assert_eq!(err.code(), "INPUT_JSON");
    }

    #[test]
    fn relative_locale_files_resolve_next_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("validator.json");
        std::fs::write(&path, r#"{"locale_files": {"de": "de.json", "it": "/abs/it.json"}}"#).unwrap();

        let config = ValidatorConfig::from_path(&path).unwrap();
        assert_eq!(config.locale_files["de"], dir.path().join("de.json"));
        assert_eq!(config.locale_files["it"], PathBuf::from("/abs/it.json"));
    }
}
