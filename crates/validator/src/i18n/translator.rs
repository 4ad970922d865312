use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, warn};

use super::{BUNDLED_LOCALES, DEFAULT_LOCALE, LocaleTable, interpolate};
use crate::foundation::Result;

/// Per-locale message tables with a fixed fallback locale.
///
/// Tables are loaded on first use and cached for the lifetime of the
/// translator. Asking for a locale without a table silently selects the
/// fallback locale.
///
/// # Examples
///
/// ```
/// use ruleset_validator::i18n::Translator;
///
/// let mut translator = Translator::new("fr");
/// assert_eq!(translator.translate("required", &[("field", "nom")]), "Le champ nom est requis.");
///
/// translator.set_locale("xx");
/// assert_eq!(translator.locale(), "en");
/// assert_eq!(translator.translate("no_such_key", &[("field", "nom")]), "no_such_key");
/// ```
#[derive(Debug, Clone)]
pub struct Translator {
    locale: String,
    fallback: String,
    tables: HashMap<String, LocaleTable>,
}

impl Translator {
    /// Creates a translator for `locale`, falling back to [`DEFAULT_LOCALE`].
    #[must_use]
    pub fn new(locale: &str) -> Self {
        Self::with_fallback(locale, DEFAULT_LOCALE)
    }

    /// Creates a translator for `locale` with an explicit fallback locale.
    #[must_use]
    pub fn with_fallback(locale: &str, fallback: &str) -> Self {
        let mut translator = Self {
            locale: normalize(fallback),
            fallback: normalize(fallback),
            tables: HashMap::new(),
        };
        translator.set_locale(locale);
        translator
    }

    /// Switches the active locale, loading its table if needed.
    ///
    /// Region tags resolve to their primary language (`fr-CA` uses `fr`)
    /// when no table exists for the full tag. Unknown locales select the
    /// fallback locale.
    pub fn set_locale(&mut self, locale: &str) -> &mut Self {
        let requested = normalize(locale);
        let primary = requested.split('-').next().unwrap_or_default().to_owned();

        for candidate in [requested.as_str(), primary.as_str()] {
            if !candidate.is_empty() && self.ensure_loaded(candidate) {
                self.locale = candidate.to_owned();
                return self;
            }
        }

        let fallback = self.fallback.clone();
        if !self.ensure_loaded(&fallback) {
            warn!(locale = %fallback, "fallback locale has no message table");
        }
        if requested != fallback {
            debug!(requested = %locale, fallback = %fallback, "locale not available, using fallback");
        }
        self.locale = fallback;
        self
    }

    /// The active locale.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// The fallback locale.
    #[must_use]
    pub fn fallback_locale(&self) -> &str {
        &self.fallback
    }

    /// Raw template for `key` in the active locale, without substitution.
    #[must_use]
    pub fn template(&self, key: &str) -> Option<&str> {
        self.tables.get(&self.locale).and_then(|table| table.get(key))
    }

    /// Returns `true` if the active locale has a template for `key`.
    #[must_use]
    pub fn has_translation(&self, key: &str) -> bool {
        self.template(key).is_some()
    }

    /// Translates `key` and substitutes `:placeholder` tokens.
    ///
    /// Missing keys translate to the key itself.
    #[must_use]
    pub fn translate<K, V>(&self, key: &str, replacements: &[(K, V)]) -> String
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        interpolate(self.template(key).unwrap_or(key), replacements)
    }

    /// Merges `table` into the table for `locale`.
    ///
    /// Bundled locales keep their built-in entries unless `table` overrides
    /// them; new locales become selectable through [`set_locale`](Self::set_locale).
    pub fn insert_table(&mut self, locale: &str, table: LocaleTable) -> &mut Self {
        let locale = normalize(locale);
        self.ensure_loaded(&locale);
        self.tables.entry(locale).or_default().merge(&table);
        self
    }

    /// Reads a JSON table from disk and merges it into `locale`.
    pub fn load_file(&mut self, locale: &str, path: impl AsRef<Path>) -> Result<&mut Self> {
        let table = LocaleTable::from_path(locale, path)?;
        Ok(self.insert_table(locale, table))
    }

    /// Locales that are bundled or have been inserted, sorted.
    #[must_use]
    pub fn supported_locales(&self) -> Vec<String> {
        let mut locales: Vec<String> = BUNDLED_LOCALES
            .iter()
            .map(|l| (*l).to_owned())
            .chain(self.tables.keys().cloned())
            .collect();
        locales.sort();
        locales.dedup();
        locales
    }

    /// Makes sure the table for `locale` is cached; `false` if none exists.
    fn ensure_loaded(&mut self, locale: &str) -> bool {
        if self.tables.contains_key(locale) {
            return true;
        }
        let Some(source) = bundled_source(locale) else {
            return false;
        };

        let table = LocaleTable::from_json_str(locale, source).unwrap_or_else(|err| {
            warn!(locale, error = %err, "bundled locale table is invalid");
            LocaleTable::new()
        });
        debug!(locale, entries = table.len(), "loaded locale table");
        self.tables.insert(locale.to_owned(), table);
        true
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE)
    }
}

fn bundled_source(locale: &str) -> Option<&'static str> {
    match locale {
        "en" => Some(include_str!("../../locales/en.json")),
        "fr" => Some(include_str!("../../locales/fr.json")),
        "es" => Some(include_str!("../../locales/es.json")),
        _ => None,
    }
}

fn normalize(locale: &str) -> String {
    locale.trim().to_ascii_lowercase().replace('_', "-")
}
