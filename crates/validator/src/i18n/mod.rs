//! Localized message templates.
//!
//! A [`LocaleTable`] maps message keys (rule names) to templates containing
//! `:placeholder` tokens. The [`Translator`] owns one table per loaded locale
//! and falls back to a fixed default locale when asked for one it does not
//! know. [`interpolate`] is the single placeholder-substitution step used by
//! both the translator and the validator's message rendering.

mod table;
mod translator;

pub use table::LocaleTable;
pub use translator::Translator;

/// Locale used when a requested locale has no table.
pub const DEFAULT_LOCALE: &str = "en";

/// Locales whose tables ship with the crate.
pub const BUNDLED_LOCALES: &[&str] = &["en", "fr", "es"];

/// Replaces `:name` tokens with values from `replacements`.
///
/// A token is a `:` followed by ASCII letters, digits or `_`; the longest
/// such run is looked up, so `:minimum` never matches a `min` replacement.
/// Tokens without a replacement are left verbatim.
///
/// ```
/// use ruleset_validator::i18n::interpolate;
///
/// let out = interpolate("The :field must be :min+ (:unknown)", &[("field", "age"), ("min", "18")]);
/// assert_eq!(out, "The age must be 18+ (:unknown)");
/// ```
#[must_use]
pub fn interpolate<K, V>(template: &str, replacements: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find(':') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let len = after
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(after.len());
        let token = &after[..len];

        match replacements.iter().find(|(k, _)| !token.is_empty() && k.as_ref() == token) {
            Some((_, value)) => out.push_str(value.as_ref()),
            None => {
                out.push(':');
                out.push_str(token);
            }
        }
        rest = &after[len..];
    }

    out.push_str(rest);
    out
}
