//! Pre-validation normalization.
//!
//! Strings are trimmed of ASCII whitespace (space, tab, newline, carriage
//! return, NUL and vertical tab) and the five HTML-significant characters are
//! escaped. Other Unicode whitespace such as NBSP is kept.
//! Lists are sanitized element-wise. Every other value passes through
//! untouched. Existing character references (`&amp;`, `&#039;`, `&#x27;`,
//! ...) are left as they are, which makes the pass idempotent.

use crate::foundation::Value;

/// Characters removed from both ends of a string.
pub(crate) const TRIMMED: &[char] = &[' ', '\t', '\n', '\r', '\0', '\x0B'];

/// Sanitizes a value recursively.
#[must_use]
pub fn sanitize_value(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(sanitize_str(s)),
        Value::List(items) => Value::List(items.iter().map(sanitize_value).collect()),
        other => other.clone(),
    }
}

/// Trims and HTML-escapes a string.
///
/// ```
/// use ruleset_validator::sanitize::sanitize_str;
///
/// assert_eq!(sanitize_str("  <b>Tom & \"Jerry\"</b> "), "&lt;b&gt;Tom &amp; &quot;Jerry&quot;&lt;/b&gt;");
/// assert_eq!(sanitize_str("&amp;"), "&amp;");
/// ```
#[must_use]
pub fn sanitize_str(input: &str) -> String {
    escape_html(input.trim_matches(TRIMMED))
}

/// Escapes `< > & " '` without re-escaping existing character references.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());

    for (i, c) in input.char_indices() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            '&' if !starts_with_reference(&input[i..]) => out.push_str("&amp;"),
            c => out.push(c),
        }
    }

    out
}

/// Returns `true` if `s` starts with `&name;`, `&#123;` or `&#x1F;`.
fn starts_with_reference(s: &str) -> bool {
    let Some(rest) = s.strip_prefix('&') else {
        return false;
    };
    let Some(end) = rest.find(';') else {
        return false;
    };
    let body = &rest[..end];

    if let Some(numeric) = body.strip_prefix('#') {
        return match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()),
            None => !numeric.is_empty() && numeric.chars().all(|c| c.is_ascii_digit()),
        };
    }

    let mut chars = body.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic()) && chars.all(|c| c.is_ascii_alphanumeric())
}
