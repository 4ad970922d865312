//! String content rules
//!
//! Format checks over string values. Non-string values fail.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use crate::foundation::Value;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    ).unwrap()
});

static UUID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[1-5][0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
        .unwrap()
});

static ALPHA_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\p{L}\s]+$").unwrap());

static ALPHA_NUM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}\p{N}]+$").unwrap());

static ALPHA_DASH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}\p{N}_-]+$").unwrap());

/// URL schemes that are valid without a host.
const HOSTLESS_SCHEMES: &[&str] = &["mailto", "news", "file"];

fn matches(regex: &Regex, value: &Value) -> bool {
    value.as_str().is_some_and(|s| regex.is_match(s))
}

// ============================================================================
// FORMAT RULES
// ============================================================================

crate::rule! {
    /// The value must be an email address.
    pub Email = "email", "The :field field must be a valid email address.";
    check(value) { matches(&EMAIL_REGEX, value) }
}

crate::rule! {
    /// The value must be an absolute URL with a host, or a `mailto:`,
    /// `news:` or `file:` URL.
    pub Url = "url", "The :field field must be a valid URL.";
    check(value) {
        value
            .as_str()
            .and_then(|s| url::Url::parse(s).ok())
            .is_some_and(|url| url.has_host() || HOSTLESS_SCHEMES.contains(&url.scheme()))
    }
}

crate::rule! {
    /// The value must be an RFC 4122 UUID (versions 1 to 5), in any case.
    pub Uuid = "uuid", "The :field field must be a valid UUID.";
    check(value) { matches(&UUID_REGEX, value) }
}

crate::rule! {
    /// The value must be a syntactically valid JSON document.
    pub Json = "json", "The :field field must be a valid JSON string.";
    check(value) {
        value
            .as_str()
            .is_some_and(|s| serde_json::from_str::<serde::de::IgnoredAny>(s).is_ok())
    }
}

// ============================================================================
// CHARACTER CLASS RULES
// ============================================================================

crate::rule! {
    /// Letters and whitespace only. Accented letters count.
    pub Alpha = "alpha", "The :field field may only contain letters.";
    check(value) { matches(&ALPHA_REGEX, value) }
}

crate::rule! {
    /// Letters and digits only.
    pub AlphaNum = "alpha_num", "The :field field may only contain letters and numbers.";
    check(value) { matches(&ALPHA_NUM_REGEX, value) }
}

crate::rule! {
    /// Letters, digits, dashes and underscores only.
    pub AlphaDash = "alpha_dash", "The :field field may only contain letters, numbers, dashes and underscores.";
    check(value) { matches(&ALPHA_DASH_REGEX, value) }
}

// ============================================================================
// PATTERN RULE
// ============================================================================

crate::rule! {
    /// The value must match the regular expression in the first parameter.
    ///
    /// Delimited patterns such as `/^[a-z]+$/i` are accepted, with the
    /// flags `i`, `m`, `s`, `x` and `u`. A parameter that does not look
    /// delimited is used as a bare expression. A pattern that fails to
    /// compile fails the value.
    ///
    /// The rule-string grammar splits arguments on commas, so the
    /// parameters are joined back with `,` before compiling.
    pub Pattern = "pattern", "The :field field does not match the required format.";
    check(value, params) {
        let Some(input) = value.as_str() else {
            return false;
        };
        if params.is_empty() {
            return false;
        }
        compile_pattern(&params.join(",")).is_some_and(|regex| regex.is_match(input))
    }
}

/// Compiles a delimited or bare pattern.
fn compile_pattern(pattern: &str) -> Option<Regex> {
    let Some((body, flags)) = split_delimited(pattern) else {
        return Regex::new(pattern).ok();
    };

    let mut builder = RegexBuilder::new(body);
    for flag in flags.chars() {
        match flag {
            'i' => builder.case_insensitive(true),
            'm' => builder.multi_line(true),
            's' => builder.dot_matches_new_line(true),
            'x' => builder.ignore_whitespace(true),
            'u' => builder.unicode(true),
            _ => return None,
        };
    }
    builder.build().ok()
}

/// Splits `/body/flags` into body and flags.
///
/// Recognised delimiters are `/ # ~ ! @ % ;` and the `{}` pair. Patterns
/// starting with `[`, `(` or `^` are always bare.
fn split_delimited(pattern: &str) -> Option<(&str, &str)> {
    let open = pattern.chars().next()?;
    let close = match open {
        '/' | '#' | '~' | '!' | '@' | '%' | ';' => open,
        '{' => '}',
        _ => return None,
    };

    let rest = &pattern[open.len_utf8()..];
    let end = rest.rfind(close)?;
    let flags = &rest[end + close.len_utf8()..];
    flags
        .chars()
        .all(|c| c.is_ascii_alphabetic())
        .then_some((&rest[..end], flags))
}
