//! Date rules
//!
//! Values are parsed without a format by trying RFC 3339, RFC 2822, a set
//! of common layouts and the keywords `now`, `today`, `tomorrow` and
//! `yesterday` (UTC). Offsets are normalised to UTC before comparison.
//!
//! `date` optionally takes a PHP-style format (`Y-m-d`, `d/m/Y H:i`, ...).
//! The value must then parse with that format and format back to the exact
//! same text, so `2024-02-30` and unpadded `1/5/2024` against `d/m/Y` fail.

use chrono::format::{Parsed, StrftimeItems};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::foundation::Value;

const DATETIME_LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_LAYOUTS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Parses a date or date-time written in any supported layout.
pub fn parse_datetime(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let today = Utc::now().date_naive();
    let relative = match input.to_ascii_lowercase().as_str() {
        "now" => return Some(Utc::now().naive_utc()),
        "today" => Some(today),
        "tomorrow" => today.succ_opt(),
        "yesterday" => today.pred_opt(),
        _ => None,
    };
    if let Some(day) = relative {
        return day.and_hms_opt(0, 0, 0);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
        return Some(dt.naive_utc());
    }

    DATETIME_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(input, layout).ok())
        .or_else(|| {
            DATE_LAYOUTS
                .iter()
                .find_map(|layout| NaiveDate::parse_from_str(input, layout).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Translates a PHP date format into a chrono format string.
///
/// Unsupported letters map to themselves; `\` escapes the next character.
pub fn php_format_to_strftime(format: &str) -> String {
    let mut out = String::with_capacity(format.len() * 2);
    let mut chars = format.chars();

    while let Some(c) = chars.next() {
        let spec = match c {
            'Y' => "%Y",
            'y' => "%y",
            'm' => "%m",
            'n' => "%-m",
            'd' => "%d",
            'j' => "%-d",
            'H' => "%H",
            'G' => "%-H",
            'h' => "%I",
            'g' => "%-I",
            'i' => "%M",
            's' => "%S",
            'A' => "%p",
            'a' => "%P",
            'D' => "%a",
            'l' => "%A",
            'M' => "%b",
            'F' => "%B",
            'U' => "%s",
            'u' => "%6f",
            'v' => "%3f",
            'O' => "%z",
            'P' => "%:z",
            '%' => "%%",
            '\\' => {
                if let Some(escaped) = chars.next() {
                    push_literal(&mut out, escaped);
                }
                continue;
            }
            other => {
                push_literal(&mut out, other);
                continue;
            }
        };
        out.push_str(spec);
    }
    out
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}

/// Returns `true` if `input` parses with the PHP-style `format` and
/// formats back to the same text.
pub fn matches_format(input: &str, format: &str) -> bool {
    let pattern = php_format_to_strftime(format);
    let mut parsed = Parsed::new();
    if chrono::format::parse(&mut parsed, input, StrftimeItems::new(&pattern)).is_err() {
        return false;
    }

    let naive = parsed
        .to_naive_datetime_with_offset(0)
        .ok()
        .or_else(|| parsed.to_naive_date().ok().and_then(|d| d.and_hms_opt(0, 0, 0)))
        .or_else(|| {
            parsed
                .to_naive_time()
                .ok()
                .map(|t| Utc::now().date_naive().and_time(t))
        });
    let Some(naive) = naive else {
        return false;
    };

    let offset = parsed
        .to_fixed_offset()
        .ok()
        .or_else(|| FixedOffset::east_opt(0));
    let Some(dt) = offset.and_then(|o| o.from_local_datetime(&naive).single()) else {
        return false;
    };

    dt.format(&pattern).to_string() == input
}

fn compare(
    value: &Value,
    params: &[String],
    cmp: fn(&NaiveDateTime, &NaiveDateTime) -> bool,
) -> bool {
    let reference = params.first().map(String::as_str).and_then(parse_datetime);
    let actual = value.as_str().and_then(parse_datetime);
    match (actual, reference) {
        (Some(actual), Some(reference)) => cmp(&actual, &reference),
        _ => false,
    }
}

crate::rule! {
    /// The value must be a date, in the format of the first parameter when
    /// one is given.
    pub Date = "date", "The :field field must be a valid date.";
    check(value, params) {
        let Some(input) = value.as_str() else {
            return false;
        };
        match params.first().filter(|f| !f.is_empty()) {
            Some(format) => matches_format(input, format),
            None => parse_datetime(input).is_some(),
        }
    }
}

crate::rule! {
    /// The value must be a date strictly before the first parameter.
    pub Before = "before", "The :field field must be a date before :value.";
    check(value, params) { compare(value, params, |a, b| a < b) }
}

crate::rule! {
    /// The value must be a date strictly after the first parameter.
    pub After = "after", "The :field field must be a date after :value.";
    check(value, params) { compare(value, params, |a, b| a > b) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::Rule;
    use rstest::rstest;

    fn p(s: &str) -> Vec<String> {
        vec![s.to_owned()]
    }

    #[rstest]
    #[case("2024-01-15", true)]
    #[case("2024-01-15 10:30:00", true)]
    #[case("2024-01-15T10:30:00Z", true)]
    #[case("2024-01-15T10:30:00+02:00", true)]
    #[case("Mon, 15 Jan 2024 10:30:00 +0000", true)]
    #[case("01/15/2024", true)]
    #[case("15.01.2024", true)]
    #[case("January 15, 2024", true)]
    #[case("today", true)]
    #[case("Tomorrow", true)]
    #[case("2024-02-30", false)]
    #[case("2024-13-01", false)]
    #[case("not a date", false)]
    fn date_without_format(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(Date.check(&Value::from(input), &[]), expected);
    }

    #[rstest]
    #[case("15/01/2024", "d/m/Y", true)]
    #[case("15/1/2024", "d/m/Y", false)]
    #[case("15/1/2024", "j/n/Y", true)]
    #[case("2024-01-15", "d/m/Y", false)]
    #[case("2024-01-15 09:05", "Y-m-d H:i", true)]
    #[case("09:05", "H:i", true)]
    #[case("2024-02-30", "Y-m-d", false)]
    #[case("day 15/01/2024", "\\d\\a\\y d/m/Y", true)]
    fn date_with_format(#[case] input: &str, #[case] format: &str, #[case] expected: bool) {
        assert_eq!(Date.check(&Value::from(input), &p(format)), expected);
    }

    #[test]
    fn format_translation() {
        assert_eq!(php_format_to_strftime("Y-m-d H:i:s"), "%Y-%m-%d %H:%M:%S");
        assert_eq!(php_format_to_strftime("\\Y 100%"), "Y 100%%");
    }

    #[test]
    fn non_strings_are_not_dates() {
        assert!(!Date.check(&Value::Int(20_240_115), &[]));
    }

    #[rstest]
    #[case("2024-01-01", "2024-06-01", true, false)]
    #[case("2024-06-01", "2024-01-01", false, true)]
    #[case("2024-06-01", "2024-06-01", false, false)]
    #[case("2024-06-01 00:00:01", "2024-06-01", false, true)]
    #[case("garbage", "2024-06-01", false, false)]
    #[case("2024-06-01", "garbage", false, false)]
    fn before_and_after(
        #[case] input: &str,
        #[case] reference: &str,
        #[case] before: bool,
        #[case] after: bool,
    ) {
        let value = Value::from(input);
        assert_eq!(Before.check(&value, &p(reference)), before);
        assert_eq!(After.check(&value, &p(reference)), after);
    }

    #[test]
    fn relative_keywords_compare() {
        assert!(Before.check(&Value::from("yesterday"), &p("today")));
        assert!(After.check(&Value::from("tomorrow"), &p("now")));
    }

    #[test]
    fn missing_reference_fails() {
        assert!(!Before.check(&Value::from("2024-01-01"), &[]));
    }
}
