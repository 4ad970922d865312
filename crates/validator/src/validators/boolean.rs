//! Boolean rule

use crate::foundation::Value;

crate::rule! {
    /// The value must read as a boolean: a `bool`, `0`/`1`, or one of
    /// `true`/`false`, `yes`/`no`, `on`/`off` in any case.
    pub Boolean = "boolean", "The :field field must be a boolean (true/false, 1/0, yes/no).";
    check(value) {
        match value {
            Value::Bool(_) => true,
            Value::String(s) => {
                let lower = s.trim().to_ascii_lowercase();
                matches!(
                    lower.as_str(),
                    "1" | "0" | "true" | "false" | "yes" | "no" | "on" | "off"
                )
            }
            other => matches!(other.as_number(), Some(n) if n == 0.0 || n == 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::Rule;
    use rstest::rstest;

    #[rstest]
    #[case(Value::Bool(false), true)]
    #[case(Value::Int(1), true)]
    #[case(Value::Int(0), true)]
    #[case(Value::Float(1.0), true)]
    #[case(Value::from("Off"), true)]
    #[case(Value::from(" yes "), true)]
    #[case(Value::from("maybe"), false)]
    #[case(Value::Int(2), false)]
    #[case(Value::List(vec![]), false)]
    fn boolean(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(Boolean.check(&value, &[]), expected);
    }
}
