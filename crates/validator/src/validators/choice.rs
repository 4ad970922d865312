//! Membership rule

use crate::foundation::Value;

fn allowed(item: &Value, params: &[String]) -> bool {
    let rendered = match item {
        Value::String(s) => s.clone(),
        Value::Int(_) | Value::Float(_) => item.to_string(),
        _ => return false,
    };
    params.iter().any(|p| *p == rendered)
}

crate::rule! {
    /// The value must equal one of the parameters exactly.
    ///
    /// Numbers match by their decimal rendering, so `Int(1)` matches `"1"`
    /// while `Float(1.5)` only matches `"1.5"`. For a list every element
    /// must be allowed. Comparison is case-sensitive and untrimmed.
    pub In = "in", "The :field field must be one of the following: :allowed.";
    check(value, params) {
        match value {
            Value::List(items) => items.iter().all(|item| allowed(item, params)),
            other => allowed(other, params),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::Rule;
    use rstest::rstest;

    fn statuses() -> Vec<String> {
        vec!["active".into(), "inactive".into(), "1".into()]
    }

    #[rstest]
    #[case(Value::from("active"), true)]
    #[case(Value::from("Active"), false)]
    #[case(Value::from(" active"), false)]
    #[case(Value::from("deleted"), false)]
    #[case(Value::Int(1), true)]
    #[case(Value::Float(1.0), true)]
    #[case(Value::Bool(true), false)]
    #[case(Value::from(vec!["active", "1"]), true)]
    #[case(Value::from(vec!["active", "deleted"]), false)]
    fn membership(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(In.check(&value, &statuses()), expected);
    }

    #[test]
    fn empty_parameter_list_rejects_everything() {
        assert!(!In.check(&Value::from("active"), &[]));
    }
}
