//! Validating decoded JSON request bodies.

use pretty_assertions::assert_eq;
use ruleset_validator::prelude::*;
use ruleset_validator::{data_from_json, rules_from_json};
use serde_json::json;

#[test]
fn signup_body() {
    let body = json!({
        "email": "  ada@example.com ",
        "age": "17",
        "interests": ["rust", "chess"],
        "newsletter": "maybe",
        "ignored": {"error": 4, "tmp_path": "", "size": 0},
    });
    let rules = json!({
        "email": "required|email",
        "age": {"required": null, "numeric": [], "between": [18, 130]},
        "interests": ["required", "in:rust,go,chess"],
        "newsletter": "boolean",
    });

    let result = Validator::new().validate_json(&body, &rules).unwrap();

    assert_eq!(result.errors().keys().collect::<Vec<_>>(), ["age", "newsletter"]);
    assert_eq!(result.first_error("age"), Some("The age field must be between 18 and 130."));
    assert_eq!(
        serde_json::to_value(result.validated()).unwrap(),
        json!({"email": "ada@example.com", "interests": ["rust", "chess"]})
    );
}

#[test]
fn result_serializes_errors_and_validated_data() {
    let result = Validator::new()
        .validate_json(&json!({"name": ""}), &json!({"name": "required", "nick": "alpha"}))
        .unwrap();

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({
            "errors": {"name": ["The name field is required."]},
            "validated": {"nick": null},
        })
    );
}

#[test]
fn field_order_follows_the_rules_document() {
    let rules = rules_from_json(&json!({"z": "required", "a": "required", "m": "required"})).unwrap();
    let result = Validator::new().validate(&Data::new(), &rules).unwrap();
    assert_eq!(result.errors().keys().collect::<Vec<_>>(), ["z", "a", "m"]);
}

#[test]
fn pattern_with_alternation_in_array_form() {
    let validator = Validator::new();
    let rules = json!({"color": ["required", "pattern:/^(red|green|blue)$/i"]});

    assert!(validator.validate_json(&json!({"color": "Green"}), &rules).unwrap().is_valid());
    assert!(!validator.validate_json(&json!({"color": "pink"}), &rules).unwrap().is_valid());
}

#[test]
fn nested_records_are_rejected() {
    let err = data_from_json(&json!({"address": {"street": "Main"}})).unwrap_err();
    assert_eq!(err.code(), "INPUT_JSON");
    assert_eq!(err.category(), "input");
}

#[test]
fn unknown_rule_in_json_rules() {
    let err = Validator::new()
        .validate_json(&json!({"a": 1}), &json!({"a": {"nonsense": []}}))
        .unwrap_err();
    assert_eq!(err.code(), "RULE_UNKNOWN");
}

#[test]
fn numbers_keep_their_type() {
    let data = data_from_json(&json!({"n": 3, "f": 1.5, "b": true})).unwrap();
    assert_eq!(data["n"], Value::Int(3));
    assert_eq!(data["f"], Value::Float(1.5));
    assert_eq!(data["b"], Value::Bool(true));
}
