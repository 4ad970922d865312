//! Upload validation through the validator.

use std::io::Write;

use pretty_assertions::assert_eq;
use ruleset_validator::prelude::*;
use tempfile::NamedTempFile;

const PNG: &[u8] = b"\x89PNG\r\n\x1A\n\0\0\0\rIHDR\0\0\0\x01\0\0\0\x01";
const PDF: &[u8] = b"%PDF-1.7\n%\xE2\xE3\xCF\xD3\n";

fn temp_file(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

fn upload(file: &NamedTempFile, declared_mime: &str) -> Value {
    Value::from(UploadedFile::new(file.path(), file.as_file().metadata().unwrap().len(), declared_mime))
}

fn one(field: &str, value: Value) -> Data {
    [(field.to_owned(), value)].into_iter().collect()
}

#[test]
fn avatar_accepts_png() {
    let png = temp_file(PNG);
    let result = Validator::new()
        .validate(&one("avatar", upload(&png, "image/png")), [("avatar", "required|image:1024")])
        .unwrap();
    assert!(result.is_valid());
    assert!(result.validated_value("avatar").and_then(Value::as_upload).is_some());
}

#[test]
fn renamed_pdf_is_not_an_image() {
    let pdf = temp_file(PDF);
    let result = Validator::new()
        .validate(&one("avatar", upload(&pdf, "image/png")), [("avatar", "image")])
        .unwrap();
    assert_eq!(result.field_errors("avatar"), ["The avatar field must be a valid image."]);
}

#[test]
fn file_allow_list_uses_sniffed_type() {
    let pdf = temp_file(PDF);
    let validator = Validator::new();
    let input = one("doc", upload(&pdf, "text/plain"));

    assert!(validator
        .validate(&input, [("doc", "file:,application/pdf")])
        .unwrap()
        .is_valid());
    assert!(!validator
        .validate(&input, [("doc", "file:,text/plain")])
        .unwrap()
        .is_valid());
}

#[test]
fn unknown_content_falls_back_to_declared_type() {
    let text = temp_file(b"plain notes\n");
    let result = Validator::new()
        .validate(&one("notes", upload(&text, "text/plain")), [("notes", "file:100,text/plain")])
        .unwrap();
    assert!(result.is_valid());
}

#[test]
fn oversized_upload_fails() {
    let png = temp_file(PNG);
    let result = Validator::new()
        .validate(&one("avatar", upload(&png, "image/png")), [("avatar", "image:10")])
        .unwrap();
    assert!(result.has_field_errors("avatar"));
}

#[test]
fn missing_upload_fails_required_and_file() {
    let missing = Value::from(UploadedFile::new("", 0, "").with_error(UploadedFile::NO_FILE));
    let validator = Validator::new();

    let required = validator
        .validate(&one("cv", missing), [("cv", "required|file")])
        .unwrap();
    assert_eq!(
        required.field_errors("cv"),
        ["The cv field is required.", "The cv field must be a valid file."]
    );
}

#[test]
fn deleted_temp_file_fails() {
    let png = temp_file(PNG);
    let value = upload(&png, "image/png");
    drop(png);

    let result = Validator::new()
        .validate(&one("avatar", value), [("avatar", "file")])
        .unwrap();
    assert!(!result.is_valid());
}

#[test]
fn uploads_from_json() {
    let png = temp_file(PNG);
    let body = serde_json::json!({
        "avatar": {
            "error": 0,
            "tmp_path": png.path(),
            "size": PNG.len(),
            "declared_mime": "image/png",
        }
    });
    let result = Validator::new()
        .validate_json(&body, &serde_json::json!({"avatar": "required|image:1024,image/png"}))
        .unwrap();
    assert!(result.is_valid());
}
