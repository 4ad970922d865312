//! Untyped input values.
//!
//! Submitted data arrives as a flat map of field name to [`Value`]. Values are
//! compared structurally and strictly: `Int(1)` is not identical to
//! `String("1")`, which is what the cross-field rules rely on.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Input record: field name to raw value, in submission order.
pub type Data = IndexMap<String, Value>;

static NUMERIC_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^\s*[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?\s*$").unwrap()
});

// ============================================================================
// VALUE
// ============================================================================

/// A raw, untyped input value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Explicit null, also used for a field missing from the input.
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer number.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// Text.
    String(String),
    /// Ordered list of values.
    List(Vec<Value>),
    /// Uploaded file descriptor.
    Upload(UploadedFile),
}

impl Value {
    /// Returns `true` for `null` and the empty string.
    ///
    /// Every rule except `required`, `filled` and the cross-field rules is
    /// skipped for absent values.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        match self {
            Self::Null => true,
            Self::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Returns the string slice when this is a `String`.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the list items when this is a `List`.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the upload descriptor when this is an `Upload`.
    #[must_use]
    pub fn as_upload(&self) -> Option<&UploadedFile> {
        match self {
            Self::Upload(file) => Some(file),
            _ => None,
        }
    }

    /// Numeric reading of the value.
    ///
    /// Numbers read as themselves; strings read as a number when they hold a
    /// decimal literal (surrounding whitespace and an exponent are allowed,
    /// `inf`/`nan` and hex are not).
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Float(f) => Some(*f),
            Self::String(s) if NUMERIC_REGEX.is_match(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Returns `true` if [`as_number`](Self::as_number) succeeds.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        self.as_number().is_some()
    }

    /// Short type name used in log fields.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Upload(_) => "upload",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => f.write_str(s),
            Self::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Self::Upload(file) => write!(f, "{}", file.tmp_path.display()),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<UploadedFile> for Value {
    fn from(value: UploadedFile) -> Self {
        Self::Upload(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

// ============================================================================
// UPLOADED FILE
// ============================================================================

/// Descriptor of an uploaded file, as handed over by the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Upload status code; [`UploadedFile::NO_ERROR`] when the upload succeeded.
    pub error: i64,
    /// Temporary location of the uploaded bytes.
    pub tmp_path: PathBuf,
    /// Size in bytes as reported by the client.
    pub size: u64,
    /// MIME type as declared by the client.
    #[serde(default)]
    pub declared_mime: String,
}

impl UploadedFile {
    /// Upload completed without error.
    pub const NO_ERROR: i64 = 0;
    /// No file was sent for the field.
    pub const NO_FILE: i64 = 4;

    /// Creates a successful upload descriptor.
    pub fn new(tmp_path: impl Into<PathBuf>, size: u64, declared_mime: impl Into<String>) -> Self {
        Self {
            error: Self::NO_ERROR,
            tmp_path: tmp_path.into(),
            size,
            declared_mime: declared_mime.into(),
        }
    }

    /// Sets the upload status code.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_error(mut self, error: i64) -> Self {
        self.error = error;
        self
    }

    /// Returns `true` when the upload succeeded and the temp file exists.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.error == Self::NO_ERROR && self.path().is_file()
    }

    /// Temporary path of the upload.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.tmp_path
    }
}
