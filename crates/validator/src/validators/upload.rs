//! Upload rules
//!
//! Both rules take `max_bytes` as the first parameter (empty or non-numeric
//! means no limit) and an optional MIME allow-list as the rest:
//! `file:2048,application/pdf,text/plain`. Allow-list entries may end in
//! `/*` to accept a whole type family (`image/*`).
//!
//! The MIME type is sniffed from the file's leading bytes. When no known
//! signature matches, the client-declared type is used instead.

use std::fs;
use std::io::Read;
use std::path::Path;

use super::param_f64;
use crate::foundation::{UploadedFile, Value};

/// Number of leading bytes inspected when sniffing.
const SNIFF_LEN: u64 = 512;

/// Allow-list used by `image` when none is given.
pub const DEFAULT_IMAGE_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/avif",
    "image/svg+xml",
];

/// Detects a MIME type from file content.
pub fn sniff_mime(head: &[u8]) -> Option<&'static str> {
    const SIGNATURES: &[(&[u8], &str)] = &[
        (b"\xFF\xD8\xFF", "image/jpeg"),
        (b"\x89PNG\r\n\x1A\n", "image/png"),
        (b"GIF87a", "image/gif"),
        (b"GIF89a", "image/gif"),
        (b"BM", "image/bmp"),
        (b"%PDF-", "application/pdf"),
        (b"PK\x03\x04", "application/zip"),
    ];

    if let Some((_, mime)) = SIGNATURES.iter().find(|(magic, _)| head.starts_with(magic)) {
        return Some(*mime);
    }
    if head.len() >= 12 && &head[..4] == b"RIFF" && &head[8..12] == b"WEBP" {
        return Some("image/webp");
    }
    if head.len() >= 12 && &head[4..8] == b"ftyp" && matches!(&head[8..12], b"avif" | b"avis") {
        return Some("image/avif");
    }

    let text = String::from_utf8_lossy(head);
    let trimmed = text.trim_start();
    if trimmed.starts_with("<svg") || (trimmed.starts_with("<?xml") && text.contains("<svg")) {
        return Some("image/svg+xml");
    }
    None
}

fn read_head(path: &Path) -> Option<Vec<u8>> {
    let file = fs::File::open(path).ok()?;
    let mut head = Vec::with_capacity(SNIFF_LEN as usize);
    file.take(SNIFF_LEN).read_to_end(&mut head).ok()?;
    Some(head)
}

/// Outcome of the checks shared by `file` and `image`.
struct Inspected<'a> {
    detected: Option<&'static str>,
    declared: &'a str,
}

impl Inspected<'_> {
    fn mime(&self) -> &str {
        self.detected.unwrap_or(self.declared)
    }
}

/// Upload status, existence and size checks, then content sniffing.
fn inspect<'a>(value: &'a Value, params: &[String]) -> Option<Inspected<'a>> {
    let file: &UploadedFile = value.as_upload()?;
    if !file.is_usable() {
        return None;
    }
    if let Some(max) = param_f64(params, 0) {
        if file.size as f64 > max {
            return None;
        }
    }
    let head = read_head(file.path())?;
    Some(Inspected {
        detected: sniff_mime(&head),
        declared: &file.declared_mime,
    })
}

fn allow_list(params: &[String]) -> Option<&[String]> {
    params.get(1..).filter(|rest| !rest.is_empty())
}

/// Exact match, or a `type/*` wildcard.
fn mime_matches(mime: &str, accepted: &str) -> bool {
    if accepted.eq_ignore_ascii_case(mime) {
        return true;
    }
    accepted
        .strip_suffix("/*")
        .and_then(|family| mime.split_once('/').map(|(kind, _)| (family, kind)))
        .is_some_and(|(family, kind)| family.eq_ignore_ascii_case(kind))
}

crate::rule! {
    /// The value must be a successful upload whose temp file exists, within
    /// the size limit and of an allowed MIME type.
    pub File = "file", "The :field field must be a valid file.";
    check(value, params) {
        let Some(inspected) = inspect(value, params) else {
            return false;
        };
        allow_list(params).is_none_or(|allowed| allowed.iter().any(|m| mime_matches(inspected.mime(), m)))
    }
}

crate::rule! {
    /// Like `file`, but the content must be a recognisable image and the
    /// allow-list defaults to the common web image types.
    pub Image = "image", "The :field field must be a valid image.";
    check(value, params) {
        let Some(inspected) = inspect(value, params) else {
            return false;
        };
        let Some(mime) = inspected.detected.filter(|m| m.starts_with("image/")) else {
            return false;
        };
        match allow_list(params) {
            Some(allowed) => allowed.iter().any(|m| mime_matches(mime, m)),
            None => DEFAULT_IMAGE_TYPES.contains(&mime),
        }
    }
}
