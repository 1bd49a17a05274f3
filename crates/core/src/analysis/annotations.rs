//! Annotation extraction and HTTP route classification.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::analysis::scanner::{is_ident_byte, is_ident_start, matching_paren};
use crate::model::{Annotation, HttpMethod, RestMapping};

static NAMED_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\b(?:value|path)\s*=\s*\{?\s*"([^"]*)""#).expect("valid path regex")
});
static LEADING_STRING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s*\{?\s*"([^"]*)""#).expect("valid literal regex"));
static METHOD_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bmethod\s*=\s*\{?\s*(?:RequestMethod\s*\.\s*)?([A-Za-z]+)")
        .expect("valid method regex")
});

/// Annotations found in a declaration header plus the header with them blanked.
#[derive(Debug, Clone)]
pub struct StrippedHeader {
    pub annotations: Vec<Annotation>,
    /// Masked header text with every annotation replaced by spaces.
    pub remainder: String,
}

/// Pull `@Name(...)` annotations out of a header.
///
/// Parentheses are balanced on the masked text; the argument text is taken
/// from the original source so string literals survive.
pub fn strip_annotations(masked: &str, original: &str, header: Range<usize>) -> StrippedHeader {
    let bytes = masked.as_bytes();
    let mut remainder = masked[header.clone()].as_bytes().to_vec();
    let mut annotations = Vec::new();
    let mut pos = header.start;

    while pos < header.end {
        if bytes[pos] != b'@' || pos + 1 >= header.end || !is_ident_start(bytes[pos + 1]) {
            pos += 1;
            continue;
        }
        let name_start = pos + 1;
        let mut name_end = name_start;
        while name_end < header.end && (is_ident_byte(bytes[name_end]) || bytes[name_end] == b'.') {
            name_end += 1;
        }
        let qualified = &masked[name_start..name_end];
        if qualified == "interface" {
            // `@interface Foo` declares an annotation type, it is not a usage.
            pos = name_end;
            continue;
        }

        let mut span_end = name_end;
        let mut arguments = None;
        let mut probe = name_end;
        while probe < header.end && bytes[probe].is_ascii_whitespace() {
            probe += 1;
        }
        if probe < header.end && bytes[probe] == b'(' {
            if let Some(close) = matching_paren(bytes, probe).filter(|&c| c < header.end) {
                arguments = Some(original[probe + 1..close].trim().to_string());
                span_end = close + 1;
            }
        }

        let simple = qualified.rsplit('.').next().unwrap_or(qualified).to_string();
        annotations.push(Annotation { name: simple, arguments });
        for byte in &mut remainder[pos - header.start..span_end - header.start] {
            if *byte != b'\n' {
                *byte = b' ';
            }
        }
        pos = span_end;
    }

    StrippedHeader { annotations, remainder: String::from_utf8_lossy(&remainder).into_owned() }
}

/// Classify a method-level route annotation into (verb, raw path segment).
pub fn method_route(annotations: &[Annotation]) -> Option<(HttpMethod, String)> {
    annotations.iter().find_map(|a| {
        let method = match a.name.as_str() {
            "GetMapping" => HttpMethod::Get,
            "PostMapping" => HttpMethod::Post,
            "PutMapping" => HttpMethod::Put,
            "DeleteMapping" => HttpMethod::Delete,
            "PatchMapping" => HttpMethod::Patch,
            "RequestMapping" => a
                .arguments
                .as_deref()
                .and_then(|args| METHOD_ATTR.captures(args))
                .and_then(|caps| HttpMethod::parse(&caps[1]))
                .unwrap_or(HttpMethod::Any),
            _ => return None,
        };
        Some((method, annotation_path(a)))
    })
}

/// Path of a class-level `@RequestMapping`, used as a prefix for its handlers.
pub fn class_prefix(annotations: &[Annotation]) -> Option<String> {
    annotations
        .iter()
        .find(|a| a.name == "RequestMapping")
        .map(|a| normalize_path(&[&annotation_path(a)]))
}

/// Merge a class prefix with a method route.
pub fn rest_mapping(prefix: Option<&str>, route: Option<(HttpMethod, String)>) -> Option<RestMapping> {
    let (http_method, segment) = route?;
    let path = normalize_path(&[prefix.unwrap_or(""), &segment]);
    Some(RestMapping { http_method, path })
}

fn annotation_path(annotation: &Annotation) -> String {
    let Some(args) = annotation.arguments.as_deref() else {
        return String::new();
    };
    LEADING_STRING
        .captures(args)
        .or_else(|| NAMED_PATH.captures(args))
        .map(|caps| caps[1].to_string())
        .unwrap_or_default()
}

/// Join path pieces with single slashes, with a leading `/` and no trailing `/`.
pub fn normalize_path(parts: &[&str]) -> String {
    let segments: Vec<&str> =
        parts.iter().flat_map(|p| p.split('/')).map(str::trim).filter(|s| !s.is_empty()).collect();
    format!("/{}", segments.join("/"))
}
