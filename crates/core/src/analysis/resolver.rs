//! Call-site extraction and best-effort target resolution.
//!
//! Resolution order for `name(`:
//! 1. `this.name(` / bare `name(` -> enclosing class
//! 2. `field.name(` -> declared type of a field of the enclosing class
//! 3. `Type.name(` -> any indexed class called `Type`
//! 4. anything else -> unqualified `name`

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::analysis::scanner::{ident_ending_at, prev_non_ws};
use crate::analysis::SourceIndex;
use crate::model::{CalleeRef, ClassDecl, MethodDecl, QualifiedName};

static CALL_SITE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z_$][\w$]*)\s*\(").expect("valid call regex"));

/// Words that may directly precede a call expression.
const EXPRESSION_KEYWORDS: &[&str] = &["return", "throw", "else", "case", "yield", "assert", "do"];

/// Words followed by `(` that are not calls.
const NON_CALLS: &[&str] = &[
    "if", "for", "while", "switch", "catch", "synchronized", "return", "new", "throw", "try",
    "super", "this", "assert", "yield", "case",
];

/// Resolves call expressions against the project-wide class table.
///
/// Built only after the whole tree is indexed, so class names declared in
/// later files are already known.
pub struct CallResolver {
    known_classes: HashSet<String>,
    skip_calls: HashSet<String>,
}

impl CallResolver {
    pub fn new(index: &SourceIndex, skip_calls: &[String]) -> Self {
        Self {
            known_classes: index.classes.iter().map(|c| c.name.clone()).collect(),
            skip_calls: skip_calls.iter().cloned().collect(),
        }
    }

    pub fn is_known_class(&self, name: &str) -> bool {
        self.known_classes.contains(name)
    }

    /// Distinct callee references of `method`, in first-occurrence order.
    pub fn resolve(&self, class: &ClassDecl, method: &MethodDecl) -> Vec<CalleeRef> {
        let body = method.body.as_str();
        let bytes = body.as_bytes();
        let mut seen = HashSet::new();
        let mut calls = Vec::new();

        for caps in CALL_SITE.captures_iter(body) {
            let Some(name_match) = caps.get(1) else {
                continue;
            };
            let name = name_match.as_str();
            if NON_CALLS.contains(&name) || self.skip_calls.contains(name) {
                continue;
            }

            let mut prev = prev_non_ws(bytes, name_match.start());
            if let Some(p) = prev.filter(|&p| is_type_args_close(bytes, p)) {
                // `recv.<T>name(`; explicit type arguments need a receiver.
                match type_args_open(bytes, p).and_then(|open| prev_non_ws(bytes, open)) {
                    Some(dot) if bytes[dot] == b'.' => prev = Some(dot),
                    _ => continue,
                }
            }

            let callee = match prev {
                Some(p) if bytes[p] == b'.' => {
                    if is_qualified_constructor(body, p) {
                        continue;
                    }
                    self.qualify_receiver(class, body, p, name)
                }
                Some(p) if bytes[p] == b'@' => continue,
                Some(p) => match ident_ending_at(body, p).map(|r| &body[r]) {
                    // `Type name(` is a declaration and `new Name(` a constructor.
                    Some(word) if !EXPRESSION_KEYWORDS.contains(&word) => continue,
                    _ => CalleeRef::Qualified(QualifiedName::new(&class.name, name)),
                },
                None => CalleeRef::Qualified(QualifiedName::new(&class.name, name)),
            };

            if seen.insert(callee.clone()) {
                trace!("resolver: {}.{} -> {}", class.name, method.name, callee);
                calls.push(callee);
            }
        }
        calls
    }

    /// Resolve `receiver.name(` where the dot sits at `dot`.
    fn qualify_receiver(&self, class: &ClassDecl, body: &str, dot: usize, name: &str) -> CalleeRef {
        let bytes = body.as_bytes();
        let receiver = prev_non_ws(bytes, dot).and_then(|p| ident_ending_at(body, p));
        let Some(range) = receiver else {
            return CalleeRef::Unqualified(name.to_string());
        };
        let receiver_name = &body[range.clone()];
        let dotted = prev_non_ws(bytes, range.start).is_some_and(|p| bytes[p] == b'.');
        let via_this = dotted
            && prev_non_ws(bytes, range.start)
                .and_then(|p| prev_non_ws(bytes, p))
                .and_then(|p| ident_ending_at(body, p))
                .is_some_and(|r| &body[r] == "this");

        if receiver_name == "this" && !dotted {
            return CalleeRef::Qualified(QualifiedName::new(&class.name, name));
        }
        if !dotted || via_this {
            if let Some(type_name) = class.field_type(receiver_name) {
                return CalleeRef::Qualified(QualifiedName::new(type_name, name));
            }
        }
        if self.is_known_class(receiver_name) {
            return CalleeRef::Qualified(QualifiedName::new(receiver_name, name));
        }
        CalleeRef::Unqualified(name.to_string())
    }
}

/// `>` closing a type-argument list rather than a lambda arrow.
fn is_type_args_close(bytes: &[u8], pos: usize) -> bool {
    bytes[pos] == b'>'
        && (pos == 0 || bytes[pos - 1] != b'-')
        && type_args_open(bytes, pos).is_some()
}

/// Position of the `<` matching the `>` at `close`.
fn type_args_open(bytes: &[u8], close: usize) -> Option<usize> {
    let mut depth = 0usize;
    for pos in (0..=close).rev() {
        match bytes[pos] {
            b'>' => depth += 1,
            b'<' => {
                depth -= 1;
                if depth == 0 {
                    return Some(pos);
                }
            }
            b if b.is_ascii_alphanumeric() || b.is_ascii_whitespace() => {}
            b'_' | b'$' | b',' | b'.' | b'?' | b'[' | b']' | b'@' => {}
            _ => return None,
        }
    }
    None
}

/// Whether the dotted chain ending at `dot` follows `new`, as in `new a.b.Name(`.
fn is_qualified_constructor(body: &str, dot: usize) -> bool {
    let bytes = body.as_bytes();
    let mut dot = dot;
    loop {
        let Some(segment) = prev_non_ws(bytes, dot).and_then(|p| ident_ending_at(body, p)) else {
            return false;
        };
        match prev_non_ws(bytes, segment.start) {
            Some(p) if bytes[p] == b'.' => dot = p,
            Some(p) => return ident_ending_at(body, p).is_some_and(|r| &body[r] == "new"),
            None => return false,
        }
    }
}
