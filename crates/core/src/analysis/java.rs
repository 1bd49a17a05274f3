//! Java declaration extraction.
//!
//! This is not a full Java parser. It masks literals and comments, splits
//! class bodies into members on `;`/`{` boundaries, and classifies each member
//! header by its shape. Known divergences from the grammar:
//! - only the first declarator of `int a = 1, b = 2;` is recorded;
//! - generic type arguments are dropped from field types;
//! - local and anonymous classes inside method bodies are not indexed.

use std::path::Path;

use crate::analysis::annotations::{class_prefix, method_route, rest_mapping, strip_annotations};
use crate::analysis::indexer::SourceParser;
use crate::analysis::scanner::{
    is_ident_byte, is_ident_start, mask_source, split_members, LineIndex, Member,
};
use crate::analysis::ParseError;
use crate::model::{ClassDecl, ClassKind, FieldDecl, MethodDecl};

const MODIFIERS: &[&str] = &[
    "public",
    "protected",
    "private",
    "static",
    "final",
    "abstract",
    "sealed",
    "non-sealed",
    "strictfp",
    "default",
    "synchronized",
    "native",
    "transient",
    "volatile",
];

const KEYWORDS: &[&str] = &[
    "if", "for", "while", "switch", "catch", "synchronized", "return", "new", "throw", "try",
    "do", "else", "case", "assert", "this", "super",
];

/// Frontend for `.java` sources.
#[derive(Debug, Default, Clone, Copy)]
pub struct JavaParser;

impl SourceParser for JavaParser {
    fn name(&self) -> &'static str {
        "java"
    }

    fn parse(&self, path: &Path, source: &str) -> Result<Vec<ClassDecl>, ParseError> {
        let file = JavaFile::new(path, source);
        let mut classes = Vec::new();
        for member in split_members(&file.masked, 0..file.masked.len(), &file.lines)? {
            let Some(block) = member.block.clone() else {
                continue;
            };
            let stripped = strip_annotations(&file.masked, source, member.header.clone());
            if let Some((kind, name, is_public)) = type_declaration(&stripped.remainder) {
                let header = TypeHeader { kind, name, is_public, annotations: stripped.annotations };
                file.parse_type(header, &member, block, &mut classes)?;
            }
        }
        Ok(classes)
    }
}

struct TypeHeader {
    kind: ClassKind,
    name: String,
    is_public: bool,
    annotations: Vec<crate::model::Annotation>,
}

struct JavaFile<'a> {
    path: &'a Path,
    source: &'a str,
    masked: String,
    lines: LineIndex,
}

impl<'a> JavaFile<'a> {
    fn new(path: &'a Path, source: &'a str) -> Self {
        let masked = mask_source(source);
        let lines = LineIndex::new(&masked);
        Self { path, source, masked, lines }
    }

    /// Parse one class body; nested types are appended after their parent.
    fn parse_type(
        &self,
        header: TypeHeader,
        member: &Member,
        block: std::ops::Range<usize>,
        out: &mut Vec<ClassDecl>,
    ) -> Result<(), ParseError> {
        let mut class = ClassDecl {
            base_path: class_prefix(&header.annotations),
            name: header.name,
            kind: header.kind,
            file_path: self.path.to_path_buf(),
            start_line: self.lines.line_of(member.header.start),
            end_line: self.lines.line_of(block.end),
            is_public: header.is_public,
            annotations: header.annotations,
            fields: Vec::new(),
            methods: Vec::new(),
        };
        let mut nested = Vec::new();

        for inner in split_members(&self.masked, block, &self.lines)? {
            let stripped = strip_annotations(&self.masked, self.source, inner.header.clone());
            let text = stripped.remainder.as_str();

            match inner.block.clone() {
                Some(body) => {
                    if let Some((kind, name, is_public)) = type_declaration(text) {
                        let header =
                            TypeHeader { kind, name, is_public, annotations: stripped.annotations };
                        self.parse_type(header, &inner, body, &mut nested)?;
                        continue;
                    }
                    let Some(signature) = method_signature(text) else {
                        continue;
                    };
                    if signature.name == class.name {
                        continue;
                    }
                    let is_public = signature.is_public || class.kind == ClassKind::Interface;
                    let rest =
                        rest_mapping(class.base_path.as_deref(), method_route(&stripped.annotations));
                    class.methods.push(MethodDecl {
                        name: signature.name,
                        class_name: class.name.clone(),
                        file_path: self.path.to_path_buf(),
                        start_line: self.lines.line_of(inner.header.start),
                        end_line: self.lines.line_of(body.end),
                        is_public,
                        annotations: stripped.annotations,
                        rest,
                        body: self.masked[body].to_string(),
                    });
                }
                None => {
                    if let Some(field) = field_declaration(text, inner.has_initializer) {
                        class.fields.push(field);
                    }
                }
            }
        }

        out.push(class);
        out.append(&mut nested);
        Ok(())
    }
}

fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c.is_whitespace()).filter(|w| !w.is_empty())
}

/// `[modifiers] (class|interface|enum|record) Name ...`
fn type_declaration(header: &str) -> Option<(ClassKind, String, bool)> {
    let mut is_public = false;
    let mut tokens = words(header);
    let keyword = loop {
        let word = tokens.next()?;
        if word == "public" {
            is_public = true;
        } else if !MODIFIERS.contains(&word) {
            break word;
        }
    };
    let kind = match keyword {
        "@interface" => ClassKind::Interface,
        other => ClassKind::from_keyword(other)?,
    };
    let rest = tokens.next()?;
    let name: String = rest.bytes().take_while(|b| is_ident_byte(*b)).map(char::from).collect();
    if name.is_empty() || !is_ident_start(name.as_bytes()[0]) {
        return None;
    }
    Some((kind, name, is_public))
}

struct MethodSignature {
    name: String,
    is_public: bool,
}

/// `[modifiers] [<T>] ReturnType name(params) [throws ...]`
fn method_signature(header: &str) -> Option<MethodSignature> {
    let open = header.find('(')?;
    let before = header[..open].trim_end();
    let name_start = before
        .bytes()
        .rposition(|b| !is_ident_byte(b))
        .map(|p| p + 1)
        .unwrap_or(0);
    let name = &before[name_start..];
    if name.is_empty() || !is_ident_start(name.as_bytes()[0]) || KEYWORDS.contains(&name) {
        return None;
    }
    // A return type (or constructor modifiers) must precede the name; enum
    // constants with bodies have none, or follow a comma.
    let prefix = before[..name_start].trim_end();
    if prefix.is_empty() || prefix.ends_with(',') {
        return None;
    }
    let is_public = words(prefix).any(|w| w == "public");
    Some(MethodSignature { name: name.to_string(), is_public })
}

/// `[modifiers] Type name [= init]` with the type reduced to a raw class name.
fn field_declaration(header: &str, has_initializer: bool) -> Option<FieldDecl> {
    let declaration = match (has_initializer, header.find('=')) {
        (true, Some(eq)) => &header[..eq],
        _ => header,
    };
    if declaration.contains('(') {
        // Bodiless method or enum constants.
        return None;
    }

    let mut text = declaration.trim();
    loop {
        let word_end = text.find(char::is_whitespace).unwrap_or(text.len());
        if MODIFIERS.contains(&&text[..word_end]) {
            text = text[word_end..].trim_start();
        } else {
            break;
        }
    }

    let (type_end, type_name) = read_type(text)?;
    let rest = text[type_end..].trim_start();
    let name: String = rest.bytes().take_while(|b| is_ident_byte(*b)).map(char::from).collect();
    if name.is_empty() || !is_ident_start(name.as_bytes()[0]) {
        return None;
    }
    Some(FieldDecl { name, type_name })
}

/// Read `a.b.Type<...>[]` from the start of `text`; returns (end offset, `Type`).
fn read_type(text: &str) -> Option<(usize, String)> {
    let bytes = text.as_bytes();
    let mut pos = 0;
    while pos < bytes.len() && (is_ident_byte(bytes[pos]) || bytes[pos] == b'.') {
        pos += 1;
    }
    let qualified = &text[..pos];
    let simple = qualified.rsplit('.').next().unwrap_or(qualified);
    if simple.is_empty() || !is_ident_start(simple.as_bytes()[0]) {
        return None;
    }

    let mut depth = 0usize;
    while pos < bytes.len() {
        match bytes[pos] {
            b'<' => depth += 1,
            b'>' => depth = depth.saturating_sub(1),
            b'[' | b']' => {}
            b if b.is_ascii_whitespace() => {}
            _ if depth > 0 => {}
            _ => break,
        }
        pos += 1;
    }
    Some((pos, simple.to_string()))
}
