//! Core data model (IR) for indexed classes, methods, and call edges.
//!
//! Everything here is produced by the indexer and resolver and consumed,
//! read-only, by the graph builder and later stages.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The (declaring class, method name) pair identifying a call-graph node.
///
/// Overloads are not distinguished: every declaration sharing this pair maps
/// to the same node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QualifiedName {
    pub class_name: String,
    pub method: String,
}

impl QualifiedName {
    pub fn new(class_name: impl Into<String>, method: impl Into<String>) -> Self {
        Self { class_name: class_name.into(), method: method.into() }
    }

    /// Parse a `Class.method` token. The split happens on the last dot so that
    /// package-qualified class names keep their prefix.
    pub fn parse(token: &str) -> Option<Self> {
        let (class_name, method) = token.rsplit_once('.')?;
        if class_name.is_empty() || method.is_empty() {
            return None;
        }
        Some(Self::new(class_name, method))
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.class_name, self.method)
    }
}

/// Target of a call edge as proposed by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalleeRef {
    /// Receiver type was determined; the pair may or may not exist in the index.
    Qualified(QualifiedName),
    /// Only the method name is known.
    Unqualified(String),
}

impl fmt::Display for CalleeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalleeRef::Qualified(q) => write!(f, "{q}"),
            CalleeRef::Unqualified(name) => write!(f, "?.{name}"),
        }
    }
}

/// HTTP verb attached to a route annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    /// `@RequestMapping` without an explicit `method =`; matches any verb.
    Any,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Any => "REQUEST",
        }
    }

    /// Case-insensitive parse of a verb name; `REQUEST` maps to [`HttpMethod::Any`].
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "GET" => Some(HttpMethod::Get),
            "POST" => Some(HttpMethod::Post),
            "PUT" => Some(HttpMethod::Put),
            "DELETE" => Some(HttpMethod::Delete),
            "PATCH" => Some(HttpMethod::Patch),
            "REQUEST" => Some(HttpMethod::Any),
            _ => None,
        }
    }

    /// Whether a route declared with `self` serves a request filtered on `wanted`.
    pub fn accepts(&self, wanted: HttpMethod) -> bool {
        *self == HttpMethod::Any || *self == wanted
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Merged (verb, normalized path) for a route handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestMapping {
    pub http_method: HttpMethod,
    pub path: String,
}

/// A single annotation as written in source, e.g. `@GetMapping("/{id}")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Simple name without the `@` (package qualifiers are stripped).
    pub name: String,
    /// Raw text between the parentheses, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
    Record,
}

impl ClassKind {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "class" => Some(ClassKind::Class),
            "interface" => Some(ClassKind::Interface),
            "enum" => Some(ClassKind::Enum),
            "record" => Some(ClassKind::Record),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    /// Raw class name of the declared type (generics and array brackets stripped).
    pub type_name: String,
}

/// A method declaration with a body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    pub class_name: String,
    pub file_path: PathBuf,
    /// 1-based, inclusive; first line of the header including annotations.
    pub start_line: usize,
    /// 1-based, inclusive; line of the closing brace.
    pub end_line: usize,
    pub is_public: bool,
    pub annotations: Vec<Annotation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest: Option<RestMapping>,
    /// Body text between the braces, with comments and literals masked.
    #[serde(skip)]
    pub body: String,
}

impl MethodDecl {
    pub fn qualified_name(&self) -> QualifiedName {
        QualifiedName::new(&self.class_name, &self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDecl {
    pub name: String,
    pub kind: ClassKind,
    pub file_path: PathBuf,
    pub start_line: usize,
    pub end_line: usize,
    pub is_public: bool,
    pub annotations: Vec<Annotation>,
    /// Normalized path of a class-level `@RequestMapping`, if present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    pub fields: Vec<FieldDecl>,
    pub methods: Vec<MethodDecl>,
}

impl ClassDecl {
    pub fn field_type(&self, field: &str) -> Option<&str> {
        self.fields.iter().find(|f| f.name == field).map(|f| f.type_name.as_str())
    }
}

/// One caller-to-callee relation; the callee may not exist in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallEdge {
    pub caller: QualifiedName,
    pub callee: CalleeRef,
}
