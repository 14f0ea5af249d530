//! Symbol and location model consumed from the semantic analysis service.
//!
//! Everything in this module is a read-only view: symbols and locations are
//! produced by a [`SemanticModel`](super::semantic::SemanticModel) for the
//! duration of one rename run and never mutated by the renamer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identity of a declared entity.
///
/// Display names change during a run, so all bookkeeping (the handled set in
/// particular) is keyed by this id instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolId(pub u32);

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier of a document (source file) in the program being renamed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub u32);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "doc{}", self.0)
    }
}

/// Half-open byte range `[start, end)` within a document's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TextSpan {
    /// First byte of the span.
    pub start: usize,
    /// One past the last byte.
    pub end: usize,
}

impl TextSpan {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start must not exceed end");
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True when the two spans share at least one byte.
    pub fn overlaps(&self, other: &TextSpan) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{})", self.start, self.end)
    }
}

/// A span inside a specific document of the edited program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub document: DocumentId,
    pub span: TextSpan,
}

impl SourceLocation {
    pub fn new(document: DocumentId, span: TextSpan) -> Self {
        Self { document, span }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.document, self.span)
    }
}

/// Where a symbol is declared.
///
/// Symbols coming from referenced, non-source assemblies only carry metadata
/// locations and are never renamed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "in", rename_all = "snake_case")]
pub enum Location {
    Source(SourceLocation),
    Metadata { assembly: String },
}

impl Location {
    pub fn as_source(&self) -> Option<&SourceLocation> {
        match self {
            Location::Source(loc) => Some(loc),
            Location::Metadata { .. } => None,
        }
    }
}

/// Kind of declared entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Namespace,
    NamedType,
    Method,
    Field,
    Property,
    Parameter,
    TypeParameter,
    Local,
    EnumMember,
}

/// Flavour of a named type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Class,
    Struct,
    Enum,
    Interface,
    Delegate,
}

/// A declared program entity as resolved by the semantic service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub id: SymbolId,
    pub kind: SymbolKind,
    /// Only meaningful for [`SymbolKind::NamedType`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_kind: Option<TypeKind>,
    pub name: String,
    #[serde(default)]
    pub is_implicitly_declared: bool,
    #[serde(default)]
    pub is_extern: bool,
    #[serde(default = "default_true")]
    pub can_be_referenced_by_name: bool,
    #[serde(default)]
    pub locations: Vec<Location>,
    /// Constructors of a named type, explicit or compiler-synthesized.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constructors: Vec<SymbolId>,
    /// Members of a named type.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<SymbolId>,
}

fn default_true() -> bool {
    true
}

impl Symbol {
    pub fn is_named_type(&self) -> bool {
        self.kind == SymbolKind::NamedType
    }

    pub fn is_interface(&self) -> bool {
        self.is_named_type() && self.type_kind == Some(TypeKind::Interface)
    }

    pub fn is_method(&self) -> bool {
        self.kind == SymbolKind::Method
    }

    /// Declaration locations that live in source text.
    pub fn source_locations(&self) -> impl Iterator<Item = &SourceLocation> {
        self.locations.iter().filter_map(Location::as_source)
    }
}

/// One occurrence of a reference found by a whole-program search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceLocation {
    pub location: Location,
    /// Generated or implied by the compiler rather than written in the source.
    #[serde(default)]
    pub is_implicit: bool,
    /// The occurrence is the `: base(...)` / `: this(...)` call of a
    /// constructor initializer and belongs to that construct, not to the name.
    #[serde(default)]
    pub is_constructor_initializer: bool,
}

impl ReferenceLocation {
    pub fn source(location: SourceLocation) -> Self {
        Self {
            location: Location::Source(location),
            is_implicit: false,
            is_constructor_initializer: false,
        }
    }
}

/// References grouped by the symbol that defines them.
///
/// A search for an interface member also reports its implementations (and a
/// search for an override reports the overridden member); those arrive as
/// additional groups whose `definition` differs from the searched symbol.
#[derive(Debug, Clone)]
pub struct ReferencedSymbol {
    pub definition: std::sync::Arc<Symbol>,
    pub locations: Vec<ReferenceLocation>,
}

/// A proposed replacement of the text at `location` with `name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RenameProposal {
    pub location: SourceLocation,
    pub name: String,
}
