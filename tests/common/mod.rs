//! Shared fixtures for the integration tests.
//!
//! Spans are located by searching the document text for whole words, so a
//! fixture reads like the source it describes instead of a table of offsets.

#![allow(dead_code)]

use identshrink::rename::{
    DocumentId, Location, ReferenceLocation, SourceLocation, Symbol, SymbolId, SymbolKind,
    SyntaxKind, SyntaxNode, TextSpan, TypeKind,
};
use identshrink::snapshot::{Binding, SnapshotDocument, SnapshotSymbol};
use identshrink::ProgramSnapshot;

/// Byte span of the `nth` whole-word occurrence of `word` in `text`.
pub fn word_span(text: &str, word: &str, nth: usize) -> TextSpan {
    let is_ident = |c: char| c.is_alphanumeric() || c == '_';
    text.match_indices(word)
        .filter(|(start, _)| {
            let end = start + word.len();
            let before = text[..*start].chars().next_back();
            let after = text[end..].chars().next();
            !before.is_some_and(is_ident) && !after.is_some_and(is_ident)
        })
        .nth(nth)
        .map(|(start, _)| TextSpan::new(start, start + word.len()))
        .unwrap_or_else(|| panic!("no occurrence {nth} of '{word}' in fixture"))
}

pub struct SnapshotBuilder {
    documents: Vec<(DocumentId, String, String)>,
    symbols: Vec<SnapshotSymbol>,
    bindings: Vec<Binding>,
    next_node: u32,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self {
            documents: Vec::new(),
            symbols: Vec::new(),
            bindings: Vec::new(),
            next_node: 1,
        }
    }

    pub fn document(&mut self, name: &str, text: &str) -> DocumentId {
        let id = DocumentId(self.documents.len() as u32);
        self.documents.push((id, name.to_string(), text.to_string()));
        id
    }

    pub fn text(&self, doc: DocumentId) -> &str {
        &self.documents[doc.0 as usize].2
    }

    pub fn at(&self, doc: DocumentId, word: &str, nth: usize) -> SourceLocation {
        SourceLocation::new(doc, word_span(self.text(doc), word, nth))
    }

    /// Declare a symbol whose declaration is the `nth` occurrence of `name`.
    pub fn declare(
        &mut self,
        id: u32,
        kind: SymbolKind,
        name: &str,
        doc: DocumentId,
        nth: usize,
    ) -> &mut SnapshotSymbol {
        let location = Location::Source(self.at(doc, name, nth));
        self.push_symbol(id, kind, name, vec![location])
    }

    /// Declare a symbol that has no location in the program's sources.
    pub fn declare_external(&mut self, id: u32, kind: SymbolKind, name: &str) -> &mut SnapshotSymbol {
        let location = Location::Metadata {
            assembly: "System.Runtime".to_string(),
        };
        self.push_symbol(id, kind, name, vec![location])
    }

    /// Declare a compiler-synthesized symbol (e.g. a default constructor).
    pub fn declare_implicit(&mut self, id: u32, kind: SymbolKind, name: &str) -> &mut SnapshotSymbol {
        let symbol = self.push_symbol(id, kind, name, Vec::new());
        symbol.symbol.is_implicitly_declared = true;
        symbol
    }

    fn push_symbol(
        &mut self,
        id: u32,
        kind: SymbolKind,
        name: &str,
        locations: Vec<Location>,
    ) -> &mut SnapshotSymbol {
        self.symbols.push(SnapshotSymbol {
            symbol: Symbol {
                id: SymbolId(id),
                kind,
                type_kind: None,
                name: name.to_string(),
                is_implicitly_declared: false,
                is_extern: false,
                can_be_referenced_by_name: true,
                locations,
                constructors: Vec::new(),
                members: Vec::new(),
            },
            references: Vec::new(),
            related: Vec::new(),
        });
        self.symbols.last_mut().expect("symbol was just pushed")
    }

    pub fn symbol_mut(&mut self, id: u32) -> &mut SnapshotSymbol {
        self.symbols
            .iter_mut()
            .find(|s| s.symbol.id == SymbolId(id))
            .unwrap_or_else(|| panic!("symbol {id} not declared"))
    }

    pub fn type_kind(&mut self, id: u32, kind: TypeKind) {
        self.symbol_mut(id).symbol.type_kind = Some(kind);
    }

    /// Add the `nth` occurrence of `word` in `doc` as a reference to `id`.
    pub fn reference(&mut self, id: u32, doc: DocumentId, word: &str, nth: usize) {
        let location = self.at(doc, word, nth);
        self.symbol_mut(id)
            .references
            .push(ReferenceLocation::source(location));
    }

    pub fn relate(&mut self, a: u32, b: u32) {
        self.symbol_mut(a).related.push(SymbolId(b));
    }

    /// A syntax node, bound to `symbol` when given.
    pub fn node(
        &mut self,
        kind: SyntaxKind,
        symbol: Option<u32>,
        children: Vec<SyntaxNode>,
    ) -> SyntaxNode {
        let node = SyntaxNode::new(self.next_node, kind).with_children(children);
        self.next_node += 1;
        if let Some(symbol) = symbol {
            self.bindings.push(Binding {
                node: node.id,
                symbol: SymbolId(symbol),
            });
        }
        node
    }

    /// Finish the snapshot; `roots` holds each document's top-level nodes.
    pub fn build(mut self, roots: Vec<Vec<SyntaxNode>>) -> ProgramSnapshot {
        assert_eq!(roots.len(), self.documents.len(), "one root per document");
        let mut documents = Vec::new();
        for ((id, name, text), children) in std::mem::take(&mut self.documents).into_iter().zip(roots) {
            let root = self.node(SyntaxKind::CompilationUnit, None, children);
            documents.push(SnapshotDocument {
                id,
                name,
                text,
                root,
            });
        }
        ProgramSnapshot {
            documents,
            symbols: self.symbols,
            bindings: self.bindings,
        }
    }
}

pub const GAME: &str = "\
interface IEngine { void Start(); }
class Rocket : IEngine { public void Start() { } }
class Program { static void Main() { Rocket rocket = new Rocket(); rocket.Start(); } }
";

/// An interface, its implementation with an implicit default constructor,
/// and the entry point that uses both.
pub fn game() -> ProgramSnapshot {
    let mut b = SnapshotBuilder::new();
    let doc = b.document("Game.cs", GAME);

    b.declare(1, SymbolKind::NamedType, "IEngine", doc, 0);
    b.type_kind(1, TypeKind::Interface);
    b.symbol_mut(1).symbol.members.push(SymbolId(2));
    b.reference(1, doc, "IEngine", 1);

    b.declare(2, SymbolKind::Method, "Start", doc, 0);
    b.relate(2, 4);

    b.declare(3, SymbolKind::NamedType, "Rocket", doc, 0);
    b.type_kind(3, TypeKind::Class);
    b.symbol_mut(3).symbol.members.push(SymbolId(4));
    b.symbol_mut(3).symbol.constructors.push(SymbolId(5));
    b.reference(3, doc, "Rocket", 1);

    b.declare(4, SymbolKind::Method, "Start", doc, 1);
    b.reference(4, doc, "Start", 2);

    b.declare_implicit(5, SymbolKind::Method, ".ctor");
    b.reference(5, doc, "Rocket", 2);

    b.declare(6, SymbolKind::NamedType, "Program", doc, 0);
    b.type_kind(6, TypeKind::Class);
    b.declare(7, SymbolKind::Method, "Main", doc, 0);

    b.declare(8, SymbolKind::Local, "rocket", doc, 0);
    b.reference(8, doc, "rocket", 1);

    let start_decl = b.node(SyntaxKind::Method, Some(2), vec![]);
    let iface = b.node(SyntaxKind::Interface, Some(1), vec![start_decl]);
    let start_impl = b.node(SyntaxKind::Method, Some(4), vec![]);
    let rocket = b.node(SyntaxKind::Class, Some(3), vec![start_impl]);
    let declarator = b.node(SyntaxKind::VariableDeclarator, Some(8), vec![]);
    let declaration = b.node(SyntaxKind::VariableDeclaration, None, vec![declarator]);
    let main = b.node(SyntaxKind::Method, Some(7), vec![declaration]);
    let program = b.node(SyntaxKind::Class, Some(6), vec![main]);

    b.build(vec![vec![iface, rocket, program]])
}
