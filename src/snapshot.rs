//! Serializable program snapshots.
//!
//! A [`ProgramSnapshot`] is what a compiler front end exports for the renamer:
//! document texts, declaration trees, the symbol each declaration binds, and
//! the reference index of every symbol. Loading one yields the [`Program`] to
//! rename together with a [`SnapshotModel`] answering semantic queries.

use std::path::Path;
use std::sync::Arc;

use ahash::{AHashMap, AHashSet};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::errors::{Result, RenameError};
use crate::rename::program::{Document, Program};
use crate::rename::semantic::SemanticModel;
use crate::rename::symbol::{
    DocumentId, Location, ReferenceLocation, ReferencedSymbol, SourceLocation, Symbol, SymbolId,
};
use crate::rename::syntax::{NodeId, SyntaxNode};

/// Everything the renamer needs to know about a program, as exported by a
/// compiler front end.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgramSnapshot {
    pub documents: Vec<SnapshotDocument>,
    #[serde(default)]
    pub symbols: Vec<SnapshotSymbol>,
    /// Which symbol each declaration node introduces.
    #[serde(default)]
    pub bindings: Vec<Binding>,
}

/// One source document with its declaration tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotDocument {
    pub id: DocumentId,
    pub name: String,
    pub text: String,
    pub root: SyntaxNode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotSymbol {
    #[serde(flatten)]
    pub symbol: Symbol,
    /// Every reference to this symbol, excluding its declarations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<ReferenceLocation>,
    /// Symbols a reference search cascades to: interface members and their
    /// implementations, overridden and overriding members. Symmetric.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related: Vec<SymbolId>,
}

/// Declaration node to declared symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub node: NodeId,
    pub symbol: SymbolId,
}

impl ProgramSnapshot {
    /// Load a snapshot from a JSON or YAML file, chosen by extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            RenameError::io(format!("Failed to read snapshot: {}", path.display()), e)
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yml") | Some("yaml") => Ok(serde_yaml::from_str(&content)?),
            _ => Ok(serde_json::from_str(&content)?),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the snapshot and split it into the program and its model.
    pub fn into_model(self) -> Result<(Program, SnapshotModel)> {
        let mut program = Program::new();
        let mut roots = AHashMap::new();
        let mut nodes = AHashSet::new();
        for doc in self.documents {
            for node in doc.root.descendants() {
                if !nodes.insert(node.id) {
                    return Err(RenameError::validation_field(
                        format!("syntax node {} appears twice", node.id.0),
                        "documents.root",
                    ));
                }
            }
            roots.insert(doc.id, Arc::new(doc.root));
            program.add_document(Document::new(doc.id, doc.name, doc.text))?;
        }

        let mut symbols = AHashMap::with_capacity(self.symbols.len());
        let mut references = AHashMap::with_capacity(self.symbols.len());
        let mut related: AHashMap<SymbolId, Vec<SymbolId>> = AHashMap::new();
        for entry in self.symbols {
            let id = entry.symbol.id;
            if symbols.contains_key(&id) {
                return Err(RenameError::validation_field(
                    format!("symbol {id} is defined twice"),
                    "symbols",
                ));
            }
            for other in entry.related {
                link(&mut related, id, other);
                link(&mut related, other, id);
            }
            references.insert(id, entry.references);
            symbols.insert(id, Arc::new(entry.symbol));
        }

        let mut bindings = AHashMap::with_capacity(self.bindings.len());
        for binding in self.bindings {
            if !nodes.contains(&binding.node) {
                return Err(RenameError::validation_field(
                    format!("binding names unknown syntax node {}", binding.node.0),
                    "bindings",
                ));
            }
            bindings.insert(binding.node, binding.symbol);
        }

        let model = SnapshotModel {
            roots,
            symbols,
            references,
            related,
            bindings,
            document_names: program
                .documents()
                .map(|doc| (doc.id, doc.name.clone()))
                .collect(),
        };
        model.validate(&program)?;
        debug!(
            documents = program.len(),
            symbols = model.symbols.len(),
            "snapshot loaded"
        );
        Ok((program, model))
    }
}

fn link(related: &mut AHashMap<SymbolId, Vec<SymbolId>>, from: SymbolId, to: SymbolId) {
    let list = related.entry(from).or_default();
    if from != to && !list.contains(&to) {
        list.push(to);
    }
}

/// [`SemanticModel`] backed by an indexed [`ProgramSnapshot`].
#[derive(Debug)]
pub struct SnapshotModel {
    roots: AHashMap<DocumentId, Arc<SyntaxNode>>,
    symbols: AHashMap<SymbolId, Arc<Symbol>>,
    references: AHashMap<SymbolId, Vec<ReferenceLocation>>,
    related: AHashMap<SymbolId, Vec<SymbolId>>,
    bindings: AHashMap<NodeId, SymbolId>,
    document_names: AHashMap<DocumentId, String>,
}

impl SnapshotModel {
    fn validate(&self, program: &Program) -> Result<()> {
        let check_symbol = |id: &SymbolId, field: &str| {
            if self.symbols.contains_key(id) {
                Ok(())
            } else {
                Err(RenameError::validation_field(
                    format!("unknown symbol {id}"),
                    field,
                ))
            }
        };
        let check_location = |location: &Location, field: &str| match location.as_source() {
            Some(source) if source.span.is_empty() => Err(RenameError::validation_field(
                format!("{source}: empty span"),
                field,
            )),
            Some(source) => program.text_at(source).map(|_| ()).map_err(|e| {
                RenameError::validation_field(format!("{source}: {e}"), field)
            }),
            None => Ok(()),
        };

        for symbol in self.symbols.values() {
            for id in symbol.constructors.iter().chain(&symbol.members) {
                check_symbol(id, "symbols.constructors/members")?;
            }
            for location in &symbol.locations {
                check_location(location, "symbols.locations")?;
            }
        }
        for refs in self.references.values() {
            for reference in refs {
                check_location(&reference.location, "symbols.references")?;
            }
        }
        for (id, others) in &self.related {
            check_symbol(id, "symbols.related")?;
            for other in others {
                check_symbol(other, "symbols.related")?;
            }
        }
        for id in self.bindings.values() {
            check_symbol(id, "bindings")?;
        }
        Ok(())
    }

    fn group(&self, id: SymbolId) -> Result<ReferencedSymbol> {
        Ok(ReferencedSymbol {
            definition: self.symbol(id)?,
            locations: self.references.get(&id).cloned().unwrap_or_default(),
        })
    }

    fn document_name(&self, id: DocumentId) -> String {
        self.document_names
            .get(&id)
            .cloned()
            .unwrap_or_else(|| id.to_string())
    }
}

#[async_trait]
impl SemanticModel for SnapshotModel {
    fn syntax_root(&self, document: DocumentId) -> Result<Arc<SyntaxNode>> {
        self.roots
            .get(&document)
            .cloned()
            .ok_or_else(|| RenameError::unknown_document(document))
    }

    fn declared_symbol(&self, document: DocumentId, node: &SyntaxNode) -> Result<Arc<Symbol>> {
        self.bindings
            .get(&node.id)
            .and_then(|id| self.symbols.get(id))
            .cloned()
            .ok_or_else(|| RenameError::no_symbol(node.describe(), self.document_name(document)))
    }

    fn symbol(&self, id: SymbolId) -> Result<Arc<Symbol>> {
        self.symbols
            .get(&id)
            .cloned()
            .ok_or_else(|| RenameError::internal(format!("unknown symbol {id}")))
    }

    async fn find_references(&self, symbol: &Symbol) -> Result<Vec<ReferencedSymbol>> {
        // Suspend like a real whole-program search would.
        tokio::task::yield_now().await;

        let mut groups = vec![self.group(symbol.id)?];
        for other in self.related.get(&symbol.id).into_iter().flatten() {
            groups.push(self.group(*other)?);
        }
        Ok(groups)
    }

    fn location_is_in_source(&self, location: &Location) -> bool {
        location
            .as_source()
            .is_some_and(|loc: &SourceLocation| self.roots.contains_key(&loc.document))
    }
}
