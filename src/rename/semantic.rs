//! Boundary to the semantic analysis service.
//!
//! The renamer never parses or binds source itself. It asks a
//! [`SemanticModel`] for declaration trees, for the symbol a declaration
//! introduces, and for every reference to a symbol across the program.

use std::sync::Arc;

use async_trait::async_trait;

use crate::core::errors::Result;

use super::symbol::{DocumentId, Location, ReferenceLocation, ReferencedSymbol, SourceLocation, Symbol, SymbolId};
use super::syntax::SyntaxNode;

#[async_trait]
pub trait SemanticModel: Send + Sync {
    /// Root of the declaration tree of `document`.
    fn syntax_root(&self, document: DocumentId) -> Result<Arc<SyntaxNode>>;

    /// Symbol declared by `node`.
    ///
    /// Fails with [`RenameError::NoSymbol`](crate::core::errors::RenameError::NoSymbol)
    /// when the node does not resolve; a run cannot continue past that.
    fn declared_symbol(&self, document: DocumentId, node: &SyntaxNode) -> Result<Arc<Symbol>>;

    /// Look up a symbol by identity (constructors and members are stored by id).
    fn symbol(&self, id: SymbolId) -> Result<Arc<Symbol>>;

    /// Every reference to `symbol` across the whole program, grouped by
    /// defining symbol. Cascaded definitions (implementations of an interface
    /// member, overridden members) come back as their own groups.
    async fn find_references(&self, symbol: &Symbol) -> Result<Vec<ReferencedSymbol>>;

    /// Whether `location` is editable source text of this program.
    fn location_is_in_source(&self, location: &Location) -> bool {
        location.as_source().is_some()
    }

    /// Whether a reference was implied by the compiler rather than written.
    fn location_is_implicit(&self, reference: &ReferenceLocation) -> bool {
        reference.is_implicit
    }

    /// Whether a reference is the call of a constructor initializer.
    fn is_constructor_initializer(&self, reference: &ReferenceLocation) -> bool {
        reference.is_constructor_initializer
    }

    fn document_id_for(&self, location: &SourceLocation) -> DocumentId {
        location.document
    }
}
