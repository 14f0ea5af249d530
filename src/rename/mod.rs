//! The identifier-renaming engine.
//!
//! Data flows leaves-first: the [`name_generator`] supplies names, the
//! [`policy`] decides eligibility, the [`scheduler`] claims symbols and
//! propagates names through references into the [`ledger`], the [`walker`]
//! drives the scheduler in two phases, and [`commit`] validates the ledger and
//! rewrites the documents. [`pass::RenamePass`] ties it together.

pub mod commit;
pub mod ledger;
pub mod name_generator;
pub mod pass;
pub mod policy;
pub mod program;
pub mod progress;
pub mod scheduler;
pub mod semantic;
pub mod symbol;
pub mod syntax;
pub mod walker;

pub use commit::{EditPlan, TextEdit};
pub use ledger::{HandledSet, LedgerEntries, RenameLedger};
pub use name_generator::{Alphabet, NameGenerator};
pub use pass::{RenameOutcome, RenamePass, RenameStats};
pub use policy::EligibilityPolicy;
pub use program::{Document, Program};
pub use progress::{NoProgress, ProgressCounter, ProgressSink};
pub use scheduler::RenameScheduler;
pub use semantic::SemanticModel;
pub use symbol::{
    DocumentId, Location, ReferenceLocation, ReferencedSymbol, RenameProposal, SourceLocation,
    Symbol, SymbolId, SymbolKind, TextSpan, TypeKind,
};
pub use syntax::{NodeId, SyntaxKind, SyntaxNode};
pub use walker::{DeclarationWalker, Phase};
