//! Declaration walkers for the two rename phases.
//!
//! Interface members must own their names before any implementation is
//! visited: when the second phase reaches `Foo.Bar`, the reference search
//! started for `IFoo.Bar` has already claimed it under the interface's name.

use tokio::task::JoinSet;

use crate::core::errors::Result;

use super::scheduler::RenameScheduler;
use super::symbol::DocumentId;
use super::syntax::{SyntaxKind, SyntaxNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Interfaces, their members, and abstract methods.
    Interfaces,
    /// Every other renameable declaration.
    Declarations,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Interfaces => "interfaces",
            Phase::Declarations => "declarations",
        }
    }
}

/// Walks one document's declaration tree for one phase, spawning a rename task
/// per claimed symbol into the phase's task set.
pub struct DeclarationWalker<'a> {
    scheduler: &'a RenameScheduler,
    document: DocumentId,
    phase: Phase,
    tasks: &'a mut JoinSet<Result<()>>,
    scheduled: usize,
}

impl<'a> DeclarationWalker<'a> {
    pub fn new(
        scheduler: &'a RenameScheduler,
        document: DocumentId,
        phase: Phase,
        tasks: &'a mut JoinSet<Result<()>>,
    ) -> Self {
        Self {
            scheduler,
            document,
            phase,
            tasks,
            scheduled: 0,
        }
    }

    /// Number of symbols this walker claimed.
    pub fn scheduled(&self) -> usize {
        self.scheduled
    }

    pub fn walk(&mut self, root: &SyntaxNode) -> Result<()> {
        match self.phase {
            Phase::Interfaces => self.visit_interfaces(root),
            Phase::Declarations => self.visit_declarations(root),
        }
    }

    fn visit_interfaces(&mut self, node: &SyntaxNode) -> Result<()> {
        match node.kind {
            SyntaxKind::Interface => {
                self.attempt(node)?;
                for member in node.children.iter().filter(|c| is_type_member(c.kind)) {
                    self.attempt(member)?;
                    self.visit_interfaces(member)?;
                }
                Ok(())
            }
            SyntaxKind::Method if node.is_abstract => self.attempt(node),
            SyntaxKind::Method => Ok(()),
            _ => self.visit_children(node, Self::visit_interfaces),
        }
    }

    fn visit_declarations(&mut self, node: &SyntaxNode) -> Result<()> {
        match node.kind {
            SyntaxKind::Class
            | SyntaxKind::Struct
            | SyntaxKind::Enum
            | SyntaxKind::EnumMember
            | SyntaxKind::Method
            | SyntaxKind::Parameter
            | SyntaxKind::TypeParameter
            | SyntaxKind::Property
            | SyntaxKind::ForEach => {
                self.attempt(node)?;
                self.visit_children(node, Self::visit_declarations)
            }
            SyntaxKind::VariableDeclaration => {
                for declarator in node
                    .children
                    .iter()
                    .filter(|c| c.kind == SyntaxKind::VariableDeclarator)
                {
                    self.attempt(declarator)?;
                    self.visit_children(declarator, Self::visit_declarations)?;
                }
                Ok(())
            }
            _ => self.visit_children(node, Self::visit_declarations),
        }
    }

    fn visit_children(
        &mut self,
        node: &SyntaxNode,
        visit: fn(&mut Self, &SyntaxNode) -> Result<()>,
    ) -> Result<()> {
        for child in &node.children {
            visit(self, child)?;
        }
        Ok(())
    }

    /// Resolve the node's symbol and schedule it under a fresh name.
    fn attempt(&mut self, node: &SyntaxNode) -> Result<()> {
        let symbol = self
            .scheduler
            .model()
            .declared_symbol(self.document, node)?;
        let name = self.scheduler.next_name();
        if self.scheduler.schedule_root(symbol, name, self.tasks) {
            self.scheduled += 1;
        }
        Ok(())
    }
}

/// Member declarations an interface body can contain.
fn is_type_member(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Method
            | SyntaxKind::Property
            | SyntaxKind::Interface
            | SyntaxKind::Class
            | SyntaxKind::Struct
            | SyntaxKind::Enum
    )
}
