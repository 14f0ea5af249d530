//! Declaration-level syntax tree walked by the rename phases.
//!
//! Only the shape the walkers dispatch on is modelled: node kinds, the
//! `abstract` modifier and nesting. Resolving a node to its symbol is the
//! semantic service's job.

use serde::{Deserialize, Serialize};

use super::symbol::TextSpan;

/// Identity of a syntax node, unique within a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

/// Syntax node kinds relevant to identifier renaming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyntaxKind {
    CompilationUnit,
    Namespace,
    Interface,
    Class,
    Struct,
    Enum,
    EnumMember,
    Method,
    Constructor,
    Property,
    Field,
    Parameter,
    TypeParameter,
    /// A `T a = .., b = ..` declaration; its children are the declarators.
    VariableDeclaration,
    VariableDeclarator,
    /// `foreach (var x in xs)`; the node itself declares the loop variable.
    ForEach,
    /// Statements, blocks and anything else that only contains declarations.
    Other,
}

impl SyntaxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyntaxKind::CompilationUnit => "compilation_unit",
            SyntaxKind::Namespace => "namespace",
            SyntaxKind::Interface => "interface",
            SyntaxKind::Class => "class",
            SyntaxKind::Struct => "struct",
            SyntaxKind::Enum => "enum",
            SyntaxKind::EnumMember => "enum_member",
            SyntaxKind::Method => "method",
            SyntaxKind::Constructor => "constructor",
            SyntaxKind::Property => "property",
            SyntaxKind::Field => "field",
            SyntaxKind::Parameter => "parameter",
            SyntaxKind::TypeParameter => "type_parameter",
            SyntaxKind::VariableDeclaration => "variable_declaration",
            SyntaxKind::VariableDeclarator => "variable_declarator",
            SyntaxKind::ForEach => "for_each",
            SyntaxKind::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxNode {
    pub id: NodeId,
    pub kind: SyntaxKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<TextSpan>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_abstract: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    pub fn new(id: u32, kind: SyntaxKind) -> Self {
        Self {
            id: NodeId(id),
            kind,
            span: None,
            is_abstract: false,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = SyntaxNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn abstract_(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Short description used in diagnostics.
    pub fn describe(&self) -> String {
        format!("node {} ({})", self.id.0, self.kind.as_str())
    }

    /// Pre-order iterator over this node and all descendants.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

pub struct Descendants<'a> {
    stack: Vec<&'a SyntaxNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descendants_are_pre_order() {
        let tree = SyntaxNode::new(1, SyntaxKind::CompilationUnit).with_children([
            SyntaxNode::new(2, SyntaxKind::Class)
                .with_children([SyntaxNode::new(3, SyntaxKind::Method)]),
            SyntaxNode::new(4, SyntaxKind::Interface),
        ]);
        let ids: Vec<u32> = tree.descendants().map(|n| n.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn abstract_flag_is_omitted_when_false() {
        let json = serde_json::to_value(SyntaxNode::new(9, SyntaxKind::Method)).unwrap();
        assert!(json.get("is_abstract").is_none());
        let json = serde_json::to_value(SyntaxNode::new(9, SyntaxKind::Method).abstract_()).unwrap();
        assert_eq!(json["is_abstract"], true);
    }

    #[test]
    fn diagnostic_names_match_the_snapshot_format() {
        for kind in [
            SyntaxKind::CompilationUnit,
            SyntaxKind::Namespace,
            SyntaxKind::Interface,
            SyntaxKind::Class,
            SyntaxKind::Struct,
            SyntaxKind::Enum,
            SyntaxKind::EnumMember,
            SyntaxKind::Method,
            SyntaxKind::Constructor,
            SyntaxKind::Property,
            SyntaxKind::Field,
            SyntaxKind::Parameter,
            SyntaxKind::TypeParameter,
            SyntaxKind::VariableDeclaration,
            SyntaxKind::VariableDeclarator,
            SyntaxKind::ForEach,
            SyntaxKind::Other,
        ] {
            assert_eq!(serde_json::to_value(kind).unwrap(), kind.as_str());
        }
        assert_eq!(
            SyntaxNode::new(7, SyntaxKind::ForEach).describe(),
            "node 7 (for_each)"
        );
    }
}
