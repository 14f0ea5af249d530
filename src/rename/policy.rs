//! Which declared symbols may receive a generated name.

use ahash::AHashSet;

use crate::core::config::PolicyConfig;

use super::ledger::HandledSet;
use super::symbol::{Location, Symbol, SymbolKind};

/// Entry-point type the host runtime instantiates by name.
pub const HOST_ENTRY_TYPE: &str = "Program";

/// Methods the host runtime calls by name.
pub const HOST_METHODS: &[&str] = &["Save", "Main"];

/// Fixed allow/deny rules tied to the host runtime's calling convention.
///
/// [`HOST_ENTRY_TYPE`] and [`HOST_METHODS`] are always protected; the
/// configuration can only add names on top of them.
#[derive(Debug, Clone)]
pub struct EligibilityPolicy {
    protected_types: AHashSet<String>,
    protected_methods: AHashSet<String>,
}

impl EligibilityPolicy {
    pub fn new(config: &PolicyConfig) -> Self {
        let protected_types = std::iter::once(HOST_ENTRY_TYPE.to_string())
            .chain(std::iter::once(config.entry_type_name.clone()))
            .chain(config.protected_type_names.iter().cloned())
            .collect();
        let protected_methods = HOST_METHODS
            .iter()
            .map(|name| (*name).to_string())
            .chain(config.protected_method_names.iter().cloned())
            .collect();
        Self {
            protected_types,
            protected_methods,
        }
    }

    /// Whether `symbol` may be renamed now.
    ///
    /// `in_source` decides whether a declaration location is editable text of
    /// the program; at least one declaration must be.
    pub fn can_rename(
        &self,
        symbol: &Symbol,
        handled: &HandledSet,
        in_source: impl Fn(&Location) -> bool,
    ) -> bool {
        if symbol.kind == SymbolKind::Namespace
            || handled.contains(symbol.id)
            || symbol.is_implicitly_declared
            || symbol.is_extern
            || !symbol.can_be_referenced_by_name
        {
            return false;
        }
        if !symbol.locations.iter().any(in_source) {
            return false;
        }
        !self.is_protected(symbol)
    }

    /// Whether the host runtime needs `symbol` to keep its name.
    pub fn is_protected(&self, symbol: &Symbol) -> bool {
        match symbol.kind {
            SymbolKind::NamedType => self.protected_types.contains(&symbol.name),
            SymbolKind::Method => self.protected_methods.contains(&symbol.name),
            _ => false,
        }
    }
}

impl Default for EligibilityPolicy {
    fn default() -> Self {
        Self::new(&PolicyConfig::default())
    }
}
