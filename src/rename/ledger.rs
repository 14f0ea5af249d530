//! Shared record of handled symbols and proposed edits.
//!
//! Every rename task of a run writes into one [`RenameLedger`]. The handled
//! set and the proposal table sit behind a single lock so that deciding to
//! handle a symbol, marking it, and recording its declaration sites happen as
//! one step: two tasks racing on the same symbol produce exactly one winner.

use ahash::AHashSet;
use indexmap::{IndexMap, IndexSet};
use parking_lot::Mutex;

use super::symbol::{RenameProposal, SourceLocation, SymbolId};

/// Symbols that already received a name during this run.
#[derive(Debug, Default, Clone)]
pub struct HandledSet {
    ids: AHashSet<SymbolId>,
}

impl HandledSet {
    pub fn contains(&self, id: SymbolId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn insert(&mut self, id: SymbolId) -> bool {
        self.ids.insert(id)
    }
}

#[derive(Debug, Default)]
struct LedgerState {
    handled: HandledSet,
    proposals: IndexMap<SourceLocation, IndexSet<String>>,
    recorded: usize,
}

impl LedgerState {
    fn record(&mut self, location: SourceLocation, name: &str) {
        self.recorded += 1;
        let names = self.proposals.entry(location).or_default();
        if !names.contains(name) {
            names.insert(name.to_string());
        }
    }
}

/// Shared record of one run: which symbols are handled and every name
/// proposed for every source location.
#[derive(Debug, Default)]
pub struct RenameLedger {
    state: Mutex<LedgerState>,
}

impl RenameLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_handled(&self, id: SymbolId) -> bool {
        self.state.lock().handled.contains(id)
    }

    /// Mark `id` handled if `admit` accepts it, recording `declarations` under
    /// `name` in the same critical section.
    ///
    /// Returns whether this caller won the symbol. `admit` sees the handled
    /// set as it is under the lock, so an eligibility check that consults it
    /// cannot be invalidated by a concurrent claim.
    pub fn claim<I>(
        &self,
        id: SymbolId,
        admit: impl FnOnce(&HandledSet) -> bool,
        declarations: I,
        name: &str,
    ) -> bool
    where
        I: IntoIterator<Item = SourceLocation>,
    {
        let mut state = self.state.lock();
        if !admit(&state.handled) || !state.handled.insert(id) {
            return false;
        }
        for location in declarations {
            state.record(location, name);
        }
        true
    }

    /// Record a proposal for one location.
    pub fn record(&self, location: SourceLocation, name: &str) {
        self.state.lock().record(location, name);
    }

    /// Record the same name at several locations under one lock.
    pub fn record_all(&self, locations: impl IntoIterator<Item = SourceLocation>, name: &str) {
        let mut state = self.state.lock();
        for location in locations {
            state.record(location, name);
        }
    }

    /// Number of distinct locations with at least one proposal.
    pub fn len(&self) -> usize {
        self.state.lock().proposals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn handled_count(&self) -> usize {
        self.state.lock().handled.len()
    }

    /// Consume the ledger, handing its proposals to the commit stage.
    pub fn into_entries(self) -> LedgerEntries {
        let state = self.state.into_inner();
        LedgerEntries {
            proposals: state.proposals,
            recorded: state.recorded,
        }
    }
}

/// Frozen proposal table: each location with every distinct name proposed
/// for it, in first-proposed order.
#[derive(Debug, Default, Clone)]
pub struct LedgerEntries {
    proposals: IndexMap<SourceLocation, IndexSet<String>>,
    recorded: usize,
}

impl LedgerEntries {
    /// Build entries directly from proposals.
    pub fn from_proposals(proposals: impl IntoIterator<Item = RenameProposal>) -> Self {
        let mut state = LedgerState::default();
        for proposal in proposals {
            state.record(proposal.location, &proposal.name);
        }
        Self {
            proposals: state.proposals,
            recorded: state.recorded,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SourceLocation, &IndexSet<String>)> {
        self.proposals.iter()
    }

    /// Names proposed for `location`, if any.
    pub fn names_at(&self, location: &SourceLocation) -> Option<&IndexSet<String>> {
        self.proposals.get(location)
    }

    pub fn len(&self) -> usize {
        self.proposals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proposals.is_empty()
    }

    /// Total proposals recorded, duplicates included.
    pub fn recorded(&self) -> usize {
        self.recorded
    }
}
