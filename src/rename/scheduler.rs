//! Assigning names to symbols and propagating them to every reference.
//!
//! A walker hands each declaration to [`RenameScheduler::schedule_root`],
//! which claims the symbol synchronously and spawns one task for the slow
//! part: the whole-program reference lookup. Anything that lookup discovers
//! (implementations, overridden members, constructors, interface members) is
//! scheduled inline inside that same task, so a phase's `JoinSet` is the only
//! place tasks are registered and awaiting it drains all nested work.

use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use parking_lot::Mutex;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::debug;

use crate::core::errors::{Result, RenameError};

use super::ledger::RenameLedger;
use super::name_generator::NameGenerator;
use super::policy::EligibilityPolicy;
use super::progress::ProgressSink;
use super::semantic::SemanticModel;
use super::symbol::{ReferenceLocation, SourceLocation, Symbol};

/// Shared state of one rename run.
struct SchedulerShared {
    model: Arc<dyn SemanticModel>,
    policy: EligibilityPolicy,
    ledger: RenameLedger,
    names: Mutex<NameGenerator>,
    lookups: Semaphore,
    progress: Arc<dyn ProgressSink>,
}

/// Cheaply cloneable handle; clones share one ledger and one name sequence.
#[derive(Clone)]
pub struct RenameScheduler {
    shared: Arc<SchedulerShared>,
}

impl RenameScheduler {
    pub fn new(
        model: Arc<dyn SemanticModel>,
        policy: EligibilityPolicy,
        names: NameGenerator,
        max_concurrent_lookups: usize,
        progress: Arc<dyn ProgressSink>,
    ) -> Self {
        Self {
            shared: Arc::new(SchedulerShared {
                model,
                policy,
                ledger: RenameLedger::new(),
                names: Mutex::new(names),
                lookups: Semaphore::new(max_concurrent_lookups.max(1)),
                progress,
            }),
        }
    }

    pub fn model(&self) -> &Arc<dyn SemanticModel> {
        &self.shared.model
    }

    pub fn ledger(&self) -> &RenameLedger {
        &self.shared.ledger
    }

    /// Release the ledger once every task of the run has finished.
    ///
    /// Fails if another handle to this scheduler is still alive, which means
    /// some task was not awaited.
    pub fn into_ledger(self) -> Result<RenameLedger> {
        Arc::try_unwrap(self.shared)
            .map(|shared| shared.ledger)
            .map_err(|_| RenameError::internal("rename ledger is still shared by a running task"))
    }

    /// Draw a fresh name from the run's generator.
    pub fn next_name(&self) -> String {
        self.shared.names.lock().next_name()
    }

    /// Entry point used by the walkers.
    ///
    /// The symbol is claimed before returning, so a later walker visit or a
    /// concurrently running task sees it as handled. Reference discovery runs
    /// in a new task registered in `tasks`.
    pub fn schedule_root(
        &self,
        symbol: Arc<Symbol>,
        name: String,
        tasks: &mut JoinSet<Result<()>>,
    ) -> bool {
        if !self.claim(&symbol, &name) {
            return false;
        }
        let this = self.clone();
        tasks.spawn(async move { this.propagate(&symbol, &name).await });
        true
    }

    /// Schedule `symbol` under `name` and run its reference work inline.
    ///
    /// A no-op when the policy rejects the symbol, including when it was
    /// already handled.
    pub fn schedule(&self, symbol: Arc<Symbol>, name: String) -> BoxFuture<'_, Result<()>> {
        async move {
            if self.claim(&symbol, &name) {
                self.propagate(&symbol, &name).await?;
            }
            Ok(())
        }
        .boxed()
    }

    /// Eligibility check, handled-marking and declaration recording as one
    /// atomic step on the ledger.
    fn claim(&self, symbol: &Symbol, name: &str) -> bool {
        let shared = &self.shared;
        let model = &shared.model;
        let won = shared.ledger.claim(
            symbol.id,
            |handled| {
                shared
                    .policy
                    .can_rename(symbol, handled, |loc| model.location_is_in_source(loc))
            },
            self.declaration_sites(symbol),
            name,
        );
        if won {
            debug!(symbol = %symbol.id, from = %symbol.name, to = %name, "scheduled rename");
        }
        won
    }

    fn declaration_sites(&self, symbol: &Symbol) -> Vec<SourceLocation> {
        let model = &self.shared.model;
        symbol
            .locations
            .iter()
            .filter(|loc| model.location_is_in_source(loc))
            .filter_map(|loc| loc.as_source().copied())
            .collect()
    }

    /// Reference work for a symbol this task has just claimed.
    async fn propagate(&self, symbol: &Symbol, name: &str) -> Result<()> {
        self.rename_references(symbol, name).await?;

        if symbol.is_named_type() {
            for ctor_id in &symbol.constructors {
                let ctor = self.shared.model.symbol(*ctor_id)?;
                self.rename_constructor(&ctor, name).await?;
            }

            if symbol.is_interface() {
                for member_id in &symbol.members {
                    let member = self.shared.model.symbol(*member_id)?;
                    let fresh = self.next_name();
                    self.schedule(member, fresh).await?;
                }
            }
        }

        self.shared.progress.report(1);
        Ok(())
    }

    /// Constructors share their type's name. They bypass the eligibility
    /// policy because a compiler-synthesized default constructor still has
    /// `new T()` call sites that must follow the type.
    async fn rename_constructor(&self, ctor: &Symbol, name: &str) -> Result<()> {
        let won = self.shared.ledger.claim(
            ctor.id,
            |handled| !handled.contains(ctor.id),
            self.declaration_sites(ctor),
            name,
        );
        if won {
            debug!(ctor = %ctor.id, to = %name, "scheduled constructor rename");
            self.rename_references(ctor, name).await?;
        }
        Ok(())
    }

    async fn rename_references(&self, symbol: &Symbol, name: &str) -> Result<()> {
        let groups = {
            let _permit = self.shared.lookups.acquire().await.map_err(|e| {
                RenameError::Concurrency {
                    message: format!("reference lookup limiter closed: {e}"),
                }
            })?;
            self.shared.model.find_references(symbol).await?
        };

        for group in groups {
            let sites: Vec<SourceLocation> = group
                .locations
                .iter()
                .filter_map(|reference| self.editable_site(reference))
                .collect();
            debug!(
                symbol = %symbol.id,
                definition = %group.definition.id,
                sites = sites.len(),
                "recording references"
            );
            self.shared.ledger.record_all(sites, name);

            let definition = group.definition.id;
            if definition != symbol.id && !self.shared.ledger.is_handled(definition) {
                self.schedule(Arc::clone(&group.definition), name.to_string())
                    .await?;
            }
        }
        Ok(())
    }

    /// The source span to rewrite for a reference, if it is one.
    fn editable_site(&self, reference: &ReferenceLocation) -> Option<SourceLocation> {
        let model = &self.shared.model;
        if !model.location_is_in_source(&reference.location)
            || model.location_is_implicit(reference)
            || model.is_constructor_initializer(reference)
        {
            return None;
        }
        reference
            .location
            .as_source()
            .map(|loc| SourceLocation::new(model.document_id_for(loc), loc.span))
    }
}
