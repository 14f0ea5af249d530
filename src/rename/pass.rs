//! The rename pass: interface phase, declaration phase, commit.

use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinSet;
use tracing::{info, info_span, Instrument};

use crate::core::config::RenameConfig;
use crate::core::errors::Result;

use super::commit::{self, EditPlan};
use super::name_generator::NameGenerator;
use super::policy::EligibilityPolicy;
use super::program::Program;
use super::progress::{NoProgress, ProgressSink};
use super::scheduler::RenameScheduler;
use super::semantic::SemanticModel;
use super::walker::{DeclarationWalker, Phase};

/// Summary of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameStats {
    /// Symbols that received a generated name.
    pub symbols_renamed: usize,
    /// Edits applied across all documents.
    pub edits_applied: usize,
    /// Documents whose text changed.
    pub documents_changed: usize,
    /// Proposals that repeated an already accepted (location, name) pair.
    pub duplicate_proposals: usize,
}

/// Result of [`RenamePass::run`].
#[derive(Debug, Clone)]
pub struct RenameOutcome {
    pub program: Program,
    pub plan: EditPlan,
    pub stats: RenameStats,
}

/// Renames every eligible declaration of a program.
///
/// Each call to [`run`](Self::run) starts from scratch with a fresh ledger and
/// name sequence; nothing carries over between runs.
pub struct RenamePass {
    config: RenameConfig,
    model: Arc<dyn SemanticModel>,
    progress: Arc<dyn ProgressSink>,
    names: NameGenerator,
}

impl RenamePass {
    pub fn new(config: RenameConfig, model: Arc<dyn SemanticModel>) -> Self {
        Self {
            config,
            model,
            progress: Arc::new(NoProgress),
            names: NameGenerator::new(),
        }
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    /// Use a different name sequence (e.g. a restricted alphabet).
    pub fn with_name_generator(mut self, names: NameGenerator) -> Self {
        self.names = names;
        self
    }

    pub fn config(&self) -> &RenameConfig {
        &self.config
    }

    /// Rename `program`, returning the rewritten copy.
    ///
    /// On any error (unresolvable declaration, conflicting proposals,
    /// overlapping edits) no edit is applied and `program` is the caller's
    /// only, unchanged version.
    pub async fn run(&self, program: &Program) -> Result<RenameOutcome> {
        self.config.validate()?;
        let started = Instant::now();

        let scheduler = RenameScheduler::new(
            Arc::clone(&self.model),
            EligibilityPolicy::new(&self.config.policy),
            self.names.clone(),
            self.config.concurrency.max_concurrent_lookups,
            Arc::clone(&self.progress),
        );

        for phase in [Phase::Interfaces, Phase::Declarations] {
            self.run_phase(&scheduler, program, phase)
                .instrument(info_span!("rename_phase", phase = phase.as_str()))
                .await?;
        }

        let ledger = scheduler.into_ledger()?;
        let symbols_renamed = ledger.handled_count();
        let entries = ledger.into_entries();

        let (renamed, plan) = commit::commit(program, &entries, self.progress.as_ref())?;
        let stats = RenameStats {
            symbols_renamed,
            edits_applied: plan.len(),
            documents_changed: plan.documents().count(),
            duplicate_proposals: plan.duplicates(),
        };
        info!(
            symbols = stats.symbols_renamed,
            edits = stats.edits_applied,
            documents = stats.documents_changed,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "rename pass finished"
        );

        Ok(RenameOutcome {
            program: renamed,
            plan,
            stats,
        })
    }

    /// Walk every document for `phase`, then wait for every task it spawned.
    ///
    /// Returning early drops the task set, which aborts whatever is still
    /// running; the caller discards the ledger in that case.
    async fn run_phase(
        &self,
        scheduler: &RenameScheduler,
        program: &Program,
        phase: Phase,
    ) -> Result<()> {
        self.progress
            .set_message(&format!("renaming {}", phase.as_str()));

        let mut tasks = JoinSet::new();
        let mut scheduled = 0;
        for document in program.document_ids() {
            let root = self.model.syntax_root(document)?;
            let mut walker = DeclarationWalker::new(scheduler, document, phase, &mut tasks);
            walker.walk(&root)?;
            scheduled += walker.scheduled();
        }
        info!(scheduled, "walk finished, awaiting reference lookups");

        while let Some(joined) = tasks.join_next().await {
            joined??;
        }
        Ok(())
    }
}
