//! # identshrink: whole-program identifier shortening
//!
//! Renames every eligible declared identifier of a multi-file program to a
//! short generated name while keeping the program's meaning:
//!
//! - **Consistent references**: every use of a renamed declaration follows it,
//!   including interface implementations, overrides and constructor calls
//! - **Interface-first naming**: interface members are named in a first phase
//!   so implementations inherit the same identifier in the second
//! - **All-or-nothing commit**: conflicting proposals abort the run before any
//!   document text is touched
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         RenamePass                           │
//! ├──────────────────────────────────────────────────────────────┤
//! │ Walker (phase 1: interfaces) ─► Scheduler ─► Ledger          │
//! │        barrier                                               │
//! │ Walker (phase 2: the rest)   ─► Scheduler ─► Ledger          │
//! │        barrier                                               │
//! │ Commit: conflict check ─► one batched rewrite per document   │
//! └──────────────────────────────────────────────────────────────┘
//!            ▲ declared symbols, whole-program references
//!            │
//!      SemanticModel (external front end, or a ProgramSnapshot)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use identshrink::{ProgramSnapshot, RenameConfig, RenamePass};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (program, model) = ProgramSnapshot::from_file("program.json")?.into_model()?;
//!     let pass = RenamePass::new(RenameConfig::default(), Arc::new(model));
//!     let outcome = pass.run(&program).await?;
//!     println!("renamed {} symbols", outcome.stats.symbols_renamed);
//!     Ok(())
//! }
//! ```

#![warn(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Configuration and error handling
pub mod core {
    //! Configuration and error types shared by every stage.

    pub mod config;
    pub mod errors;
}

// Renaming engine
pub mod rename;

// Serializable semantic snapshots
pub mod snapshot;

// Re-export primary types for convenience
pub use crate::core::config::RenameConfig;
pub use crate::core::errors::{RenameError, Result};
pub use rename::{Program, RenameOutcome, RenamePass, SemanticModel};
pub use snapshot::{ProgramSnapshot, SnapshotModel};
