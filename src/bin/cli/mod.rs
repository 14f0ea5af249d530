//! CLI Module Organization
//!
//! - args: CLI argument structures
//! - commands: command execution
//! - progress: console spinner implementing the library's progress sink

pub mod args;
pub mod commands;
pub mod progress;

pub use args::*;
pub use commands::*;
