//! Progress reporting hooks.
//!
//! Sinks are side-effect only; nothing in the renamer reads progress back.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

pub trait ProgressSink: Send + Sync {
    /// Record `n` units of completed work.
    fn report(&self, n: u64);

    /// Replace the human-readable status line.
    fn set_message(&self, message: &str);
}

/// Sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _n: u64) {}

    fn set_message(&self, _message: &str) {}
}

/// Sink that accumulates reports in memory.
#[derive(Debug, Default)]
pub struct ProgressCounter {
    completed: AtomicU64,
    message: Mutex<Option<String>>,
}

impl ProgressCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn completed(&self) -> u64 {
        self.completed.load(Ordering::Relaxed)
    }

    pub fn message(&self) -> Option<String> {
        self.message.lock().clone()
    }
}

impl ProgressSink for ProgressCounter {
    fn report(&self, n: u64) {
        self.completed.fetch_add(n, Ordering::Relaxed);
    }

    fn set_message(&self, message: &str) {
        *self.message.lock() = Some(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_accumulates_reports_and_keeps_last_message() {
        let counter = ProgressCounter::new();
        counter.report(2);
        counter.report(3);
        counter.set_message("phase 1");
        counter.set_message("commit");
        assert_eq!(counter.completed(), 5);
        assert_eq!(counter.message().as_deref(), Some("commit"));
    }
}
