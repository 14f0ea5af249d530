//! Console spinner for a rename run.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use identshrink::rename::ProgressSink;

pub struct SpinnerProgress {
    bar: ProgressBar,
}

impl SpinnerProgress {
    pub fn new(tag: &str) -> anyhow::Result<Self> {
        let bar = ProgressBar::new_spinner();
        bar.set_style(ProgressStyle::with_template(&format!(
            "{{spinner:.blue}} {tag} [{{pos}}] {{msg}}"
        ))?);
        bar.enable_steady_tick(Duration::from_millis(100));
        Ok(Self { bar })
    }

    pub fn finish(&self, message: String) {
        self.bar.finish_with_message(message);
    }

    pub fn abandon(&self) {
        self.bar.abandon();
    }
}

impl ProgressSink for SpinnerProgress {
    fn report(&self, n: u64) {
        self.bar.inc(n);
    }

    fn set_message(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }
}
