//! Terminal spinner that follows the pipeline stages.

use std::time::Duration;

use fusion_core::{ProgressReporter, Stage};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::text::Messages;

const TICK: Duration = Duration::from_millis(100);

/// Shows the localized label of the running stage next to a spinner.
pub struct SpinnerReporter {
    bar: ProgressBar,
    messages: &'static Messages,
}

impl SpinnerReporter {
    pub fn new(messages: &'static Messages) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            bar.set_style(style);
        }
        bar.enable_steady_tick(TICK);
        bar.set_message(messages.start);
        Self { bar, messages }
    }

    /// A reporter that draws nothing, for non-interactive output.
    pub fn hidden(messages: &'static Messages) -> Self {
        Self {
            bar: ProgressBar::hidden(),
            messages,
        }
    }

    /// Stops the spinner, leaving `message` on screen.
    pub fn fail(&self, message: &'static str) {
        self.bar.abandon_with_message(message);
    }

    /// Removes the spinner without a final message.
    pub fn clear(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressReporter for SpinnerReporter {
    fn stage(&self, stage: Stage) {
        let label = self.messages.stage(stage);
        info!(stage = %stage, "{label}");
        if stage == Stage::Done {
            self.bar.finish_with_message(label);
        } else {
            self.bar.set_message(label);
        }
    }
}
