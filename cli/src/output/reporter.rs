//! `TerminalReporter`: presentation-layer implementation of `ProgressReporter`.
//!
//! Drives a spinner on stderr while hosts run. Results are never printed
//! here: anything a host reports also ends up in its result row, so without
//! a TTY the reporter stays silent.

use std::cell::Cell;

use indicatif::ProgressBar;

use crate::application::ports::ProgressReporter;
use crate::output::{OutputContext, progress};

/// Spinner-backed progress reporter for a dispatch of `total` hosts.
pub struct TerminalReporter {
    spinner: Option<ProgressBar>,
    total: usize,
    done: Cell<usize>,
}

impl TerminalReporter {
    /// Create a reporter. The spinner only appears when the context allows
    /// progress output.
    #[must_use]
    pub fn new(ctx: &OutputContext, total: usize) -> Self {
        let spinner = (ctx.show_progress() && total > 0)
            .then(|| progress::spinner(&format!("running on {total} hosts...")));
        Self {
            spinner,
            total,
            done: Cell::new(0),
        }
    }

    /// Number of hosts reported so far.
    #[must_use]
    pub fn finished(&self) -> usize {
        self.done.get()
    }

    /// Remove the spinner before results are rendered.
    pub fn finish(&self) {
        if let Some(pb) = &self.spinner {
            pb.finish_and_clear();
        }
    }

    fn advance(&self, message: &str) {
        let done = self.done.get() + 1;
        self.done.set(done);
        if let Some(pb) = &self.spinner {
            pb.set_message(format!("{done}/{} hosts finished ({message})", self.total));
        }
    }
}

impl ProgressReporter for TerminalReporter {
    fn step(&self, message: &str) {
        self.advance(message);
    }

    fn warn(&self, message: &str) {
        if let Some(pb) = &self.spinner {
            pb.println(format!("  ! {message}"));
        }
        self.advance(message);
    }
}
