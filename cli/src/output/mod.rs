//! Output formatting module

pub mod plain;
pub mod progress;
pub mod reporter;
pub mod styles;
pub mod table;

use std::io::Write as _;

use console::Term;
use owo_colors::OwoColorize as _;

use crate::domain::AggregatedRow;

pub use plain::PlainRenderer;
pub use reporter::TerminalReporter;
pub use styles::Styles;
pub use table::TableRenderer;

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether stdout is a TTY.
    pub is_tty: bool,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let env_no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        let use_colors = !no_color && is_tty && !env_no_color;

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self {
            styles,
            is_tty,
            quiet,
        }
    }

    /// Check if progress indicators should be shown.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }

    /// Print a success message. Suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("{}", msg.style(self.styles.success));
        }
    }

    /// Print an info message. Suppressed when `quiet`.
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("{}", msg.style(self.styles.info));
        }
    }

    /// Print a warning message to stderr. Suppressed when `quiet`.
    pub fn warn(&self, msg: &str) {
        if !self.quiet {
            eprintln!("{}", msg.style(self.styles.warning));
        }
    }

    /// Print a dimmed note. Suppressed when `quiet`.
    pub fn note(&self, msg: &str) {
        if !self.quiet {
            println!("{}", msg.style(self.styles.dim));
        }
    }
}

/// Result renderer selected for this run.
pub enum Renderer<'a> {
    /// `####` headings, labels joined with `", "`.
    Plain(PlainRenderer<'a>),
    /// Box or markdown table, labels stacked one per line.
    Table(TableRenderer<'a>),
}

impl Renderer<'_> {
    /// Label delimiter the aggregator should use for coalesced rows.
    #[must_use]
    pub fn delimiter(&self) -> &'static str {
        match self {
            Self::Plain(r) => r.delimiter(),
            Self::Table(r) => r.delimiter(),
        }
    }

    /// Format rows (and the source, when shown) without printing.
    #[must_use]
    pub fn format_results(&self, source: Option<&str>, rows: &[AggregatedRow]) -> String {
        match self {
            Self::Plain(r) => r.format(source, rows),
            Self::Table(r) => r.format(source, rows),
        }
    }

    /// Write the formatted results to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if stdout cannot be written.
    pub fn render_results(
        &self,
        source: Option<&str>,
        rows: &[AggregatedRow],
    ) -> std::io::Result<()> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(self.format_results(source, rows).as_bytes())?;
        stdout.flush()
    }
}

fn format_source(source: &str, styles: &Styles) -> String {
    format!(
        "{}\n{}\n\n",
        "## Source".style(styles.header),
        source.trim_end()
    )
}
