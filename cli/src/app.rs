//! Application context — unified state passed to every command handler.
//!
//! Built once in `Cli::run()` from the top-level flags and handed to the
//! eval and host-management commands as `&AppContext`.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

use crate::infra::{JsonConfigStore, ProcessEngineRunner, TokioCommandRunner};
use crate::output::{OutputContext, PlainRenderer, Renderer, TableRenderer};

/// Result rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// `####` headings (default).
    Plain,
    /// Box-drawn table.
    Table,
    /// Markdown pipe table.
    Markdown,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Render results as a table.
    pub table: bool,
    /// Render the table as markdown.
    pub markdown: bool,
}

/// Behaviour flags.
pub struct BehaviourFlags {
    /// Skip interactive prompts (also set by `CI` / `ESHOST_YES` env vars).
    pub yes: bool,
    /// Config file given with `--config`.
    pub config: Option<PathBuf>,
    /// Per-engine process timeout.
    pub timeout: Duration,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Behaviour options.
    pub behaviour: BehaviourFlags,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Result rendering mode.
    pub mode: OutputMode,
    /// Host configuration file.
    pub config_store: JsonConfigStore,
    /// Runs engine executables as child processes.
    pub engine: ProcessEngineRunner<TokioCommandRunner>,
    /// When `true`, skip interactive prompts and use defaults.
    ///
    /// Set when `--yes` / `-y` is passed, or when the `CI` or `ESHOST_YES`
    /// environment variables are present.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    #[must_use]
    pub fn new(flags: AppFlags) -> Self {
        let ci_env = std::env::var("CI").is_ok() || std::env::var("ESHOST_YES").is_ok();
        let non_interactive = flags.behaviour.yes || ci_env;

        // --markdown implies --table.
        let mode = if flags.output.markdown {
            OutputMode::Markdown
        } else if flags.output.table {
            OutputMode::Table
        } else {
            OutputMode::Plain
        };

        Self {
            output: OutputContext::new(flags.output.no_color, flags.output.quiet),
            mode,
            config_store: JsonConfigStore::new(flags.behaviour.config),
            engine: ProcessEngineRunner::new(TokioCommandRunner::new(flags.behaviour.timeout)),
            non_interactive,
        }
    }

    /// Returns the `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Plain => Renderer::Plain(PlainRenderer::new(&self.output)),
            OutputMode::Table => Renderer::Table(TableRenderer::new(&self.output, false)),
            OutputMode::Markdown => Renderer::Table(TableRenderer::new(&self.output, true)),
        }
    }

    /// Ask the user for confirmation.
    ///
    /// When `non_interactive` is `true` (CI, `--yes` flag, or `ESHOST_YES` env),
    /// returns `true` immediately without prompting.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails (e.g. no TTY available).
    pub fn confirm(&self, prompt: &str) -> Result<bool> {
        if self.non_interactive {
            return Ok(true);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()?;
        Ok(confirmed)
    }
}
