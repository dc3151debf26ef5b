//! `eshost [-e <code> | <file>]` — run a program on the selected hosts.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};

use crate::app::AppContext;
use crate::application::ports::EvalOptions;
use crate::application::services::config_service::load_config;
use crate::application::services::dispatch::dispatch;
use crate::domain::{AggregateOptions, HostSelection, ResultAggregator, resolve};
use crate::output::TerminalReporter;

/// Where the program comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// `-e <code>`.
    Inline(String),
    /// A source file on disk.
    File(PathBuf),
}

/// Arguments for an evaluation run.
#[derive(Debug, Clone)]
pub struct EvalArgs {
    pub input: Input,
    pub selection: HostSelection,
    pub coalesce: bool,
    pub unanimous: bool,
    pub show_source: bool,
    pub is_async: bool,
    pub module: bool,
}

impl EvalArgs {
    /// `-m/--module`, or a `.mjs` input file.
    #[must_use]
    pub fn eval_options(&self) -> EvalOptions {
        let module_file = match &self.input {
            Input::File(path) => path.extension().is_some_and(|ext| ext == "mjs"),
            Input::Inline(_) => false,
        };
        EvalOptions {
            is_async: self.is_async,
            module: self.module || module_file,
        }
    }
}

/// Read the program text.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub async fn read_source(input: &Input) -> Result<String> {
    match input {
        Input::Inline(code) => Ok(code.clone()),
        Input::File(path) => read_file(path).await,
    }
}

async fn read_file(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("cannot read {}", path.display()))
}

/// Run an evaluation and render the results.
///
/// Engine failures end up in the rendered rows and never fail the command.
///
/// # Errors
///
/// Returns an error if the configuration or the input cannot be read, or
/// stdout cannot be written.
pub async fn run(app: &AppContext, args: &EvalArgs) -> Result<ExitCode> {
    let config = load_config(&app.config_store)?;
    let source = read_source(&args.input).await?;
    let options = args.eval_options();

    let names = resolve(&args.selection, &config.hosts);
    tracing::debug!(?names, "resolved host selection");
    if names.is_empty() {
        app.output.warn("No hosts selected");
    }

    let reporter = TerminalReporter::new(&app.output, names.len());
    let results = dispatch(
        &names,
        &config.hosts,
        &app.engine,
        &source,
        options,
        &reporter,
    )
    .await;
    reporter.finish();

    let renderer = app.renderer();
    let mut aggregator = ResultAggregator::new();
    for result in &results {
        aggregator.record(result);
    }
    let aggregation = aggregator.finalize(&AggregateOptions {
        coalesce: args.coalesce,
        unanimous: args.unanimous,
        delimiter: renderer.delimiter().to_string(),
    });

    if aggregation.render {
        let shown = args.show_source.then_some(source.as_str());
        renderer
            .render_results(shown, &aggregation.rows)
            .context("cannot write results")?;
    }

    Ok(ExitCode::from(aggregation.verdict.exit_code()))
}
