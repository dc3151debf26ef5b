//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::PathBuf;
use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::domain::{EngineError, EshostConfig, HostDescriptor, ResultError};

// ── Value Types ───────────────────────────────────────────────────────────────

/// Per-run evaluation flags forwarded to every host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalOptions {
    /// Wait for the host's realm to be torn down before collecting output.
    pub is_async: bool,
    /// Evaluate the source with module semantics.
    pub module: bool,
}

/// What an engine produced for one evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOutput {
    pub stdout: String,
    /// Set when the evaluated program threw.
    pub error: Option<ResultError>,
}

// ── Engine Ports ──────────────────────────────────────────────────────────────

/// Turns a host record into a running agent that can evaluate code.
#[allow(async_fn_in_trait)]
pub trait EngineRunner {
    type Agent: RunningAgent;

    /// Host types this runner knows how to drive.
    fn supported_types(&self) -> &[&'static str];

    /// Prepare an agent for `host`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Start` if the host cannot be started.
    async fn start(&self, host: &HostDescriptor) -> Result<Self::Agent, EngineError>;
}

/// One started host. `evaluate` then `destroy`, each awaited in turn.
#[allow(async_fn_in_trait)]
pub trait RunningAgent {
    /// Run `source` and capture its output.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Evaluation` if the engine could not be driven.
    /// A program that throws is not an error here; it is reported through
    /// `EngineOutput::error`.
    async fn evaluate(
        &mut self,
        source: &str,
        options: EvalOptions,
    ) -> Result<EngineOutput, EngineError>;

    /// Tear down the agent's execution context.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Teardown` if cleanup fails.
    async fn destroy(self) -> Result<(), EngineError>;
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts host configuration persistence (load/save).
pub trait ConfigStore {
    /// Load the configuration. Must be idempotent; a missing file is an
    /// empty configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    fn load(&self) -> Result<EshostConfig>;
    /// Persist the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn save(&self, config: &EshostConfig) -> Result<()>;
    /// Location of the backing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined.
    fn path(&self) -> Result<PathBuf>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

/// Reporter that discards everything.
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn step(&self, _: &str) {}
    fn warn(&self, _: &str) {}
}
