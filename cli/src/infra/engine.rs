//! Process-backed implementation of the `EngineRunner` port.
//!
//! Each host gets a private temp directory, the source is written into it,
//! and the configured executable runs once on that file. The process exit
//! is the end of the realm; `destroy` removes the directory.

use std::path::Path;
use std::process::Output;
use std::sync::LazyLock;

use regex::Regex;
use tempfile::TempDir;

use crate::application::ports::{
    CommandRunner, EngineOutput, EngineRunner, EvalOptions, RunningAgent,
};
use crate::domain::{EngineError, HostDescriptor, ResultError};

/// Host types accepted by `--add`.
pub const SUPPORTED_HOST_TYPES: &[&str] = &[
    "boa", "ch", "d8", "engine262", "graaljs", "hermes", "jsc", "jsshell", "kiesel", "libjs",
    "nashorn", "node", "qjs", "spidermonkey", "xs",
];

/// Host types that need `--module` to evaluate a file as a module. Others
/// either key off the `.mjs` extension or have no module switch.
const MODULE_FLAG_TYPES: &[&str] = &["d8", "engine262", "graaljs", "jsshell", "qjs", "spidermonkey", "xs"];

/// An uncaught-exception line as engines print it, optionally prefixed by
/// `Uncaught ` or a `file:line: ` location.
static ERROR_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^(?:Uncaught\s+)?(?:\S+:\d+:\s+)?((?:[A-Z][A-Za-z0-9_$]*)?Error): ?(.*)$")
        .expect("valid regex")
});

/// Runs each host as a one-shot child process.
#[derive(Debug, Clone)]
pub struct ProcessEngineRunner<R> {
    runner: R,
}

impl<R> ProcessEngineRunner<R> {
    #[must_use]
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl<R: CommandRunner + Clone> EngineRunner for ProcessEngineRunner<R> {
    type Agent = ProcessAgent<R>;

    fn supported_types(&self) -> &[&'static str] {
        SUPPORTED_HOST_TYPES
    }

    async fn start(&self, host: &HostDescriptor) -> Result<ProcessAgent<R>, EngineError> {
        if !SUPPORTED_HOST_TYPES.contains(&host.host_type.as_str()) {
            return Err(EngineError::Start(format!(
                "host type \"{}\" is not supported",
                host.host_type
            )));
        }
        if !Path::new(&host.path).exists() {
            return Err(EngineError::Start(format!(
                "executable not found: {}",
                host.path
            )));
        }
        let workdir = tempfile::Builder::new()
            .prefix("eshost-")
            .tempdir()
            .map_err(|e| EngineError::Start(format!("cannot create working directory: {e}")))?;
        tracing::debug!(host = %host.name, dir = %workdir.path().display(), "agent started");
        Ok(ProcessAgent {
            runner: self.runner.clone(),
            host: host.clone(),
            workdir,
        })
    }
}

/// A started host: its descriptor plus the temp directory holding the
/// source file.
#[derive(Debug)]
pub struct ProcessAgent<R> {
    runner: R,
    host: HostDescriptor,
    workdir: TempDir,
}

impl<R: CommandRunner> RunningAgent for ProcessAgent<R> {
    async fn evaluate(
        &mut self,
        source: &str,
        options: EvalOptions,
    ) -> Result<EngineOutput, EngineError> {
        let file_name = if options.module { "input.mjs" } else { "input.js" };
        let file = self.workdir.path().join(file_name);
        tokio::fs::write(&file, source)
            .await
            .map_err(|e| EngineError::Evaluation(format!("cannot write source file: {e}")))?;

        let file_arg = file.display().to_string();
        let args = invocation_args(&self.host, options, &file_arg);
        tracing::debug!(host = %self.host.name, program = %self.host.path, ?args, is_async = options.is_async, "running engine");

        let output = self
            .runner
            .run(&self.host.path, &args)
            .await
            .map_err(|e| EngineError::Evaluation(format!("{e:#}")))?;
        Ok(classify_output(&output))
    }

    async fn destroy(self) -> Result<(), EngineError> {
        self.workdir
            .close()
            .map_err(|e| EngineError::Teardown(format!("cannot remove working directory: {e}")))
    }
}

/// Configured args, then the module switch when the host needs one, then
/// the source file.
fn invocation_args<'a>(host: &'a HostDescriptor, options: EvalOptions, file: &'a str) -> Vec<&'a str> {
    let mut args: Vec<&str> = host.arg_list().collect();
    if options.module && MODULE_FLAG_TYPES.contains(&host.host_type.as_str()) {
        args.push("--module");
    }
    args.push(file);
    args
}

/// Split a finished process into stdout and an optional thrown error.
///
/// Only a failing exit is inspected for an error: stderr first, then stdout
/// (the matching line is dropped from stdout). A failing exit with nothing
/// recognizable becomes a generic `Error`.
#[must_use]
pub fn classify_output(output: &Output) -> EngineOutput {
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    if output.status.success() {
        return EngineOutput {
            stdout,
            error: None,
        };
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    if let Some((_, error)) = find_error_line(&stderr) {
        return EngineOutput {
            stdout,
            error: Some(error),
        };
    }

    if let Some((index, error)) = find_error_line(&stdout) {
        let remaining: Vec<&str> = stdout
            .lines()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, line)| line)
            .collect();
        return EngineOutput {
            stdout: remaining.join("\n"),
            error: Some(error),
        };
    }

    let message = match stderr.trim() {
        "" => format!("process exited with {}", output.status),
        text => text.to_string(),
    };
    EngineOutput {
        stdout,
        error: Some(ResultError::new("Error", message)),
    }
}

fn find_error_line(text: &str) -> Option<(usize, ResultError)> {
    text.lines().enumerate().find_map(|(index, line)| {
        let caps = ERROR_LINE_RE.captures(line.trim())?;
        Some((index, ResultError::new(&caps[1], caps[2].trim())))
    })
}
