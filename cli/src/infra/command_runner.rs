//! Engine process execution behind the `CommandRunner` port.
//!
//! Engines are untrusted shells: they may hang on an endless loop or never
//! close their pipes. Every run is bounded and a late child is killed.

use std::process::{Output, Stdio};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::application::ports::CommandRunner;

/// Default time an engine process may run before it is killed.
pub const DEFAULT_ENGINE_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs engine executables with stdin closed and both output streams
/// captured.
///
/// Dropping a timed-out `output()` future would leave the engine running,
/// so the deadline races the wait and kills the child explicitly.
#[derive(Debug, Clone, Copy)]
pub struct TokioCommandRunner {
    timeout: Duration,
}

impl TokioCommandRunner {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for TokioCommandRunner {
    fn default() -> Self {
        Self::new(DEFAULT_ENGINE_TIMEOUT)
    }
}

/// Read a captured stream to the end. A stream that breaks mid-read keeps
/// whatever arrived before the break.
async fn drain(stream: Option<impl AsyncRead + Unpin>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut stream) = stream {
        if let Err(err) = stream.read_to_end(&mut buf).await {
            tracing::debug!(error = %err, "engine output stream closed early");
        }
    }
    buf
}

impl CommandRunner for TokioCommandRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        self.run_with_timeout(program, args, self.timeout).await
    }

    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output> {
        let mut child = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to spawn {program}"))?;
        tracing::debug!(program, pid = child.id(), "engine spawned");

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let finished = async {
            let (status, stdout, stderr) = tokio::join!(child.wait(), drain(stdout), drain(stderr));
            let status = status.with_context(|| format!("waiting for {program}"))?;
            anyhow::Ok(Output { status, stdout, stderr })
        };

        // The deadline branch needs `child` back, so the wait future is
        // scoped to the select.
        let outcome = tokio::select! {
            output = finished => Some(output),
            () = tokio::time::sleep(timeout) => None,
        };
        match outcome {
            Some(output) => output,
            None => {
                if let Err(err) = child.kill().await {
                    tracing::debug!(program, error = %err, "killing timed-out engine failed");
                }
                anyhow::bail!("{program} timed out after {}s", timeout.as_secs())
            }
        }
    }
}
