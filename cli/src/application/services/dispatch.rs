//! Application service — run one source program on every selected host.
//!
//! Every host runs concurrently; the call returns once all of them have
//! produced a `HostResult`. Failures are per host and come back as data, so
//! they are only traced at `debug`.

use futures_util::future::join_all;

use crate::application::ports::{EngineRunner, EvalOptions, ProgressReporter, RunningAgent};
use crate::domain::{HostDescriptor, HostRegistry, HostResult, ResultError};

/// Error name used for a selected host with no configuration entry.
pub const HOST_NOT_FOUND: &str = "HostNotFound";

/// Run `source` on each named host and collect one result per name, in
/// input order.
///
/// The registry is only borrowed, so it cannot change during the run.
pub async fn dispatch(
    names: &[String],
    registry: &HostRegistry,
    runner: &impl EngineRunner,
    source: &str,
    options: EvalOptions,
    reporter: &impl ProgressReporter,
) -> Vec<HostResult> {
    tracing::debug!(hosts = names.len(), ?options, "dispatching");
    let runs = names
        .iter()
        .map(|name| run_named(name, registry, runner, source, options, reporter));
    join_all(runs).await
}

async fn run_named(
    name: &str,
    registry: &HostRegistry,
    runner: &impl EngineRunner,
    source: &str,
    options: EvalOptions,
    reporter: &impl ProgressReporter,
) -> HostResult {
    let result = match registry.get(name) {
        Ok(host) => run_host(host, runner, source, options).await,
        Err(err) => {
            tracing::debug!(host = name, "selected host is not configured");
            HostResult::failed(name, ResultError::new(HOST_NOT_FOUND, err.to_string()))
        }
    };
    match &result.error {
        Some(err) if err.name.starts_with("Engine") || err.name == HOST_NOT_FOUND => {
            reporter.warn(&format!("{name}: {}", err.message));
        }
        _ => reporter.step(&format!("{name} finished")),
    }
    result
}

/// start → evaluate → destroy for one host. The agent is destroyed even
/// when evaluation fails; a teardown failure after a good evaluation keeps
/// the captured stdout.
async fn run_host(
    host: &HostDescriptor,
    runner: &impl EngineRunner,
    source: &str,
    options: EvalOptions,
) -> HostResult {
    let mut agent = match runner.start(host).await {
        Ok(agent) => agent,
        Err(err) => {
            tracing::debug!(host = %host.name, error = %err, "engine failed to start");
            return HostResult::failed(&host.name, err.to_result_error());
        }
    };

    let evaluated = agent.evaluate(source, options).await;
    let destroyed = agent.destroy().await;

    match (evaluated, destroyed) {
        (Ok(output), Ok(())) => {
            tracing::debug!(host = %host.name, threw = output.error.is_some(), "evaluated");
            HostResult {
                host_name: host.name.clone(),
                stdout: output.stdout,
                error: output.error,
            }
        }
        (Ok(output), Err(err)) => {
            tracing::debug!(host = %host.name, error = %err, "engine teardown failed");
            HostResult {
                host_name: host.name.clone(),
                stdout: output.stdout,
                error: Some(err.to_result_error()),
            }
        }
        (Err(err), destroyed) => {
            if let Err(teardown) = destroyed {
                tracing::debug!(host = %host.name, error = %teardown, "engine teardown failed");
            }
            tracing::debug!(host = %host.name, error = %err, "engine evaluation failed");
            HostResult::failed(&host.name, err.to_result_error())
        }
    }
}
