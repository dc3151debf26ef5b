//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

use crate::domain::aggregate::ResultError;

// ── Host registry errors ──────────────────────────────────────────────────────

/// Errors raised by host registry mutations and lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("Host \"{0}\" already exists. Delete it first: eshost --delete {0}")]
    DuplicateHost(String),

    #[error("Host \"{0}\" not found")]
    NotFound(String),

    #[error("Host type \"{host_type}\" not supported. Supported host types are: {supported}")]
    UnsupportedType { host_type: String, supported: String },
}

// ── Engine errors ─────────────────────────────────────────────────────────────

/// Infrastructure failures raised by an engine runner.
///
/// These describe the runner failing to do its job, not the evaluated
/// program throwing. They are always caught per host and turned into a
/// `HostResult` error payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("{0}")]
    Start(String),

    #[error("{0}")]
    Evaluation(String),

    #[error("{0}")]
    Teardown(String),
}

impl EngineError {
    /// Stable name used as the error name in a host's result row.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Start(_) => "EngineStartFailure",
            Self::Evaluation(_) => "EngineEvaluationFailure",
            Self::Teardown(_) => "EngineTeardownFailure",
        }
    }

    /// Convert into the error payload carried by a host result.
    #[must_use]
    pub fn to_result_error(&self) -> ResultError {
        ResultError::new(self.kind(), self.to_string())
    }
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to the persisted host configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed config: {0}")]
    Malformed(String),

    #[error("malformed config: host \"{name}\": {reason}")]
    MalformedHost { name: String, reason: String },
}
