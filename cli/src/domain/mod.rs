//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod host;
pub mod selection;

pub use aggregate::{
    AggregateOptions, AggregatedRow, Aggregation, HostResult, INLINE_DELIMITER, ResultAggregator,
    ResultError, TABLE_DELIMITER, Verdict,
};
pub use config::EshostConfig;
pub use error::{ConfigError, EngineError, HostError};
pub use host::{HostDescriptor, HostRegistry};
pub use selection::{HostSelection, resolve};
