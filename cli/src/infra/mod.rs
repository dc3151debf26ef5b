//! Infrastructure layer — concrete implementations of application ports.
//!
//! Everything that touches the filesystem, spawns processes, or reads the
//! environment lives here.

pub mod command_runner;
pub mod config;
pub mod engine;

pub use command_runner::TokioCommandRunner;
pub use config::JsonConfigStore;
pub use engine::{ProcessEngineRunner, SUPPORTED_HOST_TYPES};
