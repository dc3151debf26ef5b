//! Unit tests for eshost
//!
//! These tests use mocked dependencies and run fast without external I/O.

mod architecture;
mod mocks;
