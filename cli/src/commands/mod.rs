//! Command implementations

pub mod eval;
pub mod hosts;
