//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod algorithms;
pub mod check;
pub mod generate;
