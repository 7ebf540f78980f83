//! hubfreight CLI library.
//!
//! Command handlers and output formatting for the `hubfreight-cli` binary.

pub mod commands;
pub mod output;
