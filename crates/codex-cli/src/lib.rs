//! Codex CLI library
//!
//! Argument definitions and command implementations for the `codex` binary.

pub mod cli;
pub mod commands;
