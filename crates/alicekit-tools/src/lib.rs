//! Child-process execution for the alice-tools command-line utilities.
//!
//! This crate owns the process boundary: resolving a tool name to an
//! executable, spawning it with a shell-style argument string, capturing both
//! output streams concurrently, and mapping the exit status to a typed result.
//! The tool binaries themselves are opaque; nothing here parses archive or
//! bytecode formats.

mod args;
mod error;
mod runner;
mod service;

pub use args::{quote, split_arguments};
pub use error::ToolError;
pub use runner::{ToolOutput, ToolRunner};
pub use service::{AliceTools, AliceToolsService, ArListing};
