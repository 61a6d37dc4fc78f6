//! Shopsense CLI library.
//!
//! Command definitions, command implementations, and output formatting for
//! the `shopsense` binary.

#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;

pub use cli::{AnalyzeArgs, Cli, CliFormat, Command};
pub use error::{CliError, Result};
pub use output::{Formatter, RunReport};
