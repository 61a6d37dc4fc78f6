//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Shopsense CLI - Extract a retail world model from shopping sessions.
#[derive(Debug, Parser)]
#[command(name = "shopsense")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum CliFormat {
    /// Human-readable text (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze captured session files and report the extracted world model
    Analyze(AnalyzeArgs),
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Session JSON files (each a session object or an array of sessions)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Vocabulary overrides, TOML
    #[arg(long)]
    pub vocab: Option<PathBuf>,

    /// Classifier configuration, TOML
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the full run report as JSON to this path
    #[arg(long)]
    pub report: Option<PathBuf>,
}
