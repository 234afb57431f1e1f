//! CLI commands and argument parsing.

pub mod check;
pub mod compile;

use clap::{Parser, Subcommand};

/// Nomos - Lambda access configuration compiler
#[derive(Parser)]
#[command(name = "nomos")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Compile a service descriptor and print the resource template
    Compile(compile::CompileArgs),

    /// Validate a service descriptor's access configuration
    Check(check::CheckArgs),

    /// Print version information
    Version,
}
