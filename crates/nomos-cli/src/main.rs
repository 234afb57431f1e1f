//! Nomos CLI - compiles declarative Lambda access configuration into
//! deployment template resources.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::{Cli, Commands};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nomos=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compile(args) => commands::compile::run(&args),
        Commands::Check(args) => commands::check::run(&args),
        Commands::Version => {
            println!("nomos {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
