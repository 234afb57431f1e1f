//! Check command implementation.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use nomos_compiler::{apply_access, ServiceDescriptor};
use nomos_core::ServerlessNaming;

/// Arguments for the check command.
#[derive(Args)]
pub struct CheckArgs {
    /// Path to the service descriptor
    #[arg(default_value = "serverless.yml")]
    pub path: PathBuf,

    /// Treat unused groups as failures
    #[arg(long)]
    pub deny_warnings: bool,
}

/// Runs the check command.
///
/// Compiles into a scratch copy of the descriptor so the check never
/// writes anything.
pub fn run(args: &CheckArgs) -> Result<()> {
    info!(path = ?args.path, "Checking access configuration");

    let source = fs::read_to_string(&args.path)
        .with_context(|| format!("failed to read {}", args.path.display()))?;
    let mut descriptor = ServiceDescriptor::from_yaml(&source)
        .with_context(|| format!("failed to parse {}", args.path.display()))?;

    let Some(report) = apply_access(&mut descriptor, &ServerlessNaming)? else {
        println!("No access configuration present; nothing to check");
        return Ok(());
    };

    println!("✓ Access configuration is valid");
    println!("  Permissions: {}", report.permissions_created);
    println!("  Roles: {}", report.roles_created);
    for warning in &report.warnings {
        println!("  ⚠ {warning}");
    }

    if args.deny_warnings && !report.warnings.is_empty() {
        anyhow::bail!("{} warnings treated as errors", report.warnings.len());
    }

    Ok(())
}
