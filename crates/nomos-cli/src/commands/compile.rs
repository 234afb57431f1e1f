//! Compile command implementation.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use tracing::info;

use nomos_compiler::{apply_access, ServiceDescriptor};
use nomos_core::{ResourceSection, ServerlessNaming};

/// Output format for the compiled template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
}

/// Arguments for the compile command.
#[derive(Args)]
pub struct CompileArgs {
    /// Path to the service descriptor
    #[arg(default_value = "serverless.yml")]
    pub path: PathBuf,

    /// Write the template to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Template output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

/// Runs the compile command.
pub fn run(args: &CompileArgs) -> Result<()> {
    info!(path = ?args.path, "Compiling access configuration");

    let source = fs::read_to_string(&args.path)
        .with_context(|| format!("failed to read {}", args.path.display()))?;
    let mut descriptor = ServiceDescriptor::from_yaml(&source)
        .with_context(|| format!("failed to parse {}", args.path.display()))?;

    match apply_access(&mut descriptor, &ServerlessNaming)? {
        Some(report) => {
            eprintln!("✓ Access configuration compiled");
            eprintln!("  Permissions: {}", report.permissions_created);
            eprintln!("  Roles: {}", report.roles_created);
            for warning in &report.warnings {
                eprintln!("  ⚠ {warning}");
            }
        }
        None => {
            eprintln!("No access configuration present; template is unchanged");
        }
    }

    let section = descriptor.resources.unwrap_or_else(ResourceSection::default);
    let rendered = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&section)?,
        OutputFormat::Yaml => serde_yaml::to_string(&section)?,
    };

    if let Some(output) = &args.output {
        fs::write(output, rendered)
            .with_context(|| format!("failed to write {}", output.display()))?;
        eprintln!("Template written to {}", output.display());
    } else {
        println!("{rendered}");
    }

    Ok(())
}
