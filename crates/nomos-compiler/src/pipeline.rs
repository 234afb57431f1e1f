//! The packaging-step entry point.
//!
//! [`apply_access`] is what the surrounding build pipeline calls once per
//! packaging run: it activates only when both `functions` and
//! `provider.access` are present, resolves the configuration, and emits
//! resources into the descriptor's template section.

use tracing::info;

use nomos_core::{LogicalIdResolver, ResourceSection};

use crate::emitter::{emit, EmitReport};
use crate::error::{CompilerError, Result};
use crate::resolver::resolve;
use crate::service::ServiceDescriptor;

/// Compiles the descriptor's access configuration and writes the
/// resulting resources into its template section.
///
/// Returns `Ok(None)` without touching the descriptor when `functions`
/// or `provider.access` is absent. The `resources` section is created on
/// demand; entries already in it are preserved.
///
/// # Errors
///
/// Returns [`CompilerError::MissingGroups`] when the `access` block
/// declares no `groups`, and propagates every resolution or emission
/// failure. Resources emitted before a failure are not rolled back.
pub fn apply_access(
    descriptor: &mut ServiceDescriptor,
    naming: &dyn LogicalIdResolver,
) -> Result<Option<EmitReport>> {
    let ServiceDescriptor {
        provider,
        functions,
        resources,
        ..
    } = descriptor;

    let Some(functions) = functions.as_ref() else {
        return Ok(None);
    };
    let Some(access) = provider.as_ref().and_then(|p| p.access.as_ref()) else {
        return Ok(None);
    };
    let groups = access.groups.as_ref().ok_or(CompilerError::MissingGroups)?;

    let config = resolve(groups, functions, naming)?;
    let section = resources.get_or_insert_with(ResourceSection::default);
    let report = emit(&config, &mut section.resources)?;
    info!(
        permissions = report.permissions_created,
        roles = report.roles_created,
        warnings = report.warnings.len(),
        "access configuration compiled"
    );
    Ok(Some(report))
}
