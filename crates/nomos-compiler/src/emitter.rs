//! Resource emission.
//!
//! Second stage of the pass: walks the resolved configuration in group
//! declaration order and materializes permission grants and role
//! resources into the shared collection.
//!
//! Permission grants for the same function are chained through
//! `DependsOn` so the provisioner creates them one at a time; creating
//! permissions on one function concurrently is a known conflict.

use std::collections::HashMap;

use tracing::{debug, warn};

use nomos_core::naming::normalize_name;
use nomos_core::template::{ASSUME_ROLE_ACTION, TAG_SESSION_ACTION};
use nomos_core::{OneOrMany, Principal, Resource, Resources, RoleSpec};

use crate::error::{CompilerError, Result};
use crate::resolver::{ResolvedConfig, ResolvedGroup};

/// Logical-name prefix of every emitted role resource.
pub const ROLE_NAME_PREFIX: &str = "LambdaAccessRole";

/// Summary of one emission pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitReport {
    /// Number of permission grant resources created.
    pub permissions_created: usize,
    /// Number of role resources created.
    pub roles_created: usize,
    /// Non-fatal diagnostics, one per unused group.
    pub warnings: Vec<String>,
}

/// Tracks, per function logical id, the most recently created permission
/// resource across the whole pass.
type DependsOnChain = HashMap<String, String>;

/// Emits resources for the resolved configuration into `resources`.
///
/// Existing entries in the collection are never overwritten; a permission
/// whose synthesized name is already taken is skipped without touching
/// the dependency chain.
///
/// # Errors
///
/// Fails on a policy with no principals, a role with an empty name or an
/// out-of-range session duration, or a duplicate role name. Resources
/// emitted before the failing group are left in the collection.
pub fn emit(config: &ResolvedConfig, resources: &mut Resources) -> Result<EmitReport> {
    let mut report = EmitReport::default();
    let mut chain = DependsOnChain::new();

    for (group_name, group) in config {
        if group.functions.is_empty() {
            warn!(group = %group_name, "group is not used");
            report.warnings.push(format!("Group \"{group_name}\" is not used"));
            continue;
        }

        if let Some(policy) = &group.policy {
            emit_policy(group_name, group, policy.principals.as_slice(), resources, &mut chain, &mut report)?;
        }

        for role in group.roles() {
            emit_role(group_name, group, role, resources, &mut report)?;
        }
    }

    Ok(report)
}

fn emit_policy(
    group_name: &str,
    group: &ResolvedGroup,
    principals: &[Principal],
    resources: &mut Resources,
    chain: &mut DependsOnChain,
    report: &mut EmitReport,
) -> Result<()> {
    if principals.is_empty() {
        return Err(CompilerError::PolicyWithoutPrincipals {
            group: group_name.to_string(),
        });
    }

    for principal in principals {
        let fragment = principal.name_fragment();
        for function_id in &group.functions {
            let logical_name = format!("{function_id}PermitInvokeFrom{fragment}");
            if resources.contains(&logical_name) {
                // Same function+principal pair reached via another group.
                debug!(resource = %logical_name, "permission already present, skipping");
                continue;
            }

            let mut resource = Resource::lambda_permission(function_id.as_str(), principal.clone());
            if let Some(predecessor) = chain.get(function_id) {
                resource = resource.with_depends_on(predecessor.as_str());
            }
            resources.insert_if_absent(logical_name.as_str(), resource);
            chain.insert(function_id.clone(), logical_name);
            report.permissions_created += 1;
        }
    }

    Ok(())
}

fn emit_role(
    group_name: &str,
    group: &ResolvedGroup,
    role: &RoleSpec,
    resources: &mut Resources,
    report: &mut EmitReport,
) -> Result<()> {
    if role.name.is_empty() {
        return Err(CompilerError::RoleWithoutName {
            group: group_name.to_string(),
        });
    }
    role.validate()?;

    let logical_name = format!("{ROLE_NAME_PREFIX}{}", normalize_name(&role.name));
    if resources.contains(&logical_name) {
        return Err(CompilerError::DuplicateRoleName {
            name: role.name.clone(),
        });
    }

    let principals = role.principals.as_slice();
    if principals.is_empty() {
        // A role nobody can assume grants nothing; emit no shell for it.
        debug!(role = %role.name, "role has no principals, skipping");
        return Ok(());
    }

    let trust_action = if role.allow_tag_session {
        OneOrMany::Many(vec![
            ASSUME_ROLE_ACTION.to_string(),
            TAG_SESSION_ACTION.to_string(),
        ])
    } else {
        OneOrMany::One(ASSUME_ROLE_ACTION.to_string())
    };

    let resource = Resource::iam_role(
        role.name.as_str(),
        &group.functions,
        trust_action,
        principals.to_vec(),
        role.max_session_duration,
    );
    resources.insert_if_absent(logical_name.as_str(), resource);
    report.roles_created += 1;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nomos_core::PolicyGrant;

    fn group_with_policy(functions: &[&str], principals: Vec<Principal>) -> ResolvedGroup {
        ResolvedGroup {
            functions: functions.iter().map(|f| (*f).to_string()).collect(),
            policy: Some(PolicyGrant {
                principals: OneOrMany::Many(principals),
            }),
            role: None,
        }
    }

    fn config_of(entries: Vec<(&str, ResolvedGroup)>) -> ResolvedConfig {
        entries
            .into_iter()
            .map(|(name, group)| (name.to_string(), group))
            .collect()
    }

    #[test]
    fn test_unused_group_warns_and_emits_nothing() {
        let config = config_of(vec![(
            "unused",
            group_with_policy(&[], vec![Principal::literal("1")]),
        )]);
        let mut resources = Resources::new();

        let report = emit(&config, &mut resources).unwrap();
        assert!(resources.is_empty());
        assert_eq!(report.warnings, ["Group \"unused\" is not used".to_string()]);
    }

    #[test]
    fn test_policy_without_principals_is_fatal() {
        let config = config_of(vec![("api", group_with_policy(&["F1"], vec![]))]);
        let mut resources = Resources::new();

        let err = emit(&config, &mut resources).unwrap_err();
        assert_eq!(err.to_string(), "Policy of access group \"api\" has no principals");
    }

    #[test]
    fn test_permissions_chain_per_function() {
        let config = config_of(vec![(
            "api",
            group_with_policy(
                &["F1"],
                vec![Principal::literal("1"), Principal::literal("2")],
            ),
        )]);
        let mut resources = Resources::new();

        emit(&config, &mut resources).unwrap();

        let first = resources.get("F1PermitInvokeFrom1").unwrap();
        assert_eq!(first.depends_on, None);
        let second = resources.get("F1PermitInvokeFrom2").unwrap();
        assert_eq!(second.depends_on, Some("F1PermitInvokeFrom1".to_string()));
    }

    #[test]
    fn test_chain_spans_groups() {
        let config = config_of(vec![
            ("a", group_with_policy(&["F1"], vec![Principal::literal("1")])),
            ("b", group_with_policy(&["F1"], vec![Principal::literal("2")])),
        ]);
        let mut resources = Resources::new();

        emit(&config, &mut resources).unwrap();

        let second = resources.get("F1PermitInvokeFrom2").unwrap();
        assert_eq!(second.depends_on, Some("F1PermitInvokeFrom1".to_string()));
    }

    #[test]
    fn test_duplicate_pair_is_skipped_without_chain_update() {
        let config = config_of(vec![
            ("a", group_with_policy(&["F1"], vec![Principal::literal("1")])),
            (
                "b",
                group_with_policy(
                    &["F1"],
                    vec![Principal::literal("1"), Principal::literal("2")],
                ),
            ),
        ]);
        let mut resources = Resources::new();

        let report = emit(&config, &mut resources).unwrap();
        assert_eq!(report.permissions_created, 2);
        assert_eq!(resources.len(), 2);
        // The duplicate grant from group b did not restart the chain.
        let second = resources.get("F1PermitInvokeFrom2").unwrap();
        assert_eq!(second.depends_on, Some("F1PermitInvokeFrom1".to_string()));
    }

    #[test]
    fn test_role_with_empty_principals_is_skipped() {
        let role: RoleSpec =
            serde_yaml::from_str("name: idle-role\nprincipals: []\n").unwrap();
        let config = config_of(vec![(
            "api",
            ResolvedGroup {
                functions: vec!["F1".to_string()],
                policy: None,
                role: Some(OneOrMany::One(role)),
            },
        )]);
        let mut resources = Resources::new();

        let report = emit(&config, &mut resources).unwrap();
        assert!(resources.is_empty());
        assert_eq!(report.roles_created, 0);
    }

    #[test]
    fn test_duplicate_role_name_is_fatal() {
        let role: RoleSpec = serde_yaml::from_str("name: shared\nprincipals: 1\n").unwrap();
        let config = config_of(vec![
            (
                "a",
                ResolvedGroup {
                    functions: vec!["F1".to_string()],
                    policy: None,
                    role: Some(OneOrMany::One(role.clone())),
                },
            ),
            (
                "b",
                ResolvedGroup {
                    functions: vec!["F2".to_string()],
                    policy: None,
                    role: Some(OneOrMany::One(role)),
                },
            ),
        ]);
        let mut resources = Resources::new();

        let err = emit(&config, &mut resources).unwrap_err();
        assert_eq!(err.to_string(), "Roles must have unique names [shared]");
        // The first role survives; nothing is rolled back.
        assert!(resources.contains("LambdaAccessRoleShared"));
    }

    #[test]
    fn test_role_session_duration_out_of_range_is_fatal() {
        let role: RoleSpec = serde_yaml::from_str(
            "name: short\nprincipals: 1\nmaxSessionDuration: 100000\n",
        )
        .unwrap();
        let config = config_of(vec![(
            "api",
            ResolvedGroup {
                functions: vec!["F1".to_string()],
                policy: None,
                role: Some(OneOrMany::One(role)),
            },
        )]);
        let mut resources = Resources::new();

        let err = emit(&config, &mut resources).unwrap_err();
        assert!(err.to_string().contains("maxSessionDuration"));
    }

    #[test]
    fn test_existing_resource_is_preserved() {
        let config = config_of(vec![(
            "api",
            group_with_policy(&["F1"], vec![Principal::literal("1")]),
        )]);
        let mut resources = Resources::new();
        let existing = Resource::lambda_permission("Other", Principal::literal("9"));
        resources.insert_if_absent("F1PermitInvokeFrom1", existing.clone());

        let report = emit(&config, &mut resources).unwrap();
        assert_eq!(report.permissions_created, 0);
        assert_eq!(resources.get("F1PermitInvokeFrom1"), Some(&existing));
    }
}
