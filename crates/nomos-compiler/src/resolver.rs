//! Access-group resolution.
//!
//! First stage of the pass: walks the function declarations, resolves
//! each `allowAccess` reference against the declared groups, and produces
//! the [`ResolvedConfig`] the emitter consumes — every group paired with
//! the logical ids of the functions that joined it, its policy and role
//! directives carried through unchanged.

use indexmap::IndexMap;
use tracing::debug;

use nomos_core::{FunctionSettings, Group, LogicalIdResolver, OneOrMany, PolicyGrant, RoleSpec};

use crate::error::{CompilerError, Result};

/// A group with its membership resolved to function logical ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedGroup {
    /// Logical ids of the member functions, in the order the functions
    /// were declared.
    pub functions: Vec<String>,
    /// The group's direct-invoke grant, carried through unchanged.
    pub policy: Option<PolicyGrant>,
    /// The group's role directives, carried through unchanged.
    pub role: Option<OneOrMany<RoleSpec>>,
}

impl ResolvedGroup {
    /// Returns the role directives normalized to a slice.
    #[must_use]
    pub fn roles(&self) -> &[RoleSpec] {
        self.role.as_ref().map_or(&[], OneOrMany::as_slice)
    }
}

/// Resolved access configuration: same key set and order as the input
/// group mapping. Rebuilt fresh on every pass.
pub type ResolvedConfig = IndexMap<String, ResolvedGroup>;

/// Resolves function membership across the declared groups.
///
/// Every group appears in the output, members or not; groups that end up
/// empty are the emitter's unused-group diagnostic case.
///
/// # Errors
///
/// Returns [`CompilerError::UnknownGroup`] when a function's
/// `allowAccess` names a group that is not declared.
pub fn resolve(
    groups: &IndexMap<String, Group>,
    functions: &IndexMap<String, FunctionSettings>,
    naming: &dyn LogicalIdResolver,
) -> Result<ResolvedConfig> {
    let mut config: ResolvedConfig = groups
        .iter()
        .map(|(name, group)| {
            let resolved = ResolvedGroup {
                functions: Vec::new(),
                policy: group.policy.clone(),
                role: group.role.clone(),
            };
            (name.clone(), resolved)
        })
        .collect();

    for (function_name, settings) in functions {
        let group_names = settings.access_groups();
        if group_names.is_empty() {
            continue;
        }
        let logical_id = naming.logical_id(function_name);
        debug!(function = %function_name, id = %logical_id, groups = ?group_names, "resolving function membership");
        for group_name in group_names {
            let group = config
                .get_mut(group_name)
                .ok_or_else(|| CompilerError::UnknownGroup {
                    function: function_name.clone(),
                    group: group_name.clone(),
                })?;
            group.functions.push(logical_id.clone());
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nomos_core::ServerlessNaming;

    fn groups(names: &[&str]) -> IndexMap<String, Group> {
        names
            .iter()
            .map(|name| ((*name).to_string(), Group::default()))
            .collect()
    }

    #[test]
    fn test_resolve_membership_in_declaration_order() {
        let groups = groups(&["api", "internal"]);
        let functions: IndexMap<String, FunctionSettings> = serde_yaml::from_str(
            "f1:\n  allowAccess: [api, internal]\nf2:\n  allowAccess: api\n",
        )
        .unwrap();

        let config = resolve(&groups, &functions, &ServerlessNaming).unwrap();
        assert_eq!(
            config["api"].functions,
            ["F1LambdaFunction".to_string(), "F2LambdaFunction".to_string()]
        );
        assert_eq!(config["internal"].functions, ["F1LambdaFunction".to_string()]);
    }

    #[test]
    fn test_resolve_keeps_unreferenced_groups() {
        let groups = groups(&["api", "unused"]);
        let functions: IndexMap<String, FunctionSettings> =
            serde_yaml::from_str("f1:\n  allowAccess: api\n").unwrap();

        let config = resolve(&groups, &functions, &ServerlessNaming).unwrap();
        assert_eq!(config.len(), 2);
        assert!(config["unused"].functions.is_empty());
    }

    #[test]
    fn test_resolve_skips_functions_without_allow_access() {
        let groups = groups(&["api"]);
        let functions: IndexMap<String, FunctionSettings> =
            serde_yaml::from_str("f1: {}\nf2:\n  allowAccess: api\n").unwrap();

        let config = resolve(&groups, &functions, &ServerlessNaming).unwrap();
        assert_eq!(config["api"].functions, ["F2LambdaFunction".to_string()]);
    }

    #[test]
    fn test_resolve_unknown_group_is_fatal() {
        let groups = groups(&["api"]);
        let functions: IndexMap<String, FunctionSettings> =
            serde_yaml::from_str("f1:\n  allowAccess: missing\n").unwrap();

        let err = resolve(&groups, &functions, &ServerlessNaming).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Function \"f1\" references an access group \"missing\" that does not exist"
        );
    }
}
