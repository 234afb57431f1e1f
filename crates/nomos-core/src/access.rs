//! Declarative access configuration model.
//!
//! This is the input side of the compiler: named groups granting direct
//! invoke permissions ([`PolicyGrant`]) and/or assumable roles
//! ([`RoleSpec`]), and per-function opt-in via `allowAccess`.
//!
//! Every place the configuration accepts "a value or a list of values"
//! is modeled explicitly as [`OneOrMany`] rather than coerced ad hoc.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::principal::Principal;

/// Minimum allowed role session duration, in seconds.
pub const MIN_SESSION_DURATION: u32 = 3_600;
/// Maximum allowed role session duration, in seconds.
pub const MAX_SESSION_DURATION: u32 = 43_200;

/// A scalar-or-list input shape.
///
/// The configuration format accepts either `principals: 111111111111` or
/// `principals: [111111111111, 222222222222]`; this type captures both and
/// normalizes them behind [`OneOrMany::as_slice`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// A single bare value.
    One(T),
    /// An explicit list of values.
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Returns the values as a slice, regardless of input shape.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        match self {
            Self::One(value) => std::slice::from_ref(value),
            Self::Many(values) => values.as_slice(),
        }
    }

    /// Returns the number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns true if there are no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Returns an iterator over the values.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }
}

impl<T> From<T> for OneOrMany<T> {
    fn from(value: T) -> Self {
        Self::One(value)
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(values: Vec<T>) -> Self {
        Self::Many(values)
    }
}

impl<'a, T> IntoIterator for &'a OneOrMany<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The `access` block of the provider configuration.
///
/// `groups` is modeled as optional so that its absence under a present
/// `access` block can be reported as a semantic error by the pipeline
/// rather than a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccessSettings {
    /// Named access groups, in declaration order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<IndexMap<String, Group>>,
}

/// A named bucket of access rules.
///
/// A group may grant direct invoke permissions (`policy`), declare one or
/// more assumable roles (`role`), or both. A group referenced by no
/// function is legal but useless; the emitter reports it as a diagnostic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Group {
    /// Direct invoke permission grant for the group's principals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<PolicyGrant>,
    /// Assumable role directives. A bare mapping and a list of mappings
    /// are both accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<OneOrMany<RoleSpec>>,
}

impl Group {
    /// Returns the role directives normalized to a slice.
    #[must_use]
    pub fn roles(&self) -> &[RoleSpec] {
        self.role.as_ref().map_or(&[], OneOrMany::as_slice)
    }
}

/// Grants every principal direct permission to invoke the group's
/// functions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyGrant {
    /// Principals receiving the invoke permission.
    pub principals: OneOrMany<Principal>,
}

/// An assumable role granting invoke rights over the group's functions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RoleSpec {
    /// Role name, globally unique across the whole configuration.
    pub name: String,
    /// Principals trusted to assume the role. An empty list makes the
    /// role a no-op: no resource is emitted for it.
    pub principals: OneOrMany<Principal>,
    /// Whether assuming principals may also tag the session.
    #[serde(default)]
    pub allow_tag_session: bool,
    /// Maximum session duration in seconds, 3600 to 43200.
    #[serde(default = "default_session_duration")]
    pub max_session_duration: u32,
}

const fn default_session_duration() -> u32 {
    MIN_SESSION_DURATION
}

impl RoleSpec {
    /// Checks the range constraints schema validation would normally
    /// enforce before this stage runs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SessionDurationOutOfRange`] if the declared
    /// duration falls outside 3600..=43200 seconds.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_SESSION_DURATION..=MAX_SESSION_DURATION).contains(&self.max_session_duration) {
            return Err(Error::SessionDurationOutOfRange {
                role: self.name.clone(),
                seconds: self.max_session_duration,
                min: MIN_SESSION_DURATION,
                max: MAX_SESSION_DURATION,
            });
        }
        Ok(())
    }
}

/// Per-function access declaration.
///
/// The surrounding function definition carries many other properties
/// (handler, memory, events); only `allowAccess` matters here and the
/// rest are ignored on input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionSettings {
    /// Names of the access groups this function joins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_access: Option<OneOrMany<String>>,
}

impl FunctionSettings {
    /// Returns the referenced group names normalized to a slice.
    #[must_use]
    pub fn access_groups(&self) -> &[String] {
        self.allow_access.as_ref().map_or(&[], OneOrMany::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_or_many_scalar() {
        let value: OneOrMany<String> = serde_yaml::from_str("api").unwrap();
        assert_eq!(value.as_slice(), ["api".to_string()]);
    }

    #[test]
    fn test_one_or_many_list() {
        let value: OneOrMany<String> = serde_yaml::from_str("[api, internal]").unwrap();
        assert_eq!(value.len(), 2);
    }

    #[test]
    fn test_group_with_scalar_principals() {
        let group: Group = serde_yaml::from_str("policy:\n  principals: 111111111111\n").unwrap();
        let policy = group.policy.as_ref().expect("policy should parse");
        assert_eq!(policy.principals.as_slice(), [Principal::literal("111111111111")]);
        assert!(group.roles().is_empty());
    }

    #[test]
    fn test_role_defaults() {
        let role: RoleSpec =
            serde_yaml::from_str("name: invoke-role\nprincipals: 111111111111\n").unwrap();
        assert!(!role.allow_tag_session);
        assert_eq!(role.max_session_duration, MIN_SESSION_DURATION);
        assert!(role.validate().is_ok());
    }

    #[test]
    fn test_role_requires_name_and_principals() {
        let missing_name: serde_yaml::Result<RoleSpec> = serde_yaml::from_str("principals: 1\n");
        assert!(missing_name.is_err());

        let missing_principals: serde_yaml::Result<RoleSpec> = serde_yaml::from_str("name: a-role\n");
        assert!(missing_principals.is_err());
    }

    #[test]
    fn test_role_session_duration_range() {
        let role: RoleSpec = serde_yaml::from_str(
            "name: short\nprincipals: 1\nmaxSessionDuration: 60\n",
        )
        .unwrap();
        let err = role.validate().unwrap_err();
        assert!(err.to_string().contains("short"));
    }

    #[test]
    fn test_access_settings_without_groups() {
        let access: AccessSettings = serde_yaml::from_str("{}").unwrap();
        assert!(access.groups.is_none());
    }

    #[test]
    fn test_group_declaration_order_preserved() {
        let access: AccessSettings = serde_yaml::from_str(
            "groups:\n  zeta:\n    policy:\n      principals: 1\n  alpha:\n    policy:\n      principals: 2\n",
        )
        .unwrap();
        let names: Vec<_> = access.groups.unwrap().keys().cloned().collect();
        assert_eq!(names, ["zeta", "alpha"]);
    }

    #[test]
    fn test_function_settings_ignore_extra_keys() {
        let f: FunctionSettings =
            serde_yaml::from_str("handler: index.handler\nallowAccess: api\n").unwrap();
        assert_eq!(f.access_groups(), ["api".to_string()]);
    }
}
