//! Generated resource model for the deployment template.
//!
//! The emitter writes two kinds of CloudFormation resources into the
//! template's shared [`Resources`] collection: Lambda permission grants
//! and IAM roles. The collection's contract is insert-if-absent: existing
//! entries are never overwritten or removed.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::access::OneOrMany;
use crate::principal::Principal;

/// CloudFormation type of a permission grant resource.
pub const LAMBDA_PERMISSION_TYPE: &str = "AWS::Lambda::Permission";
/// CloudFormation type of a role resource.
pub const IAM_ROLE_TYPE: &str = "AWS::IAM::Role";
/// The action granted by every permission and inline policy.
pub const INVOKE_FUNCTION_ACTION: &str = "lambda:InvokeFunction";
/// Base action of the role trust statement.
pub const ASSUME_ROLE_ACTION: &str = "sts:AssumeRole";
/// Additional trust action when session tagging is allowed.
pub const TAG_SESSION_ACTION: &str = "sts:TagSession";
/// IAM policy document format version.
pub const POLICY_DOCUMENT_VERSION: &str = "2012-10-17";

/// An `Fn::GetAtt` reference to a function's ARN attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionArn {
    #[serde(rename = "Fn::GetAtt")]
    get_att: [String; 2],
}

impl FunctionArn {
    /// References the `Arn` attribute of the function with the given
    /// logical id.
    pub fn new(logical_id: impl Into<String>) -> Self {
        Self {
            get_att: [logical_id.into(), "Arn".to_string()],
        }
    }

    /// Returns the referenced logical id.
    #[must_use]
    pub fn logical_id(&self) -> &str {
        &self.get_att[0]
    }
}

/// Properties of a permission grant resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PermissionProperties {
    /// The granted action, always [`INVOKE_FUNCTION_ACTION`].
    pub action: String,
    /// The target function's runtime identifier.
    pub function_name: FunctionArn,
    /// The principal receiving the grant, emitted in its original shape.
    pub principal: Principal,
}

/// A single statement of an IAM policy document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InvokeStatement {
    /// Statement effect, always `Allow`.
    pub effect: String,
    /// The permitted action.
    pub action: String,
    /// The covered function ARNs.
    pub resource: Vec<FunctionArn>,
}

/// An IAM policy document granting invoke rights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InvokePolicyDocument {
    /// Document format version.
    pub version: String,
    /// Policy statements.
    pub statement: Vec<InvokeStatement>,
}

/// An inline policy attached to a role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InlinePolicy {
    /// Name of the inline policy (the role's declared name).
    pub policy_name: String,
    /// The invoke-permission document.
    pub policy_document: InvokePolicyDocument,
}

/// The trust statement of a role's assume-role policy document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrustStatement {
    /// Statement effect, always `Allow`.
    pub effect: String,
    /// `sts:AssumeRole`, plus `sts:TagSession` when session tagging is
    /// allowed. Serialized as a bare string in the single-action case.
    pub action: OneOrMany<String>,
    /// The trusted principals.
    pub principal: TrustedPrincipals,
}

/// The principal block of a trust statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustedPrincipals {
    /// AWS principals trusted to assume the role.
    #[serde(rename = "AWS")]
    pub aws: Vec<Principal>,
}

/// A trust policy document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrustPolicyDocument {
    /// Document format version.
    pub version: String,
    /// Trust statements.
    pub statement: Vec<TrustStatement>,
}

/// Properties of a role resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RoleProperties {
    /// The role's declared name.
    pub role_name: String,
    /// Inline policies granting invoke rights over the covered functions.
    pub policies: Vec<InlinePolicy>,
    /// The trust policy.
    pub assume_role_policy_document: TrustPolicyDocument,
    /// Maximum session duration in seconds.
    pub max_session_duration: u32,
}

/// Kind-specific property bag of a template resource.
///
/// Resources the emitter did not generate (user-declared template
/// entries) fall through to the [`ResourceProperties::Other`] case and
/// round-trip verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceProperties {
    /// Lambda permission grant properties.
    Permission(PermissionProperties),
    /// IAM role properties.
    Role(RoleProperties),
    /// Properties of a resource this compiler does not generate.
    Other(serde_json::Value),
}

/// A template resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// CloudFormation resource type.
    #[serde(rename = "Type")]
    pub kind: String,
    /// Kind-specific properties.
    #[serde(rename = "Properties", default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<ResourceProperties>,
    /// Logical name of the predecessor resource this one must wait for.
    #[serde(rename = "DependsOn", default, skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<String>,
    /// Any other resource attributes (`Condition`, `DeletionPolicy`),
    /// preserved verbatim.
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl Resource {
    /// Creates a permission grant binding one function to one principal.
    pub fn lambda_permission(function_logical_id: impl Into<String>, principal: Principal) -> Self {
        Self {
            kind: LAMBDA_PERMISSION_TYPE.to_string(),
            properties: Some(ResourceProperties::Permission(PermissionProperties {
                action: INVOKE_FUNCTION_ACTION.to_string(),
                function_name: FunctionArn::new(function_logical_id),
                principal,
            })),
            depends_on: None,
            extra: IndexMap::new(),
        }
    }

    /// Creates a role resource from already-validated parts.
    pub fn iam_role(
        role_name: impl Into<String>,
        function_logical_ids: &[String],
        trust_action: OneOrMany<String>,
        principals: Vec<Principal>,
        max_session_duration: u32,
    ) -> Self {
        let role_name = role_name.into();
        Self {
            kind: IAM_ROLE_TYPE.to_string(),
            properties: Some(ResourceProperties::Role(RoleProperties {
                role_name: role_name.clone(),
                policies: vec![InlinePolicy {
                    policy_name: role_name,
                    policy_document: InvokePolicyDocument {
                        version: POLICY_DOCUMENT_VERSION.to_string(),
                        statement: vec![InvokeStatement {
                            effect: "Allow".to_string(),
                            action: INVOKE_FUNCTION_ACTION.to_string(),
                            resource: function_logical_ids
                                .iter()
                                .map(|id| FunctionArn::new(id.as_str()))
                                .collect(),
                        }],
                    },
                }],
                assume_role_policy_document: TrustPolicyDocument {
                    version: POLICY_DOCUMENT_VERSION.to_string(),
                    statement: vec![TrustStatement {
                        effect: "Allow".to_string(),
                        action: trust_action,
                        principal: TrustedPrincipals { aws: principals },
                    }],
                },
                max_session_duration,
            })),
            depends_on: None,
            extra: IndexMap::new(),
        }
    }

    /// Sets the predecessor dependency reference.
    #[must_use]
    pub fn with_depends_on(mut self, logical_name: impl Into<String>) -> Self {
        self.depends_on = Some(logical_name.into());
        self
    }
}

/// The shared resource collection of the deployment template.
///
/// Iteration follows insertion order. The only write operation is
/// [`Resources::insert_if_absent`]: entries already present, whether from
/// an earlier emission step or from the user's own template, are left
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Resources(IndexMap<String, Resource>);

impl Resources {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if a resource with the given logical name exists.
    #[must_use]
    pub fn contains(&self, logical_name: &str) -> bool {
        self.0.contains_key(logical_name)
    }

    /// Returns the resource with the given logical name, if any.
    #[must_use]
    pub fn get(&self, logical_name: &str) -> Option<&Resource> {
        self.0.get(logical_name)
    }

    /// Inserts the resource under the given logical name unless that name
    /// is already taken. Returns true if the resource was inserted.
    pub fn insert_if_absent(&mut self, logical_name: impl Into<String>, resource: Resource) -> bool {
        match self.0.entry(logical_name.into()) {
            indexmap::map::Entry::Occupied(_) => false,
            indexmap::map::Entry::Vacant(entry) => {
                entry.insert(resource);
                true
            }
        }
    }

    /// Returns the number of resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(logical name, resource)` pairs in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Resource> {
        self.0.iter()
    }

    /// Iterates over logical names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl<'a> IntoIterator for &'a Resources {
    type Item = (&'a String, &'a Resource);
    type IntoIter = indexmap::map::Iter<'a, String, Resource>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// The `resources` section of a service descriptor.
///
/// Only the `Resources` mapping is touched by the emitter; any sibling
/// keys (`Outputs`, `Conditions`) pass through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceSection {
    /// The shared resource collection.
    #[serde(rename = "Resources", default)]
    pub resources: Resources,
    /// Sibling template sections, preserved verbatim.
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}
