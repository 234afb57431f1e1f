//! Principal values granted access to functions.
//!
//! A principal is either a literal identity (an account id or an ARN) or a
//! structured indirection: a CloudFormation intrinsic such as
//! `Fn::ImportValue` whose embedded name is only used for resource naming
//! while the intrinsic itself is emitted unchanged.

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::naming::normalize_name;

/// An identity granted invoke or assume-role access.
///
/// Principals are read-only inputs: the compiler derives naming fragments
/// from them but never rewrites the value that ends up in the template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    /// A literal identity. Numeric account ids are coerced to their
    /// decimal string form at the input boundary.
    Literal(String),
    /// A reference to a value produced elsewhere in the template, e.g.
    /// `Fn::ImportValue: shared-account-id`.
    Exported {
        /// The intrinsic function key, e.g. `Fn::ImportValue`.
        function: String,
        /// The embedded name the intrinsic resolves.
        name: String,
    },
}

impl Principal {
    /// Creates a literal principal.
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    /// Creates an exported-value principal.
    pub fn exported(function: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Exported {
            function: function.into(),
            name: name.into(),
        }
    }

    /// Returns the normalized fragment used when embedding this principal
    /// in a synthesized resource name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nomos_core::Principal;
    ///
    /// let p = Principal::literal("arn:aws:iam::111111111111:root");
    /// assert_eq!(p.name_fragment(), "ArnAwsIam111111111111Root");
    ///
    /// let p = Principal::exported("Fn::ImportValue", "shared-account");
    /// assert_eq!(p.name_fragment(), "SharedAccount");
    /// ```
    #[must_use]
    pub fn name_fragment(&self) -> String {
        match self {
            Self::Literal(value) => normalize_name(value),
            Self::Exported { name, .. } => normalize_name(name),
        }
    }
}

impl Serialize for Principal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Literal(value) => serializer.serialize_str(value),
            Self::Exported { function, name } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(function, name)?;
                map.end()
            }
        }
    }
}

struct PrincipalVisitor;

impl<'de> Visitor<'de> for PrincipalVisitor {
    type Value = Principal;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, a number, or a single-key Fn::* mapping")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Principal, E> {
        Ok(Principal::Literal(value.to_string()))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Principal, E> {
        Ok(Principal::Literal(value.to_string()))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Principal, E> {
        Ok(Principal::Literal(value.to_string()))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Principal, A::Error> {
        let Some((function, name)) = access.next_entry::<String, String>()? else {
            return Err(de::Error::custom("principal mapping must not be empty"));
        };
        if !function.starts_with("Fn::") {
            return Err(de::Error::custom(format!(
                "principal mapping key \"{function}\" is not an Fn::* intrinsic"
            )));
        }
        if access.next_entry::<String, String>()?.is_some() {
            return Err(de::Error::custom(
                "principal mapping must contain exactly one intrinsic",
            ));
        }
        Ok(Principal::Exported { function, name })
    }
}

impl<'de> Deserialize<'de> for Principal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PrincipalVisitor)
    }
}
