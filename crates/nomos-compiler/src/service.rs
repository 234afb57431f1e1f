//! Serverless-style service descriptor.
//!
//! The descriptor is the outer boundary the pipeline operates on: a
//! `provider.access` block with the group definitions, a `functions`
//! mapping whose entries may opt into groups, and a `resources` section
//! the emitter writes into. Function properties other than `allowAccess`
//! are not modeled; the compiler never reads them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use nomos_core::{AccessSettings, FunctionSettings, ResourceSection};

/// A deployment service descriptor, parsed from `serverless.yml`-style
/// YAML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    /// Service name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    /// Provider settings; only the `access` block is read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderSettings>,
    /// Function declarations, in declaration order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub functions: Option<IndexMap<String, FunctionSettings>>,
    /// The template resource section, created on first emission if absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceSection>,
}

impl ServiceDescriptor {
    /// Parses a descriptor from YAML.
    ///
    /// # Errors
    ///
    /// Returns the underlying serde error when the document does not
    /// match the descriptor shape.
    pub fn from_yaml(source: &str) -> serde_yaml::Result<Self> {
        serde_yaml::from_str(source)
    }

    /// Returns the access settings, if the provider declares any.
    #[must_use]
    pub fn access(&self) -> Option<&AccessSettings> {
        self.provider.as_ref().and_then(|p| p.access.as_ref())
    }
}

/// The provider block of a service descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Access-control configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<AccessSettings>,
}
