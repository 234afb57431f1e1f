//! # Nomos Core
//!
//! Core types for the Nomos Lambda access compiler.
//!
//! This crate provides the data model shared across the Nomos workspace:
//!
//! - [`access`] - Declarative access configuration (groups, policies, roles)
//! - [`Principal`] - Literal or template-exported principal values
//! - [`naming`] - Logical-name normalization and the function-id resolver seam
//! - [`template`] - Generated CloudFormation resource model and the shared
//!   insert-if-absent resource collection
//!
//! ## Example
//!
//! ```rust
//! use nomos_core::{Principal, Resource, Resources};
//!
//! let mut resources = Resources::new();
//! let grant = Resource::lambda_permission(
//!     "F1LambdaFunction",
//!     Principal::literal("111111111111"),
//! );
//! assert!(resources.insert_if_absent("F1LambdaFunctionPermitInvokeFrom111111111111", grant));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod access;
pub mod error;
pub mod naming;
pub mod principal;
pub mod template;

#[cfg(test)]
mod proptest_tests;

pub use access::{
    AccessSettings, FunctionSettings, Group, OneOrMany, PolicyGrant, RoleSpec,
    MAX_SESSION_DURATION, MIN_SESSION_DURATION,
};
pub use error::{Error, Result};
pub use naming::{normalize_name, LogicalIdResolver, ServerlessNaming};
pub use principal::Principal;
pub use template::{Resource, ResourceSection, Resources};
