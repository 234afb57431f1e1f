//! # Nomos Compiler
//!
//! Access-group resolution and resource emission for the Nomos Lambda
//! access compiler.
//!
//! The crate implements one synchronous compilation pass in two stages:
//!
//! - [`resolver`] - resolves function `allowAccess` references into
//!   per-group membership lists
//! - [`emitter`] - materializes permission grants and role resources into
//!   the template's shared resource collection
//!
//! [`pipeline::apply_access`] composes the two over a parsed
//! [`ServiceDescriptor`].
//!
//! ## Example
//!
//! ```rust
//! use nomos_compiler::{apply_access, ServiceDescriptor};
//! use nomos_core::ServerlessNaming;
//!
//! let mut descriptor = ServiceDescriptor::from_yaml(r"
//! provider:
//!   access:
//!     groups:
//!       api:
//!         policy:
//!           principals: 111111111111
//! functions:
//!   f1:
//!     allowAccess: api
//! ")?;
//!
//! let report = apply_access(&mut descriptor, &ServerlessNaming)?
//!     .expect("access configuration is present");
//! assert_eq!(report.permissions_created, 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod emitter;
pub mod error;
pub mod pipeline;
pub mod resolver;
pub mod service;

pub use emitter::{emit, EmitReport};
pub use error::{CompilerError, Result};
pub use pipeline::apply_access;
pub use resolver::{resolve, ResolvedConfig, ResolvedGroup};
pub use service::{ProviderSettings, ServiceDescriptor};
