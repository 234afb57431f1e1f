//! Error types for the Nomos compiler.
//!
//! Every validation failure is fatal to the current compilation pass and
//! carries a human-readable message naming the offending group, function,
//! or role. Callers distinguish cases by message text only.

use thiserror::Error;

/// Result type alias for compiler operations.
pub type Result<T> = std::result::Result<T, CompilerError>;

/// Errors that can occur while compiling an access configuration.
#[derive(Error, Debug)]
pub enum CompilerError {
    /// The `access` block exists but declares no `groups`.
    #[error("Access configuration does not define \"groups\"")]
    MissingGroups,

    /// A function opted into a group that is not declared.
    #[error("Function \"{function}\" references an access group \"{group}\" that does not exist")]
    UnknownGroup {
        /// The function carrying the reference.
        function: String,
        /// The undeclared group name.
        group: String,
    },

    /// A group declares a policy whose principal list is empty.
    #[error("Policy of access group \"{group}\" has no principals")]
    PolicyWithoutPrincipals {
        /// The offending group.
        group: String,
    },

    /// A role directive has an empty name.
    #[error("Role in access group \"{group}\" is missing a name")]
    RoleWithoutName {
        /// The group declaring the role.
        group: String,
    },

    /// Two role directives resolve to the same logical name.
    #[error("Roles must have unique names [{name}]")]
    DuplicateRoleName {
        /// The duplicated role name.
        name: String,
    },

    /// Core model validation failed.
    #[error(transparent)]
    CoreError(#[from] nomos_core::Error),
}
