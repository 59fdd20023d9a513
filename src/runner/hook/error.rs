use thiserror::Error;

use crate::runner::ds::error::JErrorType;

pub type Result<T> = std::result::Result<T, HookError>;

/// Failures of the interception engine itself. Errors raised by hooked functions or
/// handlers never pass through here; wrappers return them to their caller unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HookError {
    /// A function was required but something else was supplied.
    #[error("Hook target must be a function, got {0}")]
    InvalidTarget(String),

    /// The target's position in the graph is unknown.
    #[error("Unable to locate target function '{0}' within the object graph")]
    LocationNotFound(String),

    /// The write would change a non-configurable, non-writable property.
    #[error("Cannot override non-configurable property: {key}")]
    ImmutableProperty { key: String },

    /// Bindings selected for one combined clone were found on different nodes.
    #[error("Hooks selected for one clone disagree on their context: '{first}' vs '{second}'")]
    ScopeConflict { first: String, second: String },

    /// A previously located path no longer leads through live objects.
    #[error("Hooked location '{path}' no longer resolves in the object graph")]
    LocationStale { path: String },

    #[error("Invalid property path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("The object graph has no root")]
    MissingRoot,

    #[error(transparent)]
    Runtime(#[from] JErrorType),
}
