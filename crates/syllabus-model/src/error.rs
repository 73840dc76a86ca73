//! Model errors

use crate::ids::ResourceId;
use crate::resource::ResourceKind;

/// Errors raised while constructing model types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Resource is not an activity
    #[error("resource {id} is a {kind}, not an activity")]
    NotAnActivity {
        /// Offending resource
        id: ResourceId,
        /// Its actual kind
        kind: ResourceKind,
    },

    /// Resource kind name is empty
    #[error("resource kind name must not be empty")]
    EmptyKind,
}
