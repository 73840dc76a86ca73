//! Sequencing errors

use syllabus_model::{ModelError, ResourceId};
use syllabus_store::StoreError;

/// Errors raised by the sequence manager
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SequenceError {
    /// Activity does not exist
    #[error("activity not found: {0}")]
    ActivityNotFound(ResourceId),

    /// Resource does not exist
    #[error("resource not found: {0}")]
    ResourceNotFound(ResourceId),

    /// Target of the operation is not an activity
    #[error(transparent)]
    NotAnActivity(#[from] ModelError),

    /// Attaching would make an activity its own descendant
    #[error("attaching {resource} to {activity} would create a cycle")]
    CycleDetected {
        /// Activity receiving the link
        activity: ResourceId,
        /// Activity being attached
        resource: ResourceId,
    },

    /// Resource already linked and duplicates are rejected
    #[error("{resource} is already attached to {activity}")]
    AlreadyAttached {
        /// Activity
        activity: ResourceId,
        /// Resource
        resource: ResourceId,
    },

    /// No link to remove and detach is strict
    #[error("{resource} is not attached to {activity}")]
    LinkNotFound {
        /// Activity
        activity: ResourceId,
        /// Resource
        resource: ResourceId,
    },

    /// Repository failure
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl SequenceError {
    /// Check if error reports a missing record
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::ActivityNotFound(_) | Self::ResourceNotFound(_) | Self::LinkNotFound { .. } => {
                true
            }
            Self::Store(e) => e.is_not_found(),
            _ => false,
        }
    }
}
