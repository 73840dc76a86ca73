//! Traversal errors

use syllabus_model::{ModelError, ResourceId};
use syllabus_store::StoreError;

/// Errors raised while walking an activity tree
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// Root activity does not exist
    #[error("activity not found: {0}")]
    ActivityNotFound(ResourceId),

    /// Root resource is not an activity
    #[error(transparent)]
    NotAnActivity(#[from] ModelError),

    /// A link points to a resource missing from the store
    #[error("activity {activity} links to missing resource {resource}")]
    DanglingLink {
        /// Owning activity
        activity: ResourceId,
        /// Missing child
        resource: ResourceId,
    },

    /// Nesting deeper than the configured limit, usually a cycle
    #[error("activity {activity} is nested deeper than {max_depth} levels")]
    DepthExceeded {
        /// Activity at which the limit was hit
        activity: ResourceId,
        /// Configured limit
        max_depth: usize,
    },

    /// Repository failure
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl TreeError {
    /// Check if error indicates corrupt tree data rather than a bad request
    #[inline]
    #[must_use]
    pub fn is_corrupt_tree(&self) -> bool {
        matches!(self, Self::DanglingLink { .. } | Self::DepthExceeded { .. })
    }
}
