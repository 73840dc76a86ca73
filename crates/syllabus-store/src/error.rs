//! Store errors

use syllabus_model::{LinkId, ResourceId, ResourceKind};

/// Errors raised by repositories
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Resource does not exist
    #[error("resource not found: {0}")]
    ResourceNotFound(ResourceId),

    /// Link does not exist
    #[error("activity link not found: {0}")]
    LinkNotFound(LinkId),

    /// Saving would change the type tag of an existing resource
    #[error("resource {id} is a {existing}; its kind cannot change to {requested}")]
    KindChanged {
        /// Resource being saved
        id: ResourceId,
        /// Stored kind
        existing: ResourceKind,
        /// Kind carried by the update
        requested: ResourceKind,
    },

    /// Backend specific failure
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Check if error reports a missing record
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ResourceNotFound(_) | Self::LinkNotFound(_))
    }
}
