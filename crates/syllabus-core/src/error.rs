//! Error types for Syllabus Core
//!
//! Every crate keeps its own error enum; [`SyllabusError`] wraps them so
//! callers of the service handle one type.

use crate::config::ConfigError;
use crate::document::DocumentError;
use syllabus_sequence::SequenceError;
use syllabus_store::StoreError;
use syllabus_tree::TreeError;

/// Main Syllabus error type
#[derive(Debug, thiserror::Error)]
pub enum SyllabusError {
    /// Traversal failed
    #[error("traversal failed: {0}")]
    Tree(#[from] TreeError),

    /// Sequencing failed
    #[error("sequencing failed: {0}")]
    Sequence(#[from] SequenceError),

    /// Repository failure
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Course document error
    #[error("course document error: {0}")]
    Document(#[from] DocumentError),
}

impl SyllabusError {
    /// Check if error reports a missing activity, resource or link
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Tree(TreeError::ActivityNotFound(_)) => true,
            Self::Tree(TreeError::Store(e)) | Self::Store(e) => e.is_not_found(),
            Self::Sequence(e) => e.is_not_found(),
            _ => false,
        }
    }

    /// Check if error is a violated tree precondition: a cycle, an
    /// over-deep or dangling tree, or an operation on a non-activity
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::Sequence(SequenceError::CycleDetected { .. } | SequenceError::NotAnActivity(_))
                | Self::Tree(
                    TreeError::DepthExceeded { .. }
                        | TreeError::DanglingLink { .. }
                        | TreeError::NotAnActivity(_)
                )
        )
    }
}
