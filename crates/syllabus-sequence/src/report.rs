//! Reorder outcome

use serde::Serialize;
use syllabus_model::{LinkId, ResourceId};

/// What a reorder changed
///
/// A reorder is best effort: links absent from the input keep their old
/// position, so the activity may end up with duplicate positions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReorderReport {
    /// Links that received a position from the input
    pub updated: Vec<LinkId>,
    /// Links whose resource was missing from the input
    pub untouched: Vec<LinkId>,
    /// Input ids that match no link of the activity
    pub unmatched: Vec<ResourceId>,
}

impl ReorderReport {
    /// Whether input and current links matched one to one
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.untouched.is_empty() && self.unmatched.is_empty()
    }
}
