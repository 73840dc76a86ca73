//! Navigation tree entries

use serde::{Deserialize, Serialize};
use syllabus_model::{ResourceId, ResourceKind, ResourceNode};

/// The parts of a resource a navigation menu shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSummary {
    /// Resource id
    #[serde(rename = "resourceId")]
    pub id: ResourceId,
    /// Resource kind
    #[serde(rename = "resourceType")]
    pub kind: ResourceKind,
    /// Display name
    pub name: String,
}

impl From<&ResourceNode> for ResourceSummary {
    fn from(node: &ResourceNode) -> Self {
        Self {
            id: node.id(),
            kind: node.kind().clone(),
            name: node.name().to_string(),
        }
    }
}

/// One visited link in a navigation tree
///
/// `children` is present exactly when the resource is an activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationEntry {
    /// Linked resource
    #[serde(flatten)]
    pub resource: ResourceSummary,
    /// Running step number
    pub step: u32,
    /// Entries of a nested activity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NavigationEntry>>,
}

impl NavigationEntry {
    /// Entry for a leaf resource
    #[must_use]
    pub fn leaf(resource: ResourceSummary, step: u32) -> Self {
        Self {
            resource,
            step,
            children: None,
        }
    }

    /// Entry for a nested activity
    #[must_use]
    pub fn branch(resource: ResourceSummary, step: u32, children: Vec<NavigationEntry>) -> Self {
        Self {
            resource,
            step,
            children: Some(children),
        }
    }

    /// Nested entries, empty for leaves
    #[must_use]
    pub fn children(&self) -> &[NavigationEntry] {
        self.children.as_deref().unwrap_or_default()
    }

    /// This entry followed by all descendants, depth first
    #[must_use]
    pub fn depth_first(&self) -> Vec<&NavigationEntry> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(entry) = stack.pop() {
            out.push(entry);
            stack.extend(entry.children().iter().rev());
        }
        out
    }
}
