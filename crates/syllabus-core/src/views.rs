//! Views handed to the presentation layer

use serde::Serialize;
use syllabus_model::{ActivityLink, ResourceNode};
use syllabus_tree::{NavigationEntry, ResourceSummary};

/// Everything the activity player's left menu shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeftMenu {
    /// Activity being played
    pub activity: ResourceSummary,
    /// Its direct links, by position
    pub links: Vec<ActivityLink>,
    /// The activity at step 1 with the whole navigation tree below it
    pub root: NavigationEntry,
    /// Leaf resources in the subtree
    pub total_steps: u32,
    /// Linked nodes in the subtree plus one for the activity itself
    pub total_items: u32,
}

/// Player layout: the activity and the resource it opens on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub activity: ResourceSummary,
    /// Resource of the lowest-positioned link, `None` for an empty activity
    pub first_resource: Option<ResourceNode>,
}

/// Instructions page of an activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstructionsView {
    pub activity: ResourceSummary,
    pub instructions: Option<String>,
}
