//! Resource nodes and activities
//!
//! A [`ResourceNode`] is any addressable content item. Its [`ResourceKind`] is
//! fixed at creation. An [`Activity`] is a typed view over a node of kind
//! [`ResourceKind::Activity`].

use crate::error::ModelError;
use crate::ids::ResourceId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type tag of a resource
///
/// Serialized as its lowercase name. Names are matched case-insensitively
/// and kinds the platform does not know about are carried in
/// [`ResourceKind::Other`], which can only be built by parsing so it never
/// shadows a built-in kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ResourceKind {
    /// Composite node sequencing child resources
    Activity,
    /// Folder of resources
    Directory,
    /// Uploaded file
    File,
    /// Rich text document
    Text,
    /// External link
    Url,
    /// Any other named kind (forum, exercise, ...)
    Other(CustomKind),
}

/// Lowercase, non-empty name of a kind outside the built-in set
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CustomKind(String);

impl CustomKind {
    /// Kind name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ResourceKind {
    /// Canonical name of the kind
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Activity => "activity",
            Self::Directory => "directory",
            Self::File => "file",
            Self::Text => "text",
            Self::Url => "url",
            Self::Other(custom) => custom.as_str(),
        }
    }

    /// Parse a kind name; same as [`str::parse`]
    ///
    /// # Errors
    /// Returns [`ModelError::EmptyKind`] for a blank name
    pub fn named(name: &str) -> Result<Self, ModelError> {
        name.parse()
    }

    /// Whether nodes of this kind own activity links
    #[inline]
    #[must_use]
    pub fn is_activity(&self) -> bool {
        matches!(self, Self::Activity)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        let known = match name.as_str() {
            "activity" => Some(Self::Activity),
            "directory" => Some(Self::Directory),
            "file" => Some(Self::File),
            "text" => Some(Self::Text),
            "url" => Some(Self::Url),
            _ => None,
        };
        match known {
            Some(kind) => Ok(kind),
            None if name.is_empty() => Err(ModelError::EmptyKind),
            None => Ok(Self::Other(CustomKind(name))),
        }
    }
}

impl TryFrom<String> for ResourceKind {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ResourceKind> for String {
    fn from(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::Other(CustomKind(name)) => name,
            known => known.as_str().to_string(),
        }
    }
}

/// Addressable content item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceNode {
    id: ResourceId,
    kind: ResourceKind,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl ResourceNode {
    /// Create a node with a fresh id
    #[must_use]
    pub fn new(kind: ResourceKind, name: impl Into<String>) -> Self {
        Self::with_id(ResourceId::new(), kind, name)
    }

    /// Create a node with a caller-chosen id
    #[must_use]
    pub fn with_id(id: ResourceId, kind: ResourceKind, name: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            name: name.into(),
            description: None,
        }
    }

    /// With description (instructions, for activities)
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Node id
    #[inline]
    #[must_use]
    pub fn id(&self) -> ResourceId {
        self.id
    }

    /// Type tag
    #[inline]
    #[must_use]
    pub fn kind(&self) -> &ResourceKind {
        &self.kind
    }

    /// Display name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Optional description
    #[inline]
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Change the display name
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Whether the node is an activity
    #[inline]
    #[must_use]
    pub fn is_activity(&self) -> bool {
        self.kind.is_activity()
    }
}

/// Resource node known to be of kind `activity`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ResourceNode", into = "ResourceNode")]
pub struct Activity {
    node: ResourceNode,
}

impl Activity {
    /// Create a new activity node with a fresh id
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            node: ResourceNode::new(ResourceKind::Activity, name),
        }
    }

    /// With instructions shown before the activity's first step
    #[inline]
    #[must_use]
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.node = self.node.with_description(instructions);
        self
    }

    /// Activity id
    #[inline]
    #[must_use]
    pub fn id(&self) -> ResourceId {
        self.node.id()
    }

    /// Display name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        self.node.name()
    }

    /// Instructions, if any
    #[inline]
    #[must_use]
    pub fn instructions(&self) -> Option<&str> {
        self.node.description()
    }

    /// Underlying resource node
    #[inline]
    #[must_use]
    pub fn node(&self) -> &ResourceNode {
        &self.node
    }

    /// Consume into the underlying node
    #[inline]
    #[must_use]
    pub fn into_node(self) -> ResourceNode {
        self.node
    }
}

impl TryFrom<ResourceNode> for Activity {
    type Error = ModelError;

    fn try_from(node: ResourceNode) -> Result<Self, Self::Error> {
        if node.is_activity() {
            Ok(Self { node })
        } else {
            Err(ModelError::NotAnActivity {
                id: node.id(),
                kind: node.kind().clone(),
            })
        }
    }
}

impl From<Activity> for ResourceNode {
    fn from(activity: Activity) -> Self {
        activity.node
    }
}

impl AsRef<ResourceNode> for Activity {
    fn as_ref(&self) -> &ResourceNode {
        &self.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_kinds_parse() {
        assert_eq!("activity".parse::<ResourceKind>().unwrap(), ResourceKind::Activity);
        assert_eq!("url".parse::<ResourceKind>().unwrap(), ResourceKind::Url);
    }

    #[test]
    fn unknown_kind_is_kept_verbatim() {
        let kind: ResourceKind = "forum".parse().unwrap();
        assert_eq!(kind, ResourceKind::named("forum").unwrap());
        assert_eq!(kind.to_string(), "forum");
        assert!(!kind.is_activity());
    }

    #[test]
    fn kind_names_are_case_insensitive() {
        assert_eq!(ResourceKind::named("Activity").unwrap(), ResourceKind::Activity);
        assert_eq!(ResourceKind::named(" URL ").unwrap(), ResourceKind::Url);
        assert_eq!(ResourceKind::named("Forum").unwrap().as_str(), "forum");
    }

    #[test]
    fn serialized_kind_reads_back_unchanged() {
        for name in ["activity", "Activity", "file", "forum", "Quiz"] {
            let kind = ResourceKind::named(name).unwrap();
            let json = serde_json::to_string(&kind).unwrap();
            let back: ResourceKind = serde_json::from_str(&json).unwrap();
            assert_eq!(back, kind);
            assert_eq!(back.is_activity(), kind.is_activity());
        }
        assert_eq!(ResourceKind::named(""), Err(ModelError::EmptyKind));
    }

    #[test]
    fn serialized_node_reads_back_unchanged() {
        let node = ResourceNode::new(ResourceKind::named("Exercise").unwrap(), "drill");
        let json = serde_json::to_string(&node).unwrap();
        let back: ResourceNode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, node);
        assert!(!back.is_activity());
    }

    #[test]
    fn empty_kind_rejected() {
        assert_eq!("  ".parse::<ResourceKind>(), Err(ModelError::EmptyKind));
    }

    #[test]
    fn kind_serializes_lowercase() {
        let json = serde_json::to_string(&ResourceKind::Directory).unwrap();
        assert_eq!(json, "\"directory\"");
        let back: ResourceKind = serde_json::from_str("\"activity\"").unwrap();
        assert!(back.is_activity());
    }

    #[test]
    fn activity_from_activity_node() {
        let node = ResourceNode::new(ResourceKind::Activity, "Week 1").with_description("Read first");
        let id = node.id();
        let activity = Activity::try_from(node).unwrap();
        assert_eq!(activity.id(), id);
        assert_eq!(activity.instructions(), Some("Read first"));
    }

    #[test]
    fn activity_from_leaf_node_fails() {
        let node = ResourceNode::new(ResourceKind::File, "slides.pdf");
        let id = node.id();
        let err = Activity::try_from(node).unwrap_err();
        assert_eq!(
            err,
            ModelError::NotAnActivity {
                id,
                kind: ResourceKind::File
            }
        );
    }

    #[test]
    fn activity_deserialization_checks_kind() {
        let leaf = ResourceNode::new(ResourceKind::Text, "notes");
        let json = serde_json::to_string(&leaf).unwrap();
        assert!(serde_json::from_str::<Activity>(&json).is_err());

        let activity = Activity::new("Module");
        let json = serde_json::to_string(&activity).unwrap();
        let back: Activity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, activity);
    }

    #[test]
    fn rename_keeps_kind() {
        let mut node = ResourceNode::new(ResourceKind::File, "a.txt");
        node.rename("b.txt");
        assert_eq!(node.name(), "b.txt");
        assert_eq!(node.kind(), &ResourceKind::File);
    }
}
