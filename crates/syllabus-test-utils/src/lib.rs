//! Testing utilities for Syllabus workspace
//!
//! Shared fixtures for building activity trees by key.

#![allow(missing_docs)]

use indexmap::IndexMap;
use syllabus_model::{Activity, ActivityLink, ResourceId, ResourceKind, ResourceNode};
use syllabus_store::{InMemoryStore, LinkRepository, ResourceRepository};

/// Builds an [`InMemoryStore`] from short resource keys
#[derive(Debug, Default)]
pub struct CourseBuilder {
    store: InMemoryStore,
    keys: IndexMap<String, ResourceId>,
}

impl CourseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activity(self, key: &str) -> Self {
        let node = Activity::new(key)
            .with_instructions(format!("Instructions for {key}"))
            .into_node();
        self.resource(key, node)
    }

    pub fn leaf(self, key: &str) -> Self {
        self.leaf_of(key, ResourceKind::File)
    }

    pub fn leaf_of(self, key: &str, kind: ResourceKind) -> Self {
        self.resource(key, ResourceNode::new(kind, key))
    }

    pub fn link(self, activity: &str, resource: &str) -> Self {
        let activity = self.id(activity);
        let resource = self.id(resource);
        self.store.append_link(activity, resource).unwrap();
        self
    }

    /// Link `activity` to each of `children` in order
    pub fn links(self, activity: &str, children: &[&str]) -> Self {
        children
            .iter()
            .fold(self, |builder, child| builder.link(activity, child))
    }

    pub fn build(self) -> Course {
        Course {
            store: self.store,
            keys: self.keys,
        }
    }

    fn resource(mut self, key: &str, node: ResourceNode) -> Self {
        assert!(!self.keys.contains_key(key), "duplicate fixture key {key}");
        self.keys.insert(key.to_string(), node.id());
        self.store.save_resource(node).unwrap();
        self
    }

    fn id(&self, key: &str) -> ResourceId {
        *self
            .keys
            .get(key)
            .unwrap_or_else(|| panic!("unknown fixture key {key}"))
    }
}

/// Store plus the key → id mapping used to build it
#[derive(Debug)]
pub struct Course {
    pub store: InMemoryStore,
    keys: IndexMap<String, ResourceId>,
}

impl Course {
    pub fn id(&self, key: &str) -> ResourceId {
        *self
            .keys
            .get(key)
            .unwrap_or_else(|| panic!("unknown fixture key {key}"))
    }

    pub fn ids(&self, keys: &[&str]) -> Vec<ResourceId> {
        keys.iter().map(|key| self.id(key)).collect()
    }

    /// Key of a resource id, for readable assertions
    pub fn key(&self, id: ResourceId) -> &str {
        self.keys
            .iter()
            .find(|(_, candidate)| **candidate == id)
            .map(|(key, _)| key.as_str())
            .unwrap_or_else(|| panic!("id {id} not part of fixture"))
    }

    /// Child keys of `activity` sorted by position
    pub fn ordered_keys(&self, activity: &str) -> Vec<&str> {
        let mut links = self.store.links_of(self.id(activity)).unwrap();
        links.sort_by_key(ActivityLink::position);
        links.iter().map(|link| self.key(link.resource())).collect()
    }
}

/// `root = [leaf1, chapter]`, `chapter = [leaf2, leaf3]`
pub fn nested_course() -> Course {
    CourseBuilder::new()
        .activity("root")
        .activity("chapter")
        .leaf("leaf1")
        .leaf("leaf2")
        .leaf("leaf3")
        .links("root", &["leaf1", "chapter"])
        .links("chapter", &["leaf2", "leaf3"])
        .build()
}

/// Activity with `n` leaf children named `leaf0..leafN`
pub fn flat_course(n: usize) -> Course {
    let mut builder = CourseBuilder::new().activity("root");
    for i in 0..n {
        let key = format!("leaf{i}");
        builder = builder.leaf(&key).link("root", &key);
    }
    builder.build()
}
