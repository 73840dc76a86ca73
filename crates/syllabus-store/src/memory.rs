//! In-memory store
//!
//! Resources live in a [`DashMap`]; links in an insertion-ordered
//! [`IndexMap`] behind a single [`RwLock`], so link reads see a consistent
//! snapshot and [`LinkRepository::append_link`] can count and insert
//! atomically.
//!
//! Every operation touching both maps takes the links lock first and checks
//! or removes resources while holding it, so a link can never outlive the
//! cascade of a concurrent delete.

use crate::error::StoreError;
use crate::repository::{LinkRepository, ResourceRepository};
use dashmap::DashMap;
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use syllabus_model::{ActivityLink, LinkId, Position, ResourceId, ResourceNode};

/// Thread-safe in-memory implementation of both repositories
#[derive(Debug, Default)]
pub struct InMemoryStore {
    resources: DashMap<ResourceId, ResourceNode>,
    links: RwLock<IndexMap<LinkId, ActivityLink>>,
    flushes: AtomicU64,
}

impl InMemoryStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored resources
    #[must_use]
    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    /// Number of stored links across all activities
    #[must_use]
    pub fn link_count(&self) -> usize {
        self.links.read().len()
    }

    /// Number of times [`LinkRepository::flush`] was called
    #[must_use]
    pub fn flush_count(&self) -> u64 {
        self.flushes.load(Ordering::Relaxed)
    }

    fn require_resource(&self, id: ResourceId) -> Result<(), StoreError> {
        if self.resources.contains_key(&id) {
            Ok(())
        } else {
            Err(StoreError::ResourceNotFound(id))
        }
    }
}

impl ResourceRepository for InMemoryStore {
    fn find_resource(&self, id: ResourceId) -> Result<Option<ResourceNode>, StoreError> {
        Ok(self.resources.get(&id).map(|entry| entry.value().clone()))
    }

    fn save_resource(&self, node: ResourceNode) -> Result<(), StoreError> {
        if let Some(existing) = self.resources.get(&node.id()) {
            if existing.kind() != node.kind() {
                return Err(StoreError::KindChanged {
                    id: node.id(),
                    existing: existing.kind().clone(),
                    requested: node.kind().clone(),
                });
            }
        }
        self.resources.insert(node.id(), node);
        Ok(())
    }

    fn delete_resource(&self, id: ResourceId) -> Result<ResourceNode, StoreError> {
        let mut links = self.links.write();
        let (_, node) = self
            .resources
            .remove(&id)
            .ok_or(StoreError::ResourceNotFound(id))?;

        let before = links.len();
        links.retain(|_, link| link.activity() != id && link.resource() != id);
        tracing::debug!(
            resource = %id,
            cascaded = before - links.len(),
            "Deleted resource"
        );

        Ok(node)
    }

    fn contains_resource(&self, id: ResourceId) -> Result<bool, StoreError> {
        Ok(self.resources.contains_key(&id))
    }
}

impl LinkRepository for InMemoryStore {
    fn links_of(&self, activity: ResourceId) -> Result<Vec<ActivityLink>, StoreError> {
        Ok(self
            .links
            .read()
            .values()
            .filter(|link| link.activity() == activity)
            .cloned()
            .collect())
    }

    fn count_links_of(&self, activity: ResourceId) -> Result<usize, StoreError> {
        Ok(self
            .links
            .read()
            .values()
            .filter(|link| link.activity() == activity)
            .count())
    }

    fn save_link(&self, link: ActivityLink) -> Result<(), StoreError> {
        let mut links = self.links.write();
        self.require_resource(link.activity())?;
        self.require_resource(link.resource())?;
        links.insert(link.id(), link);
        Ok(())
    }

    fn delete_link(&self, id: LinkId) -> Result<ActivityLink, StoreError> {
        // shift_remove keeps the insertion order of the remaining links
        self.links
            .write()
            .shift_remove(&id)
            .ok_or(StoreError::LinkNotFound(id))
    }

    fn append_link(
        &self,
        activity: ResourceId,
        resource: ResourceId,
    ) -> Result<ActivityLink, StoreError> {
        let mut links = self.links.write();
        self.require_resource(activity)?;
        self.require_resource(resource)?;

        let count = links
            .values()
            .filter(|link| link.activity() == activity)
            .count();
        let link = ActivityLink::new(activity, resource, Position::from_index(count));
        links.insert(link.id(), link.clone());
        Ok(link)
    }

    fn flush(&self) -> Result<(), StoreError> {
        self.flushes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
