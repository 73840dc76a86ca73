//! Repository traits

use crate::error::StoreError;
use std::sync::Arc;
use syllabus_model::{ActivityLink, LinkId, Position, ResourceId, ResourceNode};

/// Lookup and lifecycle of resource nodes
pub trait ResourceRepository {
    /// Find a resource by id
    ///
    /// # Errors
    /// Returns error only on backend failure; a missing id is `Ok(None)`
    fn find_resource(&self, id: ResourceId) -> Result<Option<ResourceNode>, StoreError>;

    /// Insert or update a resource
    ///
    /// # Errors
    /// Returns [`StoreError::KindChanged`] if an existing resource with the
    /// same id has a different kind
    fn save_resource(&self, node: ResourceNode) -> Result<(), StoreError>;

    /// Delete a resource and every link that points to it or is owned by it
    ///
    /// # Errors
    /// Returns [`StoreError::ResourceNotFound`] for unknown ids
    fn delete_resource(&self, id: ResourceId) -> Result<ResourceNode, StoreError>;

    /// Check if a resource exists
    ///
    /// # Errors
    /// Returns error on backend failure
    fn contains_resource(&self, id: ResourceId) -> Result<bool, StoreError> {
        Ok(self.find_resource(id)?.is_some())
    }
}

/// The link queries traversal and sequencing rely on
pub trait LinkRepository {
    /// All links owned by `activity`
    ///
    /// No ordering guarantee; callers sort by position.
    ///
    /// # Errors
    /// Returns error on backend failure
    fn links_of(&self, activity: ResourceId) -> Result<Vec<ActivityLink>, StoreError>;

    /// Number of links owned by `activity`
    ///
    /// # Errors
    /// Returns error on backend failure
    fn count_links_of(&self, activity: ResourceId) -> Result<usize, StoreError> {
        Ok(self.links_of(activity)?.len())
    }

    /// Insert or update a link
    ///
    /// # Errors
    /// Returns [`StoreError::ResourceNotFound`] if either end is unknown
    fn save_link(&self, link: ActivityLink) -> Result<(), StoreError>;

    /// Delete a link by id
    ///
    /// # Errors
    /// Returns [`StoreError::LinkNotFound`] for unknown ids
    fn delete_link(&self, id: LinkId) -> Result<ActivityLink, StoreError>;

    /// Create a link positioned after the activity's existing links
    ///
    /// The default counts then saves, so two concurrent callers may compute
    /// the same position. Implementations that can do both under one lock or
    /// transaction should override it.
    ///
    /// # Errors
    /// Returns error if counting or saving fails
    fn append_link(
        &self,
        activity: ResourceId,
        resource: ResourceId,
    ) -> Result<ActivityLink, StoreError> {
        let position = Position::from_index(self.count_links_of(activity)?);
        let link = ActivityLink::new(activity, resource, position);
        self.save_link(link.clone())?;
        Ok(link)
    }

    /// Commit pending writes
    ///
    /// # Errors
    /// Returns error if the backend rejects the commit
    fn flush(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Anything that stores both resources and links
pub trait ActivityStore: ResourceRepository + LinkRepository {}

impl<T: ResourceRepository + LinkRepository + ?Sized> ActivityStore for T {}

impl<T: ResourceRepository + ?Sized> ResourceRepository for &T {
    fn find_resource(&self, id: ResourceId) -> Result<Option<ResourceNode>, StoreError> {
        (**self).find_resource(id)
    }

    fn save_resource(&self, node: ResourceNode) -> Result<(), StoreError> {
        (**self).save_resource(node)
    }

    fn delete_resource(&self, id: ResourceId) -> Result<ResourceNode, StoreError> {
        (**self).delete_resource(id)
    }

    fn contains_resource(&self, id: ResourceId) -> Result<bool, StoreError> {
        (**self).contains_resource(id)
    }
}

impl<T: LinkRepository + ?Sized> LinkRepository for &T {
    fn links_of(&self, activity: ResourceId) -> Result<Vec<ActivityLink>, StoreError> {
        (**self).links_of(activity)
    }

    fn count_links_of(&self, activity: ResourceId) -> Result<usize, StoreError> {
        (**self).count_links_of(activity)
    }

    fn save_link(&self, link: ActivityLink) -> Result<(), StoreError> {
        (**self).save_link(link)
    }

    fn delete_link(&self, id: LinkId) -> Result<ActivityLink, StoreError> {
        (**self).delete_link(id)
    }

    fn append_link(
        &self,
        activity: ResourceId,
        resource: ResourceId,
    ) -> Result<ActivityLink, StoreError> {
        (**self).append_link(activity, resource)
    }

    fn flush(&self) -> Result<(), StoreError> {
        (**self).flush()
    }
}

impl<T: ResourceRepository + ?Sized> ResourceRepository for Arc<T> {
    fn find_resource(&self, id: ResourceId) -> Result<Option<ResourceNode>, StoreError> {
        (**self).find_resource(id)
    }

    fn save_resource(&self, node: ResourceNode) -> Result<(), StoreError> {
        (**self).save_resource(node)
    }

    fn delete_resource(&self, id: ResourceId) -> Result<ResourceNode, StoreError> {
        (**self).delete_resource(id)
    }

    fn contains_resource(&self, id: ResourceId) -> Result<bool, StoreError> {
        (**self).contains_resource(id)
    }
}

impl<T: LinkRepository + ?Sized> LinkRepository for Arc<T> {
    fn links_of(&self, activity: ResourceId) -> Result<Vec<ActivityLink>, StoreError> {
        (**self).links_of(activity)
    }

    fn count_links_of(&self, activity: ResourceId) -> Result<usize, StoreError> {
        (**self).count_links_of(activity)
    }

    fn save_link(&self, link: ActivityLink) -> Result<(), StoreError> {
        (**self).save_link(link)
    }

    fn delete_link(&self, id: LinkId) -> Result<ActivityLink, StoreError> {
        (**self).delete_link(id)
    }

    fn append_link(
        &self,
        activity: ResourceId,
        resource: ResourceId,
    ) -> Result<ActivityLink, StoreError> {
        (**self).append_link(activity, resource)
    }

    fn flush(&self) -> Result<(), StoreError> {
        (**self).flush()
    }
}
