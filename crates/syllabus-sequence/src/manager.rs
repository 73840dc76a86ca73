//! Sequence manager
//!
//! Positions are assigned on attach (append to the end) and rewritten on
//! reorder. Neither operation renumbers links it was not asked about.

use crate::config::{DetachPolicy, DuplicatePolicy, SequenceConfig};
use crate::containment::ensure_acyclic;
use crate::error::SequenceError;
use crate::report::ReorderReport;
use std::collections::{HashMap, HashSet};
use syllabus_model::{Activity, ActivityLink, Position, ResourceId, ResourceNode};
use syllabus_store::ActivityStore;
use syllabus_tree::ordered_links;

/// Attaches, detaches and orders the links of activities
#[derive(Debug)]
pub struct SequenceManager<'s, S: ?Sized> {
    store: &'s S,
    config: SequenceConfig,
}

impl<'s, S: ActivityStore + ?Sized> SequenceManager<'s, S> {
    /// Create manager over `store`
    #[inline]
    #[must_use]
    pub fn new(store: &'s S, config: SequenceConfig) -> Self {
        Self { store, config }
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &SequenceConfig {
        &self.config
    }

    /// Link `resource` at the end of `activity`
    ///
    /// The new link's position is the activity's current link count.
    ///
    /// # Errors
    /// - [`SequenceError::ActivityNotFound`] / [`SequenceError::NotAnActivity`]
    /// - [`SequenceError::ResourceNotFound`]
    /// - [`SequenceError::AlreadyAttached`] under [`DuplicatePolicy::Reject`]
    /// - [`SequenceError::CycleDetected`] if `resource` is `activity` or one
    ///   of its ancestors
    pub fn attach(
        &self,
        activity: ResourceId,
        resource: ResourceId,
    ) -> Result<ActivityLink, SequenceError> {
        self.load_activity(activity)?;
        let child = self.load_resource(resource)?;

        if self.config.duplicates == DuplicatePolicy::Reject
            && self
                .store
                .links_of(activity)?
                .iter()
                .any(|link| link.binds(activity, resource))
        {
            return Err(SequenceError::AlreadyAttached { activity, resource });
        }

        if child.is_activity() {
            ensure_acyclic(self.store, activity, resource)?;
        }

        let link = self.store.append_link(activity, resource)?;
        tracing::info!(
            activity = %activity,
            resource = %resource,
            position = %link.position(),
            "Attached resource"
        );
        Ok(link)
    }

    /// Remove the first link (by position) binding `resource` into `activity`
    ///
    /// Returns the removed link, or `None` when there was nothing to remove
    /// under [`DetachPolicy::Lenient`]. The resource itself is untouched.
    ///
    /// # Errors
    /// [`SequenceError::LinkNotFound`] under [`DetachPolicy::Strict`]
    pub fn detach(
        &self,
        activity: ResourceId,
        resource: ResourceId,
    ) -> Result<Option<ActivityLink>, SequenceError> {
        let found = ordered_links(self.store, activity)?
            .into_iter()
            .find(|link| link.binds(activity, resource));

        match (found, self.config.detach) {
            (Some(link), _) => {
                let removed = self.store.delete_link(link.id())?;
                tracing::info!(
                    activity = %activity,
                    resource = %resource,
                    position = %removed.position(),
                    "Detached resource"
                );
                Ok(Some(removed))
            }
            (None, DetachPolicy::Lenient) => {
                tracing::debug!(
                    activity = %activity,
                    resource = %resource,
                    "Nothing to detach"
                );
                Ok(None)
            }
            (None, DetachPolicy::Strict) => {
                Err(SequenceError::LinkNotFound { activity, resource })
            }
        }
    }

    /// Give each listed resource's links the resource's index in `order`
    ///
    /// Links of resources absent from `order` keep their position. When an
    /// id is listed twice its last index wins; a resource linked twice gets
    /// the same position on both links.
    ///
    /// # Errors
    /// [`SequenceError::ActivityNotFound`] / [`SequenceError::NotAnActivity`],
    /// or a store failure while saving
    pub fn reorder(
        &self,
        activity: ResourceId,
        order: &[ResourceId],
    ) -> Result<ReorderReport, SequenceError> {
        self.load_activity(activity)?;

        let wanted: HashMap<ResourceId, Position> = order
            .iter()
            .enumerate()
            .map(|(index, id)| (*id, Position::from_index(index)))
            .collect();

        let mut report = ReorderReport::default();
        let mut linked = HashSet::new();

        for mut link in ordered_links(self.store, activity)? {
            linked.insert(link.resource());
            match wanted.get(&link.resource()) {
                Some(position) => {
                    link.set_position(*position);
                    report.updated.push(link.id());
                    self.store.save_link(link)?;
                }
                None => report.untouched.push(link.id()),
            }
        }

        let mut seen = HashSet::new();
        report.unmatched = order
            .iter()
            .filter(|id| !linked.contains(*id) && seen.insert(**id))
            .copied()
            .collect();

        if report.is_complete() {
            tracing::info!(
                activity = %activity,
                updated = report.updated.len(),
                "Reordered activity"
            );
        } else if self.config.warn_on_partial_reorder {
            tracing::warn!(
                activity = %activity,
                untouched = report.untouched.len(),
                unmatched = report.unmatched.len(),
                "Partial reorder: input does not match current links"
            );
        } else {
            tracing::debug!(
                activity = %activity,
                untouched = report.untouched.len(),
                unmatched = report.unmatched.len(),
                "Partial reorder: input does not match current links"
            );
        }

        Ok(report)
    }

    /// Links of `activity` by ascending position
    ///
    /// # Errors
    /// Returns error if the repository query fails
    pub fn ordered_links(&self, activity: ResourceId) -> Result<Vec<ActivityLink>, SequenceError> {
        Ok(ordered_links(self.store, activity)?)
    }

    fn load_activity(&self, id: ResourceId) -> Result<Activity, SequenceError> {
        let node = self
            .store
            .find_resource(id)?
            .ok_or(SequenceError::ActivityNotFound(id))?;
        Ok(Activity::try_from(node)?)
    }

    fn load_resource(&self, id: ResourceId) -> Result<ResourceNode, SequenceError> {
        self.store
            .find_resource(id)?
            .ok_or(SequenceError::ResourceNotFound(id))
    }
}
