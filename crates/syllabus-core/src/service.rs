//! Activity service
//!
//! Owns a store and hands out short-lived walkers and sequence managers
//! over it. Mutations flush the store once they succeed.

use crate::config::SyllabusConfig;
use crate::error::SyllabusError;
use crate::views::{InstructionsView, LeftMenu, PlayerView};
use syllabus_model::{ActivityLink, ResourceId, ResourceNode};
use syllabus_sequence::{ReorderReport, SequenceManager};
use syllabus_store::ActivityStore;
use syllabus_tree::{ActivityTreeWalker, NavigationEntry, ResourceSummary, TreeError};

/// Entry point for reading and rearranging activities
#[derive(Debug)]
pub struct ActivityService<S> {
    store: S,
    config: SyllabusConfig,
}

impl<S: ActivityStore> ActivityService<S> {
    /// Create service over `store`
    #[inline]
    #[must_use]
    pub fn new(store: S, config: SyllabusConfig) -> Self {
        Self { store, config }
    }

    /// Underlying store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &SyllabusConfig {
        &self.config
    }

    /// Walker configured with this service's limits
    #[must_use]
    pub fn walker(&self) -> ActivityTreeWalker<'_, S> {
        ActivityTreeWalker::new(&self.store).with_limits(self.config.traversal_limits())
    }

    /// Sequence manager configured with this service's policies
    #[must_use]
    pub fn sequence(&self) -> SequenceManager<'_, S> {
        SequenceManager::new(&self.store, self.config.sequence)
    }

    /// Store a resource node
    ///
    /// # Errors
    /// Returns error if the store refuses the node
    pub fn register(&self, node: ResourceNode) -> Result<ResourceId, SyllabusError> {
        let id = node.id();
        self.store.save_resource(node)?;
        self.store.flush()?;
        Ok(id)
    }

    /// Delete a resource together with its links
    ///
    /// # Errors
    /// Returns error if the resource does not exist
    pub fn remove(&self, id: ResourceId) -> Result<ResourceNode, SyllabusError> {
        let node = self.store.delete_resource(id)?;
        self.store.flush()?;
        tracing::info!(resource = %id, name = node.name(), "Removed resource");
        Ok(node)
    }

    /// Append `resource` to `activity`
    ///
    /// # Errors
    /// See [`SequenceManager::attach`]
    pub fn attach(
        &self,
        activity: ResourceId,
        resource: ResourceId,
    ) -> Result<ActivityLink, SyllabusError> {
        let link = self.sequence().attach(activity, resource)?;
        self.store.flush()?;
        Ok(link)
    }

    /// Remove `resource` from `activity`
    ///
    /// # Errors
    /// See [`SequenceManager::detach`]
    pub fn detach(
        &self,
        activity: ResourceId,
        resource: ResourceId,
    ) -> Result<Option<ActivityLink>, SyllabusError> {
        let removed = self.sequence().detach(activity, resource)?;
        if removed.is_some() {
            self.store.flush()?;
        }
        Ok(removed)
    }

    /// Set positions from an ordered list of resource ids
    ///
    /// # Errors
    /// See [`SequenceManager::reorder`]
    pub fn reorder(
        &self,
        activity: ResourceId,
        order: &[ResourceId],
    ) -> Result<ReorderReport, SyllabusError> {
        let report = self.sequence().reorder(activity, order)?;
        self.store.flush()?;
        Ok(report)
    }

    /// Leaf resources below `activity`
    ///
    /// # Errors
    /// See [`ActivityTreeWalker::count_steps`]
    pub fn count_steps(&self, activity: ResourceId) -> Result<u32, SyllabusError> {
        Ok(self.walker().count_steps(activity)?)
    }

    /// Linked nodes below `activity`, root excluded
    ///
    /// # Errors
    /// See [`ActivityTreeWalker::count_items`]
    pub fn count_items(&self, activity: ResourceId) -> Result<u32, SyllabusError> {
        Ok(self.walker().count_items(activity)?)
    }

    /// Navigation entries below `activity`, numbered from step 1 at the root
    ///
    /// # Errors
    /// See [`ActivityTreeWalker::build_navigation`]
    pub fn navigation(&self, activity: ResourceId) -> Result<Vec<NavigationEntry>, SyllabusError> {
        Ok(self.walker().navigation(activity)?)
    }

    /// Left menu of the activity player
    ///
    /// # Errors
    /// Returns error if the activity is invalid or its tree is corrupt
    pub fn left_menu(&self, activity: ResourceId) -> Result<LeftMenu, SyllabusError> {
        let walker = self.walker();
        let root = walker.load_activity(activity)?;
        let summary = ResourceSummary::from(root.node());

        let links = self.sequence().ordered_links(activity)?;
        let total_steps = walker.count_steps(activity)?;
        let total_items = walker.count_items(activity)?.saturating_add(1);
        let children = walker.navigation(activity)?;

        tracing::debug!(
            activity = %activity,
            total_steps,
            total_items,
            "Rendered left menu"
        );

        Ok(LeftMenu {
            activity: summary.clone(),
            links,
            root: NavigationEntry::branch(summary, 1, children),
            total_steps,
            total_items,
        })
    }

    /// Player layout opening on the first resource
    ///
    /// # Errors
    /// Returns error if the activity is invalid or its first link dangles
    pub fn player(&self, activity: ResourceId) -> Result<PlayerView, SyllabusError> {
        let root = self.walker().load_activity(activity)?;
        let first_resource = match self.sequence().ordered_links(activity)?.first() {
            Some(link) => Some(self.store.find_resource(link.resource())?.ok_or(
                TreeError::DanglingLink {
                    activity,
                    resource: link.resource(),
                },
            )?),
            None => None,
        };

        Ok(PlayerView {
            activity: ResourceSummary::from(root.node()),
            first_resource,
        })
    }

    /// Instructions of the activity
    ///
    /// # Errors
    /// Returns error if the activity is invalid
    pub fn instructions(&self, activity: ResourceId) -> Result<InstructionsView, SyllabusError> {
        let root = self.walker().load_activity(activity)?;
        Ok(InstructionsView {
            activity: ResourceSummary::from(root.node()),
            instructions: root.instructions().map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use syllabus_model::{Activity, ResourceKind};
    use syllabus_sequence::{DetachPolicy, SequenceConfig};
    use syllabus_store::{InMemoryStore, LinkRepository};
    use syllabus_test_utils::{nested_course, CourseBuilder};

    fn service_for(store: InMemoryStore) -> ActivityService<InMemoryStore> {
        ActivityService::new(store, SyllabusConfig::default())
    }

    #[test]
    fn left_menu_totals_and_root() {
        let course = nested_course();
        let root = course.id("root");
        let leaf1 = course.id("leaf1");
        let chapter = course.id("chapter");
        let service = service_for(course.store);

        let menu = service.left_menu(root).unwrap();
        assert_eq!(menu.total_steps, 3);
        assert_eq!(menu.total_items, 5);
        assert_eq!(menu.root.step, 1);
        assert_eq!(menu.root.resource.id, root);
        assert_eq!(
            menu.links.iter().map(ActivityLink::resource).collect::<Vec<_>>(),
            vec![leaf1, chapter]
        );

        let steps: Vec<u32> = menu.root.depth_first().iter().map(|e| e.step).collect();
        assert_eq!(steps, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn left_menu_of_empty_activity() {
        let course = CourseBuilder::new().activity("root").build();
        let root = course.id("root");
        let service = service_for(course.store);

        let menu = service.left_menu(root).unwrap();
        assert_eq!(menu.total_steps, 0);
        assert_eq!(menu.total_items, 1);
        assert!(menu.root.children().is_empty());
    }

    #[test]
    fn player_opens_on_lowest_position() {
        let course = nested_course();
        let root = course.id("root");
        let chapter = course.id("chapter");
        let service = service_for(course.store);

        service.reorder(root, &[chapter]).unwrap();
        // leaf1 and chapter now share position 0; leaf1 was linked first
        let view = service.player(root).unwrap();
        assert_eq!(view.first_resource.unwrap().name(), "leaf1");

        let empty = service.register(Activity::new("empty").into_node()).unwrap();
        assert_eq!(service.player(empty).unwrap().first_resource, None);
    }

    #[test]
    fn instructions_come_from_activity_description() {
        let service = service_for(InMemoryStore::new());
        let id = service
            .register(
                Activity::new("Lab")
                    .with_instructions("Wear goggles")
                    .into_node(),
            )
            .unwrap();
        let view = service.instructions(id).unwrap();
        assert_eq!(view.activity.name, "Lab");
        assert_eq!(view.instructions.as_deref(), Some("Wear goggles"));
    }

    #[test]
    fn mutations_flush_the_store() {
        let service = service_for(InMemoryStore::new());
        let week = service.register(Activity::new("Week").into_node()).unwrap();
        let page = service
            .register(ResourceNode::new(ResourceKind::Text, "page"))
            .unwrap();
        assert_eq!(service.store().flush_count(), 2);

        service.attach(week, page).unwrap();
        service.reorder(week, &[page]).unwrap();
        service.detach(week, page).unwrap();
        assert_eq!(service.store().flush_count(), 5);

        // lenient no-op does not flush
        assert_eq!(service.detach(week, page).unwrap(), None);
        assert_eq!(service.store().flush_count(), 5);
    }

    #[test]
    fn strict_detach_surfaces_not_found() {
        let config = SyllabusConfig::default()
            .with_sequence(SequenceConfig::default().with_detach(DetachPolicy::Strict));
        let course = nested_course();
        let root = course.id("root");
        let service = ActivityService::new(course.store, config);

        let err = service.detach(root, ResourceId::new()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn remove_cascades_and_updates_views() {
        let course = nested_course();
        let root = course.id("root");
        let chapter = course.id("chapter");
        let service = service_for(course.store);

        service.remove(chapter).unwrap();
        let menu = service.left_menu(root).unwrap();
        assert_eq!(menu.total_steps, 1);
        assert_eq!(menu.total_items, 2);
        assert_eq!(service.store().link_count(), 1);
    }

    #[test]
    fn config_depth_limit_reaches_the_walker() {
        let course = CourseBuilder::new()
            .activity("a")
            .activity("b")
            .leaf("x")
            .link("a", "b")
            .link("b", "x")
            .build();
        let a = course.id("a");
        let service =
            ActivityService::new(course.store, SyllabusConfig::default().with_max_depth(0));
        let err = service.count_steps(a).unwrap_err();
        assert!(err.is_precondition());
    }

    #[test]
    fn service_runs_over_shared_store() {
        let store = Arc::new(InMemoryStore::new());
        let service = ActivityService::new(Arc::clone(&store), SyllabusConfig::default());
        let week = service.register(Activity::new("Week").into_node()).unwrap();
        let page = service
            .register(ResourceNode::new(ResourceKind::Url, "docs"))
            .unwrap();
        service.attach(week, page).unwrap();
        assert_eq!(store.count_links_of(week).unwrap(), 1);
    }

    #[test]
    fn self_attach_is_a_precondition_error() {
        let service = service_for(InMemoryStore::new());
        let week = service.register(Activity::new("Week").into_node()).unwrap();
        let err = service.attach(week, week).unwrap_err();
        assert!(err.is_precondition());
        assert_eq!(service.count_items(week).unwrap(), 0);
    }
}
