//! Activity tree walker
//!
//! Every operation re-reads the repository; nothing is cached. Links are
//! visited in ascending position order at each level, whatever order the
//! repository returns them in.

use crate::error::TreeError;
use crate::navigation::{NavigationEntry, ResourceSummary};
use syllabus_model::{Activity, ActivityLink, ResourceId, ResourceNode};
use syllabus_store::{ActivityStore, LinkRepository, StoreError};

/// Default nesting limit
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Bounds applied to every traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraversalLimits {
    /// Deepest nesting level a traversal may reach below the root
    pub max_depth: usize,
}

impl TraversalLimits {
    /// With max depth
    #[inline]
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for TraversalLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Links of `activity` sorted by ascending position
///
/// The sort is stable, so links sharing a position keep repository order.
///
/// # Errors
/// Returns error if the repository query fails
pub fn ordered_links<S: LinkRepository + ?Sized>(
    store: &S,
    activity: ResourceId,
) -> Result<Vec<ActivityLink>, StoreError> {
    let mut links = store.links_of(activity)?;
    links.sort_by_key(ActivityLink::position);
    Ok(links)
}

/// Derives counts and navigation from an activity's subtree
#[derive(Debug)]
pub struct ActivityTreeWalker<'s, S: ?Sized> {
    store: &'s S,
    limits: TraversalLimits,
}

impl<'s, S: ActivityStore + ?Sized> ActivityTreeWalker<'s, S> {
    /// Create walker with default limits
    #[inline]
    #[must_use]
    pub fn new(store: &'s S) -> Self {
        Self {
            store,
            limits: TraversalLimits::default(),
        }
    }

    /// With traversal limits
    #[inline]
    #[must_use]
    pub fn with_limits(mut self, limits: TraversalLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Active limits
    #[inline]
    #[must_use]
    pub fn limits(&self) -> TraversalLimits {
        self.limits
    }

    /// Load `id` and check that it is an activity
    ///
    /// # Errors
    /// Returns [`TreeError::ActivityNotFound`] or [`TreeError::NotAnActivity`]
    pub fn load_activity(&self, id: ResourceId) -> Result<Activity, TreeError> {
        let node = self
            .store
            .find_resource(id)?
            .ok_or(TreeError::ActivityNotFound(id))?;
        Ok(Activity::try_from(node)?)
    }

    /// Number of leaf resources in the subtree
    ///
    /// Nested activities are not steps themselves; their leaves are.
    ///
    /// # Errors
    /// Returns error if the root is invalid, a link dangles, or the depth
    /// limit is exceeded
    pub fn count_steps(&self, activity: ResourceId) -> Result<u32, TreeError> {
        self.load_activity(activity)?;
        let steps = self.steps_below(activity, 0)?;
        tracing::debug!(activity = %activity, steps, "Counted steps");
        Ok(steps)
    }

    /// Number of linked nodes in the subtree, nested activities included
    ///
    /// The root itself is not counted.
    ///
    /// # Errors
    /// Same as [`Self::count_steps`]
    pub fn count_items(&self, activity: ResourceId) -> Result<u32, TreeError> {
        self.load_activity(activity)?;
        let items = self.items_below(activity, 0)?;
        tracing::debug!(activity = %activity, items, "Counted items");
        Ok(items)
    }

    /// Navigation entries for the subtree plus the last step number used
    ///
    /// The step counter is incremented once per visited link before the
    /// entry is numbered, and continues across nested activities. With
    /// `starting_step = 1` the first child is step 2; the returned step equals
    /// `starting_step` plus the number of entries in the tree.
    ///
    /// # Errors
    /// Same as [`Self::count_steps`]
    pub fn build_navigation(
        &self,
        activity: ResourceId,
        starting_step: u32,
    ) -> Result<(Vec<NavigationEntry>, u32), TreeError> {
        self.load_activity(activity)?;
        let (entries, last_step) = self.navigate(activity, starting_step, 0)?;
        tracing::debug!(
            activity = %activity,
            entries = entries.len(),
            last_step,
            "Built navigation"
        );
        Ok((entries, last_step))
    }

    /// Navigation entries numbered from a root at step 1
    ///
    /// # Errors
    /// Same as [`Self::count_steps`]
    pub fn navigation(&self, activity: ResourceId) -> Result<Vec<NavigationEntry>, TreeError> {
        self.build_navigation(activity, 1).map(|(entries, _)| entries)
    }

    /// Child resources of `activity` in position order
    fn children(&self, activity: ResourceId) -> Result<Vec<ResourceNode>, TreeError> {
        ordered_links(self.store, activity)?
            .into_iter()
            .map(|link| {
                self.store
                    .find_resource(link.resource())?
                    .ok_or(TreeError::DanglingLink {
                        activity,
                        resource: link.resource(),
                    })
            })
            .collect()
    }

    fn descend(&self, child: ResourceId, depth: usize) -> Result<usize, TreeError> {
        let depth = depth + 1;
        if depth > self.limits.max_depth {
            tracing::warn!(
                activity = %child,
                max_depth = self.limits.max_depth,
                "Traversal depth limit hit"
            );
            return Err(TreeError::DepthExceeded {
                activity: child,
                max_depth: self.limits.max_depth,
            });
        }
        Ok(depth)
    }

    fn steps_below(&self, activity: ResourceId, depth: usize) -> Result<u32, TreeError> {
        self.children(activity)?
            .iter()
            .try_fold(0u32, |steps, child| {
                let here = if child.is_activity() {
                    self.steps_below(child.id(), self.descend(child.id(), depth)?)?
                } else {
                    1
                };
                Ok(steps.saturating_add(here))
            })
    }

    fn items_below(&self, activity: ResourceId, depth: usize) -> Result<u32, TreeError> {
        self.children(activity)?
            .iter()
            .try_fold(0u32, |items, child| {
                let nested = if child.is_activity() {
                    self.items_below(child.id(), self.descend(child.id(), depth)?)?
                } else {
                    0
                };
                Ok(items.saturating_add(1).saturating_add(nested))
            })
    }

    fn navigate(
        &self,
        activity: ResourceId,
        mut step: u32,
        depth: usize,
    ) -> Result<(Vec<NavigationEntry>, u32), TreeError> {
        let children = self.children(activity)?;
        let mut entries = Vec::with_capacity(children.len());

        for child in &children {
            step = step.saturating_add(1);
            let summary = ResourceSummary::from(child);

            if child.is_activity() {
                let (nested, next) =
                    self.navigate(child.id(), step, self.descend(child.id(), depth)?)?;
                entries.push(NavigationEntry::branch(summary, step, nested));
                step = next;
            } else {
                entries.push(NavigationEntry::leaf(summary, step));
            }
        }

        Ok((entries, step))
    }
}
